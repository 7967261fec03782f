//! Fetching manifest entries into the staging tree.

use super::error::FetchError;
use super::index::{RemoteFileIndex, VersionRef};
use super::manifest::{DependencyManifest, ManifestEntry};
use crate::github::client::GitHubApi;
use crate::github::contents::EntryKind;
use crate::github::repo::RepoSlug;
use crate::output::write_stderr_line;
use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use log::debug;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::io::Write;

/// Destination folder value meaning "the staging root".
pub const MAIN_FOLDER: &str = "main";

/// Fetch every manifest entry, in order, into `staging_root`.
///
/// The index for a given repository and revision is built once and reused by
/// later entries naming the same pair. The first failure aborts the run;
/// files already written stay in place.
///
/// # Errors
///
/// Returns a [`FetchError`] when an entry names an invalid repository, a file
/// cannot be found or downloaded, or the destination is unsafe or unwritable.
pub fn fetch_dependencies(
    api: &dyn GitHubApi,
    manifest: &DependencyManifest,
    staging_root: &Utf8Path,
    stderr: &mut dyn Write,
) -> Result<Vec<Utf8PathBuf>, FetchError> {
    let mut indices: HashMap<(RepoSlug, VersionRef), RemoteFileIndex> = HashMap::new();
    let mut written = Vec::with_capacity(manifest.entries().len());

    for entry in manifest.entries() {
        let repo = RepoSlug::new(&entry.source_owner, &entry.source_repo).map_err(|err| {
            FetchError::InvalidSource {
                key: entry.key.clone(),
                reason: err.to_string(),
            }
        })?;
        let version_ref = entry.version_ref();
        let index = match indices.entry((repo.clone(), version_ref.clone())) {
            Entry::Occupied(cached) => cached.into_mut(),
            Entry::Vacant(slot) => slot.insert(RemoteFileIndex::build(api, &repo, &version_ref)?),
        };

        let path = fetch_entry(api, index, entry, &repo, &version_ref, staging_root)?;
        write_stderr_line(
            stderr,
            format_args!(
                "Fetched {} from {repo}@{version_ref} -> {path}",
                entry.source_file_name
            ),
        );
        written.push(path);
    }

    Ok(written)
}

fn fetch_entry(
    api: &dyn GitHubApi,
    index: &RemoteFileIndex,
    entry: &ManifestEntry,
    repo: &RepoSlug,
    version_ref: &VersionRef,
    staging_root: &Utf8Path,
) -> Result<Utf8PathBuf, FetchError> {
    let found = index
        .resolve(&entry.source_file_name)
        .ok_or_else(|| unresolvable(entry, repo, version_ref))?;
    let url = match (&found.kind, &found.download_url) {
        (EntryKind::File, Some(url)) => url,
        _ => {
            return Err(FetchError::NotAFile {
                file: entry.source_file_name.clone(),
                repository: repo.to_string(),
            });
        }
    };

    let target = resolve_destination(
        staging_root,
        &entry.destination_folder,
        &entry.destination_file_name,
    )?;
    let bytes = api.fetch_bytes(url)?;

    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent).map_err(|source| FetchError::Io {
            path: parent.to_owned(),
            source,
        })?;
    }
    std::fs::write(&target, &bytes).map_err(|source| FetchError::Io {
        path: target.clone(),
        source,
    })?;
    debug!("wrote {} bytes to {target}", bytes.len());
    Ok(target)
}

fn unresolvable(entry: &ManifestEntry, repo: &RepoSlug, version_ref: &VersionRef) -> FetchError {
    FetchError::Unresolvable {
        file: entry.source_file_name.clone(),
        repository: repo.to_string(),
        reference: version_ref.to_string(),
    }
}

/// Work out where a fetched file is written.
///
/// `main` (any case) places the file at the staging root; any other folder is
/// taken as a path relative to it. Absolute folders, `..` components, and file
/// names that are not a single plain component are rejected.
///
/// # Errors
///
/// Returns [`FetchError::UnsafeDestination`] for rejected folders or names.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use jaab::dependency::fetcher::resolve_destination;
///
/// let root = Utf8Path::new("/work/tool");
/// let path = resolve_destination(root, "Main", "Utils.jsl").expect("safe");
/// assert_eq!(path, Utf8Path::new("/work/tool/Utils.jsl"));
/// let nested = resolve_destination(root, "Libs/Core", "Utils.jsl").expect("safe");
/// assert_eq!(nested, Utf8Path::new("/work/tool/Libs/Core/Utils.jsl"));
/// assert!(resolve_destination(root, "../outside", "x").is_err());
/// ```
pub fn resolve_destination(
    staging_root: &Utf8Path,
    folder: &str,
    file_name: &str,
) -> Result<Utf8PathBuf, FetchError> {
    let unsafe_destination = |destination: &str| FetchError::UnsafeDestination {
        destination: destination.to_owned(),
    };

    let mut file_components = Utf8Path::new(file_name).components();
    match (file_components.next(), file_components.next()) {
        (Some(Utf8Component::Normal(_)), None) => {}
        _ => return Err(unsafe_destination(file_name)),
    }

    let mut target = staging_root.to_owned();
    if !folder.eq_ignore_ascii_case(MAIN_FOLDER) {
        for component in Utf8Path::new(folder).components() {
            match component {
                Utf8Component::Normal(part) => target.push(part),
                Utf8Component::CurDir => {}
                Utf8Component::ParentDir | Utf8Component::RootDir | Utf8Component::Prefix(_) => {
                    return Err(unsafe_destination(folder));
                }
            }
        }
    }
    target.push(file_name);
    Ok(target)
}

#[cfg(test)]
#[path = "fetcher_tests.rs"]
mod tests;
