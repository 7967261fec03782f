//! Staging the release's source tree.
//!
//! The release's source archive wraps everything in one top-level folder
//! (`<owner>-<repo>-<sha>/`). Extraction strips that folder so the staging
//! root holds the repository contents directly.

use super::error::PackagingError;
use crate::github::client::GitHubApi;
use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use std::io::Cursor;
use std::path::{Component, Path, PathBuf};

/// Download `zipball_url` and extract it into a fresh `staging_root`.
///
/// # Errors
///
/// Returns [`PackagingError::Transport`] when the download fails, otherwise
/// as [`extract_source_archive`].
pub fn stage_source(
    api: &dyn GitHubApi,
    zipball_url: &str,
    staging_root: &Utf8Path,
) -> Result<usize, PackagingError> {
    let bytes = api.fetch_bytes(zipball_url)?;
    debug!("source archive is {} bytes", bytes.len());
    extract_source_archive(&bytes, staging_root)
}

/// Extract a source archive held in memory into `staging_root`.
///
/// Any existing tree at `staging_root` is removed first. Returns the number of
/// files written.
///
/// # Errors
///
/// Returns [`PackagingError::PathTraversal`] for entries that would escape
/// the destination, [`PackagingError::UnexpectedLayout`] when entries do not
/// share one top-level folder, [`PackagingError::EmptyArchive`] when no file
/// is found, and I/O or zip errors otherwise.
pub fn extract_source_archive(
    bytes: &[u8],
    staging_root: &Utf8Path,
) -> Result<usize, PackagingError> {
    reset_directory(staging_root)?;

    let zip_error = |source: zip::result::ZipError| PackagingError::Zip {
        path: Utf8PathBuf::from("<source archive>"),
        source,
    };
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).map_err(zip_error)?;
    let mut top_level: Option<String> = None;
    let mut files = 0_usize;

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).map_err(zip_error)?;
        let enclosed = entry
            .enclosed_name()
            .ok_or_else(|| PackagingError::PathTraversal {
                path: entry.name().to_owned(),
            })?;
        let Some(inner) = strip_top_level(&enclosed, &mut top_level)? else {
            continue;
        };
        let relative = Utf8PathBuf::from_path_buf(inner).map_err(PackagingError::NonUtf8Path)?;
        let target = staging_root.join(&relative);

        if entry.is_dir() {
            std::fs::create_dir_all(&target).map_err(PackagingError::io(&target))?;
            continue;
        }
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).map_err(PackagingError::io(parent))?;
        }
        let mut out = std::fs::File::create(&target).map_err(PackagingError::io(&target))?;
        std::io::copy(&mut entry, &mut out).map_err(PackagingError::io(&target))?;
        files += 1;
    }

    if files == 0 {
        return Err(PackagingError::EmptyArchive);
    }
    debug!("extracted {files} file(s) into {staging_root}");
    Ok(files)
}

/// Remove `path` if present and recreate it empty.
pub(crate) fn reset_directory(path: &Utf8Path) -> Result<(), PackagingError> {
    if path.exists() {
        std::fs::remove_dir_all(path).map_err(PackagingError::io(path))?;
    }
    std::fs::create_dir_all(path).map_err(PackagingError::io(path))
}

/// Drop the first component of `path`, checking it matches the folder seen
/// on earlier entries. Returns `None` for the top-level folder itself.
fn strip_top_level(
    path: &Path,
    top_level: &mut Option<String>,
) -> Result<Option<PathBuf>, PackagingError> {
    let mut components = path.components();
    let Some(Component::Normal(head)) = components.next() else {
        return Err(PackagingError::PathTraversal {
            path: path.display().to_string(),
        });
    };
    let first = head.to_string_lossy().into_owned();
    match top_level {
        Some(root) if *root != first => {
            return Err(PackagingError::UnexpectedLayout {
                root: root.clone(),
                path: path.display().to_string(),
            });
        }
        Some(_) => {}
        None => *top_level = Some(first),
    }

    let rest: PathBuf = components.collect();
    if rest
        .components()
        .any(|component| !matches!(component, Component::Normal(_) | Component::CurDir))
    {
        return Err(PackagingError::PathTraversal {
            path: path.display().to_string(),
        });
    }
    if rest.as_os_str().is_empty() {
        Ok(None)
    } else {
        Ok(Some(rest))
    }
}
