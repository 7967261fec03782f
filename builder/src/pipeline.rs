//! Build pipeline orchestration.
//!
//! [`run_build`] runs every step of a build in order against an injected
//! [`GitHubApi`]. Steps are strictly sequential and the first failure aborts
//! the run. Each run starts from a clean staging tree.

use crate::cli::BuildSettings;
use crate::dependency::fetcher::fetch_dependencies;
use crate::dependency::manifest::{DEFAULT_SECTION, DependencyManifest};
use crate::error::Result;
use crate::github::client::GitHubApi;
use crate::output::{success_message, write_stderr_line};
use crate::package::archive::create_archive;
use crate::package::error::PackagingError;
use crate::package::metadata::{
    workflow_file, write_build_descriptor, write_customization, write_definition,
};
use crate::package::naming::ArchiveName;
use crate::package::source::stage_source;
use crate::release::build_version::BuildVersion;
use crate::release::record::ReleaseRecord;
use crate::release::resolver::resolve_release;
use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, warn};
use std::io::Write;

/// Directory holding build inputs that never ship in the package.
const GITHUB_DIR: &str = ".github";

/// What a successful build produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutcome {
    /// Version facts of the release that was built.
    pub build: BuildVersion,
    /// Chosen archive name.
    pub archive_name: ArchiveName,
    /// Location of the final archive.
    pub archive_path: Utf8PathBuf,
    /// External files written into the package, in manifest order.
    pub dependencies: Vec<Utf8PathBuf>,
    /// Whether the archive was attached to the release.
    pub uploaded: bool,
}

/// Run a complete build.
///
/// Steps, in order: list releases, select one, derive its version facts,
/// stage its source, write the metadata files, read the manifest, drop the
/// workflow directory, fetch external files, archive the staging tree,
/// upload the archive.
///
/// # Errors
///
/// Returns the first error raised by any step.
pub fn run_build(
    settings: &BuildSettings,
    api: &dyn GitHubApi,
    stderr: &mut dyn Write,
) -> Result<BuildOutcome> {
    let releases = api.list_releases(&settings.repo)?;
    debug!("{} release(s) listed for {}", releases.len(), settings.repo);
    let release = resolve_release(&releases, settings.run_id)?;
    let build = BuildVersion::derive(release)?;
    if build.version().is_fail() {
        warn!("tag {} could not be encoded; version recorded as fail", build.tag());
    }
    if !settings.quiet {
        write_stderr_line(
            stderr,
            format!(
                "Building {} {} (version {}, build date {}, {})",
                settings.repo,
                build.tag(),
                build.version(),
                build.build_date(),
                build.stage()
            ),
        );
    }

    let staging = settings.staging_root();
    stage_source(api, release.zipball_url()?, &staging)?;
    write_metadata(settings, &build, &staging)?;
    let manifest = load_manifest(settings, &staging, stderr)?;
    remove_workflows(&staging)?;

    let dependencies = if manifest.is_empty() {
        Vec::new()
    } else {
        let mut sink = std::io::sink();
        let progress: &mut dyn Write = if settings.quiet { &mut sink } else { &mut *stderr };
        fetch_dependencies(api, &manifest, &staging, progress)?
    };

    let archive_name = ArchiveName::decide(
        &settings.identity.name,
        build.tag(),
        build.stage(),
        settings.tag_suffix,
    );
    let archive_path = create_archive(&staging, &settings.work_dir, &archive_name)?;
    std::fs::remove_dir_all(&staging).map_err(PackagingError::io(&staging))?;

    let uploaded = if settings.skip_upload {
        debug!("upload skipped");
        false
    } else {
        upload(api, release, &archive_name, &archive_path)?;
        true
    };

    if !settings.quiet {
        write_stderr_line(
            stderr,
            success_message(&archive_name.file_name(), &settings.work_dir, !uploaded),
        );
    }

    Ok(BuildOutcome {
        build,
        archive_name,
        archive_path,
        dependencies,
        uploaded,
    })
}

fn write_metadata(settings: &BuildSettings, build: &BuildVersion, staging: &Utf8Path) -> Result<()> {
    if settings.write_descriptor {
        write_build_descriptor(staging, &settings.identity, build)?;
    }
    write_definition(staging, &settings.identity, build)?;
    write_customization(
        staging,
        &settings.customization_template,
        build.tag(),
        &settings.identity.id,
    )?;
    Ok(())
}

fn load_manifest(
    settings: &BuildSettings,
    staging: &Utf8Path,
    stderr: &mut dyn Write,
) -> Result<DependencyManifest> {
    let Some(name) = &settings.manifest_file else {
        return Ok(DependencyManifest::default());
    };
    let manifest = DependencyManifest::load(&workflow_file(staging, name), DEFAULT_SECTION)?;
    if !settings.quiet {
        write_stderr_line(
            stderr,
            format!("Manifest {name} lists {} external file(s)", manifest.entries().len()),
        );
    }
    Ok(manifest)
}

/// Remove the top-level `.github` directory from the staging tree.
fn remove_workflows(staging: &Utf8Path) -> Result<()> {
    let dir = staging.join(GITHUB_DIR);
    if dir.exists() {
        std::fs::remove_dir_all(&dir).map_err(PackagingError::io(&dir))?;
        debug!("removed {dir}");
    }
    Ok(())
}

fn upload(
    api: &dyn GitHubApi,
    release: &ReleaseRecord,
    archive_name: &ArchiveName,
    archive_path: &Utf8Path,
) -> Result<()> {
    let upload_url = release.upload_url()?;
    let bytes = std::fs::read(archive_path).map_err(PackagingError::io(archive_path))?;
    api.upload_asset(upload_url, &archive_name.file_name(), &bytes)?;
    Ok(())
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
