//! Creating the final add-in archive from the staging tree.

use super::error::PackagingError;
use super::naming::ArchiveName;
use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, trace};
use walkdir::WalkDir;
use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

/// Zip the contents of `staging_root` into `<output_dir>/<base>.zip`, then
/// rename it to `<base>.jmpaddin`.
///
/// Entry names are relative to `staging_root` and use `/` separators. Every
/// directory gets its own entry so empty folders survive. Entries are written
/// in sorted order. An existing archive of the same name is replaced.
///
/// # Errors
///
/// Returns [`PackagingError`] when the tree cannot be walked or read, or the
/// archive cannot be written or renamed.
pub fn create_archive(
    staging_root: &Utf8Path,
    output_dir: &Utf8Path,
    name: &ArchiveName,
) -> Result<Utf8PathBuf, PackagingError> {
    let zip_path = output_dir.join(format!("{}.zip", name.base()));
    let final_path = output_dir.join(name.file_name());

    let file = std::fs::File::create(&zip_path).map_err(PackagingError::io(&zip_path))?;
    let mut writer = zip::ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let zip_error = |source: zip::result::ZipError| PackagingError::Zip {
        path: zip_path.clone(),
        source,
    };

    let mut files = 0_usize;
    for walked in WalkDir::new(staging_root).min_depth(1).sort_by_file_name() {
        let entry = walked?;
        let relative = entry_name(staging_root, entry.path())?;
        if entry.file_type().is_dir() {
            trace!("adding directory {relative}/");
            writer
                .add_directory(format!("{relative}/"), options)
                .map_err(zip_error)?;
            continue;
        }

        trace!("adding file {relative}");
        writer.start_file(relative, options).map_err(zip_error)?;
        let mut input = std::fs::File::open(entry.path()).map_err(|source| PackagingError::Io {
            path: Utf8PathBuf::from(entry.path().display().to_string()),
            source,
        })?;
        std::io::copy(&mut input, &mut writer).map_err(PackagingError::io(&zip_path))?;
        files += 1;
    }
    writer.finish().map_err(zip_error)?;

    std::fs::rename(&zip_path, &final_path).map_err(PackagingError::io(&final_path))?;
    debug!("archived {files} file(s) into {final_path}");
    Ok(final_path)
}

/// The archive entry name for `path`: relative to `root`, `/`-separated.
fn entry_name(root: &Utf8Path, path: &std::path::Path) -> Result<String, PackagingError> {
    let utf8 =
        Utf8Path::from_path(path).ok_or_else(|| PackagingError::NonUtf8Path(path.to_path_buf()))?;
    let relative = utf8
        .strip_prefix(root)
        .map_err(|_| PackagingError::PathTraversal {
            path: utf8.to_string(),
        })?;
    Ok(relative
        .components()
        .map(|component| component.as_str())
        .collect::<Vec<_>>()
        .join("/"))
}
