//! Errors arising while assembling the add-in package.

use crate::github::error::TransportError;
use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors arising from staging, metadata generation and archiving.
#[derive(Debug, Error)]
pub enum PackagingError {
    /// A filesystem operation failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Path being read or written.
        path: Utf8PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Reading or writing a zip archive failed.
    #[error("zip error on {path}: {source}")]
    Zip {
        /// Archive path (or a description of the in-memory source).
        path: Utf8PathBuf,
        /// The underlying error.
        #[source]
        source: zip::result::ZipError,
    },

    /// An archive entry would land outside the destination directory.
    #[error("path traversal detected: {path}")]
    PathTraversal {
        /// The offending entry name.
        path: String,
    },

    /// The source archive does not have a single top-level folder.
    #[error("source archive entry {path} is outside the top-level folder {root}")]
    UnexpectedLayout {
        /// The first top-level folder seen.
        root: String,
        /// The entry that does not sit under it.
        path: String,
    },

    /// The source archive contains no files.
    #[error("source archive contains no files")]
    EmptyArchive,

    /// A path in the staging tree is not valid UTF-8.
    #[error("path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(std::path::PathBuf),

    /// Walking the staging tree failed.
    #[error("failed to walk staging tree: {0}")]
    Walk(#[from] walkdir::Error),

    /// Downloading the source archive failed.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl PackagingError {
    pub(crate) fn io(path: impl Into<Utf8PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let owned = path.into();
        move |source| Self::Io {
            path: owned,
            source,
        }
    }
}
