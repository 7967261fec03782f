//! Errors raised while reading the dependency manifest and fetching files.

use crate::github::error::TransportError;
use camino::Utf8PathBuf;
use thiserror::Error;

/// The manifest could not be read or failed validation.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The manifest file could not be read.
    #[error("failed to read manifest {path}: {source}")]
    Io {
        /// Path that was read.
        path: Utf8PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The text is not valid INI, or a pair sits outside any section.
    #[error("manifest is malformed: {reason}")]
    Syntax {
        /// What was wrong with it.
        reason: String,
    },

    /// The same section appears twice.
    #[error("manifest section [{section}] is defined more than once")]
    DuplicateSection {
        /// Section name.
        section: String,
    },

    /// The same key appears twice within one section.
    #[error("manifest key \"{key}\" is defined more than once in [{section}]")]
    DuplicateKey {
        /// Section containing the key.
        section: String,
        /// The repeated key.
        key: String,
    },

    /// The required section is absent.
    #[error("manifest has no [{section}] section")]
    MissingSection {
        /// Name of the section that was expected.
        section: String,
    },

    /// An entry does not split into exactly six fields.
    #[error("manifest entry \"{key}\" has {found} fields, expected {expected}")]
    FieldCount {
        /// Key of the offending entry.
        key: String,
        /// Number of fields found.
        found: usize,
        /// Number of fields required.
        expected: usize,
    },
}

/// A dependency could not be fetched or placed.
#[derive(Debug, Error)]
pub enum FetchError {
    /// No entry with the requested name exists in the root or any immediate
    /// subdirectory of the source repository.
    #[error("{file} not found in {repository} (ref: {reference})")]
    Unresolvable {
        /// Requested file name.
        file: String,
        /// `owner/repo` searched.
        repository: String,
        /// Branch, tag or commit searched, or `latest`.
        reference: String,
    },

    /// The name resolves to something that cannot be downloaded.
    #[error("{file} in {repository} is not a downloadable file")]
    NotAFile {
        /// Requested file name.
        file: String,
        /// `owner/repo` searched.
        repository: String,
    },

    /// The manifest names an owner/repo pair that is not a valid repository.
    #[error("manifest entry \"{key}\" names an invalid repository: {reason}")]
    InvalidSource {
        /// Manifest key of the entry.
        key: String,
        /// Why the repository was rejected.
        reason: String,
    },

    /// The destination would land outside the staging tree.
    #[error("destination \"{destination}\" escapes the staging directory")]
    UnsafeDestination {
        /// The rejected folder or file name.
        destination: String,
    },

    /// Talking to the hosting service failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Writing the fetched file failed.
    #[error("failed to write {path}: {source}")]
    Io {
        /// Path that was written.
        path: Utf8PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
}
