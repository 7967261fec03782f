//! Errors raised while selecting and reading a release.

use super::date::DateError;
use super::version::VersionError;
use thiserror::Error;

/// Errors arising from release resolution and field access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReleaseError {
    /// The repository has no releases at all.
    #[error("repository has no releases")]
    NoReleases,

    /// A run identifier was supplied but no release carries it.
    #[error("no release matches run identifier {run_id}")]
    RunIdNotFound {
        /// The identifier that was searched for.
        run_id: i64,
    },

    /// The run identifier is not an integer.
    #[error("run identifier \"{value}\" is not an integer")]
    InvalidRunId {
        /// The rejected text.
        value: String,
    },

    /// A release record lacks a field the build needs.
    #[error("release is missing string field \"{field}\"")]
    MissingField {
        /// Name of the absent field.
        field: &'static str,
    },

    /// A release payload was not a JSON object.
    #[error("release record is not a JSON object")]
    NotAnObject,

    /// The release tag could not be encoded.
    #[error(transparent)]
    Version(#[from] VersionError),

    /// The publish timestamp could not be encoded.
    #[error(transparent)]
    Date(#[from] DateError),
}

/// Result type alias using [`ReleaseError`].
pub type Result<T> = std::result::Result<T, ReleaseError>;
