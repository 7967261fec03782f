//! Error types for the add-in builder.
//!
//! Each concern has its own error enum; [`BuilderError`] rolls them up so the
//! pipeline can use `?` throughout. Every variant is fatal to the run.

use crate::dependency::error::{FetchError, ManifestError};
use crate::github::error::TransportError;
use crate::package::error::PackagingError;
use crate::release::error::ReleaseError;
use thiserror::Error;

/// Errors that can occur during a build.
#[derive(Debug, Error)]
pub enum BuilderError {
    /// A configuration input is missing or malformed.
    #[error("invalid setting {name}: {reason}")]
    InvalidSetting {
        /// The flag or environment variable at fault.
        name: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// Release selection or version derivation failed.
    #[error(transparent)]
    Release(#[from] ReleaseError),

    /// The dependency manifest could not be read or validated.
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// An external file could not be fetched.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Staging, metadata or archive creation failed.
    #[error(transparent)]
    Packaging(#[from] PackagingError),

    /// A call to the hosting service failed.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Result type alias using [`BuilderError`].
pub type Result<T> = std::result::Result<T, BuilderError>;
