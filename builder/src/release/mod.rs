//! Release selection and the numeric encodings derived from it.
//!
//! # Sub-modules
//!
//! - [`build_version`] - Per-build facts (`BuildVersion`).
//! - [`date`] - Publish timestamp to runtime seconds.
//! - [`error`] - Semantic error types for release handling.
//! - [`record`] - Release records (`ReleaseRecord`).
//! - [`resolver`] - Run-identifier matching and release selection.
//! - [`stage`] - Deployment stage (`DeploymentStage`).
//! - [`version`] - Tag to integer surrogate (`EncodedVersion`).

pub mod build_version;
pub mod date;
pub mod error;
pub mod record;
pub mod resolver;
pub mod stage;
pub mod version;
