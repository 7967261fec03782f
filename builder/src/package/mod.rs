//! Assembly of the deployable add-in package.
//!
//! # Sub-modules
//!
//! - [`archive`] - Zipping the staging tree into the final archive.
//! - [`error`] - Packaging errors (`PackagingError`).
//! - [`metadata`] - Descriptor, definition and customization files.
//! - [`naming`] - Archive naming policy (`ArchiveName`, `TagSuffixPolicy`).
//! - [`source`] - Downloading and extracting the release source tree.

pub mod archive;
pub mod error;
pub mod metadata;
pub mod naming;
pub mod source;
