//! External files pulled from other repositories.
//!
//! # Sub-modules
//!
//! - [`error`] - Manifest and fetch errors.
//! - [`fetcher`] - Downloading entries into the staging tree.
//! - [`index`] - Name lookup over a repository listing (`RemoteFileIndex`).
//! - [`ini`] - INI reader used for the manifest file.
//! - [`manifest`] - The external-files manifest (`DependencyManifest`).

pub mod error;
pub mod fetcher;
pub mod index;
pub mod ini;
pub mod manifest;
