//! Release-driven builder for JMP add-in packages.
//!
//! This crate turns a tagged release of an add-in repository into a
//! `.jmpaddin` archive and attaches it to that release. It is used by the
//! `jaab` CLI binary, which a release workflow runs as a single step, and can
//! be driven programmatically against any [`github::client::GitHubApi`]
//! implementation.
//!
//! # Modules
//!
//! - [`cli`] - Command-line and environment inputs
//! - [`dependency`] - External-file manifest and fetching
//! - [`error`] - Error roll-up for the build
//! - [`github`] - REST client for releases, contents and uploads
//! - [`output`] - User-facing progress lines
//! - [`package`] - Staging, metadata files and archive creation
//! - [`pipeline`] - Build orchestration
//! - [`release`] - Release selection and version encodings

pub mod cli;
pub mod dependency;
pub mod error;
pub mod github;
pub mod output;
pub mod package;
pub mod pipeline;
pub mod release;
