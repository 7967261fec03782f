//! Hosting-service access: releases, contents listings, downloads, uploads.
//!
//! # Sub-modules
//!
//! - [`client`] - The [`client::GitHubApi`] seam and its `ureq` implementation.
//! - [`contents`] - Contents listing entries (`ContentEntry`).
//! - [`error`] - Transport failures (`TransportError`).
//! - [`repo`] - `owner/repo` identifiers (`RepoSlug`).

pub mod client;
pub mod contents;
pub mod error;
pub mod repo;
