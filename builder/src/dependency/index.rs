//! Name-to-entry index of a source repository.
//!
//! Files are looked up by base name alone. The index covers the repository
//! root and the immediate children of each root directory, and is built in
//! two explicit passes so that every directory is listed exactly once:
//!
//! 1. list the root and record every entry;
//! 2. list each directory found in pass 1 and record its children.
//!
//! Directories found in pass 2 are recorded but never listed. When two entries
//! share a name the one recorded later wins, so a file in a subdirectory
//! shadows a root entry with the same name.

use crate::github::client::GitHubApi;
use crate::github::contents::{ContentEntry, EntryKind};
use crate::github::error::TransportError;
use crate::github::repo::RepoSlug;
use log::{debug, trace};
use std::collections::HashMap;
use std::fmt;

/// Sentinel meaning "the repository's default branch".
pub const LATEST: &str = "latest";

/// Which revision of a source repository to read.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VersionRef {
    /// The default branch; no ref is sent.
    Latest,
    /// A branch, tag or commit.
    Named(String),
}

impl VersionRef {
    /// Interpret a manifest value; `latest` in any case is the sentinel.
    ///
    /// # Examples
    ///
    /// ```
    /// use jaab::dependency::index::VersionRef;
    ///
    /// assert_eq!(VersionRef::parse("LATEST"), VersionRef::Latest);
    /// assert_eq!(VersionRef::parse("v1.2.0"), VersionRef::Named("v1.2.0".to_owned()));
    /// ```
    #[must_use]
    pub fn parse(text: &str) -> Self {
        if text.trim().eq_ignore_ascii_case(LATEST) {
            Self::Latest
        } else {
            Self::Named(text.trim().to_owned())
        }
    }

    /// The `ref` query value, if one should be sent.
    #[must_use]
    pub fn as_query(&self) -> Option<String> {
        match self {
            Self::Latest => None,
            Self::Named(name) => Some(name.clone()),
        }
    }
}

impl fmt::Display for VersionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latest => f.write_str(LATEST),
            Self::Named(name) => f.write_str(name),
        }
    }
}

/// Flat map from base name to listing entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteFileIndex {
    entries: HashMap<String, ContentEntry>,
}

impl RemoteFileIndex {
    /// List `repo` at `version_ref` and index the root plus one level down.
    ///
    /// # Errors
    ///
    /// Returns the first [`TransportError`] raised by a listing.
    pub fn build(
        api: &dyn GitHubApi,
        repo: &RepoSlug,
        version_ref: &VersionRef,
    ) -> Result<Self, TransportError> {
        let reference = version_ref.as_query();
        let root = api.list_contents(repo, "", reference.clone())?;
        debug!("{repo}@{version_ref}: {} root entries", root.len());

        let mut index = Self::default();
        for entry in &root {
            index.record(entry.clone());
        }

        for dir in root.iter().filter(|entry| entry.kind == EntryKind::Dir) {
            let children = api.list_contents(repo, &dir.name, reference.clone())?;
            trace!("{repo}@{version_ref}: {} entries in {}", children.len(), dir.name);
            for child in children {
                index.record(child);
            }
        }

        Ok(index)
    }

    fn record(&mut self, entry: ContentEntry) {
        self.entries.insert(entry.name.clone(), entry);
    }

    /// Look up an entry by exact base name.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&ContentEntry> {
        self.entries.get(name)
    }

    /// Number of distinct names indexed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
