//! Entries returned by the repository contents listing.

use serde::Deserialize;

/// What kind of object a listing entry describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A regular file with a download URL.
    File,
    /// A directory; its children need a second listing.
    Dir,
    /// Symlinks, submodules and anything else the service reports.
    #[serde(other)]
    Other,
}

/// One entry of a contents listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContentEntry {
    /// Base name of the entry.
    pub name: String,
    /// The entry kind.
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Direct download location; absent for directories.
    #[serde(default)]
    pub download_url: Option<String>,
}

impl ContentEntry {
    /// Construct a file entry.
    #[must_use]
    pub fn file(name: &str, download_url: &str) -> Self {
        Self {
            name: name.to_owned(),
            kind: EntryKind::File,
            download_url: Some(download_url.to_owned()),
        }
    }

    /// Construct a directory entry.
    #[must_use]
    pub fn dir(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            kind: EntryKind::Dir,
            download_url: None,
        }
    }
}
