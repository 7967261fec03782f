//! The external-files manifest.
//!
//! Each pair in the manifest section names one file to pull from another
//! repository. Its value is a parenthesised, comma-separated 6-tuple:
//!
//! ```text
//! [external_files]
//! utils = (acme, jsl-lib, Utils.jsl, Utils.jsl, Libs, v1.4.0)
//! ```
//!
//! Parsing is all-or-nothing: one malformed entry rejects the whole manifest.

use super::error::ManifestError;
use super::index::VersionRef;
use super::ini::IniDocument;
use camino::Utf8Path;
use log::debug;

/// Conventional name of the manifest section.
pub const DEFAULT_SECTION: &str = "external_files";

/// Number of fields in one manifest entry.
pub const FIELD_COUNT: usize = 6;

/// One external file to fetch and place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Manifest key (lower-cased).
    pub key: String,
    /// Owner of the repository holding the file.
    pub source_owner: String,
    /// Name of the repository holding the file.
    pub source_repo: String,
    /// Base name to look up in the repository.
    pub source_file_name: String,
    /// Name to write the file under.
    pub destination_file_name: String,
    /// `main` for the staging root, otherwise a relative subfolder.
    pub destination_folder: String,
    /// `latest` or a branch, tag or commit.
    pub source_version_ref: String,
}

impl ManifestEntry {
    /// Build an entry from the raw manifest value of `key`.
    ///
    /// A value wrapped onto indented lines is first joined back into one
    /// line, dropping each line break and the indentation after it. Then
    /// every `(` and `)` is removed, the rest is split on `,`, and at most one
    /// leading space is dropped from each field. Other whitespace, including
    /// trailing spaces, is kept.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::FieldCount`] when the value does not yield
    /// exactly six fields.
    ///
    /// # Examples
    ///
    /// ```
    /// use jaab::dependency::manifest::ManifestEntry;
    ///
    /// let entry = ManifestEntry::from_value("utils", "(acme, lib, A.jsl, B.jsl, main, latest)")
    ///     .expect("six fields");
    /// assert_eq!(entry.source_repo, "lib");
    /// assert_eq!(entry.destination_file_name, "B.jsl");
    /// ```
    pub fn from_value(key: &str, value: &str) -> Result<Self, ManifestError> {
        let cleaned: String = value
            .lines()
            .map(str::trim_start)
            .flat_map(str::chars)
            .filter(|c| !matches!(c, '(' | ')'))
            .collect();
        let fields: Vec<String> = cleaned
            .split(',')
            .map(|field| field.strip_prefix(' ').unwrap_or(field).to_owned())
            .collect();

        let Ok(
            [
                source_owner,
                source_repo,
                source_file_name,
                destination_file_name,
                destination_folder,
                source_version_ref,
            ],
        ) = <[String; FIELD_COUNT]>::try_from(fields)
        else {
            return Err(ManifestError::FieldCount {
                key: key.to_owned(),
                found: cleaned.split(',').count(),
                expected: FIELD_COUNT,
            });
        };

        Ok(Self {
            key: key.to_owned(),
            source_owner,
            source_repo,
            source_file_name,
            destination_file_name,
            destination_folder,
            source_version_ref,
        })
    }

    /// `owner/repo` of the source repository.
    #[must_use]
    pub fn owner_repo(&self) -> String {
        format!("{}/{}", self.source_owner, self.source_repo)
    }

    /// The interpreted version reference.
    #[must_use]
    pub fn version_ref(&self) -> VersionRef {
        VersionRef::parse(&self.source_version_ref)
    }
}

/// The ordered list of external files a build needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyManifest {
    entries: Vec<ManifestEntry>,
}

impl DependencyManifest {
    /// Parse manifest text, reading entries from `section`.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::MissingSection`] when `section` is absent,
    /// [`ManifestError::FieldCount`] when any entry is malformed, or a syntax
    /// error from the INI reader.
    pub fn parse(text: &str, section: &str) -> Result<Self, ManifestError> {
        let document = IniDocument::parse(text)?;
        let pairs = document
            .section(section)
            .ok_or_else(|| ManifestError::MissingSection {
                section: section.to_owned(),
            })?;

        let entries = pairs
            .entries()
            .map(|(key, value)| ManifestEntry::from_value(key, value))
            .collect::<Result<Vec<_>, _>>()?;
        debug!("manifest [{section}] lists {} external file(s)", entries.len());
        Ok(Self { entries })
    }

    /// Read and parse the manifest at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Io`] when the file cannot be read, otherwise
    /// as [`DependencyManifest::parse`].
    pub fn load(path: &Utf8Path, section: &str) -> Result<Self, ManifestError> {
        let text = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::parse(&text, section)
    }

    /// Entries in manifest order.
    #[must_use]
    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    /// Whether the manifest lists nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
