//! INI-shaped manifest files.
//!
//! Parsing is done by `rust-ini` with quoting and escapes off and indented
//! continuation lines on, so a long value may wrap onto following lines. On
//! top of the parsed document this module requires that:
//!
//! - every pair sits under a `[section]` header;
//! - no section name appears twice;
//! - no key appears twice within a section, ignoring case.
//!
//! Keys are lower-cased. Section names are kept as written.

use super::error::ManifestError;
use ini::{Ini, ParseOption};

/// One `[section]` and its pairs, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IniSection {
    name: String,
    entries: Vec<(String, String)>,
}

impl IniSection {
    /// The section name as written between the brackets.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The `(key, value)` pairs in file order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Look up a value by key, ignoring case.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        let wanted = key.to_lowercase();
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == wanted)
            .map(|(_, value)| value.as_str())
    }
}

/// A parsed document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniDocument {
    sections: Vec<IniSection>,
}

impl IniDocument {
    /// Parse `text`.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Syntax`] for text the INI parser rejects, for
    /// pairs outside any section, and for empty keys. Returns
    /// [`ManifestError::DuplicateSection`] or [`ManifestError::DuplicateKey`]
    /// for repeats.
    ///
    /// # Examples
    ///
    /// ```
    /// use jaab::dependency::ini::IniDocument;
    ///
    /// let doc = IniDocument::parse("[files]\nUtils = a, b\n").expect("valid");
    /// let section = doc.section("files").expect("present");
    /// assert_eq!(section.get("utils"), Some("a, b"));
    /// ```
    pub fn parse(text: &str) -> Result<Self, ManifestError> {
        let parsed = Ini::load_from_str_opt(text, parse_option()).map_err(|err| {
            ManifestError::Syntax {
                reason: err.to_string(),
            }
        })?;

        let mut sections: Vec<IniSection> = Vec::new();
        for (header, properties) in parsed.iter() {
            let Some(name) = header else {
                if let Some((key, _)) = properties.iter().next() {
                    return Err(ManifestError::Syntax {
                        reason: format!("\"{key}\" appears before any [section] header"),
                    });
                }
                continue;
            };
            if sections.iter().any(|section| section.name == name) {
                return Err(ManifestError::DuplicateSection {
                    section: name.to_owned(),
                });
            }

            let mut entries: Vec<(String, String)> = Vec::new();
            for (raw_key, value) in properties.iter() {
                let key = raw_key.trim().to_lowercase();
                if key.is_empty() {
                    return Err(ManifestError::Syntax {
                        reason: format!("empty key in [{name}]"),
                    });
                }
                if entries.iter().any(|(existing, _)| *existing == key) {
                    return Err(ManifestError::DuplicateKey {
                        section: name.to_owned(),
                        key,
                    });
                }
                entries.push((key, value.to_owned()));
            }
            sections.push(IniSection {
                name: name.to_owned(),
                entries,
            });
        }

        Ok(Self { sections })
    }

    /// Find a section by exact name.
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&IniSection> {
        self.sections.iter().find(|section| section.name == name)
    }

    /// All sections in file order.
    #[must_use]
    pub fn sections(&self) -> &[IniSection] {
        &self.sections
    }
}

fn parse_option() -> ParseOption {
    ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        enabled_indented_mutiline_value: true,
        ..ParseOption::default()
    }
}
