//! Release records as returned by the release store.
//!
//! A record keeps the whole JSON object it was decoded from. The build only
//! reads four string fields, but run-identifier matching looks at every
//! top-level field, so nothing is discarded.

use super::error::{ReleaseError, Result};
use serde::Deserialize;
use serde_json::{Map, Value};

/// One release, immutable once fetched.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct ReleaseRecord(Map<String, Value>);

impl ReleaseRecord {
    /// Wrap an already-decoded JSON object.
    #[must_use]
    pub const fn from_fields(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// All top-level fields of the record.
    #[must_use]
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// The human-readable version tag, e.g. `V1.2.0-Beta1`.
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseError::MissingField`] when the field is absent or not
    /// a string.
    pub fn tag_name(&self) -> Result<&str> {
        self.string_field("tag_name")
    }

    /// The ISO-8601 publish timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseError::MissingField`] for drafts, which have no
    /// publish time.
    pub fn published_at(&self) -> Result<&str> {
        self.string_field("published_at")
    }

    /// Location of the release's source archive.
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseError::MissingField`] when the field is absent.
    pub fn zipball_url(&self) -> Result<&str> {
        self.string_field("zipball_url")
    }

    /// Asset upload URL template, e.g. `https://…/assets{?name,label}`.
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseError::MissingField`] when the field is absent.
    pub fn upload_url(&self) -> Result<&str> {
        self.string_field("upload_url")
    }

    fn string_field(&self, field: &'static str) -> Result<&str> {
        self.0
            .get(field)
            .and_then(Value::as_str)
            .ok_or(ReleaseError::MissingField { field })
    }
}

impl TryFrom<Value> for ReleaseRecord {
    type Error = ReleaseError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            _ => Err(ReleaseError::NotAnObject),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn exposes_typed_fields() {
        let record = ReleaseRecord::try_from(json!({
            "tag_name": "V1.2.0",
            "published_at": "2023-03-24T21:06:48Z",
            "zipball_url": "https://api.github.com/repos/acme/tool/zipball/V1.2.0",
            "upload_url": "https://uploads.github.com/repos/acme/tool/releases/1/assets{?name,label}",
        }))
        .expect("object");

        assert_eq!(record.tag_name(), Ok("V1.2.0"));
        assert_eq!(record.published_at(), Ok("2023-03-24T21:06:48Z"));
        assert!(record.zipball_url().expect("zipball").ends_with("V1.2.0"));
        assert!(record.upload_url().expect("upload").contains("{?name,label}"));
    }

    #[test]
    fn draft_without_publish_time_reports_missing_field() {
        let record = ReleaseRecord::try_from(json!({
            "tag_name": "V1.2.0",
            "published_at": null,
        }))
        .expect("object");

        assert_eq!(
            record.published_at(),
            Err(ReleaseError::MissingField {
                field: "published_at"
            })
        );
    }

    #[test]
    fn rejects_non_objects() {
        assert_eq!(
            ReleaseRecord::try_from(json!(["V1.0.0"])),
            Err(ReleaseError::NotAnObject)
        );
    }

    #[test]
    fn deserializes_release_lists() {
        let records: Vec<ReleaseRecord> =
            serde_json::from_str(r#"[{"id": 1, "tag_name": "V1.0.0"}, {"id": 2}]"#)
                .expect("valid JSON");
        assert_eq!(records.len(), 2);
        assert_eq!(records.first().map(ReleaseRecord::tag_name), Some(Ok("V1.0.0")));
    }
}
