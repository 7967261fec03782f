//! Selection of the release that triggered a build.
//!
//! Depending on how the workflow is invoked, the triggering identifier shows
//! up under different field names. Matching therefore scans every top-level
//! scalar field of each record instead of a single named field. The scan is
//! isolated in [`matches_run_id`] so the policy can be tested on its own.

use super::error::{ReleaseError, Result};
use super::record::ReleaseRecord;
use log::{debug, trace};
use serde_json::Value;
use std::fmt;

/// An integer run identifier supplied by the invoking workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunId(i64);

impl RunId {
    /// Construct a run identifier from its numeric value.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Parse an optional identifier; blank text means "not supplied".
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseError::InvalidRunId`] when non-blank text is not an
    /// integer.
    ///
    /// # Examples
    ///
    /// ```
    /// use jaab::release::resolver::RunId;
    ///
    /// assert_eq!(RunId::parse_optional(""), Ok(None));
    /// assert_eq!(RunId::parse_optional("42"), Ok(Some(RunId::new(42))));
    /// assert!(RunId::parse_optional("abc").is_err());
    /// ```
    pub fn parse_optional(text: &str) -> Result<Option<Self>> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        trimmed
            .parse::<i64>()
            .map(|value| Some(Self(value)))
            .map_err(|_| ReleaseError::InvalidRunId {
                value: text.to_owned(),
            })
    }

    /// The numeric value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether any top-level scalar field of `record` equals `run_id`.
///
/// Both sides are compared as integers. A field takes part when it
/// normalises to one:
///
/// - JSON integers as they are;
/// - numbers with no fractional part, so `5.0` matches `5`;
/// - booleans as `1` and `0`;
/// - strings holding an integer numeral, after trimming.
///
/// Nulls, fractional numbers, arrays and nested objects never match.
#[must_use]
pub fn matches_run_id(record: &ReleaseRecord, run_id: RunId) -> bool {
    record.fields().iter().any(|(name, value)| {
        let hit = scalar_as_integer(value) == Some(run_id.value());
        if hit {
            trace!("run identifier {run_id} matched field \"{name}\"");
        }
        hit
    })
}

fn scalar_as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64().or_else(|| integral_float(number.as_f64()?)),
        Value::Bool(flag) => Some(i64::from(*flag)),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "the value is integral and inside the i64 range"
)]
fn integral_float(value: f64) -> Option<i64> {
    const LOWER: f64 = -9_223_372_036_854_775_808.0;
    const UPPER: f64 = 9_223_372_036_854_775_808.0;
    (value.fract() == 0.0 && (LOWER..UPPER).contains(&value)).then(|| value as i64)
}

/// Pick the release to build.
///
/// Without a run identifier the first record is returned; the release store
/// lists newest first and no sorting happens here. With an identifier, the
/// first record (in order) that [`matches_run_id`] is returned.
///
/// # Errors
///
/// Returns [`ReleaseError::NoReleases`] when `releases` is empty and no
/// identifier was given, or [`ReleaseError::RunIdNotFound`] when an
/// identifier was given and nothing matches. There is no fallback to the
/// newest release once an identifier is supplied.
pub fn resolve_release(
    releases: &[ReleaseRecord],
    run_id: Option<RunId>,
) -> Result<&ReleaseRecord> {
    let Some(run_id) = run_id else {
        debug!("no run identifier supplied; using the newest release");
        return releases.first().ok_or(ReleaseError::NoReleases);
    };

    releases
        .iter()
        .find(|record| matches_run_id(record, run_id))
        .ok_or(ReleaseError::RunIdNotFound {
            run_id: run_id.value(),
        })
}
