//! Build-date encoding in the runtime's 1904-based seconds.
//!
//! The runtime stores timestamps as whole seconds since
//! `1904-01-01T00:00:00`. Release timestamps arrive as UTC strings and are
//! converted without any local-time adjustment.

use chrono::NaiveDateTime;
use thiserror::Error;

/// Exact layout of a release `published_at` timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Seconds between the runtime epoch (1904-01-01) and the Unix epoch.
const RUNTIME_EPOCH_OFFSET: i64 = 2_082_844_800;

/// Errors raised while encoding a build date.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    /// The timestamp does not match [`TIMESTAMP_FORMAT`].
    #[error("timestamp \"{value}\" is not in YYYY-MM-DDTHH:MM:SSZ form: {reason}")]
    Parse {
        /// The rejected input.
        value: String,
        /// Parser diagnostic.
        reason: String,
    },
}

/// Convert a UTC timestamp into seconds since the runtime epoch.
///
/// # Errors
///
/// Returns [`DateError::Parse`] when `timestamp` is not exactly in
/// `YYYY-MM-DDTHH:MM:SSZ` form.
///
/// # Examples
///
/// ```
/// use jaab::release::date::encode_build_date;
///
/// assert_eq!(encode_build_date("1970-01-01T00:00:00Z"), Ok(2_082_844_800));
/// ```
pub fn encode_build_date(timestamp: &str) -> Result<i64, DateError> {
    let parsed =
        NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT).map_err(|e| DateError::Parse {
            value: timestamp.to_owned(),
            reason: e.to_string(),
        })?;
    Ok(parsed.and_utc().timestamp() + RUNTIME_EPOCH_OFFSET)
}
