//! Numeric version surrogate for release tags.
//!
//! The consuming runtime compares add-in versions as plain integers, so a tag
//! of the form `V<major>.<minor>.<patch>[-<channel><n>]` is folded into a
//! single number. Components above the patch slot are weighted in base 100,
//! and the patch slot keeps three decimal digits for the pre-release channel.
//!
//! The runtime compares these numbers directly, so the encoding is fixed:
//! a plain release sorts below its own pre-releases, and channel numbers are
//! base 10 inside the slot (so `BETA10` outranks `RC9`).

use std::fmt;
use thiserror::Error;

/// Weight between adjacent dotted components above the patch slot.
const COMPONENT_BASE: u64 = 100;

/// Width of the patch slot; the channel priority lives below it.
const SLOT_WIDTH: u64 = 1000;

/// Multiplier applied to the pre-release number.
const CHANNEL_BASE: u64 = 10;

/// Sub-priority of a tag without a pre-release channel.
const RELEASE_PRIORITY: u64 = 1;

/// Pre-release channels and their rank, in detection order.
const CHANNELS: [(&str, u64); 3] = [("ALPHA", 2), ("BETA", 3), ("RC", 4)];

/// Errors raised while encoding a version tag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    /// A component (or a channel number) is not a decimal numeral.
    #[error("version tag \"{tag}\" has a non-numeric component \"{component}\"")]
    NonNumeric {
        /// The tag being encoded.
        tag: String,
        /// The offending text.
        component: String,
    },

    /// The weighted sum does not fit in 64 bits.
    #[error("version tag \"{tag}\" is too large to encode")]
    Overflow {
        /// The tag being encoded.
        tag: String,
    },
}

/// Outcome of [`encode_version`].
///
/// `Fail` is the runtime's sentinel for an encoding that summed to zero. It
/// is a value rather than an error: callers decide whether to stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncodedVersion {
    /// A usable version number.
    Number(u64),
    /// The encoding summed to zero.
    Fail,
}

impl EncodedVersion {
    /// Wrap a raw encoding total, mapping zero to [`EncodedVersion::Fail`].
    #[must_use]
    pub const fn from_total(total: u64) -> Self {
        if total == 0 {
            Self::Fail
        } else {
            Self::Number(total)
        }
    }

    /// Return the number, or `None` for the sentinel.
    #[must_use]
    pub const fn as_number(self) -> Option<u64> {
        match self {
            Self::Number(value) => Some(value),
            Self::Fail => None,
        }
    }

    /// Whether this is the `fail` sentinel.
    #[must_use]
    pub const fn is_fail(self) -> bool {
        matches!(self, Self::Fail)
    }
}

impl fmt::Display for EncodedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Fail => f.write_str("fail"),
        }
    }
}

/// Encode a version tag into the runtime's integer surrogate.
///
/// Matching is case-insensitive and a single leading `V` is ignored.
///
/// # Errors
///
/// Returns [`VersionError::NonNumeric`] when a component or channel number
/// is not numeric, and [`VersionError::Overflow`] when the sum exceeds `u64`.
///
/// # Examples
///
/// ```
/// use jaab::release::version::{EncodedVersion, encode_version};
///
/// assert_eq!(encode_version("V1.0.9"), Ok(EncodedVersion::Number(10_009_001)));
/// assert_eq!(encode_version("v1.0.5-Beta1"), Ok(EncodedVersion::Number(10_005_013)));
/// ```
pub fn encode_version(tag: &str) -> Result<EncodedVersion, VersionError> {
    let upper = tag.to_uppercase();
    let body = upper.strip_prefix('V').unwrap_or(&upper);

    let mut total: u64 = 0;
    for (position, component) in body.split('.').rev().enumerate() {
        let term = if position == 0 {
            patch_term(tag, component)?
        } else {
            weighted_term(tag, component, position)?
        };
        total = total.checked_add(term).ok_or_else(|| overflow(tag))?;
    }

    Ok(EncodedVersion::from_total(total))
}

/// Encode a major/minor (or higher) component at its reversed `position`.
fn weighted_term(tag: &str, component: &str, position: usize) -> Result<u64, VersionError> {
    let value = parse_numeral(tag, component)?;
    let exponent = u32::try_from(position).map_err(|_| overflow(tag))?;
    COMPONENT_BASE
        .checked_pow(exponent)
        .and_then(|weight| weight.checked_mul(SLOT_WIDTH))
        .and_then(|weight| weight.checked_mul(value))
        .ok_or_else(|| overflow(tag))
}

/// Encode the patch component, including its pre-release sub-priority.
///
/// The channel text is whatever follows the first `-`. Without a `-` the
/// numeral itself is inspected, which never names a channel.
fn patch_term(tag: &str, component: &str) -> Result<u64, VersionError> {
    let mut pieces = component.split('-');
    let numeral = pieces.next().unwrap_or_default();
    let channel = pieces.next().unwrap_or(numeral);

    let base = parse_numeral(tag, numeral)?
        .checked_mul(SLOT_WIDTH)
        .ok_or_else(|| overflow(tag))?;
    let priority = channel_priority(tag, channel)?;
    base.checked_add(priority).ok_or_else(|| overflow(tag))
}

/// Map channel text such as `BETA2` to its sub-priority.
fn channel_priority(tag: &str, channel: &str) -> Result<u64, VersionError> {
    for (name, rank) in CHANNELS {
        if channel.contains(name) {
            let number = parse_numeral(tag, &channel.replace(name, ""))?;
            return number
                .checked_mul(CHANNEL_BASE)
                .and_then(|scaled| scaled.checked_add(rank))
                .ok_or_else(|| overflow(tag));
        }
    }
    Ok(RELEASE_PRIORITY)
}

fn parse_numeral(tag: &str, text: &str) -> Result<u64, VersionError> {
    text.trim()
        .parse::<u64>()
        .map_err(|_| VersionError::NonNumeric {
            tag: tag.to_owned(),
            component: text.to_owned(),
        })
}

fn overflow(tag: &str) -> VersionError {
    VersionError::Overflow {
        tag: tag.to_owned(),
    }
}
