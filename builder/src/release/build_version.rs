//! Version facts derived once per build from the chosen release.

use super::date::encode_build_date;
use super::error::Result;
use super::record::ReleaseRecord;
use super::stage::DeploymentStage;
use super::version::{EncodedVersion, encode_version};

/// Tag, encoded version, build date and stage of the release being built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildVersion {
    tag: String,
    version: EncodedVersion,
    build_date: i64,
    stage: DeploymentStage,
}

impl BuildVersion {
    /// Derive the build facts from a release record.
    ///
    /// # Errors
    ///
    /// Returns an error when the record has no tag or publish time, or when
    /// either cannot be encoded.
    pub fn derive(record: &ReleaseRecord) -> Result<Self> {
        let tag = record.tag_name()?;
        Ok(Self {
            tag: tag.to_owned(),
            version: encode_version(tag)?,
            build_date: encode_build_date(record.published_at()?)?,
            stage: DeploymentStage::from_tag(tag),
        })
    }

    /// The raw release tag.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The encoded version number (possibly the `fail` sentinel).
    #[must_use]
    pub const fn version(&self) -> EncodedVersion {
        self.version
    }

    /// Seconds since the runtime epoch at which the release was published.
    #[must_use]
    pub const fn build_date(&self) -> i64 {
        self.build_date
    }

    /// The deployment stage implied by the tag.
    #[must_use]
    pub const fn stage(&self) -> DeploymentStage {
        self.stage
    }
}
