//! Naming policy for the final add-in archive.
//!
//! The archive is called `<name>.jmpaddin` or `<name>_<tag>.jmpaddin`
//! depending on the configured tag-suffix policy and the release stage.

use crate::release::stage::DeploymentStage;
use std::fmt;

/// Extension of the final archive.
pub const ADDIN_EXTENSION: &str = "jmpaddin";

/// When to append the release tag to the archive name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagSuffixPolicy {
    /// Every build carries the tag.
    Always,
    /// Only test builds carry the tag.
    TestOnly,
    /// No build carries the tag.
    Never,
}

impl TagSuffixPolicy {
    /// Interpret the integer flag: `1` always, `0` test-only, anything else
    /// never.
    ///
    /// # Examples
    ///
    /// ```
    /// use jaab::package::naming::TagSuffixPolicy;
    ///
    /// assert_eq!(TagSuffixPolicy::from_flag(1), TagSuffixPolicy::Always);
    /// assert_eq!(TagSuffixPolicy::from_flag(0), TagSuffixPolicy::TestOnly);
    /// assert_eq!(TagSuffixPolicy::from_flag(2), TagSuffixPolicy::Never);
    /// ```
    #[must_use]
    pub const fn from_flag(flag: i64) -> Self {
        match flag {
            1 => Self::Always,
            0 => Self::TestOnly,
            _ => Self::Never,
        }
    }

    /// Whether a build at `stage` carries the tag.
    #[must_use]
    pub const fn applies_to(self, stage: DeploymentStage) -> bool {
        match self {
            Self::Always => true,
            Self::TestOnly => matches!(stage, DeploymentStage::Test),
            Self::Never => false,
        }
    }
}

/// Base name of the final archive, without extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveName(String);

impl ArchiveName {
    /// Decide the archive name for a build.
    ///
    /// # Examples
    ///
    /// ```
    /// use jaab::package::naming::{ArchiveName, TagSuffixPolicy};
    /// use jaab::release::stage::DeploymentStage;
    ///
    /// let name = ArchiveName::decide(
    ///     "ReportTool",
    ///     "V2.0.0-RC1",
    ///     DeploymentStage::Test,
    ///     TagSuffixPolicy::TestOnly,
    /// );
    /// assert_eq!(name.file_name(), "ReportTool_V2.0.0-RC1.jmpaddin");
    /// ```
    #[must_use]
    pub fn decide(
        addin_name: &str,
        tag: &str,
        stage: DeploymentStage,
        policy: TagSuffixPolicy,
    ) -> Self {
        if policy.applies_to(stage) {
            Self(format!("{addin_name}_{tag}"))
        } else {
            Self(addin_name.to_owned())
        }
    }

    /// The base name.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.0
    }

    /// The base name with the add-in extension.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.{ADDIN_EXTENSION}", self.0)
    }
}

impl fmt::Display for ArchiveName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
