//! Deployment stage derived from the shape of a release tag.

use std::fmt;

/// Where the runtime deploys a package.
///
/// Only the number of `-` separators matters: `V1.0.5-Beta1` is a test
/// build, while `V2.3.0` (no separator) and `V2.3.0-rc-1` (two) are
/// production builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeploymentStage {
    /// Pre-release channel build.
    Test,
    /// Production build.
    Prod,
}

impl DeploymentStage {
    /// Classify a tag.
    ///
    /// # Examples
    ///
    /// ```
    /// use jaab::release::stage::DeploymentStage;
    ///
    /// assert_eq!(DeploymentStage::from_tag("v1.0.5-Beta1"), DeploymentStage::Test);
    /// assert_eq!(DeploymentStage::from_tag("v2.3.0"), DeploymentStage::Prod);
    /// ```
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        if tag.split('-').count() == 2 {
            Self::Test
        } else {
            Self::Prod
        }
    }

    /// The label written into generated metadata.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Test => "TEST",
            Self::Prod => "PROD",
        }
    }
}

impl fmt::Display for DeploymentStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
