//! `owner/repo` identifiers.

use std::fmt;
use thiserror::Error;

/// The text was not of the form `<owner>/<repo>`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid repository \"{value}\": expected <owner>/<repo>")]
pub struct InvalidRepoSlug {
    value: String,
}

/// A repository on the hosting service, addressed as `owner/repo`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoSlug {
    owner: String,
    repo: String,
}

impl RepoSlug {
    /// Build a slug from its two halves.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRepoSlug`] when either half is empty or contains `/`.
    pub fn new(owner: &str, repo: &str) -> Result<Self, InvalidRepoSlug> {
        let valid = |part: &str| !part.trim().is_empty() && !part.contains('/');
        if valid(owner) && valid(repo) {
            Ok(Self {
                owner: owner.trim().to_owned(),
                repo: repo.trim().to_owned(),
            })
        } else {
            Err(InvalidRepoSlug {
                value: format!("{owner}/{repo}"),
            })
        }
    }

    /// Parse `owner/repo`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRepoSlug`] when the text is not exactly two non-empty
    /// segments separated by `/`.
    ///
    /// # Examples
    ///
    /// ```
    /// use jaab::github::repo::RepoSlug;
    ///
    /// let slug = RepoSlug::parse("acme/report-tool").expect("valid slug");
    /// assert_eq!(slug.owner(), "acme");
    /// assert_eq!(slug.repo(), "report-tool");
    /// assert!(RepoSlug::parse("acme").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self, InvalidRepoSlug> {
        let (owner, repo) = text.split_once('/').ok_or_else(|| InvalidRepoSlug {
            value: text.to_owned(),
        })?;
        Self::new(owner, repo).map_err(|_| InvalidRepoSlug {
            value: text.to_owned(),
        })
    }

    /// The owning user or organisation.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// The repository name.
    #[must_use]
    pub fn repo(&self) -> &str {
        &self.repo
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}
