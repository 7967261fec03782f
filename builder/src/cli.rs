//! CLI argument definitions for the add-in builder.
//!
//! Every build input is a flag that falls back to the environment variable a
//! release workflow sets, so the binary runs unchanged as a workflow step or
//! from a terminal.

use crate::error::{BuilderError, Result};
use crate::github::client::DEFAULT_API_BASE;
use crate::github::repo::RepoSlug;
use crate::package::metadata::AddinIdentity;
use crate::package::naming::TagSuffixPolicy;
use crate::release::resolver::RunId;
use camino::Utf8PathBuf;
use clap::Parser;

/// Build a JMP add-in package from a tagged release and attach it to that
/// release.
#[derive(Parser, Debug, Clone)]
#[command(name = "jaab")]
#[command(version, about, args_override_self = true)]
#[command(long_about = concat!(
    "Build a JMP add-in package from a tagged release.\n\n",
    "The builder picks the release that triggered the workflow (or the newest ",
    "one), downloads its source, stamps version metadata, pulls external files ",
    "listed in an INI manifest, zips the result into a .jmpaddin archive and ",
    "uploads it to the release.\n\n",
    "Every option can be supplied through the environment variable shown in ",
    "its help text.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Build the newest release and upload it:\n",
    "    $ Token=... jaab --owner-repo acme/report-tool --addin-id com.acme.report \\\n",
    "        --addin-name ReportTool --jmp-cust addin.jmpcust\n\n",
    "  Build locally without uploading:\n",
    "    $ jaab --skip-upload --work-dir /tmp/build ...\n",
))]
pub struct Cli {
    /// Access token for the hosting service.
    #[arg(long, env = "Token", hide_env_values = true)]
    pub token: String,

    /// Repository to build, as `owner/repo`.
    #[arg(long, env = "OwnerRepo", value_name = "OWNER/REPO")]
    pub owner_repo: String,

    /// Run identifier selecting the release; blank selects the newest.
    #[arg(long, env = "RunID", default_value = "", allow_hyphen_values = true)]
    pub run_id: String,

    /// Write the build descriptor unless this is `0`.
    #[arg(long, env = "MakeMetaFile", default_value = "1")]
    pub make_meta_file: String,

    /// Deployed location recorded in the build descriptor.
    #[arg(long, env = "ProdPath", default_value = "")]
    pub prod_path: String,

    /// Published add-ins list recorded in the build descriptor.
    #[arg(long, env = "PubPath", default_value = "")]
    pub pub_path: String,

    /// Add-in identifier.
    #[arg(long, env = "AddinID")]
    pub addin_id: String,

    /// Add-in display name; also the archive base name.
    #[arg(long, env = "AddinName")]
    pub addin_name: String,

    /// Author written to the build descriptor verbatim.
    #[arg(long, env = "Author", default_value = "")]
    pub author: String,

    /// Manifest of external files in `.github/workflows`; blank for none.
    #[arg(long, env = "ExternalFiles", default_value = "", value_name = "FILE")]
    pub external_files: String,

    /// Tag suffix policy: 1 always, 0 test builds only, anything else never.
    #[arg(
        long,
        env = "TagSuffix",
        default_value_t = 0,
        allow_negative_numbers = true
    )]
    pub tag_suffix: i64,

    /// Menu customization template in `.github/workflows`.
    #[arg(long, env = "JmpCust", value_name = "FILE")]
    pub jmp_cust: String,

    /// Directory for the staging tree and archive [default: current dir].
    #[arg(short, long, value_name = "DIR")]
    pub work_dir: Option<Utf8PathBuf>,

    /// REST API root.
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_BASE, value_name = "URL")]
    pub api_url: String,

    /// Build the archive but do not upload it.
    #[arg(long)]
    pub skip_upload: bool,

    /// Increase diagnostic output (repeatable: -v, -vv, -vvv).
    #[arg(
        short,
        long = "verbose",
        action = clap::ArgAction::Count,
        conflicts_with = "quiet"
    )]
    pub verbosity: u8,

    /// Suppress progress output (errors still shown).
    #[arg(short, long, conflicts_with = "verbosity")]
    pub quiet: bool,
}

/// Validated inputs for one build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSettings {
    /// Repository being built.
    pub repo: RepoSlug,
    /// Release selector; `None` selects the newest release.
    pub run_id: Option<RunId>,
    /// Whether to write the build descriptor.
    pub write_descriptor: bool,
    /// Identity strings for the generated files.
    pub identity: AddinIdentity,
    /// Manifest file name in the workflow directory, if any.
    pub manifest_file: Option<String>,
    /// Archive naming policy.
    pub tag_suffix: TagSuffixPolicy,
    /// Customization template name in the workflow directory.
    pub customization_template: String,
    /// Directory holding the staging tree and the archive.
    pub work_dir: Utf8PathBuf,
    /// Skip the upload step.
    pub skip_upload: bool,
    /// Suppress progress output.
    pub quiet: bool,
}

impl BuildSettings {
    /// Where the release source is extracted: `<work_dir>/<repo>`.
    #[must_use]
    pub fn staging_root(&self) -> Utf8PathBuf {
        self.work_dir.join(self.repo.repo())
    }
}

impl Cli {
    /// Validate the parsed arguments into [`BuildSettings`].
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::InvalidSetting`] when a required value is blank
    /// or malformed, or when the working directory cannot be determined.
    pub fn build_settings(&self) -> Result<BuildSettings> {
        let repo = RepoSlug::parse(&self.owner_repo).map_err(|err| invalid("OwnerRepo", err))?;
        let run_id =
            RunId::parse_optional(&self.run_id).map_err(|err| invalid("RunID", err))?;
        let addin_id = required("AddinID", &self.addin_id)?;
        let addin_name = required("AddinName", &self.addin_name)?;
        let customization_template = required("JmpCust", &self.jmp_cust)?;
        let manifest_file = Some(self.external_files.trim())
            .filter(|name| !name.is_empty())
            .map(str::to_owned);

        Ok(BuildSettings {
            repo,
            run_id,
            write_descriptor: self.make_meta_file.trim() != "0",
            identity: AddinIdentity {
                id: addin_id,
                name: addin_name,
                author: self.author.clone(),
                prod_path: self.prod_path.clone(),
                pub_path: self.pub_path.clone(),
            },
            manifest_file,
            tag_suffix: TagSuffixPolicy::from_flag(self.tag_suffix),
            customization_template,
            work_dir: self.resolve_work_dir()?,
            skip_upload: self.skip_upload,
            quiet: self.quiet,
        })
    }

    fn resolve_work_dir(&self) -> Result<Utf8PathBuf> {
        if let Some(dir) = &self.work_dir {
            return Ok(dir.clone());
        }
        let cwd = std::env::current_dir().map_err(|err| invalid("--work-dir", err))?;
        Utf8PathBuf::from_path_buf(cwd).map_err(|path| BuilderError::InvalidSetting {
            name: "--work-dir",
            reason: format!("current directory {} is not valid UTF-8", path.display()),
        })
    }
}

fn required(name: &'static str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(BuilderError::InvalidSetting {
            name,
            reason: "must not be blank".to_owned(),
        });
    }
    Ok(trimmed.to_owned())
}

fn invalid(name: &'static str, err: impl std::fmt::Display) -> BuilderError {
    BuilderError::InvalidSetting {
        name,
        reason: err.to_string(),
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
