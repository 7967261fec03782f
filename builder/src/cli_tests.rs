//! Tests for CLI parsing, environment fallback and settings validation.

use super::*;
use rstest::rstest;

const ENV_NAMES: [&str; 13] = [
    "Token",
    "OwnerRepo",
    "RunID",
    "MakeMetaFile",
    "ProdPath",
    "PubPath",
    "AddinID",
    "AddinName",
    "Author",
    "ExternalFiles",
    "TagSuffix",
    "JmpCust",
    "GITHUB_API_URL",
];

const REQUIRED: [&str; 11] = [
    "jaab",
    "--token",
    "t0k3n",
    "--owner-repo",
    "acme/report-tool",
    "--addin-id",
    "com.acme.report",
    "--addin-name",
    "ReportTool",
    "--jmp-cust",
    "addin.jmpcust",
];

/// Parse with every fallback variable cleared.
fn parse(extra: &[&str]) -> std::result::Result<Cli, clap::Error> {
    let args: Vec<&str> = REQUIRED.iter().chain(extra).copied().collect();
    temp_env::with_vars_unset(ENV_NAMES, || Cli::try_parse_from(args))
}

fn settings(extra: &[&str]) -> Result<BuildSettings> {
    parse(extra).expect("arguments parse").build_settings()
}

#[test]
fn cli_parses_defaults() {
    let cli = parse(&[]).expect("arguments parse");
    assert_eq!(cli.run_id, "");
    assert_eq!(cli.make_meta_file, "1");
    assert_eq!(cli.tag_suffix, 0);
    assert_eq!(cli.external_files, "");
    assert_eq!(cli.api_url, DEFAULT_API_BASE);
    assert!(cli.work_dir.is_none());
    assert!(!cli.skip_upload);
    assert_eq!(cli.verbosity, 0);
    assert!(!cli.quiet);
}

#[test]
fn missing_required_input_is_a_parse_error() {
    let result = temp_env::with_vars_unset(ENV_NAMES, || {
        Cli::try_parse_from(["jaab", "--owner-repo", "acme/tool"])
    });
    assert!(result.is_err());
}

#[test]
fn every_input_falls_back_to_its_environment_variable() {
    let cli = temp_env::with_vars(
        [
            ("Token", Some("env-token")),
            ("OwnerRepo", Some("acme/report-tool")),
            ("RunID", Some("4242")),
            ("MakeMetaFile", Some("0")),
            ("ProdPath", Some("$ADDIN_HOME/ReportTool")),
            ("PubPath", Some("published.jsl")),
            ("AddinID", Some("com.acme.report")),
            ("AddinName", Some("ReportTool")),
            ("Author", Some("\"Acme\"")),
            ("ExternalFiles", Some("deps.ini")),
            ("TagSuffix", Some("1")),
            ("JmpCust", Some("addin.jmpcust")),
            ("GITHUB_API_URL", Some("https://ghe.example.test/api/v3")),
        ],
        || Cli::try_parse_from(["jaab"]),
    )
    .expect("environment supplies every input");

    assert_eq!(cli.token, "env-token");
    assert_eq!(cli.api_url, "https://ghe.example.test/api/v3");

    let settings = cli.build_settings().expect("valid settings");
    assert_eq!(settings.repo.to_string(), "acme/report-tool");
    assert_eq!(settings.run_id, Some(RunId::new(4242)));
    assert!(!settings.write_descriptor);
    assert_eq!(settings.identity.author, "\"Acme\"");
    assert_eq!(settings.identity.prod_path, "$ADDIN_HOME/ReportTool");
    assert_eq!(settings.manifest_file.as_deref(), Some("deps.ini"));
    assert_eq!(settings.tag_suffix, TagSuffixPolicy::Always);
    assert_eq!(settings.customization_template, "addin.jmpcust");
}

#[test]
fn flags_override_environment() {
    let cli = temp_env::with_vars(
        [("AddinName", Some("FromEnv")), ("TagSuffix", Some("1"))],
        || {
            Cli::try_parse_from([
                "jaab",
                "--token",
                "t",
                "--owner-repo",
                "acme/tool",
                "--addin-id",
                "id",
                "--addin-name",
                "FromFlag",
                "--jmp-cust",
                "menu.jmpcust",
                "--tag-suffix",
                "-1",
            ])
        },
    )
    .expect("arguments parse");
    assert_eq!(cli.addin_name, "FromFlag");
    assert_eq!(cli.tag_suffix, -1);
}

#[test]
fn settings_apply_defaults() {
    let settings = settings(&["--work-dir", "/tmp/build"]).expect("valid settings");
    assert_eq!(settings.run_id, None);
    assert!(settings.write_descriptor);
    assert_eq!(settings.manifest_file, None);
    assert_eq!(settings.tag_suffix, TagSuffixPolicy::TestOnly);
    assert_eq!(settings.work_dir, Utf8PathBuf::from("/tmp/build"));
    assert_eq!(
        settings.staging_root(),
        Utf8PathBuf::from("/tmp/build/report-tool")
    );
}

#[test]
fn work_dir_defaults_to_current_directory() {
    let settings = settings(&[]).expect("valid settings");
    let cwd = std::env::current_dir().expect("cwd");
    assert_eq!(settings.work_dir.as_std_path(), cwd.as_path());
}

#[rstest]
#[case::zero("0", false)]
#[case::padded_zero(" 0 ", false)]
#[case::one("1", true)]
#[case::word("yes", true)]
#[case::blank("", true)]
fn metadata_flag_is_off_only_for_zero(#[case] flag: &str, #[case] expected: bool) {
    let settings = settings(&["--make-meta-file", flag]).expect("valid settings");
    assert_eq!(settings.write_descriptor, expected);
}

#[rstest]
#[case::bad_repo(&["--owner-repo", "acme"], "OwnerRepo")]
#[case::bad_run_id(&["--run-id", "latest"], "RunID")]
#[case::blank_name(&["--addin-name", "  "], "AddinName")]
#[case::blank_template(&["--jmp-cust", ""], "JmpCust")]
fn invalid_settings_name_the_input(#[case] extra: &[&str], #[case] expected: &str) {
    match settings(extra) {
        Err(BuilderError::InvalidSetting { name, .. }) => assert_eq!(name, expected),
        other => panic!("expected InvalidSetting for {expected}, got {other:?}"),
    }
}

#[test]
fn non_integer_tag_suffix_is_rejected_by_the_parser() {
    assert!(parse(&["--tag-suffix", "always"]).is_err());
}

#[test]
fn quiet_conflicts_with_verbose() {
    assert!(parse(&["-q", "-v"]).is_err());
}
