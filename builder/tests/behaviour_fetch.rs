//! Behaviour-driven tests for fetching external files.
//!
//! These scenarios run the fetcher against an in-memory hosting service and
//! a temporary staging tree.

mod support;

use camino::Utf8PathBuf;
use jaab::dependency::error::FetchError;
use jaab::dependency::fetcher::fetch_dependencies;
use jaab::dependency::manifest::{DEFAULT_SECTION, DependencyManifest};
use jaab::github::contents::ContentEntry;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;
use std::collections::BTreeMap;
use support::{FakeGitHub, unquote};
use tempfile::TempDir;

/// Files a library serves, keyed by `(repo, ref)`, then by folder (`""` for
/// the root).
type Library = BTreeMap<(String, String), BTreeMap<String, Vec<String>>>;

struct FetchWorld {
    library: RefCell<Library>,
    manifest_lines: RefCell<Vec<String>>,
    api: RefCell<FakeGitHub>,
    staging: TempDir,
    outcome: RefCell<Option<Result<Vec<Utf8PathBuf>, FetchError>>>,
}

impl FetchWorld {
    fn new() -> Self {
        Self {
            library: RefCell::new(BTreeMap::new()),
            manifest_lines: RefCell::new(vec![format!("[{DEFAULT_SECTION}]")]),
            api: RefCell::new(FakeGitHub::default()),
            staging: tempfile::tempdir().expect("tempdir"),
            outcome: RefCell::new(None),
        }
    }

    fn staging_root(&self) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(self.staging.path().to_path_buf()).expect("utf8 temp dir")
    }

    fn add_file(&self, repo: &str, reference: &str, folder: &str, name: &str) {
        self.library
            .borrow_mut()
            .entry((repo.to_owned(), reference.to_owned()))
            .or_default()
            .entry(folder.to_owned())
            .or_default()
            .push(name.to_owned());
    }

    /// Turn the declared library files into listings and downloads.
    fn publish_library(&self) {
        let mut api = self.api.borrow_mut();
        for ((repo, reference), folders) in self.library.borrow().iter() {
            let query = (reference != "latest").then_some(reference.as_str());
            let mut root = Vec::new();
            for (folder, names) in folders {
                let mut entries = Vec::new();
                for name in names {
                    let path = if folder.is_empty() {
                        name.clone()
                    } else {
                        format!("{folder}/{name}")
                    };
                    let url = format!("https://raw.test/{repo}/{reference}/{path}");
                    api.add_blob(&url, blob(name, repo, reference));
                    entries.push(ContentEntry::file(name, &url));
                }
                if folder.is_empty() {
                    root.extend(entries);
                } else {
                    root.push(ContentEntry::dir(folder));
                    api.add_listing(repo, folder, query, entries);
                }
            }
            api.add_listing(repo, "", query, root);
        }
    }

    fn error(&self) -> FetchError {
        match self.outcome.borrow_mut().take() {
            Some(Err(err)) => err,
            other => panic!("expected a fetch error, got {other:?}"),
        }
    }
}

fn blob(name: &str, repo: &str, reference: &str) -> String {
    format!("// {name} from {repo}@{reference}")
}

#[fixture]
fn fetch_world() -> FetchWorld {
    FetchWorld::new()
}

#[given("the library {repo} at {reference} has {name} in {folder}")]
fn given_file_in_folder(
    fetch_world: &FetchWorld,
    repo: String,
    reference: String,
    name: String,
    folder: String,
) {
    fetch_world.add_file(
        unquote(&repo),
        unquote(&reference),
        unquote(&folder),
        unquote(&name),
    );
}

#[given("the library {repo} at {reference} has {name} at its root")]
fn given_file_at_root(fetch_world: &FetchWorld, repo: String, reference: String, name: String) {
    fetch_world.add_file(unquote(&repo), unquote(&reference), "", unquote(&name));
}

#[given("the manifest entry {line}")]
fn given_manifest_entry(fetch_world: &FetchWorld, line: String) {
    fetch_world
        .manifest_lines
        .borrow_mut()
        .push(unquote(&line).to_owned());
}

#[when("the dependencies are fetched")]
fn when_fetched(fetch_world: &FetchWorld) {
    fetch_world.publish_library();
    let text = fetch_world.manifest_lines.borrow().join("\n");
    let manifest = DependencyManifest::parse(&text, DEFAULT_SECTION).expect("valid manifest");
    let api = fetch_world.api.borrow();
    let outcome = fetch_dependencies(
        &*api,
        &manifest,
        &fetch_world.staging_root(),
        &mut std::io::sink(),
    );
    fetch_world.outcome.replace(Some(outcome));
}

#[then("{path} holds {name} from {source}")]
fn then_file_holds(fetch_world: &FetchWorld, path: String, name: String, source: String) {
    let target = fetch_world.staging_root().join(unquote(&path));
    let text = std::fs::read_to_string(&target).expect("fetched file exists");
    let (repo, reference) = unquote(&source)
        .split_once('@')
        .expect("source is repo@ref");
    assert_eq!(text, blob(unquote(&name), repo, reference));
}

#[then("every listing of {repo} omits the reference")]
fn then_listings_unpinned(fetch_world: &FetchWorld, repo: String) {
    let api = fetch_world.api.borrow();
    let listed = api.listed.borrow();
    let repo = unquote(&repo);
    assert!(listed.iter().any(|(name, _, _)| name == repo));
    assert!(
        listed
            .iter()
            .filter(|(name, _, _)| name == repo)
            .all(|(_, _, reference)| reference.is_none())
    );
}

#[then("every listing of {repo} uses the reference {reference}")]
fn then_listings_pinned(fetch_world: &FetchWorld, repo: String, reference: String) {
    let api = fetch_world.api.borrow();
    let listed = api.listed.borrow();
    let repo = unquote(&repo);
    let reference = unquote(&reference);
    assert!(
        listed
            .iter()
            .filter(|(name, _, _)| name == repo)
            .all(|(_, _, used)| used.as_deref() == Some(reference))
    );
}

#[then("{repo} was listed {count} times")]
fn then_listing_count(fetch_world: &FetchWorld, repo: String, count: usize) {
    let api = fetch_world.api.borrow();
    let repo = unquote(&repo);
    let listed = api.listed.borrow();
    assert_eq!(listed.iter().filter(|(name, _, _)| name == repo).count(), count);
}

#[then("fetching fails because {name} is not found in {repo}")]
fn then_unresolvable(fetch_world: &FetchWorld, name: String, repo: String) {
    let expected_file = unquote(&name).to_owned();
    let expected_repo = unquote(&repo).to_owned();
    assert!(matches!(
        fetch_world.error(),
        FetchError::Unresolvable { file, repository, .. }
            if file == expected_file && repository == expected_repo
    ));
}

#[then("fetching fails because the destination is unsafe")]
fn then_unsafe(fetch_world: &FetchWorld) {
    assert!(matches!(
        fetch_world.error(),
        FetchError::UnsafeDestination { .. }
    ));
}

#[scenario(path = "tests/features/fetch.feature", index = 0)]
fn scenario_subfolder_file(fetch_world: FetchWorld) {
    let _ = fetch_world;
}

#[scenario(path = "tests/features/fetch.feature", index = 1)]
fn scenario_pinned_reference(fetch_world: FetchWorld) {
    let _ = fetch_world;
}

#[scenario(path = "tests/features/fetch.feature", index = 2)]
fn scenario_missing_file(fetch_world: FetchWorld) {
    let _ = fetch_world;
}

#[scenario(path = "tests/features/fetch.feature", index = 3)]
fn scenario_unsafe_destination(fetch_world: FetchWorld) {
    let _ = fetch_world;
}
