//! Test support utilities for builder behavioural tests.
//!
//! Provides an in-memory hosting service, release record builders and
//! zipball fixtures shared across the behaviour suites.

#![expect(dead_code, reason = "each suite uses a different subset of helpers")]

use jaab::github::client::GitHubApi;
use jaab::github::contents::ContentEntry;
use jaab::github::error::TransportError;
use jaab::github::repo::RepoSlug;
use jaab::release::record::ReleaseRecord;
use serde_json::json;
use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;

/// One recorded asset upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub upload_url: String,
    pub asset_name: String,
    pub size: usize,
}

/// In-memory stand-in for the hosting service.
#[derive(Default)]
pub struct FakeGitHub {
    releases: Vec<ReleaseRecord>,
    listings: HashMap<(String, String, Option<String>), Vec<ContentEntry>>,
    blobs: HashMap<String, Vec<u8>>,
    pub fetched: RefCell<Vec<String>>,
    pub listed: RefCell<Vec<(String, String, Option<String>)>>,
    pub uploads: RefCell<Vec<Upload>>,
}

impl FakeGitHub {
    pub fn with_releases(releases: Vec<ReleaseRecord>) -> Self {
        Self {
            releases,
            ..Self::default()
        }
    }

    /// Serve `entries` for a directory listing of `repo` at `path`.
    pub fn add_listing(
        &mut self,
        repo: &str,
        path: &str,
        reference: Option<&str>,
        entries: Vec<ContentEntry>,
    ) {
        self.listings.insert(
            (repo.to_owned(), path.to_owned(), reference.map(str::to_owned)),
            entries,
        );
    }

    /// Serve `bytes` for a download of `url`.
    pub fn add_blob(&mut self, url: &str, bytes: impl Into<Vec<u8>>) {
        self.blobs.insert(url.to_owned(), bytes.into());
    }
}

impl GitHubApi for FakeGitHub {
    fn list_releases(&self, _repo: &RepoSlug) -> Result<Vec<ReleaseRecord>, TransportError> {
        Ok(self.releases.clone())
    }

    fn list_contents(
        &self,
        repo: &RepoSlug,
        path: &str,
        reference: Option<String>,
    ) -> Result<Vec<ContentEntry>, TransportError> {
        let key = (repo.to_string(), path.to_owned(), reference);
        self.listed.borrow_mut().push(key.clone());
        self.listings
            .get(&key)
            .cloned()
            .ok_or_else(|| TransportError::Status {
                url: format!("contents/{}/{}", key.0, key.1),
                status: 404,
            })
    }

    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        self.fetched.borrow_mut().push(url.to_owned());
        self.blobs
            .get(url)
            .cloned()
            .ok_or_else(|| TransportError::Status {
                url: url.to_owned(),
                status: 404,
            })
    }

    fn upload_asset(
        &self,
        upload_url: &str,
        asset_name: &str,
        body: &[u8],
    ) -> Result<(), TransportError> {
        self.uploads.borrow_mut().push(Upload {
            upload_url: upload_url.to_owned(),
            asset_name: asset_name.to_owned(),
            size: body.len(),
        });
        Ok(())
    }
}

/// A published release record for `tag`.
pub fn release(id: i64, tag: &str, published_at: &str) -> ReleaseRecord {
    ReleaseRecord::try_from(json!({
        "id": id,
        "tag_name": tag,
        "published_at": published_at,
        "zipball_url": zipball_url(tag),
        "upload_url": format!("https://uploads.test/releases/{id}/assets{{?name,label}}"),
    }))
    .expect("release literal is an object")
}

pub fn zipball_url(tag: &str) -> String {
    format!("https://api.test/repos/acme/report-tool/zipball/{tag}")
}

/// A source zipball with everything under one top-level folder.
pub fn zipball(files: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, text) in files {
        writer
            .start_file(format!("acme-report-tool-1a2b3c/{name}"), SimpleFileOptions::default())
            .expect("start zip entry");
        writer.write_all(text.as_bytes()).expect("write zip entry");
    }
    writer.finish().expect("finish zip").into_inner()
}

/// Entry names of the archive at `path`.
pub fn archive_entries(path: &std::path::Path) -> Vec<String> {
    let file = std::fs::File::open(path).expect("open archive");
    let mut archive = zip::ZipArchive::new(file).expect("read archive");
    (0..archive.len())
        .map(|i| archive.by_index(i).expect("archive entry").name().to_owned())
        .collect()
}

/// Remove one pair of surrounding double quotes.
pub fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|stripped| stripped.strip_suffix('"'))
        .unwrap_or(value)
}
