//! Access to the hosting service's REST API.
//!
//! The [`GitHubApi`] trait is the seam the build pipeline talks to; the
//! [`HttpGitHubClient`] implementation performs authenticated requests with a
//! shared `ureq` agent. Tests substitute their own implementation.

use super::contents::ContentEntry;
use super::error::TransportError;
use super::repo::RepoSlug;
use crate::release::record::ReleaseRecord;
use log::debug;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use std::fmt;
use std::sync::OnceLock;

/// Default API root.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Bytes escaped inside one path segment: everything but RFC 3986 unreserved.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

const ACCEPT_JSON: &str = "application/vnd.github+json";

/// Operations the build needs from the hosting service.
#[cfg_attr(test, mockall::automock)]
pub trait GitHubApi {
    /// List the releases of `repo`, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails or the body is not a list of
    /// objects.
    fn list_releases(&self, repo: &RepoSlug) -> Result<Vec<ReleaseRecord>, TransportError>;

    /// List the contents of `path` (empty for the root) in `repo`.
    ///
    /// `reference` selects a branch, tag or commit; `None` means the default
    /// branch.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails or the body is not a listing.
    fn list_contents(
        &self,
        repo: &RepoSlug,
        path: &str,
        reference: Option<String>,
    ) -> Result<Vec<ContentEntry>, TransportError>;

    /// Download the raw bytes at `url`.
    ///
    /// # Errors
    ///
    /// Returns an error when the request or the body read fails.
    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, TransportError>;

    /// Attach `body` to a release as an asset called `asset_name`.
    ///
    /// `upload_url` is the release's upload template, possibly carrying a
    /// `{?name,label}` suffix.
    ///
    /// # Errors
    ///
    /// Returns an error when the upload is rejected.
    fn upload_asset(
        &self,
        upload_url: &str,
        asset_name: &str,
        body: &[u8],
    ) -> Result<(), TransportError>;
}

/// Authenticated client built on `ureq`.
pub struct HttpGitHubClient {
    api_base: String,
    token: String,
}

impl HttpGitHubClient {
    /// Create a client for `api_base` authenticating with `token`.
    #[must_use]
    pub fn new(api_base: &str, token: &str) -> Self {
        Self {
            api_base: api_base.trim_end_matches('/').to_owned(),
            token: token.to_owned(),
        }
    }

    /// URL of the release listing for `repo`.
    ///
    /// # Examples
    ///
    /// ```
    /// use jaab::github::client::HttpGitHubClient;
    /// use jaab::github::repo::RepoSlug;
    ///
    /// let client = HttpGitHubClient::new("https://api.github.com/", "token");
    /// let repo = RepoSlug::parse("acme/tool").expect("valid slug");
    /// assert_eq!(
    ///     client.releases_url(&repo),
    ///     "https://api.github.com/repos/acme/tool/releases"
    /// );
    /// ```
    #[must_use]
    pub fn releases_url(&self, repo: &RepoSlug) -> String {
        format!("{}/repos/{repo}/releases", self.api_base)
    }

    /// URL of the contents listing for `path` in `repo`.
    ///
    /// Each `/`-separated segment of `path` is percent-encoded.
    ///
    /// # Examples
    ///
    /// ```
    /// use jaab::github::client::HttpGitHubClient;
    /// use jaab::github::repo::RepoSlug;
    ///
    /// let client = HttpGitHubClient::new("https://api.github.com", "token");
    /// let repo = RepoSlug::parse("acme/tool").expect("valid slug");
    /// assert_eq!(
    ///     client.contents_url(&repo, "Shared Libs"),
    ///     "https://api.github.com/repos/acme/tool/contents/Shared%20Libs"
    /// );
    /// ```
    #[must_use]
    pub fn contents_url(&self, repo: &RepoSlug, path: &str) -> String {
        let encoded = path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(|segment| utf8_percent_encode(segment, PATH_SEGMENT).to_string())
            .collect::<Vec<_>>()
            .join("/");
        if encoded.is_empty() {
            format!("{}/repos/{repo}/contents", self.api_base)
        } else {
            format!("{}/repos/{repo}/contents/{encoded}", self.api_base)
        }
    }

    fn authorization(&self) -> String {
        format!("Bearer {}", self.token)
    }

    fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        reference: Option<&str>,
    ) -> Result<T, TransportError> {
        let mut request = http_agent()
            .get(url)
            .header("Authorization", &self.authorization())
            .header("Accept", ACCEPT_JSON);
        if let Some(reference) = reference {
            request = request.query("ref", reference);
        }
        let response = request.call().map_err(|e| map_ureq_error(url, &e))?;
        let body = response
            .into_body()
            .read_to_string()
            .map_err(|e| map_ureq_error(url, &e))?;
        serde_json::from_str(&body).map_err(|e| TransportError::Decode {
            url: url.to_owned(),
            reason: e.to_string(),
        })
    }
}

impl fmt::Debug for HttpGitHubClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpGitHubClient")
            .field("api_base", &self.api_base)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl GitHubApi for HttpGitHubClient {
    fn list_releases(&self, repo: &RepoSlug) -> Result<Vec<ReleaseRecord>, TransportError> {
        let url = self.releases_url(repo);
        debug!("listing releases: {url}");
        self.get_json(&url, None)
    }

    fn list_contents(
        &self,
        repo: &RepoSlug,
        path: &str,
        reference: Option<String>,
    ) -> Result<Vec<ContentEntry>, TransportError> {
        let url = self.contents_url(repo, path);
        debug!(
            "listing contents: {url} (ref: {})",
            reference.as_deref().unwrap_or("default branch")
        );
        self.get_json(&url, reference.as_deref())
    }

    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        debug!("downloading {url}");
        let response = http_agent()
            .get(url)
            .header("Authorization", &self.authorization())
            .call()
            .map_err(|e| map_ureq_error(url, &e))?;
        let mut bytes = Vec::new();
        std::io::copy(&mut response.into_body().as_reader(), &mut bytes).map_err(|source| {
            TransportError::Io {
                url: url.to_owned(),
                source,
            }
        })?;
        Ok(bytes)
    }

    fn upload_asset(
        &self,
        upload_url: &str,
        asset_name: &str,
        body: &[u8],
    ) -> Result<(), TransportError> {
        let url = upload_base(upload_url);
        debug!("uploading {asset_name} ({} bytes) to {url}", body.len());
        http_agent()
            .post(url)
            .query("name", asset_name)
            .header("Authorization", &self.authorization())
            .header("Accept", ACCEPT_JSON)
            .header("Content-Type", "application/zip")
            .send(body)
            .map_err(|e| map_ureq_error(url, &e))?;
        Ok(())
    }
}

/// Strip the `{...}` template suffix from a release upload URL.
///
/// # Examples
///
/// ```
/// use jaab::github::client::upload_base;
///
/// assert_eq!(
///     upload_base("https://uploads.example.test/releases/7/assets{?name,label}"),
///     "https://uploads.example.test/releases/7/assets"
/// );
/// assert_eq!(upload_base("https://plain.test/x"), "https://plain.test/x");
/// ```
#[must_use]
pub fn upload_base(upload_url: &str) -> &str {
    upload_url
        .split_once('{')
        .map_or(upload_url, |(base, _)| base)
}

/// Shared `ureq` agent. Timeouts are left at the transport defaults.
fn http_agent() -> &'static ureq::Agent {
    static AGENT: OnceLock<ureq::Agent> = OnceLock::new();
    AGENT.get_or_init(|| ureq::Agent::new_with_config(agent_config()))
}

fn agent_config() -> ureq::config::Config {
    ureq::Agent::config_builder()
        .user_agent(concat!("jaab/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Map a ureq error to a [`TransportError`].
fn map_ureq_error(url: &str, err: &ureq::Error) -> TransportError {
    match err {
        ureq::Error::StatusCode(status) => TransportError::Status {
            url: url.to_owned(),
            status: *status,
        },
        other => TransportError::Request {
            url: url.to_owned(),
            reason: other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread;

    fn repo() -> RepoSlug {
        RepoSlug::parse("acme/tool").expect("valid slug")
    }

    #[rstest]
    #[case::root("", "https://api.example.test/repos/acme/tool/contents")]
    #[case::folder("Libs", "https://api.example.test/repos/acme/tool/contents/Libs")]
    #[case::slashes("/Libs/", "https://api.example.test/repos/acme/tool/contents/Libs")]
    #[case::nested("Libs/Core", "https://api.example.test/repos/acme/tool/contents/Libs/Core")]
    #[case::space(
        "Shared Libs",
        "https://api.example.test/repos/acme/tool/contents/Shared%20Libs"
    )]
    #[case::hash_and_query(
        "C# ?tools",
        "https://api.example.test/repos/acme/tool/contents/C%23%20%3Ftools"
    )]
    #[case::non_ascii(
        "Bibliothèques",
        "https://api.example.test/repos/acme/tool/contents/Biblioth%C3%A8ques"
    )]
    #[case::unreserved_kept(
        "a-b_c.d~e",
        "https://api.example.test/repos/acme/tool/contents/a-b_c.d~e"
    )]
    fn contents_url_joins_path(#[case] path: &str, #[case] expected: &str) {
        let client = HttpGitHubClient::new("https://api.example.test", "t");
        assert_eq!(client.contents_url(&repo(), path), expected);
    }

    #[test]
    fn listing_a_directory_with_a_space_reaches_the_server() {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind listener");
        let port = listener.local_addr().expect("local addr").port();
        let server = thread::spawn(move || {
            let (mut stream, _) = listener.accept().expect("accept");
            let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
            let mut request_line = String::new();
            reader.read_line(&mut request_line).expect("request line");
            let mut header = String::new();
            while reader.read_line(&mut header).expect("header line") > 2 {
                header.clear();
            }
            stream
                .write_all(
                    b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\n\
                      Content-Length: 2\r\nConnection: close\r\n\r\n[]",
                )
                .expect("write response");
            request_line
        });

        let client = HttpGitHubClient::new(&format!("http://127.0.0.1:{port}"), "t");
        let lib = RepoSlug::parse("acme/lib").expect("valid slug");
        let entries = client
            .list_contents(&lib, "Shared Libs", None)
            .expect("listing succeeds");

        assert!(entries.is_empty());
        let received = server.join().expect("server thread");
        assert!(
            received.starts_with("GET /repos/acme/lib/contents/Shared%20Libs "),
            "unexpected request line: {received}"
        );
    }

    #[test]
    fn agent_sets_no_global_timeout() {
        let config = agent_config();
        assert!(config.timeouts().global.is_none());
        assert!(config.timeouts().per_call.is_none());
    }

    #[test]
    fn trailing_slash_on_api_base_is_ignored() {
        let client = HttpGitHubClient::new("https://api.example.test///", "t");
        assert_eq!(
            client.releases_url(&repo()),
            "https://api.example.test/repos/acme/tool/releases"
        );
    }

    #[test]
    fn debug_output_hides_the_token() {
        let client = HttpGitHubClient::new("https://api.example.test", "s3cr3t");
        let rendered = format!("{client:?}");
        assert!(!rendered.contains("s3cr3t"));
        assert!(rendered.contains("redacted"));
    }

    #[test]
    fn authorization_uses_bearer_scheme() {
        let client = HttpGitHubClient::new("https://api.example.test", "abc");
        assert_eq!(client.authorization(), "Bearer abc");
    }

    #[test]
    fn map_ureq_error_keeps_status_code() {
        let mapped = map_ureq_error("https://example.test/x", &ureq::Error::StatusCode(403));
        assert!(matches!(
            mapped,
            TransportError::Status { status: 403, .. }
        ));
    }

    #[test]
    fn map_ureq_error_maps_other_failures_to_request() {
        let mapped = map_ureq_error("https://example.test/x", &ureq::Error::ConnectionFailed);
        assert!(matches!(mapped, TransportError::Request { .. }));
    }
}
