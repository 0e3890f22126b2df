//! Fetching repository lists from the GitHub REST API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, StatusCode, Url};

use crate::repository::{RepositoryRecord, parse_records};

/// Public GitHub API root.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Number of repositories requested per load.
pub const PER_PAGE: u32 = 100;

/// Error fetching a repository list.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The request never produced a response.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Status { status: u16, message: String },

    /// Rate limit exceeded.
    #[error("rate limited{}", .reset_at.map(|ts| format!(", resets at timestamp {ts}")).unwrap_or_default())]
    RateLimited { reset_at: Option<u64> },

    /// The body was not a list of repositories.
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The identifier was empty after trimming.
    #[error("empty user identifier")]
    EmptyIdentifier,

    /// The configured API root is not an absolute http(s) URL.
    #[error("invalid API URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl FetchError {
    /// Returns true when the failure came from parsing the body.
    pub const fn is_malformed(&self) -> bool {
        matches!(self, Self::Decode(_))
    }
}

/// Result alias for fetch operations.
pub type FetchResult<T> = Result<T, FetchError>;

/// Something that can list a user's repositories.
///
/// The pipeline only talks to this trait so tests and alternative hosts can
/// stand in for GitHub.
#[async_trait]
pub trait RepositorySource: Send + Sync {
    /// Lists up to [`PER_PAGE`] repositories, most recently updated first.
    async fn list_repositories(&self, user: &str) -> FetchResult<Vec<RepositoryRecord>>;
}

/// Configuration for [`GitHubClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root, without trailing slash.
    pub api_base: String,
    /// Token sent as a bearer credential.
    pub token: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Value of the `User-Agent` header.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            token: std::env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty()),
            timeout: Duration::from_secs(30),
            user_agent: format!("folio/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// GitHub-backed [`RepositorySource`].
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    base: Url,
    config: ClientConfig,
}

impl GitHubClient {
    /// Creates a client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the API root does not parse as an http(s) URL or
    /// the HTTP client cannot be constructed.
    pub fn new(config: ClientConfig) -> FetchResult<Self> {
        let invalid = |reason: String| FetchError::InvalidBaseUrl {
            url: config.api_base.clone(),
            reason,
        };
        let base = Url::parse(&config.api_base).map_err(|err| invalid(err.to_string()))?;
        if !matches!(base.scheme(), "http" | "https") || base.cannot_be_a_base() {
            return Err(invalid("expected an http(s) URL".into()));
        }

        let mut builder = Client::builder().timeout(config.timeout);
        if is_loopback(&base) {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;
        Ok(Self {
            client,
            base,
            config,
        })
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// URL listing `user`'s repositories, most recently updated first.
    ///
    /// `user` is a single path segment; `/` and `%` in it are percent-encoded.
    pub fn repos_url(&self, user: &str) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["users", user, "repos"]);
        }
        url.query_pairs_mut()
            .append_pair("sort", "updated")
            .append_pair("per_page", &PER_PAGE.to_string());
        url
    }
}

/// Local mirrors and test servers are reached directly, never through a proxy.
fn is_loopback(base: &Url) -> bool {
    matches!(
        base.host_str(),
        Some("localhost" | "127.0.0.1" | "[::1]")
    )
}

#[async_trait]
impl RepositorySource for GitHubClient {
    async fn list_repositories(&self, user: &str) -> FetchResult<Vec<RepositoryRecord>> {
        let user = user.trim();
        if user.is_empty() {
            return Err(FetchError::EmptyIdentifier);
        }

        let url = self.repos_url(user);
        tracing::debug!(%url, "fetching repositories");

        let mut request = self
            .client
            .get(url)
            .header(USER_AGENT, &self.config.user_agent)
            .header(ACCEPT, "application/vnd.github.v3+json");
        if let Some(token) = &self.config.token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::FORBIDDEN || status == StatusCode::TOO_MANY_REQUESTS {
            let remaining = response
                .headers()
                .get("x-ratelimit-remaining")
                .and_then(|v| v.to_str().ok());
            if status == StatusCode::TOO_MANY_REQUESTS || remaining == Some("0") {
                let reset_at = response
                    .headers()
                    .get("x-ratelimit-reset")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.parse().ok());
                return Err(FetchError::RateLimited { reset_at });
            }
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let records = parse_records(&body)?;
        tracing::debug!(count = records.len(), "repositories fetched");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> GitHubClient {
        GitHubClient::new(ClientConfig {
            api_base: base.to_string(),
            token: None,
            ..ClientConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn repos_url_requests_recent_hundred() {
        assert_eq!(
            client(DEFAULT_API_BASE).repos_url("alice").as_str(),
            "https://api.github.com/users/alice/repos?sort=updated&per_page=100"
        );
    }

    #[test]
    fn repos_url_trims_trailing_slash() {
        assert_eq!(
            client("http://localhost:9000/").repos_url("bob").as_str(),
            "http://localhost:9000/users/bob/repos?sort=updated&per_page=100"
        );
    }

    #[test]
    fn repos_url_keeps_enterprise_prefix() {
        assert_eq!(
            client("https://ghe.example.com/api/v3").repos_url("bob").as_str(),
            "https://ghe.example.com/api/v3/users/bob/repos?sort=updated&per_page=100"
        );
    }

    #[test]
    fn repos_url_encodes_identifier_as_one_segment() {
        let url = client(DEFAULT_API_BASE).repos_url("a/../../orgs/x");
        assert_eq!(url.path(), "/users/a%2F..%2F..%2Forgs%2Fx/repos");
        assert_eq!(url.path_segments().map(Iterator::count), Some(3));
    }

    #[test]
    fn rejects_unusable_api_base() {
        for base in ["not a url", "ftp://example.com", "mailto:me@example.com"] {
            let err = GitHubClient::new(ClientConfig {
                api_base: base.into(),
                ..ClientConfig::default()
            })
            .unwrap_err();
            assert!(matches!(err, FetchError::InvalidBaseUrl { .. }), "{base}");
        }
    }

    #[test]
    fn loopback_detection() {
        let url = |s: &str| Url::parse(s).unwrap();
        assert!(is_loopback(&url("http://127.0.0.1:8080")));
        assert!(is_loopback(&url("http://localhost/api")));
        assert!(is_loopback(&url("http://[::1]:9000")));
        assert!(!is_loopback(&url(DEFAULT_API_BASE)));
        assert!(!is_loopback(&url("https://localhost.example.com")));
    }

    #[tokio::test]
    async fn empty_identifier_is_rejected_before_any_request() {
        let err = client("http://127.0.0.1:1")
            .list_repositories("   ")
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::EmptyIdentifier));
    }

    #[test]
    fn error_display() {
        let err = FetchError::Status {
            status: 404,
            message: "Not Found".into(),
        };
        assert_eq!(err.to_string(), "API error (404): Not Found");
        assert_eq!(
            FetchError::RateLimited { reset_at: Some(7) }.to_string(),
            "rate limited, resets at timestamp 7"
        );
        assert_eq!(
            FetchError::RateLimited { reset_at: None }.to_string(),
            "rate limited"
        );
    }

    #[test]
    fn decode_errors_are_malformed() {
        let err: FetchError = parse_records("{}").unwrap_err().into();
        assert!(err.is_malformed());
        assert!(!FetchError::EmptyIdentifier.is_malformed());
    }
}
