use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{GithubError, Result};
use crate::records::{Activity, CommentRecord, ContributorStat};

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const MAX_PER_PAGE: u8 = 100;

/// `owner/name` pair identifying a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl FromStr for RepoRef {
    type Err = GithubError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let invalid = || GithubError::InvalidRepo(s.to_string());

        let (owner, name) = trimmed.split_once('/').ok_or_else(invalid)?;
        let name = name.strip_suffix(".git").unwrap_or(name);
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(invalid());
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub per_page: u8,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            token: None,
            per_page: MAX_PER_PAGE,
            timeout: Duration::from_secs(30),
            user_agent: concat!("repostat/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Clone)]
pub struct GithubClient {
    token: Option<Arc<String>>,
    http: Arc<Client>,
    base_url: Arc<String>,
    per_page: u8,
}

impl GithubClient {
    /// Create a REST client. The token, when given, is sent on every request.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(config.user_agent)
            .timeout(config.timeout)
            .build()
            .map_err(GithubError::Client)?;

        Ok(Self {
            token: config.token.map(Arc::new),
            http: Arc::new(http),
            base_url: Arc::new(config.base_url.trim_end_matches('/').to_string()),
            per_page: config.per_page.clamp(1, MAX_PER_PAGE),
        })
    }

    /// Comments on the repository (first page only).
    pub async fn comments(&self, repo: &RepoRef) -> Result<Vec<Activity>> {
        let url = self.endpoint(repo, "comments");
        let records: Vec<CommentRecord> = self.get_list(&url).await?;
        Ok(records
            .into_iter()
            .filter_map(CommentRecord::into_activity)
            .collect())
    }

    /// Per-contributor commit totals (first page only).
    ///
    /// GitHub answers 202 while it is still computing the statistics; that case
    /// yields an empty list rather than an error.
    pub async fn contributor_stats(&self, repo: &RepoRef) -> Result<Vec<Activity>> {
        let url = self.endpoint(repo, "stats/contributors");
        let records: Vec<ContributorStat> = self.get_list(&url).await?;
        Ok(records
            .into_iter()
            .filter_map(ContributorStat::into_activity)
            .collect())
    }

    fn endpoint(&self, repo: &RepoRef, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/{path}?per_page={}",
            self.base_url, repo.owner, repo.name, self.per_page
        )
    }

    /// GET a JSON array. Elements that do not decode as `T` are skipped.
    async fn get_list<T: DeserializeOwned>(&self, url: &str) -> Result<Vec<T>> {
        let mut req = self
            .http
            .get(url)
            .header(ACCEPT, "application/vnd.github+json");
        if let Some(token) = &self.token {
            req = req.header(AUTHORIZATION, format!("token {token}"));
        }
        debug!(url, authenticated = self.token.is_some(), "GET");

        let resp = req.send().await.map_err(|source| GithubError::Network {
            url: url.to_string(),
            source,
        })?;

        let status = resp.status();
        let headers = resp.headers().clone();
        debug!(
            url,
            status = status.as_u16(),
            remaining = header_str(&headers, "x-ratelimit-remaining"),
            "response"
        );

        let body = resp.text().await.map_err(|source| GithubError::Network {
            url: url.to_string(),
            source,
        })?;

        match status {
            StatusCode::ACCEPTED => {
                warn!(url, "GitHub is still computing this data; treating it as empty");
                return Ok(Vec::new());
            }
            StatusCode::NO_CONTENT => return Ok(Vec::new()),
            s if s.is_success() => {}
            s => return Err(status_error(s, &headers, url, &body)),
        }

        if body.trim().is_empty() {
            return Ok(Vec::new());
        }

        let items: Vec<Value> =
            serde_json::from_str(&body).map_err(|source| GithubError::Decode {
                url: url.to_string(),
                source,
            })?;

        let total = items.len();
        let records: Vec<T> = items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect();
        if records.len() < total {
            debug!(url, skipped = total - records.len(), "skipped malformed records");
        }

        Ok(records)
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

fn rate_limit_reset(headers: &HeaderMap) -> Option<DateTime<Utc>> {
    header_str(headers, "x-ratelimit-reset")
        .and_then(|s| s.parse::<i64>().ok())
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
}

fn status_error(status: StatusCode, headers: &HeaderMap, url: &str, body: &str) -> GithubError {
    let exhausted = header_str(headers, "x-ratelimit-remaining") == Some("0");

    match status {
        StatusCode::UNAUTHORIZED => GithubError::Unauthorized,
        StatusCode::TOO_MANY_REQUESTS => GithubError::RateLimited {
            reset: rate_limit_reset(headers),
        },
        StatusCode::FORBIDDEN if exhausted => GithubError::RateLimited {
            reset: rate_limit_reset(headers),
        },
        StatusCode::NOT_FOUND => GithubError::NotFound(repo_from_url(url)),
        _ => {
            let message = serde_json::from_str::<Value>(body)
                .ok()
                .and_then(|v| v.get("message").and_then(Value::as_str).map(String::from))
                .unwrap_or_else(|| body.trim().to_string());
            GithubError::Status {
                status: status.as_u16(),
                url: url.to_string(),
                message,
            }
        }
    }
}

/// Recover `owner/name` from an endpoint URL for error messages.
fn repo_from_url(url: &str) -> String {
    url.split_once("/repos/")
        .map(|(_, rest)| rest.splitn(3, '/').take(2).collect::<Vec<_>>().join("/"))
        .unwrap_or_else(|| url.to_string())
}
