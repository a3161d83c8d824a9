use chrono::{DateTime, Utc};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GithubError>;

#[derive(Error, Debug)]
pub enum GithubError {
    #[error("invalid repository '{0}', expected owner/name")]
    InvalidRepo(String),

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("network error requesting {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("GitHub rejected the access token (HTTP 401), check --token")]
    Unauthorized,

    #[error("GitHub API rate limit exceeded{}", reset_hint(.reset))]
    RateLimited { reset: Option<DateTime<Utc>> },

    #[error("repository {0} not found")]
    NotFound(String),

    #[error("GitHub API returned HTTP {status} for {url}: {message}")]
    Status {
        status: u16,
        url: String,
        message: String,
    },

    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

fn reset_hint(reset: &Option<DateTime<Utc>>) -> String {
    match reset {
        Some(at) => format!(", resets at {}", at.format("%Y-%m-%d %H:%M:%S UTC")),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn rate_limit_message_includes_reset() {
        let reset = Utc.timestamp_opt(1_700_000_000, 0).single();
        let err = GithubError::RateLimited { reset };
        assert_eq!(
            err.to_string(),
            "GitHub API rate limit exceeded, resets at 2023-11-14 22:13:20 UTC"
        );
    }

    #[test]
    fn rate_limit_message_without_reset() {
        let err = GithubError::RateLimited { reset: None };
        assert_eq!(err.to_string(), "GitHub API rate limit exceeded");
    }
}
