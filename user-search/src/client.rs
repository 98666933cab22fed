use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use tracing::warn;
use url::Url;

use crate::UserSearchService;
use crate::UserSummary;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("invalid user search endpoint: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("user search request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("user search failed: HTTP {0}")]
    Status(reqwest::StatusCode),
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    users: Vec<UserSummary>,
}

/// Client for the wiki's `/api/users/search` endpoint.
pub struct UserSearchClient {
    client: reqwest::Client,
    base_url: String,
}

impl UserSearchClient {
    /// `timeout` bounds the whole request. `None` keeps the request open until
    /// the server answers or the connection drops.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Self {
        let mut builder = reqwest::Client::builder().connect_timeout(Duration::from_secs(5));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().unwrap_or_else(|_| reqwest::Client::new());
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn search_url(&self, query: &str, limit: usize) -> Result<Url, SearchError> {
        let mut url = Url::parse(&format!(
            "{}/api/users/search",
            self.base_url.trim_end_matches('/')
        ))?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("limit", &limit.to_string());
        Ok(url)
    }
}

#[async_trait]
impl UserSearchService for UserSearchClient {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<UserSummary>, SearchError> {
        let url = self.search_url(query, limit)?;
        debug!("searching users: {url}");
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(SearchError::Status(status));
        }

        // A body we cannot understand is reported as "nobody matched" rather
        // than as a failure.
        let body = resp.text().await?;
        match serde_json::from_str::<SearchResponse>(&body) {
            Ok(SearchResponse { mut users }) => {
                users.truncate(limit);
                Ok(users)
            }
            Err(err) => {
                warn!("malformed user search response for {query:?}: {err}");
                Ok(Vec::new())
            }
        }
    }
}
