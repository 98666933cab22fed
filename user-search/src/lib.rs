use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;
use std::num::NonZero;

mod cli;
mod client;

pub use cli::Cli;
pub use client::SearchError;
pub use client::UserSearchClient;
pub use reqwest::StatusCode;

/// Number of users requested per search unless the caller asks otherwise.
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// A user returned by the search endpoint.
///
/// * `username`     – Handle inserted after the `@`.
/// * `display_name` – Optional human readable name (`name` on the wire).
/// * `avatar_url`   – Optional avatar location (`avatar` on the wire).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub username: String,
    #[serde(default, alias = "name", skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, alias = "avatar", skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl UserSummary {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            display_name: None,
            avatar_url: None,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }
}

pub struct UserSearchResults {
    pub query: String,
    pub users: Vec<UserSummary>,
}

/// Ranked username lookup for a query prefix.
///
/// Implementations must be cheap to share across tasks; the autocomplete
/// holds one behind an `Arc` and calls it from spawned tokio tasks.
#[async_trait]
pub trait UserSearchService: Send + Sync {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<UserSummary>, SearchError>;
}

pub trait Reporter {
    fn report_user(&self, user: &UserSummary);
    fn warn_no_users(&self, query: &str);
    fn warn_no_search_query(&self, base_url: &str);
}

pub async fn run_main<T: Reporter>(
    Cli {
        query,
        limit,
        base_url,
        json: _,
        timeout_ms,
    }: Cli,
    reporter: T,
) -> anyhow::Result<()> {
    let client = UserSearchClient::new(
        base_url,
        timeout_ms.map(std::time::Duration::from_millis),
    );
    let query = match query {
        Some(query) => query,
        None => {
            reporter.warn_no_search_query(client.base_url());
            return Ok(());
        }
    };

    let UserSearchResults { query, users } = run(&client, &query, limit).await?;
    if users.is_empty() {
        reporter.warn_no_users(&query);
    }
    for user in &users {
        reporter.report_user(user);
    }

    Ok(())
}

pub async fn run(
    service: &dyn UserSearchService,
    query: &str,
    limit: NonZero<usize>,
) -> Result<UserSearchResults, SearchError> {
    let users = service.search(query, limit.get()).await?;
    Ok(UserSearchResults {
        query: query.to_string(),
        users,
    })
}
