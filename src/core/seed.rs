//! Remote seed source for the first-run user list

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

use crate::data::UserRecord;

/// Public mock endpoint used when no seed URL is configured
pub const DEFAULT_SEED_URL: &str = "https://jsonplaceholder.typicode.com/users";

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Seed endpoint returned status {0}")]
    Status(u16),
    #[error("Seed source unavailable: {0}")]
    Unavailable(String),
}

/// Something that can produce the initial user list
#[async_trait]
pub trait SeedSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<UserRecord>, SeedError>;
}

/// Fetches the seed list with a single GET returning a JSON array
#[derive(Debug, Clone)]
pub struct HttpSeedSource {
    client: Client,
    url: String,
}

impl HttpSeedSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, SeedError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl SeedSource for HttpSeedSource {
    async fn fetch(&self) -> Result<Vec<UserRecord>, SeedError> {
        tracing::debug!(url = %self.url, "Fetching seed users");

        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SeedError::Status(status.as_u16()));
        }

        let users: Vec<UserRecord> = response.json().await?;
        tracing::info!(count = users.len(), "Fetched seed users");
        Ok(users)
    }
}

/// Seed source that never yields anything; used when seeding is disabled
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSeed;

#[async_trait]
impl SeedSource for NoSeed {
    async fn fetch(&self) -> Result<Vec<UserRecord>, SeedError> {
        Ok(Vec::new())
    }
}
