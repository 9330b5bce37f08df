use std::{fmt, time::Duration};

use reqwest::Client;
use tracing::{info, instrument};

use super::*;

/// A remote table could not be retrieved.
#[derive(Debug)]
pub struct TransportError {
    pub url: String,
    pub reason: String,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to fetch table {}: {}", self.url, self.reason)
    }
}

impl std::error::Error for TransportError {}

impl TransportError {
    fn new(url: &str, reason: impl ToString) -> Self {
        Self {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Row sets of the two spreadsheets, loaded together.
#[derive(Debug, Clone)]
pub struct Tables {
    pub medals: Vec<Row>,
    pub users: Vec<Row>,
}

#[derive(Clone, Debug)]
pub struct TableLoader {
    client: Client,
}

impl TableLoader {
    pub fn new(timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    #[instrument(skip(self))]
    pub async fn load(&self, url: &str) -> anyhow::Result<Vec<Row>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TransportError::new(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::new(url, format!("Received HTTP {status}")).into());
        }

        let text = response
            .text()
            .await
            .map_err(|e| TransportError::new(url, e))?;
        let rows = parse_table(&text);
        info!("Loaded {} rows from {url}", rows.len());
        Ok(rows)
    }

    /// Fetches both tables concurrently. Fails if either one fails.
    #[instrument(skip(self))]
    pub async fn load_tables(&self, medals_url: &str, users_url: &str) -> anyhow::Result<Tables> {
        let (medals, users) = tokio::try_join!(self.load(medals_url), self.load(users_url))?;
        Ok(Tables { medals, users })
    }
}
