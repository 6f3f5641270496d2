use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use super::StatusDocument;

#[derive(Error, Debug)]
pub enum StatusError {
    #[error("status request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("status document is malformed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Where `/status` gets the status document from.
#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn fetch(&self) -> Result<StatusDocument, StatusError>;
}

/// Fetches the status document with a single GET. No retries: a failed fetch
/// fails the request.
pub struct HttpStatusSource {
    url: String,
    client: reqwest::Client,
}

impl HttpStatusSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, StatusError> {
        Ok(Self {
            url: url.into(),
            client: reqwest::Client::builder().timeout(timeout).build()?,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl StatusSource for HttpStatusSource {
    async fn fetch(&self) -> Result<StatusDocument, StatusError> {
        debug!("GET {}", self.url);
        let body = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Ok(serde_json::from_str(&body)?)
    }
}
