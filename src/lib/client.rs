use std::time::Duration;

use anyhow::Result;
use derive_more::*;
use serde::{de::DeserializeOwned, Serialize};

use crate::api::ApiResponse;

/// This is a wrapper around the Telegram API token string. Get your token from
/// [@BotFather](https://t.me/BotFather).
#[derive(Debug, Clone, From, Into, FromStr, Display)]
pub struct ApiToken(String);

impl From<&str> for ApiToken {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

/// Implement `Post` to replace the HTTP transport of a [`Client`], e.g. with
/// [`crate::fake::FakeServer`] in tests.
#[async_trait::async_trait]
pub trait Post {
    async fn post(&self, method: String, req: String) -> Result<String>;
}

/// This is a thin shim around the Telegram HTTP client. Requires a valid API token.
pub struct Client {
    /// This base URL is used for all requests and is constructed from the
    /// provided API token.
    base_url: String,

    /// The underlying HTTP client.
    client: reqwest::Client,

    /// Upper bound for a single request. Must stay above the long poll timeout
    /// used for `getUpdates`.
    request_timeout: Duration,

    /// A post handler that implements the Post trait. Useful for testing.
    post_handler: Option<Box<dyn Post + Send + Sync>>,
}

impl Client {
    /// Returns a new Telegram API client.
    pub fn new(token: impl Into<ApiToken>) -> Self {
        let token = token.into();
        Self {
            base_url: format!("https://api.telegram.org/bot{token}"),
            client: reqwest::Client::new(),
            request_timeout: Duration::from_secs(90),
            post_handler: None,
        }
    }

    pub fn with_post_handler(mut self, post_handler: impl Post + Send + Sync + 'static) -> Self {
        self.post_handler = Some(Box::new(post_handler));
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Send `method` with `req` as the request body to the Telegram API.
    pub async fn post<Req, Resp>(&self, method: &str, req: &Req) -> Result<Resp>
    where
        Req: crate::api::Request,
        Resp: Serialize + DeserializeOwned,
    {
        let body = if let Some(ref post_handler) = self.post_handler {
            post_handler
                .post(method.to_string(), serde_json::to_string(req)?)
                .await?
        } else {
            debug!("POST /{}:\n{}", method, serde_json::to_string_pretty(req)?);
            self.client
                .post(format!("{}/{}", self.base_url, method))
                .timeout(self.request_timeout)
                .json(&req)
                .send()
                .await?
                .text()
                .await?
        };

        let response: ApiResponse<Resp> = serde_json::from_str(&body)?;
        debug!(
            "Response /{}:\n{}",
            method,
            serde_json::to_string_pretty(&response)?
        );
        Ok(response.into_result()?)
    }
}
