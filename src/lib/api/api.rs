use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Client;

/// This is the main Telegram API client. Requires an instance of `Client` initialized
/// with a valid API token.
pub struct API {
    /// The underlying HTTP client.
    pub client: Client,
}

impl API {
    /// Returns a new Telegram API client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

/// Request is a trait that all Telegram API requests must implement.
pub trait Request: Serialize + Send + Sync {}

/// Errors reported by Telegram in place of a result.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Telegram error: {0}")]
    Telegram(String),

    #[error("Telegram sent neither a result nor an error")]
    MissingResult,
}

/// The envelope around every Telegram API response: `result` is set when
/// `ok` is true, `description` when it is false.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiResponse<T> {
    pub ok: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
}

impl<T> ApiResponse<T> {
    #[allow(non_snake_case)]
    pub fn Ok(result: T) -> Self {
        Self {
            ok: true,
            description: None,
            result: Some(result),
        }
    }

    #[allow(non_snake_case)]
    pub fn Err(description: impl Into<String>) -> Self {
        Self {
            ok: false,
            description: Some(description.into()),
            result: None,
        }
    }

    /// Unwraps the envelope into the result or the error Telegram described.
    pub fn into_result(self) -> Result<T, ApiError> {
        match (self.ok, self.result) {
            (true, Some(result)) => Ok(result),
            (true, None) => Err(ApiError::MissingResult),
            (false, _) => Err(ApiError::Telegram(
                self.description
                    .unwrap_or_else(|| "no error description".to_string()),
            )),
        }
    }
}
