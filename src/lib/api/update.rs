use anyhow::anyhow;
use serde::{Deserialize, Serialize};

use crate::{Request, API};

use super::message::Message;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Update {
    /// The update‘s unique identifier. Update identifiers start from a
    /// certain positive number and increase sequentially.
    pub update_id: i64,

    /// New incoming message of any kind — text, photo, sticker, etc.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
}

impl Update {
    /// Returns the message carried by this update.
    pub fn message(&self) -> anyhow::Result<&Message> {
        self.message
            .as_ref()
            .ok_or(anyhow!("update {} is not a new message", self.update_id))
    }

    pub fn chat_id(&self) -> anyhow::Result<i64> {
        self.message().map(|m| m.chat.id)
    }
}

/// Use this method to receive incoming updates using long or short
/// polling. An Array of Update objects is returned.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct GetUpdatesRequest {
    /// Identifier of the first update to be returned. Must be greater by
    /// one than the highest among the identifiers of previously received
    /// updates. An update is considered confirmed as soon as getUpdates is
    /// called with an offset higher than its update_id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,

    /// Timeout in seconds for long polling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<i64>,

    /// List the types of updates you want your bot to receive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_updates: Option<Vec<String>>,
}

impl Request for GetUpdatesRequest {}

/// Convenience methods for `GetUpdatesRequest`.
impl GetUpdatesRequest {
    pub fn new() -> Self {
        Self {
            allowed_updates: Some(vec!["message".into()]),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, timeout: i64) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }
}

impl API {
    /// Use this method to receive incoming updates using long polling. An
    /// Array of Update objects is returned. See [the official docs](https://core.telegram.org/bots/api#getupdates)
    /// for more information.
    pub async fn get_updates(&self, req: &GetUpdatesRequest) -> anyhow::Result<Vec<Update>> {
        self.client.post("getUpdates", req).await
    }
}
