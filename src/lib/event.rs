use std::sync::Arc;

use crate::api::{self, API};

/// `Event` represents an update passed to a handler, together with the API
/// it came from.
#[derive(Clone)]
pub struct Event {
    pub api: Arc<API>,
    pub update: api::Update,
}

impl Event {
    pub fn new(api: Arc<API>, update: api::Update) -> Self {
        Self { api, update }
    }

    /// Send a message to the chat the update came from.
    pub async fn send_message(&self, text: impl Into<String>) -> anyhow::Result<api::Message> {
        self.api
            .send_message(&api::SendMessageRequest::new(
                self.update.chat_id()?,
                text,
            ))
            .await
    }
}
