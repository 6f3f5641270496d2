//! This is a fake Telegram API server. It implements the parts of the Telegram
//! API the bot uses, but instead of talking to Telegram, it delivers messages
//! between the bot and [`FakeChat`] objects, which can be used to test bots.
use std::{collections::HashMap, sync::Arc, time::Duration};

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{mpsc, Mutex};

use crate::{
    api::{
        self, BotCommand, GetUpdatesRequest, Message, SendMessageRequest, SetMyCommandsRequest,
        Update,
    },
    ApiResponse, Post,
};

/// A chat between a fake user and the bot.
pub struct FakeChat {
    pub chat_id: i64,
    pub from: String,
    update_tx: mpsc::Sender<Message>,
    chat_rx: Mutex<mpsc::Receiver<Message>>,
}

impl FakeChat {
    /// Sends `text` to the bot as the chat's user.
    pub async fn send_text(&self, text: impl Into<String>) -> Result<()> {
        Ok(self.update_tx.send(self.message(text)).await?)
    }

    /// Sends `text` to the bot as a reply to `message`.
    pub async fn send_reply(&self, text: impl Into<String>, message: &Message) -> Result<()> {
        let mut reply = self.message(text);
        reply.reply_to_message = Some(Box::new(Message {
            reply_to_message: None,
            ..message.clone()
        }));

        Ok(self.update_tx.send(reply).await?)
    }

    fn message(&self, text: impl Into<String>) -> Message {
        Message {
            message_id: rand::random::<u32>() as i64,
            from: Some(api::User {
                id: 1,
                first_name: self.from.clone(),
                username: Some(self.from.clone()),
                ..Default::default()
            }),
            date: Utc::now().timestamp(),
            text: Some(text.into()),
            chat: api::Chat {
                id: self.chat_id,
                chat_type: String::from("private"),
                username: Some(self.from.clone()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Waits for the next message the bot sends to this chat.
    pub async fn recv_message(&self) -> Option<Message> {
        self.chat_rx.lock().await.recv().await
    }

    /// Waits for the next message and returns its text.
    pub async fn recv_text(&self) -> Option<String> {
        self.recv_message().await.and_then(|m| m.text)
    }
}

pub struct FakeAPI {
    pub bot_name: String,
    update_id: Mutex<i64>,
    update_tx: mpsc::Sender<Message>,
    update_rx: Mutex<mpsc::Receiver<Message>>,
    chats: Mutex<HashMap<i64, mpsc::Sender<Message>>>,
    commands: Mutex<Vec<BotCommand>>,
}

impl Default for FakeAPI {
    fn default() -> Self {
        Self::new("spacebot")
    }
}

impl FakeAPI {
    pub fn new(bot_name: impl Into<String>) -> Self {
        let (update_tx, update_rx) = mpsc::channel(100);

        Self {
            bot_name: bot_name.into(),
            update_id: Mutex::new(0),
            update_tx,
            update_rx: Mutex::new(update_rx),
            chats: Mutex::new(HashMap::new()),
            commands: Mutex::new(vec![]),
        }
    }

    /// Opens a new chat with a random ID.
    pub async fn create_chat(&self, from: impl Into<String>) -> FakeChat {
        let chat_id = rand::random::<u32>() as i64;
        let (tx, rx) = mpsc::channel(100);

        self.chats.lock().await.insert(chat_id, tx);

        FakeChat {
            chat_id,
            from: from.into(),
            update_tx: self.update_tx.clone(),
            chat_rx: Mutex::new(rx),
        }
    }

    /// The commands last registered with `setMyCommands`.
    pub async fn commands(&self) -> Vec<BotCommand> {
        self.commands.lock().await.clone()
    }

    fn me(&self) -> api::User {
        api::User {
            id: 42,
            is_bot: true,
            first_name: self.bot_name.clone(),
            username: Some(self.bot_name.clone()),
            ..Default::default()
        }
    }

    async fn get_updates(&self, req: GetUpdatesRequest) -> ApiResponse<Vec<Update>> {
        let mut rx = self.update_rx.lock().await;

        tokio::select! {
            Some(message) = rx.recv() => {
                let update_id = {
                    let mut update_id = self.update_id.lock().await;
                    *update_id += 1;
                    *update_id
                };

                ApiResponse::Ok(vec![Update {
                    update_id,
                    message: Some(message),
                }])
            }
            _ = tokio::time::sleep(Duration::from_secs(req.timeout.unwrap_or(1).max(0) as u64)) => {
                ApiResponse::Ok(vec![])
            }
        }
    }

    async fn send_message(&self, req: SendMessageRequest) -> ApiResponse<Message> {
        let message = Message {
            message_id: rand::random::<u32>() as i64,
            from: Some(self.me()),
            date: Utc::now().timestamp(),
            text: Some(req.text),
            chat: api::Chat {
                id: req.chat_id,
                chat_type: String::from("private"),
                ..Default::default()
            },
            reply_to_message: None,
        };

        match self.chats.lock().await.get(&req.chat_id) {
            Some(chat) => {
                if chat.send(message.clone()).await.is_err() {
                    warn!("Chat {} is gone", req.chat_id);
                }
                ApiResponse::Ok(message)
            }
            None => ApiResponse::Err("Bad Request: chat not found"),
        }
    }

    async fn set_my_commands(&self, req: SetMyCommandsRequest) -> ApiResponse<bool> {
        *self.commands.lock().await = req.commands;
        ApiResponse::Ok(true)
    }
}

#[derive(Clone, Default)]
pub struct FakeServer {
    pub api: Arc<FakeAPI>,
}

impl FakeServer {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Post for FakeServer {
    async fn post(&self, method: String, req: String) -> Result<String> {
        use serde_json::to_string as json;

        debug!("method = {}, req = {}", method, req);
        let response = match method.as_str() {
            "getMe" => json(&ApiResponse::Ok(self.api.me())),
            "getUpdates" => json(&self.api.get_updates(serde_json::from_str(&req)?).await),
            "sendMessage" => json(&self.api.send_message(serde_json::from_str(&req)?).await),
            "setMyCommands" => json(&self.api.set_my_commands(serde_json::from_str(&req)?).await),
            _ => {
                warn!("Unknown method: {}", method);
                json(&ApiResponse::<()>::Err(format!(
                    "Unknown method: {}",
                    method
                )))
            }
        };

        Ok(response?)
    }
}
