use serde::{Deserialize, Serialize};

use crate::{Request, API};

#[derive(Default, Debug, Clone, Deserialize, Serialize)]
pub struct User {
    /// Unique identifier for this user or bot
    pub id: i64,

    /// True, if this user is a bot
    #[serde(default)]
    pub is_bot: bool,

    /// User‘s or bot’s first name
    pub first_name: String,

    /// User‘s or bot’s last name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    /// User‘s or bot’s username
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// `getMe` takes no parameters.
#[derive(Default, Debug, Clone, Deserialize, Serialize)]
pub struct GetMeRequest {}

impl Request for GetMeRequest {}

impl API {
    /// Returns basic information about the bot. Fails if the token is invalid,
    /// which makes it a cheap credentials check at startup.
    pub async fn get_me(&self) -> anyhow::Result<User> {
        self.client.post("getMe", &GetMeRequest::default()).await
    }
}
