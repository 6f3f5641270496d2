use serde::{Deserialize, Serialize};

use crate::{Request, API};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BotCommand {
    /// Text of the command, 1-32 characters. Can contain only lowercase English
    /// letters, digits and underscores.
    pub command: String,

    /// Description of the command, 3-256 characters.
    pub description: String,
}

impl BotCommand {
    pub fn new(command: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            description: description.into(),
        }
    }
}

#[derive(Default, Debug, Serialize, Deserialize, Clone)]
pub struct SetMyCommandsRequest {
    /// At most 100 commands can be specified.
    pub commands: Vec<BotCommand>,

    /// A two-letter ISO 639-1 language code. If empty, commands will be applied to all
    /// users from the given scope, for whose language there are no dedicated commands.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
}

impl Request for SetMyCommandsRequest {}

impl API {
    /// Publishes the command list shown in the Telegram clients' command menu.
    pub async fn set_my_commands(&self, req: &SetMyCommandsRequest) -> anyhow::Result<bool> {
        self.client.post("setMyCommands", req).await
    }
}
