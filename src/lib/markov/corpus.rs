use std::{fs, path::Path};

use serde::Deserialize;
use thiserror::Error;

use super::{Chain, ChainBuilder};

#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("can't read chat export: {0}")]
    Io(#[from] std::io::Error),

    #[error("can't parse chat export: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A Telegram chat export ("Export chat history" → JSON). Only the message
/// texts are of interest; everything else in the file is ignored.
#[derive(Debug, Default, Deserialize)]
pub struct ChatExport {
    #[serde(default)]
    pub messages: Vec<ExportedMessage>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ExportedMessage {
    #[serde(default)]
    pub text: Option<MessageText>,
}

/// Telegram exports plain messages as a string and formatted ones as an
/// array of strings and entity objects.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MessageText {
    Plain(String),
    Rich(Vec<TextPart>),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TextPart {
    Plain(String),
    Entity { text: String },
}

impl MessageText {
    /// The text with all formatting dropped.
    pub fn flatten(&self) -> String {
        match self {
            MessageText::Plain(s) => s.clone(),
            MessageText::Rich(parts) => parts
                .iter()
                .map(|part| match part {
                    TextPart::Plain(s) => s.as_str(),
                    TextPart::Entity { text } => text.as_str(),
                })
                .collect(),
        }
    }
}

impl ExportedMessage {
    pub fn text(&self) -> String {
        self.text.as_ref().map(MessageText::flatten).unwrap_or_default()
    }
}

impl ChatExport {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(data: &str) -> Result<Self, CorpusError> {
        Ok(serde_json::from_str(data)?)
    }

    /// Feeds every message longer than one character into a chain, split on
    /// single spaces.
    pub fn train(&self) -> Chain {
        let mut builder = ChainBuilder::new();
        for message in &self.messages {
            let line = message.text();
            if line.chars().count() > 1 {
                builder.add(line.split(' '));
            }
        }
        builder.build()
    }
}

/// Reads the chat export at `path` and trains a chain on it.
pub fn read_corpus(path: impl AsRef<Path>) -> Result<Chain, CorpusError> {
    let data = fs::read_to_string(path)?;
    Ok(ChatExport::from_str(&data)?.train())
}

/// Like [`read_corpus`], but a missing or malformed export gives an empty
/// chain. The bot still serves `/status` without a corpus.
pub fn load_chain(path: impl AsRef<Path>) -> Chain {
    let path = path.as_ref();
    match read_corpus(path) {
        Ok(chain) => {
            info!(
                "Trained chain on {} lines from {} ({} contexts)",
                chain.lines(),
                path.display(),
                chain.len()
            );
            chain
        }
        Err(err) => {
            warn!("{} ({}), starting with an empty chain", err, path.display());
            Chain::default()
        }
    }
}
