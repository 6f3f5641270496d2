//! Command line flags, with environment variables as fallback.

use std::{path::PathBuf, time::Duration};

use argh::FromArgs;
use thiserror::Error;

#[derive(FromArgs, Debug)]
/// Telegram bot reporting the space status and babbling like the group chat.
pub struct Args {
    /// telegram API token (env: TELEGRAM_TOKEN)
    #[argh(option)]
    pub apitoken: Option<String>,

    /// URL of the space status JSON (env: SPACESTATUS_URL)
    #[argh(option)]
    pub spacestatusurl: Option<String>,

    /// telegram chat export (JSON) to train the markov chain on (env: CHAT_HISTORY_FILE)
    #[argh(option)]
    pub chathistoryfile: Option<String>,

    /// sensor location to report in /status (env: SENSOR_LOCATION)
    #[argh(option)]
    pub sensorlocation: Option<String>,

    /// timeout in seconds for fetching the status (default: 10)
    #[argh(option, default = "10")]
    pub fetchtimeout: u64,

    /// long poll timeout in seconds for telegram updates (default: 60)
    #[argh(option, default = "60")]
    pub polltimeout: u32,

    /// maximum number of words in a babbled sentence (default: 100)
    #[argh(option, default = "100")]
    pub maxtokens: usize,
}

impl Default for Args {
    /// No values given, optional flags at their `--help` defaults.
    fn default() -> Self {
        Self {
            apitoken: None,
            spacestatusurl: None,
            chathistoryfile: None,
            sensorlocation: None,
            fetchtimeout: 10,
            polltimeout: 60,
            maxtokens: 100,
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required --{flag} (or {env})")]
    Missing {
        flag: &'static str,
        env: &'static str,
    },
}

/// Validated configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_token: String,
    pub status_url: String,
    pub chat_history_file: PathBuf,
    pub sensor_location: String,
    pub fetch_timeout: Duration,
    pub poll_timeout_s: i64,
    pub max_tokens: usize,
}

impl Config {
    /// Resolves `args` against the process environment.
    pub fn from_args(args: Args) -> Result<Self, ConfigError> {
        Self::resolve(args, |key| std::env::var(key).ok())
    }

    /// Resolves `args`, looking up missing values with `env`. Flags win over
    /// the environment and empty values count as missing.
    pub fn resolve(args: Args, env: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |value: Option<String>, flag: &'static str, key: &'static str| {
            value
                .filter(|v| !v.is_empty())
                .or_else(|| env(key).filter(|v| !v.is_empty()))
                .ok_or(ConfigError::Missing { flag, env: key })
        };

        Ok(Self {
            api_token: required(args.apitoken, "apitoken", "TELEGRAM_TOKEN")?,
            status_url: required(args.spacestatusurl, "spacestatusurl", "SPACESTATUS_URL")?,
            chat_history_file: required(
                args.chathistoryfile,
                "chathistoryfile",
                "CHAT_HISTORY_FILE",
            )?
            .into(),
            sensor_location: required(args.sensorlocation, "sensorlocation", "SENSOR_LOCATION")?,
            fetch_timeout: Duration::from_secs(args.fetchtimeout.max(1)),
            poll_timeout_s: i64::from(args.polltimeout),
            max_tokens: args.maxtokens.max(1),
        })
    }
}

/// The `--help` text for `command_name`.
pub fn usage(command_name: &str) -> String {
    match Args::from_args(&[command_name], &["--help"]) {
        Err(early_exit) => early_exit.output,
        Ok(_) => String::new(),
    }
}
