//! The two commands of the bot and the state they share.

use crate::{
    api::BotCommand,
    handlers,
    markov::{Chain, SentenceGenerator},
    status::{format_status, StatusSource},
    Action, Client, Event, Route, Router, State,
};

/// Reply to `/status` when the status can't be fetched.
pub const STATUS_FALLBACK: &str = "Oops... something went wrong. :(";

/// Reply to `/sprachassistentin` when no sentence can be generated.
pub const BABBLE_FALLBACK: &str = "Mir fällt gerade nichts ein.";

pub const STATUS_COMMAND: &str = "status";
pub const BABBLE_COMMAND: &str = "sprachassistentin";

/// Everything the handlers need. Built once at startup and shared read-only
/// by all handlers via [`State`].
pub struct SpaceBot {
    pub chain: Chain,
    pub generator: SentenceGenerator,
    pub status: Box<dyn StatusSource>,
    pub location: String,
}

impl SpaceBot {
    pub fn new(
        chain: Chain,
        status: impl StatusSource + 'static,
        location: impl Into<String>,
    ) -> Self {
        Self {
            chain,
            generator: SentenceGenerator::default(),
            status: Box::new(status),
            location: location.into(),
        }
    }

    pub fn with_generator(mut self, generator: SentenceGenerator) -> Self {
        self.generator = generator;
        self
    }

    /// The formatted status line, or [`STATUS_FALLBACK`] if fetching fails.
    pub async fn status_reply(&self) -> String {
        match self.status.fetch().await {
            Ok(doc) => format_status(&doc, &self.location),
            Err(err) => {
                warn!("Can't get space status: {}", err);
                STATUS_FALLBACK.to_string()
            }
        }
    }

    /// A babbled sentence, or [`BABBLE_FALLBACK`] if the chain can't produce one.
    pub fn babble_reply(&self) -> String {
        match self
            .generator
            .generate(&self.chain, &mut rand::thread_rng())
        {
            Ok(sentence) => sentence,
            Err(err) => {
                warn!("Can't generate a sentence: {}", err);
                BABBLE_FALLBACK.to_string()
            }
        }
    }
}

pub async fn status_handler(_: Event, state: State<SpaceBot>) -> Result<Action, anyhow::Error> {
    Ok(Action::ReplyText(state.get().status_reply().await))
}

pub async fn babble_handler(_: Event, state: State<SpaceBot>) -> Result<Action, anyhow::Error> {
    Ok(Action::ReplyText(state.get().babble_reply()))
}

/// The commands shown in the Telegram command menu.
pub fn commands() -> Vec<BotCommand> {
    vec![
        BotCommand::new(STATUS_COMMAND, "Status des Space"),
        BotCommand::new(BABBLE_COMMAND, "Sagt etwas, das hier so gesagt wird"),
    ]
}

/// A router with the log handler and both commands wired up. Anything that
/// isn't one of the commands is only logged.
pub fn router(client: Client, bot: SpaceBot) -> Router<SpaceBot> {
    let mut router = Router::new(client, bot);
    router
        .add_route(Route::Default, handlers::log_handler)
        .add_route(Route::Command(STATUS_COMMAND.into()), status_handler)
        .add_route(Route::Command(BABBLE_COMMAND.into()), babble_handler);
    router
}
