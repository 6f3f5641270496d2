//! `Router` is the main entry point to the bot. It is used to register handlers
//! for different routes, and passes the shared bot state to every handler.
//!
//! Routes are matched in registration order. A handler returning
//! [`Action::Next`] or [`Action::ReplyText`] lets the next matching handler run,
//! [`Action::Done`] stops processing of the update.
use std::{cmp::max, sync::Arc, time::Duration};

use tokio::sync::{mpsc, Notify};

use crate::{
    api::{GetUpdatesRequest, Update},
    Action, Client, Event, Handler, State, API,
};

/// How long to wait before polling again after `getUpdates` failed.
const POLL_ERROR_BACKOFF: Duration = Duration::from_secs(5);

/// `Route` selects the updates a handler is called for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Messages carrying the bot command with this name (without the leading
    /// `/`), e.g. `Command("status")` matches `/status`, `/status now` and
    /// `/status@thisbot`.
    Command(String),

    /// Every update.
    Default,
}

impl Route {
    pub fn matches(&self, update: &Update, bot_username: Option<&str>) -> bool {
        match self {
            Route::Default => true,
            Route::Command(command) => update
                .message
                .as_ref()
                .and_then(|m| m.text.as_deref())
                .map(|text| is_command(text, command, bot_username))
                .unwrap_or(false),
        }
    }
}

/// Returns true if `text` starts with `/command`. `bot_username` is the bot's
/// own username, if known; commands addressed to other bots never match.
pub fn is_command(text: &str, command: &str, bot_username: Option<&str>) -> bool {
    let Some(first) = text.split_whitespace().next() else {
        return false;
    };
    let Some(first) = first.strip_prefix('/') else {
        return false;
    };

    match first.split_once('@') {
        None => first == command,
        Some((name, target)) => {
            name == command
                && bot_username
                    .map(|me| me.eq_ignore_ascii_case(target))
                    .unwrap_or(true)
        }
    }
}

pub struct Router<S> {
    pub api: Arc<API>,

    /// Routes and their handlers, in registration order.
    handlers: Vec<(Route, Handler<S>)>,

    /// Bot-wide state, frozen before `start`.
    state: State<S>,

    /// Username of the bot, used to match `/command@username`.
    bot_username: Option<String>,

    /// HTTP poll timeout
    timeout_s: i64,

    /// Shutdown notifier
    shutdown: Arc<Notify>,
    shutdown_tx: Arc<mpsc::Sender<()>>,
    shutdown_rx: mpsc::Receiver<()>,
}

impl<S: Send + Sync + 'static> Router<S> {
    /// Create a new router with the given client and the bot-wide state.
    pub fn new(client: Client, state: S) -> Self {
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);

        Self {
            api: Arc::new(API::new(client)),
            handlers: vec![],
            state: State::new(state),
            bot_username: None,
            timeout_s: 60,
            shutdown: Arc::new(Notify::new()),
            shutdown_tx: Arc::new(shutdown_tx),
            shutdown_rx,
        }
    }

    pub fn with_poll_timeout_s(mut self, timeout_s: i64) -> Self {
        self.timeout_s = timeout_s;
        self
    }

    pub fn with_bot_username(mut self, username: impl Into<String>) -> Self {
        self.bot_username = Some(username.into());
        self
    }

    /// Add a handler for `route`. Handlers run in the order they were added.
    pub fn add_route(&mut self, route: Route, h: impl Into<Handler<S>>) -> &mut Self {
        self.handlers.push((route, h.into()));
        self
    }

    /// Returns the handles used to stop a running router: send `()` on the
    /// sender, then wait on the notifier until polling has stopped.
    pub fn shutdown(&self) -> (Arc<Notify>, Arc<mpsc::Sender<()>>) {
        (Arc::clone(&self.shutdown), Arc::clone(&self.shutdown_tx))
    }

    /// Start the router. This polls until a shutdown is requested.
    pub async fn start(&mut self) {
        let handlers = Arc::new(std::mem::take(&mut self.handlers));
        let bot_username = self.bot_username.clone();
        let mut last_update_id = 0;

        loop {
            debug!(
                "Polling /getUpdates with last_update_id = {} timeout = {}s",
                last_update_id, self.timeout_s
            );

            let req = GetUpdatesRequest::new()
                .with_timeout(self.timeout_s)
                .with_offset(last_update_id + 1);

            let updates = tokio::select! {
                _ = self.shutdown_rx.recv() => {
                    info!("Received shutdown signal");
                    break;
                }
                updates = self.api.get_updates(&req) => updates,
            };

            let updates = match updates {
                Ok(updates) => updates,
                Err(err) => {
                    error!("Failed to poll updates: {}", err);
                    tokio::time::sleep(POLL_ERROR_BACKOFF).await;
                    continue;
                }
            };

            for update in updates {
                last_update_id = max(last_update_id, update.update_id);

                let api = Arc::clone(&self.api);
                let handlers = Arc::clone(&handlers);
                let state = self.state.clone();
                let bot_username = bot_username.clone();
                tokio::spawn(async move {
                    let update_id = update.update_id;
                    if let Err(err) =
                        Self::handle_update(api, handlers, state, bot_username, update).await
                    {
                        error!("Error handling update {}: {}", update_id, err);
                    }
                });
            }
        }

        self.shutdown.notify_one();
    }

    async fn handle_update(
        api: Arc<API>,
        handlers: Arc<Vec<(Route, Handler<S>)>>,
        state: State<S>,
        bot_username: Option<String>,
        update: Update,
    ) -> anyhow::Result<()> {
        for (route, handler) in handlers.iter() {
            if !route.matches(&update, bot_username.as_deref()) {
                continue;
            }

            let event = Event::new(Arc::clone(&api), update.clone());
            match (handler.f)(event.clone(), state.clone()).await? {
                Action::Next => {}
                Action::Done => {
                    break;
                }
                Action::ReplyText(text) => {
                    event.send_message(text).await?;
                }
            }
        }
        Ok(())
    }
}
