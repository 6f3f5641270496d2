//! `spacebot` is the Telegram bot of a hackerspace group chat.
//!
//! It answers two commands:
//!
//! - `/status` fetches the space's status document (door, temperature,
//! humidity, CO2) and replies with a single German line, see [`status`].
//!
//! - `/sprachassistentin` replies with a sentence babbled by a first-order
//! Markov chain that was trained once at startup on an exported chat
//! history, see [`markov`].
//!
//! # Framework
//!
//! The bot sits on a thin Telegram layer:
//!
//! - [`Client`] talks to the Telegram Bot API. It can be pointed at the
//! in-process [`fake::FakeServer`] for tests.
//!
//! - [`Router`] long-polls for updates and passes every update to the
//! handlers whose [`Route`] matches it.
//!
//! - `Handler`s are async functions that take an [`Event`] and the bot's
//! [`State`], and return an [`Action`].
//!
//! `State` is shared by every handler and is never written after the router
//! starts, so handlers read it without any locking.
//!
//! # Example
//!
//! ```no_run
//! use spacebot::*;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = Client::new(std::env::var("TELEGRAM_TOKEN").unwrap());
//!     Router::new(client, ())
//!         .add_route(
//!             Route::Command("ping".into()),
//!             |_: Event, _: State<()>| async move { Ok(Action::ReplyText("pong".into())) },
//!         )
//!         .start()
//!         .await;
//! }
//! ```

#[macro_use]
extern crate log;

pub mod api;
pub mod bot;
pub mod client;
pub mod config;
pub mod event;
pub mod fake;
pub mod handler;
pub mod handlers;
pub mod markov;
pub mod router;
pub mod status;

pub use api::api::*;
pub use client::*;
pub use event::*;
pub use handler::*;
pub use router::*;

/// This method initializes [`env_logger`] from the environment, defaulting to `info` level logging.
pub fn init_logger() {
    // We use try_init here so it can by run by tests.
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
    debug!("Logger initialized.");
}
