use std::sync::Arc;

use futures::{future::BoxFuture, Future};

use crate::Event;

/// `State` is the bot-wide state handed to every handler. It is built once,
/// before the router starts, and is read-only from then on: there is no way
/// to get a mutable reference out of it, so concurrent handlers share it
/// without a lock.
#[derive(Default)]
pub struct State<T> {
    state: Arc<T>,
}

impl<T> State<T> {
    pub fn new(state: T) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    pub fn get(&self) -> &T {
        &self.state
    }
}

impl<T> Clone for State<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

/// `Action` represents an action to take after handling an event.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Continue to the next handler.
    Next,

    /// Stop handling this update.
    Done,

    /// Reply to the chat with the given text and continue to the next handler.
    ReplyText(String),
}

/// A handler wraps an async function that takes an [`Event`] and the bot
/// [`State`], and returns an [`Action`].
pub struct Handler<S> {
    #[allow(clippy::type_complexity)]
    pub f: Box<
        dyn Fn(Event, State<S>) -> BoxFuture<'static, Result<Action, anyhow::Error>> + Send + Sync,
    >,
}

impl<S> Handler<S> {
    pub fn new<Func, Fut>(func: Func) -> Self
    where
        Func: Send + Sync + 'static + Fn(Event, State<S>) -> Fut,
        Fut: Send + 'static + Future<Output = Result<Action, anyhow::Error>>,
    {
        Self {
            f: Box::new(move |a, b| Box::pin(func(a, b))),
        }
    }
}

impl<S, Func, Fut> From<Func> for Handler<S>
where
    Func: Send + Sync + 'static + Fn(Event, State<S>) -> Fut,
    Fut: Send + 'static + Future<Output = Result<Action, anyhow::Error>>,
{
    fn from(func: Func) -> Self {
        Self::new(func)
    }
}
