use crate::{Action, Event, State};

/// This handler logs every message received.
pub async fn log_handler<S>(e: Event, _: State<S>) -> Result<Action, anyhow::Error> {
    let Some(ref message) = e.update.message else {
        debug!("Update {} carries no message", e.update.update_id);
        return Ok(Action::Next);
    };

    let from = message
        .from
        .as_ref()
        .map(|u| u.first_name.as_str())
        .unwrap_or("<unknown>");
    let text = message.text.as_deref().unwrap_or_default();

    info!("({}) Message from {}: {}", message.chat.id, from, text);

    Ok(Action::Next)
}
