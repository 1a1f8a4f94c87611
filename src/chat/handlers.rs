use axum::{extract::State, Json};
use tracing::{debug, instrument};

use super::models::{ChatCommand, ChatMessage, DispatchOutcome};
use crate::shared::AppState;

/// HTTP handler for inbound chat messages forwarded by the gateway
///
/// POST /events/message
#[instrument(name = "message_event", skip(state, message))]
pub async fn message_event(
    State(state): State<AppState>,
    Json(message): Json<ChatMessage>,
) -> Json<DispatchOutcome> {
    let outcome = state.dispatcher.dispatch_message(&message).await;
    debug!(handled = outcome.handled, actions = outcome.actions.len(), "Message dispatched");
    Json(outcome)
}

/// HTTP handler for inbound slash commands
///
/// POST /events/command
#[instrument(name = "command_event", skip(state, command))]
pub async fn command_event(
    State(state): State<AppState>,
    Json(command): Json<ChatCommand>,
) -> Json<DispatchOutcome> {
    let outcome = state.dispatcher.dispatch_command(&command).await;
    debug!(handled = outcome.handled, actions = outcome.actions.len(), "Command dispatched");
    Json(outcome)
}
