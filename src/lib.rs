// Library crate for the squawk counting bot backend
// This file exposes the public API for the binary and integration tests

pub mod chat;
pub mod config;
pub mod counting;
pub mod evaluator;
pub mod identity;
pub mod phrase;
pub mod render;
pub mod shared;
pub mod storage;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

// Re-export commonly used types for easier access in tests
pub use chat::{BotAction, ChannelRegistry, ChatCommand, ChatMessage, DispatchOutcome, Dispatcher};
pub use config::Config;
pub use counting::{CountingRules, CountingService, GuessResult, LeaderboardView, Outcome};
pub use evaluator::{EvaluationError, GuessEvaluator, HttpGuessEvaluator};
pub use identity::{DisplayResolver, InMemoryDisplayResolver};
pub use phrase::{PhraseMatcher, PhraseService, RankResult};
pub use shared::{AppError, AppState};
pub use storage::StorageError;

/// Builds the HTTP router over the shared services
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route(
            "/tenants/:tenant/guesses",
            post(counting::handlers::submit_guess),
        )
        .route(
            "/tenants/:tenant/leaderboard",
            get(counting::handlers::get_leaderboard),
        )
        .route(
            "/tenants/:tenant/triggers",
            post(phrase::handlers::record_trigger),
        )
        .route(
            "/tenants/:tenant/participants/:participant/name",
            put(identity::handlers::register_display_name),
        )
        .route("/events/message", post(chat::handlers::message_event))
        .route("/events/command", post(chat::handlers::command_event))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
