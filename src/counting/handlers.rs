use axum::{
    extract::{Path, State},
    Json,
};
use tracing::{info, instrument};

use super::{
    models::{GuessResult, LeaderboardView},
    types::GuessRequest,
};
use crate::shared::{AppError, AppState};

/// HTTP handler for submitting an already-evaluated guess
///
/// POST /tenants/:tenant/guesses
#[instrument(name = "submit_guess", skip(state, request))]
pub async fn submit_guess(
    State(state): State<AppState>,
    Path(tenant): Path<String>,
    Json(request): Json<GuessRequest>,
) -> Result<Json<GuessResult>, AppError> {
    if request.participant.is_empty() {
        return Err(AppError::BadRequest("participant must not be empty".to_string()));
    }

    let result = state
        .counting
        .evaluate_guess(&tenant, &request.participant, &request.guess)
        .await?;

    info!(
        tenant = %tenant,
        participant = %request.participant,
        outcome = %result.outcome,
        "Guess submitted over HTTP"
    );

    Ok(Json(result))
}

/// HTTP handler for the tenant leaderboard
///
/// GET /tenants/:tenant/leaderboard
#[instrument(name = "get_leaderboard", skip(state))]
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Path(tenant): Path<String>,
) -> Result<Json<LeaderboardView>, AppError> {
    let view = state.counting.build_leaderboard(&tenant).await?;
    Ok(Json(view))
}
