use axum::{
    extract::{Path, State},
    Json,
};
use tracing::instrument;

use super::{models::RankResult, types::TriggerRequest};
use crate::shared::{AppError, AppState};

/// HTTP handler for scoring a trigger phrase match
///
/// POST /tenants/:tenant/triggers
#[instrument(name = "record_trigger", skip(state, request))]
pub async fn record_trigger(
    State(state): State<AppState>,
    Path(tenant): Path<String>,
    Json(request): Json<TriggerRequest>,
) -> Result<Json<RankResult>, AppError> {
    if request.participant.is_empty() {
        return Err(AppError::BadRequest("participant must not be empty".to_string()));
    }

    let result = state
        .phrase
        .record_trigger(&tenant, &request.participant)
        .await?;
    Ok(Json(result))
}
