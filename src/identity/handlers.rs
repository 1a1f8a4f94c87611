use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::instrument;

use crate::shared::{AppError, AppState};

#[derive(Debug, Deserialize)]
pub struct DisplayNameRequest {
    pub display_name: String,
}

/// HTTP handler for the gateway to publish a participant's display name
///
/// PUT /tenants/:tenant/participants/:participant/name
#[instrument(name = "register_display_name", skip(state, request))]
pub async fn register_display_name(
    State(state): State<AppState>,
    Path((tenant, participant)): Path<(String, String)>,
    Json(request): Json<DisplayNameRequest>,
) -> Result<StatusCode, AppError> {
    let display_name = request.display_name.trim();
    if display_name.is_empty() {
        return Err(AppError::BadRequest("display_name must not be empty".to_string()));
    }

    state
        .names
        .register(&tenant, &participant, display_name)
        .await;
    Ok(StatusCode::NO_CONTENT)
}
