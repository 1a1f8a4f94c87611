use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::error;

use crate::chat::Dispatcher;
use crate::counting::CountingService;
use crate::identity::InMemoryDisplayResolver;
use crate::phrase::PhraseService;
use crate::storage::StorageError;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub counting: Arc<CountingService>,
    pub phrase: Arc<PhraseService>,
    pub dispatcher: Arc<Dispatcher>,
    /// Display names published by the chat gateway
    pub names: Arc<InMemoryDisplayResolver>,
}

impl AppState {
    pub fn new(
        counting: Arc<CountingService>,
        phrase: Arc<PhraseService>,
        dispatcher: Arc<Dispatcher>,
        names: Arc<InMemoryDisplayResolver>,
    ) -> Self {
        Self {
            counting,
            phrase,
            dispatcher,
            names,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Storage(e) => {
                error!(error = %e, "Storage failure while handling request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Storage error: {}", e),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}
