use serde::Deserialize;

/// Request payload for submitting a canonical guess
#[derive(Debug, Deserialize)]
pub struct GuessRequest {
    pub participant: String,
    pub guess: String,
}
