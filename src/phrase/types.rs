use serde::Deserialize;

/// Request payload for recording a trigger phrase match
#[derive(Debug, Deserialize)]
pub struct TriggerRequest {
    pub participant: String,
}
