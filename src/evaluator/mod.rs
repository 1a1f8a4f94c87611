// Client for the external guess evaluation service

pub use client::HttpGuessEvaluator;
pub use errors::EvaluationError;

mod client;
mod errors;

use async_trait::async_trait;

/// Turns free-form message text into a canonical guess.
///
/// Any failure means "no guess was produced"; it is never a wrong guess.
#[async_trait]
pub trait GuessEvaluator: Send + Sync {
    async fn evaluate(&self, text: &str) -> Result<String, EvaluationError>;
}
