use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

use super::{EvaluationError, GuessEvaluator};

#[derive(Debug, Serialize)]
struct EvalRequest<'a> {
    message: &'a str,
}

#[derive(Debug, Deserialize)]
struct EvalResponse {
    val: String,
}

/// Guess evaluator backed by the HTTP `/eval` endpoint
pub struct HttpGuessEvaluator {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpGuessEvaluator {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, EvaluationError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/eval", base_url.trim_end_matches('/')),
        })
    }

    #[cfg(test)]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl GuessEvaluator for HttpGuessEvaluator {
    #[instrument(skip(self))]
    async fn evaluate(&self, text: &str) -> Result<String, EvaluationError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&EvalRequest { message: text })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(status = %status, body = %body, "Bad eval");
            return Err(EvaluationError::Unavailable(format!(
                "evaluator returned {}",
                status
            )));
        }

        let parsed: EvalResponse = response.json().await.map_err(|e| {
            debug!(error = %e, "Malformed eval response");
            EvaluationError::Unavailable(format!("malformed response: {}", e))
        })?;

        debug!(val = %parsed.val, "Good eval");
        Ok(parsed.val)
    }
}
