use thiserror::Error;

#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error("Evaluator unavailable: {0}")]
    Unavailable(String),
}

impl From<reqwest::Error> for EvaluationError {
    fn from(err: reqwest::Error) -> Self {
        EvaluationError::Unavailable(err.to_string())
    }
}
