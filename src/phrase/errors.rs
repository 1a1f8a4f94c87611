use thiserror::Error;

#[derive(Debug, Error)]
pub enum PhraseError {
    #[error("Trigger phrase must not be empty")]
    EmptyPhrase,

    #[error("Invalid trigger pattern: {0}")]
    Pattern(#[from] regex::Error),
}
