// Phrase scoring: per-participant tallies of a trigger phrase and their ranks

pub use errors::PhraseError;
pub use models::{RankResult, Standing};
pub use repository::{InMemoryPhraseRepository, PhraseRepository, PostgresPhraseRepository};
pub use service::{PhraseMatcher, PhraseService};

mod errors;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;
mod types;
