use regex::{Regex, RegexBuilder};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::{errors::PhraseError, models::RankResult, repository::PhraseRepository};
use crate::storage::StorageError;

pub const DEFAULT_TRIGGER_PHRASE: &str = "mixed company";

/// Case-insensitive literal match for the trigger phrase
#[derive(Debug, Clone)]
pub struct PhraseMatcher {
    pattern: Regex,
}

impl PhraseMatcher {
    pub fn new(phrase: &str) -> Result<Self, PhraseError> {
        if phrase.trim().is_empty() {
            return Err(PhraseError::EmptyPhrase);
        }

        let pattern = RegexBuilder::new(&regex::escape(phrase))
            .case_insensitive(true)
            .build()?;
        Ok(Self { pattern })
    }

    pub fn matches(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

impl Default for PhraseMatcher {
    fn default() -> Self {
        Self {
            pattern: RegexBuilder::new(DEFAULT_TRIGGER_PHRASE)
                .case_insensitive(true)
                .build()
                .expect("default trigger phrase is a valid pattern"),
        }
    }
}

/// Service for the phrase-scoring game
pub struct PhraseService {
    repository: Arc<dyn PhraseRepository>,
    matcher: PhraseMatcher,
}

impl PhraseService {
    pub fn new(repository: Arc<dyn PhraseRepository>, matcher: PhraseMatcher) -> Self {
        Self {
            repository,
            matcher,
        }
    }

    pub fn is_trigger(&self, text: &str) -> bool {
        let matched = self.matcher.matches(text);
        debug!(matched, "Checked message for trigger phrase");
        matched
    }

    #[instrument(skip(self))]
    pub async fn record_trigger(
        &self,
        tenant: &str,
        participant: &str,
    ) -> Result<RankResult, StorageError> {
        let result = self.repository.record_trigger(tenant, participant).await?;

        info!(
            tenant = %tenant,
            participant = %participant,
            score = result.score,
            place = result.place,
            moved = result.moved,
            tied = result.tied,
            "Trigger phrase scored"
        );

        Ok(result)
    }

    pub async fn score(&self, tenant: &str, participant: &str) -> Result<u64, StorageError> {
        self.repository.score(tenant, participant).await
    }
}
