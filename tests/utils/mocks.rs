#![allow(dead_code)] // Test utilities may not all be used in every test

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use squawk::{EvaluationError, GuessEvaluator};

// ============================================================================
// Mock Infrastructure
// ============================================================================

/// Evaluator that echoes the trimmed message unless told otherwise
#[derive(Clone, Default)]
pub struct ScriptedEvaluator {
    answers: Arc<RwLock<HashMap<String, String>>>,
    unavailable: Arc<RwLock<HashSet<String>>>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl ScriptedEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `text` evaluate to `guess`, e.g. "one plus one" to "2"
    pub async fn answer(&self, text: &str, guess: &str) {
        self.answers
            .write()
            .await
            .insert(text.to_string(), guess.to_string());
    }

    pub async fn fail_on(&self, text: &str) {
        self.unavailable.write().await.insert(text.to_string());
    }

    pub async fn calls(&self) -> Vec<String> {
        self.calls.read().await.clone()
    }
}

#[async_trait]
impl GuessEvaluator for ScriptedEvaluator {
    async fn evaluate(&self, text: &str) -> Result<String, EvaluationError> {
        self.calls.write().await.push(text.to_string());

        if self.unavailable.read().await.contains(text) {
            return Err(EvaluationError::Unavailable("scripted outage".to_string()));
        }

        Ok(self
            .answers
            .read()
            .await
            .get(text)
            .cloned()
            .unwrap_or_else(|| text.trim().to_string()))
    }
}
