use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display};

/// Classification of a single guess evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Outcome {
    /// Counter advanced, high score not exceeded
    Bump,
    /// Counter advanced past the previous high score
    Record,
    /// No state change
    Ignore,
    /// Counter reset to zero
    Loss,
}

/// Result of `evaluate_guess`: the outcome and the count before the transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessResult {
    pub outcome: Outcome,
    pub previous_count: u64,
}

impl GuessResult {
    pub fn new(outcome: Outcome, previous_count: u64) -> Self {
        Self {
            outcome,
            previous_count,
        }
    }

    /// Count stored after the transition
    pub fn current_count(&self) -> u64 {
        match self.outcome {
            Outcome::Bump | Outcome::Record => self.previous_count + 1,
            Outcome::Ignore => self.previous_count,
            Outcome::Loss => 0,
        }
    }
}

/// Game rules injected from configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountingRules {
    pub allow_repeats: bool,
}

/// Per-tenant counter row; absence reads as the default
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterState {
    pub count: u64,
    pub last_contributor: Option<String>,
}

/// Everything the engine reads before deciding a guess
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CounterSnapshot {
    pub counter: CounterState,
    pub high_score: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantStats {
    pub bumps: u64,
    pub losses: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub participant: String,
    pub value: u64,
}

impl LeaderboardEntry {
    pub fn new(participant: impl Into<String>, value: u64) -> Self {
        Self {
            participant: participant.into(),
            value,
        }
    }
}

/// Ranked summary of a tenant's counting game
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardView {
    /// Top participants by bumps
    pub top_contributors: Vec<LeaderboardEntry>,
    /// Top participants by losses
    pub top_losers: Vec<LeaderboardEntry>,
    pub count: u64,
    pub high_score: u64,
}

/// A Loss at `previous_count` together with the leaderboard after it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoserView {
    pub participant: String,
    pub previous_count: u64,
    pub leaderboard: LeaderboardView,
}
