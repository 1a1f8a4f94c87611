// Counting game: guess evaluation, counter transitions and the leaderboard

pub use models::{
    CounterState, CountingRules, GuessResult, LeaderboardEntry, LeaderboardView, LoserView,
    Outcome, ParticipantStats,
};
pub use repository::{CountingRepository, InMemoryCountingRepository, PostgresCountingRepository};
pub use service::CountingService;

pub mod engine;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;
mod types;
