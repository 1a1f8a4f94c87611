pub mod actions;
pub mod assertions;
pub mod mocks;
pub mod setup;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use assertions::OutcomeAssertion;
#[allow(unused_imports)]
pub use mocks::ScriptedEvaluator;
#[allow(unused_imports)]
pub use setup::{TestSetup, TestSetupBuilder, ANNOUNCE_CHANNEL, COUNTING_CHANNEL, TENANT};
