#![allow(dead_code)] // Test utilities may not all be used in every test

use std::sync::Arc;

use squawk::{
    chat::{CountingFilter, PhraseFilter},
    counting::InMemoryCountingRepository,
    phrase::InMemoryPhraseRepository,
    ChannelRegistry, CountingRules, CountingService, Dispatcher, InMemoryDisplayResolver,
    PhraseMatcher, PhraseService,
};

use super::mocks::ScriptedEvaluator;

pub const TENANT: &str = "guild-1";
pub const COUNTING_CHANNEL: &str = "counting";
pub const ANNOUNCE_CHANNEL: &str = "botspam";

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub dispatcher: Dispatcher,
    pub counting: Arc<CountingService>,
    pub phrase: Arc<PhraseService>,
    pub evaluator: ScriptedEvaluator,
    pub names: Arc<InMemoryDisplayResolver>,
}

pub struct TestSetupBuilder {
    rules: CountingRules,
    players: Vec<(String, String)>,
    announce: bool,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            rules: CountingRules::default(),
            players: vec![],
            announce: true,
        }
    }

    pub fn allow_repeats(mut self) -> Self {
        self.rules.allow_repeats = true;
        self
    }

    pub fn without_announcement_channel(mut self) -> Self {
        self.announce = false;
        self
    }

    /// Registers `(participant id, display name)` pairs
    pub fn with_players(mut self, players: Vec<(&str, &str)>) -> Self {
        self.players = players
            .into_iter()
            .map(|(id, name)| (id.to_string(), name.to_string()))
            .collect();
        self
    }

    pub fn with_three_players(self) -> Self {
        self.with_players(vec![("u1", "alice"), ("u2", "bob"), ("u3", "carol")])
    }

    pub async fn build(self) -> TestSetup {
        let names = Arc::new(InMemoryDisplayResolver::new());
        for (id, name) in &self.players {
            names.register(TENANT, id, name).await;
        }

        let mut registry = ChannelRegistry::new().with_counting_channel(TENANT, COUNTING_CHANNEL);
        if self.announce {
            registry = registry.with_announcement_channel(TENANT, ANNOUNCE_CHANNEL);
        }
        let registry = Arc::new(registry);

        let counting = Arc::new(CountingService::new(
            Arc::new(InMemoryCountingRepository::new()),
            self.rules,
        ));
        let phrase = Arc::new(PhraseService::new(
            Arc::new(InMemoryPhraseRepository::new()),
            PhraseMatcher::default(),
        ));
        let evaluator = ScriptedEvaluator::new();

        let dispatcher = Dispatcher::new()
            .with_filter(Arc::new(CountingFilter::new(
                counting.clone(),
                Arc::new(evaluator.clone()),
                names.clone(),
                registry.clone(),
            )))
            .with_filter(Arc::new(PhraseFilter::new(
                phrase.clone(),
                names.clone(),
                registry,
            )));

        TestSetup {
            dispatcher,
            counting,
            phrase,
            evaluator,
            names,
        }
    }
}

impl Default for TestSetupBuilder {
    fn default() -> Self {
        Self::new()
    }
}
