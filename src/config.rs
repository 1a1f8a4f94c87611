use clap::Parser;
use std::{net::SocketAddr, time::Duration};

use crate::chat::ChannelRegistry;
use crate::counting::CountingRules;
use crate::phrase::{PhraseError, PhraseMatcher};

pub const DEFAULT_EVALUATOR_URL: &str = "https://counter.robgssp.com";

/// A `TENANT=CHANNEL` pair from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelBinding {
    pub tenant: String,
    pub channel: String,
}

fn parse_binding(raw: &str) -> Result<ChannelBinding, String> {
    let (tenant, channel) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected TENANT=CHANNEL, got `{}`", raw))?;
    let (tenant, channel) = (tenant.trim(), channel.trim());

    if tenant.is_empty() || channel.is_empty() {
        return Err(format!("tenant and channel must both be set in `{}`", raw));
    }

    Ok(ChannelBinding {
        tenant: tenant.to_string(),
        channel: channel.to_string(),
    })
}

#[derive(Parser, Debug, Clone)]
#[command(name = "squawk")]
#[command(about = "Counting game and phrase scoring backend for chat communities")]
pub struct Config {
    /// Base URL of the guess evaluation service
    #[arg(long, env = "SQUAWK_EVALUATOR", default_value = DEFAULT_EVALUATOR_URL)]
    pub evaluator: String,

    /// Let the same participant count twice in a row
    #[arg(long, env = "SQUAWK_ALLOW_REPEATS")]
    pub allow_repeats: bool,

    /// Seconds to wait for the evaluator before giving up on a message
    #[arg(long, default_value = "10")]
    pub evaluator_timeout_secs: u64,

    /// PostgreSQL connection string; in-memory storage is used when unset
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    #[arg(long, env = "SQUAWK_BIND", default_value = "0.0.0.0:3000")]
    pub bind: SocketAddr,

    /// Phrase scored by the phrase game, matched case-insensitively
    #[arg(long, default_value = crate::phrase::service::DEFAULT_TRIGGER_PHRASE)]
    pub trigger_phrase: String,

    /// Counting channel for a tenant, as TENANT=CHANNEL (repeatable)
    #[arg(long = "counting-channel", value_parser = parse_binding)]
    pub counting_channels: Vec<ChannelBinding>,

    /// Announcement channel for a tenant, as TENANT=CHANNEL (repeatable)
    #[arg(long = "announce-channel", value_parser = parse_binding)]
    pub announce_channels: Vec<ChannelBinding>,
}

impl Config {
    pub fn counting_rules(&self) -> CountingRules {
        CountingRules {
            allow_repeats: self.allow_repeats,
        }
    }

    pub fn evaluator_timeout(&self) -> Duration {
        Duration::from_secs(self.evaluator_timeout_secs)
    }

    /// Later bindings for the same tenant replace earlier ones
    pub fn channel_registry(&self) -> ChannelRegistry {
        let registry = self
            .counting_channels
            .iter()
            .fold(ChannelRegistry::new(), |registry, binding| {
                registry.with_counting_channel(&binding.tenant, &binding.channel)
            });

        self.announce_channels
            .iter()
            .fold(registry, |registry, binding| {
                registry.with_announcement_channel(&binding.tenant, &binding.channel)
            })
    }

    pub fn phrase_matcher(&self) -> Result<PhraseMatcher, PhraseError> {
        PhraseMatcher::new(&self.trigger_phrase)
    }
}
