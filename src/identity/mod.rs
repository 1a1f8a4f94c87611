pub mod handlers;

use async_trait::async_trait;
use futures::future::join_all;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Placeholder used when a display name cannot be resolved
pub const UNKNOWN_NAME: &str = "unknown";

/// Best-effort participant → display name lookup
///
/// Implementations talk to the chat platform. A `None` result is never fatal;
/// callers fall back to [`UNKNOWN_NAME`].
#[async_trait]
pub trait DisplayResolver: Send + Sync {
    async fn resolve_display_name(&self, tenant: &str, participant: &str) -> Option<String>;
}

/// Resolves one name, substituting the placeholder on failure
pub async fn display_name_or_unknown(
    resolver: &dyn DisplayResolver,
    tenant: &str,
    participant: &str,
) -> String {
    match resolver.resolve_display_name(tenant, participant).await {
        Some(name) => name,
        None => {
            debug!(tenant = %tenant, participant = %participant, "Display name unavailable");
            UNKNOWN_NAME.to_string()
        }
    }
}

/// Resolves every distinct participant concurrently
pub async fn display_names<'a>(
    resolver: &dyn DisplayResolver,
    tenant: &str,
    participants: impl IntoIterator<Item = &'a str>,
) -> HashMap<String, String> {
    let mut distinct: Vec<&str> = participants.into_iter().collect();
    distinct.sort_unstable();
    distinct.dedup();

    let names = join_all(
        distinct
            .iter()
            .map(|participant| display_name_or_unknown(resolver, tenant, participant)),
    )
    .await;

    distinct
        .into_iter()
        .map(str::to_string)
        .zip(names)
        .collect()
}

/// In-memory implementation of DisplayResolver
/// Uses RwLock for concurrent access with read optimization
#[derive(Default)]
pub struct InMemoryDisplayResolver {
    names: RwLock<HashMap<(String, String), String>>,
}

impl InMemoryDisplayResolver {
    pub fn new() -> Self {
        Self {
            names: RwLock::new(HashMap::new()),
        }
    }

    pub async fn register(&self, tenant: &str, participant: &str, name: &str) {
        self.names.write().await.insert(
            (tenant.to_string(), participant.to_string()),
            name.to_string(),
        );
        info!(tenant = %tenant, participant = %participant, name = %name, "Registered display name");
    }
}

#[async_trait]
impl DisplayResolver for InMemoryDisplayResolver {
    async fn resolve_display_name(&self, tenant: &str, participant: &str) -> Option<String> {
        self.names
            .read()
            .await
            .get(&(tenant.to_string(), participant.to_string()))
            .cloned()
    }
}
