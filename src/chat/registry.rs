use std::collections::HashMap;

/// Maps tenants to the channels the bot plays and announces in
#[derive(Debug, Clone, Default)]
pub struct ChannelRegistry {
    counting: HashMap<String, String>,
    announcements: HashMap<String, String>,
}

impl ChannelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_counting_channel(mut self, tenant: &str, channel: &str) -> Self {
        self.counting.insert(tenant.to_string(), channel.to_string());
        self
    }

    pub fn with_announcement_channel(mut self, tenant: &str, channel: &str) -> Self {
        self.announcements
            .insert(tenant.to_string(), channel.to_string());
        self
    }

    pub fn is_counting_channel(&self, tenant: &str, channel: &str) -> bool {
        self.counting.get(tenant).is_some_and(|c| c == channel)
    }

    pub fn announcement_channel(&self, tenant: &str) -> Option<&str> {
        self.announcements.get(tenant).map(String::as_str)
    }

    pub fn tenant_count(&self) -> usize {
        self.counting.len()
    }
}
