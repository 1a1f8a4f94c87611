use std::sync::Arc;
use tracing::{debug, error, info, instrument};

use super::{
    filter::MessageFilter,
    models::{ChatCommand, ChatMessage, DispatchOutcome},
};

/// Routes chat events to every registered filter
///
/// Filters run in registration order and their actions are concatenated. A
/// failing filter is logged and skipped; it never prevents the others from
/// handling the event.
#[derive(Default)]
pub struct Dispatcher {
    filters: Vec<Arc<dyn MessageFilter>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    pub fn with_filter(mut self, filter: Arc<dyn MessageFilter>) -> Self {
        info!(filter_name = filter.name(), "Registering message filter");
        self.filters.push(filter);
        self
    }

    pub fn filter_count(&self) -> usize {
        self.filters.len()
    }

    #[instrument(skip(self, message), fields(tenant = %message.tenant, channel = %message.channel, author = %message.author))]
    pub async fn dispatch_message(&self, message: &ChatMessage) -> DispatchOutcome {
        let mut outcome = DispatchOutcome::default();

        for filter in &self.filters {
            match filter.on_message(message).await {
                Ok(Some(actions)) => {
                    debug!(filter_name = filter.name(), actions = actions.len(), "Filter handled message");
                    outcome.handled = true;
                    outcome.actions.extend(actions);
                }
                Ok(None) => {}
                Err(e) => {
                    error!(filter_name = filter.name(), error = %e, "Filter failed to handle message");
                }
            }
        }

        outcome
    }

    #[instrument(skip(self, command), fields(tenant = %command.tenant, command = %command.name))]
    pub async fn dispatch_command(&self, command: &ChatCommand) -> DispatchOutcome {
        let mut outcome = DispatchOutcome::default();

        for filter in &self.filters {
            match filter.on_command(command).await {
                Ok(Some(actions)) => {
                    debug!(filter_name = filter.name(), actions = actions.len(), "Filter handled command");
                    outcome.handled = true;
                    outcome.actions.extend(actions);
                }
                Ok(None) => {}
                Err(e) => {
                    error!(filter_name = filter.name(), error = %e, "Filter failed to handle command");
                }
            }
        }

        outcome
    }
}
