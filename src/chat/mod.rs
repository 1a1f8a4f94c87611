// Platform-free dispatch layer: routes chat events to the engines and turns
// their results into bot actions for a gateway to perform.

pub use counting_filter::CountingFilter;
pub use dispatcher::Dispatcher;
pub use filter::{FilterError, MessageFilter};
pub use models::{BotAction, ChatCommand, ChatMessage, DispatchOutcome};
pub use phrase_filter::PhraseFilter;
pub use registry::ChannelRegistry;

mod counting_filter;
mod dispatcher;
mod filter;
pub mod handlers;
pub mod models;
mod phrase_filter;
mod registry;
