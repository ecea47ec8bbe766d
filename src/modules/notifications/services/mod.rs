pub mod discord;
pub mod messages;

pub use discord::{DiscordNotifier, NotificationOutcome};
pub use messages::status_message;
