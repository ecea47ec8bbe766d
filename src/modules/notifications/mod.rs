pub mod services;

pub use services::{status_message, DiscordNotifier, NotificationOutcome};
