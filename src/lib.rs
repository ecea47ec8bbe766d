//! PayRelay: PhonePe payment relay
//!
//! Proxies browser-initiated payments to the PhonePe gateway, relays the
//! outcome to the frontend through redirects and to a Discord channel, and
//! authenticates the gateway's webhook calls.

pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;
pub mod state;

// Re-export commonly used types
pub use modules::gateways;
pub use modules::notifications;
pub use modules::payments;
pub use modules::webhooks;
pub use state::AppState;
