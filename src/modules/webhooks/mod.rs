pub mod controllers;
pub mod models;

pub use controllers::configure;
pub use models::{
    ChecksumCallback, ChecksumCallbackData, ChecksumCallbackReport, WebhookEvent, WebhookOutcome,
    WebhookPayload,
};
