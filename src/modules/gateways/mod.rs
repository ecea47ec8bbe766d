pub mod models;
pub mod services;

pub use models::{CheckoutOrder, OrderStatus, PaymentStatus, TokenOutcome};
pub use services::{
    build_gateway, ChecksumSigner, PaymentGateway, PhonePeClient, PhonePeLegacyClient,
    WebhookAuthenticator,
};
