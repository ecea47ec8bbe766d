pub mod auth_verifier;
pub mod gateway_service;
pub mod gateway_trait;
pub mod http;
pub mod phonepe;
pub mod phonepe_legacy;

pub use auth_verifier::{
    compute_checksum_token, compute_static_token, compute_status_checksum_token, verify_inbound,
    ChecksumSigner, RequestAuth, SignedRequest, WebhookAuthenticator,
};
pub use gateway_service::build_gateway;
pub use gateway_trait::PaymentGateway;
pub use http::build_client;
pub use phonepe::PhonePeClient;
pub use phonepe_legacy::PhonePeLegacyClient;
