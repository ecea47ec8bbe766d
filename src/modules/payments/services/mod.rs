pub mod payment_service;

pub use payment_service::{frontend_status_url, PaymentService, INITIATE_FAILURE};
