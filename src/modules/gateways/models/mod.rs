pub mod checkout;
pub mod order_status;
pub mod token;

pub use checkout::{
    checksum_callback_url, generate_merchant_order_id, is_valid_merchant_order_id,
    status_callback_url, CheckoutOrder,
};
pub use order_status::{transaction_id_from_details, OrderStatus, PaymentStatus};
pub use token::TokenOutcome;
