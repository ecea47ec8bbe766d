pub mod amount;
pub mod error;

pub use amount::Amount;
pub use error::{AppError, Result};
