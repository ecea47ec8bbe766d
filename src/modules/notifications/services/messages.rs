use chrono::{DateTime, Local};

use crate::core::Amount;
use crate::modules::gateways::models::{OrderStatus, PaymentStatus};

/// Chat summary of a status check
pub fn status_message(status: &OrderStatus, at: DateTime<Local>) -> String {
    let amount = status
        .amount
        .map(Amount::format_paise)
        .unwrap_or_else(|| "unknown".to_string());
    let order_id = &status.merchant_order_id;

    match status.status {
        PaymentStatus::Completed => format!(
            "✅ Payment Successful! @here ✅\n\n**Amount:** {},\n**Transaction ID:** {},\n**Order ID:** {}\n**Time:** {}",
            amount,
            status.transaction_id.as_deref().unwrap_or("Null"),
            order_id,
            at.format("%d/%m/%Y, %H:%M:%S")
        ),
        PaymentStatus::Failed => format!(
            "❌ Payment Failed! ❌\n\nAmount: {},\nTransaction ID: Null,\nOrder ID: {}",
            amount, order_id
        ),
        PaymentStatus::Pending => format!(
            "⏳ Payment Pending! ⏳\n\nAmount: {},\nTransaction ID: Null,\nOrder ID: {}",
            amount, order_id
        ),
        PaymentStatus::Unknown => format!(
            "❓ Unknown Payment Status! ❓\n\nAmount: {},\nTransaction ID: Null,\nOrder ID: {}",
            amount, order_id
        ),
    }
}
