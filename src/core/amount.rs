use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use super::{AppError, Result};

/// A validated, strictly positive payment amount in Indian rupees.
///
/// Gateways take amounts in paise, so at most two fractional digits are
/// accepted and the paise value is computed, range-checked, once on
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Amount {
    rupees: Decimal,
    paise: i64,
}

impl Amount {
    /// Paise per rupee
    const MINOR_UNITS: i64 = 100;

    /// Maximum number of fractional digits (paise precision)
    const SCALE: u32 = 2;

    /// Validate a rupee amount
    pub fn new(rupees: Decimal) -> Result<Self> {
        if rupees <= Decimal::ZERO {
            return Err(AppError::validation("Invalid amount"));
        }

        if rupees.normalize().scale() > Self::SCALE {
            return Err(AppError::validation(format!(
                "Invalid amount: at most {} decimal places allowed",
                Self::SCALE
            )));
        }

        let paise = rupees
            .checked_mul(Decimal::from(Self::MINOR_UNITS))
            .and_then(|paise| paise.to_i64())
            .ok_or_else(|| AppError::validation("Invalid amount: out of range"))?;

        Ok(Self { rupees, paise })
    }

    /// Parse the `amount` field of a request body.
    ///
    /// Accepts JSON numbers and numeric strings. Missing, `null`, non-numeric
    /// and non-positive values are rejected.
    pub fn from_json(value: Option<&Value>) -> Result<Self> {
        let parsed = match value {
            Some(Value::Number(n)) => parse_decimal(&n.to_string()),
            Some(Value::String(s)) => parse_decimal(s.trim()),
            _ => None,
        };

        match parsed {
            Some(rupees) => Self::new(rupees),
            None => Err(AppError::validation("Invalid amount")),
        }
    }

    pub fn rupees(&self) -> Decimal {
        self.rupees
    }

    /// Amount in paise, as sent to the gateway
    pub fn to_paise(&self) -> i64 {
        self.paise
    }

    /// Render a paise amount reported by the gateway as rupees
    pub fn format_paise(paise: i64) -> String {
        Decimal::new(paise, Self::SCALE).normalize().to_string()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "INR {:.2}", self.rupees)
    }
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    if raw.is_empty() {
        return None;
    }
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}
