//! Price decoding and display.
//!
//! The catalog API returns prices as JSON numbers, but records created by
//! other clients occasionally carry strings or nulls. Anything that does not
//! parse as a number is treated as zero so that one malformed record cannot
//! break a whole listing.

use std::str::FromStr;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize a price leniently.
///
/// Accepts JSON numbers and numeric strings. Missing, null, and non-numeric
/// values become [`Decimal::ZERO`].
///
/// # Errors
///
/// Only fails if the underlying deserializer cannot produce a JSON value.
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(decimal_from_json).unwrap_or(Decimal::ZERO))
}

fn decimal_from_json(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(number) => Decimal::from_str(&number.to_string())
            .ok()
            .or_else(|| number.as_f64().and_then(Decimal::from_f64)),
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    }
}

/// Format a price for display (e.g., "$19.99").
#[must_use]
pub fn format_price(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("${rounded:.2}")
}
