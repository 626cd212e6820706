//! Row models and request DTOs for the backend tables.

pub mod category;
pub mod item;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

use micropos_core::pricing::normalize_price;

/// Treat `""` the same as a missing value.
pub(crate) fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

/// Accept a price as a JSON string or number and quantize it to two places.
pub(crate) fn normalized_price<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    <Decimal as Deserialize>::deserialize(deserializer).map(normalize_price)
}
