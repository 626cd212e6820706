//! Field rules shared by the menu-item schema and the seeder.
//!
//! Prices are monetary amounts stored with exactly [`PRICE_SCALE`]
//! fractional digits; display titles are capped at [`TITLE_MAX_CHARS`]
//! characters.

use std::borrow::Cow;

use rust_decimal::{Decimal, RoundingStrategy};
use validator::ValidationError;

/// Maximum number of characters in a short display title.
pub const TITLE_MAX_CHARS: usize = 22;

/// Number of fractional digits carried by every price.
pub const PRICE_SCALE: u32 = 2;

#[derive(Debug, thiserror::Error)]
pub enum PriceError {
    /// The raw value has no decimal representation (NaN, infinity, overflow).
    #[error("price {raw} is not a representable decimal: {source}")]
    NotRepresentable {
        raw: f64,
        #[source]
        source: rust_decimal::Error,
    },
}

/// Truncate a title to [`TITLE_MAX_CHARS`] characters (not bytes).
pub fn truncate_title(title: &str) -> String {
    title.chars().take(TITLE_MAX_CHARS).collect()
}

/// Quantize a price to exactly [`PRICE_SCALE`] fractional digits.
///
/// Rounds half to even, so `12.345` becomes `12.34` and `12.355` becomes
/// `12.36`. Whole amounts gain trailing zeros (`7` becomes `7.00`).
pub fn normalize_price(price: Decimal) -> Decimal {
    let mut quantized =
        price.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointNearestEven);
    quantized.rescale(PRICE_SCALE);
    quantized
}

/// Convert a sampled floating-point amount into a normalized price.
pub fn price_from_f64(raw: f64) -> Result<Decimal, PriceError> {
    let decimal =
        Decimal::try_from(raw).map_err(|source| PriceError::NotRepresentable { raw, source })?;
    Ok(normalize_price(decimal))
}

/// `validator` rule: a price must be non-negative and carry at most
/// [`PRICE_SCALE`] fractional digits.
pub fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() && !price.is_zero() {
        let mut err = ValidationError::new("range");
        err.message = Some(Cow::Borrowed("price must be greater than or equal to 0"));
        err.add_param(Cow::Borrowed("value"), &price.to_string());
        return Err(err);
    }
    if price.normalize().scale() > PRICE_SCALE {
        let mut err = ValidationError::new("decimal_places");
        err.message = Some(Cow::Borrowed("price must have at most 2 decimal places"));
        err.add_param(Cow::Borrowed("value"), &price.to_string());
        return Err(err);
    }
    Ok(())
}
