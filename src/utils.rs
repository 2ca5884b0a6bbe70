//! Decimal helpers shared across the crate.
//!
//! All money and ratio rounding in this crate goes through these two
//! functions so the policy (half-up, documented scales) lives in one place.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::AssetError;

/// Money scale: 2 decimal places.
pub const MONEY_SCALE: u32 = 2;
/// Ratio scale (returns, distribution shares, cap rates): 4 decimal places.
pub const RATIO_SCALE: u32 = 4;

/// Rounds a money amount half-up to 2 decimal places.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a ratio half-up to 4 decimal places.
pub fn round_ratio(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(RATIO_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Rejects a non-positive value. Nothing is ever clamped.
pub fn ensure_positive(field: &str, value: Decimal) -> Result<Decimal, AssetError> {
    if value <= Decimal::ZERO {
        return Err(AssetError::invalid_input(
            field,
            format!("must be strictly positive (got {})", value),
        ));
    }
    Ok(value)
}

/// Rejects a negative value.
pub fn ensure_non_negative(field: &str, value: Decimal) -> Result<Decimal, AssetError> {
    if value < Decimal::ZERO {
        return Err(AssetError::invalid_input(
            field,
            format!("must be non-negative (got {})", value),
        ));
    }
    Ok(value)
}

/// Rejects a ratio outside `[0, 1]`.
pub fn ensure_ratio(field: &str, value: Decimal) -> Result<Decimal, AssetError> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(AssetError::invalid_input(
            field,
            format!("must lie within [0, 1] (got {})", value),
        ));
    }
    Ok(value)
}

/// Compounds `value` by `(1 + rate)` over `years` periods with checked
/// multiplication at every step.
pub fn compound_growth(value: Decimal, rate: Decimal, years: u32) -> Result<Decimal, AssetError> {
    let factor = Decimal::ONE
        .checked_add(rate)
        .ok_or_else(|| AssetError::overflow("growth factor"))?;

    let mut result = value;
    for _ in 0..years {
        result = result
            .checked_mul(factor)
            .ok_or_else(|| AssetError::overflow("compound growth"))?;
    }
    Ok(result)
}
