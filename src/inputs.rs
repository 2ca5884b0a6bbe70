use rust_decimal::Decimal;
use std::str::FromStr;

use crate::types::AssetError;

/// Trait for converting various numeric types into `Decimal` amounts.
///
/// This lets callers pass `i64`, `f64`, `&str`, etc. directly into
/// constructors without wrapping them in `dec!()` or `Decimal::from()`.
/// Conversion happens once, at the boundary; everything past it is
/// fixed-point decimal arithmetic.
pub trait IntoAmount {
    fn into_amount(self) -> Result<Decimal, AssetError>;
}

// Passthrough.
impl IntoAmount for Decimal {
    fn into_amount(self) -> Result<Decimal, AssetError> {
        Ok(self)
    }
}

macro_rules! impl_into_amount_int {
    ($($t:ty),*) => {
        $(
            impl IntoAmount for $t {
                fn into_amount(self) -> Result<Decimal, AssetError> {
                    Ok(Decimal::from(self))
                }
            }
        )*
    };
}

impl_into_amount_int!(i32, u32, i64, u64, isize, usize);

// Floats are accepted as a convenience at the boundary only; NaN and the
// infinities have no decimal meaning and magnitudes past Decimal's range
// cannot be retained.
macro_rules! impl_into_amount_float {
    ($($t:ty),*) => {
        $(
            impl IntoAmount for $t {
                fn into_amount(self) -> Result<Decimal, AssetError> {
                    let value = self as f64;
                    if !value.is_finite() {
                        return Err(AssetError::invalid_input(
                            "amount",
                            "must be a finite number",
                        ));
                    }
                    Decimal::from_f64_retain(value).ok_or_else(|| {
                        AssetError::invalid_input(
                            "amount",
                            format!("{} exceeds the representable decimal range", value),
                        )
                    })
                }
            }
        )*
    };
}

impl_into_amount_float!(f32, f64);

impl IntoAmount for &str {
    fn into_amount(self) -> Result<Decimal, AssetError> {
        let raw = self.trim();
        Decimal::from_str(raw).map_err(|_| {
            AssetError::invalid_input("amount", format!("'{}' is not a decimal number", raw))
        })
    }
}

impl IntoAmount for String {
    fn into_amount(self) -> Result<Decimal, AssetError> {
        self.as_str().into_amount()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn converts_ints_floats_and_strings() {
        assert_eq!(10.into_amount().unwrap(), dec!(10));
        assert_eq!(2.5f64.into_amount().unwrap(), dec!(2.5));
        assert_eq!("199.99".into_amount().unwrap(), dec!(199.99));
    }

    #[test]
    fn rejects_non_finite_floats_with_a_structured_error() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                bad.into_amount(),
                Err(AssetError::InvalidInput { ref field, .. }) if field == "amount"
            ));
        }
    }

    #[test]
    fn tolerates_surrounding_whitespace_in_strings() {
        assert_eq!("  42.50 ".into_amount().unwrap(), dec!(42.50));
    }

    #[test]
    fn rejects_garbage_strings() {
        assert!("not-a-number".into_amount().is_err());
        assert!("".into_amount().is_err());
    }
}
