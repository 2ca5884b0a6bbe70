use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The four asset kinds tracked by the core.
///
/// This is a closed set: every asset in a portfolio is exactly one of
/// these, and valuation logic dispatches over it with a `match`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum AssetKind {
    Equity,
    PreciousMetal,
    Property,
    Coin,
}

/// Direction of an equity trade record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum TradeSide {
    Buy,
    Sell,
}

/// Represents a single step in a derived computation.
///
/// Reports carry a trace of these so a caller can verify how the final
/// amount was reached instead of trusting a bare number.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalculationStep {
    /// Human-readable description of what this step does.
    pub description: String,
    /// The value at this step, if applicable.
    pub amount: Option<Decimal>,
    /// The operation type: "initial", "add", "subtract", "compare", "rate", "result", "info".
    pub operation: String,
}

impl CalculationStep {
    pub fn initial(description: impl Into<String>, amount: Decimal) -> Self {
        Self::step(description, Some(amount), "initial")
    }

    pub fn add(description: impl Into<String>, amount: Decimal) -> Self {
        Self::step(description, Some(amount), "add")
    }

    pub fn subtract(description: impl Into<String>, amount: Decimal) -> Self {
        Self::step(description, Some(amount), "subtract")
    }

    pub fn compare(description: impl Into<String>, amount: Decimal) -> Self {
        Self::step(description, Some(amount), "compare")
    }

    pub fn rate(description: impl Into<String>, rate: Decimal) -> Self {
        Self::step(description, Some(rate), "rate")
    }

    pub fn result(description: impl Into<String>, amount: Decimal) -> Self {
        Self::step(description, Some(amount), "result")
    }

    pub fn info(description: impl Into<String>) -> Self {
        Self::step(description, None, "info")
    }

    fn step(description: impl Into<String>, amount: Option<Decimal>, operation: &str) -> Self {
        Self {
            description: description.into(),
            amount,
            operation: operation.to_string(),
        }
    }
}

/// Crate-wide error type.
///
/// Three families, matching the failure taxonomy of the core:
/// - validation errors (`InvalidInput`, `InvalidQuantity`, `InvalidPrice`),
///   rejected at the boundary before any state exists;
/// - state errors (`SellExceedsHoldings`, `InvalidPurity`, `InvalidYears`,
///   `AssetNotFound`), rejected with the asset left entirely unchanged;
/// - `PriceUnavailable`, propagated from the oracle instead of ever
///   substituting a stale or default price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum AssetError {
    #[error("invalid input for '{field}': {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("quantity must be positive (got {got})")]
    InvalidQuantity { got: Decimal },

    #[error("price must be positive (got {got})")]
    InvalidPrice { got: Decimal },

    #[error("cannot sell {requested} shares, only {held} held")]
    SellExceedsHoldings { requested: Decimal, held: Decimal },

    #[error("purity must lie within (0, 1] (got {got})")]
    InvalidPurity { got: Decimal },

    #[error("appreciation years must be non-negative (got {got})")]
    InvalidYears { got: i32 },

    #[error("no price available for '{symbol}'")]
    PriceUnavailable { symbol: String },

    #[error("asset {id} not found in portfolio")]
    AssetNotFound { id: Uuid },

    #[error("arithmetic overflow during {operation}")]
    Overflow { operation: String },

    #[error("configuration error: {reason}")]
    Configuration { reason: String },
}

impl AssetError {
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        AssetError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn overflow(operation: impl Into<String>) -> Self {
        AssetError::Overflow {
            operation: operation.into(),
        }
    }

    pub fn configuration(reason: impl Into<String>) -> Self {
        AssetError::Configuration {
            reason: reason.into(),
        }
    }
}
