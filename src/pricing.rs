//! Price oracle abstraction.
//!
//! The core never reaches out to a market-data provider itself. Every
//! valuation that needs a quoted unit price asks a [`PriceOracle`], and the
//! oracle either returns a price or fails with an explicit
//! [`AssetError::PriceUnavailable`]: a missing symbol is never papered
//! over with a default or a stale value.
//!
//! Production wires a real provider behind this trait; tests and the
//! reference behavior use [`StaticPriceOracle`] with a fixed table.

use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::inputs::IntoAmount;
use crate::types::AssetError;

/// A source of current unit prices, keyed by symbol.
///
/// Symbols are plain strings: equity tickers (`"AAPL"`), per-gram metal
/// symbols (`"XAU"`), coin symbols (`"BTC"`).
pub trait PriceOracle {
    /// Returns the current unit price for `symbol`, or
    /// [`AssetError::PriceUnavailable`] if the oracle has no quote for it.
    fn price(&self, symbol: &str) -> Result<Decimal, AssetError>;
}

/// A fixed in-memory price table.
///
/// There is no process-wide price cache anywhere in the crate; an oracle is
/// always passed explicitly, so tests can inject a deterministic one and
/// two portfolios can be valued against different tables in one process.
#[derive(Debug, Clone, Default)]
pub struct StaticPriceOracle {
    prices: HashMap<String, Decimal>,
}

impl StaticPriceOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a quote. Prices must be strictly positive.
    pub fn with_price(
        mut self,
        symbol: impl Into<String>,
        price: impl IntoAmount,
    ) -> Result<Self, AssetError> {
        let price = price.into_amount()?;
        if price <= Decimal::ZERO {
            return Err(AssetError::InvalidPrice { got: price });
        }
        self.prices.insert(symbol.into(), price);
        Ok(self)
    }

    /// The reference price table standing in for a live provider.
    ///
    /// Equity tickers are quoted per share, metals per gram of pure
    /// content, coins per unit.
    pub fn reference() -> Self {
        use rust_decimal_macros::dec;

        let mut prices = HashMap::new();
        for (symbol, price) in [
            ("AAPL", dec!(175.50)),
            ("MSFT", dec!(332.25)),
            ("GOOG", dec!(139.80)),
            ("2222.SR", dec!(8.95)),
            ("XAU", dec!(65.40)),
            ("XAG", dec!(0.84)),
            ("XPT", dec!(31.15)),
            ("BTC", dec!(43250.00)),
            ("ETH", dec!(2280.00)),
            ("SOL", dec!(98.50)),
        ] {
            prices.insert(symbol.to_string(), price);
        }
        Self { prices }
    }
}

impl PriceOracle for StaticPriceOracle {
    fn price(&self, symbol: &str) -> Result<Decimal, AssetError> {
        self.prices
            .get(symbol)
            .copied()
            .ok_or_else(|| AssetError::PriceUnavailable {
                symbol: symbol.to_string(),
            })
    }
}
