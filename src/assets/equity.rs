//! Exchange-listed equity with lot-based cost accounting.
//!
//! The ledger uses the weighted-average cost method: every purchase folds
//! into a single average cost per share, and sales realize P/L against that
//! average. The transaction log is append-only; shares owned always equal
//! the signed sum of the log.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::AssetCore;
use crate::compliance::ScreeningProfile;
use crate::inputs::IntoAmount;
use crate::pricing::PriceOracle;
use crate::traits::AssetValuation;
use crate::types::{AssetError, AssetKind, TradeSide};
use crate::utils::ensure_ratio;

/// One entry of the append-only trade log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub date: NaiveDate,
    pub side: TradeSide,
    pub quantity: Decimal,
    pub price_per_share: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equity {
    pub core: AssetCore,
    pub ticker: String,
    pub exchange: String,
    /// Dividend yield as a fraction of current value, in `[0, 1]`.
    pub dividend_yield: Decimal,
    /// Earnings per share. May be negative.
    pub earnings_per_share: Decimal,
    pub screening: ScreeningProfile,
    shares_owned: Decimal,
    total_cost: Decimal,
    ledger: Vec<TradeRecord>,
}

impl Equity {
    /// Opens a position with an initial lot.
    ///
    /// The asset-level purchase price is the initial outlay
    /// (`quantity * price_per_share`); the lot becomes the first BUY record.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        ticker: impl Into<String>,
        exchange: impl Into<String>,
        purchase_date: NaiveDate,
        quantity: impl IntoAmount,
        price_per_share: impl IntoAmount,
    ) -> Result<Self, AssetError> {
        let quantity = quantity.into_amount()?;
        let price = price_per_share.into_amount()?;
        if quantity <= Decimal::ZERO {
            return Err(AssetError::InvalidQuantity { got: quantity });
        }
        if price <= Decimal::ZERO {
            return Err(AssetError::InvalidPrice { got: price });
        }

        let outlay = quantity
            .checked_mul(price)
            .ok_or_else(|| AssetError::overflow("initial outlay"))?;

        Ok(Self {
            core: AssetCore::new(name, purchase_date, outlay)?,
            ticker: ticker.into(),
            exchange: exchange.into(),
            dividend_yield: Decimal::ZERO,
            earnings_per_share: Decimal::ZERO,
            screening: ScreeningProfile::default(),
            shares_owned: quantity,
            total_cost: outlay,
            ledger: vec![TradeRecord {
                date: purchase_date,
                side: TradeSide::Buy,
                quantity,
                price_per_share: price,
            }],
        })
    }

    pub fn with_dividend_yield(mut self, yield_: impl IntoAmount) -> Result<Self, AssetError> {
        self.dividend_yield = ensure_ratio("dividend_yield", yield_.into_amount()?)?;
        Ok(self)
    }

    pub fn with_earnings_per_share(mut self, eps: impl IntoAmount) -> Result<Self, AssetError> {
        self.earnings_per_share = eps.into_amount()?;
        Ok(self)
    }

    pub fn with_screening(mut self, screening: ScreeningProfile) -> Self {
        self.screening = screening;
        self
    }

    pub fn shares_owned(&self) -> Decimal {
        self.shares_owned
    }

    pub fn total_cost(&self) -> Decimal {
        self.total_cost
    }

    /// Weighted-average cost per share; zero when the position is flat.
    pub fn average_cost(&self) -> Decimal {
        if self.shares_owned.is_zero() {
            return Decimal::ZERO;
        }
        self.total_cost / self.shares_owned
    }

    /// Immutable view of the trade log, oldest first.
    pub fn ledger(&self) -> &[TradeRecord] {
        &self.ledger
    }

    /// Buys `quantity` shares at `price_per_share`.
    ///
    /// Recomputes the weighted-average cost as
    /// `(old_total_cost + qty * price) / (old_shares + qty)` by folding the
    /// lot into the stored total cost. On any failure the position is left
    /// completely unchanged.
    pub fn buy_shares(
        &mut self,
        date: NaiveDate,
        quantity: impl IntoAmount,
        price_per_share: impl IntoAmount,
    ) -> Result<(), AssetError> {
        let quantity = quantity.into_amount()?;
        let price = price_per_share.into_amount()?;
        if quantity <= Decimal::ZERO {
            return Err(AssetError::InvalidQuantity { got: quantity });
        }
        if price <= Decimal::ZERO {
            return Err(AssetError::InvalidPrice { got: price });
        }

        let lot_cost = quantity
            .checked_mul(price)
            .ok_or_else(|| AssetError::overflow("lot cost"))?;
        let new_total_cost = self
            .total_cost
            .checked_add(lot_cost)
            .ok_or_else(|| AssetError::overflow("total cost"))?;
        let new_shares = self
            .shares_owned
            .checked_add(quantity)
            .ok_or_else(|| AssetError::overflow("shares owned"))?;

        // Everything validated; mutate in one go.
        self.total_cost = new_total_cost;
        self.shares_owned = new_shares;
        self.ledger.push(TradeRecord {
            date,
            side: TradeSide::Buy,
            quantity,
            price_per_share: price,
        });
        self.core.touch(date);

        debug!(
            ticker = %self.ticker,
            %quantity,
            %price,
            shares_owned = %self.shares_owned,
            average_cost = %self.average_cost(),
            "buy recorded"
        );
        Ok(())
    }

    /// Sells `quantity` shares at `price_per_share` and returns the
    /// realized P/L: `(price - average_cost) * quantity`.
    ///
    /// The remaining cost basis scales down proportionally,
    /// `old_total_cost * (shares - qty) / shares`, and is exactly zero on
    /// full liquidation. Selling more than is held fails with
    /// [`AssetError::SellExceedsHoldings`] and mutates nothing.
    pub fn sell_shares(
        &mut self,
        date: NaiveDate,
        quantity: impl IntoAmount,
        price_per_share: impl IntoAmount,
    ) -> Result<Decimal, AssetError> {
        let quantity = quantity.into_amount()?;
        let price = price_per_share.into_amount()?;
        if quantity <= Decimal::ZERO {
            return Err(AssetError::InvalidQuantity { got: quantity });
        }
        if price <= Decimal::ZERO {
            return Err(AssetError::InvalidPrice { got: price });
        }
        if quantity > self.shares_owned {
            return Err(AssetError::SellExceedsHoldings {
                requested: quantity,
                held: self.shares_owned,
            });
        }

        let average_cost = self.average_cost();
        let realized_pl = price
            .checked_sub(average_cost)
            .and_then(|per_share| per_share.checked_mul(quantity))
            .ok_or_else(|| AssetError::overflow("realized P/L"))?;

        let remaining_shares = self.shares_owned - quantity;
        let remaining_cost = if remaining_shares.is_zero() {
            Decimal::ZERO
        } else {
            self.total_cost
                .checked_mul(remaining_shares)
                .and_then(|c| c.checked_div(self.shares_owned))
                .ok_or_else(|| AssetError::overflow("remaining cost basis"))?
        };

        self.total_cost = remaining_cost;
        self.shares_owned = remaining_shares;
        self.ledger.push(TradeRecord {
            date,
            side: TradeSide::Sell,
            quantity,
            price_per_share: price,
        });
        self.core.touch(date);

        debug!(
            ticker = %self.ticker,
            %quantity,
            %price,
            %realized_pl,
            shares_owned = %self.shares_owned,
            "sell recorded"
        );
        Ok(realized_pl)
    }

    /// Expected annual dividend income: current value times dividend yield.
    pub fn annual_dividend_income(
        &self,
        oracle: &dyn PriceOracle,
    ) -> Result<Decimal, AssetError> {
        let value = self.current_value(oracle)?;
        value
            .checked_mul(self.dividend_yield)
            .ok_or_else(|| AssetError::overflow("dividend income"))
    }
}

impl AssetValuation for Equity {
    fn id(&self) -> Uuid {
        self.core.id
    }

    fn name(&self) -> &str {
        &self.core.name
    }

    fn kind(&self) -> AssetKind {
        AssetKind::Equity
    }

    fn purchase_price(&self) -> Decimal {
        self.core.purchase_price
    }

    fn fetch_price(&self, oracle: &dyn PriceOracle) -> Result<Decimal, AssetError> {
        oracle.price(&self.ticker)
    }

    fn current_value(&self, oracle: &dyn PriceOracle) -> Result<Decimal, AssetError> {
        let price = self.fetch_price(oracle)?;
        price
            .checked_mul(self.shares_owned)
            .ok_or_else(|| AssetError::overflow("equity value"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::StaticPriceOracle;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> Equity {
        Equity::new(
            "Apple",
            "AAPL",
            "NASDAQ",
            date(2024, 1, 15),
            dec!(10),
            dec!(100),
        )
        .unwrap()
    }

    #[test]
    fn weighted_average_cost_scenario() {
        // Buy 10 @ $100 (cost $1000), buy 10 more @ $120.
        // Average cost = 2200 / 20 = $110.
        let mut eq = sample();
        eq.buy_shares(date(2024, 2, 1), dec!(10), dec!(120)).unwrap();
        assert_eq!(eq.shares_owned(), dec!(20));
        assert_eq!(eq.average_cost(), dec!(110));

        // Sell 5 @ $150 -> realized P/L = (150 - 110) * 5 = $200.
        // Remaining basis = 2200 * 15/20 = $1650.
        let pl = eq.sell_shares(date(2024, 3, 1), dec!(5), dec!(150)).unwrap();
        assert_eq!(pl, dec!(200));
        assert_eq!(eq.shares_owned(), dec!(15));
        assert_eq!(eq.total_cost(), dec!(1650));
        assert_eq!(eq.average_cost(), dec!(110));
    }

    #[test]
    fn buy_then_sell_same_terms_is_neutral() {
        let mut eq = sample();
        let avg_before = eq.average_cost();
        eq.buy_shares(date(2024, 2, 1), dec!(7), dec!(100)).unwrap();
        let pl = eq.sell_shares(date(2024, 2, 2), dec!(7), dec!(100)).unwrap();
        assert_eq!(pl, dec!(0));
        assert_eq!(eq.average_cost(), avg_before);
        assert_eq!(eq.shares_owned(), dec!(10));
    }

    #[test]
    fn full_liquidation_zeroes_the_basis() {
        let mut eq = sample();
        eq.sell_shares(date(2024, 2, 1), dec!(10), dec!(130)).unwrap();
        assert_eq!(eq.shares_owned(), dec!(0));
        assert_eq!(eq.total_cost(), dec!(0));
        assert_eq!(eq.average_cost(), dec!(0));
    }

    #[test]
    fn oversell_leaves_state_untouched() {
        let mut eq = sample();
        let before = eq.clone();
        let err = eq
            .sell_shares(date(2024, 2, 1), dec!(11), dec!(130))
            .unwrap_err();
        assert_eq!(
            err,
            AssetError::SellExceedsHoldings {
                requested: dec!(11),
                held: dec!(10)
            }
        );
        assert_eq!(eq, before);
    }

    #[test]
    fn non_positive_inputs_are_rejected_without_mutation() {
        let mut eq = sample();
        let before = eq.clone();

        assert!(matches!(
            eq.buy_shares(date(2024, 2, 1), dec!(0), dec!(100)),
            Err(AssetError::InvalidQuantity { .. })
        ));
        assert!(matches!(
            eq.buy_shares(date(2024, 2, 1), dec!(5), dec!(-1)),
            Err(AssetError::InvalidPrice { .. })
        ));
        assert!(matches!(
            eq.sell_shares(date(2024, 2, 1), dec!(-3), dec!(100)),
            Err(AssetError::InvalidQuantity { .. })
        ));
        assert_eq!(eq, before);
    }

    #[test]
    fn shares_equal_signed_sum_of_ledger() {
        let mut eq = sample();
        eq.buy_shares(date(2024, 2, 1), dec!(4), dec!(110)).unwrap();
        eq.sell_shares(date(2024, 3, 1), dec!(6), dec!(120)).unwrap();
        eq.buy_shares(date(2024, 4, 1), dec!(2), dec!(90)).unwrap();

        let signed_sum: Decimal = eq
            .ledger()
            .iter()
            .map(|t| match t.side {
                TradeSide::Buy => t.quantity,
                TradeSide::Sell => -t.quantity,
            })
            .sum();
        assert_eq!(eq.shares_owned(), signed_sum);
        assert!(eq.shares_owned() >= Decimal::ZERO);
    }

    #[test]
    fn cost_basis_tracks_shares_times_average() {
        let mut eq = sample();
        eq.buy_shares(date(2024, 2, 1), dec!(3), dec!(107.37)).unwrap();
        eq.sell_shares(date(2024, 3, 1), dec!(5), dec!(119.99)).unwrap();

        let drift = (eq.total_cost() - eq.shares_owned() * eq.average_cost()).abs();
        assert!(drift < dec!(0.0001), "basis drifted by {}", drift);
    }

    #[test]
    fn valuation_and_return_use_the_oracle() {
        let oracle = StaticPriceOracle::new()
            .with_price("AAPL", dec!(150))
            .unwrap();
        let eq = sample();

        assert_eq!(eq.fetch_price(&oracle).unwrap(), dec!(150));
        assert_eq!(eq.current_value(&oracle).unwrap(), dec!(1500));
        // (1500 - 1000) / 1000 = 0.5
        assert_eq!(eq.calculate_return(&oracle).unwrap(), dec!(0.5));
    }

    #[test]
    fn missing_quote_propagates() {
        let oracle = StaticPriceOracle::new();
        let eq = sample();
        assert!(matches!(
            eq.current_value(&oracle),
            Err(AssetError::PriceUnavailable { .. })
        ));
    }

    #[test]
    fn dividend_income_follows_current_value() {
        let oracle = StaticPriceOracle::new()
            .with_price("AAPL", dec!(200))
            .unwrap();
        let eq = sample().with_dividend_yield(dec!(0.02)).unwrap();
        // 10 shares * 200 * 0.02 = 40
        assert_eq!(eq.annual_dividend_income(&oracle).unwrap(), dec!(40));
    }
}
