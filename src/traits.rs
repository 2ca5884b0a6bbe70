use rust_decimal::Decimal;
use uuid::Uuid;

use crate::pricing::PriceOracle;
use crate::types::{AssetError, AssetKind};
use crate::utils::round_ratio;

/// Capability implemented by every asset kind: price, value and return
/// queries against an injected price oracle.
///
/// All three queries are pure with respect to stored state: valuation is
/// derived on read, never persisted as a side effect of a getter.
pub trait AssetValuation {
    /// Stable unique identifier for this asset.
    fn id(&self) -> Uuid;

    /// Display name.
    fn name(&self) -> &str;

    /// Which of the four kinds this asset is.
    fn kind(&self) -> AssetKind;

    /// The price paid at acquisition. Strictly positive by construction.
    fn purchase_price(&self) -> Decimal;

    /// Current unit price from the oracle (per share, per gram, per coin).
    ///
    /// Kinds without a quoted unit price (Property) fail with
    /// [`AssetError::PriceUnavailable`].
    fn fetch_price(&self, oracle: &dyn PriceOracle) -> Result<Decimal, AssetError>;

    /// Total current value of the holding.
    ///
    /// Recomputed from `fetch_price` for market-priced kinds (Equity,
    /// Coin, PreciousMetal); computed analytically from structural fields
    /// for Property.
    fn current_value(&self, oracle: &dyn PriceOracle) -> Result<Decimal, AssetError>;

    /// Overall return relative to the purchase price, rounded half-up to
    /// 4 decimal places: `(current - purchase) / purchase`.
    fn calculate_return(&self, oracle: &dyn PriceOracle) -> Result<Decimal, AssetError> {
        let current = self.current_value(oracle)?;
        let purchase = self.purchase_price();
        let gain = current
            .checked_sub(purchase)
            .ok_or_else(|| AssetError::overflow("return numerator"))?;
        let ratio = gain
            .checked_div(purchase)
            .ok_or_else(|| AssetError::overflow("return ratio"))?;
        Ok(round_ratio(ratio))
    }
}
