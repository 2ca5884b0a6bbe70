//! Convenience re-exports for typical usage.
//!
//! ```
//! use tharwa::prelude::*;
//! ```

pub use crate::assets::{
    Asset, Coin, CoinKind, Equity, MetalKind, PreciousMetal, Property, PropertyType, TradeRecord,
};
pub use crate::compliance::{
    ComplianceReport, ComplianceRule, ComplianceScreen, ComplianceVerdict, ScreeningProfile,
};
pub use crate::config::{ZakatConfig, DEFAULT_ZAKAT_RATE};
pub use crate::inputs::IntoAmount;
pub use crate::portfolio::{Portfolio, PortfolioSnapshot};
pub use crate::pricing::{PriceOracle, StaticPriceOracle};
pub use crate::traits::AssetValuation;
pub use crate::types::{AssetError, AssetKind, TradeSide};
pub use crate::zakat::{ZakatEngine, ZakatReport, ZakatStatus};
