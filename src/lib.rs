//! Asset valuation and portfolio accounting core for a personal-finance
//! tracker.
//!
//! The crate covers the part of the tracker with real accounting depth:
//! per-asset-kind valuation behind the [`AssetValuation`] capability,
//! lot-based weighted-average cost accounting for equities, portfolio
//! aggregation over an injected [`pricing::PriceOracle`], a Zakat
//! obligation engine, and a halal compliance screen. All money and ratio
//! arithmetic is fixed-point decimal with a half-up rounding policy;
//! every operation either fully succeeds or fails leaving prior state
//! untouched.

pub mod assets;
pub mod compliance;
pub mod config;
pub mod inputs;
pub mod portfolio;
pub mod prelude;
pub mod pricing;
pub mod traits;
pub mod types;
pub mod utils;
pub mod zakat;

pub use assets::{Asset, Coin, CoinKind, Equity, MetalKind, PreciousMetal, Property, PropertyType};
pub use compliance::{ComplianceReport, ComplianceScreen, ScreeningProfile};
pub use config::ZakatConfig;
pub use portfolio::{Portfolio, PortfolioSnapshot};
pub use pricing::{PriceOracle, StaticPriceOracle};
pub use traits::AssetValuation;
pub use types::{AssetError, AssetKind};
pub use zakat::{ZakatEngine, ZakatReport, ZakatStatus};
