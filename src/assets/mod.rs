//! The four asset variants and the closed [`Asset`] union over them.

pub mod coin;
pub mod equity;
pub mod precious_metal;
pub mod property;

pub use coin::{Coin, CoinKind};
pub use equity::{Equity, TradeRecord};
pub use precious_metal::{MetalKind, PreciousMetal};
pub use property::{Property, PropertyType};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::compliance::ScreeningProfile;
use crate::inputs::IntoAmount;
use crate::pricing::PriceOracle;
use crate::traits::AssetValuation;
use crate::types::{AssetError, AssetKind};
use crate::utils::ensure_positive;

/// Fields common to every asset variant.
///
/// Purchase price is strictly positive by construction; dates exist by
/// construction (`NaiveDate` cannot be null). `last_action` is stamped by
/// every mutating operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetCore {
    pub id: Uuid,
    pub name: String,
    pub purchase_date: NaiveDate,
    pub purchase_price: Decimal,
    pub last_action: NaiveDate,
}

impl AssetCore {
    pub fn new(
        name: impl Into<String>,
        purchase_date: NaiveDate,
        purchase_price: impl IntoAmount,
    ) -> Result<Self, AssetError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(AssetError::invalid_input("name", "must not be empty"));
        }
        let purchase_price = ensure_positive("purchase_price", purchase_price.into_amount()?)?;

        Ok(Self {
            id: Uuid::new_v4(),
            name,
            purchase_date,
            purchase_price,
            last_action: purchase_date,
        })
    }

    pub(crate) fn touch(&mut self, date: NaiveDate) {
        self.last_action = date;
    }
}

/// Closed union over the four asset kinds.
///
/// Valuation dispatches with a `match`: there is exactly one
/// [`AssetValuation`] implementation per variant and no runtime type
/// inspection anywhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Asset {
    Equity(Equity),
    PreciousMetal(PreciousMetal),
    Property(Property),
    Coin(Coin),
}

impl Asset {
    pub fn core(&self) -> &AssetCore {
        match self {
            Asset::Equity(a) => &a.core,
            Asset::PreciousMetal(a) => &a.core,
            Asset::Property(a) => &a.core,
            Asset::Coin(a) => &a.core,
        }
    }

    pub fn screening(&self) -> &ScreeningProfile {
        match self {
            Asset::Equity(a) => &a.screening,
            Asset::PreciousMetal(a) => &a.screening,
            Asset::Property(a) => &a.screening,
            Asset::Coin(a) => &a.screening,
        }
    }
}

impl AssetValuation for Asset {
    fn id(&self) -> Uuid {
        self.core().id
    }

    fn name(&self) -> &str {
        &self.core().name
    }

    fn kind(&self) -> AssetKind {
        match self {
            Asset::Equity(_) => AssetKind::Equity,
            Asset::PreciousMetal(_) => AssetKind::PreciousMetal,
            Asset::Property(_) => AssetKind::Property,
            Asset::Coin(_) => AssetKind::Coin,
        }
    }

    fn purchase_price(&self) -> Decimal {
        self.core().purchase_price
    }

    fn fetch_price(&self, oracle: &dyn PriceOracle) -> Result<Decimal, AssetError> {
        match self {
            Asset::Equity(a) => a.fetch_price(oracle),
            Asset::PreciousMetal(a) => a.fetch_price(oracle),
            Asset::Property(a) => a.fetch_price(oracle),
            Asset::Coin(a) => a.fetch_price(oracle),
        }
    }

    fn current_value(&self, oracle: &dyn PriceOracle) -> Result<Decimal, AssetError> {
        match self {
            Asset::Equity(a) => a.current_value(oracle),
            Asset::PreciousMetal(a) => a.current_value(oracle),
            // Qualified: Property also has an inherent zero-arg getter.
            Asset::Property(a) => AssetValuation::current_value(a, oracle),
            Asset::Coin(a) => a.current_value(oracle),
        }
    }
}

impl From<Equity> for Asset {
    fn from(asset: Equity) -> Self {
        Asset::Equity(asset)
    }
}

impl From<PreciousMetal> for Asset {
    fn from(asset: PreciousMetal) -> Self {
        Asset::PreciousMetal(asset)
    }
}

impl From<Property> for Asset {
    fn from(asset: Property) -> Self {
        Asset::Property(asset)
    }
}

impl From<Coin> for Asset {
    fn from(asset: Coin) -> Self {
        Asset::Coin(asset)
    }
}
