//! Digital coin holdings, valued at the oracle quote times amount held.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::AssetCore;
use crate::compliance::ScreeningProfile;
use crate::inputs::IntoAmount;
use crate::pricing::PriceOracle;
use crate::traits::AssetValuation;
use crate::types::{AssetError, AssetKind};
use crate::utils::ensure_non_negative;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum CoinKind {
    Bitcoin,
    Ethereum,
    Solana,
}

impl CoinKind {
    pub fn symbol(&self) -> &'static str {
        match self {
            CoinKind::Bitcoin => "BTC",
            CoinKind::Ethereum => "ETH",
            CoinKind::Solana => "SOL",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub core: AssetCore,
    pub kind: CoinKind,
    pub screening: ScreeningProfile,
    amount: Decimal,
}

impl Coin {
    pub fn new(
        name: impl Into<String>,
        kind: CoinKind,
        purchase_date: NaiveDate,
        purchase_price: impl IntoAmount,
        amount: impl IntoAmount,
    ) -> Result<Self, AssetError> {
        let amount = ensure_non_negative("amount", amount.into_amount()?)?;
        Ok(Self {
            core: AssetCore::new(name, purchase_date, purchase_price)?,
            kind,
            screening: ScreeningProfile::default(),
            amount,
        })
    }

    pub fn with_screening(mut self, screening: ScreeningProfile) -> Self {
        self.screening = screening;
        self
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }
}

impl AssetValuation for Coin {
    fn id(&self) -> Uuid {
        self.core.id
    }

    fn name(&self) -> &str {
        &self.core.name
    }

    fn kind(&self) -> AssetKind {
        AssetKind::Coin
    }

    fn purchase_price(&self) -> Decimal {
        self.core.purchase_price
    }

    fn fetch_price(&self, oracle: &dyn PriceOracle) -> Result<Decimal, AssetError> {
        oracle.price(self.kind.symbol())
    }

    fn current_value(&self, oracle: &dyn PriceOracle) -> Result<Decimal, AssetError> {
        let price = self.fetch_price(oracle)?;
        price
            .checked_mul(self.amount)
            .ok_or_else(|| AssetError::overflow("coin value"))
    }
}
