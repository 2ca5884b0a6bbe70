//! Portfolio ownership and aggregation.
//!
//! A portfolio owns its assets. Mutation goes through `&mut self`, so the
//! single-writer rule the lot-accounting invariants depend on is enforced
//! by ownership rather than convention. Readers never see the live
//! collection: [`Portfolio::snapshot`] hands out an owned, immutable copy.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;
use uuid::Uuid;

use crate::assets::Asset;
use crate::pricing::PriceOracle;
use crate::traits::AssetValuation;
use crate::types::{AssetError, AssetKind};
use crate::utils::round_ratio;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Portfolio {
    pub id: Uuid,
    pub owner_id: Uuid,
    assets: Vec<Asset>,
}

impl Portfolio {
    pub fn new(owner_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id,
            assets: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn add_asset(&mut self, asset: impl Into<Asset>) {
        let asset = asset.into();
        debug!(portfolio = %self.id, asset = %asset.id(), kind = %asset.kind(), "asset added");
        self.assets.push(asset);
    }

    /// Removes and returns the asset with the given id.
    pub fn remove_asset(&mut self, id: &Uuid) -> Result<Asset, AssetError> {
        let position = self
            .assets
            .iter()
            .position(|a| a.id() == *id)
            .ok_or(AssetError::AssetNotFound { id: *id })?;
        let asset = self.assets.remove(position);
        debug!(portfolio = %self.id, asset = %id, "asset removed");
        Ok(asset)
    }

    /// Mutable access to a single asset, for owner-initiated edit/buy/
    /// sell/refine operations.
    pub fn asset_mut(&mut self, id: &Uuid) -> Result<&mut Asset, AssetError> {
        self.assets
            .iter_mut()
            .find(|a| a.id() == *id)
            .ok_or(AssetError::AssetNotFound { id: *id })
    }

    /// An owned, immutable snapshot of the current collection.
    ///
    /// This is the only way assets leave the portfolio for readers;
    /// reports and screens operate on snapshots and can never observe a
    /// half-mutated state.
    pub fn snapshot(&self) -> PortfolioSnapshot {
        PortfolioSnapshot {
            portfolio_id: self.id,
            owner_id: self.owner_id,
            assets: self.assets.clone(),
        }
    }

    /// Sums current values over the live collection at read time.
    /// Never cached; a price failure on any asset propagates.
    pub fn net_worth(&self, oracle: &dyn PriceOracle) -> Result<Decimal, AssetError> {
        sum_values(&self.assets, oracle)
    }

    /// Value share per asset kind, each rounded half-up to 4 decimal
    /// places. Empty for an empty or zero-value portfolio.
    pub fn asset_distribution(
        &self,
        oracle: &dyn PriceOracle,
    ) -> Result<BTreeMap<AssetKind, Decimal>, AssetError> {
        distribution(&self.assets, oracle)
    }
}

/// Immutable copy of a portfolio's assets, taken at one instant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    portfolio_id: Uuid,
    owner_id: Uuid,
    assets: Vec<Asset>,
}

impl PortfolioSnapshot {
    pub fn portfolio_id(&self) -> Uuid {
        self.portfolio_id
    }

    pub fn owner_id(&self) -> Uuid {
        self.owner_id
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn net_worth(&self, oracle: &dyn PriceOracle) -> Result<Decimal, AssetError> {
        sum_values(&self.assets, oracle)
    }

    /// Total current value per asset kind present in the snapshot.
    pub fn value_by_kind(
        &self,
        oracle: &dyn PriceOracle,
    ) -> Result<BTreeMap<AssetKind, Decimal>, AssetError> {
        let mut totals = BTreeMap::new();
        for asset in &self.assets {
            let value = asset.current_value(oracle)?;
            let entry = totals.entry(asset.kind()).or_insert(Decimal::ZERO);
            *entry = entry
                .checked_add(value)
                .ok_or_else(|| AssetError::overflow("kind total"))?;
        }
        Ok(totals)
    }

    pub fn asset_distribution(
        &self,
        oracle: &dyn PriceOracle,
    ) -> Result<BTreeMap<AssetKind, Decimal>, AssetError> {
        distribution(&self.assets, oracle)
    }
}

fn sum_values(assets: &[Asset], oracle: &dyn PriceOracle) -> Result<Decimal, AssetError> {
    let mut total = Decimal::ZERO;
    for asset in assets {
        let value = asset.current_value(oracle)?;
        total = total
            .checked_add(value)
            .ok_or_else(|| AssetError::overflow("net worth"))?;
    }
    Ok(total)
}

fn distribution(
    assets: &[Asset],
    oracle: &dyn PriceOracle,
) -> Result<BTreeMap<AssetKind, Decimal>, AssetError> {
    let mut totals: BTreeMap<AssetKind, Decimal> = BTreeMap::new();
    let mut net_worth = Decimal::ZERO;
    for asset in assets {
        let value = asset.current_value(oracle)?;
        let entry = totals.entry(asset.kind()).or_insert(Decimal::ZERO);
        *entry = entry
            .checked_add(value)
            .ok_or_else(|| AssetError::overflow("kind total"))?;
        net_worth = net_worth
            .checked_add(value)
            .ok_or_else(|| AssetError::overflow("net worth"))?;
    }

    if net_worth <= Decimal::ZERO {
        return Ok(BTreeMap::new());
    }

    let mut shares = BTreeMap::new();
    for (kind, value) in totals {
        let share = value
            .checked_div(net_worth)
            .ok_or_else(|| AssetError::overflow("distribution share"))?;
        shares.insert(kind, round_ratio(share));
    }
    Ok(shares)
}
