//! Halal compliance screening.
//!
//! Each asset carries a [`ScreeningProfile`] describing its structure and
//! income composition; the [`ComplianceScreen`] classifies assets as
//! permissible or impermissible against a fixed rule set:
//!
//! - no interest-bearing structure,
//! - no prohibited business activity,
//! - debt ratio at most 33%,
//! - non-permissible income share at most 5%.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::assets::Asset;
use crate::inputs::IntoAmount;
use crate::portfolio::PortfolioSnapshot;
use crate::traits::AssetValuation;
use crate::types::AssetError;
use crate::utils::ensure_ratio;

/// Screening attributes of a single asset.
///
/// Defaults to a fully compliant profile; ratios are validated to `[0, 1]`
/// at the boundary and never clamped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningProfile {
    /// Whether the asset itself is an interest-bearing instrument.
    pub interest_bearing: bool,
    /// Whether the underlying business activity is prohibited outright.
    pub prohibited_activity: bool,
    /// Total debt over total assets of the underlying, in `[0, 1]`.
    pub debt_ratio: Decimal,
    /// Share of revenue from non-permissible sources, in `[0, 1]`.
    pub impermissible_income_share: Decimal,
}

impl Default for ScreeningProfile {
    fn default() -> Self {
        Self {
            interest_bearing: false,
            prohibited_activity: false,
            debt_ratio: Decimal::ZERO,
            impermissible_income_share: Decimal::ZERO,
        }
    }
}

impl ScreeningProfile {
    pub fn new(
        interest_bearing: bool,
        prohibited_activity: bool,
        debt_ratio: impl IntoAmount,
        impermissible_income_share: impl IntoAmount,
    ) -> Result<Self, AssetError> {
        Ok(Self {
            interest_bearing,
            prohibited_activity,
            debt_ratio: ensure_ratio("debt_ratio", debt_ratio.into_amount()?)?,
            impermissible_income_share: ensure_ratio(
                "impermissible_income_share",
                impermissible_income_share.into_amount()?,
            )?,
        })
    }
}

/// One rule of the fixed screening rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum ComplianceRule {
    InterestBearing,
    ProhibitedActivity,
    ExcessiveDebt,
    ImpermissibleIncome,
}

/// Per-asset screening verdict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceVerdict {
    pub asset_id: Uuid,
    pub asset_name: String,
    pub violations: Vec<ComplianceRule>,
}

impl ComplianceVerdict {
    pub fn is_compliant(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Portfolio-level screening result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub verdicts: Vec<ComplianceVerdict>,
}

impl ComplianceReport {
    /// Logical AND over all assets.
    pub fn is_compliant(&self) -> bool {
        self.verdicts.iter().all(ComplianceVerdict::is_compliant)
    }

    pub fn non_compliant(&self) -> Vec<&ComplianceVerdict> {
        self.verdicts
            .iter()
            .filter(|v| !v.is_compliant())
            .collect()
    }
}

/// Classifies assets against the fixed rule set.
#[derive(Debug, Clone)]
pub struct ComplianceScreen {
    max_debt_ratio: Decimal,
    max_impermissible_income_share: Decimal,
}

impl Default for ComplianceScreen {
    fn default() -> Self {
        Self {
            max_debt_ratio: dec!(0.33),
            max_impermissible_income_share: dec!(0.05),
        }
    }
}

impl ComplianceScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every rule the asset fails. Empty means permissible.
    pub fn violations(&self, asset: &Asset) -> Vec<ComplianceRule> {
        let profile = asset.screening();
        let mut violations = Vec::new();

        if profile.interest_bearing {
            violations.push(ComplianceRule::InterestBearing);
        }
        if profile.prohibited_activity {
            violations.push(ComplianceRule::ProhibitedActivity);
        }
        if profile.debt_ratio > self.max_debt_ratio {
            violations.push(ComplianceRule::ExcessiveDebt);
        }
        if profile.impermissible_income_share > self.max_impermissible_income_share {
            violations.push(ComplianceRule::ImpermissibleIncome);
        }

        violations
    }

    /// True iff the asset passes every rule.
    pub fn check_compliance(&self, asset: &Asset) -> bool {
        self.violations(asset).is_empty()
    }

    /// True iff every asset in the snapshot is permissible.
    pub fn is_compliant(&self, snapshot: &PortfolioSnapshot) -> bool {
        snapshot.assets().iter().all(|a| self.check_compliance(a))
    }

    /// The subset of the snapshot failing at least one rule.
    pub fn filter_non_compliant<'a>(&self, snapshot: &'a PortfolioSnapshot) -> Vec<&'a Asset> {
        snapshot
            .assets()
            .iter()
            .filter(|a| !self.check_compliance(a))
            .collect()
    }

    /// Full per-asset screening of a snapshot.
    pub fn screen(&self, snapshot: &PortfolioSnapshot) -> ComplianceReport {
        let verdicts = snapshot
            .assets()
            .iter()
            .map(|asset| ComplianceVerdict {
                asset_id: asset.id(),
                asset_name: asset.name().to_string(),
                violations: self.violations(asset),
            })
            .collect();
        ComplianceReport { verdicts }
    }
}
