//! Zakat obligation engine.
//!
//! Consumes a portfolio snapshot plus a [`ZakatConfig`] and derives the
//! obligation. Liability is a pure function of current net worth: a
//! two-state classification with no persisted history.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

use crate::config::ZakatConfig;
use crate::portfolio::PortfolioSnapshot;
use crate::pricing::PriceOracle;
use crate::types::{AssetError, AssetKind, CalculationStep};
use crate::utils::round_money;

/// Whether the portfolio has crossed the nisab threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum ZakatStatus {
    BelowThreshold,
    Liable,
}

/// The derived obligation, with a step-by-step trace of how it was reached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZakatReport {
    pub net_worth: Decimal,
    pub nisab_threshold: Decimal,
    pub zakat_rate: Decimal,
    pub status: ZakatStatus,
    /// Total obligation, money-rounded. Exactly zero below the threshold.
    pub zakat_due: Decimal,
    /// Obligation per asset kind; only strictly positive groups appear.
    pub by_asset_kind: BTreeMap<AssetKind, Decimal>,
    pub calculation_trace: Vec<CalculationStep>,
}

impl ZakatReport {
    pub fn is_liable(&self) -> bool {
        self.status == ZakatStatus::Liable
    }

    /// The obligation formatted with 2 decimal places.
    pub fn format_amount(&self) -> String {
        format!("{:.2}", self.zakat_due)
    }

    /// Human-readable rendering of the calculation trace.
    pub fn explain(&self) -> String {
        use std::fmt::Write;
        let mut output = String::new();

        writeln!(&mut output, "Zakat calculation:").unwrap();
        writeln!(&mut output, "{:-<46}", "").unwrap();
        for step in &self.calculation_trace {
            match step.amount {
                Some(amount) => {
                    writeln!(&mut output, "  {:<28} {:>14}", step.description, amount).unwrap()
                }
                None => writeln!(&mut output, "  {}", step.description).unwrap(),
            }
        }
        writeln!(&mut output, "{:-<46}", "").unwrap();
        writeln!(&mut output, "Status: {}", self.status).unwrap();
        if self.is_liable() {
            writeln!(&mut output, "Amount due: {}", self.format_amount()).unwrap();
        }
        output
    }
}

impl fmt::Display for ZakatReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Net worth: {} | Nisab: {} | {} | Due: {}",
            self.net_worth,
            self.nisab_threshold,
            self.status,
            self.format_amount()
        )
    }
}

pub struct ZakatEngine {
    config: ZakatConfig,
}

impl ZakatEngine {
    /// Fails if the configuration is invalid; the engine never runs with
    /// an unvalidated threshold or rate.
    pub fn new(config: ZakatConfig) -> Result<Self, AssetError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ZakatConfig {
        &self.config
    }

    /// Liable iff `net_worth >= nisab_threshold`.
    pub fn check_threshold(&self, net_worth: Decimal) -> ZakatStatus {
        if net_worth >= self.config.nisab_threshold {
            ZakatStatus::Liable
        } else {
            ZakatStatus::BelowThreshold
        }
    }

    /// Computes the full obligation for a snapshot.
    ///
    /// Zero when net worth is below the nisab threshold, otherwise
    /// `net_worth * rate`, money-rounded. A price failure on any asset
    /// propagates instead of producing a partial report.
    pub fn calculate(
        &self,
        snapshot: &PortfolioSnapshot,
        oracle: &dyn PriceOracle,
    ) -> Result<ZakatReport, AssetError> {
        let net_worth = snapshot.net_worth(oracle)?;
        let status = self.check_threshold(net_worth);

        let mut trace = vec![
            CalculationStep::initial("Net worth", net_worth),
            CalculationStep::compare("Nisab threshold", self.config.nisab_threshold),
        ];

        let (zakat_due, by_asset_kind) = match status {
            ZakatStatus::BelowThreshold => {
                trace.push(CalculationStep::info(
                    "Net worth below nisab - no Zakat due",
                ));
                (Decimal::ZERO, BTreeMap::new())
            }
            ZakatStatus::Liable => {
                let due = net_worth
                    .checked_mul(self.config.zakat_rate)
                    .ok_or_else(|| AssetError::overflow("zakat due"))?;
                let due = round_money(due);
                trace.push(CalculationStep::rate("Applied rate", self.config.zakat_rate));
                trace.push(CalculationStep::result("Zakat due", due));
                (due, self.zakat_by_asset_kind(snapshot, oracle)?)
            }
        };

        debug!(
            %net_worth,
            nisab = %self.config.nisab_threshold,
            %status,
            %zakat_due,
            "zakat calculated"
        );

        Ok(ZakatReport {
            net_worth,
            nisab_threshold: self.config.nisab_threshold,
            zakat_rate: self.config.zakat_rate,
            status,
            zakat_due,
            by_asset_kind,
            calculation_trace: trace,
        })
    }

    /// Per-kind obligation: each group's value times the rate,
    /// money-rounded, emitted only for strictly positive group values.
    pub fn zakat_by_asset_kind(
        &self,
        snapshot: &PortfolioSnapshot,
        oracle: &dyn PriceOracle,
    ) -> Result<BTreeMap<AssetKind, Decimal>, AssetError> {
        let totals = snapshot.value_by_kind(oracle)?;
        let mut breakdown = BTreeMap::new();
        for (kind, value) in totals {
            if value <= Decimal::ZERO {
                continue;
            }
            let due = value
                .checked_mul(self.config.zakat_rate)
                .ok_or_else(|| AssetError::overflow("per-kind zakat"))?;
            breakdown.insert(kind, round_money(due));
        }
        Ok(breakdown)
    }
}
