//! Real-estate holdings.
//!
//! Properties have no quoted unit price. Value is estimated from
//! structural fields: a per-category base rate over the area, blended with
//! a rent-multiple income valuation when the property produces income.
//! Appreciation is an explicit command that compounds the stored value.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::AssetCore;
use crate::compliance::ScreeningProfile;
use crate::inputs::IntoAmount;
use crate::pricing::PriceOracle;
use crate::traits::AssetValuation;
use crate::types::{AssetError, AssetKind};
use crate::utils::{compound_growth, ensure_non_negative, ensure_positive, ensure_ratio, round_ratio};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumIter)]
pub enum PropertyType {
    Residential,
    Commercial,
    Industrial,
    Land,
}

impl PropertyType {
    /// Fixed base rate per square meter used by the analytic estimate.
    pub fn base_rate_per_sqm(&self) -> Decimal {
        match self {
            PropertyType::Residential => dec!(1500),
            PropertyType::Commercial => dec!(2500),
            PropertyType::Industrial => dec!(1200),
            PropertyType::Land => dec!(800),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub core: AssetCore,
    pub location: String,
    pub property_type: PropertyType,
    pub screening: ScreeningProfile,
    area_sqm: Decimal,
    monthly_rental_income: Decimal,
    occupancy_rate: Decimal,
    annual_property_tax: Decimal,
    annual_maintenance: Decimal,
    annual_insurance: Decimal,
    current_value: Decimal,
}

impl Property {
    pub fn new(
        name: impl Into<String>,
        location: impl Into<String>,
        property_type: PropertyType,
        purchase_date: NaiveDate,
        purchase_price: impl IntoAmount,
        area_sqm: impl IntoAmount,
    ) -> Result<Self, AssetError> {
        let area = ensure_positive("area_sqm", area_sqm.into_amount()?)?;

        let mut property = Self {
            core: AssetCore::new(name, purchase_date, purchase_price)?,
            location: location.into(),
            property_type,
            screening: ScreeningProfile::default(),
            area_sqm: area,
            monthly_rental_income: Decimal::ZERO,
            occupancy_rate: Decimal::ONE,
            annual_property_tax: Decimal::ZERO,
            annual_maintenance: Decimal::ZERO,
            annual_insurance: Decimal::ZERO,
            current_value: Decimal::ZERO,
        };
        property.current_value = property.positive_estimate()?;
        Ok(property)
    }

    /// Sets rental terms and re-derives the stored value from the
    /// estimate. Construction-time only; appreciation applied later is an
    /// explicit mutation.
    pub fn with_rental(
        mut self,
        monthly_rental_income: impl IntoAmount,
        occupancy_rate: impl IntoAmount,
    ) -> Result<Self, AssetError> {
        self.monthly_rental_income = ensure_non_negative(
            "monthly_rental_income",
            monthly_rental_income.into_amount()?,
        )?;
        self.occupancy_rate = ensure_ratio("occupancy_rate", occupancy_rate.into_amount()?)?;
        self.current_value = self.positive_estimate()?;
        Ok(self)
    }

    /// Sets the three annual cost fields and re-derives the stored value.
    pub fn with_annual_costs(
        mut self,
        property_tax: impl IntoAmount,
        maintenance: impl IntoAmount,
        insurance: impl IntoAmount,
    ) -> Result<Self, AssetError> {
        self.annual_property_tax =
            ensure_non_negative("annual_property_tax", property_tax.into_amount()?)?;
        self.annual_maintenance =
            ensure_non_negative("annual_maintenance", maintenance.into_amount()?)?;
        self.annual_insurance =
            ensure_non_negative("annual_insurance", insurance.into_amount()?)?;
        self.current_value = self.positive_estimate()?;
        Ok(self)
    }

    /// The analytic estimate, with the strictly-positive value invariant
    /// enforced: per-field-valid inputs can still combine into a
    /// non-positive blend (large costs against negligible rent), and that
    /// combination is rejected rather than stored.
    fn positive_estimate(&self) -> Result<Decimal, AssetError> {
        let estimate = self.estimate_value()?;
        if estimate <= Decimal::ZERO {
            return Err(AssetError::invalid_input(
                "current_value",
                format!("estimated value must be positive (got {})", estimate),
            ));
        }
        Ok(estimate)
    }

    pub fn with_screening(mut self, screening: ScreeningProfile) -> Self {
        self.screening = screening;
        self
    }

    pub fn area_sqm(&self) -> Decimal {
        self.area_sqm
    }

    pub fn monthly_rental_income(&self) -> Decimal {
        self.monthly_rental_income
    }

    pub fn occupancy_rate(&self) -> Decimal {
        self.occupancy_rate
    }

    /// Annual net operating income:
    /// `rent * 12 * occupancy - (tax + maintenance + insurance)`.
    pub fn annual_net_income(&self) -> Result<Decimal, AssetError> {
        let gross = self
            .monthly_rental_income
            .checked_mul(dec!(12))
            .and_then(|g| g.checked_mul(self.occupancy_rate))
            .ok_or_else(|| AssetError::overflow("gross rental income"))?;
        let costs = self.annual_property_tax + self.annual_maintenance + self.annual_insurance;
        gross
            .checked_sub(costs)
            .ok_or_else(|| AssetError::overflow("annual net income"))
    }

    /// Analytic value estimate.
    ///
    /// `base = area * base_rate(type)`. For income-producing properties the
    /// result is the mean of `base` and ten times annual net income;
    /// otherwise `base` alone.
    pub fn estimate_value(&self) -> Result<Decimal, AssetError> {
        let base = self
            .area_sqm
            .checked_mul(self.property_type.base_rate_per_sqm())
            .ok_or_else(|| AssetError::overflow("base value"))?;

        if self.monthly_rental_income <= Decimal::ZERO {
            return Ok(base);
        }

        let income_value = self
            .annual_net_income()?
            .checked_mul(dec!(10))
            .ok_or_else(|| AssetError::overflow("income value"))?;
        let blended = base
            .checked_add(income_value)
            .and_then(|sum| sum.checked_div(dec!(2)))
            .ok_or_else(|| AssetError::overflow("blended value"))?;
        Ok(blended)
    }

    /// The stored value: the estimate at construction, compounded by any
    /// appreciation applied since.
    pub fn current_value(&self) -> Decimal {
        self.current_value
    }

    /// Capitalization rate: annual net income over current value,
    /// rounded half-up to 4 decimal places.
    pub fn cap_rate(&self) -> Result<Decimal, AssetError> {
        let income = self.annual_net_income()?;
        let rate = income
            .checked_div(self.current_value)
            .ok_or_else(|| AssetError::overflow("cap rate"))?;
        Ok(round_ratio(rate))
    }

    /// Return on investment: annual net income over purchase price,
    /// rounded half-up to 4 decimal places.
    pub fn roi(&self) -> Result<Decimal, AssetError> {
        let income = self.annual_net_income()?;
        let roi = income
            .checked_div(self.core.purchase_price)
            .ok_or_else(|| AssetError::overflow("roi"))?;
        Ok(round_ratio(roi))
    }

    /// Compounds the stored value by `(1 + rate)^years`.
    ///
    /// Negative years fail validation; a rate at or below -100% would
    /// destroy the strictly-positive value invariant and is rejected too.
    pub fn apply_appreciation(
        &mut self,
        date: NaiveDate,
        rate: impl IntoAmount,
        years: i32,
    ) -> Result<(), AssetError> {
        if years < 0 {
            return Err(AssetError::InvalidYears { got: years });
        }
        let rate = rate.into_amount()?;
        if rate <= dec!(-1) {
            return Err(AssetError::invalid_input(
                "appreciation_rate",
                format!("must be greater than -1 (got {})", rate),
            ));
        }

        self.current_value = compound_growth(self.current_value, rate, years as u32)?;
        self.core.touch(date);

        debug!(
            location = %self.location,
            %rate,
            years,
            current_value = %self.current_value,
            "appreciation applied"
        );
        Ok(())
    }
}

impl AssetValuation for Property {
    fn id(&self) -> Uuid {
        self.core.id
    }

    fn name(&self) -> &str {
        &self.core.name
    }

    fn kind(&self) -> AssetKind {
        AssetKind::Property
    }

    fn purchase_price(&self) -> Decimal {
        self.core.purchase_price
    }

    /// Properties carry no quoted unit price; this is a contractual
    /// [`AssetError::PriceUnavailable`].
    fn fetch_price(&self, _oracle: &dyn PriceOracle) -> Result<Decimal, AssetError> {
        Err(AssetError::PriceUnavailable {
            symbol: format!("property:{}", self.location),
        })
    }

    fn current_value(&self, _oracle: &dyn PriceOracle) -> Result<Decimal, AssetError> {
        Ok(self.current_value)
    }
}
