//! Physical precious-metal holdings.
//!
//! Value is derived on read: per-gram oracle price times weight times
//! purity. Refinement trades weight for purity while preserving the pure
//! metal content exactly.

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
use crate::types::{AssetError, AssetKind};
use crate::utils::ensure_positive;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum MetalKind {
    Gold,
    Silver,
    Platinum,
}

impl MetalKind {
    /// Oracle symbol for the per-gram price of the pure metal.
    pub fn symbol(&self) -> &'static str {
        match self {
            MetalKind::Gold => "XAU",
            MetalKind::Silver => "XAG",
            MetalKind::Platinum => "XPT",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreciousMetal {
    pub core: AssetCore,
    pub kind: MetalKind,
    pub screening: ScreeningProfile,
    weight_grams: Decimal,
    purity: Decimal,
}

impl PreciousMetal {
    /// Purity must lie in `(0, 1]`: zero purity would force a zero value
    /// and make refinement undefined.
    pub fn new(
        name: impl Into<String>,
        kind: MetalKind,
        purchase_date: NaiveDate,
        purchase_price: impl IntoAmount,
        weight_grams: impl IntoAmount,
        purity: impl IntoAmount,
    ) -> Result<Self, AssetError> {
        let weight = ensure_positive("weight_grams", weight_grams.into_amount()?)?;
        let purity = purity.into_amount()?;
        if purity <= Decimal::ZERO || purity > Decimal::ONE {
            return Err(AssetError::InvalidPurity { got: purity });
        }

        Ok(Self {
            core: AssetCore::new(name, purchase_date, purchase_price)?,
            kind,
            screening: ScreeningProfile::default(),
            weight_grams: weight,
            purity,
        })
    }

    pub fn with_screening(mut self, screening: ScreeningProfile) -> Self {
        self.screening = screening;
        self
    }

    pub fn weight_grams(&self) -> Decimal {
        self.weight_grams
    }

    pub fn purity(&self) -> Decimal {
        self.purity
    }

    /// Grams of pure metal: `weight * purity`. Held invariant by
    /// [`refine`](Self::refine).
    pub fn pure_content(&self) -> Decimal {
        self.weight_grams * self.purity
    }

    /// Re-expresses the holding at a new purity.
    ///
    /// `weight' = pure_content / new_purity`, `purity' = new_purity`, so
    /// the pure content is preserved. Out-of-range purity fails with
    /// [`AssetError::InvalidPurity`] and alters nothing.
    pub fn refine(&mut self, date: NaiveDate, new_purity: impl IntoAmount) -> Result<(), AssetError> {
        let new_purity = new_purity.into_amount()?;
        if new_purity <= Decimal::ZERO || new_purity > Decimal::ONE {
            return Err(AssetError::InvalidPurity { got: new_purity });
        }

        let new_weight = self
            .pure_content()
            .checked_div(new_purity)
            .ok_or_else(|| AssetError::overflow("refined weight"))?;

        self.weight_grams = new_weight;
        self.purity = new_purity;
        self.core.touch(date);

        debug!(
            kind = %self.kind,
            weight_grams = %self.weight_grams,
            purity = %self.purity,
            "refined"
        );
        Ok(())
    }
}

impl AssetValuation for PreciousMetal {
    fn id(&self) -> Uuid {
        self.core.id
    }

    fn name(&self) -> &str {
        &self.core.name
    }

    fn kind(&self) -> AssetKind {
        AssetKind::PreciousMetal
    }

    fn purchase_price(&self) -> Decimal {
        self.core.purchase_price
    }

    fn fetch_price(&self, oracle: &dyn PriceOracle) -> Result<Decimal, AssetError> {
        oracle.price(self.kind.symbol())
    }

    fn current_value(&self, oracle: &dyn PriceOracle) -> Result<Decimal, AssetError> {
        let price_per_gram = self.fetch_price(oracle)?;
        price_per_gram
            .checked_mul(self.weight_grams)
            .and_then(|v| v.checked_mul(self.purity))
            .ok_or_else(|| AssetError::overflow("metal value"))
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

    fn bar() -> PreciousMetal {
        PreciousMetal::new(
            "Gold bar",
            MetalKind::Gold,
            date(2023, 6, 1),
            dec!(4000),
            dec!(100),
            dec!(0.75),
        )
        .unwrap()
    }

    #[test]
    fn refine_preserves_pure_content() {
        // 100g at 0.75 purity = 75g pure. Refined to 0.9995:
        // weight = 75 / 0.9995 ≈ 75.0375g.
        let mut metal = bar();
        let pure_before = metal.pure_content();
        metal.refine(date(2024, 1, 1), dec!(0.9995)).unwrap();

        assert_eq!(metal.purity(), dec!(0.9995));
        let drift = (metal.pure_content() - pure_before).abs();
        assert!(drift < dec!(0.0000001), "pure content drifted by {}", drift);

        let expected_weight = dec!(75) / dec!(0.9995);
        assert_eq!(metal.weight_grams(), expected_weight);
    }

    #[test]
    fn refine_rejects_out_of_range_purity() {
        let mut metal = bar();
        let before = metal.clone();

        for bad in [dec!(0), dec!(-0.1), dec!(1.1)] {
            let err = metal.refine(date(2024, 1, 1), bad).unwrap_err();
            assert_eq!(err, AssetError::InvalidPurity { got: bad });
        }
        assert_eq!(metal, before);
    }

    #[test]
    fn construction_validates_weight_and_purity() {
        assert!(PreciousMetal::new(
            "x",
            MetalKind::Silver,
            date(2023, 6, 1),
            dec!(100),
            dec!(0),
            dec!(0.9)
        )
        .is_err());
        assert!(PreciousMetal::new(
            "x",
            MetalKind::Silver,
            date(2023, 6, 1),
            dec!(100),
            dec!(10),
            dec!(1.5)
        )
        .is_err());
    }

    #[test]
    fn value_is_price_times_weight_times_purity() {
        let oracle = StaticPriceOracle::new().with_price("XAU", dec!(60)).unwrap();
        let metal = bar();
        // 60 * 100 * 0.75 = 4500
        assert_eq!(metal.current_value(&oracle).unwrap(), dec!(4500));
        // (4500 - 4000) / 4000 = 0.125
        assert_eq!(metal.calculate_return(&oracle).unwrap(), dec!(0.125));
    }

    #[test]
    fn value_is_invariant_under_refinement() {
        let oracle = StaticPriceOracle::new().with_price("XAU", dec!(60)).unwrap();
        let mut metal = bar();
        let value_before = metal.current_value(&oracle).unwrap();
        metal.refine(date(2024, 1, 1), dec!(0.999)).unwrap();
        let value_after = metal.current_value(&oracle).unwrap();

        let drift = (value_after - value_before).abs();
        assert!(drift < dec!(0.000001), "value drifted by {}", drift);
    }
}
