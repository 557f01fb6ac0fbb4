//! Roofing project cost estimation.
//!
//! Derives a structured quote breakdown from physical roof parameters:
//!
//! | Step | Derivation |
//! |------|------------|
//! | 1 | `pitch_multiplier = sqrt(pitch_rise² + 144) / 12` |
//! | 2 | `actual_roof_area = footprint_area × pitch_multiplier` |
//! | 3 | `squares = actual_roof_area / 100` |
//! | 4 | Steep-slope surcharge applies at 7/12 pitch and above |
//! | 5 | `base_material_cost = squares × base_price_per_square` |
//! | 6 | `pitch_cost_total = squares × active_surcharge` |
//! | 7 | `waste_cost = (base + pitch) × waste_factor / 100` |
//! | 8 | `solar_total = panels × price + optional electrical work` |
//! | 9 | `total_cost = base + pitch + waste + solar` |
//!
//! The computation is a pure, stateless transform: identical input produces
//! identical output, there is no I/O, and no input within the real-number
//! domain makes it fail. Intermediate values keep full [`Decimal`]
//! precision; rounding belongs to the display layer.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use roof_core::calculations::Estimator;
//! use roof_core::models::{EstimateInput, PitchCategory, SolarDetachReset};
//!
//! let input = EstimateInput {
//!     footprint_area: dec!(2500),
//!     base_price_per_square: dec!(785),
//!     pitch_rise: 4,
//!     steep_surcharge: dec!(100),
//!     waste_factor_percent: dec!(10),
//!     shingle_product: None,
//!     underlayment_product: None,
//!     solar: SolarDetachReset::none(),
//! };
//!
//! let result = Estimator::new(None).calculate(&input);
//!
//! assert_eq!(result.pitch_category, PitchCategory::Standard);
//! assert_eq!(result.squares.round_dp(3), dec!(26.352));
//! assert_eq!(result.total_cost.round_dp(2), dec!(22755.22));
//! ```

use rust_decimal::{Decimal, MathematicalOps};

use crate::catalog::MaterialCatalog;
use crate::models::{EstimateInput, EstimateResult, PitchCategory};

/// Square of the 12-unit horizontal run in the pitch triangle.
const RUN_SQUARED: u32 = 144;

/// One roofing square is 100 sq ft of actual sloped surface.
const SQUARE_FEET_PER_SQUARE: u32 = 100;

/// Converts a flat footprint area to true sloped surface area.
///
/// A pitch of `rise`-in-12 forms a right triangle with a horizontal run of
/// 12, so the slope length per unit of run is `sqrt(rise² + 144) / 12`.
/// Monotonically increasing in `pitch_rise`; exactly 1 for a flat roof.
pub fn pitch_multiplier(pitch_rise: u32) -> Decimal {
    if pitch_rise == 0 {
        // Flat roof needs no correction.
        return Decimal::ONE;
    }
    let rise = Decimal::from(pitch_rise);
    let hypotenuse = (rise * rise + Decimal::from(RUN_SQUARED))
        .sqrt()
        .unwrap_or(Decimal::ONE); // operand is always positive
    hypotenuse / Decimal::from(12)
}

/// Calculator deriving an [`EstimateResult`] from an [`EstimateInput`].
///
/// Holds an optional reference to a [`MaterialCatalog`] for the
/// informational material-cost lookup; everything else is carried in the
/// input. Cheap to construct per computation.
#[derive(Debug, Clone)]
pub struct Estimator<'a> {
    catalog: Option<&'a MaterialCatalog>,
}

impl<'a> Estimator<'a> {
    /// Creates an estimator. Pass `None` when no material catalog is
    /// available; the material reference figure then stays at zero.
    pub fn new(catalog: Option<&'a MaterialCatalog>) -> Self {
        Self { catalog }
    }

    /// Computes the full cost breakdown.
    ///
    /// Infallible: zero or out-of-range values pass through arithmetic
    /// unchanged, and the price-per-square division is guarded so a
    /// zero-square roof yields zero rather than a division error.
    pub fn calculate(&self, input: &EstimateInput) -> EstimateResult {
        let pitch_multiplier = pitch_multiplier(input.pitch_rise);
        let actual_roof_area = input.footprint_area * pitch_multiplier;
        let squares = actual_roof_area / Decimal::from(SQUARE_FEET_PER_SQUARE);

        let pitch_category = PitchCategory::from_pitch_rise(input.pitch_rise);
        let active_surcharge = match pitch_category {
            PitchCategory::Standard => Decimal::ZERO,
            PitchCategory::SteepSlope => input.steep_surcharge,
        };

        let base_material_cost = squares * input.base_price_per_square;
        let pitch_cost_total = squares * active_surcharge;

        // Waste is an overage on the priced roof including the pitch
        // surcharge, not on the base alone.
        let waste_cost = (base_material_cost + pitch_cost_total)
            * (input.waste_factor_percent / Decimal::ONE_HUNDRED);

        let solar_total = self.solar_total(input);

        let subtotal = base_material_cost + pitch_cost_total + waste_cost;
        let total_cost = subtotal + solar_total;

        let final_price_per_square = if squares > Decimal::ZERO {
            total_cost / squares
        } else {
            Decimal::ZERO
        };

        EstimateResult {
            pitch_multiplier,
            actual_roof_area,
            squares,
            pitch_category,
            active_surcharge,
            base_material_cost,
            pitch_cost_total,
            waste_cost,
            solar_total,
            subtotal,
            total_cost,
            final_price_per_square,
            material_cost_per_square: self.material_cost_per_square(input),
        }
    }

    /// Solar detach & reset cost. Added after the roofing subtotal; not
    /// subject to waste or the pitch surcharge. Zero when disabled, no
    /// matter what the other solar fields hold.
    fn solar_total(&self, input: &EstimateInput) -> Decimal {
        if !input.solar.enabled {
            return Decimal::ZERO;
        }
        let mut total = Decimal::from(input.solar.panel_count) * input.solar.price_per_panel;
        if input.solar.electrical_upgrade {
            total += input.solar.electrical_upgrade_cost;
        }
        total
    }

    /// Reference material price per square from the catalog. Unknown ids
    /// resolve to a zero-cost placeholder, so incomplete catalog data never
    /// blocks an estimate.
    fn material_cost_per_square(&self, input: &EstimateInput) -> Decimal {
        let Some(catalog) = self.catalog else {
            return Decimal::ZERO;
        };
        let price_of = |id: &Option<String>| {
            id.as_deref()
                .map(|id| catalog.lookup(id).price_per_square)
                .unwrap_or(Decimal::ZERO)
        };
        price_of(&input.shingle_product) + price_of(&input.underlayment_product)
    }
}
