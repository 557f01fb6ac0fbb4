use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Pitch classification for surcharge purposes.
///
/// A roof is steep-slope at a rise of 7-in-12 or greater; the boundary is
/// inclusive on the steep side. This is a binary threshold, not a graduated
/// scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PitchCategory {
    Standard,
    SteepSlope,
}

impl PitchCategory {
    /// Rise per 12 units of run at which a roof becomes steep-slope.
    pub const STEEP_THRESHOLD: u32 = 7;

    pub fn from_pitch_rise(pitch_rise: u32) -> Self {
        if pitch_rise < Self::STEEP_THRESHOLD {
            Self::Standard
        } else {
            Self::SteepSlope
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::SteepSlope => "Steep Slope",
        }
    }
}

/// Solar detach & reset add-on configuration.
///
/// When `enabled` is false the remaining fields are ignored entirely; they
/// are carried so a form can keep its values while the toggle is off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolarDetachReset {
    pub enabled: bool,

    /// Number of panels to remove and reinstall.
    pub panel_count: u32,

    /// Detach & reset labor price per panel.
    pub price_per_panel: Decimal,

    /// Whether inverter replacement or electrical code work is needed.
    pub electrical_upgrade: bool,

    /// Flat cost of the electrical work, charged only when
    /// `electrical_upgrade` is set.
    pub electrical_upgrade_cost: Decimal,
}

impl SolarDetachReset {
    /// A disabled add-on with all amounts zeroed.
    pub fn none() -> Self {
        Self {
            enabled: false,
            panel_count: 0,
            price_per_panel: Decimal::ZERO,
            electrical_upgrade: false,
            electrical_upgrade_cost: Decimal::ZERO,
        }
    }
}

/// Input values for one estimate computation.
///
/// The engine does not validate ranges; callers constrain them at the edge
/// (the original form used range-limited sliders). Zero and negative values
/// pass through without error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateInput {
    /// Plan-view (flat) footprint area in square feet.
    pub footprint_area: Decimal,

    /// Base material & labor price per roofing square (100 sq ft of actual
    /// sloped surface). Assumed to already bundle material and labor.
    pub base_price_per_square: Decimal,

    /// Roof pitch as rise per 12 units of horizontal run (e.g. 4 for 4/12).
    pub pitch_rise: u32,

    /// Additional price per square applied only to steep-slope roofs.
    pub steep_surcharge: Decimal,

    /// Material overage percentage for offcuts and loss (e.g. 10 for 10%).
    pub waste_factor_percent: Decimal,

    /// Catalog id of the shingle product, informational only.
    pub shingle_product: Option<String>,

    /// Catalog id of the underlayment product, informational only.
    pub underlayment_product: Option<String>,

    pub solar: SolarDetachReset,
}

/// Structured cost breakdown derived from an [`EstimateInput`].
///
/// All monetary fields carry full precision; nothing is rounded until
/// display time. The decomposition invariant holds exactly:
/// `total_cost == base_material_cost + pitch_cost_total + waste_cost +
/// solar_total`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateResult {
    /// Geometric factor converting footprint area to sloped surface area.
    pub pitch_multiplier: Decimal,

    /// Pitch-adjusted roof surface area in square feet.
    pub actual_roof_area: Decimal,

    /// Roofing squares (actual area / 100), possibly fractional.
    pub squares: Decimal,

    pub pitch_category: PitchCategory,

    /// The surcharge actually applied: the configured steep surcharge for
    /// steep-slope roofs, zero otherwise.
    pub active_surcharge: Decimal,

    pub base_material_cost: Decimal,
    pub pitch_cost_total: Decimal,
    pub waste_cost: Decimal,
    pub solar_total: Decimal,

    /// Roofing subtotal before the solar add-on.
    pub subtotal: Decimal,

    pub total_cost: Decimal,

    /// Blended price per square (`total_cost / squares`), zero when the
    /// roof has zero squares.
    pub final_price_per_square: Decimal,

    /// Reference material cost per square from the catalog lookup. Shown
    /// to the estimator but never added into `total_cost`.
    pub material_cost_per_square: Decimal,
}
