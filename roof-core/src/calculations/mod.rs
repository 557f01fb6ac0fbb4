//! Pricing calculations for roofing project estimates.
//!
//! The centerpiece is [`estimate::Estimator`], a pure transform from an
//! [`crate::models::EstimateInput`] to a structured cost breakdown. Shared
//! rounding helpers live in [`common`]; they are for presentation time
//! only, since the estimate derivation itself never rounds mid-computation.

pub mod common;
pub mod estimate;

pub use estimate::{Estimator, pitch_multiplier};
