//! Shared rounding helpers for presenting estimate and report figures.
//!
//! Cost derivation keeps full [`Decimal`] precision end to end; these
//! helpers are applied only when a number is about to be shown to a person
//! or written into a quote record.

use rust_decimal::Decimal;

/// Rounds a decimal value to whole dollars using half-up rounding.
///
/// Values at exactly 50 cents round away from zero, the usual convention
/// for money amounts on printed paperwork. Customer-facing quote totals
/// are shown with zero decimal places.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use roof_core::calculations::common::round_to_dollars;
///
/// assert_eq!(round_to_dollars(dec!(22755.49)), dec!(22755));
/// assert_eq!(round_to_dollars(dec!(22755.50)), dec!(22756));
/// ```
pub fn round_to_dollars(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn round_to_dollars_drops_cents_below_midpoint() {
        let result = round_to_dollars(dec!(22755.22));

        assert_eq!(result, dec!(22755));
    }

    #[test]
    fn round_to_dollars_rounds_up_at_fifty_cents() {
        let result = round_to_dollars(dec!(22755.50));

        assert_eq!(result, dec!(22756));
    }

    #[test]
    fn round_to_dollars_rounds_negatives_away_from_zero() {
        let result = round_to_dollars(dec!(-1234.50));

        assert_eq!(result, dec!(-1235));
    }

    #[test]
    fn round_to_dollars_handles_large_values() {
        let result = round_to_dollars(dec!(999999.99));

        assert_eq!(result, dec!(1000000));
    }
}
