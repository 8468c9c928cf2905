//! Cost band computation from distance, move size, and add-on services.

use std::fmt;

use super::rates::{AdditionalService, MoveSize};

/// Default base rate in currency units per driven mile.
const DEFAULT_RATE_PER_MILE: f64 = 1.50;

/// Lower multiplier of the cost band.
const BAND_LOWER: f64 = 0.9;

/// Upper multiplier of the cost band.
const BAND_UPPER: f64 = 1.1;

/// A ±10% cost band around the computed total.
///
/// This is a fixed business rule, not a confidence interval derived from
/// data. Both bounds are rounded to 2 decimals at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostRange {
    pub min: f64,
    pub max: f64,
}

impl fmt::Display for CostRange {
    /// Wire form shown to users: `"$MIN - $MAX"`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2} - ${:.2}", self.min, self.max)
    }
}

/// Pure pricing function for move estimates.
///
/// `total = distance * rate_per_mile + size_flat_rate + sum(service_charges)`,
/// banded to `(total * 0.9, total * 1.1)`. Monetary rounding happens once,
/// at band construction, never on intermediate values.
#[derive(Debug, Clone)]
pub struct PricingEngine {
    rate_per_mile: f64,
}

impl PricingEngine {
    /// Creates an engine with the standard per-mile base rate.
    pub fn new() -> Self {
        Self {
            rate_per_mile: DEFAULT_RATE_PER_MILE,
        }
    }

    /// Creates an engine with a custom per-mile rate.
    pub fn with_rate_per_mile(rate_per_mile: f64) -> Self {
        Self { rate_per_mile }
    }

    /// Estimates the cost band for a move.
    ///
    /// Unknown move sizes and unknown services contribute 0 to the total
    /// (`unknown-category: zero-cost` policy in the rate tables); this
    /// function never fails.
    pub fn estimate(
        &self,
        distance_miles: f64,
        move_size: &str,
        additional_services: &[String],
    ) -> CostRange {
        let base_cost = distance_miles * self.rate_per_mile;
        let size_cost = MoveSize::flat_rate_for(move_size);
        let addon_cost: f64 = additional_services
            .iter()
            .map(|s| AdditionalService::charge_for(s))
            .sum();

        let total = base_cost + size_cost + addon_cost;

        CostRange {
            min: round2(total * BAND_LOWER),
            max: round2(total * BAND_UPPER),
        }
    }
}

impl Default for PricingEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Rounds a monetary value to 2 decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn hundred_mile_two_bedroom_band() {
        // 100 * 1.50 + 600 = 750 -> (675, 825)
        let range = PricingEngine::new().estimate(100.0, "2-bedroom", &[]);
        assert_eq!(range.min, 675.0);
        assert_eq!(range.max, 825.0);
        assert_eq!(range.to_string(), "$675.00 - $825.00");
    }

    #[test]
    fn add_on_services_are_summed() {
        let services = vec!["packing".to_string(), "storage".to_string()];
        let range = PricingEngine::new().estimate(10.0, "studio", &services);
        // 15 + 200 + 250 = 465
        assert_eq!(range.min, round2(465.0 * 0.9));
        assert_eq!(range.max, round2(465.0 * 1.1));
    }

    #[test]
    fn unknown_size_and_service_contribute_zero() {
        let services = vec!["piano".to_string()];
        let range = PricingEngine::new().estimate(100.0, "mansion", &services);
        // Only the mileage component remains: 150 -> (135, 165).
        assert_eq!(range.min, 135.0);
        assert_eq!(range.max, 165.0);
    }

    #[test]
    fn bounds_are_rounded_to_two_decimals() {
        let range = PricingEngine::new().estimate(0.37, "car", &[]);
        assert_eq!(range.min, (range.min * 100.0).round() / 100.0);
        assert_eq!(range.max, (range.max * 100.0).round() / 100.0);
    }

    proptest! {
        #[test]
        fn min_never_exceeds_max(
            distance in 0.0f64..10_000.0,
            size in prop::sample::select(vec![
                "studio", "1-bedroom", "2-bedroom", "3-bedroom",
                "4-bedroom", "office", "car", "unknown",
            ]),
            packing in any::<bool>(),
            storage in any::<bool>(),
        ) {
            let mut services = Vec::new();
            if packing {
                services.push("packing".to_string());
            }
            if storage {
                services.push("storage".to_string());
            }

            let range = PricingEngine::new().estimate(distance, size, &services);
            prop_assert!(range.min <= range.max);
        }

        #[test]
        fn band_ratio_is_constant(distance in 1.0f64..10_000.0) {
            let range = PricingEngine::new().estimate(distance, "3-bedroom", &[]);
            // max/min == 1.1/0.9 up to the 2-decimal rounding of each bound.
            let ratio = range.max / range.min;
            prop_assert!((ratio - 1.1 / 0.9).abs() < 0.001);
        }
    }
}
