//! Cost formulas shared across the section calculators: the per-line
//! multiplication, the area-tiered labor and mobilization schedules, and
//! the over-distance mileage surcharges.
//!
//! The tier breakpoints and per-mile rates are fixed business constants,
//! not configurable rates.

use rust_decimal::Decimal;

use crate::calculations::common::max;

/// Distance included in every quote before mileage surcharges apply.
const FREE_TRAVEL_MILES: i64 = 10;
const INSTALLATION_RATE_PER_MILE: i64 = 20;
const REMOVAL_RATE_PER_MILE: i64 = 10;

/// Area at or below which the higher installation labor rate applies.
const LABOR_TIER_SQ_FT: i64 = 5000;

/// A single cost line: quantity times unit rate, no rounding.
pub fn line_cost(quantity: Decimal, unit_rate: Decimal) -> Decimal {
    quantity * unit_rate
}

/// Installation labor rate per ton, tiered by job area: $50 up to and
/// including 5,000 sq ft, $45 beyond.
pub fn installation_labor_rate(area_sq_ft: Decimal) -> Decimal {
    if area_sq_ft <= Decimal::from(LABOR_TIER_SQ_FT) {
        Decimal::from(50)
    } else {
        Decimal::from(45)
    }
}

/// Paving mobilization fee, tiered by job area. Smaller jobs carry a
/// larger fee: $500 up to 1,000 sq ft, $400 up to 3,000, $300 up to
/// 5,000, $200 beyond.
pub fn paving_mobilization(area_sq_ft: Decimal) -> Decimal {
    if area_sq_ft <= Decimal::from(1000) {
        Decimal::from(500)
    } else if area_sq_ft <= Decimal::from(3000) {
        Decimal::from(400)
    } else if area_sq_ft <= Decimal::from(5000) {
        Decimal::from(300)
    } else {
        Decimal::from(200)
    }
}

/// Miles beyond the 10-mile free-travel threshold, floored at zero.
pub fn extra_miles(distance_miles: Decimal) -> Decimal {
    max(
        Decimal::ZERO,
        distance_miles - Decimal::from(FREE_TRAVEL_MILES),
    )
}

/// Installation mileage surcharge: $20 per mile beyond the threshold.
pub fn installation_mileage(distance_miles: Decimal) -> Decimal {
    extra_miles(distance_miles) * Decimal::from(INSTALLATION_RATE_PER_MILE)
}

/// Removal mileage surcharge: $10 per mile beyond the threshold.
pub fn removal_mileage(distance_miles: Decimal) -> Decimal {
    extra_miles(distance_miles) * Decimal::from(REMOVAL_RATE_PER_MILE)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn line_cost_is_plain_multiplication() {
        assert_eq!(line_cost(dec!(20), dec!(38)), dec!(760));
        assert_eq!(line_cost(dec!(0), dec!(38)), dec!(0));
    }

    #[test]
    fn labor_rate_boundary_is_inclusive_at_5000() {
        assert_eq!(installation_labor_rate(dec!(5000)), dec!(50));
        assert_eq!(installation_labor_rate(dec!(5000.01)), dec!(45));
    }

    #[test]
    fn labor_rate_small_jobs_pay_fifty() {
        assert_eq!(installation_labor_rate(dec!(0)), dec!(50));
        assert_eq!(installation_labor_rate(dec!(1200)), dec!(50));
    }

    #[test]
    fn mobilization_tier_boundaries() {
        assert_eq!(paving_mobilization(dec!(1000)), dec!(500));
        assert_eq!(paving_mobilization(dec!(1000.01)), dec!(400));
        assert_eq!(paving_mobilization(dec!(3000)), dec!(400));
        assert_eq!(paving_mobilization(dec!(3000.01)), dec!(300));
        assert_eq!(paving_mobilization(dec!(5000)), dec!(300));
        assert_eq!(paving_mobilization(dec!(5000.01)), dec!(200));
    }

    #[test]
    fn mileage_free_within_ten_miles() {
        assert_eq!(extra_miles(dec!(10)), dec!(0));
        assert_eq!(installation_mileage(dec!(10)), dec!(0));
        assert_eq!(removal_mileage(dec!(7)), dec!(0));
    }

    #[test]
    fn mileage_charges_beyond_ten_miles() {
        assert_eq!(extra_miles(dec!(15)), dec!(5));
        assert_eq!(installation_mileage(dec!(15)), dec!(100));
        assert_eq!(removal_mileage(dec!(15)), dec!(50));
    }
}
