//! Overlay & Transitions estimate: pave over existing asphalt, feather
//! transitions, and optionally widen a driveway.
//!
//! Four sections feed the grand total: the overlay itself (1.5 in, with
//! tack coat and preparation fees), an additional-inch overlay at a
//! fixed 0.5 in, the transition (2 in, with removal lines, its own
//! distance entry, and a reduced flat mobilization fee), and the
//! driveway widening add-on. Material cost is never rounded on this
//! sheet.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::section::{
    DrivewaySectionConfig, DrivewaySectionInput, FlatFee, PavingSectionConfig, PavingSectionInput,
    SectionResult,
};
use crate::format;
use crate::models::{RateConfig, YesNo, keys};

use super::{record_field, record_yes_no};

const OVERLAY_FEES: &[FlatFee] = &[
    FlatFee {
        key: "flat_rate_mobilization_fee",
        label: "Flat Rate Mobilization Fee",
        rate_key: keys::FLAT_RATE_MOBILIZATION_FEE,
    },
    FlatFee {
        key: "tack_coat_fee",
        label: "Tack Coat Fee",
        rate_key: keys::TACK_COAT_FEE,
    },
    FlatFee {
        key: "preparation_fee",
        label: "Preparation Fee",
        rate_key: keys::PREPARATION_FEE,
    },
];

const TRANSITION_FEES: &[FlatFee] = &[FlatFee {
    key: "flat_rate_mobilization_fee",
    label: "Flat Rate Mobilization Fee",
    rate_key: keys::TRANSITION_FLAT_RATE_MOBILIZATION_FEE,
}];

fn overlay_section() -> PavingSectionConfig {
    PavingSectionConfig {
        key: "overlay",
        name: "Asphalt Overlay",
        thickness_in: Decimal::new(15, 1),
        material_rounding: false,
        removal_lines: false,
        extra_labor: None,
        tiered_mobilization: true,
        flat_fees: OVERLAY_FEES,
        installation_mileage: true,
        removal_mileage: false,
        zero_area_guard: true,
    }
}

fn additional_inch_section() -> PavingSectionConfig {
    PavingSectionConfig {
        key: "additional_inch",
        name: "Additional Inch Overlay",
        thickness_in: Decimal::new(5, 1),
        material_rounding: false,
        removal_lines: false,
        extra_labor: None,
        tiered_mobilization: false,
        flat_fees: &[],
        installation_mileage: false,
        removal_mileage: false,
        zero_area_guard: false,
    }
}

fn transition_section() -> PavingSectionConfig {
    PavingSectionConfig {
        key: "transition",
        name: "Asphalt Transition",
        thickness_in: Decimal::from(2),
        material_rounding: false,
        removal_lines: true,
        extra_labor: None,
        tiered_mobilization: false,
        flat_fees: TRANSITION_FEES,
        installation_mileage: false,
        removal_mileage: true,
        zero_area_guard: true,
    }
}

fn driveway_section() -> DrivewaySectionConfig {
    DrivewaySectionConfig {
        key: "driveway",
        name: "Driveway Widening Add On",
        material_rounding: false,
        base_price_key: keys::DRIVEWAY_BASE_PRICE_PER_TON,
        base_trucking_in_key: keys::TRUCKING_IN_COST_PER_TON,
        base_labor_key: keys::DRIVEWAY_BASE_LABOR_COST_PER_TON,
        dirt_trucking_out_key: keys::TRUCKING_OUT_COST_PER_TON,
        dirt_labor_key: keys::REMOVAL_LABOR_COST_PER_TON,
    }
}

/// Raw measurements for an Overlay & Transitions estimate. The
/// transition carries its own distance entry; the overlay's distance
/// only drives the installation mileage surcharge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayTransitionsInputs {
    pub overlay_area_sq_ft: Decimal,
    pub overlay_additional_tons: Decimal,
    pub distance_miles: Decimal,

    pub additional_inch_area_sq_ft: Decimal,
    pub additional_inch_tons: Decimal,

    pub transition_area_sq_ft: Decimal,
    pub transition_additional_tons: Decimal,
    pub transition_distance_miles: Decimal,

    pub driveway_area_sq_ft: Decimal,
    pub driveway_additional_asphalt_tons: Decimal,
    pub driveway_additional_base_tons: Decimal,
    pub only_asphalt_added: YesNo,

    pub commission_amount: Decimal,
}

impl OverlayTransitionsInputs {
    pub fn from_record(record: &BTreeMap<String, String>) -> Self {
        Self {
            overlay_area_sq_ft: record_field(record, "overlayArea"),
            overlay_additional_tons: record_field(record, "overlayAdditional"),
            distance_miles: record_field(record, "distance"),
            additional_inch_area_sq_ft: record_field(record, "additionalInchArea"),
            additional_inch_tons: record_field(record, "additionalInchAsphalt"),
            transition_area_sq_ft: record_field(record, "transitionArea"),
            transition_additional_tons: record_field(record, "transitionAdditional"),
            transition_distance_miles: record_field(record, "transitionDistance"),
            driveway_area_sq_ft: record_field(record, "drivewayArea"),
            driveway_additional_asphalt_tons: record_field(record, "drivewayAdditionalAsphalt"),
            driveway_additional_base_tons: record_field(record, "drivewayAdditionalBase"),
            only_asphalt_added: record_yes_no(record, "onlyAsphaltAdded"),
            commission_amount: record_field(record, "commissionAmount"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverlayTransitionsQuote {
    pub overlay: SectionResult,
    pub additional_inch: SectionResult,
    pub transition: SectionResult,
    pub driveway: SectionResult,
    pub commission_amount: Decimal,
    pub grand_total: Decimal,
}

impl OverlayTransitionsQuote {
    pub fn sections(&self) -> [&SectionResult; 4] {
        [
            &self.overlay,
            &self.additional_inch,
            &self.transition,
            &self.driveway,
        ]
    }

    pub fn to_record(&self) -> BTreeMap<String, String> {
        format::quote_record(&self.sections(), self.commission_amount, self.grand_total)
    }
}

/// Calculator for the Overlay & Transitions estimate.
#[derive(Debug, Clone)]
pub struct OverlayTransitionsEstimator<'a> {
    rates: &'a RateConfig,
}

impl<'a> OverlayTransitionsEstimator<'a> {
    pub fn new(rates: &'a RateConfig) -> Self {
        Self { rates }
    }

    pub fn calculate(&self, inputs: &OverlayTransitionsInputs) -> OverlayTransitionsQuote {
        let overlay = overlay_section().calculate(
            self.rates,
            &PavingSectionInput {
                area_sq_ft: inputs.overlay_area_sq_ft,
                thickness_in: None,
                additional_tons: inputs.overlay_additional_tons,
                distance_miles: inputs.distance_miles,
            },
        );

        let additional_inch = additional_inch_section().calculate(
            self.rates,
            &PavingSectionInput {
                area_sq_ft: inputs.additional_inch_area_sq_ft,
                thickness_in: None,
                additional_tons: inputs.additional_inch_tons,
                distance_miles: Decimal::ZERO,
            },
        );

        let transition = transition_section().calculate(
            self.rates,
            &PavingSectionInput {
                area_sq_ft: inputs.transition_area_sq_ft,
                thickness_in: None,
                additional_tons: inputs.transition_additional_tons,
                distance_miles: inputs.transition_distance_miles,
            },
        );

        let driveway = driveway_section().calculate(
            self.rates,
            &DrivewaySectionInput {
                area_sq_ft: inputs.driveway_area_sq_ft,
                additional_asphalt_tons: inputs.driveway_additional_asphalt_tons,
                additional_base_tons: inputs.driveway_additional_base_tons,
                only_portion_added: inputs.only_asphalt_added,
            },
        );

        let grand_total = overlay.total
            + additional_inch.total
            + transition.total
            + driveway.total
            + inputs.commission_amount;

        OverlayTransitionsQuote {
            overlay,
            additional_inch,
            transition,
            driveway,
            commission_amount: inputs.commission_amount,
            grand_total,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use crate::models::JobType;

    use super::*;

    fn rates() -> RateConfig {
        RateConfig::defaults(JobType::OverlayTransitions)
    }

    #[test]
    fn overlay_section_with_defaults_at_thousand_square_feet() {
        let rates = rates();
        let inputs = OverlayTransitionsInputs {
            overlay_area_sq_ft: dec!(1000),
            ..Default::default()
        };

        let quote = OverlayTransitionsEstimator::new(&rates).calculate(&inputs);

        // 10 final tons: 1000 + 100 + 500 labor + 500 mob + 200 flat + 100 tack + 200 prep
        assert_eq!(quote.overlay.line("asphalt_cost"), Some(dec!(1000)));
        assert_eq!(quote.overlay.line("tack_coat_fee"), Some(dec!(100)));
        assert_eq!(quote.overlay.line("preparation_fee"), Some(dec!(200)));
        assert_eq!(quote.overlay.total, dec!(2600));
    }

    #[test]
    fn overlay_material_cost_is_not_rounded_to_hundred() {
        let mut rates = rates();
        rates.set(keys::PRICE_PER_TON, dec!(97));
        let inputs = OverlayTransitionsInputs {
            overlay_area_sq_ft: dec!(1000),
            ..Default::default()
        };

        let quote = OverlayTransitionsEstimator::new(&rates).calculate(&inputs);

        assert_eq!(quote.overlay.line("asphalt_cost"), Some(dec!(970)));
    }

    #[test]
    fn additional_inch_uses_fixed_half_inch() {
        let rates = rates();
        let inputs = OverlayTransitionsInputs {
            additional_inch_area_sq_ft: dec!(1000),
            ..Default::default()
        };

        let quote = OverlayTransitionsEstimator::new(&rates).calculate(&inputs);

        // 1000 sq ft at 0.5in -> 4 final tons: 400 + 40 + 200
        assert_eq!(quote.additional_inch.materials[0].quantity.final_tons, dec!(4));
        assert_eq!(quote.additional_inch.total, dec!(640));
    }

    #[test]
    fn transition_bills_removal_and_its_own_mileage() {
        let rates = rates();
        let inputs = OverlayTransitionsInputs {
            transition_area_sq_ft: dec!(1000),
            transition_distance_miles: dec!(15),
            // the overlay's distance must not leak into the transition
            distance_miles: dec!(100),
            ..Default::default()
        };

        let quote = OverlayTransitionsEstimator::new(&rates).calculate(&inputs);

        // 13 final tons: 1300 + 130 + 650 + 195 out + 494 removal + 100 flat + 50 mileage
        assert_eq!(quote.transition.line("trucking_out_cost"), Some(dec!(195)));
        assert_eq!(quote.transition.line("removal_labor_cost"), Some(dec!(494)));
        assert_eq!(quote.transition.line("flat_rate_mobilization_fee"), Some(dec!(100)));
        assert_eq!(quote.transition.line("removal_mileage_cost"), Some(dec!(50)));
        assert_eq!(quote.transition.total, dec!(2919));
    }

    #[test]
    fn overlay_zero_area_guard_suppresses_fixed_fees() {
        let rates = rates();
        let inputs = OverlayTransitionsInputs::default();

        let quote = OverlayTransitionsEstimator::new(&rates).calculate(&inputs);

        assert_eq!(quote.overlay.total, dec!(0));
        assert_eq!(quote.transition.total, dec!(0));
        assert_eq!(quote.grand_total, dec!(0));
    }

    #[test]
    fn driveway_uses_its_own_base_rates() {
        let mut rates = rates();
        rates.set(keys::DRIVEWAY_BASE_PRICE_PER_TON, dec!(20));
        let inputs = OverlayTransitionsInputs {
            driveway_area_sq_ft: dec!(1000),
            ..Default::default()
        };

        let quote = OverlayTransitionsEstimator::new(&rates).calculate(&inputs);

        // base lands on 27 final tons at 6in
        assert_eq!(quote.driveway.line("base_cost"), Some(dec!(540)));
        assert_eq!(quote.driveway.line("base_labor_cost"), Some(dec!(405)));
    }

    #[test]
    fn grand_total_composes_all_four_sections_and_commission() {
        let rates = rates();
        let inputs = OverlayTransitionsInputs {
            overlay_area_sq_ft: dec!(1000),
            transition_area_sq_ft: dec!(1000),
            commission_amount: dec!(250),
            ..Default::default()
        };

        let quote = OverlayTransitionsEstimator::new(&rates).calculate(&inputs);

        assert_eq!(
            quote.grand_total,
            quote.overlay.total
                + quote.additional_inch.total
                + quote.transition.total
                + quote.driveway.total
                + dec!(250)
        );
        assert_eq!(quote.grand_total, dec!(2600) + dec!(2869) + dec!(250));
    }
}
