//! Remove & Replace estimate: tear out failed asphalt and repave.
//!
//! Four sections feed the grand total:
//!
//! | Section | Layers | Notes |
//! |---------|--------|-------|
//! | Asphalt remove & replace | asphalt 3 in | full removal + install lines, tiered and flat mobilization, both mileage surcharges, zero-area guard |
//! | Additional inch | asphalt, user thickness | material, trucking in, labor only |
//! | Base replacement | base 6 in + dirt at `dirtExcavationThickness` | dedicated base/dirt rate keys |
//! | Driveway widening add-on | asphalt 3 in, base 6 in, dirt 9 in | $750 fee when only asphalt is added |
//!
//! This is the one estimate type that quotes asphalt material cost
//! rounded up to the next $100; all three of its asphalt-bearing
//! sections do so.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::section::{
    BaseDirtSectionConfig, BaseDirtSectionInput, DrivewaySectionConfig, DrivewaySectionInput,
    FlatFee, PavingSectionConfig, PavingSectionInput, SectionResult,
};
use crate::format;
use crate::models::{RateConfig, YesNo, keys};

use super::{record_field, record_yes_no};

const FLAT_FEES: &[FlatFee] = &[FlatFee {
    key: "flat_rate_mobilization_fee",
    label: "Flat Rate Mobilization Fee",
    rate_key: keys::FLAT_RATE_MOBILIZATION_FEE,
}];

fn asphalt_section() -> PavingSectionConfig {
    PavingSectionConfig {
        key: "asphalt",
        name: "Asphalt Remove & Replace",
        thickness_in: Decimal::from(3),
        material_rounding: true,
        removal_lines: true,
        extra_labor: None,
        tiered_mobilization: true,
        flat_fees: FLAT_FEES,
        installation_mileage: true,
        removal_mileage: true,
        zero_area_guard: true,
    }
}

fn additional_inch_section() -> PavingSectionConfig {
    PavingSectionConfig {
        key: "additional_inch",
        name: "Additional Inch",
        // thickness always comes from the sheet's input field
        thickness_in: Decimal::ZERO,
        material_rounding: true,
        removal_lines: false,
        extra_labor: None,
        tiered_mobilization: false,
        flat_fees: &[],
        installation_mileage: false,
        removal_mileage: false,
        zero_area_guard: false,
    }
}

fn base_replacement_section() -> BaseDirtSectionConfig {
    BaseDirtSectionConfig {
        key: "base_replacement",
        name: "Base Replacement",
        base_thickness_in: Decimal::from(6),
        base_price_key: keys::BASE_PRICE_PER_TON,
        base_trucking_in_key: keys::BASE_TRUCKING_IN_COST_PER_TON,
        base_labor_key: keys::BASE_LABOR_COST_PER_TON,
        dirt_trucking_out_key: keys::DIRT_TRUCKING_OUT_COST_PER_TON,
        dirt_labor_key: keys::DIRT_LABOR_COST_PER_TON,
    }
}

fn driveway_section() -> DrivewaySectionConfig {
    DrivewaySectionConfig {
        key: "driveway",
        name: "Driveway Widening Add On",
        material_rounding: true,
        base_price_key: keys::BASE_PRICE_PER_TON,
        base_trucking_in_key: keys::BASE_TRUCKING_IN_COST_PER_TON,
        base_labor_key: keys::BASE_LABOR_COST_PER_TON,
        dirt_trucking_out_key: keys::DIRT_TRUCKING_OUT_COST_PER_TON,
        dirt_labor_key: keys::DIRT_LABOR_COST_PER_TON,
    }
}

/// Raw measurements for a Remove & Replace estimate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveReplaceInputs {
    pub asphalt_area_sq_ft: Decimal,
    pub asphalt_additional_tons: Decimal,
    pub distance_miles: Decimal,

    pub additional_inch_area_sq_ft: Decimal,
    pub additional_inch_thickness_in: Decimal,
    pub additional_inch_tons: Decimal,

    pub base_area_sq_ft: Decimal,
    pub base_additional_tons: Decimal,

    pub driveway_area_sq_ft: Decimal,
    pub driveway_additional_asphalt_tons: Decimal,
    pub driveway_additional_base_tons: Decimal,
    pub only_asphalt_added: YesNo,

    pub commission_amount: Decimal,
}

impl RemoveReplaceInputs {
    /// Builds inputs from a flat record of raw text-entry values, parsing
    /// every numeric field fail-soft.
    pub fn from_record(record: &BTreeMap<String, String>) -> Self {
        Self {
            asphalt_area_sq_ft: record_field(record, "asphaltArea"),
            asphalt_additional_tons: record_field(record, "asphaltAdditional"),
            distance_miles: record_field(record, "distance"),
            additional_inch_area_sq_ft: record_field(record, "additionalInchArea"),
            additional_inch_thickness_in: record_field(record, "additionalInchThickness"),
            additional_inch_tons: record_field(record, "additionalInchAsphalt"),
            base_area_sq_ft: record_field(record, "baseArea"),
            base_additional_tons: record_field(record, "baseAdditional"),
            driveway_area_sq_ft: record_field(record, "drivewayArea"),
            driveway_additional_asphalt_tons: record_field(record, "drivewayAdditionalAsphalt"),
            driveway_additional_base_tons: record_field(record, "drivewayAdditionalBase"),
            only_asphalt_added: record_yes_no(record, "onlyAsphaltAdded"),
            commission_amount: record_field(record, "commissionAmount"),
        }
    }
}

/// A computed Remove & Replace quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoveReplaceQuote {
    pub asphalt: SectionResult,
    pub additional_inch: SectionResult,
    pub base_replacement: SectionResult,
    pub driveway: SectionResult,
    pub commission_amount: Decimal,
    pub grand_total: Decimal,
}

impl RemoveReplaceQuote {
    pub fn sections(&self) -> [&SectionResult; 4] {
        [
            &self.asphalt,
            &self.additional_inch,
            &self.base_replacement,
            &self.driveway,
        ]
    }

    /// Flattens the quote to the named decimal-string output record.
    pub fn to_record(&self) -> BTreeMap<String, String> {
        format::quote_record(&self.sections(), self.commission_amount, self.grand_total)
    }
}

/// Calculator for the Remove & Replace estimate.
#[derive(Debug, Clone)]
pub struct RemoveReplaceEstimator<'a> {
    rates: &'a RateConfig,
}

impl<'a> RemoveReplaceEstimator<'a> {
    pub fn new(rates: &'a RateConfig) -> Self {
        Self { rates }
    }

    pub fn calculate(&self, inputs: &RemoveReplaceInputs) -> RemoveReplaceQuote {
        let asphalt = asphalt_section().calculate(
            self.rates,
            &PavingSectionInput {
                area_sq_ft: inputs.asphalt_area_sq_ft,
                thickness_in: None,
                additional_tons: inputs.asphalt_additional_tons,
                distance_miles: inputs.distance_miles,
            },
        );

        let additional_inch = additional_inch_section().calculate(
            self.rates,
            &PavingSectionInput {
                area_sq_ft: inputs.additional_inch_area_sq_ft,
                thickness_in: Some(inputs.additional_inch_thickness_in),
                additional_tons: inputs.additional_inch_tons,
                distance_miles: Decimal::ZERO,
            },
        );

        let base_replacement = base_replacement_section().calculate(
            self.rates,
            &BaseDirtSectionInput {
                area_sq_ft: inputs.base_area_sq_ft,
                additional_base_tons: inputs.base_additional_tons,
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

        let grand_total = asphalt.total
            + additional_inch.total
            + base_replacement.total
            + driveway.total
            + inputs.commission_amount;

        RemoveReplaceQuote {
            asphalt,
            additional_inch,
            base_replacement,
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
        RateConfig::defaults(JobType::RemoveReplace)
    }

    #[test]
    fn empty_inputs_quote_nothing() {
        let rates = rates();
        let quote = RemoveReplaceEstimator::new(&rates).calculate(&RemoveReplaceInputs::default());

        assert_eq!(quote.asphalt.total, dec!(0));
        assert_eq!(quote.additional_inch.total, dec!(0));
        assert_eq!(quote.base_replacement.total, dec!(0));
        assert_eq!(quote.driveway.total, dec!(0));
        assert_eq!(quote.grand_total, dec!(0));
    }

    #[test]
    fn asphalt_section_with_defaults_at_thousand_square_feet() {
        let rates = rates();
        let inputs = RemoveReplaceInputs {
            asphalt_area_sq_ft: dec!(1000),
            ..Default::default()
        };

        let quote = RemoveReplaceEstimator::new(&rates).calculate(&inputs);

        // 20 final tons: 2000 + 200 + 1000 + 500 + 300 + 760 + 200 flat
        assert_eq!(quote.asphalt.total, dec!(4960));
        assert_eq!(quote.grand_total, dec!(4960));
    }

    #[test]
    fn additional_inch_material_cost_rounds_up_to_hundred() {
        let mut rates = rates();
        rates.set(keys::PRICE_PER_TON, dec!(97));
        let inputs = RemoveReplaceInputs {
            additional_inch_area_sq_ft: dec!(1000),
            additional_inch_thickness_in: dec!(1),
            ..Default::default()
        };

        let quote = RemoveReplaceEstimator::new(&rates).calculate(&inputs);

        // 7 final tons at $97 = $679, quoted as $700
        assert_eq!(quote.additional_inch.line("asphalt_cost"), Some(dec!(700)));
        assert_eq!(
            quote.additional_inch.total,
            dec!(700) + dec!(70) + dec!(350)
        );
    }

    #[test]
    fn base_replacement_is_not_zero_area_guarded() {
        let rates = rates();
        let inputs = RemoveReplaceInputs {
            base_area_sq_ft: dec!(0),
            base_additional_tons: dec!(10),
            ..Default::default()
        };

        let quote = RemoveReplaceEstimator::new(&rates).calculate(&inputs);

        // manual base tonnage still prices even with no area
        // ceil(10 * 1.05) = 11 tons: 187 + 110 + 165
        assert_eq!(quote.base_replacement.total, dec!(462));
    }

    #[test]
    fn driveway_fee_applies_without_area() {
        let rates = rates();
        let inputs = RemoveReplaceInputs {
            only_asphalt_added: YesNo::Yes,
            ..Default::default()
        };

        let quote = RemoveReplaceEstimator::new(&rates).calculate(&inputs);

        assert_eq!(quote.driveway.total, dec!(750));
        assert_eq!(quote.grand_total, dec!(750));
    }

    #[test]
    fn zero_asphalt_area_suppresses_flat_fees() {
        let rates = rates();
        let inputs = RemoveReplaceInputs {
            asphalt_area_sq_ft: dec!(0),
            distance_miles: dec!(25),
            ..Default::default()
        };

        let quote = RemoveReplaceEstimator::new(&rates).calculate(&inputs);

        // mileage and mobilization lines exist but the guard zeroes the total
        assert_eq!(quote.asphalt.line("installation_mileage_cost"), Some(dec!(300)));
        assert_eq!(quote.asphalt.total, dec!(0));
    }

    #[test]
    fn grand_total_adds_commission() {
        let rates = rates();
        let inputs = RemoveReplaceInputs {
            asphalt_area_sq_ft: dec!(1000),
            commission_amount: dec!(150),
            ..Default::default()
        };

        let quote = RemoveReplaceEstimator::new(&rates).calculate(&inputs);

        assert_eq!(quote.grand_total, dec!(5110));
    }

    #[test]
    fn from_record_parses_fail_soft() {
        let mut record = BTreeMap::new();
        record.insert("asphaltArea".to_string(), "1000".to_string());
        record.insert("distance".to_string(), "abc".to_string());
        record.insert("onlyAsphaltAdded".to_string(), "Yes".to_string());
        record.insert("commissionAmount".to_string(), "".to_string());

        let inputs = RemoveReplaceInputs::from_record(&record);

        assert_eq!(inputs.asphalt_area_sq_ft, dec!(1000));
        assert_eq!(inputs.distance_miles, dec!(0));
        assert_eq!(inputs.only_asphalt_added, YesNo::Yes);
        assert_eq!(inputs.commission_amount, dec!(0));
    }

    #[test]
    fn record_output_formats_totals_with_grouping() {
        let rates = rates();
        let inputs = RemoveReplaceInputs {
            asphalt_area_sq_ft: dec!(1000),
            ..Default::default()
        };

        let record = RemoveReplaceEstimator::new(&rates).calculate(&inputs).to_record();

        assert_eq!(record.get("asphalt.total").map(String::as_str), Some("4,960.00"));
        assert_eq!(record.get("grand_total").map(String::as_str), Some("4,960.00"));
        assert_eq!(
            record.get("asphalt.asphalt_final_tons").map(String::as_str),
            Some("20")
        );
    }
}
