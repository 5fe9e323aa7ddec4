//! Grade / Pave / Base Replacement estimate: regrade, pave, and rebuild
//! failed base.
//!
//! Three sections feed the grand total: grade & pave (asphalt 3 in with
//! a grade-labor line on top of the tiered installation labor), base
//! replacement (base 6 in plus dirt excavation), and the driveway
//! widening add-on, whose conditional fee keys off an "only base added"
//! selector on this sheet.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::section::{
    BaseDirtSectionConfig, BaseDirtSectionInput, DrivewaySectionConfig, DrivewaySectionInput,
    FlatFee, PavingSectionConfig, PavingSectionInput, PerTonLine, SectionResult,
};
use crate::format;
use crate::models::{RateConfig, YesNo, keys};

use super::{record_field, record_yes_no};

const FLAT_FEES: &[FlatFee] = &[FlatFee {
    key: "flat_rate_mobilization_fee",
    label: "Flat Rate Mobilization Fee",
    rate_key: keys::FLAT_RATE_MOBILIZATION_FEE,
}];

const GRADE_LABOR: PerTonLine = PerTonLine {
    key: "grade_labor_cost",
    label: "Grade Labor Cost",
    rate_key: keys::GRADE_LABOR_COST_PER_TON,
};

fn grade_section() -> PavingSectionConfig {
    PavingSectionConfig {
        key: "grade",
        name: "Grade & Pave",
        thickness_in: Decimal::from(3),
        material_rounding: false,
        removal_lines: false,
        extra_labor: Some(GRADE_LABOR),
        tiered_mobilization: true,
        flat_fees: FLAT_FEES,
        installation_mileage: true,
        removal_mileage: true,
        zero_area_guard: true,
    }
}

fn base_replacement_section() -> BaseDirtSectionConfig {
    BaseDirtSectionConfig {
        key: "base_replacement",
        name: "Base Replacement",
        base_thickness_in: Decimal::from(6),
        base_price_key: keys::BASE_PRICE_PER_TON,
        base_trucking_in_key: keys::TRUCKING_IN_COST_PER_TON,
        base_labor_key: keys::BASE_LABOR_COST_PER_TON,
        dirt_trucking_out_key: keys::TRUCKING_OUT_COST_PER_TON,
        dirt_labor_key: keys::REMOVAL_LABOR_COST_PER_TON,
    }
}

fn driveway_section() -> DrivewaySectionConfig {
    DrivewaySectionConfig {
        key: "driveway",
        name: "Driveway Widening Add On",
        material_rounding: false,
        base_price_key: keys::BASE_PRICE_PER_TON,
        base_trucking_in_key: keys::TRUCKING_IN_COST_PER_TON,
        base_labor_key: keys::BASE_LABOR_COST_PER_TON,
        dirt_trucking_out_key: keys::TRUCKING_OUT_COST_PER_TON,
        dirt_labor_key: keys::REMOVAL_LABOR_COST_PER_TON,
    }
}

/// Raw measurements for a Grade / Pave / Base Replacement estimate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradePaveBaseInputs {
    pub grade_area_sq_ft: Decimal,
    /// The sheet labels this "Additional Base", but it feeds the grade &
    /// pave asphalt take-off; preserved as observed.
    pub grade_additional_tons: Decimal,
    pub distance_miles: Decimal,

    pub base_area_sq_ft: Decimal,
    pub base_additional_tons: Decimal,

    pub driveway_area_sq_ft: Decimal,
    pub driveway_additional_asphalt_tons: Decimal,
    pub driveway_additional_base_tons: Decimal,
    pub only_base_added: YesNo,

    pub commission_amount: Decimal,
}

impl GradePaveBaseInputs {
    pub fn from_record(record: &BTreeMap<String, String>) -> Self {
        Self {
            grade_area_sq_ft: record_field(record, "gradeArea"),
            grade_additional_tons: record_field(record, "gradeAdditionalBase"),
            distance_miles: record_field(record, "distance"),
            base_area_sq_ft: record_field(record, "baseArea"),
            base_additional_tons: record_field(record, "baseAdditional"),
            driveway_area_sq_ft: record_field(record, "drivewayArea"),
            driveway_additional_asphalt_tons: record_field(record, "drivewayAdditionalAsphalt"),
            driveway_additional_base_tons: record_field(record, "drivewayAdditionalBase"),
            only_base_added: record_yes_no(record, "onlyBaseAdded"),
            commission_amount: record_field(record, "commissionAmount"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GradePaveBaseQuote {
    pub grade: SectionResult,
    pub base_replacement: SectionResult,
    pub driveway: SectionResult,
    pub commission_amount: Decimal,
    pub grand_total: Decimal,
}

impl GradePaveBaseQuote {
    pub fn sections(&self) -> [&SectionResult; 3] {
        [&self.grade, &self.base_replacement, &self.driveway]
    }

    pub fn to_record(&self) -> BTreeMap<String, String> {
        format::quote_record(&self.sections(), self.commission_amount, self.grand_total)
    }
}

/// Calculator for the Grade / Pave / Base Replacement estimate.
#[derive(Debug, Clone)]
pub struct GradePaveBaseEstimator<'a> {
    rates: &'a RateConfig,
}

impl<'a> GradePaveBaseEstimator<'a> {
    pub fn new(rates: &'a RateConfig) -> Self {
        Self { rates }
    }

    pub fn calculate(&self, inputs: &GradePaveBaseInputs) -> GradePaveBaseQuote {
        let grade = grade_section().calculate(
            self.rates,
            &PavingSectionInput {
                area_sq_ft: inputs.grade_area_sq_ft,
                thickness_in: None,
                additional_tons: inputs.grade_additional_tons,
                distance_miles: inputs.distance_miles,
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
                only_portion_added: inputs.only_base_added,
            },
        );

        let grand_total =
            grade.total + base_replacement.total + driveway.total + inputs.commission_amount;

        GradePaveBaseQuote {
            grade,
            base_replacement,
            driveway,
            commission_amount: inputs.commission_amount,
            grand_total,
        }
    }
}
