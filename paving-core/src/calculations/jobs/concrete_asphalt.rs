//! Concrete-Out / Asphalt-In estimate: demolish a concrete slab, haul
//! the spoil, and pave asphalt over fresh base.
//!
//! The main section prices an asphalt layer (3 in) and a base layer
//! (6 in) over the same area. The spoil-haul lines ("dirt" on the
//! sheet) bill against the **final base tonnage** rather than a separate
//! dirt take-off — the demolished slab leaves at the same volume the new
//! base arrives at. An additional-inch section and the driveway widening
//! add-on complete the quote.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::costs::{
    installation_labor_rate, installation_mileage, line_cost, paving_mobilization, removal_mileage,
};
use crate::calculations::quantity::Material;
use crate::calculations::section::{
    CostLine, DrivewaySectionConfig, DrivewaySectionInput, MaterialTake, PavingSectionConfig,
    PavingSectionInput, SectionResult,
};
use crate::format;
use crate::models::{RateConfig, YesNo, keys};

use super::{record_field, record_yes_no};

fn additional_inch_section() -> PavingSectionConfig {
    PavingSectionConfig {
        key: "additional_inch",
        name: "Additional Inch",
        // thickness always comes from the sheet's input field
        thickness_in: Decimal::ZERO,
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

/// Raw measurements for a Concrete-Out / Asphalt-In estimate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConcreteAsphaltInputs {
    pub area_sq_ft: Decimal,
    pub additional_asphalt_tons: Decimal,
    pub additional_base_tons: Decimal,
    pub distance_miles: Decimal,

    pub additional_inch_area_sq_ft: Decimal,
    pub additional_inch_thickness_in: Decimal,
    pub additional_inch_tons: Decimal,

    pub driveway_area_sq_ft: Decimal,
    pub driveway_additional_asphalt_tons: Decimal,
    pub driveway_additional_base_tons: Decimal,
    pub only_asphalt_added: YesNo,

    pub commission_amount: Decimal,
}

impl ConcreteAsphaltInputs {
    pub fn from_record(record: &BTreeMap<String, String>) -> Self {
        Self {
            area_sq_ft: record_field(record, "concreteArea"),
            additional_asphalt_tons: record_field(record, "concreteAdditional"),
            additional_base_tons: record_field(record, "concreteAdditionalBase"),
            distance_miles: record_field(record, "distance"),
            additional_inch_area_sq_ft: record_field(record, "additionalInchArea"),
            additional_inch_thickness_in: record_field(record, "additionalInchThickness"),
            additional_inch_tons: record_field(record, "additionalInchAsphalt"),
            driveway_area_sq_ft: record_field(record, "drivewayArea"),
            driveway_additional_asphalt_tons: record_field(record, "drivewayAdditionalAsphalt"),
            driveway_additional_base_tons: record_field(record, "drivewayAdditionalBase"),
            only_asphalt_added: record_yes_no(record, "onlyAsphaltAdded"),
            commission_amount: record_field(record, "commissionAmount"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConcreteAsphaltQuote {
    pub concrete: SectionResult,
    pub additional_inch: SectionResult,
    pub driveway: SectionResult,
    pub commission_amount: Decimal,
    pub grand_total: Decimal,
}

impl ConcreteAsphaltQuote {
    pub fn sections(&self) -> [&SectionResult; 3] {
        [&self.concrete, &self.additional_inch, &self.driveway]
    }

    pub fn to_record(&self) -> BTreeMap<String, String> {
        format::quote_record(&self.sections(), self.commission_amount, self.grand_total)
    }
}

/// Calculator for the Concrete-Out / Asphalt-In estimate.
#[derive(Debug, Clone)]
pub struct ConcreteAsphaltEstimator<'a> {
    rates: &'a RateConfig,
}

impl<'a> ConcreteAsphaltEstimator<'a> {
    pub fn new(rates: &'a RateConfig) -> Self {
        Self { rates }
    }

    pub fn calculate(&self, inputs: &ConcreteAsphaltInputs) -> ConcreteAsphaltQuote {
        let concrete = self.concrete_section(inputs);

        let additional_inch = additional_inch_section().calculate(
            self.rates,
            &PavingSectionInput {
                area_sq_ft: inputs.additional_inch_area_sq_ft,
                thickness_in: Some(inputs.additional_inch_thickness_in),
                additional_tons: inputs.additional_inch_tons,
                distance_miles: Decimal::ZERO,
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

        let grand_total =
            concrete.total + additional_inch.total + driveway.total + inputs.commission_amount;

        ConcreteAsphaltQuote {
            concrete,
            additional_inch,
            driveway,
            commission_amount: inputs.commission_amount,
            grand_total,
        }
    }

    /// The combined demolition-and-repave section.
    fn concrete_section(&self, inputs: &ConcreteAsphaltInputs) -> SectionResult {
        let rates = self.rates;
        let asphalt = Material::Asphalt.take_off(
            inputs.area_sq_ft,
            Decimal::from(3),
            inputs.additional_asphalt_tons,
        );
        let base = Material::Base.take_off(
            inputs.area_sq_ft,
            Decimal::from(6),
            inputs.additional_base_tons,
        );

        let lines = vec![
            CostLine::new(
                "asphalt_cost",
                "Asphalt Cost",
                line_cost(asphalt.final_tons, rates.rate(keys::PRICE_PER_TON)),
            ),
            CostLine::new(
                "trucking_in_cost",
                "Trucking In Cost",
                line_cost(asphalt.final_tons, rates.rate(keys::TRUCKING_IN_COST_PER_TON)),
            ),
            CostLine::new(
                "installation_labor_cost",
                "Installation Labor Cost",
                line_cost(
                    asphalt.final_tons,
                    installation_labor_rate(inputs.area_sq_ft),
                ),
            ),
            CostLine::new(
                "trucking_out_cost",
                "Trucking Out Cost",
                line_cost(asphalt.final_tons, rates.rate(keys::TRUCKING_OUT_COST_PER_TON)),
            ),
            CostLine::new(
                "removal_labor_cost",
                "Removal Labor Cost",
                line_cost(
                    asphalt.final_tons,
                    rates.rate(keys::REMOVAL_LABOR_COST_PER_TON),
                ),
            ),
            CostLine::new(
                "base_cost",
                "Base Cost",
                line_cost(base.final_tons, rates.rate(keys::BASE_PRICE_PER_TON)),
            ),
            CostLine::new(
                "base_trucking_in_cost",
                "Base Trucking In Cost",
                line_cost(base.final_tons, rates.rate(keys::TRUCKING_IN_COST_PER_TON)),
            ),
            CostLine::new(
                "base_labor_cost",
                "Base Labor Cost",
                line_cost(base.final_tons, rates.rate(keys::BASE_LABOR_COST_PER_TON)),
            ),
            // spoil haul-off bills against the base tonnage
            CostLine::new(
                "dirt_trucking_out_cost",
                "Dirt Trucking Out Cost",
                line_cost(base.final_tons, rates.rate(keys::TRUCKING_OUT_COST_PER_TON)),
            ),
            CostLine::new(
                "dirt_out_labor_cost",
                "Dirt Out Labor Cost",
                line_cost(base.final_tons, rates.rate(keys::REMOVAL_LABOR_COST_PER_TON)),
            ),
            CostLine::new(
                "flat_rate_mobilization_fee",
                "Flat Rate Mobilization Fee",
                rates.rate(keys::FLAT_RATE_MOBILIZATION_FEE),
            ),
            CostLine::new(
                "paving_mobilization_cost",
                "Paving Mobilization Cost",
                paving_mobilization(inputs.area_sq_ft),
            ),
            CostLine::new(
                "installation_mileage_cost",
                "Installation Mileage Cost",
                installation_mileage(inputs.distance_miles),
            ),
            CostLine::new(
                "removal_mileage_cost",
                "Removal Mileage Cost",
                removal_mileage(inputs.distance_miles),
            ),
        ];

        let total = if inputs.area_sq_ft.is_zero() {
            Decimal::ZERO
        } else {
            lines.iter().map(|line| line.amount).sum()
        };

        SectionResult {
            key: "concrete",
            name: "Concrete Out / Asphalt In",
            materials: vec![
                MaterialTake {
                    material: Material::Asphalt,
                    quantity: asphalt,
                },
                MaterialTake {
                    material: Material::Base,
                    quantity: base,
                },
            ],
            lines,
            total,
        }
    }
}
