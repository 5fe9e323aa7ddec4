//! Extras estimate: the ancillary work items quoted alongside a paving
//! job — PVC drainage piping, a culvert install, soil erosion control,
//! and a bucket of pass-through extras.
//!
//! No material take-offs here; these sections price counts, lengths, and
//! raw dollar entries directly.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::costs::line_cost;
use crate::calculations::section::{CostLine, SectionResult};
use crate::format;
use crate::models::{ErosionKind, RateConfig, YesNo, keys};

use super::{record_erosion_kind, record_field, record_yes_no};

/// Flat fee for culvert end sections when selected.
fn end_sections_fee() -> Decimal {
    Decimal::from(310)
}

/// Base fee covering the first 125 ft of erosion-control perimeter.
fn erosion_base_fee() -> Decimal {
    Decimal::from(400)
}

fn erosion_included_feet() -> Decimal {
    Decimal::from(125)
}

/// Raw measurements for an Extras estimate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtrasInputs {
    pub pvc_length_ft: Decimal,
    pub pvc_thickness_in: Decimal,

    pub culvert_needed: YesNo,
    pub end_sections_needed: YesNo,
    pub culvert_additional_feet: Decimal,

    pub perimeter_ft: Decimal,
    pub erosion_kind: ErosionKind,

    pub equipment_rental_cost: Decimal,
    pub rental_period: Decimal,
    pub catch_basin_cost: Decimal,
    pub asphalt_berm_cost: Decimal,
    pub traffic_cost: Decimal,
    pub permit_cost: Decimal,
    pub logistics_cost: Decimal,
    pub extra_cost: Decimal,

    pub commission_amount: Decimal,
}

impl ExtrasInputs {
    pub fn from_record(record: &BTreeMap<String, String>) -> Self {
        Self {
            pvc_length_ft: record_field(record, "pvcAmount"),
            pvc_thickness_in: record_field(record, "pvcThickness"),
            culvert_needed: record_yes_no(record, "culvertNeeded"),
            end_sections_needed: record_yes_no(record, "endSectionsNeeded"),
            culvert_additional_feet: record_field(record, "additionalFeet"),
            perimeter_ft: record_field(record, "perimeterMeasurement"),
            erosion_kind: record_erosion_kind(record, "erosionType"),
            equipment_rental_cost: record_field(record, "equipmentRentalCost"),
            rental_period: record_field(record, "rentalPeriod"),
            catch_basin_cost: record_field(record, "catchBasinCost"),
            asphalt_berm_cost: record_field(record, "asphaltBermCost"),
            traffic_cost: record_field(record, "trafficCost"),
            permit_cost: record_field(record, "permitCost"),
            logistics_cost: record_field(record, "logisticsCost"),
            extra_cost: record_field(record, "extraCost"),
            commission_amount: record_field(record, "commissionAmount"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtrasQuote {
    pub pvc: SectionResult,
    pub culvert: SectionResult,
    pub soil_erosion: SectionResult,
    pub additional_extras: SectionResult,
    pub commission_amount: Decimal,
    pub grand_total: Decimal,
}

impl ExtrasQuote {
    pub fn sections(&self) -> [&SectionResult; 4] {
        [
            &self.pvc,
            &self.culvert,
            &self.soil_erosion,
            &self.additional_extras,
        ]
    }

    pub fn to_record(&self) -> BTreeMap<String, String> {
        format::quote_record(&self.sections(), self.commission_amount, self.grand_total)
    }
}

/// Calculator for the Extras estimate.
#[derive(Debug, Clone)]
pub struct ExtrasEstimator<'a> {
    rates: &'a RateConfig,
}

impl<'a> ExtrasEstimator<'a> {
    pub fn new(rates: &'a RateConfig) -> Self {
        Self { rates }
    }

    pub fn calculate(&self, inputs: &ExtrasInputs) -> ExtrasQuote {
        let pvc = self.pvc_section(inputs);
        let culvert = self.culvert_section(inputs);
        let soil_erosion = self.soil_erosion_section(inputs);
        let additional_extras = self.additional_extras_section(inputs);

        let grand_total = pvc.total
            + culvert.total
            + soil_erosion.total
            + additional_extras.total
            + inputs.commission_amount;

        ExtrasQuote {
            pvc,
            culvert,
            soil_erosion,
            additional_extras,
            commission_amount: inputs.commission_amount,
            grand_total,
        }
    }

    fn pvc_section(&self, inputs: &ExtrasInputs) -> SectionResult {
        let rates = self.rates;
        let lines = vec![
            CostLine::new(
                "pvc_piping_cost",
                "PVC Piping Cost",
                line_cost(inputs.pvc_length_ft, rates.rate(keys::PVC_COST_PER_FOOT)),
            ),
            CostLine::new(
                "pvc_labor_cost",
                "PVC Labor Cost",
                line_cost(inputs.pvc_length_ft, rates.rate(keys::PVC_LABOR_COST_PER_FOOT)),
            ),
            CostLine::new(
                "down_spout_setup_cost",
                "Down Spout Setup Cost",
                rates.rate(keys::DOWN_SPOUT_SETUP_COST),
            ),
            CostLine::new(
                "material_delivery_cost",
                "Material Delivery Cost",
                rates.rate(keys::MATERIAL_DELIVERY_COST),
            ),
            CostLine::new(
                "down_spout_labor_cost",
                "Down Spout Labor Cost",
                rates.rate(keys::DOWN_SPOUT_LABOR_COST),
            ),
        ];

        // The suppression keys off the pipe *thickness* entry, not the
        // length; preserved from the original sheet.
        let total = if inputs.pvc_thickness_in.is_zero() {
            Decimal::ZERO
        } else {
            lines.iter().map(|line| line.amount).sum()
        };

        SectionResult {
            key: "pvc",
            name: "PVC Piping",
            materials: Vec::new(),
            lines,
            total,
        }
    }

    fn culvert_section(&self, inputs: &ExtrasInputs) -> SectionResult {
        let rates = self.rates;
        let end_sections = if inputs.end_sections_needed.is_yes() {
            end_sections_fee()
        } else {
            Decimal::ZERO
        };

        let lines = vec![
            CostLine::new("culvert_cost", "Culvert Cost", rates.rate(keys::CULVERT_COST)),
            CostLine::new("end_sections_cost", "End Sections Cost", end_sections),
            CostLine::new(
                "additional_feet_cost",
                "Additional Feet Cost",
                line_cost(
                    inputs.culvert_additional_feet,
                    rates.rate(keys::ADDITIONAL_COST_PER_FOOT),
                ),
            ),
            CostLine::new(
                "culvert_labor_cost",
                "Culvert Labor Cost",
                rates.rate(keys::CULVERT_LABOR_COST),
            ),
            CostLine::new(
                "culvert_delivery_cost",
                "Culvert Delivery Cost",
                rates.rate(keys::CULVERT_DELIVERY_COST),
            ),
        ];

        let total = if inputs.culvert_needed.is_yes() {
            lines.iter().map(|line| line.amount).sum()
        } else {
            Decimal::ZERO
        };

        SectionResult {
            key: "culvert",
            name: "Culvert",
            materials: Vec::new(),
            lines,
            total,
        }
    }

    fn soil_erosion_section(&self, inputs: &ExtrasInputs) -> SectionResult {
        let rates = self.rates;
        let perimeter = inputs.perimeter_ft;

        let amount = if perimeter <= Decimal::ZERO {
            Decimal::ZERO
        } else if perimeter <= erosion_included_feet() {
            erosion_base_fee()
        } else {
            let rate_key = match inputs.erosion_kind {
                ErosionKind::Erosion => keys::SOIL_EROSION_RATE,
                ErosionKind::Restoration => keys::SOIL_RESTORATION_RATE,
            };
            let extra_feet = perimeter - erosion_included_feet();
            erosion_base_fee() + extra_feet * rates.rate(rate_key)
        };

        let lines = vec![CostLine::new(
            "soil_erosion_cost",
            "Soil Erosion Cost",
            amount,
        )];

        SectionResult {
            key: "soil_erosion",
            name: "Soil Erosion",
            materials: Vec::new(),
            total: amount,
            lines,
        }
    }

    fn additional_extras_section(&self, inputs: &ExtrasInputs) -> SectionResult {
        let lines = vec![
            CostLine::new(
                "equipment_rental_cost",
                "Equipment Rental Cost",
                line_cost(inputs.equipment_rental_cost, inputs.rental_period),
            ),
            CostLine::new("catch_basin_cost", "Catch Basin Cost", inputs.catch_basin_cost),
            CostLine::new("asphalt_berm_cost", "Asphalt Berm Cost", inputs.asphalt_berm_cost),
            CostLine::new("traffic_cost", "Traffic Cost", inputs.traffic_cost),
            CostLine::new("permit_cost", "Permit Cost", inputs.permit_cost),
            CostLine::new("logistics_cost", "Logistics Cost", inputs.logistics_cost),
            CostLine::new("extra_cost", "Extra Cost", inputs.extra_cost),
        ];

        let total = lines.iter().map(|line| line.amount).sum();

        SectionResult {
            key: "additional_extras",
            name: "Additional Extras",
            materials: Vec::new(),
            lines,
            total,
        }
    }
}
