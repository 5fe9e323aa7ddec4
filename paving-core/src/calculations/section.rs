//! Section calculators.
//!
//! The five estimate types repeat a small number of section shapes with
//! different thicknesses, rate keys, and fee policies. Instead of five
//! hand-copied implementations, each shape is one calculator driven by a
//! declarative config:
//!
//! * [`PavingSectionConfig`] — a single asphalt layer with optional
//!   removal lines, mobilization, flat fees, and mileage surcharges.
//!   Covers the main paving sections, the additional-inch sections, the
//!   overlay, the transition, and grade & pave.
//! * [`BaseDirtSectionConfig`] — an aggregate base layer plus a dirt
//!   excavation layer over the same area (base replacement).
//! * [`DrivewaySectionConfig`] — the three-layer driveway widening
//!   add-on with its conditional $750 mobilization fee.
//!
//! The concrete-out/asphalt-in main section and the four extras sections
//! have no second instance to share with and live in their job modules.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::calculations::common::round_up_to_hundred;
use crate::calculations::costs::{
    installation_labor_rate, installation_mileage, line_cost, paving_mobilization, removal_mileage,
};
use crate::calculations::quantity::{Material, MaterialQuantity};
use crate::models::{RateConfig, YesNo, keys};

/// Fee added to a driveway section when only the asphalt (or base)
/// portion is being added to an existing driveway.
pub fn added_portion_fee() -> Decimal {
    Decimal::from(750)
}

fn driveway_asphalt_thickness() -> Decimal {
    Decimal::from(3)
}

fn driveway_base_thickness() -> Decimal {
    Decimal::from(6)
}

fn driveway_dirt_thickness() -> Decimal {
    Decimal::from(9)
}

/// One named dollar amount within a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CostLine {
    /// Stable snake_case key used in flat output records.
    pub key: &'static str,
    /// Display label as it appears on the estimate sheet.
    pub label: &'static str,
    pub amount: Decimal,
}

impl CostLine {
    pub fn new(key: &'static str, label: &'static str, amount: Decimal) -> Self {
        Self { key, label, amount }
    }
}

/// A material layer's take-off within a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaterialTake {
    pub material: Material,
    pub quantity: MaterialQuantity,
}

/// A fully computed section: layer take-offs, named cost lines, and the
/// section total. Pure output, recomputed wholesale on every change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionResult {
    pub key: &'static str,
    pub name: &'static str,
    pub materials: Vec<MaterialTake>,
    pub lines: Vec<CostLine>,
    pub total: Decimal,
}

impl SectionResult {
    /// Builds a result, summing the lines unless `suppress_total` forces
    /// the total to zero (the zero-area guard; the lines themselves stay
    /// visible on the sheet).
    fn from_parts(
        key: &'static str,
        name: &'static str,
        materials: Vec<MaterialTake>,
        lines: Vec<CostLine>,
        suppress_total: bool,
    ) -> Self {
        let total = if suppress_total {
            Decimal::ZERO
        } else {
            lines.iter().map(|line| line.amount).sum()
        };
        Self {
            key,
            name,
            materials,
            lines,
            total,
        }
    }

    /// Amount of the line with the given key, if present.
    pub fn line(&self, key: &str) -> Option<Decimal> {
        self.lines
            .iter()
            .find(|line| line.key == key)
            .map(|line| line.amount)
    }
}

/// A flat fee line read from a named rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatFee {
    pub key: &'static str,
    pub label: &'static str,
    pub rate_key: &'static str,
}

/// An additional per-final-ton labor line (grade labor).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerTonLine {
    pub key: &'static str,
    pub label: &'static str,
    pub rate_key: &'static str,
}

/// Descriptor for a single-asphalt-layer section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PavingSectionConfig {
    pub key: &'static str,
    pub name: &'static str,
    /// Default layer thickness; overridden by a user-entered thickness
    /// where the sheet exposes one.
    pub thickness_in: Decimal,
    /// Round the material cost up to the next $100 (Remove & Replace
    /// quoting convention; the other sheets price material unrounded).
    pub material_rounding: bool,
    /// Include trucking-out and removal-labor lines.
    pub removal_lines: bool,
    pub extra_labor: Option<PerTonLine>,
    /// Include the area-tiered paving mobilization line.
    pub tiered_mobilization: bool,
    pub flat_fees: &'static [FlatFee],
    pub installation_mileage: bool,
    pub removal_mileage: bool,
    /// Force the section total to zero when the area input is zero.
    pub zero_area_guard: bool,
}

/// Inputs to a paving section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PavingSectionInput {
    pub area_sq_ft: Decimal,
    /// User-entered thickness, where the sheet has a thickness field.
    pub thickness_in: Option<Decimal>,
    pub additional_tons: Decimal,
    pub distance_miles: Decimal,
}

impl PavingSectionConfig {
    pub fn calculate(&self, rates: &RateConfig, input: &PavingSectionInput) -> SectionResult {
        let thickness = input.thickness_in.unwrap_or(self.thickness_in);
        let take = Material::Asphalt.take_off(input.area_sq_ft, thickness, input.additional_tons);
        let tons = take.final_tons;

        let material_cost = {
            let cost = line_cost(tons, rates.rate(keys::PRICE_PER_TON));
            if self.material_rounding {
                round_up_to_hundred(cost)
            } else {
                cost
            }
        };

        let mut lines = vec![
            CostLine::new("asphalt_cost", "Asphalt Cost", material_cost),
            CostLine::new(
                "trucking_in_cost",
                "Trucking In Cost",
                line_cost(tons, rates.rate(keys::TRUCKING_IN_COST_PER_TON)),
            ),
            CostLine::new(
                "installation_labor_cost",
                "Installation Labor Cost",
                line_cost(tons, installation_labor_rate(input.area_sq_ft)),
            ),
        ];

        if let Some(extra) = self.extra_labor {
            lines.push(CostLine::new(
                extra.key,
                extra.label,
                line_cost(tons, rates.rate(extra.rate_key)),
            ));
        }

        if self.tiered_mobilization {
            lines.push(CostLine::new(
                "paving_mobilization_cost",
                "Paving Mobilization Cost",
                paving_mobilization(input.area_sq_ft),
            ));
        }

        if self.removal_lines {
            lines.push(CostLine::new(
                "trucking_out_cost",
                "Trucking Out Cost",
                line_cost(tons, rates.rate(keys::TRUCKING_OUT_COST_PER_TON)),
            ));
            lines.push(CostLine::new(
                "removal_labor_cost",
                "Removal Labor Cost",
                line_cost(tons, rates.rate(keys::REMOVAL_LABOR_COST_PER_TON)),
            ));
        }

        for fee in self.flat_fees {
            lines.push(CostLine::new(fee.key, fee.label, rates.rate(fee.rate_key)));
        }

        if self.installation_mileage {
            lines.push(CostLine::new(
                "installation_mileage_cost",
                "Installation Mileage Cost",
                installation_mileage(input.distance_miles),
            ));
        }

        if self.removal_mileage {
            lines.push(CostLine::new(
                "removal_mileage_cost",
                "Removal Mileage Cost",
                removal_mileage(input.distance_miles),
            ));
        }

        let suppress = self.zero_area_guard && input.area_sq_ft.is_zero();
        SectionResult::from_parts(
            self.key,
            self.name,
            vec![MaterialTake {
                material: Material::Asphalt,
                quantity: take,
            }],
            lines,
            suppress,
        )
    }
}

/// Descriptor for a base-replacement section: an aggregate base layer
/// plus a dirt excavation layer over the same area. The dirt layer's
/// thickness comes from the configurable `dirtExcavationThickness` rate
/// and takes no manual additive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseDirtSectionConfig {
    pub key: &'static str,
    pub name: &'static str,
    pub base_thickness_in: Decimal,
    pub base_price_key: &'static str,
    pub base_trucking_in_key: &'static str,
    pub base_labor_key: &'static str,
    pub dirt_trucking_out_key: &'static str,
    pub dirt_labor_key: &'static str,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BaseDirtSectionInput {
    pub area_sq_ft: Decimal,
    pub additional_base_tons: Decimal,
}

impl BaseDirtSectionConfig {
    pub fn calculate(&self, rates: &RateConfig, input: &BaseDirtSectionInput) -> SectionResult {
        let base = Material::Base.take_off(
            input.area_sq_ft,
            self.base_thickness_in,
            input.additional_base_tons,
        );
        let dirt = Material::Dirt.take_off(
            input.area_sq_ft,
            rates.rate(keys::DIRT_EXCAVATION_THICKNESS),
            Decimal::ZERO,
        );

        let lines = vec![
            CostLine::new(
                "base_cost",
                "Base Cost",
                line_cost(base.final_tons, rates.rate(self.base_price_key)),
            ),
            CostLine::new(
                "base_trucking_in_cost",
                "Base Trucking In Cost",
                line_cost(base.final_tons, rates.rate(self.base_trucking_in_key)),
            ),
            CostLine::new(
                "base_labor_cost",
                "Base Labor Cost",
                line_cost(base.final_tons, rates.rate(self.base_labor_key)),
            ),
            CostLine::new(
                "dirt_trucking_out_cost",
                "Dirt Trucking Out Cost",
                line_cost(dirt.final_tons, rates.rate(self.dirt_trucking_out_key)),
            ),
            CostLine::new(
                "dirt_out_labor_cost",
                "Dirt Out Labor Cost",
                line_cost(dirt.final_tons, rates.rate(self.dirt_labor_key)),
            ),
        ];

        // No zero-area guard here: the sheets billed base replacement
        // flat fees never, so a zero area already yields zero lines.
        SectionResult::from_parts(
            self.key,
            self.name,
            vec![
                MaterialTake {
                    material: Material::Base,
                    quantity: base,
                },
                MaterialTake {
                    material: Material::Dirt,
                    quantity: dirt,
                },
            ],
            lines,
            false,
        )
    }
}

/// Descriptor for the driveway widening add-on: asphalt at 3 in, base at
/// 6 in, and dirt excavation at 9 in over the same area, plus a $750
/// mobilization fee when the only-portion-added selector is Yes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrivewaySectionConfig {
    pub key: &'static str,
    pub name: &'static str,
    pub material_rounding: bool,
    pub base_price_key: &'static str,
    pub base_trucking_in_key: &'static str,
    pub base_labor_key: &'static str,
    pub dirt_trucking_out_key: &'static str,
    pub dirt_labor_key: &'static str,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrivewaySectionInput {
    pub area_sq_ft: Decimal,
    pub additional_asphalt_tons: Decimal,
    pub additional_base_tons: Decimal,
    /// "Only asphalt portion added to driveway?" (or "only base" on the
    /// grade sheet); Yes triggers the added-portion mobilization fee.
    pub only_portion_added: YesNo,
}

impl DrivewaySectionConfig {
    pub fn calculate(&self, rates: &RateConfig, input: &DrivewaySectionInput) -> SectionResult {
        let asphalt = Material::Asphalt.take_off(
            input.area_sq_ft,
            driveway_asphalt_thickness(),
            input.additional_asphalt_tons,
        );
        let base = Material::Base.take_off(
            input.area_sq_ft,
            driveway_base_thickness(),
            input.additional_base_tons,
        );
        let dirt = Material::Dirt.take_off(
            input.area_sq_ft,
            driveway_dirt_thickness(),
            Decimal::ZERO,
        );

        let material_cost = {
            let cost = line_cost(asphalt.final_tons, rates.rate(keys::PRICE_PER_TON));
            if self.material_rounding {
                round_up_to_hundred(cost)
            } else {
                cost
            }
        };

        let fee = if input.only_portion_added.is_yes() {
            added_portion_fee()
        } else {
            Decimal::ZERO
        };

        let lines = vec![
            CostLine::new("asphalt_cost", "Asphalt Cost", material_cost),
            CostLine::new(
                "trucking_in_cost",
                "Asphalt Trucking In Cost",
                line_cost(asphalt.final_tons, rates.rate(keys::TRUCKING_IN_COST_PER_TON)),
            ),
            CostLine::new(
                "installation_labor_cost",
                "Installation Labor Cost",
                line_cost(asphalt.final_tons, installation_labor_rate(input.area_sq_ft)),
            ),
            CostLine::new(
                "base_cost",
                "Base Cost",
                line_cost(base.final_tons, rates.rate(self.base_price_key)),
            ),
            CostLine::new(
                "base_trucking_in_cost",
                "Base Trucking In Cost",
                line_cost(base.final_tons, rates.rate(self.base_trucking_in_key)),
            ),
            CostLine::new(
                "base_labor_cost",
                "Base Labor Cost",
                line_cost(base.final_tons, rates.rate(self.base_labor_key)),
            ),
            CostLine::new(
                "dirt_trucking_out_cost",
                "Dirt Trucking Out Cost",
                line_cost(dirt.final_tons, rates.rate(self.dirt_trucking_out_key)),
            ),
            CostLine::new(
                "dirt_out_labor_cost",
                "Dirt Out Labor Cost",
                line_cost(dirt.final_tons, rates.rate(self.dirt_labor_key)),
            ),
            CostLine::new(
                "added_portion_mobilization_fee",
                "Added Portion Mobilization Fee",
                fee,
            ),
        ];

        // Deliberately unguarded: the original sheets billed the $750
        // fee even with no driveway area entered.
        SectionResult::from_parts(
            self.key,
            self.name,
            vec![
                MaterialTake {
                    material: Material::Asphalt,
                    quantity: asphalt,
                },
                MaterialTake {
                    material: Material::Base,
                    quantity: base,
                },
                MaterialTake {
                    material: Material::Dirt,
                    quantity: dirt,
                },
            ],
            lines,
            false,
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use crate::models::JobType;

    use super::*;

    fn paving_config() -> PavingSectionConfig {
        PavingSectionConfig {
            key: "asphalt",
            name: "Asphalt Remove & Replace",
            thickness_in: dec!(3),
            material_rounding: true,
            removal_lines: true,
            extra_labor: None,
            tiered_mobilization: true,
            flat_fees: &[FlatFee {
                key: "flat_rate_mobilization_fee",
                label: "Flat Rate Mobilization Fee",
                rate_key: keys::FLAT_RATE_MOBILIZATION_FEE,
            }],
            installation_mileage: true,
            removal_mileage: true,
            zero_area_guard: true,
        }
    }

    #[test]
    fn paving_section_totals_all_lines() {
        let rates = RateConfig::defaults(JobType::RemoveReplace);
        let input = PavingSectionInput {
            area_sq_ft: dec!(1000),
            thickness_in: None,
            additional_tons: dec!(0),
            distance_miles: dec!(0),
        };

        let result = paving_config().calculate(&rates, &input);

        // 20 final tons: 2000 + 200 + 1000 + 500 + 300 + 760 + 200
        assert_eq!(result.line("asphalt_cost"), Some(dec!(2000)));
        assert_eq!(result.line("trucking_in_cost"), Some(dec!(200)));
        assert_eq!(result.line("installation_labor_cost"), Some(dec!(1000)));
        assert_eq!(result.line("paving_mobilization_cost"), Some(dec!(500)));
        assert_eq!(result.line("trucking_out_cost"), Some(dec!(300)));
        assert_eq!(result.line("removal_labor_cost"), Some(dec!(760)));
        assert_eq!(result.line("flat_rate_mobilization_fee"), Some(dec!(200)));
        assert_eq!(result.total, dec!(4960));
    }

    #[test]
    fn paving_section_material_rounding_rounds_up_to_hundred() {
        let mut rates = RateConfig::defaults(JobType::RemoveReplace);
        rates.set(keys::PRICE_PER_TON, dec!(97));
        let input = PavingSectionInput {
            area_sq_ft: dec!(1000),
            ..Default::default()
        };

        let result = paving_config().calculate(&rates, &input);

        // 20 tons at $97 = $1940, quoted as $2000
        assert_eq!(result.line("asphalt_cost"), Some(dec!(2000)));
    }

    #[test]
    fn paving_section_zero_area_guard_suppresses_total_only() {
        let rates = RateConfig::defaults(JobType::RemoveReplace);
        let input = PavingSectionInput::default();

        let result = paving_config().calculate(&rates, &input);

        // flat and tiered fees are still listed, but the total is forced to 0
        assert_eq!(result.line("paving_mobilization_cost"), Some(dec!(500)));
        assert_eq!(result.line("flat_rate_mobilization_fee"), Some(dec!(200)));
        assert_eq!(result.total, dec!(0));
    }

    #[test]
    fn paving_section_thickness_override_wins() {
        let rates = RateConfig::defaults(JobType::RemoveReplace);
        let input = PavingSectionInput {
            area_sq_ft: dec!(1000),
            thickness_in: Some(dec!(1)),
            ..Default::default()
        };

        let result = paving_config().calculate(&rates, &input);

        // 1in instead of 3in: ~6.04 tons before waste, 7 final
        assert_eq!(result.materials[0].quantity.final_tons, dec!(7));
    }

    #[test]
    fn base_dirt_section_bills_both_layers() {
        let rates = RateConfig::defaults(JobType::RemoveReplace);
        let config = BaseDirtSectionConfig {
            key: "base_replacement",
            name: "Base Replacement",
            base_thickness_in: dec!(6),
            base_price_key: keys::BASE_PRICE_PER_TON,
            base_trucking_in_key: keys::BASE_TRUCKING_IN_COST_PER_TON,
            base_labor_key: keys::BASE_LABOR_COST_PER_TON,
            dirt_trucking_out_key: keys::DIRT_TRUCKING_OUT_COST_PER_TON,
            dirt_labor_key: keys::DIRT_LABOR_COST_PER_TON,
        };
        let input = BaseDirtSectionInput {
            area_sq_ft: dec!(1000),
            additional_base_tons: dec!(0),
        };

        let result = config.calculate(&rates, &input);

        // base and dirt both land on 27 final tons at 6in
        assert_eq!(result.line("base_cost"), Some(dec!(459)));
        assert_eq!(result.line("base_trucking_in_cost"), Some(dec!(270)));
        assert_eq!(result.line("base_labor_cost"), Some(dec!(405)));
        assert_eq!(result.line("dirt_trucking_out_cost"), Some(dec!(405)));
        assert_eq!(result.line("dirt_out_labor_cost"), Some(dec!(1026)));
        assert_eq!(result.total, dec!(2565));
    }

    fn driveway_config() -> DrivewaySectionConfig {
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

    #[test]
    fn driveway_section_charges_fee_only_when_yes() {
        let rates = RateConfig::defaults(JobType::ConcreteAsphalt);
        let no = DrivewaySectionInput::default();
        let yes = DrivewaySectionInput {
            only_portion_added: YesNo::Yes,
            ..Default::default()
        };

        let without_fee = driveway_config().calculate(&rates, &no);
        let with_fee = driveway_config().calculate(&rates, &yes);

        assert_eq!(
            without_fee.line("added_portion_mobilization_fee"),
            Some(dec!(0))
        );
        assert_eq!(
            with_fee.line("added_portion_mobilization_fee"),
            Some(dec!(750))
        );
        // no zero-area guard: the fee alone makes the total
        assert_eq!(with_fee.total, dec!(750));
    }

    #[test]
    fn driveway_section_takes_three_layers() {
        let rates = RateConfig::defaults(JobType::ConcreteAsphalt);
        let input = DrivewaySectionInput {
            area_sq_ft: dec!(1000),
            ..Default::default()
        };

        let result = driveway_config().calculate(&rates, &input);

        assert_eq!(result.materials.len(), 3);
        // asphalt 3in -> 20t, base 6in -> 27t, dirt 9in -> 40t
        assert_eq!(result.materials[0].quantity.final_tons, dec!(20));
        assert_eq!(result.materials[1].quantity.final_tons, dec!(27));
        assert_eq!(result.materials[2].quantity.final_tons, dec!(40));
    }
}
