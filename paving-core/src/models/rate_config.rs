use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::JobType;

/// Serialized form of a configuration slot: a flat record of named
/// decimal strings. This is the persistence and interchange format;
/// round-tripping a record through a store must preserve it
/// field-for-field.
pub type RateRecord = BTreeMap<String, String>;

/// Names of the user-editable rates and fees, shared between the default
/// tables, the calculators, and the persisted records.
pub mod keys {
    pub const PRICE_PER_TON: &str = "pricePerTon";
    pub const TRUCKING_IN_COST_PER_TON: &str = "truckingInCostPerTon";
    pub const TRUCKING_OUT_COST_PER_TON: &str = "truckingOutCostPerTon";
    pub const REMOVAL_LABOR_COST_PER_TON: &str = "removalLaborCostPerTon";
    pub const FLAT_RATE_MOBILIZATION_FEE: &str = "flatRateMobilizationFee";

    pub const BASE_PRICE_PER_TON: &str = "basePricePerTon";
    pub const BASE_TRUCKING_IN_COST_PER_TON: &str = "baseTruckingInCostPerTon";
    pub const BASE_LABOR_COST_PER_TON: &str = "baseLaborCostPerTon";

    pub const DIRT_EXCAVATION_THICKNESS: &str = "dirtExcavationThickness";
    pub const DIRT_TRUCKING_OUT_COST_PER_TON: &str = "dirtTruckingOutCostPerTon";
    pub const DIRT_LABOR_COST_PER_TON: &str = "dirtLaborCostPerTon";

    pub const GRADE_LABOR_COST_PER_TON: &str = "gradeLaborCostPerTon";
    pub const TACK_COAT_FEE: &str = "tackCoatFee";
    pub const PREPARATION_FEE: &str = "preparationFee";
    pub const TRANSITION_FLAT_RATE_MOBILIZATION_FEE: &str = "transitionFlatRateMobilizationFee";

    pub const DRIVEWAY_BASE_PRICE_PER_TON: &str = "drivewayBasePricePerTon";
    pub const DRIVEWAY_BASE_LABOR_COST_PER_TON: &str = "drivewayBaseLaborCostPerTon";

    pub const PVC_COST_PER_FOOT: &str = "pvcCostPerFoot";
    pub const PVC_LABOR_COST_PER_FOOT: &str = "pvcLaborCostPerFoot";
    pub const DOWN_SPOUT_SETUP_COST: &str = "downSpoutSetupCost";
    pub const MATERIAL_DELIVERY_COST: &str = "materialDeliveryCost";
    pub const DOWN_SPOUT_LABOR_COST: &str = "downSpoutLaborCost";
    pub const CULVERT_COST: &str = "culvertCost";
    pub const ADDITIONAL_COST_PER_FOOT: &str = "additionalCostPerFoot";
    pub const CULVERT_LABOR_COST: &str = "culvertLaborCost";
    pub const CULVERT_DELIVERY_COST: &str = "culvertDeliveryCost";
    pub const SOIL_EROSION_RATE: &str = "soilErosionRate";
    pub const SOIL_RESTORATION_RATE: &str = "soilRestorationRate";
}

/// A job type's named rates and fees.
///
/// Reads never fail: a key that is absent (or was unparseable in the
/// source record) reads as zero at the point of use. Values are only
/// replaced wholesale, either by the built-in defaults or by merging a
/// loaded record over them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateConfig {
    rates: BTreeMap<String, Decimal>,
}

impl RateConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in defaults for a job type, covering every key its
    /// calculators read.
    pub fn defaults(job_type: JobType) -> Self {
        let table: &[(&str, i64)] = match job_type {
            JobType::RemoveReplace => &[
                (keys::PRICE_PER_TON, 100),
                (keys::TRUCKING_IN_COST_PER_TON, 10),
                (keys::TRUCKING_OUT_COST_PER_TON, 15),
                (keys::REMOVAL_LABOR_COST_PER_TON, 38),
                (keys::FLAT_RATE_MOBILIZATION_FEE, 200),
                (keys::BASE_PRICE_PER_TON, 17),
                (keys::BASE_TRUCKING_IN_COST_PER_TON, 10),
                (keys::BASE_LABOR_COST_PER_TON, 15),
                (keys::DIRT_EXCAVATION_THICKNESS, 6),
                (keys::DIRT_TRUCKING_OUT_COST_PER_TON, 15),
                (keys::DIRT_LABOR_COST_PER_TON, 38),
            ],
            JobType::OverlayTransitions => &[
                (keys::PRICE_PER_TON, 100),
                (keys::TRUCKING_IN_COST_PER_TON, 10),
                (keys::TRUCKING_OUT_COST_PER_TON, 15),
                (keys::REMOVAL_LABOR_COST_PER_TON, 38),
                (keys::FLAT_RATE_MOBILIZATION_FEE, 200),
                (keys::TACK_COAT_FEE, 100),
                (keys::PREPARATION_FEE, 200),
                (keys::TRANSITION_FLAT_RATE_MOBILIZATION_FEE, 100),
                (keys::DRIVEWAY_BASE_PRICE_PER_TON, 17),
                (keys::DRIVEWAY_BASE_LABOR_COST_PER_TON, 15),
            ],
            JobType::ConcreteAsphalt => &[
                (keys::PRICE_PER_TON, 100),
                (keys::TRUCKING_IN_COST_PER_TON, 10),
                (keys::TRUCKING_OUT_COST_PER_TON, 15),
                (keys::REMOVAL_LABOR_COST_PER_TON, 38),
                (keys::FLAT_RATE_MOBILIZATION_FEE, 200),
                (keys::BASE_PRICE_PER_TON, 17),
                (keys::BASE_LABOR_COST_PER_TON, 15),
            ],
            JobType::GradePaveBase => &[
                (keys::PRICE_PER_TON, 100),
                (keys::TRUCKING_IN_COST_PER_TON, 10),
                (keys::TRUCKING_OUT_COST_PER_TON, 15),
                (keys::GRADE_LABOR_COST_PER_TON, 8),
                (keys::BASE_PRICE_PER_TON, 17),
                (keys::BASE_LABOR_COST_PER_TON, 15),
                (keys::REMOVAL_LABOR_COST_PER_TON, 38),
                (keys::FLAT_RATE_MOBILIZATION_FEE, 200),
                (keys::DIRT_EXCAVATION_THICKNESS, 6),
            ],
            JobType::Extras => &[
                (keys::PVC_COST_PER_FOOT, 10),
                (keys::PVC_LABOR_COST_PER_FOOT, 15),
                (keys::DOWN_SPOUT_SETUP_COST, 100),
                (keys::MATERIAL_DELIVERY_COST, 100),
                (keys::DOWN_SPOUT_LABOR_COST, 75),
                (keys::CULVERT_COST, 500),
                (keys::ADDITIONAL_COST_PER_FOOT, 35),
                (keys::CULVERT_LABOR_COST, 1000),
                (keys::CULVERT_DELIVERY_COST, 100),
                (keys::SOIL_EROSION_RATE, 3),
                (keys::SOIL_RESTORATION_RATE, 5),
            ],
        };

        let rates = table
            .iter()
            .map(|(key, value)| (key.to_string(), Decimal::from(*value)))
            .collect();
        Self { rates }
    }

    /// Value for `key`, or zero when the key is not present.
    pub fn rate(&self, key: &str) -> Decimal {
        self.rates.get(key).copied().unwrap_or(Decimal::ZERO)
    }

    pub fn set(&mut self, key: impl Into<String>, value: Decimal) {
        self.rates.insert(key.into(), value);
    }

    /// Overlays a string record onto this configuration. Each entry is
    /// parsed fail-soft: blank or unparseable values become zero rather
    /// than an error, matching the engine-wide input policy.
    pub fn merge_record(&mut self, record: &RateRecord) {
        for (key, value) in record {
            let parsed = value.trim().parse::<Decimal>().unwrap_or(Decimal::ZERO);
            self.rates.insert(key.clone(), parsed);
        }
    }

    pub fn from_record(record: &RateRecord) -> Self {
        let mut config = Self::new();
        config.merge_record(record);
        config
    }

    /// Serializes to the flat decimal-string record used by the stores.
    pub fn to_record(&self) -> RateRecord {
        self.rates
            .iter()
            .map(|(key, value)| (key.clone(), value.to_string()))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Decimal)> {
        self.rates.iter()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}
