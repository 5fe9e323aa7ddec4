//! Material take-offs: area and thickness to trucked tonnage.
//!
//! Every layered section uses the same chain: volume from area and
//! thickness, tonnage from material density, a manual additive, a 5%
//! waste allowance, and a final figure rounded up to the next whole ton
//! so material is never short on site.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const INCHES_PER_FOOT: i64 = 12;
const POUNDS_PER_SHORT_TON: i64 = 2000;

/// Waste allowance applied to every take-off: 5% of the pre-waste tonnage.
fn waste_rate() -> Decimal {
    Decimal::new(5, 2)
}

/// Materials the sections move, with their estimating densities in
/// pounds per cubic foot (compacted asphalt 145, aggregate base and
/// excavated dirt 100).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Material {
    Asphalt,
    Base,
    Dirt,
}

impl Material {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asphalt => "asphalt",
            Self::Base => "base",
            Self::Dirt => "dirt",
        }
    }

    pub fn density_lbs_per_cu_ft(&self) -> Decimal {
        match self {
            Self::Asphalt => Decimal::from(145),
            Self::Base | Self::Dirt => Decimal::from(100),
        }
    }

    /// Computes the full tonnage breakdown for one material layer.
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use paving_core::calculations::Material;
    ///
    /// let take = Material::Asphalt.take_off(dec!(1000), dec!(3), dec!(0));
    ///
    /// assert_eq!(take.volume_cu_ft, dec!(250));
    /// assert_eq!(take.base_tons, dec!(18.125));
    /// assert_eq!(take.waste_tons, dec!(0.90625));
    /// assert_eq!(take.final_tons, dec!(20));
    /// ```
    pub fn take_off(
        &self,
        area_sq_ft: Decimal,
        thickness_in: Decimal,
        additional_tons: Decimal,
    ) -> MaterialQuantity {
        let volume_cu_ft = area_sq_ft * thickness_in / Decimal::from(INCHES_PER_FOOT);
        let base_tons =
            volume_cu_ft * self.density_lbs_per_cu_ft() / Decimal::from(POUNDS_PER_SHORT_TON);
        let tons_before_waste = base_tons + additional_tons;
        let waste_tons = tons_before_waste * waste_rate();
        let final_tons = (tons_before_waste + waste_tons).ceil();

        MaterialQuantity {
            volume_cu_ft,
            base_tons,
            tons_before_waste,
            waste_tons,
            final_tons,
        }
    }
}

/// Result of a single material take-off.
///
/// `final_tons` is always a whole number of tons; it is the quantity the
/// cost lines bill against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialQuantity {
    /// Layer volume in cubic feet (`area * thickness / 12`).
    pub volume_cu_ft: Decimal,

    /// Tonnage computed from volume and density, before additives.
    pub base_tons: Decimal,

    /// Computed tonnage plus the manually entered additional tons.
    pub tons_before_waste: Decimal,

    /// The 5% waste allowance on `tons_before_waste`.
    pub waste_tons: Decimal,

    /// Tonnage to order: `ceil(tons_before_waste + waste_tons)`.
    pub final_tons: Decimal,
}
