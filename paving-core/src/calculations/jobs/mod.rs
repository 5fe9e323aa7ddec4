//! One module per estimate type. Each pairs an input struct (built
//! fail-soft from a flat record of named strings), a quote struct
//! holding the computed sections, and an estimator that composes the
//! section calculators and sums the grand total.

pub mod concrete_asphalt;
pub mod extras;
pub mod grade_pave_base;
pub mod overlay;
pub mod remove_replace;

pub use concrete_asphalt::{ConcreteAsphaltEstimator, ConcreteAsphaltInputs, ConcreteAsphaltQuote};
pub use extras::{ExtrasEstimator, ExtrasInputs, ExtrasQuote};
pub use grade_pave_base::{GradePaveBaseEstimator, GradePaveBaseInputs, GradePaveBaseQuote};
pub use overlay::{
    OverlayTransitionsEstimator, OverlayTransitionsInputs, OverlayTransitionsQuote,
};
pub use remove_replace::{RemoveReplaceEstimator, RemoveReplaceInputs, RemoveReplaceQuote};

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::calculations::common::parse_or_zero;
use crate::models::{ErosionKind, YesNo};

/// Named numeric field from a raw input record; absent fields read as
/// blank, blank and unparseable values read as zero.
pub(crate) fn record_field(record: &BTreeMap<String, String>, key: &str) -> Decimal {
    record.get(key).map(|s| parse_or_zero(s)).unwrap_or(Decimal::ZERO)
}

pub(crate) fn record_yes_no(record: &BTreeMap<String, String>, key: &str) -> YesNo {
    record
        .get(key)
        .and_then(|s| YesNo::parse(s))
        .unwrap_or_default()
}

pub(crate) fn record_erosion_kind(record: &BTreeMap<String, String>, key: &str) -> ErosionKind {
    record
        .get(key)
        .and_then(|s| ErosionKind::parse(s))
        .unwrap_or_default()
}
