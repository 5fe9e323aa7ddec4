//! The pricing engine: quantity take-offs, cost formulas, and the
//! per-job-type estimators that compose them.
//!
//! Everything here is a pure function of a [`crate::RateConfig`] and a
//! set of measurement inputs. There is no caching and no incremental
//! update; callers recompute a whole quote whenever any input changes.

pub mod common;
pub mod costs;
pub mod jobs;
pub mod quantity;
pub mod section;

pub use jobs::{
    ConcreteAsphaltEstimator, ConcreteAsphaltInputs, ConcreteAsphaltQuote, ExtrasEstimator,
    ExtrasInputs, ExtrasQuote, GradePaveBaseEstimator, GradePaveBaseInputs, GradePaveBaseQuote,
    OverlayTransitionsEstimator, OverlayTransitionsInputs, OverlayTransitionsQuote,
    RemoveReplaceEstimator, RemoveReplaceInputs, RemoveReplaceQuote,
};
pub use quantity::{Material, MaterialQuantity};
pub use section::{CostLine, MaterialTake, SectionResult};
