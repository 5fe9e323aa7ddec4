use std::fmt;

use serde::{Deserialize, Serialize};

/// The five estimate types the calculator supports.
///
/// Each job type owns one persistent configuration slot; the slot key is
/// the storage-level identifier the original device records used, kept
/// stable so existing saved configurations remain readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobType {
    RemoveReplace,
    OverlayTransitions,
    ConcreteAsphalt,
    GradePaveBase,
    Extras,
}

impl JobType {
    pub const ALL: [JobType; 5] = [
        Self::RemoveReplace,
        Self::OverlayTransitions,
        Self::ConcreteAsphalt,
        Self::GradePaveBase,
        Self::Extras,
    ];

    /// Stable slug used in CSV rate sheets and command-line arguments.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RemoveReplace => "remove-replace",
            Self::OverlayTransitions => "overlay-transitions",
            Self::ConcreteAsphalt => "concrete-asphalt",
            Self::GradePaveBase => "grade-pave-base",
            Self::Extras => "extras",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "remove-replace" => Some(Self::RemoveReplace),
            "overlay-transitions" => Some(Self::OverlayTransitions),
            "concrete-asphalt" => Some(Self::ConcreteAsphalt),
            "grade-pave-base" => Some(Self::GradePaveBase),
            "extras" => Some(Self::Extras),
            _ => None,
        }
    }

    /// Key of the persistent key-value slot holding this job type's rates.
    pub fn slot_key(&self) -> &'static str {
        match self {
            Self::RemoveReplace => "removeReplaceDefaults",
            Self::OverlayTransitions => "overlayTransitionsDefaults",
            Self::ConcreteAsphalt => "concreteAsphaltDefaults",
            Self::GradePaveBase => "gradePaveBaseDefaults",
            Self::Extras => "extrasDefaultValues",
        }
    }

    pub fn from_slot_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|jt| jt.slot_key() == key)
    }

    /// Human-readable title, matching the estimate sheet headings.
    pub fn title(&self) -> &'static str {
        match self {
            Self::RemoveReplace => "Remove & Replace",
            Self::OverlayTransitions => "Overlay & Transitions",
            Self::ConcreteAsphalt => "Concrete Out / Asphalt In",
            Self::GradePaveBase => "Grade, Pave & Base Replacement",
            Self::Extras => "Extras",
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
