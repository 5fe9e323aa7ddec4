use serde::{Deserialize, Serialize};

/// Two-state selector used by the conditional add-on fees.
///
/// Anything other than an exact "Yes" behaves as "No", which is how the
/// original selectors treated unset state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum YesNo {
    Yes,
    #[default]
    No,
}

impl YesNo {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Yes" => Some(Self::Yes),
            "No" => Some(Self::No),
            _ => None,
        }
    }

    pub fn is_yes(&self) -> bool {
        matches!(self, Self::Yes)
    }
}

/// Job kind selector for the soil erosion section. The two kinds bill the
/// same $400 base fee but different per-foot rates past 125 ft.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErosionKind {
    #[default]
    Erosion,
    Restoration,
}

impl ErosionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Erosion => "Erosion",
            Self::Restoration => "Restoration",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Erosion" => Some(Self::Erosion),
            "Restoration" => Some(Self::Restoration),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn yes_no_parses_exact_labels_only() {
        assert_eq!(YesNo::parse("Yes"), Some(YesNo::Yes));
        assert_eq!(YesNo::parse("No"), Some(YesNo::No));
        assert_eq!(YesNo::parse("yes"), None);
        assert_eq!(YesNo::parse(""), None);
    }

    #[test]
    fn yes_no_defaults_to_no() {
        assert_eq!(YesNo::default(), YesNo::No);
    }

    #[test]
    fn erosion_kind_parses_both_labels() {
        assert_eq!(ErosionKind::parse("Erosion"), Some(ErosionKind::Erosion));
        assert_eq!(
            ErosionKind::parse("Restoration"),
            Some(ErosionKind::Restoration)
        );
        assert_eq!(ErosionKind::parse("erosion"), None);
    }
}
