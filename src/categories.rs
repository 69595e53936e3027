use std::fmt;

use serde::{Deserialize, Serialize};

/// Population income tiers. Declaration order is the canonical ordering:
/// validation requires mean income to rise tier over tier, and receive-side
/// code treats the first tier as the representative for uniform display.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DemographicCategory {
    LowerClass,
    MiddleClass,
    UpperClass,
}

impl DemographicCategory {
    pub const ALL: [DemographicCategory; 3] = [
        DemographicCategory::LowerClass,
        DemographicCategory::MiddleClass,
        DemographicCategory::UpperClass,
    ];

    /// Key used in wire maps and error keys.
    pub fn key(self) -> &'static str {
        match self {
            DemographicCategory::LowerClass => "lower_class",
            DemographicCategory::MiddleClass => "middle_class",
            DemographicCategory::UpperClass => "upper_class",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DemographicCategory::LowerClass => "lower class",
            DemographicCategory::MiddleClass => "middle class",
            DemographicCategory::UpperClass => "upper class",
        }
    }
}

impl fmt::Display for DemographicCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Consumer-facing sectors. Declaration order matters only for the
/// first-member uniform-display convention on receive.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum IndustryCategory {
    Groceries,
    Clothing,
    Housing,
    Utilities,
    Healthcare,
    Entertainment,
}

impl IndustryCategory {
    pub const ALL: [IndustryCategory; 6] = [
        IndustryCategory::Groceries,
        IndustryCategory::Clothing,
        IndustryCategory::Housing,
        IndustryCategory::Utilities,
        IndustryCategory::Healthcare,
        IndustryCategory::Entertainment,
    ];

    pub fn key(self) -> &'static str {
        match self {
            IndustryCategory::Groceries => "groceries",
            IndustryCategory::Clothing => "clothing",
            IndustryCategory::Housing => "housing",
            IndustryCategory::Utilities => "utilities",
            IndustryCategory::Healthcare => "healthcare",
            IndustryCategory::Entertainment => "entertainment",
        }
    }

    pub fn label(self) -> &'static str {
        self.key()
    }
}

impl fmt::Display for IndustryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
