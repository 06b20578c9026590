//! Grievance categories and the filing guidelines shown for them

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The department a grievance is routed to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    RoadsInfrastructure,
    Sanitation,
    WaterSupply,
    Electricity,
    Other,
}

/// Rules a citizen must accept before entering grievance details
const FILING_GUIDELINES: [&str; 4] = [
    "Ensure the issue falls under public jurisdiction.",
    "Do not raise duplicate complaints for the same issue.",
    "Provide clear photographic evidence if possible.",
    "False reporting may lead to account suspension.",
];

impl Category {
    pub const ALL: [Category; 5] = [
        Category::RoadsInfrastructure,
        Category::Sanitation,
        Category::WaterSupply,
        Category::Electricity,
        Category::Other,
    ];

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::RoadsInfrastructure => "Roads & Infrastructure",
            Self::Sanitation => "Sanitation",
            Self::WaterSupply => "Water Supply",
            Self::Electricity => "Electricity",
            Self::Other => "Other",
        }
    }

    /// Filing guidelines displayed for this category
    pub fn guidelines(&self) -> &'static [&'static str] {
        &FILING_GUIDELINES
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Returned when a string names no known category
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Accepts the label ("Water Supply") or the variant name ("WaterSupply"),
    /// case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| {
                c.label().eq_ignore_ascii_case(wanted)
                    || format!("{:?}", c).eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
