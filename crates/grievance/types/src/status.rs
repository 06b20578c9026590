//! Grievance status, the transition graph between statuses, and priority

use serde::{Deserialize, Serialize};
use std::str::FromStr;

// ── Status ───────────────────────────────────────────────────────────

/// The lifecycle status of a grievance
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum GrievanceStatus {
    /// Filed, awaiting an authority
    #[default]
    Pending,
    /// An authority has acted on it
    ActionTaken,
    /// Closed as fixed
    Resolved,
    /// Closed as invalid or duplicate
    Rejected,
    /// Raised to a higher authority
    Escalated,
}

impl GrievanceStatus {
    pub const ALL: [GrievanceStatus; 5] = [
        GrievanceStatus::Pending,
        GrievanceStatus::ActionTaken,
        GrievanceStatus::Resolved,
        GrievanceStatus::Rejected,
        GrievanceStatus::Escalated,
    ];

    /// Statuses directly reachable from this one
    pub fn allowed_transitions(&self) -> &'static [GrievanceStatus] {
        use GrievanceStatus::*;
        match self {
            Pending => &[ActionTaken, Rejected],
            ActionTaken => &[Resolved, Escalated],
            Escalated => &[ActionTaken, Resolved],
            Resolved | Rejected => &[],
        }
    }

    pub fn can_transition_to(&self, to: GrievanceStatus) -> bool {
        self.allowed_transitions().contains(&to)
    }

    /// Resolved and Rejected admit no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Resolved | Self::Rejected)
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::ActionTaken => "Action Taken",
            Self::Resolved => "Resolved",
            Self::Rejected => "Rejected",
            Self::Escalated => "Escalated",
        }
    }
}

impl std::fmt::Display for GrievanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Returned when a string names no known status or priority
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown {kind}: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Lowercase and drop separators so "Action Taken", "action-taken"
/// and "ActionTaken" compare equal.
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl FromStr for GrievanceStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Self::ALL
            .into_iter()
            .find(|status| normalize(status.label()) == wanted)
            .ok_or_else(|| UnknownVariant {
                kind: "status",
                value: s.to_string(),
            })
    }
}

// ── Priority ─────────────────────────────────────────────────────────

/// Urgency assigned by triage
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Priority {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Self::ALL
            .into_iter()
            .find(|p| normalize(p.label()) == wanted)
            .ok_or_else(|| UnknownVariant {
                kind: "priority",
                value: s.to_string(),
            })
    }
}
