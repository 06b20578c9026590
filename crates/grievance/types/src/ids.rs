//! Identifiers for grievances and the people acting on them

use serde::{Deserialize, Serialize};

// ── Grievance Identifier ─────────────────────────────────────────────

/// Unique identifier for a grievance record
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GrievanceId(pub String);

impl GrievanceId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// First eight characters, for display
    pub fn short(&self) -> String {
        self.0.chars().take(8).collect()
    }
}

impl std::fmt::Display for GrievanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── Citizen Identifier ───────────────────────────────────────────────

/// The citizen who filed a grievance. Supplied by the identity collaborator.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CitizenId(pub String);

impl CitizenId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for CitizenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── Actor Identifier ─────────────────────────────────────────────────

/// Whoever caused a status change: an officer, a triage service, or the system itself
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorId(pub String);

impl ActorId {
    const SYSTEM: &'static str = "system";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The actor recorded on the initial `Pending` history entry
    pub fn system() -> Self {
        Self(Self::SYSTEM.to_string())
    }

    pub fn is_system(&self) -> bool {
        self.0 == Self::SYSTEM
    }
}

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grievance_id() {
        let id = GrievanceId::generate();
        assert!(!id.0.is_empty());
        assert_eq!(id.short().len(), 8);

        let named = GrievanceId::new("g-1");
        assert_eq!(format!("{}", named), "g-1");
        assert_eq!(named.short(), "g-1");
    }

    #[test]
    fn test_short_id_counts_characters() {
        let id = GrievanceId::new("ñandú-0001");
        assert_eq!(id.short(), "ñandú-00");
        assert_eq!(id.short().chars().count(), 8);
    }

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(GrievanceId::generate(), GrievanceId::generate());
    }

    #[test]
    fn test_system_actor() {
        assert!(ActorId::system().is_system());
        assert!(!ActorId::new("officer1").is_system());
        assert_eq!(ActorId::system().to_string(), "system");
    }
}
