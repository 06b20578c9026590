//! Grievance records: filed complaints and their status history
//!
//! A Grievance is created from an accepted [`GrievanceSubmission`] and is
//! never deleted. Its status changes only through [`Grievance::transition`],
//! which checks the transition graph and appends to the status history,
//! so the history always has one entry per transition plus the initial
//! `Pending` entry.

use crate::{
    clean_references, ActorId, Category, CitizenId, GrievanceError, GrievanceId, GrievanceResult,
    GrievanceStatus, GrievanceSubmission, Priority,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Grievance ────────────────────────────────────────────────────────

/// A filed grievance
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grievance {
    id: GrievanceId,
    citizen_id: CitizenId,
    category: Category,
    subject: String,
    description: String,
    location: String,
    /// References the citizen attached when filing
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    evidence: Vec<String>,
    status: GrievanceStatus,
    priority: Priority,
    read: bool,
    date_raised: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    status_history: Vec<StatusChange>,
    /// Number of mutations applied since creation; used for optimistic saves
    version: u64,
}

impl Grievance {
    /// Create a Pending, unread grievance from an accepted submission
    pub fn new(citizen_id: CitizenId, submission: GrievanceSubmission, priority: Priority) -> Self {
        let now = Utc::now();
        let GrievanceSubmission {
            category,
            subject,
            description,
            location,
            evidence,
        } = submission;
        Self {
            id: GrievanceId::generate(),
            citizen_id,
            category,
            subject,
            description,
            location,
            evidence,
            status: GrievanceStatus::Pending,
            priority,
            read: false,
            date_raised: now,
            updated_at: now,
            status_history: vec![StatusChange {
                sequence: 0,
                status: GrievanceStatus::Pending,
                timestamp: now,
                actor: ActorId::system(),
                note: None,
                evidence: Vec::new(),
            }],
            version: 0,
        }
    }

    // ── Mutators ─────────────────────────────────────────────────────

    /// Move to `to`, recording who did it.
    ///
    /// Fails with `TerminalState` on a Resolved/Rejected grievance and with
    /// `InvalidTransition` if `to` is not reachable from the current status.
    pub fn transition(
        &mut self,
        to: GrievanceStatus,
        actor: ActorId,
        note: Option<String>,
    ) -> GrievanceResult<&StatusChange> {
        self.transition_with_evidence(to, actor, note, Vec::new())
    }

    /// [`transition`](Self::transition), attaching the authority's evidence
    /// references to the history entry
    pub fn transition_with_evidence(
        &mut self,
        to: GrievanceStatus,
        actor: ActorId,
        note: Option<String>,
        evidence: Vec<String>,
    ) -> GrievanceResult<&StatusChange> {
        if self.status.is_terminal() {
            return Err(GrievanceError::TerminalState {
                id: self.id.clone(),
                status: self.status,
            });
        }
        if !self.status.can_transition_to(to) {
            return Err(GrievanceError::InvalidTransition {
                from: self.status,
                to,
            });
        }

        let now = Utc::now();
        self.status = to;
        self.updated_at = now;
        self.version += 1;
        self.status_history.push(StatusChange {
            sequence: self.status_history.len() as u64,
            status: to,
            timestamp: now,
            actor,
            note: note.filter(|n| !n.trim().is_empty()),
            evidence: clean_references(&evidence),
        });
        Ok(&self.status_history[self.status_history.len() - 1])
    }

    /// Mark as read by an authority. Returns whether anything changed.
    pub fn mark_read(&mut self) -> bool {
        if self.read {
            return false;
        }
        self.read = true;
        self.updated_at = Utc::now();
        self.version += 1;
        true
    }

    /// Set the triage priority. Returns whether anything changed.
    pub fn set_priority(&mut self, priority: Priority) -> bool {
        if self.priority == priority {
            return false;
        }
        self.priority = priority;
        self.updated_at = Utc::now();
        self.version += 1;
        true
    }

    // ── Query methods ────────────────────────────────────────────────

    pub fn id(&self) -> &GrievanceId {
        &self.id
    }

    pub fn citizen_id(&self) -> &CitizenId {
        &self.citizen_id
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// Evidence attached by the citizen at filing
    pub fn evidence(&self) -> &[String] {
        &self.evidence
    }

    /// Evidence attached by authorities across all status changes, oldest first
    pub fn authority_evidence(&self) -> impl Iterator<Item = &str> {
        self.status_history
            .iter()
            .flat_map(|change| change.evidence.iter().map(String::as_str))
    }

    pub fn status(&self) -> GrievanceStatus {
        self.status
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn is_read(&self) -> bool {
        self.read
    }

    pub fn date_raised(&self) -> DateTime<Utc> {
        self.date_raised
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn status_history(&self) -> &[StatusChange] {
        &self.status_history
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Check if the grievance is closed
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// The resolution note or rejection reason, once closed
    pub fn closing_note(&self) -> Option<&str> {
        if !self.is_terminal() {
            return None;
        }
        self.status_history.last().and_then(|c| c.note.as_deref())
    }

    /// Days since the grievance was raised
    pub fn age_days(&self) -> i64 {
        Utc::now()
            .signed_duration_since(self.date_raised)
            .num_days()
    }

    /// Check the status history of a record that did not come from
    /// [`Grievance::new`], e.g. one read back from storage.
    ///
    /// The history must open with `(Pending, date_raised, system)`, number
    /// its entries from 0, follow the transition graph, end at the current
    /// status, and be covered by the version counter.
    pub fn check_integrity(&self) -> Result<(), IntegrityError> {
        let first = self
            .status_history
            .first()
            .ok_or(IntegrityError::EmptyHistory)?;
        if first.status != GrievanceStatus::Pending
            || first.timestamp != self.date_raised
            || !first.actor.is_system()
        {
            return Err(IntegrityError::BadOpening);
        }

        for (index, change) in self.status_history.iter().enumerate() {
            if change.sequence != index as u64 {
                return Err(IntegrityError::BadSequence {
                    index,
                    sequence: change.sequence,
                });
            }
        }
        for pair in self.status_history.windows(2) {
            if !pair[0].status.can_transition_to(pair[1].status) {
                return Err(IntegrityError::IllegalStep {
                    from: pair[0].status,
                    to: pair[1].status,
                });
            }
        }

        let last = self.status_history[self.status_history.len() - 1].status;
        if last != self.status {
            return Err(IntegrityError::StatusMismatch {
                status: self.status,
                last,
            });
        }

        let transitions = (self.status_history.len() - 1) as u64;
        if self.version < transitions {
            return Err(IntegrityError::VersionBehind {
                version: self.version,
                transitions,
            });
        }
        Ok(())
    }
}

/// Why a stored grievance fails [`Grievance::check_integrity`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntegrityError {
    #[error("status history is empty")]
    EmptyHistory,

    #[error("status history does not open with the system's Pending entry")]
    BadOpening,

    #[error("history entry {index} has sequence {sequence}")]
    BadSequence { index: usize, sequence: u64 },

    #[error("history steps from {from} to {to}, which the lifecycle forbids")]
    IllegalStep {
        from: GrievanceStatus,
        to: GrievanceStatus,
    },

    #[error("status is {status} but the history ends at {last}")]
    StatusMismatch {
        status: GrievanceStatus,
        last: GrievanceStatus,
    },

    #[error("version {version} is behind {transitions} recorded transitions")]
    VersionBehind { version: u64, transitions: u64 },
}

// ── Status History ───────────────────────────────────────────────────

/// One entry in a grievance's append-only status history
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    /// Position in the history, starting at 0 for the initial Pending entry
    pub sequence: u64,
    pub status: GrievanceStatus,
    pub timestamp: DateTime<Utc>,
    pub actor: ActorId,
    /// Resolution note, rejection reason, or any remark left with the change
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// References an authority attached with the change
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub evidence: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use GrievanceStatus::*;

    fn make_grievance() -> Grievance {
        Grievance::new(
            CitizenId::new("citizen-1"),
            GrievanceSubmission {
                category: Category::WaterSupply,
                subject: "Leak".into(),
                description: "Pipe burst on Elm St".into(),
                location: "Elm St".into(),
                evidence: vec!["https://photos.example/leak.jpg".into()],
            },
            Priority::High,
        )
    }

    fn officer() -> ActorId {
        ActorId::new("officer1")
    }

    #[test]
    fn test_create_grievance() {
        let g = make_grievance();
        assert_eq!(g.status(), Pending);
        assert!(!g.is_read());
        assert!(!g.is_terminal());
        assert_eq!(g.priority(), Priority::High);
        assert_eq!(g.version(), 0);

        assert_eq!(g.evidence(), ["https://photos.example/leak.jpg"]);
        assert_eq!(g.authority_evidence().count(), 0);

        let first = &g.status_history()[0];
        assert_eq!(first.status, Pending);
        assert_eq!(first.timestamp, g.date_raised());
        assert!(first.actor.is_system());
    }

    #[test]
    fn test_full_lifecycle() {
        let mut g = make_grievance();
        g.transition(ActionTaken, officer(), None).unwrap();
        g.transition(Escalated, officer(), None).unwrap();
        g.transition(ActionTaken, ActorId::new("supervisor"), None).unwrap();
        let change = g
            .transition(Resolved, officer(), Some("Pipe replaced".into()))
            .unwrap();
        assert_eq!(change.sequence, 4);

        assert!(g.is_terminal());
        assert_eq!(g.status_history().len(), 5);
        assert_eq!(g.closing_note(), Some("Pipe replaced"));
        for (i, entry) in g.status_history().iter().enumerate() {
            assert_eq!(entry.sequence, i as u64);
        }
    }

    #[test]
    fn test_reject_then_terminal() {
        let mut g = make_grievance();
        g.transition(Rejected, officer(), Some("Duplicate".into()))
            .unwrap();

        let err = g.transition(ActionTaken, officer(), None).unwrap_err();
        assert!(matches!(
            err,
            GrievanceError::TerminalState {
                status: Rejected,
                ..
            }
        ));
        assert_eq!(g.status_history().len(), 2);
        assert_eq!(g.closing_note(), Some("Duplicate"));
    }

    #[test]
    fn test_unreachable_status_is_rejected() {
        let mut g = make_grievance();
        let err = g.transition(Resolved, officer(), None).unwrap_err();
        assert_eq!(
            err,
            GrievanceError::InvalidTransition {
                from: Pending,
                to: Resolved
            }
        );
        assert_eq!(g.status(), Pending);
        assert_eq!(g.status_history().len(), 1);
        assert_eq!(g.version(), 0);
    }

    #[test]
    fn test_blank_note_is_dropped() {
        let mut g = make_grievance();
        let change = g
            .transition(ActionTaken, officer(), Some("  ".into()))
            .unwrap();
        assert!(change.note.is_none());
        assert!(g.closing_note().is_none());
    }

    #[test]
    fn test_mark_read_is_idempotent() {
        let mut g = make_grievance();
        assert!(g.mark_read());
        assert!(!g.mark_read());
        assert!(g.is_read());
        assert_eq!(g.status(), Pending);
        assert_eq!(g.version(), 1);
    }

    #[test]
    fn test_set_priority_leaves_status_alone() {
        let mut g = make_grievance();
        assert!(g.set_priority(Priority::Low));
        assert!(!g.set_priority(Priority::Low));
        assert_eq!(g.status(), Pending);
        assert_eq!(g.status_history().len(), 1);
    }

    #[test]
    fn test_serde_round_trip_keeps_history() {
        let mut g = make_grievance();
        g.transition(ActionTaken, officer(), None).unwrap();

        let json = serde_json::to_string(&g).unwrap();
        let back: Grievance = serde_json::from_str(&json).unwrap();
        assert_eq!(back, g);
        assert_eq!(back.check_integrity(), Ok(()));
    }

    #[test]
    fn test_authority_evidence_is_kept_on_history() {
        let mut g = make_grievance();
        g.transition_with_evidence(
            ActionTaken,
            officer(),
            Some("Crew dispatched".into()),
            vec!["site-visit-1.jpg".into(), " ".into()],
        )
        .unwrap();
        g.transition_with_evidence(Resolved, officer(), None, vec!["repair.jpg".into()])
            .unwrap();

        assert_eq!(g.status_history()[1].evidence, vec!["site-visit-1.jpg"]);
        assert_eq!(
            g.authority_evidence().collect::<Vec<_>>(),
            vec!["site-visit-1.jpg", "repair.jpg"]
        );
        assert_eq!(g.evidence(), ["https://photos.example/leak.jpg"]);
        assert_eq!(g.check_integrity(), Ok(()));
    }

    /// Round-trip through JSON with `edit` applied to the raw value
    fn tampered(g: &Grievance, edit: impl FnOnce(&mut serde_json::Value)) -> Grievance {
        let mut value = serde_json::to_value(g).unwrap();
        edit(&mut value);
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_integrity_rejects_tampered_history() {
        let mut g = make_grievance();
        g.transition(ActionTaken, officer(), None).unwrap();
        assert_eq!(g.check_integrity(), Ok(()));

        let emptied = tampered(&g, |v| v["status_history"] = serde_json::json!([]));
        assert_eq!(emptied.check_integrity(), Err(IntegrityError::EmptyHistory));

        let reopened = tampered(&g, |v| v["status"] = serde_json::json!("Resolved"));
        assert_eq!(
            reopened.check_integrity(),
            Err(IntegrityError::StatusMismatch {
                status: Resolved,
                last: ActionTaken
            })
        );

        let skipped = tampered(&g, |v| {
            v["status"] = serde_json::json!("Resolved");
            v["status_history"][1]["status"] = serde_json::json!("Resolved");
        });
        assert_eq!(
            skipped.check_integrity(),
            Err(IntegrityError::IllegalStep {
                from: Pending,
                to: Resolved
            })
        );

        let forged = tampered(&g, |v| {
            v["status_history"][0]["actor"] = serde_json::json!("officer9")
        });
        assert_eq!(forged.check_integrity(), Err(IntegrityError::BadOpening));

        let rewound = tampered(&g, |v| v["version"] = serde_json::json!(0));
        assert_eq!(
            rewound.check_integrity(),
            Err(IntegrityError::VersionBehind {
                version: 0,
                transitions: 1
            })
        );
    }
}
