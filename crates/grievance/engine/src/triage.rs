//! Triage seam: who decides a new grievance's priority
//!
//! The engine stores and reports priority but never computes it.

use grievance_types::{GrievanceSubmission, Priority};

/// Assigns a priority to a grievance at filing time
pub trait TriagePolicy: Send + Sync {
    fn assign(&self, submission: &GrievanceSubmission) -> Priority;
}

/// Gives every new grievance the same priority
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FixedPriority(pub Priority);

impl TriagePolicy for FixedPriority {
    fn assign(&self, _submission: &GrievanceSubmission) -> Priority {
        self.0
    }
}
