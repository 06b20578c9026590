//! Grievance Desk: the entry point that wires intake, lifecycle and dashboards
//!
//! The desk:
//! 1. Files accepted submissions as new Pending grievances
//! 2. Routes every status change through the [`LifecycleEngine`]
//! 3. Loads records scoped to the caller's session
//! 4. Computes dashboard snapshots over that scope
//!
//! Citizen and authority views share one code path; only the session's
//! scope differs.

use crate::{
    aggregate, FixedPriority, GrievanceStore, InMemoryGrievanceStore, LifecycleEngine, TriagePolicy,
};
use grievance_types::*;

/// Front desk for citizens and authorities
pub struct GrievanceDesk<S, T = FixedPriority> {
    lifecycle: LifecycleEngine<S>,
    triage: T,
}

impl GrievanceDesk<InMemoryGrievanceStore, FixedPriority> {
    /// A desk backed by an in-memory store, assigning the default priority
    pub fn in_memory() -> Self {
        Self::new(InMemoryGrievanceStore::new(), FixedPriority::default())
    }
}

impl<S: GrievanceStore, T: TriagePolicy> GrievanceDesk<S, T> {
    pub fn new(store: S, triage: T) -> Self {
        Self {
            lifecycle: LifecycleEngine::new(store),
            triage,
        }
    }

    pub fn lifecycle(&self) -> &LifecycleEngine<S> {
        &self.lifecycle
    }

    // ── Filing ───────────────────────────────────────────────────────

    /// File a finished submission on behalf of the session's citizen
    pub fn submit(
        &self,
        session: &Session,
        submission: GrievanceSubmission,
    ) -> GrievanceResult<Grievance> {
        let priority = self.triage.assign(&submission);
        let grievance = Grievance::new(session.citizen_id.clone(), submission, priority);
        self.lifecycle.register(&grievance)?;
        Ok(grievance)
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Records visible to the session, oldest first
    pub fn records(&self, session: &Session) -> GrievanceResult<Vec<Grievance>> {
        self.lifecycle.store().load_records(&session.scope())
    }

    /// Dashboard counts over the session's records
    pub fn dashboard(&self, session: &Session) -> GrievanceResult<AggregateSnapshot> {
        let records = self.records(session)?;
        Ok(aggregate(&records))
    }

    pub fn grievance(&self, id: &GrievanceId) -> GrievanceResult<Grievance> {
        self.lifecycle.get(id)
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    pub fn transition(
        &self,
        id: &GrievanceId,
        to: GrievanceStatus,
        actor: ActorId,
        note: Option<String>,
    ) -> GrievanceResult<Grievance> {
        self.lifecycle.transition(id, to, actor, note)
    }

    /// Status change carrying the authority's evidence references
    pub fn transition_with_evidence(
        &self,
        id: &GrievanceId,
        to: GrievanceStatus,
        actor: ActorId,
        note: Option<String>,
        evidence: Vec<String>,
    ) -> GrievanceResult<Grievance> {
        self.lifecycle.transition_with_evidence(id, to, actor, note, evidence)
    }

    pub fn mark_read(&self, id: &GrievanceId) -> GrievanceResult<Grievance> {
        self.lifecycle.mark_read(id)
    }

    pub fn assign_priority(
        &self,
        id: &GrievanceId,
        priority: Priority,
        actor: &ActorId,
    ) -> GrievanceResult<Grievance> {
        self.lifecycle.assign_priority(id, priority, actor)
    }
}
