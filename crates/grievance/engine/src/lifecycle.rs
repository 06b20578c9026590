//! Lifecycle engine: the sole owner of grievance status changes
//!
//! Every mutation runs load → apply → save under a per-record lock, so two
//! concurrent transitions on the same grievance can never both start from
//! the same status. The store's version check backs this up when several
//! engines share one store.

use crate::store::GrievanceStore;
use dashmap::DashMap;
use grievance_types::{
    ActorId, Grievance, GrievanceError, GrievanceId, GrievanceResult, GrievanceStatus, Priority,
};
use parking_lot::Mutex;
use std::sync::Arc;

/// Applies status transitions, read marks and priority changes
pub struct LifecycleEngine<S> {
    store: S,
    /// One lock per record id with a mutation in flight
    locks: DashMap<GrievanceId, Arc<Mutex<()>>>,
}

impl<S: GrievanceStore> LifecycleEngine<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            locks: DashMap::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Persist a newly created grievance
    pub fn register(&self, grievance: &Grievance) -> GrievanceResult<()> {
        self.store.save_grievance(grievance)?;
        tracing::info!(
            grievance_id = %grievance.id(),
            citizen_id = %grievance.citizen_id(),
            category = %grievance.category(),
            priority = %grievance.priority(),
            "Grievance registered"
        );
        Ok(())
    }

    /// Get a grievance by id
    pub fn get(&self, id: &GrievanceId) -> GrievanceResult<Grievance> {
        self.store
            .load(id)?
            .ok_or_else(|| GrievanceError::GrievanceNotFound(id.clone()))
    }

    /// Statuses the grievance can move to next; empty once closed
    pub fn available_transitions(&self, id: &GrievanceId) -> GrievanceResult<Vec<GrievanceStatus>> {
        Ok(self.get(id)?.status().allowed_transitions().to_vec())
    }

    /// Move a grievance to `to` on behalf of `actor`.
    ///
    /// Fails with `TerminalState` if it is already Resolved or Rejected, and
    /// with `InvalidTransition` if `to` is not reachable from its status.
    pub fn transition(
        &self,
        id: &GrievanceId,
        to: GrievanceStatus,
        actor: ActorId,
        note: Option<String>,
    ) -> GrievanceResult<Grievance> {
        self.transition_with_evidence(id, to, actor, note, Vec::new())
    }

    /// [`transition`](Self::transition) with evidence references attached
    /// to the new history entry
    pub fn transition_with_evidence(
        &self,
        id: &GrievanceId,
        to: GrievanceStatus,
        actor: ActorId,
        note: Option<String>,
        evidence: Vec<String>,
    ) -> GrievanceResult<Grievance> {
        let result = self.with_record(id, |record| {
            let from = record.status();
            let change = record.transition_with_evidence(to, actor.clone(), note, evidence)?;
            tracing::info!(
                grievance_id = %id,
                from = %from,
                to = %to,
                actor = %actor,
                evidence = change.evidence.len(),
                "Grievance status changed"
            );
            Ok(true)
        });

        if let Err(err) = &result {
            tracing::warn!(grievance_id = %id, to = %to, error = %err, "Transition refused");
        }
        result
    }

    /// Mark a grievance as read. Idempotent; never touches status.
    pub fn mark_read(&self, id: &GrievanceId) -> GrievanceResult<Grievance> {
        self.with_record(id, |record| {
            let changed = record.mark_read();
            if changed {
                tracing::debug!(grievance_id = %id, "Grievance marked read");
            }
            Ok(changed)
        })
    }

    /// Record a triage decision made after filing
    pub fn assign_priority(
        &self,
        id: &GrievanceId,
        priority: Priority,
        actor: &ActorId,
    ) -> GrievanceResult<Grievance> {
        self.with_record(id, |record| {
            let previous = record.priority();
            let changed = record.set_priority(priority);
            if changed {
                tracing::info!(
                    grievance_id = %id,
                    from = %previous,
                    to = %priority,
                    actor = %actor,
                    "Grievance priority assigned"
                );
            }
            Ok(changed)
        })
    }

    /// Run `apply` on the stored record while holding its lock, saving the
    /// result if `apply` reports a change.
    fn with_record<F>(&self, id: &GrievanceId, apply: F) -> GrievanceResult<Grievance>
    where
        F: FnOnce(&mut Grievance) -> GrievanceResult<bool>,
    {
        let lock = Arc::clone(&self.locks.entry(id.clone()).or_default());
        let result = {
            let _guard = lock.lock();
            self.apply_and_save(id, apply)
        };

        // Only the map and `lock` hold it: nobody else is waiting on this id.
        // `remove_if` and `entry` share the shard lock, so a new waiter either
        // cloned the Arc already or will insert a fresh one.
        self.locks.remove_if(id, |_, held| Arc::strong_count(held) == 2);
        result
    }

    fn apply_and_save<F>(&self, id: &GrievanceId, apply: F) -> GrievanceResult<Grievance>
    where
        F: FnOnce(&mut Grievance) -> GrievanceResult<bool>,
    {
        let mut record = self.get(id)?;
        if apply(&mut record)? {
            self.store.save_grievance(&record).map_err(|err| {
                if let GrievanceError::VersionConflict { .. } = &err {
                    tracing::warn!(grievance_id = %id, error = %err, "Concurrent update lost");
                }
                err
            })?;
        }
        Ok(record)
    }
}
