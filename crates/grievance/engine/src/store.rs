//! Grievance persistence seam
//!
//! The engine loads and saves records through [`GrievanceStore`] and never
//! implements durable storage itself. Saves are optimistic: a record is
//! only written if it carries a newer version than the stored copy.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use grievance_types::{Grievance, GrievanceError, GrievanceId, GrievanceResult, Scope};
use std::sync::Arc;

/// Store for grievance records
pub trait GrievanceStore: Send + Sync {
    /// Load every record the scope admits, oldest first
    fn load_records(&self, scope: &Scope) -> GrievanceResult<Vec<Grievance>>;

    /// Load a single record
    fn load(&self, id: &GrievanceId) -> GrievanceResult<Option<Grievance>>;

    /// Insert a new record or replace a stored one.
    ///
    /// Fails with `VersionConflict` if the stored copy is at the same or a
    /// newer version.
    fn save_grievance(&self, record: &Grievance) -> GrievanceResult<()>;
}

impl<S: GrievanceStore + ?Sized> GrievanceStore for Arc<S> {
    fn load_records(&self, scope: &Scope) -> GrievanceResult<Vec<Grievance>> {
        (**self).load_records(scope)
    }

    fn load(&self, id: &GrievanceId) -> GrievanceResult<Option<Grievance>> {
        (**self).load(id)
    }

    fn save_grievance(&self, record: &Grievance) -> GrievanceResult<()> {
        (**self).save_grievance(record)
    }
}

/// Check a save against the stored version. Shared by store adapters.
pub fn check_version(stored: &Grievance, incoming: &Grievance) -> GrievanceResult<()> {
    if incoming.version() <= stored.version() {
        return Err(GrievanceError::VersionConflict {
            id: incoming.id().clone(),
            expected: stored.version() + 1,
            found: incoming.version(),
        });
    }
    Ok(())
}

/// Sort records oldest first, ties broken by id
pub fn sort_records(records: &mut [Grievance]) {
    records.sort_by(|a, b| {
        a.date_raised()
            .cmp(&b.date_raised())
            .then_with(|| a.id().cmp(b.id()))
    });
}

/// In-memory implementation for development and tests
#[derive(Debug, Default)]
pub struct InMemoryGrievanceStore {
    records: DashMap<GrievanceId, Grievance>,
}

impl InMemoryGrievanceStore {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl GrievanceStore for InMemoryGrievanceStore {
    fn load_records(&self, scope: &Scope) -> GrievanceResult<Vec<Grievance>> {
        let mut records: Vec<Grievance> = self
            .records
            .iter()
            .filter(|r| scope.admits(r.value()))
            .map(|r| r.value().clone())
            .collect();
        sort_records(&mut records);
        Ok(records)
    }

    fn load(&self, id: &GrievanceId) -> GrievanceResult<Option<Grievance>> {
        Ok(self.records.get(id).map(|r| r.value().clone()))
    }

    fn save_grievance(&self, record: &Grievance) -> GrievanceResult<()> {
        match self.records.entry(record.id().clone()) {
            Entry::Occupied(mut entry) => {
                check_version(entry.get(), record)?;
                entry.insert(record.clone());
            }
            Entry::Vacant(entry) => {
                entry.insert(record.clone());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grievance_types::*;

    fn make_record(citizen: &str) -> Grievance {
        let draft = GrievanceDraft {
            category: Some(Category::RoadsInfrastructure),
            guidelines_acknowledged: true,
            subject: "Pothole".into(),
            description: "Deep pothole near the school gate".into(),
            location: "Main Rd".into(),
            evidence: Vec::new(),
        };
        Grievance::new(
            CitizenId::new(citizen),
            draft.submission().unwrap(),
            Priority::Medium,
        )
    }

    #[test]
    fn test_save_and_load() {
        let store = InMemoryGrievanceStore::new();
        let record = make_record("c-1");
        store.save_grievance(&record).unwrap();

        let loaded = store.load(record.id()).unwrap().unwrap();
        assert_eq!(loaded, record);
        assert_eq!(store.len(), 1);
        assert!(store.load(&GrievanceId::new("missing")).unwrap().is_none());
    }

    #[test]
    fn test_load_records_by_scope() {
        let store = InMemoryGrievanceStore::new();
        store.save_grievance(&make_record("c-1")).unwrap();
        store.save_grievance(&make_record("c-1")).unwrap();
        store.save_grievance(&make_record("c-2")).unwrap();

        let mine = store
            .load_records(&Scope::Citizen(CitizenId::new("c-1")))
            .unwrap();
        assert_eq!(mine.len(), 2);
        assert_eq!(store.load_records(&Scope::All).unwrap().len(), 3);
    }

    #[test]
    fn test_stale_save_is_rejected() {
        let store = InMemoryGrievanceStore::new();
        let record = make_record("c-1");
        store.save_grievance(&record).unwrap();

        let mut first = record.clone();
        first.mark_read();
        store.save_grievance(&first).unwrap();

        // A second writer that started from the same copy
        let mut second = record.clone();
        second.set_priority(Priority::High);
        let err = store.save_grievance(&second).unwrap_err();
        assert_eq!(
            err,
            GrievanceError::VersionConflict {
                id: record.id().clone(),
                expected: 2,
                found: 1,
            }
        );

        let stored = store.load(record.id()).unwrap().unwrap();
        assert!(stored.is_read());
        assert_eq!(stored.priority(), Priority::Medium);
    }

    #[test]
    fn test_shared_store_through_arc() {
        let store = Arc::new(InMemoryGrievanceStore::new());
        let record = make_record("c-1");
        store.save_grievance(&record).unwrap();
        assert!(store.load(record.id()).unwrap().is_some());
    }
}
