//! Dashboard aggregate snapshots
//!
//! A snapshot is derived, never stored. Both count maps always carry every
//! status and every priority, zero-filled when absent.

use crate::{GrievanceStatus, Priority};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Counts over a scoped set of grievances
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateSnapshot {
    pub total_count: usize,
    pub count_by_status: BTreeMap<GrievanceStatus, usize>,
    pub unread_count: usize,
    pub count_by_priority: BTreeMap<Priority, usize>,
}

impl AggregateSnapshot {
    /// A snapshot of nothing: every key present with a zero count
    pub fn empty() -> Self {
        Self {
            total_count: 0,
            count_by_status: GrievanceStatus::ALL.into_iter().map(|s| (s, 0)).collect(),
            unread_count: 0,
            count_by_priority: Priority::ALL.into_iter().map(|p| (p, 0)).collect(),
        }
    }

    pub fn status_count(&self, status: GrievanceStatus) -> usize {
        self.count_by_status.get(&status).copied().unwrap_or(0)
    }

    pub fn priority_count(&self, priority: Priority) -> usize {
        self.count_by_priority.get(&priority).copied().unwrap_or(0)
    }

    /// Records not yet in a terminal status
    pub fn open_count(&self) -> usize {
        self.count_by_status
            .iter()
            .filter(|(status, _)| !status.is_terminal())
            .map(|(_, count)| count)
            .sum()
    }
}

impl Default for AggregateSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_snapshot_has_all_keys() {
        let snapshot = AggregateSnapshot::empty();
        assert_eq!(snapshot.count_by_status.len(), 5);
        assert_eq!(snapshot.count_by_priority.len(), 3);
        assert!(snapshot.count_by_status.values().all(|c| *c == 0));
        assert_eq!(snapshot.open_count(), 0);
    }

    #[test]
    fn test_open_count_excludes_terminal() {
        let mut snapshot = AggregateSnapshot::empty();
        snapshot.count_by_status.insert(GrievanceStatus::Pending, 2);
        snapshot.count_by_status.insert(GrievanceStatus::Escalated, 1);
        snapshot.count_by_status.insert(GrievanceStatus::Resolved, 4);
        assert_eq!(snapshot.open_count(), 3);
        assert_eq!(snapshot.status_count(GrievanceStatus::Resolved), 4);
    }
}
