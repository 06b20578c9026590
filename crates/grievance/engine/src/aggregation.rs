//! Dashboard aggregation over a scoped record set
//!
//! Callers pass records already filtered to a scope (one citizen's, or all
//! of them for the authority view). Aggregation does no authorization.

use grievance_types::{AggregateSnapshot, Grievance};

/// Count records by status, read state and priority.
///
/// Pure and order-independent; status and priority maps always carry
/// every key.
pub fn aggregate<'a, I>(records: I) -> AggregateSnapshot
where
    I: IntoIterator<Item = &'a Grievance>,
{
    records
        .into_iter()
        .fold(AggregateSnapshot::empty(), |mut snapshot, record| {
            snapshot.total_count += 1;
            *snapshot.count_by_status.entry(record.status()).or_insert(0) += 1;
            *snapshot
                .count_by_priority
                .entry(record.priority())
                .or_insert(0) += 1;
            if !record.is_read() {
                snapshot.unread_count += 1;
            }
            snapshot
        })
}
