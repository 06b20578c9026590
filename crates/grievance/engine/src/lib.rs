//! Grievance Engine
//!
//! The engine drives grievance intake and owns every status change after
//! it. It never talks to a network or a database directly: records are
//! loaded and saved through the [`GrievanceStore`] collaborator, and
//! priorities come from a [`TriagePolicy`].
//!
//! # Architecture
//!
//! The [`GrievanceDesk`] composes specialized components:
//!
//! - [`GrievanceWizard`] - Category → Guidelines → Details intake, with a
//!   gate on every `advance`
//! - [`LifecycleEngine`] - Serialized, audited status transitions per record
//! - [`aggregate`] - Pure dashboard counts over a scoped record set
//! - [`GrievanceStore`] / [`InMemoryGrievanceStore`] - Persistence seam
//! - [`TriagePolicy`] / [`FixedPriority`] - Priority assignment seam
//!
//! # Example
//!
//! ```rust
//! use grievance_engine::{Advance, GrievanceDesk, GrievanceWizard};
//! use grievance_types::*;
//!
//! let desk = GrievanceDesk::in_memory();
//! let citizen = Session::citizen(CitizenId::new("citizen-1"));
//!
//! let mut wizard = GrievanceWizard::new();
//! wizard.select_category(Category::WaterSupply).unwrap();
//! wizard.advance().unwrap();
//! wizard.acknowledge_guidelines(true).unwrap();
//! wizard.advance().unwrap();
//! wizard.set_subject("Leak").unwrap();
//! wizard.set_description("Pipe burst on Elm St").unwrap();
//! wizard.set_location("Elm St").unwrap();
//!
//! let submission = match wizard.advance().unwrap() {
//!     Advance::Submitted(submission) => submission,
//!     Advance::Moved(step) => panic!("still at {step}"),
//! };
//! let grievance = desk.submit(&citizen, submission).unwrap();
//! assert_eq!(grievance.status(), GrievanceStatus::Pending);
//!
//! let snapshot = desk.dashboard(&citizen).unwrap();
//! assert_eq!(snapshot.total_count, 1);
//! assert_eq!(snapshot.unread_count, 1);
//! ```

#![deny(unsafe_code)]

pub mod aggregation;
pub mod desk;
pub mod lifecycle;
pub mod store;
pub mod triage;
pub mod wizard;

// Re-export main types
pub use aggregation::aggregate;
pub use desk::GrievanceDesk;
pub use lifecycle::LifecycleEngine;
pub use store::{GrievanceStore, InMemoryGrievanceStore};
pub use triage::{FixedPriority, TriagePolicy};
pub use wizard::{Advance, GrievanceWizard};
