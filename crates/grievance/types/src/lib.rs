//! Grievance Domain Types
//!
//! A grievance is a citizen-filed complaint about a public service. It
//! enters the system through a three-step intake wizard and is then
//! tracked through a guarded status lifecycle until it is resolved or
//! rejected.
//!
//! # Key Concepts
//!
//! - **GrievanceDraft**: The in-progress intake form. It only becomes a
//!   [`GrievanceSubmission`] once every gate of the wizard has passed.
//! - **Grievance**: The stored record. Its status can only change through
//!   [`Grievance::transition`], which appends to an audit trail.
//! - **GrievanceStatus**: `Pending → ActionTaken → {Resolved, Escalated}`,
//!   `Pending → Rejected`, `Escalated → {ActionTaken, Resolved}`.
//!   `Resolved` and `Rejected` are terminal.
//! - **AggregateSnapshot**: Dashboard counts derived from a record set.
//! - **Scope**: Which records a session may see (own vs. all).
//!
//! # Design Principles
//!
//! 1. Gates are enforced on the data, never only in a view.
//! 2. Status history is append-only; its first entry is always `Pending`.
//! 3. The category set, status set and transition graph are constants.

#![deny(unsafe_code)]

mod category;
mod draft;
mod errors;
mod grievance;
mod ids;
mod session;
mod snapshot;
mod status;

pub use category::*;
pub use draft::*;
pub use errors::*;
pub use grievance::*;
pub use ids::*;
pub use session::*;
pub use snapshot::*;
pub use status::*;
