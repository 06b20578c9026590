//! Error types for grievance intake and lifecycle

use crate::{DraftField, GrievanceId, GrievanceStatus, WizardStep};

/// Errors that can occur in grievance operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GrievanceError {
    #[error("Cannot leave {step} step, missing: {}", join_fields(.missing))]
    PreconditionNotMet {
        step: WizardStep,
        missing: Vec<DraftField>,
    },

    #[error("Invalid transition: cannot {operation} in {step} step")]
    InvalidStep {
        operation: &'static str,
        step: WizardStep,
    },

    #[error("Invalid transition: {from} -> {to}")]
    InvalidTransition {
        from: GrievanceStatus,
        to: GrievanceStatus,
    },

    #[error("Grievance {id} is closed ({status})")]
    TerminalState {
        id: GrievanceId,
        status: GrievanceStatus,
    },

    #[error("Grievance not found: {0}")]
    GrievanceNotFound(GrievanceId),

    #[error("Version conflict on grievance {id}: expected {expected}, found {found}")]
    VersionConflict {
        id: GrievanceId,
        expected: u64,
        found: u64,
    },

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Coarse classification of a [`GrievanceError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A wizard gate failed; re-prompt for the missing fields
    PreconditionNotMet,
    /// A step or status change the rules never allow
    InvalidTransition,
    /// The grievance is closed
    TerminalState,
    NotFound,
    Conflict,
    Storage,
}

impl GrievanceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::PreconditionNotMet { .. } => ErrorKind::PreconditionNotMet,
            Self::InvalidStep { .. } | Self::InvalidTransition { .. } => {
                ErrorKind::InvalidTransition
            }
            Self::TerminalState { .. } => ErrorKind::TerminalState,
            Self::GrievanceNotFound(_) => ErrorKind::NotFound,
            Self::VersionConflict { .. } => ErrorKind::Conflict,
            Self::Storage(_) => ErrorKind::Storage,
        }
    }

    /// Fields a failed wizard gate reported; empty for every other error
    pub fn missing_fields(&self) -> &[DraftField] {
        match self {
            Self::PreconditionNotMet { missing, .. } => missing,
            _ => &[],
        }
    }
}

fn join_fields(fields: &[DraftField]) -> String {
    fields
        .iter()
        .map(DraftField::name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type alias for grievance operations
pub type GrievanceResult<T> = Result<T, GrievanceError>;
