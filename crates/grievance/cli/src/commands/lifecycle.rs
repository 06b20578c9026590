//! Status transitions, read marks and triage

use super::Desk;
use crate::error::CliResult;
use crate::output::{print_single, print_success, OutputFormat};
use grievance_types::{ActorId, Grievance, GrievanceId, GrievanceStatus, Priority};

pub fn transition(
    desk: &Desk,
    id: &str,
    status: GrievanceStatus,
    actor: &str,
    note: Option<String>,
    evidence: Vec<String>,
    format: OutputFormat,
) -> CliResult<()> {
    let grievance = desk.transition_with_evidence(
        &GrievanceId::new(id),
        status,
        ActorId::new(actor),
        note,
        evidence,
    )?;
    report(
        &grievance,
        &format!("Grievance {} is now {}", grievance.id().short(), status.label()),
        format,
    )
}

pub fn mark_read(desk: &Desk, id: &str, format: OutputFormat) -> CliResult<()> {
    let grievance = desk.mark_read(&GrievanceId::new(id))?;
    report(
        &grievance,
        &format!("Grievance {} marked read", grievance.id().short()),
        format,
    )
}

pub fn prioritize(
    desk: &Desk,
    id: &str,
    priority: Priority,
    actor: &str,
    format: OutputFormat,
) -> CliResult<()> {
    let grievance =
        desk.assign_priority(&GrievanceId::new(id), priority, &ActorId::new(actor))?;
    report(
        &grievance,
        &format!("Grievance {} priority set to {}", grievance.id().short(), priority),
        format,
    )
}

fn report(grievance: &Grievance, message: &str, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Table => {
            print_success(message);
            Ok(())
        }
        _ => print_single(grievance, format),
    }
}
