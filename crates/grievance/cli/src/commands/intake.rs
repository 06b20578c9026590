//! Category listing and grievance filing

use super::Desk;
use crate::error::{CliError, CliResult};
use crate::output::{print_heading, print_single, print_success, OutputFormat};
use colored::Colorize;
use grievance_engine::{Advance, GrievanceWizard};
use grievance_types::{Category, CitizenId, Session};
use serde::Serialize;

#[derive(Serialize)]
struct CategoryInfo {
    name: Category,
    label: &'static str,
    guidelines: &'static [&'static str],
}

pub fn categories(format: OutputFormat) -> CliResult<()> {
    let infos: Vec<CategoryInfo> = Category::ALL
        .iter()
        .map(|c| CategoryInfo {
            name: *c,
            label: c.label(),
            guidelines: c.guidelines(),
        })
        .collect();

    match format {
        OutputFormat::Table => {
            print_heading("Grievance Categories");
            for info in &infos {
                println!("{}", format!("Guidelines for {}", info.label).bold());
                for (i, rule) in info.guidelines.iter().enumerate() {
                    println!("  {}. {}", i + 1, rule);
                }
                println!();
            }
        }
        _ => print_single(&infos, format)?,
    }
    Ok(())
}

/// Fields gathered from the command line for `file`
pub struct FileArgs {
    pub citizen: String,
    pub category: Option<Category>,
    pub acknowledge: bool,
    pub subject: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub evidence: Vec<String>,
}

/// Drive the wizard step by step and file the result
pub fn file(desk: &Desk, args: FileArgs, format: OutputFormat) -> CliResult<()> {
    let mut wizard = GrievanceWizard::new();

    if let Some(category) = args.category {
        wizard.select_category(category)?;
    }
    wizard.advance()?;

    wizard.acknowledge_guidelines(args.acknowledge)?;
    wizard.advance()?;

    if let Some(subject) = args.subject {
        wizard.set_subject(subject)?;
    }
    if let Some(description) = args.description {
        wizard.set_description(description)?;
    }
    if let Some(location) = args.location {
        wizard.set_location(location)?;
    }
    for reference in args.evidence {
        wizard.attach_evidence(reference)?;
    }

    let submission = match wizard.advance()? {
        Advance::Submitted(submission) => submission,
        Advance::Moved(step) => {
            return Err(CliError::InvalidArgument(format!(
                "wizard stopped at the {} step",
                step
            )))
        }
    };

    let session = Session::citizen(CitizenId::new(args.citizen));
    let grievance = desk.submit(&session, submission)?;

    match format {
        OutputFormat::Table => {
            print_success(&format!(
                "Filed grievance {} ({}, priority {})",
                grievance.id(),
                grievance.category(),
                grievance.priority()
            ));
        }
        _ => print_single(&grievance, format)?,
    }
    Ok(())
}
