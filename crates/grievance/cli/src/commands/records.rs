//! Record listings, detail view and dashboards

use super::{Desk, ScopeArgs};
use crate::error::CliResult;
use crate::output::{print_heading, print_output, print_single, OutputFormat};
use colored::Colorize;
use grievance_types::{Grievance, GrievanceId, GrievanceStatus, Priority};
use serde::Serialize;
use tabled::Tabled;

/// Grievance summary for display
#[derive(Debug, Serialize, Tabled)]
struct GrievanceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Citizen")]
    citizen: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Subject")]
    subject: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Read")]
    read: bool,
    #[tabled(rename = "Raised")]
    raised: String,
}

impl From<&Grievance> for GrievanceRow {
    fn from(g: &Grievance) -> Self {
        Self {
            id: g.id().to_string(),
            citizen: g.citizen_id().to_string(),
            category: g.category().label().to_string(),
            subject: g.subject().to_string(),
            status: g.status().label().to_string(),
            priority: g.priority().to_string(),
            read: g.is_read(),
            raised: g.date_raised().format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
struct HistoryRow {
    #[tabled(rename = "#")]
    sequence: u64,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "At")]
    at: String,
    #[tabled(rename = "By")]
    actor: String,
    #[tabled(rename = "Note")]
    note: String,
    #[tabled(rename = "Evidence")]
    evidence: String,
}

#[derive(Debug, Serialize, Tabled)]
struct CountRow {
    #[tabled(rename = "Bucket")]
    bucket: String,
    #[tabled(rename = "Count")]
    count: usize,
}

pub fn list(desk: &Desk, scope: &ScopeArgs, format: OutputFormat) -> CliResult<()> {
    let records = desk.records(&scope.session())?;
    match format {
        OutputFormat::Table => {
            let rows: Vec<GrievanceRow> = records.iter().map(GrievanceRow::from).collect();
            print_output(rows, format)?;
            if !records.is_empty() {
                println!("Total: {} grievance(s)", records.len());
            }
        }
        _ => print_single(&records, format)?,
    }
    Ok(())
}

pub fn show(desk: &Desk, id: &str, format: OutputFormat) -> CliResult<()> {
    let grievance = desk.grievance(&GrievanceId::new(id))?;

    if !matches!(format, OutputFormat::Table) {
        return print_single(&grievance, format);
    }

    print_heading(&format!("Grievance {}", grievance.id()));
    println!("  {:<12} {}", "Citizen:".bold(), grievance.citizen_id());
    println!("  {:<12} {}", "Category:".bold(), grievance.category());
    println!("  {:<12} {}", "Subject:".bold(), grievance.subject());
    println!("  {:<12} {}", "Location:".bold(), grievance.location());
    println!("  {:<12} {}", "Status:".bold(), status_colored(grievance.status()));
    println!("  {:<12} {}", "Priority:".bold(), grievance.priority());
    println!("  {:<12} {}", "Read:".bold(), grievance.is_read());
    println!("  {:<12} {} day(s)", "Age:".bold(), grievance.age_days());
    println!();
    println!("{}", grievance.description());
    if !grievance.evidence().is_empty() {
        println!();
        println!("{}", "Evidence:".bold());
        for reference in grievance.evidence() {
            println!("  - {}", reference);
        }
    }
    if let Some(note) = grievance.closing_note() {
        println!();
        println!("{} {}", "Closing note:".bold(), note);
    }
    println!();

    let history: Vec<HistoryRow> = grievance
        .status_history()
        .iter()
        .map(|change| HistoryRow {
            sequence: change.sequence,
            status: change.status.label().to_string(),
            at: change.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            actor: change.actor.to_string(),
            note: change.note.clone().unwrap_or_default(),
            evidence: change.evidence.join(", "),
        })
        .collect();
    print_output(history, format)?;

    let next = grievance.status().allowed_transitions();
    if !next.is_empty() {
        let labels: Vec<&str> = next.iter().map(|s| s.label()).collect();
        println!("{} {}", "Next:".bold(), labels.join(", "));
    }
    Ok(())
}

pub fn dashboard(desk: &Desk, scope: &ScopeArgs, format: OutputFormat) -> CliResult<()> {
    let snapshot = desk.dashboard(&scope.session())?;

    if !matches!(format, OutputFormat::Table) {
        return print_single(&snapshot, format);
    }

    print_heading("Dashboard");
    println!(
        "  Total: {}  Open: {}  Unread: {}",
        snapshot.total_count.to_string().bold(),
        snapshot.open_count().to_string().bold(),
        snapshot.unread_count.to_string().bold()
    );
    println!();

    let mut rows: Vec<CountRow> = GrievanceStatus::ALL
        .iter()
        .map(|s| CountRow {
            bucket: s.label().to_string(),
            count: snapshot.status_count(*s),
        })
        .collect();
    rows.extend(Priority::ALL.iter().map(|p| CountRow {
        bucket: format!("{} priority", p),
        count: snapshot.priority_count(*p),
    }));
    print_output(rows, format)
}

fn status_colored(status: GrievanceStatus) -> colored::ColoredString {
    match status {
        GrievanceStatus::Pending => status.label().yellow(),
        GrievanceStatus::ActionTaken => status.label().blue(),
        GrievanceStatus::Escalated => status.label().magenta(),
        GrievanceStatus::Resolved => status.label().green(),
        GrievanceStatus::Rejected => status.label().red(),
    }
}
