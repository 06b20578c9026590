pub mod intake;
pub mod lifecycle;
pub mod records;

use crate::store::FileGrievanceStore;
use clap::Args;
use grievance_engine::{FixedPriority, GrievanceDesk};
use grievance_types::{CitizenId, Session};

/// Desk the commands operate on
pub type Desk = GrievanceDesk<FileGrievanceStore, FixedPriority>;

/// Whose records a query covers
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct ScopeArgs {
    /// Only this citizen's grievances
    #[arg(long)]
    pub citizen: Option<String>,

    /// Every grievance (authority view)
    #[arg(long)]
    pub admin: bool,
}

impl ScopeArgs {
    pub fn session(&self) -> Session {
        match &self.citizen {
            Some(citizen) if !self.admin => Session::citizen(CitizenId::new(citizen.clone())),
            _ => Session::admin(CitizenId::new("admin")),
        }
    }
}
