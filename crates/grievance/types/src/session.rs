//! Sessions and record scoping
//!
//! The identity collaborator hands over a [`Session`]; this crate never
//! authenticates anyone. A session only decides which records a caller
//! may load and aggregate.

use crate::{CitizenId, Grievance};
use serde::{Deserialize, Serialize};

/// Role of the caller
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Role {
    #[default]
    Citizen,
    /// Authority staff triaging all grievances
    Admin,
}

/// An authenticated caller, as supplied by the identity collaborator
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub citizen_id: CitizenId,
    pub role: Role,
}

impl Session {
    pub fn citizen(citizen_id: CitizenId) -> Self {
        Self {
            citizen_id,
            role: Role::Citizen,
        }
    }

    pub fn admin(citizen_id: CitizenId) -> Self {
        Self {
            citizen_id,
            role: Role::Admin,
        }
    }

    /// Records this session may see: its own as a citizen, everything as an admin
    pub fn scope(&self) -> Scope {
        match self.role {
            Role::Citizen => Scope::Citizen(self.citizen_id.clone()),
            Role::Admin => Scope::All,
        }
    }
}

/// The subset of records a query covers
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
    /// Grievances filed by one citizen
    Citizen(CitizenId),
    /// Every grievance
    All,
}

impl Scope {
    pub fn admits(&self, grievance: &Grievance) -> bool {
        match self {
            Self::Citizen(id) => grievance.citizen_id() == id,
            Self::All => true,
        }
    }
}
