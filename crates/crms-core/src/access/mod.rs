//! Role-scoped access policy
//!
//! Every read and write goes through this module before it reaches the
//! store. Reads resolve to a [`Scope`] the store applies as a filter; writes
//! are checked against the [`Target`] record they would touch.

pub mod navigation;
pub mod policy;

pub use navigation::{navigation_for, NavItem};
pub use policy::{authorize, read_scope};

use crate::Role;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The authenticated caller of an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: Uuid,
    pub role: Role,
    pub ip_address: Option<String>,
}

impl Actor {
    pub fn new(id: Uuid, role: Role) -> Self {
        Self {
            id,
            role,
            ip_address: None,
        }
    }

    pub fn with_ip(mut self, ip_address: Option<String>) -> Self {
        self.ip_address = ip_address;
        self
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Kinds of records the policy knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    CrimeReport,
    CriminalRecord,
    Investigation,
    Account,
    AuditLog,
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resource::CrimeReport => write!(f, "crime reports"),
            Resource::CriminalRecord => write!(f, "criminal records"),
            Resource::Investigation => write!(f, "investigations"),
            Resource::Account => write!(f, "user accounts"),
            Resource::AuditLog => write!(f, "audit logs"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Create,
    Update,
    Delete,
    Assign,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Create => write!(f, "create"),
            Action::Update => write!(f, "update"),
            Action::Delete => write!(f, "delete"),
            Action::Assign => write!(f, "assign"),
        }
    }
}

/// Which rows of a table a caller may read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    All,
    ReportedBy(Uuid),
    AssignedTo(Uuid),
}

impl Scope {
    /// Narrow an existing scope to the cases assigned to `officer`. Scopes
    /// never widen: a reporter scope stays a reporter scope.
    pub fn assigned_to(self, officer: Uuid) -> Scope {
        match self {
            Scope::All => Scope::AssignedTo(officer),
            other => other,
        }
    }

    pub fn admits_report(&self, reported_by: Option<Uuid>, assigned_officer: Option<Uuid>) -> bool {
        match self {
            Scope::All => true,
            Scope::ReportedBy(id) => reported_by == Some(*id),
            Scope::AssignedTo(id) => assigned_officer == Some(*id),
        }
    }
}

/// The record a write would touch, with the ownership facts the policy needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    NewCrimeReport,
    CrimeReport {
        reported_by: Option<Uuid>,
        assigned_officer: Option<Uuid>,
    },
    CriminalRecord,
    NewInvestigation,
    Investigation {
        lead_officer: Option<Uuid>,
    },
    /// A user's own account, for self-service edits.
    Account {
        id: Uuid,
    },
    /// Account administration: creating accounts, editing other users.
    Accounts,
    AuditLog,
}

impl Target {
    pub fn resource(&self) -> Resource {
        match self {
            Target::NewCrimeReport | Target::CrimeReport { .. } => Resource::CrimeReport,
            Target::CriminalRecord => Resource::CriminalRecord,
            Target::NewInvestigation | Target::Investigation { .. } => Resource::Investigation,
            Target::Account { .. } | Target::Accounts => Resource::Account,
            Target::AuditLog => Resource::AuditLog,
        }
    }
}
