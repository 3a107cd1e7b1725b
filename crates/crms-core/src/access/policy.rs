//! The visibility and write rules for each role

use super::{Action, Actor, Resource, Scope, Target};
use crate::{CoreError, CoreResult, Role};

/// Rows of `resource` the actor may read.
///
/// Admins read everything. Officers read crime reports, criminal records and
/// investigations, but not accounts or the audit trail. Public users only
/// ever see the crime reports they filed.
pub fn read_scope(actor: &Actor, resource: Resource) -> CoreResult<Scope> {
    match (actor.role, resource) {
        (Role::Admin, _) => Ok(Scope::All),
        (Role::Officer, Resource::CrimeReport)
        | (Role::Officer, Resource::CriminalRecord)
        | (Role::Officer, Resource::Investigation) => Ok(Scope::All),
        (Role::Public, Resource::CrimeReport) => Ok(Scope::ReportedBy(actor.id)),
        (role, resource) => Err(denied(role, "read", resource)),
    }
}

/// Check that the actor may perform `action` on `target`.
pub fn authorize(actor: &Actor, action: Action, target: Target) -> CoreResult<()> {
    let allowed = match (actor.role, action, target) {
        (_, _, Target::AuditLog) => false,
        (Role::Admin, _, _) => true,

        (_, Action::Create, Target::NewCrimeReport) => true,
        (
            Role::Officer,
            Action::Update,
            Target::CrimeReport {
                assigned_officer, ..
            },
        ) => assigned_officer == Some(actor.id),
        (Role::Public, Action::Update, Target::CrimeReport { reported_by, .. }) => {
            reported_by == Some(actor.id)
        }

        (Role::Officer, Action::Update, Target::Investigation { lead_officer }) => {
            lead_officer == Some(actor.id)
        }

        (_, Action::Update, Target::Account { id }) => id == actor.id,

        _ => false,
    };

    if allowed {
        Ok(())
    } else {
        Err(denied(actor.role, &action.to_string(), target.resource()))
    }
}

/// Status, suspect links and assignments are case-handling fields that
/// only staff may change.
pub fn may_change_case_fields(actor: &Actor) -> bool {
    actor.role.is_staff()
}

fn denied(role: Role, verb: &str, resource: Resource) -> CoreError {
    CoreError::Forbidden(format!("{} users may not {} {}", role, verb, resource))
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn actor(role: Role) -> Actor {
        Actor::new(Uuid::new_v4(), role)
    }

    #[test]
    fn test_admin_reads_everything() {
        let admin = actor(Role::Admin);
        for resource in [
            Resource::CrimeReport,
            Resource::CriminalRecord,
            Resource::Investigation,
            Resource::Account,
            Resource::AuditLog,
        ] {
            assert_eq!(read_scope(&admin, resource).unwrap(), Scope::All);
        }
    }

    #[test]
    fn test_officer_read_scope() {
        let officer = actor(Role::Officer);
        assert_eq!(read_scope(&officer, Resource::CrimeReport).unwrap(), Scope::All);
        assert_eq!(read_scope(&officer, Resource::CriminalRecord).unwrap(), Scope::All);
        assert_eq!(read_scope(&officer, Resource::Investigation).unwrap(), Scope::All);
        assert!(matches!(
            read_scope(&officer, Resource::Account),
            Err(CoreError::Forbidden(_))
        ));
        assert!(read_scope(&officer, Resource::AuditLog).is_err());
    }

    #[test]
    fn test_public_only_sees_own_reports() {
        let public = actor(Role::Public);
        assert_eq!(
            read_scope(&public, Resource::CrimeReport).unwrap(),
            Scope::ReportedBy(public.id)
        );
        assert!(read_scope(&public, Resource::CriminalRecord).is_err());
        assert!(read_scope(&public, Resource::Investigation).is_err());
        assert!(read_scope(&public, Resource::Account).is_err());
    }

    #[test]
    fn test_anyone_files_reports() {
        for role in Role::ALL {
            assert!(authorize(&actor(*role), Action::Create, Target::NewCrimeReport).is_ok());
        }
    }

    #[test]
    fn test_officer_writes_only_assigned_cases() {
        let officer = actor(Role::Officer);
        let mine = Target::CrimeReport {
            reported_by: None,
            assigned_officer: Some(officer.id),
        };
        let theirs = Target::CrimeReport {
            reported_by: None,
            assigned_officer: Some(Uuid::new_v4()),
        };
        assert!(authorize(&officer, Action::Update, mine).is_ok());
        assert!(authorize(&officer, Action::Update, theirs).is_err());
        assert!(authorize(&officer, Action::Delete, mine).is_err());
        assert!(authorize(&officer, Action::Assign, mine).is_err());
    }

    #[test]
    fn test_public_edits_only_own_reports() {
        let public = actor(Role::Public);
        let own = Target::CrimeReport {
            reported_by: Some(public.id),
            assigned_officer: None,
        };
        let other = Target::CrimeReport {
            reported_by: Some(Uuid::new_v4()),
            assigned_officer: None,
        };
        assert!(authorize(&public, Action::Update, own).is_ok());
        assert!(authorize(&public, Action::Update, other).is_err());
        assert!(authorize(&public, Action::Delete, own).is_err());
        assert!(!may_change_case_fields(&public));
    }

    #[test]
    fn test_criminal_records_are_admin_only() {
        assert!(authorize(&actor(Role::Admin), Action::Create, Target::CriminalRecord).is_ok());
        assert!(authorize(&actor(Role::Officer), Action::Create, Target::CriminalRecord).is_err());
        assert!(authorize(&actor(Role::Officer), Action::Update, Target::CriminalRecord).is_err());
        assert!(authorize(&actor(Role::Public), Action::Delete, Target::CriminalRecord).is_err());
    }

    #[test]
    fn test_investigation_lead_may_update() {
        let officer = actor(Role::Officer);
        let led = Target::Investigation {
            lead_officer: Some(officer.id),
        };
        assert!(authorize(&officer, Action::Update, led).is_ok());
        assert!(authorize(&officer, Action::Create, Target::NewInvestigation).is_err());
        assert!(authorize(&officer, Action::Delete, led).is_err());
    }

    #[test]
    fn test_accounts() {
        let officer = actor(Role::Officer);
        assert!(authorize(&officer, Action::Update, Target::Account { id: officer.id }).is_ok());
        assert!(authorize(
            &officer,
            Action::Update,
            Target::Account { id: Uuid::new_v4() }
        )
        .is_err());
        assert!(authorize(&officer, Action::Create, Target::Accounts).is_err());
        assert!(authorize(&officer, Action::Update, Target::Accounts).is_err());
        assert!(authorize(&actor(Role::Admin), Action::Create, Target::Accounts).is_ok());
        assert!(authorize(&actor(Role::Admin), Action::Update, Target::Accounts).is_ok());
    }

    #[test]
    fn test_audit_log_is_never_writable() {
        for role in Role::ALL {
            assert!(authorize(&actor(*role), Action::Delete, Target::AuditLog).is_err());
        }
    }

    #[test]
    fn test_forbidden_message_names_role_and_resource() {
        let err = read_scope(&actor(Role::Public), Resource::AuditLog).unwrap_err();
        assert_eq!(err.to_string(), "Forbidden: public users may not read audit logs");
    }
}
