//! Sidebar entries per role

use crate::Role;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub name: &'static str,
    pub href: &'static str,
}

const ENTRIES: &[(NavItem, &[Role])] = &[
    (
        NavItem { name: "Dashboard", href: "/dashboard" },
        &[Role::Admin, Role::Officer, Role::Public],
    ),
    (
        NavItem { name: "Criminal Records", href: "/dashboard/criminal-records" },
        &[Role::Admin, Role::Officer],
    ),
    (
        NavItem { name: "Crime Reports", href: "/dashboard/crime-reports" },
        &[Role::Admin, Role::Officer, Role::Public],
    ),
    (
        NavItem { name: "Investigations", href: "/dashboard/investigations" },
        &[Role::Admin, Role::Officer],
    ),
    (
        NavItem { name: "Officers", href: "/dashboard/officers" },
        &[Role::Admin],
    ),
    (
        NavItem { name: "Users", href: "/dashboard/users" },
        &[Role::Admin],
    ),
    (
        NavItem { name: "Audit Logs", href: "/dashboard/audit-logs" },
        &[Role::Admin],
    ),
];

/// Pages a role can open, in sidebar order.
pub fn navigation_for(role: Role) -> Vec<NavItem> {
    ENTRIES
        .iter()
        .filter(|(_, roles)| roles.contains(&role))
        .map(|(item, _)| item.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(role: Role) -> Vec<&'static str> {
        navigation_for(role).into_iter().map(|item| item.name).collect()
    }

    #[test]
    fn test_navigation_per_role() {
        assert_eq!(names(Role::Public), vec!["Dashboard", "Crime Reports"]);
        assert_eq!(
            names(Role::Officer),
            vec!["Dashboard", "Criminal Records", "Crime Reports", "Investigations"]
        );
        assert_eq!(navigation_for(Role::Admin).len(), 7);
    }
}
