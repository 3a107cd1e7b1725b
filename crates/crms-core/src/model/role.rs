//! User roles

wire_enum! {
    /// Determines what a user can see and change.
    Role {
        Admin => "admin",
        Officer => "officer",
        Public => "public",
    }
}

impl Role {
    /// Admins and officers work cases; public users only file reports.
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Admin | Role::Officer)
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Public
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_format() {
        assert_eq!("officer".parse::<Role>().unwrap(), Role::Officer);
        assert_eq!(Role::Admin.to_string(), "admin");
        assert_eq!(serde_json::to_string(&Role::Public).unwrap(), "\"public\"");
        assert!("superuser".parse::<Role>().is_err());
    }

    #[test]
    fn test_staff_roles() {
        assert!(Role::Admin.is_staff());
        assert!(Role::Officer.is_staff());
        assert!(!Role::Public.is_staff());
    }
}
