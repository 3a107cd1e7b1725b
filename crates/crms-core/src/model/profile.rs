//! User profiles and account payloads

use super::Role;
use crate::validate;
use crate::CoreResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity record for a user account. The password hash lives in the
/// store next to the profile and never leaves it through this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub badge_number: Option<String>,
    pub department: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Short form used when another record references a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub id: Uuid,
    pub full_name: String,
    pub badge_number: Option<String>,
}

impl From<&Profile> for ProfileSummary {
    fn from(profile: &Profile) -> Self {
        Self {
            id: profile.id,
            full_name: profile.full_name.clone(),
            badge_number: profile.badge_number.clone(),
        }
    }
}

/// Account creation request (sign-up, officer creation, seeding).
#[derive(Debug, Clone, Deserialize)]
pub struct NewAccount {
    pub email: String,
    pub password: String,
    pub full_name: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub badge_number: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl NewAccount {
    pub fn normalized(self) -> CoreResult<Self> {
        Ok(Self {
            email: validate::email(&self.email)?,
            password: validate::password(&self.password)?,
            full_name: validate::required("full_name", &self.full_name)?,
            role: self.role,
            badge_number: validate::optional(self.badge_number),
            department: validate::optional(self.department),
            phone: validate::optional(self.phone),
        })
    }
}

/// Admin edit of any user profile.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileUpdate {
    pub full_name: String,
    pub role: Role,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub badge_number: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
}

impl ProfileUpdate {
    pub fn apply(self, profile: &mut Profile) -> CoreResult<()> {
        profile.full_name = validate::required("full_name", &self.full_name)?;
        profile.role = self.role;
        profile.phone = validate::optional(self.phone);
        profile.badge_number = validate::optional(self.badge_number);
        profile.department = validate::optional(self.department);
        profile.updated_at = Utc::now();
        Ok(())
    }
}

/// Self-service edit; users cannot change their own role or badge.
#[derive(Debug, Clone, Deserialize)]
pub struct OwnProfileUpdate {
    pub full_name: String,
    #[serde(default)]
    pub phone: Option<String>,
}

impl OwnProfileUpdate {
    pub fn apply(self, profile: &mut Profile) -> CoreResult<()> {
        profile.full_name = validate::required("full_name", &self.full_name)?;
        profile.phone = validate::optional(self.phone);
        profile.updated_at = Utc::now();
        Ok(())
    }
}

/// Stored login material for an account.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub user_id: Uuid,
    pub password_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_account_normalizes_fields() {
        let account = NewAccount {
            email: "  Officer1@CRCRMS.gov.gh ".to_string(),
            password: "password123".to_string(),
            full_name: " Yaa Asantewaa ".to_string(),
            role: Role::Officer,
            badge_number: Some("OFF-002".to_string()),
            department: Some("   ".to_string()),
            phone: None,
        }
        .normalized()
        .unwrap();

        assert_eq!(account.email, "officer1@crcrms.gov.gh");
        assert_eq!(account.full_name, "Yaa Asantewaa");
        assert_eq!(account.department, None);
    }

    #[test]
    fn test_new_account_defaults_to_public() {
        let account: NewAccount = serde_json::from_str(
            r#"{"email":"a@b.co","password":"secret1","full_name":"Grace Osei"}"#,
        )
        .unwrap();
        assert_eq!(account.role, Role::Public);
    }
}
