//! Criminal records

use crate::validate;
use crate::CoreResult;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

wire_enum! {
    Gender {
        Male => "Male",
        Female => "Female",
        Other => "Other",
    }
}

wire_enum! {
    RecordStatus {
        Active => "active",
        Archived => "archived",
        Sealed => "sealed",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriminalRecord {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub national_id: String,
    pub gender: Gender,
    pub address: Option<String>,
    pub status: RecordStatus,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CriminalRecord {
    pub fn new(input: CriminalRecordInput, created_by: Uuid) -> CoreResult<Self> {
        let now = Utc::now();
        let mut record = Self {
            id: Uuid::new_v4(),
            first_name: String::new(),
            last_name: String::new(),
            date_of_birth: input.date_of_birth,
            national_id: String::new(),
            gender: input.gender,
            address: None,
            status: input.status,
            created_by: Some(created_by),
            created_at: now,
            updated_at: now,
        };
        input.apply(&mut record)?;
        record.updated_at = now;
        Ok(record)
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Case-insensitive match on either name or the national id.
    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.first_name.to_lowercase().contains(&needle)
            || self.last_name.to_lowercase().contains(&needle)
            || self.national_id.to_lowercase().contains(&needle)
    }
}

/// Create and edit payload; edits replace every field.
#[derive(Debug, Clone, Deserialize)]
pub struct CriminalRecordInput {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub national_id: String,
    pub gender: Gender,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default = "default_status")]
    pub status: RecordStatus,
}

fn default_status() -> RecordStatus {
    RecordStatus::Active
}

impl CriminalRecordInput {
    pub fn apply(self, record: &mut CriminalRecord) -> CoreResult<()> {
        if self.date_of_birth > Utc::now().date_naive() {
            return Err(crate::CoreError::validation(
                "date_of_birth cannot be in the future",
            ));
        }
        record.first_name = validate::required("first_name", &self.first_name)?;
        record.last_name = validate::required("last_name", &self.last_name)?;
        record.date_of_birth = self.date_of_birth;
        record.national_id = validate::national_id(&self.national_id)?;
        record.gender = self.gender;
        record.address = validate::optional(self.address);
        record.status = self.status;
        record.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> CriminalRecordInput {
        CriminalRecordInput {
            first_name: "Kofi".to_string(),
            last_name: "Boateng".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1988, 7, 14).unwrap(),
            national_id: "GHA-123456789-0".to_string(),
            gender: Gender::Male,
            address: None,
            status: RecordStatus::Active,
        }
    }

    #[test]
    fn test_new_record() {
        let creator = Uuid::new_v4();
        let record = CriminalRecord::new(input(), creator).unwrap();
        assert_eq!(record.full_name(), "Kofi Boateng");
        assert_eq!(record.created_by, Some(creator));
        assert!(record.matches_search("boat"));
        assert!(record.matches_search("gha-1234"));
    }

    #[test]
    fn test_rejects_future_birth_date() {
        let mut bad = input();
        bad.date_of_birth = Utc::now().date_naive() + chrono::Duration::days(2);
        assert!(CriminalRecord::new(bad, Uuid::new_v4()).is_err());
    }

    #[test]
    fn test_status_defaults_to_active() {
        let input: CriminalRecordInput = serde_json::from_str(
            r#"{"first_name":"A","last_name":"B","date_of_birth":"1990-01-01",
                "national_id":"X1","gender":"Female"}"#,
        )
        .unwrap();
        assert_eq!(input.status, RecordStatus::Active);
    }
}
