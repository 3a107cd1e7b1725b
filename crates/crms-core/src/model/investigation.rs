//! Investigations

use super::ProfileSummary;
use crate::validate;
use crate::CoreResult;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

wire_enum! {
    Priority {
        Low => "Low",
        Medium => "Medium",
        High => "High",
    }
}

wire_enum! {
    InvestigationStatus {
        Pending => "pending",
        Active => "active",
        Completed => "completed",
        Suspended => "suspended",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Investigation {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub crime_id: Uuid,
    pub lead_officer: Option<Uuid>,
    pub priority: Priority,
    pub status: InvestigationStatus,
    pub findings: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Investigation {
    pub fn new(input: NewInvestigation) -> CoreResult<Self> {
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            title: validate::required("title", &input.title)?,
            description: validate::required("description", &input.description)?,
            crime_id: input.crime_id,
            lead_officer: input.lead_officer,
            priority: input.priority,
            status: InvestigationStatus::Pending,
            findings: None,
            start_date: now.date_naive(),
            end_date: None,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.title.to_lowercase().contains(&needle) || self.status.as_str().contains(&needle)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewInvestigation {
    pub title: String,
    pub description: String,
    pub crime_id: Uuid,
    #[serde(default)]
    pub lead_officer: Option<Uuid>,
    pub priority: Priority,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InvestigationUpdate {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub status: InvestigationStatus,
    #[serde(default)]
    pub findings: Option<String>,
    /// Only overwrites the stored end date when present.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl InvestigationUpdate {
    pub fn apply(self, investigation: &mut Investigation) -> CoreResult<()> {
        investigation.title = validate::required("title", &self.title)?;
        investigation.description = validate::required("description", &self.description)?;
        investigation.priority = self.priority;
        investigation.status = self.status;
        investigation.findings = validate::optional(self.findings);
        if let Some(end_date) = self.end_date {
            if end_date < investigation.start_date {
                return Err(crate::CoreError::validation(
                    "end_date cannot be before start_date",
                ));
            }
            investigation.end_date = Some(end_date);
        }
        investigation.updated_at = Utc::now();
        Ok(())
    }
}

/// Reference to the crime an investigation is about.
#[derive(Debug, Clone, Serialize)]
pub struct CrimeSummary {
    pub id: Uuid,
    pub crime_type: String,
    pub location: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct InvestigationView {
    #[serde(flatten)]
    pub investigation: Investigation,
    pub crime: Option<CrimeSummary>,
    pub lead: Option<ProfileSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Investigation {
        Investigation::new(NewInvestigation {
            title: "Burglary Investigation - Accra".to_string(),
            description: "Series of break-ins".to_string(),
            crime_id: Uuid::new_v4(),
            lead_officer: None,
            priority: Priority::High,
        })
        .unwrap()
    }

    #[test]
    fn test_new_investigation_is_pending() {
        let investigation = sample();
        assert_eq!(investigation.status, InvestigationStatus::Pending);
        assert_eq!(investigation.end_date, None);
        assert_eq!(investigation.start_date, investigation.created_at.date_naive());
    }

    #[test]
    fn test_update_keeps_end_date_when_absent() {
        let mut investigation = sample();
        let end = investigation.start_date + chrono::Duration::days(3);
        investigation.end_date = Some(end);

        InvestigationUpdate {
            title: "Renamed".to_string(),
            description: "Still ongoing".to_string(),
            priority: Priority::Low,
            status: InvestigationStatus::Active,
            findings: Some("Two suspects".to_string()),
            end_date: None,
        }
        .apply(&mut investigation)
        .unwrap();

        assert_eq!(investigation.end_date, Some(end));
        assert_eq!(investigation.status, InvestigationStatus::Active);
        assert_eq!(investigation.findings.as_deref(), Some("Two suspects"));
    }

    #[test]
    fn test_update_rejects_end_before_start() {
        let mut investigation = sample();
        let update = InvestigationUpdate {
            title: "t".to_string(),
            description: "d".to_string(),
            priority: Priority::Low,
            status: InvestigationStatus::Completed,
            findings: None,
            end_date: Some(investigation.start_date - chrono::Duration::days(1)),
        };
        assert!(update.apply(&mut investigation).is_err());
    }
}
