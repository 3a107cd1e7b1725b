//! Crime reports

use super::ProfileSummary;
use crate::validate;
use crate::CoreResult;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

wire_enum! {
    /// Severity of a reported offense.
    Severity {
        Low => "Low",
        Medium => "Medium",
        High => "High",
    }
}

wire_enum! {
    /// Case status. Any status may follow any other.
    CrimeStatus {
        Reported => "reported",
        UnderInvestigation => "under_investigation",
        Solved => "solved",
        Closed => "closed",
    }
}

impl Default for CrimeStatus {
    fn default() -> Self {
        CrimeStatus::Reported
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrimeReport {
    pub id: Uuid,
    pub crime_type: String,
    pub description: String,
    pub location: String,
    pub date_occurred: NaiveDateTime,
    pub severity: Severity,
    pub status: CrimeStatus,
    pub witness_info: Option<String>,
    pub evidence_urls: Vec<String>,
    pub reported_by: Option<Uuid>,
    pub assigned_officer: Option<Uuid>,
    pub criminal_id: Option<Uuid>,
    pub admin_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CrimeReport {
    pub fn new(input: NewCrimeReport, reported_by: Uuid) -> CoreResult<Self> {
        let input = input.normalized()?;
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            crime_type: input.crime_type,
            description: input.description,
            location: input.location,
            date_occurred: input.date_occurred,
            severity: input.severity,
            status: CrimeStatus::Reported,
            witness_info: input.witness_info,
            evidence_urls: Vec::new(),
            reported_by: Some(reported_by),
            assigned_officer: None,
            criminal_id: None,
            admin_notes: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Case-insensitive match on type, location and status.
    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.crime_type.to_lowercase().contains(&needle)
            || self.location.to_lowercase().contains(&needle)
            || self.status.as_str().contains(&needle)
    }
}

/// Fields a reporter fills in when filing a report.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCrimeReport {
    pub crime_type: String,
    pub description: String,
    pub location: String,
    pub date_occurred: NaiveDateTime,
    pub severity: Severity,
    #[serde(default)]
    pub witness_info: Option<String>,
}

impl NewCrimeReport {
    fn normalized(self) -> CoreResult<Self> {
        Ok(Self {
            crime_type: validate::required("crime_type", &self.crime_type)?,
            description: validate::required("description", &self.description)?,
            location: validate::required("location", &self.location)?,
            date_occurred: self.date_occurred,
            severity: self.severity,
            witness_info: validate::optional(self.witness_info),
        })
    }
}

/// Edit of an existing report. `status`, `criminal_id` and
/// `unlink_criminal` are staff-only. An absent `criminal_id` keeps the
/// current suspect; `unlink_criminal` clears it.
#[derive(Debug, Clone, Deserialize)]
pub struct CrimeReportUpdate {
    pub crime_type: String,
    pub description: String,
    pub location: String,
    pub date_occurred: NaiveDateTime,
    pub severity: Severity,
    #[serde(default)]
    pub witness_info: Option<String>,
    #[serde(default)]
    pub status: Option<CrimeStatus>,
    #[serde(default)]
    pub criminal_id: Option<Uuid>,
    #[serde(default)]
    pub unlink_criminal: bool,
}

impl CrimeReportUpdate {
    /// Whether applying this update would touch staff-only fields.
    pub fn changes_case_fields(&self, report: &CrimeReport) -> bool {
        self.status.map_or(false, |s| s != report.status)
            || self.criminal_id.map_or(false, |c| Some(c) != report.criminal_id)
            || (self.unlink_criminal && report.criminal_id.is_some())
    }

    pub fn apply(self, report: &mut CrimeReport) -> CoreResult<()> {
        report.crime_type = validate::required("crime_type", &self.crime_type)?;
        report.description = validate::required("description", &self.description)?;
        report.location = validate::required("location", &self.location)?;
        report.date_occurred = self.date_occurred;
        report.severity = self.severity;
        report.witness_info = validate::optional(self.witness_info);
        if let Some(status) = self.status {
            report.status = status;
        }
        if self.unlink_criminal {
            report.criminal_id = None;
        } else if let Some(criminal_id) = self.criminal_id {
            report.criminal_id = Some(criminal_id);
        }
        report.updated_at = Utc::now();
        Ok(())
    }
}

/// Admin assignment of a case to an officer.
#[derive(Debug, Clone, Deserialize)]
pub struct Assignment {
    pub officer_id: Uuid,
    pub status: CrimeStatus,
    #[serde(default)]
    pub admin_notes: Option<String>,
}

impl Assignment {
    /// Blank notes leave the existing notes in place.
    pub fn apply(self, report: &mut CrimeReport) {
        report.assigned_officer = Some(self.officer_id);
        report.status = self.status;
        if let Some(notes) = validate::optional(self.admin_notes) {
            report.admin_notes = Some(notes);
        }
        report.updated_at = Utc::now();
    }
}

/// A report as listed on screen, joined with the people it references.
#[derive(Debug, Clone, Serialize)]
pub struct CrimeReportView {
    #[serde(flatten)]
    pub report: CrimeReport,
    pub reporter: Option<ProfileSummary>,
    pub officer: Option<ProfileSummary>,
    pub suspect_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn input() -> NewCrimeReport {
        NewCrimeReport {
            crime_type: "Burglary".to_string(),
            description: "Back door forced open".to_string(),
            location: "Osu, Accra".to_string(),
            date_occurred: NaiveDate::from_ymd_opt(2024, 3, 2)
                .unwrap()
                .and_hms_opt(22, 15, 0)
                .unwrap(),
            severity: Severity::High,
            witness_info: Some(" ".to_string()),
        }
    }

    #[test]
    fn test_new_report_starts_reported() {
        let reporter = Uuid::new_v4();
        let report = CrimeReport::new(input(), reporter).unwrap();
        assert_eq!(report.status, CrimeStatus::Reported);
        assert_eq!(report.reported_by, Some(reporter));
        assert!(report.evidence_urls.is_empty());
        assert_eq!(report.witness_info, None);
    }

    #[test]
    fn test_new_report_requires_fields() {
        let mut bad = input();
        bad.location = "   ".to_string();
        assert!(CrimeReport::new(bad, Uuid::new_v4()).is_err());
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            "under_investigation".parse::<CrimeStatus>().unwrap(),
            CrimeStatus::UnderInvestigation
        );
        assert_eq!(Severity::Medium.to_string(), "Medium");
    }

    #[test]
    fn test_assignment_keeps_notes_when_blank() {
        let mut report = CrimeReport::new(input(), Uuid::new_v4()).unwrap();
        report.admin_notes = Some("Interview the neighbours".to_string());
        let officer = Uuid::new_v4();

        Assignment {
            officer_id: officer,
            status: CrimeStatus::UnderInvestigation,
            admin_notes: Some("  ".to_string()),
        }
        .apply(&mut report);

        assert_eq!(report.assigned_officer, Some(officer));
        assert_eq!(report.status, CrimeStatus::UnderInvestigation);
        assert_eq!(report.admin_notes.as_deref(), Some("Interview the neighbours"));
    }

    #[test]
    fn test_search_matches_type_location_status() {
        let report = CrimeReport::new(input(), Uuid::new_v4()).unwrap();
        assert!(report.matches_search("burg"));
        assert!(report.matches_search("ACCRA"));
        assert!(report.matches_search("reported"));
        assert!(!report.matches_search("assault"));
    }
}
