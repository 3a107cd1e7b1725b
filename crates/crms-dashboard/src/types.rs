//! Shapes of the API's JSON responses, as the pages use them

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Profile {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub role: String,
    pub badge_number: Option<String>,
    pub department: Option<String>,
    pub phone: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NavItem {
    pub name: String,
    pub href: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MeResponse {
    pub profile: Profile,
    pub navigation: Vec<NavItem>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PersonSummary {
    pub id: String,
    pub full_name: String,
    pub badge_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CrimeReport {
    pub id: String,
    pub crime_type: String,
    pub description: String,
    pub location: String,
    pub date_occurred: String,
    pub severity: String,
    pub status: String,
    pub witness_info: Option<String>,
    #[serde(default)]
    pub evidence_urls: Vec<String>,
    pub assigned_officer: Option<String>,
    #[serde(default)]
    pub criminal_id: Option<String>,
    pub admin_notes: Option<String>,
    pub created_at: String,
    #[serde(default)]
    pub reporter: Option<PersonSummary>,
    #[serde(default)]
    pub officer: Option<PersonSummary>,
    #[serde(default)]
    pub suspect_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CrimeSummary {
    pub id: String,
    pub crime_type: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Investigation {
    pub id: String,
    pub title: String,
    pub description: String,
    pub crime_id: String,
    pub lead_officer: Option<String>,
    pub priority: String,
    pub status: String,
    pub findings: Option<String>,
    pub start_date: String,
    pub end_date: Option<String>,
    pub crime: Option<CrimeSummary>,
    pub lead: Option<PersonSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct CriminalRecord {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub national_id: String,
    pub gender: String,
    pub address: Option<String>,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuditLog {
    pub id: String,
    pub action: String,
    pub table_name: String,
    pub record_id: Option<String>,
    pub ip_address: Option<String>,
    pub created_at: String,
    pub user_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DashboardSummary {
    pub role: String,
    pub crime_reports: i64,
    pub criminal_records: Option<i64>,
    pub investigations: Option<i64>,
    pub users: Option<i64>,
    pub assigned_cases: Option<i64>,
    #[serde(default)]
    pub status_counts: std::collections::BTreeMap<String, i64>,
    #[serde(default)]
    pub recent_reports: Vec<CrimeReport>,
    #[serde(default)]
    pub assigned_reports: Vec<CrimeReport>,
}

// Request bodies

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewAccount {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub badge_number: Option<String>,
    pub department: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CrimeReportForm {
    pub crime_type: String,
    pub description: String,
    pub location: String,
    pub date_occurred: String,
    pub severity: String,
    pub witness_info: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssignmentForm {
    pub officer_id: String,
    pub status: String,
    pub admin_notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InvestigationForm {
    pub title: String,
    pub description: String,
    pub crime_id: String,
    pub lead_officer: Option<String>,
    pub priority: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CriminalRecordForm {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub national_id: String,
    pub gender: String,
    pub address: Option<String>,
    pub status: String,
}

/// Edit of a report. The API replaces every descriptive field, so a status
/// change sends the current values back unchanged.
#[derive(Debug, Clone, Serialize)]
pub struct CrimeReportUpdateForm {
    pub crime_type: String,
    pub description: String,
    pub location: String,
    pub date_occurred: String,
    pub severity: String,
    pub witness_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub unlink_criminal: bool,
}

impl CrimeReportUpdateForm {
    pub fn status_change(report: &CrimeReport, status: String) -> Self {
        Self {
            crime_type: report.crime_type.clone(),
            description: report.description.clone(),
            location: report.location.clone(),
            date_occurred: report.date_occurred.clone(),
            severity: report.severity.clone(),
            witness_info: report.witness_info.clone(),
            status: Some(status),
            unlink_criminal: false,
        }
    }
}

/// Query string of the crime report list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub assigned_to_me: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct InvestigationUpdateForm {
    pub title: String,
    pub description: String,
    pub priority: String,
    pub status: String,
    pub findings: Option<String>,
    pub end_date: Option<String>,
}

/// `?search=` on the plain list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

/// Admin edit of any account.
#[derive(Debug, Clone, Serialize)]
pub struct UserUpdateForm {
    pub full_name: String,
    pub role: String,
    pub phone: Option<String>,
    pub badge_number: Option<String>,
    pub department: Option<String>,
}

/// Blank form input becomes `None`.
pub fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// `datetime-local` inputs omit seconds; the API wants them.
pub fn with_seconds(value: &str) -> String {
    if value.len() == 16 {
        format!("{}:00", value)
    } else {
        value.to_string()
    }
}
