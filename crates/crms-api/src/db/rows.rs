//! Row types and their conversion into domain records

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use crms_core::{
    AuditLogEntry, CoreError, CoreResult, CrimeReport, CriminalRecord, Investigation, Profile,
};
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;

fn parse<T>(column: &str, value: &str) -> CoreResult<T>
where
    T: FromStr,
{
    value
        .parse()
        .map_err(|_| CoreError::Store(format!("unexpected {} value '{}'", column, value)))
}

#[derive(Debug, FromRow)]
pub struct ProfileRow {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: String,
    pub badge_number: Option<String>,
    pub department: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ProfileRow> for Profile {
    type Error = CoreError;

    fn try_from(row: ProfileRow) -> CoreResult<Self> {
        Ok(Profile {
            id: row.id,
            email: row.email,
            full_name: row.full_name,
            role: parse("role", &row.role)?,
            badge_number: row.badge_number,
            department: row.department,
            phone: row.phone,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
pub struct CrimeRow {
    pub id: Uuid,
    pub crime_type: String,
    pub description: String,
    pub location: String,
    pub date_occurred: NaiveDateTime,
    pub severity: String,
    pub status: String,
    pub witness_info: Option<String>,
    pub evidence_urls: Vec<String>,
    pub reported_by: Option<Uuid>,
    pub assigned_officer: Option<Uuid>,
    pub criminal_id: Option<Uuid>,
    pub admin_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<CrimeRow> for CrimeReport {
    type Error = CoreError;

    fn try_from(row: CrimeRow) -> CoreResult<Self> {
        Ok(CrimeReport {
            id: row.id,
            crime_type: row.crime_type,
            description: row.description,
            location: row.location,
            date_occurred: row.date_occurred,
            severity: parse("severity", &row.severity)?,
            status: parse("status", &row.status)?,
            witness_info: row.witness_info,
            evidence_urls: row.evidence_urls,
            reported_by: row.reported_by,
            assigned_officer: row.assigned_officer,
            criminal_id: row.criminal_id,
            admin_notes: row.admin_notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
pub struct InvestigationRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub crime_id: Uuid,
    pub lead_officer: Option<Uuid>,
    pub priority: String,
    pub status: String,
    pub findings: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<InvestigationRow> for Investigation {
    type Error = CoreError;

    fn try_from(row: InvestigationRow) -> CoreResult<Self> {
        Ok(Investigation {
            id: row.id,
            title: row.title,
            description: row.description,
            crime_id: row.crime_id,
            lead_officer: row.lead_officer,
            priority: parse("priority", &row.priority)?,
            status: parse("status", &row.status)?,
            findings: row.findings,
            start_date: row.start_date,
            end_date: row.end_date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
pub struct CriminalRecordRow {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub national_id: String,
    pub gender: String,
    pub address: Option<String>,
    pub status: String,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<CriminalRecordRow> for CriminalRecord {
    type Error = CoreError;

    fn try_from(row: CriminalRecordRow) -> CoreResult<Self> {
        Ok(CriminalRecord {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            date_of_birth: row.date_of_birth,
            national_id: row.national_id,
            gender: parse("gender", &row.gender)?,
            address: row.address,
            status: parse("status", &row.status)?,
            created_by: row.created_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
pub struct AuditRow {
    pub id: Uuid,
    pub action: String,
    pub table_name: String,
    pub record_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub ip_address: Option<String>,
    pub changes: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<AuditRow> for AuditLogEntry {
    type Error = CoreError;

    fn try_from(row: AuditRow) -> CoreResult<Self> {
        Ok(AuditLogEntry {
            id: row.id,
            action: parse("action", &row.action)?,
            table_name: row.table_name,
            record_id: row.record_id,
            user_id: row.user_id,
            ip_address: row.ip_address,
            changes: row.changes,
            created_at: row.created_at,
        })
    }
}

/// Convert a batch of rows, failing on the first malformed one.
pub fn convert<R, T>(rows: Vec<R>) -> CoreResult<Vec<T>>
where
    T: TryFrom<R, Error = CoreError>,
{
    rows.into_iter().map(T::try_from).collect()
}
