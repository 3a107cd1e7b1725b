//! PostgreSQL record store

mod rows;

use async_trait::async_trait;
use crms_core::store::{CrimeReportFilter, Page, RecordStore, SearchFilter};
use crms_core::{
    AuditLogEntry, CoreError, CoreResult, CrimeReport, CrimeStatus, Credentials, CriminalRecord,
    Investigation, Profile, Role, Scope,
};
use rows::{convert, AuditRow, CrimeRow, CriminalRecordRow, InvestigationRow, ProfileRow};
use sqlx::migrate::Migrator;
use sqlx::postgres::{PgPool, PgPoolOptions, Postgres};
use sqlx::QueryBuilder;
use std::collections::BTreeMap;
use tracing::info;
use uuid::Uuid;

pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

const PROFILE_COLUMNS: &str =
    "id, email, full_name, role, badge_number, department, phone, created_at, updated_at";

const CRIME_COLUMNS: &str = "id, crime_type, description, location, date_occurred, severity, \
     status, witness_info, evidence_urls, reported_by, assigned_officer, criminal_id, \
     admin_notes, created_at, updated_at";

const INVESTIGATION_COLUMNS: &str = "id, title, description, crime_id, lead_officer, priority, \
     status, findings, start_date, end_date, created_at, updated_at";

const CRIMINAL_COLUMNS: &str = "id, first_name, last_name, date_of_birth, national_id, gender, \
     address, status, created_by, created_at, updated_at";

fn store_err(e: sqlx::Error) -> CoreError {
    if let sqlx::Error::Database(db) = &e {
        if db.is_unique_violation() {
            return CoreError::Conflict(db.message().to_string());
        }
        if db.is_foreign_key_violation() {
            return CoreError::validation(db.message().to_string());
        }
    }
    CoreError::Store(e.to_string())
}

/// Substring pattern for `ILIKE ... ESCAPE '\'`, matching the needle literally.
fn like(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// ` AND (a ILIKE $n OR b ILIKE $m ...)` over the given columns.
fn push_search(query: &mut QueryBuilder<'_, Postgres>, columns: &[&str], needle: &str) {
    let pattern = like(needle);
    query.push(" AND (");
    for (i, column) in columns.iter().enumerate() {
        if i > 0 {
            query.push(" OR ");
        }
        query
            .push(format!("{} ILIKE ", column))
            .push_bind(pattern.clone())
            .push(" ESCAPE '\\'");
    }
    query.push(")");
}

fn push_page(query: &mut QueryBuilder<'_, Postgres>, page: Page) {
    query
        .push(" LIMIT ")
        .push_bind(page.limit)
        .push(" OFFSET ")
        .push_bind(page.offset);
}

fn push_scope(query: &mut QueryBuilder<'_, Postgres>, scope: Scope) {
    match scope {
        Scope::All => {}
        Scope::ReportedBy(id) => {
            query.push(" AND reported_by = ").push_bind(id);
        }
        Scope::AssignedTo(id) => {
            query.push(" AND assigned_officer = ").push_bind(id);
        }
    }
}

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub async fn connect(database_url: &str) -> CoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .map_err(store_err)?;
        info!("Connected to database");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn migrate(&self) -> CoreResult<()> {
        MIGRATOR
            .run(&self.pool)
            .await
            .map_err(|e| CoreError::Store(format!("migration failed: {}", e)))?;
        info!("Database migrations complete");
        Ok(())
    }

    async fn count(&self, table: &str) -> CoreResult<i64> {
        sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&self.pool)
            .await
            .map_err(store_err)
    }

    async fn delete_by_id(&self, table: &str, id: Uuid) -> CoreResult<bool> {
        let result = sqlx::query(&format!("DELETE FROM {} WHERE id = $1", table))
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(store_err)?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl RecordStore for PgStore {
    async fn insert_account(&self, profile: &Profile, password_hash: &str) -> CoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO profiles (id, email, password_hash, full_name, role, badge_number,
                                  department, phone, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(profile.id)
        .bind(&profile.email)
        .bind(password_hash)
        .bind(&profile.full_name)
        .bind(profile.role.as_str())
        .bind(&profile.badge_number)
        .bind(&profile.department)
        .bind(&profile.phone)
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match store_err(e) {
            CoreError::Conflict(_) => {
                CoreError::Conflict(format!("{} is already registered", profile.email))
            }
            other => other,
        })?;
        Ok(())
    }

    async fn credentials_by_email(&self, email: &str) -> CoreResult<Option<Credentials>> {
        let row: Option<(Uuid, String)> =
            sqlx::query_as("SELECT id, password_hash FROM profiles WHERE email = $1")
                .bind(email)
                .fetch_optional(&self.pool)
                .await
                .map_err(store_err)?;
        Ok(row.map(|(user_id, password_hash)| Credentials {
            user_id,
            password_hash,
        }))
    }

    async fn get_profile(&self, id: Uuid) -> CoreResult<Option<Profile>> {
        sqlx::query_as::<_, ProfileRow>(&format!(
            "SELECT {} FROM profiles WHERE id = $1",
            PROFILE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_err)?
        .map(Profile::try_from)
        .transpose()
    }

    async fn list_profiles(&self, role: Option<Role>) -> CoreResult<Vec<Profile>> {
        let mut query = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM profiles WHERE 1 = 1",
            PROFILE_COLUMNS
        ));
        if let Some(role) = role {
            query.push(" AND role = ").push_bind(role.as_str());
        }
        query.push(" ORDER BY created_at DESC");

        let rows = query
            .build_query_as::<ProfileRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(store_err)?;
        convert(rows)
    }

    async fn update_profile(&self, profile: &Profile) -> CoreResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE profiles
            SET full_name = $2, role = $3, badge_number = $4, department = $5,
                phone = $6, updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(profile.id)
        .bind(&profile.full_name)
        .bind(profile.role.as_str())
        .bind(&profile.badge_number)
        .bind(&profile.department)
        .bind(&profile.phone)
        .bind(profile.updated_at)
        .execute(&self.pool)
        .await
        .map_err(store_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn count_profiles(&self) -> CoreResult<i64> {
        self.count("profiles").await
    }

    async fn insert_crime_report(&self, report: &CrimeReport) -> CoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO crimes (id, crime_type, description, location, date_occurred, severity,
                                status, witness_info, evidence_urls, reported_by, assigned_officer,
                                criminal_id, admin_notes, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(report.id)
        .bind(&report.crime_type)
        .bind(&report.description)
        .bind(&report.location)
        .bind(report.date_occurred)
        .bind(report.severity.as_str())
        .bind(report.status.as_str())
        .bind(&report.witness_info)
        .bind(&report.evidence_urls)
        .bind(report.reported_by)
        .bind(report.assigned_officer)
        .bind(report.criminal_id)
        .bind(&report.admin_notes)
        .bind(report.created_at)
        .bind(report.updated_at)
        .execute(&self.pool)
        .await
        .map_err(store_err)?;
        Ok(())
    }

    async fn get_crime_report(&self, id: Uuid) -> CoreResult<Option<CrimeReport>> {
        sqlx::query_as::<_, CrimeRow>(&format!(
            "SELECT {} FROM crimes WHERE id = $1",
            CRIME_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_err)?
        .map(CrimeReport::try_from)
        .transpose()
    }

    async fn list_crime_reports(&self, filter: &CrimeReportFilter) -> CoreResult<Vec<CrimeReport>> {
        let mut query =
            QueryBuilder::<Postgres>::new(format!("SELECT {} FROM crimes WHERE 1 = 1", CRIME_COLUMNS));
        push_scope(&mut query, filter.scope);
        if let Some(status) = filter.status {
            query.push(" AND status = ").push_bind(status.as_str());
        }
        if let Some(search) = &filter.search {
            push_search(&mut query, &["crime_type", "location", "status"], search);
        }
        query.push(" ORDER BY created_at DESC");
        push_page(&mut query, filter.page);

        let rows = query
            .build_query_as::<CrimeRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(store_err)?;
        convert(rows)
    }

    async fn update_crime_report(&self, report: &CrimeReport) -> CoreResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE crimes
            SET crime_type = $2, description = $3, location = $4, date_occurred = $5,
                severity = $6, status = $7, witness_info = $8, evidence_urls = $9,
                assigned_officer = $10, criminal_id = $11, admin_notes = $12, updated_at = $13
            WHERE id = $1
            "#,
        )
        .bind(report.id)
        .bind(&report.crime_type)
        .bind(&report.description)
        .bind(&report.location)
        .bind(report.date_occurred)
        .bind(report.severity.as_str())
        .bind(report.status.as_str())
        .bind(&report.witness_info)
        .bind(&report.evidence_urls)
        .bind(report.assigned_officer)
        .bind(report.criminal_id)
        .bind(&report.admin_notes)
        .bind(report.updated_at)
        .execute(&self.pool)
        .await
        .map_err(store_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_crime_report(&self, id: Uuid) -> CoreResult<bool> {
        // investigations go with it through ON DELETE CASCADE
        self.delete_by_id("crimes", id).await
    }

    async fn crime_status_counts(&self, scope: Scope) -> CoreResult<BTreeMap<CrimeStatus, i64>> {
        let mut query = QueryBuilder::<Postgres>::new("SELECT status, COUNT(*) FROM crimes WHERE 1 = 1");
        push_scope(&mut query, scope);
        query.push(" GROUP BY status");

        let rows: Vec<(String, i64)> = query
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(store_err)?;

        rows.into_iter()
            .map(|(status, n)| {
                status
                    .parse::<CrimeStatus>()
                    .map(|s| (s, n))
                    .map_err(|_| CoreError::Store(format!("unexpected status value '{}'", status)))
            })
            .collect()
    }

    async fn insert_investigation(&self, investigation: &Investigation) -> CoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO investigations (id, title, description, crime_id, lead_officer, priority,
                                        status, findings, start_date, end_date, created_at,
                                        updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(investigation.id)
        .bind(&investigation.title)
        .bind(&investigation.description)
        .bind(investigation.crime_id)
        .bind(investigation.lead_officer)
        .bind(investigation.priority.as_str())
        .bind(investigation.status.as_str())
        .bind(&investigation.findings)
        .bind(investigation.start_date)
        .bind(investigation.end_date)
        .bind(investigation.created_at)
        .bind(investigation.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match store_err(e) {
            CoreError::Validation(_) => CoreError::not_found("crime report", investigation.crime_id),
            other => other,
        })?;
        Ok(())
    }

    async fn get_investigation(&self, id: Uuid) -> CoreResult<Option<Investigation>> {
        sqlx::query_as::<_, InvestigationRow>(&format!(
            "SELECT {} FROM investigations WHERE id = $1",
            INVESTIGATION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_err)?
        .map(Investigation::try_from)
        .transpose()
    }

    async fn list_investigations(&self, filter: &SearchFilter) -> CoreResult<Vec<Investigation>> {
        let mut query = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM investigations WHERE 1 = 1",
            INVESTIGATION_COLUMNS
        ));
        if let Some(search) = &filter.search {
            push_search(&mut query, &["title", "status"], search);
        }
        query.push(" ORDER BY created_at DESC");
        push_page(&mut query, filter.page);

        let rows = query
            .build_query_as::<InvestigationRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(store_err)?;
        convert(rows)
    }

    async fn update_investigation(&self, investigation: &Investigation) -> CoreResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE investigations
            SET title = $2, description = $3, lead_officer = $4, priority = $5, status = $6,
                findings = $7, end_date = $8, updated_at = $9
            WHERE id = $1
            "#,
        )
        .bind(investigation.id)
        .bind(&investigation.title)
        .bind(&investigation.description)
        .bind(investigation.lead_officer)
        .bind(investigation.priority.as_str())
        .bind(investigation.status.as_str())
        .bind(&investigation.findings)
        .bind(investigation.end_date)
        .bind(investigation.updated_at)
        .execute(&self.pool)
        .await
        .map_err(store_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_investigation(&self, id: Uuid) -> CoreResult<bool> {
        self.delete_by_id("investigations", id).await
    }

    async fn count_investigations(&self) -> CoreResult<i64> {
        self.count("investigations").await
    }

    async fn insert_criminal_record(&self, record: &CriminalRecord) -> CoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO criminal_records (id, first_name, last_name, date_of_birth, national_id,
                                          gender, address, status, created_by, created_at,
                                          updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(record.id)
        .bind(&record.first_name)
        .bind(&record.last_name)
        .bind(record.date_of_birth)
        .bind(&record.national_id)
        .bind(record.gender.as_str())
        .bind(&record.address)
        .bind(record.status.as_str())
        .bind(record.created_by)
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| national_id_conflict(e, &record.national_id))?;
        Ok(())
    }

    async fn get_criminal_record(&self, id: Uuid) -> CoreResult<Option<CriminalRecord>> {
        sqlx::query_as::<_, CriminalRecordRow>(&format!(
            "SELECT {} FROM criminal_records WHERE id = $1",
            CRIMINAL_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_err)?
        .map(CriminalRecord::try_from)
        .transpose()
    }

    async fn list_criminal_records(&self, filter: &SearchFilter) -> CoreResult<Vec<CriminalRecord>> {
        let mut query = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM criminal_records WHERE 1 = 1",
            CRIMINAL_COLUMNS
        ));
        if let Some(search) = &filter.search {
            push_search(&mut query, &["first_name", "last_name", "national_id"], search);
        }
        query.push(" ORDER BY created_at DESC");
        push_page(&mut query, filter.page);

        let rows = query
            .build_query_as::<CriminalRecordRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(store_err)?;
        convert(rows)
    }

    async fn update_criminal_record(&self, record: &CriminalRecord) -> CoreResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE criminal_records
            SET first_name = $2, last_name = $3, date_of_birth = $4, national_id = $5,
                gender = $6, address = $7, status = $8, updated_at = $9
            WHERE id = $1
            "#,
        )
        .bind(record.id)
        .bind(&record.first_name)
        .bind(&record.last_name)
        .bind(record.date_of_birth)
        .bind(&record.national_id)
        .bind(record.gender.as_str())
        .bind(&record.address)
        .bind(record.status.as_str())
        .bind(record.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| national_id_conflict(e, &record.national_id))?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_criminal_record(&self, id: Uuid) -> CoreResult<bool> {
        // crimes.criminal_id is cleared through ON DELETE SET NULL
        self.delete_by_id("criminal_records", id).await
    }

    async fn count_criminal_records(&self) -> CoreResult<i64> {
        self.count("criminal_records").await
    }

    async fn append_audit(&self, entry: &AuditLogEntry) -> CoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO audit_logs (id, action, table_name, record_id, user_id, ip_address,
                                    changes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(entry.id)
        .bind(entry.action.as_str())
        .bind(&entry.table_name)
        .bind(entry.record_id)
        .bind(entry.user_id)
        .bind(&entry.ip_address)
        .bind(&entry.changes)
        .bind(entry.created_at)
        .execute(&self.pool)
        .await
        .map_err(store_err)?;
        Ok(())
    }

    async fn list_audit(&self, filter: &SearchFilter) -> CoreResult<Vec<AuditLogEntry>> {
        let mut query = QueryBuilder::<Postgres>::new(
            "SELECT id, action, table_name, record_id, user_id, ip_address, changes, created_at \
             FROM audit_logs WHERE 1 = 1",
        );
        if let Some(search) = &filter.search {
            push_search(&mut query, &["action", "table_name"], search);
        }
        query.push(" ORDER BY created_at DESC");
        push_page(&mut query, filter.page);

        let rows = query
            .build_query_as::<AuditRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(store_err)?;
        convert(rows)
    }
}

fn national_id_conflict(e: sqlx::Error, national_id: &str) -> CoreError {
    match store_err(e) {
        CoreError::Conflict(_) => {
            CoreError::Conflict(format!("national id {} is already on file", national_id))
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_matches_literally() {
        assert_eq!(like("theft"), "%theft%");
        assert_eq!(like("100%"), "%100\\%%");
        assert_eq!(like("GHA_1"), "%GHA\\_1%");
        assert_eq!(like("a\\b"), "%a\\\\b%");
    }

    #[test]
    fn test_search_clause() {
        let mut query = QueryBuilder::<Postgres>::new("SELECT 1 FROM crimes WHERE 1 = 1");
        push_search(&mut query, &["crime_type", "location"], "x");
        assert_eq!(
            query.sql(),
            "SELECT 1 FROM crimes WHERE 1 = 1 AND (crime_type ILIKE $1 ESCAPE '\\' \
             OR location ILIKE $2 ESCAPE '\\')"
        );
    }
}
