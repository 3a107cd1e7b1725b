//! In-process record store

use super::{CrimeReportFilter, RecordStore, SearchFilter};
use crate::access::Scope;
use crate::{
    AuditLogEntry, CoreError, CoreResult, CrimeReport, CrimeStatus, Credentials, CriminalRecord,
    Investigation, Profile, Role,
};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct Tables {
    profiles: HashMap<Uuid, Profile>,
    password_hashes: HashMap<Uuid, String>,
    crimes: HashMap<Uuid, CrimeReport>,
    investigations: HashMap<Uuid, Investigation>,
    criminal_records: HashMap<Uuid, CriminalRecord>,
    audit_logs: Vec<AuditLogEntry>,
}

/// Keeps every table in memory behind one lock. Used by tests and local
/// tooling; nothing survives a restart.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Newest first, the order every listing uses.
fn newest_first<T: Clone>(
    items: impl Iterator<Item = T>,
    created_at: impl Fn(&T) -> chrono::DateTime<chrono::Utc>,
) -> Vec<T> {
    let mut items: Vec<T> = items.collect();
    items.sort_by(|a, b| created_at(b).cmp(&created_at(a)));
    items
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn insert_account(&self, profile: &Profile, password_hash: &str) -> CoreResult<()> {
        let mut tables = self.tables.write().await;
        if tables.profiles.values().any(|p| p.email == profile.email) {
            return Err(CoreError::Conflict(format!(
                "an account for {} already exists",
                profile.email
            )));
        }
        tables.profiles.insert(profile.id, profile.clone());
        tables
            .password_hashes
            .insert(profile.id, password_hash.to_string());
        Ok(())
    }

    async fn credentials_by_email(&self, email: &str) -> CoreResult<Option<Credentials>> {
        let tables = self.tables.read().await;
        Ok(tables
            .profiles
            .values()
            .find(|p| p.email == email)
            .and_then(|p| {
                tables.password_hashes.get(&p.id).map(|hash| Credentials {
                    user_id: p.id,
                    password_hash: hash.clone(),
                })
            }))
    }

    async fn get_profile(&self, id: Uuid) -> CoreResult<Option<Profile>> {
        Ok(self.tables.read().await.profiles.get(&id).cloned())
    }

    async fn list_profiles(&self, role: Option<Role>) -> CoreResult<Vec<Profile>> {
        let tables = self.tables.read().await;
        Ok(newest_first(
            tables
                .profiles
                .values()
                .filter(|p| role.map_or(true, |r| p.role == r))
                .cloned(),
            |p| p.created_at,
        ))
    }

    async fn update_profile(&self, profile: &Profile) -> CoreResult<bool> {
        let mut tables = self.tables.write().await;
        match tables.profiles.get_mut(&profile.id) {
            Some(existing) => {
                *existing = profile.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count_profiles(&self) -> CoreResult<i64> {
        Ok(self.tables.read().await.profiles.len() as i64)
    }

    async fn insert_crime_report(&self, report: &CrimeReport) -> CoreResult<()> {
        self.tables
            .write()
            .await
            .crimes
            .insert(report.id, report.clone());
        Ok(())
    }

    async fn get_crime_report(&self, id: Uuid) -> CoreResult<Option<CrimeReport>> {
        Ok(self.tables.read().await.crimes.get(&id).cloned())
    }

    async fn list_crime_reports(&self, filter: &CrimeReportFilter) -> CoreResult<Vec<CrimeReport>> {
        let tables = self.tables.read().await;
        let matching = newest_first(
            tables.crimes.values().filter(|c| filter.matches(c)).cloned(),
            |c| c.created_at,
        );
        Ok(filter.page.slice(matching.into_iter()))
    }

    async fn update_crime_report(&self, report: &CrimeReport) -> CoreResult<bool> {
        let mut tables = self.tables.write().await;
        match tables.crimes.get_mut(&report.id) {
            Some(existing) => {
                *existing = report.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_crime_report(&self, id: Uuid) -> CoreResult<bool> {
        let mut tables = self.tables.write().await;
        let removed = tables.crimes.remove(&id).is_some();
        if removed {
            tables.investigations.retain(|_, i| i.crime_id != id);
        }
        Ok(removed)
    }

    async fn crime_status_counts(&self, scope: Scope) -> CoreResult<BTreeMap<CrimeStatus, i64>> {
        let tables = self.tables.read().await;
        let mut counts = BTreeMap::new();
        for crime in tables
            .crimes
            .values()
            .filter(|c| scope.admits_report(c.reported_by, c.assigned_officer))
        {
            *counts.entry(crime.status).or_insert(0) += 1;
        }
        Ok(counts)
    }

    async fn insert_investigation(&self, investigation: &Investigation) -> CoreResult<()> {
        let mut tables = self.tables.write().await;
        if !tables.crimes.contains_key(&investigation.crime_id) {
            return Err(CoreError::not_found("crime report", investigation.crime_id));
        }
        tables
            .investigations
            .insert(investigation.id, investigation.clone());
        Ok(())
    }

    async fn get_investigation(&self, id: Uuid) -> CoreResult<Option<Investigation>> {
        Ok(self.tables.read().await.investigations.get(&id).cloned())
    }

    async fn list_investigations(&self, filter: &SearchFilter) -> CoreResult<Vec<Investigation>> {
        let tables = self.tables.read().await;
        let matching = newest_first(
            tables
                .investigations
                .values()
                .filter(|i| {
                    filter
                        .search
                        .as_deref()
                        .map_or(true, |needle| i.matches_search(needle))
                })
                .cloned(),
            |i| i.created_at,
        );
        Ok(filter.page.slice(matching.into_iter()))
    }

    async fn update_investigation(&self, investigation: &Investigation) -> CoreResult<bool> {
        let mut tables = self.tables.write().await;
        match tables.investigations.get_mut(&investigation.id) {
            Some(existing) => {
                *existing = investigation.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_investigation(&self, id: Uuid) -> CoreResult<bool> {
        Ok(self
            .tables
            .write()
            .await
            .investigations
            .remove(&id)
            .is_some())
    }

    async fn count_investigations(&self) -> CoreResult<i64> {
        Ok(self.tables.read().await.investigations.len() as i64)
    }

    async fn insert_criminal_record(&self, record: &CriminalRecord) -> CoreResult<()> {
        let mut tables = self.tables.write().await;
        if tables
            .criminal_records
            .values()
            .any(|r| r.national_id == record.national_id)
        {
            return Err(CoreError::Conflict(format!(
                "national id {} is already on file",
                record.national_id
            )));
        }
        tables.criminal_records.insert(record.id, record.clone());
        Ok(())
    }

    async fn get_criminal_record(&self, id: Uuid) -> CoreResult<Option<CriminalRecord>> {
        Ok(self.tables.read().await.criminal_records.get(&id).cloned())
    }

    async fn list_criminal_records(&self, filter: &SearchFilter) -> CoreResult<Vec<CriminalRecord>> {
        let tables = self.tables.read().await;
        let matching = newest_first(
            tables
                .criminal_records
                .values()
                .filter(|r| {
                    filter
                        .search
                        .as_deref()
                        .map_or(true, |needle| r.matches_search(needle))
                })
                .cloned(),
            |r| r.created_at,
        );
        Ok(filter.page.slice(matching.into_iter()))
    }

    async fn update_criminal_record(&self, record: &CriminalRecord) -> CoreResult<bool> {
        let mut tables = self.tables.write().await;
        if tables
            .criminal_records
            .values()
            .any(|r| r.id != record.id && r.national_id == record.national_id)
        {
            return Err(CoreError::Conflict(format!(
                "national id {} is already on file",
                record.national_id
            )));
        }
        match tables.criminal_records.get_mut(&record.id) {
            Some(existing) => {
                *existing = record.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_criminal_record(&self, id: Uuid) -> CoreResult<bool> {
        let mut tables = self.tables.write().await;
        let removed = tables.criminal_records.remove(&id).is_some();
        if removed {
            for crime in tables.crimes.values_mut() {
                if crime.criminal_id == Some(id) {
                    crime.criminal_id = None;
                }
            }
        }
        Ok(removed)
    }

    async fn count_criminal_records(&self) -> CoreResult<i64> {
        Ok(self.tables.read().await.criminal_records.len() as i64)
    }

    async fn append_audit(&self, entry: &AuditLogEntry) -> CoreResult<()> {
        self.tables.write().await.audit_logs.push(entry.clone());
        Ok(())
    }

    async fn list_audit(&self, filter: &SearchFilter) -> CoreResult<Vec<AuditLogEntry>> {
        let tables = self.tables.read().await;
        // Appended in time order; walk backwards for newest first.
        Ok(filter.page.slice(
            tables
                .audit_logs
                .iter()
                .rev()
                .filter(|e| {
                    filter
                        .search
                        .as_deref()
                        .map_or(true, |needle| e.matches_search(needle))
                })
                .cloned(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Page;
    use crate::{NewCrimeReport, NewInvestigation, Priority, Severity};
    use chrono::{NaiveDate, Utc};

    fn profile(email: &str, role: Role) -> Profile {
        let now = Utc::now();
        Profile {
            id: Uuid::new_v4(),
            email: email.to_string(),
            full_name: "Test User".to_string(),
            role,
            badge_number: None,
            department: None,
            phone: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn report(reporter: Uuid) -> CrimeReport {
        CrimeReport::new(
            NewCrimeReport {
                crime_type: "Theft".to_string(),
                description: "Phone snatched".to_string(),
                location: "Kumasi".to_string(),
                date_occurred: NaiveDate::from_ymd_opt(2024, 5, 1)
                    .unwrap()
                    .and_hms_opt(9, 0, 0)
                    .unwrap(),
                severity: Severity::Low,
                witness_info: None,
            },
            reporter,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let store = MemoryStore::new();
        store
            .insert_account(&profile("a@b.co", Role::Public), "hash")
            .await
            .unwrap();
        let err = store
            .insert_account(&profile("a@b.co", Role::Officer), "hash")
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_scope_filters_reports() {
        let store = MemoryStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        store.insert_crime_report(&report(alice)).await.unwrap();
        store.insert_crime_report(&report(alice)).await.unwrap();
        store.insert_crime_report(&report(bob)).await.unwrap();

        let all = store
            .list_crime_reports(&CrimeReportFilter::new(Scope::All))
            .await
            .unwrap();
        assert_eq!(all.len(), 3);

        let mine = store
            .list_crime_reports(&CrimeReportFilter::new(Scope::ReportedBy(bob)))
            .await
            .unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].reported_by, Some(bob));

        let counts = store
            .crime_status_counts(Scope::ReportedBy(alice))
            .await
            .unwrap();
        assert_eq!(counts.get(&CrimeStatus::Reported), Some(&2));
    }

    #[tokio::test]
    async fn test_listing_is_newest_first_and_paged() {
        let store = MemoryStore::new();
        let reporter = Uuid::new_v4();
        let mut ids = Vec::new();
        for offset in 0..5 {
            let mut r = report(reporter);
            r.created_at = Utc::now() + chrono::Duration::seconds(offset);
            ids.push(r.id);
            store.insert_crime_report(&r).await.unwrap();
        }
        let mut filter = CrimeReportFilter::new(Scope::All);
        filter.page = Page::new(Some(1), Some(2));
        let first = store.list_crime_reports(&filter).await.unwrap();
        assert_eq!(first.iter().map(|r| r.id).collect::<Vec<_>>(), vec![ids[4], ids[3]]);
    }

    #[tokio::test]
    async fn test_deleting_report_cascades_to_investigations() {
        let store = MemoryStore::new();
        let crime = report(Uuid::new_v4());
        store.insert_crime_report(&crime).await.unwrap();
        let investigation = Investigation::new(NewInvestigation {
            title: "Theft follow-up".to_string(),
            description: "CCTV review".to_string(),
            crime_id: crime.id,
            lead_officer: None,
            priority: Priority::Medium,
        })
        .unwrap();
        store.insert_investigation(&investigation).await.unwrap();

        assert!(store.delete_crime_report(crime.id).await.unwrap());
        assert_eq!(store.count_investigations().await.unwrap(), 0);
        assert!(!store.delete_crime_report(crime.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_investigation_requires_existing_crime() {
        let store = MemoryStore::new();
        let investigation = Investigation::new(NewInvestigation {
            title: "Orphan".to_string(),
            description: "No crime".to_string(),
            crime_id: Uuid::new_v4(),
            lead_officer: None,
            priority: Priority::Low,
        })
        .unwrap();
        assert!(matches!(
            store.insert_investigation(&investigation).await,
            Err(CoreError::NotFound { .. })
        ));
    }
}
