//! Record storage seam
//!
//! The service talks to storage only through [`RecordStore`]. Updates are
//! whole-row writes keyed by id, so concurrent edits resolve as
//! last-write-wins.

pub mod memory;

pub use memory::MemoryStore;

use crate::access::Scope;
use crate::{
    AuditLogEntry, CoreResult, CrimeReport, CrimeStatus, Credentials, CriminalRecord,
    Investigation, Profile, Role,
};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeMap;
use uuid::Uuid;

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

/// A window into a newest-first listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Page {
    /// Build from 1-based page number and page size, clamping both.
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        Self::with_default(page, limit, DEFAULT_PAGE_SIZE)
    }

    pub fn with_default(page: Option<i64>, limit: Option<i64>, default_limit: i64) -> Self {
        let limit = limit.unwrap_or(default_limit).clamp(1, MAX_PAGE_SIZE);
        let page = page.unwrap_or(1).max(1);
        Self {
            limit,
            offset: (page - 1).saturating_mul(limit),
        }
    }

    pub fn first(limit: i64) -> Self {
        Self { limit, offset: 0 }
    }

    /// Apply the window to an already ordered iterator.
    pub fn slice<T>(&self, items: impl Iterator<Item = T>) -> Vec<T> {
        items
            .skip(self.offset as usize)
            .take(self.limit as usize)
            .collect()
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Query-string shape shared by list endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
}

impl ListParams {
    pub fn page(&self) -> Page {
        Page::new(self.page, self.limit)
    }

    pub fn search(&self) -> Option<String> {
        crate::validate::optional(self.search.clone())
    }
}

#[derive(Debug, Clone)]
pub struct CrimeReportFilter {
    pub scope: Scope,
    pub status: Option<CrimeStatus>,
    pub search: Option<String>,
    pub page: Page,
}

impl CrimeReportFilter {
    pub fn new(scope: Scope) -> Self {
        Self {
            scope,
            status: None,
            search: None,
            page: Page::default(),
        }
    }

    pub fn matches(&self, report: &CrimeReport) -> bool {
        self.scope.admits_report(report.reported_by, report.assigned_officer)
            && self.status.map_or(true, |s| s == report.status)
            && self
                .search
                .as_deref()
                .map_or(true, |needle| report.matches_search(needle))
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    pub search: Option<String>,
    pub page: Page,
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    // Accounts

    /// Store a new profile with its password hash. Fails with `Conflict`
    /// when the email is already registered.
    async fn insert_account(&self, profile: &Profile, password_hash: &str) -> CoreResult<()>;
    async fn credentials_by_email(&self, email: &str) -> CoreResult<Option<Credentials>>;
    async fn get_profile(&self, id: Uuid) -> CoreResult<Option<Profile>>;
    /// Profiles newest first, optionally restricted to one role.
    async fn list_profiles(&self, role: Option<Role>) -> CoreResult<Vec<Profile>>;
    async fn update_profile(&self, profile: &Profile) -> CoreResult<bool>;
    async fn count_profiles(&self) -> CoreResult<i64>;

    // Crime reports

    async fn insert_crime_report(&self, report: &CrimeReport) -> CoreResult<()>;
    async fn get_crime_report(&self, id: Uuid) -> CoreResult<Option<CrimeReport>>;
    async fn list_crime_reports(&self, filter: &CrimeReportFilter) -> CoreResult<Vec<CrimeReport>>;
    async fn update_crime_report(&self, report: &CrimeReport) -> CoreResult<bool>;
    /// Deleting a report also deletes its investigations.
    async fn delete_crime_report(&self, id: Uuid) -> CoreResult<bool>;
    async fn crime_status_counts(&self, scope: Scope) -> CoreResult<BTreeMap<CrimeStatus, i64>>;

    // Investigations

    async fn insert_investigation(&self, investigation: &Investigation) -> CoreResult<()>;
    async fn get_investigation(&self, id: Uuid) -> CoreResult<Option<Investigation>>;
    async fn list_investigations(&self, filter: &SearchFilter) -> CoreResult<Vec<Investigation>>;
    async fn update_investigation(&self, investigation: &Investigation) -> CoreResult<bool>;
    async fn delete_investigation(&self, id: Uuid) -> CoreResult<bool>;
    async fn count_investigations(&self) -> CoreResult<i64>;

    // Criminal records

    /// Fails with `Conflict` when the national id is already on file.
    async fn insert_criminal_record(&self, record: &CriminalRecord) -> CoreResult<()>;
    async fn get_criminal_record(&self, id: Uuid) -> CoreResult<Option<CriminalRecord>>;
    async fn list_criminal_records(&self, filter: &SearchFilter) -> CoreResult<Vec<CriminalRecord>>;
    async fn update_criminal_record(&self, record: &CriminalRecord) -> CoreResult<bool>;
    /// Deleting a record clears it as the suspect on any crime report.
    async fn delete_criminal_record(&self, id: Uuid) -> CoreResult<bool>;
    async fn count_criminal_records(&self) -> CoreResult<i64>;

    // Audit trail

    async fn append_audit(&self, entry: &AuditLogEntry) -> CoreResult<()>;
    async fn list_audit(&self, filter: &SearchFilter) -> CoreResult<Vec<AuditLogEntry>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_clamping() {
        assert_eq!(Page::new(None, None), Page { limit: 20, offset: 0 });
        assert_eq!(Page::new(Some(3), Some(10)), Page { limit: 10, offset: 20 });
        assert_eq!(Page::new(Some(0), Some(1000)), Page { limit: 100, offset: 0 });
        assert_eq!(Page::new(Some(-2), Some(0)), Page { limit: 1, offset: 0 });
        assert_eq!(
            Page::new(Some(i64::MAX), Some(100)),
            Page { limit: 100, offset: i64::MAX }
        );
        assert!(Page::new(Some(i64::MAX), None).slice(1..=5).is_empty());
    }

    #[test]
    fn test_page_slice() {
        let page = Page::new(Some(2), Some(2));
        assert_eq!(page.slice(1..=5), vec![3, 4]);
    }
}
