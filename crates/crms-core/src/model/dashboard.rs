//! Dashboard overview

use super::{CrimeReport, Role};
use serde::Serialize;
use std::collections::BTreeMap;

/// Counters and recent activity shown on the landing page. Counters a role
/// is not allowed to see are left out.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub role: Role,
    pub crime_reports: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub criminal_records: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub investigations: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_cases: Option<i64>,
    pub status_counts: BTreeMap<String, i64>,
    pub recent_reports: Vec<CrimeReport>,
    pub assigned_reports: Vec<CrimeReport>,
}
