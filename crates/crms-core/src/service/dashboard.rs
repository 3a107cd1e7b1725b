use super::crime_reports::redact;
use super::RecordService;
use crate::access::{policy, Actor, Resource, Scope};
use crate::store::{CrimeReportFilter, Page};
use crate::{CoreResult, CrimeReport, DashboardSummary, Role};
use std::collections::BTreeMap;

/// Number of reports shown in each dashboard panel.
pub const RECENT_LIMIT: i64 = 5;

impl RecordService {
    /// Counters and recent activity for the caller's home screen, computed
    /// over the rows the caller is allowed to see.
    pub async fn dashboard_summary(&self, actor: &Actor) -> CoreResult<DashboardSummary> {
        let scope = policy::read_scope(actor, Resource::CrimeReport)?;
        let counts = self.store.crime_status_counts(scope).await?;

        let mut summary = DashboardSummary {
            role: actor.role,
            crime_reports: counts.values().sum(),
            criminal_records: None,
            investigations: None,
            users: None,
            assigned_cases: None,
            status_counts: counts
                .iter()
                .map(|(status, n)| (status.to_string(), *n))
                .collect::<BTreeMap<_, _>>(),
            recent_reports: self.recent_reports(actor, scope).await?,
            assigned_reports: Vec::new(),
        };

        if actor.role.is_staff() {
            summary.criminal_records = Some(self.store.count_criminal_records().await?);
            summary.investigations = Some(self.store.count_investigations().await?);
        }

        match actor.role {
            Role::Admin => {
                summary.users = Some(self.store.count_profiles().await?);
            }
            Role::Officer => {
                let assigned = scope.assigned_to(actor.id);
                let assigned_counts = self.store.crime_status_counts(assigned).await?;
                summary.assigned_cases = Some(assigned_counts.values().sum());
                summary.assigned_reports = self.recent_reports(actor, assigned).await?;
            }
            Role::Public => {}
        }

        Ok(summary)
    }

    async fn recent_reports(&self, actor: &Actor, scope: Scope) -> CoreResult<Vec<CrimeReport>> {
        let filter = CrimeReportFilter {
            page: Page::first(RECENT_LIMIT),
            ..CrimeReportFilter::new(scope)
        };
        let reports = self.store.list_crime_reports(&filter).await?;
        Ok(if actor.role.is_staff() {
            reports
        } else {
            reports.into_iter().map(redact).collect()
        })
    }
}
