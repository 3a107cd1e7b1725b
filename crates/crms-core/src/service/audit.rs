use super::RecordService;
use crate::access::{policy, Actor, Resource};
use crate::store::{ListParams, Page, SearchFilter};
use crate::{AuditLogView, CoreResult};

/// Page size of the audit trail when the caller does not ask for one.
pub const DEFAULT_AUDIT_PAGE: i64 = 100;

impl RecordService {
    /// Newest entries first, with the acting user's name joined on.
    pub async fn list_audit_logs(&self, actor: &Actor, params: &ListParams) -> CoreResult<Vec<AuditLogView>> {
        policy::read_scope(actor, Resource::AuditLog)?;
        let filter = SearchFilter {
            search: params.search(),
            page: Page::with_default(params.page, params.limit, DEFAULT_AUDIT_PAGE),
        };
        let entries = self.store.list_audit(&filter).await?;
        let people = self.people().await?;

        Ok(entries
            .into_iter()
            .map(|entry| AuditLogView {
                user_name: people.name(entry.user_id),
                entry,
            })
            .collect())
    }
}
