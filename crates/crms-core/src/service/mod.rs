//! Record service
//!
//! Every read and write from the HTTP API and the CLI goes through
//! [`RecordService`]. Each operation resolves the caller's scope with
//! [`crate::access::policy`], talks to the [`RecordStore`], and appends an
//! audit entry for every mutation.

mod accounts;
mod audit;
mod crime_reports;
mod criminal_records;
mod dashboard;
mod investigations;

pub use crime_reports::CrimeReportQuery;

use crate::access::Actor;
use crate::evidence::BlobStore;
use crate::store::RecordStore;
use crate::{AuditAction, AuditLogEntry, CoreResult, Profile, ProfileSummary};
use chrono::Utc;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

#[derive(Clone)]
pub struct RecordService {
    store: Arc<dyn RecordStore>,
    blobs: Arc<dyn BlobStore>,
}

impl RecordService {
    pub fn new(store: Arc<dyn RecordStore>, blobs: Arc<dyn BlobStore>) -> Self {
        Self { store, blobs }
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    /// Append an audit entry. The mutation has already been committed, so a
    /// failed write is logged rather than returned.
    async fn audit<T: Serialize>(
        &self,
        actor: Option<&Actor>,
        action: AuditAction,
        table: &str,
        record_id: Uuid,
        changes: Option<&T>,
    ) {
        let entry = AuditLogEntry {
            id: Uuid::new_v4(),
            action,
            table_name: table.to_string(),
            record_id: Some(record_id),
            user_id: actor.map(|a| a.id),
            ip_address: actor.and_then(|a| a.ip_address.clone()),
            changes: changes.and_then(|c| serde_json::to_value(c).ok()),
            created_at: Utc::now(),
        };

        if let Err(e) = self.store.append_audit(&entry).await {
            warn!("Failed to record {} on {} {}: {}", action, table, record_id, e);
        }
    }

    /// All profiles keyed by id, for joining names onto listings.
    async fn people(&self) -> CoreResult<People> {
        let profiles = self.store.list_profiles(None).await?;
        Ok(People(profiles.into_iter().map(|p| (p.id, p)).collect()))
    }
}

struct People(HashMap<Uuid, Profile>);

impl People {
    fn summary(&self, id: Option<Uuid>) -> Option<ProfileSummary> {
        id.and_then(|id| self.0.get(&id)).map(ProfileSummary::from)
    }

    fn name(&self, id: Option<Uuid>) -> Option<String> {
        id.and_then(|id| self.0.get(&id)).map(|p| p.full_name.clone())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::{MemoryBlobStore, MemoryStore, NewAccount, Role};

    pub struct Fixture {
        pub service: RecordService,
        pub blobs: Arc<MemoryBlobStore>,
        pub admin: Actor,
        pub officer: Actor,
        pub other_officer: Actor,
        pub citizen: Actor,
        pub neighbour: Actor,
    }

    pub fn account(email: &str, name: &str, role: Role) -> NewAccount {
        NewAccount {
            email: email.to_string(),
            password: "password123".to_string(),
            full_name: name.to_string(),
            role,
            badge_number: None,
            department: None,
            phone: None,
        }
    }

    pub async fn fixture() -> Fixture {
        fixture_with_blobs(MemoryBlobStore::default()).await
    }

    pub async fn fixture_with_blobs(blobs: MemoryBlobStore) -> Fixture {
        let blobs = Arc::new(blobs);
        let service = RecordService::new(Arc::new(MemoryStore::new()), blobs.clone());

        let mut actors = Vec::new();
        for (email, name, role) in [
            ("admin@crcrms.gov.gh", "Kwame Mensah", Role::Admin),
            ("officer1@crcrms.gov.gh", "Ama Owusu", Role::Officer),
            ("officer2@crcrms.gov.gh", "Yaa Asantewaa", Role::Officer),
            ("citizen1@example.com", "Kofi Boateng", Role::Public),
            ("citizen2@example.com", "Grace Osei", Role::Public),
        ] {
            let profile = service
                .create_account(None, account(email, name, role))
                .await
                .unwrap();
            actors.push(Actor::new(profile.id, profile.role));
        }

        let mut actors = actors.into_iter();
        Fixture {
            service,
            blobs,
            admin: actors.next().unwrap(),
            officer: actors.next().unwrap(),
            other_officer: actors.next().unwrap(),
            citizen: actors.next().unwrap(),
            neighbour: actors.next().unwrap(),
        }
    }
}
