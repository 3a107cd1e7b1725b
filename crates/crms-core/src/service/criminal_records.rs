use super::RecordService;
use crate::access::{policy, Action, Actor, Resource, Target};
use crate::model::audit::tables;
use crate::store::{ListParams, SearchFilter};
use crate::{AuditAction, CoreError, CoreResult, CriminalRecord, CriminalRecordInput};
use uuid::Uuid;

impl RecordService {
    /// Staff listing, searchable by name or national id.
    pub async fn list_criminal_records(
        &self,
        actor: &Actor,
        params: &ListParams,
    ) -> CoreResult<Vec<CriminalRecord>> {
        policy::read_scope(actor, Resource::CriminalRecord)?;
        let filter = SearchFilter {
            search: params.search(),
            page: params.page(),
        };
        self.store.list_criminal_records(&filter).await
    }

    pub async fn get_criminal_record(&self, actor: &Actor, id: Uuid) -> CoreResult<CriminalRecord> {
        policy::read_scope(actor, Resource::CriminalRecord)?;
        self.load_criminal_record(id).await
    }

    pub async fn create_criminal_record(
        &self,
        actor: &Actor,
        input: CriminalRecordInput,
    ) -> CoreResult<CriminalRecord> {
        policy::authorize(actor, Action::Create, Target::CriminalRecord)?;
        let record = CriminalRecord::new(input, actor.id)?;
        self.store.insert_criminal_record(&record).await?;
        self.audit(
            Some(actor),
            AuditAction::Insert,
            tables::CRIMINAL_RECORDS,
            record.id,
            Some(&record),
        )
        .await;
        Ok(record)
    }

    pub async fn update_criminal_record(
        &self,
        actor: &Actor,
        id: Uuid,
        input: CriminalRecordInput,
    ) -> CoreResult<CriminalRecord> {
        policy::authorize(actor, Action::Update, Target::CriminalRecord)?;
        let mut record = self.load_criminal_record(id).await?;

        input.apply(&mut record)?;
        if !self.store.update_criminal_record(&record).await? {
            return Err(CoreError::not_found("criminal record", id));
        }
        self.audit(
            Some(actor),
            AuditAction::Update,
            tables::CRIMINAL_RECORDS,
            id,
            Some(&record),
        )
        .await;
        Ok(record)
    }

    pub async fn delete_criminal_record(&self, actor: &Actor, id: Uuid) -> CoreResult<()> {
        policy::authorize(actor, Action::Delete, Target::CriminalRecord)?;
        let record = self.load_criminal_record(id).await?;

        if !self.store.delete_criminal_record(id).await? {
            return Err(CoreError::not_found("criminal record", id));
        }
        self.audit(
            Some(actor),
            AuditAction::Delete,
            tables::CRIMINAL_RECORDS,
            id,
            Some(&record),
        )
        .await;
        Ok(())
    }

    async fn load_criminal_record(&self, id: Uuid) -> CoreResult<CriminalRecord> {
        self.store
            .get_criminal_record(id)
            .await?
            .ok_or_else(|| CoreError::not_found("criminal record", id))
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::fixture;
    use super::*;
    use crate::{Gender, RecordStatus};
    use chrono::NaiveDate;

    fn input(first: &str, last: &str, national_id: &str) -> CriminalRecordInput {
        CriminalRecordInput {
            first_name: first.into(),
            last_name: last.into(),
            date_of_birth: NaiveDate::from_ymd_opt(1985, 11, 2).unwrap(),
            national_id: national_id.into(),
            gender: Gender::Female,
            address: Some("Tamale".into()),
            status: RecordStatus::Active,
        }
    }

    #[tokio::test]
    async fn test_writes_are_admin_only() {
        let fx = fixture().await;
        assert!(matches!(
            fx.service
                .create_criminal_record(&fx.officer, input("Abena", "Mensah", "GHA-1"))
                .await,
            Err(CoreError::Forbidden(_))
        ));

        let record = fx
            .service
            .create_criminal_record(&fx.admin, input("Abena", "Mensah", "gha-1"))
            .await
            .unwrap();
        assert_eq!(record.national_id, "GHA-1");
        assert_eq!(record.created_by, Some(fx.admin.id));

        assert!(fx
            .service
            .update_criminal_record(&fx.officer, record.id, input("Abena", "Owusu", "GHA-1"))
            .await
            .is_err());
        let updated = fx
            .service
            .update_criminal_record(&fx.admin, record.id, input("Abena", "Owusu", "GHA-1"))
            .await
            .unwrap();
        assert_eq!(updated.last_name, "Owusu");
    }

    #[tokio::test]
    async fn test_duplicate_national_id() {
        let fx = fixture().await;
        fx.service
            .create_criminal_record(&fx.admin, input("Abena", "Mensah", "GHA-1"))
            .await
            .unwrap();
        assert!(matches!(
            fx.service
                .create_criminal_record(&fx.admin, input("Efua", "Sarpong", "GHA-1"))
                .await,
            Err(CoreError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_search_and_visibility() {
        let fx = fixture().await;
        fx.service
            .create_criminal_record(&fx.admin, input("Abena", "Mensah", "GHA-1"))
            .await
            .unwrap();
        fx.service
            .create_criminal_record(&fx.admin, input("Efua", "Sarpong", "GHA-2"))
            .await
            .unwrap();

        let params = ListParams {
            search: Some("sarp".into()),
            ..Default::default()
        };
        let found = fx.service.list_criminal_records(&fx.officer, &params).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].first_name, "Efua");

        let params = ListParams {
            search: Some("gha-1".into()),
            ..Default::default()
        };
        assert_eq!(
            fx.service.list_criminal_records(&fx.admin, &params).await.unwrap().len(),
            1
        );

        assert!(matches!(
            fx.service
                .list_criminal_records(&fx.citizen, &ListParams::default())
                .await,
            Err(CoreError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn test_delete() {
        let fx = fixture().await;
        let record = fx
            .service
            .create_criminal_record(&fx.admin, input("Abena", "Mensah", "GHA-1"))
            .await
            .unwrap();
        fx.service.delete_criminal_record(&fx.admin, record.id).await.unwrap();
        assert!(matches!(
            fx.service.get_criminal_record(&fx.officer, record.id).await,
            Err(CoreError::NotFound { .. })
        ));
    }
}
