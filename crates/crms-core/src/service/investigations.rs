use super::RecordService;
use crate::access::{policy, Action, Actor, Resource, Target};
use crate::model::audit::tables;
use crate::store::{ListParams, SearchFilter};
use crate::{
    AuditAction, CoreError, CoreResult, CrimeSummary, Investigation, InvestigationUpdate,
    InvestigationView, NewInvestigation, Role,
};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

impl RecordService {
    pub async fn list_investigations(
        &self,
        actor: &Actor,
        params: &ListParams,
    ) -> CoreResult<Vec<InvestigationView>> {
        policy::read_scope(actor, Resource::Investigation)?;
        let filter = SearchFilter {
            search: params.search(),
            page: params.page(),
        };
        let investigations = self.store.list_investigations(&filter).await?;
        self.investigation_views(investigations).await
    }

    pub async fn get_investigation(&self, actor: &Actor, id: Uuid) -> CoreResult<InvestigationView> {
        policy::read_scope(actor, Resource::Investigation)?;
        let investigation = self.load_investigation(id).await?;
        let mut views = self.investigation_views(vec![investigation]).await?;
        views.pop().ok_or_else(|| CoreError::not_found("investigation", id))
    }

    pub async fn create_investigation(
        &self,
        actor: &Actor,
        input: NewInvestigation,
    ) -> CoreResult<Investigation> {
        policy::authorize(actor, Action::Create, Target::NewInvestigation)?;

        if self.store.get_crime_report(input.crime_id).await?.is_none() {
            return Err(CoreError::not_found("crime report", input.crime_id));
        }
        if let Some(lead) = input.lead_officer {
            self.ensure_officer(lead).await?;
        }

        let investigation = Investigation::new(input)?;
        self.store.insert_investigation(&investigation).await?;
        self.audit(
            Some(actor),
            AuditAction::Insert,
            tables::INVESTIGATIONS,
            investigation.id,
            Some(&investigation),
        )
        .await;
        Ok(investigation)
    }

    /// Admins and the lead officer may edit. The end date is only replaced
    /// when the edit carries one.
    pub async fn update_investigation(
        &self,
        actor: &Actor,
        id: Uuid,
        update: InvestigationUpdate,
    ) -> CoreResult<Investigation> {
        policy::read_scope(actor, Resource::Investigation)?;
        let mut investigation = self.load_investigation(id).await?;
        policy::authorize(
            actor,
            Action::Update,
            Target::Investigation {
                lead_officer: investigation.lead_officer,
            },
        )?;

        update.apply(&mut investigation)?;
        if !self.store.update_investigation(&investigation).await? {
            return Err(CoreError::not_found("investigation", id));
        }
        self.audit(
            Some(actor),
            AuditAction::Update,
            tables::INVESTIGATIONS,
            id,
            Some(&investigation),
        )
        .await;
        Ok(investigation)
    }

    pub async fn delete_investigation(&self, actor: &Actor, id: Uuid) -> CoreResult<()> {
        policy::read_scope(actor, Resource::Investigation)?;
        let investigation = self.load_investigation(id).await?;
        policy::authorize(
            actor,
            Action::Delete,
            Target::Investigation {
                lead_officer: investigation.lead_officer,
            },
        )?;

        if !self.store.delete_investigation(id).await? {
            return Err(CoreError::not_found("investigation", id));
        }
        self.audit(
            Some(actor),
            AuditAction::Delete,
            tables::INVESTIGATIONS,
            id,
            Some(&investigation),
        )
        .await;
        Ok(())
    }

    async fn load_investigation(&self, id: Uuid) -> CoreResult<Investigation> {
        self.store
            .get_investigation(id)
            .await?
            .ok_or_else(|| CoreError::not_found("investigation", id))
    }

    async fn ensure_officer(&self, id: Uuid) -> CoreResult<()> {
        match self.store.get_profile(id).await? {
            Some(profile) if profile.role == Role::Officer => Ok(()),
            Some(profile) => Err(CoreError::validation(format!(
                "{} is not an officer",
                profile.full_name
            ))),
            None => Err(CoreError::not_found("profile", id)),
        }
    }

    async fn investigation_views(
        &self,
        investigations: Vec<Investigation>,
    ) -> CoreResult<Vec<InvestigationView>> {
        let people = self.people().await?;

        let crime_ids: HashSet<Uuid> = investigations.iter().map(|i| i.crime_id).collect();
        let mut crimes = HashMap::new();
        for crime_id in crime_ids {
            if let Some(report) = self.store.get_crime_report(crime_id).await? {
                crimes.insert(
                    crime_id,
                    CrimeSummary {
                        id: report.id,
                        crime_type: report.crime_type,
                        location: report.location,
                    },
                );
            }
        }

        Ok(investigations
            .into_iter()
            .map(|investigation| InvestigationView {
                crime: crimes.get(&investigation.crime_id).cloned(),
                lead: people.summary(investigation.lead_officer),
                investigation,
            })
            .collect())
    }
}
