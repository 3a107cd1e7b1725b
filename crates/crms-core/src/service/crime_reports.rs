use super::RecordService;
use crate::access::{policy, Action, Actor, Resource, Target};
use crate::evidence::{object_key, EvidenceUpload};
use crate::model::audit::tables;
use crate::store::{CrimeReportFilter, Page};
use crate::{
    Assignment, AuditAction, CoreError, CoreResult, CrimeReport, CrimeReportUpdate,
    CrimeReportView, CrimeStatus, NewCrimeReport, Role,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{info, warn};
use uuid::Uuid;

/// Filters accepted by the crime report listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CrimeReportQuery {
    pub status: Option<CrimeStatus>,
    pub search: Option<String>,
    #[serde(default)]
    pub assigned_to_me: bool,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Serialize)]
struct EvidenceAdded<'a> {
    evidence_added: &'a [String],
    sha256: Vec<String>,
}

impl RecordService {
    pub async fn list_crime_reports(
        &self,
        actor: &Actor,
        query: CrimeReportQuery,
    ) -> CoreResult<Vec<CrimeReportView>> {
        let mut scope = policy::read_scope(actor, Resource::CrimeReport)?;
        if query.assigned_to_me {
            scope = scope.assigned_to(actor.id);
        }

        let filter = CrimeReportFilter {
            scope,
            status: query.status,
            search: crate::validate::optional(query.search),
            page: Page::new(query.page, query.limit),
        };
        let reports = self.store.list_crime_reports(&filter).await?;
        self.crime_report_views(actor, reports).await
    }

    pub async fn get_crime_report(&self, actor: &Actor, id: Uuid) -> CoreResult<CrimeReportView> {
        let report = self.visible_crime_report(actor, id).await?;
        let mut views = self.crime_report_views(actor, vec![report]).await?;
        views.pop().ok_or_else(|| CoreError::not_found("crime report", id))
    }

    pub async fn create_crime_report(&self, actor: &Actor, input: NewCrimeReport) -> CoreResult<CrimeReport> {
        policy::authorize(actor, Action::Create, Target::NewCrimeReport)?;
        let report = CrimeReport::new(input, actor.id)?;
        self.store.insert_crime_report(&report).await?;
        self.audit(Some(actor), AuditAction::Insert, tables::CRIMES, report.id, Some(&report))
            .await;
        info!("Crime report {} filed by {}", report.id, actor.id);
        Ok(report)
    }

    pub async fn update_crime_report(
        &self,
        actor: &Actor,
        id: Uuid,
        update: CrimeReportUpdate,
    ) -> CoreResult<CrimeReport> {
        let mut report = self.visible_crime_report(actor, id).await?;
        policy::authorize(actor, Action::Update, report_target(&report))?;

        if update.changes_case_fields(&report) && !policy::may_change_case_fields(actor) {
            return Err(CoreError::Forbidden(format!(
                "{} users may not change the status or suspect of a crime report",
                actor.role
            )));
        }
        if let Some(criminal_id) = update.criminal_id.filter(|_| !update.unlink_criminal) {
            if self.store.get_criminal_record(criminal_id).await?.is_none() {
                return Err(CoreError::not_found("criminal record", criminal_id));
            }
        }

        update.apply(&mut report)?;
        self.save_crime_report(actor, &report).await?;
        Ok(visible_fields(actor, report))
    }

    /// Hand a case to an officer, setting its status and optional notes.
    pub async fn assign_officer(&self, actor: &Actor, id: Uuid, assignment: Assignment) -> CoreResult<CrimeReport> {
        let mut report = self.visible_crime_report(actor, id).await?;
        policy::authorize(actor, Action::Assign, report_target(&report))?;

        let officer = self
            .store
            .get_profile(assignment.officer_id)
            .await?
            .ok_or_else(|| CoreError::not_found("profile", assignment.officer_id))?;
        if officer.role != Role::Officer {
            return Err(CoreError::validation(format!(
                "{} is not an officer",
                officer.full_name
            )));
        }

        assignment.apply(&mut report);
        self.save_crime_report(actor, &report).await?;
        info!("Crime report {} assigned to {}", report.id, officer.full_name);
        Ok(visible_fields(actor, report))
    }

    /// Delete a report and its investigations. Evidence files are kept.
    pub async fn delete_crime_report(&self, actor: &Actor, id: Uuid) -> CoreResult<()> {
        let report = self.visible_crime_report(actor, id).await?;
        policy::authorize(actor, Action::Delete, report_target(&report))?;

        if !self.store.delete_crime_report(id).await? {
            return Err(CoreError::not_found("crime report", id));
        }
        self.audit(Some(actor), AuditAction::Delete, tables::CRIMES, id, Some(&report))
            .await;
        Ok(())
    }

    /// Store every upload and append their URLs to the report. Either all
    /// files are attached or none are: on any failure the objects already
    /// written are removed and the report is left untouched.
    pub async fn attach_evidence(
        &self,
        actor: &Actor,
        id: Uuid,
        uploads: Vec<EvidenceUpload>,
    ) -> CoreResult<CrimeReport> {
        let mut report = self.visible_crime_report(actor, id).await?;
        policy::authorize(actor, Action::Update, report_target(&report))?;

        if uploads.is_empty() {
            return Err(CoreError::validation("no evidence files were uploaded"));
        }
        for upload in &uploads {
            upload.check()?;
        }

        let now = Utc::now();
        let mut written = Vec::with_capacity(uploads.len());
        for upload in &uploads {
            let key = object_key(report.id, upload, now);
            if let Err(e) = self.blobs.put(&key, &upload.bytes).await {
                self.discard_blobs(&written).await;
                return Err(e);
            }
            written.push(key);
        }

        let urls: Vec<String> = written.iter().map(|k| self.blobs.public_url(k)).collect();
        report.evidence_urls.extend(urls.iter().cloned());
        report.updated_at = now;

        match self.store.update_crime_report(&report).await {
            Ok(true) => {}
            Ok(false) => {
                self.discard_blobs(&written).await;
                return Err(CoreError::not_found("crime report", id));
            }
            Err(e) => {
                self.discard_blobs(&written).await;
                return Err(e);
            }
        }

        let changes = EvidenceAdded {
            evidence_added: &urls,
            sha256: uploads.iter().map(EvidenceUpload::content_hash).collect(),
        };
        self.audit(Some(actor), AuditAction::Update, tables::CRIMES, id, Some(&changes))
            .await;
        info!("Attached {} evidence file(s) to crime report {}", urls.len(), id);
        Ok(visible_fields(actor, report))
    }

    async fn discard_blobs(&self, keys: &[String]) {
        for key in keys {
            if let Err(e) = self.blobs.remove(key).await {
                warn!("Failed to remove evidence object {}: {}", key, e);
            }
        }
    }

    /// Load a report the actor is allowed to see. Reports outside the
    /// actor's scope are reported as missing.
    async fn visible_crime_report(&self, actor: &Actor, id: Uuid) -> CoreResult<CrimeReport> {
        let scope = policy::read_scope(actor, Resource::CrimeReport)?;
        match self.store.get_crime_report(id).await? {
            Some(report) if scope.admits_report(report.reported_by, report.assigned_officer) => Ok(report),
            _ => Err(CoreError::not_found("crime report", id)),
        }
    }

    async fn save_crime_report(&self, actor: &Actor, report: &CrimeReport) -> CoreResult<()> {
        if !self.store.update_crime_report(report).await? {
            return Err(CoreError::not_found("crime report", report.id));
        }
        self.audit(Some(actor), AuditAction::Update, tables::CRIMES, report.id, Some(report))
            .await;
        Ok(())
    }

    /// Join reporter, officer and suspect names onto reports. Public users
    /// get neither suspect names nor the admin's notes to officers.
    pub(super) async fn crime_report_views(
        &self,
        actor: &Actor,
        reports: Vec<CrimeReport>,
    ) -> CoreResult<Vec<CrimeReportView>> {
        let people = self.people().await?;
        let staff = actor.role.is_staff();

        let mut suspects = HashMap::new();
        if staff {
            let ids: HashSet<Uuid> = reports.iter().filter_map(|r| r.criminal_id).collect();
            for criminal_id in ids {
                if let Some(record) = self.store.get_criminal_record(criminal_id).await? {
                    suspects.insert(criminal_id, record.full_name());
                }
            }
        }

        Ok(reports
            .into_iter()
            .map(|report| {
                let report = visible_fields(actor, report);
                CrimeReportView {
                    reporter: people.summary(report.reported_by),
                    officer: people.summary(report.assigned_officer),
                    suspect_name: report.criminal_id.and_then(|c| suspects.get(&c).cloned()),
                    report,
                }
            })
            .collect())
    }
}

pub(super) fn report_target(report: &CrimeReport) -> Target {
    Target::CrimeReport {
        reported_by: report.reported_by,
        assigned_officer: report.assigned_officer,
    }
}

pub(crate) fn redact(mut report: CrimeReport) -> CrimeReport {
    report.admin_notes = None;
    report.criminal_id = None;
    report
}

/// The report as the actor may see it: staff get every field.
fn visible_fields(actor: &Actor, report: CrimeReport) -> CrimeReport {
    if actor.role.is_staff() {
        report
    } else {
        redact(report)
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{fixture, fixture_with_blobs};
    use super::*;
    use crate::store::SearchFilter;
    use crate::{CriminalRecordInput, Gender, MemoryBlobStore, RecordStatus, Severity};
    use chrono::NaiveDate;

    fn new_report(crime_type: &str) -> NewCrimeReport {
        NewCrimeReport {
            crime_type: crime_type.to_string(),
            description: "Reported at the station".to_string(),
            location: "Kumasi Central Market".to_string(),
            date_occurred: NaiveDate::from_ymd_opt(2024, 5, 1)
                .unwrap()
                .and_hms_opt(14, 30, 0)
                .unwrap(),
            severity: Severity::Medium,
            witness_info: None,
        }
    }

    fn edit(report: &CrimeReport) -> CrimeReportUpdate {
        CrimeReportUpdate {
            crime_type: report.crime_type.clone(),
            description: "Updated description".to_string(),
            location: report.location.clone(),
            date_occurred: report.date_occurred,
            severity: report.severity,
            witness_info: None,
            status: None,
            criminal_id: None,
            unlink_criminal: false,
        }
    }

    fn upload(name: &str) -> EvidenceUpload {
        EvidenceUpload {
            file_name: name.to_string(),
            content_type: Some("image/jpeg".to_string()),
            bytes: vec![0xff, 0xd8, 0xff],
        }
    }

    fn assign_to(officer: Uuid, notes: Option<&str>) -> Assignment {
        Assignment {
            officer_id: officer,
            status: CrimeStatus::UnderInvestigation,
            admin_notes: notes.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_public_users_only_see_their_own_reports() {
        let fx = fixture().await;
        let mine = fx
            .service
            .create_crime_report(&fx.citizen, new_report("Theft"))
            .await
            .unwrap();
        let theirs = fx
            .service
            .create_crime_report(&fx.neighbour, new_report("Burglary"))
            .await
            .unwrap();

        let listed = fx
            .service
            .list_crime_reports(&fx.citizen, CrimeReportQuery::default())
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].report.id, mine.id);

        assert!(matches!(
            fx.service.get_crime_report(&fx.citizen, theirs.id).await,
            Err(CoreError::NotFound { .. })
        ));

        let all = fx
            .service
            .list_crime_reports(&fx.officer, CrimeReportQuery::default())
            .await
            .unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_assigned_to_me_filter() {
        let fx = fixture().await;
        let report = fx
            .service
            .create_crime_report(&fx.citizen, new_report("Assault"))
            .await
            .unwrap();
        fx.service
            .create_crime_report(&fx.citizen, new_report("Fraud"))
            .await
            .unwrap();
        fx.service
            .assign_officer(&fx.admin, report.id, assign_to(fx.officer.id, Some("Visit the scene")))
            .await
            .unwrap();

        let query = CrimeReportQuery {
            assigned_to_me: true,
            ..Default::default()
        };
        let mine = fx.service.list_crime_reports(&fx.officer, query.clone()).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].officer.as_ref().unwrap().full_name, "Ama Owusu");
        assert_eq!(mine[0].reporter.as_ref().unwrap().full_name, "Kofi Boateng");

        // a reporter scope is never widened by the flag
        let citizen = fx.service.list_crime_reports(&fx.citizen, query).await.unwrap();
        assert_eq!(citizen.len(), 2);
    }

    #[tokio::test]
    async fn test_status_filter() {
        let fx = fixture().await;
        let report = fx
            .service
            .create_crime_report(&fx.citizen, new_report("Assault"))
            .await
            .unwrap();
        fx.service
            .create_crime_report(&fx.citizen, new_report("Fraud"))
            .await
            .unwrap();
        fx.service
            .assign_officer(&fx.admin, report.id, assign_to(fx.officer.id, None))
            .await
            .unwrap();

        let query = CrimeReportQuery {
            status: Some(CrimeStatus::Reported),
            ..Default::default()
        };
        let reported = fx.service.list_crime_reports(&fx.admin, query).await.unwrap();
        assert_eq!(reported.len(), 1);
        assert_eq!(reported[0].report.crime_type, "Fraud");
    }

    #[tokio::test]
    async fn test_reporter_cannot_change_status() {
        let fx = fixture().await;
        let report = fx
            .service
            .create_crime_report(&fx.citizen, new_report("Theft"))
            .await
            .unwrap();

        let updated = fx
            .service
            .update_crime_report(&fx.citizen, report.id, edit(&report))
            .await
            .unwrap();
        assert_eq!(updated.description, "Updated description");

        let mut closing = edit(&report);
        closing.status = Some(CrimeStatus::Closed);
        assert!(matches!(
            fx.service.update_crime_report(&fx.citizen, report.id, closing).await,
            Err(CoreError::Forbidden(_))
        ));

        assert!(matches!(
            fx.service.update_crime_report(&fx.neighbour, report.id, edit(&report)).await,
            Err(CoreError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_only_assigned_officer_updates() {
        let fx = fixture().await;
        let report = fx
            .service
            .create_crime_report(&fx.citizen, new_report("Robbery"))
            .await
            .unwrap();
        fx.service
            .assign_officer(&fx.admin, report.id, assign_to(fx.officer.id, None))
            .await
            .unwrap();

        let mut solving = edit(&report);
        solving.status = Some(CrimeStatus::Solved);
        assert!(matches!(
            fx.service
                .update_crime_report(&fx.other_officer, report.id, solving.clone())
                .await,
            Err(CoreError::Forbidden(_))
        ));

        let solved = fx
            .service
            .update_crime_report(&fx.officer, report.id, solving)
            .await
            .unwrap();
        assert_eq!(solved.status, CrimeStatus::Solved);
    }

    #[tokio::test]
    async fn test_suspect_link_requires_existing_record() {
        let fx = fixture().await;
        let report = fx
            .service
            .create_crime_report(&fx.citizen, new_report("Robbery"))
            .await
            .unwrap();

        let mut linking = edit(&report);
        linking.criminal_id = Some(Uuid::new_v4());
        assert!(matches!(
            fx.service.update_crime_report(&fx.admin, report.id, linking.clone()).await,
            Err(CoreError::NotFound { .. })
        ));

        let record = fx
            .service
            .create_criminal_record(
                &fx.admin,
                CriminalRecordInput {
                    first_name: "Kwesi".into(),
                    last_name: "Appiah".into(),
                    date_of_birth: NaiveDate::from_ymd_opt(1990, 3, 4).unwrap(),
                    national_id: "GHA-123456789-0".into(),
                    gender: Gender::Male,
                    address: None,
                    status: RecordStatus::Active,
                },
            )
            .await
            .unwrap();
        linking.criminal_id = Some(record.id);
        fx.service
            .update_crime_report(&fx.admin, report.id, linking)
            .await
            .unwrap();

        let staff_view = fx.service.get_crime_report(&fx.officer, report.id).await.unwrap();
        assert_eq!(staff_view.suspect_name.as_deref(), Some("Kwesi Appiah"));

        let public_view = fx.service.get_crime_report(&fx.citizen, report.id).await.unwrap();
        assert_eq!(public_view.suspect_name, None);
        assert_eq!(public_view.report.criminal_id, None);
    }

    #[tokio::test]
    async fn test_assignment_rules() {
        let fx = fixture().await;
        let report = fx
            .service
            .create_crime_report(&fx.citizen, new_report("Kidnapping"))
            .await
            .unwrap();

        assert!(matches!(
            fx.service
                .assign_officer(&fx.officer, report.id, assign_to(fx.officer.id, None))
                .await,
            Err(CoreError::Forbidden(_))
        ));
        assert!(matches!(
            fx.service
                .assign_officer(&fx.admin, report.id, assign_to(fx.citizen.id, None))
                .await,
            Err(CoreError::Validation(_))
        ));

        fx.service
            .assign_officer(&fx.admin, report.id, assign_to(fx.officer.id, Some("Priority case")))
            .await
            .unwrap();
        let reassigned = fx
            .service
            .assign_officer(&fx.admin, report.id, assign_to(fx.other_officer.id, Some("  ")))
            .await
            .unwrap();
        assert_eq!(reassigned.assigned_officer, Some(fx.other_officer.id));
        assert_eq!(reassigned.admin_notes.as_deref(), Some("Priority case"));
        assert_eq!(reassigned.status, CrimeStatus::UnderInvestigation);
    }

    #[tokio::test]
    async fn test_only_admin_deletes() {
        let fx = fixture().await;
        let report = fx
            .service
            .create_crime_report(&fx.citizen, new_report("Vandalism"))
            .await
            .unwrap();

        assert!(fx.service.delete_crime_report(&fx.citizen, report.id).await.is_err());
        assert!(fx.service.delete_crime_report(&fx.officer, report.id).await.is_err());
        fx.service.delete_crime_report(&fx.admin, report.id).await.unwrap();
        assert!(matches!(
            fx.service.get_crime_report(&fx.admin, report.id).await,
            Err(CoreError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_mutations_are_audited() {
        let fx = fixture().await;
        let report = fx
            .service
            .create_crime_report(&fx.citizen, new_report("Theft"))
            .await
            .unwrap();
        fx.service
            .assign_officer(&fx.admin, report.id, assign_to(fx.officer.id, None))
            .await
            .unwrap();
        fx.service.delete_crime_report(&fx.admin, report.id).await.unwrap();

        let log = fx.service.store().list_audit(&SearchFilter::default()).await.unwrap();
        let actions: Vec<AuditAction> = log
            .iter()
            .filter(|e| e.record_id == Some(report.id))
            .map(|e| e.action)
            .collect();
        assert_eq!(
            actions,
            vec![AuditAction::Delete, AuditAction::Update, AuditAction::Insert]
        );
    }

    #[tokio::test]
    async fn test_attach_evidence() {
        let fx = fixture().await;
        let report = fx
            .service
            .create_crime_report(&fx.citizen, new_report("Theft"))
            .await
            .unwrap();

        let updated = fx
            .service
            .attach_evidence(&fx.citizen, report.id, vec![upload("a.jpg"), upload("b.jpg")])
            .await
            .unwrap();
        assert_eq!(updated.evidence_urls.len(), 2);
        assert!(updated.evidence_urls[0].starts_with(&format!("/files/{}/", report.id)));
        assert_eq!(fx.blobs.len().await, 2);

        assert!(matches!(
            fx.service
                .attach_evidence(&fx.neighbour, report.id, vec![upload("c.jpg")])
                .await,
            Err(CoreError::NotFound { .. })
        ));
        assert!(matches!(
            fx.service.attach_evidence(&fx.citizen, report.id, Vec::new()).await,
            Err(CoreError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_rejected_file_stores_nothing() {
        let fx = fixture().await;
        let report = fx
            .service
            .create_crime_report(&fx.citizen, new_report("Theft"))
            .await
            .unwrap();

        let mut bad = upload("run.exe");
        bad.content_type = Some("application/x-msdownload".into());
        assert!(fx
            .service
            .attach_evidence(&fx.citizen, report.id, vec![upload("a.jpg"), bad])
            .await
            .is_err());
        assert_eq!(fx.blobs.len().await, 0);
    }

    #[tokio::test]
    async fn test_failed_write_rolls_back() {
        let fx = fixture_with_blobs(MemoryBlobStore::default().with_quota(2)).await;
        let report = fx
            .service
            .create_crime_report(&fx.citizen, new_report("Theft"))
            .await
            .unwrap();

        let err = fx
            .service
            .attach_evidence(
                &fx.citizen,
                report.id,
                vec![upload("a.jpg"), upload("b.jpg"), upload("c.jpg")],
            )
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Blob(_)));
        assert_eq!(fx.blobs.len().await, 0);

        let unchanged = fx.service.get_crime_report(&fx.citizen, report.id).await.unwrap();
        assert!(unchanged.report.evidence_urls.is_empty());
    }

    fn suspect_record() -> CriminalRecordInput {
        CriminalRecordInput {
            first_name: "Yaw".into(),
            last_name: "Boateng".into(),
            date_of_birth: NaiveDate::from_ymd_opt(1985, 7, 12).unwrap(),
            national_id: "GHA-987654321-0".into(),
            gender: Gender::Male,
            address: None,
            status: RecordStatus::Active,
        }
    }

    #[tokio::test]
    async fn test_write_responses_hide_internal_fields() {
        let fx = fixture().await;
        let report = fx
            .service
            .create_crime_report(&fx.citizen, new_report("Burglary"))
            .await
            .unwrap();
        let record = fx
            .service
            .create_criminal_record(&fx.admin, suspect_record())
            .await
            .unwrap();

        let assigned = fx
            .service
            .assign_officer(
                &fx.admin,
                report.id,
                assign_to(fx.officer.id, Some("Interview the neighbours")),
            )
            .await
            .unwrap();
        assert_eq!(assigned.admin_notes.as_deref(), Some("Interview the neighbours"));
        let mut linking = edit(&assigned);
        linking.criminal_id = Some(record.id);
        fx.service
            .update_crime_report(&fx.admin, report.id, linking)
            .await
            .unwrap();

        let edited = fx
            .service
            .update_crime_report(&fx.citizen, report.id, edit(&report))
            .await
            .unwrap();
        assert_eq!(edited.description, "Updated description");
        assert_eq!(edited.admin_notes, None);
        assert_eq!(edited.criminal_id, None);

        let attached = fx
            .service
            .attach_evidence(&fx.citizen, report.id, vec![upload("door.jpg")])
            .await
            .unwrap();
        assert_eq!(attached.evidence_urls.len(), 1);
        assert_eq!(attached.admin_notes, None);
        assert_eq!(attached.criminal_id, None);

        let stored = fx.service.get_crime_report(&fx.officer, report.id).await.unwrap();
        assert_eq!(stored.report.admin_notes.as_deref(), Some("Interview the neighbours"));
        assert_eq!(stored.report.criminal_id, Some(record.id));
    }

    #[tokio::test]
    async fn test_staff_can_unlink_suspect() {
        let fx = fixture().await;
        let report = fx
            .service
            .create_crime_report(&fx.citizen, new_report("Assault"))
            .await
            .unwrap();
        let record = fx
            .service
            .create_criminal_record(&fx.admin, suspect_record())
            .await
            .unwrap();

        let mut linking = edit(&report);
        linking.criminal_id = Some(record.id);
        let linked = fx
            .service
            .update_crime_report(&fx.admin, report.id, linking)
            .await
            .unwrap();
        assert_eq!(linked.criminal_id, Some(record.id));

        let mut unlinking = edit(&report);
        unlinking.unlink_criminal = true;
        assert!(matches!(
            fx.service
                .update_crime_report(&fx.citizen, report.id, unlinking.clone())
                .await,
            Err(CoreError::Forbidden(_))
        ));

        let unlinked = fx
            .service
            .update_crime_report(&fx.admin, report.id, unlinking)
            .await
            .unwrap();
        assert_eq!(unlinked.criminal_id, None);
        let view = fx.service.get_crime_report(&fx.admin, report.id).await.unwrap();
        assert_eq!(view.suspect_name, None);
    }

    #[tokio::test]
    async fn test_page_far_past_the_end_is_empty() {
        let fx = fixture().await;
        fx.service
            .create_crime_report(&fx.citizen, new_report("Theft"))
            .await
            .unwrap();

        let reports = fx
            .service
            .list_crime_reports(
                &fx.admin,
                CrimeReportQuery {
                    page: Some(i64::MAX),
                    limit: Some(100),
                    ..CrimeReportQuery::default()
                },
            )
            .await
            .unwrap();
        assert!(reports.is_empty());
    }

    #[tokio::test]
    async fn test_mislabelled_upload_rejected() {
        let fx = fixture().await;
        let report = fx
            .service
            .create_crime_report(&fx.citizen, new_report("Fraud"))
            .await
            .unwrap();

        let disguised = EvidenceUpload {
            file_name: "evil.html".to_string(),
            content_type: Some("image/png".to_string()),
            bytes: b"<script>alert(1)</script>".to_vec(),
        };
        assert!(matches!(
            fx.service.attach_evidence(&fx.citizen, report.id, vec![disguised]).await,
            Err(CoreError::Validation(_))
        ));
        assert_eq!(fx.blobs.len().await, 0);
    }
}
