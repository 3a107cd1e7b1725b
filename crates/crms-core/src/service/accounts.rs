use super::RecordService;
use crate::access::{policy, Action, Actor, Resource, Target};
use crate::credentials::{hash_password, verify_password};
use crate::model::audit::tables;
use crate::{
    AuditAction, CoreError, CoreResult, NewAccount, OwnProfileUpdate, Profile, ProfileUpdate, Role,
};
use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

impl RecordService {
    /// Self-registration. Whatever role was asked for, the account is public.
    pub async fn sign_up(&self, account: NewAccount, ip_address: Option<String>) -> CoreResult<Profile> {
        let account = NewAccount {
            role: Role::Public,
            ..account
        };
        let profile = self.insert_account(account).await?;
        let actor = Actor::new(profile.id, profile.role).with_ip(ip_address);
        self.audit(Some(&actor), AuditAction::Insert, tables::PROFILES, profile.id, Some(&profile))
            .await;
        info!("New public account {}", profile.email);
        Ok(profile)
    }

    /// Create an account of any role. `None` is the operator at the console
    /// (migrations, seeding); otherwise the actor must administer accounts.
    pub async fn create_account(&self, actor: Option<&Actor>, account: NewAccount) -> CoreResult<Profile> {
        if let Some(actor) = actor {
            policy::authorize(actor, Action::Create, Target::Accounts)?;
        }
        let profile = self.insert_account(account).await?;
        self.audit(actor, AuditAction::Insert, tables::PROFILES, profile.id, Some(&profile))
            .await;
        info!("Created {} account {}", profile.role, profile.email);
        Ok(profile)
    }

    /// Officers are created by admins and must carry a badge number.
    pub async fn create_officer(&self, actor: &Actor, account: NewAccount) -> CoreResult<Profile> {
        if crate::validate::optional(account.badge_number.clone()).is_none() {
            return Err(CoreError::validation("badge_number is required for officers"));
        }
        let account = NewAccount {
            role: Role::Officer,
            ..account
        };
        self.create_account(Some(actor), account).await
    }

    async fn insert_account(&self, account: NewAccount) -> CoreResult<Profile> {
        let account = account.normalized()?;
        let password_hash = hash_password(&account.password)?;
        let now = Utc::now();
        let profile = Profile {
            id: Uuid::new_v4(),
            email: account.email,
            full_name: account.full_name,
            role: account.role,
            badge_number: account.badge_number,
            department: account.department,
            phone: account.phone,
            created_at: now,
            updated_at: now,
        };
        self.store.insert_account(&profile, &password_hash).await?;
        Ok(profile)
    }

    /// Check an email and password pair. Unknown emails and wrong passwords
    /// fail the same way.
    pub async fn authenticate(&self, email: &str, password: &str) -> CoreResult<Profile> {
        let email = email.trim().to_lowercase();
        let credentials = match self.store.credentials_by_email(&email).await? {
            Some(c) => c,
            None => {
                debug!("Login for unknown email {}", email);
                return Err(CoreError::InvalidCredentials);
            }
        };

        if !verify_password(password, &credentials.password_hash) {
            debug!("Wrong password for {}", email);
            return Err(CoreError::InvalidCredentials);
        }

        self.store
            .get_profile(credentials.user_id)
            .await?
            .ok_or(CoreError::InvalidCredentials)
    }

    /// Rebuild an actor from a user id, picking up the current role.
    pub async fn resolve_actor(&self, user_id: Uuid, ip_address: Option<String>) -> CoreResult<Actor> {
        let profile = self
            .store
            .get_profile(user_id)
            .await?
            .ok_or_else(|| CoreError::not_found("profile", user_id))?;
        Ok(Actor::new(profile.id, profile.role).with_ip(ip_address))
    }

    /// The caller's own profile.
    pub async fn profile(&self, actor: &Actor) -> CoreResult<Profile> {
        self.store
            .get_profile(actor.id)
            .await?
            .ok_or_else(|| CoreError::not_found("profile", actor.id))
    }

    pub async fn list_users(&self, actor: &Actor, role: Option<Role>) -> CoreResult<Vec<Profile>> {
        policy::read_scope(actor, Resource::Account)?;
        self.store.list_profiles(role).await
    }

    pub async fn list_officers(&self, actor: &Actor) -> CoreResult<Vec<Profile>> {
        self.list_users(actor, Some(Role::Officer)).await
    }

    /// Admins read any profile; everyone else only their own.
    pub async fn get_user(&self, actor: &Actor, id: Uuid) -> CoreResult<Profile> {
        if id != actor.id {
            policy::read_scope(actor, Resource::Account)?;
        }
        self.store
            .get_profile(id)
            .await?
            .ok_or_else(|| CoreError::not_found("profile", id))
    }

    pub async fn update_user(&self, actor: &Actor, id: Uuid, update: ProfileUpdate) -> CoreResult<Profile> {
        policy::authorize(actor, Action::Update, Target::Accounts)?;
        let mut profile = self
            .store
            .get_profile(id)
            .await?
            .ok_or_else(|| CoreError::not_found("profile", id))?;

        update.apply(&mut profile)?;
        self.save_profile(actor, &profile).await?;
        Ok(profile)
    }

    pub async fn update_own_profile(&self, actor: &Actor, update: OwnProfileUpdate) -> CoreResult<Profile> {
        policy::authorize(actor, Action::Update, Target::Account { id: actor.id })?;
        let mut profile = self.profile(actor).await?;

        update.apply(&mut profile)?;
        self.save_profile(actor, &profile).await?;
        Ok(profile)
    }

    async fn save_profile(&self, actor: &Actor, profile: &Profile) -> CoreResult<()> {
        if !self.store.update_profile(profile).await? {
            return Err(CoreError::not_found("profile", profile.id));
        }
        self.audit(Some(actor), AuditAction::Update, tables::PROFILES, profile.id, Some(profile))
            .await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{account, fixture};
    use super::*;
    use crate::store::SearchFilter;

    #[tokio::test]
    async fn test_sign_up_forces_public_role() {
        let fx = fixture().await;
        let profile = fx
            .service
            .sign_up(account("new@example.com", "Esi Darko", Role::Admin), Some("10.0.0.9".into()))
            .await
            .unwrap();
        assert_eq!(profile.role, Role::Public);

        let log = fx.service.store().list_audit(&SearchFilter::default()).await.unwrap();
        let entry = log.iter().find(|e| e.record_id == Some(profile.id)).unwrap();
        assert_eq!(entry.user_id, Some(profile.id));
        assert_eq!(entry.ip_address.as_deref(), Some("10.0.0.9"));
    }

    #[tokio::test]
    async fn test_duplicate_sign_up_conflicts() {
        let fx = fixture().await;
        let err = fx
            .service
            .sign_up(account("Citizen1@Example.com", "Someone", Role::Public), None)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_authenticate() {
        let fx = fixture().await;
        let profile = fx
            .service
            .authenticate(" ADMIN@crcrms.gov.gh", "password123")
            .await
            .unwrap();
        assert_eq!(profile.id, fx.admin.id);

        assert!(matches!(
            fx.service.authenticate("admin@crcrms.gov.gh", "wrong-pass").await,
            Err(CoreError::InvalidCredentials)
        ));
        assert!(matches!(
            fx.service.authenticate("nobody@crcrms.gov.gh", "password123").await,
            Err(CoreError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_only_admins_create_officers() {
        let fx = fixture().await;
        let mut input = account("officer3@crcrms.gov.gh", "Kojo Antwi", Role::Public);

        assert!(matches!(
            fx.service.create_officer(&fx.admin, input.clone()).await,
            Err(CoreError::Validation(_))
        ));

        input.badge_number = Some("OFF-003".into());
        assert!(matches!(
            fx.service.create_officer(&fx.officer, input.clone()).await,
            Err(CoreError::Forbidden(_))
        ));

        let officer = fx.service.create_officer(&fx.admin, input).await.unwrap();
        assert_eq!(officer.role, Role::Officer);
        assert_eq!(fx.service.list_officers(&fx.admin).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_user_listing_is_admin_only() {
        let fx = fixture().await;
        assert_eq!(fx.service.list_users(&fx.admin, None).await.unwrap().len(), 5);
        assert_eq!(
            fx.service.list_users(&fx.admin, Some(Role::Public)).await.unwrap().len(),
            2
        );
        assert!(fx.service.list_users(&fx.officer, None).await.is_err());
        assert!(fx.service.list_officers(&fx.citizen).await.is_err());
    }

    #[tokio::test]
    async fn test_get_user_own_or_admin() {
        let fx = fixture().await;
        assert!(fx.service.get_user(&fx.citizen, fx.citizen.id).await.is_ok());
        assert!(fx.service.get_user(&fx.citizen, fx.neighbour.id).await.is_err());
        assert!(fx.service.get_user(&fx.admin, fx.neighbour.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_user_changes_role() {
        let fx = fixture().await;
        let update = ProfileUpdate {
            full_name: "Grace Osei".into(),
            role: Role::Officer,
            phone: None,
            badge_number: Some("OFF-010".into()),
            department: Some("CID".into()),
        };

        assert!(matches!(
            fx.service.update_user(&fx.citizen, fx.citizen.id, update.clone()).await,
            Err(CoreError::Forbidden(_))
        ));

        let updated = fx.service.update_user(&fx.admin, fx.neighbour.id, update).await.unwrap();
        assert_eq!(updated.role, Role::Officer);

        let actor = fx.service.resolve_actor(fx.neighbour.id, None).await.unwrap();
        assert_eq!(actor.role, Role::Officer);
    }

    #[tokio::test]
    async fn test_update_own_profile_keeps_role() {
        let fx = fixture().await;
        let profile = fx
            .service
            .update_own_profile(
                &fx.citizen,
                OwnProfileUpdate {
                    full_name: "Kofi A. Boateng".into(),
                    phone: Some("+233 20 000 0000".into()),
                },
            )
            .await
            .unwrap();
        assert_eq!(profile.full_name, "Kofi A. Boateng");
        assert_eq!(profile.role, Role::Public);
    }
}
