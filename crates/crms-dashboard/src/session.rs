//! Signed-in user, shared through context

use crate::api;
use crate::types::{LoginResponse, MeResponse, NavItem, Profile};
use leptos::*;

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub profile: Profile,
    pub navigation: Vec<NavItem>,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.profile.role == "admin"
    }

    pub fn is_staff(&self) -> bool {
        self.profile.role == "admin" || self.profile.role == "officer"
    }
}

pub fn provide_session() {
    provide_context(create_rw_signal(None::<Session>));
}

pub fn use_session() -> RwSignal<Option<Session>> {
    expect_context::<RwSignal<Option<Session>>>()
}

/// Token of the current session, read without tracking.
pub fn token(session: RwSignal<Option<Session>>) -> String {
    session
        .get_untracked()
        .map(|s| s.token)
        .unwrap_or_default()
}

/// Exchange credentials for a token, then load profile and navigation.
pub async fn sign_in(email: String, password: String) -> Result<Session, String> {
    let login: LoginResponse = api::post(
        None,
        "/api/auth/login",
        &crate::types::Credentials { email, password },
    )
    .await?;
    let me: MeResponse = api::get(&login.token, "/api/auth/me").await?;
    Ok(Session {
        token: login.token,
        profile: me.profile,
        navigation: me.navigation,
    })
}
