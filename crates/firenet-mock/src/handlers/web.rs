//! Browser-facing pages: login form target, logout and the stove summary.

use axum::{
    extract::{rejection::FormRejection, State},
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::{info, warn};

use super::{found, with_cookie};
use crate::services::TemplateError;
use crate::session::{CurrentSession, SessionRecord};
use crate::state::AppState;
use crate::utils::error::ApiError;

pub const LOGIN_PATH: &str = "/web/login";
pub const SUMMARY_PATH: &str = "/web/summary";
pub const ROOT_PATH: &str = "/web/";

#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// POST /web/login
///
/// Always counted. Accepted credentials open a fresh session seeded with the
/// configured stoves; rejected ones just bounce back to the login page.
pub async fn login(
    State(state): State<AppState>,
    session: CurrentSession,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Result<Response, ApiError> {
    let attempt = state.counters.record_login();

    let credentials = match form {
        Ok(Form(credentials)) => credentials,
        Err(rejection) => {
            warn!("Unreadable login form: {}", rejection);
            LoginForm::default()
        }
    };

    if !state
        .credentials
        .accepts(&credentials.email, &credentials.password)
    {
        info!("Login attempt #{} rejected for {:?}", attempt, credentials.email);
        return Ok(found(LOGIN_PATH));
    }

    let stoves = state
        .settings
        .auth
        .stove_ids
        .iter()
        .map(|stove_id| {
            state
                .templates
                .load_stove_status(stove_id)
                .map(|document| (stove_id.clone(), document))
        })
        .collect::<Result<BTreeMap<_, _>, TemplateError>>()?;

    if let Some(previous) = &session.id {
        state.sessions.store.destroy(previous);
    }

    let id = state
        .sessions
        .store
        .create(SessionRecord::new(credentials.email.as_str(), stoves));

    info!(
        "Login attempt #{} accepted for {:?} ({} stoves)",
        attempt,
        credentials.email,
        state.settings.auth.stove_ids.len()
    );

    with_cookie(found(SUMMARY_PATH), &state.sessions.cookie.issue(&id))
}

/// GET /web/logout
pub async fn logout(
    State(state): State<AppState>,
    session: CurrentSession,
) -> Result<Response, ApiError> {
    let attempt = state.counters.record_logout();

    let Some(id) = &session.id else {
        info!("Logout attempt #{} without a session", attempt);
        return Ok(found(LOGIN_PATH));
    };

    if let Some(record) = state.sessions.store.destroy(id) {
        info!("Logout attempt #{}: closed session of {:?}", attempt, record.user);
    }

    with_cookie(found(LOGIN_PATH), &state.sessions.cookie.clear())
}

/// GET /web/summary
pub async fn summary(
    State(state): State<AppState>,
    session: CurrentSession,
) -> Result<Response, ApiError> {
    if !session.is_authenticated() {
        return Ok(found(ROOT_PATH));
    }

    let page = state.templates.load_summary_page()?;
    Ok(Html(page).into_response())
}
