use anyhow::Result;
use axum::extract::FromRef;
use std::sync::Arc;

use crate::config::Settings;
use crate::services::{Counters, CredentialPolicy, TemplateSource};
use crate::session::SessionManager;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub sessions: Arc<SessionManager>,
    pub counters: Arc<Counters>,
    pub credentials: Arc<CredentialPolicy>,
    pub templates: Arc<dyn TemplateSource>,
}

impl AppState {
    pub fn new(settings: Settings, templates: Arc<dyn TemplateSource>) -> Result<Self> {
        Ok(Self {
            sessions: Arc::new(SessionManager::new(&settings)?),
            counters: Arc::new(Counters::new()),
            credentials: Arc::new(CredentialPolicy::new(&settings.auth)),
            settings: Arc::new(settings),
            templates,
        })
    }
}

impl FromRef<AppState> for Arc<SessionManager> {
    fn from_ref(state: &AppState) -> Self {
        state.sessions.clone()
    }
}

impl FromRef<AppState> for Arc<Counters> {
    fn from_ref(state: &AppState) -> Self {
        state.counters.clone()
    }
}
