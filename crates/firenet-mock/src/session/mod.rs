//! Cookie-backed sessions: a signed token in `connect.sid` pointing at an
//! in-memory [`SessionRecord`].

pub mod cookie;
pub mod store;

use anyhow::Result;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub use cookie::SessionCookie;
pub use store::{SessionRecord, SessionStore};

use crate::config::Settings;
use crate::utils::error::ApiError;

pub type SessionId = String;

/// Session store plus the cookie that points into it.
#[derive(Clone)]
pub struct SessionManager {
    pub store: SessionStore,
    pub cookie: SessionCookie,
}

impl SessionManager {
    pub fn new(settings: &Settings) -> Result<Self> {
        Ok(Self {
            store: SessionStore::new(settings.session_ttl()),
            cookie: SessionCookie::new(&settings.session)?,
        })
    }

    /// Purge expired sessions every `interval` until the runtime shuts down.
    pub fn spawn_cleanup(self: &Arc<Self>, interval: Duration) -> tokio::task::JoinHandle<()> {
        let manager = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                manager.store.cleanup_expired();
            }
        })
    }
}

/// The session the request belongs to, resolved from its cookie.
///
/// Never rejects: a missing, forged or expired cookie simply yields an
/// anonymous session.
#[derive(Debug, Clone, Default)]
pub struct CurrentSession {
    pub id: Option<SessionId>,
    pub record: Option<SessionRecord>,
}

impl CurrentSession {
    pub fn is_authenticated(&self) -> bool {
        self.record.is_some()
    }

    /// Id and record of an authenticated session, or 401.
    pub fn require(&self) -> Result<(&SessionId, &SessionRecord), ApiError> {
        match (&self.id, &self.record) {
            (Some(id), Some(record)) => Ok((id, record)),
            _ => Err(ApiError::Unauthorized),
        }
    }
}

impl<S> FromRequestParts<S> for CurrentSession
where
    Arc<SessionManager>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let sessions = Arc::<SessionManager>::from_ref(state);

        let Some(id) = sessions.cookie.session_id(&parts.headers) else {
            return Ok(Self::default());
        };

        match sessions.store.get(&id) {
            Some(record) => Ok(Self {
                id: Some(id),
                record: Some(record),
            }),
            None => {
                debug!("Cookie refers to unknown or expired session {}", id);
                Ok(Self::default())
            }
        }
    }
}
