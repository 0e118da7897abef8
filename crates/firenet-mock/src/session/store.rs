use dashmap::DashMap;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};
use uuid::Uuid;

use super::SessionId;
use crate::models::StoveDocument;

/// What a logged-in client owns: its email and its registered stoves.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionRecord {
    pub user: String,
    pub stoves: BTreeMap<String, StoveDocument>,
}

impl SessionRecord {
    pub fn new(user: impl Into<String>, stoves: BTreeMap<String, StoveDocument>) -> Self {
        Self {
            user: user.into(),
            stoves,
        }
    }
}

#[derive(Debug)]
struct SessionEntry {
    record: SessionRecord,
    last_seen: Instant,
}

impl SessionEntry {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.last_seen.elapsed() > ttl
    }
}

/// Thread-safe in-memory session storage with idle expiry.
///
/// Every successful lookup slides the expiry window. Expired entries are
/// dropped lazily on access and by [`SessionStore::cleanup_expired`].
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<DashMap<SessionId, SessionEntry>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        info!("Initializing session store (idle ttl: {:?})", ttl);
        Self {
            storage: Arc::new(DashMap::new()),
            ttl,
        }
    }

    /// Store `record` under a fresh random id.
    pub fn create(&self, record: SessionRecord) -> SessionId {
        let id = Uuid::new_v4().simple().to_string();
        debug!("Created session {} for {}", id, record.user);
        self.storage.insert(
            id.clone(),
            SessionEntry {
                record,
                last_seen: Instant::now(),
            },
        );
        id
    }

    /// Snapshot of the session, or `None` if unknown or expired.
    pub fn get(&self, id: &str) -> Option<SessionRecord> {
        self.update(id, |record| record.clone())
    }

    /// Run `f` on the live record in place. Returns `None` if the session is
    /// unknown or expired.
    pub fn update<R>(&self, id: &str, f: impl FnOnce(&mut SessionRecord) -> R) -> Option<R> {
        let mut entry = self.storage.get_mut(id)?;

        if entry.is_expired(self.ttl) {
            drop(entry); // release the shard lock before removing
            self.storage.remove(id);
            debug!("Session {} expired, removed", id);
            return None;
        }

        entry.last_seen = Instant::now();
        Some(f(&mut entry.record))
    }

    pub fn destroy(&self, id: &str) -> Option<SessionRecord> {
        let removed = self.storage.remove(id).map(|(_, entry)| entry.record);
        if removed.is_some() {
            debug!("Destroyed session {}", id);
        }
        removed
    }

    /// Returns number of sessions removed
    pub fn cleanup_expired(&self) -> usize {
        let start_len = self.storage.len();
        let ttl = self.ttl;
        self.storage.retain(|_, entry| !entry.is_expired(ttl));

        let count = start_len.saturating_sub(self.storage.len());
        if count > 0 {
            info!("Cleaned up {} expired sessions", count);
        }
        count
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}
