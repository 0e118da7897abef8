use std::sync::atomic::{AtomicU64, Ordering};

/// Login/logout attempt counters, exposed under `/mock/*` for test assertions.
#[derive(Debug, Default)]
pub struct Counters {
    login: AtomicU64,
    logout: AtomicU64,
}

impl Counters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the new value
    pub fn record_login(&self) -> u64 {
        self.login.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Returns the new value
    pub fn record_logout(&self) -> u64 {
        self.logout.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn login_count(&self) -> u64 {
        self.login.load(Ordering::Relaxed)
    }

    pub fn logout_count(&self) -> u64 {
        self.logout.load(Ordering::Relaxed)
    }
}
