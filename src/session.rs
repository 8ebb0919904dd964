//! Session validity guard.
//!
//! The guard owns the session identity and gates every page transition.
//! The first successful validation bootstraps `{id, user, version}`;
//! every later validation must reproduce all three exactly or the
//! session is rejected wholesale. A drifted session is treated as
//! rotated or hijacked, never partially trusted.
//!
//! The guard only reports state. Redirecting an unauthorized user is
//! the caller's responsibility, and no retries happen here.

use tracing::{debug, warn};

use crate::authority::Authority;
use crate::proto::SessionStatus;

/// Cached session identity plus validity flag.
#[derive(Debug, Default)]
pub struct SessionGuard {
    id: String,
    user: String,
    version: String,
    valid: bool,
    bootstrapped: bool,
}

impl SessionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the authority whether this session still stands. Returns the
    /// new validity, which `is_valid` then reports without further
    /// network traffic. Transport failures invalidate without touching
    /// the stored identity.
    pub async fn validate(&mut self, authority: &dyn Authority) -> bool {
        self.valid = false;

        // A quit session stays dead; don't bother the authority.
        if self.bootstrapped && self.id.is_empty() {
            debug!("attempt to validate a completed session");
            return false;
        }

        match authority.session_status().await {
            Ok(status) => {
                self.absorb(status);
                self.valid
            }
            Err(err) => {
                warn!(error = %err, "session validation failed");
                false
            }
        }
    }

    fn absorb(&mut self, status: SessionStatus) {
        if !self.bootstrapped {
            self.id = status.session;
            self.user = status.user;
            self.version = status.version;
            self.bootstrapped = true;
            self.valid = true;
            return;
        }

        if self.version != status.version {
            warn!(
                got = %status.version,
                expected = %self.version,
                "unexpected version change"
            );
            return;
        }
        if self.user != status.user {
            warn!(got = %status.user, expected = %self.user, "unexpected user");
            return;
        }
        if self.id != status.session {
            warn!(got = %status.session, expected = %self.id, "unexpected session id");
            return;
        }

        self.valid = true;
    }

    /// Cached validity; no network call.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Clear the identity and invalidate. The caller navigates away.
    pub fn quit(&mut self) {
        self.id.clear();
        self.user.clear();
        self.version.clear();
        self.valid = false;
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn bootstrapped(&self) -> bool {
        self.bootstrapped
    }
}
