//! Admin session store
//!
//! In-memory bearer-token sessions for the admin API. The store is injected
//! through [`crate::AppState`] so the engine itself stays free of auth
//! state. Tokens are opaque, expire after a TTL, and are pruned lazily on
//! validation as well as by the explicit sweep.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

/// Default session lifetime
const DEFAULT_TTL_HOURS: i64 = 12;

/// One issued admin session
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub token: String,
    #[serde(rename = "issuedAt")]
    pub issued_at: DateTime<Utc>,
    #[serde(rename = "expiresAt")]
    pub expires_at: DateTime<Utc>,
}

impl Session {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Thread-safe token store
pub struct SessionStore {
    ttl: Duration,
    sessions: RwLock<HashMap<String, Session>>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(Duration::hours(DEFAULT_TTL_HOURS))
    }
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Issue a fresh session token
    pub fn issue(&self) -> Session {
        let now = Utc::now();
        let session = Session {
            token: Uuid::new_v4().simple().to_string(),
            issued_at: now,
            expires_at: now + self.ttl,
        };
        self.sessions
            .write()
            .expect("session store poisoned")
            .insert(session.token.clone(), session.clone());
        session
    }

    /// True when the token exists and has not expired.
    ///
    /// An expired token is removed on the spot.
    pub fn validate(&self, token: &str) -> bool {
        let now = Utc::now();
        let mut sessions = self.sessions.write().expect("session store poisoned");
        match sessions.get(token) {
            Some(session) if session.is_expired(now) => {
                sessions.remove(token);
                false
            }
            Some(_) => true,
            None => false,
        }
    }

    /// Drop a token. Returns false when it was not present.
    pub fn revoke(&self, token: &str) -> bool {
        self.sessions
            .write()
            .expect("session store poisoned")
            .remove(token)
            .is_some()
    }

    /// Remove every expired session; returns how many were dropped
    pub fn expire_stale(&self) -> usize {
        let now = Utc::now();
        let mut sessions = self.sessions.write().expect("session store poisoned");
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired(now));
        before - sessions.len()
    }

    /// Number of live sessions
    pub fn active_count(&self) -> usize {
        self.sessions
            .read()
            .expect("session store poisoned")
            .len()
    }
}
