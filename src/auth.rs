//! Shared bearer-token holder.
//!
//! Stands in for the browser's local storage: the login flow deposits a
//! token here and the HTTP client picks it up on every request. The
//! token is opaque to this crate: no decoding, no expiry inspection.

use std::sync::RwLock;

/// Bearer-token store shared (via `Arc`) between the login flow and the
/// HTTP client.
#[derive(Debug, Default)]
pub struct TokenStore {
    token: RwLock<Option<String>>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a token, replacing any previous one.
    pub fn set(&self, token: impl Into<String>) {
        if let Ok(mut guard) = self.token.write() {
            *guard = Some(token.into());
        }
    }

    /// Drop the stored token (logout).
    pub fn clear(&self) {
        if let Ok(mut guard) = self.token.write() {
            *guard = None;
        }
    }

    /// Current token, if any. A poisoned lock reads as "no token".
    pub fn bearer(&self) -> Option<String> {
        self.token.read().ok().and_then(|guard| guard.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.bearer().is_some()
    }
}
