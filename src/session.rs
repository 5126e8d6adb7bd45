//! Session Store
//!
//! Holds the login token. The token is mirrored to durable storage so a page
//! reload stays logged in; memory is rehydrated from it on first access.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use leptos::prelude::*;
use log::{debug, warn};
use serde_json::Value;
use thiserror::Error;

use crate::config::SESSION_STORAGE_KEY;
use crate::lenient;
use crate::storage::SharedStorage;

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Token is not a three-part JWT")]
    Malformed,

    #[error("Token payload is not base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Token payload is not JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Authenticated identity
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user_id: Option<String>,
}

impl Session {
    /// Build from a raw token. The user id is decoded when possible; a token
    /// that cannot be decoded is still kept as an opaque credential.
    pub fn from_token(token: impl Into<String>) -> Self {
        let token = token.into();
        let user_id = match decode_user_id(&token) {
            Ok(id) => id,
            Err(e) => {
                warn!("Could not decode session token: {}", e);
                None
            }
        };
        Self { token, user_id }
    }
}

/// Read the user id claim (`userId`, then `user_id`, `sub`, `id`) from a JWT
/// payload without verifying the signature.
pub fn decode_user_id(token: &str) -> Result<Option<String>, TokenError> {
    let parts: Vec<&str> = token.split('.').collect();
    let [_, payload, _] = parts.as_slice() else {
        return Err(TokenError::Malformed);
    };
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('='))?;
    let claims: Value = serde_json::from_slice(&bytes)?;
    Ok(claims
        .as_object()
        .and_then(|map| lenient::pick(map, &["userId", "user_id", "sub", "id"]))
        .and_then(lenient::as_string))
}

/// Session state and its durable mirror
pub struct SessionState {
    storage: SharedStorage,
    session: Option<Session>,
}

impl SessionState {
    pub fn new(storage: SharedStorage) -> Self {
        Self { storage, session: None }
    }

    /// Store the token durably and in memory. Blank tokens are ignored.
    pub fn login(&mut self, token: &str) -> Option<&Session> {
        let token = token.trim();
        if token.is_empty() {
            warn!("Ignoring login with an empty token");
            return None;
        }
        if let Err(e) = self.storage.set(SESSION_STORAGE_KEY, token) {
            warn!("Session will not survive a reload: {}", e);
        }
        self.session = Some(Session::from_token(token));
        self.session.as_ref()
    }

    pub fn logout(&mut self) {
        if let Err(e) = self.storage.remove(SESSION_STORAGE_KEY) {
            warn!("Failed to clear stored session: {}", e);
        }
        self.session = None;
    }

    /// Current session, rehydrated from storage when memory is empty
    pub fn current(&mut self) -> Option<&Session> {
        if self.session.is_none() {
            if let Some(token) = self.stored_token() {
                debug!("Rehydrating session from storage");
                self.session = Some(Session::from_token(token));
            }
        }
        self.session.as_ref()
    }

    /// In-memory session only
    pub fn cached(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn stored_token(&self) -> Option<String> {
        self.storage
            .get(SESSION_STORAGE_KEY)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
    }
}

/// Reactive handle to the session, provided through `AppContext`
#[derive(Clone, Copy)]
pub struct SessionStore {
    state: RwSignal<SessionState>,
}

impl SessionStore {
    pub fn new(storage: SharedStorage) -> Self {
        Self {
            state: RwSignal::new(SessionState::new(storage)),
        }
    }

    pub fn login(&self, token: &str) -> Option<Session> {
        self.state.try_update(|s| s.login(token).cloned()).flatten()
    }

    pub fn logout(&self) {
        self.state.update(|s| s.logout());
    }

    /// Tracked read of the session, rehydrating on first access
    pub fn current(&self) -> Option<Session> {
        if let Some(session) = self.state.with(|s| s.cached().cloned()) {
            return Some(session);
        }
        self.rehydrate()
    }

    pub fn current_untracked(&self) -> Option<Session> {
        if let Some(session) = self.state.with_untracked(|s| s.cached().cloned()) {
            return Some(session);
        }
        self.rehydrate()
    }

    pub fn token(&self) -> Option<String> {
        self.current().map(|s| s.token)
    }

    pub fn token_untracked(&self) -> Option<String> {
        self.current_untracked().map(|s| s.token)
    }

    pub fn is_authenticated(&self) -> bool {
        self.current().is_some()
    }

    /// User id from the token claims, when it could be decoded
    pub fn user_id(&self) -> Option<String> {
        self.current().and_then(|s| s.user_id)
    }

    fn rehydrate(&self) -> Option<Session> {
        // Only write when there is something to load, so an empty store
        // never notifies subscribers from inside a read.
        if self.state.with_untracked(|s| s.stored_token().is_none()) {
            return None;
        }
        self.state.try_update(|s| s.current().cloned()).flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{DurableStorage, MemoryStorage};
    use std::sync::Arc;

    fn make_token(payload: &str) -> String {
        format!(
            "{}.{}.signature",
            URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
            URL_SAFE_NO_PAD.encode(payload)
        )
    }

    #[test]
    fn test_decode_user_id() {
        let token = make_token(r#"{"userId":17,"exp":1700000000}"#);
        assert_eq!(decode_user_id(&token).unwrap(), Some("17".to_string()));

        let token = make_token(r#"{"sub":"user-9"}"#);
        assert_eq!(decode_user_id(&token).unwrap(), Some("user-9".to_string()));

        let token = make_token(r#"{"exp":1}"#);
        assert_eq!(decode_user_id(&token).unwrap(), None);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(decode_user_id("opaque"), Err(TokenError::Malformed)));
        assert!(matches!(decode_user_id("a.!!!.c"), Err(TokenError::Base64(_))));
        let not_json = format!("a.{}.c", URL_SAFE_NO_PAD.encode("nope"));
        assert!(matches!(decode_user_id(&not_json), Err(TokenError::Json(_))));
    }

    #[test]
    fn test_undecodable_token_is_still_kept() {
        let session = Session::from_token("opaque-token");
        assert_eq!(session.token, "opaque-token");
        assert_eq!(session.user_id, None);
    }

    #[test]
    fn test_session_survives_reload() {
        let storage = MemoryStorage::new();
        let token = make_token(r#"{"userId":3}"#);

        let mut first = SessionState::new(Arc::new(storage.clone()));
        assert_eq!(first.login(&token).map(|s| s.user_id.clone()), Some(Some("3".into())));

        // A fresh state over the same storage stands in for a page reload
        let mut reloaded = SessionState::new(Arc::new(storage));
        assert!(reloaded.cached().is_none());
        let session = reloaded.current().cloned().unwrap();
        assert_eq!(session.token, token);
        assert_eq!(session.user_id.as_deref(), Some("3"));
    }

    #[test]
    fn test_logout_clears_storage_and_memory() {
        let storage = MemoryStorage::new();
        let mut state = SessionState::new(Arc::new(storage.clone()));
        state.login("a.b.c");
        state.logout();

        assert!(state.current().is_none());
        assert_eq!(storage.get(SESSION_STORAGE_KEY), None);
    }

    #[test]
    fn test_blank_login_is_ignored() {
        let storage = MemoryStorage::new();
        let mut state = SessionState::new(Arc::new(storage.clone()));
        assert!(state.login("   ").is_none());
        assert_eq!(storage.get(SESSION_STORAGE_KEY), None);
    }

    #[test]
    fn test_store_rehydrates_after_reload() {
        let owner = Owner::new();
        owner.with(|| {
            let storage = MemoryStorage::new();
            let token = make_token(r#"{"userId":42}"#);

            let first = SessionStore::new(Arc::new(storage.clone()));
            assert!(!first.is_authenticated());
            assert!(first.login(&token).is_some());
            assert_eq!(first.token_untracked().as_deref(), Some(token.as_str()));

            let reloaded = SessionStore::new(Arc::new(storage.clone()));
            assert_eq!(reloaded.current_untracked().map(|s| s.token), Some(token.clone()));
            assert_eq!(reloaded.user_id().as_deref(), Some("42"));
            assert!(reloaded.is_authenticated());

            reloaded.logout();
            assert_eq!(reloaded.token_untracked(), None);
            assert_eq!(storage.get(SESSION_STORAGE_KEY), None);
            assert!(SessionStore::new(Arc::new(storage)).current_untracked().is_none());
        });
    }
}
