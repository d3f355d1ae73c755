//! Explicit session context for the console.
//!
//! The session (bearer token, signed-in user, granted roles) lives in a
//! `SessionContext` value that is handed to whoever needs it. Persistence goes
//! through a [`SessionStore`], so the browser's storage, a file or an in-memory
//! map can back it, and the lifecycle is explicit: `load`, `save`, `clear`.

use std::cell::RefCell;
use std::collections::HashMap;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

pub const MIN_USERNAME_LENGTH: usize = 3;
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Roles allowed to manage templates.
pub const AUTHORIZED_ROLES: &[&str] = &["admin_company", "master_notification_gateway"];

const TOKEN_KEY: &str = "token";
const USER_KEY: &str = "logged_in_user";
const ROLES_KEY: &str = "user_roles";

/// String key/value persistence for session data.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String);
    fn remove(&self, key: &str);
}

/// Non-persistent store, for tests and short-lived tools.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    values: RefCell<HashMap<String, String>>,
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        self.values.borrow_mut().insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) {
        self.values.borrow_mut().remove(key);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionContext {
    pub token: Option<String>,
    pub user: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl SessionContext {
    pub fn new(token: impl Into<String>, user: impl Into<String>, roles: Vec<String>) -> Self {
        Self {
            token: Some(token.into()),
            user: Some(user.into()),
            roles,
        }
    }

    /// Restores the session persisted in `store`. Unreadable role data is
    /// treated as no roles.
    pub fn load(store: &dyn SessionStore) -> Self {
        let roles = store
            .get(ROLES_KEY)
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|r| !r.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        Self {
            token: store.get(TOKEN_KEY),
            user: store.get(USER_KEY),
            roles,
        }
    }

    pub fn save(&self, store: &dyn SessionStore) {
        match &self.token {
            Some(token) => store.set(TOKEN_KEY, token.clone()),
            None => store.remove(TOKEN_KEY),
        }
        match &self.user {
            Some(user) => store.set(USER_KEY, user.clone()),
            None => store.remove(USER_KEY),
        }
        store.set(ROLES_KEY, self.roles.join(","));
    }

    /// Signs out: forgets the in-memory session and everything persisted.
    pub fn clear(&mut self, store: &dyn SessionStore) {
        for key in [TOKEN_KEY, USER_KEY, ROLES_KEY] {
            store.remove(key);
        }
        *self = Self::default();
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// `true` when at least one role is allowed to manage templates.
    pub fn has_authorized_role(&self) -> bool {
        self.roles.iter().any(|role| {
            AUTHORIZED_ROLES
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(role.trim()))
        })
    }

    /// Value for an `Authorization` header, if signed in.
    pub fn bearer(&self) -> Option<String> {
        self.token
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(|t| format!("Bearer {t}"))
    }
}

/// Why a sign-in form cannot be sent yet.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialError {
    #[error("Username must be at least {} characters", MIN_USERNAME_LENGTH)]
    UsernameTooShort,
    #[error("Password must be at least {} characters", MIN_PASSWORD_LENGTH)]
    PasswordTooShort,
}

pub fn check_credentials(username: &str, password: &str) -> Result<(), CredentialError> {
    if username.trim().chars().count() < MIN_USERNAME_LENGTH {
        return Err(CredentialError::UsernameTooShort);
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CredentialError::PasswordTooShort);
    }
    Ok(())
}

/// Base64 `user:password`, as sent in a `Basic` authorization header.
pub fn encode_credentials(username: &str, password: &str) -> String {
    STANDARD.encode(format!("{username}:{password}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_load_clear_round_trip() {
        let store = MemorySessionStore::default();
        let session = SessionContext::new("tok", "ana", vec!["admin_company".into()]);
        session.save(&store);

        let mut loaded = SessionContext::load(&store);
        assert_eq!(loaded, session);
        assert_eq!(loaded.bearer().as_deref(), Some("Bearer tok"));

        loaded.clear(&store);
        assert!(!loaded.is_authenticated());
        assert_eq!(SessionContext::load(&store), SessionContext::default());
    }

    #[test]
    fn role_check_is_case_insensitive() {
        let mut session = SessionContext::new("t", "u", vec!["Master_Notification_Gateway".into()]);
        assert!(session.has_authorized_role());
        session.roles = vec!["viewer".into()];
        assert!(!session.has_authorized_role());
        session.roles.clear();
        assert!(!session.has_authorized_role());
    }

    #[test]
    fn credentials_are_checked_and_encoded() {
        assert_eq!(check_credentials("al", "secret1"), Err(CredentialError::UsernameTooShort));
        assert_eq!(check_credentials("alice", "short"), Err(CredentialError::PasswordTooShort));
        assert_eq!(check_credentials("alice", "secret1"), Ok(()));
        assert_eq!(encode_credentials("alice", "secret1"), "YWxpY2U6c2VjcmV0MQ==");
    }
}
