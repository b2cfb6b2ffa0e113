//! Mock authentication and bearer-token sessions.
//!
//! There are exactly two accounts. Logging in as a role succeeds when the
//! username and password both equal that role's name, case-insensitively.
//! Tokens are random; the registry keeps only their SHA-256 hash.

use std::collections::HashMap;
use std::sync::Mutex;

use thiserror::Error;

use crate::models::{Role, User};

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials. Please try again.";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials. Please try again.")]
    InvalidCredentials,

    #[error("Authentication required")]
    MissingToken,

    #[error("Session expired or revoked")]
    UnknownToken,

    #[error("Session registry lock poisoned")]
    LockPoisoned,
}

pub fn mock_users() -> Vec<User> {
    vec![
        User::new("user-01", "Jane Doe", Role::Patient),
        User::new("doc-01", "Alan Grant", Role::Doctor),
    ]
}

/// Every account with the doctor role.
pub fn doctors() -> Vec<User> {
    mock_users().into_iter().filter(User::is_doctor).collect()
}

/// Resolve a login attempt for `role`.
pub fn authenticate(username: &str, password: &str, role: Role) -> Result<User, AuthError> {
    let expected = role.as_str().to_lowercase();
    if username.trim().to_lowercase() != expected || password.to_lowercase() != expected {
        tracing::debug!(role = %role, "Login rejected");
        return Err(AuthError::InvalidCredentials);
    }
    mock_users()
        .into_iter()
        .find(|u| u.role == role)
        .ok_or(AuthError::InvalidCredentials)
}

/// SHA-256 hash of a bearer token.
pub fn hash_token(token: &str) -> [u8; 32] {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hasher.finalize().into()
}

/// Generate a random bearer token (URL-safe base64, 32 bytes of entropy).
pub fn generate_token() -> String {
    use base64::Engine;
    let bytes: [u8; 32] = rand::random();
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

/// Active sessions keyed by token hash.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<[u8; 32], User>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session for `user`. The plaintext token is returned once.
    pub fn issue(&self, user: User) -> Result<String, AuthError> {
        let token = generate_token();
        let mut sessions = self.sessions.lock().map_err(|_| AuthError::LockPoisoned)?;
        tracing::info!(user_id = %user.id, role = %user.role, "Session started");
        sessions.insert(hash_token(&token), user);
        Ok(token)
    }

    pub fn resolve(&self, token: &str) -> Result<User, AuthError> {
        let sessions = self.sessions.lock().map_err(|_| AuthError::LockPoisoned)?;
        sessions
            .get(&hash_token(token))
            .cloned()
            .ok_or(AuthError::UnknownToken)
    }

    /// End the session. Returns `false` if the token was not active.
    pub fn revoke(&self, token: &str) -> Result<bool, AuthError> {
        let mut sessions = self.sessions.lock().map_err(|_| AuthError::LockPoisoned)?;
        let removed = sessions.remove(&hash_token(token));
        if let Some(user) = &removed {
            tracing::info!(user_id = %user.id, "Session ended");
        }
        Ok(removed.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_name_logs_in_case_insensitively() {
        let patient = authenticate("Patient", "PATIENT", Role::Patient).unwrap();
        assert_eq!(patient.id, "user-01");
        assert_eq!(patient.name, "Jane Doe");

        let doctor = authenticate("doctor", "doctor", Role::Doctor).unwrap();
        assert_eq!(doctor.id, "doc-01");
    }

    #[test]
    fn mismatched_role_or_password_rejected() {
        assert_eq!(
            authenticate("patient", "patient", Role::Doctor),
            Err(AuthError::InvalidCredentials)
        );
        assert_eq!(
            authenticate("doctor", "secret", Role::Doctor),
            Err(AuthError::InvalidCredentials)
        );
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            INVALID_CREDENTIALS_MESSAGE
        );
    }

    #[test]
    fn doctors_lists_only_doctors() {
        let doctors = doctors();
        assert_eq!(doctors.len(), 1);
        assert_eq!(doctors[0].name, "Alan Grant");
    }

    #[test]
    fn generate_token_is_unique() {
        let t1 = generate_token();
        let t2 = generate_token();
        assert_ne!(t1, t2);
        assert!(!t1.is_empty());
    }

    #[test]
    fn hash_token_is_deterministic() {
        assert_eq!(hash_token("test"), hash_token("test"));
        assert_ne!(hash_token("token-a"), hash_token("token-b"));
    }

    #[test]
    fn session_issue_resolve_revoke() {
        let registry = SessionRegistry::new();
        let user = mock_users().remove(0);
        let token = registry.issue(user.clone()).unwrap();

        assert_eq!(registry.resolve(&token).unwrap(), user);
        assert_eq!(registry.sessions.lock().unwrap().len(), 1);

        assert!(registry.revoke(&token).unwrap());
        assert_eq!(registry.resolve(&token), Err(AuthError::UnknownToken));
        assert!(!registry.revoke(&token).unwrap());
    }
}
