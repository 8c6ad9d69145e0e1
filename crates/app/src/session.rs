//! Session
//!
//! The bearer token and the signed-in user, kept under the same two keys the
//! web storefront uses for its cookies.

use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};
use tracing::warn;
use zeroize::Zeroize;

use crate::storage::{KeyValueStore, StorageError};

/// Storage key holding the bearer token.
pub const TOKEN_COOKIE: &str = "token";

/// Storage key holding the JSON-encoded signed-in user.
pub const USER_COOKIE: &str = "user";

/// Where an expired session sends the customer.
pub const LOGIN_PATH: &str = "/login";

/// Bearer token. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    /// Wrap a raw token, rejecting blank values.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();

        if raw.trim().is_empty() {
            return None;
        }

        Some(Self(raw))
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(**redacted**)")
    }
}

impl Drop for Token {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// The signed-in user as returned by the login endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: u64,
    pub name: String,
    pub email: String,

    #[serde(default)]
    pub role: Option<String>,
}

impl SessionUser {
    /// Admins and staff see the back-office commands.
    #[must_use]
    pub fn is_staff(&self) -> bool {
        self.role
            .as_deref()
            .is_some_and(|role| matches!(role, "admin" | "staff" | "kasir" | "cashier"))
    }
}

#[derive(Clone)]
pub struct Session {
    store: Arc<dyn KeyValueStore>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}

impl Session {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The stored bearer token, if any.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying store cannot be read.
    pub fn token(&self) -> Result<Option<Token>, StorageError> {
        Ok(self.store.get(TOKEN_COOKIE)?.and_then(Token::new))
    }

    /// The cached user. A value that no longer decodes is treated as absent.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying store cannot be read.
    pub fn user(&self) -> Result<Option<SessionUser>, StorageError> {
        let Some(raw) = self.store.get(USER_COOKIE)? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(error) => {
                warn!(%error, "ignoring unreadable cached user");

                Ok(None)
            }
        }
    }

    /// # Errors
    ///
    /// Returns an error when the underlying store cannot be read.
    pub fn is_authenticated(&self) -> Result<bool, StorageError> {
        Ok(self.token()?.is_some())
    }

    /// Store a fresh token and user after login.
    ///
    /// # Errors
    ///
    /// Returns an error when the user cannot be encoded or the store fails.
    pub fn establish(&self, token: &Token, user: &SessionUser) -> Result<(), StorageError> {
        self.store.set(TOKEN_COOKIE, token.expose())?;
        self.remember_user(user)
    }

    /// Refresh the cached user without touching the token.
    ///
    /// # Errors
    ///
    /// Returns an error when the user cannot be encoded or the store fails.
    pub fn remember_user(&self, user: &SessionUser) -> Result<(), StorageError> {
        let encoded = serde_json::to_string(user).map_err(|source| StorageError::Encode {
            key: USER_COOKIE.to_string(),
            source,
        })?;

        self.store.set(USER_COOKIE, &encoded)
    }

    /// Forget the token and the user.
    ///
    /// # Errors
    ///
    /// Returns an error when the store fails.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.remove(TOKEN_COOKIE)?;
        self.store.remove(USER_COOKIE)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use crate::storage::MemoryStore;

    use super::*;

    pub(crate) fn customer() -> SessionUser {
        SessionUser {
            id: 7,
            name: "Rina".to_string(),
            email: "rina@example.com".to_string(),
            role: Some("customer".to_string()),
        }
    }

    pub(crate) fn signed_out() -> Session {
        Session::new(Arc::new(MemoryStore::new()))
    }

    pub(crate) fn signed_in() -> Session {
        let session = signed_out();

        if let Some(token) = Token::new("secret-token") {
            let _stored = session.establish(&token, &customer());
        }

        session
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::{test_support::*, *};
    use crate::storage::MemoryStore;

    #[test]
    fn token_debug_is_redacted() {
        let token = Token::new("super-secret");

        assert_eq!(format!("{token:?}"), "Some(Token(**redacted**))");
    }

    #[test]
    fn blank_tokens_are_rejected() {
        assert_eq!(Token::new("  "), None);
    }

    #[test]
    fn establish_then_clear() -> TestResult {
        let session = signed_in();

        assert!(session.is_authenticated()?);
        assert_eq!(session.user()?, Some(customer()));

        session.clear()?;

        assert!(!session.is_authenticated()?);
        assert_eq!(session.user()?, None);

        Ok(())
    }

    #[test]
    fn unreadable_user_reads_as_signed_out_user() -> TestResult {
        let store = Arc::new(MemoryStore::new());
        store.set(USER_COOKIE, "{broken")?;

        assert_eq!(Session::new(store).user()?, None);

        Ok(())
    }

    #[test]
    fn staff_roles() {
        let mut user = customer();
        assert!(!user.is_staff());

        user.role = Some("admin".to_string());
        assert!(user.is_staff());
    }
}
