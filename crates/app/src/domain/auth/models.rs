//! Auth Models

use std::fmt;

use serde::Deserialize;
use serde_json::{Value, json};
use zeroize::Zeroize;

use crate::{api::ValidationError, session::SessionUser};

/// Email and password sign-in.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl Drop for Credentials {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}

impl Credentials {
    /// # Errors
    ///
    /// Returns an error for a blank email or password.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.email.trim().is_empty() {
            return Err(ValidationError::Required("email"));
        }

        if self.password.is_empty() {
            return Err(ValidationError::Required("password"));
        }

        Ok(())
    }

    pub(crate) fn to_json(&self) -> Value {
        json!({
            "email": self.email.trim(),
            "password": self.password,
        })
    }
}

/// Customer self-registration.
#[derive(Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
    pub password_confirmation: String,
}

impl fmt::Debug for NewAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewAccount")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .finish_non_exhaustive()
    }
}

impl Drop for NewAccount {
    fn drop(&mut self) {
        self.password.zeroize();
        self.password_confirmation.zeroize();
    }
}

impl NewAccount {
    /// # Errors
    ///
    /// Returns an error for a blank field or a confirmation that does not
    /// match the password.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::Required("name"));
        }

        if self.email.trim().is_empty() {
            return Err(ValidationError::Required("email"));
        }

        if self.password.is_empty() {
            return Err(ValidationError::Required("password"));
        }

        if self.password != self.password_confirmation {
            return Err(ValidationError::PasswordMismatch);
        }

        Ok(())
    }

    pub(crate) fn to_json(&self) -> Value {
        json!({
            "name": self.name.trim(),
            "email": self.email.trim(),
            "phone": self.phone.as_deref().map(str::trim),
            "password": self.password,
            "password_confirmation": self.password_confirmation,
        })
    }
}

/// What login and registration answer with. Registration may omit the token.
#[derive(Deserialize)]
pub(crate) struct AuthPayload {
    #[serde(default, alias = "access_token")]
    pub(crate) token: Option<String>,

    pub(crate) user: SessionUser,
}
