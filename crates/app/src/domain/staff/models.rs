//! Staff Models

use std::fmt;

use bengkel::ids::TypedId;
use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::api::ValidationError;

/// Staff ID
pub type StaffId = TypedId<StaffMember>;

/// Role given to accounts registered from the back office.
pub const DEFAULT_STAFF_ROLE: &str = "staff";

/// Staff Model
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StaffMember {
    pub id: StaffId,
    pub name: String,
    pub email: String,

    #[serde(default = "default_role")]
    pub role: String,

    #[serde(default, alias = "phone_number")]
    pub phone: Option<String>,
}

fn default_role() -> String {
    DEFAULT_STAFF_ROLE.to_string()
}

/// Back-office registration of a staff account.
#[derive(Clone, PartialEq, Eq)]
pub struct NewStaff {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub phone: Option<String>,
}

impl fmt::Debug for NewStaff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewStaff")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("role", &self.role)
            .field("phone", &self.phone)
            .finish_non_exhaustive()
    }
}

impl NewStaff {
    /// # Errors
    ///
    /// Returns an error naming the first blank required field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require(&self.name, "name")?;
        require(&self.email, "email")?;
        require(&self.password, "password")?;
        require(&self.role, "role")
    }

    pub(crate) fn to_json(&self) -> Value {
        json!({
            "name": self.name.trim(),
            "email": self.email.trim(),
            "password": self.password,
            "role": self.role.trim(),
            "phone": self.phone,
        })
    }
}

/// Partial change to a staff account; `None` fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaffUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub phone: Option<String>,
}

impl StaffUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.role.is_none() && self.phone.is_none()
    }

    pub(crate) fn to_json(&self) -> Value {
        let fields = [
            ("name", &self.name),
            ("email", &self.email),
            ("role", &self.role),
            ("phone", &self.phone),
        ];

        let body: Map<String, Value> = fields
            .into_iter()
            .filter_map(|(key, value)| {
                value
                    .as_ref()
                    .map(|value| (key.to_string(), Value::String(value.trim().to_string())))
            })
            .collect();

        Value::Object(body)
    }
}

fn require(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required(field));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration() -> NewStaff {
        NewStaff {
            name: "Sari".to_string(),
            email: "sari@bengkel.test".to_string(),
            password: "rahasia123".to_string(),
            role: DEFAULT_STAFF_ROLE.to_string(),
            phone: None,
        }
    }

    #[test]
    fn passwords_stay_out_of_debug_output() {
        let rendered = format!("{:?}", registration());

        assert!(rendered.contains("Sari"));
        assert!(!rendered.contains("rahasia123"));
    }

    #[test]
    fn blank_passwords_are_rejected() {
        let staff = NewStaff {
            password: " ".to_string(),
            ..registration()
        };

        assert_eq!(staff.validate(), Err(ValidationError::Required("password")));
    }

    #[test]
    fn updates_only_send_changed_fields() {
        let update = StaffUpdate {
            role: Some("admin ".to_string()),
            ..StaffUpdate::default()
        };

        assert!(!update.is_empty());
        assert_eq!(update.to_json(), json!({ "role": "admin" }));
        assert!(StaffUpdate::default().is_empty());
    }
}
