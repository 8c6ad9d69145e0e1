//! Booking Models

use std::{fmt, str::FromStr};

use bengkel::{checkout::UnknownOption, ids::TypedId};
use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::api::{DecodeError, ValidationError, lenient};

/// Booking ID
pub type BookingId = TypedId<Booking>;

/// Where a workshop booking stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

impl BookingStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Completed and cancelled bookings take no further changes.
    #[must_use]
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = UnknownOption;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace([' ', '-'], "_").as_str() {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            other => Err(UnknownOption(other.to_string())),
        }
    }
}

/// Booking Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub id: BookingId,
    pub customer_name: String,
    pub phone: String,
    pub vehicle: String,
    pub service: String,
    pub date: Date,
    pub notes: Option<String>,
    pub status: BookingStatus,
}

/// The customer booking form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub customer_name: String,
    pub phone: String,
    pub vehicle: String,
    pub service: String,
    pub date: Date,
    pub notes: Option<String>,
}

impl NewBooking {
    /// # Errors
    ///
    /// Returns an error naming the first blank required field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let required = [
            (&self.customer_name, "name"),
            (&self.phone, "phone number"),
            (&self.vehicle, "vehicle"),
            (&self.service, "service type"),
        ];

        match required
            .into_iter()
            .find(|(value, _)| value.trim().is_empty())
        {
            Some((_, field)) => Err(ValidationError::Required(field)),
            None => Ok(()),
        }
    }

    pub(crate) fn to_json(&self) -> Value {
        json!({
            "customer_name": self.customer_name.trim(),
            "phone": self.phone.trim(),
            "vehicle_type": self.vehicle.trim(),
            "service_type": self.service.trim(),
            "booking_date": self.date.to_string(),
            "notes": self.notes,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct BookingPayload {
    id: BookingId,

    #[serde(alias = "name")]
    customer_name: String,

    #[serde(default, alias = "phone_number")]
    phone: Option<String>,

    #[serde(default, alias = "vehicle_type", alias = "motor_type")]
    vehicle: Option<String>,

    #[serde(alias = "service_type")]
    service: String,

    #[serde(alias = "booking_date", deserialize_with = "lenient::date_from_any")]
    date: Date,

    #[serde(default)]
    notes: Option<String>,

    #[serde(default)]
    status: Option<String>,
}

impl TryFrom<BookingPayload> for Booking {
    type Error = DecodeError;

    fn try_from(payload: BookingPayload) -> Result<Self, Self::Error> {
        let status = match payload.status.as_deref() {
            None => BookingStatus::Pending,
            Some(raw) => raw
                .parse()
                .map_err(|_| DecodeError::Status(raw.to_string()))?,
        };

        Ok(Self {
            id: payload.id,
            customer_name: payload.customer_name,
            phone: payload.phone.unwrap_or_default(),
            vehicle: payload.vehicle.unwrap_or_default(),
            service: payload.service,
            date: payload.date,
            notes: payload.notes,
            status,
        })
    }
}
