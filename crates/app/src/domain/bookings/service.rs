//! Bookings service.

use async_trait::async_trait;
use mockall::automock;
use serde_json::json;
use tracing::info;

use crate::{
    api::{Access, ApiClient, ApiError, ApiRequest, DecodeError},
    domain::bookings::models::{Booking, BookingId, BookingPayload, BookingStatus, NewBooking},
};

const LIST_KEYS: &[&str] = &["bookings"];
const ITEM_KEYS: &[&str] = &["booking"];

#[derive(Debug, Clone)]
pub struct HttpBookingsService {
    client: ApiClient,
}

impl HttpBookingsService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BookingsService for HttpBookingsService {
    async fn create_booking(&self, booking: NewBooking) -> Result<Booking, ApiError> {
        booking.validate()?;

        let payload: BookingPayload = self
            .client
            .item(
                ApiRequest::post("/bookings").json(booking.to_json()),
                Access::Authenticated,
                ITEM_KEYS,
            )
            .await?;

        let created = Booking::try_from(payload)?;

        info!(booking = %created.id, date = %created.date, "booking created");

        Ok(created)
    }

    async fn manage_bookings(&self) -> Result<Vec<Booking>, ApiError> {
        let payloads: Vec<BookingPayload> = self
            .client
            .list(
                ApiRequest::get("/bookings/manage"),
                Access::Authenticated,
                LIST_KEYS,
            )
            .await?;

        let bookings = payloads
            .into_iter()
            .map(Booking::try_from)
            .collect::<Result<Vec<_>, DecodeError>>()?;

        Ok(bookings)
    }

    async fn update_status(
        &self,
        booking: BookingId,
        status: BookingStatus,
    ) -> Result<Booking, ApiError> {
        let payload: BookingPayload = self
            .client
            .item(
                ApiRequest::put(format!("/bookings/{booking}"))
                    .json(json!({ "status": status.as_str() })),
                Access::Authenticated,
                ITEM_KEYS,
            )
            .await?;

        info!(%booking, %status, "booking status updated");

        Ok(Booking::try_from(payload)?)
    }
}

#[automock]
#[async_trait]
pub trait BookingsService: Send + Sync {
    /// Book a workshop slot.
    async fn create_booking(&self, booking: NewBooking) -> Result<Booking, ApiError>;

    /// Staff: every booking.
    async fn manage_bookings(&self) -> Result<Vec<Booking>, ApiError>;

    /// Staff: move a booking to `status`.
    async fn update_status(
        &self,
        booking: BookingId,
        status: BookingStatus,
    ) -> Result<Booking, ApiError>;
}
