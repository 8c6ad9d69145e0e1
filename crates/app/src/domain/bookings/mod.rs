//! Workshop bookings

pub mod models;
pub mod service;

pub use models::{Booking, BookingId, BookingStatus, NewBooking};
pub use service::*;
