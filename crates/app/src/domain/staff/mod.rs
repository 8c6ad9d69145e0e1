//! Staff accounts

pub mod models;
pub mod service;

pub use models::{DEFAULT_STAFF_ROLE, NewStaff, StaffId, StaffMember, StaffUpdate};
pub use service::*;
