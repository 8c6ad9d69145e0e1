//! Bengkel storefront client: API plumbing, session handling and the
//! domain services the command line drives.

pub mod api;
pub mod config;
pub mod context;
pub mod domain;
pub mod logging;
pub mod optimistic;
pub mod search;
pub mod session;
pub mod storage;
