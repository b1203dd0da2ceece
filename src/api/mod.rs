//! Webshell API client and wire types.

pub mod client;
pub mod error;
pub mod routes;

pub use client::{ApiCall, ApiClient, CallBody};
pub use error::remote_error;
