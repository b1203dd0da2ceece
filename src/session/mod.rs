//! Session ownership and lifecycle.

mod auth;
pub mod client;
pub mod state;

pub use client::{Credentials, DEFAULT_SSH_PORT, LoginResult, SessionClient};
pub use state::{SessionEffect, SessionRequirement, SessionState};
