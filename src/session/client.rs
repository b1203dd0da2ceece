//! Session-holding client.
//!
//! [`SessionClient`] is the single owner of the authentication token. Only
//! `login`, `logout` and `reset` touch it; every file operation reads it and
//! attaches it to the outgoing request.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::{ApiCall, ApiClient, routes};
use crate::error::{HarnessError, Result};
use crate::progress::ProgressCallback;

/// Well-known SSH port used when none is configured.
pub const DEFAULT_SSH_PORT: &str = "22";

fn default_port() -> String {
    DEFAULT_SSH_PORT.to_string()
}

/// SSH credentials the service uses to open its backing connection.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub cluster: String,
    pub username: String,
    pub password: String,
    pub host: String,
    #[serde(default = "default_port")]
    pub port: String,
}

impl Credentials {
    /// Create credentials on the default SSH port.
    pub fn new(
        cluster: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        host: impl Into<String>,
    ) -> Self {
        Self {
            cluster: cluster.into(),
            username: username.into(),
            password: password.into(),
            host: host.into(),
            port: default_port(),
        }
    }

    /// Override the SSH port.
    pub fn with_port(mut self, port: impl Into<String>) -> Self {
        self.port = port.into();
        self
    }
}

impl Default for Credentials {
    /// Placeholder credentials of the example configuration.
    fn default() -> Self {
        Credentials::new("default", "root", "your_password_here", "127.0.0.1")
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("cluster", &self.cluster)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

/// Successful login response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginResult {
    /// Token to attach to subsequent requests.
    pub session_key: String,
    /// Remote home directory; empty when the service could not resolve it.
    pub home_path: String,
}

impl LoginResult {
    pub(crate) fn from_response(response: &Value) -> Result<Self> {
        let session_key = response
            .get(routes::SESSION_KEY_FIELD)
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                HarnessError::InvalidResponse(format!("login response lacks session_key: {response}"))
            })?
            .to_string();
        let home_path = response
            .get(routes::HOME_PATH_FIELD)
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();

        Ok(Self {
            session_key,
            home_path,
        })
    }
}

/// Client for the webshell file API that owns one session at a time.
pub struct SessionClient {
    api: ApiClient,
    session_key: Option<String>,
    progress: Option<ProgressCallback>,
}

impl SessionClient {
    /// Create a logged-out client for `base_url`.
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self::with_api(ApiClient::new(base_url)?))
    }

    /// Create a logged-out client over a configured [`ApiClient`].
    pub fn with_api(api: ApiClient) -> Self {
        Self {
            api,
            session_key: None,
            progress: None,
        }
    }

    /// Base endpoint this client talks to.
    pub fn endpoint(&self) -> &str {
        self.api.base_url()
    }

    /// Current session token, if logged in.
    pub fn session_key(&self) -> Option<&str> {
        self.session_key.as_deref()
    }

    /// Whether a session token is held.
    pub fn is_authenticated(&self) -> bool {
        self.session_key.is_some()
    }

    /// Drop the local session without contacting the server.
    pub fn reset(&mut self) {
        self.session_key = None;
    }

    /// Register a callback that receives transfer progress.
    pub fn watch_transfers(&mut self, callback: ProgressCallback) {
        self.progress = Some(callback);
    }

    /// Remove the transfer progress callback.
    pub fn clear_watch(&mut self) {
        self.progress = None;
    }

    pub(crate) fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Attach the current token to a file operation call.
    pub(crate) fn authorize<'a>(&'a self, call: ApiCall<'a>) -> ApiCall<'a> {
        call.credential(routes::SESSION_HEADER, self.session_key())
    }

    pub(crate) fn set_session_key(&mut self, key: String) {
        self.session_key = Some(key);
    }

    pub(crate) fn take_session_key(&mut self) -> Option<String> {
        self.session_key.take()
    }

    pub(crate) fn progress_mut(&mut self) -> Option<&mut ProgressCallback> {
        self.progress.as_mut()
    }
}

impl fmt::Debug for SessionClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionClient")
            .field("endpoint", &self.api.base_url())
            .field("authenticated", &self.is_authenticated())
            .field("watching", &self.progress.is_some())
            .finish()
    }
}
