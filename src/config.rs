//! Harness configuration.
//!
//! Loaded from TOML. Every field has a default so a partial file (or none at
//! all) still yields a usable configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::api::ApiClient;
use crate::error::{HarnessError, Result};
use crate::http::HttpClient;
use crate::session::{Credentials, SessionClient};

/// File picked up from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "login_config.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub base_url: String,
    /// HTTP(S) proxy for every request, e.g. `http://proxy.local:3128`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            proxy: None,
        }
    }
}

/// Remote paths and local files the named operations act on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestPaths {
    pub home_dir: String,
    pub test_dir: String,
    pub upload_source: PathBuf,
    pub upload_target: String,
    pub download_target: PathBuf,
}

impl Default for TestPaths {
    fn default() -> Self {
        Self {
            home_dir: "/home".to_string(),
            test_dir: "/home/test_api".to_string(),
            upload_source: PathBuf::from("./pic.png"),
            upload_target: "/pic.png".to_string(),
            download_target: PathBuf::from("./downloaded_test.txt"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestSettings {
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Retries for requests that could not connect.
    pub retries: u32,
    /// Append cleanup steps to the smoke sequence.
    pub cleanup_on_exit: bool,
}

impl Default for TestSettings {
    fn default() -> Self {
        Self {
            timeout_ms: 5000,
            retries: 3,
            cleanup_on_exit: true,
        }
    }
}

impl TestSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Full harness configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    pub server: ServerConfig,
    pub ssh: Credentials,
    pub test_paths: TestPaths,
    pub test: TestSettings,
}

impl HarnessConfig {
    /// Parse a TOML document.
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| HarnessError::Config(e.to_string()))
    }

    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, [`DEFAULT_CONFIG_FILE`] in
    /// the working directory is used when present, otherwise the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let candidate = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !candidate.exists() {
                    warn!(
                        "{} not found, using example configuration",
                        DEFAULT_CONFIG_FILE
                    );
                    return Ok(Self::default());
                }
                candidate
            }
        };

        let text = std::fs::read_to_string(&path).map_err(|e| {
            HarnessError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml(&text)
            .map_err(|e| HarnessError::Config(format!("{}: {}", path.display(), e)))?;
        info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Build a logged-out client using the server, proxy, timeout and retry
    /// settings.
    pub fn client(&self) -> Result<SessionClient> {
        let http = match &self.server.proxy {
            Some(proxy) => {
                info!(proxy = %proxy, "routing requests through proxy");
                HttpClient::with_proxy(proxy, self.test.timeout())?
            }
            None => HttpClient::with_timeout(self.test.timeout())?,
        };
        let api = ApiClient::with_http(&self.server.base_url, http, self.test.retries);
        Ok(SessionClient::with_api(api))
    }
}
