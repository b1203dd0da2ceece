//! Directory listing and attribute lookups.

use serde_json::Value;

use crate::api::{ApiCall, routes};
use crate::error::Result;
use crate::session::SessionClient;

impl SessionClient {
    /// List the entries of a remote directory.
    pub async fn list(&self, cluster: &str, path: &str) -> Result<Value> {
        self.api()
            .call(
                self.authorize(ApiCall::get(routes::FILES))
                    .query("cluster", cluster)
                    .query("path", path),
            )
            .await
    }

    /// Get the attributes (size, mode, owner, timestamps) of a remote path.
    pub async fn attr(&self, cluster: &str, path: &str) -> Result<Value> {
        self.api()
            .call(
                self.authorize(ApiCall::get(routes::ATTR))
                    .query("cluster", cluster)
                    .query("path", path),
            )
            .await
    }
}
