//! Storage quota operations.

use serde_json::Value;

use crate::api::{ApiCall, routes};
use crate::error::Result;
use crate::session::SessionClient;

impl SessionClient {
    /// Get the disk quota of the logged-in user.
    ///
    /// `path` narrows the lookup to one filesystem; the service defaults to
    /// `/` when it is empty.
    pub async fn quota(&self, cluster: &str, path: Option<&str>) -> Result<Value> {
        self.api()
            .call(
                self.authorize(ApiCall::get(routes::QUOTA))
                    .query("cluster", cluster)
                    .query("path", path.unwrap_or_default()),
            )
            .await
    }
}
