//! Reading, writing and executing remote files.

use serde_json::{Value, json};

use crate::api::{ApiCall, routes};
use crate::error::Result;
use crate::session::SessionClient;

impl SessionClient {
    /// Read a remote text file.
    pub async fn read_content(&self, cluster: &str, path: &str) -> Result<Value> {
        self.api()
            .call(
                self.authorize(ApiCall::get(routes::CONTENT))
                    .query("cluster", cluster)
                    .query("path", path),
            )
            .await
    }

    /// Replace the content of a remote text file.
    pub async fn write_content(&self, cluster: &str, path: &str, content: &str) -> Result<Value> {
        self.api()
            .call(self.authorize(ApiCall::post(routes::CONTENT)).json(json!({
                "cluster": cluster,
                "path": path,
                "content": content,
            })))
            .await
    }

    /// Run a remote script. Arguments travel in the query; the body is empty.
    pub async fn execute(&self, cluster: &str, path: &str) -> Result<Value> {
        self.api()
            .call(
                self.authorize(ApiCall::post(routes::EXECUTE))
                    .query("cluster", cluster)
                    .query("path", path),
            )
            .await
    }
}
