//! Entry mutation operations.

use serde_json::{Value, json};

use crate::api::{ApiCall, routes};
use crate::error::Result;
use crate::fs::entry::EntryType;
use crate::session::SessionClient;

impl SessionClient {
    /// Create an empty file or a directory.
    pub async fn create(&self, path: &str, entry_type: EntryType) -> Result<Value> {
        self.api()
            .call(self.authorize(ApiCall::post(routes::FILES)).json(json!({
                "path": path,
                "type": entry_type,
            })))
            .await
    }

    /// Delete a file or a directory.
    pub async fn delete(&self, path: &str, entry_type: EntryType) -> Result<Value> {
        self.api()
            .call(self.authorize(ApiCall::delete(routes::FILES)).json(json!({
                "path": path,
                "type": entry_type,
            })))
            .await
    }

    /// Rename an entry in place.
    pub async fn rename(&self, old_path: &str, new_path: &str) -> Result<Value> {
        self.api()
            .call(self.authorize(ApiCall::put(routes::FILES)).json(json!({
                "old_path": old_path,
                "new_path": new_path,
            })))
            .await
    }

    /// Copy an entry.
    pub async fn copy(&self, src_path: &str, dst_path: &str) -> Result<Value> {
        self.transfer(routes::COPY, src_path, dst_path).await
    }

    /// Move an entry.
    pub async fn mv(&self, src_path: &str, dst_path: &str) -> Result<Value> {
        self.transfer(routes::MOVE, src_path, dst_path).await
    }

    /// Change the permission bits, given in octal notation (`"755"`).
    pub async fn chmod(&self, path: &str, mode: &str) -> Result<Value> {
        self.api()
            .call(self.authorize(ApiCall::post(routes::CHMOD)).json(json!({
                "path": path,
                "mode": mode,
            })))
            .await
    }

    /// Change owner and group.
    pub async fn chown(&self, path: &str, owner: &str, group: &str) -> Result<Value> {
        self.api()
            .call(self.authorize(ApiCall::post(routes::CHOWN)).json(json!({
                "path": path,
                "owner": owner,
                "group": group,
            })))
            .await
    }

    async fn transfer(&self, route: &'static str, src_path: &str, dst_path: &str) -> Result<Value> {
        self.api()
            .call(self.authorize(ApiCall::post(route)).json(json!({
                "src_path": src_path,
                "dst_path": dst_path,
            })))
            .await
    }
}
