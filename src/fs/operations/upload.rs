//! Upload operations.

use std::io::{self, SeekFrom};
use std::path::Path;

use reqwest::Body;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tokio::io::AsyncSeekExt;
use tracing::info;

use crate::api::{ApiCall, routes};
use crate::error::{HarnessError, Result};
use crate::fs::entry::UploadOptions;
use crate::session::SessionClient;

impl SessionClient {
    /// Upload a local file to `remote_path`.
    ///
    /// The file is streamed from `options.offset` onward as the multipart
    /// `file` part; bytes before the offset are expected to exist remotely
    /// already. With `options.update` set the service overwrites or extends
    /// an existing file instead of rejecting the upload.
    ///
    /// # Arguments
    /// * `cluster` - Cluster the session was opened on
    /// * `remote_path` - Destination path on the remote host
    /// * `local_path` - Source file
    /// * `options` - Resume offset and update flag
    pub async fn upload<P: AsRef<Path>>(
        &self,
        cluster: &str,
        remote_path: &str,
        local_path: P,
        options: UploadOptions,
    ) -> Result<Value> {
        let path = local_path.as_ref();
        let file_name = path
            .file_name()
            .ok_or_else(|| invalid_input(format!("not a file path: {}", path.display())))?
            .to_string_lossy()
            .to_string();

        let file_size = tokio::fs::metadata(path).await?.len();
        if options.offset > file_size {
            return Err(invalid_input(format!(
                "offset {} beyond end of {} ({} bytes)",
                options.offset,
                path.display(),
                file_size
            )));
        }

        let mut file = tokio::fs::File::open(path).await?;
        if options.offset > 0 {
            file.seek(SeekFrom::Start(options.offset)).await?;
        }
        let remaining = file_size - options.offset;

        let part = Part::stream_with_length(Body::from(file), remaining).file_name(file_name);
        let form = Form::new()
            .text("cluster", cluster.to_string())
            .text("path", remote_path.to_string())
            .text("offset", options.offset.to_string())
            .text("update", options.update.to_string())
            .part("file", part);

        info!(
            local = %path.display(),
            remote = remote_path,
            offset = options.offset,
            bytes = remaining,
            "uploading"
        );
        self.api()
            .call(self.authorize(ApiCall::post(routes::TRANSMISSION).streamed()).multipart(form))
            .await
    }
}

fn invalid_input(message: String) -> HarnessError {
    HarnessError::Io(io::Error::new(io::ErrorKind::InvalidInput, message))
}
