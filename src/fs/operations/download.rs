//! Download operations.
//!
//! The response body is fed through a channel to a dedicated writer task.
//! The writer owns the temporary file and reports through a oneshot once the
//! file is flushed and renamed into place; that report, not the HTTP
//! response, decides whether the download succeeded.

use std::io;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use futures::StreamExt;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::api::{ApiCall, routes};
use crate::error::{HarnessError, Result};
use crate::fs::entry::DownloadSummary;
use crate::progress::TransferProgress;
use crate::session::SessionClient;

/// Chunks buffered between the body stream and the writer.
const SINK_DEPTH: usize = 16;

enum SinkEvent {
    Chunk(Bytes),
    Abort,
}

impl SessionClient {
    /// Download `remote_path` into `local_path`.
    ///
    /// Resolves only after the local file is complete. The data is written
    /// to a hidden `.<name>.part` sibling first and renamed on success; on
    /// any failure the partial file is removed.
    ///
    /// # Arguments
    /// * `cluster` - Cluster the session was opened on
    /// * `remote_path` - Remote file to fetch
    /// * `local_path` - Target file path
    pub async fn download<P: AsRef<Path>>(
        &mut self,
        cluster: &str,
        remote_path: &str,
        local_path: P,
    ) -> Result<DownloadSummary> {
        let target = local_path.as_ref().to_path_buf();
        let temp_path = partial_path(&target)?;

        let response = self
            .api()
            .send(
                self.authorize(ApiCall::get(routes::DOWNLOAD).streamed())
                    .query("cluster", cluster)
                    .query("path", remote_path),
            )
            .await?;
        let expected = response.content_length();
        debug!(remote = remote_path, ?expected, "download started");

        let file = File::create(&temp_path).await?;
        let (chunk_tx, chunk_rx) = mpsc::channel(SINK_DEPTH);
        let (done_tx, done_rx) = oneshot::channel();
        tokio::spawn(write_sink(
            file,
            temp_path,
            target.clone(),
            expected,
            chunk_rx,
            done_tx,
        ));

        let mut stream = response.bytes_stream();
        let mut received = 0u64;
        let mut feed_error = None;

        while let Some(chunk) = stream.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(e) => {
                    warn!(remote = remote_path, received, "download body failed: {}", e);
                    feed_error = Some(HarnessError::IncompleteTransfer {
                        expected: expected.unwrap_or(received),
                        received,
                    });
                    break;
                }
            };
            received += chunk.len() as u64;
            if chunk_tx.send(SinkEvent::Chunk(chunk)).await.is_err() {
                // Writer stopped early; its completion carries the reason.
                break;
            }
            if let Some(callback) = self.progress_mut() {
                if !callback(&TransferProgress::new(received, expected, remote_path)) {
                    feed_error = Some(HarnessError::Cancelled);
                    break;
                }
            }
        }

        if feed_error.is_some() {
            let _ = chunk_tx.send(SinkEvent::Abort).await;
        }
        drop(chunk_tx);

        let completion = done_rx.await.map_err(|_| HarnessError::IncompleteTransfer {
            expected: expected.unwrap_or(received),
            received,
        });
        if let Some(e) = feed_error {
            return Err(e);
        }
        let bytes = completion??;

        info!(remote = remote_path, local = %target.display(), bytes, "downloaded");
        Ok(DownloadSummary {
            path: target,
            bytes,
        })
    }
}

/// Hidden sibling used while the download is in flight.
fn partial_path(target: &Path) -> Result<PathBuf> {
    let name = target.file_name().ok_or_else(|| {
        HarnessError::Io(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("not a file path: {}", target.display()),
        ))
    })?;
    let parent = target.parent().unwrap_or(Path::new("."));
    Ok(parent.join(format!(".{}.part", name.to_string_lossy())))
}

async fn write_sink(
    mut file: File,
    temp_path: PathBuf,
    target: PathBuf,
    expected: Option<u64>,
    mut events: mpsc::Receiver<SinkEvent>,
    done: oneshot::Sender<Result<u64>>,
) {
    let mut result = drain(&mut file, expected, &mut events).await;
    drop(events);
    drop(file);

    if result.is_ok() {
        if let Err(e) = tokio::fs::rename(&temp_path, &target).await {
            result = Err(e.into());
        }
    }
    if result.is_err() {
        let _ = tokio::fs::remove_file(&temp_path).await;
    }
    let _ = done.send(result);
}

async fn drain(
    file: &mut File,
    expected: Option<u64>,
    events: &mut mpsc::Receiver<SinkEvent>,
) -> Result<u64> {
    let mut written = 0u64;
    while let Some(event) = events.recv().await {
        match event {
            SinkEvent::Chunk(chunk) => {
                file.write_all(&chunk).await?;
                written += chunk.len() as u64;
            }
            SinkEvent::Abort => return Err(HarnessError::Cancelled),
        }
    }
    file.flush().await?;
    file.sync_all().await?;

    match expected {
        Some(expected) if written < expected => Err(HarnessError::IncompleteTransfer {
            expected,
            received: written,
        }),
        _ => Ok(written),
    }
}
