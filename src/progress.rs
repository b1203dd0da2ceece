//! Progress reporting for file transfers.

/// Progress information for a download.
#[derive(Debug, Clone)]
pub struct TransferProgress {
    /// Bytes written to the local file so far
    pub done: u64,
    /// Advertised size, when the server sent a `Content-Length`
    pub total: Option<u64>,
    /// Remote path being transferred
    pub path: String,
}

impl TransferProgress {
    /// Create a new progress report.
    pub fn new(done: u64, total: Option<u64>, path: impl Into<String>) -> Self {
        Self {
            done,
            total,
            path: path.into(),
        }
    }

    /// Get progress as a percentage (0.0 to 100.0), if the size is known.
    pub fn percent(&self) -> Option<f64> {
        match self.total {
            Some(0) => Some(100.0),
            Some(total) => Some((self.done as f64 / total as f64) * 100.0),
            None => None,
        }
    }

    /// Check if the advertised size has been reached.
    pub fn is_complete(&self) -> bool {
        self.total.is_some_and(|total| self.done >= total)
    }
}

/// Type alias for progress callback function.
///
/// The callback receives progress information and can return `false` to cancel the transfer.
pub type ProgressCallback = Box<dyn FnMut(&TransferProgress) -> bool + Send>;
