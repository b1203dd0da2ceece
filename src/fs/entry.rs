//! Argument and result types shared by the file operations.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Kind of entry to create or delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryType {
    #[serde(rename = "file")]
    File,
    #[serde(rename = "dir")]
    Dir,
}

impl EntryType {
    /// Wire name expected by the service.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::File => "file",
            EntryType::Dir => "dir",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resume controls for an upload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UploadOptions {
    /// Byte offset to resume from; bytes before it are not sent.
    pub offset: u64,
    /// Overwrite or extend an existing remote file instead of rejecting it.
    pub update: bool,
}

impl UploadOptions {
    /// Fresh upload that replaces any existing remote file.
    pub fn overwrite() -> Self {
        Self {
            offset: 0,
            update: true,
        }
    }

    /// Continue a partial upload at `offset`.
    pub fn resume_at(offset: u64) -> Self {
        Self {
            offset,
            update: true,
        }
    }
}

/// Outcome of a completed download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadSummary {
    /// Final local path.
    pub path: PathBuf,
    /// Bytes written.
    pub bytes: u64,
}
