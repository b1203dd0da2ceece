//! Remote file operations.

pub(crate) mod entry;
mod operations;

pub use entry::{DownloadSummary, EntryType, UploadOptions};
