//! File operations split into focused modules.

mod browse;
mod content;
mod dir_ops;
mod download;
mod quota;
mod upload;
