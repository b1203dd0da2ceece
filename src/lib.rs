//! # webshell-harness
//!
//! Rust client and test harness for the Webshell remote file-management API.
//!
//! ## Features
//!
//! - **Sessions**: Login against a cluster over the API's SSH bridge and
//!   logout, with the session token owned by one [`SessionClient`].
//! - **Filesystem Operations**:
//!   - List directories and read attributes.
//!   - Create, delete, copy, move and rename files and directories.
//!   - Read and write text content, chmod, chown, execute and quota.
//! - **File Transfers**:
//!   - Streaming multipart upload with offset/update options.
//!   - Download that resolves only once the local file is complete.
//!   - Progress tracking with custom callbacks.
//! - **Harness**: Run named operations in order with automatic login and
//!   logout around them, collecting every outcome in a [`RunReport`].
//!
//! ## Example: Direct Calls
//!
//! ```no_run
//! use webshell_harness::{Credentials, EntryType, SessionClient};
//!
//! # async fn example() -> webshell_harness::Result<()> {
//! let mut client = SessionClient::new("http://localhost:8080")?;
//! let login = client
//!     .login(&Credentials::new("default", "root", "secret", "127.0.0.1"))
//!     .await?;
//! println!("home: {}", login.home_path);
//!
//! client.create("/home/test_api", EntryType::Dir).await?;
//! let listing = client.list("default", "/home").await?;
//! println!("{listing}");
//!
//! client.logout().await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Example: Scripted Run
//!
//! ```no_run
//! use webshell_harness::{HarnessConfig, TestOrchestrator};
//!
//! # async fn example() -> webshell_harness::Result<()> {
//! let config = HarnessConfig::load(None)?;
//! let mut client = config.client()?;
//! let mut orchestrator = TestOrchestrator::new(&mut client, &config);
//!
//! // Login is inserted before `list`, logout after `readContent`.
//! let report = orchestrator.run(&["list", "createDir", "readContent"]).await;
//! for step in report.steps() {
//!     println!("{step}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod fs;
pub mod harness;
pub mod http;
pub mod progress;
pub mod session;

// Re-export commonly used types
pub use config::HarnessConfig;
pub use error::{ErrorKind, HarnessError, Result};
pub use fs::{DownloadSummary, EntryType, UploadOptions};
pub use harness::{OperationKind, Preset, RunReport, TestOrchestrator};
pub use progress::{ProgressCallback, TransferProgress};
pub use session::{Credentials, LoginResult, SessionClient};
