//! Named operations and the fixture paths they act on.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde_json::{Value, json};

use crate::config::HarnessConfig;
use crate::error::{HarnessError, Result};
use crate::fs::{EntryType, UploadOptions};
use crate::session::{Credentials, SessionClient, SessionEffect, SessionRequirement};

/// Text written by `writeContent`.
pub const TEST_CONTENT: &str = "Hello World from API Test!";

/// Every operation the orchestrator can run by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Login,
    Logout,
    List,
    CreateDir,
    CreateFile,
    WriteContent,
    ReadContent,
    GetAttr,
    Chmod,
    Copy,
    Rename,
    Move,
    Delete,
    RemoveFile,
    RemoveDir,
    Upload,
    Download,
    Execute,
    Chown,
    Quota,
}

impl OperationKind {
    /// All operations, in the order they are listed to users.
    pub const ALL: [OperationKind; 20] = [
        OperationKind::Login,
        OperationKind::Logout,
        OperationKind::List,
        OperationKind::CreateDir,
        OperationKind::CreateFile,
        OperationKind::WriteContent,
        OperationKind::ReadContent,
        OperationKind::GetAttr,
        OperationKind::Chmod,
        OperationKind::Copy,
        OperationKind::Rename,
        OperationKind::Move,
        OperationKind::Delete,
        OperationKind::RemoveFile,
        OperationKind::RemoveDir,
        OperationKind::Upload,
        OperationKind::Download,
        OperationKind::Execute,
        OperationKind::Chown,
        OperationKind::Quota,
    ];

    /// Name used on the command line and in reports.
    pub fn name(self) -> &'static str {
        match self {
            OperationKind::Login => "login",
            OperationKind::Logout => "logout",
            OperationKind::List => "list",
            OperationKind::CreateDir => "createDir",
            OperationKind::CreateFile => "createFile",
            OperationKind::WriteContent => "writeContent",
            OperationKind::ReadContent => "readContent",
            OperationKind::GetAttr => "getAttr",
            OperationKind::Chmod => "chmod",
            OperationKind::Copy => "copy",
            OperationKind::Rename => "rename",
            OperationKind::Move => "move",
            OperationKind::Delete => "delete",
            OperationKind::RemoveFile => "removeFile",
            OperationKind::RemoveDir => "removeDir",
            OperationKind::Upload => "upload",
            OperationKind::Download => "download",
            OperationKind::Execute => "execute",
            OperationKind::Chown => "chown",
            OperationKind::Quota => "quota",
        }
    }

    /// Look up an operation by name. `listFiles` is accepted for `list`.
    pub fn from_name(name: &str) -> Option<Self> {
        if name == "listFiles" {
            return Some(OperationKind::List);
        }
        Self::ALL.iter().copied().find(|kind| kind.name() == name)
    }

    pub fn requirement(self) -> SessionRequirement {
        match self {
            OperationKind::Login => SessionRequirement::None,
            OperationKind::Logout => SessionRequirement::Existing,
            _ => SessionRequirement::Active,
        }
    }

    pub fn effect(self) -> SessionEffect {
        match self {
            OperationKind::Login => SessionEffect::Opens,
            OperationKind::Logout => SessionEffect::Closes,
            _ => SessionEffect::Preserves,
        }
    }

    /// Run this operation against `client`.
    pub(crate) async fn invoke(
        self,
        client: &mut SessionClient,
        fixtures: &Fixtures,
        credentials: &Credentials,
    ) -> Result<Value> {
        let cluster = fixtures.cluster.as_str();
        match self {
            OperationKind::Login => {
                let login = client.login(credentials).await?;
                Ok(json!({
                    "session_key": login.session_key,
                    "home_path": login.home_path,
                }))
            }
            OperationKind::Logout => client.logout().await,
            OperationKind::List => client.list(cluster, &fixtures.home_dir).await,
            OperationKind::CreateDir => client.create(&fixtures.test_dir, EntryType::Dir).await,
            OperationKind::CreateFile => {
                client.create(&fixtures.test_file(), EntryType::File).await
            }
            OperationKind::WriteContent => {
                client
                    .write_content(cluster, &fixtures.test_file(), &fixtures.content)
                    .await
            }
            OperationKind::ReadContent => client.read_content(cluster, &fixtures.test_file()).await,
            OperationKind::GetAttr => client.attr(cluster, &fixtures.test_file()).await,
            OperationKind::Chmod => client.chmod(&fixtures.test_file(), &fixtures.mode).await,
            OperationKind::Copy => client.copy(&fixtures.test_file(), &fixtures.copy_file()).await,
            OperationKind::Rename => {
                client
                    .rename(&fixtures.copy_file(), &fixtures.renamed_file())
                    .await
            }
            OperationKind::Move => client.mv(&fixtures.test_file(), &fixtures.moved_file()).await,
            OperationKind::Delete => {
                client.delete(&fixtures.renamed_file(), EntryType::File).await
            }
            OperationKind::RemoveFile => {
                client.delete(&fixtures.test_file(), EntryType::File).await
            }
            OperationKind::RemoveDir => client.delete(&fixtures.test_dir, EntryType::Dir).await,
            OperationKind::Upload => {
                client
                    .upload(
                        cluster,
                        &fixtures.upload_target,
                        &fixtures.upload_source,
                        UploadOptions::overwrite(),
                    )
                    .await
            }
            OperationKind::Download => {
                let summary = client
                    .download(cluster, &fixtures.test_file(), &fixtures.download_target)
                    .await?;
                Ok(json!({
                    "path": summary.path.display().to_string(),
                    "bytes": summary.bytes,
                }))
            }
            OperationKind::Execute => client.execute(cluster, &fixtures.script_file()).await,
            OperationKind::Chown => {
                client
                    .chown(&fixtures.test_file(), &fixtures.owner, &fixtures.group)
                    .await
            }
            OperationKind::Quota => client.quota(cluster, None).await,
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl AsRef<str> for OperationKind {
    fn as_ref(&self) -> &str {
        self.name()
    }
}

impl FromStr for OperationKind {
    type Err = HarnessError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s).ok_or_else(|| HarnessError::UnknownOperation(s.to_string()))
    }
}

/// Arguments the named operations use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixtures {
    pub cluster: String,
    pub home_dir: String,
    pub test_dir: String,
    pub upload_source: PathBuf,
    pub upload_target: String,
    pub download_target: PathBuf,
    pub content: String,
    pub mode: String,
    pub owner: String,
    pub group: String,
}

impl Fixtures {
    pub fn from_config(config: &HarnessConfig) -> Self {
        let paths = &config.test_paths;
        Self {
            cluster: config.ssh.cluster.clone(),
            home_dir: paths.home_dir.clone(),
            test_dir: paths.test_dir.trim_end_matches('/').to_string(),
            upload_source: paths.upload_source.clone(),
            upload_target: paths.upload_target.clone(),
            download_target: paths.download_target.clone(),
            content: TEST_CONTENT.to_string(),
            mode: "755".to_string(),
            owner: "root".to_string(),
            group: "root".to_string(),
        }
    }

    fn in_test_dir(&self, name: &str) -> String {
        format!("{}/{}", self.test_dir, name)
    }

    pub fn test_file(&self) -> String {
        self.in_test_dir("test.txt")
    }

    pub fn copy_file(&self) -> String {
        self.in_test_dir("test_copy.txt")
    }

    pub fn renamed_file(&self) -> String {
        self.in_test_dir("test_renamed.txt")
    }

    pub fn moved_file(&self) -> String {
        self.in_test_dir("moved_test.txt")
    }

    pub fn script_file(&self) -> String {
        self.in_test_dir("test.sh")
    }
}
