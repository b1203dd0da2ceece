//! Predefined operation sequences.

use crate::harness::operation::OperationKind;

/// Canned sequences selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    /// Login, upload the sample file, logout.
    #[default]
    Full,
    /// Login, list the home directory, logout.
    LoginOnly,
    /// Login and logout only.
    Connection,
    /// Exercise the file operations inside the test directory.
    Smoke,
}

impl Preset {
    /// Operations for this preset. `cleanup` adds the steps that remove the
    /// smoke fixtures again.
    pub fn sequence(self, cleanup: bool) -> Vec<OperationKind> {
        use OperationKind::*;

        match self {
            Preset::Full => vec![Login, Upload, Logout],
            Preset::LoginOnly => vec![Login, List, Logout],
            Preset::Connection => vec![Login, Logout],
            Preset::Smoke => {
                let mut ops = vec![
                    List,
                    CreateDir,
                    CreateFile,
                    WriteContent,
                    ReadContent,
                    GetAttr,
                    Copy,
                    Rename,
                    Delete,
                ];
                if cleanup {
                    ops.extend([RemoveFile, RemoveDir]);
                }
                ops
            }
        }
    }
}
