//! The closed set of operations every sandbox provider exposes.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    CreateSandbox,
    RunCode,
    ReadFile,
    WriteFile,
    WriteFiles,
    ListFiles,
    DeleteFile,
    CreateDirectory,
    GetFileInfo,
    CheckFileExists,
    GetFileSize,
    WatchDirectory,
    RunCommand,
}

impl Operation {
    pub const ALL: [Operation; 13] = [
        Operation::CreateSandbox,
        Operation::RunCode,
        Operation::ReadFile,
        Operation::WriteFile,
        Operation::WriteFiles,
        Operation::ListFiles,
        Operation::DeleteFile,
        Operation::CreateDirectory,
        Operation::GetFileInfo,
        Operation::CheckFileExists,
        Operation::GetFileSize,
        Operation::WatchDirectory,
        Operation::RunCommand,
    ];

    /// Tool name used in LLM function calling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateSandbox => "create_sandbox",
            Self::RunCode => "run_code",
            Self::ReadFile => "read_file",
            Self::WriteFile => "write_file",
            Self::WriteFiles => "write_files",
            Self::ListFiles => "list_files",
            Self::DeleteFile => "delete_file",
            Self::CreateDirectory => "create_directory",
            Self::GetFileInfo => "get_file_info",
            Self::CheckFileExists => "check_file_exists",
            Self::GetFileSize => "get_file_size",
            Self::WatchDirectory => "watch_directory",
            Self::RunCommand => "run_command",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = anyhow::Error;

    /// Accepts `run_command`, `run-command` and `runCommand`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();

        Self::ALL
            .into_iter()
            .find(|op| op.as_str().replace('_', "") == normalized)
            .ok_or_else(|| anyhow::anyhow!("Unknown tool: {s}"))
    }
}
