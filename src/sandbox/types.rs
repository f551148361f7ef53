//! Request and result shapes shared by both sandbox providers.
//!
//! Each request carries the union of what Daytona and E2B accept. Fields only
//! one provider understands are optional and ignored by the other; the tool
//! schemas in [`crate::tools::sandbox`] advertise them only for the provider
//! that uses them. Requests accept the camelCase names agent frameworks tend
//! to send (`sandboxId`, `timeoutMs`, ...) as aliases.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ── Requests ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateSandboxRequest {
    /// Environment variables set inside the sandbox.
    #[serde(default, alias = "envVars")]
    pub envs: HashMap<String, String>,
    /// Daytona: sandbox name.
    #[serde(default)]
    pub name: Option<String>,
    /// Daytona: labels attached to the sandbox.
    #[serde(default)]
    pub labels: HashMap<String, String>,
    /// Daytona: default language of the code runner.
    #[serde(default)]
    pub language: Option<String>,
    /// E2B: metadata attached to the sandbox.
    #[serde(default)]
    pub metadata: HashMap<String, String>,
    /// E2B: sandbox lifetime.
    #[serde(default, alias = "timeoutMs", alias = "timeoutMS")]
    pub timeout_ms: Option<u64>,
    /// E2B: template to boot from.
    #[serde(default)]
    pub template: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RunCodeRequest {
    #[serde(default, alias = "sandboxId")]
    pub sandbox_id: Option<String>,
    pub code: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default, alias = "envVars")]
    pub envs: HashMap<String, String>,
    #[serde(default, alias = "timeoutMs", alias = "timeoutMS")]
    pub timeout_ms: Option<u64>,
    /// Daytona: arguments passed to the program.
    #[serde(default)]
    pub argv: Vec<String>,
}

/// Arguments of the operations that only need a path.
#[derive(Debug, Clone, Deserialize)]
pub struct PathRequest {
    #[serde(default, alias = "sandboxId")]
    pub sandbox_id: Option<String>,
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WriteFileRequest {
    #[serde(default, alias = "sandboxId")]
    pub sandbox_id: Option<String>,
    pub path: String,
    pub content: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct FileUpload {
    pub path: String,
    pub data: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WriteFilesRequest {
    #[serde(default, alias = "sandboxId")]
    pub sandbox_id: Option<String>,
    pub files: Vec<FileUpload>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListFilesRequest {
    #[serde(default, alias = "sandboxId")]
    pub sandbox_id: Option<String>,
    #[serde(default = "root_path")]
    pub path: String,
}

fn root_path() -> String {
    "/".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateDirectoryRequest {
    #[serde(default, alias = "sandboxId")]
    pub sandbox_id: Option<String>,
    pub path: String,
    /// Daytona: octal permission bits for the new folder.
    #[serde(default)]
    pub mode: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GetFileSizeRequest {
    #[serde(default, alias = "sandboxId")]
    pub sandbox_id: Option<String>,
    pub path: String,
    #[serde(default, alias = "humanReadable")]
    pub human_readable: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WatchDirectoryRequest {
    #[serde(default, alias = "sandboxId")]
    pub sandbox_id: Option<String>,
    pub path: String,
    #[serde(default)]
    pub recursive: bool,
    #[serde(default, alias = "watchDuration", alias = "watchDurationMs")]
    pub watch_duration_ms: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RunCommandRequest {
    #[serde(default, alias = "sandboxId")]
    pub sandbox_id: Option<String>,
    pub command: String,
    #[serde(default, alias = "workingDirectory", alias = "workdir")]
    pub working_directory: Option<String>,
    #[serde(default, alias = "timeoutMs", alias = "timeoutMS")]
    pub timeout_ms: Option<u64>,
    #[serde(default, alias = "envVars")]
    pub envs: HashMap<String, String>,
}

/// Fully-defaulted command handed to a [`super::SandboxClient`].
#[derive(Debug, Clone)]
pub struct CommandSpec<'a> {
    pub command: &'a str,
    pub workdir: &'a str,
    pub timeout_ms: u64,
    pub envs: &'a HashMap<String, String>,
}

// ── Results ───────────────────────────────────────────────────────────────────

/// Output from a command executed inside a sandbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    File,
    Dir,
}

impl FileType {
    /// Map the provider's spelling of an entry type.
    pub fn from_provider(raw: &str, is_dir: bool) -> Self {
        if is_dir || matches!(raw, "dir" | "directory" | "DIR" | "FILE_TYPE_DIRECTORY") {
            Self::Dir
        } else {
            Self::File
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryInfo {
    pub name: String,
    pub path: String,
    pub is_directory: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileInfo {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub file_type: FileType,
    pub size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symlink_target: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WatchEventKind {
    Create,
    Write,
    Remove,
    Rename,
    Chmod,
}

impl WatchEventKind {
    pub fn from_provider(raw: &str) -> Option<Self> {
        let raw = raw.trim_start_matches("EVENT_TYPE_").to_ascii_lowercase();
        match raw.as_str() {
            "create" => Some(Self::Create),
            "write" => Some(Self::Write),
            "remove" => Some(Self::Remove),
            "rename" => Some(Self::Rename),
            "chmod" => Some(Self::Chmod),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WatchEvent {
    #[serde(rename = "type")]
    pub kind: WatchEventKind,
    pub name: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateSandboxResult {
    pub sandbox_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunCodeResult {
    pub execution: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReadFileResult {
    pub path: String,
    pub content: String,
}

/// Result of write_file, delete_file and create_directory.
#[derive(Debug, Clone, Serialize)]
pub struct PathOutcome {
    pub success: bool,
    pub path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct WriteFilesResult {
    pub success: bool,
    pub files_written: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListFilesResult {
    pub path: String,
    pub files: Vec<EntryInfo>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileExistsResult {
    pub exists: bool,
    pub path: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub file_type: Option<FileType>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileSizeResult {
    pub path: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub file_type: FileType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub human_readable_size: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WatchDirectoryResult {
    pub watch_started: bool,
    pub path: String,
    pub events: Vec<WatchEvent>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommandResult {
    pub success: bool,
    pub exit_code: i64,
    pub stdout: String,
    pub stderr: String,
    pub command: String,
    pub execution_time_ms: u64,
}

/// Render a byte count with binary units, e.g. `1536` → `"1.50 KB"`.
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];

    if bytes < 1024 {
        return format!("{bytes} B");
    }

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{size:.2} {}", UNITS[unit])
}
