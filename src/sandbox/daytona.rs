//! Daytona sandbox provider — HTTP client for the Daytona REST API.
//!
//! Sandboxes are created through `{api_url}/sandbox`; everything that runs
//! inside a sandbox goes through its toolbox at
//! `{api_url}/toolbox/{sandbox_id}/toolbox/...`.
//!
//! Daytona has no filesystem watcher, so [`DaytonaSandboxClient::watch_directory`]
//! polls the directory listing and diffs successive snapshots.

use super::types::{
    CommandOutput, CommandSpec, CreateSandboxRequest, EntryInfo, FileInfo, FileType,
    FileUpload, RunCodeRequest, WatchEvent, WatchEventKind,
};
use super::{body_or_unreadable, Provider, SandboxClient};
use crate::config::DaytonaConfig;
use crate::error::ConfigurationError;
use async_trait::async_trait;
use base64::Engine as _;
use parking_lot::Mutex;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Interval between listings while watching a directory.
const WATCH_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Label Daytona reads to pick the code runner language.
const LANGUAGE_LABEL: &str = "code-toolbox-language";

/// Timeout for code runs when the caller passes none.
const DEFAULT_CODE_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateSandboxBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    env_vars: &'a HashMap<String, String>,
    labels: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct SandboxResponse {
    id: String,
}

#[derive(Debug, Serialize)]
struct ExecuteBody<'a> {
    command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    cwd: Option<&'a str>,
    timeout: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    env: Option<&'a HashMap<String, String>>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExecuteResponse {
    #[serde(default)]
    exit_code: i64,
    #[serde(default)]
    result: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFileInfo {
    #[serde(default)]
    name: String,
    #[serde(default)]
    is_dir: bool,
    #[serde(default)]
    size: u64,
    #[serde(default)]
    mod_time: Option<String>,
    #[serde(default)]
    permissions: Option<String>,
    #[serde(default)]
    owner: Option<String>,
    #[serde(default)]
    group: Option<String>,
}

/// What a watched path looked like at one poll.
#[derive(Debug, Clone, PartialEq, Eq)]
struct EntryState {
    is_dir: bool,
    size: u64,
    mod_time: Option<String>,
}

/// HTTP client for the Daytona API.
pub struct DaytonaSandboxClient {
    api_key: String,
    api_url: String,
    sandbox_id: Arc<Mutex<Option<String>>>,
    http: reqwest::Client,
}

impl DaytonaSandboxClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, ConfigurationError> {
        Self::from_config(&DaytonaConfig {
            api_key: Some(api_key.into()),
            ..DaytonaConfig::default()
        })
    }

    pub fn from_config(config: &DaytonaConfig) -> Result<Self, ConfigurationError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            api_key: config.api_key.clone().unwrap_or_default(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
            sandbox_id: Arc::new(Mutex::new(None)),
            http,
        })
    }

    fn toolbox_url(&self, sandbox_id: &str, route: &str) -> String {
        format!("{}/toolbox/{sandbox_id}/toolbox/{route}", self.api_url)
    }

    fn path_url(&self, sandbox_id: &str, route: &str, path: &str) -> String {
        format!(
            "{}?path={encoded}",
            self.toolbox_url(sandbox_id, route),
            encoded = urlencoding::encode(path)
        )
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        op: &str,
    ) -> anyhow::Result<(StatusCode, String)> {
        let resp = request
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("Daytona {op} request failed: {e}"))?;

        let status = resp.status();
        let body_text = body_or_unreadable(resp.text().await);
        Ok((status, body_text))
    }

    async fn send_ok(&self, request: reqwest::RequestBuilder, op: &str) -> anyhow::Result<String> {
        let (status, body_text) = self.send(request, op).await?;
        anyhow::ensure!(
            status.is_success(),
            "Daytona API returned {status}: {body_text}"
        );
        Ok(body_text)
    }

    async fn file_info(&self, sandbox_id: &str, path: &str) -> anyhow::Result<Option<RawFileInfo>> {
        let url = self.path_url(sandbox_id, "files/info", path);
        let (status, body_text) = self.send(self.http.get(&url), "file info").await?;

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        anyhow::ensure!(
            status.is_success(),
            "Daytona API returned {status}: {body_text}"
        );

        let info = serde_json::from_str(&body_text).map_err(|e| {
            anyhow::anyhow!("Failed to parse Daytona response: {e}\nBody: {body_text}")
        })?;
        Ok(Some(info))
    }

    async fn list_raw(&self, sandbox_id: &str, path: &str) -> anyhow::Result<Vec<RawFileInfo>> {
        let url = self.path_url(sandbox_id, "files", path);
        let body_text = self.send_ok(self.http.get(&url), "list_files").await?;
        serde_json::from_str(&body_text).map_err(|e| {
            anyhow::anyhow!("Failed to parse Daytona response: {e}\nBody: {body_text}")
        })
    }

    async fn execute(
        &self,
        sandbox_id: &str,
        body: &ExecuteBody<'_>,
        op: &str,
    ) -> anyhow::Result<ExecuteResponse> {
        let url = self.toolbox_url(sandbox_id, "process/execute");
        let body_text = self.send_ok(self.http.post(&url).json(body), op).await?;
        serde_json::from_str(&body_text).map_err(|e| {
            anyhow::anyhow!("Failed to parse Daytona response: {e}\nBody: {body_text}")
        })
    }

    /// Take a snapshot of everything under `root` keyed by path relative to it.
    async fn snapshot(
        &self,
        sandbox_id: &str,
        root: &str,
        recursive: bool,
    ) -> anyhow::Result<HashMap<String, EntryState>> {
        let prefix = root.trim_end_matches('/');
        let mut seen = HashMap::new();
        let mut dirs_to_visit = vec![root.to_string()];

        while let Some(dir) = dirs_to_visit.pop() {
            let listing = if dir == root {
                self.list_raw(sandbox_id, &dir).await?
            } else {
                match self.list_raw(sandbox_id, &dir).await {
                    Ok(l) => l,
                    Err(e) => {
                        // Subdirectory vanished between polls.
                        tracing::debug!("Skipping {dir} while watching: {e}");
                        continue;
                    }
                }
            };

            for entry in listing {
                let full_path = format!("{}/{}", dir.trim_end_matches('/'), entry.name);
                if recursive && entry.is_dir {
                    dirs_to_visit.push(full_path.clone());
                }
                let relative = full_path
                    .strip_prefix(prefix)
                    .unwrap_or(&full_path)
                    .trim_start_matches('/')
                    .to_string();
                seen.insert(
                    relative,
                    EntryState {
                        is_dir: entry.is_dir,
                        size: entry.size,
                        mod_time: entry.mod_time,
                    },
                );
            }
        }

        Ok(seen)
    }
}

/// Events that turn `before` into `after`, sorted by name.
fn diff_snapshots(
    before: &HashMap<String, EntryState>,
    after: &HashMap<String, EntryState>,
    timestamp: &str,
) -> Vec<WatchEvent> {
    let mut events = Vec::new();

    for (name, state) in after {
        let kind = match before.get(name) {
            None => Some(WatchEventKind::Create),
            Some(prev) if !state.is_dir && prev != state => Some(WatchEventKind::Write),
            Some(_) => None,
        };
        if let Some(kind) = kind {
            events.push(WatchEvent {
                kind,
                name: name.clone(),
                timestamp: timestamp.to_string(),
            });
        }
    }

    for name in before.keys() {
        if !after.contains_key(name) {
            events.push(WatchEvent {
                kind: WatchEventKind::Remove,
                name: name.clone(),
                timestamp: timestamp.to_string(),
            });
        }
    }

    events.sort_by(|a, b| a.name.cmp(&b.name));
    events
}

/// Wrap `value` in single quotes for `sh`.
fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

/// Shell command that runs `code` with the interpreter for `language`.
fn code_run_command(code: &str, language: Option<&str>, argv: &[String]) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(code);

    let runner = match language.unwrap_or("python") {
        "javascript" | "js" => "node -",
        "typescript" | "ts" => "npx --yes tsx -",
        _ => "python3 -u -",
    };

    let mut pipeline = format!("echo {encoded} | base64 -d | {runner}");
    for arg in argv {
        pipeline.push(' ');
        pipeline.push_str(&shell_quote(arg));
    }

    format!("sh -c {}", shell_quote(&pipeline))
}

#[async_trait]
impl SandboxClient for DaytonaSandboxClient {
    fn provider(&self) -> Provider {
        Provider::Daytona
    }

    async fn create_sandbox(&self, request: &CreateSandboxRequest) -> anyhow::Result<String> {
        let mut labels = request.labels.clone();
        if let Some(language) = &request.language {
            labels.insert(LANGUAGE_LABEL.to_string(), language.clone());
        }

        let body = CreateSandboxBody {
            name: request.name.as_deref(),
            env_vars: &request.envs,
            labels,
        };

        let url = format!("{}/sandbox", self.api_url);
        let body_text = self
            .send_ok(self.http.post(&url).json(&body), "create sandbox")
            .await?;

        let sandbox: SandboxResponse = serde_json::from_str(&body_text).map_err(|e| {
            anyhow::anyhow!("Failed to parse Daytona response: {e}\nBody: {body_text}")
        })?;

        tracing::info!(sandbox_id = %sandbox.id, "daytona sandbox created");
        self.set_id(sandbox.id.clone());
        Ok(sandbox.id)
    }

    async fn run_code(&self, sandbox_id: &str, request: &RunCodeRequest) -> anyhow::Result<String> {
        let body = ExecuteBody {
            command: code_run_command(&request.code, request.language.as_deref(), &request.argv),
            cwd: None,
            timeout: request
                .timeout_ms
                .map(|ms| ms.div_ceil(1000))
                .unwrap_or(DEFAULT_CODE_TIMEOUT_SECS),
            env: (!request.envs.is_empty()).then_some(&request.envs),
        };

        let response = self.execute(sandbox_id, &body, "run_code").await?;
        serde_json::to_string(&response)
            .map_err(|e| anyhow::anyhow!("Failed to serialize execution: {e}"))
    }

    async fn read_file(&self, sandbox_id: &str, path: &str) -> anyhow::Result<String> {
        let url = self.path_url(sandbox_id, "files/download", path);
        let (status, body_text) = self.send(self.http.get(&url), "read_file").await?;

        if status == StatusCode::NOT_FOUND {
            anyhow::bail!("File not found: {path}");
        }
        anyhow::ensure!(
            status.is_success(),
            "Daytona API returned {status}: {body_text}"
        );
        Ok(body_text)
    }

    async fn write_file(&self, sandbox_id: &str, path: &str, content: &str) -> anyhow::Result<()> {
        let url = self.path_url(sandbox_id, "files/upload", path);
        let file_name = std::path::Path::new(path)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("file")
            .to_string();

        let form = reqwest::multipart::Form::new().part(
            "file",
            reqwest::multipart::Part::bytes(content.as_bytes().to_vec()).file_name(file_name),
        );

        self.send_ok(self.http.post(&url).multipart(form), "write_file")
            .await?;
        Ok(())
    }

    async fn write_files(&self, sandbox_id: &str, files: &[FileUpload]) -> anyhow::Result<()> {
        let url = self.toolbox_url(sandbox_id, "files/bulk-upload");

        let mut form = reqwest::multipart::Form::new();
        for (i, file) in files.iter().enumerate() {
            form = form
                .text(format!("files[{i}].path"), file.path.clone())
                .part(
                    format!("files[{i}].file"),
                    reqwest::multipart::Part::bytes(file.data.as_bytes().to_vec())
                        .file_name(file.path.clone()),
                );
        }

        self.send_ok(self.http.post(&url).multipart(form), "write_files")
            .await?;
        Ok(())
    }

    async fn list_files(&self, sandbox_id: &str, path: &str) -> anyhow::Result<Vec<EntryInfo>> {
        let base = path.trim_end_matches('/');
        Ok(self
            .list_raw(sandbox_id, path)
            .await?
            .into_iter()
            .map(|entry| EntryInfo {
                path: format!("{base}/{}", entry.name),
                name: entry.name,
                is_directory: entry.is_dir,
            })
            .collect())
    }

    async fn delete_file(&self, sandbox_id: &str, path: &str) -> anyhow::Result<()> {
        let url = self.path_url(sandbox_id, "files", path);
        self.send_ok(self.http.delete(&url), "delete_file").await?;
        Ok(())
    }

    async fn create_directory(
        &self,
        sandbox_id: &str,
        path: &str,
        mode: Option<&str>,
    ) -> anyhow::Result<()> {
        let url = format!(
            "{}&mode={}",
            self.path_url(sandbox_id, "files/folder", path),
            urlencoding::encode(mode.unwrap_or("755"))
        );
        self.send_ok(self.http.post(&url), "create_directory")
            .await?;
        Ok(())
    }

    async fn get_file_info(&self, sandbox_id: &str, path: &str) -> anyhow::Result<FileInfo> {
        let info = self
            .file_info(sandbox_id, path)
            .await?
            .ok_or_else(|| anyhow::anyhow!("File not found: {path}"))?;

        let mode = info
            .permissions
            .as_deref()
            .and_then(|p| u32::from_str_radix(p, 8).ok());

        Ok(FileInfo {
            name: info.name,
            path: path.to_string(),
            file_type: FileType::from_provider("", info.is_dir),
            size: info.size,
            mode,
            permissions: info.permissions,
            owner: info.owner,
            group: info.group,
            modified_time: info.mod_time,
            symlink_target: None,
        })
    }

    async fn check_file_exists(
        &self,
        sandbox_id: &str,
        path: &str,
    ) -> anyhow::Result<Option<FileType>> {
        Ok(self
            .file_info(sandbox_id, path)
            .await?
            .map(|info| FileType::from_provider("", info.is_dir)))
    }

    async fn watch_directory(
        &self,
        sandbox_id: &str,
        path: &str,
        recursive: bool,
        duration: Duration,
    ) -> anyhow::Result<Vec<WatchEvent>> {
        let deadline = tokio::time::Instant::now() + duration;
        let mut previous = self.snapshot(sandbox_id, path, recursive).await?;
        let mut events = Vec::new();

        while tokio::time::Instant::now() < deadline {
            let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
            tokio::time::sleep(remaining.min(WATCH_POLL_INTERVAL)).await;

            let current = self.snapshot(sandbox_id, path, recursive).await?;
            let now = chrono::Utc::now().to_rfc3339();
            events.extend(diff_snapshots(&previous, &current, &now));
            previous = current;
        }

        Ok(events)
    }

    async fn run_command(
        &self,
        sandbox_id: &str,
        command: &CommandSpec<'_>,
    ) -> anyhow::Result<CommandOutput> {
        let body = ExecuteBody {
            command: command.command.to_string(),
            cwd: Some(command.workdir),
            timeout: command.timeout_ms.div_ceil(1000),
            env: (!command.envs.is_empty()).then_some(command.envs),
        };

        let response = self.execute(sandbox_id, &body, "run_command").await?;

        // The toolbox merges both streams into `result`.
        Ok(CommandOutput {
            stdout: response.result,
            stderr: String::new(),
            exit_code: response.exit_code,
        })
    }

    fn current_id(&self) -> Option<String> {
        self.sandbox_id.lock().clone()
    }

    fn set_id(&self, id: String) {
        *self.sandbox_id.lock() = Some(id);
    }
}
