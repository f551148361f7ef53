//! E2B sandbox provider — HTTP client for the E2B REST API.
//!
//! All requests authenticate with `Authorization: Bearer <E2B_API_KEY>`.
//! Per-sandbox routes live under `{api_url}/v0/sandboxes/{sandbox_id}`.

use super::types::{
    CommandOutput, CommandSpec, CreateSandboxRequest, EntryInfo, FileInfo, FileType,
    RunCodeRequest, WatchEvent, WatchEventKind,
};
use super::{body_or_unreadable, Provider, SandboxClient};
use crate::config::E2bConfig;
use crate::error::ConfigurationError;
use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::StatusCode;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

/// Sandbox lifetime requested when the caller does not pass one.
const DEFAULT_SANDBOX_TIMEOUT_MS: u64 = 600_000;

/// HTTP client for the E2B API.
pub struct E2bSandboxClient {
    api_key: String,
    api_url: String,
    template: String,
    sandbox_timeout_ms: u64,
    sandbox_id: Arc<Mutex<Option<String>>>,
    http: reqwest::Client,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEntry {
    #[serde(default)]
    name: String,
    #[serde(default)]
    path: String,
    #[serde(default, rename = "type")]
    entry_type: String,
    #[serde(default)]
    size: u64,
    #[serde(default)]
    mode: Option<u32>,
    #[serde(default)]
    permissions: Option<String>,
    #[serde(default)]
    owner: Option<String>,
    #[serde(default)]
    group: Option<String>,
    #[serde(default)]
    modified_time: Option<String>,
    #[serde(default)]
    symlink_target: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawWatchEvent {
    #[serde(rename = "type")]
    kind: String,
    name: String,
}

impl E2bSandboxClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, ConfigurationError> {
        Self::from_config(&E2bConfig {
            api_key: Some(api_key.into()),
            ..E2bConfig::default()
        })
    }

    pub fn from_config(config: &E2bConfig) -> Result<Self, ConfigurationError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            api_key: config.api_key.clone().unwrap_or_default(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
            template: config.template.clone(),
            sandbox_timeout_ms: config.sandbox_timeout_ms,
            sandbox_id: Arc::new(Mutex::new(None)),
            http,
        })
    }

    fn sandbox_url(&self, sandbox_id: &str, route: &str) -> String {
        format!("{}/v0/sandboxes/{sandbox_id}/{route}", self.api_url)
    }

    fn path_url(&self, sandbox_id: &str, route: &str, path: &str) -> String {
        format!(
            "{}?path={encoded}",
            self.sandbox_url(sandbox_id, route),
            encoded = urlencoding::encode(path)
        )
    }

    /// Send a request and return `(status, body)` without judging the status.
    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        op: &str,
    ) -> anyhow::Result<(StatusCode, String)> {
        let resp = request
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("E2B {op} request failed: {e}"))?;

        let status = resp.status();
        let body_text = body_or_unreadable(resp.text().await);
        Ok((status, body_text))
    }

    /// Send a request and fail on any non-2xx status.
    async fn send_ok(&self, request: reqwest::RequestBuilder, op: &str) -> anyhow::Result<String> {
        let (status, body_text) = self.send(request, op).await?;
        anyhow::ensure!(
            status.is_success(),
            "E2B API returned {status}: {body_text}"
        );
        Ok(body_text)
    }

    async fn stat(&self, sandbox_id: &str, path: &str) -> anyhow::Result<Option<RawEntry>> {
        let url = self.path_url(sandbox_id, "filesystem/stat", path);
        let (status, body_text) = self.send(self.http.get(&url), "stat").await?;

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        anyhow::ensure!(
            status.is_success(),
            "E2B API returned {status}: {body_text}"
        );

        let entry: RawEntry = serde_json::from_str(&body_text)
            .map_err(|e| anyhow::anyhow!("Failed to parse E2B response: {e}\nBody: {body_text}"))?;
        Ok(Some(entry))
    }
}

#[async_trait]
impl SandboxClient for E2bSandboxClient {
    fn provider(&self) -> Provider {
        Provider::E2b
    }

    async fn create_sandbox(&self, request: &CreateSandboxRequest) -> anyhow::Result<String> {
        let template = request.template.as_deref().unwrap_or(&self.template);
        let timeout_ms = request.timeout_ms.unwrap_or(if self.sandbox_timeout_ms > 0 {
            self.sandbox_timeout_ms
        } else {
            DEFAULT_SANDBOX_TIMEOUT_MS
        });

        let url = format!("{}/v0/sandboxes", self.api_url);
        let body = serde_json::json!({
            "templateID": template,
            "timeout": timeout_ms.div_ceil(1000),
            "metadata": request.metadata,
            "envVars": request.envs,
        });

        let body_text = self
            .send_ok(self.http.post(&url).json(&body), "create sandbox")
            .await?;

        let parsed: serde_json::Value = serde_json::from_str(&body_text)
            .map_err(|e| anyhow::anyhow!("Failed to parse E2B response: {e}\nBody: {body_text}"))?;

        let sandbox_id = parsed["sandboxID"]
            .as_str()
            .or_else(|| parsed["sandbox_id"].as_str())
            .unwrap_or("")
            .to_string();

        anyhow::ensure!(
            !sandbox_id.is_empty(),
            "E2B returned no sandbox_id. Response: {body_text}"
        );

        tracing::info!(sandbox_id = %sandbox_id, template, "e2b sandbox created");
        self.set_id(sandbox_id.clone());
        Ok(sandbox_id)
    }

    async fn run_code(&self, sandbox_id: &str, request: &RunCodeRequest) -> anyhow::Result<String> {
        let url = self.sandbox_url(sandbox_id, "code");
        let mut body = serde_json::json!({
            "code": request.code,
            "envVars": request.envs,
        });
        if let Some(language) = &request.language {
            body["language"] = serde_json::json!(language);
        }
        if let Some(timeout_ms) = request.timeout_ms {
            body["timeout"] = serde_json::json!(timeout_ms.div_ceil(1000));
        }

        self.send_ok(self.http.post(&url).json(&body), "run_code")
            .await
    }

    async fn read_file(&self, sandbox_id: &str, path: &str) -> anyhow::Result<String> {
        let url = self.path_url(sandbox_id, "files", path);
        let (status, body_text) = self.send(self.http.get(&url), "read_file").await?;

        if status == StatusCode::NOT_FOUND {
            anyhow::bail!("File not found: {path}");
        }
        anyhow::ensure!(
            status.is_success(),
            "E2B API returned {status}: {body_text}"
        );

        Ok(body_text)
    }

    async fn write_file(&self, sandbox_id: &str, path: &str, content: &str) -> anyhow::Result<()> {
        let url = self.sandbox_url(sandbox_id, "files");

        let file_name = std::path::Path::new(path)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("file")
            .to_string();

        let form = reqwest::multipart::Form::new()
            .text("path", path.to_string())
            .part(
                "file",
                reqwest::multipart::Part::bytes(content.as_bytes().to_vec())
                    .file_name(file_name)
                    .mime_str("text/plain")
                    .map_err(|e| anyhow::anyhow!("MIME type error: {e}"))?,
            );

        self.send_ok(self.http.post(&url).multipart(form), "write_file")
            .await?;
        Ok(())
    }

    async fn list_files(&self, sandbox_id: &str, path: &str) -> anyhow::Result<Vec<EntryInfo>> {
        let url = self.path_url(sandbox_id, "filesystem/list", path);
        let body_text = self.send_ok(self.http.get(&url), "list_files").await?;

        let entries: Vec<RawEntry> = serde_json::from_str(&body_text)
            .map_err(|e| anyhow::anyhow!("Failed to parse E2B response: {e}\nBody: {body_text}"))?;

        Ok(entries
            .into_iter()
            .map(|entry| {
                let entry_path = if entry.path.is_empty() {
                    format!("{}/{}", path.trim_end_matches('/'), entry.name)
                } else {
                    entry.path
                };
                EntryInfo {
                    is_directory: FileType::from_provider(&entry.entry_type, false)
                        == FileType::Dir,
                    name: entry.name,
                    path: entry_path,
                }
            })
            .collect())
    }

    async fn delete_file(&self, sandbox_id: &str, path: &str) -> anyhow::Result<()> {
        let url = self.path_url(sandbox_id, "filesystem", path);
        self.send_ok(self.http.delete(&url), "delete_file").await?;
        Ok(())
    }

    async fn create_directory(
        &self,
        sandbox_id: &str,
        path: &str,
        _mode: Option<&str>,
    ) -> anyhow::Result<()> {
        let url = self.sandbox_url(sandbox_id, "filesystem/dirs");
        let body = serde_json::json!({ "path": path });
        self.send_ok(self.http.post(&url).json(&body), "create_directory")
            .await?;
        Ok(())
    }

    async fn get_file_info(&self, sandbox_id: &str, path: &str) -> anyhow::Result<FileInfo> {
        let entry = self
            .stat(sandbox_id, path)
            .await?
            .ok_or_else(|| anyhow::anyhow!("File not found: {path}"))?;

        Ok(FileInfo {
            file_type: FileType::from_provider(&entry.entry_type, false),
            path: if entry.path.is_empty() {
                path.to_string()
            } else {
                entry.path
            },
            name: entry.name,
            size: entry.size,
            mode: entry.mode,
            permissions: entry.permissions,
            owner: entry.owner,
            group: entry.group,
            modified_time: entry.modified_time,
            symlink_target: entry.symlink_target,
        })
    }

    async fn check_file_exists(
        &self,
        sandbox_id: &str,
        path: &str,
    ) -> anyhow::Result<Option<FileType>> {
        Ok(self
            .stat(sandbox_id, path)
            .await?
            .map(|entry| FileType::from_provider(&entry.entry_type, false)))
    }

    async fn watch_directory(
        &self,
        sandbox_id: &str,
        path: &str,
        recursive: bool,
        duration: Duration,
    ) -> anyhow::Result<Vec<WatchEvent>> {
        let url = self.sandbox_url(sandbox_id, "filesystem/watchers");
        let body = serde_json::json!({ "path": path, "recursive": recursive });
        let body_text = self
            .send_ok(self.http.post(&url).json(&body), "watch_directory")
            .await?;

        let parsed: serde_json::Value = serde_json::from_str(&body_text)
            .map_err(|e| anyhow::anyhow!("Failed to parse E2B response: {e}\nBody: {body_text}"))?;
        let watcher_id = parsed["watcherID"]
            .as_str()
            .or_else(|| parsed["watcher_id"].as_str())
            .ok_or_else(|| anyhow::anyhow!("E2B returned no watcher_id. Response: {body_text}"))?
            .to_string();

        tokio::time::sleep(duration).await;

        let events_url = self.sandbox_url(
            sandbox_id,
            &format!("filesystem/watchers/{watcher_id}/events"),
        );
        let events_text = self
            .send_ok(self.http.get(&events_url), "watch_directory events")
            .await?;

        let watcher_url = self.sandbox_url(sandbox_id, &format!("filesystem/watchers/{watcher_id}"));
        if let Err(e) = self
            .send_ok(self.http.delete(&watcher_url), "remove watcher")
            .await
        {
            tracing::debug!("Failed to remove E2B watcher {watcher_id}: {e}");
        }

        let raw: Vec<RawWatchEvent> = serde_json::from_str(&events_text)
            .map_err(|e| anyhow::anyhow!("Failed to parse E2B response: {e}\nBody: {events_text}"))?;
        let now = chrono::Utc::now().to_rfc3339();

        Ok(raw
            .into_iter()
            .filter_map(|event| {
                WatchEventKind::from_provider(&event.kind).map(|kind| WatchEvent {
                    kind,
                    name: event.name,
                    timestamp: now.clone(),
                })
            })
            .collect())
    }

    async fn run_command(
        &self,
        sandbox_id: &str,
        command: &CommandSpec<'_>,
    ) -> anyhow::Result<CommandOutput> {
        let url = self.sandbox_url(sandbox_id, "commands");

        let body = serde_json::json!({
            "cmd": command.command,
            "workdir": command.workdir,
            "timeout": command.timeout_ms.div_ceil(1000),
            "envVars": command.envs,
        });

        let body_text = self
            .send_ok(self.http.post(&url).json(&body), "run_command")
            .await?;

        let parsed: serde_json::Value = serde_json::from_str(&body_text)
            .map_err(|e| anyhow::anyhow!("Failed to parse E2B response: {e}\nBody: {body_text}"))?;

        Ok(CommandOutput {
            stdout: parsed["stdout"].as_str().unwrap_or("").to_string(),
            stderr: parsed["stderr"].as_str().unwrap_or("").to_string(),
            exit_code: parsed["exitCode"]
                .as_i64()
                .or_else(|| parsed["exit_code"].as_i64())
                .unwrap_or(0),
        })
    }

    fn current_id(&self) -> Option<String> {
        self.sandbox_id.lock().clone()
    }

    fn set_id(&self, id: String) {
        *self.sandbox_id.lock() = Some(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;
    use wiremock::matchers::{
        body_json, body_partial_json, body_string_contains, header, method, path, query_param,
    };
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> E2bSandboxClient {
        E2bSandboxClient::from_config(&E2bConfig {
            api_key: Some("e2b-test-key".into()),
            api_url: server.uri(),
            ..E2bConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn new_client_has_no_id() {
        let client = E2bSandboxClient::new("").unwrap();
        assert!(client.current_id().is_none());
        assert_eq!(client.provider(), Provider::E2b);
    }

    #[test]
    fn require_id_errors_when_none() {
        let client = E2bSandboxClient::new("").unwrap();
        assert!(client.require_id().is_err());
    }

    #[test]
    fn require_id_returns_id_when_set() {
        let client = E2bSandboxClient::new("").unwrap();
        client.set_id("sb-abc".to_string());
        assert_eq!(client.require_id().unwrap(), "sb-abc");
    }

    #[tokio::test]
    async fn create_sandbox_posts_template_and_stores_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v0/sandboxes"))
            .and(header("authorization", "Bearer e2b-test-key"))
            .and(body_partial_json(json!({
                "templateID": "code-interpreter-v1",
                "timeout": 600
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "sandboxID": "sb-1" })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let id = client
            .create_sandbox(&CreateSandboxRequest::default())
            .await
            .unwrap();
        assert_eq!(id, "sb-1");
        assert_eq!(client.current_id().as_deref(), Some("sb-1"));
    }

    #[tokio::test]
    async fn create_sandbox_forwards_api_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v0/sandboxes"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid key"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .create_sandbox(&CreateSandboxRequest::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("401"));
        assert!(err.to_string().contains("invalid key"));
        assert!(client.current_id().is_none());
    }

    #[tokio::test]
    async fn read_file_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v0/sandboxes/sb-1/files"))
            .and(query_param("path", "/missing.txt"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.read_file("sb-1", "/missing.txt").await.unwrap_err();
        assert!(err.to_string().contains("File not found: /missing.txt"));
    }

    #[tokio::test]
    async fn list_files_maps_entry_types() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v0/sandboxes/sb-1/filesystem/list"))
            .and(query_param("path", "/home/user"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "name": "src", "path": "/home/user/src", "type": "dir" },
                { "name": "main.py", "type": "file" }
            ])))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let entries = client.list_files("sb-1", "/home/user").await.unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].is_directory);
        assert_eq!(entries[1].path, "/home/user/main.py");
        assert!(!entries[1].is_directory);
    }

    #[tokio::test]
    async fn check_file_exists_treats_404_as_absent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v0/sandboxes/sb-1/filesystem/stat"))
            .and(query_param("path", "/nope"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v0/sandboxes/sb-1/filesystem/stat"))
            .and(query_param("path", "/tmp"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "name": "tmp", "path": "/tmp", "type": "dir" })),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert_eq!(client.check_file_exists("sb-1", "/nope").await.unwrap(), None);
        assert_eq!(
            client.check_file_exists("sb-1", "/tmp").await.unwrap(),
            Some(FileType::Dir)
        );
    }

    #[tokio::test]
    async fn run_command_parses_output() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v0/sandboxes/sb-1/commands"))
            .and(body_partial_json(json!({ "cmd": "ls", "workdir": "/home/user" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "stdout": "a\nb\n",
                "stderr": "",
                "exitCode": 2
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let envs = HashMap::new();
        let out = client
            .run_command(
                "sb-1",
                &CommandSpec {
                    command: "ls",
                    workdir: "/home/user",
                    timeout_ms: 30_000,
                    envs: &envs,
                },
            )
            .await
            .unwrap();
        assert_eq!(out.stdout, "a\nb\n");
        assert_eq!(out.exit_code, 2);
    }

    #[tokio::test]
    async fn watch_directory_collects_events() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v0/sandboxes/sb-1/filesystem/watchers"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "watcherID": "w-1" })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v0/sandboxes/sb-1/filesystem/watchers/w-1/events"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "type": "EVENT_TYPE_CREATE", "name": "new.txt" },
                { "type": "EVENT_TYPE_UNKNOWN", "name": "ignored" }
            ])))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/v0/sandboxes/sb-1/filesystem/watchers/w-1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let events = client
            .watch_directory("sb-1", "/home/user", false, Duration::from_millis(10))
            .await
            .unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, WatchEventKind::Create);
        assert_eq!(events[0].name, "new.txt");
    }

    #[tokio::test]
    async fn sub_second_command_timeout_rounds_up() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v0/sandboxes/sb-1/commands"))
            .and(body_partial_json(json!({ "timeout": 1 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "stdout": "",
                "stderr": "",
                "exitCode": 0
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let envs = HashMap::new();
        client
            .run_command(
                "sb-1",
                &CommandSpec {
                    command: "sleep 5",
                    workdir: "/home/user",
                    timeout_ms: 500,
                    envs: &envs,
                },
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn create_sandbox_rounds_lifetime_up_to_a_second() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v0/sandboxes"))
            .and(body_partial_json(json!({ "templateID": "base", "timeout": 2 })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "sandboxID": "sb-2" })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let request = CreateSandboxRequest {
            template: Some("base".into()),
            timeout_ms: Some(1_001),
            ..CreateSandboxRequest::default()
        };
        assert_eq!(client.create_sandbox(&request).await.unwrap(), "sb-2");
    }

    #[tokio::test]
    async fn run_code_posts_snippet_and_returns_transcript() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v0/sandboxes/sb-1/code"))
            .and(body_partial_json(json!({
                "code": "print(1)",
                "language": "python",
                "timeout": 1
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"logs":{"stdout":["1\n"]}}"#),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let request: RunCodeRequest = serde_json::from_value(json!({
            "code": "print(1)",
            "language": "python",
            "timeoutMs": 250
        }))
        .unwrap();
        let transcript = client.run_code("sb-1", &request).await.unwrap();
        assert!(transcript.contains("stdout"));
    }

    #[tokio::test]
    async fn write_file_uploads_multipart_with_path() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v0/sandboxes/sb-1/files"))
            .and(body_string_contains("name=\"path\""))
            .and(body_string_contains("/home/user/main.py"))
            .and(body_string_contains("print('hi')"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client
            .write_file("sb-1", "/home/user/main.py", "print('hi')")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn create_directory_posts_path() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v0/sandboxes/sb-1/filesystem/dirs"))
            .and(body_json(json!({ "path": "/home/user/data" })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client
            .create_directory("sb-1", "/home/user/data", Some("700"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn get_file_info_maps_stat_fields() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v0/sandboxes/sb-1/filesystem/stat"))
            .and(query_param("path", "/home/user/link"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "link",
                "type": "file",
                "size": 42,
                "mode": 420,
                "permissions": "-rw-r--r--",
                "owner": "user",
                "group": "user",
                "modifiedTime": "2026-01-01T00:00:00Z",
                "symlinkTarget": "/home/user/target"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let info = client.get_file_info("sb-1", "/home/user/link").await.unwrap();
        assert_eq!(info.path, "/home/user/link");
        assert_eq!(info.file_type, FileType::File);
        assert_eq!(info.size, 42);
        assert_eq!(info.mode, Some(0o644));
        assert_eq!(info.owner.as_deref(), Some("user"));
        assert_eq!(info.modified_time.as_deref(), Some("2026-01-01T00:00:00Z"));
        assert_eq!(info.symlink_target.as_deref(), Some("/home/user/target"));
    }

    #[tokio::test]
    async fn get_file_info_missing_path_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v0/sandboxes/sb-1/filesystem/stat"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.get_file_info("sb-1", "/gone").await.unwrap_err();
        assert_eq!(err.to_string(), "File not found: /gone");
    }
}
