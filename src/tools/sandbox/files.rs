//! Sandbox file tools: read_file, write_file, write_files, list_files,
//! delete_file, create_directory.

use super::{
    add_properties, json_output, parse_args, path_property, sandbox_id_property, target_sandbox,
};
use crate::sandbox::types::{
    CreateDirectoryRequest, ListFilesRequest, ListFilesResult, PathOutcome, PathRequest,
    ReadFileResult, WriteFileRequest, WriteFilesRequest, WriteFilesResult,
};
use crate::sandbox::{Provider, SandboxClient};
use crate::tools::operation::Operation;
use crate::tools::traits::{Tool, ToolResult};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

// ── read_file ─────────────────────────────────────────────────────────────────

pub struct ReadFileTool {
    client: Arc<dyn SandboxClient>,
}

impl ReadFileTool {
    pub fn new(client: Arc<dyn SandboxClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for ReadFileTool {
    fn name(&self) -> &str {
        Operation::ReadFile.as_str()
    }

    fn description(&self) -> &str {
        "Read the content of a file from the sandbox. \
         Returns the path and the file content as a string. \
         Requires an active sandbox."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "sandbox_id": sandbox_id_property(),
                "path": path_property("Absolute file path to read from the sandbox")
            },
            "required": ["path"]
        })
    }

    async fn execute(&self, args: serde_json::Value) -> anyhow::Result<ToolResult> {
        let request: PathRequest = parse_args(self.name(), args)?;
        let sandbox_id = target_sandbox(self.client.as_ref(), request.sandbox_id)?;
        let content = self.client.read_file(&sandbox_id, &request.path).await?;
        json_output(&ReadFileResult {
            path: request.path,
            content,
        })
    }
}

// ── write_file ────────────────────────────────────────────────────────────────

pub struct WriteFileTool {
    client: Arc<dyn SandboxClient>,
}

impl WriteFileTool {
    pub fn new(client: Arc<dyn SandboxClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for WriteFileTool {
    fn name(&self) -> &str {
        Operation::WriteFile.as_str()
    }

    fn description(&self) -> &str {
        "Write content to a file in the sandbox. Creates the file and any parent directories, \
         replacing existing content. Requires an active sandbox."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "sandbox_id": sandbox_id_property(),
                "path": path_property("Absolute file path in the sandbox (e.g. /home/user/main.py)"),
                "content": {
                    "type": "string",
                    "description": "Full file content to write"
                }
            },
            "required": ["path", "content"]
        })
    }

    async fn execute(&self, args: serde_json::Value) -> anyhow::Result<ToolResult> {
        let request: WriteFileRequest = parse_args(self.name(), args)?;
        let sandbox_id = target_sandbox(self.client.as_ref(), request.sandbox_id)?;
        self.client
            .write_file(&sandbox_id, &request.path, &request.content)
            .await?;
        json_output(&PathOutcome {
            success: true,
            path: request.path,
        })
    }
}

// ── write_files ───────────────────────────────────────────────────────────────

pub struct WriteFilesTool {
    client: Arc<dyn SandboxClient>,
}

impl WriteFilesTool {
    pub fn new(client: Arc<dyn SandboxClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for WriteFilesTool {
    fn name(&self) -> &str {
        Operation::WriteFiles.as_str()
    }

    fn description(&self) -> &str {
        "Write several files to the sandbox in one call. \
         Each entry has a path and its full content (data). \
         Requires an active sandbox."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "sandbox_id": sandbox_id_property(),
                "files": {
                    "type": "array",
                    "description": "Files to write",
                    "items": {
                        "type": "object",
                        "properties": {
                            "path": { "type": "string", "description": "Absolute file path" },
                            "data": { "type": "string", "description": "Full file content" }
                        },
                        "required": ["path", "data"]
                    }
                }
            },
            "required": ["files"]
        })
    }

    async fn execute(&self, args: serde_json::Value) -> anyhow::Result<ToolResult> {
        let request: WriteFilesRequest = parse_args(self.name(), args)?;
        let sandbox_id = target_sandbox(self.client.as_ref(), request.sandbox_id)?;
        self.client.write_files(&sandbox_id, &request.files).await?;
        json_output(&WriteFilesResult {
            success: true,
            files_written: request.files.into_iter().map(|f| f.path).collect(),
        })
    }
}

// ── list_files ────────────────────────────────────────────────────────────────

pub struct ListFilesTool {
    client: Arc<dyn SandboxClient>,
}

impl ListFilesTool {
    pub fn new(client: Arc<dyn SandboxClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for ListFilesTool {
    fn name(&self) -> &str {
        Operation::ListFiles.as_str()
    }

    fn description(&self) -> &str {
        "List files and directories at a path in the sandbox. \
         Returns each entry's name, path and whether it is a directory. \
         Requires an active sandbox."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "sandbox_id": sandbox_id_property(),
                "path": path_property("Directory path to list. Default: /")
            },
            "required": []
        })
    }

    async fn execute(&self, args: serde_json::Value) -> anyhow::Result<ToolResult> {
        let request: ListFilesRequest = parse_args(self.name(), args)?;
        let sandbox_id = target_sandbox(self.client.as_ref(), request.sandbox_id)?;
        let files = self.client.list_files(&sandbox_id, &request.path).await?;
        json_output(&ListFilesResult {
            path: request.path,
            files,
        })
    }
}

// ── delete_file ───────────────────────────────────────────────────────────────

pub struct DeleteFileTool {
    client: Arc<dyn SandboxClient>,
}

impl DeleteFileTool {
    pub fn new(client: Arc<dyn SandboxClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for DeleteFileTool {
    fn name(&self) -> &str {
        Operation::DeleteFile.as_str()
    }

    fn description(&self) -> &str {
        "Delete a file or directory from the sandbox. Requires an active sandbox."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "sandbox_id": sandbox_id_property(),
                "path": path_property("Absolute path of the file or directory to delete")
            },
            "required": ["path"]
        })
    }

    async fn execute(&self, args: serde_json::Value) -> anyhow::Result<ToolResult> {
        let request: PathRequest = parse_args(self.name(), args)?;
        let sandbox_id = target_sandbox(self.client.as_ref(), request.sandbox_id)?;
        self.client.delete_file(&sandbox_id, &request.path).await?;
        json_output(&PathOutcome {
            success: true,
            path: request.path,
        })
    }
}

// ── create_directory ──────────────────────────────────────────────────────────

pub struct CreateDirectoryTool {
    client: Arc<dyn SandboxClient>,
}

impl CreateDirectoryTool {
    pub fn new(client: Arc<dyn SandboxClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for CreateDirectoryTool {
    fn name(&self) -> &str {
        Operation::CreateDirectory.as_str()
    }

    fn description(&self) -> &str {
        "Create a directory in the sandbox, including missing parents. Requires an active sandbox."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        let mut schema = json!({
            "type": "object",
            "properties": {
                "sandbox_id": sandbox_id_property(),
                "path": path_property("Absolute path of the directory to create")
            },
            "required": ["path"]
        });

        if self.client.provider() == Provider::Daytona {
            add_properties(
                &mut schema,
                json!({
                    "mode": {
                        "type": "string",
                        "description": "Octal permission bits for the directory. Default: 755."
                    }
                }),
            );
        }

        schema
    }

    async fn execute(&self, args: serde_json::Value) -> anyhow::Result<ToolResult> {
        let request: CreateDirectoryRequest = parse_args(self.name(), args)?;
        let sandbox_id = target_sandbox(self.client.as_ref(), request.sandbox_id)?;
        self.client
            .create_directory(&sandbox_id, &request.path, request.mode.as_deref())
            .await?;
        json_output(&PathOutcome {
            success: true,
            path: request.path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::sandbox::test_support::MockClient;

    fn mock(provider: Provider) -> Arc<MockClient> {
        let client = Arc::new(MockClient::new(provider));
        client.set_id("sb-1".into());
        client
    }

    fn output(result: &ToolResult) -> serde_json::Value {
        serde_json::from_str(&result.output).unwrap()
    }

    #[test]
    fn tool_names() {
        let client = mock(Provider::E2b);
        assert_eq!(ReadFileTool::new(client.clone()).name(), "read_file");
        assert_eq!(WriteFileTool::new(client.clone()).name(), "write_file");
        assert_eq!(WriteFilesTool::new(client.clone()).name(), "write_files");
        assert_eq!(ListFilesTool::new(client.clone()).name(), "list_files");
        assert_eq!(DeleteFileTool::new(client.clone()).name(), "delete_file");
        assert_eq!(CreateDirectoryTool::new(client).name(), "create_directory");
    }

    #[tokio::test]
    async fn write_then_read_uses_current_sandbox() {
        let client = mock(Provider::E2b);
        let write = WriteFileTool::new(client.clone());
        let read = ReadFileTool::new(client.clone());

        let result = write
            .execute(json!({ "path": "/home/user/a.txt", "content": "hello" }))
            .await
            .unwrap();
        assert_eq!(output(&result)["success"], true);

        let result = read
            .execute(json!({ "path": "/home/user/a.txt" }))
            .await
            .unwrap();
        assert_eq!(output(&result)["content"], "hello");
        assert_eq!(
            client.calls(),
            vec![
                "write_file sb-1 /home/user/a.txt",
                "read_file sb-1 /home/user/a.txt"
            ]
        );
    }

    #[tokio::test]
    async fn read_missing_file_error_passes_through() {
        let client = mock(Provider::Daytona);
        let err = ReadFileTool::new(client)
            .execute(json!({ "path": "/nope" }))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "File not found: /nope");
    }

    #[tokio::test]
    async fn write_files_reports_paths() {
        let client = mock(Provider::Daytona);
        let result = WriteFilesTool::new(client.clone())
            .execute(json!({
                "files": [
                    { "path": "/a.txt", "data": "a" },
                    { "path": "/b.txt", "data": "b" }
                ]
            }))
            .await
            .unwrap();

        assert_eq!(output(&result)["files_written"], json!(["/a.txt", "/b.txt"]));
        assert_eq!(client.files.lock().len(), 2);
    }

    #[tokio::test]
    async fn list_files_defaults_to_root() {
        let client = mock(Provider::E2b);
        client.files.lock().insert("/x.txt".into(), "x".into());
        let result = ListFilesTool::new(client.clone())
            .execute(json!({}))
            .await
            .unwrap();

        let out = output(&result);
        assert_eq!(out["path"], "/");
        assert_eq!(out["files"][0]["name"], "x.txt");
        assert_eq!(out["files"][0]["is_directory"], false);
    }

    #[tokio::test]
    async fn delete_file_removes_entry() {
        let client = mock(Provider::E2b);
        client.files.lock().insert("/gone.txt".into(), "x".into());
        DeleteFileTool::new(client.clone())
            .execute(json!({ "path": "/gone.txt" }))
            .await
            .unwrap();
        assert!(client.files.lock().is_empty());
    }

    #[tokio::test]
    async fn create_directory_passes_mode() {
        let client = mock(Provider::Daytona);
        let tool = CreateDirectoryTool::new(client.clone());
        assert!(tool.parameters_schema()["properties"].get("mode").is_some());

        tool.execute(json!({ "path": "/data", "mode": "700" }))
            .await
            .unwrap();
        assert_eq!(client.calls(), vec!["create_directory sb-1 /data Some(\"700\")"]);
    }

    #[tokio::test]
    async fn e2b_create_directory_hides_mode() {
        let tool = CreateDirectoryTool::new(mock(Provider::E2b));
        assert!(tool.parameters_schema()["properties"].get("mode").is_none());
    }

    #[tokio::test]
    async fn no_sandbox_is_an_error() {
        let client = Arc::new(MockClient::new(Provider::E2b));
        let err = ReadFileTool::new(client.clone())
            .execute(json!({ "path": "/a" }))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("No active sandbox"));
        assert!(client.calls().is_empty());
    }
}
