//! Sandbox metadata tools: get_file_info, check_file_exists, get_file_size.

use super::{json_output, parse_args, path_property, sandbox_id_property, target_sandbox};
use crate::sandbox::types::{
    format_size, FileExistsResult, FileSizeResult, GetFileSizeRequest, PathRequest,
};
use crate::sandbox::SandboxClient;
use crate::tools::operation::Operation;
use crate::tools::traits::{Tool, ToolResult};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

fn path_only_schema(description: &str) -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "sandbox_id": sandbox_id_property(),
            "path": path_property(description)
        },
        "required": ["path"]
    })
}

// ── get_file_info ─────────────────────────────────────────────────────────────

pub struct GetFileInfoTool {
    client: Arc<dyn SandboxClient>,
}

impl GetFileInfoTool {
    pub fn new(client: Arc<dyn SandboxClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for GetFileInfoTool {
    fn name(&self) -> &str {
        Operation::GetFileInfo.as_str()
    }

    fn description(&self) -> &str {
        "Get metadata for a file or directory in the sandbox: type, size, permissions, \
         owner and modification time where the provider reports them. \
         Requires an active sandbox."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        path_only_schema("Absolute path of the file or directory")
    }

    async fn execute(&self, args: serde_json::Value) -> anyhow::Result<ToolResult> {
        let request: PathRequest = parse_args(self.name(), args)?;
        let sandbox_id = target_sandbox(self.client.as_ref(), request.sandbox_id)?;
        let info = self.client.get_file_info(&sandbox_id, &request.path).await?;
        json_output(&info)
    }
}

// ── check_file_exists ─────────────────────────────────────────────────────────

pub struct CheckFileExistsTool {
    client: Arc<dyn SandboxClient>,
}

impl CheckFileExistsTool {
    pub fn new(client: Arc<dyn SandboxClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for CheckFileExistsTool {
    fn name(&self) -> &str {
        Operation::CheckFileExists.as_str()
    }

    fn description(&self) -> &str {
        "Check whether a file or directory exists in the sandbox. \
         Returns exists=false rather than an error for missing paths. \
         Requires an active sandbox."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        path_only_schema("Absolute path to check")
    }

    async fn execute(&self, args: serde_json::Value) -> anyhow::Result<ToolResult> {
        let request: PathRequest = parse_args(self.name(), args)?;
        let sandbox_id = target_sandbox(self.client.as_ref(), request.sandbox_id)?;
        let file_type = self
            .client
            .check_file_exists(&sandbox_id, &request.path)
            .await?;
        json_output(&FileExistsResult {
            exists: file_type.is_some(),
            path: request.path,
            file_type,
        })
    }
}

// ── get_file_size ─────────────────────────────────────────────────────────────

pub struct GetFileSizeTool {
    client: Arc<dyn SandboxClient>,
}

impl GetFileSizeTool {
    pub fn new(client: Arc<dyn SandboxClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for GetFileSizeTool {
    fn name(&self) -> &str {
        Operation::GetFileSize.as_str()
    }

    fn description(&self) -> &str {
        "Get the size of a file or directory in the sandbox in bytes, \
         optionally with a human-readable form (e.g. 1.50 KB). \
         Requires an active sandbox."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "sandbox_id": sandbox_id_property(),
                "path": path_property("Absolute path of the file or directory"),
                "human_readable": {
                    "type": "boolean",
                    "description": "Also return the size formatted with units. Default: false."
                }
            },
            "required": ["path"]
        })
    }

    async fn execute(&self, args: serde_json::Value) -> anyhow::Result<ToolResult> {
        let request: GetFileSizeRequest = parse_args(self.name(), args)?;
        let sandbox_id = target_sandbox(self.client.as_ref(), request.sandbox_id)?;
        let info = self.client.get_file_info(&sandbox_id, &request.path).await?;
        json_output(&FileSizeResult {
            path: request.path,
            size: info.size,
            file_type: info.file_type,
            human_readable_size: request.human_readable.then(|| format_size(info.size)),
        })
    }
}
