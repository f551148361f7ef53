//! `create_sandbox` tool — start a new sandbox and make it the current one.

use super::{add_properties, envs_property, json_output, parse_args};
use crate::sandbox::types::{CreateSandboxRequest, CreateSandboxResult};
use crate::sandbox::{Provider, SandboxClient};
use crate::tools::operation::Operation;
use crate::tools::traits::{Tool, ToolResult};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

pub struct CreateSandboxTool {
    client: Arc<dyn SandboxClient>,
}

impl CreateSandboxTool {
    pub fn new(client: Arc<dyn SandboxClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for CreateSandboxTool {
    fn name(&self) -> &str {
        Operation::CreateSandbox.as_str()
    }

    fn description(&self) -> &str {
        "Create a new sandbox for running code and manipulating files. \
         Returns the sandbox_id; later sandbox tools default to it when no sandbox_id is passed. \
         Call this before any file, code or command operation."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        let mut schema = json!({
            "type": "object",
            "properties": {
                "envs": envs_property()
            },
            "required": []
        });

        match self.client.provider() {
            Provider::Daytona => add_properties(
                &mut schema,
                json!({
                    "name": {
                        "type": "string",
                        "description": "Name for the sandbox"
                    },
                    "labels": {
                        "type": "object",
                        "additionalProperties": { "type": "string" },
                        "description": "Labels attached to the sandbox"
                    },
                    "language": {
                        "type": "string",
                        "enum": ["python", "javascript", "typescript"],
                        "description": "Default language for run_code. Default: python."
                    }
                }),
            ),
            Provider::E2b => add_properties(
                &mut schema,
                json!({
                    "metadata": {
                        "type": "object",
                        "additionalProperties": { "type": "string" },
                        "description": "Metadata attached to the sandbox"
                    },
                    "timeout_ms": {
                        "type": "integer",
                        "description": "Sandbox lifetime in milliseconds. Default: 600000 (10 minutes)."
                    },
                    "template": {
                        "type": "string",
                        "description": "Template to boot the sandbox from. Default: code-interpreter-v1."
                    }
                }),
            ),
        }

        schema
    }

    async fn execute(&self, args: serde_json::Value) -> anyhow::Result<ToolResult> {
        let request: CreateSandboxRequest = parse_args(self.name(), args)?;
        let sandbox_id = self.client.create_sandbox(&request).await?;
        json_output(&CreateSandboxResult { sandbox_id })
    }
}
