//! `run_code` tool — execute a code snippet inside the sandbox.

use super::{
    add_properties, envs_property, json_output, parse_args, sandbox_id_property, target_sandbox,
};
use crate::sandbox::types::{RunCodeRequest, RunCodeResult};
use crate::sandbox::{Provider, SandboxClient};
use crate::tools::operation::Operation;
use crate::tools::traits::{Tool, ToolResult};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

pub struct RunCodeTool {
    client: Arc<dyn SandboxClient>,
}

impl RunCodeTool {
    pub fn new(client: Arc<dyn SandboxClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for RunCodeTool {
    fn name(&self) -> &str {
        Operation::RunCode.as_str()
    }

    fn description(&self) -> &str {
        "Run a code snippet inside the sandbox and return the execution transcript \
         (stdout, stderr, results and errors as reported by the sandbox provider). \
         Requires an active sandbox."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        let mut schema = json!({
            "type": "object",
            "properties": {
                "sandbox_id": sandbox_id_property(),
                "code": {
                    "type": "string",
                    "description": "The code to run"
                },
                "language": {
                    "type": "string",
                    "description": "Language of the snippet (e.g. python, javascript, typescript). Default: python."
                },
                "envs": envs_property(),
                "timeout_ms": {
                    "type": "integer",
                    "description": "Execution timeout in milliseconds"
                }
            },
            "required": ["code"]
        });

        if self.client.provider() == Provider::Daytona {
            add_properties(
                &mut schema,
                json!({
                    "argv": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Command-line arguments passed to the program"
                    }
                }),
            );
        }

        schema
    }

    async fn execute(&self, args: serde_json::Value) -> anyhow::Result<ToolResult> {
        let request: RunCodeRequest = parse_args(self.name(), args)?;
        let sandbox_id = target_sandbox(self.client.as_ref(), request.sandbox_id.clone())?;
        let execution = self.client.run_code(&sandbox_id, &request).await?;
        json_output(&RunCodeResult { execution })
    }
}
