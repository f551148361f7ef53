//! `run_command` tool — execute a shell command in the sandbox.

use super::{envs_property, parse_args, sandbox_id_property, target_sandbox};
use crate::sandbox::types::{CommandResult, CommandSpec, RunCommandRequest};
use crate::sandbox::SandboxClient;
use crate::tools::operation::Operation;
use crate::tools::traits::{Tool, ToolResult};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;

pub struct RunCommandTool {
    client: Arc<dyn SandboxClient>,
    default_workdir: String,
    default_timeout_ms: u64,
}

impl RunCommandTool {
    pub fn new(
        client: Arc<dyn SandboxClient>,
        default_workdir: impl Into<String>,
        default_timeout_ms: u64,
    ) -> Self {
        Self {
            client,
            default_workdir: default_workdir.into(),
            default_timeout_ms,
        }
    }
}

#[async_trait]
impl Tool for RunCommandTool {
    fn name(&self) -> &str {
        Operation::RunCommand.as_str()
    }

    fn description(&self) -> &str {
        "Run a shell command inside the sandbox. \
         Returns stdout, stderr, exit_code and the execution time. \
         Use this for package installs, builds, test runs and similar. \
         Requires an active sandbox."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "sandbox_id": sandbox_id_property(),
                "command": {
                    "type": "string",
                    "description": "Shell command to execute (e.g. 'pip install requests', 'ls -la')"
                },
                "working_directory": {
                    "type": "string",
                    "description": format!("Working directory for the command. Default: {}.", self.default_workdir)
                },
                "timeout_ms": {
                    "type": "integer",
                    "description": format!("Timeout in milliseconds. Default: {}.", self.default_timeout_ms)
                },
                "envs": envs_property()
            },
            "required": ["command"]
        })
    }

    async fn execute(&self, args: serde_json::Value) -> anyhow::Result<ToolResult> {
        let request: RunCommandRequest = parse_args(self.name(), args)?;
        let sandbox_id = target_sandbox(self.client.as_ref(), request.sandbox_id.clone())?;

        if request.command.trim().is_empty() {
            return Ok(ToolResult {
                success: false,
                output: String::new(),
                error: Some("command cannot be empty".to_string()),
            });
        }

        let spec = CommandSpec {
            command: &request.command,
            workdir: request
                .working_directory
                .as_deref()
                .unwrap_or(&self.default_workdir),
            timeout_ms: request.timeout_ms.unwrap_or(self.default_timeout_ms),
            envs: &request.envs,
        };

        let started = Instant::now();
        let output = self.client.run_command(&sandbox_id, &spec).await?;
        let execution_time_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        let exit_code = output.exit_code;
        let result = CommandResult {
            success: exit_code == 0,
            exit_code,
            stdout: output.stdout,
            stderr: output.stderr,
            command: request.command.clone(),
            execution_time_ms,
        };

        Ok(ToolResult {
            success: result.success,
            output: serde_json::to_string_pretty(&result)?,
            error: (!result.success).then(|| format!("Command exited with code {exit_code}")),
        })
    }
}
