//! `watch_directory` tool — collect filesystem events for a while.

use super::{json_output, parse_args, path_property, sandbox_id_property, target_sandbox};
use crate::sandbox::types::{WatchDirectoryRequest, WatchDirectoryResult};
use crate::sandbox::SandboxClient;
use crate::tools::operation::Operation;
use crate::tools::traits::{Tool, ToolResult};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

pub struct WatchDirectoryTool {
    client: Arc<dyn SandboxClient>,
    default_duration_ms: u64,
}

impl WatchDirectoryTool {
    pub fn new(client: Arc<dyn SandboxClient>, default_duration_ms: u64) -> Self {
        Self {
            client,
            default_duration_ms,
        }
    }
}

#[async_trait]
impl Tool for WatchDirectoryTool {
    fn name(&self) -> &str {
        Operation::WatchDirectory.as_str()
    }

    fn description(&self) -> &str {
        "Watch a directory in the sandbox for a limited time and return the \
         create/write/remove events observed. Blocks for the whole watch duration. \
         Requires an active sandbox."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "sandbox_id": sandbox_id_property(),
                "path": path_property("Directory to watch"),
                "recursive": {
                    "type": "boolean",
                    "description": "Also watch subdirectories. Default: false."
                },
                "watch_duration_ms": {
                    "type": "integer",
                    "description": format!(
                        "How long to watch, in milliseconds. Default: {}.",
                        self.default_duration_ms
                    )
                }
            },
            "required": ["path"]
        })
    }

    async fn execute(&self, args: serde_json::Value) -> anyhow::Result<ToolResult> {
        let request: WatchDirectoryRequest = parse_args(self.name(), args)?;
        let sandbox_id = target_sandbox(self.client.as_ref(), request.sandbox_id)?;
        let duration = Duration::from_millis(
            request
                .watch_duration_ms
                .unwrap_or(self.default_duration_ms),
        );

        let events = self
            .client
            .watch_directory(&sandbox_id, &request.path, request.recursive, duration)
            .await?;

        json_output(&WatchDirectoryResult {
            watch_started: true,
            path: request.path,
            events,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sandbox::Provider;
    use crate::tools::sandbox::test_support::MockClient;

    #[tokio::test]
    async fn uses_default_duration() {
        let client = Arc::new(MockClient::new(Provider::Daytona));
        client.set_id("sb-1".into());
        let tool = WatchDirectoryTool::new(client.clone(), 1234);

        let result = tool
            .execute(json!({ "path": "/home/user", "recursive": true }))
            .await
            .unwrap();
        let out: serde_json::Value = serde_json::from_str(&result.output).unwrap();
        assert_eq!(out["watch_started"], true);
        assert_eq!(out["events"][0]["type"], "create");
        assert_eq!(client.calls(), vec!["watch_directory sb-1 /home/user true 1234"]);
    }

    #[tokio::test]
    async fn explicit_duration_wins() {
        let client = Arc::new(MockClient::new(Provider::E2b));
        client.set_id("sb-1".into());
        let tool = WatchDirectoryTool::new(client.clone(), 5000);

        tool.execute(json!({ "path": "/tmp", "watchDuration": 10 }))
            .await
            .unwrap();
        assert_eq!(client.calls(), vec!["watch_directory sb-1 /tmp false 10"]);
    }
}
