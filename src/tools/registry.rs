//! Binding operations to a provider's tools.
//!
//! A [`ToolSet`] holds one tool per [`Operation`], all delegating to the same
//! [`SandboxClient`]. [`publish`] turns exactly one of the two providers' sets
//! into the [`ToolRegistry`] callers use. Selection happens once; the
//! registry is immutable afterwards.

use super::operation::Operation;
use super::sandbox::{
    CheckFileExistsTool, CreateDirectoryTool, CreateSandboxTool, DeleteFileTool,
    GetFileInfoTool, GetFileSizeTool, ListFilesTool, ReadFileTool, RunCodeTool, RunCommandTool,
    WatchDirectoryTool, WriteFileTool, WriteFilesTool,
};
use super::traits::{Tool, ToolResult, ToolSpec};
use crate::config::ToolsConfig;
use crate::error::ConfigurationError;
use crate::sandbox::{Provider, SandboxClient};
use std::fmt;
use std::sync::Arc;

/// Every operation bound to one provider's client.
pub struct ToolSet {
    provider: Provider,
    /// Indexed by `Operation as usize`, in [`Operation::ALL`] order.
    tools: [Arc<dyn Tool>; 13],
}

impl ToolSet {
    pub fn new(client: Arc<dyn SandboxClient>, defaults: &ToolsConfig) -> Self {
        Self {
            provider: client.provider(),
            tools: Operation::ALL.map(|op| bind(op, &client, defaults)),
        }
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }
}

fn bind(op: Operation, client: &Arc<dyn SandboxClient>, defaults: &ToolsConfig) -> Arc<dyn Tool> {
    let client = Arc::clone(client);
    match op {
        Operation::CreateSandbox => Arc::new(CreateSandboxTool::new(client)),
        Operation::RunCode => Arc::new(RunCodeTool::new(client)),
        Operation::ReadFile => Arc::new(ReadFileTool::new(client)),
        Operation::WriteFile => Arc::new(WriteFileTool::new(client)),
        Operation::WriteFiles => Arc::new(WriteFilesTool::new(client)),
        Operation::ListFiles => Arc::new(ListFilesTool::new(client)),
        Operation::DeleteFile => Arc::new(DeleteFileTool::new(client)),
        Operation::CreateDirectory => Arc::new(CreateDirectoryTool::new(client)),
        Operation::GetFileInfo => Arc::new(GetFileInfoTool::new(client)),
        Operation::CheckFileExists => Arc::new(CheckFileExistsTool::new(client)),
        Operation::GetFileSize => Arc::new(GetFileSizeTool::new(client)),
        Operation::WatchDirectory => {
            Arc::new(WatchDirectoryTool::new(client, defaults.watch_duration_ms))
        }
        Operation::RunCommand => Arc::new(RunCommandTool::new(
            client,
            defaults.default_workdir.clone(),
            defaults.command_timeout_ms,
        )),
    }
}

/// The published tools. Every operation resolves to the same provider.
pub struct ToolRegistry {
    set: ToolSet,
}

impl ToolRegistry {
    pub fn provider(&self) -> Provider {
        self.set.provider
    }

    pub fn get(&self, op: Operation) -> &Arc<dyn Tool> {
        &self.set.tools[op as usize]
    }

    /// Look a tool up by any accepted spelling of its name.
    pub fn by_name(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        name.parse::<Operation>().ok().map(|op| self.get(op))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Operation, &Arc<dyn Tool>)> {
        Operation::ALL.into_iter().zip(self.set.tools.iter())
    }

    pub fn len(&self) -> usize {
        self.set.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.tools.is_empty()
    }

    pub fn specs(&self) -> Vec<ToolSpec> {
        self.set.tools.iter().map(|t| t.spec()).collect()
    }

    /// Forward a call to the tool named `name`.
    pub async fn execute(&self, name: &str, args: serde_json::Value) -> anyhow::Result<ToolResult> {
        let op: Operation = name.parse()?;
        tracing::debug!(tool = op.as_str(), provider = %self.provider(), "forwarding tool call");
        self.get(op).execute(args).await
    }
}

impl fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("provider", &self.provider())
            .field(
                "tools",
                &self.set.tools.iter().map(|t| t.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Publish the tool set of `provider`.
///
/// Only the selected factory runs; the other provider's tools are never
/// built. The whole set is taken as-is, so a registry never mixes providers.
pub fn publish<D, E>(provider: Provider, daytona: D, e2b: E) -> Result<ToolRegistry, ConfigurationError>
where
    D: FnOnce() -> Result<ToolSet, ConfigurationError>,
    E: FnOnce() -> Result<ToolSet, ConfigurationError>,
{
    let set = match provider {
        Provider::Daytona => daytona()?,
        Provider::E2b => e2b()?,
    };

    if set.provider != provider {
        return Err(ConfigurationError::ProviderMismatch {
            expected: provider,
            found: set.provider,
        });
    }

    Ok(ToolRegistry { set })
}
