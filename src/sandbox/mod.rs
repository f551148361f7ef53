//! Sandbox abstraction layer.
//!
//! Defines the [`SandboxClient`] trait that both sandbox providers implement:
//!
//! - [`daytona::DaytonaSandboxClient`] — Daytona cloud sandboxes (requires `DAYTONA_API_KEY`)
//! - [`e2b::E2bSandboxClient`] — E2B cloud MicroVMs (requires `E2B_API_KEY`)
//!
//! [`provider::resolve_provider`] picks one of them at startup and
//! [`crate::tools::init`] binds every tool to it.

pub mod daytona;
pub mod e2b;
pub mod provider;
pub mod types;

pub use provider::{resolve_provider, Provider};
pub use types::{
    CommandOutput, CommandSpec, CreateSandboxRequest, EntryInfo, FileInfo, FileType, FileUpload,
    RunCodeRequest, WatchEvent,
};

use crate::config::Config;
use crate::error::ConfigurationError;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Provider-agnostic sandbox interface.
///
/// Every operation except [`create_sandbox`](SandboxClient::create_sandbox)
/// addresses a sandbox by ID. The `current_id` / `set_id` helpers remember
/// the sandbox created last, so callers may omit the ID.
///
/// Errors are whatever the provider returned; implementations do not retry.
#[async_trait]
pub trait SandboxClient: Send + Sync {
    /// Which provider this client talks to.
    fn provider(&self) -> Provider;

    /// Create a sandbox and make it the current one. Returns its ID.
    async fn create_sandbox(&self, request: &CreateSandboxRequest) -> anyhow::Result<String>;

    /// Run a code snippet and return the execution transcript.
    async fn run_code(&self, sandbox_id: &str, request: &RunCodeRequest) -> anyhow::Result<String>;

    /// Read a file and return its content as a UTF-8 string.
    async fn read_file(&self, sandbox_id: &str, path: &str) -> anyhow::Result<String>;

    /// Write content to a file, creating parent directories.
    async fn write_file(&self, sandbox_id: &str, path: &str, content: &str)
        -> anyhow::Result<()>;

    /// Write several files. Stops at the first failure.
    async fn write_files(&self, sandbox_id: &str, files: &[FileUpload]) -> anyhow::Result<()> {
        for file in files {
            self.write_file(sandbox_id, &file.path, &file.data).await?;
        }
        Ok(())
    }

    /// List the entries of a directory.
    async fn list_files(&self, sandbox_id: &str, path: &str) -> anyhow::Result<Vec<EntryInfo>>;

    /// Delete a file or directory.
    async fn delete_file(&self, sandbox_id: &str, path: &str) -> anyhow::Result<()>;

    /// Create a directory. `mode` is only honoured by providers that accept it.
    async fn create_directory(
        &self,
        sandbox_id: &str,
        path: &str,
        mode: Option<&str>,
    ) -> anyhow::Result<()>;

    /// Stat a path.
    async fn get_file_info(&self, sandbox_id: &str, path: &str) -> anyhow::Result<FileInfo>;

    /// Return the entry type if `path` exists, `None` if it does not.
    async fn check_file_exists(
        &self,
        sandbox_id: &str,
        path: &str,
    ) -> anyhow::Result<Option<FileType>>;

    /// Collect filesystem events under `path` for `duration`.
    async fn watch_directory(
        &self,
        sandbox_id: &str,
        path: &str,
        recursive: bool,
        duration: Duration,
    ) -> anyhow::Result<Vec<WatchEvent>>;

    /// Run a shell command inside the sandbox.
    async fn run_command(
        &self,
        sandbox_id: &str,
        command: &CommandSpec<'_>,
    ) -> anyhow::Result<CommandOutput>;

    /// Return the current sandbox ID, if any.
    fn current_id(&self) -> Option<String>;

    /// Store a new sandbox ID.
    fn set_id(&self, id: String);

    /// Return the current ID or an error telling the caller to create one.
    fn require_id(&self) -> anyhow::Result<String> {
        self.current_id()
            .ok_or_else(|| anyhow::anyhow!("No active sandbox. Call create_sandbox first."))
    }
}

/// Response body for error messages; `"<unreadable>"` if it could not be read.
pub(crate) fn body_or_unreadable<E>(body: Result<String, E>) -> String {
    body.unwrap_or_else(|_| "<unreadable>".to_string())
}

/// Build the client for `provider` from the configuration.
pub fn create_sandbox_client(
    provider: Provider,
    config: &Config,
) -> Result<Arc<dyn SandboxClient>, ConfigurationError> {
    let client: Arc<dyn SandboxClient> = match provider {
        Provider::Daytona => Arc::new(daytona::DaytonaSandboxClient::from_config(&config.daytona)?),
        Provider::E2b => Arc::new(e2b::E2bSandboxClient::from_config(&config.e2b)?),
    };
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreadable_body_gets_placeholder() {
        assert_eq!(body_or_unreadable::<()>(Ok("boom".into())), "boom");
        assert_eq!(body_or_unreadable(Err(())), "<unreadable>");
    }
}
