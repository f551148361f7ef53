//! Sandbox tools.
//!
//! Thirteen tools that work with either Daytona or E2B. Each one is a thin
//! delegator to a [`SandboxClient`]: it parses its typed arguments, fills in
//! the current sandbox ID when the caller left it out, forwards the call and
//! renders the typed result as JSON. Backend errors are returned untouched.
//!
//! Parameter schemas depend on the client's provider: shared fields are
//! always listed, provider-only fields only for the provider that reads them.

pub mod code;
pub mod command;
pub mod create;
pub mod files;
pub mod info;
pub mod watch;

pub use code::RunCodeTool;
pub use command::RunCommandTool;
pub use create::CreateSandboxTool;
pub use files::{
    CreateDirectoryTool, DeleteFileTool, ListFilesTool, ReadFileTool, WriteFileTool,
    WriteFilesTool,
};
pub use info::{CheckFileExistsTool, GetFileInfoTool, GetFileSizeTool};
pub use watch::WatchDirectoryTool;

use crate::sandbox::SandboxClient;
use crate::tools::traits::ToolResult;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

/// Deserialize tool arguments. A missing argument object counts as `{}`.
pub(crate) fn parse_args<T: DeserializeOwned>(tool: &str, args: Value) -> anyhow::Result<T> {
    let args = if args.is_null() { json!({}) } else { args };
    serde_json::from_value(args).map_err(|e| anyhow::anyhow!("Invalid arguments for {tool}: {e}"))
}

/// The sandbox a call targets: the explicit ID, else the client's current one.
pub(crate) fn target_sandbox(
    client: &dyn SandboxClient,
    explicit: Option<String>,
) -> anyhow::Result<String> {
    match explicit.filter(|id| !id.is_empty()) {
        Some(id) => Ok(id),
        None => client.require_id(),
    }
}

/// Successful result carrying `value` as pretty JSON.
pub(crate) fn json_output<T: Serialize>(value: &T) -> anyhow::Result<ToolResult> {
    Ok(ToolResult {
        success: true,
        output: serde_json::to_string_pretty(value)?,
        error: None,
    })
}

pub(crate) fn sandbox_id_property() -> Value {
    json!({
        "type": "string",
        "description": "ID of the sandbox to use. Defaults to the sandbox created last."
    })
}

pub(crate) fn path_property(description: &str) -> Value {
    json!({ "type": "string", "description": description })
}

pub(crate) fn envs_property() -> Value {
    json!({
        "type": "object",
        "additionalProperties": { "type": "string" },
        "description": "Environment variables to set"
    })
}

/// Add `extra` (an object of property schemas) to `schema.properties`.
pub(crate) fn add_properties(schema: &mut Value, extra: Value) {
    if let (Some(props), Value::Object(extra)) = (schema["properties"].as_object_mut(), extra) {
        props.extend(extra);
    }
}
