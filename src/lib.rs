//! Remote sandbox tools for LLM agents.
//!
//! One set of thirteen tools (create a sandbox, run code, manage files,
//! watch directories, run commands) backed by whichever sandbox provider is
//! configured. Daytona wins when both API keys are present; E2B is used
//! otherwise. See [`tools::init`].

pub mod config;
pub mod error;
pub mod sandbox;
pub mod tools;

pub use config::{Config, Credentials};
pub use error::ConfigurationError;
pub use sandbox::{resolve_provider, Provider, SandboxClient};
pub use tools::{init, Operation, Tool, ToolRegistry, ToolResult, ToolSpec};
