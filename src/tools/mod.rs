//! Tool surface.
//!
//! [`init`] is the single entry point: it picks the sandbox provider from the
//! configured credentials, builds that provider's client and publishes all
//! thirteen tools bound to it. Callers never choose a backend themselves.

pub mod operation;
pub mod registry;
pub mod sandbox;
pub mod traits;

pub use operation::Operation;
pub use registry::{publish, ToolRegistry, ToolSet};
pub use traits::{Tool, ToolResult, ToolSpec};

use crate::config::Config;
use crate::error::ConfigurationError;
use crate::sandbox::{create_sandbox_client, resolve_provider, Provider};

/// Resolve the provider and publish its tools.
///
/// Fails with [`ConfigurationError::NoProviderConfigured`] when neither API
/// key is set; in that case no tool is published.
pub fn init(config: &Config) -> Result<ToolRegistry, ConfigurationError> {
    let provider = resolve_provider(&config.credentials())?;
    tracing::info!(provider = %provider, "sandbox provider selected");

    let build = |p: Provider| -> Result<ToolSet, ConfigurationError> {
        let client = create_sandbox_client(p, config)?;
        Ok(ToolSet::new(client, &config.tools))
    };

    let registry = publish(
        provider,
        || build(Provider::Daytona),
        || build(Provider::E2b),
    )?;
    tracing::debug!(tools = registry.len(), "sandbox tools published");
    Ok(registry)
}
