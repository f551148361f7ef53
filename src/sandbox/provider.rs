//! Provider resolution: decide once which sandbox backend serves every tool.

use crate::config::Credentials;
use crate::error::ConfigurationError;
use serde::Serialize;
use std::fmt;

/// The sandbox backend active for the lifetime of a [`crate::tools::ToolRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Daytona,
    E2b,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daytona => "daytona",
            Self::E2b => "e2b",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pick the provider from the configured credentials.
///
/// Daytona wins whenever its key is present, even if an E2B key is also set.
/// Only presence is checked; neither backend is contacted.
pub fn resolve_provider(credentials: &Credentials) -> Result<Provider, ConfigurationError> {
    let present = |key: &Option<String>| key.as_deref().is_some_and(|k| !k.is_empty());

    if present(&credentials.daytona_api_key) {
        Ok(Provider::Daytona)
    } else if present(&credentials.e2b_api_key) {
        Ok(Provider::E2b)
    } else {
        Err(ConfigurationError::NoProviderConfigured)
    }
}
