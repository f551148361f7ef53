//! Startup errors.
//!
//! Everything that can go wrong before a [`crate::tools::ToolRegistry`] exists
//! is a [`ConfigurationError`]. Errors raised by a sandbox backend while a tool
//! runs are plain [`anyhow::Error`]s and never pass through this type.

use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum ConfigurationError {
    #[error(
        "No sandbox provider configured. Please set either DAYTONA_API_KEY or E2B_API_KEY environment variable."
    )]
    NoProviderConfigured,

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("could not determine home directory")]
    NoHomeDir,

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("tool set for {found} published as {expected}")]
    ProviderMismatch {
        expected: crate::sandbox::Provider,
        found: crate::sandbox::Provider,
    },
}
