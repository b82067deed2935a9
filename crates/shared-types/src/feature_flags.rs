use serde::{Deserialize, Serialize};

/// Feature flags controlling which optional integrations are active.
///
/// Loaded from `config.toml` at server startup and exposed to clients
/// via a server function. Every field defaults to `false` so that a
/// missing or incomplete config file disables all optional features.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FeatureFlags {
    /// Answer chat messages with the configured LLM instead of the offline
    /// precedent digest.
    #[serde(default)]
    pub llm: bool,
    /// Store uploaded documents in S3 instead of the local upload directory.
    #[serde(default)]
    pub s3: bool,
    /// Allow new accounts to be created from the sign-up page.
    #[serde(default)]
    pub registration: bool,
}

/// Top-level config file structure matching `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub features: FeatureFlags,
}
