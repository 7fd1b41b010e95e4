// crates/bounty-judge-config/src/config.rs
// ============================================================================
// Module: Simulation Configuration
// Description: TOML configuration model for the simulation harness.
// Purpose: Load, validate, and default provider and harness settings.
// Dependencies: bounty-judge-core, serde, toml, url
// ============================================================================

//! ## Overview
//! Configuration resolves in order: explicit path, the `BOUNTY_JUDGE_CONFIG`
//! environment variable, then `bounty-judge.toml` in the working directory.
//! An explicitly named file must exist; only the default name may be absent,
//! in which case built-in defaults apply. Unknown keys are rejected at parse
//! time and every loaded value is validated before use. The provider
//! credential never lives in the file: it resolves separately from the
//! `OPENAI_API_KEY` environment variable.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use bounty_judge_core::ApiCredential;
use bounty_judge_core::DEFAULT_COMPLETION_ENDPOINT;
use bounty_judge_core::DEFAULT_MODEL;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default config file name resolved from the working directory.
const DEFAULT_CONFIG_NAME: &str = "bounty-judge.toml";

/// Environment variable overriding the config file path.
pub const CONFIG_ENV_VAR: &str = "BOUNTY_JUDGE_CONFIG";

/// Environment variable carrying the provider credential.
pub const CREDENTIAL_ENV_VAR: &str = "OPENAI_API_KEY";

/// Default relative path of the adjudication unit source artifact.
pub const DEFAULT_UNIT_SOURCE_PATH: &str = "crates/bounty-judge-core/src/runtime/engine.rs";

/// Maximum allowed config file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;

/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;

/// Maximum total path length accepted from flags or the environment.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;

/// Default provider request timeout in milliseconds.
pub(crate) const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 60_000;

/// Minimum allowed provider request timeout in milliseconds.
pub(crate) const MIN_REQUEST_TIMEOUT_MS: u64 = 100;

/// Maximum allowed provider request timeout in milliseconds.
pub(crate) const MAX_REQUEST_TIMEOUT_MS: u64 = 600_000;

/// Default maximum provider response size in bytes.
pub(crate) const DEFAULT_MAX_RESPONSE_BYTES: usize = 1024 * 1024;

/// Maximum allowed provider response size in bytes.
pub(crate) const MAX_RESPONSE_BYTES_LIMIT: usize = 8 * 1024 * 1024;

/// Maximum allowed model identifier length.
pub(crate) const MAX_MODEL_NAME_LENGTH: usize = 128;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Simulation harness configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationConfig {
    /// Completion provider configuration.
    #[serde(default)]
    pub provider: ProviderSettings,
    /// Harness configuration.
    #[serde(default)]
    pub simulation: SimulationSettings,
}

/// Completion provider settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderSettings {
    /// Chat-completion endpoint URL.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Model identifier sent with every request.
    #[serde(default = "default_model")]
    pub model: String,
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Maximum response size allowed, in bytes.
    #[serde(default = "default_max_response_bytes")]
    pub max_response_bytes: usize,
    /// Allow cleartext HTTP endpoints (disabled by default).
    #[serde(default)]
    pub allow_http: bool,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            timeout_ms: default_timeout_ms(),
            max_response_bytes: default_max_response_bytes(),
            allow_http: false,
        }
    }
}

/// Harness settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationSettings {
    /// Path of the adjudication unit source artifact, relative to the
    /// repository root.
    #[serde(default = "default_source_path")]
    pub source_path: PathBuf,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            source_path: default_source_path(),
        }
    }
}

// ============================================================================
// SECTION: Field Defaults
// ============================================================================

/// Default provider endpoint.
fn default_endpoint() -> String {
    DEFAULT_COMPLETION_ENDPOINT.to_string()
}

/// Default model identifier.
fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

/// Default request timeout.
const fn default_timeout_ms() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_MS
}

/// Default response size limit.
const fn default_max_response_bytes() -> usize {
    DEFAULT_MAX_RESPONSE_BYTES
}

/// Default unit source artifact path.
fn default_source_path() -> PathBuf {
    PathBuf::from(DEFAULT_UNIT_SOURCE_PATH)
}

// ============================================================================
// SECTION: Loading
// ============================================================================

impl SimulationConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with(path, |name| env::var(name).ok())
    }

    /// Loads configuration with an injected environment lookup.
    ///
    /// An explicitly requested file (flag or environment variable) must
    /// exist. When only the default name resolves and no such file exists,
    /// built-in defaults apply.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load_with<F>(path: Option<&Path>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let resolved = resolve_path(path, &lookup)?;
        validate_path(&resolved.path)?;
        if !resolved.explicit && !resolved.path.exists() {
            let config = Self::default();
            config.validate()?;
            return Ok(config);
        }
        let bytes = fs::read(&resolved.path).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.provider.validate()?;
        self.simulation.validate()?;
        Ok(())
    }
}

impl ProviderSettings {
    /// Validates endpoint, model, and limit settings.
    fn validate(&self) -> Result<(), ConfigError> {
        let endpoint = self.endpoint.trim();
        if endpoint.is_empty() {
            return Err(ConfigError::Invalid("provider.endpoint must be non-empty".to_string()));
        }
        let url = Url::parse(endpoint)
            .map_err(|_| ConfigError::Invalid("provider.endpoint must be a valid url".to_string()))?;
        match url.scheme() {
            "https" => {}
            "http" if self.allow_http => {}
            _ => {
                return Err(ConfigError::Invalid(
                    "provider.endpoint scheme must be https".to_string(),
                ));
            }
        }
        if url.host_str().is_none() {
            return Err(ConfigError::Invalid("provider.endpoint host required".to_string()));
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::Invalid("provider.model must be non-empty".to_string()));
        }
        if self.model.len() > MAX_MODEL_NAME_LENGTH {
            return Err(ConfigError::Invalid("provider.model exceeds max length".to_string()));
        }
        if !(MIN_REQUEST_TIMEOUT_MS..=MAX_REQUEST_TIMEOUT_MS).contains(&self.timeout_ms) {
            return Err(ConfigError::Invalid("provider.timeout_ms out of range".to_string()));
        }
        if self.max_response_bytes == 0 || self.max_response_bytes > MAX_RESPONSE_BYTES_LIMIT {
            return Err(ConfigError::Invalid(
                "provider.max_response_bytes out of range".to_string(),
            ));
        }
        Ok(())
    }
}

impl SimulationSettings {
    /// Validates the unit source artifact path.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_path_string("simulation.source_path", &self.source_path.to_string_lossy())
    }
}

// ============================================================================
// SECTION: Credential Resolution
// ============================================================================

/// Resolves the provider credential from the environment.
///
/// # Errors
///
/// Returns [`ConfigError::MissingCredential`] when the variable is unset or
/// blank.
pub fn resolve_credential() -> Result<ApiCredential, ConfigError> {
    resolve_credential_with(|name| env::var(name).ok())
}

/// Resolves the provider credential with an injected environment lookup.
///
/// # Errors
///
/// Returns [`ConfigError::MissingCredential`] when the variable is unset or
/// blank.
pub fn resolve_credential_with<F>(lookup: F) -> Result<ApiCredential, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(CREDENTIAL_ENV_VAR) {
        Some(value) if !value.trim().is_empty() => Ok(ApiCredential::new(value)),
        _ => Err(ConfigError::MissingCredential {
            variable: CREDENTIAL_ENV_VAR.to_string(),
        }),
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
    /// Provider credential absent from the environment.
    #[error("missing credential: {variable} is not set")]
    MissingCredential {
        /// Environment variable that was expected to hold the credential.
        variable: String,
    },
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Config path with a marker for whether the caller named it explicitly.
struct ResolvedConfigPath {
    /// Path the loader will read.
    path: PathBuf,
    /// True when the path came from a flag or environment variable.
    explicit: bool,
}

/// Resolves the config path from an explicit flag or environment defaults.
fn resolve_path<F>(path: Option<&Path>, lookup: &F) -> Result<ResolvedConfigPath, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(path) = path {
        return Ok(ResolvedConfigPath {
            path: path.to_path_buf(),
            explicit: true,
        });
    }
    if let Some(env_path) = lookup(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(ResolvedConfigPath {
            path: PathBuf::from(env_path),
            explicit: true,
        });
    }
    Ok(ResolvedConfigPath {
        path: PathBuf::from(DEFAULT_CONFIG_NAME),
        explicit: false,
    })
}

/// Validates the resolved path against security limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    let path = Path::new(trimmed);
    for component in path.components() {
        let component_value = component.as_os_str().to_string_lossy();
        if component_value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}
