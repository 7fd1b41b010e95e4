// crates/bounty-judge-config/src/lib.rs
// ============================================================================
// Module: Bounty Judge Config
// Description: Simulation configuration model, loading, and validation.
// Purpose: Resolve provider and harness settings with fail-closed defaults.
// Dependencies: bounty-judge-core, serde, toml, url
// ============================================================================

//! ## Overview
//! This crate owns the simulation harness configuration: the TOML file model,
//! its resolution order (flag, environment, default name), strict validation
//! of every loaded value, and the out-of-band provider credential lookup.
//! A missing config file falls back to built-in defaults; a missing
//! credential is a hard error, because the harness must never fabricate one.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::CONFIG_ENV_VAR;
pub use config::CREDENTIAL_ENV_VAR;
pub use config::ConfigError;
pub use config::DEFAULT_UNIT_SOURCE_PATH;
pub use config::ProviderSettings;
pub use config::SimulationConfig;
pub use config::SimulationSettings;
pub use config::resolve_credential;
pub use config::resolve_credential_with;
