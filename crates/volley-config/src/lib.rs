// SPDX-FileCopyrightText: 2026 Volley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the volley broadcast engine.
//!
//! TOML configuration with strict parsing (`deny_unknown_fields`), file
//! hierarchy lookup, environment variable overrides, and post-
//! deserialization validation.

pub mod loader;
pub mod model;

pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::VolleyConfig;

use volley_core::VolleyError;

/// Load configuration from the file hierarchy and validate it.
pub fn load_and_validate() -> Result<VolleyConfig, VolleyError> {
    let config = loader::load_config().map_err(|e| VolleyError::Config(e.to_string()))?;
    validate(&config)?;
    Ok(config)
}

/// Load configuration from a TOML string and validate it.
///
/// Useful for testing and explicit configuration.
pub fn load_and_validate_str(toml_content: &str) -> Result<VolleyConfig, VolleyError> {
    let config =
        loader::load_config_from_str(toml_content).map_err(|e| VolleyError::Config(e.to_string()))?;
    validate(&config)?;
    Ok(config)
}

/// Constraints figment cannot express.
fn validate(config: &VolleyConfig) -> Result<(), VolleyError> {
    if config.storage.database_path.is_empty() {
        return Err(VolleyError::Config(
            "storage.database_path must not be empty".to_string(),
        ));
    }
    if config.sender.recheck_secs == 0 {
        return Err(VolleyError::Config(
            "sender.recheck_secs must be at least 1".to_string(),
        ));
    }
    Ok(())
}
