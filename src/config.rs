//! Configuration for itemodm
//!
//! Centralized configuration with sensible defaults.

use crate::error::{OdmError, Result};

/// Repository used when an item definition names none
pub const DEFAULT_REPOSITORY: &str = "ItemRepository";

/// Main configuration shared by the parser, mappers and registry
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Metadata Configuration
    // -------------------------------------------------------------------------
    /// Repository type name reported for items without an override
    pub default_repository: String,

    /// Check at registration time that the item adapter exposes every
    /// declared property
    pub validate_adapters: bool,

    // -------------------------------------------------------------------------
    // Hydration Configuration
    // -------------------------------------------------------------------------
    /// Level of the diagnostic emitted for unknown attributes
    pub unknown_attribute_level: DiagnosticLevel,
}

/// Level at which a non-fatal diagnostic is emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticLevel {
    /// `tracing::warn!`
    Warn,

    /// `tracing::debug!` (tables that routinely carry foreign attributes)
    Debug,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_repository: DEFAULT_REPOSITORY.to_string(),
            validate_adapters: true,
            unknown_attribute_level: DiagnosticLevel::Warn,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check the configuration before metadata is built from it
    pub fn validate(&self) -> Result<()> {
        if self.default_repository.trim().is_empty() {
            return Err(OdmError::Config(
                "default repository name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the repository reported for items without an override
    pub fn default_repository(mut self, name: impl Into<String>) -> Self {
        self.config.default_repository = name.into();
        self
    }

    /// Enable or disable adapter validation at registration
    pub fn validate_adapters(mut self, enabled: bool) -> Self {
        self.config.validate_adapters = enabled;
        self
    }

    /// Set the level used for unknown attribute diagnostics
    pub fn unknown_attribute_level(mut self, level: DiagnosticLevel) -> Self {
        self.config.unknown_attribute_level = level;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
