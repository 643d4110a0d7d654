//! Engine configuration.
//!
//! Every tuned constant lives here rather than in code: archetype models,
//! the situational modifier table, penalty rates and the discipline curve.
//! A config is built once (from defaults or a JSON document), validated,
//! and then shared read-only by every play.
//!
//! Every section is `#[serde(default)]`, so a document only has to name the
//! values it changes:
//!
//! ```
//! use gridiron_core::config::EngineConfig;
//!
//! let config = EngineConfig::from_json_str(r#"{
//!     "penalties": { "home_multiplier": 0.8 },
//!     "generator": { "rating_slope": 0.08 }
//! }"#).unwrap();
//! assert!((config.penalties.home_multiplier - 0.8).abs() < 1e-12);
//! assert!(!config.modifiers.rules().is_empty());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::outcome::{GeneratorConfig, ModifierTable};
use crate::penalty::PenaltyConfig;

/// Complete, immutable engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Yardage models.
    pub generator: GeneratorConfig,
    /// Situational modifiers, in application order.
    pub modifiers: ModifierTable,
    /// Penalty rates and scaling.
    pub penalties: PenaltyConfig,
}

impl EngineConfig {
    /// Parses a JSON document and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown penalty
    /// or archetype names, otherwise the first validation failure.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the config as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if serialization fails.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validates every section.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.generator.validate()?;
        self.modifiers.validate()?;
        self.penalties.validate()
    }
}
