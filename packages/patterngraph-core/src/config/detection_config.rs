//! Detection configuration and its YAML schema

use super::error::{ConfigError, ConfigResult};
use super::validation::Validatable;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Schema versions this crate can load
pub const SUPPORTED_VERSIONS: &[u64] = &[1];

/// Settings shared by the detectors of one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DetectionConfig {
    /// Minimum do-all suitability score for a loop to count as do-all
    pub do_all_threshold: f64,

    /// Basic-block id fragment of a loop's increment step
    pub increment_block_marker: String,

    /// Basic-block id fragment of a loop's condition check
    pub condition_block_marker: String,

    /// Name of the program entry function
    pub main_function_name: String,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            do_all_threshold: 0.9,
            increment_block_marker: "for.inc".to_string(),
            condition_block_marker: "for.cond".to_string(),
            main_function_name: "main".to_string(),
        }
    }
}

/// YAML schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFileV1 {
    /// Schema version (always 1 for v1)
    pub version: u64,

    #[serde(default)]
    pub detection: DetectionConfig,
}

impl DetectionConfig {
    pub fn with_do_all_threshold(mut self, threshold: f64) -> Self {
        self.do_all_threshold = threshold;
        self
    }

    pub fn with_block_markers(
        mut self,
        increment: impl Into<String>,
        condition: impl Into<String>,
    ) -> Self {
        self.increment_block_marker = increment.into();
        self.condition_block_marker = condition.into();
        self
    }

    pub fn with_main_function_name(mut self, name: impl Into<String>) -> Self {
        self.main_function_name = name.into();
        self
    }

    /// Load and validate a YAML configuration file
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse and validate YAML content
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        // Version is checked before the strict parse so that a v2 file
        // reports the version instead of its unknown fields.
        let raw: serde_yaml::Value = serde_yaml::from_str(content)?;
        let version = raw
            .get("version")
            .ok_or(ConfigError::MissingVersion)?
            .as_u64()
            .ok_or_else(|| ConfigError::Custom("'version' must be an integer".to_string()))?;

        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let file: ConfigFileV1 = serde_yaml::from_value(raw)?;
        file.detection.validate()?;

        tracing::debug!(
            do_all_threshold = file.detection.do_all_threshold,
            "detection config loaded"
        );
        Ok(file.detection)
    }

    /// Serialize as a v1 YAML document
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let file = ConfigFileV1 {
            version: 1,
            detection: self.clone(),
        };
        Ok(serde_yaml::to_string(&file)?)
    }
}

impl Validatable for DetectionConfig {
    fn validate(&self) -> ConfigResult<()> {
        if !(0.0..=1.0).contains(&self.do_all_threshold) {
            return Err(ConfigError::range(
                "do_all_threshold",
                self.do_all_threshold,
                0.0,
                1.0,
                "Suitability scores are fractions; 0.9 is the usual cut-off.",
            ));
        }

        for (field, value) in [
            ("increment_block_marker", &self.increment_block_marker),
            ("condition_block_marker", &self.condition_block_marker),
            ("main_function_name", &self.main_function_name),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Empty {
                    field: field.to_string(),
                    hint: "Remove the field to use the default.".to_string(),
                });
            }
        }

        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "DetectionConfig"
    }
}
