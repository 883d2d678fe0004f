//! Detection configuration
//!
//! Defaults cover the usual LLVM-instrumented input. Overrides come from a
//! versioned YAML file:
//!
//! ```yaml
//! version: 1
//! detection:
//!   do_all_threshold: 0.8
//!   increment_block_marker: for.inc
//! ```
//!
//! ```rust,ignore
//! use patterngraph_core::config::DetectionConfig;
//!
//! let config = DetectionConfig::from_yaml("detection.yaml")?;
//! ```

pub mod detection_config;
pub mod error;
pub mod validation;

pub use detection_config::{ConfigFileV1, DetectionConfig, SUPPORTED_VERSIONS};
pub use error::{ConfigError, ConfigResult};
pub use validation::Validatable;
