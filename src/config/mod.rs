//! Post configuration - JSON-based
//!
//! Every field has a default, so an empty object `{}` is a valid config.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Highest axis count the joint label table covers
pub const MAX_AXES: usize = crate::codegen::AXIS_LABELS.len();

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("axis count {0} out of range (1..=12)")]
    AxisCount(usize),

    #[error("program extension must not be empty")]
    EmptyExtension,
}

/// How calls with no controller equivalent are treated
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum UnsupportedPolicy {
    /// Silent no-op
    #[serde(rename = "ignore", alias = "IGNORE")]
    #[default]
    Ignore,
    /// Record a diagnostic shown at save time
    #[serde(rename = "log", alias = "LOG")]
    Log,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PostConfig {
    /// Name of this post-processor
    pub post_name: String,

    /// Robot the program is generated for
    pub robot_name: String,

    /// Number of robot axes
    pub axes: usize,

    /// Program file extension, without the dot
    pub extension: String,

    /// First line of every program
    pub preamble: String,

    /// Treatment of speed, acceleration and zone data calls
    pub unsupported: UnsupportedPolicy,

    /// Optional: application used to open the saved program
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewer: Option<String>,
}

impl Default for PostConfig {
    fn default() -> Self {
        Self {
            post_name: "Arctos".to_string(),
            robot_name: "Arctos 6DOF".to_string(),
            axes: 6,
            extension: "gcode".to_string(),
            preamble: "F800 (Feedrate)".to_string(),
            unsupported: UnsupportedPolicy::Ignore,
            viewer: None,
        }
    }
}

impl PostConfig {
    /// Load and validate a config from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: PostConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.axes == 0 || self.axes > MAX_AXES {
            return Err(ConfigError::AxisCount(self.axes));
        }
        if self.extension.is_empty() {
            return Err(ConfigError::EmptyExtension);
        }
        Ok(())
    }

    /// File name of a saved program, e.g. `Main.gcode`
    pub fn file_name(&self, program: &str) -> String {
        format!("{}.{}", program, self.extension)
    }
}
