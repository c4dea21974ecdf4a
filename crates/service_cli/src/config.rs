//! Generator configuration management.
//!
//! Values are layered, lowest precedence first: built-in defaults, an
//! optional TOML file, `VOLCLOUD_*` environment variables, then command-line
//! flags.
//!
//! ```toml
//! shape = "cube_hole"
//! n = 500000
//! side = 10.0
//! hole_radius = 1.5
//! axis = "y"
//! normals = true
//! format = "xyz"
//! ```

use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use cloud_core::sampling::coordinate_count;
use cloud_core::shape::{HoleAxis, ShapeKind, ShapeParams};
use cloud_io::{OutputFormat, Precision};
use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// Environment variable overriding the RNG seed.
pub const ENV_SEED: &str = "VOLCLOUD_SEED";
/// Environment variable overriding the log level.
pub const ENV_LOG: &str = "VOLCLOUD_LOG";

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Resolved generator configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Shape to sample
    pub shape: ShapeKind,

    /// Number of points
    pub n: usize,

    /// Ball radius
    pub radius: f64,

    /// Cube side length
    pub side: f64,

    /// Cylinder hole radius
    pub hole_radius: f64,

    /// Cylinder hole axis
    pub axis: HoleAxis,

    /// RNG seed
    pub seed: u64,

    /// Output precision
    #[serde(deserialize_with = "from_str")]
    pub dtype: Precision,

    /// Estimate per-point normals
    pub normals: bool,

    /// Output format
    #[serde(deserialize_with = "from_str")]
    pub format: OutputFormat,

    /// Output base path; derived from the shape when unset
    pub out: Option<PathBuf>,

    /// Log per-round sampling progress
    pub progress: bool,

    /// Log level
    pub log_level: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            shape: ShapeKind::Ball,
            n: 2_000_000,
            radius: 10.0,
            side: 10.0,
            hole_radius: 1.0,
            axis: HoleAxis::Z,
            seed: 42,
            dtype: Precision::F32,
            normals: false,
            format: OutputFormat::Ply,
            out: None,
            progress: true,
            log_level: "info".to_string(),
        }
    }
}

fn from_str<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let s = String::deserialize(deserializer)?;
    s.parse().map_err(serde::de::Error::custom)
}

impl GeneratorConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text; absent keys keep their defaults
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply environment variable overrides
    pub fn with_env_override(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    ///
    /// Unparseable seeds are ignored.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(seed) = lookup(ENV_SEED).and_then(|s| s.trim().parse().ok()) {
            self.seed = seed;
        }

        if let Some(level) = lookup(ENV_LOG) {
            self.log_level = level;
        }

        self
    }

    /// Build the validated shape parameters for the configured shape
    pub fn shape_params(&self) -> Result<ShapeParams, cloud_core::ConfigError> {
        ShapeParams::from_kind(self.shape, self.radius, self.side, self.hole_radius, self.axis)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if !VALID_LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, VALID_LOG_LEVELS
            ));
        }

        if let Err(e) = self.shape_params() {
            errors.push(e.to_string());
        }

        if let Err(e) = coordinate_count(self.n) {
            errors.push(e.to_string());
        }

        if let Some(out) = &self.out {
            if out.as_os_str().is_empty() {
                errors.push("out cannot be empty".to_string());
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Output base path: `out` if set, otherwise derived from the shape
    ///
    /// Derived names follow `<label>_<count>[_n]`, e.g. `ball_r10_2M_n`.
    pub fn output_base(&self, params: &ShapeParams) -> PathBuf {
        match &self.out {
            Some(out) => out.clone(),
            None => {
                let suffix = if self.normals { "_n" } else { "" };
                PathBuf::from(format!("{}_{}{}", params.label(), count_tag(self.n), suffix))
            }
        }
    }
}

/// Compact point count: `2M`, `500k`, or the plain number
fn count_tag(n: usize) -> String {
    if n >= 1_000_000 && n % 1_000_000 == 0 {
        format!("{}M", n / 1_000_000)
    } else if n >= 1_000 && n % 1_000 == 0 {
        format!("{}k", n / 1_000)
    } else {
        n.to_string()
    }
}

/// Configuration error type
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("IO error reading {}: {message}", path.display())]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying error text
        message: String,
    },

    /// Config file is not valid TOML for this schema
    #[error("Parse error: {0}")]
    Parse(String),

    /// One or more values are out of range
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}
