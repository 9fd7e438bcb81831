//! Configuration file handling.
//!
//! ```toml
//! source = "aircraft_points.json"
//! connections = [["C11", "C21"], ["C21", "C31"]]
//!
//! [model]
//! marker_radius = 0.05
//! hull_radius = 0.05
//! slices = 16
//! stacks = 8
//! ```

use std::path::Path;

use airframe_kernel::Tessellation;
use airframe_points::{ConnectionTable, PointSource};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors reading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// Path that was read.
        path: String,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The config file is not valid TOML for this schema.
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of range.
    #[error("invalid config value `{field}`: {reason}")]
    Invalid {
        /// Offending field.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

/// Upper bound for `slices` and `stacks`.
pub const MAX_SEGMENTS: u32 = 1024;

/// Geometry parameters for the builder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelParams {
    /// Radius of the sphere placed at every point.
    pub marker_radius: f64,
    /// Radius of the two spheres each connection hull is built from.
    pub hull_radius: f64,
    /// Segments around each sphere.
    pub slices: u32,
    /// Latitude bands per sphere.
    pub stacks: u32,
}

impl Default for ModelParams {
    fn default() -> Self {
        let tess = Tessellation::default();
        Self {
            marker_radius: 0.05,
            hull_radius: 0.05,
            slices: tess.slices,
            stacks: tess.stacks,
        }
    }
}

impl ModelParams {
    /// Sphere tessellation for markers and hulls.
    pub fn tessellation(&self) -> Tessellation {
        Tessellation {
            slices: self.slices,
            stacks: self.stacks,
        }
        .normalized()
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AirframeConfig {
    /// Where the point dataset comes from.
    pub source: PointSource,
    /// Geometry parameters.
    pub model: ModelParams,
    /// Pairs of point ids joined by hulls.
    pub connections: ConnectionTable,
}

impl AirframeConfig {
    /// Read and validate a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Parse and validate TOML text.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()
    }

    /// Check value ranges. Odd stack counts are rounded up to even.
    pub fn validate(mut self) -> Result<Self, ConfigError> {
        let model = &mut self.model;
        positive("model.marker_radius", model.marker_radius)?;
        positive("model.hull_radius", model.hull_radius)?;
        in_range("model.slices", model.slices, 3)?;
        in_range("model.stacks", model.stacks, 2)?;
        model.stacks += model.stacks % 2;
        Ok(self)
    }
}

fn in_range(field: &'static str, value: u32, min: u32) -> Result<(), ConfigError> {
    if (min..=MAX_SEGMENTS).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be between {min} and {MAX_SEGMENTS}, got {value}"),
        })
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be a positive number, got {value}"),
        })
    }
}
