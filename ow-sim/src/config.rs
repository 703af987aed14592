//! This module handles the simulation config.

use serde::{Deserialize, Serialize};
use std::{fs, io, path::Path};
use thiserror::Error;
use tracing::warn;

/// The phrases cycled through by the arc text engine when the config doesn't provide its own.
const DEFAULT_PHRASES: [&str; 10] = [
    "Scanning Product...",
    "AI Vision Processing",
    "Cross-Platform Search",
    "Aggregating Prices",
    "Statistical Filtering",
    "Calculating MRP",
    "Condition Assessment",
    "VLU Certified",
    "Price DNA Analysis",
    "Market Intelligence",
];

/// The error returned by [`SphereConfig::from_path`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file couldn't be read.
    #[error("IO error: `{0:?}`")]
    Io(#[from] io::Error),

    /// The config file wasn't valid RON.
    #[error("RON parse error: `{0:?}`")]
    Parse(#[from] ron::error::SpannedError),
}

/// The config for the whole simulation; includes geometry, behaviour flags, and arc-text timing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SphereConfig {
    /// The rendered footprint hint for the host surface, in pixels.
    ///
    /// The logical drawing space stays 560×560 regardless; surfaces stretch or shrink it to
    /// this size.
    pub size: f32,

    /// Whether pointer interaction is enabled.
    pub interactive: bool,

    /// Whether the revolving arc text is enabled.
    pub show_text: bool,

    /// The number of latitude bands.
    pub bands: usize,

    /// The number of particles on each band.
    pub points_per_band: usize,

    /// The nominal sphere radius, in logical units.
    pub radius: f32,

    /// The phrases cycled through by the arc text, in order.
    pub phrases: Vec<String>,

    /// The number of simulated seconds between arc-text rollovers.
    pub swap_interval: f32,

    /// The typing speed of the arc text, in characters per simulated second.
    pub chars_per_second: f32,
}

impl Default for SphereConfig {
    fn default() -> Self {
        Self {
            size: 400.,
            interactive: true,
            show_text: true,
            bands: 12,
            points_per_band: 40,
            radius: 220.,
            phrases: DEFAULT_PHRASES.iter().map(|&s| s.to_owned()).collect(),
            swap_interval: 3.5,
            chars_per_second: 33.,
        }
    }
}

impl SphereConfig {
    /// Load the config from the given file, using the default if the file is unavailable or
    /// invalid. Also save the default to the file for future editing.
    pub fn from_file(filename: &str) -> Self {
        if let Some(parent) = Path::new(filename).parent() {
            let _ = fs::DirBuilder::new().recursive(true).create(parent);
        }

        let write_and_return_default = || -> Self {
            warn!(filename, "Sphere config unavailable; writing the default");
            let default = Self::default();
            default.save_to_file(filename);
            default
        };

        let Ok(text) = fs::read_to_string(filename) else {
            return write_and_return_default();
        };

        ron::from_str(&text).unwrap_or_else(|_| write_and_return_default())
    }

    /// Save the config to the given file.
    pub fn save_to_file(&self, filename: &str) {
        let _ = fs::write(
            filename,
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default().struct_names(true))
                .expect("The sphere config should be serializable"),
        );
    }

    /// Load the config from an explicit path, failing loudly instead of falling back to the
    /// default.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Ok(ron::from_str(&text)?)
    }
}
