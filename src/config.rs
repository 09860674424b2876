//! Swarm configuration.
//!
//! A [`MorphConfig`] is consumed once when the particle set is generated. It can
//! be built in code or loaded from JSON:
//!
//! ```json
//! {
//!   "count": 1500,
//!   "color_palette": ["#E0F7FA", "#FFFFFF"],
//!   "base_radius": 3.5,
//!   "height": 8.0,
//!   "scatter_radius": 12.0
//! }
//! ```
//!
//! Missing fields fall back to the defaults below.

use crate::color::Color;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_count() -> u32 {
    1500
}

fn default_palette() -> Vec<Color> {
    Color::ice_palette()
}

fn default_base_radius() -> f32 {
    3.5
}

fn default_height() -> f32 {
    8.0
}

fn default_scatter_radius() -> f32 {
    12.0
}

fn default_jitter() -> f32 {
    0.2
}

/// Layout and styling for one particle set.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MorphConfig {
    /// Number of particles.
    #[serde(default = "default_count")]
    pub count: u32,
    /// Colors drawn with replacement, one per particle. Must not be empty.
    #[serde(default = "default_palette")]
    pub color_palette: Vec<Color>,
    /// Cone radius at its base in the formed layout.
    #[serde(default = "default_base_radius")]
    pub base_radius: f32,
    /// Cone height in the formed layout, centered on y = 0.
    #[serde(default = "default_height")]
    pub height: f32,
    /// Sphere radius of the dispersed layout.
    #[serde(default = "default_scatter_radius")]
    pub scatter_radius: f32,
    /// Total span of the random offset added to each cone position, per axis.
    #[serde(default = "default_jitter")]
    pub jitter: f32,
}

impl Default for MorphConfig {
    fn default() -> Self {
        Self {
            count: default_count(),
            color_palette: default_palette(),
            base_radius: default_base_radius(),
            height: default_height(),
            scatter_radius: default_scatter_radius(),
            jitter: default_jitter(),
        }
    }
}

impl MorphConfig {
    /// Same as [`MorphConfig::default`]: 1500 particles in the ice palette.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of particles.
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    /// Replace the palette. An empty palette fails validation.
    pub fn with_palette(mut self, palette: Vec<Color>) -> Self {
        self.color_palette = palette;
        self
    }

    /// Set the palette from hex strings such as `"#fff"`.
    pub fn with_hex_palette<S: AsRef<str>>(mut self, palette: &[S]) -> Result<Self, ConfigError> {
        self.color_palette = Color::palette(palette)?;
        Ok(self)
    }

    /// Set the cone's base radius and height.
    pub fn with_cone(mut self, base_radius: f32, height: f32) -> Self {
        self.base_radius = base_radius;
        self.height = height;
        self
    }

    /// Set the sphere radius of the dispersed layout.
    pub fn with_scatter_radius(mut self, radius: f32) -> Self {
        self.scatter_radius = radius;
        self
    }

    /// Set the total per-axis span of the cone position offset.
    pub fn with_jitter(mut self, jitter: f32) -> Self {
        self.jitter = jitter;
        self
    }

    /// Check the configuration can produce a well-formed particle set.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.color_palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }

        let dimensions = [
            ("base_radius", self.base_radius),
            ("height", self.height),
            ("scatter_radius", self.scatter_radius),
            ("jitter", self.jitter),
        ];
        for (field, value) in dimensions {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidDimension { field, value });
            }
        }

        Ok(())
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: MorphConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Pretty-printed JSON, colors as hex strings.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load and validate a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Save the configuration to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = MorphConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.count, 1500);
        assert_eq!(config.color_palette.len(), 5);
    }

    #[test]
    fn test_empty_palette_rejected() {
        let config = MorphConfig::default().with_palette(Vec::new());
        assert!(matches!(config.validate(), Err(ConfigError::EmptyPalette)));
    }

    #[test]
    fn test_negative_dimension_rejected() {
        let config = MorphConfig::default().with_cone(-1.0, 8.0);
        match config.validate() {
            Err(ConfigError::InvalidDimension { field, .. }) => assert_eq!(field, "base_radius"),
            other => panic!("expected InvalidDimension, got {other:?}"),
        }
    }

    #[test]
    fn test_nan_dimension_rejected() {
        let config = MorphConfig::default().with_scatter_radius(f32::NAN);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDimension { field: "scatter_radius", .. })
        ));
    }

    #[test]
    fn test_zero_count_is_valid() {
        assert!(MorphConfig::default().with_count(0).validate().is_ok());
    }

    #[test]
    fn test_json_defaults_fill_missing_fields() {
        let config = MorphConfig::from_json(r##"{ "count": 10, "color_palette": ["#fff"] }"##).unwrap();
        assert_eq!(config.count, 10);
        assert_eq!(config.color_palette, vec![Color::WHITE]);
        assert_eq!(config.height, 8.0);
        assert_eq!(config.jitter, 0.2);
    }

    #[test]
    fn test_json_empty_palette_fails() {
        let result = MorphConfig::from_json(r#"{ "color_palette": [] }"#);
        assert!(matches!(result, Err(ConfigError::EmptyPalette)));
    }

    #[test]
    fn test_json_bad_color_fails() {
        let result = MorphConfig::from_json(r#"{ "color_palette": ["blue"] }"#);
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_hex_palette_builder() {
        let config = MorphConfig::new().with_hex_palette(&["#fff", "#000"]).unwrap();
        assert_eq!(config.color_palette, vec![Color::WHITE, Color::BLACK]);
        assert!(MorphConfig::new().with_hex_palette(&["nope"]).is_err());
    }

    #[test]
    fn test_builders_set_fields() {
        let config = MorphConfig::new()
            .with_count(3)
            .with_palette(vec![Color::WHITE])
            .with_cone(2.0, 5.0)
            .with_scatter_radius(9.0)
            .with_jitter(0.5);
        assert_eq!(config.count, 3);
        assert_eq!(config.color_palette, vec![Color::WHITE]);
        assert_eq!((config.base_radius, config.height), (2.0, 5.0));
        assert_eq!(config.scatter_radius, 9.0);
        assert_eq!(config.jitter, 0.5);
        assert_eq!(MorphConfig::new(), MorphConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("swarm.json");
        let config = MorphConfig::default().with_count(42).with_scatter_radius(6.0);
        config.save(&path).unwrap();
        assert_eq!(MorphConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file() {
        let result = MorphConfig::load("/definitely/not/here.json");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
