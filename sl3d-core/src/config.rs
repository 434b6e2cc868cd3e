/// Renderer configuration
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::framebuffer::Rgba;
use crate::projection::Projector;

/// Viewport, colours and input step sizes.
///
/// Every field has a default, so a TOML file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    /// Virtual distance from the camera to the z = 0 plane.
    pub camera_distance: f32,
    pub background: Rgba,
    pub wire_color: Rgba,
    /// Degrees per rotate action.
    pub rotate_step_deg: f32,
    /// Model units per translate action.
    pub translate_step: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 320,
            height: 200,
            camera_distance: Projector::DEFAULT_CAMERA_DISTANCE,
            background: Rgba::BACKGROUND,
            wire_color: Rgba::GREEN,
            rotate_step_deg: 2.0,
            translate_step: 1.0,
        }
    }
}

impl RenderConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: RenderConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{}, using default render config", e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "viewport must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        if !self.camera_distance.is_finite() {
            return Err(ConfigError::Invalid("camera_distance must be finite".into()));
        }
        Ok(())
    }

    pub fn projector(&self) -> Projector {
        Projector::new(self.width, self.height).with_camera_distance(self.camera_distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_viewer_constants() {
        let config = RenderConfig::default();
        assert_eq!((config.width, config.height), (320, 200));
        assert_eq!(config.background, Rgba::new(50, 50, 50, 255));
        assert!((config.rotate_step_deg - 2.0).abs() < 1e-6);
        assert!((config.translate_step - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = RenderConfig::from_toml_str(
            r#"
            width = 160
            background = [0, 0, 0, 255]
            "#,
        )
        .unwrap();
        assert_eq!(config.width, 160);
        assert_eq!(config.height, 200);
        assert_eq!(config.background, Rgba::new(0, 0, 0, 255));
        assert_eq!(config.wire_color, Rgba::GREEN);
    }

    #[test]
    fn test_rejects_empty_viewport() {
        assert!(matches!(
            RenderConfig::from_toml_str("height = 0"),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_rejects_bad_toml() {
        assert!(matches!(
            RenderConfig::from_toml_str("width = \"wide\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let config = RenderConfig::load_or_default("/no/such/sl3d.toml");
        assert_eq!(config, RenderConfig::default());
    }

    #[test]
    fn test_projector_uses_config() {
        let config = RenderConfig {
            camera_distance: 80.0,
            ..RenderConfig::default()
        };
        let projector = config.projector();
        assert!((projector.camera_distance - 80.0).abs() < 1e-6);
        assert_eq!(projector.width, 320);
    }
}
