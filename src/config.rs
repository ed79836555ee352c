//! Runtime configuration for the frame driver: window, frame pacing and
//! projection parameters. Loaded from an optional JSON file next to the
//! binary; missing file means defaults, malformed file is fatal.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::RenderError;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub fullscreen: bool,
    pub fps_cap: u32,
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    /// Image file to texture the scene with; the built-in test pattern is
    /// used when absent.
    pub texture: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "roomgl".to_string(),
            fullscreen: false,
            fps_cap: 60,
            fov: 45.0,
            near: 0.1,
            far: 50.0,
            texture: None,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, RenderError> {
        if !path.exists() {
            log::warn!("no config at '{}', using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path).map_err(|e| RenderError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&text).map_err(|e| RenderError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_stock_window() {
        let config = Config::default();
        assert_eq!((config.width, config.height), (1280, 720));
        assert_eq!(config.fps_cap, 60);
        assert_eq!(config.fov, 45.0);
        assert_eq!(config.near, 0.1);
        assert_eq!(config.far, 50.0);
    }

    #[test]
    fn partial_json_falls_back_per_field() {
        let config: Config = serde_json::from_str(r#"{ "width": 1920, "fov": 70.0 }"#).unwrap();
        assert_eq!(config.width, 1920);
        assert_eq!(config.fov, 70.0);
        assert_eq!(config.height, 720);
        assert_eq!(config.title, "roomgl");
    }

    #[test]
    fn texture_path_is_optional() {
        assert_eq!(Config::default().texture, None);
        let config: Config =
            serde_json::from_str(r#"{ "texture": "assets/tiles.png" }"#).unwrap();
        assert_eq!(config.texture, Some(PathBuf::from("assets/tiles.png")));
    }

    #[test]
    fn aspect_ratio_is_width_over_height() {
        let config = Config::default();
        assert!((config.aspect_ratio() - 1280.0 / 720.0).abs() < 1e-6);
    }
}
