//! Scene files
//!
//! A scene describes a row of items, the slider configuration and an
//! optional script of timed host input:
//!
//! ```toml
//! container-width = 600
//!
//! [slider]
//! autoplay = true
//! slide-gap = 16
//!
//! [[items]]
//! width = 240
//! image = true
//!
//! [[actions]]
//! at = 1.5
//! action = "next"
//!
//! [[actions]]
//! at = 3.0
//! action = "drag"
//! from = 400
//! to = 250
//! duration-ms = 120
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use throw_slider::{FlexRowSurface, SliderConfig};

/// One slide in the row
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ItemConfig {
    /// Content width in px
    pub width: f32,
    /// Holds an image that settles right after mount
    #[serde(default)]
    pub image: bool,
}

/// Timed host input
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ScriptedAction {
    /// Seconds since mount
    pub at: f32,
    #[serde(flatten)]
    pub action: Action,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Action {
    Next,
    Previous,
    GoTo {
        index: isize,
    },
    /// Press at `from`, move linearly to `to`, release
    #[serde(rename_all = "kebab-case")]
    Drag {
        from: f32,
        to: f32,
        #[serde(default = "default_drag_ms")]
        duration_ms: f64,
    },
    Hover {
        enter: bool,
    },
    Resize {
        width: f32,
    },
    ToggleAutoplay,
}

fn default_drag_ms() -> f64 {
    100.0
}

fn default_container_width() -> f32 {
    600.0
}

/// A complete scene
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct SceneConfig {
    #[serde(default = "default_container_width")]
    pub container_width: f32,
    /// Defaults to the container width
    #[serde(default)]
    pub viewport_width: Option<f32>,
    #[serde(default)]
    pub slider: SliderConfig,
    #[serde(default)]
    pub items: Vec<ItemConfig>,
    #[serde(default)]
    pub actions: Vec<ScriptedAction>,
}

impl SceneConfig {
    /// `count` items of the same width and no script
    pub fn uniform(count: usize, width: f32, container_width: f32) -> Self {
        Self {
            container_width,
            viewport_width: None,
            slider: SliderConfig::default(),
            items: vec![
                ItemConfig {
                    width,
                    image: false,
                };
                count
            ],
            actions: Vec::new(),
        }
    }

    /// Load a scene from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let mut scene: SceneConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        scene
            .slider
            .validate()
            .with_context(|| format!("Invalid slider settings in {}", path.display()))?;
        scene.actions.sort_by(|a, b| a.at.total_cmp(&b.at));
        Ok(scene)
    }

    /// Lay the items out on a headless surface
    pub fn surface(&self) -> Result<FlexRowSurface> {
        let mut surface = FlexRowSurface::from_config(self.container_width, &self.slider)
            .context("Failed to create layout")?;
        surface.set_viewport_width(self.viewport_width.unwrap_or(self.container_width));
        for item in &self.items {
            let index = surface.push_item(item.width)?;
            surface.set_has_image(index, item.image);
        }
        Ok(surface)
    }
}
