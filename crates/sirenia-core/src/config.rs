//! Tunables for the preview engine.
//!
//! Every field has a default matching the shipped behavior; partial JSON/YAML documents only
//! override the keys they name. Zoom bounds are fixed constants in
//! [`crate::viewport`].

use crate::error::Result;
use crate::mode::Theme;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StudioConfig {
    pub viewport: ViewportConfig,
    pub render: RenderConfig,
    pub scroll: ScrollConfig,
    pub export: ExportConfig,
}

impl StudioConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Parses either JSON or YAML. A leading `{` selects JSON.
    pub fn parse(text: &str) -> Result<Self> {
        if text.trim_start().starts_with('{') {
            Self::from_json_str(text)
        } else {
            Self::from_yaml_str(text)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewportConfig {
    /// Padding (px) kept free around content by fit-to-view.
    pub fit_padding: f64,
    /// Multiplier from vertical wheel delta to zoom percent.
    pub wheel_zoom_factor: f64,
    /// Fit the diagram into the preview after each successful render.
    pub auto_fit: bool,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            fit_padding: 40.0,
            wheel_zoom_factor: 0.5,
            auto_fit: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderConfig {
    pub debounce_ms: u64,
}

impl RenderConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { debounce_ms: 300 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScrollConfig {
    pub sync_enabled: bool,
    pub cooldown_ms: u64,
}

impl ScrollConfig {
    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            sync_enabled: true,
            cooldown_ms: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExportConfig {
    /// Space added on every side of the resolved content box.
    pub padding: f64,
    /// Preferred raster magnification.
    pub scale: f64,
    /// Largest allowed raster edge (px) at the preferred scale before falling back to 1x.
    pub max_canvas_px: f64,
    /// Longest raster surface edge (px) that will be allocated at all.
    pub max_surface_edge: u32,
    /// Largest raster surface area (px) that will be allocated at all.
    pub max_surface_area: u64,
    pub jpeg_quality: u8,
    pub dark_background: String,
    pub light_background: String,
    pub fallback_width: f64,
    pub fallback_height: f64,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            padding: 40.0,
            scale: 2.0,
            max_canvas_px: 4000.0,
            max_surface_edge: 16_384,
            max_surface_area: 16_384 * 16_384,
            jpeg_quality: 90,
            dark_background: "#1e293b".to_string(),
            light_background: "#ffffff".to_string(),
            fallback_width: 800.0,
            fallback_height: 600.0,
        }
    }
}

impl ExportConfig {
    /// Raster fill color for the given diagram theme.
    pub fn background_for(&self, theme: Theme) -> &str {
        if theme.is_dark() {
            &self.dark_background
        } else {
            &self.light_background
        }
    }

    /// Whether a `width`x`height` raster surface is within the allocation limits.
    pub fn surface_fits(&self, width: u32, height: u32) -> bool {
        width <= self.max_surface_edge
            && height <= self.max_surface_edge
            && u64::from(width) * u64::from(height) <= self.max_surface_area
    }
}
