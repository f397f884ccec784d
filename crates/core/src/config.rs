use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Tuning for [`crate::perf::PerformanceMonitor`].
///
/// Every field has a default, so partial documents are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Number of frame deltas in the moving-average window.
    pub window: usize,
    /// Minimum FPS reported as good.
    pub good_fps: u32,
    /// Minimum FPS reported as warning; anything lower is critical.
    pub warning_fps: u32,
    /// Ceiling for the FPS estimate, also used when the average delta is
    /// zero.
    pub max_fps: u32,
    /// FPS reported before the first sample.
    pub initial_fps: u32,
    pub overlay: OverlayLayout,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            window: 60,
            good_fps: 55,
            warning_fps: 30,
            max_fps: 1000,
            initial_fps: 60,
            overlay: OverlayLayout::default(),
        }
    }
}

impl MonitorConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        Ok(config.normalized())
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        Ok(config.normalized())
    }

    /// Coerce values the monitor cannot work with: a zero window becomes 1
    /// and a warning threshold above the good threshold is lowered to it.
    pub fn normalized(mut self) -> Self {
        self.window = self.window.max(1);
        self.max_fps = self.max_fps.max(1);
        self.warning_fps = self.warning_fps.min(self.good_fps);
        self
    }
}

/// Placement and styling of the on-screen FPS panel, in screen pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayLayout {
    pub x: f64,
    pub y: f64,
    /// Draw order; above everything the game places.
    pub depth: i32,
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    pub fps_font_size: f64,
    pub frame_font_size: f64,
    pub line_gap: f64,
    pub background_alpha: f32,
}

impl Default for OverlayLayout {
    fn default() -> Self {
        Self {
            x: 10.0,
            y: 10.0,
            depth: 10_000,
            width: 140.0,
            height: 44.0,
            padding: 5.0,
            fps_font_size: 14.0,
            frame_font_size: 11.0,
            line_gap: 4.0,
            background_alpha: 0.7,
        }
    }
}
