pub mod monitor;
pub mod overlay;
pub mod profiler;

pub use monitor::PerformanceMonitor;
pub use overlay::Overlay;
pub use profiler::{Profiler, measure, timed};

use resonador_protocol::Color;
use serde::{Deserialize, Serialize};

pub const STATUS_GOOD_COLOR: Color = Color::from_hex(0x00ff00);
pub const STATUS_WARNING_COLOR: Color = Color::from_hex(0xffaa00);
pub const STATUS_CRITICAL_COLOR: Color = Color::from_hex(0xff0000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceStatus {
    Good,
    Warning,
    Critical,
}

impl PerformanceStatus {
    /// `Good` at or above `good_fps`, `Warning` at or above `warning_fps`,
    /// `Critical` below.
    pub fn classify(fps: u32, good_fps: u32, warning_fps: u32) -> Self {
        if fps >= good_fps {
            PerformanceStatus::Good
        } else if fps >= warning_fps {
            PerformanceStatus::Warning
        } else {
            PerformanceStatus::Critical
        }
    }

    pub fn color(self) -> Color {
        match self {
            PerformanceStatus::Good => STATUS_GOOD_COLOR,
            PerformanceStatus::Warning => STATUS_WARNING_COLOR,
            PerformanceStatus::Critical => STATUS_CRITICAL_COLOR,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PerformanceStatus::Good => "good",
            PerformanceStatus::Warning => "warning",
            PerformanceStatus::Critical => "critical",
        }
    }
}
