pub mod config;
pub mod dialogue;
pub mod host;
pub mod perf;
pub mod pool;
pub mod scene;
pub mod svg;
pub mod timing;
pub mod views;

pub use config::{ConfigError, MonitorConfig, OverlayLayout};
pub use dialogue::{
    DialogueCursor, DialogueSession, GuardianRecord, Realm, RealmVisits, guardian, guardian_hint,
    guardian_intro,
};
pub use perf::{PerformanceMonitor, PerformanceStatus, Profiler, measure, timed};
pub use pool::{Pool, PoolKey};
