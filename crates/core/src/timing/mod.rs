//! Clock-driven call gates. Nothing here spawns timers: the host polls them
//! from its frame loop, which keeps them usable on single-threaded targets.

pub mod debounce;
pub mod limiter;
pub mod throttle;

pub use debounce::Debounce;
pub use limiter::{UI_UPDATE_INTERVAL_MS, UiLimiter};
pub use throttle::Throttle;
