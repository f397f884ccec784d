//! Platform clock and RNG seed. `std::time::Instant` is unavailable on
//! wasm32-unknown-unknown, so the browser build reads `performance.now()`.

#[cfg(not(target_arch = "wasm32"))]
pub use resonador_core::host::SystemClock as HostClock;

#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct HostClock;

#[cfg(target_arch = "wasm32")]
impl HostClock {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(target_arch = "wasm32")]
impl resonador_core::host::Clock for HostClock {
    fn now_ms(&self) -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map_or(0.0, |p| p.now())
    }
}

/// Seed for the hint RNG.
#[cfg(target_arch = "wasm32")]
pub fn entropy_seed() -> u64 {
    (js_sys::Math::random() * u64::MAX as f64) as u64
}

#[cfg(not(target_arch = "wasm32"))]
pub fn entropy_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |d| d.as_nanos() as u64)
}
