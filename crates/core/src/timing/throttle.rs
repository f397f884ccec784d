use crate::host::Clock;

/// Runs at most once per `limit_ms`; calls inside the window are dropped,
/// not queued. The first call always runs.
pub struct Throttle<F, C> {
    f: F,
    limit_ms: f64,
    clock: C,
    last_run: Option<f64>,
}

impl<F, C: Clock> Throttle<F, C> {
    pub fn new(f: F, limit_ms: f64, clock: C) -> Self {
        Self {
            f,
            limit_ms,
            clock,
            last_run: None,
        }
    }

    pub fn call<A, R>(&mut self, args: A) -> Option<R>
    where
        F: FnMut(A) -> R,
    {
        let now = self.clock.now_ms();
        if self.last_run.is_some_and(|last| now - last < self.limit_ms) {
            return None;
        }
        self.last_run = Some(now);
        Some((self.f)(args))
    }
}
