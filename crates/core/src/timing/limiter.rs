use crate::host::Clock;

/// Minimum spacing between UI refreshes: 30 per second.
pub const UI_UPDATE_INTERVAL_MS: f64 = 1000.0 / 30.0;

/// Gate for cosmetic UI updates that do not need to run every frame.
#[derive(Debug, Clone)]
pub struct UiLimiter<C> {
    clock: C,
    interval_ms: f64,
    last_run: Option<f64>,
}

impl<C: Clock> UiLimiter<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            interval_ms: UI_UPDATE_INTERVAL_MS,
            last_run: None,
        }
    }

    /// Run `callback` if the interval has elapsed since the last run.
    /// Returns whether it ran.
    pub fn run(&mut self, callback: impl FnOnce()) -> bool {
        let now = self.clock.now_ms();
        if self
            .last_run
            .is_some_and(|last| now - last < self.interval_ms)
        {
            return false;
        }
        self.last_run = Some(now);
        callback();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::ManualClock;

    #[test]
    fn limits_to_thirty_per_second() {
        let clock = ManualClock::new(0.0);
        let mut limiter = UiLimiter::new(clock.clone());
        let mut redraws = 0;

        // One simulated second in 1ms steps. Runs land every 34ms.
        for _ in 0..1000 {
            limiter.run(|| redraws += 1);
            clock.advance(1.0);
        }
        assert_eq!(redraws, 30);
    }

    #[test]
    fn boundary_is_inclusive() {
        let clock = ManualClock::new(0.0);
        let mut limiter = UiLimiter::new(clock.clone());
        assert!(limiter.run(|| {}));
        clock.set(33.0);
        assert!(!limiter.run(|| {}));
        clock.set(UI_UPDATE_INTERVAL_MS);
        assert!(limiter.run(|| {}));
    }

    #[test]
    fn drops_until_interval_elapses() {
        let clock = ManualClock::new(0.0);
        let mut limiter = UiLimiter::new(clock.clone());
        assert!(limiter.run(|| {}));
        clock.advance(20.0);
        assert!(!limiter.run(|| {}));
        clock.advance(14.0);
        assert!(limiter.run(|| {}));
    }
}
