use crate::host::Clock;

/// Collapses a burst of calls into one, run `delay_ms` after the last call
/// with that call's arguments.
pub struct Debounce<F, A, C> {
    f: F,
    delay_ms: f64,
    clock: C,
    pending: Option<(A, f64)>,
}

impl<F, A, R, C> Debounce<F, A, C>
where
    F: FnMut(A) -> R,
    C: Clock,
{
    pub fn new(f: F, delay_ms: f64, clock: C) -> Self {
        Self {
            f,
            delay_ms,
            clock,
            pending: None,
        }
    }

    /// Replace any pending call and push its deadline to `now + delay_ms`.
    pub fn call(&mut self, args: A) {
        let deadline = self.clock.now_ms() + self.delay_ms;
        self.pending = Some((args, deadline));
    }

    /// Run the pending call if its deadline has passed.
    pub fn poll(&mut self) -> Option<R> {
        let deadline = self.pending.as_ref()?.1;
        if self.clock.now_ms() < deadline {
            return None;
        }
        let (args, _) = self.pending.take()?;
        Some((self.f)(args))
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::ManualClock;

    #[test]
    fn burst_runs_once_with_last_args() {
        let clock = ManualClock::new(0.0);
        let mut seen = Vec::new();
        let mut search = Debounce::new(|q: &str| seen.push(q.to_string()), 100.0, clock.clone());

        for q in ["c", "co", "cos", "cosm", "cosmos"] {
            search.call(q);
            clock.advance(10.0);
            assert_eq!(search.poll(), None);
        }
        // 10ms since the last call, which was at t=40.
        assert!(search.is_pending());
        clock.advance(89.0);
        assert_eq!(search.poll(), None);
        clock.advance(1.0);
        assert_eq!(search.poll(), Some(()));
        assert_eq!(search.poll(), None);
        drop(search);

        assert_eq!(seen, vec!["cosmos".to_string()]);
    }

    #[test]
    fn cancel_drops_pending_call() {
        let clock = ManualClock::new(0.0);
        let mut calls = 0;
        let mut d = Debounce::new(|()| calls += 1, 50.0, clock.clone());
        d.call(());
        d.cancel();
        clock.advance(100.0);
        assert_eq!(d.poll(), None);
        drop(d);
        assert_eq!(calls, 0);
    }

    #[test]
    fn separate_windows_each_fire() {
        let clock = ManualClock::new(0.0);
        let mut d = Debounce::new(|n: u32| n * 2, 20.0, clock.clone());
        d.call(1);
        clock.advance(25.0);
        assert_eq!(d.poll(), Some(2));
        d.call(7);
        clock.advance(25.0);
        assert_eq!(d.poll(), Some(14));
    }
}
