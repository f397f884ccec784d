use std::collections::HashMap;

use crate::host::Clock;

/// Time a single synchronous call of `f` and log the elapsed milliseconds.
///
/// The result, including any `Err`, is returned untouched; a panic in `f`
/// unwinds through without being logged.
pub fn measure<C: Clock + ?Sized, T>(clock: &C, label: &str, f: impl FnOnce() -> T) -> T {
    let (result, elapsed) = timed(clock, f);
    tracing::info!(label, elapsed_ms = %format!("{elapsed:.2}"), "measured");
    result
}

/// Run `f` once and return its result with the elapsed milliseconds.
///
/// Hosts without a tracing subscriber report the time themselves.
pub fn timed<C: Clock + ?Sized, T>(clock: &C, f: impl FnOnce() -> T) -> (T, f64) {
    let start = clock.now_ms();
    let result = f();
    (result, clock.now_ms() - start)
}

/// Accumulates elapsed time per label across repeated start/end pairs.
///
/// There is one start mark for the whole profiler: `start` ignores its label
/// and `end` charges the time since the most recent `start` to whatever
/// label it is given. Interleaved or nested segments are therefore
/// attributed to the segment that ends them.
#[derive(Debug, Clone)]
pub struct Profiler<C> {
    name: String,
    clock: C,
    started_at: Option<f64>,
    totals: HashMap<String, f64>,
}

impl<C: Clock> Profiler<C> {
    pub fn new(name: impl Into<String>, clock: C) -> Self {
        Self {
            name: name.into(),
            clock,
            started_at: None,
            totals: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start(&mut self, _label: &str) {
        self.started_at = Some(self.clock.now_ms());
    }

    /// Add the time since the last `start` to `label`'s total and return
    /// it. Without a prior `start` nothing is recorded.
    pub fn end(&mut self, label: &str) -> Option<f64> {
        let Some(started_at) = self.started_at else {
            tracing::debug!(profiler = %self.name, label, "end without start ignored");
            return None;
        };
        let elapsed = self.clock.now_ms() - started_at;
        *self.totals.entry(label.to_string()).or_insert(0.0) += elapsed;
        Some(elapsed)
    }

    pub fn total(&self, label: &str) -> Option<f64> {
        self.totals.get(label).copied()
    }

    /// Log every total, largest first, and return them in that order.
    pub fn report(&self) -> Vec<(String, f64)> {
        let mut rows: Vec<(String, f64)> = self
            .totals
            .iter()
            .map(|(label, total)| (label.clone(), *total))
            .collect();
        rows.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        tracing::info!(profiler = %self.name, entries = rows.len(), "profiler report");
        for (label, total) in &rows {
            tracing::info!(
                profiler = %self.name,
                label = %label,
                total_ms = %format!("{total:.2}"),
                "profiler entry"
            );
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::ManualClock;

    #[test]
    fn accumulates_per_label() {
        let clock = ManualClock::new(0.0);
        let mut p = Profiler::new("frame", clock.clone());

        for _ in 0..3 {
            p.start("physics");
            clock.advance(2.0);
            p.end("physics");
            p.start("render");
            clock.advance(5.0);
            p.end("render");
        }

        assert_eq!(p.total("physics"), Some(6.0));
        assert_eq!(p.total("render"), Some(15.0));
        assert_eq!(
            p.report(),
            vec![("render".to_string(), 15.0), ("physics".to_string(), 6.0)]
        );
    }

    #[test]
    fn start_mark_is_shared_across_labels() {
        let clock = ManualClock::new(0.0);
        let mut p = Profiler::new("nested", clock.clone());

        p.start("outer");
        clock.advance(10.0);
        p.start("inner");
        clock.advance(4.0);
        assert_eq!(p.end("inner"), Some(4.0));
        clock.advance(1.0);
        // Measured from the inner start, not the outer one.
        assert_eq!(p.end("outer"), Some(5.0));
    }

    #[test]
    fn end_without_start_records_nothing() {
        let mut p = Profiler::new("empty", ManualClock::new(0.0));
        assert_eq!(p.end("x"), None);
        assert!(p.report().is_empty());
    }

    #[test]
    fn measure_passes_through_value() {
        let clock = ManualClock::new(0.0);
        let v = measure(&clock, "sum", || {
            clock.advance(1.5);
            (1..=4).sum::<i32>()
        });
        assert_eq!(v, 10);
    }

    #[test]
    fn timed_reports_elapsed_and_error() {
        let clock = ManualClock::new(2.0);
        let (out, elapsed) = timed(&clock, || {
            clock.advance(3.25);
            "nan".parse::<u32>()
        });
        assert!(out.is_err());
        assert_eq!(elapsed, 3.25);
    }
}
