use egui::{Color32, Painter, Pos2, Stroke};
use resonador_core::{Pool, PoolKey};

const RIPPLE_LIFETIME_MS: f64 = 700.0;
const RIPPLE_MAX_RADIUS: f32 = 48.0;

#[derive(Debug, Clone, Copy, Default)]
struct Ripple {
    center: Pos2,
    born_ms: f64,
}

/// Expanding rings left by clicks on the scene. Rings are recycled through
/// a [`Pool`] instead of being allocated per click.
pub struct Ripples {
    pool: Pool<Ripple, fn() -> Ripple>,
    live: Vec<PoolKey>,
}

impl Default for Ripples {
    fn default() -> Self {
        Self::new()
    }
}

impl Ripples {
    pub fn new() -> Self {
        Self {
            pool: Pool::with_factory(Ripple::default as fn() -> Ripple),
            live: Vec::new(),
        }
    }

    pub fn spawn(&mut self, center: Pos2, now_ms: f64) {
        let key = self.pool.acquire();
        if let Some(ripple) = self.pool.get_mut(key) {
            *ripple = Ripple {
                center,
                born_ms: now_ms,
            };
        }
        self.live.push(key);
    }

    /// Return finished rings to the pool.
    pub fn expire(&mut self, now_ms: f64) {
        let pool = &mut self.pool;
        self.live.retain(|key| {
            let alive = pool
                .get(*key)
                .is_some_and(|r| now_ms - r.born_ms < RIPPLE_LIFETIME_MS);
            if !alive {
                pool.release(*key);
            }
            alive
        });
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn paint(&self, painter: &Painter, now_ms: f64, color: Color32) {
        for key in &self.live {
            let Some(ripple) = self.pool.get(*key) else {
                continue;
            };
            let t = ((now_ms - ripple.born_ms) / RIPPLE_LIFETIME_MS).clamp(0.0, 1.0) as f32;
            painter.circle_stroke(
                ripple.center,
                RIPPLE_MAX_RADIUS * t,
                Stroke::new(2.0, color.gamma_multiply(1.0 - t)),
            );
        }
    }

    #[cfg(test)]
    fn free(&self) -> usize {
        self.pool.size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resonador_core::pool::DEFAULT_POOL_SIZE;

    #[test]
    fn finished_rings_go_back_to_pool() {
        let mut ripples = Ripples::new();
        ripples.spawn(Pos2::new(10.0, 10.0), 0.0);
        ripples.spawn(Pos2::new(20.0, 10.0), 300.0);
        assert_eq!(ripples.free(), DEFAULT_POOL_SIZE - 2);

        ripples.expire(800.0);
        assert!(!ripples.is_empty());
        assert_eq!(ripples.free(), DEFAULT_POOL_SIZE - 1);

        ripples.expire(1_000.0);
        assert!(ripples.is_empty());
        assert_eq!(ripples.free(), DEFAULT_POOL_SIZE);
    }

    #[test]
    fn bursts_grow_the_pool() {
        let mut ripples = Ripples::new();
        for i in 0..(DEFAULT_POOL_SIZE + 3) {
            ripples.spawn(Pos2::ZERO, i as f64);
        }
        assert_eq!(ripples.free(), 0);
        ripples.expire(10_000.0);
        assert_eq!(ripples.free(), DEFAULT_POOL_SIZE + 3);
    }
}
