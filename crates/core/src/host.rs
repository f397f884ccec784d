//! Capabilities the embedding engine provides: a monotonic clock, a
//! once-per-frame callback, and a scene that can hold display nodes and
//! dispatch lifecycle events.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

use resonador_protocol::{Color, FontFamily, Point, Rect};
use serde::{Deserialize, Serialize};

/// Monotonic high-resolution clock in milliseconds.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// `Instant`-backed clock; milliseconds since construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Hand-driven clock. Clones share the same reading, so a test can keep one
/// copy and advance time under a monitor or throttle that owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn set(&self, ms: f64) {
        self.now.set(ms);
    }

    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

/// "Call me back before the next frame is presented." One-shot: every
/// request yields at most one callback.
pub trait FrameScheduler {
    fn request_frame(&mut self);
}

/// Headless scheduler that only counts outstanding requests. The owner of
/// the loop drains it with [`FrameQueue::take`] once per frame.
#[derive(Debug, Default)]
pub struct FrameQueue {
    pending: usize,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Consume one request. Returns `false` when nothing was scheduled.
    pub fn take(&mut self) -> bool {
        if self.pending == 0 {
            return false;
        }
        self.pending -= 1;
        true
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self) {
        self.pending += 1;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ListenerId(pub u64);

/// Scene lifecycle events a listener can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SceneEvent {
    /// Fired once per rendered frame.
    Update,
    /// Fired when the scene is torn down.
    Shutdown,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font_size: f64,
    pub font: FontFamily,
    pub color: Color,
}

/// Display and event surface of a host scene.
///
/// Containers are positioned and depth-ordered; a `scroll_factor` of `0.0`
/// pins them to the screen regardless of camera scroll. Destroying a
/// container destroys its children. Operations on unknown nodes or
/// listeners do nothing.
pub trait OverlayScene {
    fn add_container(&mut self, position: Point, depth: i32, scroll_factor: f64) -> NodeId;
    fn add_rect(&mut self, parent: NodeId, rect: Rect, fill: Color) -> NodeId;
    fn add_text(&mut self, parent: NodeId, position: Point, text: &str, style: TextStyle)
    -> NodeId;
    fn set_text(&mut self, node: NodeId, text: &str, color: Color);
    fn destroy(&mut self, node: NodeId);
    fn subscribe(&mut self, event: SceneEvent) -> ListenerId;
    fn unsubscribe(&mut self, listener: ListenerId);
}

/// Receiver side of scene event dispatch.
pub trait SceneListener {
    fn on_scene_event(&mut self, listener: ListenerId, event: SceneEvent);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::new(5.0);
        let other = clock.clone();
        clock.advance(10.0);
        assert_eq!(other.now_ms(), 15.0);
        other.set(1.0);
        assert_eq!(clock.now_ms(), 1.0);
    }

    #[test]
    fn system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b >= a);
        assert!(a >= 0.0);
    }

    #[test]
    fn frame_queue_is_one_shot_per_request() {
        let mut q = FrameQueue::new();
        assert!(!q.take());
        q.request_frame();
        q.request_frame();
        assert_eq!(q.pending(), 2);
        assert!(q.take());
        assert!(q.take());
        assert!(!q.take());
    }
}
