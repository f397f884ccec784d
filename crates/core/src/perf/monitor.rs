use std::collections::VecDeque;

use crate::config::MonitorConfig;
use crate::host::{
    Clock, FrameScheduler, ListenerId, OverlayScene, SceneEvent, SceneListener, SystemClock,
};

use super::PerformanceStatus;
use super::overlay::Overlay;
use super::profiler::{self, Profiler};

/// Smoothed frame-rate tracker with an optional on-screen overlay.
///
/// Sampling and the overlay are independent: the monitor can sample with no
/// overlay, and an overlay can show stale values while sampling is stopped.
/// Construct one per render loop and hand it to whatever drives frames.
#[derive(Debug)]
pub struct PerformanceMonitor<C: Clock = SystemClock> {
    clock: C,
    config: MonitorConfig,
    fps: u32,
    frame_time: f64,
    delta_history: VecDeque<f64>,
    last_time: f64,
    enabled: bool,
    frames: u64,
    overlay: Option<Overlay>,
}

impl Default for PerformanceMonitor<SystemClock> {
    fn default() -> Self {
        Self::new(SystemClock::new())
    }
}

impl<C: Clock> PerformanceMonitor<C> {
    pub fn new(clock: C) -> Self {
        Self::with_config(clock, MonitorConfig::default())
    }

    pub fn with_config(clock: C, config: MonitorConfig) -> Self {
        let config = config.normalized();
        let last_time = clock.now_ms();
        Self {
            clock,
            fps: config.initial_fps,
            frame_time: 1000.0 / f64::from(config.initial_fps.max(1)),
            delta_history: VecDeque::with_capacity(config.window + 1),
            last_time,
            enabled: false,
            frames: 0,
            overlay: None,
            config,
        }
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Re-anchor the clock and ask the host for the first sampling frame.
    pub fn start(&mut self, scheduler: &mut dyn FrameScheduler) {
        self.enabled = true;
        self.frames = 0;
        self.last_time = self.clock.now_ms();
        tracing::debug!("performance sampling started");
        scheduler.request_frame();
    }

    /// Stop rescheduling. A frame already requested still arrives at
    /// [`on_frame`](Self::on_frame) but takes no sample.
    pub fn stop(&mut self) {
        self.enabled = false;
        tracing::debug!(frames = self.frames, "performance sampling stopped");
    }

    /// One step of the sampling loop, called by the host once per requested
    /// frame. Samples and requests the next frame while enabled.
    pub fn on_frame(&mut self, scheduler: &mut dyn FrameScheduler) {
        if !self.enabled {
            return;
        }
        self.update();
        scheduler.request_frame();
    }

    /// Take one sample: push the delta since the previous sample into the
    /// window and recompute the averages.
    pub fn update(&mut self) {
        let now = self.clock.now_ms();
        let delta = now - self.last_time;
        self.last_time = now;

        self.delta_history.push_back(delta);
        while self.delta_history.len() > self.config.window {
            self.delta_history.pop_front();
        }

        let avg = self.delta_history.iter().sum::<f64>() / self.delta_history.len() as f64;
        self.frame_time = avg;
        self.fps = fps_from_average(avg, self.config.max_fps);
        self.frames += 1;

        tracing::trace!(delta, avg, fps = self.fps, "frame sampled");
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Smoothed frame duration in milliseconds, rounded to 2 decimals.
    pub fn frame_time(&self) -> f64 {
        (self.frame_time * 100.0).round() / 100.0
    }

    pub fn status(&self) -> PerformanceStatus {
        PerformanceStatus::classify(self.fps, self.config.good_fps, self.config.warning_fps)
    }

    /// Deltas currently in the window, oldest first.
    pub fn delta_history(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        self.delta_history.iter().copied()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn has_overlay(&self) -> bool {
        self.overlay.is_some()
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    /// Build the overlay in `scene`, replacing any existing one.
    pub fn create_overlay<S: OverlayScene + 'static>(&mut self, scene: S) {
        self.destroy_overlay();
        let overlay = Overlay::create(
            Box::new(scene),
            &self.config.overlay,
            self.fps,
            self.frame_time(),
            self.status(),
        );
        tracing::debug!(container = ?overlay.container(), "overlay created");
        self.overlay = Some(overlay);
    }

    /// Rewrite the overlay labels from the current readings. No-op without
    /// an overlay.
    pub fn update_overlay(&mut self) {
        let (fps, frame_time, status) = (self.fps, self.frame_time(), self.status());
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.refresh(fps, frame_time, status);
        }
    }

    /// Unsubscribe from the scene and destroy the overlay nodes. Safe to
    /// call repeatedly and after the scene has shut down.
    pub fn destroy_overlay(&mut self) {
        if let Some(overlay) = self.overlay.take() {
            tracing::debug!(container = ?overlay.container(), "overlay destroyed");
            overlay.destroy();
        }
    }

    /// Route a scene event to the overlay that subscribed to it. Events for
    /// listeners the current overlay does not own are dropped.
    pub fn handle_scene_event(&mut self, listener: ListenerId, event: SceneEvent) {
        let Some((update, shutdown)) = self
            .overlay
            .as_ref()
            .map(|o| (o.update_listener(), o.shutdown_listener()))
        else {
            return;
        };
        match event {
            SceneEvent::Update if listener == update => self.update_overlay(),
            SceneEvent::Shutdown if listener == shutdown => self.destroy_overlay(),
            _ => {}
        }
    }

    /// Time one call of `f`, log it under `label`, return its result.
    pub fn measure<T>(&self, label: &str, f: impl FnOnce() -> T) -> T {
        profiler::measure(&self.clock, label, f)
    }
}

impl<C: Clock + Clone> PerformanceMonitor<C> {
    pub fn create_profiler(&self, name: impl Into<String>) -> Profiler<C> {
        Profiler::new(name, self.clock.clone())
    }
}

impl<C: Clock> SceneListener for PerformanceMonitor<C> {
    fn on_scene_event(&mut self, listener: ListenerId, event: SceneEvent) {
        self.handle_scene_event(listener, event);
    }
}

/// `round(1000 / avg)`, capped at `max_fps`. A zero, negative or non-finite
/// average reports `max_fps`.
pub fn fps_from_average(avg_delta_ms: f64, max_fps: u32) -> u32 {
    if avg_delta_ms.is_nan() || avg_delta_ms <= 0.0 {
        return max_fps;
    }
    let fps = (1000.0 / avg_delta_ms).round();
    if !fps.is_finite() || fps >= f64::from(max_fps) {
        max_fps
    } else {
        fps as u32
    }
}
