use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use resonador_core::host::{Clock, FrameScheduler, ListenerId};
use resonador_core::{MonitorConfig, PerformanceMonitor, Profiler, timed};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::scene::{JsScene, SceneAdapter, parse_event};

/// `performance.now()`.
#[derive(Clone)]
struct PerformanceClock(web_sys::Performance);

impl PerformanceClock {
    fn from_window() -> Result<Self, JsError> {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(PerformanceClock)
            .ok_or_else(|| JsError::new("performance.now() is not available"))
    }
}

impl Clock for PerformanceClock {
    fn now_ms(&self) -> f64 {
        self.0.now()
    }
}

impl std::fmt::Debug for PerformanceClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PerformanceClock")
    }
}

/// Records whether the monitor asked for another frame during a step. The
/// actual `requestAnimationFrame` call happens once the monitor borrow is
/// released.
#[derive(Default)]
struct RafRequest {
    requested: bool,
}

impl FrameScheduler for RafRequest {
    fn request_frame(&mut self) {
        self.requested = true;
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Id of the outstanding `requestAnimationFrame`, if any.
type PendingFrame = Rc<Cell<Option<i32>>>;

fn request_animation_frame(callback: &FrameCallback, pending: &PendingFrame) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Some(cb) = callback.borrow().as_ref() {
        match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
            Ok(id) => pending.set(Some(id)),
            Err(e) => web_sys::console::error_1(
                &format!("resonador: requestAnimationFrame failed: {e:?}").into(),
            ),
        }
    }
}

/// Frame-rate monitor sampling on `requestAnimationFrame`.
#[wasm_bindgen]
pub struct PerfMonitor {
    inner: Rc<RefCell<PerformanceMonitor<PerformanceClock>>>,
    frame: FrameCallback,
    pending: PendingFrame,
}

#[wasm_bindgen]
impl PerfMonitor {
    /// `config` is an optional JSON `MonitorConfig`; missing fields take
    /// their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: Option<String>) -> Result<PerfMonitor, JsError> {
        let config = match config {
            Some(json) => MonitorConfig::from_json(&json)?,
            None => MonitorConfig::default(),
        };
        let clock = PerformanceClock::from_window()?;
        Ok(PerfMonitor {
            inner: Rc::new(RefCell::new(PerformanceMonitor::with_config(clock, config))),
            frame: Rc::new(RefCell::new(None)),
            pending: Rc::new(Cell::new(None)),
        })
    }

    /// Begin sampling once per animation frame.
    pub fn start(&mut self) {
        if self.frame.borrow().is_none() {
            let inner = Rc::clone(&self.inner);
            // The slot owns this closure, so it only holds a weak handle back.
            let handle: Weak<_> = Rc::downgrade(&self.frame);
            let pending = Rc::clone(&self.pending);
            let step = Closure::<dyn FnMut()>::new(move || {
                pending.set(None);
                let mut raf = RafRequest::default();
                inner.borrow_mut().on_frame(&mut raf);
                if raf.requested
                    && let Some(handle) = handle.upgrade()
                {
                    request_animation_frame(&handle, &pending);
                }
            });
            *self.frame.borrow_mut() = Some(step);
        }

        let mut raf = RafRequest::default();
        self.inner.borrow_mut().start(&mut raf);
        if raf.requested {
            request_animation_frame(&self.frame, &self.pending);
        }
    }

    /// Stop after the frame already requested.
    pub fn stop(&mut self) {
        self.inner.borrow_mut().stop();
    }

    pub fn fps(&self) -> u32 {
        self.inner.borrow().fps()
    }

    #[wasm_bindgen(js_name = frameTime)]
    pub fn frame_time(&self) -> f64 {
        self.inner.borrow().frame_time()
    }

    /// `"good"`, `"warning"` or `"critical"`.
    pub fn status(&self) -> String {
        self.inner.borrow().status().as_str().to_string()
    }

    pub fn frames(&self) -> f64 {
        self.inner.borrow().frames() as f64
    }

    #[wasm_bindgen(js_name = createOverlay)]
    pub fn create_overlay(&mut self, scene: JsScene) {
        self.inner.borrow_mut().create_overlay(SceneAdapter(scene));
    }

    #[wasm_bindgen(js_name = updateOverlay)]
    pub fn update_overlay(&mut self) {
        self.inner.borrow_mut().update_overlay();
    }

    #[wasm_bindgen(js_name = destroyOverlay)]
    pub fn destroy_overlay(&mut self) {
        self.inner.borrow_mut().destroy_overlay();
    }

    /// Called by the scene adapter when a subscribed event fires.
    #[wasm_bindgen(js_name = handleSceneEvent)]
    pub fn handle_scene_event(&mut self, listener: u32, event: &str) -> Result<(), JsError> {
        let event = parse_event(event)?;
        self.inner
            .borrow_mut()
            .handle_scene_event(ListenerId(u64::from(listener)), event);
        Ok(())
    }

    /// Time one call of `f` and log it to the console. No tracing
    /// subscriber runs in the browser, so core's `measure` would log
    /// nothing here. Exceptions thrown by `f` propagate.
    pub fn measure(&self, label: &str, f: &js_sys::Function) -> Result<JsValue, JsValue> {
        let clock = self.inner.borrow().clock().clone();
        let (result, elapsed) = timed(&clock, || f.call0(&JsValue::NULL));
        web_sys::console::log_1(&format!("{label}: {elapsed:.2}ms").into());
        result
    }

    #[wasm_bindgen(js_name = createProfiler)]
    pub fn create_profiler(&self, name: &str) -> PerfProfiler {
        PerfProfiler(self.inner.borrow().create_profiler(name))
    }
}

impl Drop for PerfMonitor {
    /// Stops sampling and cancels the outstanding frame, since the closure
    /// it would call is freed along with the monitor.
    fn drop(&mut self) {
        self.inner.borrow_mut().stop();
        if let Some(id) = self.pending.take()
            && let Some(window) = web_sys::window()
            && let Err(e) = window.cancel_animation_frame(id)
        {
            web_sys::console::error_1(&format!("resonador: cancelAnimationFrame failed: {e:?}").into());
        }
    }
}

/// Label-keyed time accumulator. Shares a single start mark across labels.
#[wasm_bindgen]
pub struct PerfProfiler(Profiler<PerformanceClock>);

#[wasm_bindgen]
impl PerfProfiler {
    pub fn start(&mut self, label: &str) {
        self.0.start(label);
    }

    pub fn end(&mut self, label: &str) -> Option<f64> {
        self.0.end(label)
    }

    /// Totals sorted descending, as JSON `[[label, ms], ...]`; each entry is
    /// also written to the console.
    pub fn report(&self) -> Result<String, JsError> {
        let rows = self.0.report();
        for (label, total) in &rows {
            web_sys::console::log_1(&format!("[{}] {label}: {total:.2}ms", self.0.name()).into());
        }
        serde_json::to_string(&rows).map_err(|e| JsError::new(&e.to_string()))
    }
}
