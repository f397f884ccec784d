use eframe::egui;
use rand::SeedableRng;
use rand::rngs::StdRng;
use resonador_core::host::{Clock, FrameQueue, SceneEvent};
use resonador_core::scene::SceneHandle;
use resonador_core::timing::{Throttle, UiLimiter};
use resonador_core::views::{DIALOGUE_BOX_HEIGHT, realm_tab_at};
use resonador_core::{DialogueSession, PerformanceMonitor, Profiler, Realm, guardian};
use resonador_protocol::{Point, ThemeToken, Viewport};

use crate::clock::{HostClock, entropy_seed};
use crate::renderer;
use crate::ripples::Ripples;
use crate::theme::{self, ThemeMode};

/// Minimum time between two hint draws.
const HINT_COOLDOWN_MS: f64 = 750.0;

type HintPicker = Box<dyn FnMut(Realm) -> Option<&'static str>>;

/// Main application state.
pub struct ResonadorApp {
    clock: HostClock,
    session: DialogueSession,
    hints: Throttle<HintPicker, HostClock>,
    monitor: PerformanceMonitor<HostClock>,
    /// Sampling frames asked for by the monitor; drained once per egui pass.
    frames: FrameQueue,
    scene: SceneHandle,
    profiler: Profiler<HostClock>,
    /// Caps how often the side-panel readout is reformatted.
    readout_limiter: UiLimiter<HostClock>,
    readout: String,
    ripples: Ripples,
    theme_mode: ThemeMode,
}

impl ResonadorApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let theme_mode = ThemeMode::Dark;
        cc.egui_ctx.set_visuals(theme_mode.visuals());
        theme::apply_typography(&cc.egui_ctx);

        let clock = HostClock::new();
        let mut rng = StdRng::seed_from_u64(entropy_seed());
        let picker: HintPicker = Box::new(move |realm| guardian(realm).hint(&mut rng));
        let mut monitor = PerformanceMonitor::new(clock);
        let mut frames = FrameQueue::new();
        let scene = SceneHandle::new();
        monitor.start(&mut frames);
        monitor.create_overlay(scene.clone());

        Self {
            clock,
            session: DialogueSession::new(Realm::Cosmos),
            hints: Throttle::new(picker, HINT_COOLDOWN_MS, clock),
            profiler: monitor.create_profiler("frame"),
            monitor,
            frames,
            scene,
            readout_limiter: UiLimiter::new(clock),
            readout: String::new(),
            ripples: Ripples::new(),
            theme_mode,
        }
    }

    fn enter_realm(&mut self, realm: Realm) {
        if realm == self.session.realm() {
            return;
        }
        let session = &mut self.session;
        self.monitor.measure("enter realm", || session.enter(realm));
        tracing::info!(%realm, "realm selected");
    }

    fn cycle_realm(&mut self, offset: isize) {
        self.enter_realm(self.session.realm().offset(offset));
    }

    fn request_hint(&mut self) {
        if let Some(hint) = self.hints.call(self.session.realm()) {
            self.session.show_hint(hint);
        }
    }

    fn toggle_overlay(&mut self) {
        if self.monitor.has_overlay() {
            self.monitor.destroy_overlay();
        } else {
            self.monitor.create_overlay(self.scene.clone());
        }
    }

    fn toggle_sampling(&mut self) {
        if self.monitor.is_enabled() {
            self.monitor.stop();
        } else {
            self.monitor.start(&mut self.frames);
        }
    }

    /// Run the sampling frame the monitor asked for, then let the overlay
    /// refresh from the scene's update event.
    fn step_monitor(&mut self, ctx: &egui::Context) {
        if self.frames.take() {
            self.monitor.on_frame(&mut self.frames);
        }
        self.scene.dispatch(SceneEvent::Update, &mut self.monitor);
        if self.frames.pending() > 0 {
            ctx.request_repaint();
        }

        let monitor = &self.monitor;
        let readout = &mut self.readout;
        self.readout_limiter.run(|| {
            *readout = format!(
                "{} fps · {:.2} ms · {}",
                monitor.fps(),
                monitor.frame_time(),
                monitor.status().as_str()
            );
        });
    }

    fn handle_keys(&mut self, ctx: &egui::Context) {
        let (left, right, next, hint, overlay, pause) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::ArrowLeft),
                i.key_pressed(egui::Key::ArrowRight),
                i.key_pressed(egui::Key::Enter) || i.key_pressed(egui::Key::Space),
                i.key_pressed(egui::Key::H),
                i.key_pressed(egui::Key::O),
                i.key_pressed(egui::Key::P),
            )
        });
        if left {
            self.cycle_realm(-1);
        }
        if right {
            self.cycle_realm(1);
        }
        if next {
            self.session.advance();
        }
        if hint {
            self.request_hint();
        }
        if overlay {
            self.toggle_overlay();
        }
        if pause {
            self.toggle_sampling();
        }
    }

    fn side_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("realms")
            .resizable(false)
            .show(ctx, |ui| {
                ui.heading("Resonador");
                ui.separator();

                let current = self.session.realm();
                for realm in Realm::ALL {
                    let g = guardian(realm);
                    if ui
                        .selectable_label(realm == current, realm.id())
                        .on_hover_text(format!("{} · {}", g.name, g.title))
                        .clicked()
                    {
                        self.enter_realm(realm);
                    }
                }

                ui.separator();
                if ui.button("Siguiente ⏎").clicked() {
                    self.session.advance();
                }
                if ui.button("Pista (h)").clicked() {
                    self.request_hint();
                }

                ui.separator();
                ui.label(egui::RichText::new(&self.readout).monospace());
                let overlay_label = if self.monitor.has_overlay() {
                    "Ocultar FPS (o)"
                } else {
                    "Mostrar FPS (o)"
                };
                if ui.button(overlay_label).clicked() {
                    self.toggle_overlay();
                }
                let sampling_label = if self.monitor.is_enabled() {
                    "Pausar muestreo (p)"
                } else {
                    "Reanudar muestreo (p)"
                };
                if ui.button(sampling_label).clicked() {
                    self.toggle_sampling();
                }
                if ui.button("Informe del profiler").clicked() {
                    let rows = self.profiler.report();
                    tracing::info!(rows = rows.len(), "profiler report requested");
                }

                ui.separator();
                let theme_label = match self.theme_mode {
                    ThemeMode::Dark => "🌙 Oscuro",
                    ThemeMode::Light => "☀ Claro",
                };
                if ui.button(theme_label).clicked() {
                    self.theme_mode = self.theme_mode.toggled();
                    ctx.set_visuals(self.theme_mode.visuals());
                }
            });
    }

    fn scene_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let available = ui.available_rect_before_wrap();
                let response = ui.allocate_rect(available, egui::Sense::click());
                let viewport = Viewport::new(
                    f64::from(available.width()),
                    f64::from(available.height()),
                );

                if response.clicked()
                    && let Some(pos) = response.interact_pointer_pos()
                {
                    let local = Point::new(
                        f64::from(pos.x - available.min.x),
                        f64::from(pos.y - available.min.y),
                    );
                    if let Some(realm) = realm_tab_at(local, &viewport) {
                        self.enter_realm(realm);
                    } else if local.y >= viewport.height - DIALOGUE_BOX_HEIGHT {
                        self.session.advance();
                    } else {
                        self.ripples.spawn(pos, self.clock.now_ms());
                    }
                }

                self.profiler.start("layout");
                let mut commands = self.session.commands(&viewport);
                commands.extend(self.scene.borrow().render());
                self.profiler.end("layout");

                self.profiler.start("paint");
                let painter = ui.painter_at(available);
                painter.rect_filled(
                    available,
                    egui::CornerRadius::ZERO,
                    theme::resolve(ThemeToken::Background, self.theme_mode),
                );
                let now = self.clock.now_ms();
                self.ripples.expire(now);
                self.ripples.paint(
                    &painter,
                    now,
                    theme::resolve(ThemeToken::DialogueBorder, self.theme_mode),
                );
                renderer::render_commands(&painter, &commands, available.min, self.theme_mode);
                self.profiler.end("paint");

                if !self.ripples.is_empty() {
                    ctx.request_repaint();
                }
            });
    }
}

impl eframe::App for ResonadorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.step_monitor(ctx);
        self.handle_keys(ctx);
        self.side_panel(ctx);
        self.scene_panel(ctx);
    }
}

impl Drop for ResonadorApp {
    fn drop(&mut self) {
        self.scene.shutdown(&mut self.monitor);
    }
}
