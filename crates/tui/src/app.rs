use crossterm::event::KeyCode;
use rand::Rng;
use resonador_core::host::{Clock, FrameQueue, SceneEvent, SystemClock};
use resonador_core::scene::SceneHandle;
use resonador_core::timing::{Debounce, Throttle};
use resonador_core::{DialogueSession, MonitorConfig, PerformanceMonitor, Realm, guardian};
use resonador_protocol::{RenderCommand, Viewport};

/// Minimum time between two hint draws.
const HINT_COOLDOWN_MS: f64 = 750.0;
/// Quiet period before a realm switch is logged as settled.
const REALM_SETTLE_MS: f64 = 400.0;

type HintPicker = Box<dyn FnMut(Realm) -> Option<&'static str>>;
type SettleLog = fn(Realm);

/// Game state driven by the terminal loop. Rendering and input are kept
/// out so the state can be stepped with a manual clock.
pub struct App<C: Clock + Clone = SystemClock> {
    session: DialogueSession,
    hints: Throttle<HintPicker, C>,
    settle: Debounce<SettleLog, Realm, C>,
    monitor: PerformanceMonitor<C>,
    frames: FrameQueue,
    scene: SceneHandle,
    quit: bool,
}

impl<C: Clock + Clone> App<C> {
    pub fn new<R: Rng + 'static>(
        clock: C,
        config: MonitorConfig,
        realm: Realm,
        mut rng: R,
        overlay: bool,
    ) -> Self {
        let picker: HintPicker = Box::new(move |realm| guardian(realm).hint(&mut rng));
        let settle: SettleLog = |realm| tracing::info!(%realm, "realm settled");
        let mut app = Self {
            session: DialogueSession::new(realm),
            hints: Throttle::new(picker, HINT_COOLDOWN_MS, clock.clone()),
            settle: Debounce::new(settle, REALM_SETTLE_MS, clock.clone()),
            monitor: PerformanceMonitor::with_config(clock, config),
            frames: FrameQueue::new(),
            scene: SceneHandle::new(),
            quit: false,
        };
        app.monitor.start(&mut app.frames);
        if overlay {
            app.toggle_overlay();
        }
        app
    }

    pub fn session(&self) -> &DialogueSession {
        &self.session
    }

    pub fn monitor(&self) -> &PerformanceMonitor<C> {
        &self.monitor
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    fn cycle_realm(&mut self, offset: isize) {
        self.session.cycle(offset);
        self.settle.call(self.session.realm());
    }

    /// Draw a fresh hint unless one was drawn within the cooldown.
    pub fn request_hint(&mut self) {
        if let Some(hint) = self.hints.call(self.session.realm()) {
            self.session.show_hint(hint);
        }
    }

    pub fn toggle_overlay(&mut self) {
        if self.monitor.has_overlay() {
            self.monitor.destroy_overlay();
        } else {
            self.monitor.create_overlay(self.scene.clone());
        }
    }

    pub fn toggle_sampling(&mut self) {
        if self.monitor.is_enabled() {
            self.monitor.stop();
        } else {
            self.monitor.start(&mut self.frames);
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            KeyCode::Left => self.cycle_realm(-1),
            KeyCode::Right => self.cycle_realm(1),
            KeyCode::Enter | KeyCode::Char(' ') => self.session.advance(),
            KeyCode::Char('h') => self.request_hint(),
            KeyCode::Char('o') => self.toggle_overlay(),
            KeyCode::Char('p') => self.toggle_sampling(),
            _ => {}
        }
    }

    /// One pass of the frame loop: run a pending sampling frame, fire any
    /// settled debounce, then let scene subscribers refresh.
    pub fn tick(&mut self) {
        if self.frames.take() {
            self.monitor.on_frame(&mut self.frames);
        }
        self.settle.poll();
        self.scene.dispatch(SceneEvent::Update, &mut self.monitor);
    }

    /// Everything on screen, back to front.
    pub fn commands(&self, viewport: &Viewport) -> Vec<RenderCommand> {
        let mut commands = self.session.commands(viewport);
        commands.extend(self.scene.borrow().render());
        commands
    }

    /// Tear down the scene; the overlay hears `Shutdown` first.
    pub fn shutdown(&mut self) {
        self.scene.shutdown(&mut self.monitor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use resonador_core::host::ManualClock;

    fn app(overlay: bool) -> (App<ManualClock>, ManualClock) {
        let clock = ManualClock::new(0.0);
        let app = App::new(
            clock.clone(),
            MonitorConfig::default(),
            Realm::Cosmos,
            StdRng::seed_from_u64(3),
            overlay,
        );
        (app, clock)
    }

    fn texts(commands: &[RenderCommand]) -> Vec<String> {
        commands
            .iter()
            .filter_map(|c| match c {
                RenderCommand::DrawText { text, .. } => Some(text.to_string()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn arrow_keys_switch_realm() {
        let (mut app, _) = app(false);
        app.handle_key(KeyCode::Left);
        assert_eq!(app.session().realm(), Realm::Psyche);
        app.handle_key(KeyCode::Right);
        app.handle_key(KeyCode::Right);
        assert_eq!(app.session().realm(), Realm::Chaos);
    }

    #[test]
    fn enter_pages_intro() {
        let (mut app, _) = app(false);
        let before = app.session().current_line();
        app.handle_key(KeyCode::Enter);
        assert_ne!(app.session().current_line(), before);
    }

    #[test]
    fn hints_are_throttled_and_cleared_on_realm_change() {
        let (mut app, clock) = app(false);
        app.handle_key(KeyCode::Char('h'));
        let first = app.session().hint();
        assert!(first.is_some_and(|h| guardian(Realm::Cosmos).hints.contains(&h)));

        clock.advance(100.0);
        app.handle_key(KeyCode::Char('h'));
        assert_eq!(app.session().hint(), first);

        app.handle_key(KeyCode::Right);
        assert_eq!(app.session().hint(), None);
        clock.advance(HINT_COOLDOWN_MS);
        app.handle_key(KeyCode::Char('h'));
        assert!(
            app.session()
                .hint()
                .is_some_and(|h| guardian(Realm::Chaos).hints.contains(&h))
        );
    }

    #[test]
    fn overlay_tracks_samples() {
        let (mut app, clock) = app(true);
        for _ in 0..60 {
            clock.advance(20.0);
            app.tick();
        }
        assert_eq!(app.monitor().fps(), 50);
        let shown = texts(&app.commands(&Viewport::new(800.0, 600.0)));
        assert!(shown.iter().any(|t| t == "FPS: 50"));
        assert!(shown.iter().any(|t| t == "Frame: 20.00ms"));
    }

    #[test]
    fn pause_freezes_readings() {
        let (mut app, clock) = app(false);
        clock.advance(20.0);
        app.tick();
        app.handle_key(KeyCode::Char('p'));
        let frames = app.monitor().frames();
        for _ in 0..5 {
            clock.advance(20.0);
            app.tick();
        }
        assert_eq!(app.monitor().frames(), frames);
        app.handle_key(KeyCode::Char('p'));
        clock.advance(20.0);
        app.tick();
        assert_eq!(app.monitor().frames(), 1);
    }

    #[test]
    fn overlay_toggle_and_shutdown() {
        let (mut app, _) = app(true);
        assert!(app.monitor().has_overlay());
        app.handle_key(KeyCode::Char('o'));
        assert!(!app.monitor().has_overlay());
        app.handle_key(KeyCode::Char('o'));
        assert!(app.monitor().has_overlay());
        app.shutdown();
        assert!(!app.monitor().has_overlay());
    }

    #[test]
    fn quit_keys() {
        let (mut app, _) = app(false);
        app.handle_key(KeyCode::Char('x'));
        assert!(!app.should_quit());
        app.handle_key(KeyCode::Char('q'));
        assert!(app.should_quit());
    }
}
