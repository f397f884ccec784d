use resonador_protocol::{Color, FontFamily, Point, Rect};

use crate::config::OverlayLayout;
use crate::host::{ListenerId, NodeId, OverlayScene, SceneEvent, TextStyle};

use super::PerformanceStatus;

pub fn fps_label(fps: u32) -> String {
    format!("FPS: {fps}")
}

pub fn frame_time_label(frame_time_ms: f64) -> String {
    format!("Frame: {frame_time_ms:.2}ms")
}

/// Debug panel living in a host scene: a screen-fixed container holding a
/// background and two labels, plus the scene subscriptions that keep it
/// fresh and tear it down.
pub struct Overlay {
    scene: Box<dyn OverlayScene>,
    container: NodeId,
    fps_text: NodeId,
    frame_text: NodeId,
    update_listener: ListenerId,
    shutdown_listener: ListenerId,
}

impl Overlay {
    pub(crate) fn create(
        mut scene: Box<dyn OverlayScene>,
        layout: &OverlayLayout,
        fps: u32,
        frame_time_ms: f64,
        status: PerformanceStatus,
    ) -> Self {
        let container = scene.add_container(Point::new(layout.x, layout.y), layout.depth, 0.0);
        scene.add_rect(
            container,
            Rect::new(0.0, 0.0, layout.width, layout.height),
            Color::BLACK.with_alpha(layout.background_alpha),
        );
        let fps_text = scene.add_text(
            container,
            Point::new(layout.padding, layout.padding),
            &fps_label(fps),
            TextStyle {
                font_size: layout.fps_font_size,
                font: FontFamily::Monospace,
                color: status.color(),
            },
        );
        let frame_text = scene.add_text(
            container,
            Point::new(
                layout.padding,
                layout.padding + layout.fps_font_size + layout.line_gap,
            ),
            &frame_time_label(frame_time_ms),
            TextStyle {
                font_size: layout.frame_font_size,
                font: FontFamily::Monospace,
                color: Color::WHITE,
            },
        );
        let update_listener = scene.subscribe(SceneEvent::Update);
        let shutdown_listener = scene.subscribe(SceneEvent::Shutdown);

        Self {
            scene,
            container,
            fps_text,
            frame_text,
            update_listener,
            shutdown_listener,
        }
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    pub fn update_listener(&self) -> ListenerId {
        self.update_listener
    }

    pub fn shutdown_listener(&self) -> ListenerId {
        self.shutdown_listener
    }

    pub(crate) fn refresh(&mut self, fps: u32, frame_time_ms: f64, status: PerformanceStatus) {
        self.scene.set_text(self.fps_text, &fps_label(fps), status.color());
        self.scene.set_text(self.frame_text, &frame_time_label(frame_time_ms), Color::WHITE);
    }

    /// Unsubscribe and destroy the container with its children.
    pub(crate) fn destroy(mut self) {
        self.scene.unsubscribe(self.update_listener);
        self.scene.unsubscribe(self.shutdown_listener);
        self.scene.destroy(self.container);
    }
}

impl std::fmt::Debug for Overlay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Overlay")
            .field("container", &self.container)
            .field("update_listener", &self.update_listener)
            .field("shutdown_listener", &self.shutdown_listener)
            .finish_non_exhaustive()
    }
}
