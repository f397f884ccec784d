use resonador_core::host::{ListenerId, NodeId, OverlayScene, SceneEvent, TextStyle};
use resonador_protocol::{Color, FontFamily, Point, Rect};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(typescript_custom_section)]
const SCENE_TS: &str = r#"
export interface ResonadorScene {
    addContainer(x: number, y: number, depth: number, scrollFactor: number): number;
    addRect(parent: number, x: number, y: number, w: number, h: number, color: number, alpha: number): number;
    addText(parent: number, x: number, y: number, text: string, fontSize: number, fontFamily: string, color: string): number;
    setText(node: number, text: string, color: string): void;
    destroy(node: number): void;
    subscribe(event: "update" | "shutdown"): number;
    unsubscribe(listener: number): void;
}
"#;

#[wasm_bindgen]
extern "C" {
    /// JS adapter around an engine scene. Node and listener ids are small
    /// integers chosen by the adapter.
    #[wasm_bindgen(typescript_type = "ResonadorScene")]
    pub type JsScene;

    #[wasm_bindgen(method, js_name = addContainer)]
    fn js_add_container(this: &JsScene, x: f64, y: f64, depth: i32, scroll_factor: f64) -> u32;

    #[wasm_bindgen(method, js_name = addRect)]
    fn js_add_rect(
        this: &JsScene,
        parent: u32,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        color: u32,
        alpha: f32,
    ) -> u32;

    #[wasm_bindgen(method, js_name = addText)]
    fn js_add_text(
        this: &JsScene,
        parent: u32,
        x: f64,
        y: f64,
        text: &str,
        font_size: f64,
        font_family: &str,
        color: &str,
    ) -> u32;

    #[wasm_bindgen(method, js_name = setText)]
    fn js_set_text(this: &JsScene, node: u32, text: &str, color: &str);

    #[wasm_bindgen(method, js_name = destroy)]
    fn js_destroy(this: &JsScene, node: u32);

    #[wasm_bindgen(method, js_name = subscribe)]
    fn js_subscribe(this: &JsScene, event: &str) -> u32;

    #[wasm_bindgen(method, js_name = unsubscribe)]
    fn js_unsubscribe(this: &JsScene, listener: u32);
}

pub(crate) fn event_name(event: SceneEvent) -> &'static str {
    match event {
        SceneEvent::Update => "update",
        SceneEvent::Shutdown => "shutdown",
    }
}

pub(crate) fn parse_event(name: &str) -> Result<SceneEvent, JsError> {
    match name {
        "update" => Ok(SceneEvent::Update),
        "shutdown" => Ok(SceneEvent::Shutdown),
        _ => Err(JsError::new(&format!("unknown scene event: {name}"))),
    }
}

fn rgb(color: Color) -> u32 {
    let [r, g, b, _] = color.to_rgba8();
    (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
}

fn js_id(id: u64) -> u32 {
    u32::try_from(id).unwrap_or(u32::MAX)
}

/// [`OverlayScene`] over a JS scene adapter.
pub(crate) struct SceneAdapter(pub(crate) JsScene);

impl OverlayScene for SceneAdapter {
    fn add_container(&mut self, position: Point, depth: i32, scroll_factor: f64) -> NodeId {
        NodeId(u64::from(self.0.js_add_container(
            position.x,
            position.y,
            depth,
            scroll_factor,
        )))
    }

    fn add_rect(&mut self, parent: NodeId, rect: Rect, fill: Color) -> NodeId {
        NodeId(u64::from(self.0.js_add_rect(
            js_id(parent.0),
            rect.x,
            rect.y,
            rect.w,
            rect.h,
            rgb(fill),
            fill.a,
        )))
    }

    fn add_text(
        &mut self,
        parent: NodeId,
        position: Point,
        text: &str,
        style: TextStyle,
    ) -> NodeId {
        let family = match style.font {
            FontFamily::Monospace => "monospace",
            FontFamily::Proportional => "sans-serif",
        };
        NodeId(u64::from(self.0.js_add_text(
            js_id(parent.0),
            position.x,
            position.y,
            text,
            style.font_size,
            family,
            &style.color.to_css_hex(),
        )))
    }

    fn set_text(&mut self, node: NodeId, text: &str, color: Color) {
        self.0.js_set_text(js_id(node.0), text, &color.to_css_hex());
    }

    fn destroy(&mut self, node: NodeId) {
        self.0.js_destroy(js_id(node.0));
    }

    fn subscribe(&mut self, event: SceneEvent) -> ListenerId {
        ListenerId(u64::from(self.0.js_subscribe(event_name(event))))
    }

    fn unsubscribe(&mut self, listener: ListenerId) {
        self.0.js_unsubscribe(js_id(listener.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_rgb() {
        assert_eq!(rgb(Color::from_hex(0xffaa00)), 0xffaa00);
        assert_eq!(rgb(Color::BLACK.with_alpha(0.7)), 0);
    }

    #[test]
    fn event_names_roundtrip() {
        for event in [SceneEvent::Update, SceneEvent::Shutdown] {
            assert!(parse_event(event_name(event)).is_ok_and(|e| e == event));
        }
    }
}
