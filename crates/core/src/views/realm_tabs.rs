use resonador_protocol::{
    FontFamily, Paint, Point, Rect, RenderCommand, SharedStr, TextAlign, ThemeToken, Viewport,
};

use super::DIALOGUE_DEPTH;
use crate::dialogue::Realm;

pub const REALM_TAB_HEIGHT: f64 = 24.0;
const FONT_SIZE: f64 = 11.0;

fn tab_width(viewport: &Viewport) -> f64 {
    viewport.width / Realm::ALL.len() as f64
}

/// One tab per realm across the top of the viewport, `active` highlighted.
pub fn render_realm_tabs(active: Realm, viewport: &Viewport) -> Vec<RenderCommand> {
    let w = tab_width(viewport);
    if w <= 0.0 {
        return Vec::new();
    }

    let mut commands = Vec::with_capacity(Realm::ALL.len() * 2 + 2);
    commands.push(RenderCommand::BeginGroup {
        id: SharedStr::from("realm-tabs"),
        depth: DIALOGUE_DEPTH,
        fixed: true,
    });

    for (i, realm) in Realm::ALL.into_iter().enumerate() {
        let (fill, label) = if realm == active {
            (ThemeToken::RealmTabActive, ThemeToken::TextPrimary)
        } else {
            (ThemeToken::RealmTab, ThemeToken::TextMuted)
        };
        let x = i as f64 * w;
        commands.push(RenderCommand::DrawRect {
            rect: Rect::new(x, 0.0, w, REALM_TAB_HEIGHT),
            paint: fill.into(),
            border: Some(Paint::Theme(ThemeToken::Border)),
        });
        commands.push(RenderCommand::DrawText {
            position: Point::new(x + w / 2.0, (REALM_TAB_HEIGHT - FONT_SIZE) / 2.0),
            text: SharedStr::from(realm.id()),
            paint: label.into(),
            font_size: FONT_SIZE,
            font: FontFamily::Monospace,
            align: TextAlign::Center,
        });
    }

    commands.push(RenderCommand::EndGroup);
    commands
}

/// The realm whose tab contains `point`, for click handling.
pub fn realm_tab_at(point: Point, viewport: &Viewport) -> Option<Realm> {
    let w = tab_width(viewport);
    if w <= 0.0 || point.y < 0.0 || point.y >= REALM_TAB_HEIGHT || point.x < 0.0 {
        return None;
    }
    Realm::ALL.get((point.x / w) as usize).copied()
}
