use resonador_protocol::{Paint, ThemeToken};

/// Resolved RGBA color for egui rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl ResolvedColor {
    const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_color32(self) -> egui::Color32 {
        egui::Color32::from_rgba_unmultiplied(self.r, self.g, self.b, self.a)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Dark,
    Light,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }

    pub fn visuals(self) -> egui::Visuals {
        match self {
            ThemeMode::Dark => dark_visuals(),
            ThemeMode::Light => light_visuals(),
        }
    }
}

pub fn resolve(token: ThemeToken, mode: ThemeMode) -> egui::Color32 {
    match mode {
        ThemeMode::Dark => resolve_dark(token),
        ThemeMode::Light => resolve_light(token),
    }
    .to_color32()
}

/// Solid paints bypass the theme; overlay colors mean the same thing in
/// both modes.
pub fn resolve_paint(paint: Paint, mode: ThemeMode) -> egui::Color32 {
    match paint {
        Paint::Theme(token) => resolve(token, mode),
        Paint::Solid(color) => {
            let [r, g, b, a] = color.to_rgba8();
            ResolvedColor::rgba(r, g, b, a).to_color32()
        }
    }
}

fn resolve_dark(token: ThemeToken) -> ResolvedColor {
    // Catppuccin Mocha palette
    use ThemeToken::*;
    match token {
        Background => ResolvedColor::rgb(0x11, 0x11, 0x1b), // Crust
        Surface => ResolvedColor::rgb(0x18, 0x18, 0x25),    // Mantle
        Border => ResolvedColor::rgb(0x31, 0x32, 0x44),     // Surface0

        TextPrimary => ResolvedColor::rgb(0xcd, 0xd6, 0xf4), // Text
        TextSecondary => ResolvedColor::rgb(0xba, 0xc2, 0xde), // Subtext1
        TextMuted => ResolvedColor::rgb(0xa6, 0xad, 0xc8),   // Subtext0

        DialogueBackground => ResolvedColor::rgba(0x1e, 0x1e, 0x2e, 235), // Base
        DialogueBorder => ResolvedColor::rgb(0xb4, 0xbe, 0xfe),           // Lavender
        GuardianName => ResolvedColor::rgb(0xf9, 0xe2, 0xaf),             // Yellow
        GuardianTitle => ResolvedColor::rgb(0xa6, 0xad, 0xc8),            // Subtext0
        DialogueText => ResolvedColor::rgb(0xcd, 0xd6, 0xf4),             // Text
        HintText => ResolvedColor::rgb(0xa6, 0xe3, 0xa1),                 // Green

        RealmTab => ResolvedColor::rgb(0x31, 0x32, 0x44),       // Surface0
        RealmTabActive => ResolvedColor::rgb(0x89, 0xb4, 0xfa), // Blue
    }
}

fn resolve_light(token: ThemeToken) -> ResolvedColor {
    // Catppuccin Latte palette
    use ThemeToken::*;
    match token {
        Background => ResolvedColor::rgb(0xdc, 0xe0, 0xe8), // Crust
        Surface => ResolvedColor::rgb(0xe6, 0xe9, 0xef),    // Mantle
        Border => ResolvedColor::rgb(0xcc, 0xd0, 0xda),     // Surface0

        TextPrimary => ResolvedColor::rgb(0x4c, 0x4f, 0x69), // Text
        TextSecondary => ResolvedColor::rgb(0x5c, 0x5f, 0x77), // Subtext1
        TextMuted => ResolvedColor::rgb(0x6c, 0x6f, 0x85),   // Subtext0

        DialogueBackground => ResolvedColor::rgba(0xef, 0xf1, 0xf5, 240), // Base
        DialogueBorder => ResolvedColor::rgb(0x72, 0x87, 0xfd),           // Lavender
        GuardianName => ResolvedColor::rgb(0xdf, 0x8e, 0x1d),             // Yellow
        GuardianTitle => ResolvedColor::rgb(0x6c, 0x6f, 0x85),            // Subtext0
        DialogueText => ResolvedColor::rgb(0x4c, 0x4f, 0x69),             // Text
        HintText => ResolvedColor::rgb(0x40, 0xa0, 0x2b),                 // Green

        RealmTab => ResolvedColor::rgb(0xcc, 0xd0, 0xda),       // Surface0
        RealmTabActive => ResolvedColor::rgb(0x1e, 0x66, 0xf5), // Blue
    }
}

// ── Typography scale ───────────────────────────────────────────────────────

pub const FONT_TITLE: f32 = 18.0;
pub const FONT_BODY: f32 = 13.0;
pub const FONT_CAPTION: f32 = 11.0;

// ── egui visual presets ────────────────────────────────────────────────────

fn dark_visuals() -> egui::Visuals {
    let mut v = egui::Visuals::dark();
    v.panel_fill = egui::Color32::from_rgb(0x18, 0x18, 0x25);
    v.window_fill = egui::Color32::from_rgb(0x1e, 0x1e, 0x2e);
    v.extreme_bg_color = egui::Color32::from_rgb(0x11, 0x11, 0x1b);
    v.widgets.inactive.bg_fill = egui::Color32::from_rgb(0x45, 0x47, 0x5a);
    v.widgets.hovered.bg_fill = egui::Color32::from_rgb(0x58, 0x5b, 0x70);
    v.widgets.active.bg_fill = egui::Color32::from_rgb(0x89, 0xb4, 0xfa);
    v.selection.bg_fill = egui::Color32::from_rgba_unmultiplied(0x89, 0xb4, 0xfa, 60);
    v.selection.stroke = egui::Stroke::new(1.0, egui::Color32::from_rgb(0x89, 0xb4, 0xfa));
    v.window_corner_radius = egui::CornerRadius::same(6);
    v
}

fn light_visuals() -> egui::Visuals {
    let mut v = egui::Visuals::light();
    v.panel_fill = egui::Color32::from_rgb(0xe6, 0xe9, 0xef);
    v.window_fill = egui::Color32::from_rgb(0xef, 0xf1, 0xf5);
    v.extreme_bg_color = egui::Color32::from_rgb(0xff, 0xff, 0xff);
    v.widgets.active.bg_fill = egui::Color32::from_rgb(0x1e, 0x66, 0xf5);
    v.selection.bg_fill = egui::Color32::from_rgba_unmultiplied(0x1e, 0x66, 0xf5, 50);
    v.selection.stroke = egui::Stroke::new(1.0, egui::Color32::from_rgb(0x1e, 0x66, 0xf5));
    v.window_corner_radius = egui::CornerRadius::same(6);
    v
}

/// Apply the typography scale to egui styles.
pub fn apply_typography(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();
    style.text_styles.insert(
        egui::TextStyle::Heading,
        egui::FontId::proportional(FONT_TITLE),
    );
    style
        .text_styles
        .insert(egui::TextStyle::Body, egui::FontId::proportional(FONT_BODY));
    style.text_styles.insert(
        egui::TextStyle::Small,
        egui::FontId::proportional(FONT_CAPTION),
    );
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    ctx.set_style(style);
}

#[cfg(test)]
mod tests {
    use super::*;
    use resonador_protocol::Color;

    #[test]
    fn solid_paint_keeps_its_color_in_both_modes() {
        let paint = Paint::Solid(Color::from_hex(0xffaa00));
        let expected = egui::Color32::from_rgb(0xff, 0xaa, 0x00);
        assert_eq!(resolve_paint(paint, ThemeMode::Dark), expected);
        assert_eq!(resolve_paint(paint, ThemeMode::Light), expected);
    }

    #[test]
    fn modes_differ_for_dialogue_surface() {
        let token = Paint::Theme(ThemeToken::DialogueBackground);
        assert_ne!(
            resolve_paint(token, ThemeMode::Dark),
            resolve_paint(token, ThemeMode::Light)
        );
        assert_eq!(ThemeMode::Dark.toggled(), ThemeMode::Light);
    }
}
