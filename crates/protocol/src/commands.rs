use serde::{Deserialize, Serialize};

use crate::shared_str::SharedStr;
use crate::theme::ThemeToken;
use crate::types::{Color, Point, Rect};

/// Fill source for a render command.
///
/// Host-owned display nodes carry concrete colors; UI chrome uses theme
/// tokens so each renderer can resolve them against its palette.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Paint {
    Theme(ThemeToken),
    Solid(Color),
}

impl From<ThemeToken> for Paint {
    fn from(token: ThemeToken) -> Self {
        Paint::Theme(token)
    }
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Paint::Solid(color)
    }
}

/// A single, stateless render instruction.
///
/// Scenes emit a `Vec<RenderCommand>` per frame. Renderers consume this list
/// sequentially; each command carries all the data it needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderCommand {
    /// Draw a filled rectangle, optionally bordered.
    DrawRect {
        rect: Rect,
        paint: Paint,
        border: Option<Paint>,
    },

    /// Draw a text string anchored at a position.
    DrawText {
        position: Point,
        text: SharedStr,
        paint: Paint,
        font_size: f64,
        font: FontFamily,
        align: TextAlign,
    },

    /// Push a translation applied to all subsequent commands until the
    /// matching `PopTransform`.
    PushTransform { translate: Point },

    /// Pop the most recent transform.
    PopTransform,

    /// Begin a logical group (a scene container). `fixed` groups ignore
    /// camera scroll.
    BeginGroup {
        id: SharedStr,
        depth: i32,
        fixed: bool,
    },

    /// End the current group.
    EndGroup,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontFamily {
    #[default]
    Proportional,
    Monospace,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paint_from_token_and_color() {
        assert_eq!(
            Paint::from(ThemeToken::HintText),
            Paint::Theme(ThemeToken::HintText)
        );
        assert_eq!(Paint::from(Color::WHITE), Paint::Solid(Color::WHITE));
    }

    #[test]
    fn commands_serialize_with_variant_tags() {
        let cmd = RenderCommand::DrawText {
            position: Point::new(5.0, 5.0),
            text: "FPS: 60".into(),
            paint: Color::from_hex(0x00ff00).into(),
            font_size: 14.0,
            font: FontFamily::Monospace,
            align: TextAlign::Left,
        };
        let json = serde_json::to_string(&cmd).unwrap_or_default();
        assert!(json.contains("DrawText"));
        assert!(json.contains("FPS: 60"));
        assert!(json.contains("Monospace"));
    }
}
