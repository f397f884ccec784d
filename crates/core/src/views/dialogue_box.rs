use resonador_protocol::{
    FontFamily, Point, Rect, RenderCommand, SharedStr, TextAlign, ThemeToken, Viewport,
};

use super::DIALOGUE_DEPTH;
use crate::dialogue::GuardianRecord;

pub const DIALOGUE_BOX_HEIGHT: f64 = 132.0;
pub const HINT_PREFIX: &str = "Pista: ";

const MARGIN: f64 = 16.0;
const PADDING: f64 = 12.0;
const NAME_FONT_SIZE: f64 = 16.0;
const TITLE_FONT_SIZE: f64 = 12.0;
const LINE_FONT_SIZE: f64 = 14.0;
const HINT_FONT_SIZE: f64 = 12.0;
const LINE_GAP: f64 = 4.0;
/// Average glyph advance as a fraction of font size, for wrapping.
const GLYPH_WIDTH: f64 = 0.55;

/// Render the guardian's speech box along the bottom edge of the viewport.
///
/// `line` is wrapped to the box width; lines that do not fit the box are
/// dropped. A `hint`, when given, is drawn on the last row with the
/// [`HINT_PREFIX`].
pub fn render_dialogue_box(
    guardian: &GuardianRecord,
    line: &str,
    hint: Option<&str>,
    viewport: &Viewport,
) -> Vec<RenderCommand> {
    let width = viewport.width - MARGIN * 2.0;
    let height = DIALOGUE_BOX_HEIGHT.min(viewport.height - MARGIN * 2.0);
    if width <= PADDING * 2.0 || height <= PADDING * 2.0 {
        return Vec::new();
    }
    let origin = Point::new(MARGIN, viewport.height - MARGIN - height);

    let mut commands = Vec::with_capacity(12);
    commands.push(RenderCommand::BeginGroup {
        id: SharedStr::from(format!("dialogue-{}", guardian.name)),
        depth: DIALOGUE_DEPTH,
        fixed: true,
    });
    commands.push(RenderCommand::PushTransform { translate: origin });

    commands.push(RenderCommand::DrawRect {
        rect: Rect::new(0.0, 0.0, width, height),
        paint: ThemeToken::DialogueBackground.into(),
        border: Some(ThemeToken::DialogueBorder.into()),
    });

    // Header: name on the left, title on the right.
    let header_y = PADDING;
    commands.push(text(
        Point::new(PADDING, header_y),
        guardian.name,
        ThemeToken::GuardianName,
        NAME_FONT_SIZE,
        TextAlign::Left,
    ));
    commands.push(text(
        Point::new(width - PADDING, header_y + NAME_FONT_SIZE - TITLE_FONT_SIZE),
        guardian.title,
        ThemeToken::GuardianTitle,
        TITLE_FONT_SIZE,
        TextAlign::Right,
    ));

    let hint_row = if hint.is_some() {
        HINT_FONT_SIZE + LINE_GAP
    } else {
        0.0
    };
    let body_top = header_y + NAME_FONT_SIZE + LINE_GAP * 2.0;
    let body_bottom = height - PADDING - hint_row;
    let max_chars = ((width - PADDING * 2.0) / (LINE_FONT_SIZE * GLYPH_WIDTH)) as usize;

    let mut y = body_top;
    for row in wrap_text(line, max_chars) {
        if y + LINE_FONT_SIZE > body_bottom {
            break;
        }
        commands.push(text(
            Point::new(PADDING, y),
            &row,
            ThemeToken::DialogueText,
            LINE_FONT_SIZE,
            TextAlign::Left,
        ));
        y += LINE_FONT_SIZE + LINE_GAP;
    }

    if let Some(hint) = hint {
        commands.push(text(
            Point::new(PADDING, height - PADDING - HINT_FONT_SIZE),
            &format!("{HINT_PREFIX}{hint}"),
            ThemeToken::HintText,
            HINT_FONT_SIZE,
            TextAlign::Left,
        ));
    }

    commands.push(RenderCommand::PopTransform);
    commands.push(RenderCommand::EndGroup);
    commands
}

fn text(
    position: Point,
    content: &str,
    token: ThemeToken,
    font_size: f64,
    align: TextAlign,
) -> RenderCommand {
    RenderCommand::DrawText {
        position,
        text: SharedStr::from(content),
        paint: token.into(),
        font_size,
        font: FontFamily::Proportional,
        align,
    }
}

/// Greedy word wrap to at most `max_chars` characters per row. Words longer
/// than a row are split.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut rows = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_chars {
            if current_len > 0 {
                rows.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(max_chars);
            rows.push(word.into_iter().collect());
            word = rest;
        }
        if word.is_empty() {
            continue;
        }
        let needed = if current_len == 0 {
            word.len()
        } else {
            current_len + 1 + word.len()
        };
        if needed > max_chars {
            rows.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.extend(word.iter());
        current_len += word.len();
    }
    if current_len > 0 {
        rows.push(current);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogue::{Realm, guardian};

    fn texts(commands: &[RenderCommand]) -> Vec<(String, ThemeToken)> {
        commands
            .iter()
            .filter_map(|c| match c {
                RenderCommand::DrawText {
                    text,
                    paint: resonador_protocol::Paint::Theme(token),
                    ..
                } => Some((text.to_string(), *token)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn draws_header_line_and_hint() {
        let g = guardian(Realm::Cosmos);
        let cmds = render_dialogue_box(g, "...", Some("Mira arriba."), &Viewport::new(800.0, 600.0));

        assert!(matches!(
            cmds.first(),
            Some(RenderCommand::BeginGroup { fixed: true, depth: DIALOGUE_DEPTH, .. })
        ));
        assert!(matches!(cmds.last(), Some(RenderCommand::EndGroup)));

        let texts = texts(&cmds);
        assert_eq!(texts[0], (g.name.to_string(), ThemeToken::GuardianName));
        assert_eq!(texts[1], (g.title.to_string(), ThemeToken::GuardianTitle));
        assert_eq!(texts[2], ("...".to_string(), ThemeToken::DialogueText));
        assert_eq!(
            texts.last(),
            Some(&("Pista: Mira arriba.".to_string(), ThemeToken::HintText))
        );
    }

    #[test]
    fn anchored_to_bottom_edge() {
        let g = guardian(Realm::Terra);
        let cmds = render_dialogue_box(g, "hola", None, &Viewport::new(640.0, 480.0));
        let origin = cmds.iter().find_map(|c| match c {
            RenderCommand::PushTransform { translate } => Some(*translate),
            _ => None,
        });
        assert_eq!(
            origin,
            Some(Point::new(MARGIN, 480.0 - MARGIN - DIALOGUE_BOX_HEIGHT))
        );
    }

    #[test]
    fn tiny_viewport_draws_nothing() {
        let g = guardian(Realm::Bios);
        assert!(render_dialogue_box(g, "x", None, &Viewport::new(20.0, 20.0)).is_empty());
    }

    #[test]
    fn long_line_wraps_inside_box() {
        let g = guardian(Realm::Logos);
        let line = "palabra ".repeat(40);
        let cmds = render_dialogue_box(g, &line, None, &Viewport::new(400.0, 600.0));
        let body: Vec<_> = texts(&cmds)
            .into_iter()
            .filter(|(_, t)| *t == ThemeToken::DialogueText)
            .collect();
        assert!(body.len() > 1);
        let max_chars = ((400.0 - MARGIN * 2.0 - PADDING * 2.0) / (LINE_FONT_SIZE * GLYPH_WIDTH))
            as usize;
        assert!(body.iter().all(|(t, _)| t.chars().count() <= max_chars));
    }

    #[test]
    fn wrap_splits_on_words_and_long_tokens() {
        assert_eq!(wrap_text("uno dos tres", 7), vec!["uno dos", "tres"]);
        assert_eq!(wrap_text("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap_text("  ", 10), Vec::<String>::new());
        assert_eq!(wrap_text("ñandú ñu", 5), vec!["ñandú", "ñu"]);
    }
}
