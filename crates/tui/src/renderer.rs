use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use resonador_protocol::{Paint, Point, RenderCommand, TextAlign, ThemeToken};

/// Logical pixels per terminal column.
pub const CELL_W: f64 = 8.0;
/// Logical pixels per terminal row.
pub const CELL_H: f64 = 16.0;

pub fn theme_to_color(token: ThemeToken) -> Color {
    match token {
        ThemeToken::Background => Color::Black,
        ThemeToken::Surface => Color::Rgb(24, 24, 37),
        ThemeToken::Border => Color::DarkGray,
        ThemeToken::TextPrimary => Color::White,
        ThemeToken::TextSecondary => Color::Gray,
        ThemeToken::TextMuted => Color::DarkGray,
        ThemeToken::DialogueBackground => Color::Rgb(30, 30, 46),
        ThemeToken::DialogueBorder => Color::Rgb(137, 180, 250),
        ThemeToken::GuardianName => Color::Rgb(249, 226, 175),
        ThemeToken::GuardianTitle => Color::Rgb(166, 173, 200),
        ThemeToken::DialogueText => Color::Rgb(205, 214, 244),
        ThemeToken::HintText => Color::Rgb(166, 227, 161),
        ThemeToken::RealmTab => Color::Rgb(49, 50, 68),
        ThemeToken::RealmTabActive => Color::Rgb(88, 91, 112),
    }
}

pub fn paint_to_color(paint: Paint) -> Color {
    match paint {
        Paint::Theme(token) => theme_to_color(token),
        Paint::Solid(color) => {
            let [r, g, b, _] = color.to_rgba8();
            Color::Rgb(r, g, b)
        }
    }
}

/// Map a logical point to a cell offset inside `area`. `None` when it lands
/// outside.
fn to_cell(area: Rect, p: Point) -> Option<(u16, u16)> {
    let col = (p.x / CELL_W).floor();
    let row = (p.y / CELL_H).floor();
    if col < 0.0 || row < 0.0 || col >= f64::from(area.width) || row >= f64::from(area.height) {
        return None;
    }
    Some((area.x + col as u16, area.y + row as u16))
}

/// Rasterize render commands into `buf`, clipped to `area`.
///
/// Rects fill cell backgrounds; a bordered rect at least two cells on each
/// side gets a box-drawing frame. Text keeps whatever background is under it.
pub fn draw_commands(buf: &mut Buffer, area: Rect, commands: &[RenderCommand]) {
    let mut transforms: Vec<Point> = Vec::new();
    let mut offset = Point::ORIGIN;

    for cmd in commands {
        match cmd {
            RenderCommand::PushTransform { translate } => {
                transforms.push(offset);
                offset = offset.offset(*translate);
            }
            RenderCommand::PopTransform => {
                offset = transforms.pop().unwrap_or(Point::ORIGIN);
            }
            RenderCommand::BeginGroup { .. } | RenderCommand::EndGroup => {}
            RenderCommand::DrawRect {
                rect,
                paint,
                border,
            } => {
                let x0 = ((offset.x + rect.x) / CELL_W).floor().max(0.0);
                let y0 = ((offset.y + rect.y) / CELL_H).floor().max(0.0);
                let x1 = ((offset.x + rect.x + rect.w) / CELL_W)
                    .ceil()
                    .min(f64::from(area.width));
                let y1 = ((offset.y + rect.y + rect.h) / CELL_H)
                    .ceil()
                    .min(f64::from(area.height));
                if x1 <= x0 || y1 <= y0 {
                    continue;
                }
                let (x0, y0, x1, y1) = (x0 as u16, y0 as u16, x1 as u16, y1 as u16);
                let bg = paint_to_color(*paint);
                let frame = border.filter(|_| x1 - x0 >= 2 && y1 - y0 >= 2).map(paint_to_color);

                for row in y0..y1 {
                    for col in x0..x1 {
                        let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) else {
                            continue;
                        };
                        cell.set_char(' ').set_bg(bg);
                        if let Some(fg) = frame {
                            let glyph = border_glyph(col, row, (x0, y0, x1 - 1, y1 - 1));
                            if glyph != ' ' {
                                cell.set_char(glyph).set_fg(fg);
                            }
                        }
                    }
                }
            }
            RenderCommand::DrawText {
                position,
                text,
                paint,
                align,
                ..
            } => {
                let len = text.chars().count() as f64 * CELL_W;
                let x = match align {
                    TextAlign::Left => position.x,
                    TextAlign::Center => position.x - len / 2.0,
                    TextAlign::Right => position.x - len,
                };
                let start = Point::new(offset.x + x, offset.y + position.y);
                let fg = paint_to_color(*paint);
                for (i, ch) in text.chars().enumerate() {
                    let p = Point::new(start.x + i as f64 * CELL_W, start.y);
                    if let Some(pos) = to_cell(area, p)
                        && let Some(cell) = buf.cell_mut(pos)
                    {
                        cell.set_char(ch).set_fg(fg);
                    }
                }
            }
        }
    }
}

fn border_glyph(col: u16, row: u16, (left, top, right, bottom): (u16, u16, u16, u16)) -> char {
    match (col == left, col == right, row == top, row == bottom) {
        (true, _, true, _) => '┌',
        (_, true, true, _) => '┐',
        (true, _, _, true) => '└',
        (_, true, _, true) => '┘',
        (_, _, true, _) | (_, _, _, true) => '─',
        (true, _, _, _) | (_, true, _, _) => '│',
        _ => ' ',
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resonador_protocol::{Color as Rgba, FontFamily, Rect as LogicalRect, SharedStr};

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    fn text_at(x: f64, y: f64, s: &str, align: TextAlign) -> RenderCommand {
        RenderCommand::DrawText {
            position: Point::new(x, y),
            text: SharedStr::from(s),
            paint: Paint::Theme(ThemeToken::TextPrimary),
            font_size: 14.0,
            font: FontFamily::Monospace,
            align,
        }
    }

    #[test]
    fn text_maps_to_cells_through_transforms() {
        let area = Rect::new(0, 0, 20, 4);
        let mut buf = Buffer::empty(area);
        draw_commands(
            &mut buf,
            area,
            &[
                RenderCommand::PushTransform {
                    translate: Point::new(16.0, 16.0),
                },
                text_at(8.0, 0.0, "hola", TextAlign::Left),
                RenderCommand::PopTransform,
                text_at(0.0, 0.0, "x", TextAlign::Left),
            ],
        );
        assert_eq!(row_text(&buf, 0).trim_end(), "x");
        assert_eq!(row_text(&buf, 1).trim_end(), "   hola");
    }

    #[test]
    fn aligned_text() {
        let area = Rect::new(0, 0, 10, 2);
        let mut buf = Buffer::empty(area);
        draw_commands(
            &mut buf,
            area,
            &[
                text_at(80.0, 0.0, "ab", TextAlign::Right),
                text_at(40.0, 16.0, "ab", TextAlign::Center),
            ],
        );
        assert_eq!(row_text(&buf, 0), "        ab");
        assert_eq!(row_text(&buf, 1), "    ab    ");
    }

    #[test]
    fn bordered_rect_gets_frame_and_clips() {
        let area = Rect::new(0, 0, 6, 4);
        let mut buf = Buffer::empty(area);
        draw_commands(
            &mut buf,
            area,
            &[RenderCommand::DrawRect {
                rect: LogicalRect::new(0.0, 0.0, 32.0, 48.0),
                paint: Paint::Solid(Rgba::from_hex(0x102030)),
                border: Some(Paint::Theme(ThemeToken::Border)),
            }],
        );
        assert_eq!(row_text(&buf, 0), "┌──┐  ");
        assert_eq!(row_text(&buf, 1), "│  │  ");
        assert_eq!(row_text(&buf, 2), "└──┘  ");
        assert_eq!(buf[(1, 1)].bg, Color::Rgb(0x10, 0x20, 0x30));
    }

    #[test]
    fn offscreen_text_is_dropped() {
        let area = Rect::new(0, 0, 4, 1);
        let mut buf = Buffer::empty(area);
        draw_commands(&mut buf, area, &[text_at(-16.0, 0.0, "abcdef", TextAlign::Left)]);
        assert_eq!(row_text(&buf, 0), "cdef");
    }
}
