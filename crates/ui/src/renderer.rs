use egui::{Align2, CornerRadius, FontId, Painter, Pos2, Rect, Stroke, StrokeKind, Vec2};
use resonador_protocol::{FontFamily, RenderCommand, TextAlign};

use crate::theme::{self, ThemeMode};

/// Render a list of `RenderCommand` into an egui `Painter`.
///
/// `offset` is the top-left pixel position of the rendering area. Text
/// positions are the top edge of the line, anchored by its alignment.
pub fn render_commands(
    painter: &Painter,
    commands: &[RenderCommand],
    offset: Pos2,
    mode: ThemeMode,
) {
    let mut transform_stack: Vec<Vec2> = vec![offset.to_vec2()];

    for cmd in commands {
        let tf = transform_stack.last().copied().unwrap_or(offset.to_vec2());
        match cmd {
            RenderCommand::DrawRect {
                rect,
                paint,
                border,
            } => {
                let min = Pos2::new(rect.x as f32, rect.y as f32) + tf;
                let size = egui::vec2(rect.w as f32, rect.h as f32);
                if size.x < 0.5 || size.y < 0.5 {
                    continue;
                }
                let egui_rect = Rect::from_min_size(min, size);

                // Cull off-screen
                if !painter.clip_rect().intersects(egui_rect) {
                    continue;
                }

                painter.rect_filled(
                    egui_rect,
                    CornerRadius::ZERO,
                    theme::resolve_paint(*paint, mode),
                );
                if let Some(border) = border {
                    painter.rect_stroke(
                        egui_rect,
                        CornerRadius::ZERO,
                        Stroke::new(1.0, theme::resolve_paint(*border, mode)),
                        StrokeKind::Inside,
                    );
                }
            }

            RenderCommand::DrawText {
                position,
                text,
                paint,
                font_size,
                font,
                align,
            } => {
                let size = *font_size as f32;
                if size < 1.0 {
                    continue;
                }
                let anchor = match align {
                    TextAlign::Left => Align2::LEFT_TOP,
                    TextAlign::Center => Align2::CENTER_TOP,
                    TextAlign::Right => Align2::RIGHT_TOP,
                };
                let font_id = match font {
                    FontFamily::Proportional => FontId::proportional(size),
                    FontFamily::Monospace => FontId::monospace(size),
                };
                painter.text(
                    Pos2::new(position.x as f32, position.y as f32) + tf,
                    anchor,
                    text.as_ref(),
                    font_id,
                    theme::resolve_paint(*paint, mode),
                );
            }

            RenderCommand::PushTransform { translate } => {
                transform_stack.push(tf + egui::vec2(translate.x as f32, translate.y as f32));
            }

            RenderCommand::PopTransform => {
                if transform_stack.len() > 1 {
                    transform_stack.pop();
                }
            }

            RenderCommand::BeginGroup { .. } | RenderCommand::EndGroup => {
                // Commands arrive already depth-sorted; groups carry no paint.
            }
        }
    }
}
