//! SVG renderer: converts `RenderCommand` lists into standalone SVG strings.

use resonador_protocol::{FontFamily, Paint, RenderCommand, TextAlign, ThemeToken};

/// Render a list of commands as an SVG document string.
///
/// `width` and `height` define the SVG viewBox dimensions.
/// `dark` selects the color palette for theme tokens.
pub fn render_svg(commands: &[RenderCommand], width: f64, height: f64, dark: bool) -> String {
    let mut svg = String::with_capacity(commands.len() * 120);
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width} {height}" width="{width}" height="{height}" style="font-family:system-ui,-apple-system,sans-serif">"#,
    ));
    svg.push_str(&format!(
        r#"<rect width="{width}" height="{height}" fill="{}"/>"#,
        resolve_color(ThemeToken::Background, dark),
    ));

    for cmd in commands {
        match cmd {
            RenderCommand::DrawRect {
                rect,
                paint,
                border,
            } => {
                svg.push_str(&format!(
                    r#"<rect x="{}" y="{}" width="{}" height="{}"{}"#,
                    rect.x,
                    rect.y,
                    rect.w,
                    rect.h,
                    paint_attrs("fill", *paint, dark),
                ));
                if let Some(border) = border {
                    svg.push_str(&paint_attrs("stroke", *border, dark));
                }
                svg.push_str("/>");
            }
            RenderCommand::DrawText {
                position,
                text,
                paint,
                font_size,
                font,
                align,
            } => {
                let anchor = match align {
                    TextAlign::Left => "start",
                    TextAlign::Center => "middle",
                    TextAlign::Right => "end",
                };
                let family = match font {
                    FontFamily::Proportional => "",
                    FontFamily::Monospace => r#" font-family="monospace""#,
                };
                // Positions are the top of the line.
                svg.push_str(&format!(
                    r#"<text x="{}" y="{}" font-size="{font_size}" text-anchor="{anchor}" dominant-baseline="hanging"{family}{}>{}</text>"#,
                    position.x,
                    position.y,
                    paint_attrs("fill", *paint, dark),
                    escape_xml(text),
                ));
            }
            RenderCommand::PushTransform { translate } => {
                svg.push_str(&format!(
                    r#"<g transform="translate({} {})">"#,
                    translate.x, translate.y
                ));
            }
            RenderCommand::PopTransform => svg.push_str("</g>"),
            RenderCommand::BeginGroup { id, .. } => {
                svg.push_str(&format!(r#"<g id="{}">"#, escape_xml(id)));
            }
            RenderCommand::EndGroup => svg.push_str("</g>"),
        }
    }

    svg.push_str("</svg>");
    svg
}

fn paint_attrs(attr: &str, paint: Paint, dark: bool) -> String {
    match paint {
        Paint::Theme(token) => format!(r#" {attr}="{}""#, resolve_color(token, dark)),
        Paint::Solid(color) if color.a < 1.0 => format!(
            r#" {attr}="{}" {attr}-opacity="{}""#,
            color.to_css_hex(),
            color.a
        ),
        Paint::Solid(color) => format!(r#" {attr}="{}""#, color.to_css_hex()),
    }
}

fn resolve_color(token: ThemeToken, dark: bool) -> &'static str {
    if dark {
        match token {
            ThemeToken::Background => "#11111b",
            ThemeToken::Surface => "#181825",
            ThemeToken::Border | ThemeToken::RealmTab => "#313244",
            ThemeToken::TextPrimary | ThemeToken::DialogueText => "#cdd6f4",
            ThemeToken::TextSecondary => "#bac2de",
            ThemeToken::TextMuted | ThemeToken::GuardianTitle => "#a6adc8",
            ThemeToken::DialogueBackground => "#1e1e2e",
            ThemeToken::DialogueBorder => "#b4befe",
            ThemeToken::GuardianName => "#f9e2af",
            ThemeToken::HintText => "#a6e3a1",
            ThemeToken::RealmTabActive => "#89b4fa",
        }
    } else {
        match token {
            ThemeToken::Background => "#dce0e8",
            ThemeToken::Surface => "#e6e9ef",
            ThemeToken::Border | ThemeToken::RealmTab => "#ccd0da",
            ThemeToken::TextPrimary | ThemeToken::DialogueText => "#4c4f69",
            ThemeToken::TextSecondary => "#5c5f77",
            ThemeToken::TextMuted | ThemeToken::GuardianTitle => "#6c6f85",
            ThemeToken::DialogueBackground => "#eff1f5",
            ThemeToken::DialogueBorder => "#7287fd",
            ThemeToken::GuardianName => "#df8e1d",
            ThemeToken::HintText => "#40a02b",
            ThemeToken::RealmTabActive => "#1e66f5",
        }
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogue::{DialogueSession, Realm};
    use resonador_protocol::{Color, Point, Rect, SharedStr, Viewport};

    #[test]
    fn dialogue_screen_to_svg() {
        let session = DialogueSession::new(Realm::Machina);
        let svg = render_svg(
            &session.commands(&Viewport::new(800.0, 600.0)),
            800.0,
            600.0,
            true,
        );
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains(session.guardian().name));
        assert!(svg.contains("#89b4fa"));
        assert_eq!(svg.matches("<g").count(), svg.matches("</g>").count());
    }

    #[test]
    fn translucent_solid_paint_sets_opacity() {
        let commands = vec![RenderCommand::DrawRect {
            rect: Rect::new(0.0, 0.0, 10.0, 10.0),
            paint: Paint::Solid(Color::BLACK.with_alpha(0.5)),
            border: None,
        }];
        let svg = render_svg(&commands, 10.0, 10.0, false);
        assert!(svg.contains(r##"fill="#000000" fill-opacity="0.5""##));
    }

    #[test]
    fn transforms_and_groups_nest() {
        let commands = vec![
            RenderCommand::BeginGroup {
                id: SharedStr::from("dialogue"),
                depth: 100,
                fixed: true,
            },
            RenderCommand::PushTransform {
                translate: Point::new(12.0, 40.0),
            },
            RenderCommand::PopTransform,
            RenderCommand::EndGroup,
        ];
        let svg = render_svg(&commands, 100.0, 100.0, true);
        assert!(svg.contains(r#"<g id="dialogue"><g transform="translate(12 40)"></g></g></svg>"#));
        assert!(svg.contains(r##"<rect width="100" height="100" fill="#11111b"/>"##));
    }

    #[test]
    fn escapes_xml_entities() {
        let commands = vec![RenderCommand::DrawText {
            position: Point::ORIGIN,
            text: SharedStr::from("<Eigen & \"valor\">"),
            paint: Paint::Theme(ThemeToken::HintText),
            font_size: 12.0,
            font: FontFamily::Proportional,
            align: TextAlign::Left,
        }];
        let svg = render_svg(&commands, 100.0, 20.0, false);
        assert!(svg.contains("&lt;Eigen &amp; &quot;valor&quot;&gt;"));
    }
}
