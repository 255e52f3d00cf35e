//! Standalone HTML document with one inline SVG per page.

use std::path::Path;

use handscript_render::{DrawCommand, GlyphCommand, InkColor, RenderPage, RuleCommand};

use crate::fonts::{font_family_stack, FontFace};
use crate::ExportError;

/// HTML export settings.
#[derive(Clone, Debug, PartialEq)]
pub struct HtmlExportOptions {
    /// Document `<title>`.
    pub title: String,
    /// Embedded font used for every glyph when present.
    pub font_face: Option<FontFace>,
    /// Sheet color.
    pub paper_color: InkColor,
    /// Vertical gap between page sheets.
    pub page_gap: f32,
}

impl Default for HtmlExportOptions {
    fn default() -> Self {
        Self {
            title: "Handwritten Document".to_string(),
            font_face: None,
            paper_color: InkColor::rgb(0xff, 0xff, 0xff),
            page_gap: 24.0,
        }
    }
}

/// Render `pages` into a standalone HTML document.
pub fn export_html(pages: &[RenderPage], opts: &HtmlExportOptions) -> String {
    let glyphs: usize = pages.iter().map(|p| p.metrics.glyph_count).sum();
    let mut out = String::with_capacity(1024 + glyphs * 96);
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{}</title>\n", escape_xml(&opts.title)));
    out.push_str("<style>\n");
    if let Some(face) = &opts.font_face {
        out.push_str(&face.css_rule());
        out.push('\n');
    }
    out.push_str(&format!(
        "body {{ margin: 0; padding: {gap}px 0; background: #e8e8e8; }}\n\
         svg.page {{ display: block; margin: 0 auto {gap}px; background: {paper}; box-shadow: 0 1px 4px rgba(0,0,0,0.2); }}\n\
         text.chrome {{ font-family: sans-serif; font-size: 10px; fill: #888888; }}\n",
        gap = fmt_num(opts.page_gap),
        paper = opts.paper_color,
    ));
    out.push_str("</style>\n</head>\n<body>\n");
    for page in pages {
        write_page(&mut out, page, opts);
    }
    out.push_str("</body>\n</html>\n");
    out
}

/// Export `pages` to `path`, creating parent directories as needed.
pub fn write_html(
    path: impl AsRef<Path>,
    pages: &[RenderPage],
    opts: &HtmlExportOptions,
) -> Result<(), ExportError> {
    let path = path.as_ref();
    let io_err = |source| ExportError::Io {
        path: path.display().to_string(),
        source,
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
    }
    let html = export_html(pages, opts);
    std::fs::write(path, html).map_err(io_err)?;
    log::info!("wrote {} pages to {}", pages.len(), path.display());
    Ok(())
}

fn write_page(out: &mut String, page: &RenderPage, opts: &HtmlExportOptions) {
    let width = fmt_num(page.geometry.width);
    let height = fmt_num(page.geometry.height);
    out.push_str(&format!(
        "<svg class=\"page\" data-page=\"{}\" xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n",
        page.page_number,
        w = width,
        h = height,
    ));

    for cmd in &page.chrome_commands {
        match cmd {
            DrawCommand::Rule(rule) => write_rule(out, rule),
            DrawCommand::PageChrome(chrome) => {
                out.push_str(&format!(
                    "<text class=\"chrome\" x=\"{}\" y=\"{}\" text-anchor=\"middle\">{}</text>\n",
                    fmt_num(chrome.center_x),
                    fmt_num(chrome.baseline_y),
                    escape_xml(&chrome.text)
                ));
            }
            DrawCommand::Glyph(glyph) => write_glyph(out, glyph),
        }
    }

    let family = font_family_stack(&page.style.font, opts.font_face.as_ref());
    out.push_str(&format!(
        "<g font-family=\"{}\" font-size=\"{}\" fill=\"{}\">\n",
        escape_xml(&family),
        fmt_num(page.style.size),
        page.style.ink_color
    ));
    for cmd in &page.content_commands {
        match cmd {
            DrawCommand::Glyph(glyph) => write_glyph(out, glyph),
            DrawCommand::Rule(rule) => write_rule(out, rule),
            DrawCommand::PageChrome(_) => {}
        }
    }
    out.push_str("</g>\n</svg>\n");
}

fn write_glyph(out: &mut String, glyph: &GlyphCommand) {
    if glyph.ch.is_whitespace() {
        return;
    }
    let (x, y) = glyph.origin();
    let mut buf = [0u8; 4];
    out.push_str(&format!(
        "<text transform=\"translate({} {}) rotate({}) skewX({})\">{}</text>\n",
        fmt_num(x),
        fmt_num(y),
        fmt_num(glyph.rotation_deg),
        fmt_num(glyph.skew_x_deg),
        escape_xml(glyph.ch.encode_utf8(&mut buf))
    ));
}

fn write_rule(out: &mut String, rule: &RuleCommand) {
    let (x2, y2) = if rule.horizontal {
        (rule.x + rule.length, rule.y)
    } else {
        (rule.x, rule.y + rule.length)
    };
    out.push_str(&format!(
        "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\" stroke-width=\"{}\"/>\n",
        fmt_num(rule.x),
        fmt_num(rule.y),
        fmt_num(x2),
        fmt_num(y2),
        rule.color,
        fmt_num(rule.thickness)
    ));
}

/// Fixed two-decimal coordinate with trailing zeros trimmed.
fn fmt_num(value: f32) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let mut s = format!("{:.2}", value);
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed);
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

pub(crate) fn escape_xml(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use handscript_render::{HandwritingStyle, PageGeometry};

    fn page_with(chars: &str) -> RenderPage {
        let mut page = RenderPage::new(1, PageGeometry::A4, HandwritingStyle::default());
        for (i, ch) in chars.chars().enumerate() {
            page.push_content_command(DrawCommand::Glyph(GlyphCommand {
                ch,
                x: 50.0 + i as f32 * 12.0,
                baseline_y: 80.0,
                offset_x: 0.25,
                offset_y: -0.5,
                rotation_deg: 0.1,
                skew_x_deg: 3.0,
            }));
        }
        page
    }

    #[test]
    fn numbers_are_trimmed() {
        assert_eq!(fmt_num(50.0), "50");
        assert_eq!(fmt_num(12.5), "12.5");
        assert_eq!(fmt_num(-0.001), "0");
        assert_eq!(fmt_num(1.239), "1.24");
        assert_eq!(fmt_num(f32::NAN), "0");
    }

    #[test]
    fn glyph_transform_combines_jitter_and_slant() {
        let html = export_html(&[page_with("a")], &HtmlExportOptions::default());
        assert!(html.contains(
            "<text transform=\"translate(50.25 79.5) rotate(0.1) skewX(3)\">a</text>"
        ));
    }

    #[test]
    fn markup_characters_are_escaped() {
        let html = export_html(&[page_with("<&>")], &HtmlExportOptions::default());
        assert!(html.contains(">&lt;</text>"));
        assert!(html.contains(">&amp;</text>"));
        assert!(html.contains(">&gt;</text>"));
        assert!(!html.contains("><</text>"));
    }

    #[test]
    fn spaces_are_not_drawn() {
        let html = export_html(&[page_with("a b")], &HtmlExportOptions::default());
        assert_eq!(html.matches("<text transform").count(), 2);
    }

    #[test]
    fn one_svg_per_page_with_fallback_fonts() {
        let mut second = page_with("b");
        second.page_number = 2;
        let html = export_html(&[page_with("a"), second], &HtmlExportOptions::default());
        assert_eq!(html.matches("<svg class=\"page\"").count(), 2);
        assert!(html.contains("data-page=\"2\""));
        assert!(html.contains("viewBox=\"0 0 595 842\""));
        assert!(html.contains("font-family=\"&#39;Comic Sans MS&#39;, &#39;Segoe Script&#39;, cursive, sans-serif\""));
        assert!(!html.contains("@font-face"));
    }

    #[test]
    fn embedded_face_is_declared_once() {
        let opts = HtmlExportOptions {
            font_face: Some(FontFace::from_bytes("Donald Ross", "QEDonaldRoss.ttf", b"abc")),
            ..HtmlExportOptions::default()
        };
        let html = export_html(&[page_with("a"), page_with("b")], &opts);
        assert_eq!(html.matches("@font-face").count(), 1);
        assert!(html.contains("font-family=\"&#39;Donald Ross&#39;, "));
    }

    #[test]
    fn rules_become_lines() {
        let mut page = page_with("");
        page.push_chrome_command(DrawCommand::Rule(RuleCommand {
            x: 40.0,
            y: 0.0,
            length: 842.0,
            thickness: 1.0,
            horizontal: false,
            color: InkColor::rgb(0xe5, 0x8f, 0x8f),
        }));
        let html = export_html(&[page], &HtmlExportOptions::default());
        assert!(html.contains(
            "<line x1=\"40\" y1=\"0\" x2=\"40\" y2=\"842\" stroke=\"#e58f8f\" stroke-width=\"1\"/>"
        ));
    }

    #[test]
    fn each_element_ends_its_own_line() {
        let mut page = page_with("ab");
        page.push_chrome_command(DrawCommand::Rule(RuleCommand {
            x: 0.0,
            y: 84.0,
            length: 595.0,
            thickness: 1.0,
            horizontal: true,
            color: InkColor::rgb(0xe5, 0xe5, 0xe5),
        }));
        let html = export_html(&[page], &HtmlExportOptions::default());
        let lines: Vec<&str> = html.lines().collect();
        assert!(lines.contains(&"<title>Handwritten Document</title>"));
        assert!(lines.contains(
            &"<line x1=\"0\" y1=\"84\" x2=\"595\" y2=\"84\" stroke=\"#e5e5e5\" stroke-width=\"1\"/>"
        ));
        assert_eq!(
            lines.iter().filter(|l| l.starts_with("<text transform")).count(),
            2
        );
        assert!(lines.iter().any(|l| l.starts_with("text.chrome {")));
        assert_eq!(lines.last(), Some(&"</html>"));
        assert!(html.ends_with("</html>\n"));
    }

    #[test]
    fn write_html_creates_parent_dirs() {
        let dir = std::env::temp_dir().join(format!("handscript-export-{}", std::process::id()));
        let path = dir.join("nested").join("out.html");
        write_html(&path, &[page_with("hi")], &HtmlExportOptions::default()).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_dir_all(&dir);
        assert!(written.starts_with("<!DOCTYPE html>"));
    }
}
