//! Xuất HTML tĩnh cho một [`RenderedTimeline`].
//!
//! Tên class trùng với UI tương tác nên cả hai dùng chung [`BASE_STYLES`].

use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::entry::FillSpec;
use crate::render::{ButtonFace, IconFace, RenderedBox, RenderedRow, RenderedTimeline};

/// Quy tắc bố cục cho phần thân timeline.
pub const BASE_STYLES: &str = r#"
.timeline {
  position: relative;
  display: flex;
  flex-direction: column;
  gap: 48px;
  padding: 24px 0;
}

.timeline-line {
  position: absolute;
  left: 50%;
  width: 4px;
  transform: translateX(-50%);
  background: var(--timeline-spine, #794016);
  border-radius: 2px;
  z-index: 0;
}

.timeline-row {
  position: relative;
  display: grid;
  grid-template-columns: 1fr auto 1fr;
  align-items: center;
  column-gap: 56px;
}

.left-events,
.right-events {
  display: flex;
  flex-direction: column;
  gap: 20px;
}

.left-events { grid-column: 1; align-items: flex-end; }
.right-events { grid-column: 3; align-items: flex-start; }

.date-range {
  grid-column: 2;
  position: relative;
  z-index: 2;
  padding: 8px 16px;
  border-radius: 999px;
  background: var(--timeline-label-bg, #794016);
  color: #fff;
  font-weight: 700;
  white-space: nowrap;
}

.connector {
  position: absolute;
  height: 4px;
  background: var(--timeline-spine, #794016);
  z-index: 1;
}

.event-box-left,
.event-box-right {
  position: relative;
  width: min(420px, 100%);
  border-radius: 14px;
  overflow: hidden;
  background: #fffaf5;
  box-shadow: 0 6px 18px rgba(60, 30, 10, 0.12);
}

.event-fill { position: absolute; inset: 0; display: flex; opacity: 0.18; }
.event-fill.solid, .fill-half { flex: 1; }
.fill-green { background: #8cd33f; }
.fill-purple { background: #a66bff; }
.fill-orange { background: #ff9f40; }
.fill-blue { background: #4aa3ff; }
.fill-red { background: #ff5a5a; }

.event-content { position: relative; padding: 16px; }
.event-title { font-weight: 700; font-size: 1.05rem; margin-bottom: 8px; }
.event-img { display: block; max-width: 100%; border-radius: 10px; margin-bottom: 8px; }
.event-description { margin: 0 0 8px; line-height: 1.45; }

.icon-row, .button-grid { display: flex; gap: 6px; padding: 0 16px 8px; }
.icon-row.right, .button-grid.right { justify-content: flex-end; }
.icon-img { width: 28px; height: 28px; }
.button-box {
  min-width: 44px;
  padding: 4px 8px;
  border-radius: 8px;
  background: #ece7e4;
  color: #794016;
  font-weight: 700;
  text-align: center;
}
.button-icon { height: 22px; }
.highlight { background: #ffe066; border-radius: 3px; }
.is-hidden { display: none !important; }
"#;

/// Escape text cho nội dung phần tử và giá trị thuộc tính.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
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

/// Container `.timeline` với mọi hàng.
pub fn render_timeline_html(timeline: &RenderedTimeline) -> String {
    let mut out = String::new();
    out.push_str("<div class=\"timeline\" id=\"timeline\">");
    out.push_str("<div class=\"timeline-line\" id=\"timeline-line\"></div>");
    for row in &timeline.rows {
        write_row(&mut out, row);
    }
    out.push_str("</div>");
    out
}

/// Trang độc lập. Không có script nên trục dọc phủ toàn bộ container.
pub fn render_page(timeline: &RenderedTimeline, title: &str, generated_at: DateTime<Utc>) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         <title>{}</title>\n<style>{}\n.timeline-line {{ top: 0; bottom: 0; }}\n</style>\n\
         </head>\n<body>\n",
        escape_html(title),
        BASE_STYLES
    );
    out.push_str(&render_timeline_html(timeline));
    let _ = write!(
        out,
        "\n<footer class=\"timeline-footer\">Generated at {}</footer>\n</body>\n</html>\n",
        generated_at.format("%Y-%m-%d %H:%M UTC")
    );
    out
}

fn write_row(out: &mut String, row: &RenderedRow) {
    out.push_str("<div class=\"timeline-row");
    if row.hidden {
        out.push_str(" is-hidden");
    }
    out.push_str("\"><div class=\"left-events\">");
    for rendered in &row.left {
        write_box(out, rendered, "event-box-left");
    }
    let _ = write!(
        out,
        "</div><div class=\"date-range\">{}</div><div class=\"connector\"></div>\
         <div class=\"right-events\">",
        row.label_html
    );
    for rendered in &row.right {
        write_box(out, rendered, "event-box-right");
    }
    out.push_str("</div></div>");
}

fn write_box(out: &mut String, rendered: &RenderedBox, class: &str) {
    let _ = write!(out, "<div class=\"{class}");
    if rendered.hidden {
        out.push_str(" is-hidden");
    }
    out.push('"');
    if !rendered.tags.is_empty() {
        let _ = write!(out, " data-tags=\"{}\"", escape_html(&rendered.data_tags()));
    }
    out.push('>');

    match &rendered.fill {
        FillSpec::None => {}
        FillSpec::Solid(token) => {
            let _ = write!(out, "<div class=\"event-fill solid {}\"></div>", escape_html(token));
        }
        FillSpec::Split(first, second) => {
            let _ = write!(
                out,
                "<div class=\"event-fill\"><div class=\"fill-half {}\"></div>\
                 <div class=\"fill-half {}\"></div></div>",
                escape_html(first),
                escape_html(second)
            );
        }
    }

    let _ = write!(
        out,
        "<div class=\"event-content\"><div class=\"event-title\">{}</div>",
        rendered.title_html
    );
    if let Some(image) = &rendered.image {
        let _ = write!(
            out,
            "<img src=\"{}\" alt=\"{}\" class=\"event-img\" />",
            escape_html(&image.src),
            escape_html(&image.alt)
        );
    }
    let _ = write!(out, "<p class=\"event-description\">{}</p>", rendered.body_html);
    write_icons(out, &rendered.icons_left, "left");
    write_icons(out, &rendered.icons_right, "right");
    out.push_str("</div>");
    write_buttons(out, &rendered.buttons_left, "left");
    write_buttons(out, &rendered.buttons_right, "right");
    out.push_str("</div>");
}

fn write_icons(out: &mut String, icons: &[IconFace], align: &str) {
    let _ = write!(out, "<div class=\"icon-row {align}\">");
    for icon in icons {
        match icon {
            IconFace::Image { src } => {
                let _ = write!(
                    out,
                    "<img src=\"{}\" alt=\"icon\" class=\"icon-img\" />",
                    escape_html(src)
                );
            }
            IconFace::Glyph { text } => {
                let _ = write!(out, "<span class=\"icon-emoji\">{}</span>", escape_html(text));
            }
        }
    }
    out.push_str("</div>");
}

fn write_buttons(out: &mut String, buttons: &[ButtonFace], align: &str) {
    if buttons.is_empty() {
        return;
    }
    let _ = write!(out, "<div class=\"button-grid {align}\">");
    for button in buttons {
        match button {
            ButtonFace::Icon { src, alt } => {
                let _ = write!(
                    out,
                    "<div class=\"button-box\"><img src=\"{}\" alt=\"{}\" class=\"button-icon\" /></div>",
                    escape_html(src),
                    escape_html(alt)
                );
            }
            ButtonFace::Text { label } => {
                let _ = write!(out, "<div class=\"button-box\">{}</div>", escape_html(label));
            }
        }
    }
    out.push_str("</div>");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{Entry, Side};
    use crate::render::Renderer;
    use crate::TimelineConfig;

    #[test]
    fn body_markup_passes_through_but_title_is_escaped() {
        let entry = Entry::new(Side::Left, "JAN", "A & B")
            .with_body("<span style=\"color: red;\">hot</span>")
            .with_tags(["LATE", "LONG"]);
        let rendered = Renderer::new(&TimelineConfig::default()).render([(0, &entry)]);
        let html = render_timeline_html(&rendered);
        assert!(html.contains("<div class=\"event-title\">A &amp; B</div>"));
        assert!(html.contains("<span style=\"color: red;\">hot</span>"));
        assert!(html.contains("data-tags=\"LATE LONG\""));
    }

    #[test]
    fn two_fills_render_as_halves() {
        let entry = Entry::new(Side::Right, "JAN", "t").with_fills(["fill-purple", "fill-orange"]);
        let rendered = Renderer::new(&TimelineConfig::default()).render([(0, &entry)]);
        let html = render_timeline_html(&rendered);
        assert!(html.contains("<div class=\"fill-half fill-purple\"></div><div class=\"fill-half fill-orange\"></div>"));
        assert!(!html.contains("button-grid"));
    }
}
