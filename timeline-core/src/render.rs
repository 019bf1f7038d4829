//! Renderer: chuyển entry thành cấu trúc hàng/ô mà trang được vẽ từ đó.
//!
//! [`RenderedTimeline`] được dựng lại sau mỗi lần render đầy đủ hoặc tìm kiếm,
//! sau đó chỉ bị sửa bởi thay đổi hiển thị và đánh dấu.

use serde::Serialize;

use crate::entry::{Entry, FillSpec, Side};
use crate::group::group_by_date;
use crate::html::escape_html;
use crate::search::{highlight, plain_text};
use crate::TimelineConfig;

/// Nhãn nút được vẽ bằng hình thay vì chữ.
pub const ICON_BUTTONS: [&str; 5] = ["MILE", "MED", "LONG", "DIRT", "SHORT"];

const IMAGE_SUFFIXES: [&str; 4] = [".png", ".jpg", ".jpeg", ".svg"];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IconFace {
    Image { src: String },
    Glyph { text: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ButtonFace {
    Icon { src: String, alt: String },
    Text { label: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedImage {
    pub src: String,
    pub alt: String,
}

/// Một ô entry trong hàng.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedBox {
    pub entry_index: usize,
    pub side: Side,
    pub tags: Vec<String>,
    pub hidden: bool,
    pub fill: FillSpec,
    pub title_html: String,
    pub image: Option<RenderedImage>,
    pub body_html: String,
    pub icons_left: Vec<IconFace>,
    pub icons_right: Vec<IconFace>,
    pub buttons_left: Vec<ButtonFace>,
    pub buttons_right: Vec<ButtonFace>,
}

impl RenderedBox {
    /// Danh sách tag cách nhau bởi dấu cách, như trong `data-tags`.
    pub fn data_tags(&self) -> String {
        self.tags.join(" ")
    }
}

/// Một nhóm ngày.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedRow {
    pub date_range: String,
    pub label_html: String,
    pub hidden: bool,
    pub left: Vec<RenderedBox>,
    pub right: Vec<RenderedBox>,
}

impl RenderedRow {
    pub fn boxes(&self) -> impl Iterator<Item = &RenderedBox> {
        self.left.iter().chain(&self.right)
    }

    pub fn boxes_mut(&mut self) -> impl Iterator<Item = &mut RenderedBox> {
        self.left.iter_mut().chain(self.right.iter_mut())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderedTimeline {
    pub rows: Vec<RenderedRow>,
}

impl RenderedTimeline {
    pub fn visible_rows(&self) -> impl Iterator<Item = &RenderedRow> {
        self.rows.iter().filter(|row| !row.hidden)
    }

    pub fn boxes(&self) -> impl Iterator<Item = &RenderedBox> {
        self.rows.iter().flat_map(RenderedRow::boxes)
    }

    pub fn box_count(&self) -> usize {
        self.boxes().count()
    }

    pub fn visible_box_count(&self) -> usize {
        self.boxes().filter(|rendered| !rendered.hidden).count()
    }

    /// Chỉ số store theo thứ tự hiển thị (từng hàng, cột trái trước).
    pub fn entry_indices(&self) -> Vec<usize> {
        self.boxes().map(|rendered| rendered.entry_index).collect()
    }

    /// Dựng lại markup tiêu đề, nội dung và nhãn với `query` được đánh dấu.
    ///
    /// Làm việc trên text hiện tại nên highlight cũ và markup inline của nội dung
    /// bị thay thế, không lồng nhau.
    pub fn apply_highlight(&mut self, query: &str) {
        if query.is_empty() {
            return;
        }
        for row in &mut self.rows {
            row.label_html = highlight(&plain_text(&row.label_html), query);
            for rendered in row.boxes_mut() {
                rendered.title_html = highlight(&plain_text(&rendered.title_html), query);
                rendered.body_html = highlight(&plain_text(&rendered.body_html), query);
            }
        }
    }
}

/// Dựng [`RenderedTimeline`] với đường dẫn asset đã được giải.
#[derive(Debug, Clone, PartialEq)]
pub struct Renderer {
    asset_base_url: String,
    unscheduled_label: String,
}

impl Renderer {
    pub fn new(config: &TimelineConfig) -> Self {
        Self {
            asset_base_url: config.asset_base_url.clone(),
            unscheduled_label: config.unscheduled_label.clone(),
        }
    }

    pub fn render<'a, I>(&'a self, entries: I) -> RenderedTimeline
    where
        I: IntoIterator<Item = (usize, &'a Entry)>,
    {
        let rows = group_by_date(entries, &self.unscheduled_label)
            .into_iter()
            .map(|group| RenderedRow {
                date_range: group.date_range.to_string(),
                label_html: escape_html(group.date_range),
                hidden: false,
                left: group
                    .left()
                    .map(|(index, entry)| self.render_box(index, entry))
                    .collect(),
                right: group
                    .right()
                    .map(|(index, entry)| self.render_box(index, entry))
                    .collect(),
            })
            .collect();

        RenderedTimeline { rows }
    }

    fn render_box(&self, index: usize, entry: &Entry) -> RenderedBox {
        RenderedBox {
            entry_index: index,
            side: entry.side,
            tags: entry.tags.clone(),
            hidden: false,
            fill: entry.fill_spec(),
            title_html: escape_html(&entry.title),
            image: entry.image.as_deref().filter(|path| !path.is_empty()).map(|path| {
                RenderedImage {
                    src: self.resolve(path),
                    alt: if entry.title.is_empty() {
                        "event image".to_string()
                    } else {
                        entry.title.clone()
                    },
                }
            }),
            body_html: entry.body.clone(),
            icons_left: entry.icons_left.iter().map(|icon| self.icon_face(icon)).collect(),
            icons_right: entry.icons_right.iter().map(|icon| self.icon_face(icon)).collect(),
            buttons_left: entry.buttons_left.iter().map(|label| self.button_face(label)).collect(),
            buttons_right: entry
                .buttons_right
                .iter()
                .map(|label| self.button_face(label))
                .collect(),
        }
    }

    /// Đường dẫn ảnh và URL từ xa thành `<img>`, còn lại là ký tự.
    pub fn icon_face(&self, reference: &str) -> IconFace {
        let is_image = reference.starts_with("http")
            || IMAGE_SUFFIXES
                .iter()
                .any(|suffix| reference.ends_with(suffix));
        if is_image {
            IconFace::Image {
                src: self.resolve(reference),
            }
        } else {
            IconFace::Glyph {
                text: reference.to_string(),
            }
        }
    }

    pub fn button_face(&self, label: &str) -> ButtonFace {
        let upper = label.to_uppercase();
        if ICON_BUTTONS.contains(&upper.as_str()) {
            ButtonFace::Icon {
                src: self.resolve(&format!("icons/{}.png", upper.to_lowercase())),
                alt: label.to_string(),
            }
        } else {
            ButtonFace::Text {
                label: label.to_string(),
            }
        }
    }

    fn resolve(&self, path: &str) -> String {
        if path.starts_with("http") || self.asset_base_url.is_empty() {
            return path.to_string();
        }
        match (self.asset_base_url.ends_with('/'), path.starts_with('/')) {
            (true, true) => format!("{}{}", self.asset_base_url, &path[1..]),
            (false, false) => format!("{}/{}", self.asset_base_url, path),
            _ => format!("{}{}", self.asset_base_url, path),
        }
    }
}
