//! Engine hình học: trục dọc và đường nối của từng hàng.
//!
//! Số đo lấy từ [`LayoutSurface`] theo toạ độ viewport (giá trị mà
//! `getBoundingClientRect` trả về) và được đổi sang toạ độ tương đối với
//! container hoặc hàng trước khi ghi lại, nên cuộn trang không làm lệch kết quả.
//! Mỗi pass đọc hết rồi mới ghi.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::TimelineConfig;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.left + self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.top + self.height / 2.0
    }

    /// Rect này tính tương đối với góc trên trái của `origin`.
    pub fn relative_to(&self, origin: &Rect) -> Rect {
        Rect {
            left: self.left - origin.left,
            top: self.top - origin.top,
            ..*self
        }
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Rect {
        Rect {
            left: self.left + dx,
            top: self.top + dy,
            ..*self
        }
    }

    pub fn overlaps_vertically(&self, other: &Rect) -> bool {
        self.top < other.bottom() && self.bottom() > other.top
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoxMeasure {
    pub rect: Rect,
    pub hidden: bool,
}

/// Mọi thứ pass đường nối cần từ một hàng.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RowMeasure {
    pub hidden: bool,
    pub row: Rect,
    /// `None` khi hàng không có phần tử nhãn ngày.
    pub label: Option<Rect>,
    pub left: Vec<BoxMeasure>,
    pub right: Vec<BoxMeasure>,
}

/// Vị trí trục dọc tương đối với container; luôn căn giữa ở `left: 50%`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SpineLayout {
    pub top: f64,
    pub height: f64,
}

impl SpineLayout {
    pub const COLLAPSED: SpineLayout = SpineLayout {
        top: 0.0,
        height: 0.0,
    };
}

/// Đoạn ngang vẽ theo toạ độ tương đối với hàng.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Segment {
    pub top: f64,
    pub left: f64,
    pub width: f64,
}

impl Segment {
    /// Đoạn nằm giữa hai toạ độ x, theo thứ tự nào cũng được.
    pub fn between(top: f64, a: f64, b: f64) -> Self {
        Segment {
            top,
            left: a.min(b),
            width: (b - a).abs(),
        }
    }
}

/// Phần tử đường nối có sẵn duy nhất của hàng.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BaseConnector {
    pub visible: bool,
    pub top: f64,
    pub left: f64,
    pub width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectorKind {
    /// Hai đoạn; đường nối gốc bị ẩn.
    Both,
    LeftOnly,
    RightOnly,
    /// Đường nối gốc rộng 0 tại mép trái của nhãn.
    Stub,
}

/// Cách vẽ đường nối cho một hàng. `segments` có hai phần tử với
/// [`ConnectorKind::Both`], ngoài ra thì rỗng.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectorLayout {
    pub kind: ConnectorKind,
    pub center_y: f64,
    pub base: BaseConnector,
    pub segments: Vec<Segment>,
}

/// Ô trái đang hiển thị gần trục nhất (mép phải lớn nhất).
/// Bằng nhau tuyệt đối thì giữ ô đầu tiên.
pub fn nearest_left_anchor(boxes: &[BoxMeasure]) -> Option<Rect> {
    boxes
        .iter()
        .filter(|measure| !measure.hidden)
        .map(|measure| measure.rect)
        .fold(None, |best: Option<Rect>, rect| match best {
            Some(current) if rect.right() <= current.right() => Some(current),
            _ => Some(rect),
        })
}

/// Ô phải đang hiển thị gần trục nhất (mép trái nhỏ nhất).
/// Bằng nhau tuyệt đối thì giữ ô đầu tiên.
pub fn nearest_right_anchor(boxes: &[BoxMeasure]) -> Option<Rect> {
    boxes
        .iter()
        .filter(|measure| !measure.hidden)
        .map(|measure| measure.rect)
        .fold(None, |best: Option<Rect>, rect| match best {
            Some(current) if rect.left >= current.left => Some(current),
            _ => Some(rect),
        })
}

/// Trục từ đỉnh nhãn đầu tiên tới đáy nhãn cuối cùng.
pub fn spine_layout(container: Rect, first_label: Rect, last_label: Rect) -> SpineLayout {
    let top = first_label.top - container.top;
    let bottom = last_label.bottom() - container.top;
    SpineLayout {
        top: top.max(0.0),
        height: (bottom - top).max(0.0),
    }
}

/// Bố cục đường nối cho một hàng, `None` nếu hàng không có nhãn.
pub fn connector_layout(row: &RowMeasure, half_stroke: f64) -> Option<ConnectorLayout> {
    let label = row.label?.relative_to(&row.row);
    let center_y = label.center_y() - half_stroke;

    let left = nearest_left_anchor(&row.left).map(|rect| rect.relative_to(&row.row));
    let right = nearest_right_anchor(&row.right).map(|rect| rect.relative_to(&row.row));

    let layout = match (left, right) {
        (Some(left), Some(right)) => ConnectorLayout {
            kind: ConnectorKind::Both,
            center_y,
            base: BaseConnector {
                visible: false,
                top: center_y,
                left: label.left,
                width: 0.0,
            },
            segments: vec![
                Segment::between(center_y, left.right(), label.left),
                Segment::between(center_y, label.right(), right.left),
            ],
        },
        (Some(left), None) => {
            let span = Segment::between(center_y, left.right(), label.left);
            ConnectorLayout {
                kind: ConnectorKind::LeftOnly,
                center_y,
                base: BaseConnector {
                    visible: true,
                    top: center_y,
                    left: span.left,
                    width: span.width,
                },
                segments: Vec::new(),
            }
        }
        (None, Some(right)) => {
            let span = Segment::between(center_y, label.right(), right.left);
            ConnectorLayout {
                kind: ConnectorKind::RightOnly,
                center_y,
                base: BaseConnector {
                    visible: true,
                    top: center_y,
                    left: span.left,
                    width: span.width,
                },
                segments: Vec::new(),
            }
        }
        (None, None) => ConnectorLayout {
            kind: ConnectorKind::Stub,
            center_y,
            base: BaseConnector {
                visible: true,
                top: center_y,
                left: label.left,
                width: 0.0,
            },
            segments: Vec::new(),
        },
    };
    Some(layout)
}

/// Timeline đã render, nhìn từ phía engine hình học.
///
/// Hàng được đánh chỉ số theo thứ tự trong document. Implementation báo
/// trạng thái ẩn như đã render; engine không bao giờ đổi hiển thị.
pub trait LayoutSurface {
    /// Container của timeline, `None` khi chưa mount.
    fn container_rect(&self) -> Option<Rect>;
    fn row_count(&self) -> usize;
    fn measure_row(&self, row: usize) -> Option<RowMeasure>;
    fn set_spine(&mut self, spine: SpineLayout);
    /// Xoá mọi đoạn đã vẽ trước đó trong `row`.
    fn clear_segments(&mut self, row: usize);
    fn draw_segment(&mut self, row: usize, segment: Segment);
    fn set_base_connector(&mut self, row: usize, base: BaseConnector);
}

/// Tính lại trục và đường nối từ số đo hiện tại.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryEngine {
    half_stroke: f64,
}

impl Default for GeometryEngine {
    fn default() -> Self {
        Self::new(&TimelineConfig::default())
    }
}

impl GeometryEngine {
    pub fn new(config: &TimelineConfig) -> Self {
        Self {
            half_stroke: config.connector_half_stroke,
        }
    }

    /// Trục và đường nối trong một pass.
    pub fn recompute<S: LayoutSurface + ?Sized>(&self, surface: &mut S) {
        self.recompute_spine(surface);
        self.recompute_connectors(surface);
    }

    pub fn recompute_spine<S: LayoutSurface + ?Sized>(&self, surface: &mut S) {
        let Some(container) = surface.container_rect() else {
            warn!("timeline container missing, spine collapsed");
            surface.set_spine(SpineLayout::COLLAPSED);
            return;
        };

        let visible: Vec<RowMeasure> = (0..surface.row_count())
            .filter_map(|row| surface.measure_row(row))
            .filter(|measure| !measure.hidden)
            .collect();

        let (Some(first), Some(last)) = (visible.first(), visible.last()) else {
            surface.set_spine(SpineLayout::COLLAPSED);
            return;
        };
        let (Some(first_label), Some(last_label)) = (first.label, last.label) else {
            warn!("first or last visible row has no date label, spine left unchanged");
            return;
        };

        let spine = spine_layout(container, first_label, last_label);
        debug!(
            rows = visible.len(),
            top = spine.top,
            height = spine.height,
            "spine recomputed"
        );
        surface.set_spine(spine);
    }

    pub fn recompute_connectors<S: LayoutSurface + ?Sized>(&self, surface: &mut S) {
        let plans: Vec<(usize, Option<ConnectorLayout>)> = (0..surface.row_count())
            .map(|row| {
                let layout = surface
                    .measure_row(row)
                    .filter(|measure| !measure.hidden)
                    .and_then(|measure| connector_layout(&measure, self.half_stroke));
                (row, layout)
            })
            .collect();

        let mut drawn = 0;
        for (row, layout) in plans {
            surface.clear_segments(row);
            let Some(layout) = layout else {
                continue;
            };
            surface.set_base_connector(row, layout.base);
            for segment in &layout.segments {
                surface.draw_segment(row, *segment);
                drawn += 1;
            }
        }
        debug!(segments = drawn, "connectors recomputed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visible(left: f64, width: f64) -> BoxMeasure {
        BoxMeasure {
            rect: Rect::new(left, 0.0, width, 50.0),
            hidden: false,
        }
    }

    #[test]
    fn left_anchor_prefers_rightmost_edge_and_first_on_tie() {
        let boxes = [visible(0.0, 100.0), visible(20.0, 80.0), visible(10.0, 50.0)];
        assert_eq!(nearest_left_anchor(&boxes), Some(boxes[0].rect));
    }

    #[test]
    fn right_anchor_skips_hidden_boxes() {
        let mut boxes = [visible(600.0, 100.0), visible(650.0, 100.0)];
        boxes[0].hidden = true;
        assert_eq!(nearest_right_anchor(&boxes), Some(boxes[1].rect));
        boxes[1].hidden = true;
        assert_eq!(nearest_right_anchor(&boxes), None);
    }

    #[test]
    fn stub_connector_sits_on_label_left_edge() {
        let row = RowMeasure {
            hidden: false,
            row: Rect::new(0.0, 100.0, 1000.0, 200.0),
            label: Some(Rect::new(450.0, 180.0, 100.0, 40.0)),
            left: Vec::new(),
            right: Vec::new(),
        };
        let layout = connector_layout(&row, 2.0).expect("row has a label");
        assert_eq!(layout.kind, ConnectorKind::Stub);
        assert_eq!(layout.center_y, 98.0);
        assert_eq!(
            layout.base,
            BaseConnector {
                visible: true,
                top: 98.0,
                left: 450.0,
                width: 0.0
            }
        );
    }

    #[test]
    fn spine_height_is_clamped() {
        let container = Rect::new(0.0, 0.0, 100.0, 100.0);
        let first = Rect::new(0.0, 80.0, 10.0, 10.0);
        let last = Rect::new(0.0, 20.0, 10.0, 10.0);
        assert_eq!(spine_layout(container, first, last).height, 0.0);
    }
}
