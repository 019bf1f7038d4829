//! Bảng legend nổi: trạng thái thu gọn và vị trí không đè nhãn.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::geometry::Rect;
use crate::TimelineConfig;

/// Trạng thái thu gọn/mở rộng của bảng legend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendPanel {
    collapsed: bool,
}

impl LegendPanel {
    /// Đảo trạng thái; trả về bảng có đang thu gọn hay không.
    pub fn toggle(&mut self) -> bool {
        self.collapsed = !self.collapsed;
        self.collapsed
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    /// Ký tự chỉ hướng ở tiêu đề bảng.
    pub fn indicator(&self) -> &'static str {
        if self.collapsed {
            "▶"
        } else {
            "▼"
        }
    }
}

/// Vị trí legend theo toạ độ viewport. `center_x` là tâm ngang của bảng
/// (bảng được vẽ với `translateX(-50%)`).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LegendPlacement {
    pub center_x: f64,
    pub top: f64,
}

/// Trang nhìn từ phía bộ đặt vị trí legend.
pub trait LegendSurface {
    /// Rect viewport của nhãn ngày ở các hàng đang hiển thị, theo thứ tự document.
    fn visible_label_rects(&self) -> Vec<Rect>;
    /// Chiều cao legend đã render, `None` khi không có phần tử legend.
    fn legend_height(&self) -> Option<f64>;
    fn scroll_y(&self) -> f64;
    fn set_legend_position(&mut self, placement: LegendPlacement);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegendPositioner {
    gutter: f64,
    min_top: f64,
}

impl Default for LegendPositioner {
    fn default() -> Self {
        Self::new(&TimelineConfig::default())
    }
}

impl LegendPositioner {
    pub fn new(config: &TimelineConfig) -> Self {
        Self {
            gutter: config.legend_gutter.max(0.0),
            min_top: config.legend_min_top,
        }
    }

    /// Đặt legend dưới nhãn đầu tiên và không đè nhãn nào.
    ///
    /// `labels` là rect viewport; phép quét chạy trong toạ độ document,
    /// chỉ đẩy bảng xuống và lặp lại tới khi một lượt quét không còn chồng lấn.
    pub fn place(&self, labels: &[Rect], legend_height: f64, scroll_y: f64) -> Option<LegendPlacement> {
        let first = labels.first()?;
        let absolute: Vec<Rect> = labels
            .iter()
            .map(|rect| rect.translated(0.0, scroll_y))
            .collect();

        let floor = absolute[0].bottom() + self.gutter;
        let mut top = (self.min_top + scroll_y).max(floor);

        for _ in 0..=absolute.len() {
            let mut moved = false;
            for label in &absolute {
                let candidate = Rect::new(0.0, top, 0.0, legend_height);
                if candidate.overlaps_vertically(label) {
                    top = label.bottom() + self.gutter;
                    moved = true;
                }
            }
            if !moved {
                break;
            }
        }

        Some(LegendPlacement {
            center_x: first.center_x(),
            top: top - scroll_y,
        })
    }

    /// Đọc surface rồi di chuyển legend. Không làm gì khi thiếu legend
    /// hoặc không có nhãn nào hiển thị.
    pub fn place_legend<S: LegendSurface + ?Sized>(&self, surface: &mut S) {
        let Some(height) = surface.legend_height() else {
            return;
        };
        let labels = surface.visible_label_rects();
        let scroll_y = surface.scroll_y();
        let Some(placement) = self.place(&labels, height, scroll_y) else {
            return;
        };
        debug!(top = placement.top, x = placement.center_x, "legend placed");
        surface.set_legend_position(placement);
    }
}

/// Nút "về đầu trang" có nên hiện hay không.
pub fn back_to_top_visible(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}
