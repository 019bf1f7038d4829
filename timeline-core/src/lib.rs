//! Logic lõi của timeline: mô hình dữ liệu, nhóm theo ngày, bộ lọc/tìm kiếm
//! và engine hình học (trục dọc, đường nối, vị trí legend).
//!
//! Crate này không phụ thuộc DOM. Phần đo đạc trình duyệt đi qua trait
//! [`LayoutSurface`] và [`LegendSurface`], nên mọi thuật toán đều chạy được
//! headless trong test.

pub mod controller;
pub mod entry;
pub mod filter;
pub mod geometry;
pub mod group;
pub mod html;
pub mod legend;
pub mod render;
pub mod scheduler;
pub mod search;
pub mod store;

use serde::{Deserialize, Serialize};

pub use controller::TimelineController;
pub use entry::{Entry, FillSpec, Side};
pub use filter::{apply_filters, ActiveFilterSet, FilterOutcome};
pub use geometry::{
    connector_layout, nearest_left_anchor, nearest_right_anchor, spine_layout, BaseConnector,
    BoxMeasure, ConnectorKind, ConnectorLayout, GeometryEngine, LayoutSurface, Rect, RowMeasure,
    Segment, SpineLayout,
};
pub use group::{group_by_date, DateGroup};
pub use legend::{
    back_to_top_visible, LegendPanel, LegendPlacement, LegendPositioner, LegendSurface,
};
pub use render::{ButtonFace, IconFace, RenderedBox, RenderedImage, RenderedRow, RenderedTimeline, Renderer};
pub use scheduler::{Debouncer, FrameCoalescer, Recompute, Trigger};
pub use search::{entry_matches, highlight, plain_text};
pub use store::EntryStore;

/// Cấu hình hiển thị và các hằng số hình học.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TimelineConfig {
    /// Tiền tố cho đường dẫn ảnh/icon tương đối.
    pub asset_base_url: String,
    /// Khoảng lặng (ms) trước khi tính lại bố cục sau khi resize.
    pub resize_quiet_ms: u32,
    /// Khoảng đệm giữa legend và nhãn ngày.
    pub legend_gutter: f64,
    /// Khoảng cách tối thiểu từ mép trên viewport tới legend.
    pub legend_min_top: f64,
    /// Nửa độ dày nét của đường nối, trừ vào tâm nhãn ngày.
    pub connector_half_stroke: f64,
    pub connector_thickness: f64,
    /// Ngưỡng cuộn (px) để hiện nút "về đầu trang".
    pub back_to_top_threshold: f64,
    /// Nhãn nhóm cho entry không có khoảng ngày.
    pub unscheduled_label: String,
    /// Danh sách tag cho các nút lọc; rỗng thì lấy từ dữ liệu.
    pub filter_tags: Vec<String>,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            asset_base_url: String::new(),
            resize_quiet_ms: 50,
            legend_gutter: 10.0,
            legend_min_top: 10.0,
            connector_half_stroke: 2.0,
            connector_thickness: 4.0,
            back_to_top_threshold: 300.0,
            unscheduled_label: "Unscheduled".to_string(),
            filter_tags: Vec::new(),
        }
    }
}

/// Lỗi chung khi đọc dữ liệu timeline.
#[derive(Debug, thiserror::Error)]
pub enum TimelineError {
    #[error("Dữ liệu đầu vào thiếu danh sách entry")]
    MissingData,
    #[error("Không đọc được dữ liệu: {0}")]
    Parse(String),
    #[error("Entry #{index} không hợp lệ: {reason}")]
    InvalidEntry { index: usize, reason: String },
}
