//! Chủ sở hữu trạng thái timeline: store, bộ lọc, từ khoá và các hàng đã render.
//!
//! Mọi thao tác thay đổi trạng thái đều kết thúc bằng việc đẩy một [`Trigger`]
//! vào bộ gom frame; host rút nó bằng [`TimelineController::take_frame`] rồi
//! chạy engine hình học và bộ đặt vị trí legend tương ứng.

use tracing::debug;

use crate::entry::Entry;
use crate::filter::{apply_filters, ActiveFilterSet, FilterOutcome};
use crate::legend::LegendPanel;
use crate::render::{RenderedTimeline, Renderer};
use crate::scheduler::{FrameCoalescer, Recompute, Trigger};
use crate::store::EntryStore;
use crate::TimelineConfig;

#[derive(Debug, Clone)]
pub struct TimelineController {
    config: TimelineConfig,
    renderer: Renderer,
    store: EntryStore,
    filters: ActiveFilterSet,
    query: String,
    legend: LegendPanel,
    rendered: RenderedTimeline,
    /// Tăng sau mỗi lần render lại đầy đủ để host dựng lại node của hàng.
    generation: u64,
    frames: FrameCoalescer,
}

impl TimelineController {
    pub fn new(config: TimelineConfig) -> Self {
        Self::with_entries(config, Vec::new())
    }

    pub fn with_entries(config: TimelineConfig, entries: Vec<Entry>) -> Self {
        let mut controller = Self {
            renderer: Renderer::new(&config),
            config,
            store: EntryStore::from_entries(entries),
            filters: ActiveFilterSet::new(),
            query: String::new(),
            legend: LegendPanel::default(),
            rendered: RenderedTimeline::default(),
            generation: 0,
            frames: FrameCoalescer::new(),
        };
        controller.rerender(Trigger::Render);
        controller
    }

    /// Thay store và render toàn bộ.
    pub fn set_entries(&mut self, entries: Vec<Entry>) {
        self.store.set_entries(entries);
        self.full_render();
    }

    /// Thêm một entry và render toàn bộ store.
    pub fn add_entry(&mut self, entry: Entry) {
        self.store.add_entry(entry);
        self.full_render();
    }

    /// Render lại các entry khớp `query` và đánh dấu chỗ khớp.
    ///
    /// Các hàng được dựng lại từ đầu và bộ lọc tag bị xoá, nên `search("")`
    /// hiện toàn bộ store không lọc.
    pub fn search(&mut self, query: &str) {
        self.query = query.to_string();
        self.filters.clear();
        self.rerender(Trigger::Search);
    }

    /// Đảo `tag` trong bộ lọc và áp lại hiển thị.
    /// Trả về tag có đang bật hay không.
    pub fn toggle_tag_filter(&mut self, tag: &str) -> bool {
        let active = self.filters.toggle(tag);
        debug!(tag, active, "tag filter toggled");
        self.apply_filters();
        active
    }

    /// Cập nhật hiển thị ô và hàng, không render lại.
    pub fn apply_filters(&mut self) -> FilterOutcome {
        let outcome = apply_filters(&mut self.rendered, &self.filters);
        debug!(
            active = self.filters.len(),
            visible_boxes = outcome.visible_boxes,
            visible_rows = outcome.visible_rows,
            "filters applied"
        );
        self.publish(Trigger::FilterChange);
        outcome
    }

    /// Thu gọn hoặc mở rộng legend; trả về legend có đang thu gọn hay không.
    pub fn toggle_legend(&mut self) -> bool {
        let collapsed = self.legend.toggle();
        self.publish(Trigger::LegendToggle);
        collapsed
    }

    /// Ghi nhận trigger từ bên ngoài (ảnh tải xong, resize, cuộn).
    /// Trả `true` khi host cần lên lịch một frame.
    pub fn request(&mut self, trigger: Trigger) -> bool {
        self.frames.request(trigger)
    }

    /// Rút phần tính lại đang chờ cho frame này.
    pub fn take_frame(&mut self) -> Option<Recompute> {
        self.frames.take()
    }

    pub fn has_pending_frame(&self) -> bool {
        self.frames.is_pending()
    }

    /// Đổi store thì bỏ từ khoá và bộ lọc, giống `search("")`.
    fn full_render(&mut self) {
        self.query.clear();
        self.filters.clear();
        self.rerender(Trigger::Render);
    }

    fn rerender(&mut self, trigger: Trigger) {
        let mut rendered = if self.query.is_empty() {
            self.renderer.render(self.store.indexed())
        } else {
            self.renderer.render(self.store.matching(&self.query))
        };
        if !self.filters.is_empty() {
            apply_filters(&mut rendered, &self.filters);
        }
        rendered.apply_highlight(&self.query);

        debug!(
            entries = self.store.len(),
            rows = rendered.rows.len(),
            boxes = rendered.box_count(),
            query = %self.query,
            "timeline rendered"
        );
        self.rendered = rendered;
        self.generation = self.generation.wrapping_add(1);
        self.publish(trigger);
    }

    fn publish(&mut self, trigger: Trigger) {
        self.frames.request(trigger);
    }

    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    pub fn store(&self) -> &EntryStore {
        &self.store
    }

    pub fn filters(&self) -> &ActiveFilterSet {
        &self.filters
    }

    pub fn is_tag_active(&self, tag: &str) -> bool {
        self.filters.contains(tag)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn legend(&self) -> LegendPanel {
        self.legend
    }

    pub fn rendered(&self) -> &RenderedTimeline {
        &self.rendered
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Tag hiển thị thành nút lọc: danh sách trong config, không có thì lấy từ store.
    pub fn filter_tags(&self) -> Vec<String> {
        if self.config.filter_tags.is_empty() {
            self.store.tag_vocabulary()
        } else {
            self.config.filter_tags.clone()
        }
    }
}
