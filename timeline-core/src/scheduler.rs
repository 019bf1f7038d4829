//! Trigger tính lại, gom theo frame và debounce khi resize.
//!
//! Các kiểu ở đây không tự giữ timer. Host lên lịch một frame khi
//! [`FrameCoalescer::request`] yêu cầu và rút nó bằng [`FrameCoalescer::take`];
//! timer resize đối chiếu token với [`Debouncer`] trước khi chạy.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Lý do yêu cầu tính lại.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    ImageLoad,
    Resize,
    /// Các hàng được dựng lại (render đầy đủ, render tìm kiếm, đổi store).
    Render,
    FilterChange,
    Search,
    LegendToggle,
    Scroll,
}

impl Trigger {
    pub fn recompute(self) -> Recompute {
        match self {
            Trigger::ImageLoad
            | Trigger::Resize
            | Trigger::Render
            | Trigger::FilterChange
            | Trigger::Search => Recompute::ALL,
            Trigger::LegendToggle | Trigger::Scroll => Recompute::LEGEND,
        }
    }
}

/// Các pass cần chạy ở frame tới. `layout` gồm trục và đường nối.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recompute {
    pub layout: bool,
    pub legend: bool,
}

impl Recompute {
    pub const NONE: Recompute = Recompute {
        layout: false,
        legend: false,
    };
    pub const LEGEND: Recompute = Recompute {
        layout: false,
        legend: true,
    };
    pub const ALL: Recompute = Recompute {
        layout: true,
        legend: true,
    };

    pub fn merge(self, other: Recompute) -> Recompute {
        Recompute {
            layout: self.layout || other.layout,
            legend: self.legend || other.legend,
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.layout && !self.legend
    }
}

/// Gom mọi trigger phát sinh trước frame kế tiếp thành một pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameCoalescer {
    pending: Recompute,
    requests: u32,
}

impl FrameCoalescer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ghi nhận `trigger`. Chỉ trả `true` cho yêu cầu đầu tiên kể từ lần
    /// [`take`](Self::take) trước, tức là khi cần lên lịch một frame.
    pub fn request(&mut self, trigger: Trigger) -> bool {
        let first = self.requests == 0;
        self.pending = self.pending.merge(trigger.recompute());
        self.requests = self.requests.saturating_add(1);
        first
    }

    pub fn is_pending(&self) -> bool {
        self.requests > 0
    }

    /// Số trigger đã gộp vào pass đang chờ.
    pub fn pending_requests(&self) -> u32 {
        self.requests
    }

    /// Rút pass đang chờ.
    pub fn take(&mut self) -> Option<Recompute> {
        if self.requests == 0 {
            return None;
        }
        self.requests = 0;
        Some(std::mem::take(&mut self.pending))
    }
}

/// Debounce kiểu huỷ-rồi-lên-lịch-lại bằng token thế hệ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debouncer {
    quiet: Duration,
    generation: u64,
    armed: bool,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            generation: 0,
            armed: false,
        }
    }

    pub fn from_millis(quiet_ms: u32) -> Self {
        Self::new(Duration::from_millis(u64::from(quiet_ms)))
    }

    pub fn quiet(&self) -> Duration {
        self.quiet
    }

    /// Huỷ hạn chờ hiện tại và bắt đầu hạn mới.
    pub fn schedule(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.armed = true;
        self.generation
    }

    /// `true` khi `token` là token mới nhất; tắt hạn chờ nếu thành công.
    pub fn fire(&mut self, token: u64) -> bool {
        if self.armed && token == self.generation {
            self.armed = false;
            true
        } else {
            false
        }
    }

    pub fn cancel(&mut self) {
        self.armed = false;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triggers_within_a_frame_coalesce() {
        let mut frames = FrameCoalescer::new();
        assert!(frames.request(Trigger::Scroll));
        assert!(!frames.request(Trigger::ImageLoad));
        assert!(!frames.request(Trigger::Resize));
        assert_eq!(frames.pending_requests(), 3);
        assert_eq!(frames.take(), Some(Recompute::ALL));
        assert_eq!(frames.take(), None);
        assert!(frames.request(Trigger::LegendToggle));
        assert_eq!(frames.take(), Some(Recompute::LEGEND));
    }

    #[test]
    fn only_latest_resize_token_fires() {
        let mut debounce = Debouncer::from_millis(50);
        let stale = debounce.schedule();
        let latest = debounce.schedule();
        assert!(!debounce.fire(stale));
        assert!(debounce.fire(latest));
        assert!(!debounce.fire(latest));
        assert_eq!(debounce.quiet(), Duration::from_millis(50));
    }

    #[test]
    fn cancel_disarms_pending_token() {
        let mut debounce = Debouncer::from_millis(50);
        let token = debounce.schedule();
        debounce.cancel();
        assert!(!debounce.fire(token));
    }
}
