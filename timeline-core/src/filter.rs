//! Lọc tag dạng hội (AND) trên các hàng đã render.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::render::RenderedTimeline;

/// Các tag mà entry phải mang đủ để còn hiển thị. Rỗng nghĩa là không lọc.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActiveFilterSet {
    tags: BTreeSet<String>,
}

impl ActiveFilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Đảo trạng thái của `tag`; trả về tag có đang bật hay không.
    pub fn toggle(&mut self, tag: &str) -> bool {
        if self.tags.remove(tag) {
            false
        } else {
            self.tags.insert(tag.to_string());
            true
        }
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.tags.clear();
    }

    /// `true` khi mọi tag đang bật đều có trong `tags`.
    pub fn admits<S: AsRef<str>>(&self, tags: &[S]) -> bool {
        self.tags
            .iter()
            .all(|active| tags.iter().any(|tag| tag.as_ref() == active))
    }
}

impl<S: Into<String>> FromIterator<S> for ActiveFilterSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            tags: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterOutcome {
    pub visible_boxes: usize,
    pub visible_rows: usize,
}

/// Đặt trạng thái hiển thị của ô và hàng theo `filters`. Không render lại.
///
/// Hàng còn hiển thị khi ít nhất một ô của nó (bên nào cũng được) còn hiển thị.
pub fn apply_filters(timeline: &mut RenderedTimeline, filters: &ActiveFilterSet) -> FilterOutcome {
    let mut outcome = FilterOutcome::default();
    for row in &mut timeline.rows {
        let mut any_visible = false;
        for rendered in row.boxes_mut() {
            rendered.hidden = !filters.admits(&rendered.tags);
            if !rendered.hidden {
                any_visible = true;
                outcome.visible_boxes += 1;
            }
        }
        row.hidden = !any_visible;
        if any_visible {
            outcome.visible_rows += 1;
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_twice_restores_membership() {
        let mut filters = ActiveFilterSet::new();
        assert!(filters.toggle("LATE"));
        assert!(!filters.toggle("LATE"));
        assert!(filters.is_empty());
    }

    #[test]
    fn empty_set_admits_untagged_entries() {
        let filters = ActiveFilterSet::new();
        assert!(filters.admits::<&str>(&[]));
    }

    #[test]
    fn matching_is_conjunctive() {
        let late: ActiveFilterSet = ["LATE"].into_iter().collect();
        assert!(late.admits(&["LATE", "LONG", "LUXURY"]));
        assert!(!late.admits(&["PACE", "NICHE"]));

        let late_long: ActiveFilterSet = ["LATE", "LONG"].into_iter().collect();
        assert!(!late_long.admits(&["LATE"]));
    }
}
