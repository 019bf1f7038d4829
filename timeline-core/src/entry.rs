//! Bản ghi entry đúng như trong payload timeline.

use serde::{Deserialize, Serialize};

/// Phía của trục dọc mà entry được vẽ.
///
/// Giá trị khác `"left"` trong payload đều rơi về bên phải.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    #[default]
    #[serde(other)]
    Right,
}

/// Một mục trên timeline. Tên trường theo định dạng payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Entry {
    pub side: Side,
    #[serde(rename = "range")]
    pub date_range: String,
    pub title: String,
    /// Markup inline, vẽ nguyên văn.
    #[serde(rename = "description")]
    pub body: String,
    pub fills: Vec<String>,
    pub image: Option<String>,
    #[serde(rename = "iconsLeft")]
    pub icons_left: Vec<String>,
    #[serde(rename = "iconsRight")]
    pub icons_right: Vec<String>,
    #[serde(rename = "buttonsLeft")]
    pub buttons_left: Vec<String>,
    #[serde(rename = "buttonsRight")]
    pub buttons_right: Vec<String>,
    pub tags: Vec<String>,
}

impl Entry {
    pub fn new(side: Side, date_range: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            side,
            date_range: date_range.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_fills<I, S>(mut self, fills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fills = fills.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|own| own == tag)
    }

    /// Khoá nhóm; entry không có khoảng ngày dùng chung `unscheduled`.
    pub fn group_key<'a>(&'a self, unscheduled: &'a str) -> &'a str {
        if self.date_range.is_empty() {
            unscheduled
        } else {
            &self.date_range
        }
    }

    /// Màu nền. Bỏ qua các fill từ thứ ba trở đi.
    pub fn fill_spec(&self) -> FillSpec {
        match self.fills.as_slice() {
            [] => FillSpec::None,
            [only] => FillSpec::Solid(only.clone()),
            [first, second, ..] => FillSpec::Split(first.clone(), second.clone()),
        }
    }
}

/// Nền vẽ phía sau một ô entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(tag = "kind", content = "tokens", rename_all = "snake_case")]
pub enum FillSpec {
    #[default]
    None,
    Solid(String),
    Split(String, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_spec_uses_at_most_two_tokens() {
        let entry = Entry::new(Side::Left, "JAN", "t").with_fills(["a", "b", "c"]);
        assert_eq!(
            entry.fill_spec(),
            FillSpec::Split("a".to_string(), "b".to_string())
        );
        assert_eq!(Entry::default().fill_spec(), FillSpec::None);
    }

    #[test]
    fn empty_range_groups_as_unscheduled() {
        let entry = Entry::new(Side::Right, "", "t");
        assert_eq!(entry.group_key("Unscheduled"), "Unscheduled");
    }

    #[test]
    fn payload_keys_map_onto_fields() {
        let entry: Entry = serde_json::from_str(
            r#"{ "side": "left", "range": "JAN 20 - JAN 29", "description": "<b>x</b>",
                 "iconsLeft": ["pace.png"], "buttonsRight": ["MILE"], "tags": ["LATE"] }"#,
        )
        .expect("payload hợp lệ");
        assert_eq!(entry.side, Side::Left);
        assert_eq!(entry.date_range, "JAN 20 - JAN 29");
        assert_eq!(entry.body, "<b>x</b>");
        assert_eq!(entry.icons_left, vec!["pace.png"]);
        assert_eq!(entry.buttons_right, vec!["MILE"]);
        assert!(entry.has_tag("LATE"));
        assert!(entry.image.is_none());
    }
}
