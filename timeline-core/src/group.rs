//! Nhóm entry thành các hàng theo khoảng ngày.

use std::collections::{hash_map::Entry as MapEntry, HashMap};

use crate::entry::{Entry, Side};

/// Các entry có cùng nhãn khoảng ngày, theo thứ tự trong store.
#[derive(Debug, Clone, PartialEq)]
pub struct DateGroup<'a> {
    pub date_range: &'a str,
    pub members: Vec<(usize, &'a Entry)>,
}

impl<'a> DateGroup<'a> {
    pub fn left(&self) -> impl Iterator<Item = (usize, &'a Entry)> + '_ {
        self.side(Side::Left)
    }

    pub fn right(&self) -> impl Iterator<Item = (usize, &'a Entry)> + '_ {
        self.side(Side::Right)
    }

    fn side(&self, side: Side) -> impl Iterator<Item = (usize, &'a Entry)> + '_ {
        self.members
            .iter()
            .copied()
            .filter(move |(_, entry)| entry.side == side)
    }
}

/// Nhóm entry (kèm chỉ số) theo khoảng ngày bằng so sánh chuỗi chính xác.
///
/// Nhóm xếp theo lần xuất hiện đầu tiên; thành viên giữ thứ tự đầu vào.
pub fn group_by_date<'a, I>(entries: I, unscheduled: &'a str) -> Vec<DateGroup<'a>>
where
    I: IntoIterator<Item = (usize, &'a Entry)>,
{
    let mut groups: Vec<DateGroup<'a>> = Vec::new();
    let mut positions: HashMap<&'a str, usize> = HashMap::new();

    for (index, entry) in entries {
        let key = entry.group_key(unscheduled);
        match positions.entry(key) {
            MapEntry::Occupied(slot) => groups[*slot.get()].members.push((index, entry)),
            MapEntry::Vacant(slot) => {
                slot.insert(groups.len());
                groups.push(DateGroup {
                    date_range: key,
                    members: vec![(index, entry)],
                });
            }
        }
    }

    groups
}
