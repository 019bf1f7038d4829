use proptest::prelude::*;
use timeline_core::{group_by_date, Entry, Side};

fn arb_entry() -> impl Strategy<Value = Entry> {
    (
        prop_oneof![Just(Side::Left), Just(Side::Right)],
        prop_oneof![
            Just(String::new()),
            Just("JAN 20 - JAN 29".to_string()),
            Just("JAN 27 - FEB 07".to_string()),
            Just("FEB 03 - FEB 12".to_string()),
            Just("feb 03 - feb 12".to_string()),
        ],
        "[a-z]{1,8}",
    )
        .prop_map(|(side, range, title)| Entry::new(side, range, title))
}

proptest! {
    #[test]
    fn flattening_groups_keeps_relative_order(entries in prop::collection::vec(arb_entry(), 0..40)) {
        let groups = group_by_date(entries.iter().enumerate(), "Unscheduled");

        // Thứ tự nhóm là thứ tự xuất hiện đầu tiên.
        let mut first_seen: Vec<&str> = Vec::new();
        for entry in &entries {
            let key = entry.group_key("Unscheduled");
            if !first_seen.contains(&key) {
                first_seen.push(key);
            }
        }
        let group_keys: Vec<&str> = groups.iter().map(|group| group.date_range).collect();
        prop_assert_eq!(group_keys, first_seen);

        // Thành viên mỗi nhóm giữ thứ tự store và không mất entry nào.
        let mut total = 0;
        for group in &groups {
            let indices: Vec<usize> = group.members.iter().map(|(index, _)| *index).collect();
            prop_assert!(indices.windows(2).all(|pair| pair[0] < pair[1]));
            for (index, entry) in &group.members {
                prop_assert_eq!(entries[*index].group_key("Unscheduled"), group.date_range);
                prop_assert_eq!(&entries[*index], *entry);
            }
            total += indices.len();
        }
        prop_assert_eq!(total, entries.len());
    }

    #[test]
    fn side_columns_partition_each_group(entries in prop::collection::vec(arb_entry(), 0..40)) {
        for group in group_by_date(entries.iter().enumerate(), "Unscheduled") {
            prop_assert!(group.left().all(|(_, entry)| entry.side == Side::Left));
            prop_assert!(group.right().all(|(_, entry)| entry.side == Side::Right));
            prop_assert_eq!(group.left().count() + group.right().count(), group.members.len());
        }
    }
}

#[test]
fn grouping_is_exact_string_equality() {
    let entries = vec![
        Entry::new(Side::Left, "FEB 03 - FEB 12", "a"),
        Entry::new(Side::Right, "feb 03 - feb 12", "b"),
        Entry::new(Side::Right, "FEB 03 - FEB 12", "c"),
    ];
    let groups = group_by_date(entries.iter().enumerate(), "Unscheduled");
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].members.len(), 2);
}
