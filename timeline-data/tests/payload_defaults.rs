use serde_json::json;
use timeline_core::{FillSpec, Side, TimelineError};
use timeline_data::{parse_entries_str, parse_entries_value};

#[test]
fn missing_and_null_fields_fall_back_to_empty() {
    let entries = parse_entries_value(&json!([
        { "title": "Bare" },
        { "side": "left", "range": null, "image": null, "tags": null, "fills": ["fill-red"] }
    ]))
    .expect("payload hợp lệ");

    assert_eq!(entries[0].side, Side::Right);
    assert!(entries[0].tags.is_empty());
    assert!(entries[0].image.is_none());
    assert_eq!(entries[0].fill_spec(), FillSpec::None);

    assert_eq!(entries[1].side, Side::Left);
    assert_eq!(entries[1].date_range, "");
    assert_eq!(entries[1].fill_spec(), FillSpec::Solid("fill-red".to_string()));
}

#[test]
fn unknown_side_renders_right() {
    let entries = parse_entries_str(r#"[{ "side": "center", "title": "x" }]"#).expect("payload hợp lệ");
    assert_eq!(entries[0].side, Side::Right);
}

#[test]
fn wrapped_lists_are_accepted() {
    let events = parse_entries_value(&json!({ "events": [{ "title": "a" }] })).expect("events");
    let entries = parse_entries_value(&json!({ "entries": [{ "title": "b" }] })).expect("entries");
    assert_eq!(events[0].title, "a");
    assert_eq!(entries[0].title, "b");
}

#[test]
fn malformed_payloads_are_typed_errors() {
    assert!(matches!(
        parse_entries_value(&json!({ "items": [] })),
        Err(TimelineError::MissingData)
    ));
    assert!(matches!(
        parse_entries_value(&json!("text")),
        Err(TimelineError::Parse(_))
    ));
    assert!(matches!(
        parse_entries_value(&json!([{ "title": "ok" }, 5])),
        Err(TimelineError::InvalidEntry { index: 1, .. })
    ));
    assert!(matches!(
        parse_entries_value(&json!([{ "tags": "LATE" }])),
        Err(TimelineError::InvalidEntry { index: 0, .. })
    ));
    assert!(matches!(parse_entries_str("[1,"), Err(TimelineError::Parse(_))));
}
