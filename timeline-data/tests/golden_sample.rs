use timeline_core::{
    group_by_date, html::render_timeline_html, ButtonFace, FillSpec, IconFace, TimelineController,
};
use timeline_data::{sample_config, sample_entries};

const SAMPLE_RANGES: [&str; 14] = [
    "JAN 20 - JAN 29",
    "JAN 27 - FEB 07",
    "FEB 03 - FEB 12",
    "FEB 07 - MAR 27",
    "FEB 09 - FEB 17",
    "FEB 15 - FEB 27",
    "FEB 23 - MAR 03",
    "FEB 28 - MAR 08",
    "MAR 06 - MAR 17",
    "MAR 13 - MAR 24",
    "MAR 21 - APR 01",
    "MAR 21 - APR 12",
    "MAR 29 - APR 11",
    "APR 07 - APR 14",
];

fn controller() -> TimelineController {
    let entries = sample_entries().expect("Không đọc được dữ liệu mẫu");
    TimelineController::with_entries(sample_config(), entries)
}

fn visible_titles(controller: &TimelineController) -> Vec<String> {
    let entries = controller.store().entries();
    controller
        .rendered()
        .boxes()
        .filter(|rendered| !rendered.hidden)
        .map(|rendered| entries[rendered.entry_index].title.clone())
        .collect()
}

#[test]
fn sample_groups_in_first_appearance_order() {
    let entries = sample_entries().expect("Không đọc được dữ liệu mẫu");
    assert_eq!(entries.len(), 32);

    let groups = group_by_date(entries.iter().enumerate(), "Unscheduled");
    let ranges: Vec<&str> = groups.iter().map(|group| group.date_range).collect();
    assert_eq!(ranges, SAMPLE_RANGES);

    let second = &groups[1];
    let left: Vec<&str> = second.left().map(|(_, entry)| entry.title.as_str()).collect();
    let right: Vec<&str> = second.right().map(|(_, entry)| entry.title.as_str()).collect();
    assert_eq!(left, vec!["NY Haru Urara & NY T.M. Opera"]);
    assert_eq!(
        right,
        vec!["Admire Vega Power & Fukukitaru Speed", "Meishi Doto Stamina Card"]
    );
}

#[test]
fn urara_search_matches_title_and_body_mentions() {
    let mut controller = controller();
    controller.search("urara");
    assert_eq!(
        visible_titles(&controller),
        vec![
            "NY Haru Urara & NY T.M. Opera",
            "Kitasan Black & Matikanetannhauser"
        ]
    );

    let rows = &controller.rendered().rows;
    assert_eq!(rows.len(), 2);
    assert!(rows[1].left[0]
        .body_html
        .contains("Haru <span class=\"highlight\">Urara</span>"));
}

#[test]
fn late_and_long_filter_is_conjunctive() {
    let mut controller = controller();
    controller.toggle_tag_filter("LATE");
    controller.toggle_tag_filter("LONG");
    assert_eq!(
        visible_titles(&controller),
        vec![
            "Tamamo Cross",
            "NY Haru Urara & NY T.M. Opera",
            "Satono Diamond",
            "Mejiro Bright"
        ]
    );
    assert_eq!(controller.rendered().visible_rows().count(), 4);

    controller.toggle_tag_filter("LONG");
    controller.toggle_tag_filter("LATE");
    assert_eq!(controller.rendered().visible_box_count(), 32);
}

#[test]
fn first_entry_renders_decorations() {
    let controller = controller();
    let tamamo = &controller.rendered().rows[0].left[0];

    assert_eq!(tamamo.fill, FillSpec::Solid("fill-green".to_string()));
    assert_eq!(
        tamamo.image.as_ref().map(|image| image.src.as_str()),
        Some("https://raw.githubusercontent.com/moomoocowsteam/timeline_app/main/images/0120-left-1.png")
    );
    assert_eq!(tamamo.icons_left.len(), 3);
    assert!(matches!(&tamamo.icons_left[0], IconFace::Image { src } if src.ends_with("icons/pace.png")));
    assert!(matches!(&tamamo.buttons_left[..], [ButtonFace::Icon { alt, .. }] if alt == "LONG"));
    assert_eq!(tamamo.data_tags(), "PACE LATE END LONG NICHE");

    let html = render_timeline_html(controller.rendered());
    assert_eq!(html.matches("class=\"timeline-row\"").count(), 14);
    assert_eq!(html.matches("class=\"event-box-left\"").count(), 14);
}
