use timeline_core::{Entry, Recompute, Side, TimelineConfig, TimelineController, Trigger};

fn entries() -> Vec<Entry> {
    vec![
        Entry::new(Side::Left, "JAN 20 - JAN 29", "Tamamo Cross")
            .with_body("An <span style=\"color: red;\">end closer</span> with a long unique.")
            .with_tags(["PACE", "LATE", "END", "LONG", "NICHE"]),
        Entry::new(Side::Right, "JAN 20 - JAN 29", "Nice Nature Wit")
            .with_body("A gambler banner.")
            .with_tags(["LATE", "LUXURY"]),
        Entry::new(Side::Left, "JAN 27 - FEB 07", "NY Haru Urara")
            .with_body("The Urara enjoyer shall pull.")
            .with_tags(["LATE", "DIRT", "LUXURY"]),
        Entry::new(Side::Right, "FEB 03 - FEB 12", "Character Banner").with_tags(["LUXURY"]),
    ]
}

fn controller() -> TimelineController {
    let mut controller = TimelineController::with_entries(TimelineConfig::default(), entries());
    controller.take_frame();
    controller
}

#[test]
fn initial_render_groups_rows_and_publishes() {
    let mut controller = TimelineController::with_entries(TimelineConfig::default(), entries());
    assert_eq!(controller.rendered().rows.len(), 3);
    assert_eq!(controller.rendered().entry_indices(), vec![0, 1, 2, 3]);
    assert_eq!(controller.take_frame(), Some(Recompute::ALL));
    assert_eq!(controller.take_frame(), None);
}

#[test]
fn toggle_filter_changes_visibility_without_rerender() {
    let mut controller = controller();
    let generation = controller.generation();

    assert!(controller.toggle_tag_filter("DIRT"));
    assert_eq!(controller.generation(), generation);
    assert!(controller.is_tag_active("DIRT"));
    let visible: Vec<bool> = controller.rendered().rows.iter().map(|row| !row.hidden).collect();
    assert_eq!(visible, vec![false, true, false]);
    assert_eq!(controller.take_frame(), Some(Recompute::ALL));

    assert!(!controller.toggle_tag_filter("DIRT"));
    assert!(controller.rendered().rows.iter().all(|row| !row.hidden));
    assert_eq!(controller.rendered().visible_box_count(), 4);
}

#[test]
fn search_is_case_insensitive_across_fields() {
    let mut controller = controller();

    controller.search("URARA");
    assert_eq!(controller.rendered().entry_indices(), vec![2]);

    controller.search("jan 2");
    assert_eq!(controller.rendered().entry_indices(), vec![0, 1, 2]);

    controller.search("END CLOSER");
    assert_eq!(controller.rendered().entry_indices(), vec![0]);

    controller.search("no such text");
    assert!(controller.rendered().rows.is_empty());
}

#[test]
fn search_highlights_title_body_and_label() {
    let mut controller = controller();
    controller.search("urara");
    let row = &controller.rendered().rows[0];
    let rendered = &row.left[0];
    assert_eq!(rendered.title_html, "NY Haru <span class=\"highlight\">Urara</span>");
    assert_eq!(
        rendered.body_html,
        "The <span class=\"highlight\">Urara</span> enjoyer shall pull."
    );
    assert_eq!(row.label_html, "JAN 27 - FEB 07");

    controller.search("jan");
    assert_eq!(
        controller.rendered().rows[0].label_html,
        "<span class=\"highlight\">JAN</span> 20 - <span class=\"highlight\">JAN</span> 29"
    );
}

#[test]
fn empty_search_equals_clearing_filters_and_full_render() {
    let mut controller = controller();
    let pristine = controller.rendered().clone();

    controller.toggle_tag_filter("LATE");
    controller.search("gambler");
    assert!(controller.filters().is_empty());
    controller.search("");

    assert_eq!(controller.rendered(), &pristine);
    assert!(controller.filters().is_empty());
    assert_eq!(controller.query(), "");
}

#[test]
fn store_changes_render_the_whole_store() {
    let mut controller = controller();
    controller.toggle_tag_filter("LUXURY");
    let before = controller.generation();

    controller.add_entry(Entry::new(Side::Left, "FEB 03 - FEB 12", "Plain").with_tags(["NICHE"]));
    assert_eq!(controller.generation(), before + 1);
    assert!(controller.filters().is_empty());
    assert_eq!(controller.rendered().box_count(), 5);
    assert_eq!(controller.rendered().visible_box_count(), 5);
    assert_eq!(controller.take_frame(), Some(Recompute::ALL));

    controller.set_entries(vec![Entry::new(Side::Right, "", "Undated").with_tags(["LUXURY"])]);
    assert_eq!(controller.rendered().rows.len(), 1);
    assert_eq!(controller.rendered().rows[0].date_range, "Unscheduled");
    assert!(!controller.rendered().rows[0].hidden);
}

#[test]
fn entry_added_during_search_is_shown() {
    let mut controller = controller();
    controller.search("urara");
    assert_eq!(controller.rendered().box_count(), 1);

    controller.add_entry(Entry::new(Side::Right, "FEB", "Kitasan"));
    assert_eq!(controller.query(), "");
    assert_eq!(controller.rendered().box_count(), controller.store().len());
    assert_eq!(controller.rendered().rows[1].left[0].title_html, "NY Haru Urara");
}

#[test]
fn image_load_requests_a_layout_pass() {
    let mut controller = controller();
    assert!(controller.request(Trigger::ImageLoad));
    assert!(!controller.request(Trigger::ImageLoad));
    assert_eq!(controller.take_frame(), Some(Recompute::ALL));
    assert!(!controller.has_pending_frame());
}

#[test]
fn legend_toggle_only_requests_legend_pass() {
    let mut controller = controller();
    assert!(controller.toggle_legend());
    assert_eq!(controller.legend().indicator(), "▶");
    assert_eq!(controller.take_frame(), Some(Recompute::LEGEND));
}

#[test]
fn filter_tags_fall_back_to_store_vocabulary() {
    let controller = controller();
    assert_eq!(
        controller.filter_tags(),
        vec!["PACE", "LATE", "END", "LONG", "NICHE", "LUXURY", "DIRT"]
    );

    let configured = TimelineController::new(TimelineConfig {
        filter_tags: vec!["META".to_string()],
        ..TimelineConfig::default()
    });
    assert_eq!(configured.filter_tags(), vec!["META"]);
}
