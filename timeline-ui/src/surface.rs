//! [`LayoutSurface`] và [`LegendSurface`] trên DOM thật.
//!
//! Mọi phép đo dùng `getBoundingClientRect` (toạ độ viewport); engine trong
//! `timeline-core` tự quy đổi sang toạ độ container/row.

use timeline_core::{
    BaseConnector, BoxMeasure, LayoutSurface, LegendPlacement, LegendSurface, Rect, RowMeasure,
    Segment, SpineLayout,
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{console, Element, HtmlElement, Window};

pub(crate) const HIDDEN_CLASS: &str = "is-hidden";
const SEGMENT_SELECTOR: &str = ".connector.segment";
const BASE_CONNECTOR_SELECTOR: &str = ":scope > .connector:not(.segment)";

pub(crate) struct DomSurface {
    window: Window,
    timeline: Option<HtmlElement>,
    spine: Option<HtmlElement>,
    legend: Option<HtmlElement>,
    rows: Vec<HtmlElement>,
    thickness: f64,
}

impl DomSurface {
    pub(crate) fn new(
        window: Window,
        timeline: Option<HtmlElement>,
        spine: Option<HtmlElement>,
        legend: Option<HtmlElement>,
        thickness: f64,
    ) -> Self {
        let rows = timeline
            .as_ref()
            .map(|timeline| select_all(timeline, ":scope > .timeline-row"))
            .unwrap_or_default();
        Self {
            window,
            timeline,
            spine,
            legend,
            rows,
            thickness,
        }
    }

    fn label_rect(row: &Element) -> Option<Rect> {
        row.query_selector(".date-range")
            .ok()
            .flatten()
            .map(|label| rect_of(&label))
    }
}

impl LayoutSurface for DomSurface {
    fn container_rect(&self) -> Option<Rect> {
        self.timeline.as_ref().map(|timeline| rect_of(timeline))
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn measure_row(&self, row: usize) -> Option<RowMeasure> {
        let element = self.rows.get(row)?;
        Some(RowMeasure {
            hidden: is_hidden(element),
            row: rect_of(element),
            label: Self::label_rect(element),
            left: measure_boxes(element, ".event-box-left"),
            right: measure_boxes(element, ".event-box-right"),
        })
    }

    fn set_spine(&mut self, spine: SpineLayout) {
        let Some(element) = &self.spine else {
            return;
        };
        set_style(element, "top", &px(spine.top));
        set_style(element, "height", &px(spine.height));
    }

    fn clear_segments(&mut self, row: usize) {
        let Some(element) = self.rows.get(row) else {
            return;
        };
        for segment in select_all(element, SEGMENT_SELECTOR) {
            segment.remove();
        }
    }

    fn draw_segment(&mut self, row: usize, segment: Segment) {
        let Some(element) = self.rows.get(row) else {
            return;
        };
        let Some(document) = self.window.document() else {
            return;
        };
        let created = document
            .create_element("div")
            .and_then(|node| node.dyn_into::<HtmlElement>().map_err(JsValue::from));
        let line = match created {
            Ok(line) => line,
            Err(err) => {
                console::error_1(&err);
                return;
            }
        };
        line.set_class_name("connector segment");
        set_style(&line, "top", &px(segment.top));
        set_style(&line, "left", &px(segment.left));
        set_style(&line, "width", &px(segment.width));
        set_style(&line, "height", &px(self.thickness));
        if let Err(err) = element.append_child(&line) {
            console::error_1(&err);
        }
    }

    fn set_base_connector(&mut self, row: usize, base: BaseConnector) {
        let Some(connector) = self
            .rows
            .get(row)
            .and_then(|element| select_all(element, BASE_CONNECTOR_SELECTOR).into_iter().next())
        else {
            return;
        };
        set_style(&connector, "top", &px(base.top));
        set_style(&connector, "left", &px(base.left));
        set_style(&connector, "width", &px(base.width));
        set_style(&connector, "height", &px(self.thickness));
        if base.visible {
            let _ = connector.style().remove_property("display");
        } else {
            set_style(&connector, "display", "none");
        }
    }
}

impl LegendSurface for DomSurface {
    fn visible_label_rects(&self) -> Vec<Rect> {
        self.rows
            .iter()
            .filter(|row| !is_hidden(row))
            .filter_map(|row| Self::label_rect(row))
            .collect()
    }

    fn legend_height(&self) -> Option<f64> {
        self.legend
            .as_ref()
            .map(|legend| f64::from(legend.offset_height()))
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn set_legend_position(&mut self, placement: LegendPlacement) {
        let Some(legend) = &self.legend else {
            return;
        };
        set_style(legend, "left", &px(placement.center_x));
        set_style(legend, "top", &px(placement.top));
        set_style(legend, "transform", "translateX(-50%)");
    }
}

fn rect_of(element: &Element) -> Rect {
    let rect = element.get_bounding_client_rect();
    Rect::new(rect.left(), rect.top(), rect.width(), rect.height())
}

fn is_hidden(element: &Element) -> bool {
    element.class_list().contains(HIDDEN_CLASS)
}

fn measure_boxes(row: &Element, selector: &str) -> Vec<BoxMeasure> {
    select_all(row, selector)
        .iter()
        .map(|element| BoxMeasure {
            rect: rect_of(element),
            hidden: is_hidden(element),
        })
        .collect()
}

fn select_all(root: &Element, selector: &str) -> Vec<HtmlElement> {
    let Ok(list) = root.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|index| list.item(index))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

fn set_style(element: &HtmlElement, property: &str, value: &str) {
    if let Err(err) = element.style().set_property(property, value) {
        console::error_1(&err);
    }
}

fn px(value: f64) -> String {
    format!("{value}px")
}
