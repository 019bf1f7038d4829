//! Bridge WASM <-> JavaScript trung lập framework.
//!
//! Mọi hàm nhận và trả về object JS thuần; hình học được tính bằng cùng
//! thuật toán với `timeline-ui`, để host tự đo DOM rồi gọi vào đây.

use serde::{de::DeserializeOwned, Serialize};
use serde_wasm_bindgen::{from_value, to_value};
use timeline_core::{
    connector_layout, html::render_timeline_html as render_html, spine_layout, Entry,
    LegendPositioner, Rect, RowMeasure, TimelineConfig, TimelineController, TimelineError,
};
use wasm_bindgen::prelude::*;

/// Đọc config từ JS; `undefined`/`null` dùng giá trị mặc định.
pub fn config_from_js(config: Option<JsValue>) -> Result<TimelineConfig, JsValue> {
    let payload = match config {
        Some(js_cfg) if !js_cfg.is_undefined() && !js_cfg.is_null() => {
            from_value::<serde_json::Value>(js_cfg)
                .map_err(|err| JsValue::from_str(&format!("Không đọc được config: {err}")))?
        }
        _ => return Ok(TimelineConfig::default()),
    };
    timeline_data::parse_config_value(&payload)
        .map_err(|err| JsValue::from_str(&format_timeline_error(err)))
}

fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

fn read_entries(entries: JsValue) -> Result<Vec<Entry>, JsValue> {
    let payload = from_value::<serde_json::Value>(entries)
        .map_err(|err| JsValue::from_str(&format!("Không đọc được JSON entries: {err}")))?;
    timeline_data::parse_entries_value(&payload)
        .map_err(|err| JsValue::from_str(&format_timeline_error(err)))
}

fn write<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    to_value(value).map_err(|err| JsValue::from_str(&format!("Không serialize kết quả: {err}")))
}

fn read<T: DeserializeOwned>(value: JsValue, what: &str) -> Result<T, JsValue> {
    from_value(value).map_err(|err| JsValue::from_str(&format!("Không đọc được {what}: {err}")))
}

/// Chuẩn hoá payload entry (giá trị mặc định cho trường thiếu).
#[wasm_bindgen]
pub fn parse_entries(entries: JsValue) -> Result<JsValue, JsValue> {
    init();
    write(&read_entries(entries)?)
}

/// Nhóm entry theo khoảng ngày và dựng cấu trúc row/box.
#[wasm_bindgen]
pub fn group_entries(entries: JsValue, config: Option<JsValue>) -> Result<JsValue, JsValue> {
    init();
    let controller = TimelineController::with_entries(config_from_js(config)?, read_entries(entries)?);
    write(controller.rendered())
}

/// Lọc theo từ khoá (không phân biệt hoa thường) và đánh dấu kết quả.
#[wasm_bindgen]
pub fn search_entries(
    entries: JsValue,
    query: &str,
    config: Option<JsValue>,
) -> Result<JsValue, JsValue> {
    init();
    let mut controller =
        TimelineController::with_entries(config_from_js(config)?, read_entries(entries)?);
    controller.search(query);
    write(controller.rendered())
}

/// HTML tĩnh của timeline, có thể kèm từ khoá tìm kiếm.
#[wasm_bindgen]
pub fn render_timeline_html(
    entries: JsValue,
    query: Option<String>,
    config: Option<JsValue>,
) -> Result<String, JsValue> {
    init();
    let mut controller =
        TimelineController::with_entries(config_from_js(config)?, read_entries(entries)?);
    if let Some(query) = query.filter(|query| !query.is_empty()) {
        controller.search(&query);
    }
    Ok(render_html(controller.rendered()))
}

/// Vị trí trục dọc, tương đối với container.
#[wasm_bindgen]
pub fn compute_spine(
    container: JsValue,
    first_label: JsValue,
    last_label: JsValue,
) -> Result<JsValue, JsValue> {
    let container: Rect = read(container, "container")?;
    let first: Rect = read(first_label, "nhãn đầu")?;
    let last: Rect = read(last_label, "nhãn cuối")?;
    write(&spine_layout(container, first, last))
}

/// Đường nối cho một row; `null` khi row không có nhãn ngày.
#[wasm_bindgen]
pub fn compute_connectors(row: JsValue, config: Option<JsValue>) -> Result<JsValue, JsValue> {
    let cfg = config_from_js(config)?;
    let row: RowMeasure = read(row, "row")?;
    write(&connector_layout(&row, cfg.connector_half_stroke))
}

/// Vị trí legend (toạ độ viewport); `null` khi không có nhãn nào.
#[wasm_bindgen]
pub fn place_legend(
    labels: JsValue,
    legend_height: f64,
    scroll_y: f64,
    config: Option<JsValue>,
) -> Result<JsValue, JsValue> {
    let cfg = config_from_js(config)?;
    let labels: Vec<Rect> = read(labels, "danh sách nhãn")?;
    write(&LegendPositioner::new(&cfg).place(&labels, legend_height, scroll_y))
}

fn format_timeline_error(err: TimelineError) -> String {
    format!("Timeline error: {err}")
}
