use timeline_core::html::BASE_STYLES;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Node};

const STYLE_TAG_SELECTOR: &str = "style[data-timeline-ui]";

/// Controls around the timeline body: toolbar, legend panel, back-to-top.
const CHROME_STYLES: &str = r#"
.timeline-app {
  position: relative;
  max-width: 1200px;
  margin: 0 auto;
  padding: 24px 16px 96px;
  font-family: "Segoe UI", Roboto, sans-serif;
  color: #3b2414;
}

.timeline-toolbar {
  position: sticky;
  top: 0;
  z-index: 20;
  display: flex;
  justify-content: center;
  padding: 12px 0;
  background: linear-gradient(#fff 70%, rgba(255, 255, 255, 0));
}

.timeline-search {
  width: min(420px, 100%);
  padding: 10px 16px;
  border: 2px solid #d8c7b8;
  border-radius: 999px;
  font-size: 1rem;
}

.timeline-search:focus {
  outline: none;
  border-color: #794016;
}

.timeline-empty {
  text-align: center;
  color: #8a6f5c;
  padding: 48px 0;
}

.timeline-legend {
  position: fixed;
  z-index: 30;
  width: min(320px, 90vw);
  border-radius: 14px;
  background: #fff;
  box-shadow: 0 10px 28px rgba(60, 30, 10, 0.18);
  overflow: hidden;
}

.legend-header {
  display: flex;
  justify-content: space-between;
  align-items: center;
  width: 100%;
  padding: 10px 14px;
  border: none;
  background: #794016;
  color: #fff;
  font-weight: 700;
  cursor: pointer;
}

.legend-body {
  display: flex;
  flex-direction: column;
  gap: 10px;
  padding: 12px 14px;
}

.timeline-legend.collapsed .legend-body {
  display: none;
}

.legend-section-title {
  font-size: 0.75rem;
  text-transform: uppercase;
  letter-spacing: 0.06em;
  color: #8a6f5c;
}

.filter-chips {
  display: flex;
  flex-wrap: wrap;
  gap: 6px;
}

.filter-box {
  padding: 4px 10px;
  border: 2px solid #d8c7b8;
  border-radius: 999px;
  background: #fff;
  color: #794016;
  font-weight: 600;
  cursor: pointer;
}

.filter-box.active {
  background: #794016;
  border-color: #794016;
  color: #fff;
}

.legend-keys {
  display: flex;
  flex-wrap: wrap;
  gap: 6px;
}

.back-to-top {
  position: fixed;
  right: 24px;
  bottom: 24px;
  z-index: 30;
  width: 44px;
  height: 44px;
  border: none;
  border-radius: 50%;
  background: #794016;
  color: #fff;
  font-size: 1.2rem;
  cursor: pointer;
  opacity: 0;
  pointer-events: none;
  transition: opacity 0.2s ease;
}

.back-to-top.show {
  opacity: 1;
  pointer-events: auto;
}

@media (max-width: 760px) {
  .timeline-row {
    grid-template-columns: 1fr;
    row-gap: 12px;
  }

  .left-events,
  .right-events,
  .date-range {
    grid-column: 1;
    align-items: center;
    justify-self: center;
  }

  .connector,
  .timeline-line {
    display: none;
  }
}
"#;

pub fn ensure_styles(document: &Document) -> Result<(), JsValue> {
    if document.query_selector(STYLE_TAG_SELECTOR)?.is_some() {
        return Ok(());
    }

    let head = document
        .head()
        .ok_or_else(|| JsValue::from_str("Document không có thẻ <head>"))?;

    let style_el = document.create_element("style")?;
    style_el.set_attribute("data-timeline-ui", "v3")?;
    style_el.set_text_content(Some(&format!("{BASE_STYLES}\n{CHROME_STYLES}")));
    head.append_child(&style_el.dyn_into::<Node>()?)?;

    Ok(())
}
