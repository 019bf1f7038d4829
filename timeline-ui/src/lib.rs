//! Giao diện timeline tương tác (yew) cho môi trường WebAssembly.
//!
//! Trạng thái nằm trong một [`timeline_core::TimelineController`] dùng chung
//! giữa component và [`TimelineHandle`] phía JS; hình học chạy trong
//! animation frame sau mỗi lần vẽ.

#[cfg(target_arch = "wasm32")]
mod reactor;
#[cfg(target_arch = "wasm32")]
mod styles;
#[cfg(target_arch = "wasm32")]
mod surface;

#[cfg(target_arch = "wasm32")]
mod wasm_ui {
    use std::cell::RefCell;
    use std::rc::Rc;

    use serde_wasm_bindgen::from_value;
    use timeline_core::render::ICON_BUTTONS;
    use timeline_core::{
        ButtonFace, Entry, FillSpec, IconFace, RenderedBox, RenderedRow, Renderer, Side,
        TimelineConfig, TimelineController,
    };
    use wasm_bindgen::prelude::*;
    use web_sys::{
        console, Document, Element, HtmlInputElement, ScrollBehavior, ScrollToOptions, Window,
    };
    use yew::events::InputEvent;
    use yew::prelude::*;
    use yew::TargetCast;

    use crate::reactor::Reactor;
    use crate::styles;
    use crate::surface::HIDDEN_CLASS;

    /// Controller dùng chung và callback vẽ lại của component đang mount.
    pub(crate) struct TimelineHost {
        pub(crate) window: Window,
        pub(crate) controller: RefCell<TimelineController>,
        redraw: RefCell<Option<Callback<()>>>,
    }

    impl TimelineHost {
        fn new(window: Window, controller: TimelineController) -> Rc<Self> {
            Rc::new(Self {
                window,
                controller: RefCell::new(controller),
                redraw: RefCell::new(None),
            })
        }

        /// Sửa controller rồi yêu cầu component vẽ lại.
        pub(crate) fn update<R>(&self, change: impl FnOnce(&mut TimelineController) -> R) -> R {
            let result = change(&mut self.controller.borrow_mut());
            let redraw = self.redraw.borrow().clone();
            if let Some(redraw) = redraw {
                redraw.emit(());
            }
            result
        }

        fn set_redraw(&self, redraw: Option<Callback<()>>) {
            *self.redraw.borrow_mut() = redraw;
        }
    }

    #[derive(Properties)]
    pub struct TimelineAppProps {
        host: Rc<TimelineHost>,
    }

    impl PartialEq for TimelineAppProps {
        fn eq(&self, other: &Self) -> bool {
            Rc::ptr_eq(&self.host, &other.host)
        }
    }

    #[function_component(TimelineApp)]
    fn timeline_app(props: &TimelineAppProps) -> Html {
        let host = props.host.clone();
        let force = use_force_update();
        let timeline_ref = use_node_ref();
        let spine_ref = use_node_ref();
        let legend_ref = use_node_ref();
        let back_to_top = use_state_eq(|| false);

        let reactor = {
            let host = host.clone();
            let refs = (timeline_ref.clone(), spine_ref.clone(), legend_ref.clone());
            use_memo((), move |_| Reactor::new(host, refs.0, refs.1, refs.2))
        };

        {
            let host = host.clone();
            let reactor = reactor.clone();
            let back_to_top = back_to_top.clone();
            use_effect_with((), move |_| {
                if let Some(document) = host.window.document() {
                    if let Err(err) = styles::ensure_styles(&document) {
                        console::error_1(&err);
                    }
                }
                host.set_redraw(Some(Callback::from(move |_| force.force_update())));
                let listeners =
                    reactor.install_listeners(Callback::from(move |visible| back_to_top.set(visible)));
                move || {
                    drop(listeners);
                    reactor.cancel_pending();
                    host.set_redraw(None);
                }
            });
        }

        {
            let reactor = reactor.clone();
            use_effect(move || {
                reactor.schedule_frame();
                || ()
            });
        }

        let on_search = {
            let host = host.clone();
            Callback::from(move |event: InputEvent| {
                let input: HtmlInputElement = event.target_unchecked_into();
                let query = input.value();
                host.update(|controller| controller.search(&query));
            })
        };

        let on_toggle_tag = {
            let host = host.clone();
            Callback::from(move |tag: String| {
                host.update(|controller| controller.toggle_tag_filter(&tag));
            })
        };

        let on_toggle_legend = {
            let host = host.clone();
            Callback::from(move |_: MouseEvent| {
                host.update(|controller| controller.toggle_legend());
            })
        };

        let on_back_to_top = {
            let window = host.window.clone();
            Callback::from(move |_: MouseEvent| {
                let options = ScrollToOptions::new();
                options.set_top(0.0);
                options.set_behavior(ScrollBehavior::Smooth);
                window.scroll_to_with_scroll_to_options(&options);
            })
        };

        let controller = host.controller.borrow();
        let rendered = controller.rendered();
        let generation = controller.generation();
        let legend = controller.legend();
        let renderer = Renderer::new(controller.config());

        let chips = controller.filter_tags().into_iter().map(|tag| {
            let active = controller.is_tag_active(&tag);
            let onclick = on_toggle_tag.reform({
                let tag = tag.clone();
                move |_: MouseEvent| tag.clone()
            });
            html! {
                <button
                    class={classes!("filter-box", active.then_some("active"))}
                    data-tag={tag.clone()}
                    {onclick}
                >
                    { tag }
                </button>
            }
        });

        html! {
            <div class="timeline-app">
                <div class="timeline-toolbar">
                    <input
                        id="searchInput"
                        class="timeline-search"
                        type="search"
                        placeholder="Search events..."
                        value={controller.query().to_string()}
                        oninput={on_search}
                    />
                </div>
                <aside
                    class={classes!("timeline-legend", legend.is_collapsed().then_some("collapsed"))}
                    ref={legend_ref}
                >
                    <button class="legend-header" onclick={on_toggle_legend}>
                        <span>{"Legend"}</span>
                        <span class="legend-indicator">{ legend.indicator() }</span>
                    </button>
                    <div class="legend-body">
                        <span class="legend-section-title">{"Filters"}</span>
                        <div class="filter-chips">{ for chips }</div>
                        <span class="legend-section-title">{"Distance"}</span>
                        <div class="legend-keys">
                            { for ICON_BUTTONS.iter().map(|label| render_button(&renderer.button_face(label))) }
                        </div>
                    </div>
                </aside>
                <div class="timeline" id="timeline" ref={timeline_ref}>
                    <div class="timeline-line" id="timeline-line" ref={spine_ref}></div>
                    { for rendered.rows.iter().enumerate().map(|(index, row)| {
                        render_row(generation, index, row)
                    }) }
                </div>
                if rendered.rows.is_empty() {
                    <p class="timeline-empty">{"No events match your search."}</p>
                }
                <button
                    class={classes!("back-to-top", (*back_to_top).then_some("show"))}
                    title="Back to top"
                    onclick={on_back_to_top}
                >
                    {"↑"}
                </button>
            </div>
        }
    }

    fn render_row(generation: u64, index: usize, row: &RenderedRow) -> Html {
        html! {
            <div
                key={format!("{generation}-{index}")}
                class={classes!("timeline-row", row.hidden.then_some(HIDDEN_CLASS))}
            >
                <div class="left-events">
                    { for row.left.iter().map(render_box) }
                </div>
                <div class="date-range">{ raw(&row.label_html) }</div>
                <div class="connector"></div>
                <div class="right-events">
                    { for row.right.iter().map(render_box) }
                </div>
            </div>
        }
    }

    fn render_box(rendered: &RenderedBox) -> Html {
        let side_class = match rendered.side {
            Side::Left => "event-box-left",
            Side::Right => "event-box-right",
        };
        let data_tags = (!rendered.tags.is_empty()).then(|| rendered.data_tags());

        html! {
            <div
                class={classes!(side_class, rendered.hidden.then_some(HIDDEN_CLASS))}
                data-tags={data_tags}
            >
                { render_fill(&rendered.fill) }
                <div class="event-content">
                    <div class="event-title">{ raw(&rendered.title_html) }</div>
                    if let Some(image) = &rendered.image {
                        <img class="event-img" src={image.src.clone()} alt={image.alt.clone()} />
                    }
                    <p class="event-description">{ raw(&rendered.body_html) }</p>
                    { render_icons(&rendered.icons_left, "left") }
                    { render_icons(&rendered.icons_right, "right") }
                </div>
                { render_buttons(&rendered.buttons_left, "left") }
                { render_buttons(&rendered.buttons_right, "right") }
            </div>
        }
    }

    fn render_fill(fill: &FillSpec) -> Html {
        match fill {
            FillSpec::None => Html::default(),
            FillSpec::Solid(token) => html! {
                <div class={classes!("event-fill", "solid", token.clone())}></div>
            },
            FillSpec::Split(first, second) => html! {
                <div class="event-fill">
                    <div class={classes!("fill-half", first.clone())}></div>
                    <div class={classes!("fill-half", second.clone())}></div>
                </div>
            },
        }
    }

    fn render_icons(icons: &[IconFace], align: &'static str) -> Html {
        html! {
            <div class={classes!("icon-row", align)}>
                { for icons.iter().map(|icon| match icon {
                    IconFace::Image { src } => html! {
                        <img class="icon-img" src={src.clone()} alt="icon" />
                    },
                    IconFace::Glyph { text } => html! {
                        <span class="icon-emoji">{ text.clone() }</span>
                    },
                }) }
            </div>
        }
    }

    fn render_buttons(buttons: &[ButtonFace], align: &'static str) -> Html {
        if buttons.is_empty() {
            return Html::default();
        }
        html! {
            <div class={classes!("button-grid", align)}>
                { for buttons.iter().map(render_button) }
            </div>
        }
    }

    fn render_button(button: &ButtonFace) -> Html {
        match button {
            ButtonFace::Icon { src, alt } => html! {
                <div class="button-box">
                    <img class="button-icon" src={src.clone()} alt={alt.clone()} />
                </div>
            },
            ButtonFace::Text { label } => html! {
                <div class="button-box">{ label.clone() }</div>
            },
        }
    }

    /// Markup đã escape sẵn từ renderer (kèm `<span class="highlight">`).
    fn raw(markup: &str) -> Html {
        Html::from_html_unchecked(AttrValue::from(markup.to_string()))
    }

    fn read_entries(entries: JsValue) -> Result<Vec<Entry>, JsValue> {
        let payload = from_value::<serde_json::Value>(entries)
            .map_err(|err| JsValue::from_str(&format!("Không đọc được JSON entries: {err}")))?;
        timeline_data::parse_entries_value(&payload)
            .map_err(|err| JsValue::from_str(&format!("Timeline error: {err}")))
    }

    fn read_config(config: Option<JsValue>, base: TimelineConfig) -> Result<TimelineConfig, JsValue> {
        match config {
            Some(js_cfg) if !js_cfg.is_undefined() && !js_cfg.is_null() => {
                let payload = from_value::<serde_json::Value>(js_cfg)
                    .map_err(|err| JsValue::from_str(&format!("Không đọc được config: {err}")))?;
                timeline_data::parse_config_value(&payload)
                    .map_err(|err| JsValue::from_str(&format!("Timeline error: {err}")))
            }
            _ => Ok(base),
        }
    }

    /// Điều khiển timeline đã mount từ phía JS.
    #[wasm_bindgen]
    pub struct TimelineHandle {
        host: Rc<TimelineHost>,
    }

    #[wasm_bindgen]
    impl TimelineHandle {
        /// Thay toàn bộ entry và vẽ lại (giữ từ khoá và bộ lọc hiện tại).
        pub fn set_entries(&self, entries: JsValue) -> Result<(), JsValue> {
            let entries = read_entries(entries)?;
            self.host.update(|controller| controller.set_entries(entries));
            Ok(())
        }

        pub fn add_entry(&self, entry: JsValue) -> Result<(), JsValue> {
            let payload = from_value::<serde_json::Value>(entry)
                .map_err(|err| JsValue::from_str(&format!("Không đọc được entry: {err}")))?;
            let entry = timeline_data::parse_entries_value(&serde_json::Value::Array(vec![payload]))
                .map_err(|err| JsValue::from_str(&format!("Timeline error: {err}")))?
                .into_iter()
                .next()
                .ok_or_else(|| JsValue::from_str("Entry rỗng"))?;
            self.host.update(|controller| controller.add_entry(entry));
            Ok(())
        }

        pub fn search(&self, query: &str) {
            self.host.update(|controller| controller.search(query));
        }

        /// `true` khi tag vừa được bật.
        pub fn toggle_tag_filter(&self, tag: &str) -> bool {
            self.host.update(|controller| controller.toggle_tag_filter(tag))
        }
    }

    /// Mount timeline vào `selector`.
    ///
    /// `entries` rỗng (`undefined`/`null`) dùng dữ liệu mẫu đi kèm.
    #[wasm_bindgen]
    pub fn mount_timeline(
        selector: &str,
        entries: JsValue,
        config: Option<JsValue>,
    ) -> Result<TimelineHandle, JsValue> {
        console_error_panic_hook::set_once();
        let window: Window =
            web_sys::window().ok_or_else(|| JsValue::from_str("Không có window"))?;
        let document: Document = window
            .document()
            .ok_or_else(|| JsValue::from_str("Không truy cập được document"))?;

        let target: Element = document
            .query_selector(selector)
            .map_err(|err| JsValue::from_str(&format!("Selector lỗi: {err:?}")))?
            .ok_or_else(|| JsValue::from_str("Không tìm thấy element theo selector"))?;

        let (entries, base) = if entries.is_undefined() || entries.is_null() {
            let sample = timeline_data::sample_entries()
                .map_err(|err| JsValue::from_str(&format!("Timeline error: {err}")))?;
            (sample, timeline_data::sample_config())
        } else {
            (read_entries(entries)?, TimelineConfig::default())
        };
        let config = read_config(config, base)?;

        let host = TimelineHost::new(window, TimelineController::with_entries(config, entries));
        yew::Renderer::<TimelineApp>::with_root_and_props(
            target,
            TimelineAppProps { host: host.clone() },
        )
        .render();
        Ok(TimelineHandle { host })
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm_ui::{mount_timeline, TimelineHandle};

#[cfg(not(target_arch = "wasm32"))]
pub fn mount_timeline(
    _: &str,
    _: wasm_bindgen::JsValue,
    _: Option<wasm_bindgen::JsValue>,
) -> Result<(), wasm_bindgen::JsValue> {
    Err(wasm_bindgen::JsValue::from_str(
        "timeline-ui chỉ hỗ trợ biên dịch target wasm32",
    ))
}
