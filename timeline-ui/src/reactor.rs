//! Nối sự kiện trình duyệt với bộ lập lịch của controller.
//!
//! Mọi trigger đi qua `TimelineController::request`; một animation frame
//! duy nhất gom chúng lại và chạy pass hình học sau khi yew đã vẽ xong.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use gloo::render::{request_animation_frame, AnimationFrame};
use gloo::timers::callback::Timeout;
use timeline_core::{back_to_top_visible, Debouncer, GeometryEngine, LegendPositioner, Trigger};
use web_sys::{HtmlElement, Window};
use yew::{Callback, NodeRef};

use crate::surface::DomSurface;
use crate::wasm_ui::TimelineHost;

pub(crate) struct Reactor {
    host: Rc<TimelineHost>,
    window: Window,
    timeline: NodeRef,
    spine: NodeRef,
    legend: NodeRef,
    engine: GeometryEngine,
    positioner: LegendPositioner,
    thickness: f64,
    back_to_top_threshold: f64,
    resize: RefCell<Debouncer>,
    resize_timer: RefCell<Option<Timeout>>,
    frame: RefCell<Option<AnimationFrame>>,
    back_to_top: Cell<bool>,
}

impl Reactor {
    pub(crate) fn new(
        host: Rc<TimelineHost>,
        timeline: NodeRef,
        spine: NodeRef,
        legend: NodeRef,
    ) -> Self {
        let config = host.controller.borrow().config().clone();
        Self {
            window: host.window.clone(),
            host,
            timeline,
            spine,
            legend,
            engine: GeometryEngine::new(&config),
            positioner: LegendPositioner::new(&config),
            thickness: config.connector_thickness,
            back_to_top_threshold: config.back_to_top_threshold,
            resize: RefCell::new(Debouncer::from_millis(config.resize_quiet_ms)),
            resize_timer: RefCell::new(None),
            frame: RefCell::new(None),
            back_to_top: Cell::new(false),
        }
    }

    pub(crate) fn request(self: &Rc<Self>, trigger: Trigger) {
        self.host.controller.borrow_mut().request(trigger);
        self.schedule_frame();
    }

    /// Lên lịch một frame nếu controller đang có pass chờ chạy.
    pub(crate) fn schedule_frame(self: &Rc<Self>) {
        if self.frame.borrow().is_some() || !self.host.controller.borrow().has_pending_frame() {
            return;
        }
        let reactor = Rc::clone(self);
        let handle = request_animation_frame(move |_| {
            reactor.frame.borrow_mut().take();
            reactor.run_frame();
        });
        *self.frame.borrow_mut() = Some(handle);
    }

    fn run_frame(&self) {
        let Some(pass) = self.host.controller.borrow_mut().take_frame() else {
            return;
        };
        let mut surface = DomSurface::new(
            self.window.clone(),
            self.timeline.cast::<HtmlElement>(),
            self.spine.cast::<HtmlElement>(),
            self.legend.cast::<HtmlElement>(),
            self.thickness,
        );
        if pass.layout {
            self.engine.recompute(&mut surface);
        }
        if pass.legend {
            self.positioner.place_legend(&mut surface);
        }
    }

    fn on_resize(self: &Rc<Self>) {
        let token = self.resize.borrow_mut().schedule();
        let quiet_ms = u32::try_from(self.resize.borrow().quiet().as_millis()).unwrap_or(u32::MAX);
        let reactor = Rc::clone(self);
        let timeout = Timeout::new(quiet_ms, move || {
            let fired = reactor.resize.borrow_mut().fire(token);
            if fired {
                reactor.request(Trigger::Resize);
            }
        });
        // Drop huỷ timer trước đó.
        *self.resize_timer.borrow_mut() = Some(timeout);
    }

    fn on_scroll(self: &Rc<Self>, on_back_to_top: &Callback<bool>) {
        self.request(Trigger::Scroll);
        let scroll_y = self.window.scroll_y().unwrap_or(0.0);
        let visible = back_to_top_visible(scroll_y, self.back_to_top_threshold);
        if self.back_to_top.replace(visible) != visible {
            on_back_to_top.emit(visible);
        }
    }

    /// Gắn listener resize/scroll của window và `load` của mọi ảnh trong
    /// timeline; drop vector để gỡ.
    pub(crate) fn install_listeners(
        self: &Rc<Self>,
        on_back_to_top: Callback<bool>,
    ) -> Vec<EventListener> {
        let mut listeners = Vec::with_capacity(3);

        let reactor = Rc::clone(self);
        listeners.push(EventListener::new(&self.window, "resize", move |_| {
            reactor.on_resize()
        }));

        let reactor = Rc::clone(self);
        listeners.push(EventListener::new(&self.window, "scroll", move |_| {
            reactor.on_scroll(&on_back_to_top);
        }));

        // `load` không nổi bọt: bắt ở pha capture để gồm cả ảnh trong markup body.
        if let Some(timeline) = self.timeline.cast::<HtmlElement>() {
            let reactor = Rc::clone(self);
            listeners.push(EventListener::new_with_options(
                &timeline,
                "load",
                EventListenerOptions::run_in_capture_phase(),
                move |_| reactor.request(Trigger::ImageLoad),
            ));
        }

        listeners
    }

    pub(crate) fn cancel_pending(&self) {
        self.resize.borrow_mut().cancel();
        self.resize_timer.borrow_mut().take();
        self.frame.borrow_mut().take();
    }
}
