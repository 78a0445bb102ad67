//! Bridge between the page and the imperative [`Engine`].
//!
//! [`SketchHost::attach`] binds a canvas and its three controls, registers the
//! mouse and touch listeners, and keeps each registration in a
//! [`ListenerGuard`]. Dropping a guard removes its listener, so teardown
//! happens on [`SketchHost::detach`], on drop of the host, and during
//! unwinding alike.
//!
//! A host whose elements or 2D context are missing is inert: every operation
//! is a no-op and [`SketchHost::export`] yields the empty snapshot.

#[cfg(test)]
#[path = "host_test.rs"]
mod host_test;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    AddEventListenerOptions, Document, Event, EventTarget, File, FormData, HtmlCanvasElement, HtmlElement,
    HtmlInputElement, Window,
};

use crate::config::SketchConfig;
use crate::dom::{CanvasSurface, ControlStyle, raw_pointer};
use crate::engine::{Action, Engine};
use crate::snapshot::SketchSnapshot;

/// One registered DOM listener. Unregisters itself when dropped.
pub struct ListenerGuard {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl ListenerGuard {
    /// Register `handler` for `kind` events on `target`.
    ///
    /// `passive: Some(false)` lets a touch handler call `preventDefault`.
    ///
    /// # Errors
    ///
    /// Returns the browser's error if registration fails.
    pub fn register(
        target: &EventTarget,
        kind: &'static str,
        passive: Option<bool>,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        if let Some(passive) = passive {
            let options = AddEventListenerOptions::new();
            options.set_passive(passive);
            target.add_event_listener_with_callback_and_add_event_listener_options(
                kind,
                callback.as_ref().unchecked_ref(),
                &options,
            )?;
        } else {
            target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
        }
        Ok(Self { target: target.clone(), kind, callback })
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Err(err) = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref())
        {
            log::warn!("failed to remove `{}` listener: {err:?}", self.kind);
        }
    }
}

/// Element ids used by [`SketchElements::from_document`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementIds {
    pub canvas: String,
    pub color: String,
    pub size: String,
    pub clear: String,
    pub sink: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            canvas: "wireCanvas".to_owned(),
            color: "penColor".to_owned(),
            size: "penSize".to_owned(),
            clear: "clearCanvas".to_owned(),
            sink: "canvas_data".to_owned(),
        }
    }
}

/// The page elements a sketch binds to.
///
/// `sink` is an optional hidden input that mirrors the last export and is
/// emptied on clear.
#[derive(Default)]
pub struct SketchElements {
    pub canvas: Option<HtmlCanvasElement>,
    pub color: Option<HtmlInputElement>,
    pub size: Option<HtmlInputElement>,
    pub clear: Option<HtmlElement>,
    pub sink: Option<HtmlInputElement>,
}

impl SketchElements {
    /// Look the elements up by id. Missing or mistyped elements become `None`.
    #[must_use]
    pub fn from_document(document: &Document, ids: &ElementIds) -> Self {
        Self {
            canvas: lookup(document, &ids.canvas),
            color: lookup(document, &ids.color),
            size: lookup(document, &ids.size),
            clear: lookup(document, &ids.clear),
            sink: lookup(document, &ids.sink),
        }
    }

    fn missing(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.canvas.is_none() {
            names.push("canvas");
        }
        if self.color.is_none() {
            names.push("color");
        }
        if self.size.is_none() {
            names.push("size");
        }
        if self.clear.is_none() {
            names.push("clear");
        }
        names
    }
}

fn lookup<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    let element = document.get_element_by_id(id)?;
    match element.dyn_into::<T>() {
        Ok(typed) => Some(typed),
        Err(_) => {
            log::warn!("element #{id} has an unexpected type");
            None
        }
    }
}

type SharedEngine = Rc<RefCell<Engine>>;

struct Attached {
    engine: SharedEngine,
    sink: Option<HtmlInputElement>,
    listeners: Vec<ListenerGuard>,
}

/// A mounted sketch: the engine plus the listeners feeding it.
pub struct SketchHost {
    attached: Option<Attached>,
}

impl SketchHost {
    /// A host that ignores everything.
    #[must_use]
    pub fn inert() -> Self {
        Self { attached: None }
    }

    /// Mount on `elements`. Degrades to [`SketchHost::inert`] if anything is missing.
    #[must_use]
    pub fn attach(elements: SketchElements, config: &SketchConfig) -> Self {
        let missing = elements.missing();
        let SketchElements { canvas: Some(canvas), color: Some(color), size: Some(size), clear: Some(clear), sink } =
            elements
        else {
            log::warn!("sketch disabled: missing {}", missing.join(", "));
            return Self::inert();
        };
        let Some(window) = web_sys::window() else {
            log::warn!("sketch disabled: no window");
            return Self::inert();
        };
        let Some(surface) = CanvasSurface::acquire(canvas.clone()) else {
            log::warn!("sketch disabled: no 2d context");
            return Self::inert();
        };

        let style = ControlStyle::new(color, size, config.clone());
        let engine = Rc::new(RefCell::new(Engine::new(surface, style, config)));
        match register_listeners(&engine, &canvas, &clear, &window, sink.clone()) {
            Ok(listeners) => {
                log::info!("sketch attached ({} listeners)", listeners.len());
                Self { attached: Some(Attached { engine, sink, listeners }) }
            }
            Err(err) => {
                log::warn!("sketch disabled: listener registration failed: {err:?}");
                Self::inert()
            }
        }
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached.is_some()
    }

    /// Encode the sketch now. Empty when inert or nothing was drawn.
    ///
    /// The value is also written to the sink input, if one was bound.
    #[must_use]
    pub fn export(&self) -> SketchSnapshot {
        let Some(attached) = &self.attached else {
            return SketchSnapshot::empty();
        };
        let snapshot = match attached.engine.try_borrow() {
            Ok(engine) => engine.snapshot(),
            Err(err) => {
                log::warn!("sketch export skipped: {err}");
                SketchSnapshot::empty()
            }
        };
        if let Some(sink) = &attached.sink {
            sink.set_value(snapshot.as_str());
        }
        snapshot
    }

    /// Clear the sketch as if the clear control had been clicked.
    pub fn clear(&self) {
        if let Some(attached) = &self.attached {
            clear_and_reset_sink(&attached.engine, attached.sink.as_ref());
        }
    }

    /// Remove every listener. The host is inert afterwards.
    pub fn detach(&mut self) {
        if let Some(attached) = self.attached.take() {
            log::info!("sketch detached ({} listeners)", attached.listeners.len());
        }
    }
}

fn dispatch(engine: &SharedEngine, handler: impl FnOnce(&mut Engine) -> Action) -> Action {
    match engine.try_borrow_mut() {
        Ok(mut engine) => handler(&mut *engine),
        Err(err) => {
            log::warn!("sketch event dropped: {err}");
            Action::None
        }
    }
}

fn clear_and_reset_sink(engine: &SharedEngine, sink: Option<&HtmlInputElement>) {
    dispatch(engine, Engine::clear);
    if let Some(sink) = sink {
        sink.set_value("");
    }
}

fn register_listeners(
    engine: &SharedEngine,
    canvas: &HtmlCanvasElement,
    clear: &HtmlElement,
    window: &Window,
    sink: Option<HtmlInputElement>,
) -> Result<Vec<ListenerGuard>, JsValue> {
    let press = |engine: &SharedEngine| {
        let engine = Rc::clone(engine);
        move |event: Event| {
            if let Some(raw) = raw_pointer(&event) {
                dispatch(&engine, |e| e.on_press(&raw));
            }
        }
    };
    let motion = |engine: &SharedEngine| {
        let engine = Rc::clone(engine);
        move |event: Event| {
            let Some(raw) = raw_pointer(&event) else {
                return;
            };
            if dispatch(&engine, |e| e.on_move(&raw)).prevents_default() {
                event.prevent_default();
            }
        }
    };
    let release = |engine: &SharedEngine| {
        let engine = Rc::clone(engine);
        move |_event: Event| {
            dispatch(&engine, Engine::on_release);
        }
    };

    let canvas_target: &EventTarget = canvas.as_ref();
    let window_target: &EventTarget = window.as_ref();
    let clear_target: &EventTarget = clear.as_ref();
    let clear_engine = Rc::clone(engine);

    Ok(vec![
        ListenerGuard::register(canvas_target, "mousedown", None, press(engine))?,
        ListenerGuard::register(canvas_target, "mousemove", None, motion(engine))?,
        ListenerGuard::register(window_target, "mouseup", None, release(engine))?,
        ListenerGuard::register(canvas_target, "touchstart", Some(false), press(engine))?,
        ListenerGuard::register(canvas_target, "touchmove", Some(false), motion(engine))?,
        ListenerGuard::register(canvas_target, "touchend", None, release(engine))?,
        ListenerGuard::register(clear_target, "click", None, move |_event: Event| {
            clear_and_reset_sink(&clear_engine, sink.as_ref());
        })?,
    ])
}

/// Build the multipart body for the generation request from [`crate::form::SubmissionForm::fields`].
///
/// # Errors
///
/// Returns the browser's error if `FormData` cannot be created or appended to.
pub fn form_data(fields: &[(&str, String)], image: Option<&File>) -> Result<FormData, JsValue> {
    let data = FormData::new()?;
    for (name, value) in fields {
        data.append_with_str(name, value)?;
    }
    if let Some(image) = image {
        data.append_with_blob("image", image)?;
    }
    Ok(data)
}
