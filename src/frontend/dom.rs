use crate::{
    navigation::{scroll_target, SectionBounds},
    storage::KeyValueStore,
    theme::{ThemeTarget, LIGHT_BODY_CLASS},
    timing::{CancellationToken, Debounce},
};
use gloo_timers::callback::Timeout;
use std::{cell::RefCell, rc::Rc};
use thiserror::Error;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    CssStyleDeclaration, Document, Element, Event, EventTarget, HtmlElement, ScrollBehavior,
    ScrollToOptions, Storage, VisibilityState, Window,
};

#[derive(Debug, Error)]
pub enum DomError {
    #[error("no browser window")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error("missing element `{0}`")]
    MissingElement(String),
    #[error("{0} is not supported")]
    Unsupported(&'static str),
    #[error("{call} failed: {detail}")]
    Js { call: &'static str, detail: String },
}

impl DomError {
    pub fn js(call: &'static str, value: JsValue) -> Self {
        Self::Js {
            call,
            detail: value
                .as_string()
                .unwrap_or_else(|| format!("{value:?}")),
        }
    }
}

/// Logs the failure and drops it; the calling feature simply stays off.
pub fn warn_on_error<T>(feature: &str, result: Result<T, DomError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            log::warn!("{feature} disabled: {error}");
            None
        }
    }
}

pub fn window() -> Result<Window, DomError> {
    web_sys::window().ok_or(DomError::NoWindow)
}

pub fn document() -> Result<Document, DomError> {
    window()?.document().ok_or(DomError::NoDocument)
}

pub fn body() -> Result<HtmlElement, DomError> {
    document()?
        .body()
        .ok_or_else(|| DomError::MissingElement("body".to_string()))
}

pub fn element_by_id(id: &str) -> Result<Element, DomError> {
    document()?
        .get_element_by_id(id)
        .ok_or_else(|| DomError::MissingElement(format!("#{id}")))
}

pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

pub fn scroll_y() -> f64 {
    window()
        .ok()
        .and_then(|window| window.scroll_y().ok())
        .unwrap_or(0.0)
}

pub fn inner_width() -> f64 {
    window()
        .ok()
        .and_then(|window| window.inner_width().ok())
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0)
}

pub fn page_visible() -> bool {
    document()
        .map(|document| document.visibility_state() == VisibilityState::Visible)
        .unwrap_or(true)
}

fn section_element(id: &str) -> Result<HtmlElement, DomError> {
    element_by_id(id)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| DomError::MissingElement(format!("#{id}")))
}

pub fn scroll_to_section(id: &str) -> Result<(), DomError> {
    let top = f64::from(section_element(id)?.offset_top());

    let options = ScrollToOptions::new();
    options.set_top(scroll_target(top));
    options.set_behavior(ScrollBehavior::Smooth);
    window()?.scroll_to_with_scroll_to_options(&options);
    Ok(())
}

pub fn section_bounds<'a>(ids: impl IntoIterator<Item = &'a str>) -> Vec<SectionBounds> {
    ids.into_iter()
        .filter_map(|id| {
            let element = section_element(id).ok()?;
            Some(SectionBounds {
                id: id.to_string(),
                top: f64::from(element.offset_top()),
                height: f64::from(element.offset_height()),
            })
        })
        .collect()
}

pub fn set_scroll_locked(locked: bool) -> Result<(), DomError> {
    let value = if locked { "hidden" } else { "" };
    body()?
        .style()
        .set_property("overflow", value)
        .map_err(|error| DomError::js("style.setProperty", error))
}

/// `localStorage`, or nothing when the browser refuses access.
pub struct BrowserStorage {
    storage: Option<Storage>,
}

impl BrowserStorage {
    pub fn local() -> Self {
        let storage = window()
            .ok()
            .and_then(|window| window.local_storage().ok().flatten());
        if storage.is_none() {
            log::warn!("local storage unavailable, theme choice will not persist");
        }
        Self { storage }
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) {
        let Some(storage) = self.storage.as_ref() else {
            return;
        };
        if let Err(error) = storage.set_item(key, value) {
            log::warn!("{}", DomError::js("localStorage.setItem", error));
        }
    }
}

pub struct RootStyle {
    style: CssStyleDeclaration,
    body: HtmlElement,
}

impl RootStyle {
    pub fn current() -> Result<Self, DomError> {
        let document = document()?;
        let root = document
            .document_element()
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
            .ok_or_else(|| DomError::MissingElement("html".to_string()))?;

        Ok(Self {
            style: root.style(),
            body: body()?,
        })
    }
}

impl ThemeTarget for RootStyle {
    fn set_variable(&mut self, name: &str, value: &str) {
        if let Err(error) = self.style.set_property(name, value) {
            log::warn!("{}", DomError::js("style.setProperty", error));
        }
    }

    fn set_light_class(&mut self, enabled: bool) {
        if let Err(error) = self
            .body
            .class_list()
            .toggle_with_force(LIGHT_BODY_CLASS, enabled)
        {
            log::warn!("{}", DomError::js("classList.toggle", error));
        }
    }
}

pub struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn new(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, DomError> {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target
            .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            .map_err(|error| DomError::js("addEventListener", error))?;

        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }

    pub fn on_window(
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, DomError> {
        Self::new(&window()?, event, handler)
    }

    pub fn on_document(
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, DomError> {
        Self::new(&document()?, event, handler)
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

struct DebouncerState {
    debounce: Debounce,
    pending: Option<Timeout>,
}

/// Runs the latest action once no new call arrived for the delay. Clones
/// share the same pending timer.
#[derive(Clone)]
pub struct Debouncer {
    state: Rc<RefCell<DebouncerState>>,
}

impl Debouncer {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            state: Rc::new(RefCell::new(DebouncerState {
                debounce: Debounce::new(delay_ms),
                pending: None,
            })),
        }
    }

    pub fn call(&self, action: impl FnOnce() + 'static) {
        let mut state = self.state.borrow_mut();
        let ticket = state.debounce.trigger(now_ms());
        let delay = state.debounce.delay_ms();
        let shared = Rc::downgrade(&self.state);
        state.pending = Some(Timeout::new(delay, move || {
            let due = shared
                .upgrade()
                .is_some_and(|shared| shared.borrow_mut().debounce.fire(ticket));
            if due {
                action();
            }
        }));
    }

    pub fn cancel(&self) {
        let mut state = self.state.borrow_mut();
        state.debounce.cancel();
        state.pending = None;
    }
}

pub fn request_frame(callback: impl FnOnce() + 'static) -> Result<(), DomError> {
    let callback = Closure::once_into_js(callback);
    window()?
        .request_animation_frame(callback.unchecked_ref())
        .map(|_| ())
        .map_err(|error| DomError::js("requestAnimationFrame", error))
}

/// Calls `frame` once per animation frame while it returns `true` and the
/// token has not been cancelled.
pub fn run_frames(token: CancellationToken, frame: impl FnMut() -> bool + 'static) {
    let scheduled = request_frame(move || {
        if token.is_cancelled() {
            return;
        }
        let mut frame = frame;
        if frame() {
            run_frames(token, frame);
        }
    });
    warn_on_error("animation loop", scheduled);
}
