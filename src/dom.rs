use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, Window,
};

use crate::error::SetupError;

pub fn window() -> Result<Window, SetupError> {
    web_sys::window().ok_or(SetupError::MissingElement("window"))
}

pub fn document() -> Result<Document, SetupError> {
    window()?
        .document()
        .ok_or(SetupError::MissingElement("document"))
}

pub fn query(document: &Document, selector: &'static str) -> Result<Element, SetupError> {
    document
        .query_selector(selector)?
        .ok_or(SetupError::MissingElement(selector))
}

pub fn query_optional(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

pub fn by_id(document: &Document, id: &'static str) -> Result<Element, SetupError> {
    document
        .get_element_by_id(id)
        .ok_or(SetupError::MissingElement(id))
}

pub fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>, SetupError> {
    let nodes = document.query_selector_all(selector)?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

/// Registers `handler` for the lifetime of the page. The closure is leaked on purpose,
/// listeners are never removed.
pub fn listen(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), SetupError> {
    let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}

/// Builds an observer that hands the intersecting-or-not entries of each batch to `handler`.
pub fn intersection_observer(
    threshold: f64,
    root_margin: Option<&str>,
    mut handler: impl FnMut(Vec<IntersectionObserverEntry>) + 'static,
) -> Result<IntersectionObserver, SetupError> {
    let callback = Closure::wrap(Box::new(move |entries: Array, _observer: IntersectionObserver| {
        let entries = entries
            .iter()
            .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
            .collect();
        handler(entries);
    }) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));
    if let Some(margin) = root_margin {
        options.set_root_margin(margin);
    }

    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    callback.forget();
    Ok(observer)
}

pub fn add_class(el: &Element, class: &str) {
    let _ = el.class_list().add_1(class);
}

pub fn remove_class(el: &Element, class: &str) {
    let _ = el.class_list().remove_1(class);
}

pub fn has_class(el: &Element, class: &str) -> bool {
    el.class_list().contains(class)
}

pub fn set_style(el: &Element, property: &str, value: &str) {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        let _ = html.style().set_property(property, value);
    }
}

pub fn clear_style(el: &Element, property: &str) {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        let _ = html.style().remove_property(property);
    }
}

pub fn scroll_y(window: &Window) -> f64 {
    window.scroll_y().unwrap_or(0.0)
}
