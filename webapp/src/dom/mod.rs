pub mod storage;

use std::time::Duration;

use anyhow::Result;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, EventTarget, HtmlElement, Window};

// JsValue errors carry no useful Display, so flatten them into the anyhow chain
pub fn js_err(value: JsValue) -> anyhow::Error {
    match value.as_string() {
        Some(msg) => anyhow::Error::msg(msg),
        None => anyhow::Error::msg(format!("{value:?}")),
    }
}

// timer apis take whole milliseconds
pub fn millis(d: Duration) -> u32 {
    u32::try_from(d.as_millis()).unwrap_or(u32::MAX)
}

pub fn window() -> Result<Window> {
    web_sys::window().ok_or_else(|| anyhow::Error::msg("no global window"))
}

pub fn document() -> Result<Document> {
    window()?
        .document()
        .ok_or_else(|| anyhow::Error::msg("window has no document"))
}

pub fn body() -> Result<HtmlElement> {
    document()?
        .body()
        .ok_or_else(|| anyhow::Error::msg("document has no body"))
}

pub fn location_path() -> Result<String> {
    window()?.location().pathname().map_err(js_err)
}

pub fn by_id(id: &str) -> Option<Element> {
    document().ok()?.get_element_by_id(id)
}

pub fn query(selector: &str) -> Option<Element> {
    document().ok()?.query_selector(selector).ok().flatten()
}

// document order, skipping anything that is not an element
pub fn query_all(selector: &str) -> Vec<Element> {
    let Some(list) = document()
        .ok()
        .and_then(|doc| doc.query_selector_all(selector).ok())
    else {
        return Vec::new();
    };

    (0..list.length())
        .filter_map(|idx| list.item(idx))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn as_html(element: Element) -> Option<HtmlElement> {
    element.dyn_into::<HtmlElement>().ok()
}

pub fn set_style(element: &HtmlElement, property: &str, value: &str) -> Result<()> {
    element
        .style()
        .set_property(property, value)
        .map_err(js_err)
}

// whether the event target sits inside an element matching selector
pub fn target_within(target: Option<EventTarget>, selector: &str) -> bool {
    target
        .and_then(|t| t.dyn_into::<Element>().ok())
        .and_then(|el| el.closest(selector).ok().flatten())
        .is_some()
}

// attach a listener for the lifetime of the page
//
// nothing here is ever removed: a navigation throws away the whole document, so the
// closures are simply leaked into the js heap
pub fn listen<E, F>(target: &EventTarget, event: &str, handler: F) -> Result<()>
where
    E: FromWasmAbi + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::<dyn FnMut(E)>::new(handler);

    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(js_err)?;

    closure.forget();

    Ok(())
}

pub fn listen_passive<E, F>(target: &EventTarget, event: &str, handler: F) -> Result<()>
where
    E: FromWasmAbi + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::<dyn FnMut(E)>::new(handler);

    let options = web_sys::AddEventListenerOptions::new();
    options.set_passive(true);

    target
        .add_event_listener_with_callback_and_add_event_listener_options(
            event,
            closure.as_ref().unchecked_ref(),
            &options,
        )
        .map_err(js_err)?;

    closure.forget();

    Ok(())
}

pub fn next_frame<F>(callback: F) -> Result<()>
where
    F: FnOnce() + 'static,
{
    let closure = Closure::once_into_js(callback);

    window()?
        .request_animation_frame(closure.unchecked_ref())
        .map_err(js_err)?;

    Ok(())
}

pub fn media_matches(query: &str) -> bool {
    window()
        .ok()
        .and_then(|w| w.match_media(query).ok().flatten())
        .is_some_and(|mql| mql.matches())
}

// whether a global (a constructor, a library namespace) is defined on window
pub fn global(name: &str) -> Option<JsValue> {
    let window = window().ok()?;
    let value = js_sys::Reflect::get(&window, &JsValue::from_str(name)).ok()?;

    if value.is_undefined() || value.is_null() {
        None
    } else {
        Some(value)
    }
}
