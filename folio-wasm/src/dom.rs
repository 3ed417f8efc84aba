use folio_core::Style;
use folio_core::theme::Theme;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement};

pub fn html_by_id(document: &Document, id: &str) -> Option<HtmlElement> {
    let el = document.get_element_by_id(id);
    if el.is_none() {
        tracing::trace!(id, "element not on page");
    }
    el?.dyn_into::<HtmlElement>().ok()
}

pub fn query_html(root: &Element, selector: &str) -> Option<HtmlElement> {
    root.query_selector(selector)
        .ok()
        .flatten()?
        .dyn_into::<HtmlElement>()
        .ok()
}

pub fn query_all_html(root: &Element, selector: &str) -> Vec<HtmlElement> {
    let Ok(nodes) = root.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.item(i)?.dyn_into::<HtmlElement>().ok())
        .collect()
}

pub fn set_css(el: &HtmlElement, property: &str, value: &str) {
    let _ = el.style().set_property(property, value);
}

/// Write an animated pose: transform, opacity and filter.
pub fn apply_style(el: &HtmlElement, style: &Style) {
    for (property, value) in style.css_properties() {
        set_css(el, property, &value);
    }
}

pub fn set_display(el: &HtmlElement, shown: bool) {
    set_css(el, "display", if shown { "" } else { "none" });
}

pub fn set_interactive(el: &HtmlElement, on: bool) {
    set_css(el, "pointer-events", if on { "auto" } else { "none" });
}

// Property assignment rather than attributes, so the live state changes.
pub fn set_disabled(el: &HtmlElement, disabled: bool) {
    let _ = js_sys::Reflect::set(
        el.as_ref(),
        &JsValue::from_str("disabled"),
        &JsValue::from_bool(disabled),
    );
}

/// Numeric DOM property such as `scrollLeft`; 0 when unreadable.
pub fn get_number(el: &HtmlElement, property: &str) -> f64 {
    js_sys::Reflect::get(el.as_ref(), &JsValue::from_str(property))
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

pub fn set_number(el: &HtmlElement, property: &str, value: f64) {
    let _ = js_sys::Reflect::set(
        el.as_ref(),
        &JsValue::from_str(property),
        &JsValue::from_f64(value),
    );
}

/// Publish a theme as custom properties scoped to `el`.
pub fn apply_theme(el: &HtmlElement, theme: &Theme) {
    for (name, value) in theme.css_variables() {
        set_css(el, name, &value);
    }
}

/// Closest ancestor (or self) of an event target matching `selector`.
pub fn closest_from_event(event: &web_sys::Event, selector: &str) -> Option<Element> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    target.closest(selector).ok().flatten()
}

/// Integer value of a `data-*` attribute.
pub fn data_index(el: &Element, attribute: &str) -> Option<usize> {
    el.get_attribute(attribute)?.parse().ok()
}
