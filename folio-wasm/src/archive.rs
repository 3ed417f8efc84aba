//! Artwork strip inside the about modal. Listeners sit on the modal
//! container and delegate, so they survive remounts of its body.

use std::cell::RefCell;
use std::rc::Rc;

use folio_core::archive::{ArchiveStrip, ScrollDirection};
use gloo::events::{EventListener, EventListenerOptions};
use tracing::trace;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, MouseEvent, ScrollBehavior, ScrollToOptions};

use crate::dom;
use crate::state::State;

fn part(container: &HtmlElement, selector: &str) -> Option<HtmlElement> {
    dom::query_html(container, selector)
}

fn restyle_records(container: &HtmlElement, strip: &ArchiveStrip) {
    for record in dom::query_all_html(container, "[data-record]") {
        if let Some(i) = dom::data_index(&record, "data-record") {
            record.set_class_name(strip.focus(i).class());
        }
    }
}

fn restyle_logs(container: &HtmlElement, strip: &ArchiveStrip) {
    if let Some(list) = part(container, "[data-archive-log-list]") {
        list.set_class_name(strip.logs_class());
    }
    if let Some(label) = part(container, "[data-archive-logs] span") {
        label.set_text_content(Some(strip.logs_label()));
    }
}

fn restyle_strip(container: &HtmlElement, strip: &ArchiveStrip) {
    if let Some(el) = part(container, "[data-archive-strip]") {
        el.set_class_name(strip.strip_class());
    }
}

/// Reset for a fresh mount of the about modal.
pub fn reset(s: &mut State) {
    s.archive = ArchiveStrip::new(s.content.archive.records.len());
    s.archive_entry = Some(ArchiveStrip::entry());
}

pub fn clear(s: &mut State) {
    s.archive.release();
    s.archive_entry = None;
}

/// Slide-in of the record track.
pub fn tick(s: &mut State, container: Option<&HtmlElement>, dt: f64) -> bool {
    let Some(tween) = s.archive_entry.as_mut() else {
        return false;
    };
    let step = tween.advance(dt);
    if let Some(track) = container.and_then(|c| part(c, "[data-archive-track]")) {
        dom::apply_style(&track, &step.style);
    }
    if step.finished {
        s.archive_entry = None;
    }
    !step.finished
}

pub fn attach(state: &Rc<RefCell<State>>, container: &HtmlElement) -> Vec<EventListener> {
    let mut listeners = Vec::new();

    let st = state.clone();
    let root = container.clone();
    listeners.push(EventListener::new(container, "click", move |e| {
        if let Some(button) = dom::closest_from_event(e, "[data-archive-scroll]") {
            let direction = button
                .get_attribute("data-archive-scroll")
                .and_then(|d| ScrollDirection::from_attr(&d));
            let strip = part(&root, "[data-archive-strip]");
            if let (Some(direction), Some(strip)) = (direction, strip) {
                let opts = ScrollToOptions::new();
                opts.set_left(direction.delta());
                opts.set_behavior(ScrollBehavior::Smooth);
                strip.scroll_by_with_scroll_to_options(&opts);
            }
        } else if dom::closest_from_event(e, "[data-archive-logs]").is_some() {
            let mut s = st.borrow_mut();
            let open = s.archive.toggle_experiments();
            trace!(open, "experiment logs");
            restyle_logs(&root, &s.archive);
        }
    }));

    let st = state.clone();
    let root = container.clone();
    listeners.push(EventListener::new(container, "mouseover", move |e| {
        let index = dom::closest_from_event(e, "[data-record]")
            .and_then(|el| dom::data_index(&el, "data-record"));
        let mut s = st.borrow_mut();
        if s.archive.hover(index) {
            restyle_records(&root, &s.archive);
        }
    }));

    let st = state.clone();
    let root = container.clone();
    listeners.push(EventListener::new(container, "mousedown", move |e| {
        let Some(mouse) = e.dyn_ref::<MouseEvent>() else {
            return;
        };
        if dom::closest_from_event(e, "[data-archive-strip]").is_none() {
            return;
        }
        let Some(strip) = part(&root, "[data-archive-strip]") else {
            return;
        };
        let mut s = st.borrow_mut();
        s.archive.press(
            mouse.page_x() as f64,
            strip.offset_left() as f64,
            dom::get_number(&strip, "scrollLeft"),
        );
        restyle_strip(&root, &s.archive);
    }));

    let st = state.clone();
    let root = container.clone();
    listeners.push(EventListener::new_with_options(
        container,
        "mousemove",
        EventListenerOptions::enable_prevent_default(),
        move |e| {
            let Some(mouse) = e.dyn_ref::<MouseEvent>() else {
                return;
            };
            let Some(strip) = part(&root, "[data-archive-strip]") else {
                return;
            };
            let target = st
                .borrow()
                .archive
                .drag_to(mouse.page_x() as f64, strip.offset_left() as f64);
            if let Some(left) = target {
                e.prevent_default();
                dom::set_number(&strip, "scrollLeft", left);
            }
        },
    ));

    // Drags end on release anywhere, and leaving the modal drops the hover.
    let window = state.borrow().window.clone();
    let st = state.clone();
    let root = container.clone();
    listeners.push(EventListener::new(&window, "mouseup", move |_| {
        let mut s = st.borrow_mut();
        if s.archive.release() {
            restyle_strip(&root, &s.archive);
        }
    }));

    let st = state.clone();
    let root = container.clone();
    listeners.push(EventListener::new(container, "mouseleave", move |_| {
        let mut s = st.borrow_mut();
        if s.archive.release() {
            restyle_strip(&root, &s.archive);
        }
        if s.archive.hover(None) {
            restyle_records(&root, &s.archive);
        }
    }));

    listeners
}
