use std::cell::RefCell;
use std::rc::Rc;

use folio_core::constants::PROJECT_SCROLL_DELAY_MS;
use folio_core::markup;
use folio_core::modal::{ModalEvent, ModalKind};
use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use tracing::debug;
use web_sys::{HtmlElement, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

use crate::constants::*;
use crate::state::State;
use crate::{anim, archive, dom, reveal};

fn container_id(kind: ModalKind) -> &'static str {
    match kind {
        ModalKind::About => ABOUT_MODAL_ID,
        ModalKind::Projects => PROJECTS_MODAL_ID,
    }
}

fn container(s: &State, kind: ModalKind) -> Option<HtmlElement> {
    dom::html_by_id(&s.document, container_id(kind))
}

fn body_html(s: &State, kind: ModalKind) -> String {
    match kind {
        ModalKind::About => markup::about_modal(&s.content, &s.archive),
        ModalKind::Projects => markup::projects_modal(&s.content, s.accordion.expanded()),
    }
}

fn set_scroll_locked(s: &State, locked: bool) {
    if let Some(body) = s.document.body() {
        dom::set_css(&body, "overflow", if locked { "hidden" } else { "" });
    }
    if let Some(page) = dom::html_by_id(&s.document, PAGE_ID) {
        let classes = page.class_list();
        let _ = if locked {
            classes.add_1(PAGE_SUPPRESSED_CLASS)
        } else {
            classes.remove_1(PAGE_SUPPRESSED_CLASS)
        };
    }
}

fn apply_events(s: &mut State, events: Vec<ModalEvent>) {
    for event in events {
        match event {
            ModalEvent::Mount(kind) => {
                if kind == ModalKind::About {
                    archive::reset(s);
                }
                if let Some(el) = container(s, kind) {
                    el.set_inner_html(&body_html(s, kind));
                    dom::apply_style(&el, &s.modals.style(kind));
                    dom::set_display(&el, true);
                    if kind == ModalKind::About {
                        reveal::scan(s, &el);
                        reveal::check(s);
                    }
                }
            }
            ModalEvent::Unmount(kind) => {
                match kind {
                    ModalKind::Projects => {
                        s.accordion = Default::default();
                        s.pending_scroll = None;
                    }
                    ModalKind::About => {
                        archive::clear(s);
                        s.reveals.clear();
                    }
                }
                if let Some(el) = container(s, kind) {
                    el.set_inner_html("");
                    dom::set_display(&el, false);
                }
            }
            ModalEvent::LockScroll => set_scroll_locked(s, true),
            ModalEvent::UnlockScroll => set_scroll_locked(s, false),
        }
    }
}

/// Open a modal and start its entrance.
pub fn open(state: &Rc<RefCell<State>>, kind: ModalKind) {
    {
        let mut s = state.borrow_mut();
        let events = s.modals.open(kind);
        apply_events(&mut s, events);
    }
    anim::ensure(state);
}

pub fn tick(s: &mut State, dt: f64) -> bool {
    let about = container(s, ModalKind::About);
    let mut busy = archive::tick(s, about.as_ref(), dt);
    busy |= reveal::tick(s, dt);
    if !s.modals.is_animating() {
        return busy;
    }
    let events = s.modals.advance(dt);
    for kind in ModalKind::ALL {
        if s.modals.phase(kind).is_mounted()
            && let Some(el) = container(s, kind)
        {
            dom::apply_style(&el, &s.modals.style(kind));
        }
    }
    apply_events(s, events);
    busy || s.modals.is_animating()
}

fn toggle_project(s: &mut State, index: usize) {
    let change = s.accordion.toggle(index);
    if let Some(el) = container(s, ModalKind::Projects) {
        el.set_inner_html(&body_html(s, ModalKind::Projects));
    }
    // Scroll once the expanded entry has had time to open.
    s.pending_scroll = change.scroll_to.map(|i| {
        let document = s.document.clone();
        Timeout::new(PROJECT_SCROLL_DELAY_MS, move || {
            let selector = format!("[data-project=\"{i}\"]");
            if let Ok(Some(entry)) = document.query_selector(&selector) {
                let opts = ScrollIntoViewOptions::new();
                opts.set_behavior(ScrollBehavior::Smooth);
                opts.set_block(ScrollLogicalPosition::Start);
                entry.scroll_into_view_with_scroll_into_view_options(&opts);
            }
        })
    });
}

pub fn attach(state: &Rc<RefCell<State>>) {
    let mut listeners = Vec::new();
    for kind in ModalKind::ALL {
        let Some(el) = container(&state.borrow(), kind) else {
            continue;
        };
        dom::set_display(&el, false);
        if kind == ModalKind::About {
            listeners.extend(archive::attach(state, &el));
            let st = state.clone();
            listeners.push(EventListener::new(&el, "scroll", move |_| {
                if reveal::check(&mut st.borrow_mut()) {
                    anim::ensure(&st);
                }
            }));
        }
        let st = state.clone();
        listeners.push(EventListener::new(&el, "click", move |e| {
            if dom::closest_from_event(e, "[data-close]").is_some() {
                debug!(?kind, "modal close requested");
                st.borrow_mut().modals.request_close(kind);
                anim::ensure(&st);
            } else if let Some(toggle) = dom::closest_from_event(e, "[data-toggle]")
                && let Some(index) = dom::data_index(&toggle, "data-toggle")
            {
                toggle_project(&mut st.borrow_mut(), index);
            }
        }));
    }

    // Abrupt unmount: everything closes and the scroll lock is released.
    let window = state.borrow().window.clone();
    let st = state.clone();
    listeners.push(EventListener::new(&window, "pagehide", move |_| {
        let mut s = st.borrow_mut();
        let events = s.modals.teardown();
        apply_events(&mut s, events);
    }));

    state.borrow_mut().listeners.extend(listeners);
}
