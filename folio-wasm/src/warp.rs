//! Tech-stack region: info panel or physics playground, swapped through
//! the warp transition.

use std::cell::RefCell;
use std::rc::Rc;

use folio_core::markup;
use folio_core::physics::ToyKind;
use folio_core::warp::{DisplayMode, ToggleOutcome, WarpEvent};
use gloo::events::EventListener;
use tracing::debug;
use web_sys::HtmlElement;

use crate::constants::*;
use crate::state::State;
use crate::toy::ToyHandle;
use crate::utils::viewport_size;
use crate::{anim, dom, scroll};

const TOY_ZONES: [(ToyKind, &str); 2] = [
    (ToyKind::Floating, r#"[data-toy="floating"]"#),
    (ToyKind::Falling, r#"[data-toy="falling"]"#),
];

fn mount_toys(s: &mut State, region: &HtmlElement) {
    let (width, _) = viewport_size(&s.window);
    let viewport = s.config.viewport_class(width);
    for (kind, selector) in TOY_ZONES {
        if let Some(zone) = dom::query_html(region, selector)
            && let Some(handle) =
                ToyHandle::mount(&s.window, zone, kind, viewport, &s.config.physics)
        {
            s.toys.push(handle);
        }
    }
}

/// Replace the region's subtree. Dropping the old toys stops them.
fn mount_subtree(s: &mut State, mode: DisplayMode) {
    s.toys.clear();
    let Some(region) = dom::html_by_id(&s.document, TECH_CONTENT_ID) else {
        return;
    };
    match mode {
        DisplayMode::Info => region.set_inner_html(&markup::info_panel(&s.content)),
        DisplayMode::Play => {
            region.set_inner_html(&markup::play_panel(&s.content));
            mount_toys(s, &region);
        }
    }
}

/// Rebuild the toys when their containers changed size. Skipped
/// mid-transition; the swap mounts fresh ones anyway. Resizes that leave
/// the zones alone (a mobile address bar collapsing) keep the running
/// toys and their settle timers.
pub fn remount_toys(s: &mut State) {
    if s.warp.is_transitioning() || s.warp.mounted() != DisplayMode::Play {
        return;
    }
    if !s.toys.is_empty() && !s.toys.iter().any(ToyHandle::zone_resized) {
        return;
    }
    mount_subtree(s, DisplayMode::Play);
}

fn sync_controls(s: &State) {
    let mode = s.warp.mounted();
    let interactive = s.warp.interactive();
    if let Some(button) = dom::html_by_id(&s.document, WARP_BUTTON_ID) {
        dom::set_disabled(&button, !interactive);
        button.set_text_content(Some(mode.button_label()));
    }
    if let Some(status) = dom::html_by_id(&s.document, PHYSICS_STATUS_ID) {
        status.set_text_content(Some(mode.status_label()));
    }
    if let Some(region) = dom::html_by_id(&s.document, TECH_CONTENT_ID) {
        dom::set_interactive(&region, interactive);
    }
}

pub fn tick(s: &mut State, dt: f64) -> bool {
    if !s.warp.is_animating() {
        return false;
    }
    let events = s.warp.advance(dt);
    for event in events {
        match event {
            WarpEvent::Swap { unmount, mount } => {
                debug!(?unmount, ?mount, "warp swap");
                mount_subtree(s, mount);
                sync_controls(s);
            }
            WarpEvent::Settled { mode } => {
                debug!(?mode, "warp settled");
                sync_controls(s);
                scroll::relayout(s);
            }
        }
    }
    if let Some(region) = dom::html_by_id(&s.document, TECH_CONTENT_ID) {
        dom::apply_style(&region, &s.warp.content_style());
    }
    if let Some(overlay) = dom::html_by_id(&s.document, WARP_OVERLAY_ID) {
        dom::apply_style(&overlay, &s.warp.overlay_style());
    }
    s.warp.is_animating()
}

pub fn attach(state: &Rc<RefCell<State>>) {
    {
        let mut s = state.borrow_mut();
        let mode = s.warp.mounted();
        mount_subtree(&mut s, mode);
        sync_controls(&s);
        if let Some(overlay) = dom::html_by_id(&s.document, WARP_OVERLAY_ID) {
            dom::apply_style(&overlay, &s.warp.overlay_style());
        }
    }
    let button = dom::html_by_id(&state.borrow().document, WARP_BUTTON_ID);
    let Some(button) = button else {
        return;
    };
    let st = state.clone();
    let listener = EventListener::new(&button, "click", move |_| {
        let started = {
            let mut s = st.borrow_mut();
            let started = s.warp.toggle() == ToggleOutcome::Started;
            if started {
                sync_controls(&s);
            }
            started
        };
        if started {
            anim::ensure(&st);
        }
    });
    state.borrow_mut().listeners.push(listener);
}
