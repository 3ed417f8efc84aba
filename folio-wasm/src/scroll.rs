//! Pinned scenes, the navigation theme and the back-to-top control.

use std::cell::RefCell;
use std::rc::Rc;

use folio_core::back_to_top::{BackToTop, Visibility};
use folio_core::scene::{PROJECT_CARDS, SceneFrame, SceneId, SceneLayout};
use gloo::events::EventListener;
use tracing::{debug, warn};
use web_sys::{ScrollBehavior, ScrollToOptions};

use crate::constants::*;
use crate::dom;
use crate::state::State;
use crate::utils::{scroll_y, viewport_size};
use crate::{anim, nav, warp};

/// Size the spacers for the current viewport and re-measure every pinned
/// range. Called on start, resize, warp settle and preloader exit.
pub fn relayout(s: &mut State) {
    let (_, vh) = viewport_size(&s.window);
    let cfg = s.sequencer.config().clone();
    let mut spacers = Vec::with_capacity(SCENE_SPACER_IDS.len());
    for (scene, id) in SceneId::ORDER.into_iter().zip(SCENE_SPACER_IDS) {
        let Some(el) = dom::html_by_id(&s.document, id) else {
            s.sequencer.detach();
            return;
        };
        let height = SceneLayout::spacer_height(scene, vh, &cfg);
        dom::set_css(&el, "height", &format!("{height}px"));
        spacers.push(el);
    }
    let y = scroll_y(&s.window);
    let tops = [0, 1, 2].map(|i| spacers[i].get_bounding_client_rect().top() + y);
    if let Err(err) = s.sequencer.relayout(tops, vh) {
        warn!(%err, "scene layout rejected");
        s.sequencer.detach();
        return;
    }
    render(s);
}

fn apply_frame(s: &mut State, frame: &SceneFrame) {
    if let Some(el) = dom::html_by_id(&s.document, ABOUT_PANEL_ID) {
        dom::apply_style(&el, &frame.about);
    }
    if let Some(el) = dom::html_by_id(&s.document, TECH_SCENE_ID) {
        dom::apply_style(&el, &frame.tech);
    }
    if let Some(el) = dom::html_by_id(&s.document, CONTACT_PANEL_ID) {
        dom::apply_style(&el, &frame.contact);
    }
    if let Some(cards) = dom::html_by_id(&s.document, PROJECT_CARDS_ID) {
        for i in 0..PROJECT_CARDS {
            if let Some(card) = dom::query_html(&cards, &format!("[data-card=\"{i}\"]")) {
                dom::apply_style(&card, &frame.cards[i]);
            }
        }
    }
    s.theme.set(frame.theme);
    nav::sync_theme(s);
}

/// Render the scene frame for the current scroll offset and re-evaluate
/// the back-to-top control. Returns true when a fade started.
pub fn render(s: &mut State) -> bool {
    let y = scroll_y(&s.window);
    if let Some(frame) = s.sequencer.frame(y) {
        apply_frame(s, &frame);
    }
    let (_, vh) = viewport_size(&s.window);
    match s.back_to_top.update(y, vh) {
        Some(target) => {
            let fade = &mut s.back_to_top_fade;
            fade.tween = Some(BackToTop::fade(fade.style, target));
            if let Some(el) = dom::html_by_id(&s.document, BACK_TO_TOP_ID) {
                dom::set_interactive(&el, target == Visibility::Visible);
            }
            true
        }
        None => false,
    }
}

pub fn tick_back_to_top(s: &mut State, dt: f64) -> bool {
    let Some(tween) = s.back_to_top_fade.tween.as_mut() else {
        return false;
    };
    let step = tween.advance(dt);
    s.back_to_top_fade.style = step.style;
    if step.finished {
        s.back_to_top_fade.tween = None;
    }
    if let Some(el) = dom::html_by_id(&s.document, BACK_TO_TOP_ID) {
        dom::apply_style(&el, &step.style);
    }
    !step.finished
}

pub fn attach(state: &Rc<RefCell<State>>) {
    let mut listeners = Vec::new();
    let window = state.borrow().window.clone();

    let st = state.clone();
    listeners.push(EventListener::new(&window, "scroll", move |_| {
        let fading = render(&mut st.borrow_mut());
        if fading {
            anim::ensure(&st);
        }
    }));

    let st = state.clone();
    listeners.push(EventListener::new(&window, "resize", move |_| {
        {
            let mut s = st.borrow_mut();
            debug!("viewport resized");
            relayout(&mut s);
            warp::remount_toys(&mut s);
        }
        anim::ensure(&st);
    }));

    let button = dom::html_by_id(&state.borrow().document, BACK_TO_TOP_ID);
    if let Some(button) = button {
        dom::apply_style(&button, &state.borrow().back_to_top_fade.style);
        let win = window.clone();
        listeners.push(EventListener::new(&button, "click", move |_| {
            let opts = ScrollToOptions::new();
            opts.set_top(0.0);
            opts.set_behavior(ScrollBehavior::Smooth);
            win.scroll_to_with_scroll_to_options(&opts);
        }));
    }

    let mut s = state.borrow_mut();
    relayout(&mut s);
    s.listeners.extend(listeners);
    drop(s);
    anim::ensure(state);
}
