use std::cell::RefCell;
use std::rc::Rc;

use folio_core::preload::LoadOutcome;
use gloo::events::EventListener;
use tracing::{debug, info};
use web_sys::HtmlImageElement;

use crate::constants::*;
use crate::state::{PendingImages, State};
use crate::utils::asset_url;
use crate::{anim, dom, scroll};

/// Start loading every preload image and the intro sequence. Without a
/// preloader on the page the gate is still filled but nothing waits on it.
pub fn attach(state: &Rc<RefCell<State>>) {
    let sources = {
        let mut s = state.borrow_mut();
        if dom::html_by_id(&s.document, PRELOADER_ID).is_none() {
            s.intro = None;
        }
        s.gate.sources().to_vec()
    };

    let mut images = Vec::with_capacity(sources.len());
    let mut listeners = Vec::with_capacity(sources.len() * 2);
    for (index, src) in sources.iter().enumerate() {
        let img = match HtmlImageElement::new() {
            Ok(img) => img,
            Err(err) => {
                debug!(?err, %src, "image element unavailable");
                state.borrow_mut().gate.complete(index, LoadOutcome::Failed);
                continue;
            }
        };
        for (event, outcome) in [("load", LoadOutcome::Loaded), ("error", LoadOutcome::Failed)] {
            let st = state.clone();
            listeners.push(EventListener::once(&img, event, move |_| {
                st.borrow_mut().gate.complete(index, outcome);
                anim::ensure(&st);
            }));
        }
        img.set_src(&asset_url(src));
        images.push(img);
    }

    state.borrow_mut().pending_images = Some(PendingImages { images, listeners });
    anim::ensure(state);
}

pub fn tick(s: &mut State, dt: f64) -> bool {
    if s.gate.is_open() && s.pending_images.take().is_some() {
        info!(
            total = s.gate.total(),
            failed = s.gate.failed(),
            "preload complete"
        );
    }
    let gate_open = s.gate.is_open();
    let Some(intro) = s.intro.as_mut() else {
        return false;
    };
    let frame = intro.advance(dt, gate_open);
    if let Some(el) = dom::html_by_id(&s.document, PRELOADER_REVEALER_ID) {
        dom::apply_style(&el, &frame.revealer);
    }
    if let Some(el) = dom::html_by_id(&s.document, PRELOADER_GREETING_ID) {
        dom::apply_style(&el, &frame.greeting);
    }
    if let Some(el) = dom::html_by_id(&s.document, PRELOADER_ID) {
        dom::set_css(&el, "clip-path", &frame.clip_path());
        if frame.finished {
            dom::set_display(&el, false);
        }
    }
    if frame.finished {
        s.intro = None;
        scroll::relayout(s);
        return false;
    }
    true
}
