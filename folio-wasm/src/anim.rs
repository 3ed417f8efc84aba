use std::cell::RefCell;
use std::rc::Rc;

use gloo::render::request_animation_frame;

use crate::state::State;
use crate::{modal, preload, scroll, warp};

/// Longest step a single frame may advance, so a backgrounded tab does
/// not jump animations to their end.
const MAX_FRAME_MS: f64 = 100.0;

/// Schedule the shared frame loop if it is not already running.
pub fn ensure(state: &Rc<RefCell<State>>) {
    let mut s = state.borrow_mut();
    if s.ticker.is_some() {
        return;
    }
    let st = state.clone();
    s.ticker = Some(request_animation_frame(move |ts| frame(&st, ts)));
}

fn frame(state: &Rc<RefCell<State>>, timestamp: f64) {
    let again = {
        let mut guard = state.borrow_mut();
        let s = &mut *guard;
        s.ticker.take();
        let dt = match s.last_frame_ms {
            Some(prev) => (timestamp - prev).clamp(0.0, MAX_FRAME_MS) / 1000.0,
            None => 0.0,
        };
        s.last_frame_ms = Some(timestamp);

        let mut busy = preload::tick(s, dt);
        busy |= warp::tick(s, dt);
        busy |= modal::tick(s, dt);
        busy |= scroll::tick_back_to_top(s, dt);
        if !busy {
            s.last_frame_ms = None;
        }
        busy
    };
    if again {
        ensure(state);
    }
}
