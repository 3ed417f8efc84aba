//! Browser side of the label toys: measures the labels, runs the fixed
//! stepper and mirrors body transforms onto the DOM every frame.

use std::cell::RefCell;
use std::rc::Rc;

use folio_core::config::{PhysicsConfig, ViewportClass};
use folio_core::constants::PHYSICS_DT;
use folio_core::physics::{Bounds, LabelSize, PhysicsToy, ToyKind};
use gloo::events::EventListener;
use gloo::render::{AnimationFrame, request_animation_frame};
use gloo::timers::callback::{Interval, Timeout};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlElement, MouseEvent, TouchEvent, Window};

use crate::dom;
use crate::utils::now_secs;

type FrameSlot = Rc<RefCell<Option<AnimationFrame>>>;

/// One running toy. Dropping it stops the stepper, the frame loop, the
/// settle timer and the pointer listeners.
pub struct ToyHandle {
    toy: Rc<RefCell<PhysicsToy>>,
    zone: HtmlElement,
    bounds: Bounds,
    frame: FrameSlot,
    _stepper: Interval,
    _settle: Option<Timeout>,
    _listeners: Vec<EventListener>,
}

impl Drop for ToyHandle {
    fn drop(&mut self) {
        // The frame closure holds a clone of the slot; taking the handle
        // cancels the pending frame and breaks the cycle.
        self.frame.borrow_mut().take();
        debug!(kind = ?self.toy.borrow().kind(), "physics toy torn down");
    }
}

/// Container-relative pointer position for a mouse or touch event.
fn pointer_in(zone: &Element, event: &Event) -> Option<(f64, f64)> {
    let (cx, cy) = if let Some(e) = event.dyn_ref::<MouseEvent>() {
        (e.client_x() as f64, e.client_y() as f64)
    } else {
        let touch = event.dyn_ref::<TouchEvent>()?.touches().get(0)?;
        (touch.client_x() as f64, touch.client_y() as f64)
    };
    let rect = zone.get_bounding_client_rect();
    Some((cx - rect.left(), cy - rect.top()))
}

fn start_frames(slot: FrameSlot, toy: Rc<RefCell<PhysicsToy>>, labels: Rc<Vec<HtmlElement>>) {
    let next = slot.clone();
    let handle = request_animation_frame(move |_| {
        next.borrow_mut().take();
        for (el, t) in labels.iter().zip(toy.borrow().transforms()) {
            dom::set_css(el, "transform", &t.css());
        }
        start_frames(next, toy, labels);
    });
    *slot.borrow_mut() = Some(handle);
}

fn listen(
    target: &web_sys::EventTarget,
    name: &'static str,
    f: impl FnMut(&Event) + 'static,
) -> EventListener {
    EventListener::new(target, name, f)
}

impl ToyHandle {
    /// Whether the zone's laid-out size differs from the one the toy was
    /// built for.
    pub fn zone_resized(&self) -> bool {
        let now = Bounds {
            width: self.zone.offset_width() as f64,
            height: self.zone.offset_height() as f64,
        };
        now.resized_from(&self.bounds)
    }

    /// Build and start a toy over the labels inside `zone`. Returns `None`
    /// when the zone has not been laid out yet.
    pub fn mount(
        window: &Window,
        zone: HtmlElement,
        kind: ToyKind,
        viewport: ViewportClass,
        config: &PhysicsConfig,
    ) -> Option<Self> {
        let labels = dom::query_all_html(&zone, ".toy-label");
        // offset sizes ignore the warp transform still applied to the region.
        let sizes: Vec<LabelSize> = labels
            .iter()
            .map(|l| LabelSize::measured(l.offset_width() as f64, l.offset_height() as f64))
            .collect();
        let bounds = Bounds {
            width: zone.offset_width() as f64,
            height: zone.offset_height() as f64,
        };
        let mut rng = SmallRng::from_entropy();
        let toy = match PhysicsToy::new(kind, bounds, &sizes, viewport, config, &mut rng) {
            Ok(toy) => toy,
            Err(err) => {
                warn!(?kind, %err, "physics toy not started");
                return None;
            }
        };
        let settle_delay = toy.settle_delay_ms();
        let toy = Rc::new(RefCell::new(toy));

        let stepper = {
            let toy = toy.clone();
            let millis = (PHYSICS_DT * 1000.0).round() as u32;
            Interval::new(millis, move || toy.borrow_mut().step(now_secs()))
        };

        let settle = settle_delay.map(|ms| {
            let toy = toy.clone();
            Timeout::new(ms, move || {
                toy.borrow_mut().settle(&mut rng);
            })
        });

        let frame: FrameSlot = Rc::new(RefCell::new(None));
        start_frames(frame.clone(), toy.clone(), Rc::new(labels));

        let mut listeners = Vec::new();
        let zone_el: Element = zone.clone().into();
        // Pointer tracking is global so labels react before the cursor
        // enters the zone.
        for name in ["mousemove", "touchmove", "touchstart"] {
            let toy = toy.clone();
            let zone = zone_el.clone();
            listeners.push(listen(window, name, move |e| {
                if let Some((x, y)) = pointer_in(&zone, e) {
                    toy.borrow_mut().set_pointer(x, y);
                }
            }));
        }
        for name in ["mousedown", "touchstart"] {
            let toy = toy.clone();
            let zone = zone_el.clone();
            listeners.push(listen(&zone_el, name, move |e| {
                if let Some((x, y)) = pointer_in(&zone, e) {
                    let mut toy = toy.borrow_mut();
                    toy.set_pointer(x, y);
                    toy.grab(x, y);
                }
            }));
        }
        for name in ["mouseup", "touchend", "touchcancel"] {
            let toy = toy.clone();
            listeners.push(listen(window, name, move |e| {
                let mut toy = toy.borrow_mut();
                toy.release();
                if e.dyn_ref::<TouchEvent>().is_some() {
                    toy.clear_pointer();
                }
            }));
        }

        debug!(?kind, labels = sizes.len(), "physics toy mounted");
        Some(ToyHandle {
            toy,
            zone,
            bounds,
            frame,
            _stepper: stepper,
            _settle: settle,
            _listeners: listeners,
        })
    }
}
