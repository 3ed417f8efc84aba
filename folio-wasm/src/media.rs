use std::cell::RefCell;
use std::rc::Rc;

use folio_core::markup;
use folio_core::media::MediaCommand;
use gloo::events::EventListener;
use tracing::debug;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Element, HtmlMediaElement};

use crate::constants::PROJECT_CARDS_ID;
use crate::dom;
use crate::state::State;

fn video(cards: &Element, index: usize) -> Option<HtmlMediaElement> {
    cards
        .query_selector(&format!("[data-video=\"{index}\"]"))
        .ok()
        .flatten()?
        .dyn_into::<HtmlMediaElement>()
        .ok()
}

fn run(cards: &Element, commands: Vec<MediaCommand>) {
    for command in commands {
        match command {
            MediaCommand::Play(i) => {
                let Some(v) = video(cards, i) else { continue };
                match v.play() {
                    // Autoplay may be refused before the first interaction.
                    Ok(promise) => wasm_bindgen_futures::spawn_local(async move {
                        if let Err(err) = JsFuture::from(promise).await {
                            debug!(?err, index = i, "video play rejected");
                        }
                    }),
                    Err(err) => debug!(?err, index = i, "video play failed"),
                }
            }
            MediaCommand::PauseReset(i) => {
                let Some(v) = video(cards, i) else { continue };
                let _ = v.pause();
                v.set_current_time(0.0);
            }
        }
    }
}

pub fn attach(state: &Rc<RefCell<State>>) {
    let cards = {
        let s = state.borrow();
        let Some(cards) = dom::html_by_id(&s.document, PROJECT_CARDS_ID) else {
            return;
        };
        cards.set_inner_html(&markup::project_cards(&s.content));
        cards
    };
    let cards_el: Element = cards.clone().into();

    let st = state.clone();
    let target = cards_el.clone();
    let over = EventListener::new(&cards, "mouseover", move |e| {
        let index = dom::closest_from_event(e, "[data-media]")
            .and_then(|el| dom::data_index(&el, "data-media"));
        let commands = st.borrow_mut().media.hover(index);
        run(&target, commands);
    });

    let st = state.clone();
    let leave = EventListener::new(&cards, "mouseleave", move |_| {
        let commands = st.borrow_mut().media.hover(None);
        run(&cards_el, commands);
    });

    state.borrow_mut().listeners.extend([over, leave]);
}
