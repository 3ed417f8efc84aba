//! Word reveals inside the about modal.

use folio_core::reveal::{RevealText, is_triggered};
use web_sys::Element;

use crate::dom;
use crate::state::{RevealBinding, State};
use crate::utils::viewport_size;

/// Pick up every `[data-reveal]` block under `root`.
pub fn scan(s: &mut State, root: &Element) {
    for block in dom::query_all_html(root, "[data-reveal]") {
        let delay = block
            .get_attribute("data-reveal")
            .and_then(|d| d.parse::<f64>().ok())
            .unwrap_or(0.0);
        let words = dom::query_all_html(&block, ".word");
        let reveal = RevealText::new(words.len(), delay);
        s.reveals.push(RevealBinding {
            block,
            words,
            reveal,
        });
    }
}

/// Re-test every block against the trigger line. Returns true when one
/// of them has something to animate.
pub fn check(s: &mut State) -> bool {
    let (_, vh) = viewport_size(&s.window);
    let mut busy = false;
    for binding in &mut s.reveals {
        let top = binding.block.get_bounding_client_rect().top();
        busy |= binding.reveal.trigger(is_triggered(top, vh));
    }
    busy
}

pub fn tick(s: &mut State, dt: f64) -> bool {
    let mut busy = false;
    for binding in &mut s.reveals {
        if !binding.reveal.is_animating() {
            continue;
        }
        binding.reveal.advance(dt);
        for (word, style) in binding.words.iter().zip(binding.reveal.word_styles()) {
            dom::apply_style(word, &style);
        }
        busy |= binding.reveal.is_animating();
    }
    busy
}
