//! Per-word text reveal. Words slide up out of a clipping mask one after
//! another when the block scrolls into view, and slide back when it
//! scrolls out again above the trigger line.

use crate::constants::{REVEAL_START_FRACTION, REVEAL_STAGGER_SECS, REVEAL_WORD_SECS};
use crate::ease::Ease;
use crate::style::Style;

/// Words of a text block, in order. Runs of spaces do not produce empty
/// words.
pub fn split_words(text: &str) -> Vec<&str> {
    text.split(' ').filter(|w| !w.is_empty()).collect()
}

/// Whether a block whose top edge sits at `top` (viewport coordinates)
/// has crossed the trigger line.
pub fn is_triggered(top: f64, viewport_height: f64) -> bool {
    top <= viewport_height * REVEAL_START_FRACTION
}

/// Resting pose of a word before it is revealed.
pub fn word_hidden() -> Style {
    Style::HIDDEN.with_y_percent(100.0)
}

/// Playhead over the staggered word animations. Entering plays forward
/// from wherever the playhead is; leaving plays it back to the start.
#[derive(Clone, Debug)]
pub struct RevealText {
    words: usize,
    delay: f64,
    playhead: f64,
    forward: bool,
}

impl RevealText {
    pub fn new(words: usize, delay: f64) -> Self {
        RevealText {
            words,
            delay: delay.max(0.0),
            playhead: 0.0,
            forward: false,
        }
    }

    pub fn duration(&self) -> f64 {
        let stagger = REVEAL_STAGGER_SECS * self.words.saturating_sub(1) as f64;
        self.delay + stagger + REVEAL_WORD_SECS
    }

    /// Point the playhead forward (in view) or backward (scrolled back
    /// out). Returns true when this leaves something to animate.
    pub fn trigger(&mut self, in_view: bool) -> bool {
        self.forward = in_view;
        self.is_animating()
    }

    pub fn is_animating(&self) -> bool {
        if self.forward {
            self.playhead < self.duration()
        } else {
            self.playhead > 0.0
        }
    }

    pub fn advance(&mut self, dt: f64) {
        let dt = dt.max(0.0);
        self.playhead = if self.forward {
            (self.playhead + dt).min(self.duration())
        } else {
            (self.playhead - dt).max(0.0)
        };
    }

    pub fn word_style(&self, index: usize) -> Style {
        let local = self.playhead - self.delay - REVEAL_STAGGER_SECS * index as f64;
        let t = Ease::Power4Out.apply(local / REVEAL_WORD_SECS);
        word_hidden().lerp(&Style::IDENTITY, t)
    }

    pub fn word_styles(&self) -> Vec<Style> {
        (0..self.words).map(|i| self.word_style(i)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(reveal: &mut RevealText, secs: f64) {
        let mut left = secs;
        while left > 0.0 {
            reveal.advance(1.0 / 60.0);
            left -= 1.0 / 60.0;
        }
    }

    #[test]
    fn splits_on_single_spaces() {
        assert_eq!(split_words("Selected  Archive "), vec!["Selected", "Archive"]);
        assert!(split_words("").is_empty());
    }

    #[test]
    fn trigger_line_sits_near_viewport_bottom() {
        assert!(is_triggered(940.0, 1000.0));
        assert!(is_triggered(-200.0, 1000.0));
        assert!(!is_triggered(960.0, 1000.0));
    }

    #[test]
    fn words_start_hidden_and_stagger_in() {
        let mut reveal = RevealText::new(3, 0.0);
        assert!(!reveal.is_animating());
        assert_eq!(reveal.word_styles(), vec![word_hidden(); 3]);

        assert!(reveal.trigger(true));
        reveal.advance(0.3);
        let styles = reveal.word_styles();
        assert!(styles[0].opacity > styles[1].opacity);
        assert!(styles[1].opacity > styles[2].opacity);

        run(&mut reveal, 2.0);
        assert!(!reveal.is_animating());
        assert_eq!(reveal.word_styles(), vec![Style::IDENTITY; 3]);
    }

    #[test]
    fn delay_holds_every_word() {
        let mut reveal = RevealText::new(2, 0.5);
        reveal.trigger(true);
        reveal.advance(0.4);
        assert_eq!(reveal.word_style(0), word_hidden());
        assert!((reveal.duration() - (0.5 + 0.05 + 1.4)).abs() < 1e-9);
    }

    #[test]
    fn leaving_reverses_from_current_pose() {
        let mut reveal = RevealText::new(4, 0.0);
        reveal.trigger(true);
        reveal.advance(0.5);
        let mid = reveal.word_style(0);
        assert!(reveal.trigger(false));
        reveal.advance(0.1);
        assert!(reveal.word_style(0).opacity < mid.opacity);
        run(&mut reveal, 1.0);
        assert!(!reveal.is_animating());
        assert_eq!(reveal.word_style(0), word_hidden());
        assert!(!reveal.trigger(false));
    }
}
