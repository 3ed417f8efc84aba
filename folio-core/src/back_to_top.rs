use crate::constants::FADE_SECS;
use crate::ease::Ease;
use crate::style::Style;
use crate::tween::Tween;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

/// Scroll-position gate for the back-to-top control. Independent of the
/// scene timelines.
#[derive(Clone, Debug)]
pub struct BackToTop {
    threshold: f64,
    state: Option<Visibility>,
}

impl BackToTop {
    pub fn new(threshold: f64) -> Self {
        BackToTop {
            threshold,
            state: None,
        }
    }

    /// Re-evaluate for a scroll offset. The first call always reports;
    /// later calls report only changes.
    pub fn update(&mut self, scroll_y: f64, viewport_height: f64) -> Option<Visibility> {
        let next = if scroll_y > viewport_height * self.threshold {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
        if self.state == Some(next) {
            return None;
        }
        self.state = Some(next);
        Some(next)
    }

    /// Fade from wherever the control currently is towards `target`.
    pub fn fade(current: Style, target: Visibility) -> Tween {
        let to = match target {
            Visibility::Visible => Style::IDENTITY,
            Visibility::Hidden => Style::HIDDEN,
        };
        Tween::new(current, to, FADE_SECS, Ease::Power2Out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggles_around_threshold() {
        let mut btt = BackToTop::new(0.8);
        assert_eq!(btt.update(0.0, 1000.0), Some(Visibility::Hidden));
        assert_eq!(btt.update(700.0, 1000.0), None);
        assert_eq!(btt.update(800.0, 1000.0), None);
        assert_eq!(btt.update(801.0, 1000.0), Some(Visibility::Visible));
        assert_eq!(btt.update(5000.0, 1000.0), None);
        assert_eq!(btt.update(10.0, 1000.0), Some(Visibility::Hidden));
        assert_eq!(btt.update(0.0, 1000.0), None);
    }

    #[test]
    fn fade_is_reversible_midway() {
        let mut tw = BackToTop::fade(Style::HIDDEN, Visibility::Visible);
        let mid = tw.advance(FADE_SECS / 2.0).style;
        let mut back = BackToTop::fade(mid, Visibility::Hidden);
        let mut last = back.advance(0.0);
        while !last.finished {
            last = back.advance(1.0 / 60.0);
        }
        assert_eq!(last.style, Style::HIDDEN);
    }
}
