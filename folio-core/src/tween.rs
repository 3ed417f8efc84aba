use crate::ease::Ease;
use crate::style::Style;

/// One time-driven animation between two styles.
#[derive(Clone, Debug)]
pub struct Tween {
    from: Style,
    to: Style,
    duration: f64,
    delay: f64,
    ease: Ease,
    elapsed: f64,
    reported: bool,
}

/// Output of one `Tween::advance` call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TweenStep {
    pub style: Style,
    /// Set on exactly one step: the one that reaches the end.
    pub finished: bool,
}

impl Tween {
    pub fn new(from: Style, to: Style, duration: f64, ease: Ease) -> Self {
        Tween {
            from,
            to,
            duration: duration.max(0.0),
            delay: 0.0,
            ease,
            elapsed: 0.0,
            reported: false,
        }
    }

    pub fn delayed(mut self, delay: f64) -> Self {
        self.delay = delay.max(0.0);
        self
    }

    pub fn is_done(&self) -> bool {
        self.reported
    }

    /// Current style without advancing time.
    pub fn current(&self) -> Style {
        let t = self.elapsed - self.delay;
        if t < 0.0 {
            return self.from;
        }
        if self.duration <= 0.0 || t >= self.duration {
            return self.to;
        }
        self.from.lerp(&self.to, self.ease.apply(t / self.duration))
    }

    /// Advance by `dt` seconds.
    pub fn advance(&mut self, dt: f64) -> TweenStep {
        if !self.reported {
            self.elapsed += dt.max(0.0);
        }
        let reached = self.elapsed >= self.delay + self.duration;
        let finished = reached && !self.reported;
        if finished {
            self.reported = true;
        }
        TweenStep {
            style: self.current(),
            finished,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finished_fires_once() {
        let mut tw = Tween::new(Style::HIDDEN, Style::IDENTITY, 0.5, Ease::Power2Out);
        let mut fired = 0;
        for _ in 0..60 {
            if tw.advance(1.0 / 60.0).finished {
                fired += 1;
            }
        }
        assert_eq!(fired, 1);
        assert_eq!(tw.current(), Style::IDENTITY);
    }

    #[test]
    fn delay_holds_start_value() {
        let mut tw = Tween::new(Style::HIDDEN, Style::IDENTITY, 0.2, Ease::Linear).delayed(0.3);
        let step = tw.advance(0.25);
        assert_eq!(step.style, Style::HIDDEN);
        assert!(!step.finished);
        let step = tw.advance(0.15);
        assert!((step.style.opacity - 0.5).abs() < 1e-9);
    }

    #[test]
    fn zero_duration_finishes_immediately() {
        let mut tw = Tween::new(Style::HIDDEN, Style::IDENTITY, 0.0, Ease::Linear);
        let step = tw.advance(0.0);
        assert!(step.finished);
        assert_eq!(step.style, Style::IDENTITY);
        assert_eq!(tw.current(), Style::IDENTITY);
    }

    #[test]
    fn zero_duration_after_delay_lands_on_target() {
        let mut tw = Tween::new(Style::IDENTITY, Style::HIDDEN, 0.0, Ease::Power2In).delayed(0.1);
        assert_eq!(tw.advance(0.05).style, Style::IDENTITY);
        let step = tw.advance(0.05);
        assert!(step.finished);
        assert_eq!(step.style, Style::HIDDEN);
    }
}
