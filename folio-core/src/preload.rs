//! Asset preloading gate and the intro sequence shown while it fills.

use tracing::{debug, warn};

use crate::ease::Ease;
use crate::style::Style;
use crate::timeline::{Position, Timeline};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    Failed,
}

/// Join over independent asset loads. A failed load counts as complete,
/// so the gate always opens once every source has reported.
#[derive(Clone, Debug)]
pub struct PreloadGate {
    sources: Vec<String>,
    outcomes: Vec<Option<LoadOutcome>>,
}

impl PreloadGate {
    pub fn new(sources: Vec<String>) -> Self {
        let outcomes = vec![None; sources.len()];
        PreloadGate { sources, outcomes }
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// Record the first outcome for `index`; later reports are ignored.
    /// Returns true when this call counted.
    pub fn complete(&mut self, index: usize, outcome: LoadOutcome) -> bool {
        let Some(slot) = self.outcomes.get_mut(index) else {
            return false;
        };
        if slot.is_some() {
            return false;
        }
        *slot = Some(outcome);
        if outcome == LoadOutcome::Failed {
            warn!(src = %self.sources[index], "asset failed to load");
        }
        if self.is_open() {
            debug!(
                total = self.total(),
                failed = self.failed(),
                "preload gate open"
            );
        }
        true
    }

    pub fn total(&self) -> usize {
        self.sources.len()
    }

    pub fn completed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_some()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| **o == Some(LoadOutcome::Failed))
            .count()
    }

    pub fn is_open(&self) -> bool {
        self.completed() == self.total()
    }

    pub fn progress(&self) -> f64 {
        if self.total() == 0 {
            1.0
        } else {
            self.completed() as f64 / self.total() as f64
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum IntroTarget {
    Revealer,
    Greeting,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntroPhase {
    Revealing,
    /// Intro finished but assets are still loading.
    Waiting,
    Exiting,
    Done,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntroFrame {
    pub phase: IntroPhase,
    pub revealer: Style,
    pub greeting: Style,
    /// Bottom edge of the preloader clip, 100 = fully covering, 0 = gone.
    pub clip_bottom_percent: f64,
    /// Set once, on the frame the preloader finishes.
    pub finished: bool,
}

impl IntroFrame {
    pub fn clip_path(&self) -> String {
        let b = self.clip_bottom_percent.clamp(0.0, 100.0);
        format!("polygon(0% 0%, 100% 0%, 100% {b:.2}%, 0% {b:.2}%)")
    }
}

const EXIT_SECS: f64 = 1.1;
const EXIT_LEAD_SECS: f64 = 0.2;

/// Preloader sequence: the revealer square grows in steps, the greeting
/// fades in, then the overlay wipes upward once the gate is open.
pub struct Intro {
    timeline: Timeline<IntroTarget, Style>,
    elapsed: f64,
    exit_elapsed: Option<f64>,
    reported: bool,
}

impl Default for Intro {
    fn default() -> Self {
        Self::new()
    }
}

impl Intro {
    pub fn new() -> Self {
        let revealer = |scale: f64| Style::IDENTITY.with_scale(scale);
        let timeline = Timeline::new()
            .set(IntroTarget::Revealer, Style::HIDDEN.with_scale(0.0))
            .set(IntroTarget::Greeting, Style::HIDDEN.with_y_px(20.0))
            .to(IntroTarget::Revealer, revealer(0.1), 0.6, Ease::Power2Out, Position::At(0.5))
            .to(IntroTarget::Revealer, revealer(0.25), 0.8, Ease::Power4Out, Position::Append)
            .to(
                IntroTarget::Greeting,
                Style::IDENTITY,
                0.6,
                Ease::Power3Out,
                Position::AfterGap(-0.6),
            )
            .to(IntroTarget::Revealer, revealer(0.4), 0.6, Ease::Power3Out, Position::Append)
            .to(IntroTarget::Revealer, revealer(1.5), 1.2, Ease::Power4InOut, Position::Append);
        Intro {
            timeline,
            elapsed: 0.0,
            exit_elapsed: None,
            reported: false,
        }
    }

    fn exit_earliest(&self) -> f64 {
        (self.timeline.duration() - EXIT_LEAD_SECS).max(0.0)
    }

    pub fn phase(&self) -> IntroPhase {
        match self.exit_elapsed {
            Some(e) if e >= EXIT_SECS => IntroPhase::Done,
            Some(_) => IntroPhase::Exiting,
            None if self.elapsed >= self.exit_earliest() => IntroPhase::Waiting,
            None => IntroPhase::Revealing,
        }
    }

    pub fn advance(&mut self, dt: f64, gate_open: bool) -> IntroFrame {
        let dt = dt.max(0.0);
        self.elapsed += dt;
        let can_exit = gate_open && self.elapsed >= self.exit_earliest();
        match self.exit_elapsed.as_mut() {
            Some(e) => *e += dt,
            None if can_exit => {
                debug!("preloader exit");
                self.exit_elapsed = Some(0.0);
            }
            None => {}
        }
        let phase = self.phase();
        let finished = phase == IntroPhase::Done && !self.reported;
        if finished {
            self.reported = true;
        }
        let wipe = self
            .exit_elapsed
            .map(|e| Ease::Power4InOut.apply(e / EXIT_SECS))
            .unwrap_or(0.0);
        IntroFrame {
            phase,
            revealer: self
                .timeline
                .value_at(IntroTarget::Revealer, self.elapsed)
                .unwrap_or(Style::HIDDEN),
            greeting: self
                .timeline
                .value_at(IntroTarget::Greeting, self.elapsed)
                .unwrap_or(Style::HIDDEN),
            clip_bottom_percent: 100.0 * (1.0 - wipe),
            finished,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate(n: usize) -> PreloadGate {
        PreloadGate::new((0..n).map(|i| format!("/img/{i}.png")).collect())
    }

    #[test]
    fn broken_image_still_opens_gate() {
        let mut g = gate(4);
        assert!(g.complete(0, LoadOutcome::Loaded));
        assert!(g.complete(1, LoadOutcome::Failed));
        assert!(g.complete(2, LoadOutcome::Loaded));
        assert!(!g.is_open());
        assert!(g.complete(3, LoadOutcome::Loaded));
        assert!(g.is_open());
        assert_eq!((g.completed(), g.total(), g.failed()), (4, 4, 1));
    }

    #[test]
    fn duplicate_and_out_of_range_reports_do_not_count() {
        let mut g = gate(2);
        assert!(g.complete(0, LoadOutcome::Failed));
        assert!(!g.complete(0, LoadOutcome::Loaded));
        assert!(!g.complete(7, LoadOutcome::Loaded));
        assert_eq!(g.completed(), 1);
        assert_eq!(g.failed(), 1);
        assert_eq!(g.progress(), 0.5);
    }

    #[test]
    fn empty_gate_is_open() {
        let g = gate(0);
        assert!(g.is_open());
        assert_eq!(g.progress(), 1.0);
    }

    #[test]
    fn intro_waits_for_gate() {
        let mut intro = Intro::new();
        for _ in 0..600 {
            intro.advance(1.0 / 60.0, false);
        }
        assert_eq!(intro.phase(), IntroPhase::Waiting);
        let frame = intro.advance(1.0 / 60.0, false);
        assert_eq!(frame.clip_bottom_percent, 100.0);
        assert!((frame.revealer.scale - 1.5).abs() < 1e-9);

        let mut finished = 0;
        for _ in 0..120 {
            if intro.advance(1.0 / 60.0, true).finished {
                finished += 1;
            }
        }
        assert_eq!(finished, 1);
        assert_eq!(intro.phase(), IntroPhase::Done);
        assert_eq!(
            intro.advance(0.1, true).clip_path(),
            "polygon(0% 0%, 100% 0%, 100% 0.00%, 0% 0.00%)"
        );
    }

    #[test]
    fn open_gate_does_not_cut_intro_short() {
        let mut intro = Intro::new();
        let frame = intro.advance(1.0, true);
        assert_eq!(frame.phase, IntroPhase::Revealing);
        assert_eq!(frame.clip_bottom_percent, 100.0);
    }
}
