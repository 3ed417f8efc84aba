//! Full-screen content overlays and the page scroll lock they hold.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ModalConfig;
use crate::ease::Ease;
use crate::style::Style;
use crate::tween::Tween;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModalKind {
    About,
    Projects,
}

impl ModalKind {
    pub const ALL: [ModalKind; 2] = [ModalKind::About, ModalKind::Projects];

    fn index(self) -> usize {
        match self {
            ModalKind::About => 0,
            ModalKind::Projects => 1,
        }
    }

    /// Pose the content animates in from.
    fn enter_from(self) -> Style {
        match self {
            ModalKind::About => Style::HIDDEN.with_scale(0.95).with_blur(10.0),
            ModalKind::Projects => Style::HIDDEN.with_y_px(50.0).with_blur(10.0),
        }
    }

    /// Pose the content animates out to.
    fn exit_to(self) -> Style {
        match self {
            ModalKind::About => Style::HIDDEN.with_scale(0.95).with_blur(10.0),
            ModalKind::Projects => Style::HIDDEN.with_y_px(20.0).with_blur(10.0),
        }
    }

    fn exit_ease(self) -> Ease {
        match self {
            ModalKind::About => Ease::Power4In,
            ModalKind::Projects => Ease::Power2In,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalPhase {
    Closed,
    Entering,
    Open,
    Exiting,
}

impl ModalPhase {
    pub fn is_mounted(self) -> bool {
        self != ModalPhase::Closed
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalEvent {
    Mount(ModalKind),
    /// The exit animation finished; the overlay leaves the DOM.
    Unmount(ModalKind),
    LockScroll,
    UnlockScroll,
}

/// Page scroll lock. Reports transitions only, so any number of
/// redundant requests nets out to one lock and one unlock.
#[derive(Clone, Debug, Default)]
pub struct ScrollLock {
    locked: bool,
}

impl ScrollLock {
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn sync(&mut self, want: bool) -> Option<ModalEvent> {
        if self.locked == want {
            return None;
        }
        self.locked = want;
        Some(if want {
            ModalEvent::LockScroll
        } else {
            ModalEvent::UnlockScroll
        })
    }
}

#[derive(Clone, Debug)]
struct Slot {
    phase: ModalPhase,
    tween: Option<Tween>,
    style: Style,
}

impl Default for Slot {
    fn default() -> Self {
        Slot {
            phase: ModalPhase::Closed,
            tween: None,
            style: Style::HIDDEN,
        }
    }
}

pub struct ModalManager {
    config: ModalConfig,
    slots: [Slot; 2],
    lock: ScrollLock,
}

impl ModalManager {
    pub fn new(config: ModalConfig) -> Self {
        ModalManager {
            config,
            slots: Default::default(),
            lock: ScrollLock::default(),
        }
    }

    pub fn phase(&self, kind: ModalKind) -> ModalPhase {
        self.slots[kind.index()].phase
    }

    pub fn style(&self, kind: ModalKind) -> Style {
        self.slots[kind.index()].style
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.lock.is_locked()
    }

    /// Underlying page faded out and non-interactive.
    pub fn page_suppressed(&self) -> bool {
        self.slots.iter().any(|s| s.phase.is_mounted())
    }

    pub fn is_animating(&self) -> bool {
        self.slots.iter().any(|s| s.tween.is_some())
    }

    fn sync_lock(&mut self, events: &mut Vec<ModalEvent>) {
        let want = self.page_suppressed();
        if let Some(ev) = self.lock.sync(want) {
            events.push(ev);
        }
    }

    pub fn open(&mut self, kind: ModalKind) -> Vec<ModalEvent> {
        let mut events = Vec::new();
        let enter_secs = self.config.enter_secs;
        let slot = &mut self.slots[kind.index()];
        match slot.phase {
            ModalPhase::Closed => {
                debug!(?kind, "modal open");
                slot.phase = ModalPhase::Entering;
                slot.style = kind.enter_from();
                slot.tween = Some(Tween::new(
                    kind.enter_from(),
                    Style::IDENTITY,
                    enter_secs,
                    Ease::Power4Out,
                ));
                events.push(ModalEvent::Mount(kind));
            }
            ModalPhase::Exiting => {
                // Reopened mid-exit: turn around from the current pose.
                slot.phase = ModalPhase::Entering;
                slot.tween = Some(Tween::new(
                    slot.style,
                    Style::IDENTITY,
                    enter_secs,
                    Ease::Power4Out,
                ));
            }
            ModalPhase::Entering | ModalPhase::Open => {}
        }
        self.sync_lock(&mut events);
        events
    }

    /// Start the exit animation. The modal stays mounted until it finishes.
    pub fn request_close(&mut self, kind: ModalKind) -> Vec<ModalEvent> {
        let exit_secs = self.config.exit_secs;
        let slot = &mut self.slots[kind.index()];
        if matches!(slot.phase, ModalPhase::Entering | ModalPhase::Open) {
            debug!(?kind, "modal closing");
            slot.phase = ModalPhase::Exiting;
            slot.tween = Some(Tween::new(
                slot.style,
                kind.exit_to(),
                exit_secs,
                kind.exit_ease(),
            ));
        }
        Vec::new()
    }

    pub fn advance(&mut self, dt: f64) -> Vec<ModalEvent> {
        let mut events = Vec::new();
        for kind in ModalKind::ALL {
            let slot = &mut self.slots[kind.index()];
            let Some(tween) = slot.tween.as_mut() else {
                continue;
            };
            let step = tween.advance(dt);
            slot.style = step.style;
            if !step.finished {
                continue;
            }
            slot.tween = None;
            match slot.phase {
                ModalPhase::Entering => slot.phase = ModalPhase::Open,
                ModalPhase::Exiting => {
                    slot.phase = ModalPhase::Closed;
                    slot.style = Style::HIDDEN;
                    events.push(ModalEvent::Unmount(kind));
                }
                ModalPhase::Open | ModalPhase::Closed => {}
            }
        }
        self.sync_lock(&mut events);
        events
    }

    /// Abrupt unmount: drop every overlay without animation and always
    /// release the scroll lock.
    pub fn teardown(&mut self) -> Vec<ModalEvent> {
        let mut events = Vec::new();
        for kind in ModalKind::ALL {
            let slot = &mut self.slots[kind.index()];
            if slot.phase.is_mounted() {
                events.push(ModalEvent::Unmount(kind));
            }
            *slot = Slot::default();
        }
        self.sync_lock(&mut events);
        events
    }
}

/// Expand/collapse state of the project list inside the projects modal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProjectAccordion {
    expanded: Option<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccordionChange {
    pub expanded: Option<usize>,
    /// Project to scroll to the top of the modal once it has expanded.
    pub scroll_to: Option<usize>,
}

impl ProjectAccordion {
    pub fn expanded(&self) -> Option<usize> {
        self.expanded
    }

    pub fn toggle(&mut self, index: usize) -> AccordionChange {
        if self.expanded == Some(index) {
            self.expanded = None;
            return AccordionChange {
                expanded: None,
                scroll_to: None,
            };
        }
        self.expanded = Some(index);
        AccordionChange {
            expanded: Some(index),
            scroll_to: Some(index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn settle(m: &mut ModalManager) -> Vec<ModalEvent> {
        let mut all = Vec::new();
        for _ in 0..240 {
            all.extend(m.advance(1.0 / 60.0));
        }
        all
    }

    #[test]
    fn open_then_close_restores_scroll() {
        let mut m = ModalManager::new(ModalConfig::default());
        assert_eq!(
            m.open(ModalKind::About),
            vec![ModalEvent::Mount(ModalKind::About), ModalEvent::LockScroll]
        );
        settle(&mut m);
        assert_eq!(m.phase(ModalKind::About), ModalPhase::Open);
        assert_eq!(m.style(ModalKind::About), Style::IDENTITY);

        assert!(m.request_close(ModalKind::About).is_empty());
        assert_eq!(m.phase(ModalKind::About), ModalPhase::Exiting);
        assert!(m.is_scroll_locked(), "close is gated on the exit animation");
        let events = settle(&mut m);
        assert_eq!(
            events,
            vec![ModalEvent::Unmount(ModalKind::About), ModalEvent::UnlockScroll]
        );
        assert!(!m.is_scroll_locked());
        assert!(!m.page_suppressed());
    }

    #[test]
    fn double_open_locks_once() {
        let mut m = ModalManager::new(ModalConfig::default());
        m.open(ModalKind::Projects);
        assert!(m.open(ModalKind::Projects).is_empty());
        settle(&mut m);
        m.request_close(ModalKind::Projects);
        m.request_close(ModalKind::Projects);
        let events = settle(&mut m);
        assert_eq!(
            events
                .iter()
                .filter(|e| **e == ModalEvent::UnlockScroll)
                .count(),
            1
        );
    }

    #[test]
    fn closing_one_of_two_keeps_lock() {
        let mut m = ModalManager::new(ModalConfig::default());
        m.open(ModalKind::About);
        m.open(ModalKind::Projects);
        settle(&mut m);
        m.request_close(ModalKind::Projects);
        let events = settle(&mut m);
        assert_eq!(events, vec![ModalEvent::Unmount(ModalKind::Projects)]);
        assert!(m.is_scroll_locked());
        m.request_close(ModalKind::About);
        let events = settle(&mut m);
        assert!(events.contains(&ModalEvent::UnlockScroll));
    }

    #[test]
    fn reopen_during_exit_turns_around() {
        let mut m = ModalManager::new(ModalConfig::default());
        m.open(ModalKind::About);
        settle(&mut m);
        m.request_close(ModalKind::About);
        m.advance(0.2);
        assert!(m.open(ModalKind::About).is_empty());
        assert_eq!(m.phase(ModalKind::About), ModalPhase::Entering);
        let events = settle(&mut m);
        assert!(events.is_empty());
        assert_eq!(m.phase(ModalKind::About), ModalPhase::Open);
    }

    #[test]
    fn teardown_always_unlocks() {
        let mut m = ModalManager::new(ModalConfig::default());
        m.open(ModalKind::About);
        m.advance(0.1);
        let events = m.teardown();
        assert_eq!(
            events,
            vec![ModalEvent::Unmount(ModalKind::About), ModalEvent::UnlockScroll]
        );
        assert!(!m.is_scroll_locked());
        assert!(m.teardown().is_empty());
    }

    #[test]
    fn accordion_expands_one_at_a_time() {
        let mut acc = ProjectAccordion::default();
        assert_eq!(
            acc.toggle(1),
            AccordionChange {
                expanded: Some(1),
                scroll_to: Some(1)
            }
        );
        assert_eq!(acc.toggle(2).expanded, Some(2));
        let change = acc.toggle(2);
        assert_eq!(change.expanded, None);
        assert_eq!(change.scroll_to, None);
        assert_eq!(acc.expanded(), None);
    }
}
