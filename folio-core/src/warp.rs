//! Two-phase "warp" swap of the tech-stack region between the
//! informational panel and the physics playground.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::WarpConfig;
use crate::ease::Ease;
use crate::style::Style;
use crate::tween::Tween;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    #[default]
    Info,
    Play,
}

impl DisplayMode {
    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::Info => DisplayMode::Play,
            DisplayMode::Play => DisplayMode::Info,
        }
    }

    pub fn button_label(self) -> &'static str {
        match self {
            DisplayMode::Info => "Enable Physics",
            DisplayMode::Play => "Back to Info",
        }
    }

    pub fn status_label(self) -> &'static str {
        match self {
            DisplayMode::Info => "Physics: OFF",
            DisplayMode::Play => "Physics: ON",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WarpState {
    Info,
    TransitioningOut { target: DisplayMode },
    TransitioningIn { mode: DisplayMode },
    Play,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToggleOutcome {
    Started,
    /// A transition was already running; nothing changed.
    Ignored,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WarpEvent {
    /// Unmount the current subtree and mount `mount`. Emitted once per
    /// transition, after the out phase has fully finished.
    Swap { unmount: DisplayMode, mount: DisplayMode },
    /// Transition over; pinned scroll ranges must be recomputed.
    Settled { mode: DisplayMode },
}

fn content_gone(rotation_deg: f64) -> Style {
    Style::HIDDEN.with_scale(0.0).with_rotation(rotation_deg)
}

fn overlay_hidden() -> Style {
    Style::HIDDEN.with_scale(0.0)
}

pub struct WarpMachine {
    state: WarpState,
    config: WarpConfig,
    content: Option<Tween>,
    overlay: Option<Tween>,
    content_style: Style,
    overlay_style: Style,
}

impl WarpMachine {
    pub fn new(initial: DisplayMode, config: WarpConfig) -> Self {
        WarpMachine {
            state: match initial {
                DisplayMode::Info => WarpState::Info,
                DisplayMode::Play => WarpState::Play,
            },
            config,
            content: None,
            overlay: None,
            content_style: Style::IDENTITY,
            overlay_style: overlay_hidden(),
        }
    }

    pub fn state(&self) -> WarpState {
        self.state
    }

    /// The subtree currently mounted.
    pub fn mounted(&self) -> DisplayMode {
        match self.state {
            WarpState::Info => DisplayMode::Info,
            WarpState::Play => DisplayMode::Play,
            WarpState::TransitioningOut { target } => target.toggled(),
            WarpState::TransitioningIn { mode } => mode,
        }
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(
            self.state,
            WarpState::TransitioningOut { .. } | WarpState::TransitioningIn { .. }
        )
    }

    /// Toggle button enabled and content accepting pointer events.
    pub fn interactive(&self) -> bool {
        !self.is_transitioning()
    }

    pub fn content_style(&self) -> Style {
        self.content_style
    }

    pub fn overlay_style(&self) -> Style {
        self.overlay_style
    }

    pub fn toggle(&mut self) -> ToggleOutcome {
        if self.is_transitioning() {
            trace!("warp toggle ignored while transitioning");
            return ToggleOutcome::Ignored;
        }
        let target = self.mounted().toggled();
        debug!(?target, "warp out");
        self.state = WarpState::TransitioningOut { target };
        let cfg = &self.config;
        self.content = Some(Tween::new(
            self.content_style,
            content_gone(180.0),
            cfg.out_secs,
            Ease::Power2In,
        ));
        let overlay_delay = (cfg.out_secs - cfg.overlay_overlap_secs).max(0.0);
        self.overlay = Some(
            Tween::new(
                overlay_hidden(),
                Style::IDENTITY.with_scale(2.0),
                cfg.overlay_in_secs,
                Ease::Power2Out,
            )
            .delayed(overlay_delay),
        );
        ToggleOutcome::Started
    }

    fn advance_tweens(&mut self, dt: f64) -> (bool, bool) {
        let content_done = match self.content.as_mut() {
            Some(tw) => {
                let step = tw.advance(dt);
                self.content_style = step.style;
                tw.is_done()
            }
            None => true,
        };
        let overlay_done = match self.overlay.as_mut() {
            Some(tw) => {
                let step = tw.advance(dt);
                self.overlay_style = step.style;
                tw.is_done()
            }
            None => true,
        };
        (content_done, overlay_done)
    }

    /// Advance running animations by `dt` seconds.
    pub fn advance(&mut self, dt: f64) -> Vec<WarpEvent> {
        let mut events = Vec::new();
        let (content_done, overlay_done) = self.advance_tweens(dt);
        match self.state {
            WarpState::TransitioningOut { target } if content_done && overlay_done => {
                events.push(WarpEvent::Swap {
                    unmount: target.toggled(),
                    mount: target,
                });
                debug!(?target, "warp in");
                self.state = WarpState::TransitioningIn { mode: target };
                let cfg = &self.config;
                self.content = Some(Tween::new(
                    content_gone(-180.0),
                    Style::IDENTITY,
                    cfg.in_secs,
                    Ease::BackOut(1.2),
                ));
                self.content_style = content_gone(-180.0);
                self.overlay = Some(Tween::new(
                    self.overlay_style,
                    overlay_hidden(),
                    cfg.overlay_out_secs,
                    Ease::Power2In,
                ));
            }
            WarpState::TransitioningIn { mode } if content_done => {
                self.state = match mode {
                    DisplayMode::Info => WarpState::Info,
                    DisplayMode::Play => WarpState::Play,
                };
                self.content = None;
                self.content_style = Style::IDENTITY;
                events.push(WarpEvent::Settled { mode });
            }
            _ => {}
        }
        if self.overlay.as_ref().is_some_and(Tween::is_done) && !self.is_transitioning() {
            self.overlay = None;
        }
        events
    }

    /// True while frames still need to be driven.
    pub fn is_animating(&self) -> bool {
        self.is_transitioning() || self.overlay.is_some()
    }
}
