//! Scroll-driven scene sequencing.
//!
//! Each scene is pinned for a fixed scroll length. While pinned, its
//! timeline progress is a pure function of the scroll offset inside that
//! range, so every frame (including the navigation theme) can be
//! recomputed from `scroll_y` alone.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SceneConfig;
use crate::ease::Ease;
use crate::error::{FolioError, Result};
use crate::style::Style;
use crate::theme::Theme;
use crate::timeline::{Position, Timeline};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SceneId {
    Hero,
    TechStack,
    ProjectsContact,
}

impl SceneId {
    /// Scenes in scroll order.
    pub const ORDER: [SceneId; 3] = [SceneId::Hero, SceneId::TechStack, SceneId::ProjectsContact];

    pub fn index(self) -> usize {
        match self {
            SceneId::Hero => 0,
            SceneId::TechStack => 1,
            SceneId::ProjectsContact => 2,
        }
    }

    fn pin_vh(self, cfg: &SceneConfig) -> f64 {
        match self {
            SceneId::Hero => cfg.hero_pin_vh,
            SceneId::TechStack => cfg.tech_pin_vh,
            SceneId::ProjectsContact => cfg.projects_pin_vh,
        }
    }
}

/// Elements animated by the scene timelines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneTarget {
    Hero,
    About,
    TechScene,
    Card(usize),
    Contact,
}

pub const PROJECT_CARDS: usize = 3;

/// Document-space scroll range in which a scene is pinned.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScrollRange {
    pub start: f64,
    pub end: f64,
}

impl ScrollRange {
    /// 0 before the range, 1 after it, linear inside.
    pub fn progress(&self, scroll_y: f64) -> f64 {
        let len = self.end - self.start;
        if len <= 0.0 {
            return if scroll_y >= self.end { 1.0 } else { 0.0 };
        }
        ((scroll_y - self.start) / len).clamp(0.0, 1.0)
    }

    pub fn len(&self) -> f64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.len() <= 0.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneLayout {
    viewport_height: f64,
    ranges: [ScrollRange; 3],
}

impl SceneLayout {
    /// Height the pin spacer of `scene` needs: one viewport for the scene
    /// itself plus its pinned scroll length.
    pub fn spacer_height(scene: SceneId, viewport_height: f64, cfg: &SceneConfig) -> f64 {
        viewport_height * (1.0 + scene.pin_vh(cfg).max(0.0))
    }

    /// Build ranges from the measured document tops of the pin spacers.
    pub fn compute(tops: [f64; 3], viewport_height: f64, cfg: &SceneConfig) -> Result<Self> {
        if !(viewport_height.is_finite() && viewport_height > 0.0) {
            return Err(FolioError::InvalidLayout(format!(
                "viewport height {viewport_height}"
            )));
        }
        let mut ranges = [ScrollRange {
            start: 0.0,
            end: 0.0,
        }; 3];
        let mut prev_end = f64::NEG_INFINITY;
        for scene in SceneId::ORDER {
            let top = tops[scene.index()];
            if !top.is_finite() || top < prev_end {
                return Err(FolioError::InvalidLayout(format!(
                    "scene {scene:?} starts at {top}, before the previous pin ends at {prev_end}"
                )));
            }
            let len = scene.pin_vh(cfg).max(0.0) * viewport_height;
            ranges[scene.index()] = ScrollRange {
                start: top,
                end: top + len,
            };
            prev_end = top + len;
        }
        Ok(SceneLayout {
            viewport_height,
            ranges,
        })
    }

    pub fn range(&self, scene: SceneId) -> ScrollRange {
        self.ranges[scene.index()]
    }

    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    pub fn progress(&self, scene: SceneId, scroll_y: f64) -> f64 {
        self.range(scene).progress(scroll_y)
    }
}

/// One scene's scrubbed timelines.
#[derive(Clone, Debug)]
struct SceneTimeline {
    styles: Timeline<SceneTarget, Style>,
    theme: Option<Timeline<(), Theme>>,
}

impl SceneTimeline {
    fn duration(&self) -> f64 {
        let theme_end = self.theme.as_ref().map(|t| t.duration()).unwrap_or(0.0);
        self.styles.duration().max(theme_end)
    }

    fn style(&self, target: SceneTarget, progress: f64) -> Option<Style> {
        self.styles
            .value_at(target, progress.clamp(0.0, 1.0) * self.duration())
    }

    fn theme(&self, progress: f64) -> Option<Theme> {
        let time = progress.clamp(0.0, 1.0) * self.duration();
        self.theme.as_ref().and_then(|t| t.value_at((), time))
    }
}

/// Starting pose of a panel that slides up over the previous one.
fn panel_below() -> Style {
    Style::IDENTITY
        .with_y_percent(100.0)
        .with_scale(0.85)
        .with_blur(6.0)
}

fn hero_timeline() -> SceneTimeline {
    let styles = Timeline::new()
        .set(SceneTarget::Hero, Style::IDENTITY)
        .to(
            SceneTarget::Hero,
            Style::IDENTITY,
            0.5,
            Ease::Power3Out,
            Position::At(0.0),
        )
        .from_to(
            SceneTarget::About,
            panel_below(),
            Style::IDENTITY,
            0.5,
            Ease::Power3Out,
            Position::Append,
        );
    let theme = Timeline::new()
        .set((), Theme::DARK)
        .to((), Theme::LIGHT, 0.5, Ease::Power3Out, Position::At(0.5));
    SceneTimeline {
        styles,
        theme: Some(theme),
    }
}

fn tech_timeline() -> SceneTimeline {
    let styles = Timeline::new().from_to(
        SceneTarget::TechScene,
        Style::IDENTITY.with_scale(0.95),
        Style::IDENTITY,
        0.5,
        Ease::Power3Out,
        Position::Append,
    );
    SceneTimeline {
        styles,
        theme: None,
    }
}

fn projects_timeline() -> SceneTimeline {
    let raised = Style::IDENTITY.with_y_percent(5.0);
    let styles = Timeline::new()
        .set(SceneTarget::Card(0), Style::IDENTITY.with_y_percent(80.0))
        .set(SceneTarget::Card(1), Style::IDENTITY.with_y_percent(100.0))
        .set(SceneTarget::Card(2), Style::IDENTITY.with_y_percent(100.0))
        .to(SceneTarget::Card(0), raised, 0.5, Ease::Linear, Position::Append)
        .to(SceneTarget::Card(1), raised, 0.5, Ease::Linear, Position::AfterGap(0.2))
        .to(SceneTarget::Card(2), raised, 0.5, Ease::Linear, Position::AfterGap(0.2))
        .from_to(
            SceneTarget::Contact,
            panel_below(),
            Style::IDENTITY,
            0.5,
            Ease::Power2Out,
            Position::AfterGap(0.2),
        );
    // The nav returns to dark 0.2 after the contact panel starts rising.
    let contact_start = styles
        .span_of(SceneTarget::Contact, 0)
        .map(|(s, _)| s)
        .unwrap_or(0.0);
    let theme = Timeline::new().set((), Theme::LIGHT).to(
        (),
        Theme::DARK,
        0.5,
        Ease::Power3Out,
        Position::At(contact_start + 0.2),
    );
    SceneTimeline {
        styles,
        theme: Some(theme),
    }
}

/// Everything the page needs to render one scroll position.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneFrame {
    pub progress: [f64; 3],
    pub about: Style,
    pub tech: Style,
    pub cards: [Style; PROJECT_CARDS],
    pub contact: Style,
    pub theme: Theme,
}

pub struct Sequencer {
    config: SceneConfig,
    layout: Option<SceneLayout>,
    hero: SceneTimeline,
    tech: SceneTimeline,
    projects: SceneTimeline,
}

impl Sequencer {
    pub fn new(config: SceneConfig) -> Self {
        Sequencer {
            config,
            layout: None,
            hero: hero_timeline(),
            tech: tech_timeline(),
            projects: projects_timeline(),
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn layout(&self) -> Option<&SceneLayout> {
        self.layout.as_ref()
    }

    pub fn is_attached(&self) -> bool {
        self.layout.is_some()
    }

    /// Recompute pinned ranges, e.g. after a resize or a warp settle.
    pub fn relayout(&mut self, tops: [f64; 3], viewport_height: f64) -> Result<()> {
        let layout = SceneLayout::compute(tops, viewport_height, &self.config)?;
        debug!(?layout, "scene ranges recomputed");
        self.layout = Some(layout);
        Ok(())
    }

    pub fn detach(&mut self) {
        self.layout = None;
    }

    /// Theme for the given per-scene progress. Before the projects scene
    /// starts, the hero timeline decides; afterwards the projects one does.
    fn theme_for(&self, progress: &[f64; 3]) -> Theme {
        if progress[SceneId::ProjectsContact.index()] > 0.0 {
            self.projects.theme(progress[2]).unwrap_or(Theme::LIGHT)
        } else {
            self.hero.theme(progress[0]).unwrap_or(Theme::DARK)
        }
    }

    /// Frame from per-scene progress values.
    pub fn frame_at_progress(&self, progress: [f64; 3]) -> SceneFrame {
        let [hero, tech, projects] = progress;
        let mut cards = [Style::IDENTITY; PROJECT_CARDS];
        for (i, card) in cards.iter_mut().enumerate() {
            *card = self
                .projects
                .style(SceneTarget::Card(i), projects)
                .unwrap_or(Style::IDENTITY);
        }
        SceneFrame {
            progress,
            about: self
                .hero
                .style(SceneTarget::About, hero)
                .unwrap_or(Style::IDENTITY),
            tech: self
                .tech
                .style(SceneTarget::TechScene, tech)
                .unwrap_or(Style::IDENTITY),
            cards,
            contact: self
                .projects
                .style(SceneTarget::Contact, projects)
                .unwrap_or(Style::IDENTITY),
            theme: self.theme_for(&progress),
        }
    }

    /// Frame for a document scroll offset; `None` until attached.
    pub fn frame(&self, scroll_y: f64) -> Option<SceneFrame> {
        let layout = self.layout.as_ref()?;
        let progress = SceneId::ORDER.map(|s| layout.progress(s, scroll_y));
        Some(self.frame_at_progress(progress))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn attached() -> Sequencer {
        let mut seq = Sequencer::new(SceneConfig::default());
        // 800px viewport: spacers are 1600, 1600 and 4000 tall.
        seq.relayout([0.0, 1600.0, 3200.0], 800.0).unwrap();
        seq
    }

    #[test]
    fn ranges_follow_pin_lengths() {
        let seq = attached();
        let layout = seq.layout().unwrap();
        assert_eq!(
            layout.range(SceneId::Hero),
            ScrollRange {
                start: 0.0,
                end: 800.0
            }
        );
        assert_eq!(
            layout.range(SceneId::ProjectsContact),
            ScrollRange {
                start: 3200.0,
                end: 6400.0
            }
        );
        assert_eq!(
            SceneLayout::spacer_height(SceneId::ProjectsContact, 800.0, seq.config()),
            4000.0
        );
    }

    #[test]
    fn overlapping_ranges_are_rejected() {
        let mut seq = Sequencer::new(SceneConfig::default());
        assert!(seq.relayout([0.0, 400.0, 3200.0], 800.0).is_err());
        assert!(seq.relayout([0.0, 1600.0, 3200.0], 0.0).is_err());
        assert!(!seq.is_attached());
    }

    #[test]
    fn detached_sequencer_yields_nothing() {
        let seq = Sequencer::new(SceneConfig::default());
        assert_eq!(seq.frame(100.0), None);
    }

    #[test]
    fn about_slides_up_over_hero() {
        let seq = attached();
        let top = seq.frame(0.0).unwrap();
        assert_eq!(top.about, panel_below());
        assert_eq!(top.theme, Theme::DARK);
        let end = seq.frame(800.0).unwrap();
        assert_eq!(end.about, Style::IDENTITY);
        assert_eq!(end.theme, Theme::LIGHT);
    }

    #[test]
    fn theme_stays_light_through_tech_stack() {
        let seq = attached();
        for y in [900.0, 1600.0, 2000.0, 3200.0] {
            assert_eq!(seq.frame(y).unwrap().theme, Theme::LIGHT, "at {y}");
        }
    }

    #[test]
    fn cards_then_contact_then_dark_nav() {
        let seq = attached();
        let start = seq.frame(3200.0).unwrap();
        assert_eq!(start.cards[0].y_percent, 80.0);
        assert_eq!(start.contact, panel_below());

        let end = seq.frame(6400.0).unwrap();
        for card in end.cards {
            assert!((card.y_percent - 5.0).abs() < 1e-9);
        }
        assert_eq!(end.contact, Style::IDENTITY);
        assert_eq!(end.theme, Theme::DARK);

        // Second card only moves once the first has finished.
        let early = seq.frame_at_progress([1.0, 1.0, 0.15]);
        assert_eq!(early.cards[1].y_percent, 100.0);
        assert!(early.cards[0].y_percent < 80.0);
    }

    #[test]
    fn tech_scene_settles_in() {
        let seq = attached();
        assert!((seq.frame(1600.0).unwrap().tech.scale - 0.95).abs() < 1e-9);
        assert_eq!(seq.frame(2400.0).unwrap().tech, Style::IDENTITY);
    }
}
