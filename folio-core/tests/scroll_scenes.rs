use folio_core::back_to_top::{BackToTop, Visibility};
use folio_core::config::SceneConfig;
use folio_core::scene::{SceneId, SceneLayout, Sequencer};
use folio_core::{SiteConfig, Theme};
use proptest::prelude::*;

const VH: f64 = 800.0;

/// Lay the three spacers out back to back, the way the page stacks them.
fn sequencer() -> Sequencer {
    let cfg = SceneConfig::default();
    let mut tops = [0.0; 3];
    let mut y = 0.0;
    for scene in SceneId::ORDER {
        tops[scene.index()] = y;
        y += SceneLayout::spacer_height(scene, VH, &cfg);
    }
    let mut seq = Sequencer::new(cfg);
    seq.relayout(tops, VH).expect("valid layout");
    seq
}

#[test]
fn theme_flips_at_the_about_panel_and_back_at_contact() {
    let seq = sequencer();
    let theme = |y: f64| seq.frame(y).expect("attached").theme;
    assert_eq!(theme(0.0), Theme::DARK);
    assert_eq!(theme(VH), Theme::LIGHT);
    let projects = seq
        .layout()
        .expect("attached")
        .range(SceneId::ProjectsContact);
    assert_eq!(theme(projects.start + 1.0), Theme::LIGHT);
    assert_eq!(theme(projects.end), Theme::DARK);
}

#[test]
fn scrolling_back_restores_the_start() {
    let seq = sequencer();
    let start = seq.frame(0.0).expect("attached");
    for y in [400.0, 2000.0, 5000.0, 9000.0, 1200.0] {
        seq.frame(y);
    }
    assert_eq!(seq.frame(0.0).expect("attached"), start);
}

#[test]
fn back_to_top_uses_configured_threshold() {
    let cfg = SiteConfig::default();
    let mut btt = BackToTop::new(cfg.back_to_top_threshold);
    assert_eq!(btt.update(0.0, VH), Some(Visibility::Hidden));
    assert_eq!(btt.update(VH * 0.9, VH), Some(Visibility::Visible));
}

proptest! {
    #[test]
    fn hero_theme_darkens_icons_monotonically(a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
        let seq = sequencer();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let early = seq.frame(lo * VH).expect("attached").theme;
        let late = seq.frame(hi * VH).expect("attached").theme;
        // Icons go from white towards near-black as the about panel rises.
        prop_assert!(late.icon_color.r <= early.icon_color.r + 1e-9);
        prop_assert!(late.icon_bg.a >= early.icon_bg.a - 1e-9);
    }

    #[test]
    fn frames_depend_only_on_scroll_offset(y in 0.0f64..12_000.0, detour in 0.0f64..12_000.0) {
        let seq = sequencer();
        let first = seq.frame(y).expect("attached");
        seq.frame(detour);
        prop_assert_eq!(seq.frame(y).expect("attached"), first);
    }
}
