use serde::{Deserialize, Serialize};

use crate::timeline::Lerp;

/// 8-bit RGBA color; alpha in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Rgba {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: 1.0,
        }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Rgba {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a,
        }
    }

    pub fn to_css(&self) -> String {
        format!(
            "rgba({}, {}, {}, {:.3})",
            self.r.round().clamp(0.0, 255.0) as u8,
            self.g.round().clamp(0.0, 255.0) as u8,
            self.b.round().clamp(0.0, 255.0) as u8,
            self.a.clamp(0.0, 1.0)
        )
    }
}

impl Lerp for Rgba {
    fn lerp(&self, to: &Self, t: f64) -> Self {
        if t == 1.0 {
            return *to;
        }
        let mix = |a: f64, b: f64| a + (b - a) * t;
        Rgba {
            r: mix(self.r, to.r),
            g: mix(self.g, to.g),
            b: mix(self.b, to.b),
            a: mix(self.a, to.a),
        }
    }
}

/// Navigation colors driven by the scene sequencer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub icon_color: Rgba,
    pub icon_bg: Rgba,
    pub accent_bg: Rgba,
    pub accent_text: Rgba,
}

impl Theme {
    /// Over the dark hero and contact panels.
    pub const DARK: Theme = Theme {
        icon_color: Rgba::rgb(0xff, 0xff, 0xff),
        icon_bg: Rgba::rgba(0, 0, 0, 0.0),
        accent_bg: Rgba::rgb(0x63, 0x93, 0x8c),
        accent_text: Rgba::rgb(0, 0, 0),
    };

    /// Over the light about, stack and project panels.
    pub const LIGHT: Theme = Theme {
        icon_color: Rgba::rgb(0x15, 0x14, 0x14),
        icon_bg: Rgba::rgba(0, 0, 0, 0.05),
        accent_bg: Rgba::rgb(0x15, 0x14, 0x14),
        accent_text: Rgba::rgb(0xff, 0xff, 0xff),
    };

    /// Custom properties consumed by the navigation stylesheet.
    pub fn css_variables(&self) -> [(&'static str, String); 4] {
        [
            ("--nav-icon-color", self.icon_color.to_css()),
            ("--nav-icon-bg", self.icon_bg.to_css()),
            ("--nav-accent-bg", self.accent_bg.to_css()),
            ("--nav-accent-text", self.accent_text.to_css()),
        ]
    }
}

impl Lerp for Theme {
    fn lerp(&self, to: &Self, t: f64) -> Self {
        Theme {
            icon_color: self.icon_color.lerp(&to.icon_color, t),
            icon_bg: self.icon_bg.lerp(&to.icon_bg, t),
            accent_bg: self.accent_bg.lerp(&to.accent_bg, t),
            accent_text: self.accent_text.lerp(&to.accent_text, t),
        }
    }
}

/// Shared navigation theme. The sequencer writes it; the navigation bar
/// observes `revision()` and restyles itself when it changes.
#[derive(Clone, Debug)]
pub struct ThemeContext {
    theme: Theme,
    revision: u64,
}

impl Default for ThemeContext {
    fn default() -> Self {
        ThemeContext {
            theme: Theme::DARK,
            revision: 0,
        }
    }
}

impl ThemeContext {
    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns true when the theme actually changed.
    pub fn set(&mut self, theme: Theme) -> bool {
        if self.theme == theme {
            return false;
        }
        self.theme = theme;
        self.revision += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_colors_clamp_out_of_range_channels() {
        let c = Rgba {
            r: 300.0,
            g: -4.0,
            b: 99.6,
            a: 1.5,
        };
        assert_eq!(c.to_css(), "rgba(255, 0, 100, 1.000)");
    }

    #[test]
    fn theme_lerp_endpoints() {
        assert_eq!(Theme::DARK.lerp(&Theme::LIGHT, 0.0), Theme::DARK);
        assert_eq!(Theme::DARK.lerp(&Theme::LIGHT, 1.0), Theme::LIGHT);
    }

    #[test]
    fn context_bumps_revision_only_on_change() {
        let mut ctx = ThemeContext::default();
        assert!(!ctx.set(Theme::DARK));
        assert_eq!(ctx.revision(), 0);
        assert!(ctx.set(Theme::LIGHT));
        assert!(!ctx.set(Theme::LIGHT));
        assert_eq!(ctx.revision(), 1);
        assert_eq!(ctx.theme(), Theme::LIGHT);
    }

    #[test]
    fn observer_restyles_once_per_change() {
        let mut ctx = ThemeContext::default();
        let mut seen: Option<u64> = None;
        let mut writes = Vec::new();
        let mut observe = |ctx: &ThemeContext| {
            if seen != Some(ctx.revision()) {
                seen = Some(ctx.revision());
                writes.push(ctx.theme());
            }
        };
        observe(&ctx);
        for theme in [Theme::DARK, Theme::LIGHT, Theme::LIGHT, Theme::DARK] {
            ctx.set(theme);
            observe(&ctx);
        }
        assert_eq!(writes, vec![Theme::DARK, Theme::LIGHT, Theme::DARK]);
    }

    #[test]
    fn css_variables_are_named_for_nav() {
        let vars = Theme::DARK.css_variables();
        assert_eq!(vars[2].0, "--nav-accent-bg");
        assert_eq!(vars[2].1, "rgba(99, 147, 140, 1.000)");
    }
}
