use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::Result;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewportClass {
    Mobile,
    Desktop,
}

impl ViewportClass {
    pub fn from_width(width: f64, breakpoint: f64) -> Self {
        if width < breakpoint {
            ViewportClass::Mobile
        } else {
            ViewportClass::Desktop
        }
    }
}

/// Force tuning for one physics regime.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForceTuning {
    pub repel_radius: f32,
    /// Peak repulsion acceleration at distance zero (px/s^2).
    pub repel_strength: f32,
    /// Amplitude of the ambient drift acceleration (px/s^2).
    pub ambient_strength: f32,
}

impl Default for ForceTuning {
    fn default() -> Self {
        ForceTuning {
            repel_radius: 250.0,
            repel_strength: 3600.0,
            ambient_strength: 180.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub floating: ForceTuning,
    /// Tuning once the mobile toy has settled under gravity.
    pub settling: ForceTuning,
    /// Secondary labels dropped under gravity.
    pub falling: ForceTuning,
    pub settle_delay_ms: u32,
    pub settle_gravity: f32,
    pub falling_gravity: f32,
    pub angular_damping: f32,
    pub pad_x: f32,
    pub pad_y: f32,
    /// Stiffness of the drag spring, in 1/s.
    pub grab_stiffness: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        PhysicsConfig {
            floating: ForceTuning::default(),
            settling: ForceTuning {
                repel_radius: 150.0,
                repel_strength: 2400.0,
                ambient_strength: 60.0,
            },
            falling: ForceTuning {
                repel_radius: 200.0,
                repel_strength: 9000.0,
                ambient_strength: 0.0,
            },
            settle_delay_ms: SETTLE_DELAY_MS,
            settle_gravity: SETTLE_GRAVITY,
            falling_gravity: SETTLE_GRAVITY,
            angular_damping: ANGULAR_DAMPING_PER_TICK,
            pad_x: FLOAT_PAD_X,
            pad_y: FLOAT_PAD_Y,
            grab_stiffness: 12.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub hero_pin_vh: f64,
    pub tech_pin_vh: f64,
    pub projects_pin_vh: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        SceneConfig {
            hero_pin_vh: HERO_PIN_VH,
            tech_pin_vh: TECH_PIN_VH,
            projects_pin_vh: PROJECTS_PIN_VH,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarpConfig {
    pub out_secs: f64,
    pub overlay_in_secs: f64,
    pub overlay_overlap_secs: f64,
    pub in_secs: f64,
    pub overlay_out_secs: f64,
}

impl Default for WarpConfig {
    fn default() -> Self {
        WarpConfig {
            out_secs: WARP_OUT_SECS,
            overlay_in_secs: WARP_OVERLAY_IN_SECS,
            overlay_overlap_secs: WARP_OVERLAY_OVERLAP_SECS,
            in_secs: WARP_IN_SECS,
            overlay_out_secs: WARP_OVERLAY_OUT_SECS,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModalConfig {
    pub enter_secs: f64,
    pub exit_secs: f64,
}

impl Default for ModalConfig {
    fn default() -> Self {
        ModalConfig {
            enter_secs: MODAL_ENTER_SECS,
            exit_secs: MODAL_EXIT_SECS,
        }
    }
}

/// Runtime configuration. Every field has a default, so a partial
/// `config.json` only overrides what it names.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub mobile_breakpoint: f64,
    pub back_to_top_threshold: f64,
    pub start_in_play: bool,
    pub scenes: SceneConfig,
    pub physics: PhysicsConfig,
    pub warp: WarpConfig,
    pub modal: ModalConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            mobile_breakpoint: MOBILE_BREAKPOINT_PX,
            back_to_top_threshold: BACK_TO_TOP_THRESHOLD,
            start_in_play: false,
            scenes: SceneConfig::default(),
            physics: PhysicsConfig::default(),
            warp: WarpConfig::default(),
            modal: ModalConfig::default(),
        }
    }
}

/// Overrides read from the page URL.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Overrides {
    pub start_in_play: Option<bool>,
    pub settle_delay_ms: Option<u32>,
}

impl Overrides {
    /// Interpret raw query values (`physics`, `settle`).
    pub fn from_query(physics: Option<&str>, settle: Option<&str>) -> Self {
        let start_in_play = physics.and_then(|v| match v.to_ascii_lowercase().as_str() {
            "on" | "1" | "true" => Some(true),
            "off" | "0" | "false" => Some(false),
            _ => None,
        });
        let settle_delay_ms = settle.and_then(|v| v.trim().parse::<u32>().ok());
        Overrides {
            start_in_play,
            settle_delay_ms,
        }
    }
}

impl SiteConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn apply(mut self, overrides: &Overrides) -> Self {
        if let Some(play) = overrides.start_in_play {
            self.start_in_play = play;
        }
        if let Some(ms) = overrides.settle_delay_ms {
            self.physics.settle_delay_ms = ms;
        }
        self
    }

    pub fn viewport_class(&self, width: f64) -> ViewportClass {
        ViewportClass::from_width(width, self.mobile_breakpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = SiteConfig::from_json(r#"{ "physics": { "settle_delay_ms": 1500 } }"#).unwrap();
        assert_eq!(cfg.physics.settle_delay_ms, 1500);
        assert_eq!(cfg.physics.floating, ForceTuning::default());
        assert_eq!(cfg.scenes, SceneConfig::default());
        assert_eq!(cfg.mobile_breakpoint, MOBILE_BREAKPOINT_PX);
    }

    #[test]
    fn malformed_json_is_config_error() {
        let err = SiteConfig::from_json("{ nope").unwrap_err();
        assert!(matches!(err, crate::FolioError::Config(_)));
    }

    #[test]
    fn query_overrides_win() {
        let o = Overrides::from_query(Some("ON"), Some(" 250 "));
        let cfg = SiteConfig::default().apply(&o);
        assert!(cfg.start_in_play);
        assert_eq!(cfg.physics.settle_delay_ms, 250);

        let o = Overrides::from_query(Some("maybe"), Some("soon"));
        assert_eq!(o, Overrides::default());
    }

    #[test]
    fn viewport_class_splits_at_breakpoint() {
        let cfg = SiteConfig::default();
        assert_eq!(cfg.viewport_class(767.0), ViewportClass::Mobile);
        assert_eq!(cfg.viewport_class(768.0), ViewportClass::Desktop);
    }
}
