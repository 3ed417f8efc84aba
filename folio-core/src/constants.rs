//! Default tuning values. Lengths are CSS pixels and times are seconds
//! unless noted otherwise.

/// Viewports narrower than this are treated as mobile.
pub const MOBILE_BREAKPOINT_PX: f64 = 768.0;
/// The back-to-top control shows once scrolled past this share of a viewport.
pub const BACK_TO_TOP_THRESHOLD: f64 = 0.8;

/// Pinned scroll length of each scene, in viewport heights.
pub const HERO_PIN_VH: f64 = 1.0;
pub const TECH_PIN_VH: f64 = 1.0;
pub const PROJECTS_PIN_VH: f64 = 4.0;

/// Fixed physics step (60 Hz).
pub const PHYSICS_DT: f32 = 1.0 / 60.0;
pub const WALL_THICKNESS: f32 = 100.0;
pub const FLOAT_PAD_X: f32 = 100.0;
pub const FLOAT_PAD_Y: f32 = 120.0;
pub const CENTER_OBSTACLE_W: f32 = 400.0;
pub const CENTER_OBSTACLE_H: f32 = 150.0;
pub const LABEL_CORNER_RADIUS: f32 = 20.0;
pub const FALLBACK_LABEL_W: f64 = 120.0;
pub const FALLBACK_LABEL_H: f64 = 40.0;
pub const ANGULAR_DAMPING_PER_TICK: f32 = 0.02;
pub const SETTLE_DELAY_MS: u32 = 3000;
pub const SETTLE_GRAVITY: f32 = 980.0;

/// Warp transition timings.
pub const WARP_OUT_SECS: f64 = 0.6;
pub const WARP_OVERLAY_IN_SECS: f64 = 0.5;
pub const WARP_OVERLAY_OVERLAP_SECS: f64 = 0.3;
pub const WARP_IN_SECS: f64 = 0.7;
pub const WARP_OVERLAY_OUT_SECS: f64 = 0.5;

/// Modal animation timings.
pub const MODAL_ENTER_SECS: f64 = 1.0;
pub const MODAL_EXIT_SECS: f64 = 0.6;
pub const PROJECT_SCROLL_DELAY_MS: u32 = 100;

/// Back-to-top fade.
pub const FADE_SECS: f64 = 0.3;

/// Word-by-word text reveal.
pub const REVEAL_WORD_SECS: f64 = 1.4;
pub const REVEAL_STAGGER_SECS: f64 = 0.05;
/// A block reveals once its top passes this share of the viewport height.
pub const REVEAL_START_FRACTION: f64 = 0.95;

/// About-modal artwork strip.
pub const ARCHIVE_SCROLL_STEP_PX: f64 = 400.0;
pub const ARCHIVE_DRAG_FACTOR: f64 = 1.5;
pub const ARCHIVE_ENTRY_SECS: f64 = 1.5;
pub const ARCHIVE_ENTRY_DELAY_SECS: f64 = 0.2;
