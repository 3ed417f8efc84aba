//! Element ids the static page provides. Every lookup is optional: a
//! missing element disables the feature that drives it.

pub const PAGE_ID: &str = "page";

pub const PRELOADER_ID: &str = "preloader";
pub const PRELOADER_REVEALER_ID: &str = "preloader-revealer";
pub const PRELOADER_GREETING_ID: &str = "preloader-greeting";

/// Spacer sections, in scroll order. Each wraps a sticky pinned panel.
pub const SCENE_SPACER_IDS: [&str; 3] = ["scene-hero", "scene-tech", "scene-projects"];
pub const ABOUT_PANEL_ID: &str = "about-panel";
pub const TECH_SCENE_ID: &str = "tech-scene";
pub const PROJECT_CARDS_ID: &str = "project-cards";
pub const CONTACT_PANEL_ID: &str = "contact-panel";

pub const TECH_CONTENT_ID: &str = "tech-content";
pub const WARP_OVERLAY_ID: &str = "warp-overlay";
pub const WARP_BUTTON_ID: &str = "warp-button";
pub const PHYSICS_STATUS_ID: &str = "physics-status";

pub const BACK_TO_TOP_ID: &str = "back-to-top";

/// Navigation bar; the scene theme is scoped to it.
pub const NAV_ID: &str = "nav";
pub const MENU_ICON_ID: &str = "menu-icon";
pub const NAV_ITEMS_ID: &str = "nav-items";
pub const RESUME_BUTTON_ID: &str = "resume-button";

pub const ABOUT_MODAL_ID: &str = "about-modal";
pub const PROJECTS_MODAL_ID: &str = "projects-modal";

pub const PAGE_SUPPRESSED_CLASS: &str = "page--suppressed";

/// Optional runtime configuration, relative to `window.__BASE_URL`.
pub const CONFIG_PATH: &str = "config.json";
