use folio_core::archive::ArchiveStrip;
use folio_core::back_to_top::BackToTop;
use folio_core::media::MediaHover;
use folio_core::modal::{ModalManager, ProjectAccordion};
use folio_core::nav::NavMenu;
use folio_core::preload::{Intro, PreloadGate};
use folio_core::reveal::RevealText;
use folio_core::scene::Sequencer;
use folio_core::tween::Tween;
use folio_core::warp::{DisplayMode, WarpMachine};
use folio_core::{Content, SiteConfig, Style, ThemeContext};
use gloo::events::EventListener;
use gloo::render::AnimationFrame;
use gloo::timers::callback::Timeout;
use web_sys::{Document, HtmlElement, HtmlImageElement, Window};

use crate::toy::ToyHandle;

/// Fade of the back-to-top control.
pub struct Fade {
    pub style: Style,
    pub tween: Option<Tween>,
}

/// Images the preloader waits on. Dropped once the gate opens.
pub struct PendingImages {
    pub images: Vec<HtmlImageElement>,
    pub listeners: Vec<EventListener>,
}

/// One mounted word-reveal block.
pub struct RevealBinding {
    pub block: HtmlElement,
    pub words: Vec<HtmlElement>,
    pub reveal: RevealText,
}

/// Global application state stored behind an `Rc<RefCell<_>>` so it can be
/// shared across the WASM callbacks.
pub struct State {
    pub window: Window,
    pub document: Document,
    pub config: SiteConfig,
    pub content: Content,
    pub sequencer: Sequencer,
    pub theme: ThemeContext,
    /// Theme revision last written onto the navigation bar.
    pub nav_theme_revision: Option<u64>,
    pub back_to_top: BackToTop,
    pub back_to_top_fade: Fade,
    pub warp: WarpMachine,
    pub toys: Vec<ToyHandle>,
    pub modals: ModalManager,
    pub accordion: ProjectAccordion,
    pub archive: ArchiveStrip,
    pub archive_entry: Option<Tween>,
    pub reveals: Vec<RevealBinding>,
    pub pending_scroll: Option<Timeout>,
    pub nav: NavMenu,
    pub media: MediaHover,
    pub gate: PreloadGate,
    pub pending_images: Option<PendingImages>,
    pub intro: Option<Intro>,
    /// Shared frame loop driving every tween; `None` while idle.
    pub ticker: Option<AnimationFrame>,
    pub last_frame_ms: Option<f64>,
    pub listeners: Vec<EventListener>,
}

impl State {
    pub fn new(window: Window, document: Document, config: SiteConfig, content: Content) -> Self {
        let initial = if config.start_in_play {
            DisplayMode::Play
        } else {
            DisplayMode::Info
        };
        let videos = content.projects.iter().map(|p| p.has_video()).collect();
        let gate = PreloadGate::new(content.preload_assets());
        State {
            sequencer: Sequencer::new(config.scenes.clone()),
            theme: ThemeContext::default(),
            nav_theme_revision: None,
            back_to_top: BackToTop::new(config.back_to_top_threshold),
            back_to_top_fade: Fade {
                style: Style::HIDDEN,
                tween: None,
            },
            warp: WarpMachine::new(initial, config.warp.clone()),
            toys: Vec::new(),
            modals: ModalManager::new(config.modal.clone()),
            accordion: ProjectAccordion::default(),
            archive: ArchiveStrip::new(content.archive.records.len()),
            archive_entry: None,
            reveals: Vec::new(),
            pending_scroll: None,
            nav: NavMenu::default(),
            media: MediaHover::new(videos),
            gate,
            pending_images: None,
            intro: Some(Intro::new()),
            ticker: None,
            last_frame_ms: None,
            listeners: Vec::new(),
            window,
            document,
            config,
            content,
        }
    }
}
