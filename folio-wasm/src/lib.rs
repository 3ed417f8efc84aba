use std::cell::RefCell;
use std::rc::Rc;

use folio_core::{Content, FolioError, Overrides, SiteConfig};
use tracing::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::Window;

mod anim;
mod archive;
mod constants;
mod dom;
mod media;
mod modal;
mod nav;
mod preload;
mod reveal;
mod scroll;
mod state;
mod toy;
mod utils;
mod warp;

use constants::{CONFIG_PATH, PAGE_ID};
use state::State;
use utils::{asset_url, fetch_text_with_fallbacks, get_query_param};

/// Compiled defaults, then `config.json` if the host serves one, then the
/// query string.
async fn load_config(window: &Window) -> SiteConfig {
    let text = fetch_text_with_fallbacks(
        window,
        &[&asset_url(CONFIG_PATH), &format!("/{CONFIG_PATH}"), CONFIG_PATH],
    )
    .await;
    let config = match text.as_deref().map(SiteConfig::from_json) {
        Some(Ok(cfg)) => cfg,
        Some(Err(err)) => {
            warn!(%err, "config.json ignored");
            SiteConfig::default()
        }
        None => SiteConfig::default(),
    };
    let search = window.location().search().unwrap_or_default();
    let overrides = Overrides::from_query(
        get_query_param(&search, "physics").as_deref(),
        get_query_param(&search, "settle").as_deref(),
    );
    config.apply(&overrides)
}

fn to_js(err: FolioError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn boot(window: Window, config: SiteConfig) -> Result<(), JsValue> {
    let document = window.document().ok_or("no document")?;
    if document.get_element_by_id(PAGE_ID).is_none() {
        return Err(to_js(FolioError::MissingElement(PAGE_ID.into())));
    }
    let content = Content::bundled().map_err(to_js)?;
    info!(
        play = config.start_in_play,
        projects = content.projects.len(),
        "starting"
    );

    // The listeners attached below hold the only references; they live
    // as long as the page.
    let state = Rc::new(RefCell::new(State::new(window, document, config, content)));

    preload::attach(&state);
    media::attach(&state);
    warp::attach(&state);
    nav::attach(&state);
    modal::attach(&state);
    scroll::attach(&state);
    Ok(())
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    let window = web_sys::window().ok_or("no window")?;
    wasm_bindgen_futures::spawn_local(async move {
        let config = load_config(&window).await;
        if let Err(err) = boot(window, config) {
            warn!(?err, "start-up failed");
        }
    });
    Ok(())
}
