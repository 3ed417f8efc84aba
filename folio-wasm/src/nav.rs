use std::cell::RefCell;
use std::rc::Rc;

use folio_core::markup;
use folio_core::nav::{NavItem, RESUME_FEATURES, RESUME_TARGET};
use gloo::events::{EventListener, EventListenerOptions};
use tracing::{debug, trace, warn};

use crate::constants::*;
use crate::state::State;
use crate::utils::asset_url;
use crate::{dom, modal};

fn render(s: &State) {
    if let Some(items) = dom::html_by_id(&s.document, NAV_ITEMS_ID) {
        items.set_inner_html(&markup::nav_items(s.nav.items()));
    }
    if let Some(icon) = dom::html_by_id(&s.document, MENU_ICON_ID) {
        let classes = icon.class_list();
        let _ = classes.remove_2("ri-menu-line", "ri-close-large-line");
        let _ = classes.add_1(s.nav.icon_class());
    }
}

/// Restyle the navigation bar when the shared theme has moved on since
/// the last write.
pub fn sync_theme(s: &mut State) {
    let revision = s.theme.revision();
    if s.nav_theme_revision == Some(revision) {
        return;
    }
    let Some(nav) = dom::html_by_id(&s.document, NAV_ID) else {
        return;
    };
    dom::apply_theme(&nav, &s.theme.theme());
    s.nav_theme_revision = Some(revision);
    trace!(revision, "nav theme");
}

pub fn attach(state: &Rc<RefCell<State>>) {
    let mut listeners = Vec::new();
    let document = state.borrow().document.clone();
    render(&state.borrow());
    sync_theme(&mut state.borrow_mut());

    if let Some(icon) = dom::html_by_id(&document, MENU_ICON_ID) {
        let st = state.clone();
        listeners.push(EventListener::new(&icon, "click", move |_| {
            let mut s = st.borrow_mut();
            let open = s.nav.toggle();
            debug!(open, "nav menu");
            render(&s);
        }));
    }

    if let Some(items) = dom::html_by_id(&document, NAV_ITEMS_ID) {
        let st = state.clone();
        listeners.push(EventListener::new_with_options(
            &items,
            "click",
            EventListenerOptions::enable_prevent_default(),
            move |e| {
                let Some(link) = dom::closest_from_event(e, "[data-nav]") else {
                    return;
                };
                e.prevent_default();
                let item = link
                    .get_attribute("data-nav")
                    .and_then(|a| NavItem::from_anchor(&a));
                let kind = {
                    let mut s = st.borrow_mut();
                    let kind = item.and_then(|item| s.nav.choose(item));
                    render(&s);
                    kind
                };
                if let Some(kind) = kind {
                    modal::open(&st, kind);
                }
            },
        ));
    }

    if let Some(resume) = dom::html_by_id(&document, RESUME_BUTTON_ID) {
        let st = state.clone();
        listeners.push(EventListener::new_with_options(
            &resume,
            "click",
            EventListenerOptions::enable_prevent_default(),
            move |e| {
                e.prevent_default();
                let s = st.borrow();
                let url = asset_url(&s.content.resume);
                if let Err(err) =
                    s.window
                        .open_with_url_and_target_and_features(&url, RESUME_TARGET, RESUME_FEATURES)
                {
                    warn!(?err, "resume could not be opened");
                }
            },
        ));
    }

    state.borrow_mut().listeners.extend(listeners);
}
