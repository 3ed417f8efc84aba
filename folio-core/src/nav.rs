use crate::modal::ModalKind;

pub const RESUME_TARGET: &str = "_blank";
/// Opened without a reference back to this page.
pub const RESUME_FEATURES: &str = "noopener,noreferrer";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavItem {
    About,
    Projects,
}

impl NavItem {
    pub fn label(self) -> &'static str {
        match self {
            NavItem::About => "About",
            NavItem::Projects => "Projects",
        }
    }

    pub fn anchor(self) -> &'static str {
        match self {
            NavItem::About => "about",
            NavItem::Projects => "projects",
        }
    }

    pub fn modal(self) -> ModalKind {
        match self {
            NavItem::About => ModalKind::About,
            NavItem::Projects => ModalKind::Projects,
        }
    }

    pub fn from_anchor(anchor: &str) -> Option<Self> {
        match anchor.trim_start_matches('#') {
            "about" => Some(NavItem::About),
            "projects" => Some(NavItem::Projects),
            _ => None,
        }
    }
}

const ITEMS: [NavItem; 2] = [NavItem::About, NavItem::Projects];

/// Navigation menu. Items exist only while the menu is open.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavMenu {
    open: bool,
}

impl NavMenu {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn items(&self) -> &'static [NavItem] {
        if self.open { &ITEMS } else { &[] }
    }

    /// Menu icon class for the current state.
    pub fn icon_class(&self) -> &'static str {
        if self.open {
            "ri-close-large-line"
        } else {
            "ri-menu-line"
        }
    }

    /// Pick an item: the menu closes and the matching modal should open.
    pub fn choose(&mut self, item: NavItem) -> Option<ModalKind> {
        if !self.open {
            return None;
        }
        self.open = false;
        Some(item.modal())
    }
}
