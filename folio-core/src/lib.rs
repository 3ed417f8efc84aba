//! Host-testable core of the portfolio site: scroll scenes, the warp
//! transition, the label physics toys, modals and the preload gate.
//! Nothing here touches the DOM; `folio-wasm` feeds in measurements and
//! events and writes the computed styles back out.

pub mod archive;
pub mod back_to_top;
pub mod config;
pub mod constants;
pub mod content;
pub mod ease;
pub mod error;
pub mod markup;
pub mod media;
pub mod modal;
pub mod nav;
pub mod physics;
pub mod preload;
pub mod reveal;
pub mod scene;
pub mod style;
pub mod theme;
pub mod timeline;
pub mod tween;
pub mod warp;

pub use config::{Overrides, SiteConfig, ViewportClass};
pub use content::Content;
pub use error::{FolioError, Result};
pub use style::Style;
pub use theme::{Theme, ThemeContext};
