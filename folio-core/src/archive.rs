//! Artwork strip inside the about modal: hover focus, drag-to-scroll,
//! step buttons and the collapsible experiment logs.

use crate::constants::{
    ARCHIVE_DRAG_FACTOR, ARCHIVE_ENTRY_DELAY_SECS, ARCHIVE_ENTRY_SECS, ARCHIVE_SCROLL_STEP_PX,
};
use crate::ease::Ease;
use crate::style::Style;
use crate::tween::Tween;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollDirection {
    Left,
    Right,
}

impl ScrollDirection {
    pub fn from_attr(value: &str) -> Option<Self> {
        match value {
            "left" => Some(ScrollDirection::Left),
            "right" => Some(ScrollDirection::Right),
            _ => None,
        }
    }

    pub fn attr(self) -> &'static str {
        match self {
            ScrollDirection::Left => "left",
            ScrollDirection::Right => "right",
        }
    }

    /// Horizontal scroll offset for one button press.
    pub fn delta(self) -> f64 {
        match self {
            ScrollDirection::Left => -ARCHIVE_SCROLL_STEP_PX,
            ScrollDirection::Right => ARCHIVE_SCROLL_STEP_PX,
        }
    }
}

/// How one record is drawn given the current hover.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordFocus {
    Neutral,
    Focused,
    /// Another record is hovered.
    Dimmed,
}

impl RecordFocus {
    pub fn class(self) -> &'static str {
        match self {
            RecordFocus::Neutral => "record",
            RecordFocus::Focused => "record record--focused",
            RecordFocus::Dimmed => "record record--dimmed",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Drag {
    start_x: f64,
    scroll_left: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ArchiveStrip {
    records: usize,
    hovered: Option<usize>,
    show_experiments: bool,
    drag: Option<Drag>,
}

impl ArchiveStrip {
    pub fn new(records: usize) -> Self {
        ArchiveStrip {
            records,
            hovered: None,
            show_experiments: true,
            drag: None,
        }
    }

    /// Returns true when the focused record changed.
    pub fn hover(&mut self, index: Option<usize>) -> bool {
        let index = index.filter(|i| *i < self.records);
        if index == self.hovered {
            return false;
        }
        self.hovered = index;
        true
    }

    pub fn focus(&self, index: usize) -> RecordFocus {
        match self.hovered {
            None => RecordFocus::Neutral,
            Some(h) if h == index => RecordFocus::Focused,
            Some(_) => RecordFocus::Dimmed,
        }
    }

    /// Start a drag. Positions are page coordinates, `offset_left` is the
    /// strip's own offset so the drag is measured inside it.
    pub fn press(&mut self, page_x: f64, offset_left: f64, scroll_left: f64) {
        self.drag = Some(Drag {
            start_x: page_x - offset_left,
            scroll_left,
        });
    }

    /// New `scrollLeft` for the strip, or `None` when no drag is active.
    pub fn drag_to(&self, page_x: f64, offset_left: f64) -> Option<f64> {
        let drag = self.drag?;
        let walk = (page_x - offset_left - drag.start_x) * ARCHIVE_DRAG_FACTOR;
        Some(drag.scroll_left - walk)
    }

    /// Returns true when a drag was active.
    pub fn release(&mut self) -> bool {
        self.drag.take().is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn strip_class(&self) -> &'static str {
        if self.is_dragging() {
            "archive-strip archive-strip--dragging"
        } else {
            "archive-strip"
        }
    }

    pub fn toggle_experiments(&mut self) -> bool {
        self.show_experiments = !self.show_experiments;
        self.show_experiments
    }

    pub fn show_experiments(&self) -> bool {
        self.show_experiments
    }

    pub fn logs_label(&self) -> &'static str {
        if self.show_experiments {
            "HIDE_LOGS"
        } else {
            "SHOW_LOGS"
        }
    }

    pub fn logs_class(&self) -> &'static str {
        if self.show_experiments {
            "archive-logs archive-logs--open"
        } else {
            "archive-logs archive-logs--closed"
        }
    }

    /// Slide-in of the record track when the modal mounts.
    pub fn entry() -> Tween {
        let from = Style::HIDDEN.with_x_px(100.0).with_skew_x(-2.0);
        Tween::new(from, Style::IDENTITY, ARCHIVE_ENTRY_SECS, Ease::Power4Out)
            .delayed(ARCHIVE_ENTRY_DELAY_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn hover_dims_the_others() {
        let mut strip = ArchiveStrip::new(3);
        assert_eq!(strip.focus(0), RecordFocus::Neutral);
        assert!(strip.hover(Some(1)));
        assert!(!strip.hover(Some(1)));
        assert_eq!(
            (0..3).map(|i| strip.focus(i)).collect::<Vec<_>>(),
            vec![RecordFocus::Dimmed, RecordFocus::Focused, RecordFocus::Dimmed]
        );
        assert!(strip.hover(Some(7)));
        assert_eq!(strip.focus(1), RecordFocus::Neutral);
    }

    #[test]
    fn drag_scrolls_against_pointer() {
        let mut strip = ArchiveStrip::new(5);
        assert_eq!(strip.drag_to(300.0, 20.0), None);
        strip.press(220.0, 20.0, 500.0);
        assert_eq!(strip.strip_class(), "archive-strip archive-strip--dragging");
        assert_eq!(strip.drag_to(120.0, 20.0), Some(650.0));
        assert_eq!(strip.drag_to(320.0, 20.0), Some(350.0));
        assert!(strip.release());
        assert!(!strip.release());
        assert_eq!(strip.drag_to(320.0, 20.0), None);
    }

    #[test]
    fn buttons_step_a_fixed_amount() {
        assert_eq!(ScrollDirection::from_attr("left").map(ScrollDirection::delta), Some(-400.0));
        assert_eq!(ScrollDirection::Right.delta(), 400.0);
        assert_eq!(ScrollDirection::from_attr("up"), None);
    }

    #[test]
    fn logs_start_open_and_toggle() {
        let mut strip = ArchiveStrip::new(0);
        assert_eq!(strip.logs_label(), "HIDE_LOGS");
        assert!(!strip.toggle_experiments());
        assert_eq!(strip.logs_label(), "SHOW_LOGS");
        assert_eq!(strip.logs_class(), "archive-logs archive-logs--closed");
    }

    #[test]
    fn entry_slides_in_after_delay() {
        let mut tween = ArchiveStrip::entry();
        let start = tween.advance(0.1).style;
        assert_eq!(start.x_px, 100.0);
        assert_eq!(start.opacity, 0.0);
        let mut last = start;
        while !tween.is_done() {
            last = tween.advance(1.0 / 60.0).style;
        }
        assert_eq!(last, Style::IDENTITY);
    }
}
