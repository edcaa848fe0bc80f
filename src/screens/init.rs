//! Init screen: shown while the robot boots.
//!
//! # Visual Layout
//!
//! ```text
//! ┌────────────────────────────────────┐
//! │                                    │
//! │            Initializing            │  TitleLarge, center - 25
//! │        [██████████░░░░░░░░░]       │  220x20 bar, center + 25
//! │                                    │
//! │ ReAuto v1.0.0                      │  Text, bottom-left (5, -5)
//! └────────────────────────────────────┘
//! ```
//!
//! The bar sweeps 0 → 100 over [`PROGRESS_DURATION`]. The sweep is decoration:
//! the scheduler's transition delay is configured separately and does not wait
//! for it. Callers that do care can poll [`InitScreen::progress_done`].

use embedded_graphics::prelude::{Point, Size};
use tracing::debug;

use crate::animations::Animation;
use crate::config::{PROGRESS_BAR_HEIGHT, PROGRESS_BAR_WIDTH, PROGRESS_DURATION, TITLE_INIT_OFFSET, VERSION_TEXT};
use crate::styles::{StyleName, StyleSet, clear_root};
use crate::widgets::{Align, Root, Selector, WidgetId};

use super::Screen;

/// Title text.
pub const INIT_TITLE: &str = "Initializing";

/// Version label margin from the bottom-left corner.
const VERSION_OFFSET: Point = Point::new(5, -5);

/// Widgets created by the latest `enter()`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InitWidgets {
    pub title: WidgetId,
    pub version: WidgetId,
    pub bar: WidgetId,
}

/// Boot screen with progress bar.
#[derive(Default)]
pub struct InitScreen {
    widgets: Option<InitWidgets>,
}

impl InitScreen {
    pub const fn new() -> Self {
        Self { widgets: None }
    }

    /// Widgets of the current invocation (`None` before the first `enter()`).
    #[inline]
    pub const fn widgets(&self) -> Option<InitWidgets> {
        self.widgets
    }

    /// Whether the progress sweep has completed on a still-visible bar.
    pub fn progress_done(&self, root: &Root) -> bool {
        self.widgets
            .is_some_and(|w| root.contains(w.bar) && !root.animation_running(w.bar))
    }
}

impl Screen for InitScreen {
    fn enter(&mut self, root: &mut Root, styles: &StyleSet) {
        clear_root(root);

        let title = root.create_label(None, INIT_TITLE);
        root.align(title, Align::Center, Point::new(0, -TITLE_INIT_OFFSET));
        root.add_style(title, styles.get(StyleName::TitleLarge), Selector::MAIN);

        let version = root.create_label(None, VERSION_TEXT);
        root.align(version, Align::BottomLeft, VERSION_OFFSET);
        root.add_style(version, styles.get(StyleName::Text), Selector::MAIN);

        let bar = root.create_bar(None);
        root.set_size(bar, Size::new(PROGRESS_BAR_WIDTH, PROGRESS_BAR_HEIGHT));
        root.align(bar, Align::Center, Point::new(0, TITLE_INIT_OFFSET));
        root.add_style(bar, styles.get(StyleName::Bar), Selector::INDICATOR);

        root.start_animation(Animation::new(bar, 0, 100, PROGRESS_DURATION));

        self.widgets = Some(InitWidgets { title, version, bar });
        debug!(duration_ms = PROGRESS_DURATION.as_millis() as u64, "init screen entered");
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::colors::{ACCENT, SCREEN_BG};
    use crate::styles::TextDecor;
    use crate::widgets::{Part, WidgetKind};

    fn entered() -> (Root, InitScreen) {
        let styles = StyleSet::default();
        let mut root = Root::new(Size::new(480, 272));
        let mut screen = InitScreen::new();
        screen.enter(&mut root, &styles);
        (root, screen)
    }

    #[test]
    fn test_root_holds_exactly_three_widgets() {
        let (root, screen) = entered();
        let w = screen.widgets().unwrap();
        assert_eq!(root.children(None), &[w.title, w.version, w.bar]);
        assert_eq!(root.widget_count(), 3);
        assert_eq!(root.bg_color(), SCREEN_BG);
    }

    #[test]
    fn test_widget_kinds_and_text() {
        let (root, screen) = entered();
        let w = screen.widgets().unwrap();
        assert_eq!(root.kind(w.title), Some(WidgetKind::Label));
        assert_eq!(root.text(w.title), Some(INIT_TITLE));
        assert_eq!(root.kind(w.version), Some(WidgetKind::Label));
        assert_eq!(root.text(w.version), Some(VERSION_TEXT));
        assert_eq!(root.kind(w.bar), Some(WidgetKind::Bar));
    }

    #[test]
    fn test_layout() {
        let (root, screen) = entered();
        let w = screen.widgets().unwrap();

        let bar = root.area(w.bar);
        assert_eq!(bar.size, Size::new(220, 20));
        assert_eq!(bar.top_left, Point::new(130, 126 + TITLE_INIT_OFFSET));

        let title = root.area(w.title);
        assert!(title.center().y < 136, "title should sit above center");

        let version = root.area(w.version);
        assert_eq!(version.top_left.x, 5);
        assert_eq!(version.top_left.y + version.size.height as i32, 272 - 5);
    }

    #[test]
    fn test_bar_indicator_styled() {
        let (root, screen) = entered();
        let w = screen.widgets().unwrap();
        let indicator = root.resolved_style(w.bar, Part::Indicator);
        assert_eq!(indicator.bg_color, Some(ACCENT));
        assert_eq!(indicator.radius, Some(10));
        assert_eq!(root.resolved_style(w.title, Part::Main).text_decor, None::<TextDecor>);
    }

    #[test]
    fn test_progress_runs_to_completion() {
        let (mut root, screen) = entered();
        let w = screen.widgets().unwrap();
        assert_eq!(root.bar_value(w.bar), Some(0));
        assert!(!screen.progress_done(&root));

        root.advance(Duration::from_millis(1999));
        assert!(!screen.progress_done(&root));

        root.advance(Duration::from_millis(1));
        assert_eq!(root.bar_value(w.bar), Some(100));
        assert!(screen.progress_done(&root));
    }

    #[test]
    fn test_reenter_replaces_widgets() {
        let styles = StyleSet::default();
        let (mut root, mut screen) = entered();
        let first = screen.widgets().unwrap();
        screen.enter(&mut root, &styles);
        let second = screen.widgets().unwrap();

        assert!(!root.contains(first.bar));
        assert_eq!(root.children(None), &[second.title, second.version, second.bar]);
    }
}
