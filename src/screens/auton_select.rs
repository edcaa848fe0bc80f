//! Autonomous routine selector.
//!
//! # Visual Layout (one routine)
//!
//! ```text
//! ┌────────────────────────────────────┐
//! │   Select Auto                      │  Title + underline, top-left (30, 25)
//! │   ‾‾‾‾‾‾‾‾‾‾‾                      │
//! │          ┌──────────────┐          │
//! │          │    Auto A    │          │  200x50 checkable button, centered
//! │          └──────────────┘          │
//! │                                    │
//! └────────────────────────────────────┘
//! ```
//!
//! With several routines the buttons stack vertically around the center,
//! kept clear of the title band, and form a radio group: checking one unchecks the rest. A single routine keeps
//! plain toggle behaviour, so it can be deselected again.
//!
//! The checked button is published through [`SelectedRoutine`] from
//! [`Screen::on_frame`], never from inside input processing.

use embedded_graphics::prelude::{Point, Size};
use heapless::Vec;
use profont::PROFONT_18_POINT;
use tracing::info;

use crate::config::{
    MAX_ROUTINES,
    ROUTINE_BUTTON_GAP,
    ROUTINE_BUTTON_HEIGHT,
    ROUTINE_BUTTON_WIDTH,
    SCREEN_HEIGHT,
    SELECT_TITLE_OFFSET,
};
use crate::routines::{RoutineId, RoutineRegistry, SelectedRoutine};
use crate::styles::{StyleName, StyleSet, clear_root};
use crate::widgets::{Align, Root, Selector, UiEvent, WidgetFlag, WidgetId};

use super::Screen;

/// Title text.
pub const SELECT_TITLE: &str = "Select Auto";

/// Radio group shared by all routine buttons.
const ROUTINE_GROUP: u8 = 0;

/// Topmost y a routine button may use: below the title band plus one gap.
const BUTTON_AREA_TOP: i32 =
    SELECT_TITLE_OFFSET.1 + PROFONT_18_POINT.character_size.height as i32 + ROUTINE_BUTTON_GAP;

const BUTTON_PITCH: i32 = ROUTINE_BUTTON_HEIGHT as i32 + ROUTINE_BUTTON_GAP;

/// Height of `count` stacked buttons.
const fn stack_height(count: usize) -> i32 {
    count as i32 * BUTTON_PITCH - ROUTINE_BUTTON_GAP
}

const _: () = assert!(BUTTON_AREA_TOP + stack_height(MAX_ROUTINES) <= SCREEN_HEIGHT as i32);

/// Vertical offset from screen center of button `index` out of `count`.
///
/// The stack is centered on the screen, pushed down if it would reach into
/// the title band.
pub const fn button_offset(index: usize, count: usize) -> i32 {
    let screen = SCREEN_HEIGHT as i32;
    let centered = (screen - stack_height(count)) / 2;
    let top = if centered < BUTTON_AREA_TOP { BUTTON_AREA_TOP } else { centered };
    let centered_button = (screen - ROUTINE_BUTTON_HEIGHT as i32) / 2;
    top + index as i32 * BUTTON_PITCH - centered_button
}

/// Routine selection screen.
pub struct AutonSelectScreen {
    routines: RoutineRegistry,
    selection: SelectedRoutine,
    title: Option<WidgetId>,
    buttons: Vec<(WidgetId, RoutineId), MAX_ROUTINES>,
}

impl AutonSelectScreen {
    /// Selector offering `routines`, publishing the choice to `selection`.
    pub fn new(routines: RoutineRegistry, selection: SelectedRoutine) -> Self {
        Self {
            routines,
            selection,
            title: None,
            buttons: Vec::new(),
        }
    }

    /// Title label of the current invocation.
    #[inline]
    pub const fn title(&self) -> Option<WidgetId> {
        self.title
    }

    /// Routine buttons of the current invocation, in display order.
    #[inline]
    pub fn buttons(&self) -> &[(WidgetId, RoutineId)] {
        &self.buttons
    }

    /// Button showing `routine`.
    pub fn button_for(&self, routine: RoutineId) -> Option<WidgetId> {
        self.buttons.iter().find(|(_, r)| *r == routine).map(|(w, _)| *w)
    }

    #[inline]
    pub const fn routines(&self) -> &RoutineRegistry {
        &self.routines
    }

    fn routine_for(&self, widget: WidgetId) -> Option<RoutineId> {
        self.buttons.iter().find(|(w, _)| *w == widget).map(|(_, r)| *r)
    }
}

impl Screen for AutonSelectScreen {
    fn enter(&mut self, root: &mut Root, styles: &StyleSet) {
        clear_root(root);
        self.buttons.clear();

        let title = root.create_label(None, SELECT_TITLE);
        root.align(title, Align::TopLeft, Point::new(SELECT_TITLE_OFFSET.0, SELECT_TITLE_OFFSET.1));
        root.add_style(title, styles.get(StyleName::Title), Selector::MAIN);
        root.add_style(title, styles.get(StyleName::TextUnderline), Selector::MAIN);
        self.title = Some(title);

        let count = self.routines.len();
        let grouped = count > 1;
        for (index, routine) in self.routines.iter().enumerate() {
            let button = root.create_button(None);
            root.set_size(button, Size::new(ROUTINE_BUTTON_WIDTH, ROUTINE_BUTTON_HEIGHT));
            root.align(button, Align::Center, Point::new(0, button_offset(index, count)));
            root.add_style(button, styles.get(StyleName::Button), Selector::MAIN);
            root.add_style(button, styles.get(StyleName::ButtonPressed), Selector::CHECKED);
            root.add_flag(button, WidgetFlag::Checkable);
            if grouped {
                root.set_radio_group(button, ROUTINE_GROUP);
            }

            let label = root.create_label(Some(button), &routine.label);
            root.align(label, Align::Center, Point::zero());
            root.add_style(label, styles.get(StyleName::Text), Selector::MAIN);

            if self.selection.get() == Some(routine.id) {
                root.set_checked(button, true);
            }

            // Capacity matches the registry, so this cannot overflow
            let _ = self.buttons.push((button, routine.id));
        }

        info!(routines = count, "autonomous selector entered");
    }

    fn on_frame(&mut self, root: &mut Root) {
        for event in root.take_events() {
            let UiEvent::ValueChanged { widget, checked } = event;
            let Some(routine) = self.routine_for(widget) else {
                continue;
            };

            let next = if checked {
                Some(routine)
            } else if self.selection.get() == Some(routine) {
                None
            } else {
                continue;
            };

            if self.selection.set(next) {
                match next.and_then(|id| self.routines.get(id)) {
                    Some(r) => info!(routine = %r.id, label = %r.label, "autonomous routine selected"),
                    None => info!("autonomous routine cleared"),
                }
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::styles::TextDecor;
    use crate::widgets::{Part, WidgetKind};

    fn screen(labels: &[&str]) -> (Root, AutonSelectScreen, SelectedRoutine) {
        let selection = SelectedRoutine::new();
        let registry = RoutineRegistry::from_labels(labels.iter().copied()).unwrap();
        let mut screen = AutonSelectScreen::new(registry, selection.clone());
        let mut root = Root::new(Size::new(480, 272));
        screen.enter(&mut root, &StyleSet::default());
        (root, screen, selection)
    }

    fn click(root: &mut Root, widget: WidgetId) {
        let center = root.area(widget).center();
        root.press(center);
        root.release(center);
    }

    #[test]
    fn test_single_routine_layout() {
        let (root, screen, _) = screen(&["Auto A"]);
        let title = screen.title().unwrap();
        let (button, _) = screen.buttons()[0];

        assert_eq!(root.children(None), &[title, button]);
        assert_eq!(root.widget_count(), 3);

        let label = root.children(Some(button))[0];
        assert_eq!(root.kind(label), Some(WidgetKind::Label));
        assert_eq!(root.text(label), Some("Auto A"));

        assert_eq!(root.area(title).top_left, Point::new(30, 25));
        assert_eq!(root.area(button).size, Size::new(200, 50));
        assert_eq!(root.area(button).top_left, Point::new(140, 111));
        assert!(root.is_checkable(button));
    }

    #[test]
    fn test_title_has_underline() {
        let (root, screen, _) = screen(&["Auto A"]);
        let style = root.resolved_style(screen.title().unwrap(), Part::Main);
        assert_eq!(style.text_decor, Some(TextDecor::Underline));
        assert!(style.is_text_complete());
    }

    #[test]
    fn test_enter_clears_previous_screen() {
        let mut root = Root::new(Size::new(480, 272));
        let leftover = root.create_bar(None);
        let mut screen = AutonSelectScreen::new(RoutineRegistry::from_labels(["A"]).unwrap(), SelectedRoutine::new());
        screen.enter(&mut root, &StyleSet::default());
        assert!(!root.contains(leftover));
        assert_eq!(root.widget_count(), 3);
    }

    #[test]
    fn test_click_selects_routine() {
        let (mut root, mut screen, selection) = screen(&["Auto A"]);
        let (button, routine) = screen.buttons()[0];

        click(&mut root, button);
        assert_eq!(selection.get(), None, "selection only updates on the next frame");
        screen.on_frame(&mut root);
        assert_eq!(selection.get(), Some(routine));

        // Single routine: toggles back off
        click(&mut root, button);
        screen.on_frame(&mut root);
        assert_eq!(selection.get(), None);
    }

    #[test]
    fn test_multiple_routines_are_exclusive() {
        let (mut root, mut screen, selection) = screen(&["Left", "Right", "Skills"]);
        let buttons: std::vec::Vec<_> = screen.buttons().to_vec();

        click(&mut root, buttons[0].0);
        screen.on_frame(&mut root);
        assert_eq!(selection.get(), Some(buttons[0].1));

        click(&mut root, buttons[2].0);
        screen.on_frame(&mut root);
        assert_eq!(selection.get(), Some(buttons[2].1));
        assert!(!root.is_checked(buttons[0].0));
        assert!(root.is_checked(buttons[2].0));
    }

    #[test]
    fn test_buttons_stack_without_overlap() {
        let (root, screen, _) = screen(&["A", "B", "C"]);
        let areas: std::vec::Vec<_> = screen.buttons().iter().map(|(w, _)| root.area(*w)).collect();
        for pair in areas.windows(2) {
            let bottom = pair[0].top_left.y + pair[0].size.height as i32;
            assert_eq!(pair[1].top_left.y - bottom, ROUTINE_BUTTON_GAP);
        }
        let last = areas[areas.len() - 1];
        assert!(last.top_left.y + last.size.height as i32 <= 272);
    }

    #[test]
    fn test_buttons_clear_of_title() {
        let labels = ["Left", "Right", "Skills", "Spare"];
        for count in 1..=MAX_ROUTINES {
            let (root, screen, _) = screen(&labels[..count]);
            let title = root.area(screen.title().unwrap());
            for (button, _) in screen.buttons() {
                let area = root.area(*button);
                assert!(
                    title.intersection(&area).is_zero_sized(),
                    "{count} routines: title {title:?} overlaps button {area:?}"
                );
                assert!(area.top_left.y >= title.top_left.y + title.size.height as i32 + ROUTINE_BUTTON_GAP);
            }
        }
    }

    #[test]
    fn test_button_offset_single_is_centered() {
        assert_eq!(button_offset(0, 1), 0);
        assert_eq!(button_offset(0, 2), -(button_offset(1, 2)));
    }

    #[test]
    fn test_reenter_restores_checked_button() {
        let (mut root, mut screen, selection) = screen(&["Left", "Right"]);
        let (right, routine) = screen.buttons()[1];
        click(&mut root, right);
        screen.on_frame(&mut root);

        screen.enter(&mut root, &StyleSet::default());
        assert_eq!(selection.get(), Some(routine));
        let right = screen.button_for(routine).unwrap();
        assert!(root.is_checked(right));
    }
}
