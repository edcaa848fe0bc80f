//! Retained widget tree owned by the root container.
//!
//! # Handles
//!
//! Widgets live in an arena of slots. A [`WidgetId`] is a slot index plus the
//! slot's generation at creation time; deleting a widget bumps the generation,
//! so handles kept past a `clean()` are recognised as stale instead of silently
//! pointing at a newer widget.
//!
//! # Contract Violations
//!
//! Mutating a widget that does not exist (stale handle, handle from another
//! root) is a programming error and panics. Queries return `Option` / `false`.
//!
//! # Input
//!
//! Input is applied by the backend between frames via [`Root::press`] and
//! [`Root::release`]. Resulting [`UiEvent`]s are queued and handed to the
//! active screen by the scheduler through [`Root::take_events`]; no
//! application code runs from inside the toolkit.

use std::time::Duration;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use heapless::String;

use crate::animations::Animation;
use crate::colors::SCREEN_BG;
use crate::config::LABEL_CAPACITY;
use crate::styles::Style;

use super::theme::{checked_style, default_style};

// =============================================================================
// Default Sizes
// =============================================================================

/// Bar size when none is set.
pub const DEFAULT_BAR_SIZE: Size = Size::new(200, 10);

/// Button size when none is set.
pub const DEFAULT_BUTTON_SIZE: Size = Size::new(100, 40);

// =============================================================================
// Public Types
// =============================================================================

/// Generation-checked handle to a widget.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WidgetId {
    index: u32,
    generation: u32,
}

/// Widget kinds supported by the toolkit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WidgetKind {
    Label,
    Bar,
    Button,
}

/// Stylable part of a widget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Part {
    /// Background / text of the widget itself.
    Main,
    /// Filled portion of a bar.
    Indicator,
}

/// Interaction state a style applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    /// Always applies.
    Default,
    /// Applies while a checkable widget is checked.
    Checked,
    /// Applies while the pointer is held down on the widget.
    Pressed,
}

/// Where a style added to a widget applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selector {
    pub part: Part,
    pub state: State,
}

impl Selector {
    pub const MAIN: Self = Self::new(Part::Main, State::Default);
    pub const INDICATOR: Self = Self::new(Part::Indicator, State::Default);
    pub const CHECKED: Self = Self::new(Part::Main, State::Checked);
    pub const PRESSED: Self = Self::new(Part::Main, State::Pressed);

    pub const fn new(part: Part, state: State) -> Self {
        Self { part, state }
    }
}

/// Anchor of a widget inside its parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    TopLeft,
    TopMid,
    TopRight,
    LeftMid,
    Center,
    RightMid,
    BottomLeft,
    BottomMid,
    BottomRight,
}

/// Behaviour flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WidgetFlag {
    /// Releasing the pointer on the widget toggles its checked state.
    Checkable,
}

/// Notification produced by input processing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiEvent {
    /// A checkable widget changed its checked state through input.
    ValueChanged { widget: WidgetId, checked: bool },
}

// =============================================================================
// Internal Storage
// =============================================================================

struct Widget {
    kind: WidgetKind,
    parent: Option<WidgetId>,
    children: Vec<WidgetId>,
    text: String<LABEL_CAPACITY>,
    value: i32,
    range: (i32, i32),
    size: Option<Size>,
    align: Align,
    offset: Point,
    styles: Vec<(Style, Selector)>,
    checkable: bool,
    checked: bool,
    pressed: bool,
    radio_group: Option<u8>,
}

impl Widget {
    fn new(kind: WidgetKind, parent: Option<WidgetId>) -> Self {
        Self {
            kind,
            parent,
            children: Vec::new(),
            text: String::new(),
            value: 0,
            range: (0, 100),
            size: None,
            align: Align::default(),
            offset: Point::zero(),
            styles: Vec::new(),
            checkable: false,
            checked: false,
            pressed: false,
            radio_group: None,
        }
    }
}

struct Slot {
    generation: u32,
    widget: Option<Widget>,
}

fn slot_widget_mut(slots: &mut [Slot], id: WidgetId) -> Option<&mut Widget> {
    slots
        .get_mut(id.index as usize)
        .filter(|slot| slot.generation == id.generation)
        .and_then(|slot| slot.widget.as_mut())
}

/// Copy `text` into a fixed-capacity label buffer, dropping whatever does not fit.
fn truncated(text: &str) -> String<LABEL_CAPACITY> {
    let mut out = String::new();
    for c in text.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

// =============================================================================
// Root Container
// =============================================================================

/// Root container: owns every widget of the active screen, the animations
/// bound to them and the pending UI events.
pub struct Root {
    size: Size,
    bg_color: Rgb565,
    slots: Vec<Slot>,
    free: Vec<u32>,
    children: Vec<WidgetId>,
    animations: Vec<Animation>,
    events: Vec<UiEvent>,
    pressed: Option<WidgetId>,
    dirty: bool,
}

impl Root {
    /// Create an empty root covering a surface of `size`.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            bg_color: SCREEN_BG,
            slots: Vec::new(),
            free: Vec::new(),
            children: Vec::new(),
            animations: Vec::new(),
            events: Vec::new(),
            pressed: None,
            dirty: true,
        }
    }

    // -------------------------------------------------------------------------
    // Container
    // -------------------------------------------------------------------------

    #[inline]
    pub const fn size(&self) -> Size {
        self.size
    }

    #[inline]
    pub const fn bg_color(&self) -> Rgb565 {
        self.bg_color
    }

    pub fn set_bg_color(&mut self, color: Rgb565) {
        if self.bg_color != color {
            self.bg_color = color;
            self.dirty = true;
        }
    }

    /// Number of live widgets at any depth.
    pub fn widget_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.widget.is_some()).count()
    }

    /// Direct children of `parent` (`None` for the root itself), in creation order.
    pub fn children(&self, parent: Option<WidgetId>) -> &[WidgetId] {
        match parent {
            None => &self.children,
            Some(id) => self.widget(id).map_or(&[], |w| w.children.as_slice()),
        }
    }

    /// Whether `id` refers to a live widget.
    pub fn contains(&self, id: WidgetId) -> bool {
        self.widget(id).is_some()
    }

    /// Delete every widget, animation, pending event and press.
    pub fn clean(&mut self) {
        for id in std::mem::take(&mut self.children) {
            self.delete(id);
        }
        self.animations.clear();
        self.events.clear();
        self.pressed = None;
        self.dirty = true;
    }

    /// Delete a widget, its descendants and any animation bound to them.
    pub fn delete(&mut self, id: WidgetId) {
        let widget = self.take_slot(id);
        match widget.parent {
            Some(parent) => {
                if let Some(p) = slot_widget_mut(&mut self.slots, parent) {
                    p.children.retain(|c| *c != id);
                }
            }
            None => self.children.retain(|c| *c != id),
        }
        self.delete_subtree(widget.children);
        self.dirty = true;
    }

    fn delete_subtree(&mut self, children: Vec<WidgetId>) {
        for child in children {
            let widget = self.take_slot(child);
            self.delete_subtree(widget.children);
        }
    }

    fn take_slot(&mut self, id: WidgetId) -> Widget {
        let slot = self
            .slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation && slot.widget.is_some())
            .unwrap_or_else(|| panic!("widget {id:?} does not exist"));
        let widget = slot.widget.take().unwrap_or_else(|| panic!("widget {id:?} does not exist"));
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.animations.retain(|a| a.target() != id);
        if self.pressed == Some(id) {
            self.pressed = None;
        }
        widget
    }

    // -------------------------------------------------------------------------
    // Creation
    // -------------------------------------------------------------------------

    fn create(&mut self, kind: WidgetKind, parent: Option<WidgetId>) -> WidgetId {
        if let Some(p) = parent {
            assert!(self.contains(p), "parent widget {p:?} does not exist");
        }

        let widget = Widget::new(kind, parent);
        let id = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.widget = Some(widget);
                WidgetId { index, generation: slot.generation }
            }
            None => {
                let index = u32::try_from(self.slots.len()).unwrap_or_else(|_| panic!("widget arena is full"));
                self.slots.push(Slot { generation: 0, widget: Some(widget) });
                WidgetId { index, generation: 0 }
            }
        };

        match parent {
            Some(p) => self.widget_mut(p).children.push(id),
            None => self.children.push(id),
        }
        self.dirty = true;
        id
    }

    /// Create a text label.
    pub fn create_label(&mut self, parent: Option<WidgetId>, text: &str) -> WidgetId {
        let id = self.create(WidgetKind::Label, parent);
        self.widget_mut(id).text = truncated(text);
        id
    }

    /// Create a bar with range 0..=100 and value 0.
    pub fn create_bar(&mut self, parent: Option<WidgetId>) -> WidgetId {
        self.create(WidgetKind::Bar, parent)
    }

    /// Create a (momentary) button. Add [`WidgetFlag::Checkable`] for a toggle.
    pub fn create_button(&mut self, parent: Option<WidgetId>) -> WidgetId {
        self.create(WidgetKind::Button, parent)
    }

    // -------------------------------------------------------------------------
    // Properties
    // -------------------------------------------------------------------------

    pub fn set_text(&mut self, id: WidgetId, text: &str) {
        self.widget_mut(id).text = truncated(text);
    }

    pub fn set_size(&mut self, id: WidgetId, size: Size) {
        self.widget_mut(id).size = Some(size);
    }

    /// Place `id` at `align` inside its parent, shifted by `offset`.
    pub fn align(&mut self, id: WidgetId, align: Align, offset: Point) {
        let widget = self.widget_mut(id);
        widget.align = align;
        widget.offset = offset;
    }

    /// Add a style for the given part/state. Later styles override earlier ones.
    pub fn add_style(&mut self, id: WidgetId, style: &Style, selector: Selector) {
        self.widget_mut(id).styles.push((*style, selector));
    }

    pub fn add_flag(&mut self, id: WidgetId, flag: WidgetFlag) {
        match flag {
            WidgetFlag::Checkable => self.widget_mut(id).checkable = true,
        }
    }

    /// Put a checkable widget in a radio group: at most one member is checked.
    pub fn set_radio_group(&mut self, id: WidgetId, group: u8) {
        self.widget_mut(id).radio_group = Some(group);
    }

    /// Set the checked state without emitting an event.
    pub fn set_checked(&mut self, id: WidgetId, checked: bool) {
        let group = self.widget(id).and_then(|w| w.radio_group);
        if checked && let Some(group) = group {
            self.uncheck_group(group);
        }
        self.widget_mut(id).checked = checked;
    }

    /// Set a bar's value, clamped to its range.
    pub fn set_bar_value(&mut self, id: WidgetId, value: i32) {
        let widget = self.widget_mut(id);
        let (min, max) = widget.range;
        widget.value = value.clamp(min, max);
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn kind(&self, id: WidgetId) -> Option<WidgetKind> {
        self.widget(id).map(|w| w.kind)
    }

    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.widget(id).and_then(|w| w.parent)
    }

    pub fn text(&self, id: WidgetId) -> Option<&str> {
        self.widget(id).map(|w| w.text.as_str())
    }

    pub fn bar_value(&self, id: WidgetId) -> Option<i32> {
        self.widget(id).map(|w| w.value)
    }

    pub fn bar_range(&self, id: WidgetId) -> Option<(i32, i32)> {
        self.widget(id).map(|w| w.range)
    }

    /// Checked state (`false` for dead widgets).
    pub fn is_checked(&self, id: WidgetId) -> bool {
        self.widget(id).is_some_and(|w| w.checked)
    }

    pub fn is_pressed(&self, id: WidgetId) -> bool {
        self.widget(id).is_some_and(|w| w.pressed)
    }

    pub fn is_checkable(&self, id: WidgetId) -> bool {
        self.widget(id).is_some_and(|w| w.checkable)
    }

    /// Effective style of a widget part: theme, then matching styles in order,
    /// state-specific ones last.
    pub fn resolved_style(&self, id: WidgetId, part: Part) -> Style {
        let widget = self.expect_widget(id);
        let mut style = default_style(widget.kind, part);
        if widget.checked {
            style = style.merge(&checked_style(widget.kind, part));
        }

        let active = [
            (State::Default, true),
            (State::Checked, widget.checked),
            (State::Pressed, widget.pressed),
        ];
        for (state, on) in active {
            if !on {
                continue;
            }
            for (s, selector) in &widget.styles {
                if selector.part == part && selector.state == state {
                    style = style.merge(s);
                }
            }
        }
        style
    }

    // -------------------------------------------------------------------------
    // Layout
    // -------------------------------------------------------------------------

    /// Absolute rectangle of a widget on the surface.
    pub fn area(&self, id: WidgetId) -> Rectangle {
        let widget = self.expect_widget(id);
        let parent = match widget.parent {
            Some(p) => self.area(p),
            None => Rectangle::new(Point::zero(), self.size),
        };
        let size = self.widget_size(id);
        let top_left = anchor(parent, size, widget.align) + widget.offset;
        Rectangle::new(top_left, size)
    }

    fn widget_size(&self, id: WidgetId) -> Size {
        let widget = self.expect_widget(id);
        if let Some(size) = widget.size {
            return size;
        }
        match widget.kind {
            WidgetKind::Label => {
                let style = self.resolved_style(id, Part::Main);
                let Some(font) = style.font else {
                    return Size::zero();
                };
                let chars = widget.text.chars().count() as u32;
                if chars == 0 {
                    return Size::new(0, font.character_size.height);
                }
                let width = chars * font.character_size.width + (chars - 1) * font.character_spacing;
                Size::new(width, font.character_size.height)
            }
            WidgetKind::Bar => DEFAULT_BAR_SIZE,
            WidgetKind::Button => DEFAULT_BUTTON_SIZE,
        }
    }

    /// All live widgets in paint order (parents before children, creation order).
    pub fn draw_order(&self) -> Vec<WidgetId> {
        let mut order = Vec::with_capacity(self.widget_count());
        let mut stack: Vec<WidgetId> = self.children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            order.push(id);
            if let Some(widget) = self.widget(id) {
                stack.extend(widget.children.iter().rev().copied());
            }
        }
        order
    }

    // -------------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------------

    /// Topmost button under `point`.
    pub fn hit_test(&self, point: Point) -> Option<WidgetId> {
        self.draw_order()
            .into_iter()
            .rev()
            .find(|id| self.kind(*id) == Some(WidgetKind::Button) && self.area(*id).contains(point))
    }

    /// Pointer went down at `point`. Any earlier press is dropped first, even
    /// when `point` misses every button.
    pub fn press(&mut self, point: Point) -> Option<WidgetId> {
        if let Some(previous) = self.pressed.take()
            && let Some(widget) = slot_widget_mut(&mut self.slots, previous)
        {
            widget.pressed = false;
            self.dirty = true;
        }

        let id = self.hit_test(point)?;
        self.pressed = Some(id);
        self.widget_mut(id).pressed = true;
        Some(id)
    }

    /// Pointer went up at `point`. Toggles a checkable button when the release
    /// lands on the button that was pressed.
    pub fn release(&mut self, point: Point) -> Option<UiEvent> {
        let id = self.pressed.take()?;
        if !self.contains(id) {
            return None;
        }
        self.widget_mut(id).pressed = false;

        if !self.is_checkable(id) || !self.area(id).contains(point) {
            return None;
        }

        let widget = self.expect_widget(id);
        let checked = match widget.radio_group {
            // Radio members only ever turn on through input
            Some(_) => true,
            None => !widget.checked,
        };
        if checked == widget.checked {
            return None;
        }

        self.set_checked(id, checked);
        let event = UiEvent::ValueChanged { widget: id, checked };
        self.events.push(event);
        Some(event)
    }

    /// Drain queued UI events.
    pub fn take_events(&mut self) -> Vec<UiEvent> {
        std::mem::take(&mut self.events)
    }

    fn uncheck_group(&mut self, group: u8) {
        let mut changed = false;
        for slot in &mut self.slots {
            if let Some(w) = slot.widget.as_mut()
                && w.radio_group == Some(group)
                && w.checked
            {
                w.checked = false;
                changed = true;
            }
        }
        if changed {
            self.dirty = true;
        }
    }

    // -------------------------------------------------------------------------
    // Animations
    // -------------------------------------------------------------------------

    /// Bind an animation to its target widget and apply its start value.
    pub fn start_animation(&mut self, animation: Animation) {
        let target = animation.target();
        self.set_bar_value(target, animation.value());
        self.animations.retain(|a| a.target() != target);
        if !animation.is_finished() {
            self.animations.push(animation);
        }
    }

    /// Whether an animation is still running on `id`.
    pub fn animation_running(&self, id: WidgetId) -> bool {
        self.animations.iter().any(|a| a.target() == id)
    }

    /// Step every running animation by `dt`; finished ones are dropped.
    pub fn advance(&mut self, dt: Duration) {
        let Self { animations, slots, dirty, .. } = self;
        animations.retain_mut(|anim| {
            let value = anim.advance(dt);
            let Some(widget) = slot_widget_mut(slots, anim.target()) else {
                return false;
            };
            let (min, max) = widget.range;
            let value = value.clamp(min, max);
            if widget.value != value {
                widget.value = value;
                *dirty = true;
            }
            !anim.is_finished()
        });
    }

    // -------------------------------------------------------------------------
    // Redraw Tracking
    // -------------------------------------------------------------------------

    /// Whether anything visible changed since the last [`Root::mark_clean`].
    #[inline]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[inline]
    pub const fn mark_clean(&mut self) {
        self.dirty = false;
    }

    // -------------------------------------------------------------------------
    // Slot Access
    // -------------------------------------------------------------------------

    fn widget(&self, id: WidgetId) -> Option<&Widget> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.widget.as_ref())
    }

    fn expect_widget(&self, id: WidgetId) -> &Widget {
        self.widget(id)
            .unwrap_or_else(|| panic!("widget {id:?} does not exist"))
    }

    fn widget_mut(&mut self, id: WidgetId) -> &mut Widget {
        self.dirty = true;
        slot_widget_mut(&mut self.slots, id).unwrap_or_else(|| panic!("widget {id:?} does not exist"))
    }
}

/// Top-left corner of a `size` box anchored at `align` inside `parent`.
fn anchor(parent: Rectangle, size: Size, align: Align) -> Point {
    let free_w = parent.size.width as i32 - size.width as i32;
    let free_h = parent.size.height as i32 - size.height as i32;
    let (dx, dy) = match align {
        Align::TopLeft => (0, 0),
        Align::TopMid => (free_w / 2, 0),
        Align::TopRight => (free_w, 0),
        Align::LeftMid => (0, free_h / 2),
        Align::Center => (free_w / 2, free_h / 2),
        Align::RightMid => (free_w, free_h / 2),
        Align::BottomLeft => (0, free_h),
        Align::BottomMid => (free_w / 2, free_h),
        Align::BottomRight => (free_w, free_h),
    };
    parent.top_left + Point::new(dx, dy)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{ACCENT, WHITE};

    fn root() -> Root {
        Root::new(Size::new(480, 272))
    }

    fn checkable_button(root: &mut Root, at: Point) -> WidgetId {
        let id = root.create_button(None);
        root.set_size(id, Size::new(100, 40));
        root.align(id, Align::TopLeft, at);
        root.add_flag(id, WidgetFlag::Checkable);
        id
    }

    fn click(root: &mut Root, point: Point) -> Option<UiEvent> {
        root.press(point);
        root.release(point)
    }

    // -------------------------------------------------------------------------
    // Tree Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_create_and_count() {
        let mut root = root();
        let button = root.create_button(None);
        let label = root.create_label(Some(button), "Auto A");
        assert_eq!(root.widget_count(), 2);
        assert_eq!(root.children(None), &[button]);
        assert_eq!(root.children(Some(button)), &[label]);
        assert_eq!(root.parent(label), Some(button));
        assert_eq!(root.text(label), Some("Auto A"));
    }

    #[test]
    fn test_clean_invalidates_handles() {
        let mut root = root();
        let bar = root.create_bar(None);
        root.clean();
        assert!(!root.contains(bar));
        assert_eq!(root.widget_count(), 0);

        // Slot is reused with a new generation
        let label = root.create_label(None, "new");
        assert_ne!(label, bar);
        assert!(root.contains(label));
        assert!(!root.contains(bar));
    }

    #[test]
    fn test_clean_empty_root() {
        let mut root = root();
        root.clean();
        root.clean();
        assert_eq!(root.widget_count(), 0);
        assert!(root.children(None).is_empty());
    }

    #[test]
    fn test_delete_removes_subtree() {
        let mut root = root();
        let button = root.create_button(None);
        let label = root.create_label(Some(button), "x");
        let other = root.create_label(None, "y");
        root.delete(button);
        assert!(!root.contains(button));
        assert!(!root.contains(label));
        assert!(root.contains(other));
        assert_eq!(root.children(None), &[other]);
    }

    #[test]
    #[should_panic(expected = "does not exist")]
    fn test_style_on_dead_widget_panics() {
        let mut root = root();
        let label = root.create_label(None, "x");
        root.clean();
        root.add_style(label, &Style::new().text_color(WHITE), Selector::MAIN);
    }

    #[test]
    fn test_label_text_truncated() {
        let mut root = root();
        let long = "x".repeat(LABEL_CAPACITY * 2);
        let label = root.create_label(None, &long);
        assert_eq!(root.text(label).map(str::len), Some(LABEL_CAPACITY));
    }

    #[test]
    fn test_draw_order_parents_first() {
        let mut root = root();
        let a = root.create_button(None);
        let a_label = root.create_label(Some(a), "a");
        let b = root.create_bar(None);
        assert_eq!(root.draw_order(), vec![a, a_label, b]);
    }

    // -------------------------------------------------------------------------
    // Layout Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_center_with_offset() {
        let mut root = root();
        let bar = root.create_bar(None);
        root.set_size(bar, Size::new(220, 20));
        root.align(bar, Align::Center, Point::new(0, 25));
        assert_eq!(root.area(bar), Rectangle::new(Point::new(130, 151), Size::new(220, 20)));
    }

    #[test]
    fn test_bottom_left_anchor() {
        let mut root = root();
        let button = root.create_button(None);
        root.set_size(button, Size::new(40, 10));
        root.align(button, Align::BottomLeft, Point::new(5, -5));
        assert_eq!(root.area(button).top_left, Point::new(5, 257));
    }

    #[test]
    fn test_child_relative_to_parent() {
        let mut root = root();
        let button = root.create_button(None);
        root.set_size(button, Size::new(200, 50));
        root.align(button, Align::Center, Point::zero());
        let inner = root.create_button(Some(button));
        root.set_size(inner, Size::new(20, 10));
        root.align(inner, Align::Center, Point::zero());
        assert_eq!(root.area(inner).center(), root.area(button).center());
    }

    #[test]
    fn test_label_sizes_to_content() {
        let mut root = root();
        let label = root.create_label(None, "abcd");
        let font = root.resolved_style(label, Part::Main).font.map(|f| (f.character_size, f.character_spacing));
        let (char_size, spacing) = font.unwrap();
        let area = root.area(label);
        assert_eq!(area.size.width, 4 * char_size.width + 3 * spacing);
        assert_eq!(area.size.height, char_size.height);
    }

    // -------------------------------------------------------------------------
    // Style Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_checked_style_applies_only_when_checked() {
        let mut root = root();
        let button = checkable_button(&mut root, Point::zero());
        root.add_style(button, &Style::new().bg_color(ACCENT), Selector::CHECKED);

        assert_ne!(root.resolved_style(button, Part::Main).bg_color, Some(ACCENT));
        root.set_checked(button, true);
        assert_eq!(root.resolved_style(button, Part::Main).bg_color, Some(ACCENT));
    }

    #[test]
    fn test_indicator_style_separate_from_main() {
        let mut root = root();
        let bar = root.create_bar(None);
        root.add_style(bar, &Style::new().bg_color(ACCENT), Selector::INDICATOR);
        assert_eq!(root.resolved_style(bar, Part::Indicator).bg_color, Some(ACCENT));
        assert_ne!(root.resolved_style(bar, Part::Main).bg_color, Some(ACCENT));
    }

    // -------------------------------------------------------------------------
    // Input Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_checkable_toggles() {
        let mut root = root();
        let button = checkable_button(&mut root, Point::zero());
        let inside = Point::new(10, 10);

        assert_eq!(click(&mut root, inside), Some(UiEvent::ValueChanged { widget: button, checked: true }));
        assert!(root.is_checked(button));
        assert_eq!(click(&mut root, inside), Some(UiEvent::ValueChanged { widget: button, checked: false }));
        assert!(!root.is_checked(button));
        assert_eq!(root.take_events().len(), 2);
        assert!(root.take_events().is_empty());
    }

    #[test]
    fn test_release_outside_cancels() {
        let mut root = root();
        let button = checkable_button(&mut root, Point::zero());
        root.press(Point::new(10, 10));
        assert!(root.is_pressed(button));
        assert_eq!(root.release(Point::new(300, 200)), None);
        assert!(!root.is_pressed(button));
        assert!(!root.is_checked(button));
    }

    #[test]
    fn test_second_press_releases_first() {
        let mut root = root();
        let a = checkable_button(&mut root, Point::new(0, 0));
        let b = checkable_button(&mut root, Point::new(0, 50));
        root.add_style(a, &Style::new().bg_color(ACCENT), Selector::PRESSED);

        root.press(Point::new(10, 10));
        root.press(Point::new(10, 60));
        root.release(Point::new(10, 60));

        assert!(!root.is_pressed(a));
        assert!(!root.is_pressed(b));
        assert_ne!(root.resolved_style(a, Part::Main).bg_color, Some(ACCENT));
        assert!(root.is_checked(b));
        assert!(!root.is_checked(a));
    }

    #[test]
    fn test_press_on_empty_area_cancels_pending_press() {
        let mut root = root();
        let button = checkable_button(&mut root, Point::zero());

        root.press(Point::new(10, 10));
        assert_eq!(root.press(Point::new(300, 200)), None);
        assert!(!root.is_pressed(button));

        // The release lands on the button, but the last press did not
        assert_eq!(root.release(Point::new(10, 10)), None);
        assert!(!root.is_checked(button));
    }

    #[test]
    fn test_plain_button_does_not_check() {
        let mut root = root();
        let button = root.create_button(None);
        assert_eq!(click(&mut root, Point::new(5, 5)), None);
        assert!(!root.is_checked(button));
    }

    #[test]
    fn test_radio_group_exclusive() {
        let mut root = root();
        let a = checkable_button(&mut root, Point::new(0, 0));
        let b = checkable_button(&mut root, Point::new(0, 50));
        root.set_radio_group(a, 1);
        root.set_radio_group(b, 1);

        click(&mut root, Point::new(10, 10));
        assert!(root.is_checked(a));
        click(&mut root, Point::new(10, 60));
        assert!(root.is_checked(b));
        assert!(!root.is_checked(a));

        // Re-clicking the checked member keeps it checked
        assert_eq!(click(&mut root, Point::new(10, 60)), None);
        assert!(root.is_checked(b));
    }

    #[test]
    fn test_label_inside_button_does_not_block_hit() {
        let mut root = root();
        let button = checkable_button(&mut root, Point::zero());
        let label = root.create_label(Some(button), "A");
        root.align(label, Align::Center, Point::zero());
        assert_eq!(root.hit_test(root.area(label).center()), Some(button));
    }

    // -------------------------------------------------------------------------
    // Animation Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_animation_drives_bar() {
        let mut root = root();
        let bar = root.create_bar(None);
        root.start_animation(Animation::new(bar, 0, 100, Duration::from_millis(2000)));
        assert!(root.animation_running(bar));
        assert_eq!(root.bar_value(bar), Some(0));

        root.advance(Duration::from_millis(500));
        assert_eq!(root.bar_value(bar), Some(25));

        root.advance(Duration::from_millis(1500));
        assert_eq!(root.bar_value(bar), Some(100));
        assert!(!root.animation_running(bar));
    }

    #[test]
    fn test_clean_drops_animations() {
        let mut root = root();
        let bar = root.create_bar(None);
        root.start_animation(Animation::new(bar, 0, 100, Duration::from_millis(2000)));
        root.clean();
        assert!(!root.animation_running(bar));

        // A new widget reusing the slot is untouched by the old animation
        let fresh = root.create_bar(None);
        root.advance(Duration::from_millis(1000));
        assert_eq!(root.bar_value(fresh), Some(0));
    }

    #[test]
    fn test_dirty_tracking() {
        let mut root = root();
        assert!(root.is_dirty());
        root.mark_clean();
        root.advance(Duration::from_millis(10));
        assert!(!root.is_dirty());
        let bar = root.create_bar(None);
        assert!(root.is_dirty());
        root.mark_clean();
        root.start_animation(Animation::new(bar, 0, 100, Duration::from_millis(100)));
        root.mark_clean();
        root.advance(Duration::from_millis(50));
        assert!(root.is_dirty());
    }
}
