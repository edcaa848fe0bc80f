//! Widget toolkit for the robot display.
//!
//! This module organizes the retained UI model into logical submodules:
//!
//! - [`tree`]: the root container, widget handles, layout, input and animation ownership
//! - [`theme`]: default look of each widget kind before styles are added
//! - [`primitives`]: low-level drawing utilities used by [`crate::render`]
//!
//! # Architecture
//!
//! Screens describe themselves by creating widgets on the [`Root`]:
//! 1. Create a widget (label, bar, button), optionally inside a parent
//! 2. Size and align it relative to its parent
//! 3. Add named styles from the [`StyleSet`](crate::styles::StyleSet) per part/state
//!
//! Nothing is drawn at that point. The backend paints the tree once per frame
//! when [`Root::is_dirty`] reports a change, via [`crate::render::draw_root`].

pub mod primitives;
pub mod theme;
mod tree;

pub use tree::{
    Align,
    DEFAULT_BAR_SIZE,
    DEFAULT_BUTTON_SIZE,
    Part,
    Root,
    Selector,
    State,
    UiEvent,
    WidgetFlag,
    WidgetId,
    WidgetKind,
};
