//! Screens shown by the display controller.
//!
//! # Boot Sequence
//!
//! 1. **Init Screen** ([`init`]): "Initializing" title, version string and an
//!    animated progress bar
//! 2. **Autonomous Selector** ([`auton_select`]): one checkable button per
//!    registered routine; the checked one is the selected routine
//!
//! The [`Scheduler`](crate::scheduler::Scheduler) decides when to switch.
//!
//! # Screen Contract
//!
//! - `enter()` builds the screen's widgets on the root after clearing it, so
//!   the root only ever holds one screen's widgets.
//! - Widget handles are rebuilt on every `enter()`; nothing survives from a
//!   previous invocation.
//! - Styles come from the shared [`StyleSet`]; a screen cannot be entered
//!   without one.

pub mod auton_select;
pub mod init;

pub use auton_select::AutonSelectScreen;
pub use init::{InitScreen, InitWidgets};

use crate::styles::StyleSet;
use crate::widgets::Root;

/// A renderable, tear-down-able unit of UI.
pub trait Screen {
    /// Replace whatever is on `root` with this screen's widgets.
    fn enter(&mut self, root: &mut Root, styles: &StyleSet);

    /// Called once per scheduler iteration while this screen is active,
    /// after the toolkit processed the frame. Drains UI events.
    fn on_frame(&mut self, _root: &mut Root) {}
}

/// Which screen currently owns the root container.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum ActiveScreen {
    #[default]
    None,
    Init,
    AutonSelect,
}
