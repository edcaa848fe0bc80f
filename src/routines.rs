//! Autonomous routine registry and the current selection.
//!
//! The registry lists the routines the selector screen offers, one button each.
//! [`SelectedRoutine`] is the read side handed to whatever runs the chosen
//! routine when the match starts; only the selector screen writes to it.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use heapless::{String, Vec};

use crate::config::{LABEL_CAPACITY, MAX_ROUTINES};

// =============================================================================
// Routine Descriptors
// =============================================================================

/// Identifier of a registered routine (its registration index).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoutineId(pub u8);

impl fmt::Display for RoutineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One selectable routine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Routine {
    pub id: RoutineId,
    pub label: String<LABEL_CAPACITY>,
}

/// Registration rejected because the registry is at capacity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegistryFull;

impl fmt::Display for RegistryFull {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "routine registry is full ({MAX_ROUTINES} routines)")
    }
}

impl std::error::Error for RegistryFull {}

// =============================================================================
// Registry
// =============================================================================

/// Fixed-capacity list of routines, in display order.
#[derive(Clone, Debug, Default)]
pub struct RoutineRegistry {
    routines: Vec<Routine, MAX_ROUTINES>,
}

impl RoutineRegistry {
    pub const fn new() -> Self {
        Self { routines: Vec::new() }
    }

    /// Build a registry from labels, stopping with an error at the first one that does not fit.
    pub fn from_labels<I, S>(labels: I) -> Result<Self, RegistryFull>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut registry = Self::new();
        for label in labels {
            registry.register(label.as_ref())?;
        }
        Ok(registry)
    }

    /// Register a routine; labels longer than a label buffer are cut.
    pub fn register(&mut self, label: &str) -> Result<RoutineId, RegistryFull> {
        let id = RoutineId(u8::try_from(self.routines.len()).map_err(|_| RegistryFull)?);
        let mut text = String::new();
        for c in label.chars() {
            if text.push(c).is_err() {
                break;
            }
        }
        self.routines.push(Routine { id, label: text }).map_err(|_| RegistryFull)?;
        Ok(id)
    }

    pub fn get(&self, id: RoutineId) -> Option<&Routine> {
        self.routines.get(usize::from(id.0))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Routine> {
        self.routines.iter()
    }

    pub fn len(&self) -> usize {
        self.routines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routines.is_empty()
    }
}

// =============================================================================
// Selection Handle
// =============================================================================

/// Shared view of the currently selected routine.
///
/// Cloning gives another handle to the same selection. Everything runs on the
/// scheduler thread, so a plain `Cell` is enough.
#[derive(Clone, Debug, Default)]
pub struct SelectedRoutine {
    current: Rc<Cell<Option<RoutineId>>>,
}

impl SelectedRoutine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Routine chosen on the selector screen, if any.
    #[inline]
    pub fn get(&self) -> Option<RoutineId> {
        self.current.get()
    }

    /// Replace the selection. Returns `true` if it changed.
    pub(crate) fn set(&self, id: Option<RoutineId>) -> bool {
        self.current.replace(id) != id
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
