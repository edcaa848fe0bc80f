//! Screen scheduler: the single polling loop that owns the active screen.
//!
//! # State Machine
//!
//! ```text
//!  Uninitialized ──start()──▶ ShowingInit ──delay due──▶ ShowingSelector
//!        │                        │                            │
//!        └────────────── quit ────┴──────────── quit ──────────┴──▶ Terminated
//! ```
//!
//! `ShowingSelector` has no automatic way out; only a quit request ends it.
//!
//! # Iteration
//!
//! Each [`Scheduler::step`]:
//!
//! 1. Poll the backend for a quit request
//! 2. Process one frame (input, animations, paint)
//! 3. Let the active screen drain UI events
//! 4. Evaluate the transition delay and switch screens if it is due
//! 5. Record frame metrics, yield [`TICK_INTERVAL`], increment the tick
//!
//! The tick counter and the state are only written here.

use std::time::Duration;

use embedded_graphics::prelude::Size;
use tracing::{debug, info};

use crate::backend::Backend;
use crate::clock::Clock;
use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH, TICK_INTERVAL};
use crate::profiling::FrameMetrics;
use crate::routines::{RoutineRegistry, SelectedRoutine};
use crate::screens::{ActiveScreen, AutonSelectScreen, InitScreen, Screen};
use crate::styles::StyleSet;
use crate::widgets::Root;

/// Process exit code for a normal, quit-requested shutdown.
pub const EXIT_OK: u8 = 0;

// =============================================================================
// State Machine
// =============================================================================

/// Scheduler lifecycle.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum SchedulerState {
    #[default]
    Uninitialized,
    ShowingInit,
    ShowingSelector,
    Terminated,
}

impl SchedulerState {
    /// Screen owning the root container in this state.
    pub const fn active_screen(self) -> ActiveScreen {
        match self {
            Self::ShowingInit => ActiveScreen::Init,
            Self::ShowingSelector => ActiveScreen::AutonSelect,
            Self::Uninitialized | Self::Terminated => ActiveScreen::None,
        }
    }
}

/// How long the init screen stays up.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TransitionDelay {
    /// Switch on the iteration whose tick counter reaches this value.
    Ticks(u64),
    /// Switch once this much clock time passed since `start()`.
    Elapsed(Duration),
}

impl TransitionDelay {
    /// Whether the init screen should give way at `tick` / `elapsed`.
    pub const fn is_due(&self, tick: u64, elapsed: Duration) -> bool {
        match *self {
            Self::Ticks(ticks) => tick >= ticks,
            Self::Elapsed(delay) => elapsed.as_nanos() >= delay.as_nanos(),
        }
    }
}

/// Next scheduler state. Quit wins over everything; only the init screen
/// moves on its own.
pub const fn next_state(state: SchedulerState, transition_due: bool, quit: bool) -> SchedulerState {
    match (state, transition_due, quit) {
        (_, _, true) => SchedulerState::Terminated,
        (SchedulerState::ShowingInit, true, false) => SchedulerState::ShowingSelector,
        (state, _, false) => state,
    }
}

// =============================================================================
// Scheduler
// =============================================================================

/// Owner of the root container, the screens and the tick counter.
pub struct Scheduler<B: Backend, C: Clock> {
    backend: B,
    clock: C,
    root: Root,
    styles: StyleSet,
    state: SchedulerState,
    tick: u64,
    delay: TransitionDelay,
    /// Clock reading at `start()`.
    started_at: Duration,
    init: InitScreen,
    selector: AutonSelectScreen,
    selection: SelectedRoutine,
    metrics: FrameMetrics,
}

impl<B: Backend, C: Clock> Scheduler<B, C> {
    /// Scheduler over an already created surface. Nothing is shown until [`start`](Self::start).
    pub fn new(backend: B, clock: C, styles: StyleSet, routines: RoutineRegistry, delay: TransitionDelay) -> Self {
        let selection = SelectedRoutine::new();
        Self {
            backend,
            clock,
            root: Root::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT)),
            styles,
            state: SchedulerState::Uninitialized,
            tick: 0,
            delay,
            started_at: Duration::ZERO,
            init: InitScreen::new(),
            selector: AutonSelectScreen::new(routines, selection.clone()),
            selection,
            metrics: FrameMetrics::new(),
        }
    }

    /// Install the init screen. Does nothing unless still uninitialized.
    pub fn start(&mut self) {
        if self.state != SchedulerState::Uninitialized {
            return;
        }
        self.started_at = self.clock.now();
        self.init.enter(&mut self.root, &self.styles);
        self.state = SchedulerState::ShowingInit;
        info!(delay = ?self.delay, "init screen shown");
    }

    /// Run one loop iteration and return the resulting state.
    pub fn step(&mut self) -> SchedulerState {
        match self.state {
            SchedulerState::Uninitialized => self.start(),
            SchedulerState::Terminated => return self.state,
            SchedulerState::ShowingInit | SchedulerState::ShowingSelector => {}
        }

        if self.backend.quit_requested() {
            self.state = next_state(self.state, false, true);
            info!(tick = self.tick, "quit requested");
            return self.state;
        }

        let frame_start = self.clock.now();
        let painted = self.backend.process_frame(&mut self.root, frame_start);
        match self.state.active_screen() {
            ActiveScreen::Init => self.init.on_frame(&mut self.root),
            ActiveScreen::AutonSelect => self.selector.on_frame(&mut self.root),
            ActiveScreen::None => {}
        }

        let elapsed = frame_start.saturating_sub(self.started_at);
        let next = next_state(self.state, self.delay.is_due(self.tick, elapsed), false);
        if next != self.state {
            self.transition(next);
        }

        let work = self.clock.now().saturating_sub(frame_start);
        self.clock.sleep(TICK_INTERVAL);
        let total = self.clock.now().saturating_sub(frame_start);
        self.metrics.record_frame(total, work, TICK_INTERVAL, painted);

        self.tick += 1;
        self.state
    }

    /// Loop until a quit request, then return the process exit code.
    ///
    /// Starts the scheduler first if nobody did; after `app::boot` that
    /// call is a no-op.
    pub fn run(mut self) -> u8 {
        self.start();
        while self.step() != SchedulerState::Terminated {}
        self.metrics.log_summary(self.clock.now().saturating_sub(self.started_at));
        info!(ticks = self.tick, selection = ?self.selection.get(), "scheduler stopped");
        EXIT_OK
    }

    fn transition(&mut self, next: SchedulerState) {
        debug!(from = ?self.state, to = ?next, tick = self.tick, "screen transition");
        match next {
            SchedulerState::ShowingSelector => self.selector.enter(&mut self.root, &self.styles),
            SchedulerState::ShowingInit => self.init.enter(&mut self.root, &self.styles),
            SchedulerState::Uninitialized | SchedulerState::Terminated => {}
        }
        self.state = next;
        self.metrics.inc_transitions();
        info!(tick = self.tick, screen = ?next.active_screen(), "screen entered");
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    #[inline]
    pub const fn state(&self) -> SchedulerState {
        self.state
    }

    /// Completed loop iterations.
    #[inline]
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    #[inline]
    pub const fn root(&self) -> &Root {
        &self.root
    }

    /// Read handle on the selected routine, for the routine executor.
    pub fn selection(&self) -> SelectedRoutine {
        self.selection.clone()
    }

    #[inline]
    pub const fn styles(&self) -> &StyleSet {
        &self.styles
    }

    #[inline]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable backend access, e.g. to script input between steps.
    #[inline]
    pub const fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    #[inline]
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    #[inline]
    pub const fn init_screen(&self) -> &InitScreen {
        &self.init
    }

    #[inline]
    pub const fn selector_screen(&self) -> &AutonSelectScreen {
        &self.selector
    }

    #[inline]
    pub const fn metrics(&self) -> &FrameMetrics {
        &self.metrics
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
