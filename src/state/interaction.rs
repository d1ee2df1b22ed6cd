//! Interaction Router Module
//!
//! Normalizes wheel and pointer-drag input into scroll deltas and owns the
//! scroll-activity bookkeeping around them:
//!
//! - `is_scrolling` - input seen within the settle debounce window (220 ms)
//! - `is_user_scrolling` - input seen within the longer window (2000 ms);
//!   while set, layout-driven animation yields to the user
//! - `is_dragging` - a pointer drag is in progress
//!
//! The flags are reactive signals so a host render effect can track them
//! (e.g. to show a drag hint).
//!
//! State machine:
//!
//! ```text
//! Idle -> Scrolling   on any input (always cancels programmatic animation)
//! Scrolling -> Settling  input stopped, settle debounce running
//! Settling -> Idle    debounce fires, nearest-card alignment issued
//! Settling -> Scrolling  new input before the debounce fires
//! ```
//!
//! The router never mutates the scroll offset; it reports deltas and
//! targets for the carousel to apply, keeping one owner for that value.

use std::time::Instant;

use bitflags::bitflags;
use spark_signals::{Signal, signal};

use crate::types::CarouselOptions;

bitflags! {
    /// Snapshot of the router's activity flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct InteractionFlags: u8 {
        const SCROLLING      = 1 << 0;
        const USER_SCROLLING = 1 << 1;
        const DRAGGING       = 1 << 2;
    }
}

/// Router phase. See the module docs for the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Scrolling,
    Settling,
}

/// Captured at drag start; drag moves are relative to this.
#[derive(Debug, Clone, Copy)]
struct DragOrigin {
    pointer_x: f32,
    offset_at_start: f32,
}

/// What the carousel must do after a tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettleAction {
    /// Snap to the nearest card (settle debounce fired after user input).
    pub align_to_nearest: bool,
}

pub struct InteractionRouter {
    phase: Phase,
    drag: Option<DragOrigin>,
    /// Set by user-attributed input; cleared by the long debounce. Only
    /// manual scrolling triggers settle alignment.
    manual: bool,
    settle_deadline: Option<Instant>,
    user_clear_deadline: Option<Instant>,
    is_scrolling: Signal<bool>,
    is_user_scrolling: Signal<bool>,
    is_dragging: Signal<bool>,
}

impl InteractionRouter {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            drag: None,
            manual: false,
            settle_deadline: None,
            user_clear_deadline: None,
            is_scrolling: signal(false),
            is_user_scrolling: signal(false),
            is_dragging: signal(false),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn flags(&self) -> InteractionFlags {
        let mut flags = InteractionFlags::empty();
        if self.is_scrolling.get() {
            flags |= InteractionFlags::SCROLLING;
        }
        if self.is_user_scrolling.get() {
            flags |= InteractionFlags::USER_SCROLLING;
        }
        if self.is_dragging.get() {
            flags |= InteractionFlags::DRAGGING;
        }
        flags
    }

    /// Reactive `is_scrolling` flag.
    pub fn is_scrolling(&self) -> Signal<bool> {
        self.is_scrolling.clone()
    }

    /// Reactive `is_user_scrolling` flag.
    pub fn is_user_scrolling(&self) -> Signal<bool> {
        self.is_user_scrolling.clone()
    }

    /// Reactive `is_dragging` flag.
    pub fn is_dragging(&self) -> Signal<bool> {
        self.is_dragging.clone()
    }

    /// True while the long debounce still attributes motion to the user.
    pub fn user_active(&self) -> bool {
        self.manual
    }

    /// Record user-attributed input and restart both debounce windows.
    ///
    /// The caller must cancel any programmatic animation before applying
    /// the input's delta; user input always preempts animation.
    pub fn note_user_input(&mut self, opts: &CarouselOptions, now: Instant) {
        self.phase = Phase::Scrolling;
        self.manual = true;
        self.is_scrolling.set(true);
        self.is_user_scrolling.set(true);
        self.settle_deadline = Some(now + opts.settle_debounce);
        self.user_clear_deadline = Some(now + opts.user_scroll_debounce);
    }

    /// Wheel input: the horizontal delta is applied to the offset as-is.
    /// Returns the delta for the carousel to apply.
    pub fn wheel(&mut self, delta_x: f32, opts: &CarouselOptions, now: Instant) -> f32 {
        self.note_user_input(opts, now);
        delta_x
    }

    /// Begin a pointer drag at `pointer_x`, with the offset as it stands.
    pub fn drag_start(&mut self, pointer_x: f32, current_offset: f32) {
        self.drag = Some(DragOrigin {
            pointer_x,
            offset_at_start: current_offset,
        });
        self.is_dragging.set(true);
    }

    /// Pointer moved during a drag.
    ///
    /// Returns the absolute offset to apply, amplified by the drag
    /// multiplier. `None` when no drag is in progress (stray move events).
    pub fn drag_move(
        &mut self,
        pointer_x: f32,
        opts: &CarouselOptions,
        now: Instant,
    ) -> Option<f32> {
        let origin = self.drag?;
        self.note_user_input(opts, now);
        let walk = (origin.pointer_x - pointer_x) * opts.drag_multiplier;
        Some(origin.offset_at_start + walk)
    }

    /// Pointer released. Schedules a short-delay alignment.
    pub fn drag_end(&mut self, opts: &CarouselOptions, now: Instant) {
        if self.drag.take().is_none() {
            return;
        }
        self.is_dragging.set(false);
        self.manual = true;
        self.phase = Phase::Scrolling;
        self.settle_deadline = Some(now + opts.drag_release_delay);
    }

    /// Advance the debounce timers.
    ///
    /// `suspended` is the reconciler's mutual-exclusion guard: while a
    /// reconciler transition is in progress, settle alignment is skipped
    /// so programmatic repositioning is not re-interpreted as user scroll.
    pub fn tick(&mut self, now: Instant, suspended: bool) -> SettleAction {
        let mut action = SettleAction::default();

        match self.phase {
            Phase::Scrolling => {
                // Input stopped (no event between last input and this
                // tick); the debounce is now running.
                if self.settle_deadline.is_some() {
                    self.phase = Phase::Settling;
                }
            }
            Phase::Settling | Phase::Idle => {}
        }

        if let Some(deadline) = self.settle_deadline {
            if now >= deadline {
                self.settle_deadline = None;
                self.is_scrolling.set(false);
                self.phase = Phase::Idle;
                if self.manual && !suspended {
                    log::debug!("settle: aligning to nearest card");
                    action.align_to_nearest = true;
                }
            }
        }

        if let Some(deadline) = self.user_clear_deadline {
            if now >= deadline {
                self.user_clear_deadline = None;
                self.is_user_scrolling.set(false);
                self.manual = false;
            }
        }

        action
    }

    /// Forget pending input state (card list replaced, or the reconciler
    /// takes over and drops the user-scroll claim).
    pub fn clear_user_state(&mut self) {
        self.manual = false;
        self.is_user_scrolling.set(false);
        self.user_clear_deadline = None;
    }

    /// Full reset to idle.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.drag = None;
        self.manual = false;
        self.settle_deadline = None;
        self.user_clear_deadline = None;
        self.is_scrolling.set(false);
        self.is_user_scrolling.set(false);
        self.is_dragging.set(false);
    }
}

impl Default for InteractionRouter {
    fn default() -> Self {
        Self::new()
    }
}
