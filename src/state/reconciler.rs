//! Layout-Change Reconciler Module
//!
//! Watches one boolean signal from the parent shell: whether an external
//! layout region (the collapsible sidebar) is visible. When that toggles,
//! the carousel's available width is about to change, so the reconciler
//! picks an anchor card to keep the view continuous and asks for a smooth
//! scroll to it:
//!
//! - region became visible (less space): keep `last_stable`, the card the
//!   user was looking at
//! - region became hidden (more space): snap to `next_candidate`, the card
//!   about to be fully revealed
//!
//! While the resulting animation runs, the reconciler holds a `suspended`
//! guard. The interaction router checks it before treating motion as
//! user scrolling - the one explicit critical-section-like guard in the
//! carousel. The guard clears `transition + grace` after the toggle.

use std::time::Instant;

use crate::state::index::IndexState;
use crate::types::CarouselOptions;

/// Alignment requested by a region toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileTarget {
    /// Card index to animate to.
    pub index: usize,
}

#[derive(Debug, Default)]
pub struct RegionReconciler {
    /// `None` until the first observation: there is no previous state to
    /// reconcile from, so the first value is captured silently.
    previous: Option<bool>,
    suspended: bool,
    release_deadline: Option<Instant>,
}

impl RegionReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mutual-exclusion guard: a programmatic transition is in progress.
    pub fn suspended(&self) -> bool {
        self.suspended
    }

    /// Feed the current region visibility.
    ///
    /// Returns the target to animate to when the visibility actually
    /// changed; `None` on the first observation and on repeats.
    pub fn observe(
        &mut self,
        visible: bool,
        indices: IndexState,
        opts: &CarouselOptions,
        now: Instant,
    ) -> Option<ReconcileTarget> {
        let previous = match self.previous {
            None => {
                // First mount: capture without animating.
                self.previous = Some(visible);
                return None;
            }
            Some(previous) => previous,
        };

        self.previous = Some(visible);
        if previous == visible {
            return None;
        }

        let index = if visible {
            indices.last_stable
        } else {
            indices.next_candidate
        };

        self.suspended = true;
        self.release_deadline = Some(now + opts.transition + opts.transition_grace);
        log::debug!(
            "reconcile: region {} -> anchor card {index}",
            if visible { "shown" } else { "hidden" }
        );

        Some(ReconcileTarget { index })
    }

    /// Release the guard once the grace period has elapsed.
    pub fn tick(&mut self, now: Instant) {
        if let Some(deadline) = self.release_deadline {
            if now >= deadline {
                self.release_deadline = None;
                self.suspended = false;
            }
        }
    }

    /// Drop any in-progress transition (card list replaced).
    pub fn reset(&mut self) {
        self.suspended = false;
        self.release_deadline = None;
        // The observed visibility survives a reset; only the transition
        // state is discarded.
    }
}
