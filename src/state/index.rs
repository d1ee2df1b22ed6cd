//! Index Tracker Module
//!
//! Converts the pixel scroll offset into a fractional card index and
//! derives two integer anchors from it:
//!
//! - `last_stable` - the card the user is primarily looking at
//! - `next_candidate` - the card about to be fully revealed
//!
//! A hysteresis band (0.15 of a stride on each side) keeps the anchors
//! from flapping while the offset hovers near a card boundary during slow
//! scrolls. The tracker holds no state of its own beyond the cached last
//! result; `compute` is a pure function of scroll state + card count.

use crate::state::scroll::ScrollState;

/// Progress-within-card band that must be crossed before an anchor moves.
pub const HYSTERESIS: f32 = 0.15;

/// The two index anchors derived from the current scroll offset.
///
/// Invariant: both anchors are within `[0, card_count - 1]`, and within 1
/// of each other except mid-fling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexState {
    pub last_stable: usize,
    pub next_candidate: usize,
}

/// Recompute the anchors for an offset.
///
/// Degenerate inputs (zero stride, no cards) return `prev` unchanged: the
/// anchors keep their last good values rather than propagating NaN.
pub fn compute(scroll: &ScrollState, card_count: usize, prev: IndexState) -> IndexState {
    let stride = scroll.stride();
    if stride <= 0.0 || card_count == 0 {
        return prev;
    }

    let max_index = card_count - 1;
    let clamped = scroll.offset().clamp(0.0, scroll.max_scroll());
    let fractional = (clamped / stride).clamp(0.0, max_index as f32 + 0.999);

    let left = fractional.floor() as usize;
    let progress = fractional - left as f32;
    let after = (left + 1).min(max_index);

    IndexState {
        next_candidate: if progress > HYSTERESIS { after } else { left },
        last_stable: if progress < 1.0 - HYSTERESIS { left } else { after },
    }
}

/// Caches the last computed anchors for hysteresis continuity.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexTracker {
    state: IndexState,
}

impl IndexTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> IndexState {
        self.state
    }

    /// Recompute from the current scroll state.
    pub fn update(&mut self, scroll: &ScrollState, card_count: usize) -> IndexState {
        self.state = compute(scroll, card_count, self.state);
        self.state
    }

    /// Drop back to the origin anchors (card list replaced).
    pub fn reset(&mut self) {
        self.state = IndexState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::compute_layout;
    use crate::types::CarouselOptions;

    fn scroll_with(card_count: usize, width: f32) -> ScrollState {
        let opts = CarouselOptions::default();
        let layout = compute_layout(width, &opts).unwrap();
        let mut scroll = ScrollState::new();
        scroll.apply_layout(&layout, card_count, opts.gap);
        scroll
    }

    #[test]
    fn test_degenerate_inputs_keep_previous() {
        let scroll = ScrollState::new(); // zero stride
        let prev = IndexState {
            last_stable: 2,
            next_candidate: 3,
        };
        assert_eq!(compute(&scroll, 5, prev), prev);

        let scroll = scroll_with(5, 320.0);
        assert_eq!(compute(&scroll, 0, prev), prev);
    }

    #[test]
    fn test_anchors_at_origin() {
        let scroll = scroll_with(5, 320.0);
        let state = compute(&scroll, 5, IndexState::default());
        assert_eq!(state.last_stable, 0);
        assert_eq!(state.next_candidate, 0);
    }

    #[test]
    fn test_hysteresis_band() {
        let mut scroll = scroll_with(5, 320.0);
        let stride = scroll.stride();

        // Just inside the band: nothing moves.
        scroll.set_offset(0.10 * stride);
        let state = compute(&scroll, 5, IndexState::default());
        assert_eq!(state.last_stable, 0);
        assert_eq!(state.next_candidate, 0);

        // Past the entry threshold: the next card becomes the candidate,
        // the stable anchor stays put.
        scroll.set_offset(0.20 * stride);
        let state = compute(&scroll, 5, state);
        assert_eq!(state.last_stable, 0);
        assert_eq!(state.next_candidate, 1);

        // Past the exit threshold: the stable anchor follows.
        scroll.set_offset(0.90 * stride);
        let state = compute(&scroll, 5, state);
        assert_eq!(state.last_stable, 1);
        assert_eq!(state.next_candidate, 1);
    }

    #[test]
    fn test_index_bounds_across_range() {
        // Property: any offset within bounds yields anchors in
        // [0, card_count - 1].
        let mut scroll = scroll_with(5, 320.0);
        let max = scroll.max_scroll();
        let mut state = IndexState::default();
        let steps = 200;
        for i in 0..=steps {
            scroll.set_offset(max * i as f32 / steps as f32);
            state = compute(&scroll, 5, state);
            assert!(state.last_stable <= 4);
            assert!(state.next_candidate <= 4);
        }
    }

    #[test]
    fn test_monotone_offsets_never_regress_stable() {
        // Property: a monotonically increasing offset sequence never
        // decreases last_stable.
        let mut scroll = scroll_with(8, 320.0);
        let max = scroll.max_scroll();
        let mut tracker = IndexTracker::new();
        let mut prev_stable = 0usize;
        let steps = 500;
        for i in 0..=steps {
            scroll.set_offset(max * i as f32 / steps as f32);
            let state = tracker.update(&scroll, 8);
            assert!(
                state.last_stable >= prev_stable,
                "last_stable regressed at step {i}"
            );
            prev_stable = state.last_stable;
        }
    }

    #[test]
    fn test_anchors_within_one_of_each_other() {
        let mut scroll = scroll_with(6, 320.0);
        let max = scroll.max_scroll();
        let mut state = IndexState::default();
        for i in 0..=300 {
            scroll.set_offset(max * i as f32 / 300.0);
            state = compute(&scroll, 6, state);
            let gap = state.next_candidate.abs_diff(state.last_stable);
            assert!(gap <= 1, "anchors drifted apart at step {i}");
        }
    }

    #[test]
    fn test_last_card_is_reachable() {
        let mut scroll = scroll_with(5, 320.0);
        scroll.set_offset(scroll.max_scroll());
        let state = compute(&scroll, 5, IndexState::default());
        // At max scroll the final card is at least the candidate.
        assert!(state.next_candidate >= 3);
        assert!(state.next_candidate <= 4);
    }

    #[test]
    fn test_tracker_reset() {
        let mut scroll = scroll_with(5, 320.0);
        let mut tracker = IndexTracker::new();
        scroll.set_offset(scroll.max_scroll());
        tracker.update(&scroll, 5);
        assert!(tracker.state().last_stable > 0);

        tracker.reset();
        assert_eq!(tracker.state(), IndexState::default());
    }
}
