//! Carousel - the embeddable component
//!
//! Ties the state systems together behind one owned struct. The host:
//!
//! 1. constructs it with an ordered card list,
//! 2. feeds container resizes, wheel/drag input and the external region
//!    visibility signal as they happen,
//! 3. calls [`Carousel::tick`] once per frame with the current time,
//! 4. reads the offset / card views back out and draws them.
//!
//! Every handler is a method on this struct: `(state, event) -> state
//! change` plus the offset as the single side-effected value. Nothing in
//! here can fail; degenerate geometry short-circuits to no-ops and all
//! indices and offsets are clamped before they are exposed.

use std::time::Instant;

use crate::layout::{Layout, LayoutObserver, WIDTH_EPSILON};
use crate::state::animate::Animator;
use crate::state::index::{IndexState, IndexTracker};
use crate::state::interaction::{InteractionFlags, InteractionRouter};
use crate::state::reconciler::RegionReconciler;
use crate::state::scroll::{ScrollState, preserved_offset};
use crate::types::{Card, CarouselOptions, ScrollBehavior};

pub struct Carousel {
    cards: Vec<Card>,
    opts: CarouselOptions,
    observer: LayoutObserver,
    scroll: ScrollState,
    tracker: IndexTracker,
    animator: Animator,
    router: InteractionRouter,
    reconciler: RegionReconciler,
    /// Set after the first successful layout pass; until then every
    /// programmatic scroll resolves instantly.
    has_laid_out: bool,
    prev_stride: f32,
}

impl Carousel {
    pub fn new(cards: Vec<Card>, opts: CarouselOptions) -> Self {
        Self {
            cards,
            opts,
            observer: LayoutObserver::new(),
            scroll: ScrollState::new(),
            tracker: IndexTracker::new(),
            animator: Animator::new(),
            router: InteractionRouter::new(),
            reconciler: RegionReconciler::new(),
            has_laid_out: false,
            prev_stride: 0.0,
        }
    }

    pub fn with_defaults(cards: Vec<Card>) -> Self {
        Self::new(cards, CarouselOptions::default())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// Empty carousels render a placeholder and run no layout, scroll or
    /// animation computation at all.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn options(&self) -> &CarouselOptions {
        &self.opts
    }

    /// Last emitted layout, `None` until geometry has been observed.
    pub fn layout(&self) -> Option<Layout> {
        self.observer.current()
    }

    pub fn offset(&self) -> f32 {
        self.scroll.offset()
    }

    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    pub fn indices(&self) -> IndexState {
        self.tracker.state()
    }

    pub fn flags(&self) -> InteractionFlags {
        self.router.flags()
    }

    /// Reactive interaction flags for host render effects.
    pub fn router(&self) -> &InteractionRouter {
        &self.router
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_active()
    }

    /// True while a region transition suppresses user-scroll attribution.
    pub fn is_transitioning(&self) -> bool {
        self.reconciler.suspended()
    }

    // =========================================================================
    // Environment signals
    // =========================================================================

    /// Container width changed.
    ///
    /// When the stride changes meaningfully outside a region transition,
    /// the offset is re-anchored so the card the user was on stays the
    /// card the user is on (instant, not animated).
    pub fn resize(&mut self, width: f32, _now: Instant) {
        if self.is_empty() {
            return;
        }
        let Some(layout) = self.observer.observe(width, &self.opts) else {
            return;
        };

        self.scroll
            .apply_layout(&layout, self.cards.len(), self.opts.gap);

        let stride = self.scroll.stride();
        if self.prev_stride > 0.0
            && stride > 0.0
            && (stride - self.prev_stride).abs() > WIDTH_EPSILON
            && !self.reconciler.suspended()
        {
            self.animator.cancel();
            let offset = preserved_offset(self.scroll.offset(), self.prev_stride, stride);
            self.scroll.set_offset(offset);
        }

        self.tracker.update(&self.scroll, self.cards.len());
        self.prev_stride = stride;
        self.has_laid_out = true;
    }

    /// The external region (sidebar) visibility signal.
    pub fn set_region_visible(&mut self, visible: bool, now: Instant) {
        if self.is_empty() {
            return;
        }
        let indices = self.tracker.update(&self.scroll, self.cards.len());
        if let Some(target) = self.reconciler.observe(visible, indices, &self.opts, now) {
            // A programmatic transition takes over; the user-scroll claim
            // is dropped so the animation is not cancelled by the settle
            // machinery.
            self.router.clear_user_state();
            self.align_to_index(target.index, ScrollBehavior::Smooth, now);
        }
    }

    // =========================================================================
    // User input
    // =========================================================================

    /// Horizontal wheel delta in px. User input always preempts any
    /// in-flight programmatic animation.
    pub fn wheel(&mut self, delta_x: f32, now: Instant) {
        if self.is_empty() {
            return;
        }
        let delta = self.router.wheel(delta_x, &self.opts, now);
        self.animator.cancel();
        self.scroll.scroll_by(delta);
        self.tracker.update(&self.scroll, self.cards.len());
    }

    /// Pointer pressed at `pointer_x` (px, host coordinates).
    pub fn drag_start(&mut self, pointer_x: f32, _now: Instant) {
        if self.is_empty() {
            return;
        }
        self.animator.cancel();
        self.router.drag_start(pointer_x, self.scroll.offset());
    }

    /// Pointer moved while dragging.
    pub fn drag_move(&mut self, pointer_x: f32, now: Instant) {
        if self.is_empty() {
            return;
        }
        if let Some(target) = self.router.drag_move(pointer_x, &self.opts, now) {
            self.animator.cancel();
            self.scroll.set_offset(target);
            self.tracker.update(&self.scroll, self.cards.len());
        }
    }

    /// Pointer released.
    pub fn drag_end(&mut self, now: Instant) {
        if self.is_empty() {
            return;
        }
        self.router.drag_end(&self.opts, now);
    }

    // =========================================================================
    // Programmatic alignment
    // =========================================================================

    /// Scroll so card `index` (clamped) is left-aligned.
    pub fn align_to_index(&mut self, index: usize, behavior: ScrollBehavior, now: Instant) {
        if self.is_empty() || self.scroll.stride() <= 0.0 {
            return;
        }
        let index = index.min(self.cards.len() - 1);
        let target = self.scroll.offset_for_index(index);
        self.animate_to(target, behavior, now);
    }

    /// Snap to whichever card is closest to the current offset.
    pub fn align_to_nearest(&mut self, behavior: ScrollBehavior, now: Instant) {
        if self.is_empty() || self.scroll.stride() <= 0.0 {
            return;
        }
        let index = self.scroll.nearest_index(self.cards.len());
        self.align_to_index(index, behavior, now);
    }

    fn animate_to(&mut self, target: f32, behavior: ScrollBehavior, now: Instant) {
        let target = self.scroll.clamp_target(target);

        // Before the first layout pass there is nothing to ease against.
        if behavior == ScrollBehavior::Instant || !self.has_laid_out {
            self.animator.cancel();
            self.scroll.set_offset(target);
            self.tracker.update(&self.scroll, self.cards.len());
            return;
        }

        self.animator
            .start(self.scroll.offset(), target, self.opts.transition, now);
    }

    // =========================================================================
    // Frame driving
    // =========================================================================

    /// Advance animation and debounce timers to `now`.
    ///
    /// The animation sample and the index recomputation happen in the same
    /// pass so observers never see a torn offset/index pair.
    pub fn tick(&mut self, now: Instant) {
        if self.is_empty() {
            return;
        }

        if let Some(offset) = self.animator.sample(now) {
            self.scroll.set_offset(offset);
            self.tracker.update(&self.scroll, self.cards.len());
        }

        let action = self.router.tick(now, self.reconciler.suspended());
        if action.align_to_nearest {
            self.align_to_nearest(ScrollBehavior::Smooth, now);
        }

        self.reconciler.tick(now);
    }

    // =========================================================================
    // Card list replacement
    // =========================================================================

    /// Replace the card list.
    ///
    /// A card count changing while an animation is in flight resets the
    /// carousel to an unanimated state at the current layout: offset and
    /// anchors return to the origin, pending input state is dropped.
    pub fn set_cards(&mut self, cards: Vec<Card>) {
        self.cards = cards;
        self.animator.cancel();
        self.router.reset();
        self.reconciler.reset();
        self.scroll.reset();
        self.tracker.reset();

        if let Some(layout) = self.observer.current() {
            self.scroll
                .apply_layout(&layout, self.cards.len(), self.opts.gap);
            self.prev_stride = self.scroll.stride();
            if !self.cards.is_empty() {
                self.tracker.update(&self.scroll, self.cards.len());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn cards(n: usize) -> Vec<Card> {
        (0..n)
            .map(|i| {
                Card::new(
                    format!("Update {i}"),
                    format!("Summary for update {i}."),
                    "News",
                    "2025-01-01",
                    format!("https://example.org/{i}"),
                )
            })
            .collect()
    }

    fn laid_out(n: usize, width: f32) -> (Carousel, Instant) {
        let mut carousel = Carousel::with_defaults(cards(n));
        let t0 = Instant::now();
        carousel.resize(width, t0);
        (carousel, t0)
    }

    #[test]
    fn test_empty_list_runs_nothing() {
        let mut carousel = Carousel::with_defaults(vec![]);
        let t0 = Instant::now();

        carousel.resize(640.0, t0);
        carousel.wheel(100.0, t0);
        carousel.set_region_visible(true, t0);
        carousel.tick(t0 + Duration::from_secs(1));

        assert!(carousel.is_empty());
        assert!(carousel.layout().is_none());
        assert_eq!(carousel.offset(), 0.0);
        assert!(!carousel.is_animating());
    }

    #[test]
    fn test_resize_establishes_layout() {
        let (carousel, _) = laid_out(5, 320.0);
        let layout = carousel.layout().unwrap();
        assert_eq!(layout.columns, 1);
        assert_eq!(carousel.scroll().stride(), 336.0);
    }

    #[test]
    fn test_wheel_moves_offset_and_indices() {
        let (mut carousel, t0) = laid_out(5, 320.0);
        let stride = carousel.scroll().stride();

        carousel.wheel(stride * 1.5, t0);
        assert_eq!(carousel.offset(), stride * 1.5);
        let indices = carousel.indices();
        assert_eq!(indices.last_stable, 1);
        assert_eq!(indices.next_candidate, 2);
    }

    #[test]
    fn test_wheel_settles_onto_nearest_card() {
        let (mut carousel, t0) = laid_out(5, 320.0);
        let stride = carousel.scroll().stride();

        carousel.wheel(stride * 1.4, t0);
        // Quiet tick, then the settle debounce fires and starts the snap.
        carousel.tick(t0 + Duration::from_millis(100));
        carousel.tick(t0 + Duration::from_millis(230));
        assert!(carousel.is_animating());

        // After the transition the offset sits exactly on card 1.
        carousel.tick(t0 + Duration::from_millis(230 + 460));
        assert!(!carousel.is_animating());
        assert!((carousel.offset() - stride).abs() < 0.5);
    }

    #[test]
    fn test_user_wheel_preempts_animation() {
        let (mut carousel, t0) = laid_out(5, 320.0);
        let stride = carousel.scroll().stride();

        carousel.align_to_index(3, ScrollBehavior::Smooth, t0);
        assert!(carousel.is_animating());

        carousel.wheel(-10.0, t0 + Duration::from_millis(50));
        assert!(!carousel.is_animating());
        // The abandoned target is never reached.
        carousel.tick(t0 + Duration::from_secs(2));
        assert!(carousel.offset() < 3.0 * stride);
    }

    #[test]
    fn test_drag_roundtrip() {
        let (mut carousel, t0) = laid_out(5, 320.0);

        carousel.drag_start(500.0, t0);
        carousel.drag_move(400.0, t0);
        // 100 px of pointer travel, 1.5x multiplier.
        assert_eq!(carousel.offset(), 150.0);

        carousel.drag_end(t0 + Duration::from_millis(10));
        // Release alignment snaps to card 0 (offset 150 < half stride).
        carousel.tick(t0 + Duration::from_millis(70));
        carousel.tick(t0 + Duration::from_secs(2));
        assert!((carousel.offset() - 0.0).abs() < 0.5);
    }

    #[test]
    fn test_align_before_first_layout_is_instant() {
        let mut carousel = Carousel::with_defaults(cards(5));
        let t0 = Instant::now();
        // No resize yet: stride is zero, alignment is a no-op.
        carousel.align_to_index(2, ScrollBehavior::Smooth, t0);
        assert_eq!(carousel.offset(), 0.0);
        assert!(!carousel.is_animating());
    }

    #[test]
    fn test_resize_preserves_card_index() {
        let (mut carousel, t0) = laid_out(5, 320.0);
        let old_stride = carousel.scroll().stride();

        // Park exactly on card 1.
        carousel.align_to_index(1, ScrollBehavior::Instant, t0);
        assert_eq!(carousel.offset(), old_stride);

        // Grow the container; the stride changes, the index must not.
        carousel.resize(672.0, t0 + Duration::from_millis(100));
        let new_stride = carousel.scroll().stride();
        assert!((new_stride - old_stride).abs() > WIDTH_EPSILON);
        assert!((carousel.offset() - new_stride).abs() < 1e-3);
        assert_eq!(carousel.indices().last_stable, 1);
    }

    #[test]
    fn test_region_toggle_reconciles_to_anchor() {
        let (mut carousel, t0) = laid_out(8, 320.0);
        let stride = carousel.scroll().stride();

        // First observation: captured silently.
        carousel.set_region_visible(false, t0);
        assert!(!carousel.is_transitioning());

        // Sit between cards 2 and 3 (progress 0.5).
        carousel.align_to_index(2, ScrollBehavior::Instant, t0);
        carousel.wheel(stride * 0.5, t0);
        let indices = carousel.indices();
        assert_eq!(indices.last_stable, 2);
        assert_eq!(indices.next_candidate, 3);

        // Sidebar appears: preserve the stable card.
        carousel.set_region_visible(true, t0 + Duration::from_millis(10));
        assert!(carousel.is_transitioning());
        carousel.tick(t0 + Duration::from_millis(480));
        assert!((carousel.offset() - 2.0 * stride).abs() < 0.5);

        // Guard releases after transition + grace.
        carousel.tick(t0 + Duration::from_millis(600));
        assert!(!carousel.is_transitioning());

        // Sidebar hides again: snap to the candidate.
        carousel.wheel(stride * 0.5, t0 + Duration::from_millis(700));
        carousel.set_region_visible(false, t0 + Duration::from_millis(710));
        carousel.tick(t0 + Duration::from_millis(710 + 470));
        assert!((carousel.offset() - 3.0 * stride).abs() < 0.5);
    }

    #[test]
    fn test_settle_suppressed_during_transition() {
        let (mut carousel, t0) = laid_out(8, 320.0);
        let stride = carousel.scroll().stride();

        carousel.set_region_visible(false, t0);
        carousel.wheel(stride * 2.4, t0);
        carousel.set_region_visible(true, t0 + Duration::from_millis(10));
        assert!(carousel.is_transitioning());
        let reconcile_target = carousel.indices().last_stable;

        // The wheel's settle debounce elapses mid-transition; the nearest-
        // card alignment must not fire and fight the reconciler.
        carousel.tick(t0 + Duration::from_millis(240));
        carousel.tick(t0 + Duration::from_millis(700));
        assert!((carousel.offset() - reconcile_target as f32 * stride).abs() < 0.5);
    }

    #[test]
    fn test_set_cards_resets_to_unanimated_state() {
        let (mut carousel, t0) = laid_out(5, 320.0);
        carousel.align_to_index(3, ScrollBehavior::Smooth, t0);
        assert!(carousel.is_animating());

        carousel.set_cards(cards(2));
        assert!(!carousel.is_animating());
        assert_eq!(carousel.offset(), 0.0);
        assert_eq!(carousel.indices(), IndexState::default());
        // Layout survives; the new list starts from a consistent stride.
        assert!(carousel.layout().is_some());
        assert_eq!(carousel.card_count(), 2);
    }

    #[test]
    fn test_set_cards_to_empty_goes_placeholder() {
        let (mut carousel, t0) = laid_out(5, 320.0);
        carousel.set_cards(vec![]);
        assert!(carousel.is_empty());
        carousel.wheel(100.0, t0);
        assert_eq!(carousel.offset(), 0.0);
    }
}
