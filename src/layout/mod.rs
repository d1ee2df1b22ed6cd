//! Layout Observer - continuous column interpolation
//!
//! Watches the container width and derives card sizing from it:
//! - A continuous (fractional) column count clamped to `[1, max_columns]`.
//! - An interpolated card width, blended between the widths for the two
//!   neighboring integer column counts with a smoothstep curve so cards
//!   resize without a visible pop at column boundaries.
//!
//! The observer re-emits only when geometry moves by more than a small
//! epsilon (0.25 px width, 0.05 slots). Sub-pixel jitter from the host's
//! layout engine would otherwise feed back into scroll adjustments.
//!
//! The observer never scrolls anything itself; it only produces [`Layout`]
//! values for the carousel to react to.

use crate::types::CarouselOptions;

// =============================================================================
// Epsilons
// =============================================================================

/// Width / card-width change below this is treated as jitter.
pub const WIDTH_EPSILON: f32 = 0.25;

/// Visible-slot change below this is treated as jitter.
pub const SLOTS_EPSILON: f32 = 0.05;

// =============================================================================
// Layout
// =============================================================================

/// Computed carousel geometry for one container width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    /// Observed container width in px.
    pub width: f32,
    /// Integer column count, `round(visible_slots)` clamped to `[1, max]`.
    pub columns: u32,
    /// Interpolated card width in px. Positive whenever `width` is.
    pub card_width: f32,
    /// Continuous column count before rounding.
    pub visible_slots: f32,
}

impl Layout {
    /// Scroll distance representing exactly one card.
    pub fn stride(&self, gap: f32) -> f32 {
        if self.card_width > 0.0 {
            self.card_width + gap
        } else {
            0.0
        }
    }

    /// Total track width for `count` cards at this geometry.
    pub fn content_width(&self, count: usize, gap: f32) -> f32 {
        if count == 0 {
            return 0.0;
        }
        count as f32 * self.card_width + (count as f32 - 1.0) * gap
    }

    /// Maximum valid scroll offset for `count` cards.
    pub fn max_scroll(&self, count: usize, gap: f32) -> f32 {
        (self.content_width(count, gap) - self.width).max(0.0)
    }
}

/// Compute the layout for a container width.
///
/// Returns `None` for a zero or negative width: the carousel stays in its
/// "not yet laid out" state until the host reports real geometry.
pub fn compute_layout(width: f32, opts: &CarouselOptions) -> Option<Layout> {
    if width <= 0.0 {
        return None;
    }

    let max_columns = opts.max_columns.max(1);
    let gap = opts.gap;
    let raw_columns =
        ((width + gap) / (opts.min_card_width + gap)).clamp(1.0, max_columns as f32);

    let lower_slots = raw_columns.floor() as u32;
    let upper_slots = (lower_slots + 1).min(max_columns);
    let t = raw_columns - lower_slots as f32;
    let smooth_t = smoothstep(t);

    let lower_width = width_for_slots(width, gap, lower_slots.max(1));
    let upper_width = width_for_slots(width, gap, upper_slots);
    let card_width = if lower_slots == upper_slots {
        lower_width
    } else {
        lerp(lower_width, upper_width, smooth_t)
    };

    let columns = (raw_columns.round() as u32).clamp(1, max_columns);

    Some(Layout {
        width,
        columns,
        card_width,
        visible_slots: raw_columns,
    })
}

/// Card width if exactly `slots` columns were shown.
///
/// A single column gets the full container; more columns split the width
/// remaining after the inter-card gaps. Falls back to an even split when
/// the gaps alone exceed the container.
fn width_for_slots(width: f32, gap: f32, slots: u32) -> f32 {
    if slots <= 1 {
        return width;
    }
    let available = width - gap * (slots as f32 - 1.0);
    if available > 0.0 {
        available / slots as f32
    } else {
        width / slots as f32
    }
}

fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

// =============================================================================
// Observer
// =============================================================================

/// Stateful wrapper that suppresses sub-epsilon re-emits.
#[derive(Debug, Default)]
pub struct LayoutObserver {
    current: Option<Layout>,
}

impl LayoutObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last emitted layout, if any width has been observed yet.
    pub fn current(&self) -> Option<Layout> {
        self.current
    }

    /// Feed an observed container width.
    ///
    /// Returns the new layout when it differs meaningfully from the last
    /// emitted one, `None` otherwise (including for zero widths).
    pub fn observe(&mut self, width: f32, opts: &CarouselOptions) -> Option<Layout> {
        let next = compute_layout(width, opts)?;

        if let Some(prev) = self.current {
            let unchanged = (prev.width - next.width).abs() < WIDTH_EPSILON
                && (prev.card_width - next.card_width).abs() < WIDTH_EPSILON
                && (prev.visible_slots - next.visible_slots).abs() < SLOTS_EPSILON
                && prev.columns == next.columns;
            if unchanged {
                return None;
            }
        }

        log::trace!(
            "layout: width={:.1} columns={} card_width={:.1} slots={:.2}",
            next.width,
            next.columns,
            next.card_width,
            next.visible_slots
        );
        self.current = Some(next);
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> CarouselOptions {
        CarouselOptions::default()
    }

    #[test]
    fn test_zero_width_never_emits() {
        let mut observer = LayoutObserver::new();
        assert!(observer.observe(0.0, &opts()).is_none());
        assert!(observer.observe(-100.0, &opts()).is_none());
        assert!(observer.current().is_none());
    }

    #[test]
    fn test_single_column_uses_full_width() {
        let layout = compute_layout(320.0, &opts()).unwrap();
        assert_eq!(layout.columns, 1);
        assert_eq!(layout.card_width, 320.0);
        assert_eq!(layout.visible_slots, 1.0);
    }

    #[test]
    fn test_exact_three_columns() {
        // (W + G) / (M + G) = (992 + 16) / 336 = 3.0
        let layout = compute_layout(992.0, &opts()).unwrap();
        assert_eq!(layout.columns, 3);
        assert!((layout.visible_slots - 3.0).abs() < 1e-4);
        // (992 - 2*16) / 3 = 320
        assert!((layout.card_width - 320.0).abs() < 1e-3);
    }

    #[test]
    fn test_visible_slots_caps_at_max_columns() {
        let layout = compute_layout(5000.0, &opts()).unwrap();
        assert_eq!(layout.columns, 3);
        assert_eq!(layout.visible_slots, 3.0);
        // Full interpolation toward three columns: (5000 - 32) / 3.
        assert!((layout.card_width - (5000.0 - 32.0) / 3.0).abs() < 1e-3);
    }

    #[test]
    fn test_card_width_positive_for_positive_width() {
        for w in [1.0_f32, 10.0, 37.5, 319.9, 320.1, 700.0, 2000.0] {
            let layout = compute_layout(w, &opts()).unwrap();
            assert!(
                layout.card_width > 0.0,
                "card_width must be positive at width {w}"
            );
        }
    }

    #[test]
    fn test_columns_monotonic_in_width() {
        // Property: as width grows, the column count never decreases and
        // stays within [1, 3].
        let mut prev_columns = 0u32;
        let mut w = 1.0_f32;
        while w < 2500.0 {
            let layout = compute_layout(w, &opts()).unwrap();
            assert!(layout.columns >= 1 && layout.columns <= 3);
            assert!(
                layout.columns >= prev_columns,
                "columns decreased at width {w}"
            );
            prev_columns = layout.columns;
            w += 7.3;
        }
        assert_eq!(prev_columns, 3);
    }

    #[test]
    fn test_smoothstep_endpoints() {
        assert_eq!(smoothstep(0.0), 0.0);
        assert_eq!(smoothstep(1.0), 1.0);
        assert_eq!(smoothstep(0.5), 0.5);
        // Quarter points bend toward the ends.
        assert!(smoothstep(0.25) < 0.25);
        assert!(smoothstep(0.75) > 0.75);
    }

    #[test]
    fn test_epsilon_suppresses_jitter() {
        let mut observer = LayoutObserver::new();
        assert!(observer.observe(640.0, &opts()).is_some());
        // Sub-pixel wiggle: no re-emit.
        assert!(observer.observe(640.1, &opts()).is_none());
        assert!(observer.observe(639.9, &opts()).is_none());
        // A real change re-emits.
        assert!(observer.observe(660.0, &opts()).is_some());
    }

    #[test]
    fn test_stride_and_content_width() {
        let layout = compute_layout(320.0, &opts()).unwrap();
        assert_eq!(layout.stride(16.0), 336.0);
        assert_eq!(layout.content_width(0, 16.0), 0.0);
        assert_eq!(layout.content_width(1, 16.0), 320.0);
        assert_eq!(layout.content_width(5, 16.0), 5.0 * 320.0 + 4.0 * 16.0);
        // 5 cards in a 320 px container: everything but one card scrolls.
        let max = layout.max_scroll(5, 16.0);
        assert!((max - (layout.content_width(5, 16.0) - 320.0)).abs() < 1e-3);
    }

    #[test]
    fn test_max_scroll_zero_when_content_fits() {
        let layout = compute_layout(992.0, &opts()).unwrap();
        assert_eq!(layout.max_scroll(2, 16.0), 0.0);
    }
}
