//! Scroll State Module
//!
//! Owns the single scroll offset the whole carousel revolves around:
//! - Offset in px, always clamped to `[0, max_scroll]`
//! - Stride (card width + gap), the distance of exactly one card
//! - Bounds recomputed from layout whenever geometry changes
//!
//! Architecture:
//! - offset = user/animator state, mutated here and nowhere else
//! - stride/max_scroll = derived from the current [`Layout`](crate::layout::Layout)

use crate::layout::Layout;

/// Scroll offset plus the metrics needed to clamp and index it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollState {
    offset: f32,
    stride: f32,
    max_scroll: f32,
    container_width: f32,
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current scroll offset in px.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Card width plus gap; zero until a layout with positive card width
    /// has been applied.
    pub fn stride(&self) -> f32 {
        self.stride
    }

    /// Maximum valid scroll offset.
    pub fn max_scroll(&self) -> f32 {
        self.max_scroll
    }

    pub fn container_width(&self) -> f32 {
        self.container_width
    }

    /// Refresh stride and bounds from a layout, re-clamping the offset.
    pub fn apply_layout(&mut self, layout: &Layout, card_count: usize, gap: f32) {
        self.stride = layout.stride(gap);
        self.max_scroll = layout.max_scroll(card_count, gap);
        self.container_width = layout.width;
        self.offset = self.offset.clamp(0.0, self.max_scroll);
    }

    /// Set the offset directly (clamped).
    pub fn set_offset(&mut self, offset: f32) {
        self.offset = offset.clamp(0.0, self.max_scroll);
    }

    /// Add a delta to the offset (clamped).
    ///
    /// Returns `true` if the offset actually moved, `false` at a boundary.
    pub fn scroll_by(&mut self, delta: f32) -> bool {
        let next = (self.offset + delta).clamp(0.0, self.max_scroll);
        if (next - self.offset).abs() < f32::EPSILON {
            return false;
        }
        self.offset = next;
        true
    }

    /// Clamp an arbitrary target into the valid scroll range.
    pub fn clamp_target(&self, target: f32) -> f32 {
        target.clamp(0.0, self.max_scroll)
    }

    /// Offset that left-aligns `index`, clamped to the scroll range.
    pub fn offset_for_index(&self, index: usize) -> f32 {
        self.clamp_target(index as f32 * self.stride)
    }

    /// Nearest integer card index for the current offset.
    pub fn nearest_index(&self, card_count: usize) -> usize {
        if self.stride <= 0.0 || card_count == 0 {
            return 0;
        }
        let max_index = card_count - 1;
        ((self.offset / self.stride).round().max(0.0) as usize).min(max_index)
    }

    /// Reset to the origin, keeping metrics.
    pub fn reset(&mut self) {
        self.offset = 0.0;
    }
}

/// Offset preserving the card index across a stride change.
///
/// The index the user was on under the old stride is re-anchored at the new
/// stride. The tiny bias keeps an offset sitting exactly on a boundary from
/// flooring down due to float noise.
pub fn preserved_offset(offset: f32, old_stride: f32, new_stride: f32) -> f32 {
    if old_stride <= 0.0 || new_stride <= 0.0 {
        return offset;
    }
    let index = ((offset + 0.001) / old_stride).floor().max(0.0);
    index * new_stride
}
