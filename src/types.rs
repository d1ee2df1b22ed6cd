//! Core types for card-carousel.
//!
//! These types define the foundation that everything builds on: the card
//! record the host supplies, the scroll behavior selector, and the options
//! struct holding every empirical UI-feel constant as configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

// =============================================================================
// Card
// =============================================================================

/// One renderable unit in the carousel, backed by one content entry.
///
/// Cards are immutable for the lifetime of a carousel instance: the host
/// recreates the carousel (or calls [`crate::Carousel::set_cards`]) when the
/// underlying list changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub title: String,
    pub summary: String,
    /// Category/type label, e.g. "Publication" or "Talk".
    #[serde(rename = "type")]
    pub category: String,
    /// Display date string; the carousel never interprets it.
    pub date: String,
    /// Outbound hyperlink opened via standard navigation.
    pub link: String,
}

impl Card {
    pub fn new(
        title: impl Into<String>,
        summary: impl Into<String>,
        category: impl Into<String>,
        date: impl Into<String>,
        link: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            summary: summary.into(),
            category: category.into(),
            date: date.into(),
            link: link.into(),
        }
    }
}

// =============================================================================
// Scroll behavior
// =============================================================================

/// How a programmatic scroll resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBehavior {
    /// Eased interpolation over the configured transition duration.
    #[default]
    Smooth,
    /// Immediate jump; used before the first layout pass and whenever an
    /// effect must resolve synchronously.
    Instant,
}

// =============================================================================
// Options
// =============================================================================

/// Carousel configuration.
///
/// The drag multiplier and the debounce thresholds are empirical UI-feel
/// constants with no derivation; they are kept as configuration rather than
/// baked in.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselOptions {
    /// Minimum card width in px before a column is dropped.
    pub min_card_width: f32,
    /// Gap between adjacent cards in px.
    pub gap: f32,
    /// Maximum visible column count.
    pub max_columns: u32,
    /// Duration of programmatic smooth scrolls.
    pub transition: Duration,
    /// Grace period added to `transition` before the reconciler releases
    /// its suspension guard.
    pub transition_grace: Duration,
    /// Input-settle debounce: after this much quiet the carousel snaps to
    /// the nearest card.
    pub settle_debounce: Duration,
    /// Longer debounce clearing the user-scrolling flag, re-enabling
    /// layout-driven animation without fighting the user.
    pub user_scroll_debounce: Duration,
    /// Delay between drag release and nearest-card alignment.
    pub drag_release_delay: Duration,
    /// Pointer-drag gain; deliberately over-responsive relative to 1:1.
    pub drag_multiplier: f32,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self {
            min_card_width: 320.0,
            gap: 16.0,
            max_columns: 3,
            transition: Duration::from_millis(450),
            transition_grace: Duration::from_millis(50),
            settle_debounce: Duration::from_millis(220),
            user_scroll_debounce: Duration::from_millis(2000),
            drag_release_delay: Duration::from_millis(50),
            drag_multiplier: 1.5,
        }
    }
}

/// Targets closer than this to the current offset complete without
/// scheduling any animation frames.
pub const SNAP_EPSILON_PX: f32 = 0.5;
