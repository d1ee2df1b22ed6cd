//! # card-carousel
//!
//! Headless responsive card carousel engine.
//!
//! The carousel presents an ordered, finite list of cards in a
//! horizontally scrollable track whose column count adapts continuously
//! to the container width. It owns all the interaction state - manual
//! wheel/drag scrolling, snap-to-card alignment, a single eased scroll
//! animation at a time, and smooth repositioning when an adjacent layout
//! region (a collapsible sidebar) toggles - while leaving event sourcing
//! and drawing to the host.
//!
//! ## Architecture
//!
//! All state is owned by [`Carousel`]; handlers are methods, time enters
//! through explicit `Instant` parameters, and the scroll offset is the
//! single side-effected value:
//!
//! ```text
//! resize -> LayoutObserver -> ScrollState metrics -> index re-anchor
//! input  -> InteractionRouter -> offset delta -> IndexTracker
//! settle -> Animator (one active animation) -> offset per tick
//! region toggle -> RegionReconciler -> anchor card -> Animator
//! ```
//!
//! ## Modules
//!
//! - [`types`] - `Card`, `ScrollBehavior`, `CarouselOptions`
//! - [`layout`] - container-width observation and column interpolation
//! - [`state`] - scroll, index, animation, interaction and reconciler state
//! - [`carousel`] - the embeddable component
//! - [`input`] - crossterm mouse-event adapter
//! - [`renderer`] - px card views and terminal text rendering
//! - [`content`] - the locale-partitioned updates document

pub mod carousel;
pub mod content;
pub mod input;
pub mod layout;
pub mod renderer;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::{Card, CarouselOptions, ScrollBehavior};

pub use carousel::Carousel;

pub use layout::{Layout, LayoutObserver, compute_layout};

pub use state::{
    Animator, IndexState, IndexTracker, InteractionFlags, InteractionRouter, Phase,
    ReconcileTarget, RegionReconciler, ScrollState, SettleAction, StartOutcome,
};

pub use content::{Locale, UpdatesDoc};

pub use input::{InputMap, route_mouse};

pub use renderer::{CardView, PLACEHOLDER, card_views, render_lines};
