//! State Module - the carousel's runtime state systems
//!
//! - **Scroll** - the single clamped scroll offset and its metrics
//! - **Index** - fractional-index tracking with hysteresis anchors
//! - **Animate** - single-slot eased scroll animation
//! - **Interaction** - wheel/drag normalization, settle debouncing
//! - **Reconciler** - external-region toggles and the suspension guard
//!
//! All state is owned: handlers are methods on the structs that hold the
//! data, there are no ambient globals, and every time-dependent operation
//! takes an explicit `Instant`.

pub mod animate;
pub mod index;
pub mod interaction;
pub mod reconciler;
pub mod scroll;

pub use animate::{Animator, StartOutcome, ease_in_out_quint};
pub use index::{HYSTERESIS, IndexState, IndexTracker};
pub use interaction::{InteractionFlags, InteractionRouter, Phase, SettleAction};
pub use reconciler::{ReconcileTarget, RegionReconciler};
pub use scroll::{ScrollState, preserved_offset};
