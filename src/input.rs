//! Input Adapter - crossterm mouse events
//!
//! Translates terminal mouse events into the carousel's normalized input
//! operations. Cell coordinates scale to the carousel's px space through
//! `px_per_cell`; wheel ticks become fixed px steps. Vertical wheel
//! motion drives the horizontal track - the carousel is the only
//! scrollable thing under the pointer, so both axes map to it.

use std::time::Instant;

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::carousel::Carousel;

/// Scaling between terminal cells and carousel px.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputMap {
    /// Horizontal px represented by one terminal cell.
    pub px_per_cell: f32,
    /// Px applied per wheel tick.
    pub wheel_step: f32,
}

impl Default for InputMap {
    fn default() -> Self {
        Self {
            px_per_cell: 8.0,
            wheel_step: 48.0,
        }
    }
}

impl InputMap {
    fn pointer_x(&self, column: u16) -> f32 {
        column as f32 * self.px_per_cell
    }
}

/// Route one mouse event into the carousel.
///
/// Returns `true` if the event was consumed, `false` for event kinds the
/// carousel has no use for (hover moves, right/middle buttons).
pub fn route_mouse(
    carousel: &mut Carousel,
    map: &InputMap,
    event: &MouseEvent,
    now: Instant,
) -> bool {
    match event.kind {
        MouseEventKind::ScrollRight | MouseEventKind::ScrollDown => {
            carousel.wheel(map.wheel_step, now);
            true
        }
        MouseEventKind::ScrollLeft | MouseEventKind::ScrollUp => {
            carousel.wheel(-map.wheel_step, now);
            true
        }
        MouseEventKind::Down(MouseButton::Left) => {
            carousel.drag_start(map.pointer_x(event.column), now);
            true
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            carousel.drag_move(map.pointer_x(event.column), now);
            true
        }
        MouseEventKind::Up(MouseButton::Left) => {
            carousel.drag_end(now);
            true
        }
        _ => false,
    }
}
