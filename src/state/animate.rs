//! Scroll Animator Module
//!
//! Eased interpolation of the scroll offset over a fixed duration. The
//! animator owns at most one animation at a time: starting a new one
//! always cancels the one in flight, and cancellation is local and
//! immediate (drop the stored animation, nothing to unwind).
//!
//! The animator does not write the offset itself; the carousel samples it
//! once per tick and applies the result, then recomputes the index
//! anchors, so observers always see offset and indices move together.

use std::time::{Duration, Instant};

use crate::types::SNAP_EPSILON_PX;

/// Ease-in-out quintic. Slow start, fast middle, slow stop.
pub fn ease_in_out_quint(p: f32) -> f32 {
    let p = p.clamp(0.0, 1.0);
    if p < 0.5 {
        16.0 * p * p * p * p * p
    } else {
        1.0 - (-2.0 * p + 2.0).powi(5) / 2.0
    }
}

/// One in-flight animation.
#[derive(Debug, Clone, Copy)]
struct Animation {
    start_offset: f32,
    target: f32,
    start: Instant,
    duration: Duration,
}

impl Animation {
    /// Eased offset at `now`, plus whether the animation has finished.
    fn sample(&self, now: Instant) -> (f32, bool) {
        let elapsed = now.saturating_duration_since(self.start);
        let progress = if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
        };
        let eased = ease_in_out_quint(progress);
        let offset = self.start_offset + (self.target - self.start_offset) * eased;
        (offset, progress >= 1.0)
    }
}

/// What a start request resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// Target was within [`SNAP_EPSILON_PX`]; no frames scheduled.
    AlreadyThere,
    /// Animation is in flight; sample it on every tick.
    Animating,
}

/// Single-slot animation driver.
#[derive(Debug, Default)]
pub struct Animator {
    active: Option<Animation>,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Target of the in-flight animation, if any.
    pub fn target(&self) -> Option<f32> {
        self.active.map(|a| a.target)
    }

    /// Begin animating from `current` to `target`.
    ///
    /// Any prior animation is cancelled first. A target closer than half a
    /// pixel completes immediately without scheduling anything.
    pub fn start(
        &mut self,
        current: f32,
        target: f32,
        duration: Duration,
        now: Instant,
    ) -> StartOutcome {
        self.cancel();

        if (target - current).abs() < SNAP_EPSILON_PX {
            return StartOutcome::AlreadyThere;
        }

        log::trace!("animate: {current:.1} -> {target:.1} over {duration:?}");
        self.active = Some(Animation {
            start_offset: current,
            target,
            start: now,
            duration,
        });
        StartOutcome::Animating
    }

    /// Drop the in-flight animation, if any.
    pub fn cancel(&mut self) {
        if self.active.take().is_some() {
            log::trace!("animate: cancelled");
        }
    }

    /// Sample the active animation at `now`.
    ///
    /// Returns the offset to apply, or `None` when idle. A finished
    /// animation reports its exact target and clears itself.
    pub fn sample(&mut self, now: Instant) -> Option<f32> {
        let animation = self.active?;
        let (offset, done) = animation.sample(now);
        if done {
            self.active = None;
            Some(animation.target)
        } else {
            Some(offset)
        }
    }
}
