//! Page flip animation
//!
//! The flip is a small state machine that lives outside any timer: the
//! event loop calls [`FlipAnimator::tick`] whenever [`TickClock`] says a
//! tick is due, and tests call it directly.
//!
//! While running, progress grows by a fixed step per tick. The squash
//! factor follows the progress (narrowing for forward flips, widening
//! for backward ones) and the rendered page swaps from source to target
//! at the halfway mark.

use crate::constants::*;
use crate::types::FlipDirection;
use std::time::{Duration, Instant};

/// An in-flight flip
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlipTransition {
    pub direction: FlipDirection,
    pub source: usize,
    pub target: usize,
    ticks: u32,
    step: f32,
}

impl FlipTransition {
    /// Progress in `[0.0, 1.0]`, derived from the tick count so it never drifts
    pub fn progress(&self) -> f32 {
        (self.ticks as f32 * self.step).min(1.0)
    }

    /// Page shown at the current progress
    pub fn render_index(&self) -> usize {
        if self.progress() < FLIP_REVEAL_PROGRESS {
            self.source
        } else {
            self.target
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FlipState {
    #[default]
    Inactive,
    Running(FlipTransition),
}

/// Result of one animation tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlipTick {
    /// An intermediate frame should be shown
    Frame {
        render_index: usize,
        progress: f32,
        scale_x: f32,
    },
    /// The flip reached full progress; the view now belongs to `target`
    Finished { target: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlipAnimator {
    state: FlipState,
    step: f32,
    min_scale: f32,
}

impl FlipAnimator {
    pub fn new(step: f32, min_scale: f32) -> Self {
        Self {
            state: FlipState::Inactive,
            step,
            min_scale,
        }
    }

    pub fn state(&self) -> FlipState {
        self.state
    }

    pub fn transition(&self) -> Option<&FlipTransition> {
        match &self.state {
            FlipState::Running(transition) => Some(transition),
            FlipState::Inactive => None,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, FlipState::Running(_))
    }

    /// Begin a flip from `current` to `target`.
    ///
    /// Returns false without changing state when the target is the current
    /// page or another flip is already in flight.
    pub fn start(&mut self, current: usize, target: usize, direction: FlipDirection) -> bool {
        if self.is_running() {
            log::warn!(
                "Ignoring flip to page {} while another flip is running",
                target + 1
            );
            return false;
        }
        if target == current {
            return false;
        }

        log::debug!(
            "Starting {:?} flip from page {} to page {}",
            direction,
            current + 1,
            target + 1
        );
        self.state = FlipState::Running(FlipTransition {
            direction,
            source: current,
            target,
            ticks: 0,
            step: self.step,
        });
        true
    }

    /// Advance the running flip by one step. Returns `None` when inactive.
    pub fn tick(&mut self) -> Option<FlipTick> {
        let FlipState::Running(transition) = &mut self.state else {
            return None;
        };

        transition.ticks += 1;
        let progress = transition.progress();

        if progress >= 1.0 {
            let target = transition.target;
            self.state = FlipState::Inactive;
            log::debug!("Flip finished on page {}", target + 1);
            return Some(FlipTick::Finished { target });
        }

        let scale_x = flip_scale_x(progress, transition.direction, self.min_scale);
        log::debug!("Flip tick: progress {:.2}, scale {:.2}", progress, scale_x);
        Some(FlipTick::Frame {
            render_index: transition.render_index(),
            progress,
            scale_x,
        })
    }

    /// Drop any running flip; used when the document under it is replaced
    pub fn reset(&mut self) {
        self.state = FlipState::Inactive;
    }
}

impl Default for FlipAnimator {
    fn default() -> Self {
        Self::new(DEFAULT_FLIP_STEP, DEFAULT_MIN_FLIP_SCALE)
    }
}

/// Horizontal squash factor for a flip frame
pub fn flip_scale_x(progress: f32, direction: FlipDirection, min_scale: f32) -> f32 {
    let raw = match direction {
        FlipDirection::Forward => 1.0 - progress,
        FlipDirection::Backward => progress,
    };
    raw.abs().max(min_scale)
}

/// Decides when the next flip tick is due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickClock {
    interval: Duration,
    last_tick: Option<Instant>,
}

impl TickClock {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_tick: None,
        }
    }

    /// Forget the previous tick so the next one fires immediately
    pub fn restart(&mut self) {
        self.last_tick = None;
    }

    pub fn is_due(&self, now: Instant) -> bool {
        match self.last_tick {
            Some(last) => now.saturating_duration_since(last) >= self.interval,
            None => true,
        }
    }

    pub fn mark(&mut self, now: Instant) {
        self.last_tick = Some(now);
    }

    /// Time left until the next tick is due
    pub fn remaining(&self, now: Instant) -> Duration {
        match self.last_tick {
            Some(last) => self
                .interval
                .saturating_sub(now.saturating_duration_since(last)),
            None => Duration::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flip_scale_x() {
        assert!((flip_scale_x(0.3, FlipDirection::Forward, 0.1) - 0.7).abs() < 1e-6);
        assert!((flip_scale_x(0.3, FlipDirection::Backward, 0.1) - 0.3).abs() < 1e-6);
        assert_eq!(flip_scale_x(0.95, FlipDirection::Forward, 0.1), 0.1);
        assert_eq!(flip_scale_x(0.0, FlipDirection::Backward, 0.1), 0.1);
    }

    #[test]
    fn test_tick_clock() {
        let start = Instant::now();
        let mut clock = TickClock::new(Duration::from_millis(30));
        assert!(clock.is_due(start));

        clock.mark(start);
        assert!(!clock.is_due(start + Duration::from_millis(29)));
        assert!(clock.is_due(start + Duration::from_millis(30)));
        assert_eq!(
            clock.remaining(start + Duration::from_millis(10)),
            Duration::from_millis(20)
        );

        clock.restart();
        assert!(clock.is_due(start));
    }
}
