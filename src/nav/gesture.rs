//! Gesture classification
//!
//! A gesture is the displacement between pointer-down and pointer-up. Short
//! gestures are taps; longer ones snap to the dominant axis. Dragging right
//! reveals the section on the left, so the horizontal sign is inverted.

use glam::Vec2;

use super::Direction;
use crate::consts::TAP_THRESHOLD;

/// Classify a displacement using the default tap threshold
#[inline]
pub fn classify(dx: f32, dy: f32) -> Option<Direction> {
    classify_with_threshold(dx, dy, TAP_THRESHOLD)
}

/// Classify a displacement `(dx, dy)` (end minus start, screen coordinates).
///
/// Returns `None` for taps (both components under `threshold`) and for
/// non-finite input. Equal magnitudes fall through to the vertical axis.
pub fn classify_with_threshold(dx: f32, dy: f32, threshold: f32) -> Option<Direction> {
    if !dx.is_finite() || !dy.is_finite() {
        return None;
    }

    let adx = dx.abs();
    let ady = dy.abs();

    if adx.max(ady) < threshold {
        return None;
    }

    if adx > ady {
        if dx > 0.0 {
            Some(Direction::PreviousColumn)
        } else {
            Some(Direction::NextColumn)
        }
    } else if dy > 0.0 {
        Some(Direction::PreviousRow)
    } else {
        Some(Direction::NextRow)
    }
}

/// Remembers where the current pointer interaction started
#[derive(Debug, Clone)]
pub struct GestureTracker {
    start: Vec2,
    threshold: f32,
}

impl Default for GestureTracker {
    fn default() -> Self {
        Self::new(TAP_THRESHOLD)
    }
}

impl GestureTracker {
    /// Start point is the origin until the first pointer-down
    pub fn new(threshold: f32) -> Self {
        Self {
            start: Vec2::ZERO,
            threshold,
        }
    }

    /// Pointer went down (touchstart / mousedown)
    pub fn begin(&mut self, x: f32, y: f32) {
        self.start = Vec2::new(x, y);
    }

    /// Pointer went up (touchend / mouseup); classify the whole gesture
    pub fn finish(&self, x: f32, y: f32) -> Option<Direction> {
        let delta = Vec2::new(x, y) - self.start;
        classify_with_threshold(delta.x, delta.y, self.threshold)
    }
}
