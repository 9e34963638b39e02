//! Viewport-to-stage geometry mapping.
//!
//! The panel always lays out against the fixed 960x480 stage; this module
//! computes the affine transform that places that stage onto the real
//! display viewport using a cover-fit policy: fill the larger axis and
//! overflow the other, never letterbox.
//!
//! The transform is recomputed only when the hosting viewport actually
//! changes size, not on every render: resizes are rare, state ticks are not,
//! and reapplying a cached transform avoids replaying the rest of the
//! pipeline.

use embedded_graphics::prelude::Point;

use crate::layout::{NUDGE_X, STAGE_HEIGHT, STAGE_WIDTH};

// =============================================================================
// Stage Transform
// =============================================================================

/// Affine transform mapping stage coordinates onto the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StageTransform {
    /// Uniform scale factor (cover-fit).
    pub scale: f32,
    /// Horizontal offset in viewport pixels (includes [`NUDGE_X`]).
    pub dx: f32,
    /// Vertical offset in viewport pixels.
    pub dy: f32,
}

impl StageTransform {
    /// Identity transform for a viewport that exactly matches the stage.
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        dx: NUDGE_X,
        dy: 0.0,
    };

    /// Map a stage point to viewport coordinates.
    pub fn to_viewport(&self, p: Point) -> Point {
        Point::new(
            (p.x as f32 * self.scale + self.dx) as i32,
            (p.y as f32 * self.scale + self.dy) as i32,
        )
    }

    /// Map a viewport point back into stage coordinates (hit testing).
    pub fn to_stage(&self, p: Point) -> Point {
        Point::new(
            ((p.x as f32 - self.dx) / self.scale) as i32,
            ((p.y as f32 - self.dy) / self.scale) as i32,
        )
    }
}

/// Compute the cover-fit transform for a viewport.
///
/// `scale = max(vw / 960, vh / 480)`, centered on both axes, with the fixed
/// horizontal nudge applied after centering.
pub fn compute_transform(viewport_w: u32, viewport_h: u32) -> StageTransform {
    let vw = viewport_w as f32;
    let vh = viewport_h as f32;

    let sx = vw / STAGE_WIDTH as f32;
    let sy = vh / STAGE_HEIGHT as f32;

    // COVER: larger axis wins, the other overflows
    let scale = sx.max(sy);

    StageTransform {
        scale,
        dx: (vw - STAGE_WIDTH as f32 * scale) / 2.0 + NUDGE_X,
        dy: (vh - STAGE_HEIGHT as f32 * scale) / 2.0,
    }
}

// =============================================================================
// Viewport Tracker
// =============================================================================

/// Tracks the observed viewport size and recomputes the transform only on
/// change.
#[derive(Debug, Default)]
pub struct ViewportTracker {
    size: Option<(u32, u32)>,
    transform: StageTransform,
}

impl Default for StageTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ViewportTracker {
    /// Tracker with no observed viewport yet (identity transform).
    pub fn new() -> Self {
        Self::default()
    }

    /// Observe a viewport size. Returns `true` when the size changed and the
    /// transform was recomputed. Zero-sized viewports are ignored, matching
    /// hosts that report empty rects mid-layout.
    pub fn observe(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        if self.size == Some((width, height)) {
            return false;
        }
        self.size = Some((width, height));
        self.transform = compute_transform(width, height);
        true
    }

    /// Current transform (identity until a viewport is observed).
    pub fn transform(&self) -> StageTransform {
        self.transform
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cover_fit_scale_1080p() {
        let t = compute_transform(1920, 1080);
        // max(1920/960, 1080/480) = max(2.0, 2.25)
        assert!((t.scale - 2.25).abs() < 1e-6, "1920x1080 should cover-fit at 2.25");
    }

    #[test]
    fn test_exact_stage_viewport_is_identity_plus_nudge() {
        let t = compute_transform(960, 480);
        assert!((t.scale - 1.0).abs() < 1e-6);
        assert!((t.dx - NUDGE_X).abs() < 1e-6, "dx should be exactly the nudge");
        assert!(t.dy.abs() < 1e-6);
    }

    #[test]
    fn test_cover_never_letterboxes() {
        // A very wide viewport: width axis must win
        let t = compute_transform(2000, 480);
        assert!(t.scale >= 2000.0 / 960.0);
        // Height overflows: dy is negative (content spills off-screen)
        assert!(t.dy < 0.0, "overflowing axis should be centered with negative offset");
    }

    #[test]
    fn test_round_trip_point_mapping() {
        let t = compute_transform(1920, 1080);
        let p = Point::new(604, 92);
        let back = t.to_stage(t.to_viewport(p));
        assert!((back.x - p.x).abs() <= 1, "round-trip x within rounding");
        assert!((back.y - p.y).abs() <= 1, "round-trip y within rounding");
    }

    #[test]
    fn test_tracker_recomputes_only_on_change() {
        let mut tracker = ViewportTracker::new();
        assert!(tracker.observe(960, 480), "first observation recomputes");
        assert!(!tracker.observe(960, 480), "same size must not recompute");
        assert!(tracker.observe(1920, 1080), "new size recomputes");
    }

    #[test]
    fn test_tracker_ignores_zero_sized_viewport() {
        let mut tracker = ViewportTracker::new();
        assert!(!tracker.observe(0, 480));
        assert!(!tracker.observe(960, 0));
        assert_eq!(tracker.transform(), StageTransform::IDENTITY);
    }
}
