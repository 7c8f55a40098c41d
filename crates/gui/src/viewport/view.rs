//! 2D pan/zoom viewport for survey (world) coordinates.
//!
//! World x is grid east, world y is grid north. Screen y grows downward, so
//! the y-negation lives here and nowhere else: every caller converts through
//! [`Viewport::world_to_screen`] / [`Viewport::screen_to_world`].

use glam::DVec2;

/// Zoom factor applied per wheel notch
pub const ZOOM_STEP: f64 = 1.1;

/// Scale used when there is no data to fit
const DEFAULT_SCALE: f64 = 5.0;

/// Substitute extent for a degenerate (zero-size) bounding-box axis
const MIN_EXTENT: f64 = 10.0;

const MIN_SCALE: f64 = 1e-4;
const MAX_SCALE: f64 = 1e6;

/// Viewport transform: world units to pixels plus a pixel offset of the
/// world origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale: f64,
    pub offset: DVec2,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            offset: DVec2::ZERO,
        }
    }
}

impl Viewport {
    /// Fit the viewport so every point is visible with `padding` pixels of
    /// margin, preserving aspect ratio.
    ///
    /// An empty point set yields the default scale centered on the viewport;
    /// a degenerate axis is widened to [`MIN_EXTENT`] world units.
    pub fn fit(
        points: impl IntoIterator<Item = DVec2>,
        width: f64,
        height: f64,
        padding: f64,
    ) -> Self {
        let mut iter = points.into_iter();
        let Some(first) = iter.next() else {
            return Self {
                scale: DEFAULT_SCALE,
                offset: DVec2::new(width / 2.0, height / 2.0),
            };
        };

        let (mut min, mut max) = (first, first);
        for p in iter {
            min = min.min(p);
            max = max.max(p);
        }

        let center = (min + max) / 2.0;
        let extent = max - min;
        let data_w = extent.x.max(MIN_EXTENT);
        let data_h = extent.y.max(MIN_EXTENT);

        let scale_x = (width - 2.0 * padding) / data_w;
        let scale_y = (height - 2.0 * padding) / data_h;
        let mut scale = scale_x.min(scale_y);
        if !scale.is_finite() || scale <= 0.0 {
            scale = DEFAULT_SCALE;
        }

        // Place the bounding-box center at the viewport center, with the
        // north axis inverted for screen space.
        let offset = DVec2::new(
            width / 2.0 - center.x * scale,
            height / 2.0 + center.y * scale,
        );

        Self { scale, offset }
    }

    /// World point to screen pixels (negates north)
    pub fn world_to_screen(&self, world: DVec2) -> DVec2 {
        DVec2::new(
            world.x * self.scale + self.offset.x,
            -world.y * self.scale + self.offset.y,
        )
    }

    /// Screen pixels back to world coordinates
    pub fn screen_to_world(&self, screen: DVec2) -> DVec2 {
        DVec2::new(
            (screen.x - self.offset.x) / self.scale,
            -(screen.y - self.offset.y) / self.scale,
        )
    }

    /// Zoom by one step toward or away from the cursor, keeping the world
    /// point under the cursor fixed on screen.
    pub fn zoom_at(&self, cursor: DVec2, zoom_in: bool) -> Self {
        let anchor = self.screen_to_world(cursor);
        let factor = if zoom_in { ZOOM_STEP } else { 1.0 / ZOOM_STEP };
        let scale = (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE);

        let offset = DVec2::new(
            cursor.x - anchor.x * scale,
            cursor.y + anchor.y * scale,
        );

        Self { scale, offset }
    }

    /// Shift the view by a pixel delta
    pub fn pan(&self, delta: DVec2) -> Self {
        Self {
            scale: self.scale,
            offset: self.offset + delta,
        }
    }
}
