//! Viewport transform
//!
//! Maps between screen space (device pixels, pan/zoom applied) and canvas
//! space (the coordinate system nodes live in). The forward transform is
//! `screen = canvas * scale + pan`; the inverse is exact up to floating
//! point, so round-tripping a point stays within 1e-6 of where it began.

use archkit_core::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Minimum zoom factor
pub const MIN_ZOOM: f64 = 0.1;
/// Maximum zoom factor
pub const MAX_ZOOM: f64 = 3.0;
/// Multiplicative step used by zoom in/out controls
pub const ZOOM_STEP: f64 = 1.2;

/// Pan/zoom state for a canvas viewport
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Zoom factor, always within [`MIN_ZOOM`]..=[`MAX_ZOOM`]
    pub scale: f64,
    /// Screen-space pan offset
    pub pan_x: f64,
    /// Screen-space pan offset
    pub pan_y: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scale: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }
}

/// Clamp a requested zoom into the legal range.
///
/// Non-finite requests (NaN, infinities from degenerate fit math) reset
/// to 1.0 rather than poisoning the transform.
pub fn clamp_zoom(requested: f64) -> f64 {
    if !requested.is_finite() {
        return 1.0;
    }
    requested.clamp(MIN_ZOOM, MAX_ZOOM)
}

impl Viewport {
    /// Viewport at a given zoom, centered at the origin
    pub fn with_scale(scale: f64) -> Self {
        Self {
            scale: clamp_zoom(scale),
            ..Self::default()
        }
    }

    /// Convert a screen-space point to canvas space
    pub fn screen_to_canvas(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.pan_x) / self.scale,
            (screen.y - self.pan_y) / self.scale,
        )
    }

    /// Convert a canvas-space point to screen space
    pub fn canvas_to_screen(&self, canvas: Point) -> Point {
        Point::new(
            canvas.x * self.scale + self.pan_x,
            canvas.y * self.scale + self.pan_y,
        )
    }

    /// Convert a canvas-space rectangle to screen space
    pub fn rect_to_screen(&self, rect: Rect) -> Rect {
        let origin = self.canvas_to_screen(Point::new(rect.x, rect.y));
        Rect::new(
            origin.x,
            origin.y,
            rect.width * self.scale,
            rect.height * self.scale,
        )
    }

    /// Set the zoom factor, clamped
    pub fn set_zoom(&mut self, scale: f64) {
        self.scale = clamp_zoom(scale);
    }

    /// Zoom in one step
    pub fn zoom_in(&mut self) {
        self.set_zoom(self.scale * ZOOM_STEP);
    }

    /// Zoom out one step
    pub fn zoom_out(&mut self) {
        self.set_zoom(self.scale / ZOOM_STEP);
    }

    /// Zoom toward a screen-space focus point.
    ///
    /// The canvas point under `focus` stays under `focus` after the zoom,
    /// which is what makes wheel-zoom feel anchored to the cursor.
    pub fn zoom_at(&mut self, focus: Point, scale: f64) {
        let anchor = self.screen_to_canvas(focus);
        self.scale = clamp_zoom(scale);
        self.pan_x = focus.x - anchor.x * self.scale;
        self.pan_y = focus.y - anchor.y * self.scale;
    }

    /// Pan by a screen-space delta
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Reset to identity: zoom 1.0, no pan
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Center a canvas-space rectangle in a viewport of the given screen
    /// size without changing zoom.
    pub fn center_on(&mut self, content: Rect, view_width: f64, view_height: f64) {
        let c = content.center();
        self.pan_x = view_width / 2.0 - c.x * self.scale;
        self.pan_y = view_height / 2.0 - c.y * self.scale;
    }

    /// Fit a canvas-space rectangle into a viewport of the given screen
    /// size, with a uniform margin in screen pixels, then center it.
    ///
    /// Degenerate content (zero extent, non-finite bounds) centers at
    /// zoom 1.0 instead of producing an unusable transform.
    pub fn fit_to(&mut self, content: Rect, view_width: f64, view_height: f64, margin: f64) {
        let usable_w = view_width - margin * 2.0;
        let usable_h = view_height - margin * 2.0;
        let fit = if content.width > 0.0 && content.height > 0.0 && usable_w > 0.0 && usable_h > 0.0
        {
            (usable_w / content.width).min(usable_h / content.height)
        } else {
            1.0
        };
        self.scale = clamp_zoom(fit);
        self.center_on(content, view_width, view_height);
    }
}
