use nalgebra::Point2;

use crate::config::CanvasConfig;

/// Affine map from the simulation's normalized [-1, 1] square to canvas pixels.
///
/// The same instance places the drone, the start marker and every target, so
/// all of them share one frame of reference. Inputs outside [-1, 1] are
/// mapped like any other value and simply land off-canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    half_width: f64,
    half_height: f64,
}

impl CoordinateMapper {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            half_width: f64::from(width) / 2.0,
            half_height: f64::from(height) / 2.0,
        }
    }

    pub fn for_canvas(canvas: &CanvasConfig) -> Self {
        Self::new(canvas.width, canvas.height)
    }

    pub fn to_screen(&self, x: f64, y: f64) -> Point2<f64> {
        Point2::new(
            x * self.half_width + self.half_width,
            y * self.half_height + self.half_height,
        )
    }

    pub fn point_to_screen(&self, p: &Point2<f64>) -> Point2<f64> {
        self.to_screen(p.x, p.y)
    }

    /// Inverse of [`to_screen`](Self::to_screen)
    pub fn to_normalized(&self, px: f64, py: f64) -> Point2<f64> {
        Point2::new(
            (px - self.half_width) / self.half_width,
            (py - self.half_height) / self.half_height,
        )
    }
}
