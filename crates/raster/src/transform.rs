//! Surface rotation
//!
//! Positive angles turn the image counterclockwise as seen on screen (y axis
//! pointing down). The output grows to the bounding box of the rotated
//! corners and every destination pixel samples its nearest source pixel, so
//! quarter turns are exact permutations.

use nalgebra::{Rotation2, Vector2};

use crate::surface::Surface;

const SIZE_EPSILON: f64 = 1e-6;
const SAMPLE_EPSILON: f64 = 1e-9;

/// Bounding box of a `width` x `height` image rotated by `angle_deg`
pub fn rotated_size(width: usize, height: usize, angle_deg: f64) -> (usize, usize) {
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    let (w, h) = (width as f64, height as f64);
    let new_w = (w * cos.abs() + h * sin.abs() - SIZE_EPSILON).ceil().max(0.0);
    let new_h = (w * sin.abs() + h * cos.abs() - SIZE_EPSILON).ceil().max(0.0);
    (new_w as usize, new_h as usize)
}

impl Surface {
    /// A new surface holding this one rotated by `angle_deg`
    pub fn rotated(&self, angle_deg: f64) -> Surface {
        let (out_w, out_h) = rotated_size(self.width(), self.height(), angle_deg);
        let mut out = Surface::new(out_w, out_h);

        // Destination -> source in screen coordinates is a math-convention
        // rotation by +angle.
        let inverse = Rotation2::new(angle_deg.to_radians());
        let src_center = Vector2::new(self.width() as f64 / 2.0, self.height() as f64 / 2.0);
        let dst_center = Vector2::new(out_w as f64 / 2.0, out_h as f64 / 2.0);

        for y in 0..out_h {
            for x in 0..out_w {
                let d = Vector2::new(x as f64 + 0.5, y as f64 + 0.5) - dst_center;
                let s = inverse * d + src_center;
                let sx = (s.x + SAMPLE_EPSILON).floor() as i64;
                let sy = (s.y + SAMPLE_EPSILON).floor() as i64;
                if let Some(color) = self.pixel(sx, sy) {
                    out.put_pixel(x as i64, y as i64, color);
                }
            }
        }
        out
    }
}
