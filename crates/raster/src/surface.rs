//! RGBA pixel buffer and drawing primitives
//!
//! Pixels are stored premultiplied (`egui::Color32`), so composition is a
//! plain `src + dst * (1 - src_alpha)`. Shape primitives sample each pixel at
//! its center; anything outside the buffer is clipped silently.

use std::fmt;

use egui::{Color32, ColorImage};
use nalgebra::Point2;

#[derive(Clone, PartialEq)]
pub struct Surface {
    width: usize,
    height: usize,
    pixels: Vec<Color32>,
}

impl fmt::Debug for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

/// Premultiplied source-over
fn over(src: Color32, dst: Color32) -> Color32 {
    match src.a() {
        255 => src,
        0 => dst,
        a => {
            let keep = 255 - u32::from(a);
            let mix =
                |s: u8, d: u8| (u32::from(s) + (u32::from(d) * keep + 127) / 255).min(255) as u8;
            Color32::from_rgba_premultiplied(
                mix(src.r(), dst.r()),
                mix(src.g(), dst.g()),
                mix(src.b(), dst.b()),
                mix(src.a(), dst.a()),
            )
        }
    }
}

/// Scale a premultiplied color by a coverage value in [0, 1]
pub(crate) fn with_coverage(color: Color32, coverage: f32) -> Color32 {
    let c = coverage.clamp(0.0, 1.0);
    let scale = |v: u8| (f32::from(v) * c).round() as u8;
    Color32::from_rgba_premultiplied(
        scale(color.r()),
        scale(color.g()),
        scale(color.b()),
        scale(color.a()),
    )
}

/// Squared distance from `p` to the segment `a..b`
fn segment_distance_sq(p: Point2<f64>, a: Point2<f64>, b: Point2<f64>) -> f64 {
    let ab = b - a;
    let len_sq = ab.norm_squared();
    let t = if len_sq > 0.0 {
        ((p - a).dot(&ab) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    (p - (a + ab * t)).norm_squared()
}

impl Surface {
    /// A fully transparent surface
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, Color32::TRANSPARENT)
    }

    pub fn filled(width: usize, height: usize, color: Color32) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn size(&self) -> [usize; 2] {
        [self.width, self.height]
    }

    pub fn pixels(&self) -> &[Color32] {
        &self.pixels
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    pub fn pixel(&self, x: i64, y: i64) -> Option<Color32> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    pub fn fill(&mut self, color: Color32) {
        self.pixels.fill(color);
    }

    /// Overwrite one pixel, ignoring alpha
    pub fn put_pixel(&mut self, x: i64, y: i64, color: Color32) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    /// Composite one pixel over the current content
    pub fn blend_pixel(&mut self, x: i64, y: i64, color: Color32) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = over(color, self.pixels[i]);
        }
    }

    /// Pixel index range whose centers fall in `[lo, hi)`, clipped to `0..limit`
    fn span(lo: f64, hi: f64, limit: usize) -> std::ops::Range<i64> {
        let start = (lo - 0.5).ceil().max(0.0) as i64;
        let end = (hi - 0.5).ceil().min(limit as f64).max(0.0) as i64;
        start..end.max(start)
    }

    /// Visit every pixel center inside the clipped bounding box `[min, max]`
    fn for_each_center(
        &mut self,
        min: Point2<f64>,
        max: Point2<f64>,
        mut f: impl FnMut(Point2<f64>) -> Option<Color32>,
    ) {
        for y in Self::span(min.y, max.y + 1.0, self.height) {
            for x in Self::span(min.x, max.x + 1.0, self.width) {
                if let Some(color) = f(Point2::new(x as f64 + 0.5, y as f64 + 0.5)) {
                    self.blend_pixel(x, y, color);
                }
            }
        }
    }

    /// Fill the axis-aligned rectangle with top-left `(x, y)`
    pub fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color32) {
        for py in Self::span(y, y + h, self.height) {
            for px in Self::span(x, x + w, self.width) {
                self.blend_pixel(px, py, color);
            }
        }
    }

    /// Line segment with round caps and the given stroke width
    pub fn draw_line(&mut self, from: Point2<f64>, to: Point2<f64>, width: f64, color: Color32) {
        let half = (width / 2.0).max(0.5);
        let min = Point2::new(from.x.min(to.x) - half, from.y.min(to.y) - half);
        let max = Point2::new(from.x.max(to.x) + half, from.y.max(to.y) + half);
        let limit = half * half;
        self.for_each_center(min, max, |p| {
            (segment_distance_sq(p, from, to) <= limit).then_some(color)
        });
    }

    /// Even-odd fill of a closed polygon
    pub fn fill_polygon(&mut self, points: &[Point2<f64>], color: Color32) {
        if points.len() < 3 {
            return;
        }
        let (min, max) = points.iter().fold(
            (Point2::new(f64::MAX, f64::MAX), Point2::new(f64::MIN, f64::MIN)),
            |(lo, hi), p| {
                (
                    Point2::new(lo.x.min(p.x), lo.y.min(p.y)),
                    Point2::new(hi.x.max(p.x), hi.y.max(p.y)),
                )
            },
        );
        self.for_each_center(min, max, |p| {
            let mut inside = false;
            let mut j = points.len() - 1;
            for i in 0..points.len() {
                let (a, b) = (points[i], points[j]);
                let crosses = (a.y > p.y) != (b.y > p.y);
                if crosses && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
                    inside = !inside;
                }
                j = i;
            }
            inside.then_some(color)
        });
    }

    pub fn fill_circle(&mut self, center: Point2<f64>, radius: f64, color: Color32) {
        let min = Point2::new(center.x - radius, center.y - radius);
        let max = Point2::new(center.x + radius, center.y + radius);
        let limit = radius * radius;
        self.for_each_center(min, max, |p| ((p - center).norm_squared() <= limit).then_some(color));
    }

    /// Composite `src` over this surface with its top-left corner at `(x, y)`
    pub fn blit(&mut self, src: &Surface, x: i64, y: i64) {
        for sy in 0..src.height {
            for sx in 0..src.width {
                let color = src.pixels[sy * src.width + sx];
                if color.a() > 0 {
                    self.blend_pixel(x + sx as i64, y + sy as i64, color);
                }
            }
        }
    }

    /// Upload format for egui textures
    pub fn to_color_image(&self) -> ColorImage {
        let bytes: Vec<u8> = self.pixels.iter().flat_map(|c| c.to_array()).collect();
        ColorImage::from_rgba_premultiplied(self.size(), &bytes)
    }

    /// Row-major, unmultiplied RGBA bytes
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| c.to_srgba_unmultiplied()).collect()
    }

    /// Number of pixels exactly equal to `color`
    pub fn count(&self, color: Color32) -> usize {
        self.pixels.iter().filter(|&&c| c == color).count()
    }
}
