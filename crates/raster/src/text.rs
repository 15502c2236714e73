//! Text rasterization

use std::path::Path;

use ab_glyph::{point, Font, FontVec, PxScale, ScaleFont};
use egui::{Color32, FontDefinitions, FontFamily};
use nalgebra::Point2;
use vizcore::{Result, VizError};

use crate::surface::{with_coverage, Surface};

/// Size of a rendered line of text in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextExtent {
    pub width: f64,
    pub height: f64,
}

/// A font the renderer can measure and draw with.
///
/// `origin` is the top-left corner of the line's box; `size` is the pixel
/// height of the em square.
pub trait Typeface {
    fn measure(&self, text: &str, size: f32) -> TextExtent;

    fn draw(
        &self,
        surface: &mut Surface,
        text: &str,
        origin: Point2<f64>,
        size: f32,
        color: Color32,
    );
}

/// TrueType/OpenType font rasterized with `ab_glyph`
pub struct GlyphFont {
    font: FontVec,
}

impl GlyphFont {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let font = FontVec::try_from_vec(bytes).map_err(|e| VizError::Font(e.to_string()))?;
        Ok(Self { font })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        let font = Self::from_bytes(bytes)?;
        log::info!("loaded font {}", path.as_ref().display());
        Ok(font)
    }

    /// The proportional UI font bundled with egui
    pub fn bundled() -> Result<Self> {
        let definitions = FontDefinitions::default();
        let name = definitions
            .families
            .get(&FontFamily::Proportional)
            .and_then(|names| names.first())
            .ok_or_else(|| VizError::Font("no bundled proportional font".to_string()))?;
        let data = definitions
            .font_data
            .get(name)
            .ok_or_else(|| VizError::Font(format!("bundled font {name} has no data")))?;
        log::debug!("using bundled font {name}");
        Self::from_bytes(data.font.to_vec())
    }

    /// Load `path` when given, the bundled font otherwise
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::bundled(),
        }
    }
}

impl Typeface for GlyphFont {
    fn measure(&self, text: &str, size: f32) -> TextExtent {
        let scaled = self.font.as_scaled(PxScale::from(size));
        let mut width = 0.0;
        let mut previous = None;
        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(prev) = previous {
                width += scaled.kern(prev, id);
            }
            width += scaled.h_advance(id);
            previous = Some(id);
        }
        TextExtent {
            width: f64::from(width),
            height: f64::from(scaled.height()),
        }
    }

    fn draw(
        &self,
        surface: &mut Surface,
        text: &str,
        origin: Point2<f64>,
        size: f32,
        color: Color32,
    ) {
        let scale = PxScale::from(size);
        let scaled = self.font.as_scaled(scale);
        let baseline = scaled.ascent();
        let mut caret = 0.0f32;
        let mut previous = None;

        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, id);
            }
            let glyph = id.with_scale_and_position(scale, point(caret, baseline));
            caret += scaled.h_advance(id);
            previous = Some(id);

            let Some(outlined) = self.font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            let left = origin.x.floor() as i64 + bounds.min.x as i64;
            let top = origin.y.floor() as i64 + bounds.min.y as i64;
            outlined.draw(|gx, gy, coverage| {
                if coverage > 0.0 {
                    let (x, y) = (left + i64::from(gx), top + i64::from(gy));
                    surface.blend_pixel(x, y, with_coverage(color, coverage));
                }
            });
        }
    }
}
