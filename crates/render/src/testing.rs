use egui::Color32;
use nalgebra::Point2;
use raster::{Surface, TextExtent, Typeface};

/// Deterministic stand-in for a real font: every character advances half the
/// font size and non-space characters paint a small block.
pub struct BlockFont;

impl Typeface for BlockFont {
    fn measure(&self, text: &str, size: f32) -> TextExtent {
        TextExtent {
            width: text.chars().count() as f64 * f64::from(size) * 0.5,
            height: f64::from(size),
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
        let advance = f64::from(size) * 0.5;
        for (i, ch) in text.chars().enumerate() {
            if !ch.is_whitespace() {
                let x = origin.x + i as f64 * advance;
                surface.fill_rect(x, origin.y + 2.0, advance - 2.0, f64::from(size) * 0.6, color);
            }
        }
    }
}
