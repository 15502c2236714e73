//! Software raster surfaces for the drone renderer
//!
//! This crate provides:
//! - `Surface`, an RGBA pixel buffer with alpha-over composition
//! - Filled rectangles, thick lines, polygons and circles
//! - Rotation with bounding-box growth
//! - Text rasterization through the `Typeface` trait

pub mod surface;
pub mod text;
pub mod transform;

pub use egui::Color32;
pub use surface::Surface;
pub use text::{GlyphFont, TextExtent, Typeface};
pub use transform::rotated_size;
