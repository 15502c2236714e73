//! Target crosshairs and the start marker

use nalgebra::{Point2, Vector2};
use raster::Surface;
use vizcore::CoordinateMapper;

use crate::palette::{CROSS_ARM, CROSS_WIDTH, START, START_RADIUS, TARGET};

/// Draw an X-shaped crosshair centered on `center`
pub fn draw_crosshair(canvas: &mut Surface, center: Point2<f64>) {
    let down = Vector2::new(CROSS_ARM, CROSS_ARM);
    let up = Vector2::new(CROSS_ARM, -CROSS_ARM);
    canvas.draw_line(center - down, center + down, CROSS_WIDTH, TARGET);
    canvas.draw_line(center - up, center + up, CROSS_WIDTH, TARGET);
}

/// One crosshair per target, drawn in visitation order
pub fn draw_targets(canvas: &mut Surface, mapper: &CoordinateMapper, targets: &[Point2<f64>]) {
    for target in targets {
        draw_crosshair(canvas, mapper.point_to_screen(target));
    }
}

pub fn draw_start(canvas: &mut Surface, mapper: &CoordinateMapper, start: Point2<f64>) {
    canvas.fill_circle(mapper.point_to_screen(&start), START_RADIUS, START);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::BACKGROUND;

    fn canvas() -> (Surface, CoordinateMapper) {
        (Surface::filled(800, 600, BACKGROUND), CoordinateMapper::new(800, 600))
    }

    #[test]
    fn test_crosshair_centered_on_mapped_target() {
        let (mut surface, mapper) = canvas();
        draw_targets(&mut surface, &mapper, &[Point2::new(0.5, -0.5)]);

        assert_eq!(surface.pixel(600, 150), Some(TARGET));
        // Both diagonals reach out to the arm length.
        assert_eq!(surface.pixel(591, 141), Some(TARGET));
        assert_eq!(surface.pixel(608, 158), Some(TARGET));
        assert_eq!(surface.pixel(608, 141), Some(TARGET));
        assert_eq!(surface.pixel(591, 158), Some(TARGET));
        // Nothing on the axes away from the center.
        assert_eq!(surface.pixel(600, 158), Some(BACKGROUND));
        assert_eq!(surface.pixel(608, 150), Some(BACKGROUND));
        // Nothing past the arms.
        assert_eq!(surface.pixel(614, 164), Some(BACKGROUND));
    }

    #[test]
    fn test_one_marker_per_target() {
        let (mut surface, mapper) = canvas();
        draw_targets(&mut surface, &mapper, &[Point2::new(0.5, -0.5)]);
        let single = surface.count(TARGET);

        let (mut surface, mapper) = canvas();
        draw_targets(
            &mut surface,
            &mapper,
            &[Point2::new(0.5, -0.5), Point2::new(-0.5, 0.5), Point2::new(0.0, 0.0)],
        );
        assert_eq!(surface.count(TARGET), 3 * single);
    }

    #[test]
    fn test_offscreen_target_is_clipped() {
        let (mut surface, mapper) = canvas();
        draw_targets(&mut surface, &mapper, &[Point2::new(3.0, 3.0)]);
        assert_eq!(surface.count(TARGET), 0);
    }

    #[test]
    fn test_start_marker_is_a_disc() {
        let (mut surface, mapper) = canvas();
        draw_start(&mut surface, &mapper, Point2::new(-0.5, 0.0));
        assert_eq!(surface.pixel(200, 300), Some(START));
        assert_eq!(surface.pixel(203, 300), Some(START));
        assert_eq!(surface.pixel(206, 300), Some(BACKGROUND));
        assert!(surface.count(START) > 60 && surface.count(START) < 100);
    }
}
