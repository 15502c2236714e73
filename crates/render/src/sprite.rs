//! Drone sprite composition
//!
//! The sprite is built in two rotation stages. Each motor glyph is rotated by
//! its own mount angle and composited onto a canvas-sized working surface
//! around the body, then the whole working surface is rotated by the vehicle
//! heading. The working surface is as large as the canvas so the second
//! rotation can never clip the motors.

use nalgebra::Point2;
use raster::{Surface, Typeface};
use vizcore::{is_active, CanvasConfig, Motor, Result, VizError};

use crate::palette::{
    DRONE_SIZE, FOREGROUND, MOTOR_ACTIVE, MOTOR_INACTIVE, MOTOR_LABEL, MOTOR_LABEL_SIZE,
    MOTOR_LAYOUT_SCALE, MOTOR_SIZE, STRUT_WIDTH,
};

/// The composed drone image, already rotated to the vehicle heading
#[derive(Debug, Clone)]
pub struct DroneSprite {
    image: Surface,
}

impl DroneSprite {
    pub fn width(&self) -> usize {
        self.image.width()
    }

    pub fn height(&self) -> usize {
        self.image.height()
    }

    pub fn image(&self) -> &Surface {
        &self.image
    }

    /// Top-left blit position that centers the sprite on `center`
    pub fn placement(&self, center: Point2<f64>) -> (i64, i64) {
        (
            (center.x - self.width() as f64 / 2.0).floor() as i64,
            (center.y - self.height() as f64 / 2.0).floor() as i64,
        )
    }

    /// Composite the sprite onto `target`, centered on `center`
    pub fn draw_centered(&self, target: &mut Surface, center: Point2<f64>) {
        let (x, y) = self.placement(center);
        target.blit(&self.image, x, y);
    }
}

#[derive(Debug, Clone)]
pub struct DroneSpriteComposer {
    width: usize,
    height: usize,
}

impl DroneSpriteComposer {
    pub fn new(canvas: &CanvasConfig) -> Self {
        Self {
            width: canvas.width as usize,
            height: canvas.height as usize,
        }
    }

    fn center(&self) -> Point2<f64> {
        Point2::new(self.width as f64 / 2.0, self.height as f64 / 2.0)
    }

    /// Where a motor's strut ends on the unrotated working surface
    pub fn motor_anchor(&self, motor: &Motor) -> Point2<f64> {
        self.center() + motor.offset * MOTOR_LAYOUT_SCALE
    }

    /// One motor's triangular glyph with its 1-based number, rotated to the
    /// motor's mount angle.
    pub fn motor_glyph(
        &self,
        index: usize,
        active: bool,
        angle_deg: f64,
        typeface: &dyn Typeface,
    ) -> Surface {
        let size = MOTOR_SIZE as f64;
        let mut glyph = Surface::new(MOTOR_SIZE, MOTOR_SIZE);
        let fill = if active { MOTOR_ACTIVE } else { MOTOR_INACTIVE };
        glyph.fill_polygon(
            &[
                Point2::new(0.0, size),
                Point2::new(size / 2.0, 0.0),
                Point2::new(size, size),
            ],
            fill,
        );

        let label = (index + 1).to_string();
        let extent = typeface.measure(&label, MOTOR_LABEL_SIZE);
        let origin = Point2::new(size / 2.0 - extent.width / 2.0, size / 2.0 - extent.height / 4.0);
        typeface.draw(&mut glyph, &label, origin, MOTOR_LABEL_SIZE, MOTOR_LABEL);

        glyph.rotated(-angle_deg)
    }

    /// Build the sprite for one frame.
    ///
    /// `action` must hold one entry per motor. An empty motor list yields the
    /// body alone.
    pub fn compose(
        &self,
        motors: &[Motor],
        action: &[f64],
        heading_rad: f64,
        typeface: &dyn Typeface,
    ) -> Result<DroneSprite> {
        if motors.len() != action.len() {
            return Err(VizError::MotorActionMismatch {
                motors: motors.len(),
                actions: action.len(),
            });
        }

        let mut working = Surface::new(self.width, self.height);
        let center = self.center();
        working.fill_rect(
            center.x - DRONE_SIZE / 2.0,
            center.y - DRONE_SIZE / 2.0,
            DRONE_SIZE,
            DRONE_SIZE,
            FOREGROUND,
        );

        for motor in motors {
            working.draw_line(center, self.motor_anchor(motor), STRUT_WIDTH, FOREGROUND);
        }

        for (index, (motor, &value)) in motors.iter().zip(action).enumerate() {
            let glyph = self.motor_glyph(index, is_active(value), motor.angle_deg, typeface);
            let anchor = self.motor_anchor(motor);
            let x = (anchor.x - glyph.width() as f64 / 2.0).floor() as i64;
            let y = (anchor.y - glyph.height() as f64 / 2.0).floor() as i64;
            working.blit(&glyph, x, y);
        }

        Ok(DroneSprite {
            image: working.rotated(-heading_rad.to_degrees()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::BlockFont;
    use egui::Color32;
    use std::f64::consts::PI;

    fn motor_color(value: f64) -> Color32 {
        if is_active(value) {
            MOTOR_ACTIVE
        } else {
            MOTOR_INACTIVE
        }
    }

    fn composer() -> DroneSpriteComposer {
        DroneSpriteComposer::new(&CanvasConfig::new(800, 600, 60.0))
    }

    fn quad() -> Vec<Motor> {
        vec![
            Motor::new(0.5, 0.0, 0.0),
            Motor::new(0.0, 0.5, 0.0),
            Motor::new(-0.5, 0.0, 0.0),
            Motor::new(0.0, -0.5, 0.0),
        ]
    }

    /// A point inside the lower-left part of an unrotated glyph centered on
    /// `anchor`, clear of the number label.
    fn glyph_sample(anchor: Point2<f64>) -> (i64, i64) {
        (anchor.x as i64 - 10 + 2, anchor.y as i64 - 10 + 18)
    }

    #[test]
    fn test_glyph_color_follows_action() {
        let c = composer();
        let motors = quad();
        let action = [1.0, 0.0, 1.0, 0.0];
        let sprite = c.compose(&motors, &action, 0.0, &BlockFont).unwrap();
        assert_eq!((sprite.width(), sprite.height()), (800, 600));

        for (motor, &value) in motors.iter().zip(&action) {
            let (x, y) = glyph_sample(c.motor_anchor(motor));
            assert_eq!(
                sprite.image().pixel(x, y),
                Some(motor_color(value)),
                "motor at {:?}",
                motor.offset
            );
        }
        let (x, y) = glyph_sample(c.motor_anchor(&motors[0]));
        assert_eq!(sprite.image().pixel(x, y), Some(MOTOR_ACTIVE));
        let (x, y) = glyph_sample(c.motor_anchor(&motors[1]));
        assert_eq!(sprite.image().pixel(x, y), Some(MOTOR_INACTIVE));
    }

    #[test]
    fn test_action_changes_color_not_shape() {
        let c = composer();
        let motors = quad();
        let a = c.compose(&motors, &[1.0, 0.0, 1.0, 0.0], 0.3, &BlockFont).unwrap();
        let b = c.compose(&motors, &[0.0, 1.0, 0.0, 1.0], 0.3, &BlockFont).unwrap();
        assert_eq!(a.image().size(), b.image().size());
        let alpha = |s: &DroneSprite| s.image().pixels().iter().map(|p| p.a()).collect::<Vec<_>>();
        assert_eq!(alpha(&a), alpha(&b));
        assert_eq!(a.image().count(MOTOR_ACTIVE), b.image().count(MOTOR_INACTIVE));
    }

    #[test]
    fn test_sprite_is_centered_on_screen_position() {
        let sprite = composer().compose(&quad(), &[0.0; 4], 0.0, &BlockFont).unwrap();
        assert_eq!(sprite.placement(Point2::new(400.0, 300.0)), (0, 0));
        assert_eq!(sprite.placement(Point2::new(600.0, 150.0)), (200, -150));
    }

    #[test]
    fn test_bounding_box_under_quarter_turns() {
        let c = composer();
        let motors = quad();
        let size = |heading: f64| {
            let sprite = c.compose(&motors, &[1.0; 4], heading, &BlockFont).unwrap();
            (sprite.width(), sprite.height())
        };
        assert_eq!(size(0.0), (800, 600));
        assert_eq!(size(PI / 2.0), (600, 800));
        assert_eq!(size(PI), (800, 600));
        assert_eq!(size(3.0 * PI / 2.0), (600, 800));
    }

    #[test]
    fn test_rotating_back_recovers_level_sprite() {
        let c = composer();
        let motors = quad();
        let action = [1.0, 0.0, 0.0, 1.0];
        let level = c.compose(&motors, &action, 0.0, &BlockFont).unwrap();
        let turned = c.compose(&motors, &action, PI / 2.0, &BlockFont).unwrap();
        assert_eq!(turned.image().rotated(90.0), *level.image());
    }

    #[test]
    fn test_empty_motor_list_draws_body_only() {
        let sprite = composer().compose(&[], &[], 0.0, &BlockFont).unwrap();
        assert_eq!(sprite.image().count(FOREGROUND), 1600);
        assert_eq!(sprite.image().pixel(400, 300), Some(FOREGROUND));
        assert_eq!(sprite.image().pixel(420, 300), Some(Color32::TRANSPARENT));
    }

    #[test]
    fn test_action_length_must_match_motors() {
        let err = composer().compose(&quad(), &[1.0, 0.0], 0.0, &BlockFont).unwrap_err();
        assert!(matches!(
            err,
            VizError::MotorActionMismatch {
                motors: 4,
                actions: 2
            }
        ));
    }

    #[test]
    fn test_motor_glyph_turns_clockwise_with_mount_angle() {
        let c = composer();
        let upright = c.motor_glyph(0, true, 0.0, &BlockFont);
        assert_eq!(upright.pixel(10, 1), Some(MOTOR_ACTIVE));
        assert_eq!(upright.pixel(1, 1), Some(Color32::TRANSPARENT));

        // 90 degrees puts the apex on the right and the base on the left edge.
        let turned = c.motor_glyph(0, true, 90.0, &BlockFont);
        assert_eq!(turned.size(), [20, 20]);
        assert_eq!(turned.pixel(18, 10), Some(MOTOR_ACTIVE));
        assert_eq!(turned.pixel(1, 10), Some(MOTOR_ACTIVE));
        assert_eq!(turned.pixel(18, 1), Some(Color32::TRANSPARENT));
    }

    #[test]
    fn test_glyph_carries_one_based_label() {
        let glyph = composer().motor_glyph(2, false, 0.0, &BlockFont);
        assert_eq!(glyph.pixel(8, 10), Some(MOTOR_LABEL));
    }
}
