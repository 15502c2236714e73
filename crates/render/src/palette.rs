//! Colors and fixed pixel dimensions of the scene

use egui::Color32;

pub const BACKGROUND: Color32 = Color32::BLACK;
pub const FOREGROUND: Color32 = Color32::WHITE;
/// Motor glyph fill while its action entry is on
pub const MOTOR_ACTIVE: Color32 = Color32::from_rgb(0, 255, 0);
/// Motor glyph fill while its action entry is off
pub const MOTOR_INACTIVE: Color32 = Color32::from_rgb(255, 0, 0);
/// Motor number drawn on top of the glyph
pub const MOTOR_LABEL: Color32 = Color32::BLACK;
pub const TARGET: Color32 = Color32::from_rgb(255, 0, 0);
pub const START: Color32 = Color32::from_rgb(0, 255, 0);

/// Side of the square drone body
pub const DRONE_SIZE: f64 = 40.0;
/// Side of a motor glyph before rotation
pub const MOTOR_SIZE: usize = 20;
/// Pixels per vehicle-local unit when laying out motors around the body
pub const MOTOR_LAYOUT_SCALE: f64 = 100.0;
pub const STRUT_WIDTH: f64 = 10.0;
pub const MOTOR_LABEL_SIZE: f32 = 14.0;

/// Half-length of each crosshair diagonal, per axis
pub const CROSS_ARM: f64 = 10.0;
pub const CROSS_WIDTH: f64 = 2.0;
pub const START_RADIUS: f64 = 5.0;
