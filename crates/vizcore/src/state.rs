//! Vehicle state as seen by the renderer

use nalgebra::{Point2, Vector2};

use crate::error::{Result, VizError};

/// Number of kinematic scalars at the head of a flat state vector:
/// `x, vx, y, vy, angle, angular_velocity`.
pub const KINEMATIC_LEN: usize = 6;

/// Labels given to domain parameters decoded from a flat state vector, in order.
/// Parameters past the end of this list are labelled `param<k>`.
pub const DOMAIN_LABELS: [&str; 3] = ["mass", "inertia", "gravity"];

/// A named physical constant of the simulated domain (mass, gravity, ...)
#[derive(Debug, Clone, PartialEq)]
pub struct DomainParameter {
    pub label: String,
    pub value: f64,
}

impl DomainParameter {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Kinematic state of the vehicle plus the values the simulation exposes
/// alongside it.
///
/// Positions are normalized to [-1, 1]; the heading is in radians.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleState {
    pub position: Vector2<f64>,
    pub velocity: Vector2<f64>,
    /// Heading in radians
    pub heading: f64,
    /// Heading rate in rad/s
    pub angular_velocity: f64,
    pub domain_parameters: Vec<DomainParameter>,
    /// Target coordinates as encoded in the state vector (possibly relative to the vehicle)
    pub target_block: Vec<Point2<f64>>,
}

impl Default for VehicleState {
    fn default() -> Self {
        Self {
            position: Vector2::zeros(),
            velocity: Vector2::zeros(),
            heading: 0.0,
            angular_velocity: 0.0,
            domain_parameters: Vec::new(),
            target_block: Vec::new(),
        }
    }
}

impl VehicleState {
    /// Decode a flat state vector.
    ///
    /// Layout: six kinematic scalars, then the domain parameters, then the last
    /// `target_scalars` values as (x, y) pairs. The domain block is exactly the
    /// values between the two, so nothing is dropped or read twice.
    pub fn from_flat(values: &[f64], target_scalars: usize) -> Result<Self> {
        if target_scalars % 2 != 0 {
            return Err(VizError::OddTargetList(target_scalars));
        }
        let expected = KINEMATIC_LEN + target_scalars;
        if values.len() < expected {
            return Err(VizError::StateTooShort {
                expected,
                actual: values.len(),
            });
        }

        let target_start = values.len() - target_scalars;
        let domain_parameters = values[KINEMATIC_LEN..target_start]
            .iter()
            .enumerate()
            .map(|(i, &value)| match DOMAIN_LABELS.get(i) {
                Some(label) => DomainParameter::new(*label, value),
                None => DomainParameter::new(format!("param{}", i + 1), value),
            })
            .collect();
        let target_block = values[target_start..]
            .chunks_exact(2)
            .map(|pair| Point2::new(pair[0], pair[1]))
            .collect();

        Ok(Self {
            position: Vector2::new(values[0], values[2]),
            velocity: Vector2::new(values[1], values[3]),
            heading: values[4],
            angular_velocity: values[5],
            domain_parameters,
            target_block,
        })
    }

    /// Heading in degrees
    pub fn heading_degrees(&self) -> f64 {
        self.heading.to_degrees()
    }

    /// Kinematic values in display order: X, vX, Y, vY, angle, vAngle
    pub fn kinematics(&self) -> [f64; KINEMATIC_LEN] {
        [
            self.position.x,
            self.velocity.x,
            self.position.y,
            self.velocity.y,
            self.heading,
            self.angular_velocity,
        ]
    }
}

/// One motor of the vehicle.
///
/// The motor's index in its list is meaningful: it selects the action entry
/// and is shown (1-based) on the motor glyph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motor {
    /// Mount point relative to the vehicle center, in vehicle-local normalized units
    pub offset: Vector2<f64>,
    /// Mount orientation in degrees; 0 points right and positive turns clockwise on screen
    pub angle_deg: f64,
}

impl Motor {
    pub fn new(x: f64, y: f64, angle_deg: f64) -> Self {
        Self {
            offset: Vector2::new(x, y),
            angle_deg,
        }
    }
}

/// Split a flattened `[x0, y0, x1, y1, ...]` target list into points
pub fn targets_from_flat(flat: &[f64]) -> Result<Vec<Point2<f64>>> {
    if flat.len() % 2 != 0 {
        return Err(VizError::OddTargetList(flat.len()));
    }
    Ok(flat
        .chunks_exact(2)
        .map(|pair| Point2::new(pair[0], pair[1]))
        .collect())
}
