//! Per-frame input handed from the simulation to the renderer

use nalgebra::Point2;

use crate::error::{Result, VizError};
use crate::state::{Motor, VehicleState};

/// Counters reported by the simulation every step
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RunStats {
    pub episode_step: u64,
    pub frames_without_target: u64,
    pub last_reward: f64,
}

/// Snapshot of the learning agent driving the vehicle, when there is one
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AgentSnapshot {
    /// Number of finished episodes
    pub games: u64,
    /// Exploration rate in [0, 1]
    pub epsilon: f64,
}

/// True when an action entry switches its motor on
pub fn is_active(value: f64) -> bool {
    value != 0.0
}

/// Read-only view of everything one frame draws.
///
/// Borrowed from the simulation for the duration of a single `render` call.
#[derive(Debug, Clone, Copy)]
pub struct FrameSnapshot<'a> {
    /// When false the render call returns without touching the canvas or the clock
    pub rendering_enabled: bool,
    pub state: &'a VehicleState,
    pub motors: &'a [Motor],
    /// One activation value per motor, index-aligned with `motors`
    pub action: &'a [f64],
    /// Pending targets in visitation order, normalized coordinates
    pub targets: &'a [Point2<f64>],
    pub start_position: Point2<f64>,
    pub stats: RunStats,
    pub agent: Option<AgentSnapshot>,
}

impl<'a> FrameSnapshot<'a> {
    pub fn new(
        state: &'a VehicleState,
        motors: &'a [Motor],
        action: &'a [f64],
        targets: &'a [Point2<f64>],
    ) -> Self {
        Self {
            rendering_enabled: true,
            state,
            motors,
            action,
            targets,
            start_position: Point2::origin(),
            stats: RunStats::default(),
            agent: None,
        }
    }

    pub fn with_rendering(mut self, enabled: bool) -> Self {
        self.rendering_enabled = enabled;
        self
    }

    pub fn with_start(mut self, start: Point2<f64>) -> Self {
        self.start_position = start;
        self
    }

    pub fn with_stats(mut self, stats: RunStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_agent(mut self, agent: AgentSnapshot) -> Self {
        self.agent = Some(agent);
        self
    }

    /// Check the cross-field invariants the renderer relies on
    pub fn validate(&self) -> Result<()> {
        if self.action.len() != self.motors.len() {
            return Err(VizError::MotorActionMismatch {
                motors: self.motors.len(),
                actions: self.action.len(),
            });
        }
        Ok(())
    }
}
