//! Small on/off thruster drone used to drive the renderer.
//!
//! Everything lives in the normalized [-1, 1] frame the renderer expects,
//! with +y pointing down the screen. A motor pushes along its glyph's apex:
//! straight up at 0 degrees, turning clockwise as the mount angle grows.

use nalgebra::{Point2, Rotation2, Vector2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use vizcore::{
    is_active, AgentSnapshot, DomainParameter, FrameSnapshot, Motor, RunStats, VehicleState,
};

// Integration
const DT: f64 = 1.0 / 60.0;

// Airframe
const MASS: f64 = 1.0;
const INERTIA: f64 = 0.02;
const GRAVITY: f64 = 0.6; // normalized units / s^2
const THRUST: f64 = 0.5; // per motor
const ARM_LENGTH: f64 = 0.25; // world units per unit of motor offset
const LINEAR_DRAG: f64 = 0.8;
const ANGULAR_DRAG: f64 = 2.0;

// Episode
const TARGET_COUNT: usize = 3;
const TARGET_SPREAD: f64 = 0.7;
const START_SPREAD: f64 = 0.5;
const TARGET_RADIUS: f64 = 0.08;
const MAX_FRAMES_WITHOUT_TARGET: u64 = 900;
const TARGET_REWARD: f64 = 10.0;
const CRASH_PENALTY: f64 = -10.0;
const DISTANCE_PENALTY: f64 = 0.01;

// Pilot
const LOOKAHEAD: f64 = 0.4; // s
const TILT_TOLERANCE: f64 = 0.05; // rad
const SIDE_TOLERANCE: f64 = 0.03;
const EPSILON_START: f64 = 0.3;
const EPSILON_DECAY: f64 = 0.9;
const EPSILON_MIN: f64 = 0.01;

/// Left lift, left pusher, right pusher, right lift
pub fn default_motors() -> Vec<Motor> {
    vec![
        Motor::new(-0.6, 0.0, 0.0),
        Motor::new(-0.3, 0.0, -90.0),
        Motor::new(0.3, 0.0, 90.0),
        Motor::new(0.6, 0.0, 0.0),
    ]
}

/// Thrust direction of a motor in the body frame
fn thrust_direction(motor: &Motor) -> Vector2<f64> {
    let (sin, cos) = motor.angle_deg.to_radians().sin_cos();
    Vector2::new(sin, -cos)
}

/// Epsilon-greedy bang-bang controller: mostly flies toward the next target,
/// sometimes switches motors at random.
#[derive(Debug, Clone)]
pub struct Pilot {
    games: u64,
    epsilon: f64,
}

impl Default for Pilot {
    fn default() -> Self {
        Self {
            games: 0,
            epsilon: EPSILON_START,
        }
    }
}

impl Pilot {
    pub fn snapshot(&self) -> AgentSnapshot {
        AgentSnapshot {
            games: self.games,
            epsilon: self.epsilon,
        }
    }

    fn finish_game(&mut self) {
        self.games += 1;
        self.epsilon = (self.epsilon * EPSILON_DECAY).max(EPSILON_MIN);
    }

    /// One activation per motor of [`default_motors`]
    pub fn act(
        &self,
        rng: &mut impl Rng,
        state: &VehicleState,
        target: Option<Point2<f64>>,
    ) -> Vec<f64> {
        if rng.gen_bool(self.epsilon) {
            return (0..4).map(|_| if rng.gen_bool(0.5) { 1.0 } else { 0.0 }).collect();
        }
        let goal = target.map_or(Vector2::zeros(), |t| t.coords);
        let ahead = state.position + state.velocity * LOOKAHEAD;
        let tilt = state.heading + state.angular_velocity * LOOKAHEAD;

        let lift = ahead.y > goal.y;
        let left = (lift && tilt < TILT_TOLERANCE) || tilt < -TILT_TOLERANCE;
        let right = (lift && tilt > -TILT_TOLERANCE) || tilt > TILT_TOLERANCE;
        let push_left = ahead.x > goal.x + SIDE_TOLERANCE;
        let push_right = ahead.x < goal.x - SIDE_TOLERANCE;

        [left, push_left, push_right, right]
            .iter()
            .map(|&on| if on { 1.0 } else { 0.0 })
            .collect()
    }
}

/// What happened during one step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    pub reward: f64,
    pub reached_target: bool,
    pub episode_over: bool,
}

pub struct DemoSim {
    rng: StdRng,
    motors: Vec<Motor>,
    action: Vec<f64>,
    state: VehicleState,
    targets: Vec<Point2<f64>>,
    start: Point2<f64>,
    stats: RunStats,
    pilot: Pilot,
}

impl DemoSim {
    pub fn new(seed: u64) -> Self {
        let motors = default_motors();
        let mut sim = Self {
            rng: StdRng::seed_from_u64(seed),
            action: vec![0.0; motors.len()],
            motors,
            state: VehicleState::default(),
            targets: Vec::new(),
            start: Point2::origin(),
            stats: RunStats::default(),
            pilot: Pilot::default(),
        };
        sim.reset_episode();
        sim
    }

    fn random_point(&mut self, spread: f64) -> Point2<f64> {
        Point2::new(self.rng.gen_range(-spread..spread), self.rng.gen_range(-spread..spread))
    }

    fn reset_episode(&mut self) {
        self.start = self.random_point(START_SPREAD);
        self.targets = (0..TARGET_COUNT).map(|_| self.random_point(TARGET_SPREAD)).collect();
        self.state = VehicleState {
            position: self.start.coords,
            domain_parameters: vec![
                DomainParameter::new("mass", MASS),
                DomainParameter::new("inertia", INERTIA),
                DomainParameter::new("gravity", GRAVITY),
            ],
            ..VehicleState::default()
        };
        self.stats.episode_step = 0;
        self.stats.frames_without_target = 0;
        self.refresh_target_block();
    }

    /// Targets relative to the vehicle, as a learning agent would observe them
    fn refresh_target_block(&mut self) {
        let position = Point2::from(self.state.position);
        self.state.target_block = self.targets.iter().map(|t| Point2::from(t - position)).collect();
    }

    /// Let the pilot pick an action and advance one step
    pub fn step(&mut self) -> StepReport {
        let action = self.pilot.act(&mut self.rng, &self.state, self.targets.first().copied());
        self.step_with(&action)
    }

    /// Advance one step with the given motor activations
    pub fn step_with(&mut self, action: &[f64]) -> StepReport {
        self.action.clear();
        self.action
            .extend((0..self.motors.len()).map(|i| action.get(i).copied().unwrap_or(0.0)));

        let body = Rotation2::new(self.state.heading);
        let mut force = Vector2::new(0.0, GRAVITY * MASS);
        let mut torque = 0.0;
        for (motor, &value) in self.motors.iter().zip(&self.action) {
            if !is_active(value) {
                continue;
            }
            let f = body * thrust_direction(motor) * THRUST;
            let r = body * motor.offset * ARM_LENGTH;
            force += f;
            torque += r.x * f.y - r.y * f.x;
        }

        let state = &mut self.state;
        state.velocity += (force / MASS - state.velocity * LINEAR_DRAG) * DT;
        state.position += state.velocity * DT;
        state.angular_velocity += (torque / INERTIA - state.angular_velocity * ANGULAR_DRAG) * DT;
        state.heading += state.angular_velocity * DT;

        self.stats.episode_step += 1;
        self.stats.frames_without_target += 1;
        let mut report = StepReport {
            reward: 0.0,
            reached_target: false,
            episode_over: false,
        };

        let position = Point2::from(self.state.position);
        if let Some(&target) = self.targets.first() {
            let distance = (target - position).norm();
            report.reward -= distance * DISTANCE_PENALTY;
            if distance < TARGET_RADIUS {
                self.targets.remove(0);
                self.stats.frames_without_target = 0;
                report.reward += TARGET_REWARD;
                report.reached_target = true;
                if self.targets.is_empty() {
                    self.targets = (0..TARGET_COUNT)
                        .map(|_| self.random_point(TARGET_SPREAD))
                        .collect();
                }
            }
        }

        let crashed = position.x.abs() > 1.0 || position.y.abs() > 1.0;
        if crashed {
            report.reward += CRASH_PENALTY;
        }
        self.stats.last_reward = report.reward;

        if crashed || self.stats.frames_without_target > MAX_FRAMES_WITHOUT_TARGET {
            log::debug!(
                "game {} over after {} steps (crashed: {crashed})",
                self.pilot.games,
                self.stats.episode_step
            );
            self.pilot.finish_game();
            self.reset_episode();
            report.episode_over = true;
        } else {
            self.refresh_target_block();
        }
        report
    }

    pub fn snapshot(&self, rendering_enabled: bool) -> FrameSnapshot<'_> {
        FrameSnapshot::new(&self.state, &self.motors, &self.action, &self.targets)
            .with_rendering(rendering_enabled)
            .with_start(self.start)
            .with_stats(self.stats)
            .with_agent(self.pilot.snapshot())
    }

    pub fn state(&self) -> &VehicleState {
        &self.state
    }

    pub fn targets(&self) -> &[Point2<f64>] {
        &self.targets
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }

    pub fn agent(&self) -> AgentSnapshot {
        self.pilot.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const OFF: [f64; 4] = [0.0; 4];
    const LIFT: [f64; 4] = [1.0, 0.0, 0.0, 1.0];

    impl DemoSim {
        /// Place the vehicle, level and at rest
        fn teleport(&mut self, position: Point2<f64>) {
            self.state.position = position.coords;
            self.state.velocity = Vector2::zeros();
            self.state.heading = 0.0;
            self.state.angular_velocity = 0.0;
            self.refresh_target_block();
        }
    }

    fn sim() -> DemoSim {
        let mut sim = DemoSim::new(7);
        sim.teleport(Point2::origin());
        sim
    }

    #[test]
    fn test_unpowered_drone_falls() {
        let mut sim = sim();
        sim.step_with(&OFF);
        assert!(sim.state().velocity.y > 0.0);
        assert_relative_eq!(sim.state().velocity.x, 0.0);
        assert_relative_eq!(sim.state().heading, 0.0);
    }

    #[test]
    fn test_both_lift_motors_climb_without_turning() {
        let mut sim = sim();
        for _ in 0..10 {
            sim.step_with(&LIFT);
        }
        assert!(sim.state().velocity.y < 0.0);
        assert!(sim.state().position.y < 0.0);
        assert_relative_eq!(sim.state().heading, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_single_lift_motor_turns_the_drone() {
        let mut sim = sim();
        sim.step_with(&[0.0, 0.0, 0.0, 1.0]);
        assert!(sim.state().angular_velocity < 0.0);

        let mut sim = self::sim();
        sim.step_with(&[1.0, 0.0, 0.0, 0.0]);
        assert!(sim.state().angular_velocity > 0.0);
    }

    #[test]
    fn test_pushers_translate_sideways_without_torque() {
        let mut sim = sim();
        sim.step_with(&[0.0, 0.0, 1.0, 0.0]);
        assert!(sim.state().velocity.x > 0.0);
        assert_relative_eq!(sim.state().angular_velocity, 0.0);

        let mut sim = self::sim();
        sim.step_with(&[0.0, 1.0, 0.0, 0.0]);
        assert!(sim.state().velocity.x < 0.0);
    }

    #[test]
    fn test_reaching_target_rewards_and_resets_counter() {
        let mut sim = sim();
        let first = sim.targets()[0];
        let remaining = sim.targets().len();
        sim.teleport(first);
        let report = sim.step_with(&LIFT);

        assert!(report.reached_target);
        assert!(report.reward > 9.0);
        assert_eq!(sim.stats().frames_without_target, 0);
        assert_eq!(sim.targets().len(), remaining - 1);
        assert_relative_eq!(sim.stats().last_reward, report.reward);
    }

    #[test]
    fn test_target_block_is_relative_to_vehicle() {
        let mut sim = sim();
        sim.teleport(Point2::new(0.1, -0.2));
        let state = sim.state();
        assert_eq!(state.target_block.len(), sim.targets().len());
        for (relative, target) in state.target_block.iter().zip(sim.targets()) {
            assert_relative_eq!(relative.x, target.x - 0.1);
            assert_relative_eq!(relative.y, target.y + 0.2);
        }
    }

    #[test]
    fn test_leaving_the_arena_ends_the_game() {
        let mut sim = sim();
        let epsilon = sim.agent().epsilon;
        sim.teleport(Point2::new(0.0, 1.0));
        let report = sim.step_with(&OFF);

        assert!(report.episode_over);
        assert!(report.reward <= CRASH_PENALTY);
        assert_eq!(sim.agent().games, 1);
        assert!(sim.agent().epsilon < epsilon);
        assert_eq!(sim.stats().episode_step, 0);
        assert_eq!(sim.targets().len(), TARGET_COUNT);
    }

    #[test]
    fn test_same_seed_same_flight() {
        let mut a = DemoSim::new(42);
        let mut b = DemoSim::new(42);
        for _ in 0..200 {
            assert_eq!(a.step(), b.step());
        }
        assert_eq!(a.state(), b.state());
    }

    #[test]
    fn test_snapshot_is_consistent() {
        let mut sim = DemoSim::new(3);
        sim.step();
        let snapshot = sim.snapshot(true);
        assert!(snapshot.validate().is_ok());
        assert_eq!(snapshot.action.len(), 4);
        assert_eq!(snapshot.state.domain_parameters.len(), 3);
        assert!(snapshot.agent.is_some());
        assert!(!sim.snapshot(false).rendering_enabled);
    }
}
