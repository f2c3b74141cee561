//! Fixed-step trajectory integrator.
//!
//! Forward Euler: each step updates velocity from the current acceleration,
//! then position from the new velocity, and records the position. The run
//! stops as soon as the forward coordinate reaches the target plane.

use nalgebra::Vector3;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::aerodynamics::AeroModel;
use crate::constants::{
    DEFAULT_MAX_STEPS, DEFAULT_TIME_STEP_S, MAX_PREALLOCATED_POINTS, PLATE_DISTANCE_M,
};
use crate::error::{PitchError, PitchResult};
use crate::physics::PhysicsConfig;
use crate::pitch::PitchSpec;

/// How the final position is read off the trajectory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlaneCrossing {
    /// Last recorded sample, up to one step past the plane
    #[default]
    LastSample,
    /// Linear interpolation between the last two samples to the exact plane
    Interpolated,
}

/// Integration settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationOptions {
    pub time_step: f64,
    pub target_distance: f64,
    pub max_steps: usize,
    pub plane_crossing: PlaneCrossing,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            time_step: DEFAULT_TIME_STEP_S,
            target_distance: PLATE_DISTANCE_M,
            max_steps: DEFAULT_MAX_STEPS,
            plane_crossing: PlaneCrossing::LastSample,
        }
    }
}

impl SimulationOptions {
    pub fn with_time_step(mut self, time_step: f64) -> Self {
        self.time_step = time_step;
        self
    }

    pub fn interpolated(mut self) -> Self {
        self.plane_crossing = PlaneCrossing::Interpolated;
        self
    }

    pub fn validate(&self) -> PitchResult<()> {
        if !self.time_step.is_finite() || self.time_step <= 0.0 {
            return Err(PitchError::invalid(format!(
                "time step must be positive and finite, got {}",
                self.time_step
            )));
        }
        if !self.target_distance.is_finite() || self.target_distance <= 0.0 {
            return Err(PitchError::invalid(format!(
                "target distance must be positive and finite, got {}",
                self.target_distance
            )));
        }
        if self.max_steps == 0 {
            return Err(PitchError::invalid("max steps must be at least 1"));
        }
        Ok(())
    }
}

/// Position and velocity of the ball at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinematicState {
    pub time: f64,
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
}

impl KinematicState {
    pub fn initial(spec: &PitchSpec) -> Self {
        KinematicState {
            time: 0.0,
            position: spec.release_position,
            velocity: spec.initial_velocity(),
        }
    }

    fn is_finite(&self) -> bool {
        self.position.iter().all(|c| c.is_finite()) && self.velocity.iter().all(|c| c.is_finite())
    }
}

/// Recorded flight path: one position per step, starting at release
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    points: Vec<Vector3<f64>>,
    time_step: f64,
    final_velocity: Vector3<f64>,
}

impl Trajectory {
    fn new(start: Vector3<f64>, time_step: f64, capacity: usize) -> Self {
        let mut points = Vec::with_capacity(capacity);
        points.push(start);
        Trajectory {
            points,
            time_step,
            final_velocity: Vector3::zeros(),
        }
    }

    fn push(&mut self, position: Vector3<f64>) {
        self.points.push(position);
    }

    pub fn points(&self) -> &[Vector3<f64>] {
        &self.points
    }

    /// Number of integration steps taken (points minus the release point)
    pub fn steps(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    /// Time at sample `index`
    pub fn time_at(&self, index: usize) -> f64 {
        index as f64 * self.time_step
    }

    pub fn time_of_flight(&self) -> f64 {
        self.time_at(self.steps())
    }

    pub fn first(&self) -> Option<&Vector3<f64>> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&Vector3<f64>> {
        self.points.last()
    }

    pub fn final_velocity(&self) -> Vector3<f64> {
        self.final_velocity
    }
}

/// Height and lateral offset of the ball at the target plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinalPosition {
    /// Vertical coordinate (m)
    pub y: f64,
    /// Lateral coordinate (m)
    pub z: f64,
}

impl FinalPosition {
    pub fn height(&self) -> f64 {
        self.y
    }

    pub fn lateral(&self) -> f64 {
        self.z
    }

    /// Rounded to centimetres
    pub fn rounded(&self) -> FinalPosition {
        FinalPosition {
            y: (self.y * 100.0).round() / 100.0,
            z: (self.z * 100.0).round() / 100.0,
        }
    }
}

/// Simulate a pitch with the default physics and options
pub fn simulate(spec: &PitchSpec) -> PitchResult<(Trajectory, FinalPosition)> {
    simulate_with(spec, &PhysicsConfig::default(), &SimulationOptions::default())
}

/// Simulate a pitch from release to the target plane
pub fn simulate_with(
    spec: &PitchSpec,
    physics: &PhysicsConfig,
    options: &SimulationOptions,
) -> PitchResult<(Trajectory, FinalPosition)> {
    spec.validate()?;
    physics.validate()?;
    options.validate()?;

    let model = AeroModel::new(physics, spec);
    let dt = options.time_step;
    let target = options.target_distance;

    log::debug!(
        "Simulating {} pitch: {:.2} m/s, {:.0} rpm, dt={}",
        spec.handedness,
        spec.speed_mps,
        spec.spin_rate_rpm,
        dt
    );

    let mut state = KinematicState::initial(spec);

    // Rough capacity from the initial forward speed
    let forward_speed = state.velocity.x;
    let estimate = ((target - state.position.x).max(0.0) / (forward_speed * dt)) as usize;
    let capacity = estimate
        .saturating_add(2)
        .min(options.max_steps.saturating_add(1))
        .min(MAX_PREALLOCATED_POINTS);
    let mut trajectory = Trajectory::new(state.position, dt, capacity);

    let mut steps = 0usize;
    while state.position.x < target {
        if steps >= options.max_steps {
            log::warn!("Step bound {} reached at x={:.3} m", options.max_steps, state.position.x);
            return Err(PitchError::diverged(format!(
                "exceeded {} steps before reaching {} m (x={:.3} m)",
                options.max_steps, target, state.position.x
            )));
        }

        let previous_x = state.position.x;
        state = euler_step(&model, &state, dt)?;
        steps += 1;

        if !state.is_finite() {
            return Err(PitchError::diverged(format!(
                "non-finite state after {} steps",
                steps
            )));
        }
        if state.position.x <= previous_x {
            return Err(PitchError::diverged(format!(
                "forward position stopped advancing at x={:.3} m after {} steps",
                state.position.x, steps
            )));
        }

        trajectory.push(state.position);
    }
    trajectory.final_velocity = state.velocity;

    let final_position = extract_final_position(&trajectory, target, options.plane_crossing);

    log::debug!(
        "Pitch reached plate after {} steps ({:.3} s): y={:.3} z={:.3}",
        steps,
        state.time,
        final_position.y,
        final_position.z
    );

    Ok((trajectory, final_position))
}

/// One explicit Euler step: velocity first, then position with the new velocity
pub fn euler_step(model: &AeroModel, state: &KinematicState, dt: f64) -> PitchResult<KinematicState> {
    let accel = model.acceleration(&state.velocity)?;
    let velocity = state.velocity + accel * dt;
    let position = state.position + velocity * dt;
    Ok(KinematicState {
        time: state.time + dt,
        position,
        velocity,
    })
}

fn extract_final_position(trajectory: &Trajectory, target: f64, mode: PlaneCrossing) -> FinalPosition {
    let points = trajectory.points();
    let last = points[points.len() - 1];

    match mode {
        PlaneCrossing::LastSample => FinalPosition { y: last.y, z: last.z },
        PlaneCrossing::Interpolated => {
            if points.len() < 2 {
                // Released on or past the plane
                return FinalPosition { y: last.y, z: last.z };
            }
            let prev = points[points.len() - 2];
            let span = last.x - prev.x;
            let frac = if span > 0.0 {
                ((target - prev.x) / span).clamp(0.0, 1.0)
            } else {
                1.0
            };
            FinalPosition {
                y: prev.y + frac * (last.y - prev.y),
                z: prev.z + frac * (last.z - prev.z),
            }
        }
    }
}

/// Run independent simulations in parallel, one result per spec in input order
pub fn simulate_batch(
    specs: &[PitchSpec],
    physics: &PhysicsConfig,
    options: &SimulationOptions,
) -> Vec<PitchResult<(Trajectory, FinalPosition)>> {
    specs
        .par_iter()
        .map(|spec| simulate_with(spec, physics, options))
        .collect()
}
