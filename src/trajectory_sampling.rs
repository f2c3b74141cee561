use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::constants::MIN_SAMPLE_SPACING_M;
use crate::integrator::{FinalPosition, Trajectory};
use crate::pitch::PitchSpec;

/// Single trajectory sample at a fixed forward distance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectorySample {
    pub distance_m: f64,
    pub height_m: f64,
    pub lateral_m: f64,
    pub time_s: f64,
}

/// Headline numbers for one pitch
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlightSummary {
    pub time_of_flight_s: f64,
    pub plate_speed_mps: f64,
    pub max_height_m: f64,
    pub max_height_distance_m: f64,
    /// Release height minus height at the plate
    pub vertical_drop_m: f64,
    /// Lateral offset at the plate relative to release
    pub lateral_break_m: f64,
    pub steps: usize,
}

/// Sample the trajectory every `step_m` metres of forward travel
pub fn sample_trajectory(trajectory: &Trajectory, step_m: f64) -> Vec<TrajectorySample> {
    let step_size = if !step_m.is_finite() || step_m <= 0.0 {
        return Vec::new();
    } else if step_m < MIN_SAMPLE_SPACING_M {
        MIN_SAMPLE_SPACING_M
    } else {
        step_m
    };

    let points = trajectory.points();
    let (first, last) = match (points.first(), points.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Vec::new(),
    };

    let x_vals: Vec<f64> = points.iter().map(|p| p.x).collect();
    let y_vals: Vec<f64> = points.iter().map(|p| p.y).collect();
    let z_vals: Vec<f64> = points.iter().map(|p| p.z).collect();
    let t_vals: Vec<f64> = (0..points.len()).map(|i| trajectory.time_at(i)).collect();

    let start = first.x;
    let span = last.x - start;
    let num_samples = (span / step_size + 1e-9).floor() as usize + 1;

    (0..num_samples)
        .map(|i| {
            let distance = start + i as f64 * step_size;
            TrajectorySample {
                distance_m: distance,
                height_m: interpolate(&x_vals, &y_vals, distance),
                lateral_m: interpolate(&x_vals, &z_vals, distance),
                time_s: interpolate(&x_vals, &t_vals, distance),
            }
        })
        .collect()
}

/// Summarise a completed flight
pub fn summarize(trajectory: &Trajectory, final_position: &FinalPosition, spec: &PitchSpec) -> FlightSummary {
    let (max_height_m, max_height_distance_m) = trajectory
        .points()
        .iter()
        .fold((f64::NEG_INFINITY, 0.0), |(best_y, best_x), p| {
            if p.y > best_y {
                (p.y, p.x)
            } else {
                (best_y, best_x)
            }
        });

    FlightSummary {
        time_of_flight_s: trajectory.time_of_flight(),
        plate_speed_mps: trajectory.final_velocity().norm(),
        max_height_m,
        max_height_distance_m,
        vertical_drop_m: spec.release_position.y - final_position.y,
        lateral_break_m: final_position.z - spec.release_position.z,
        steps: trajectory.steps(),
    }
}

/// Linear interpolation over monotonically non-decreasing `x_vals`
fn interpolate(x_vals: &[f64], y_vals: &[f64], x: f64) -> f64 {
    if x_vals.is_empty() || x_vals.len() != y_vals.len() {
        return 0.0;
    }

    if x <= x_vals[0] {
        return y_vals[0];
    }

    let n = x_vals.len();
    if x >= x_vals[n - 1] {
        return y_vals[n - 1];
    }

    // First index with x_vals[idx] > x; idx >= 1 here
    let idx = x_vals.partition_point(|&v| v <= x);
    let (x0, x1) = (x_vals[idx - 1], x_vals[idx]);
    let (y0, y1) = (y_vals[idx - 1], y_vals[idx]);

    if (x1 - x0).abs() < 1e-12 {
        return y0;
    }
    y0 + (y1 - y0) * (x - x0) / (x1 - x0)
}

/// Positions as plain `[x, y, z]` triples for external chart renderers
pub fn to_xyz(points: &[Vector3<f64>]) -> Vec<[f64; 3]> {
    points.iter().map(|p| [p.x, p.y, p.z]).collect()
}
