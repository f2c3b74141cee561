// Request/response boundary - the string-typed pitch contract used by front ends
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::{PitchError, PitchResult};
use crate::handedness::Handedness;
use crate::integrator::{simulate_with, FinalPosition, SimulationOptions};
use crate::physics::PhysicsConfig;
use crate::pitch::PitchSpec;
use crate::strike_zone::{PitchCall, StrikeZone};
use crate::trajectory_sampling::{summarize, to_xyz, FlightSummary};

/// Pitch request as sent by a front end.
///
/// Every field is a string: handedness code, speed (m/s), spin rate (rpm),
/// release position as "x,y,z" (m), and launch angles in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PitchRequest {
    pub handedness: String,
    pub initial_velocity: String,
    pub spin_rate: String,
    pub release_position: String,
    pub theta: String,
    pub phi: String,
}

impl PitchRequest {
    /// Parse and validate into a [`PitchSpec`]
    pub fn to_spec(&self) -> PitchResult<PitchSpec> {
        let handedness = Handedness::from_str(&self.handedness).ok_or_else(|| {
            PitchError::invalid(format!("unrecognised handedness code '{}'", self.handedness))
        })?;
        let speed = parse_number("initialVelocity", &self.initial_velocity)?;
        let spin_rate = parse_number("spinRate", &self.spin_rate)?;
        let release = parse_release_position(&self.release_position)?;
        let theta_deg = parse_number("theta", &self.theta)?;
        let phi_deg = parse_number("phi", &self.phi)?;

        let spec = PitchSpec::from_degrees(handedness, speed, spin_rate, release, theta_deg, phi_deg);
        spec.validate()?;
        Ok(spec)
    }

    pub fn from_spec(spec: &PitchSpec) -> Self {
        let p = spec.release_position;
        PitchRequest {
            handedness: spec.handedness.code().to_string(),
            initial_velocity: spec.speed_mps.to_string(),
            spin_rate: spec.spin_rate_rpm.to_string(),
            release_position: format!("{},{},{}", p.x, p.y, p.z),
            theta: spec.theta_rad.to_degrees().to_string(),
            phi: spec.phi_rad.to_degrees().to_string(),
        }
    }
}

/// Response handed back to the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResponse {
    /// Height and lateral offset at the plate, rounded to centimetres
    pub final_position: FinalPosition,
    pub call: PitchCall,
    pub summary: FlightSummary,
    /// Every recorded position as [x, y, z]
    pub trajectory: Vec<[f64; 3]>,
}

/// Parse, simulate and assemble the response for one request
pub fn run_request(
    request: &PitchRequest,
    physics: &PhysicsConfig,
    options: &SimulationOptions,
) -> PitchResult<SimulationResponse> {
    let spec = request.to_spec()?;
    let (trajectory, final_position) = simulate_with(&spec, physics, options)?;
    let summary = summarize(&trajectory, &final_position, &spec);
    let call = StrikeZone::default().call(&final_position);

    Ok(SimulationResponse {
        final_position: final_position.rounded(),
        call,
        summary,
        trajectory: to_xyz(trajectory.points()),
    })
}

fn parse_number(field: &str, value: &str) -> PitchResult<f64> {
    let parsed: f64 = value
        .trim()
        .parse()
        .map_err(|_| PitchError::invalid(format!("{} is not a number: '{}'", field, value)))?;
    if !parsed.is_finite() {
        return Err(PitchError::invalid(format!("{} must be finite, got '{}'", field, value)));
    }
    Ok(parsed)
}

/// Parse "x,y,z" into a point
pub fn parse_release_position(value: &str) -> PitchResult<Vector3<f64>> {
    let parts: Vec<&str> = value.split(',').collect();
    if parts.len() != 3 {
        return Err(PitchError::invalid(format!(
            "releasePosition must be three comma separated numbers, got '{}'",
            value
        )));
    }
    let x = parse_number("releasePosition.x", parts[0])?;
    let y = parse_number("releasePosition.y", parts[1])?;
    let z = parse_number("releasePosition.z", parts[2])?;
    Ok(Vector3::new(x, y, z))
}
