//! # Pitch Engine
//!
//! Baseball pitch trajectory engine: gravity, aerodynamic drag and Magnus
//! lift integrated from the release point to home plate.
//!
//! ```no_run
//! use pitch_engine::{simulate, Handedness, PitchSpec};
//! use nalgebra::Vector3;
//!
//! let spec = PitchSpec::from_degrees(Handedness::Right, 40.0, 2000.0, Vector3::new(0.0, 1.8, 0.0), 0.0, 0.0);
//! let (trajectory, final_position) = simulate(&spec).unwrap();
//! println!("{} steps, plate height {:.2} m", trajectory.steps(), final_position.y);
//! ```

// Re-export the main types and functions
pub use error::{PitchError, PitchResult};
pub use handedness::Handedness;
pub use physics::PhysicsConfig;
pub use pitch::PitchSpec;
pub use integrator::{
    simulate, simulate_with, simulate_batch, FinalPosition, KinematicState, PlaneCrossing,
    SimulationOptions, Trajectory,
};
pub use trajectory_sampling::{sample_trajectory, summarize, FlightSummary, TrajectorySample};
pub use strike_zone::{PitchCall, StrikeZone};
pub use monte_carlo::{run_dispersion, DispersionParams, DispersionResults};
pub use cli_api::{run_request, PitchRequest, SimulationResponse};

// Module declarations
pub mod constants;
pub mod error;
pub mod handedness;
pub mod physics;
pub mod pitch;
pub mod aerodynamics;
pub mod integrator;
pub mod trajectory_sampling;
pub mod strike_zone;
pub mod monte_carlo;
pub mod cli_api;
