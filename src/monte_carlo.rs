//! Release dispersion study.
//!
//! Perturbs the release parameters of a base pitch with independent normal
//! noise and simulates every variant. Variants are drawn up front from a
//! seeded generator and simulated in parallel, so a given seed always
//! produces the same result regardless of thread scheduling.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{PitchError, PitchResult};
use crate::integrator::{simulate_with, FinalPosition, SimulationOptions};
use crate::physics::PhysicsConfig;
use crate::pitch::PitchSpec;
use crate::strike_zone::StrikeZone;

/// Noise applied to each release parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispersionParams {
    pub num_simulations: usize,
    pub speed_std_dev: f64,       // m/s
    pub spin_rate_std_dev: f64,   // rpm
    pub theta_std_dev: f64,       // radians
    pub phi_std_dev: f64,         // radians
    pub seed: u64,
    pub strike_zone: StrikeZone,
}

impl Default for DispersionParams {
    fn default() -> Self {
        Self {
            num_simulations: 500,
            speed_std_dev: 0.5,
            spin_rate_std_dev: 50.0,
            theta_std_dev: 0.5_f64.to_radians(),
            phi_std_dev: 0.5_f64.to_radians(),
            seed: 42,
            strike_zone: StrikeZone::default(),
        }
    }
}

impl DispersionParams {
    fn validate(&self) -> PitchResult<()> {
        if self.num_simulations == 0 {
            return Err(PitchError::invalid("number of simulations must be at least 1"));
        }
        let devs = [
            ("speed", self.speed_std_dev),
            ("spin rate", self.spin_rate_std_dev),
            ("theta", self.theta_std_dev),
            ("phi", self.phi_std_dev),
        ];
        for (name, value) in devs {
            if !value.is_finite() || value < 0.0 {
                return Err(PitchError::invalid(format!(
                    "{} standard deviation must be non-negative and finite, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Outcome of a dispersion study
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispersionResults {
    pub final_positions: Vec<FinalPosition>,
    pub requested: usize,
    pub failed: usize,
    pub mean_height_m: f64,
    pub std_height_m: f64,
    pub mean_lateral_m: f64,
    pub std_lateral_m: f64,
    /// Fraction of successful pitches called strikes, 0..=1
    pub strike_rate: f64,
}

impl DispersionResults {
    pub fn succeeded(&self) -> usize {
        self.final_positions.len()
    }
}

/// Run a dispersion study around `base`
pub fn run_dispersion(
    base: &PitchSpec,
    params: &DispersionParams,
    physics: &PhysicsConfig,
    options: &SimulationOptions,
) -> PitchResult<DispersionResults> {
    params.validate()?;
    base.validate()?;

    let variants = draw_variants(base, params)?;

    let outcomes: Vec<PitchResult<FinalPosition>> = variants
        .par_iter()
        .map(|spec| simulate_with(spec, physics, options).map(|(_, final_pos)| final_pos))
        .collect();

    let mut final_positions = Vec::with_capacity(outcomes.len());
    let mut failed = 0;
    for outcome in outcomes {
        match outcome {
            Ok(pos) => final_positions.push(pos),
            Err(e) => {
                log::warn!("Skipping dispersion sample: {}", e);
                failed += 1;
            }
        }
    }

    if final_positions.is_empty() {
        return Err(PitchError::diverged("no dispersion sample reached the plate"));
    }

    let heights: Vec<f64> = final_positions.iter().map(|p| p.y).collect();
    let laterals: Vec<f64> = final_positions.iter().map(|p| p.z).collect();
    let (mean_height_m, std_height_m) = mean_and_std(&heights);
    let (mean_lateral_m, std_lateral_m) = mean_and_std(&laterals);

    let strikes = final_positions
        .iter()
        .filter(|p| params.strike_zone.contains(p))
        .count();
    let strike_rate = strikes as f64 / final_positions.len() as f64;

    log::debug!(
        "Dispersion: {}/{} samples reached the plate, strike rate {:.3}",
        final_positions.len(),
        params.num_simulations,
        strike_rate
    );

    Ok(DispersionResults {
        final_positions,
        requested: params.num_simulations,
        failed,
        mean_height_m,
        std_height_m,
        mean_lateral_m,
        std_lateral_m,
        strike_rate,
    })
}

fn draw_variants(base: &PitchSpec, params: &DispersionParams) -> PitchResult<Vec<PitchSpec>> {
    let normal = |mean: f64, std_dev: f64, name: &str| {
        Normal::new(mean, std_dev)
            .map_err(|e| PitchError::invalid(format!("invalid {} distribution: {}", name, e)))
    };
    let speed_dist = normal(base.speed_mps, params.speed_std_dev, "speed")?;
    let spin_dist = normal(base.spin_rate_rpm, params.spin_rate_std_dev, "spin rate")?;
    let theta_dist = normal(base.theta_rad, params.theta_std_dev, "theta")?;
    let phi_dist = normal(base.phi_rad, params.phi_std_dev, "phi")?;

    let mut rng = StdRng::seed_from_u64(params.seed);
    let variants = (0..params.num_simulations)
        .map(|_| PitchSpec {
            speed_mps: speed_dist.sample(&mut rng),
            spin_rate_rpm: spin_dist.sample(&mut rng).max(0.0),
            theta_rad: theta_dist.sample(&mut rng),
            phi_rad: phi_dist.sample(&mut rng),
            ..base.clone()
        })
        .collect();
    Ok(variants)
}

/// Population mean and standard deviation
fn mean_and_std(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}
