use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::constants::{STRIKE_ZONE_BOTTOM_M, STRIKE_ZONE_HALF_WIDTH_M, STRIKE_ZONE_TOP_M};
use crate::error::{PitchError, PitchResult};
use crate::integrator::FinalPosition;

/// Umpire's call for a pitch at the plate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PitchCall {
    Strike,
    Ball,
}

impl std::fmt::Display for PitchCall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PitchCall::Strike => f.pad("STRIKE"),
            PitchCall::Ball => f.pad("BALL"),
        }
    }
}

/// Rectangular strike zone on the target plane, centred on z = 0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrikeZone {
    pub bottom_m: f64,
    pub top_m: f64,
    pub half_width_m: f64,
}

impl Default for StrikeZone {
    fn default() -> Self {
        Self {
            bottom_m: STRIKE_ZONE_BOTTOM_M,
            top_m: STRIKE_ZONE_TOP_M,
            half_width_m: STRIKE_ZONE_HALF_WIDTH_M,
        }
    }
}

impl StrikeZone {
    pub fn new(bottom_m: f64, top_m: f64, half_width_m: f64) -> PitchResult<Self> {
        if !(bottom_m.is_finite() && top_m.is_finite() && half_width_m.is_finite()) {
            return Err(PitchError::invalid("strike zone bounds must be finite"));
        }
        if bottom_m >= top_m {
            return Err(PitchError::invalid(format!(
                "strike zone bottom ({}) must be below top ({})",
                bottom_m, top_m
            )));
        }
        if half_width_m <= 0.0 {
            return Err(PitchError::invalid(format!(
                "strike zone half width must be positive, got {}",
                half_width_m
            )));
        }
        Ok(Self {
            bottom_m,
            top_m,
            half_width_m,
        })
    }

    /// Edges count as inside
    pub fn contains(&self, position: &FinalPosition) -> bool {
        position.y >= self.bottom_m
            && position.y <= self.top_m
            && position.z.abs() <= self.half_width_m
    }

    pub fn call(&self, position: &FinalPosition) -> PitchCall {
        if self.contains(position) {
            PitchCall::Strike
        } else {
            PitchCall::Ball
        }
    }

    /// Zone edges at `plate_distance` as (start, end) pairs:
    /// bottom, top, left, right.
    pub fn outline(&self, plate_distance: f64) -> [(Vector3<f64>, Vector3<f64>); 4] {
        let x = plate_distance;
        let (b, t, w) = (self.bottom_m, self.top_m, self.half_width_m);
        [
            (Vector3::new(x, b, -w), Vector3::new(x, b, w)),
            (Vector3::new(x, t, -w), Vector3::new(x, t, w)),
            (Vector3::new(x, b, -w), Vector3::new(x, t, -w)),
            (Vector3::new(x, b, w), Vector3::new(x, t, w)),
        ]
    }
}
