//! Physical model configuration.
//!
//! Every constant the force model uses lives in [`PhysicsConfig`], so the
//! model can be recalibrated (or exaggerated for tests) without touching
//! the integrator.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{PitchError, PitchResult};
use crate::handedness::Handedness;

/// Ball, air and aerodynamic coefficients for one simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub mass_kg: f64,
    pub gravity_mps2: f64,
    pub air_density_kg_m3: f64,
    pub cross_section_m2: f64,
    pub ball_radius_m: f64,
    pub base_drag: f64,
    pub drag_spin_sensitivity: f64,
    pub lift_spin_sensitivity: f64,
    pub left_base_lift: f64,
    pub right_base_lift: f64,
    pub left_vertical_lift_scale: f64,
    pub right_vertical_lift_scale: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            mass_kg: BASEBALL_MASS_KG,
            gravity_mps2: G_ACCEL_MPS2,
            air_density_kg_m3: STANDARD_AIR_DENSITY,
            cross_section_m2: BASEBALL_CROSS_SECTION_M2,
            ball_radius_m: BASEBALL_RADIUS_M,
            base_drag: BASE_DRAG_COEFFICIENT,
            drag_spin_sensitivity: DRAG_SPIN_SENSITIVITY,
            lift_spin_sensitivity: LIFT_SPIN_SENSITIVITY,
            left_base_lift: LEFT_BASE_LIFT,
            right_base_lift: RIGHT_BASE_LIFT,
            left_vertical_lift_scale: LEFT_VERTICAL_LIFT_SCALE,
            right_vertical_lift_scale: RIGHT_VERTICAL_LIFT_SCALE,
        }
    }
}

impl PhysicsConfig {
    /// Load a configuration from a JSON file. Missing fields keep their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> PitchResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            PitchError::invalid(format!("cannot read physics config {}: {}", path.display(), e))
        })?;
        let config = Self::from_json_str(&text)?;
        log::debug!("Loaded physics config from {}", path.display());
        Ok(config)
    }

    pub fn from_json_str(text: &str) -> PitchResult<Self> {
        let config: PhysicsConfig = serde_json::from_str(text)
            .map_err(|e| PitchError::invalid(format!("malformed physics config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Base lift coefficient for the throwing hand
    pub fn base_lift(&self, handedness: Handedness) -> f64 {
        match handedness {
            Handedness::Left => self.left_base_lift,
            Handedness::Right => self.right_base_lift,
        }
    }

    /// Scale applied to the vertical component of the Magnus acceleration
    pub fn vertical_lift_scale(&self, handedness: Handedness) -> f64 {
        match handedness {
            Handedness::Left => self.left_vertical_lift_scale,
            Handedness::Right => self.right_vertical_lift_scale,
        }
    }

    /// ½·ρ·A, the factor shared by the drag and lift force equations
    pub fn dynamic_pressure_area(&self) -> f64 {
        0.5 * self.air_density_kg_m3 * self.cross_section_m2
    }

    pub fn validate(&self) -> PitchResult<()> {
        let positive = [
            ("mass_kg", self.mass_kg),
            ("air_density_kg_m3", self.air_density_kg_m3),
            ("cross_section_m2", self.cross_section_m2),
            ("ball_radius_m", self.ball_radius_m),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(PitchError::invalid(format!(
                    "physics config {} must be positive and finite, got {}",
                    name, value
                )));
            }
        }

        let finite = [
            ("gravity_mps2", self.gravity_mps2),
            ("base_drag", self.base_drag),
            ("drag_spin_sensitivity", self.drag_spin_sensitivity),
            ("lift_spin_sensitivity", self.lift_spin_sensitivity),
            ("left_base_lift", self.left_base_lift),
            ("right_base_lift", self.right_base_lift),
            ("left_vertical_lift_scale", self.left_vertical_lift_scale),
            ("right_vertical_lift_scale", self.right_vertical_lift_scale),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(PitchError::invalid(format!(
                    "physics config {} must be finite, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = PhysicsConfig::default();
        assert_eq!(config.mass_kg, 0.145);
        assert_eq!(config.gravity_mps2, 9.81);
        assert_eq!(config.air_density_kg_m3, 1.225);
        assert_eq!(config.cross_section_m2, 0.00421);
        assert_eq!(config.ball_radius_m, 0.037);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_handedness_lookups() {
        let config = PhysicsConfig::default();
        assert_eq!(config.base_lift(Handedness::Left), 0.09);
        assert_eq!(config.base_lift(Handedness::Right), 0.05);
        assert_eq!(config.vertical_lift_scale(Handedness::Left), 1.0);
        assert_eq!(config.vertical_lift_scale(Handedness::Right), 0.85);
    }

    #[test]
    fn test_dynamic_pressure_area() {
        let config = PhysicsConfig::default();
        assert!((config.dynamic_pressure_area() - 0.5 * 1.225 * 0.00421).abs() < 1e-15);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = PhysicsConfig::from_json_str(r#"{ "air_density_kg_m3": 1.0 }"#).unwrap();
        assert_eq!(config.air_density_kg_m3, 1.0);
        assert_eq!(config.mass_kg, BASEBALL_MASS_KG);
        assert_eq!(config.right_base_lift, RIGHT_BASE_LIFT);
    }

    #[test]
    fn test_invalid_json_rejected() {
        let err = PhysicsConfig::from_json_str("{ not json").unwrap_err();
        assert!(err.is_invalid_input());

        let err = PhysicsConfig::from_json_str(r#"{ "mass_kg": 0.0 }"#).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        let config = PhysicsConfig {
            lift_spin_sensitivity: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = PhysicsConfig {
            cross_section_m2: -1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = PhysicsConfig::from_json_file("/nonexistent/physics.json").unwrap_err();
        assert!(err.is_invalid_input());
    }
}
