use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::{PitchError, PitchResult};
use crate::handedness::Handedness;

/// Release parameters of a single pitch.
///
/// Coordinates: x towards home plate, y up, z lateral. Angles in radians.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PitchSpec {
    pub handedness: Handedness,
    pub speed_mps: f64,
    pub spin_rate_rpm: f64,
    pub release_position: Vector3<f64>,
    /// Launch elevation above the horizontal
    pub theta_rad: f64,
    /// Launch azimuth towards +z
    pub phi_rad: f64,
}

impl Default for PitchSpec {
    fn default() -> Self {
        Self {
            handedness: Handedness::Right,
            speed_mps: 40.0,
            spin_rate_rpm: 2000.0,
            release_position: Vector3::new(0.0, 1.8, 0.0),
            theta_rad: 0.0,
            phi_rad: 0.0,
        }
    }
}

impl PitchSpec {
    pub fn new(
        handedness: Handedness,
        speed_mps: f64,
        spin_rate_rpm: f64,
        release_position: Vector3<f64>,
        theta_rad: f64,
        phi_rad: f64,
    ) -> Self {
        Self {
            handedness,
            speed_mps,
            spin_rate_rpm,
            release_position,
            theta_rad,
            phi_rad,
        }
    }

    /// Same as [`PitchSpec::new`] with launch angles given in degrees
    pub fn from_degrees(
        handedness: Handedness,
        speed_mps: f64,
        spin_rate_rpm: f64,
        release_position: Vector3<f64>,
        theta_deg: f64,
        phi_deg: f64,
    ) -> Self {
        Self::new(
            handedness,
            speed_mps,
            spin_rate_rpm,
            release_position,
            theta_deg.to_radians(),
            phi_deg.to_radians(),
        )
    }

    pub fn with_handedness(&self, handedness: Handedness) -> Self {
        Self {
            handedness,
            ..self.clone()
        }
    }

    /// Initial velocity from the spherical decomposition of speed and launch angles
    pub fn initial_velocity(&self) -> Vector3<f64> {
        launch_direction(self.theta_rad, self.phi_rad) * self.speed_mps
    }

    /// Reject parameters that would make the first integration step meaningless
    pub fn validate(&self) -> PitchResult<()> {
        if !self.speed_mps.is_finite() || self.speed_mps <= 0.0 {
            return Err(PitchError::invalid(format!(
                "initial speed must be positive and finite, got {}",
                self.speed_mps
            )));
        }
        if !self.spin_rate_rpm.is_finite() || self.spin_rate_rpm < 0.0 {
            return Err(PitchError::invalid(format!(
                "spin rate must be non-negative and finite, got {}",
                self.spin_rate_rpm
            )));
        }
        if !self.theta_rad.is_finite() || !self.phi_rad.is_finite() {
            return Err(PitchError::invalid(format!(
                "launch angles must be finite, got theta={} phi={}",
                self.theta_rad, self.phi_rad
            )));
        }
        if !self.release_position.iter().all(|c| c.is_finite()) {
            return Err(PitchError::invalid(format!(
                "release position must be finite, got ({}, {}, {})",
                self.release_position.x, self.release_position.y, self.release_position.z
            )));
        }

        // The ball has to start moving towards the plate
        let forward = self.theta_rad.cos() * self.phi_rad.cos();
        if forward <= 0.0 {
            return Err(PitchError::invalid(format!(
                "launch direction has no forward component (theta={:.4} rad, phi={:.4} rad)",
                self.theta_rad, self.phi_rad
            )));
        }

        Ok(())
    }
}

/// Unit vector for elevation `theta` and azimuth `phi`.
///
/// (cosθ·cosφ, sinθ, cosθ·sinφ); shared by the velocity and spin decompositions.
pub fn launch_direction(theta_rad: f64, phi_rad: f64) -> Vector3<f64> {
    Vector3::new(
        theta_rad.cos() * phi_rad.cos(),
        theta_rad.sin(),
        theta_rad.cos() * phi_rad.sin(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(PitchSpec::default().validate().is_ok());
    }

    #[test]
    fn test_initial_velocity_decomposition() {
        let spec = PitchSpec::from_degrees(
            Handedness::Left,
            40.0,
            2000.0,
            Vector3::new(0.0, 1.8, 0.0),
            30.0,
            60.0,
        );
        let v = spec.initial_velocity();
        let theta = 30.0_f64.to_radians();
        let phi = 60.0_f64.to_radians();

        assert!((v.x - 40.0 * theta.cos() * phi.cos()).abs() < 1e-12);
        assert!((v.y - 40.0 * theta.sin()).abs() < 1e-12);
        assert!((v.z - 40.0 * theta.cos() * phi.sin()).abs() < 1e-12);
        assert!((v.norm() - 40.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_angles_point_forward() {
        let v = PitchSpec::default().initial_velocity();
        assert_eq!(v, Vector3::new(40.0, 0.0, 0.0));
    }

    #[test]
    fn test_validate_speed() {
        let spec = PitchSpec { speed_mps: 0.0, ..Default::default() };
        assert!(spec.validate().unwrap_err().is_invalid_input());

        let spec = PitchSpec { speed_mps: -3.0, ..Default::default() };
        assert!(spec.validate().is_err());

        let spec = PitchSpec { speed_mps: f64::INFINITY, ..Default::default() };
        assert!(spec.validate().is_err());
    }

    #[test]
    fn test_validate_spin_rate() {
        let spec = PitchSpec { spin_rate_rpm: 0.0, ..Default::default() };
        assert!(spec.validate().is_ok());

        let spec = PitchSpec { spin_rate_rpm: -1.0, ..Default::default() };
        assert!(spec.validate().is_err());

        let spec = PitchSpec { spin_rate_rpm: f64::NAN, ..Default::default() };
        assert!(spec.validate().is_err());
    }

    #[test]
    fn test_validate_angles_and_position() {
        let spec = PitchSpec { theta_rad: f64::NAN, ..Default::default() };
        assert!(spec.validate().is_err());

        let spec = PitchSpec {
            release_position: Vector3::new(0.0, f64::INFINITY, 0.0),
            ..Default::default()
        };
        assert!(spec.validate().is_err());
    }

    #[test]
    fn test_validate_backwards_throw() {
        let spec = PitchSpec { phi_rad: std::f64::consts::PI, ..Default::default() };
        assert!(spec.validate().unwrap_err().is_invalid_input());

        let spec = PitchSpec { theta_rad: std::f64::consts::FRAC_PI_2 + 0.1, ..Default::default() };
        assert!(spec.validate().is_err());
    }
}
