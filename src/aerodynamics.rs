//! Aerodynamic force model: drag and Magnus lift on a spinning baseball.
//!
//! Both forces scale with ½·ρ·A·V². Drag opposes the velocity; lift acts
//! along ω × v. The coefficients depend on the spin factor S = R·n / V
//! (n in rev/s):
//!
//! - Cd = Cd₀ + k_d·S²
//! - Cl = Cl₀(hand) + k_l·S

use std::f64::consts::PI;

use nalgebra::Vector3;

use crate::constants::{MIN_CROSS_PRODUCT_THRESHOLD, MIN_VELOCITY_THRESHOLD, RPM_TO_RPS};
use crate::error::{PitchError, PitchResult};
use crate::handedness::Handedness;
use crate::physics::PhysicsConfig;
use crate::pitch::{launch_direction, PitchSpec};

/// Convert rev/min to rad/s
pub fn rpm_to_rad_per_sec(rpm: f64) -> f64 {
    2.0 * PI * rpm / 60.0
}

/// Angular velocity of the ball, fixed for the whole flight.
///
/// The axis follows the launch direction. A right-handed release is the
/// mirror image of a left-handed one across the vertical plane of the
/// throw: the lateral axis component is negated and the spin sense
/// reversed, giving (−ωx, −ωy, +ωz). Negating the lateral component alone
/// is not enough: it is zero at φ = 0, which would leave both hands
/// breaking towards −z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinVector {
    pub omega: Vector3<f64>,
    pub rpm: f64,
}

impl SpinVector {
    pub fn from_spec(spec: &PitchSpec) -> Self {
        let magnitude = rpm_to_rad_per_sec(spec.spin_rate_rpm);
        let mut omega = launch_direction(spec.theta_rad, spec.phi_rad) * magnitude;

        if spec.handedness == Handedness::Right {
            omega.z = -omega.z;
            omega = -omega;
        }

        SpinVector {
            omega,
            rpm: spec.spin_rate_rpm,
        }
    }

    pub fn rps(&self) -> f64 {
        self.rpm * RPM_TO_RPS
    }

    pub fn rad_per_sec(&self) -> f64 {
        self.omega.norm()
    }
}

/// Ratio of surface speed due to spin to airspeed
pub fn spin_factor(ball_radius_m: f64, spin_rps: f64, speed_mps: f64) -> f64 {
    ball_radius_m * spin_rps / speed_mps
}

pub fn drag_coefficient(config: &PhysicsConfig, spin_factor: f64) -> f64 {
    config.base_drag + config.drag_spin_sensitivity * spin_factor * spin_factor
}

pub fn lift_coefficient(config: &PhysicsConfig, handedness: Handedness, spin_factor: f64) -> f64 {
    config.base_lift(handedness) + config.lift_spin_sensitivity * spin_factor
}

/// Unit vector along ω × v, or zero when the cross product vanishes
/// (no spin, or velocity parallel to the spin axis).
pub fn magnus_direction(omega: &Vector3<f64>, velocity: &Vector3<f64>) -> Vector3<f64> {
    let cross = omega.cross(velocity);
    let magnitude = cross.norm();
    if magnitude < MIN_CROSS_PRODUCT_THRESHOLD {
        Vector3::zeros()
    } else {
        cross / magnitude
    }
}

/// Breakdown of the acceleration at one instant, mostly for diagnostics
#[derive(Debug, Clone, Copy)]
pub struct ForceBreakdown {
    pub speed_mps: f64,
    pub spin_factor: f64,
    pub drag_coefficient: f64,
    pub lift_coefficient: f64,
    pub lift_force_n: f64,
    pub drag_accel: Vector3<f64>,
    pub lift_accel: Vector3<f64>,
    pub total_accel: Vector3<f64>,
}

/// Per-flight force model: the spin and handedness terms are resolved once,
/// then [`AeroModel::acceleration`] is evaluated every step.
#[derive(Debug, Clone)]
pub struct AeroModel<'a> {
    config: &'a PhysicsConfig,
    handedness: Handedness,
    spin: SpinVector,
    vertical_lift_scale: f64,
    q_area: f64,
}

impl<'a> AeroModel<'a> {
    pub fn new(config: &'a PhysicsConfig, spec: &PitchSpec) -> Self {
        AeroModel {
            config,
            handedness: spec.handedness,
            spin: SpinVector::from_spec(spec),
            vertical_lift_scale: config.vertical_lift_scale(spec.handedness),
            q_area: config.dynamic_pressure_area(),
        }
    }

    pub fn spin(&self) -> &SpinVector {
        &self.spin
    }

    pub fn handedness(&self) -> Handedness {
        self.handedness
    }

    pub fn acceleration(&self, velocity: &Vector3<f64>) -> PitchResult<Vector3<f64>> {
        Ok(self.forces(velocity)?.total_accel)
    }

    pub fn forces(&self, velocity: &Vector3<f64>) -> PitchResult<ForceBreakdown> {
        let speed = velocity.norm();
        if !speed.is_finite() || speed < MIN_VELOCITY_THRESHOLD {
            return Err(PitchError::diverged(format!(
                "ball speed degenerated to {} m/s",
                speed
            )));
        }

        let s = spin_factor(self.config.ball_radius_m, self.spin.rps(), speed);
        let cd = drag_coefficient(self.config, s);
        let cl = lift_coefficient(self.config, self.handedness, s);

        let v2 = speed * speed;
        let drag_force = cd * self.q_area * v2;
        let lift_force = cl * self.q_area * v2;
        let mass = self.config.mass_kg;

        let drag_accel = -(drag_force / mass) * (velocity / speed);

        let mut lift_accel = magnus_direction(&self.spin.omega, velocity) * (lift_force / mass);
        lift_accel.y *= self.vertical_lift_scale;

        let mut total_accel = drag_accel + lift_accel;
        total_accel.y -= self.config.gravity_mps2;

        Ok(ForceBreakdown {
            speed_mps: speed,
            spin_factor: s,
            drag_coefficient: cd,
            lift_coefficient: cl,
            lift_force_n: lift_force,
            drag_accel,
            lift_accel,
            total_accel,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(handedness: Handedness, rpm: f64, theta_deg: f64, phi_deg: f64) -> PitchSpec {
        PitchSpec::from_degrees(handedness, 40.0, rpm, Vector3::new(0.0, 1.8, 0.0), theta_deg, phi_deg)
    }

    #[test]
    fn test_rpm_conversion() {
        assert!((rpm_to_rad_per_sec(60.0) - 2.0 * PI).abs() < 1e-12);
        assert!((rpm_to_rad_per_sec(2000.0) - 209.43951023931956).abs() < 1e-9);
        assert_eq!(rpm_to_rad_per_sec(0.0), 0.0);
    }

    #[test]
    fn test_spin_vector_left_follows_launch_direction() {
        let spin = SpinVector::from_spec(&spec(Handedness::Left, 2000.0, 10.0, 20.0));
        let dir = launch_direction(10.0_f64.to_radians(), 20.0_f64.to_radians());
        let expected = dir * rpm_to_rad_per_sec(2000.0);
        assert!((spin.omega - expected).norm() < 1e-12);
    }

    #[test]
    fn test_spin_vector_right_is_mirror_image() {
        let left = SpinVector::from_spec(&spec(Handedness::Left, 2000.0, 10.0, 20.0));
        let right = SpinVector::from_spec(&spec(Handedness::Right, 2000.0, 10.0, 20.0));
        assert!((right.omega.x + left.omega.x).abs() < 1e-12);
        assert!((right.omega.y + left.omega.y).abs() < 1e-12);
        assert!((right.omega.z - left.omega.z).abs() < 1e-12);
        assert!((right.rad_per_sec() - left.rad_per_sec()).abs() < 1e-12);
    }

    #[test]
    fn test_coefficients() {
        let config = PhysicsConfig::default();
        // 2000 rpm at 40 m/s
        let s = spin_factor(0.037, 2000.0 / 60.0, 40.0);
        assert!((s - 0.030833333333333334).abs() < 1e-12);

        let cd = drag_coefficient(&config, s);
        assert!((cd - (0.30 + 0.15 * s * s)).abs() < 1e-15);

        let cl_left = lift_coefficient(&config, Handedness::Left, s);
        let cl_right = lift_coefficient(&config, Handedness::Right, s);
        assert!((cl_left - (0.09 + 0.6 * s)).abs() < 1e-15);
        assert!((cl_right - (0.05 + 0.6 * s)).abs() < 1e-15);
        // Handedness moves the intercept, not the slope
        assert!((cl_left - cl_right - 0.04).abs() < 1e-12);
    }

    #[test]
    fn test_magnus_direction_zero_cases() {
        let v = Vector3::new(40.0, 0.0, 0.0);
        assert_eq!(magnus_direction(&Vector3::zeros(), &v), Vector3::zeros());
        // Spin axis parallel to velocity
        assert_eq!(magnus_direction(&Vector3::new(200.0, 0.0, 0.0), &v), Vector3::zeros());
    }

    #[test]
    fn test_magnus_direction_backspin_lifts() {
        // Ball moving +x with spin about +z gives ω × v along +y
        let omega = Vector3::new(0.0, 0.0, 200.0);
        let v = Vector3::new(40.0, 0.0, 0.0);
        let dir = magnus_direction(&omega, &v);
        assert!((dir - Vector3::new(0.0, 1.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_zero_spin_only_drag_and_gravity() {
        let config = PhysicsConfig::default();
        let s = spec(Handedness::Right, 0.0, 0.0, 0.0);
        let model = AeroModel::new(&config, &s);
        let v = Vector3::new(40.0, -2.0, 0.5);
        let forces = model.forces(&v).unwrap();

        assert_eq!(forces.lift_accel, Vector3::zeros());
        assert_eq!(forces.spin_factor, 0.0);
        assert!((forces.drag_coefficient - 0.30).abs() < 1e-15);

        let speed = v.norm();
        let expected_drag = 0.30 * 0.5 * 1.225 * 0.00421 * speed * speed / 0.145;
        assert!((forces.drag_accel.norm() - expected_drag).abs() < 1e-12);
        // Drag points against the velocity
        assert!((forces.drag_accel.normalize() + v.normalize()).norm() < 1e-12);
        assert!((forces.total_accel.y - (forces.drag_accel.y - 9.81)).abs() < 1e-12);
    }

    #[test]
    fn test_vertical_lift_scaled_for_right_hand() {
        let config = PhysicsConfig::default();
        // Velocity with a lateral component so ω × v has a vertical part
        let v = Vector3::new(40.0, 0.0, 5.0);
        let s = spec(Handedness::Right, 2000.0, 0.0, 0.0);
        let model = AeroModel::new(&config, &s);
        let forces = model.forces(&v).unwrap();

        let dir = magnus_direction(&model.spin().omega, &v);
        let lift_mag = forces.lift_force_n / config.mass_kg;
        assert!((forces.lift_accel.y - dir.y * lift_mag * 0.85).abs() < 1e-12);
        assert!((forces.lift_accel.z - dir.z * lift_mag).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_speed_diverges() {
        let config = PhysicsConfig::default();
        let s = spec(Handedness::Left, 2000.0, 0.0, 0.0);
        let model = AeroModel::new(&config, &s);

        let err = model.acceleration(&Vector3::zeros()).unwrap_err();
        assert!(err.is_diverged());

        let err = model.acceleration(&Vector3::new(f64::NAN, 0.0, 0.0)).unwrap_err();
        assert!(err.is_diverged());
    }
}
