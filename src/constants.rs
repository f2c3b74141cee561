/// Physical constants and defaults used in pitch calculations

/// Gravitational acceleration in m/s²
pub const G_ACCEL_MPS2: f64 = 9.81;

/// Standard air density at sea level (kg/m³)
pub const STANDARD_AIR_DENSITY: f64 = 1.225;

/// Regulation baseball mass (kg), 5 to 5.25 oz
pub const BASEBALL_MASS_KG: f64 = 0.145;

/// Baseball radius (m)
pub const BASEBALL_RADIUS_M: f64 = 0.037;

/// Cross-sectional area used by the drag and lift equations (m²)
///
/// Value: 0.00421 m². Slightly below π·R² for R = 0.037 m (0.0043 m²);
/// kept as the calibrated value rather than derived from the radius.
pub const BASEBALL_CROSS_SECTION_M2: f64 = 0.00421;

/// Drag coefficient of a non-spinning ball
pub const BASE_DRAG_COEFFICIENT: f64 = 0.30;

/// Quadratic growth of Cd with the spin factor: Cd = 0.30 + 0.15·S²
pub const DRAG_SPIN_SENSITIVITY: f64 = 0.15;

/// Linear growth of Cl with the spin factor: Cl = base + 0.6·S
pub const LIFT_SPIN_SENSITIVITY: f64 = 0.6;

/// Base lift coefficient for a left-handed release
pub const LEFT_BASE_LIFT: f64 = 0.09;

/// Base lift coefficient for a right-handed release
///
/// Lower than the left-handed value, modelling the asymmetric seam
/// orientation of the two releases.
pub const RIGHT_BASE_LIFT: f64 = 0.05;

/// Vertical lift scale for a left-handed release
pub const LEFT_VERTICAL_LIFT_SCALE: f64 = 1.0;

/// Vertical lift scale for a right-handed release
pub const RIGHT_VERTICAL_LIFT_SCALE: f64 = 0.85;

/// Distance from release to the measurement plane at home plate (m)
pub const PLATE_DISTANCE_M: f64 = 18.4;

/// Default integration time step (s)
///
/// At 40 m/s the flight to the plate takes just under 1000 steps.
pub const DEFAULT_TIME_STEP_S: f64 = 0.0005;

/// Default hard bound on integration steps (100 s of flight at the default step)
pub const DEFAULT_MAX_STEPS: usize = 200_000;

/// Conversion factor: revolutions per minute to revolutions per second
pub const RPM_TO_RPS: f64 = 1.0 / 60.0;

// Strike zone drawn at the plate

/// Bottom edge of the strike zone (m)
pub const STRIKE_ZONE_BOTTOM_M: f64 = 0.6;

/// Top edge of the strike zone (m)
pub const STRIKE_ZONE_TOP_M: f64 = 1.0;

/// Half of the 17 inch plate width (m)
pub const STRIKE_ZONE_HALF_WIDTH_M: f64 = 0.2159;

// Numerical stability constants

/// Minimum velocity magnitude before drag and lift terms become meaningless
pub const MIN_VELOCITY_THRESHOLD: f64 = 1e-6;

/// Below this magnitude the Magnus cross product has no usable direction
pub const MIN_CROSS_PRODUCT_THRESHOLD: f64 = 1e-12;

/// Smallest forward spacing accepted by trajectory sampling (m)
pub const MIN_SAMPLE_SPACING_M: f64 = 0.01;

/// Upper bound on the trajectory buffer reserved before stepping
pub const MAX_PREALLOCATED_POINTS: usize = 1 << 16;
