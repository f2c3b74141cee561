use nalgebra::Vector3;
use pitch_engine::constants::PLATE_DISTANCE_M;
use pitch_engine::{
    simulate, simulate_with, Handedness, PhysicsConfig, PitchError, PitchSpec, SimulationOptions,
};

fn pitch(handedness: Handedness, speed: f64, rpm: f64, theta_deg: f64, phi_deg: f64) -> PitchSpec {
    PitchSpec::from_degrees(handedness, speed, rpm, Vector3::new(0.0, 1.8, 0.0), theta_deg, phi_deg)
}

fn sample_pitches() -> Vec<PitchSpec> {
    vec![
        pitch(Handedness::Right, 40.0, 2000.0, 0.0, 0.0),
        pitch(Handedness::Left, 40.0, 2000.0, 0.0, 0.0),
        pitch(Handedness::Right, 30.0, 2600.0, 2.0, -1.5),
        pitch(Handedness::Left, 45.0, 1200.0, -1.0, 2.0),
        pitch(Handedness::Left, 20.0, 0.0, 6.0, 0.0),
        PitchSpec::from_degrees(Handedness::Right, 35.0, 1800.0, Vector3::new(0.5, 1.6, -0.6), 1.0, 1.0),
    ]
}

#[test]
fn test_starts_at_release_and_reaches_plate() {
    for spec in sample_pitches() {
        let (trajectory, _) = simulate(&spec).unwrap();
        assert_eq!(*trajectory.first().unwrap(), spec.release_position);
        assert!(trajectory.last().unwrap().x >= PLATE_DISTANCE_M);
    }
}

#[test]
fn test_forward_coordinate_is_monotonic() {
    for spec in sample_pitches() {
        let (trajectory, _) = simulate(&spec).unwrap();
        for pair in trajectory.points().windows(2) {
            assert!(pair[1].x >= pair[0].x, "x went backwards for {:?}", spec);
        }
    }
}

#[test]
fn test_handedness_mirrors_break() {
    for (speed, rpm) in [(40.0, 2000.0), (30.0, 2500.0), (45.0, 1500.0)] {
        let (_, right) = simulate(&pitch(Handedness::Right, speed, rpm, 0.0, 0.0)).unwrap();
        let (_, left) = simulate(&pitch(Handedness::Left, speed, rpm, 0.0, 0.0)).unwrap();
        assert!(right.z * left.z < 0.0, "right z={} left z={}", right.z, left.z);
    }
}

#[test]
fn test_zero_spin_has_no_lateral_offset() {
    for handedness in [Handedness::Left, Handedness::Right] {
        let (_, final_pos) = simulate(&pitch(handedness, 40.0, 0.0, 0.0, 0.0)).unwrap();
        assert!(final_pos.z.abs() < 1e-12, "z = {}", final_pos.z);
    }
}

#[test]
fn test_halving_time_step_converges() {
    let spec = pitch(Handedness::Right, 40.0, 2000.0, 0.0, 0.0);
    let physics = PhysicsConfig::default();

    // Interpolated crossing only: the up-to-one-step overshoot of the last
    // sample is larger than the Euler error at coarse steps, so the change
    // is not monotone with the default crossing mode.
    let finals: Vec<(f64, f64)> = [0.002, 0.001, 0.0005, 0.00025]
        .iter()
        .map(|&dt| {
            let options = SimulationOptions::default().with_time_step(dt).interpolated();
            let (_, final_pos) = simulate_with(&spec, &physics, &options).unwrap();
            (final_pos.y, final_pos.z)
        })
        .collect();

    let changes: Vec<f64> = finals
        .windows(2)
        .map(|w| ((w[1].0 - w[0].0).powi(2) + (w[1].1 - w[0].1).powi(2)).sqrt())
        .collect();

    for pair in changes.windows(2) {
        assert!(pair[1] < pair[0], "changes did not shrink: {:?}", changes);
    }
}

#[test]
fn test_reference_right_handed_pitch() {
    let spec = pitch(Handedness::Right, 40.0, 2000.0, 0.0, 0.0);
    let (trajectory, final_pos) = simulate(&spec).unwrap();

    // Gravity drop beats lift
    assert!(final_pos.y < 1.8);
    // Right-handed release breaks towards +z
    assert!(final_pos.z > 0.0);

    let (trajectory_again, final_again) = simulate(&spec).unwrap();
    assert_eq!(final_pos, final_again);
    assert_eq!(trajectory.points(), trajectory_again.points());
}

#[test]
fn test_reference_left_handed_pitch_breaks_the_other_way() {
    let (_, final_pos) = simulate(&pitch(Handedness::Left, 40.0, 2000.0, 0.0, 0.0)).unwrap();
    assert!(final_pos.y < 1.8);
    assert!(final_pos.z < 0.0);
}

#[test]
fn test_zero_speed_is_invalid_input() {
    let spec = pitch(Handedness::Right, 0.0, 2000.0, 0.0, 0.0);
    match simulate(&spec) {
        Err(PitchError::InvalidInput(_)) => {}
        other => panic!("expected InvalidInput, got {:?}", other.map(|(_, f)| f)),
    }
}

#[test]
fn test_more_spin_more_break() {
    let (_, low) = simulate(&pitch(Handedness::Right, 40.0, 1000.0, 0.0, 0.0)).unwrap();
    let (_, high) = simulate(&pitch(Handedness::Right, 40.0, 3000.0, 0.0, 0.0)).unwrap();
    assert!(high.z > low.z);
}

#[test]
fn test_slow_lob_diverges_under_tight_step_bound() {
    let spec = pitch(Handedness::Left, 5.0, 1000.0, 40.0, 0.0);
    let options = SimulationOptions { max_steps: 1000, ..Default::default() };
    let err = simulate_with(&spec, &PhysicsConfig::default(), &options).unwrap_err();
    assert!(err.is_diverged());

    // Completes under the default bound
    assert!(simulate(&spec).is_ok());
}
