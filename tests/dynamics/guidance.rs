extern crate minfuel_mee as minfuel;
extern crate pretty_env_logger as pel;

use super::augmented;
use minfuel::cosmic::{inertial_to_radial, MeeState};
use minfuel::dynamics::guidance::{
    control_influence, switch_function, thrust_profile, SwitchSample,
};
use minfuel::linalg::Vector3;
use minfuel::utils::smoothed_step;
use minfuel::{MinFuelConfig, MinFuelError, StateCostateVector};
use rstest::*;
use std::f64::consts::PI;

#[fixture]
fn cfg() -> MinFuelConfig {
    crate::canonical_config()
}

#[fixture]
fn history() -> Vec<StateCostateVector> {
    (0..50)
        .map(|i| {
            let l = i as f64 * 0.13;
            augmented(
                MeeState::new(1.1 + 0.01 * i as f64, 0.05, -0.02, 0.1, 0.05, l),
                1.0 - 0.002 * i as f64,
                [0.3, -0.2, 0.1, 0.05, -0.04, 0.02, 0.8],
            )
        })
        .collect()
}

#[test]
fn smoothed_step_properties() {
    for rho in [1.0, 0.1, 0.01] {
        assert!((smoothed_step(0.0, rho) - 0.5).abs() < f64::EPSILON);
        let mut prev = 0.0;
        for i in -20..=20 {
            let switching = i as f64 * 0.5 * rho;
            let throttle = smoothed_step(switching, rho);
            assert!(throttle > 0.0 && throttle < 1.0, "{throttle} out of (0; 1)");
            assert!(throttle > prev, "not monotone at S = {switching}");
            prev = throttle;
        }
    }
}

/// The throttle tends monotonically toward the bang-bang value as ρ tends to zero.
#[rstest]
#[case::engine_on(0.8, 1.0)]
#[case::engine_off(0.1, 0.0)]
fn throttle_convergence(
    cfg: MinFuelConfig,
    #[case] mass_costate: f64,
    #[case] bang_bang: f64,
) {
    let state = augmented(
        MeeState::new(1.1, 0.05, -0.02, 0.1, 0.05, 1.3),
        1.0,
        [0.3, -0.2, 0.1, 0.05, -0.04, 0.02, mass_costate],
    );
    let mut prev_error = f64::INFINITY;
    for rho in [1.0, 0.1, 0.01, 1e-3, 1e-4] {
        let sample = switch_function(&[state], rho, &cfg).unwrap()[0];
        assert_eq!(sample.switching.signum(), 2.0 * bang_bang - 1.0);
        let error = (sample.throttle - bang_bang).abs();
        assert!(error <= prev_error, "not converging at ρ = {rho}");
        prev_error = error;
    }
    assert!(prev_error < 1e-12);
}

#[rstest]
fn switching_function(cfg: MinFuelConfig, history: Vec<StateCostateVector>) {
    let _ = pel::try_init();
    let rho = 0.1;
    let samples = switch_function(&history, rho, &cfg).unwrap();
    assert_eq!(samples.len(), history.len());

    for (state, sample) in history.iter().zip(samples.iter()) {
        // Batch output matches the per sample evaluation
        assert_eq!(*sample, SwitchSample::evaluate(state, rho, &cfg));

        let mee = MeeState::from_slice(state.as_slice());
        let btl = control_influence(&mee, cfg.physics.mu).transpose()
            * state.fixed_rows::<7>(7).into_owned();
        assert!((sample.btl - btl).norm() < 1e-14);

        let switching = cfg.spacecraft.exhaust_velocity * cfg.spacecraft.si2can * btl.norm()
            / state[6]
            + state[13]
            - 1.0;
        assert!((sample.switching - switching).abs() < 1e-14);
        assert!((sample.throttle - smoothed_step(switching, rho)).abs() < 1e-13);
        assert!((sample.direction().norm() - 1.0).abs() < 1e-14);
        assert!(sample.direction().dot(&sample.btl) < 0.0);
    }

    assert!(switch_function(&[], rho, &cfg).unwrap().is_empty());
}

#[rstest]
fn invalid_smoothing(cfg: MinFuelConfig, history: Vec<StateCostateVector>) {
    assert_eq!(
        switch_function(&history, 0.0, &cfg),
        Err(MinFuelError::InvalidSmoothing { rho: 0.0 })
    );
    assert_eq!(
        thrust_profile(&history, -1e-3, false, &cfg),
        Err(MinFuelError::InvalidSmoothing { rho: -1e-3 })
    );
    assert!(matches!(
        thrust_profile(&history, f64::NAN, true, &cfg),
        Err(MinFuelError::InvalidSmoothing { .. })
    ));
}

/// Full throttle without eclipse yields exactly the power limited thrust.
#[rstest]
fn full_throttle_without_eclipse(cfg: MinFuelConfig) {
    let state = augmented(
        MeeState::new(1.1, 0.05, -0.02, 0.1, 0.05, 1.3),
        1.0,
        [1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 2.0],
    );
    let sample = thrust_profile(&[state], 1e-3, false, &cfg).unwrap()[0];

    assert_eq!(sample.throttle, 1.0);
    assert_eq!(sample.power_fraction, 1.0);
    assert_eq!(sample.power, cfg.physics.solar_power);
    let expected = cfg.physics.solar_power * cfg.spacecraft.area_m2 * cfg.spacecraft.efficiency
        / cfg.spacecraft.isp_s
        / cfg.physics.std_gravity_m_s2;
    assert_eq!(sample.thrust_N, expected);
    assert_eq!(
        sample.thrust_N,
        cfg.spacecraft
            .power_limited_thrust(cfg.physics.solar_power, cfg.physics.std_gravity_m_s2)
    );

    // Only λp is set, so -Bᵀλ only has a second component
    assert!((sample.u_inertial - Vector3::new(0.0, -1.0, 0.0)).norm() < 1e-15);
}

#[rstest]
fn eclipse_scaling(cfg: MinFuelConfig) {
    let costates = [1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 2.0];
    let day = augmented(MeeState::new(1.1, 0.0, 0.0, 0.0, 0.0, 0.0), 1.0, costates);
    let night = augmented(MeeState::new(1.1, 0.0, 0.0, 0.0, 0.0, PI), 1.0, costates);

    // Lit samples are unaffected by the shadow model
    assert_eq!(
        thrust_profile(&[day], 1e-3, true, &cfg).unwrap(),
        thrust_profile(&[day], 1e-3, false, &cfg).unwrap()
    );

    let eclipsed = thrust_profile(&[night], 1e-3, true, &cfg).unwrap()[0];
    assert!(eclipsed.radius.x < 0.0);
    assert_eq!(eclipsed.power_fraction, 0.0);
    assert_eq!(eclipsed.power, 0.0);
    assert_eq!(eclipsed.thrust_N, 0.0);
    assert_eq!(eclipsed.u_lvlh.norm(), 0.0);
    assert_eq!(eclipsed.u_inertial.norm(), 0.0);
    // The switching function itself ignores the available power
    assert_eq!(eclipsed.throttle, 1.0);

    let lit_night = thrust_profile(&[night], 1e-3, false, &cfg).unwrap()[0];
    assert_eq!(lit_night.power_fraction, 1.0);
    assert!(lit_night.thrust_N > 0.0);
}

#[rstest]
fn profile_frames(cfg: MinFuelConfig, history: Vec<StateCostateVector>) {
    let _ = pel::try_init();
    let rho = 0.1;
    let profile = thrust_profile(&history, rho, true, &cfg).unwrap();
    let controls = switch_function(&history, rho, &cfg).unwrap();
    assert_eq!(profile.len(), history.len());

    for ((state, sample), control) in history.iter().zip(profile.iter()).zip(controls.iter()) {
        let (radius, velocity) =
            MeeState::from_slice(state.as_slice()).to_cartesian(cfg.physics.mu);
        assert_eq!(sample.radius, radius);
        assert_eq!(sample.velocity, velocity);
        assert_eq!(sample.switching, control.switching);
        assert_eq!(sample.throttle, control.throttle);

        let expected =
            -control.btl / control.btl.norm() * control.throttle * sample.power_fraction;
        assert!((sample.u_inertial - expected).norm() < 1e-14);
        let dcm = inertial_to_radial(&radius, &velocity);
        assert!((dcm * sample.u_inertial - sample.u_lvlh).norm() < 1e-14);
        assert!(
            (sample.u_lvlh.norm() - sample.throttle * sample.power_fraction).abs() < 1e-14
        );
        assert!((sample.power - sample.power_fraction * cfg.physics.solar_power).abs() < 1e-9);
        let max_thrust = cfg
            .spacecraft
            .power_limited_thrust(cfg.physics.solar_power, cfg.physics.std_gravity_m_s2);
        assert!(
            (sample.thrust_N - max_thrust * sample.power_fraction * sample.throttle).abs() < 1e-14
        );
    }
}

/// The inertial thrust vector is -Bᵀλ/‖Bᵀλ‖ itself, and only the LVLH vector is rotated.
#[rstest]
#[case::no_eclipse(false)]
#[case::eclipse(true)]
fn inertial_thrust_vector(cfg: MinFuelConfig, #[case] eclipse: bool) {
    let state = augmented(
        MeeState::new(1.1, 0.05, -0.02, 0.1, 0.05, 1.3),
        1.0,
        [0.3, -0.2, 0.1, 0.05, -0.04, 0.02, 0.8],
    );
    let rho = 0.1;
    let sample = thrust_profile(&[state], rho, eclipse, &cfg).unwrap()[0];
    let control = SwitchSample::evaluate(&state, rho, &cfg);

    // Day side sample: the shadow does not scale anything
    assert_eq!(sample.power_fraction, 1.0);
    let expected = -control.btl / control.btl.norm() * control.throttle;
    assert!((sample.u_inertial - expected).norm() < 1e-14);

    let (radius, velocity) = MeeState::from_slice(state.as_slice()).to_cartesian(cfg.physics.mu);
    let rotated = inertial_to_radial(&radius, &velocity) * expected;
    assert!((sample.u_lvlh - rotated).norm() < 1e-14);
    assert!((sample.u_lvlh - sample.u_inertial).norm() > 0.1);
}

#[rstest]
fn zero_primer_vector(cfg: MinFuelConfig) {
    let _ = pel::try_init();
    let rho = 0.5;
    let state = augmented(MeeState::new(1.1, 0.05, -0.02, 0.1, 0.05, 1.3), 1.0, [0.0; 7]);
    let sample = thrust_profile(&[state], rho, false, &cfg).unwrap()[0];

    assert_eq!(sample.switching, -1.0);
    assert_eq!(sample.throttle, smoothed_step(-1.0, rho));
    assert_eq!(sample.u_lvlh, Vector3::zeros());
    assert_eq!(sample.u_inertial, Vector3::zeros());
    assert!(sample.thrust_N > 0.0);
}
