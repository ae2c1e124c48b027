extern crate minfuel_mee as minfuel;

use approx::assert_relative_eq;
use minfuel::cosmic::{
    classical_to_mee, inertial_to_radial, mee_to_cartesian, radial_to_inertial, KeplerianElements,
    MeeState, EARTH_GM_KM3_S2,
};
use minfuel::linalg::{Matrix3, Vector3};
use minfuel::utils::between_0_tau;
use rstest::*;
use std::f64::consts::{FRAC_PI_2, PI};

macro_rules! f64_eq {
    ($x:expr, $val:expr, $msg:expr) => {
        assert!(
            ($x - $val).abs() < 1e-10,
            "{}: {:.2e}",
            $msg,
            ($x - $val).abs()
        )
    };
}

#[test]
fn leo_circular_equatorial() {
    let mee = classical_to_mee(7000.0, 0.0, 0.0, 0.0, 0.0, 0.0);
    f64_eq!(mee.p, 7000.0, "p");
    f64_eq!(mee.f, 0.0, "f");
    f64_eq!(mee.g, 0.0, "g");
    f64_eq!(mee.h, 0.0, "h");
    f64_eq!(mee.k, 0.0, "k");
    f64_eq!(mee.l, 0.0, "L");

    let (radius, velocity) = mee.to_cartesian(EARTH_GM_KM3_S2);
    f64_eq!(radius.x, 7000.0, "x");
    f64_eq!(radius.y, 0.0, "y");
    f64_eq!(radius.z, 0.0, "z");
    f64_eq!(velocity.x, 0.0, "vx");
    f64_eq!(velocity.y, (EARTH_GM_KM3_S2 / 7000.0).sqrt(), "vy");
    f64_eq!(velocity.z, 0.0, "vz");
}

#[test]
fn classical_mapping() {
    let (sma, ecc, inc, raan, aop, ta) = (8000.0, 0.2, 0.6, 1.1, 2.3, 0.4);
    let mee = classical_to_mee(sma, ecc, inc, raan, aop, ta);
    f64_eq!(mee.p, sma * (1.0 - ecc * ecc), "p");
    f64_eq!(mee.f, ecc * (aop + raan).cos(), "f");
    f64_eq!(mee.g, ecc * (aop + raan).sin(), "g");
    f64_eq!(mee.h, (inc / 2.0).tan() * raan.cos(), "h");
    f64_eq!(mee.k, (inc / 2.0).tan() * raan.sin(), "k");
    f64_eq!(mee.l, raan + aop + ta, "L");
    assert_eq!(
        mee,
        MeeState::from(KeplerianElements::new(sma, ecc, inc, raan, aop, ta))
    );
}

/// The closed form in modified equinoctial elements matches the rotation of the perifocal state.
#[rstest]
#[case::circular_equatorial(7000.0, 0.0, 0.0, 0.0, 0.0, 0.3)]
#[case::circular_inclined(7000.0, 0.0, 0.9, 4.0, 0.0, 2.0)]
#[case::elliptical_equatorial(9000.0, 0.3, 0.0, 0.0, 1.0, 3.5)]
#[case::leo(6778.0, 0.01, 0.9, 1.2, 0.4, 5.9)]
#[case::molniya(26_600.0, 0.74, 1.1, 5.5, 4.7, 3.0)]
#[case::gto(24_400.0, 0.73, 0.4, 2.2, 3.3, 1.5)]
#[case::polar(7200.0, 0.05, FRAC_PI_2, 3.9, 2.5, 4.4)]
#[case::retrograde(8100.0, 0.2, 2.4, 0.7, 5.2, 0.8)]
fn mee_matches_perifocal(
    #[case] sma: f64,
    #[case] ecc: f64,
    #[case] inc: f64,
    #[case] raan: f64,
    #[case] aop: f64,
    #[case] ta: f64,
) {
    let kep = KeplerianElements::new(sma, ecc, inc, raan, aop, ta);
    let (r_kep, v_kep) = kep.to_cartesian(EARTH_GM_KM3_S2);
    let (r_mee, v_mee) = kep.to_mee().to_cartesian(EARTH_GM_KM3_S2);

    assert_relative_eq!(r_mee, r_kep, max_relative = 1e-12, epsilon = 1e-8);
    assert_relative_eq!(v_mee, v_kep, max_relative = 1e-12, epsilon = 1e-11);
    assert!((r_mee.norm() - kep.to_mee().rmag()).abs() < 1e-8);
}

#[rstest]
#[case(8000.0, 0.2, 0.6, 1.1, 2.3, 0.4)]
#[case(42_164.0, 0.001, 0.001, 4.0, 1.0, 2.0)]
#[case(12_000.0, 0.5, 2.0, 5.0, 6.0, 3.0)]
#[case(7000.0, 0.0, 0.5, 1.0, 0.0, 1.0)]
fn keplerian_roundtrip(
    #[case] sma: f64,
    #[case] ecc: f64,
    #[case] inc: f64,
    #[case] raan: f64,
    #[case] aop: f64,
    #[case] ta: f64,
) {
    let mee = classical_to_mee(sma, ecc, inc, raan, aop, ta);
    let kep = mee.to_keplerian();
    assert!((kep.sma - sma).abs() < 1e-8);
    assert!((kep.ecc - ecc).abs() < 1e-12);
    assert!((kep.inc - inc).abs() < 1e-12);
    assert!((kep.raan - raan).abs() < 1e-12);

    let back = kep.to_mee();
    assert_relative_eq!(back.p, mee.p, max_relative = 1e-12);
    assert!((back.f - mee.f).abs() < 1e-12);
    assert!((back.g - mee.g).abs() < 1e-12);
    assert!((back.h - mee.h).abs() < 1e-12);
    assert!((back.k - mee.k).abs() < 1e-12);
    assert!((between_0_tau(back.l) - between_0_tau(mee.l)).abs() < 1e-12);
}

#[test]
fn batch_conversion() {
    let elements: Vec<MeeState> = (0..64)
        .map(|i| {
            let ta = i as f64 * 0.1;
            classical_to_mee(7000.0 + i as f64, 0.1, 0.5, 1.0, 2.0, ta)
        })
        .collect();
    let batch = mee_to_cartesian(&elements, EARTH_GM_KM3_S2);
    assert_eq!(batch.len(), elements.len());
    for (mee, (radius, velocity)) in elements.iter().zip(batch.iter()) {
        let (r, v) = mee.to_cartesian(EARTH_GM_KM3_S2);
        assert_eq!(*radius, r);
        assert_eq!(*velocity, v);
    }
    assert!(mee_to_cartesian(&[], EARTH_GM_KM3_S2).is_empty());
}

#[rstest]
#[case(MeeState::new(7000.0, 0.0, 0.0, 0.0, 0.0, 0.0))]
#[case(MeeState::new(1.1, 0.05, -0.02, 0.1, 0.05, 1.3))]
#[case(MeeState::new(1.3, -0.4, 0.2, -0.6, 0.9, PI + 0.9))]
#[case(MeeState::new(2.0, 0.1, 0.1, 0.0, 0.0, -7.0))]
fn lvlh_frame(#[case] mee: MeeState) {
    let (radius, velocity) = mee.to_cartesian(1.0);
    let dcm = inertial_to_radial(&radius, &velocity);

    assert!((dcm * dcm.transpose() - Matrix3::identity()).norm() < 1e-12);
    assert!((dcm.determinant() - 1.0).abs() < 1e-12);
    assert_eq!(radial_to_inertial(&radius, &velocity), dcm.transpose());

    // The position is purely radial, the velocity is in the orbit plane and prograde
    let r_lvlh = dcm * radius;
    assert_relative_eq!(
        r_lvlh,
        Vector3::new(radius.norm(), 0.0, 0.0),
        epsilon = 1e-12 * radius.norm()
    );
    let v_lvlh = dcm * velocity;
    assert!(v_lvlh.z.abs() < 1e-12 * velocity.norm());
    assert!(v_lvlh.y > 0.0);
}
