/*
    Nyx, blazing fast astrodynamics
    Copyright (C) 2018-onwards Christopher Rabotin <christopher.rabotin@gmail.com>

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU Affero General Public License for more details.

    You should have received a copy of the GNU Affero General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

use crate::cosmic::MeeState;
use crate::linalg::SMatrix;

mod switching;
pub use switching::{switch_function, SwitchSample};

mod profile;
pub use profile::{thrust_profile, ThrustSample};

/// Control influence matrix of the Gauss variational equations in modified equinoctial elements.
///
/// Row `i` is the sensitivity of the rate of the i-th state (p, f, g, h, k, L, m) to a unit
/// acceleration along the radial, transverse, and normal axes (the columns). The mass row is
/// zero because the mass flow does not depend on the thrust direction.
pub fn control_influence(mee: &MeeState, mu: f64) -> SMatrix<f64, 7, 3> {
    let MeeState { p, f, g, h, k, l } = *mee;
    let (sin_l, cos_l) = l.sin_cos();
    let q = mee.q();
    let s2 = mee.s2();
    let sqrt_p_mu = (p / mu).sqrt();
    let hsk = h * sin_l - k * cos_l;

    let mut b = SMatrix::<f64, 7, 3>::zeros();
    // p
    b[(0, 1)] = 2.0 * p * sqrt_p_mu / q;
    // f
    b[(1, 0)] = sqrt_p_mu * sin_l;
    b[(1, 1)] = sqrt_p_mu * ((q + 1.0) * cos_l + f) / q;
    b[(1, 2)] = -sqrt_p_mu * g * hsk / q;
    // g
    b[(2, 0)] = -sqrt_p_mu * cos_l;
    b[(2, 1)] = sqrt_p_mu * ((q + 1.0) * sin_l + g) / q;
    b[(2, 2)] = sqrt_p_mu * f * hsk / q;
    // h, k
    b[(3, 2)] = sqrt_p_mu * s2 * cos_l / (2.0 * q);
    b[(4, 2)] = sqrt_p_mu * s2 * sin_l / (2.0 * q);
    // L
    b[(5, 2)] = sqrt_p_mu * hsk / q;
    b
}

#[test]
fn circular_equatorial_influence() {
    let mee = MeeState::new(1.0, 0.0, 0.0, 0.0, 0.0, 0.0);
    let b = control_influence(&mee, 1.0);
    // Only tangential thrust changes the semi-parameter
    assert!((b[(0, 1)] - 2.0).abs() < f64::EPSILON);
    assert_eq!(b[(0, 0)], 0.0);
    assert_eq!(b[(0, 2)], 0.0);
    // Normal thrust at L = 0 rotates the node line about the X axis
    assert!((b[(3, 2)] - 0.5).abs() < f64::EPSILON);
    assert!(b[(4, 2)].abs() < f64::EPSILON);
    assert!(b.row(6).iter().all(|x| *x == 0.0));
}
