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

use crate::errors::{InvalidSmoothingSnafu, MinFuelError};
use crate::linalg::Matrix3;
use snafu::ensure;
use std::f64::consts::TAU;

/// Below this value, the tanh homotopy is numerically indistinguishable from a hard switch
/// for most integrators and the dynamics become very stiff.
pub const STIFF_SMOOTHING: f64 = 1e-6;

/// Smoothed Heaviside step: `0.5 * (1 + tanh(value / rho))`.
///
/// Returns 0.5 at `value = 0`, tends to 1 (resp. 0) as `value` tends to +∞ (resp. -∞), and
/// tends to the hard step as `rho` tends to zero. `rho` must be strictly positive.
pub fn smoothed_step(value: f64, rho: f64) -> f64 {
    0.5 * (1.0 + (value / rho).tanh())
}

/// Ensures that the homotopy parameter is usable, i.e. finite and strictly positive.
pub fn check_smoothing(rho: f64) -> Result<f64, MinFuelError> {
    ensure!(rho.is_finite() && rho > 0.0, InvalidSmoothingSnafu { rho });
    if rho < STIFF_SMOOTHING {
        warn!("smoothing parameter {rho:e} is below {STIFF_SMOOTHING:e}: expect stiff dynamics");
    }
    Ok(rho)
}

/// Returns the provided angle bounded between 0.0 and 2π, in radians
pub fn between_0_tau(angle: f64) -> f64 {
    let mut bounded = angle % TAU;
    if bounded < 0.0 {
        bounded += TAU;
    }
    bounded
}

/// Rotation about the first axis, angle in radians
pub fn r1(angle: f64) -> Matrix3<f64> {
    let (s, c) = angle.sin_cos();
    Matrix3::new(1.0, 0.0, 0.0, 0.0, c, s, 0.0, -s, c)
}

/// Rotation about the third axis, angle in radians
pub fn r3(angle: f64) -> Matrix3<f64> {
    let (s, c) = angle.sin_cos();
    Matrix3::new(c, s, 0.0, -s, c, 0.0, 0.0, 0.0, 1.0)
}

#[test]
fn smoothed_step_limits() {
    assert!((smoothed_step(0.0, 0.3) - 0.5).abs() < f64::EPSILON);
    assert_eq!(smoothed_step(50.0, 1e-3), 1.0);
    assert_eq!(smoothed_step(-50.0, 1e-3), 0.0);
    assert!(check_smoothing(0.0).is_err());
    assert!(check_smoothing(-1.0).is_err());
    assert!(check_smoothing(f64::NAN).is_err());
    assert!(check_smoothing(f64::INFINITY).is_err());
    assert_eq!(check_smoothing(0.25), Ok(0.25));
}

#[test]
fn angle_bounds() {
    assert!((between_0_tau(-0.5) - (TAU - 0.5)).abs() < 1e-15);
    assert!((between_0_tau(TAU + 1.0) - 1.0).abs() < 1e-14);
    assert_eq!(between_0_tau(2.0), 2.0);
}

#[test]
fn rotations_are_orthonormal() {
    for angle in [-2.5, -0.1, 0.0, 0.7, 3.0] {
        for dcm in [r1(angle), r3(angle)] {
            let should_be_eye = dcm.transpose() * dcm;
            assert!((should_be_eye - Matrix3::identity()).norm() < 1e-15);
            assert!((dcm.determinant() - 1.0).abs() < 1e-15);
        }
    }
}
