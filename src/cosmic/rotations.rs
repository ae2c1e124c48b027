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

use crate::linalg::{Matrix3, Vector3};

/// Returns the DCM from the inertial frame to the local vertical / local horizontal frame.
///
/// The rows are the radial unit vector, the transverse unit vector (in the orbit plane, along
/// the motion), and the orbit normal (along the angular momentum). These are the axes along
/// which the thrust acceleration of the Gauss variational equations is expressed.
///
/// Undefined if the radius or the angular momentum is zero (rectilinear orbit).
pub fn inertial_to_radial(radius: &Vector3<f64>, velocity: &Vector3<f64>) -> Matrix3<f64> {
    let x_hat = radius / radius.norm();
    let hvec = radius.cross(velocity);
    let z_hat = hvec / hvec.norm();
    let y_hat = z_hat.cross(&x_hat);
    Matrix3::from_rows(&[x_hat.transpose(), y_hat.transpose(), z_hat.transpose()])
}

/// Returns the DCM from the local vertical / local horizontal frame to the inertial frame.
pub fn radial_to_inertial(radius: &Vector3<f64>, velocity: &Vector3<f64>) -> Matrix3<f64> {
    inertial_to_radial(radius, velocity).transpose()
}
