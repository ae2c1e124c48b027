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

use super::Dynamics;
use crate::linalg::{Vector6, U6};
use std::fmt;

/// Point mass gravity of the central body, integrated in Cartesian coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TwoBodyDynamics {
    /// Gravitational parameter, in state units
    pub mu: f64,
}

impl TwoBodyDynamics {
    pub fn new(mu: f64) -> Self {
        Self { mu }
    }
}

impl fmt::Display for TwoBodyDynamics {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "two body dynamics (μ = {})", self.mu)
    }
}

impl Dynamics for TwoBodyDynamics {
    type StateSize = U6;

    fn eom(&self, _delta_t: f64, state: &Vector6<f64>) -> Vector6<f64> {
        let radius = state.fixed_rows::<3>(0).into_owned();
        let velocity = state.fixed_rows::<3>(3).into_owned();
        let body_acceleration = (-self.mu / radius.norm().powi(3)) * radius;
        Vector6::from_iterator(velocity.iter().chain(body_acceleration.iter()).cloned())
    }
}

#[test]
fn circular_acceleration() {
    let dynamics = TwoBodyDynamics::new(4.0);
    let d_x = dynamics.eom(0.0, &Vector6::new(2.0, 0.0, 0.0, 0.0, 1.5, 0.0));
    assert_eq!(d_x, Vector6::new(0.0, 1.5, 0.0, -1.0, 0.0, 0.0));
}
