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

use super::{PhysicalConstants, StateDual};
use crate::linalg::Vector3;
use crate::utils::smoothed_step;
use hyperdual::Float;
use std::fmt;

/// Smoothed cylindrical shadow of the central body.
///
/// The Sun is assumed fixed along the +X axis of the inertial frame and infinitely far, so the
/// shadow is the half cylinder of radius `shadow_radius` behind the body (X < 0). There is no
/// penumbra: the transition from sunlight to darkness is smoothed with the same tanh homotopy as
/// the throttle, so the power fraction ζ is differentiable everywhere except on the X = 0 plane.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CylindricalShadow {
    /// Radius of the shadow cylinder, in state distance units
    pub shadow_radius: f64,
}

impl CylindricalShadow {
    pub fn new(shadow_radius: f64) -> Self {
        Self { shadow_radius }
    }

    /// Builds the shadow cast by the Earth, with its radius in state distance units
    pub fn from_physics(physics: &PhysicalConstants) -> Self {
        Self::new(physics.earth_radius())
    }

    /// Returns whether the position is on the night side, i.e. opposite to the Sun
    pub fn is_night_side(&self, radius: &Vector3<f64>) -> bool {
        radius.x < 0.0
    }

    /// Signed distance from the position to the surface of the shadow cylinder, negative inside
    pub fn depth(&self, radius: &Vector3<f64>) -> f64 {
        radius.y.hypot(radius.z) - self.shadow_radius
    }

    /// Fraction ζ ∈ [0; 1] of the nominal power available at this position: 1.0 on the day side,
    /// 0.5 * (1 + tanh(γ/ρ)) on the night side, where γ is the depth.
    pub fn power_fraction(&self, radius: &Vector3<f64>, rho: f64) -> f64 {
        if self.is_night_side(radius) {
            smoothed_step(self.depth(radius), rho)
        } else {
            1.0
        }
    }

    /// Same as `power_fraction` but carrying the partials of the position.
    pub(crate) fn dual_power_fraction(&self, radius: &Vector3<StateDual>, rho: f64) -> StateDual {
        if radius.x.real() < 0.0 {
            let gamma =
                (radius.y * radius.y + radius.z * radius.z).sqrt() - StateDual::from(self.shadow_radius);
            StateDual::from(0.5) * (StateDual::from(1.0) + (gamma / StateDual::from(rho)).tanh())
        } else {
            StateDual::from(1.0)
        }
    }
}

impl fmt::Display for CylindricalShadow {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "cylindrical shadow of radius {} (Sun along +X)",
            self.shadow_radius
        )
    }
}
