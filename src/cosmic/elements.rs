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

use super::StateDual;
use crate::linalg::{Vector3, Vector6};
use crate::utils::{between_0_tau, r1, r3};
use approx::{AbsDiffEq, RelativeEq};
use hyperdual::Float;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Modified equinoctial elements (MEE).
///
/// This element set is non singular for circular and equatorial orbits; it is only singular
/// for a semi-parameter of zero and for retrograde equatorial orbits (i = π).
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MeeState {
    /// Semi-parameter (semilatus rectum), in state distance units
    pub p: f64,
    /// e cos(ω + Ω)
    pub f: f64,
    /// e sin(ω + Ω)
    pub g: f64,
    /// tan(i/2) cos(Ω)
    pub h: f64,
    /// tan(i/2) sin(Ω)
    pub k: f64,
    /// True longitude, in radians, unbounded
    pub l: f64,
}

impl MeeState {
    pub fn new(p: f64, f: f64, g: f64, h: f64, k: f64, l: f64) -> Self {
        Self { p, f, g, h, k, l }
    }

    /// Builds the elements from the first six components of a vector (p, f, g, h, k, L).
    pub fn from_slice(data: &[f64]) -> Self {
        Self::new(data[0], data[1], data[2], data[3], data[4], data[5])
    }

    pub fn to_vector(&self) -> Vector6<f64> {
        Vector6::new(self.p, self.f, self.g, self.h, self.k, self.l)
    }

    /// Returns 1 + f cos(L) + g sin(L), i.e. the ratio of the semi-parameter to the radius
    pub fn q(&self) -> f64 {
        let (sin_l, cos_l) = self.l.sin_cos();
        1.0 + self.f * cos_l + self.g * sin_l
    }

    /// Returns 1 + h^2 + k^2
    pub fn s2(&self) -> f64 {
        1.0 + self.h.powi(2) + self.k.powi(2)
    }

    /// Radius magnitude, in state distance units
    pub fn rmag(&self) -> f64 {
        self.p / self.q()
    }

    pub fn ecc(&self) -> f64 {
        (self.f.powi(2) + self.g.powi(2)).sqrt()
    }

    /// Inclination, in radians
    pub fn inc(&self) -> f64 {
        2.0 * (self.h.powi(2) + self.k.powi(2)).sqrt().atan()
    }

    /// Returns the Cartesian position and velocity of these elements.
    ///
    /// Closed form without iteration: degenerate (non finite) only if p <= 0 or if the radius is
    /// infinite.
    pub fn to_cartesian(&self, mu: f64) -> (Vector3<f64>, Vector3<f64>) {
        let Self { p, f, g, h, k, l } = *self;
        let alpha2 = h.powi(2) - k.powi(2);
        let s2 = self.s2();
        let hk2 = 2.0 * h * k;
        let (sin_l, cos_l) = l.sin_cos();
        let sqrt_mu_p = (mu / p).sqrt();
        let radius = p / self.q();

        let position = Vector3::new(
            radius * (cos_l + alpha2 * cos_l + hk2 * sin_l) / s2,
            radius * (sin_l - alpha2 * sin_l + hk2 * cos_l) / s2,
            2.0 * radius * (h * sin_l - k * cos_l) / s2,
        );
        let velocity = Vector3::new(
            -sqrt_mu_p * (sin_l + alpha2 * sin_l - hk2 * cos_l + g - f * hk2 + alpha2 * g) / s2,
            -sqrt_mu_p * (-cos_l + alpha2 * cos_l + hk2 * sin_l - f + g * hk2 + alpha2 * f) / s2,
            2.0 * sqrt_mu_p * (h * cos_l + k * sin_l + f * h + g * k) / s2,
        );
        (position, velocity)
    }

    /// Converts these elements into classical Keplerian elements, angles bounded in [0; 2π).
    pub fn to_keplerian(&self) -> KeplerianElements {
        let ecc = self.ecc();
        let raan = if self.h.abs() < f64::EPSILON && self.k.abs() < f64::EPSILON {
            0.0
        } else {
            self.k.atan2(self.h)
        };
        // Longitude of periapsis
        let lon_peri = if ecc < f64::EPSILON {
            raan
        } else {
            self.g.atan2(self.f)
        };
        KeplerianElements {
            sma: self.p / (1.0 - ecc.powi(2)),
            ecc,
            inc: self.inc(),
            raan: between_0_tau(raan),
            aop: between_0_tau(lon_peri - raan),
            ta: between_0_tau(self.l - lon_peri),
        }
    }
}

impl fmt::Display for MeeState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "p = {}\tf = {}\tg = {}\th = {}\tk = {}\tL = {} rad",
            self.p, self.f, self.g, self.h, self.k, self.l
        )
    }
}

impl AbsDiffEq for MeeState {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.to_vector().abs_diff_eq(&other.to_vector(), epsilon)
    }
}

impl RelativeEq for MeeState {
    fn default_max_relative() -> f64 {
        f64::EPSILON
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.to_vector()
            .relative_eq(&other.to_vector(), epsilon, max_relative)
    }
}

/// Classical orbital elements, all angles in radians.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KeplerianElements {
    /// Semi-major axis, in state distance units
    pub sma: f64,
    pub ecc: f64,
    pub inc: f64,
    pub raan: f64,
    pub aop: f64,
    /// True anomaly
    pub ta: f64,
}

impl KeplerianElements {
    pub fn new(sma: f64, ecc: f64, inc: f64, raan: f64, aop: f64, ta: f64) -> Self {
        Self {
            sma,
            ecc,
            inc,
            raan,
            aop,
            ta,
        }
    }

    pub fn semi_parameter(&self) -> f64 {
        self.sma * (1.0 - self.ecc.powi(2))
    }

    /// Converts these elements to modified equinoctial elements.
    ///
    /// Defined for e in [0; 1) and i in [0; π).
    pub fn to_mee(&self) -> MeeState {
        let lon_peri = self.aop + self.raan;
        let tan_half_inc = (self.inc / 2.0).tan();
        MeeState {
            p: self.semi_parameter(),
            f: self.ecc * lon_peri.cos(),
            g: self.ecc * lon_peri.sin(),
            h: tan_half_inc * self.raan.cos(),
            k: tan_half_inc * self.raan.sin(),
            l: self.raan + self.aop + self.ta,
        }
    }

    /// Cartesian position and velocity from the perifocal frame, rotated with the 3-1-3 sequence
    /// R3(-Ω) R1(-i) R3(-ω).
    pub fn to_cartesian(&self, mu: f64) -> (Vector3<f64>, Vector3<f64>) {
        let p = self.semi_parameter();
        if p.abs() < f64::EPSILON {
            warn!("semi-parameter ~= 0.0: parabolic or degenerate orbit");
        }
        let (sin_ta, cos_ta) = self.ta.sin_cos();
        let radius = p / (1.0 + self.ecc * cos_ta);
        let sqrt_mu_p = (mu / p).sqrt();

        let r_pqw = Vector3::new(radius * cos_ta, radius * sin_ta, 0.0);
        let v_pqw = Vector3::new(-sqrt_mu_p * sin_ta, sqrt_mu_p * (self.ecc + cos_ta), 0.0);

        let dcm = r3(-self.raan) * r1(-self.inc) * r3(-self.aop);
        (dcm * r_pqw, dcm * v_pqw)
    }
}

impl From<KeplerianElements> for MeeState {
    fn from(kep: KeplerianElements) -> Self {
        kep.to_mee()
    }
}

/// Converts classical elements (radians) to modified equinoctial elements.
pub fn classical_to_mee(sma: f64, ecc: f64, inc: f64, raan: f64, aop: f64, ta: f64) -> MeeState {
    KeplerianElements::new(sma, ecc, inc, raan, aop, ta).to_mee()
}

/// Converts a batch of modified equinoctial elements into Cartesian positions and velocities.
///
/// Samples are independent and converted in parallel, the output order matches the input.
pub fn mee_to_cartesian(elements: &[MeeState], mu: f64) -> Vec<(Vector3<f64>, Vector3<f64>)> {
    elements
        .par_iter()
        .map(|mee| mee.to_cartesian(mu))
        .collect()
}

/// Cartesian position of the provided dual elements (p, f, g, h, k, L), keeping the partials.
pub(crate) fn dual_position(
    p: StateDual,
    f: StateDual,
    g: StateDual,
    h: StateDual,
    k: StateDual,
    l: StateDual,
) -> Vector3<StateDual> {
    let one = StateDual::from(1.0);
    let two = StateDual::from(2.0);
    let alpha2 = h * h - k * k;
    let s2 = one + h * h + k * k;
    let hk2 = two * h * k;
    let (sin_l, cos_l) = (l.sin(), l.cos());
    let radius = p / (one + f * cos_l + g * sin_l);

    Vector3::new(
        radius * (cos_l + alpha2 * cos_l + hk2 * sin_l) / s2,
        radius * (sin_l - alpha2 * sin_l + hk2 * cos_l) / s2,
        two * radius * (h * sin_l - k * cos_l) / s2,
    )
}

#[test]
fn mee_accessors() {
    let mee = KeplerianElements::new(8000.0, 0.2, 0.4, 1.0, 2.0, 0.5).to_mee();
    assert!((mee.ecc() - 0.2).abs() < 1e-15);
    assert!((mee.inc() - 0.4).abs() < 1e-15);
    assert!((mee.rmag() - 8000.0 * (1.0 - 0.04) / (1.0 + 0.2 * 0.5_f64.cos())).abs() < 1e-9);
}
