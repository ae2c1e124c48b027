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

use super::control_influence;
use crate::cosmic::{AugmentedState, StateCostateVector};
use crate::errors::MinFuelError;
use crate::io::MinFuelConfig;
use crate::linalg::Vector3;
use crate::utils::{check_smoothing, smoothed_step};
use rayon::prelude::*;
use std::fmt;

/// Optimal control at a single state-costate sample.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SwitchSample {
    /// Switching function S: the engine is on when positive
    pub switching: f64,
    /// Smoothed throttle δ = 0.5 * (1 + tanh(S / ρ)), in [0; 1]
    pub throttle: f64,
    /// Primer vector Bᵀλ, in the radial, transverse, normal frame
    pub btl: Vector3<f64>,
}

impl SwitchSample {
    /// Computes the switching function and the throttle of this state-costate vector.
    ///
    /// The smoothing parameter is not checked here, cf. [switch_function].
    pub fn evaluate(state: &StateCostateVector, rho: f64, cfg: &MinFuelConfig) -> Self {
        let aug = AugmentedState::from_vector(state);
        let b = control_influence(&aug.elements, cfg.physics.mu);
        let btl = b.tr_mul(&aug.costates);
        let sc = &cfg.spacecraft;
        let switching =
            sc.exhaust_velocity * sc.si2can * btl.norm() / aug.mass + aug.mass_costate() - 1.0;
        Self {
            switching,
            throttle: smoothed_step(switching, rho),
            btl,
        }
    }

    /// Optimal thrust unit vector -Bᵀλ/‖Bᵀλ‖ in the radial, transverse, normal frame, or zero if
    /// the primer vector vanishes.
    pub fn direction(&self) -> Vector3<f64> {
        let norm = self.btl.norm();
        if norm > 0.0 {
            -self.btl / norm
        } else {
            Vector3::zeros()
        }
    }

    /// Returns whether the primer vector vanishes, in which case the direction is undefined
    pub fn is_degenerate(&self) -> bool {
        self.btl.norm() == 0.0
    }
}

impl fmt::Display for SwitchSample {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "S = {:.6e}\tδ = {:.6}\t|Bᵀλ| = {:.6e}",
            self.switching,
            self.throttle,
            self.btl.norm()
        )
    }
}

/// Evaluates the switching function, the throttle, and the primer vector along a state-costate
/// history. Samples are processed in parallel and returned in the input order.
pub fn switch_function(
    history: &[StateCostateVector],
    rho: f64,
    cfg: &MinFuelConfig,
) -> Result<Vec<SwitchSample>, MinFuelError> {
    let rho = check_smoothing(rho)?;
    debug!("switching function over {} samples (ρ = {rho})", history.len());
    Ok(history
        .par_iter()
        .map(|state| SwitchSample::evaluate(state, rho, cfg))
        .collect())
}
