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

use super::guidance::SwitchSample;
use super::Dynamics;
use crate::cosmic::eclipse::CylindricalShadow;
use crate::cosmic::{dual_position, StateCostateVector, StateDual, COSTATE_IDX};
use crate::errors::{ConfigSnafu, MinFuelError};
use crate::io::MinFuelConfig;
use crate::linalg::{SMatrix, SVector, U14};
use crate::utils::check_smoothing;
use hyperdual::{hyperspace_from_vector, Float};
use snafu::ResultExt;
use std::fmt;
use std::path::Path;

/// Number of states (p, f, g, h, k, L, m), and therefore of costates
const NUM_STATES: usize = 7;

/// Dynamics of the minimum fuel low thrust problem in modified equinoctial elements, including the
/// J2 perturbation, for an indirect (costate based) solver.
///
/// The state is the 14 element vector (p, f, g, h, k, L, m, λp, λf, λg, λh, λk, λL, λm). At each
/// evaluation, the optimal control is computed from the costates: the thrust is directed along
/// -Bᵀλ and its throttle is the tanh smoothed bang-bang law of the switching function, where the
/// smoothing parameter ρ is the homotopy parameter of the solver.
///
/// The costate rates are the negative partials of the Hamiltonian with the control held fixed.
/// They are computed by automatic differentiation with hyperdual numbers, such that every term
/// (including the shadow factor when eclipses are enabled) is differentiated consistently.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MinFuelDynamics {
    cfg: MinFuelConfig,
    rho: f64,
    shadow: Option<CylindricalShadow>,
}

impl MinFuelDynamics {
    /// Initializes the dynamics, checking the smoothing parameter and the configuration.
    ///
    /// When `eclipse` is set, the thrust is limited by the power reaching the panels, scaled by the
    /// smoothed cylindrical shadow of the Earth. Otherwise, the maximum thrust is always available.
    pub fn new(cfg: MinFuelConfig, rho: f64, eclipse: bool) -> Result<Self, MinFuelError> {
        let rho = check_smoothing(rho)?;
        cfg.validate().context(ConfigSnafu)?;
        let shadow = eclipse.then(|| CylindricalShadow::from_physics(&cfg.physics));
        debug!(
            "min-fuel dynamics with ρ = {rho}, {} and {}",
            cfg.spacecraft,
            match shadow {
                Some(shadow) => format!("{shadow}"),
                None => "no eclipse".to_string(),
            }
        );
        Ok(Self { cfg, rho, shadow })
    }

    /// Initializes the dynamics from a YAML configuration file.
    pub fn from_yaml<P: AsRef<Path>>(
        path: P,
        rho: f64,
        eclipse: bool,
    ) -> Result<Self, MinFuelError> {
        let cfg = MinFuelConfig::from_yaml(path).context(ConfigSnafu)?;
        Self::new(cfg, rho, eclipse)
    }

    /// Returns a copy of these dynamics with another smoothing parameter, e.g. for the next step of
    /// a continuation.
    pub fn with_smoothing(&self, rho: f64) -> Result<Self, MinFuelError> {
        let mut me = *self;
        me.rho = check_smoothing(rho)?;
        Ok(me)
    }

    pub fn smoothing(&self) -> f64 {
        self.rho
    }

    pub fn config(&self) -> &MinFuelConfig {
        &self.cfg
    }

    pub fn eclipse(&self) -> bool {
        self.shadow.is_some()
    }

    /// Optimal control at this state-costate vector.
    pub fn control(&self, state: &StateCostateVector) -> SwitchSample {
        SwitchSample::evaluate(state, self.rho, &self.cfg)
    }

    /// Computes the rates of the seven states and the running cost (the mass flow scaled by the
    /// throttle, i.e. T δ / c) with their partials with respect to the states, for a fixed control.
    fn dual_rates(
        &self,
        state: &StateCostateVector,
        control: &SwitchSample,
    ) -> (SVector<StateDual, NUM_STATES>, StateDual) {
        let physics = &self.cfg.physics;
        let sc = &self.cfg.spacecraft;

        let hyperstate: SVector<StateDual, NUM_STATES> =
            hyperspace_from_vector(&state.fixed_rows::<NUM_STATES>(0).into_owned());
        let (p, f, g, h, k, l, mass) = (
            hyperstate[0],
            hyperstate[1],
            hyperstate[2],
            hyperstate[3],
            hyperstate[4],
            hyperstate[5],
            hyperstate[6],
        );

        let one = StateDual::from(1.0);
        let two = StateDual::from(2.0);
        let mu = StateDual::from(physics.mu);

        let (sin_l, cos_l) = (l.sin(), l.cos());
        let q = one + f * cos_l + g * sin_l;
        let s2 = one + h * h + k * k;
        let hsk = h * sin_l - k * cos_l;
        let hck = h * cos_l + k * sin_l;
        let sqrt_p_mu = (p / mu).sqrt();
        let rmag = p / q;

        // J2 in the radial, transverse, normal frame
        let j2_scale = StateDual::from(physics.j2_scale()) / rmag.powi(4);
        let s2_sq = s2 * s2;
        let j2_r = StateDual::from(-1.5)
            * j2_scale
            * (one - StateDual::from(12.0) * hsk * hsk / s2_sq);
        let j2_t = StateDual::from(-12.0) * j2_scale * hsk * hck / s2_sq;
        let j2_n = StateDual::from(-6.0) * j2_scale * hsk * (one - h * h - k * k) / s2_sq;

        // Thrust
        let thrust = match &self.shadow {
            Some(shadow) => {
                let zeta = shadow.dual_power_fraction(&dual_position(p, f, g, h, k, l), self.rho);
                zeta * StateDual::from(
                    sc.power_limited_thrust(physics.solar_power, physics.std_gravity_m_s2),
                )
            }
            None => StateDual::from(sc.max_thrust_N),
        };
        let throttle = StateDual::from(control.throttle);
        let thrust_acc = thrust * StateDual::from(sc.si2can) * throttle / mass;
        let direction = control.direction();

        let a_r = j2_r + thrust_acc * StateDual::from(direction[0]);
        let a_t = j2_t + thrust_acc * StateDual::from(direction[1]);
        let a_n = j2_n + thrust_acc * StateDual::from(direction[2]);

        // Gauss variational equations
        let p_dot = two * p / q * sqrt_p_mu * a_t;
        let f_dot = sqrt_p_mu
            * (a_r * sin_l + ((q + one) * cos_l + f) * a_t / q - g * hsk * a_n / q);
        let g_dot = sqrt_p_mu
            * (-a_r * cos_l + ((q + one) * sin_l + g) * a_t / q + f * hsk * a_n / q);
        let h_dot = sqrt_p_mu * s2 * cos_l * a_n / (two * q);
        let k_dot = sqrt_p_mu * s2 * sin_l * a_n / (two * q);
        let l_dot = (mu * p).sqrt() * (q / p).powi(2) + sqrt_p_mu * hsk * a_n / q;

        let mass_flow = thrust * throttle / StateDual::from(sc.exhaust_velocity);

        (
            SVector::<StateDual, NUM_STATES>::from_column_slice(&[
                p_dot, f_dot, g_dot, h_dot, k_dot, l_dot, -mass_flow,
            ]),
            mass_flow,
        )
    }

    /// Hamiltonian H = T δ / c + Σ λᵢ ẋᵢ with its partials, for a fixed control. Also returns the
    /// state rates it is built from.
    fn dual_hamiltonian(
        &self,
        state: &StateCostateVector,
        control: &SwitchSample,
    ) -> (SVector<StateDual, NUM_STATES>, StateDual) {
        let (rates, cost) = self.dual_rates(state, control);
        let ham = rates
            .iter()
            .zip(state.fixed_rows::<NUM_STATES>(COSTATE_IDX).iter())
            .fold(cost, |ham, (rate, costate)| {
                ham + *rate * StateDual::from(*costate)
            });
        (rates, ham)
    }

    /// Evaluates the Hamiltonian at this state-costate vector for the provided control, e.g. the
    /// one returned by [MinFuelDynamics::control].
    pub fn hamiltonian(&self, state: &StateCostateVector, control: &SwitchSample) -> f64 {
        self.dual_hamiltonian(state, control).1.real()
    }

    /// Returns the partials of the state rates with respect to the seven states, with the control
    /// held at its optimal value for this state-costate vector.
    pub fn state_jacobian(
        &self,
        state: &StateCostateVector,
    ) -> SMatrix<f64, NUM_STATES, NUM_STATES> {
        let control = self.control(state);
        let (rates, _) = self.dual_rates(state, &control);
        let mut grad = SMatrix::<f64, NUM_STATES, NUM_STATES>::zeros();
        for i in 0..NUM_STATES {
            for j in 1..=NUM_STATES {
                grad[(i, j - 1)] = rates[i][j];
            }
        }
        grad
    }
}

impl fmt::Display for MinFuelDynamics {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "min-fuel MEE dynamics (ρ = {}, J2 = {}, eclipse: {})",
            self.rho,
            self.cfg.physics.j2,
            self.eclipse()
        )
    }
}

impl Dynamics for MinFuelDynamics {
    type StateSize = U14;

    fn eom(&self, _delta_t: f64, state: &StateCostateVector) -> StateCostateVector {
        let control = self.control(state);
        let (rates, ham) = self.dual_hamiltonian(state, &control);

        let mut d_x = StateCostateVector::zeros();
        for i in 0..NUM_STATES {
            d_x[i] = rates[i].real();
            // Exact gradient of H, J2 partials included: do not replace with hand derived terms
            d_x[COSTATE_IDX + i] = -ham[i + 1];
        }
        d_x
    }
}
