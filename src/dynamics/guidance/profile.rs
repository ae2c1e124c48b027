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

use super::SwitchSample;
use crate::cosmic::eclipse::CylindricalShadow;
use crate::cosmic::{inertial_to_radial, MeeState, StateCostateVector};
use crate::errors::MinFuelError;
use crate::io::MinFuelConfig;
use crate::linalg::Vector3;
use crate::utils::check_smoothing;
use rayon::prelude::*;

/// Thrust profile at a single sample of a state-costate history.
#[allow(non_snake_case)]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ThrustSample {
    /// Inertial position, in state distance units
    pub radius: Vector3<f64>,
    /// Inertial velocity, in state velocity units
    pub velocity: Vector3<f64>,
    /// Thrust vector −Bᵀλ/‖Bᵀλ‖ scaled by the throttle and the power fraction, taken as inertial
    pub u_inertial: Vector3<f64>,
    /// `u_inertial` rotated into the radial, transverse, normal frame of the sample
    pub u_lvlh: Vector3<f64>,
    pub switching: f64,
    /// Thrust magnitude, in Newtons
    pub thrust_N: f64,
    /// Power available to the panels
    pub power: f64,
    pub throttle: f64,
    /// Fraction ζ of the nominal power reaching the panels.
    /// Reported as 1.0 on the day side and whenever eclipses are disabled.
    pub power_fraction: f64,
}

impl ThrustSample {
    fn evaluate(
        state: &StateCostateVector,
        rho: f64,
        shadow: Option<&CylindricalShadow>,
        cfg: &MinFuelConfig,
    ) -> Self {
        let control = SwitchSample::evaluate(state, rho, cfg);
        if control.is_degenerate() {
            warn!("primer vector vanishes, reporting a zero thrust direction: {control}");
        }

        let (radius, velocity) = MeeState::from_slice(state.as_slice()).to_cartesian(cfg.physics.mu);
        let power_fraction = match shadow {
            Some(shadow) => shadow.power_fraction(&radius, rho),
            None => 1.0,
        };
        let power = power_fraction * cfg.physics.solar_power;

        let u_inertial = control.direction() * control.throttle * power_fraction;
        let u_lvlh = inertial_to_radial(&radius, &velocity) * u_inertial;

        Self {
            radius,
            velocity,
            u_inertial,
            u_lvlh,
            switching: control.switching,
            thrust_N: cfg
                .spacecraft
                .power_limited_thrust(power, cfg.physics.std_gravity_m_s2)
                * control.throttle,
            power,
            throttle: control.throttle,
            power_fraction,
        }
    }
}

/// Computes the thrust profile along a state-costate history.
///
/// When `eclipse` is set, the power and the thrust vector are scaled by the smoothed cylindrical
/// shadow of the Earth, with the Sun along +X. Samples are processed in parallel and returned in
/// the input order.
pub fn thrust_profile(
    history: &[StateCostateVector],
    rho: f64,
    eclipse: bool,
    cfg: &MinFuelConfig,
) -> Result<Vec<ThrustSample>, MinFuelError> {
    let rho = check_smoothing(rho)?;
    let shadow = eclipse.then(|| CylindricalShadow::from_physics(&cfg.physics));
    debug!(
        "thrust profile over {} samples (ρ = {rho}, eclipse: {eclipse})",
        history.len()
    );
    Ok(history
        .par_iter()
        .map(|state| ThrustSample::evaluate(state, rho, shadow.as_ref(), cfg))
        .collect())
}
