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

use crate::io::{ConfigError, InvalidConfigSnafu};
use serde::{Deserialize, Serialize};
use snafu::ensure;
use std::fmt;
use typed_builder::TypedBuilder;

/// Defines a solar electric spacecraft: its engine, its panels, and the unit conversions
/// between the SI thrust and the integration units.
#[allow(non_snake_case)]
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[builder(doc)]
pub struct SpacecraftParams {
    /// Maximum thrust, in Newtons, used when the power is always available
    pub max_thrust_N: f64,
    /// Exhaust velocity constant `c`, such that the mass flow is `thrust / c` in state units
    pub exhaust_velocity: f64,
    /// Converts a force per unit mass in N/kg into a state acceleration
    pub si2can: f64,
    /// Solar panel area
    pub area_m2: f64,
    /// Power to thrust conversion efficiency, in (0; 1]
    pub efficiency: f64,
    /// The Isp is to be provided in seconds
    pub isp_s: f64,
}

impl SpacecraftParams {
    /// Returns the thrust that the engine can produce from the provided power.
    pub fn power_limited_thrust(&self, power: f64, std_gravity_m_s2: f64) -> f64 {
        power * self.area_m2 * self.efficiency / self.isp_s / std_gravity_m_s2
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure!(
            self.exhaust_velocity > 0.0 && self.isp_s > 0.0,
            InvalidConfigSnafu {
                msg: format!(
                    "exhaust velocity ({}) and Isp ({} s) must be positive",
                    self.exhaust_velocity, self.isp_s
                )
            }
        );
        ensure!(
            self.efficiency > 0.0 && self.efficiency <= 1.0,
            InvalidConfigSnafu {
                msg: format!("efficiency must be in (0; 1], got {}", self.efficiency)
            }
        );
        ensure!(
            self.max_thrust_N >= 0.0 && self.area_m2 >= 0.0 && self.si2can > 0.0,
            InvalidConfigSnafu {
                msg: format!(
                    "thrust ({} N) and area ({} m^2) must be non-negative and si2can ({}) positive",
                    self.max_thrust_N, self.area_m2, self.si2can
                )
            }
        );
        Ok(())
    }
}

impl fmt::Display for SpacecraftParams {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} N max, Isp = {} s, {} m^2 panels at {:.1} %",
            self.max_thrust_N,
            self.isp_s,
            self.area_m2,
            self.efficiency * 100.0
        )
    }
}
