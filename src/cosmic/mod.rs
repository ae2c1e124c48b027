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
use typed_builder::TypedBuilder;

// Re-Export the element sets and their conversions
mod elements;
pub use self::elements::*;
pub(crate) use self::elements::dual_position;

// Re-Export the augmented state
mod state;
pub use self::state::*;

// Re-Export spacecraft
mod spacecraft;
pub use self::spacecraft::*;

mod rotations;
pub use self::rotations::*;

/// The eclipse module provides the smoothed cylindrical shadow used to scale the available power.
pub mod eclipse;

/// From NIST special publication 330, 2008 edition, in meters per second squared
pub const STD_GRAVITY: f64 = 9.80665;

/// Earth gravitational parameter, in km^3/s^2
pub const EARTH_GM_KM3_S2: f64 = 398_600.441_8;

/// Earth equatorial radius, in km
pub const EARTH_RADIUS_KM: f64 = 6_378.136_3;

/// Earth second zonal harmonic (unnormalized)
pub const EARTH_J2: f64 = 1.082_626_68e-3;

/// Solar flux at 1 AU, in W/m^2
pub const SOLAR_FLUX_W_M2: f64 = 1_367.0;

/// Physical constants of the central body and of the light source.
///
/// The gravitational parameter and the distance unit define the units of the state: if the
/// state is in kilometers, `distance_unit_km` is 1.0 and `mu` is in km^3/s^2. For canonical
/// units, `mu` is 1.0 and `distance_unit_km` is typically the Earth radius.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[builder(doc)]
pub struct PhysicalConstants {
    /// Gravitational parameter, in state length^3 per state time^2
    pub mu: f64,
    /// Second zonal harmonic coefficient, set to zero to disable the oblateness perturbation
    #[builder(default = EARTH_J2)]
    pub j2: f64,
    #[builder(default = EARTH_RADIUS_KM)]
    pub earth_radius_km: f64,
    /// Length of one state distance unit, in km
    #[builder(default = 1.0)]
    pub distance_unit_km: f64,
    /// Nominal solar power density available to the panels
    #[builder(default = SOLAR_FLUX_W_M2)]
    pub solar_power: f64,
    #[serde(default = "default_std_gravity")]
    #[builder(default = STD_GRAVITY)]
    pub std_gravity_m_s2: f64,
}

fn default_std_gravity() -> f64 {
    STD_GRAVITY
}

impl PhysicalConstants {
    /// Earth constants with the state in kilometers and seconds
    pub fn earth_km() -> Self {
        Self::builder().mu(EARTH_GM_KM3_S2).build()
    }

    /// Earth constants in canonical units: one distance unit is the Earth radius and mu is unity
    pub fn earth_canonical() -> Self {
        Self::builder()
            .mu(1.0)
            .distance_unit_km(EARTH_RADIUS_KM)
            .build()
    }

    /// Earth radius expressed in state distance units
    pub fn earth_radius(&self) -> f64 {
        self.earth_radius_km / self.distance_unit_km
    }

    /// Scaling of the J2 acceleration, i.e. mu * J2 * R^2 in state units
    pub fn j2_scale(&self) -> f64 {
        self.mu * self.j2 * self.earth_radius().powi(2)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure!(
            self.mu > 0.0,
            InvalidConfigSnafu {
                msg: format!("gravitational parameter must be positive, got {}", self.mu)
            }
        );
        ensure!(
            self.distance_unit_km > 0.0 && self.earth_radius_km > 0.0,
            InvalidConfigSnafu {
                msg: format!(
                    "distance unit ({} km) and Earth radius ({} km) must be positive",
                    self.distance_unit_km, self.earth_radius_km
                )
            }
        );
        ensure!(
            self.std_gravity_m_s2 > 0.0,
            InvalidConfigSnafu {
                msg: format!("standard gravity must be positive, got {}", self.std_gravity_m_s2)
            }
        );
        ensure!(
            self.solar_power >= 0.0 && self.j2.is_finite(),
            InvalidConfigSnafu {
                msg: format!(
                    "solar power ({}) must be non-negative and J2 ({}) finite",
                    self.solar_power, self.j2
                )
            }
        );
        Ok(())
    }
}
