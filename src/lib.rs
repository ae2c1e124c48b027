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

/*! # minfuel-mee

Minimum fuel low thrust trajectory dynamics in modified equinoctial elements, for indirect
(costate based) optimal control solvers.

The core is [MinFuelDynamics](dynamics::MinFuelDynamics): the right hand side of the 14 element
state and costate ODE, including J2, a tanh smoothed bang-bang throttle and an optional smoothed
cylindrical Earth shadow. Converged trajectories are post-processed with the
[switching function](dynamics::guidance::switch_function) and the
[thrust profile](dynamics::guidance::thrust_profile).
*/

/// Provides the dynamics of the minimum fuel problem and of the two body problem.
pub mod dynamics;

/// Provides the element sets, their conversions, the physical constants and the shadow model.
pub mod cosmic;

/// Utility functions shared by different modules.
pub mod utils;

mod errors;
/// Functions which may fail will return an error.
pub use self::errors::MinFuelError;

/// Configuration loading and state-costate history ingestion.
pub mod io;

#[macro_use]
extern crate log;
extern crate nalgebra as na;

/// Re-export nalgebra
pub mod linalg {
    pub use na::base::*;
}

/// Re-export some useful things
pub use self::cosmic::{AugmentedState, MeeState, StateCostateVector};
pub use self::dynamics::{Dynamics, MinFuelDynamics};
pub use self::io::MinFuelConfig;
