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

use crate::linalg::allocator::Allocator;
use crate::linalg::{DefaultAllocator, DimName, OVector};

/// Cartesian two body dynamics.
pub mod orbital;
pub use self::orbital::*;

/// Minimum fuel state and costate dynamics in modified equinoctial elements.
pub mod minfuel;
pub use self::minfuel::*;

/// Optimal control of the minimum fuel problem: switching function and thrust profile.
pub mod guidance;

/// A trait for models with equations of motion that can be integrated.
///
/// Implementors are immutable and hold no state between calls, so a single instance may be
/// shared by integrators running on separate threads.
pub trait Dynamics: Clone + Sync + Send
where
    DefaultAllocator: Allocator<Self::StateSize>,
{
    /// Length of the integrated state vector
    type StateSize: DimName;

    /// Defines the equations of motion.
    ///
    /// - `delta_t`: time past the start of the integration, in state time units.
    /// - `state`: the state vector, which changes at each integration step.
    fn eom(
        &self,
        delta_t: f64,
        state: &OVector<f64, Self::StateSize>,
    ) -> OVector<f64, Self::StateSize>;
}
