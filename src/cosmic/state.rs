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

use super::MeeState;
use crate::linalg::{SVector, U8};
use hyperdual::OHyperdual;
use std::fmt;

/// The seven adjoints (λp, λf, λg, λh, λk, λL, λm)
pub type Costates = SVector<f64, 7>;

/// The 14 element vector (p, f, g, h, k, L, m, λp, λf, λg, λh, λk, λL, λm) consumed and
/// produced (as a derivative) by the min-fuel dynamics.
pub type StateCostateVector = SVector<f64, 14>;

/// Hyper-dual number holding a value and its partials with respect to the seven states
/// (p, f, g, h, k, L, m).
pub type StateDual = OHyperdual<f64, U8>;

/// Index of the mass in the state-costate vector
pub const MASS_IDX: usize = 6;
/// Index of the first costate in the state-costate vector
pub const COSTATE_IDX: usize = 7;

/// Structured view of a state-costate vector.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AugmentedState {
    pub elements: MeeState,
    /// Wet mass of the spacecraft
    pub mass: f64,
    pub costates: Costates,
}

impl AugmentedState {
    pub fn new(elements: MeeState, mass: f64, costates: Costates) -> Self {
        Self {
            elements,
            mass,
            costates,
        }
    }

    pub fn from_vector(vector: &StateCostateVector) -> Self {
        Self {
            elements: MeeState::from_slice(vector.as_slice()),
            mass: vector[MASS_IDX],
            costates: vector.fixed_rows::<7>(COSTATE_IDX).into_owned(),
        }
    }

    pub fn to_vector(&self) -> StateCostateVector {
        let mut vector = StateCostateVector::zeros();
        vector
            .fixed_rows_mut::<6>(0)
            .copy_from(&self.elements.to_vector());
        vector[MASS_IDX] = self.mass;
        vector
            .fixed_rows_mut::<7>(COSTATE_IDX)
            .copy_from(&self.costates);
        vector
    }

    /// Costate of the mass, λm
    pub fn mass_costate(&self) -> f64 {
        self.costates[6]
    }
}

impl From<StateCostateVector> for AugmentedState {
    fn from(vector: StateCostateVector) -> Self {
        Self::from_vector(&vector)
    }
}

impl From<AugmentedState> for StateCostateVector {
    fn from(state: AugmentedState) -> Self {
        state.to_vector()
    }
}

impl fmt::Display for AugmentedState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}\tm = {}\tλ = {:?}",
            self.elements,
            self.mass,
            self.costates.as_slice()
        )
    }
}

#[test]
fn vector_view_roundtrip() {
    let vector = StateCostateVector::from_iterator((0..14).map(|i| i as f64 + 0.5));
    let state = AugmentedState::from_vector(&vector);
    assert_eq!(state.elements.p, 0.5);
    assert_eq!(state.elements.l, 5.5);
    assert_eq!(state.mass, 6.5);
    assert_eq!(state.costates[0], 7.5);
    assert_eq!(state.mass_costate(), 13.5);
    assert_eq!(state.to_vector(), vector);
}
