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

use crate::io::ConfigError;
use snafu::prelude::*;

/// Errors raised at the boundaries of the crate.
///
/// The dynamics themselves never fail: degenerate inputs propagate as non-finite values which
/// the calling integrator is expected to reject.
#[derive(Debug, PartialEq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum MinFuelError {
    #[snafu(display("smoothing parameter must be finite and strictly positive, got {rho}"))]
    InvalidSmoothing { rho: f64 },
    #[snafu(display(
        "state-costate history row {row} has {len} columns, expected 14 (or 15 with time)"
    ))]
    HistoryWidth { row: usize, len: usize },
    #[snafu(display("configuration issue: {source}"))]
    Config { source: ConfigError },
}
