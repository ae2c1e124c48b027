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

use crate::cosmic::{PhysicalConstants, SpacecraftParams, StateCostateVector};
use crate::errors::{HistoryWidthSnafu, MinFuelError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use snafu::prelude::*;
use std::fmt::Debug;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use typed_builder::TypedBuilder;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ConfigError {
    #[snafu(display("failed to read configuration file: {source}"))]
    ReadConfig { source: std::io::Error },
    #[snafu(display("failed to parse YAML configuration: {source}"))]
    ParseConfig { source: serde_yaml::Error },
    #[snafu(display("invalid configuration: {msg}"))]
    InvalidConfig { msg: String },
}

impl PartialEq for ConfigError {
    /// No two configuration errors match
    fn eq(&self, _other: &Self) -> bool {
        false
    }
}

pub trait ConfigRepr: Debug + Sized + Serialize + DeserializeOwned {
    /// Builds the configuration representation from the path to a yaml
    fn load<P>(path: P) -> Result<Self, ConfigError>
    where
        P: AsRef<Path>,
    {
        let file = File::open(path).context(ReadConfigSnafu)?;
        let reader = BufReader::new(file);

        serde_yaml::from_reader(reader).context(ParseConfigSnafu)
    }

    /// Builds the configuration representation from a yaml string
    fn loads(data: &str) -> Result<Self, ConfigError> {
        debug!("Loading YAML:\n{data}");
        serde_yaml::from_str(data).context(ParseConfigSnafu)
    }
}

/// Immutable configuration consumed by the min-fuel dynamics and the post-processing functions.
///
/// The physical constants and the spacecraft parameters must be expressed in the same set of
/// units as the state vector (e.g. canonical units), with the exception of the SI quantities
/// documented on [SpacecraftParams].
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[builder(doc)]
pub struct MinFuelConfig {
    pub physics: PhysicalConstants,
    pub spacecraft: SpacecraftParams,
}

impl MinFuelConfig {
    /// Checks that every constant which ends up in a denominator or a square root is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.physics.validate()?;
        self.spacecraft.validate()
    }

    /// Loads and validates a configuration from a YAML file.
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let cfg = Self::load(path)?;
        cfg.validate()?;
        Ok(cfg)
    }
}

impl ConfigRepr for MinFuelConfig {}

/// Builds the state-costate history from raw rows, as returned by a boundary value problem solver.
///
/// Rows must either have 14 columns (p, f, g, h, k, L, m and the seven costates) or 15 columns
/// where the first one is the time, which is dropped.
pub fn history_from_rows<R: AsRef<[f64]>>(
    rows: &[R],
) -> Result<Vec<StateCostateVector>, MinFuelError> {
    rows.iter()
        .enumerate()
        .map(|(row, data)| {
            let data = data.as_ref();
            match data.len() {
                14 => Ok(StateCostateVector::from_column_slice(data)),
                15 => Ok(StateCostateVector::from_column_slice(&data[1..])),
                len => HistoryWidthSnafu { row, len }.fail(),
            }
        })
        .collect()
}
