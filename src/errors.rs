/*
    gnss-reflzones, GNSS reflection zone mapping
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

use snafu::prelude::*;
use std::io;
use std::path::PathBuf;

use crate::io::ConfigError;

/// Errors raised while computing or exporting reflection zones.
///
/// `InvalidInput` flags a caller mistake (bad band, elevation, height), whereas `DataUnavailable`
/// flags missing reference data, so the two can be handled differently.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ZoneError {
    #[snafu(display("invalid input: {msg}"))]
    InvalidInput { msg: String },
    #[snafu(display("data unavailable: {msg}"))]
    DataUnavailable { msg: String },
    #[snafu(display("could not parse {} line {line}: {msg}", path.display()))]
    Parse {
        path: PathBuf,
        line: usize,
        msg: String,
    },
    #[snafu(display("I/O error when {action}: {source}"))]
    Io {
        action: String,
        source: io::Error,
    },
    #[snafu(display("CSV error: {source}"))]
    Csv { source: csv::Error },
    #[snafu(display("configuration error: {source}"))]
    Config { source: ConfigError },
}

impl PartialEq for ZoneError {
    /// Errors match on their variant only, the payload is informational.
    fn eq(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}
