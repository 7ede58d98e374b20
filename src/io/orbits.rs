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
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::errors::{DataUnavailableSnafu, IoSnafu, ParseSnafu, ZoneError};
use crate::gnss::Constellation;
use crate::linalg::Vector3;

/// Lines starting with this character are comments
pub const COMMENT_PREFIX: char = '%';
/// Satellite identifier, epoch, x, y, z
pub const COLUMNS: usize = 5;

/// Where the one day orbit reference files are published
pub const DEFAULT_BASE_URL: &str =
    "https://raw.githubusercontent.com/kristinemlarson/gnssrefl/master/docs/_static";

/// One row of a Cartesian orbit file.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OrbitRecord {
    pub prn: u32,
    /// Epoch as written in the file
    pub epoch: f64,
    /// Earth centered Earth fixed position, in meters
    pub position_m: Vector3<f64>,
}

/// The Cartesian positions of the satellites of one constellation over one day.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OrbitTrack {
    /// Path of the file this track was read from, if any
    pub path: Option<PathBuf>,
    records: Vec<OrbitRecord>,
}

impl OrbitTrack {
    /// Builds a track from records already in memory.
    pub fn from_records(records: Vec<OrbitRecord>) -> Self {
        Self {
            path: None,
            records,
        }
    }

    /// Loads an orbit file: whitespace separated `prn epoch x y z` rows, `%` comment lines.
    ///
    /// # Errors
    /// + `Io` if the file cannot be read
    /// + `Parse` on the first malformed row, no partial track is returned
    /// + `DataUnavailable` if the file holds no samples
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ZoneError> {
        let path = path.as_ref();
        let file = File::open(path).context(IoSnafu {
            action: format!("opening orbit file {}", path.display()),
        })?;

        let mut records = Vec::new();
        for (lno, line) in BufReader::new(file).lines().enumerate() {
            let line = line.context(IoSnafu {
                action: format!("reading orbit file {}", path.display()),
            })?;
            if let Some(record) = parse_row(&line, path, lno + 1)? {
                records.push(record);
            }
        }

        ensure!(
            !records.is_empty(),
            DataUnavailableSnafu {
                msg: format!("orbit file {} holds no samples", path.display()),
            }
        );

        info!("loaded {} orbit samples from {}", records.len(), path.display());

        Ok(Self {
            path: Some(path.to_path_buf()),
            records,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn records(&self) -> &[OrbitRecord] {
        &self.records
    }

    /// Name used in log and error messages
    pub fn name(&self) -> String {
        match &self.path {
            Some(path) => path.display().to_string(),
            None => "(in memory)".to_string(),
        }
    }

    /// Distinct satellite identifiers of this track, in increasing order
    pub fn satellites(&self) -> BTreeSet<u32> {
        self.records.iter().map(|r| r.prn).collect()
    }

    /// Samples of one satellite, ordered by epoch (stable for equal epochs)
    pub fn samples_of(&self, prn: u32) -> Vec<&OrbitRecord> {
        let mut samples: Vec<&OrbitRecord> =
            self.records.iter().filter(|r| r.prn == prn).collect();
        samples.sort_by(|a, b| a.epoch.total_cmp(&b.epoch));
        samples
    }
}

/// Parses one row, returning None for blank and comment lines.
fn parse_row(line: &str, path: &Path, lno: usize) -> Result<Option<OrbitRecord>, ZoneError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with(COMMENT_PREFIX) {
        return Ok(None);
    }

    let values = line
        .split_whitespace()
        .map(|field| {
            field.parse::<f64>().map_err(|_| ZoneError::Parse {
                path: path.to_path_buf(),
                line: lno,
                msg: format!("`{field}` is not a number"),
            })
        })
        .collect::<Result<Vec<f64>, ZoneError>>()?;

    ensure!(
        values.len() == COLUMNS,
        ParseSnafu {
            path,
            line: lno,
            msg: format!("expected {COLUMNS} columns, found {}", values.len()),
        }
    );

    let prn = values[0];
    ensure!(
        prn >= 0.0 && prn.fract() == 0.0 && prn <= u32::MAX as f64,
        ParseSnafu {
            path,
            line: lno,
            msg: format!("satellite identifier {prn} is not a whole number"),
        }
    );

    Ok(Some(OrbitRecord {
        prn: prn as u32,
        epoch: values[1],
        position_m: Vector3::new(values[2], values[3], values[4]),
    }))
}

/// Local directory of orbit reference files, one per constellation.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitStore {
    pub dir: PathBuf,
    /// Remote directory from which missing files are fetched
    pub base_url: String,
}

impl OrbitStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Path of the orbit file of this constellation
    pub fn orbit_path(&self, system: Constellation) -> PathBuf {
        self.dir.join(system.orbit_file_name())
    }

    /// Path of the orbit file of this system name, using GPS if the name is unknown
    pub fn orbit_path_for(&self, system: Option<&str>) -> PathBuf {
        self.orbit_path(Constellation::from_name_or_gps(system))
    }

    /// URL of the orbit file of this constellation
    pub fn orbit_url(&self, system: Constellation) -> String {
        format!("{}/{}", self.base_url, system.orbit_file_name())
    }

    /// Loads the orbit track of this constellation, provisioning the file first if needed.
    pub fn track(&self, system: Constellation) -> Result<OrbitTrack, ZoneError> {
        let path = self.provision(system)?;
        OrbitTrack::load(path)
    }
}
