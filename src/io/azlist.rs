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

use snafu::ResultExt;
use std::path::{Path, PathBuf};

use crate::arcs::CrossingEvent;
use crate::errors::{CsvSnafu, ZoneError};

/// Header of the crossing event table
pub const HEADER: [&str; 3] = ["azimuth_deg", "prn", "elevation_deg"];

/// Writes the crossing events to a CSV file with an `azimuth_deg,prn,elevation_deg` header,
/// and returns the path of the file. The header is written even when there are no events.
pub fn write_events<P: AsRef<Path>>(
    path: P,
    events: &[CrossingEvent],
) -> Result<PathBuf, ZoneError> {
    let path = path.as_ref();
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .context(CsvSnafu)?;

    wtr.write_record(HEADER).context(CsvSnafu)?;
    for event in events {
        wtr.serialize(event).context(CsvSnafu)?;
    }
    wtr.flush().map_err(csv::Error::from).context(CsvSnafu)?;

    info!("wrote {} crossing events to {}", events.len(), path.display());
    Ok(path.to_path_buf())
}

/// Reads back a crossing event table written by [write_events].
pub fn read_events<P: AsRef<Path>>(path: P) -> Result<Vec<CrossingEvent>, ZoneError> {
    let mut rdr = csv::Reader::from_path(path.as_ref()).context(CsvSnafu)?;
    rdr.deserialize()
        .map(|row| row.context(CsvSnafu))
        .collect()
}
