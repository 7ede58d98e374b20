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

use serde_derive::{Deserialize, Serialize};
use snafu::ensure;
use std::fmt;

use crate::errors::{DataUnavailableSnafu, ZoneError};
use crate::geodesy::{GeodeticPosition, LocalFrame};
use crate::io::OrbitTrack;
use crate::linalg::Vector3;

/// Elevation band in which samples are retained before searching for crossings.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElevationBand {
    /// 0 to 26 degrees, used to discover rising and setting arcs
    #[default]
    Discovery,
    /// 0 to 20 degrees, used when the sample epochs are needed
    Tracking,
}

impl ElevationBand {
    /// Upper bound of the band, inclusive, in degrees
    pub const fn max_deg(&self) -> f64 {
        match self {
            Self::Discovery => 26.0,
            Self::Tracking => 20.0,
        }
    }

    /// Returns whether this elevation, in degrees, is retained
    pub fn contains(&self, elevation_deg: f64) -> bool {
        (0.0..=self.max_deg()).contains(&elevation_deg)
    }
}

/// Elevation and azimuth of one satellite at one epoch, as seen from the receiver.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct ElevationSample {
    pub prn: u32,
    /// Epoch as written in the orbit file
    pub epoch: f64,
    pub elevation_deg: f64,
    pub azimuth_deg: f64,
}

/// A satellite crossing a target elevation angle, either rising or setting.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CrossingEvent {
    /// Azimuth of the sample right before the crossing, rounded to two decimals
    pub azimuth_deg: f64,
    pub prn: u32,
    /// Target elevation which was crossed
    pub elevation_deg: f64,
}

impl fmt::Display for CrossingEvent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "PRN {:>3} crosses {:.1} deg at azimuth {:.2} deg",
            self.prn, self.elevation_deg, self.azimuth_deg
        )
    }
}

/// Finds the azimuths at which satellites rise or set through target elevation angles, as seen
/// from a fixed receiver.
#[derive(Copy, Clone, Debug)]
pub struct ArcDetector {
    receiver_ecef_m: Vector3<f64>,
    position: GeodeticPosition,
    frame: LocalFrame,
}

impl ArcDetector {
    /// Initializes the detector from the Cartesian (ECEF) position of the receiver, in meters.
    pub fn new(receiver_ecef_m: Vector3<f64>) -> Self {
        let position = GeodeticPosition::from_ecef(&receiver_ecef_m);
        Self {
            receiver_ecef_m,
            position,
            frame: position.local_frame(),
        }
    }

    /// Initializes the detector from the geodetic position of the receiver.
    pub fn from_geodetic(position: GeodeticPosition) -> Self {
        Self {
            receiver_ecef_m: position.to_ecef(),
            position,
            frame: position.local_frame(),
        }
    }

    pub fn position(&self) -> &GeodeticPosition {
        &self.position
    }

    pub fn frame(&self) -> &LocalFrame {
        &self.frame
    }

    /// Returns the time ordered elevation and azimuth of the provided satellite, keeping only
    /// the samples within the elevation band.
    pub fn low_elevation_samples(
        &self,
        track: &OrbitTrack,
        prn: u32,
        band: ElevationBand,
    ) -> Vec<ElevationSample> {
        track
            .samples_of(prn)
            .into_iter()
            .filter_map(|record| {
                let rho = record.position_m - self.receiver_ecef_m;
                let elevation_deg = self.frame.elevation_deg(&rho);
                if band.contains(elevation_deg) {
                    Some(ElevationSample {
                        prn,
                        epoch: record.epoch,
                        elevation_deg,
                        azimuth_deg: self.frame.azimuth_deg(&rho),
                    })
                } else {
                    None
                }
            })
            .collect()
    }

    /// Finds every rising and setting crossing of the target elevations for all of the
    /// satellites of the track.
    ///
    /// # Errors
    /// `DataUnavailable` if the orbit track is empty.
    pub fn rising_setting(
        &self,
        track: &OrbitTrack,
        elevations_deg: &[f64],
        band: ElevationBand,
    ) -> Result<Vec<CrossingEvent>, ZoneError> {
        ensure!(
            !track.is_empty(),
            DataUnavailableSnafu {
                msg: format!("orbit track {} has no samples", track.name()),
            }
        );

        let mut events = Vec::new();
        for prn in track.satellites() {
            let samples = self.low_elevation_samples(track, prn, band);
            debug!("PRN {prn}: {} samples below {} deg", samples.len(), band.max_deg());
            for &target in elevations_deg {
                events.extend(crossings(&samples, target));
            }
        }

        info!(
            "{} crossing events for {} target elevations from {}",
            events.len(),
            elevations_deg.len(),
            self.position
        );

        Ok(events)
    }
}

/// Returns the crossings of the target elevation in this time ordered sequence of samples.
///
/// Only strict sign changes of `elevation - target` between consecutive samples count, so a
/// sample exactly on the target never triggers a crossing.
pub fn crossings(samples: &[ElevationSample], target_deg: f64) -> Vec<CrossingEvent> {
    samples
        .windows(2)
        .filter_map(|pair| {
            let before = pair[0].elevation_deg - target_deg;
            let after = pair[1].elevation_deg - target_deg;
            if (before > 0.0 && after < 0.0) || (before < 0.0 && after > 0.0) {
                Some(CrossingEvent {
                    azimuth_deg: round_centi(pair[0].azimuth_deg),
                    prn: pair[0].prn,
                    elevation_deg: target_deg,
                })
            } else {
                None
            }
        })
        .collect()
}

fn round_centi(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
