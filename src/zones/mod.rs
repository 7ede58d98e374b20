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

use crate::errors::ZoneError;
use crate::geodesy::GeodeticPosition;
use crate::gnss::FrequencyBand;

mod ellipse;
mod fresnel;
mod projector;

pub use ellipse::{rotation_angle_deg, PlacedEllipse, PERIMETER_SAMPLES, PERIMETER_STEP_DEG};
pub use fresnel::FresnelEllipseParams;
pub use projector::{to_lonlat, EARTH_RADIUS_KM};

/// A first Fresnel zone on the surface of the Earth, as a closed ring of (longitude, latitude)
/// vertices in degrees.
#[derive(Clone, Debug, PartialEq)]
pub struct GroundEllipse {
    /// Elevation angle which produced this zone, in degrees
    pub elevation_deg: f64,
    /// Satellite azimuth which produced this zone, in degrees
    pub azimuth_deg: f64,
    pub zone: FresnelEllipseParams,
    pub lonlat: Vec<(f64, f64)>,
}

impl GroundEllipse {
    /// Builds the zone of the given band, elevation and reflector height, oriented along the
    /// satellite azimuth, around the receiver.
    pub fn new(
        band: FrequencyBand,
        elevation_deg: f64,
        height_m: f64,
        azimuth_deg: f64,
        receiver: &GeodeticPosition,
    ) -> Result<Self, ZoneError> {
        let zone = FresnelEllipseParams::compute(band, elevation_deg, height_m)?;
        let placed = PlacedEllipse::from_zone(&zone, azimuth_deg);
        let lonlat = to_lonlat(
            &placed.points,
            receiver.latitude_deg,
            receiver.longitude_deg,
        );

        Ok(Self {
            elevation_deg,
            azimuth_deg,
            zone,
            lonlat,
        })
    }

    /// Returns whether the first and last vertices coincide (to a micro degree).
    pub fn is_closed(&self) -> bool {
        match (self.lonlat.first(), self.lonlat.last()) {
            (Some(first), Some(last)) => {
                (first.0 - last.0).abs() < 1e-6 && (first.1 - last.1).abs() < 1e-6
            }
            _ => false,
        }
    }
}
