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

use crate::linalg::Vector3;
use serde_derive::{Deserialize, Serialize};
use std::fmt;

/// WGS84 semi-major axis in meters
pub const WGS84_A_M: f64 = 6_378_137.0;
/// WGS84 flattening
pub const WGS84_F: f64 = 1.0 / 298.257_223_563;
/// WGS84 first eccentricity squared
pub const WGS84_E2: f64 = WGS84_F * (2.0 - WGS84_F);

/// Convergence threshold on the geodetic latitude, in radians.
const LATITUDE_TOL_RAD: f64 = 1e-12;
const MAX_ITER: usize = 20;

/// Geodetic position of the receiver on the WGS84 ellipsoid.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeodeticPosition {
    /// in degrees
    pub latitude_deg: f64,
    /// in degrees
    pub longitude_deg: f64,
    /// ellipsoidal height, in meters
    pub height_m: f64,
}

impl GeodeticPosition {
    pub fn new(latitude_deg: f64, longitude_deg: f64, height_m: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
            height_m,
        }
    }

    /// Converts an Earth centered Earth fixed position (meters) into its geodetic position.
    ///
    /// The latitude is found by fixed point iteration, which converges in a handful of steps for
    /// any point near the surface of the Earth.
    pub fn from_ecef(ecef_m: &Vector3<f64>) -> Self {
        let (x, y, z) = (ecef_m.x, ecef_m.y, ecef_m.z);
        let longitude = y.atan2(x);
        let p = (x * x + y * y).sqrt();

        if p < 1e-9 {
            // On the polar axis
            let b = WGS84_A_M * (1.0 - WGS84_F);
            return Self {
                latitude_deg: 90.0_f64.copysign(z),
                longitude_deg: longitude.to_degrees(),
                height_m: z.abs() - b,
            };
        }

        let mut latitude = ((z / p) / (1.0 - WGS84_E2)).atan();
        let mut height = 0.0;
        for _ in 0..MAX_ITER {
            let sin_lat = latitude.sin();
            let n = WGS84_A_M / (1.0 - WGS84_E2 * sin_lat * sin_lat).sqrt();
            height = p / latitude.cos() - n;
            let next = ((z / p) / (1.0 - WGS84_E2 * n / (n + height))).atan();
            let converged = (next - latitude).abs() < LATITUDE_TOL_RAD;
            latitude = next;
            if converged {
                break;
            }
        }

        Self {
            latitude_deg: latitude.to_degrees(),
            longitude_deg: longitude.to_degrees(),
            height_m: height,
        }
    }

    /// Returns the Earth centered Earth fixed position of this point, in meters.
    pub fn to_ecef(&self) -> Vector3<f64> {
        let (sin_lat, cos_lat) = self.latitude_deg.to_radians().sin_cos();
        let (sin_lon, cos_lon) = self.longitude_deg.to_radians().sin_cos();
        let n = WGS84_A_M / (1.0 - WGS84_E2 * sin_lat * sin_lat).sqrt();

        Vector3::new(
            (n + self.height_m) * cos_lat * cos_lon,
            (n + self.height_m) * cos_lat * sin_lon,
            (n * (1.0 - WGS84_E2) + self.height_m) * sin_lat,
        )
    }

    /// Local up/east/north frame at this position.
    pub fn local_frame(&self) -> LocalFrame {
        LocalFrame::at(self.latitude_deg, self.longitude_deg)
    }
}

impl fmt::Display for GeodeticPosition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "lat.: {:.6} deg    long.: {:.6} deg    alt.: {:.3} m",
            self.latitude_deg, self.longitude_deg, self.height_m
        )
    }
}

/// Unit vectors of the local topocentric frame, expressed in ECEF.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LocalFrame {
    pub up: Vector3<f64>,
    pub east: Vector3<f64>,
    pub north: Vector3<f64>,
}

impl LocalFrame {
    /// Builds the frame from a geodetic latitude and longitude, both in degrees.
    pub fn at(latitude_deg: f64, longitude_deg: f64) -> Self {
        let (sin_lat, cos_lat) = latitude_deg.to_radians().sin_cos();
        let (sin_lon, cos_lon) = longitude_deg.to_radians().sin_cos();

        Self {
            up: Vector3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat),
            east: Vector3::new(-sin_lon, cos_lon, 0.0),
            north: Vector3::new(-sin_lat * cos_lon, -sin_lat * sin_lon, cos_lat),
        }
    }

    /// Elevation angle in degrees of the receiver to satellite vector `rho`.
    pub fn elevation_deg(&self, rho: &Vector3<f64>) -> f64 {
        let cos_zenith = (rho.dot(&self.up) / rho.norm()).clamp(-1.0, 1.0);
        90.0 - cos_zenith.acos().to_degrees()
    }

    /// Azimuth in degrees, clockwise from north in [0, 360), of the receiver to satellite vector `rho`.
    pub fn azimuth_deg(&self, rho: &Vector3<f64>) -> f64 {
        let az = rho.dot(&self.east).atan2(rho.dot(&self.north)).to_degrees();
        if az < 0.0 {
            az + 360.0
        } else {
            az
        }
    }

    /// Returns the receiver to satellite vector that has the provided elevation, azimuth and range.
    pub fn rho_from_az_el(&self, azimuth_deg: f64, elevation_deg: f64, range_m: f64) -> Vector3<f64> {
        let (sin_el, cos_el) = elevation_deg.to_radians().sin_cos();
        let (sin_az, cos_az) = azimuth_deg.to_radians().sin_cos();
        range_m * (cos_el * (sin_az * self.east + cos_az * self.north) + sin_el * self.up)
    }
}
