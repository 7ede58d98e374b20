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

use snafu::ensure;
use std::f64::consts::PI;
use std::fmt;

use crate::errors::{InvalidInputSnafu, ZoneError};
use crate::gnss::FrequencyBand;

/// Size and location of the first Fresnel zone for one (band, elevation, reflector height) triple.
///
/// Follows Larson and Nievinski (2013), appendix. The reflecting surface is assumed horizontal and
/// untilted: this is a modeling assumption and the dimensions are not valid for sloped terrain.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FresnelEllipseParams {
    pub band: FrequencyBand,
    /// in degrees
    pub elevation_deg: f64,
    /// in meters
    pub height_m: f64,
    /// Semi-major axis in meters, aligned with the satellite azimuth
    pub semi_major_m: f64,
    /// Semi-minor axis in meters
    pub semi_minor_m: f64,
    /// Distance from the receiver to the ellipse center along the satellite azimuth, in meters
    pub center_m: f64,
}

impl FresnelEllipseParams {
    /// Computes the first Fresnel zone.
    ///
    /// # Errors
    /// `InvalidInput` if the elevation is outside of (0, 90] degrees or if the reflector height is
    /// not strictly positive.
    pub fn compute(
        band: FrequencyBand,
        elevation_deg: f64,
        height_m: f64,
    ) -> Result<Self, ZoneError> {
        ensure!(
            elevation_deg.is_finite() && elevation_deg > 0.0 && elevation_deg <= 90.0,
            InvalidInputSnafu {
                msg: format!("elevation angle must be in (0, 90] deg, got {elevation_deg}"),
            }
        );
        ensure!(
            height_m.is_finite() && height_m > 0.0,
            InvalidInputSnafu {
                msg: format!("reflector height must be positive, got {height_m} m"),
            }
        );

        // Locus of points with a fixed delay of half a wavelength
        let delta = 0.5 * band.wavelength_m();
        let elevation = elevation_deg.to_radians();
        let sin_elev = elevation.sin();

        let semi_minor_m =
            (2.0 * delta * height_m / sin_elev + (delta / sin_elev) * (delta / sin_elev)).sqrt();
        let semi_major_m = semi_minor_m / sin_elev;
        let center_m = (height_m + delta / sin_elev) / elevation.tan();

        Ok(Self {
            band,
            elevation_deg,
            height_m,
            semi_major_m,
            semi_minor_m,
            center_m,
        })
    }

    /// Area of the ellipse in square meters
    pub fn area_m2(&self) -> f64 {
        PI * self.semi_major_m * self.semi_minor_m
    }
}

impl fmt::Display for FresnelEllipseParams {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} @ {:.2} deg, h = {:.3} m: a = {:.3} m  b = {:.3} m  center = {:.3} m",
            self.band,
            self.elevation_deg,
            self.height_m,
            self.semi_major_m,
            self.semi_minor_m,
            self.center_m
        )
    }
}
