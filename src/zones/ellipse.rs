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

use crate::linalg::{Matrix2, Vector2};

use super::FresnelEllipseParams;

/// Angular step between two perimeter samples, in degrees
pub const PERIMETER_STEP_DEG: f64 = 15.0;
/// Number of perimeter samples: 0, 15, ..., 360 deg, so the last point closes the ring.
pub const PERIMETER_SAMPLES: usize = 25;

/// An ellipse placed in the local tangent plane of the receiver, x towards east and y towards
/// north, both in meters.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedEllipse {
    pub points: Vec<Vector2<f64>>,
    pub center: Vector2<f64>,
}

impl PlacedEllipse {
    /// Places the ellipse of semi-axes `semi_major_m` and `semi_minor_m` so that its major axis
    /// is along the satellite azimuth and its center is `center_m` away from the receiver.
    pub fn place(semi_major_m: f64, semi_minor_m: f64, center_m: f64, azimuth_deg: f64) -> Self {
        // Azimuth is clockwise from north whereas the parametric ellipse is counter-clockwise from
        // east. This mapping must stay in sync with the bearing used by the projector.
        let theta = rotation_angle_deg(azimuth_deg).to_radians();
        let (sin_t, cos_t) = theta.sin_cos();
        let rotation = Matrix2::new(cos_t, -sin_t, sin_t, cos_t);
        let center = Vector2::new(center_m * cos_t, center_m * sin_t);

        let points = (0..PERIMETER_SAMPLES)
            .map(|k| {
                let angle = (k as f64 * PERIMETER_STEP_DEG).to_radians();
                let canonical = Vector2::new(semi_major_m * angle.cos(), semi_minor_m * angle.sin());
                rotation * canonical + center
            })
            .collect();

        Self { points, center }
    }

    /// Places the provided Fresnel zone along the satellite azimuth.
    pub fn from_zone(zone: &FresnelEllipseParams, azimuth_deg: f64) -> Self {
        Self::place(
            zone.semi_major_m,
            zone.semi_minor_m,
            zone.center_m,
            azimuth_deg,
        )
    }
}

/// Rotation angle of the ellipse, in degrees, for a satellite azimuth in degrees.
pub fn rotation_angle_deg(azimuth_deg: f64) -> f64 {
    360.0 - azimuth_deg + 90.0
}
