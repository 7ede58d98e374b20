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

use crate::linalg::Vector2;

/// Mean Earth radius used by the spherical projection, in kilometers
pub const EARTH_RADIUS_KM: f64 = 6378.14;

/// Projects local tangent plane points (x east, y north, meters) around the receiver onto
/// longitude/latitude pairs, in degrees.
///
/// Each point is treated as a great circle offset from the receiver: its distance from the origin
/// and its bearing from north feed the spherical destination point formula. This is not an
/// ellipsoidal geodesic, which is fine for footprints of a few hundred meters.
pub fn to_lonlat(points: &[Vector2<f64>], latitude_deg: f64, longitude_deg: f64) -> Vec<(f64, f64)> {
    let (sin_lat, cos_lat) = latitude_deg.to_radians().sin_cos();

    points
        .iter()
        .map(|point| {
            let angular_dist = (point.norm() / 1000.0) / EARTH_RADIUS_KM;
            if angular_dist == 0.0 {
                return (longitude_deg, latitude_deg);
            }
            let bearing = point.x.atan2(point.y);
            let (sin_d, cos_d) = angular_dist.sin_cos();

            let new_lat = (sin_lat * cos_d + cos_lat * sin_d * bearing.cos()).asin();
            let dlon = (bearing.sin() * sin_d * cos_lat).atan2(cos_d - sin_lat * new_lat.sin());

            (longitude_deg + dlon.to_degrees(), new_lat.to_degrees())
        })
        .collect()
}
