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

/*! # gnss-reflzones

Maps the first Fresnel zones of GNSS signals reflected off the ground around a receiver, for the
satellites rising and setting through a set of elevation angles, and exports them as KML polygons.
*/

/// Carrier frequency bands and satellite constellations.
pub mod gnss;

/// WGS84 geodetic positions and local up/east/north frames.
pub mod geodesy;

/// First Fresnel zone geometry, from the ellipse parameters to longitude/latitude rings.
pub mod zones;

/// Rising and setting arcs of the satellites through target elevations.
pub mod arcs;

/// Orbit files, provisioning, KML and CSV exports, and configuration loading.
pub mod io;

/// The one call reflection zone mapping pipeline.
pub mod mapper;

mod errors;
/// Functions which may fail return a `ZoneError`.
pub use self::errors::ZoneError;

#[macro_use]
extern crate log;
extern crate nalgebra as na;

/// Re-export nalgebra
pub mod linalg {
    pub use na::base::*;
}

pub mod prelude {
    pub use crate::arcs::{ArcDetector, AzimuthWindow, CrossingEvent, ElevationBand};
    pub use crate::geodesy::{GeodeticPosition, LocalFrame};
    pub use crate::gnss::{Constellation, FrequencyBand};
    pub use crate::io::{ConfigRepr, KmlExporter, OrbitStore, OrbitTrack, ZoneStyle};
    pub use crate::mapper::{ZoneMapper, ZoneMapperConfig, ZoneSummary};
    pub use crate::zones::{FresnelEllipseParams, GroundEllipse, PlacedEllipse};
    pub use crate::ZoneError;
}
