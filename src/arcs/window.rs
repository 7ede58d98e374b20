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

use super::CrossingEvent;

/// Azimuth limits, in degrees, applied to the crossing events.
///
/// A negative lower bound wraps around north: `(-10, 20)` keeps the events in (0, 20) and in
/// (350, 360). Bounds are exclusive. Overlapping or inverted bounds are accepted as is.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AzimuthWindow {
    pub min_deg: f64,
    pub max_deg: f64,
}

impl AzimuthWindow {
    pub fn new(min_deg: f64, max_deg: f64) -> Self {
        Self { min_deg, max_deg }
    }

    /// Returns the events within this window. With a wrapping window, the events in
    /// (0, max) come first, followed by those in (360 + min, 360).
    pub fn filter(&self, events: &[CrossingEvent]) -> Vec<CrossingEvent> {
        if self.min_deg < 0.0 {
            let low = events
                .iter()
                .filter(|e| e.azimuth_deg > 0.0 && e.azimuth_deg < self.max_deg);
            let high = events
                .iter()
                .filter(|e| e.azimuth_deg > 360.0 + self.min_deg && e.azimuth_deg < 360.0);
            low.chain(high).copied().collect()
        } else {
            events
                .iter()
                .filter(|e| e.azimuth_deg > self.min_deg && e.azimuth_deg < self.max_deg)
                .copied()
                .collect()
        }
    }
}
