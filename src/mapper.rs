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

//! One call pipeline: crossing detection, azimuth filtering, ellipse construction and export.

use serde_derive::{Deserialize, Serialize};
use snafu::prelude::*;
use std::path::{Path, PathBuf};
use typed_builder::TypedBuilder;

use crate::arcs::{ArcDetector, AzimuthWindow, CrossingEvent, ElevationBand};
use crate::errors::{ConfigSnafu, InvalidInputSnafu, IoSnafu, ZoneError};
use crate::geodesy::GeodeticPosition;
use crate::gnss::{Constellation, FrequencyBand};
use crate::io::orbits::DEFAULT_BASE_URL;
use crate::io::{azlist, ConfigRepr, KmlExporter, OrbitStore, OrbitTrack};
use crate::zones::GroundEllipse;

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Configuration of one reflection zone mapping run.
///
/// Loadable from YAML through [ConfigRepr], or built in code:
/// ```
/// use gnss_reflzones::prelude::*;
///
/// let cfg = ZoneMapperConfig::builder()
///     .receiver(GeodeticPosition::new(39.949, -105.194, 1728.0))
///     .reflector_height_m(2.0)
///     .elevations_deg(vec![5.0, 10.0, 15.0])
///     .output("p041")
///     .orbit_dir("Files")
///     .build();
/// assert!(cfg.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[builder(doc)]
pub struct ZoneMapperConfig {
    /// Satellite system name, GPS when unset or not recognized
    #[builder(default, setter(strip_option, into))]
    #[serde(default)]
    pub system: Option<String>,
    /// Carrier band, the default band of the system when unset
    #[builder(default, setter(strip_option))]
    #[serde(default)]
    pub band: Option<FrequencyBand>,
    /// Height of the antenna above the reflecting surface, in meters
    pub reflector_height_m: f64,
    pub receiver: GeodeticPosition,
    /// Target elevation angles, in degrees. Their order sets the KML styles.
    pub elevations_deg: Vec<f64>,
    #[builder(default, setter(strip_option))]
    #[serde(default)]
    pub azimuth_window: Option<AzimuthWindow>,
    /// Base name of the output files, extensions are appended
    #[builder(setter(into))]
    pub output: PathBuf,
    /// Directory of the orbit reference files
    #[builder(setter(into))]
    pub orbit_dir: PathBuf,
    #[builder(default = default_base_url(), setter(into))]
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[builder(default)]
    #[serde(default)]
    pub elevation_band: ElevationBand,
    /// Also write the crossing events as CSV
    #[builder(default)]
    #[serde(default)]
    pub write_csv: bool,
}

impl ConfigRepr for ZoneMapperConfig {}

impl ZoneMapperConfig {
    pub fn constellation(&self) -> Constellation {
        Constellation::from_name_or_gps(self.system.as_deref())
    }

    pub fn band(&self) -> FrequencyBand {
        self.band
            .unwrap_or_else(|| self.constellation().default_band())
    }

    /// Path of the KML output
    pub fn kml_path(&self) -> PathBuf {
        with_extension_appended(&self.output, "kml")
    }

    /// Path of the CSV output
    pub fn csv_path(&self) -> PathBuf {
        with_extension_appended(&self.output, "csv")
    }

    /// Checks the configuration before any data is read.
    ///
    /// # Errors
    /// `InvalidInput` if there is no target elevation, if an elevation is outside (0, 90]
    /// degrees, or if the reflector height is not strictly positive.
    pub fn validate(&self) -> Result<(), ZoneError> {
        ensure!(
            !self.elevations_deg.is_empty(),
            InvalidInputSnafu {
                msg: "at least one target elevation angle is required"
            }
        );
        for &el in &self.elevations_deg {
            ensure!(
                el.is_finite() && el > 0.0 && el <= 90.0,
                InvalidInputSnafu {
                    msg: format!("target elevation {el} deg is not in (0, 90]")
                }
            );
        }
        ensure!(
            self.reflector_height_m.is_finite() && self.reflector_height_m > 0.0,
            InvalidInputSnafu {
                msg: format!(
                    "reflector height {} m must be positive",
                    self.reflector_height_m
                )
            }
        );
        Ok(())
    }
}

fn with_extension_appended(base: &Path, ext: &str) -> PathBuf {
    let mut path = base.as_os_str().to_owned();
    path.push(".");
    path.push(ext);
    PathBuf::from(path)
}

/// What one run produced.
#[derive(Clone, Debug, PartialEq)]
pub struct ZoneSummary {
    /// Crossing events kept after the azimuth window
    pub events: Vec<CrossingEvent>,
    pub ellipses: Vec<GroundEllipse>,
    pub kml_path: PathBuf,
    pub csv_path: Option<PathBuf>,
}

/// Maps the first Fresnel zones of the satellites rising and setting through the target
/// elevations, as seen from one receiver.
#[derive(Clone, Debug)]
pub struct ZoneMapper {
    config: ZoneMapperConfig,
    store: OrbitStore,
    detector: ArcDetector,
}

impl ZoneMapper {
    pub fn new(config: ZoneMapperConfig) -> Result<Self, ZoneError> {
        config.validate()?;
        let store = OrbitStore::new(&config.orbit_dir).with_base_url(&config.base_url);
        let detector = ArcDetector::from_geodetic(config.receiver);
        Ok(Self {
            config,
            store,
            detector,
        })
    }

    /// Initializes the mapper from a YAML configuration file.
    pub fn from_config_file<P: AsRef<Path>>(path: P) -> Result<Self, ZoneError> {
        let config = ZoneMapperConfig::load(path).context(ConfigSnafu)?;
        Self::new(config)
    }

    pub fn config(&self) -> &ZoneMapperConfig {
        &self.config
    }

    pub fn store(&self) -> &OrbitStore {
        &self.store
    }

    /// Crossing events of the track, restricted to the azimuth window if one is configured.
    pub fn crossing_events(&self, track: &OrbitTrack) -> Result<Vec<CrossingEvent>, ZoneError> {
        let events = self.detector.rising_setting(
            track,
            &self.config.elevations_deg,
            self.config.elevation_band,
        )?;

        Ok(match &self.config.azimuth_window {
            Some(window) => {
                let kept = window.filter(&events);
                debug!(
                    "azimuth window [{}, {}] keeps {} of {} events",
                    window.min_deg,
                    window.max_deg,
                    kept.len(),
                    events.len()
                );
                kept
            }
            None => events,
        })
    }

    /// One ground ellipse per crossing event.
    pub fn ellipses(&self, events: &[CrossingEvent]) -> Result<Vec<GroundEllipse>, ZoneError> {
        let band = self.config.band();
        events
            .iter()
            .map(|event| {
                GroundEllipse::new(
                    band,
                    event.elevation_deg,
                    self.config.reflector_height_m,
                    event.azimuth_deg,
                    &self.config.receiver,
                )
            })
            .collect()
    }

    /// Loads (and provisions if needed) the orbit track of the configured system, then runs.
    pub fn run(&self) -> Result<ZoneSummary, ZoneError> {
        let track = self.store.track(self.config.constellation())?;
        self.run_with_track(&track)
    }

    /// Runs the whole pipeline on an orbit track already in memory and writes the outputs.
    pub fn run_with_track(&self, track: &OrbitTrack) -> Result<ZoneSummary, ZoneError> {
        info!(
            "mapping {} reflection zones on {} for h = {} m",
            self.config.constellation(),
            self.config.band(),
            self.config.reflector_height_m
        );

        let events = self.crossing_events(track)?;
        if events.is_empty() {
            warn!("no satellite crosses the target elevations, the zone map is empty");
        }
        let ellipses = self.ellipses(&events)?;

        if let Some(parent) = self.config.output.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).context(IoSnafu {
                    action: format!("creating {}", parent.display()),
                })?;
            }
        }

        let kml_path =
            KmlExporter::new(&self.config.output, &self.config.elevations_deg).export(&ellipses)?;

        let csv_path = if self.config.write_csv {
            Some(azlist::write_events(self.config.csv_path(), &events)?)
        } else {
            None
        };

        Ok(ZoneSummary {
            events,
            ellipses,
            kml_path,
            csv_path,
        })
    }
}
