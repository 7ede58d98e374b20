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

use core::fmt;
use enum_iterator::Sequence;
use serde_derive::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::ZoneError;

/// Speed of light in meters per second
pub const SPEED_OF_LIGHT_M_S: f64 = 299_792_458.0;

/// Carrier bands for which a first Fresnel zone can be computed.
#[allow(non_camel_case_types, clippy::upper_case_acronyms)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Sequence, Serialize, Deserialize)]
pub enum FrequencyBand {
    /// GPS L1 (1575.42 MHz)
    L1,
    /// GPS L2 (1227.60 MHz)
    L2,
    /// GPS L5 (1176.45 MHz)
    L5,
    /// GLONASS G1, FDMA center frequency (1602 MHz)
    G1,
    /// GLONASS G2, FDMA center frequency (1246 MHz)
    G2,
    /// Galileo E1 (1575.42 MHz)
    E1,
    /// Galileo E5a (1176.45 MHz)
    E5a,
    /// Galileo E5b (1207.14 MHz)
    E5b,
    /// Galileo E5 AltBOC (1191.795 MHz)
    E5,
    /// Galileo E6 (1278.75 MHz)
    E6,
    /// BeiDou B1I (1561.098 MHz)
    B1I,
    /// BeiDou B2I (1207.14 MHz)
    B2I,
    /// BeiDou B3I (1268.52 MHz)
    B3I,
}

impl FrequencyBand {
    /// Carrier frequency in Hz
    pub const fn frequency_hz(&self) -> f64 {
        match self {
            Self::L1 | Self::E1 => 1575.42e6,
            Self::L2 => 1227.6e6,
            Self::L5 | Self::E5a => 1176.45e6,
            Self::G1 => 1602.0e6,
            Self::G2 => 1246.0e6,
            Self::E5b | Self::B2I => 1207.14e6,
            Self::E5 => 1191.795e6,
            Self::E6 => 1278.75e6,
            Self::B1I => 1561.098e6,
            Self::B3I => 1268.52e6,
        }
    }

    /// Carrier wavelength in meters
    pub fn wavelength_m(&self) -> f64 {
        SPEED_OF_LIGHT_M_S / self.frequency_hz()
    }

    /// Initializes a band from the numeric frequency codes of the reflectometry tool chain
    /// (1, 2, 5 for GPS, 1xx GLONASS, 2xx Galileo, 3xx BeiDou).
    pub fn from_code(code: u16) -> Result<Self, ZoneError> {
        match code {
            1 => Ok(Self::L1),
            2 => Ok(Self::L2),
            5 => Ok(Self::L5),
            101 => Ok(Self::G1),
            102 => Ok(Self::G2),
            201 => Ok(Self::E1),
            205 => Ok(Self::E5a),
            206 => Ok(Self::E6),
            207 => Ok(Self::E5b),
            208 => Ok(Self::E5),
            302 => Ok(Self::B1I),
            306 => Ok(Self::B3I),
            307 => Ok(Self::B2I),
            _ => Err(ZoneError::InvalidInput {
                msg: format!("unknown frequency code {code}"),
            }),
        }
    }

    /// Returns the numeric frequency code of this band
    pub const fn code(&self) -> u16 {
        match self {
            Self::L1 => 1,
            Self::L2 => 2,
            Self::L5 => 5,
            Self::G1 => 101,
            Self::G2 => 102,
            Self::E1 => 201,
            Self::E5a => 205,
            Self::E6 => 206,
            Self::E5b => 207,
            Self::E5 => 208,
            Self::B1I => 302,
            Self::B3I => 306,
            Self::B2I => 307,
        }
    }
}

impl FromStr for FrequencyBand {
    type Err = ZoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_uppercase();
        enum_iterator::all::<Self>()
            .find(|band| band.to_string().to_uppercase() == name)
            .ok_or_else(|| ZoneError::InvalidInput {
                msg: format!("unknown frequency band `{s}`"),
            })
    }
}

impl fmt::Display for FrequencyBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// GNSS constellations with a reference orbit file.
#[allow(clippy::upper_case_acronyms)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Sequence, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Constellation {
    #[default]
    GPS,
    Glonass,
    Galileo,
    BeiDou,
}

impl Constellation {
    /// Resolves a system name, falling back to GPS (with a warning) when the name is not recognized.
    pub fn from_name_or_gps(name: Option<&str>) -> Self {
        match name {
            None => Self::GPS,
            Some(name) => name.parse().unwrap_or_else(|_| {
                warn!("unrecognized satellite system `{name}`, using GPS");
                Self::GPS
            }),
        }
    }

    /// Lower case name as used in configuration files
    pub const fn name(&self) -> &'static str {
        match self {
            Self::GPS => "gps",
            Self::Glonass => "glonass",
            Self::Galileo => "galileo",
            Self::BeiDou => "beidou",
        }
    }

    /// Name of the one day Cartesian orbit reference file for this constellation
    pub fn orbit_file_name(&self) -> String {
        format!("{}orbits_21sep17.txt", self.name().to_uppercase())
    }

    /// Default band for this constellation, used when the configuration does not set one.
    pub const fn default_band(&self) -> FrequencyBand {
        match self {
            Self::GPS => FrequencyBand::L1,
            Self::Glonass => FrequencyBand::G1,
            Self::Galileo => FrequencyBand::E1,
            Self::BeiDou => FrequencyBand::B1I,
        }
    }
}

impl FromStr for Constellation {
    type Err = ZoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        enum_iterator::all::<Self>()
            .find(|system| system.name() == name)
            .ok_or_else(|| ZoneError::InvalidInput {
                msg: format!("unknown satellite system `{s}`"),
            })
    }
}

impl fmt::Display for Constellation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
