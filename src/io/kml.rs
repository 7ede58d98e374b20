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

use snafu::ResultExt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::errors::{IoSnafu, ZoneError};
use crate::zones::GroundEllipse;

/// KML colors are `aabbggrr`.
const PALETTE: [&str; 5] = [
    "ff00ffff", // yellow
    "ffff0000", // blue
    "ff0000ff", // red
    "ff008000", // green
    "ffffff00", // cyan
];
const WHITE: &str = "ffffffff";
/// Opacity of the filled polygons, out of 255
const FILL_ALPHA: u8 = 50;

/// Line and fill style of one polygon.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ZoneStyle {
    pub line_color: String,
    pub line_width: u32,
    /// None for an outline only polygon
    pub fill_color: Option<String>,
}

impl ZoneStyle {
    /// Style of the polygons of the elevation of this rank in the requested list: the first five
    /// ranks each have their own color, any other (or unknown) rank shares a thin white outline.
    pub fn for_rank(rank: Option<usize>) -> Self {
        match rank.and_then(|k| PALETTE.get(k)) {
            Some(color) => Self {
                line_color: color.to_string(),
                line_width: 3,
                fill_color: Some(format!("{FILL_ALPHA:02x}{}", &color[2..])),
            },
            None => Self::default(),
        }
    }
}

impl Default for ZoneStyle {
    fn default() -> Self {
        Self {
            line_color: WHITE.to_string(),
            line_width: 1,
            fill_color: None,
        }
    }
}

/// Writes ground ellipses as KML polygons, one placemark per ellipse.
#[derive(Clone, Debug, PartialEq)]
pub struct KmlExporter {
    /// Output path, the `.kml` extension is appended to the base name
    pub path: PathBuf,
    /// Elevation angles in the order they were requested, used to pick the styles
    pub elevations_deg: Vec<f64>,
}

impl KmlExporter {
    pub fn new<P: AsRef<Path>>(base_name: P, elevations_deg: &[f64]) -> Self {
        let mut path = base_name.as_ref().as_os_str().to_owned();
        path.push(".kml");
        Self {
            path: PathBuf::from(path),
            elevations_deg: elevations_deg.to_vec(),
        }
    }

    /// Style of the polygon of this elevation
    pub fn style_of(&self, elevation_deg: f64) -> ZoneStyle {
        ZoneStyle::for_rank(
            self.elevations_deg
                .iter()
                .position(|&el| el == elevation_deg),
        )
    }

    /// Writes all the ellipses to the output file and returns its path. An empty set of
    /// ellipses still produces a valid, empty, document.
    pub fn export(&self, ellipses: &[GroundEllipse]) -> Result<PathBuf, ZoneError> {
        let action = || format!("writing {}", self.path.display());

        let file = File::create(&self.path).context(IoSnafu { action: action() })?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer, ellipses)
            .and_then(|_| writer.flush())
            .context(IoSnafu { action: action() })?;

        info!(
            "wrote {} reflection zones to {}",
            ellipses.len(),
            self.path.display()
        );
        Ok(self.path.clone())
    }

    /// Serializes the KML document into the provided writer.
    pub fn write_to<W: Write>(&self, w: &mut W, ellipses: &[GroundEllipse]) -> std::io::Result<()> {
        let doc_name = self
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        writeln!(w, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(w, r#"<kml xmlns="http://www.opengis.net/kml/2.2">"#)?;
        writeln!(w, "  <Document>")?;
        writeln!(w, "    <name>{}</name>", escape(&doc_name))?;

        for ellipse in ellipses {
            let style = self.style_of(ellipse.elevation_deg);
            writeln!(w, "    <Placemark>")?;
            writeln!(w, "      <name>ElevAngle {}</name>", ellipse.elevation_deg as i64)?;
            writeln!(
                w,
                "      <description>azimuth {:.2} deg, a = {:.2} m, b = {:.2} m</description>",
                ellipse.azimuth_deg, ellipse.zone.semi_major_m, ellipse.zone.semi_minor_m
            )?;
            writeln!(w, "      <Style>")?;
            writeln!(
                w,
                "        <LineStyle><color>{}</color><width>{}</width></LineStyle>",
                style.line_color, style.line_width
            )?;
            match &style.fill_color {
                Some(color) => writeln!(w, "        <PolyStyle><color>{color}</color></PolyStyle>")?,
                None => writeln!(w, "        <PolyStyle><fill>0</fill></PolyStyle>")?,
            }
            writeln!(w, "      </Style>")?;
            writeln!(w, "      <Polygon>")?;
            writeln!(w, "        <altitudeMode>relativeToGround</altitudeMode>")?;
            writeln!(w, "        <outerBoundaryIs><LinearRing><coordinates>")?;
            for (lon, lat) in closed_ring(&ellipse.lonlat) {
                writeln!(w, "          {lon:.9},{lat:.9},0")?;
            }
            writeln!(w, "        </coordinates></LinearRing></outerBoundaryIs>")?;
            writeln!(w, "      </Polygon>")?;
            writeln!(w, "    </Placemark>")?;
        }

        writeln!(w, "  </Document>")?;
        writeln!(w, "</kml>")
    }
}

/// KML rings must end on their first vertex: a nearly closing last vertex is snapped onto the
/// first one, otherwise the first vertex is repeated.
fn closed_ring(lonlat: &[(f64, f64)]) -> Vec<(f64, f64)> {
    let mut ring = lonlat.to_vec();
    if let (Some(&first), Some(&last)) = (lonlat.first(), lonlat.last()) {
        if ring.len() > 1 && (first.0 - last.0).abs() < 1e-9 && (first.1 - last.1).abs() < 1e-9 {
            ring.pop();
        }
        ring.push(first);
    }
    ring
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
