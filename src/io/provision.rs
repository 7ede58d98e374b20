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

//! Provisioning of the orbit reference files.
//!
//! Files already present in the store directory are never fetched again. Downloading requires
//! the `download` feature; without it, a missing file is reported as unavailable data.

use std::path::PathBuf;

use super::OrbitStore;
use crate::errors::ZoneError;
use crate::gnss::Constellation;

impl OrbitStore {
    /// Ensures the orbit file of this constellation exists locally and returns its path.
    ///
    /// # Errors
    /// `DataUnavailable` if the file is missing and cannot be fetched, `Io` if it cannot be saved.
    pub fn provision(&self, system: Constellation) -> Result<PathBuf, ZoneError> {
        let path = self.orbit_path(system);
        if path.exists() {
            debug!("{} already provisioned", path.display());
            return Ok(path);
        }

        let url = self.orbit_url(system);
        info!("fetching {system} orbits from {url}");
        fetch(&url, &path)?;
        Ok(path)
    }

    /// Ensures the orbit files of all the constellations exist locally.
    pub fn provision_all(&self) -> Result<Vec<PathBuf>, ZoneError> {
        enum_iterator::all::<Constellation>()
            .map(|system| self.provision(system))
            .collect()
    }
}

#[cfg(feature = "download")]
fn fetch(url: &str, path: &std::path::Path) -> Result<(), ZoneError> {
    use crate::errors::IoSnafu;
    use snafu::ResultExt;

    let unavailable = |msg: String| ZoneError::DataUnavailable { msg };

    let client = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(60))
        .build()
        .map_err(|e| unavailable(format!("failed to create HTTP client: {e}")))?;

    let response = client
        .get(url)
        .send()
        .map_err(|e| unavailable(format!("request to {url} failed: {e}")))?;

    if !response.status().is_success() {
        return Err(unavailable(format!(
            "request to {url} failed: HTTP {}",
            response.status()
        )));
    }

    let bytes = response
        .bytes()
        .map_err(|e| unavailable(format!("reading {url} failed: {e}")))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).context(IoSnafu {
            action: format!("creating {}", parent.display()),
        })?;
    }

    std::fs::write(path, &bytes).context(IoSnafu {
        action: format!("writing {}", path.display()),
    })
}

#[cfg(not(feature = "download"))]
fn fetch(url: &str, path: &std::path::Path) -> Result<(), ZoneError> {
    Err(ZoneError::DataUnavailable {
        msg: format!(
            "{} is missing and downloading {url} requires the `download` feature",
            path.display()
        ),
    })
}
