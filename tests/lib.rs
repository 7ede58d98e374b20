extern crate gnss_reflzones as reflzones;

mod arcs;
mod pipeline;
mod zones;

use reflzones::geodesy::GeodeticPosition;
use reflzones::io::{OrbitRecord, OrbitTrack};
use std::path::PathBuf;

/// Range of the synthetic satellites, in meters
pub const SAT_RANGE_M: f64 = 2.0e7;

pub fn test_data_dir() -> PathBuf {
    PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").unwrap_or(".".to_string()))
        .join("data")
        .join("tests")
}

/// One synthetic pass: the satellite rises at `rise_az` from 1.5 to 23.5 degrees in steps of
/// 2 degrees, goes above the discovery band, and sets at `set_az` through the same elevations.
pub fn synthetic_pass(
    receiver: &GeodeticPosition,
    prn: u32,
    rise_az: f64,
    set_az: f64,
) -> Vec<OrbitRecord> {
    let frame = receiver.local_frame();
    let origin = receiver.to_ecef();

    let rising = (0..12).map(|k| (rise_az, 1.5 + 2.0 * k as f64));
    let above = [(rise_az, 40.0), (set_az, 60.0), (set_az, 40.0)];
    let setting = (0..12).rev().map(|k| (set_az, 1.5 + 2.0 * k as f64));

    rising
        .chain(above)
        .chain(setting)
        .enumerate()
        .map(|(i, (az, el))| OrbitRecord {
            prn,
            epoch: 30.0 * i as f64,
            position_m: origin + frame.rho_from_az_el(az, el, SAT_RANGE_M),
        })
        .collect()
}

/// Two satellites seen from the provided receiver: PRN 1 rises at 45 and sets at 315 degrees,
/// PRN 2 rises at 100 and sets at 200 degrees.
pub fn synthetic_track(receiver: &GeodeticPosition) -> OrbitTrack {
    let mut records = synthetic_pass(receiver, 2, 100.0, 200.0);
    records.extend(synthetic_pass(receiver, 1, 45.0, 315.0));
    OrbitTrack::from_records(records)
}

/// Writes the track in the orbit file format.
pub fn write_track(track: &OrbitTrack, path: &std::path::Path) {
    let mut text = String::from("% synthetic orbits\n% prn epoch x y z\n");
    for r in track.records() {
        text.push_str(&format!(
            "{} {} {} {} {}\n",
            r.prn, r.epoch, r.position_m.x, r.position_m.y, r.position_m.z
        ));
    }
    std::fs::write(path, text).unwrap();
}
