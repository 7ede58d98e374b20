extern crate pretty_env_logger as pel;

use rstest::*;

use reflzones::arcs::{ArcDetector, AzimuthWindow, CrossingEvent, ElevationBand};
use reflzones::geodesy::GeodeticPosition;
use reflzones::io::OrbitTrack;
use reflzones::linalg::Vector3;
use reflzones::ZoneError;

use crate::synthetic_track;

#[fixture]
fn receiver() -> GeodeticPosition {
    GeodeticPosition::new(0.0, 0.0, 0.0)
}

fn event(azimuth_deg: f64, prn: u32, elevation_deg: f64) -> CrossingEvent {
    CrossingEvent {
        azimuth_deg,
        prn,
        elevation_deg,
    }
}

#[rstest]
fn rising_and_setting_crossings(receiver: GeodeticPosition) {
    let _ = pel::try_init();
    let detector = ArcDetector::new(Vector3::new(6_378_137.0, 0.0, 0.0));
    let track = synthetic_track(&receiver);

    let events = detector
        .rising_setting(&track, &[5.0, 10.0], ElevationBand::Discovery)
        .unwrap();

    for e in &events {
        println!("{e}");
    }

    // Satellites in increasing identifier order, then target elevation, then time
    assert_eq!(
        events,
        vec![
            event(45.0, 1, 5.0),
            event(315.0, 1, 5.0),
            event(45.0, 1, 10.0),
            event(315.0, 1, 10.0),
            event(100.0, 2, 5.0),
            event(200.0, 2, 5.0),
            event(100.0, 2, 10.0),
            event(200.0, 2, 10.0),
        ]
    );
}

#[rstest]
fn detection_is_repeatable(receiver: GeodeticPosition) {
    let detector = ArcDetector::from_geodetic(receiver);
    let track = synthetic_track(&receiver);
    let first = detector
        .rising_setting(&track, &[7.0, 12.0, 22.0], ElevationBand::Discovery)
        .unwrap();
    let second = detector
        .rising_setting(&track, &[7.0, 12.0, 22.0], ElevationBand::Discovery)
        .unwrap();
    assert_eq!(first.len(), 12);
    assert_eq!(first, second);
}

#[rstest]
fn band_limits_the_search(receiver: GeodeticPosition) {
    let detector = ArcDetector::from_geodetic(receiver);
    let track = synthetic_track(&receiver);

    // 22 deg is crossed within the discovery band, but not within the tracking band
    let discovery = detector
        .rising_setting(&track, &[22.0], ElevationBand::Discovery)
        .unwrap();
    assert_eq!(discovery.len(), 4);
    let tracking = detector
        .rising_setting(&track, &[22.0], ElevationBand::Tracking)
        .unwrap();
    assert!(tracking.is_empty());

    let samples = detector.low_elevation_samples(&track, 1, ElevationBand::Tracking);
    assert!(samples.iter().all(|s| s.elevation_deg <= 20.0));
    assert!(samples.windows(2).all(|w| w[0].epoch < w[1].epoch));
    // 1.5 to 19.5 deg, rising then setting
    assert_eq!(samples.len(), 20);
}

#[rstest]
fn targets_out_of_reach(receiver: GeodeticPosition) {
    let detector = ArcDetector::from_geodetic(receiver);
    let track = synthetic_track(&receiver);
    // Above the band, or below every sample
    let events = detector
        .rising_setting(&track, &[30.0, 1.0], ElevationBand::Discovery)
        .unwrap();
    assert!(events.is_empty());
}

#[rstest]
fn empty_track_is_unavailable(receiver: GeodeticPosition) {
    let detector = ArcDetector::from_geodetic(receiver);
    assert_eq!(
        detector.rising_setting(&OrbitTrack::default(), &[5.0], ElevationBand::Discovery),
        Err(ZoneError::DataUnavailable { msg: String::new() })
    );
}

#[rstest]
fn window_on_detected_events(receiver: GeodeticPosition) {
    let detector = ArcDetector::from_geodetic(receiver);
    let track = synthetic_track(&receiver);
    let events = detector
        .rising_setting(&track, &[5.0, 10.0], ElevationBand::Discovery)
        .unwrap();

    let wrapped = AzimuthWindow::new(-50.0, 60.0).filter(&events);
    assert_eq!(
        wrapped,
        vec![
            event(45.0, 1, 5.0),
            event(45.0, 1, 10.0),
            event(315.0, 1, 5.0),
            event(315.0, 1, 10.0),
        ]
    );

    let plain = AzimuthWindow::new(90.0, 210.0).filter(&events);
    assert_eq!(plain.len(), 4);
    assert!(plain.iter().all(|e| e.prn == 2));
}
