extern crate pretty_env_logger as pel;

use rstest::*;
use tempfile::TempDir;

use reflzones::arcs::ElevationBand;
use reflzones::geodesy::GeodeticPosition;
use reflzones::gnss::{Constellation, FrequencyBand};
use reflzones::io::azlist::read_events;
use reflzones::io::{ConfigRepr, OrbitStore, OrbitTrack};
use reflzones::mapper::{ZoneMapper, ZoneMapperConfig};
use reflzones::ZoneError;

use crate::{synthetic_track, test_data_dir, write_track};

#[fixture]
fn workdir() -> TempDir {
    let _ = pel::try_init();
    tempfile::tempdir().unwrap()
}

fn equator_config(workdir: &TempDir) -> ZoneMapperConfig {
    ZoneMapperConfig::builder()
        .receiver(GeodeticPosition::new(0.0, 0.0, 0.0))
        .reflector_height_m(2.0)
        .elevations_deg(vec![5.0, 10.0])
        .output(workdir.path().join("out").join("equator"))
        .orbit_dir(workdir.path().join("Files"))
        // Nothing listens there, so a missing orbit file is never fetched
        .base_url("http://127.0.0.1:9")
        .write_csv(true)
        .build()
}

#[rstest]
fn end_to_end(workdir: TempDir) {
    let cfg = equator_config(&workdir);
    std::fs::create_dir_all(&cfg.orbit_dir).unwrap();
    let track = synthetic_track(&cfg.receiver);
    write_track(
        &track,
        &cfg.orbit_dir.join(Constellation::GPS.orbit_file_name()),
    );

    let mapper = ZoneMapper::new(cfg).unwrap();
    let summary = mapper.run().unwrap();

    assert_eq!(summary.events.len(), 8);
    assert_eq!(summary.ellipses.len(), 8);
    assert!(summary.ellipses.iter().all(|e| e.is_closed()));
    assert!(summary
        .ellipses
        .iter()
        .all(|e| e.zone.band == FrequencyBand::L1 && e.zone.height_m == 2.0));

    assert_eq!(summary.kml_path, workdir.path().join("out").join("equator.kml"));
    let kml = std::fs::read_to_string(&summary.kml_path).unwrap();
    assert_eq!(kml.matches("<Placemark>").count(), 8);
    assert_eq!(kml.matches("<name>ElevAngle 5</name>").count(), 4);
    assert_eq!(kml.matches("<name>ElevAngle 10</name>").count(), 4);
    assert_eq!(kml.matches("relativeToGround").count(), 8);
    // 5 deg is yellow, 10 deg is blue
    assert_eq!(kml.matches("<color>3200ffff</color>").count(), 4);
    assert_eq!(kml.matches("<color>32ff0000</color>").count(), 4);

    let csv_path = summary.csv_path.unwrap();
    assert_eq!(read_events(csv_path).unwrap(), summary.events);
}

#[rstest]
fn window_and_empty_map(workdir: TempDir) {
    let mut cfg = equator_config(&workdir);
    cfg.write_csv = false;
    let track = synthetic_track(&cfg.receiver);

    // Only the rising side of PRN 2 is within (90, 110)
    cfg.azimuth_window = Some(reflzones::arcs::AzimuthWindow::new(90.0, 110.0));
    let summary = ZoneMapper::new(cfg.clone())
        .unwrap()
        .run_with_track(&track)
        .unwrap();
    assert_eq!(summary.events.len(), 2);
    assert!(summary.events.iter().all(|e| e.prn == 2 && e.azimuth_deg == 100.0));
    assert!(summary.csv_path.is_none());

    // No satellite in (0, 10) still yields a valid document
    cfg.azimuth_window = Some(reflzones::arcs::AzimuthWindow::new(0.0, 10.0));
    let summary = ZoneMapper::new(cfg).unwrap().run_with_track(&track).unwrap();
    assert!(summary.ellipses.is_empty());
    let kml = std::fs::read_to_string(&summary.kml_path).unwrap();
    assert!(kml.contains("<Document>"));
    assert!(!kml.contains("<Placemark>"));
}

#[rstest]
fn missing_orbits_are_unavailable(workdir: TempDir) {
    let mapper = ZoneMapper::new(equator_config(&workdir)).unwrap();
    assert_eq!(
        mapper.run(),
        Err(ZoneError::DataUnavailable { msg: String::new() })
    );
}

#[rstest]
fn orbit_file_round_trip(workdir: TempDir) {
    let receiver = GeodeticPosition::new(0.0, 0.0, 0.0);
    let track = synthetic_track(&receiver);
    let store = OrbitStore::new(workdir.path());
    let path = store.orbit_path_for(Some("gps"));
    write_track(&track, &path);

    let loaded = store.track(Constellation::GPS).unwrap();
    assert_eq!(loaded.len(), track.len());
    assert_eq!(loaded.satellites(), track.satellites());
    assert_eq!(loaded.path.as_deref(), Some(path.as_path()));

    std::fs::write(&path, "% nothing\n").unwrap();
    assert_eq!(
        OrbitTrack::load(&path),
        Err(ZoneError::DataUnavailable { msg: String::new() })
    );
    std::fs::write(&path, "1 0.0 1.0 2.0\n").unwrap();
    assert!(matches!(
        OrbitTrack::load(&path),
        Err(ZoneError::Parse { line: 1, .. })
    ));
}

#[rstest]
fn yaml_configuration() {
    let cfg = ZoneMapperConfig::load(test_data_dir().join("config").join("mapper.yaml")).unwrap();
    assert_eq!(cfg.constellation(), Constellation::Glonass);
    assert_eq!(cfg.band(), FrequencyBand::G2);
    assert_eq!(cfg.elevations_deg, vec![5.0, 10.0, 15.0]);
    assert_eq!(cfg.elevation_band, ElevationBand::Tracking);
    assert_eq!(cfg.azimuth_window.unwrap().min_deg, -30.0);
    assert!(cfg.write_csv);
    assert_eq!(cfg.receiver.height_m, 1728.0);

    let many =
        ZoneMapperConfig::load_many(test_data_dir().join("config").join("many_mappers.yaml"))
            .unwrap();
    assert_eq!(many.len(), 2);
    assert_eq!(many[0].band(), FrequencyBand::L1);
    assert_eq!(many[0].elevation_band, ElevationBand::Discovery);
    assert!(many[0].azimuth_window.is_none());
    assert_eq!(many[1].band(), FrequencyBand::B1I);

    assert!(ZoneMapper::from_config_file(test_data_dir().join("config").join("nope.yaml")).is_err());
}
