extern crate pretty_env_logger as pel;

use approx::{abs_diff_eq, relative_eq};
use rstest::*;

use reflzones::geodesy::GeodeticPosition;
use reflzones::gnss::FrequencyBand;
use reflzones::zones::{
    rotation_angle_deg, to_lonlat, FresnelEllipseParams, GroundEllipse, PlacedEllipse,
    PERIMETER_SAMPLES,
};
use reflzones::ZoneError;

#[rstest]
#[case(FrequencyBand::L2, 10.0, 2.0, 10.472_663_545_222_273, 1.818_558_939_946_741_7, 15.330_468_845_520_437)]
#[case(FrequencyBand::L1, 5.0, 2.0, 27.051_044_272_732_756, 2.357_653_855_689_808, 35.338_150_023_983_11)]
fn fresnel_regression(
    #[case] band: FrequencyBand,
    #[case] elevation_deg: f64,
    #[case] height_m: f64,
    #[case] semi_major_m: f64,
    #[case] semi_minor_m: f64,
    #[case] center_m: f64,
) {
    let _ = pel::try_init();
    let zone = FresnelEllipseParams::compute(band, elevation_deg, height_m).unwrap();
    println!("{zone}");
    assert!(relative_eq!(zone.semi_major_m, semi_major_m, max_relative = 1e-12));
    assert!(relative_eq!(zone.semi_minor_m, semi_minor_m, max_relative = 1e-12));
    assert!(relative_eq!(zone.center_m, center_m, max_relative = 1e-12));
}

#[rstest]
fn zones_shrink_with_elevation() {
    let mut prev: Option<FresnelEllipseParams> = None;
    for el in [5.0, 10.0, 15.0, 20.0, 25.0] {
        let zone = FresnelEllipseParams::compute(FrequencyBand::L1, el, 2.0).unwrap();
        assert!(zone.semi_major_m >= zone.semi_minor_m);
        assert!(zone.center_m > 0.0);
        if let Some(prev) = prev {
            assert!(zone.semi_major_m < prev.semi_major_m);
            assert!(zone.center_m < prev.center_m);
        }
        prev = Some(zone);
    }
}

#[rstest]
#[case(0.0, 2.0)]
#[case(-5.0, 2.0)]
#[case(91.0, 2.0)]
#[case(10.0, 0.0)]
#[case(10.0, -1.0)]
#[case(f64::NAN, 2.0)]
fn invalid_geometry(#[case] elevation_deg: f64, #[case] height_m: f64) {
    assert_eq!(
        FresnelEllipseParams::compute(FrequencyBand::L1, elevation_deg, height_m),
        Err(ZoneError::InvalidInput { msg: String::new() })
    );
}

#[rstest]
fn rotation_convention() {
    assert_eq!(rotation_angle_deg(0.0), 450.0);
    assert_eq!(rotation_angle_deg(90.0), 360.0);
    assert_eq!(rotation_angle_deg(270.0), 180.0);
}

#[rstest]
#[case(0.0)]
#[case(90.0)]
#[case(225.0)]
#[case(359.0)]
fn placed_ellipse_points_along_azimuth(#[case] azimuth_deg: f64) {
    let placed = PlacedEllipse::place(10.0, 2.0, 15.0, azimuth_deg);
    assert_eq!(placed.points.len(), PERIMETER_SAMPLES);

    // Bearing of the center, clockwise from north
    let bearing = placed.center.x.atan2(placed.center.y).to_degrees().rem_euclid(360.0);
    let diff = (bearing - azimuth_deg).rem_euclid(360.0);
    assert!(diff < 1e-9 || 360.0 - diff < 1e-9, "bearing {bearing} for {azimuth_deg}");
    assert!(abs_diff_eq!(placed.center.norm(), 15.0, epsilon = 1e-12));
}

#[rstest]
fn projection_of_receiver_is_exact() {
    let origin = [reflzones::linalg::Vector2::zeros()];
    assert_eq!(to_lonlat(&origin, 39.949, -105.194), vec![(-105.194, 39.949)]);
}

#[rstest]
fn ground_ellipse_ring() {
    let receiver = GeodeticPosition::new(-33.87, 151.21, 20.0);
    let ellipse = GroundEllipse::new(FrequencyBand::E5a, 12.0, 4.5, 300.0, &receiver).unwrap();
    assert!(ellipse.is_closed());
    assert_eq!(ellipse.lonlat.len(), PERIMETER_SAMPLES);
    // North-west of the receiver
    let n = ellipse.lonlat.len() as f64;
    let lon_c = ellipse.lonlat.iter().map(|p| p.0).sum::<f64>() / n;
    let lat_c = ellipse.lonlat.iter().map(|p| p.1).sum::<f64>() / n;
    assert!(lon_c < receiver.longitude_deg);
    assert!(lat_c > receiver.latitude_deg);
}
