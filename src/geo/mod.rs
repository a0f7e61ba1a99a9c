//! Geodesic kernel.
//!
//! Great-circle math on the WGS84 sphere: haversine distance, initial
//! bearing, destination points, and polyline projection. Every analytic
//! module sits on top of these primitives.
//!
//! Functions here take raw degree coordinates and never fail on finite
//! input; range validation happens at the [`Position`](crate::Position)
//! boundary before coordinates reach the kernel. Out-of-range input is a
//! caller bug, not a runtime condition the kernel recovers from.

mod angle;

pub use angle::{absolute_difference, normalize_heading, signed_difference};

/// Mean Earth radius in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Mean Earth radius in kilometres. Derived from [`EARTH_RADIUS_M`] so
/// metre and kilometre call sites can never disagree on the sphere.
pub const EARTH_RADIUS_KM: f64 = EARTH_RADIUS_M / 1000.0;

/// Haversine great-circle distance between two fixes, in metres.
pub fn distance_m(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let dphi = (lat2 - lat1).to_radians();
    let dlambda = (lon2 - lon1).to_radians();

    let a = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_M * c
}

/// Haversine great-circle distance between two fixes, in kilometres.
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    distance_m(lat1, lon1, lat2, lon2) / 1000.0
}

/// Initial bearing (forward azimuth) from the first fix to the second,
/// degrees true in `[0, 360)`.
pub fn initial_bearing(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let dlambda = (lon2 - lon1).to_radians();

    let y = dlambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * dlambda.cos();
    normalize_heading(y.atan2(x).to_degrees())
}

/// The point reached by travelling `distance_m` metres from `(lat, lon)` on
/// the great circle with the given initial heading. Longitude comes back
/// normalized into `[-180, 180)`.
pub fn destination(lat: f64, lon: f64, heading_deg: f64, distance_m: f64) -> (f64, f64) {
    let delta = distance_m / EARTH_RADIUS_M;
    let theta = heading_deg.to_radians();
    let phi1 = lat.to_radians();
    let lambda1 = lon.to_radians();

    let phi2 = (phi1.sin() * delta.cos() + phi1.cos() * delta.sin() * theta.cos()).asin();
    let lambda2 = lambda1
        + (theta.sin() * delta.sin() * phi1.cos()).atan2(delta.cos() - phi1.sin() * phi2.sin());

    (phi2.to_degrees(), normalize_heading(lambda2.to_degrees() + 180.0) - 180.0)
}

/// Project a polyline of `steps + 1` evenly spaced points (origin included)
/// along the great circle from `(lat, lon)` in the given heading for the
/// given total distance.
///
/// Rendering the path as a polyline keeps map overlays on the true curved
/// track instead of a straight rhumb line. `steps == 0` returns just the
/// origin.
pub fn project(
    lat: f64,
    lon: f64,
    heading_deg: f64,
    distance_m: f64,
    steps: usize,
) -> Vec<(f64, f64)> {
    let mut points = Vec::with_capacity(steps + 1);
    points.push((lat, lon));
    for step in 1..=steps {
        let along = distance_m * step as f64 / steps as f64;
        points.push(destination(lat, lon, heading_deg, along));
    }
    points
}

/// Signed cross-track distance in metres from a point to the great circle
/// through `start` and `end`.
///
/// Positive means the point lies to the right of the `start -> end` path,
/// negative to the left.
pub fn cross_track_distance_m(
    start_lat: f64,
    start_lon: f64,
    end_lat: f64,
    end_lon: f64,
    lat: f64,
    lon: f64,
) -> f64 {
    let angular_13 = distance_m(start_lat, start_lon, lat, lon) / EARTH_RADIUS_M;
    let bearing_13 = initial_bearing(start_lat, start_lon, lat, lon).to_radians();
    let bearing_12 = initial_bearing(start_lat, start_lon, end_lat, end_lon).to_radians();

    (angular_13.sin() * (bearing_13 - bearing_12).sin()).asin() * EARTH_RADIUS_M
}

#[cfg(test)]
mod tests {
    use super::*;

    // Harbour marks used across the kernel tests
    const FORT_DENISON: (f64, f64) = (-33.8587, 151.2258);
    const SHARK_ISLAND: (f64, f64) = (-33.8590, 151.2595);

    #[cfg(test)]
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        prop_compose! {
            fn arb_fix()(
                lat in -80.0f64..80.0f64,
                lon in -180.0f64..180.0f64
            ) -> (f64, f64) {
                (lat, lon)
            }
        }

        proptest! {
            #[test]
            fn prop_distance_is_symmetric(a in arb_fix(), b in arb_fix()) {
                let ab = distance_m(a.0, a.1, b.0, b.1);
                let ba = distance_m(b.0, b.1, a.0, a.1);
                prop_assert!((ab - ba).abs() <= 1e-6 * ab.max(1.0));
            }

            #[test]
            fn prop_distance_satisfies_triangle_inequality(
                a in arb_fix(),
                b in arb_fix(),
                c in arb_fix()
            ) {
                let ac = distance_m(a.0, a.1, c.0, c.1);
                let ab = distance_m(a.0, a.1, b.0, b.1);
                let bc = distance_m(b.0, b.1, c.0, c.1);
                prop_assert!(ac <= ab + bc + 1e-6);
            }

            #[test]
            fn prop_metre_and_kilometre_variants_agree(a in arb_fix(), b in arb_fix()) {
                let m = distance_m(a.0, a.1, b.0, b.1);
                let km = distance_km(a.0, a.1, b.0, b.1);
                prop_assert!((km * 1000.0 - m).abs() <= 1e-9 * m.max(1.0));
            }

            #[test]
            fn prop_bearing_lands_in_range(a in arb_fix(), b in arb_fix()) {
                let bearing = initial_bearing(a.0, a.1, b.0, b.1);
                prop_assert!((0.0..360.0).contains(&bearing));
            }

            #[test]
            fn prop_destination_round_trips_through_distance(
                origin in arb_fix(),
                heading in 0.0f64..360.0f64,
                dist in 1.0f64..100_000.0f64
            ) {
                let (lat2, lon2) = destination(origin.0, origin.1, heading, dist);
                prop_assert!((-90.0..=90.0).contains(&lat2));
                prop_assert!((-180.0..180.0).contains(&lon2));

                let back = distance_m(origin.0, origin.1, lat2, lon2);
                prop_assert!((back - dist).abs() <= 1e-6 * dist + 0.01, "dist {} back {}", dist, back);
            }

            #[test]
            fn prop_projection_has_expected_shape(
                origin in arb_fix(),
                heading in 0.0f64..360.0f64,
                dist in 10.0f64..10_000.0f64,
                steps in 1usize..100
            ) {
                let points = project(origin.0, origin.1, heading, dist, steps);
                prop_assert_eq!(points.len(), steps + 1);
                prop_assert_eq!(points[0], origin);

                // The endpoint sits the full projection distance out
                let last = points[points.len() - 1];
                let reach = distance_m(origin.0, origin.1, last.0, last.1);
                prop_assert!((reach - dist).abs() <= 1e-6 * dist + 0.01);
            }
        }
    }

    #[test]
    fn harbour_marks_distance() {
        let (d_lat, d_lon) = FORT_DENISON;
        let (s_lat, s_lon) = SHARK_ISLAND;
        let d = distance_m(d_lat, d_lon, s_lat, s_lon);
        assert!((d - 3111.958).abs() < 0.01, "got {d}");
        let km = distance_km(d_lat, d_lon, s_lat, s_lon);
        assert!((km - 3.111958).abs() < 1e-5);
    }

    #[test]
    fn harbour_marks_bearing() {
        let (d_lat, d_lon) = FORT_DENISON;
        let (s_lat, s_lon) = SHARK_ISLAND;
        let b = initial_bearing(d_lat, d_lon, s_lat, s_lon);
        assert!((b - 90.6236).abs() < 0.001, "got {b}");
    }

    #[test]
    fn zero_distance_everywhere() {
        let (lat, lon) = FORT_DENISON;
        assert_eq!(distance_m(lat, lon, lat, lon), 0.0);
    }

    #[test]
    fn destination_due_east_one_kilometre() {
        let (lat, lon) = FORT_DENISON;
        let (lat2, lon2) = destination(lat, lon, 90.0, 1000.0);
        assert!((lat2 - -33.8586995).abs() < 1e-6);
        assert!((lon2 - 151.2366298).abs() < 1e-6);
    }

    #[test]
    fn projection_with_zero_steps_is_just_the_origin() {
        let (lat, lon) = FORT_DENISON;
        let points = project(lat, lon, 45.0, 500.0, 0);
        assert_eq!(points, vec![(lat, lon)]);
    }

    #[test]
    fn cross_track_sign_follows_path_side() {
        // Start line laid roughly ENE; a point south of it is to the right
        let pin = (-33.8612, 151.2290);
        let boat = (-33.8605, 151.2310);
        let south = (-33.8620, 151.2300);
        let xt = cross_track_distance_m(pin.0, pin.1, boat.0, boat.1, south.0, south.1);
        assert!((xt - 117.834).abs() < 0.01, "got {xt}");

        // Mirror the point to the other side and the sign flips
        let north = (-33.8598, 151.2295);
        let xt_north = cross_track_distance_m(pin.0, pin.1, boat.0, boat.1, north.0, north.1);
        assert!(xt_north < 0.0, "got {xt_north}");
    }
}
