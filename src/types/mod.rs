//! Core types for sailing telemetry representation.
//!
//! This module provides the foundational data structures shared by every
//! analysis in the engine.
//!
//! ## Architecture
//!
//! - [`TelemetrySample`] is one GPS/wind fix; analyses consume ordered slices
//!   of these and own no other input state
//! - [`Position`] is a validated WGS84 coordinate pair used for marks and
//!   other caller-entered locations
//! - [`units`] holds the knots/metres-per-second conversion constants used by
//!   all distance math
//!
//! Samples serialize with `serde` so the surrounding dashboard can hand them
//! across its JSON boundary unchanged; with the `tauri` feature the same
//! types derive `specta::Type` for TypeScript generation.

mod position;
mod sample;
pub mod units;

// Re-export all public types
pub use position::Position;
pub use sample::TelemetrySample;

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{DateTime, Utc};
    use proptest::prelude::*;

    fn ts(secs: i64) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(secs, 0).unwrap()
    }

    // Property test strategies
    prop_compose! {
        fn arb_sample()(
            secs in 0i64..4_000_000_000i64,
            lat in -90.0f64..90.0f64,
            lon in -180.0f64..180.0f64,
            sog in 0.0f64..30.0f64,
            cog in 0.0f64..360.0f64,
            hdg in proptest::option::of(0.0f64..360.0f64),
            twa in proptest::option::of(-180.0f64..180.0f64),
            tws in proptest::option::of(0.0f64..45.0f64)
        ) -> TelemetrySample {
            let mut sample = TelemetrySample::new(ts(secs), lat, lon, sog, cog);
            sample.hdg = hdg;
            sample.twa = twa;
            sample.tws = tws;
            sample
        }
    }

    proptest! {
        #[test]
        fn prop_sample_json_roundtrip_preserves_fields(sample in arb_sample()) {
            // Samples cross the dashboard's JSON boundary and back unchanged
            let json = serde_json::to_string(&sample).unwrap();
            let back: TelemetrySample = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(back, sample);
        }

        #[test]
        fn prop_position_accessor_mirrors_fix_coordinates(sample in arb_sample()) {
            let pos = sample.position();
            prop_assert_eq!(pos.lat, sample.lat);
            prop_assert_eq!(pos.lon, sample.lon);
        }

        #[test]
        fn prop_position_validation_matches_wgs84_ranges(
            lat in -200.0f64..200.0f64,
            lon in -400.0f64..400.0f64
        ) {
            let in_range = (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon);
            prop_assert_eq!(Position::new(lat, lon).is_ok(), in_range);
        }

        #[test]
        fn prop_wind_builders_leave_gps_fields_untouched(
            sample in arb_sample(),
            twa in -180.0f64..180.0f64,
            tws in 0.0f64..45.0f64,
            awa in -180.0f64..180.0f64,
            aws in 0.0f64..45.0f64
        ) {
            let built = sample.clone().with_true_wind(twa, tws).with_apparent_wind(awa, aws);
            prop_assert_eq!(built.timestamp, sample.timestamp);
            prop_assert_eq!(built.lat, sample.lat);
            prop_assert_eq!(built.lon, sample.lon);
            prop_assert_eq!(built.sog, sample.sog);
            prop_assert_eq!(built.cog, sample.cog);
            prop_assert_eq!(built.twa, Some(twa));
            prop_assert_eq!(built.tws, Some(tws));
            prop_assert_eq!(built.awa, Some(awa));
            prop_assert_eq!(built.aws, Some(aws));
        }
    }

    // Unit tests for trivial constructors
    #[test]
    fn new_sample_has_no_wind_data() {
        let sample = TelemetrySample::new(ts(0), -33.86, 151.20, 6.0, 45.0);
        assert_eq!(sample.hdg, None);
        assert_eq!(sample.awa, None);
        assert_eq!(sample.aws, None);
        assert_eq!(sample.twa, None);
        assert_eq!(sample.tws, None);
    }

    #[test]
    fn sample_json_omits_nothing_required() {
        // A wind-less sample deserializes from GPS-only JSON
        let json = r#"{
            "timestamp": "2025-01-11T03:00:00Z",
            "lat": -33.86,
            "lon": 151.20,
            "sog": 6.2,
            "cog": 132.0
        }"#;
        let sample: TelemetrySample = serde_json::from_str(json).unwrap();
        assert_eq!(sample.sog, 6.2);
        assert_eq!(sample.twa, None);
    }

    #[test]
    fn heading_builder_sets_hdg() {
        let sample = TelemetrySample::new(ts(10), 0.0, 0.0, 5.0, 90.0).with_heading(88.0);
        assert_eq!(sample.hdg, Some(88.0));
    }
}
