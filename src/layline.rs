//! Layline projection.
//!
//! A layline is the closing track on one tack: sail to it, tack once, fetch
//! the mark. The projector materializes both laylines as fixed-length
//! great-circle polylines from the boat's current position so the dashboard
//! can overlay them on the chart.
//!
//! The rays have a configured length and are not clipped against the mark;
//! whether they reach it is exactly what the tactician reads off the overlay.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::geo::{self, normalize_heading};
use crate::types::Position;

/// Which tack a layline closes the mark on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub enum Tack {
    Port,
    Starboard,
}

/// One projected layline as a chart polyline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct Layline {
    /// Ordered `(lat, lon)` polyline, boat position first
    pub points: Vec<(f64, f64)>,
    /// Heading of the ray, degrees true
    pub heading_deg: f64,
    pub tack: Tack,
}

/// The port/starboard layline pair for one wind reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct LaylinePair {
    pub port: Layline,
    pub starboard: Layline,
}

/// Tunables for layline projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct LaylineConfig {
    /// Tacking angle off the true wind, degrees
    pub tacking_angle_deg: f64,
    /// Ray length, metres
    pub length_m: f64,
    /// Polyline segment count; each ray carries `segments + 1` points
    pub segments: usize,
}

impl Default for LaylineConfig {
    fn default() -> Self {
        Self { tacking_angle_deg: 42.0, length_m: 500.0, segments: 50 }
    }
}

impl LaylineConfig {
    /// Override the tacking angle.
    pub fn with_tacking_angle_deg(mut self, deg: f64) -> Self {
        self.tacking_angle_deg = deg;
        self
    }

    /// Override the ray length.
    pub fn with_length_m(mut self, metres: f64) -> Self {
        self.length_m = metres;
        self
    }

    /// Override the segment count.
    pub fn with_segments(mut self, segments: usize) -> Self {
        self.segments = segments;
        self
    }
}

/// Project the port and starboard laylines from the boat's position.
///
/// Port ray heading is `wind + tacking_angle`, starboard is
/// `wind - tacking_angle`, both wrapped into `[0, 360)`.
pub fn project_laylines(
    position: Position,
    mark: Position,
    wind_direction_deg: f64,
    config: &LaylineConfig,
) -> LaylinePair {
    let mark_distance = geo::distance_m(position.lat, position.lon, mark.lat, mark.lon);
    let mark_bearing = geo::initial_bearing(position.lat, position.lon, mark.lat, mark.lon);
    debug!(
        "projecting laylines: mark {:.0}m off at {:.0} deg, wind {:.0} deg, rays {:.0}m",
        mark_distance, mark_bearing, wind_direction_deg, config.length_m
    );

    let port_heading = normalize_heading(wind_direction_deg + config.tacking_angle_deg);
    let starboard_heading = normalize_heading(wind_direction_deg - config.tacking_angle_deg);

    LaylinePair {
        port: ray(position, port_heading, Tack::Port, config),
        starboard: ray(position, starboard_heading, Tack::Starboard, config),
    }
}

fn ray(position: Position, heading_deg: f64, tack: Tack, config: &LaylineConfig) -> Layline {
    Layline {
        points: geo::project(position.lat, position.lon, heading_deg, config.length_m, config.segments),
        heading_deg,
        tack,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::distance_m;

    fn boat() -> Position {
        Position::new_unchecked(-33.8600, 151.2300)
    }

    fn mark() -> Position {
        Position::new_unchecked(-33.8520, 151.2320)
    }

    #[cfg(test)]
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_headings_mirror_around_the_wind(
                wind in 0.0f64..360.0f64,
                theta in 1.0f64..89.0f64
            ) {
                let config = LaylineConfig::default().with_tacking_angle_deg(theta).with_segments(1);
                let pair = project_laylines(boat(), mark(), wind, &config);

                // port - starboard == 2 theta (mod 360)
                let spread = normalize_heading(pair.port.heading_deg - pair.starboard.heading_deg);
                prop_assert!((spread - normalize_heading(2.0 * theta)).abs() < 1e-9);
            }

            #[test]
            fn prop_rays_carry_segments_plus_one_points(
                wind in 0.0f64..360.0f64,
                segments in 1usize..120
            ) {
                let config = LaylineConfig::default().with_segments(segments);
                let pair = project_laylines(boat(), mark(), wind, &config);
                prop_assert_eq!(pair.port.points.len(), segments + 1);
                prop_assert_eq!(pair.starboard.points.len(), segments + 1);
            }

            #[test]
            fn prop_rays_span_the_configured_length(
                wind in 0.0f64..360.0f64,
                length in 50.0f64..5_000.0f64
            ) {
                let config = LaylineConfig::default().with_length_m(length);
                let pair = project_laylines(boat(), mark(), wind, &config);
                for line in [&pair.port, &pair.starboard] {
                    let first = line.points[0];
                    let last = line.points[line.points.len() - 1];
                    let reach = distance_m(first.0, first.1, last.0, last.1);
                    prop_assert!((reach - length).abs() < 0.01, "reach {} want {}", reach, length);
                }
            }
        }
    }

    #[test]
    fn default_headings_for_a_southerly() {
        let pair = project_laylines(boat(), mark(), 180.0, &LaylineConfig::default());
        assert_eq!(pair.port.heading_deg, 222.0);
        assert_eq!(pair.starboard.heading_deg, 138.0);
        assert_eq!(pair.port.tack, Tack::Port);
        assert_eq!(pair.starboard.tack, Tack::Starboard);
    }

    #[test]
    fn headings_wrap_across_north() {
        let pair = project_laylines(boat(), mark(), 350.0, &LaylineConfig::default());
        assert_eq!(pair.port.heading_deg, 32.0);
        assert_eq!(pair.starboard.heading_deg, 308.0);
    }

    #[test]
    fn rays_start_at_the_boat() {
        let pair = project_laylines(boat(), mark(), 200.0, &LaylineConfig::default());
        assert_eq!(pair.port.points[0], (boat().lat, boat().lon));
        assert_eq!(pair.starboard.points[0], (boat().lat, boat().lon));
    }

    #[test]
    fn default_config_matches_dashboard_expectations() {
        let config = LaylineConfig::default();
        assert_eq!(config.tacking_angle_deg, 42.0);
        assert_eq!(config.length_m, 500.0);
        assert_eq!(config.segments, 50);
    }
}
