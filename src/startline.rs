//! Start-line bias.
//!
//! A start line is square when it lies perpendicular to the wind. It almost
//! never does, and the end sitting further upwind gives away free distance to
//! whoever starts there. The bias calculator turns the pin and committee-boat
//! marks plus the wind direction into a favored-end call.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::geo::{self, signed_difference};
use crate::types::Position;

/// Bias magnitudes under this read as a square line, degrees. The comparison
/// is strictly less-than, so a bias of exactly 5 already favors an end.
pub const NEUTRAL_BAND_DEG: f64 = 5.0;

/// Which end of the start line is favored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub enum FavoredEnd {
    /// The pin (port) end is upwind
    Pin,
    /// The committee-boat (starboard) end is upwind
    Boat,
    /// The line is square within the neutral band
    Neutral,
}

impl FavoredEnd {
    pub fn as_str(&self) -> &'static str {
        match self {
            FavoredEnd::Pin => "pin",
            FavoredEnd::Boat => "boat",
            FavoredEnd::Neutral => "neutral",
        }
    }
}

/// Start-line bias result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct StartLineBias {
    /// Bearing from the pin to the committee boat, degrees true, [0, 360)
    pub line_heading_deg: f64,
    /// Wind direction minus line heading, normalized to [-180, 180];
    /// positive favors the pin
    pub bias_deg: f64,
    pub favored_end: FavoredEnd,
}

/// Compute line heading, bias angle, and the favored end.
pub fn line_bias(pin: Position, boat_end: Position, wind_direction_deg: f64) -> StartLineBias {
    let line_heading_deg =
        geo::initial_bearing(pin.lat, pin.lon, boat_end.lat, boat_end.lon);
    let bias_deg = signed_difference(wind_direction_deg, line_heading_deg);
    let favored_end = if bias_deg.abs() < NEUTRAL_BAND_DEG {
        FavoredEnd::Neutral
    } else if bias_deg > 0.0 {
        FavoredEnd::Pin
    } else {
        FavoredEnd::Boat
    };

    debug!(
        "start line {:.1} deg, wind {:.1} deg, bias {:+.1} deg: {} end favored",
        line_heading_deg,
        wind_direction_deg,
        bias_deg,
        favored_end.as_str()
    );
    StartLineBias { line_heading_deg, bias_deg, favored_end }
}

/// Perpendicular distance in metres from the boat to the great circle
/// through the pin and committee-boat marks.
///
/// Unsigned: pre-start positioning cares about how far off the line the boat
/// sits, and which side it is on is already obvious aboard.
pub fn distance_to_line_m(boat: Position, pin: Position, boat_end: Position) -> f64 {
    geo::cross_track_distance_m(pin.lat, pin.lon, boat_end.lat, boat_end.lon, boat.lat, boat.lon)
        .abs()
}
