//! Tack and gybe detection.
//!
//! A maneuver shows up in the wind data as the true wind angle crossing zero:
//! the boat swings through the wind (or through dead downwind) and twa
//! changes sign between two adjacent fixes. Detection is edge-triggered on
//! that sign change; there is no modal state to get stuck in.
//!
//! Each detected crossing is scored against the distance the boat would have
//! covered at its average speed through the turn. The shortfall is the cost
//! of the maneuver; a slow tack that parks the boat scores a low efficiency.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::geo::{self, absolute_difference};
use crate::types::TelemetrySample;
use crate::types::units::KNOTS_TO_MPS;

/// Maneuver classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub enum ManeuverKind {
    /// Turn through the wind, bow crossing the eye
    Tack,
    /// Turn away from the wind, stern crossing the downwind axis
    Gybe,
}

impl ManeuverKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ManeuverKind::Tack => "tack",
            ManeuverKind::Gybe => "gybe",
        }
    }
}

/// One detected maneuver with its efficiency score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct ManeuverEvent {
    /// Time of the first fix on the new tack
    pub timestamp: DateTime<Utc>,
    /// Latitude of the first fix on the new tack
    pub lat: f64,
    /// Longitude of the first fix on the new tack
    pub lon: f64,
    pub kind: ManeuverKind,
    /// Course change across the crossing, degrees, wraparound-aware
    pub heading_change_deg: f64,
    /// Metres given up versus holding average speed through the turn;
    /// negative when the boat came out faster than it went in
    pub lost_distance_m: f64,
    /// Seconds between the two fixes bracketing the crossing
    pub time_in_irons_s: f64,
    /// Actual over expected distance, clamped to [0, 100]; 0 when the
    /// expected distance is 0
    pub efficiency_pct: f64,
}

/// Tunables for maneuver detection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct ManeuverConfig {
    /// Course changes at or above this magnitude classify as a gybe.
    ///
    /// A tack swings the bow through roughly twice the tacking angle
    /// (~90 degrees); a gybe on hot downwind angles swings 150 or more.
    /// The default sits between the two signatures.
    pub gybe_min_heading_change_deg: f64,
}

impl Default for ManeuverConfig {
    fn default() -> Self {
        Self { gybe_min_heading_change_deg: 120.0 }
    }
}

impl ManeuverConfig {
    /// Override the tack/gybe classification boundary.
    pub fn with_gybe_min_heading_change_deg(mut self, deg: f64) -> Self {
        self.gybe_min_heading_change_deg = deg;
        self
    }
}

/// Sign of a true wind angle for crossing detection.
///
/// Zero counts as starboard, so a run like `-5, 0, 5` crosses exactly once.
fn twa_sign(twa: f64) -> i8 {
    if twa < 0.0 { -1 } else { 1 }
}

/// Detect and score every maneuver in an ordered sample sequence.
///
/// Samples without a true wind angle are skipped without resetting detection,
/// so a dropout in the middle of a tack still yields one event spanning the
/// gap. Events come back in input order.
pub fn detect_maneuvers(
    samples: &[TelemetrySample],
    config: &ManeuverConfig,
) -> Vec<ManeuverEvent> {
    let mut events = Vec::new();
    let mut last_wind: Option<(&TelemetrySample, f64)> = None;

    for sample in samples {
        let Some(twa) = sample.twa else { continue };
        if let Some((prev, prev_twa)) = last_wind {
            if twa_sign(prev_twa) != twa_sign(twa) {
                let event = score_crossing(prev, sample, config);
                debug!(
                    "{} at {}: {:.0} deg course change, {:.1}% efficiency, {:.1}m lost",
                    event.kind.as_str(),
                    event.timestamp,
                    event.heading_change_deg,
                    event.efficiency_pct,
                    event.lost_distance_m
                );
                events.push(event);
            }
        }
        last_wind = Some((sample, twa));
    }
    events
}

fn score_crossing(
    prev: &TelemetrySample,
    sample: &TelemetrySample,
    config: &ManeuverConfig,
) -> ManeuverEvent {
    let time_in_irons_s =
        (sample.timestamp - prev.timestamp).num_milliseconds() as f64 / 1000.0;
    let mean_sog = (prev.sog + sample.sog) / 2.0;
    let expected_distance_m = mean_sog * KNOTS_TO_MPS * time_in_irons_s;
    let actual_distance_m = geo::distance_m(prev.lat, prev.lon, sample.lat, sample.lon);
    let lost_distance_m = expected_distance_m - actual_distance_m;

    let efficiency_pct = if expected_distance_m > 0.0 {
        (actual_distance_m / expected_distance_m * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    };

    let heading_change_deg = absolute_difference(prev.cog, sample.cog);
    let kind = if heading_change_deg >= config.gybe_min_heading_change_deg {
        ManeuverKind::Gybe
    } else {
        ManeuverKind::Tack
    };

    ManeuverEvent {
        timestamp: sample.timestamp,
        lat: sample.lat,
        lon: sample.lon,
        kind,
        heading_change_deg,
        lost_distance_m,
        time_in_irons_s,
        efficiency_pct,
    }
}
