//! Telemetry sample type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Position;

/// One GPS/wind fix.
///
/// This is the fundamental data unit that flows through the engine. Every
/// analysis consumes an ordered slice of these and nothing else; the derived
/// values (VMG, maneuvers, shifts, bias, performance) are all computed fresh
/// from it.
///
/// Wind fields are optional because not every boat carries a wind sensor.
/// Analyses that need wind treat `None` as "cannot compute" and skip the
/// sample rather than assuming zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct TelemetrySample {
    /// Fix time, UTC. Sequences must be ordered by non-decreasing timestamp;
    /// duplicates are tolerated.
    pub timestamp: DateTime<Utc>,
    /// Latitude, degrees WGS84
    pub lat: f64,
    /// Longitude, degrees WGS84
    pub lon: f64,
    /// Speed over ground, knots, >= 0
    pub sog: f64,
    /// Course over ground, degrees true, [0, 360)
    pub cog: f64,
    /// Compass heading, degrees true
    #[serde(default)]
    pub hdg: Option<f64>,
    /// Apparent wind angle, signed degrees, port negative / starboard positive
    #[serde(default)]
    pub awa: Option<f64>,
    /// Apparent wind speed, knots
    #[serde(default)]
    pub aws: Option<f64>,
    /// True wind angle, signed degrees, port negative / starboard positive
    #[serde(default)]
    pub twa: Option<f64>,
    /// True wind speed, knots
    #[serde(default)]
    pub tws: Option<f64>,
}

impl TelemetrySample {
    /// Create a sample carrying only the GPS-derived fields.
    pub fn new(timestamp: DateTime<Utc>, lat: f64, lon: f64, sog: f64, cog: f64) -> Self {
        Self {
            timestamp,
            lat,
            lon,
            sog,
            cog,
            hdg: None,
            awa: None,
            aws: None,
            twa: None,
            tws: None,
        }
    }

    /// Attach true wind angle and speed.
    pub fn with_true_wind(mut self, twa: f64, tws: f64) -> Self {
        self.twa = Some(twa);
        self.tws = Some(tws);
        self
    }

    /// Attach apparent wind angle and speed.
    pub fn with_apparent_wind(mut self, awa: f64, aws: f64) -> Self {
        self.awa = Some(awa);
        self.aws = Some(aws);
        self
    }

    /// Attach a compass heading.
    pub fn with_heading(mut self, hdg: f64) -> Self {
        self.hdg = Some(hdg);
        self
    }

    /// The fix location as a [`Position`].
    ///
    /// Sample coordinates come from the upstream GPS pipeline and are trusted
    /// as-is; marks and other caller-entered coordinates go through the
    /// validating [`Position::new`] instead.
    pub fn position(&self) -> Position {
        Position::new_unchecked(self.lat, self.lon)
    }
}
