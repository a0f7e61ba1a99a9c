//! Whole-session analysis.
//!
//! Bundles every analytic's tuning into one [`AnalysisConfig`] and runs the
//! full pipeline over a session in a single call. The individual analytics
//! stay public and independently callable; this module is the layer product
//! code reaches for first when it has a complete track in hand.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::geo;
use crate::layline::LaylineConfig;
use crate::maneuver::{self, ManeuverConfig, ManeuverEvent};
use crate::polar::{self, Interpolation, PolarTable};
use crate::types::TelemetrySample;
use crate::vmg::VmgTargets;
use crate::windshift::{
    self, PatternThresholds, ShiftForecast, WindPattern, WindShiftConfig, WindShiftEvent,
};

/// Tuning for every analytic in one place.
///
/// The default configuration is a sensible generic keelboat setup with no
/// polar table, so performance scoring reports 100 until calibration data is
/// supplied.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct AnalysisConfig {
    pub vmg: VmgTargets,
    pub layline: LaylineConfig,
    pub maneuver: ManeuverConfig,
    pub wind_shift: WindShiftConfig,
    pub pattern: PatternThresholds,
    /// Polar table for performance scoring
    #[serde(default)]
    pub polar: Option<PolarTable>,
    pub interpolation: Interpolation,
}

impl AnalysisConfig {
    /// Attach a polar table for performance scoring.
    pub fn with_polar(mut self, polar: PolarTable) -> Self {
        self.polar = Some(polar);
        self
    }

    /// Override the polar lookup mode.
    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }
}

/// Everything the engine derives from one session in one pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct SessionAnalysis {
    /// Detected tacks and gybes, in input order
    pub maneuvers: Vec<ManeuverEvent>,
    /// Detected wind shifts, in input order
    pub wind_shifts: Vec<WindShiftEvent>,
    /// Aggregate wind pattern over the whole session
    pub wind_pattern: WindPattern,
    /// Advisory next-shift call derived from the pattern
    pub forecast: ShiftForecast,
    /// Track length summed over consecutive fixes, metres
    pub distance_sailed_m: f64,
    /// Wall time from first to last fix, seconds
    pub duration_s: f64,
    /// Mean maneuver efficiency; `None` when no maneuvers were detected
    pub mean_maneuver_efficiency_pct: Option<f64>,
    /// Mean polar performance over wind-bearing samples; `None` without a
    /// polar table or without wind data
    pub mean_performance_pct: Option<f64>,
}

/// Run every analytic over an ordered session.
///
/// Samples must be ordered by non-decreasing timestamp; each analytic applies
/// its own handling for missing wind fields.
///
/// Shift detection compares raw signed twa, so tacking itself registers as a
/// large shift at each crossing. For a clean read of the breeze over a leg,
/// run the analysis on that leg's samples alone.
pub fn analyze_session(samples: &[TelemetrySample], config: &AnalysisConfig) -> SessionAnalysis {
    let maneuvers = maneuver::detect_maneuvers(samples, &config.maneuver);
    let wind_shifts = windshift::detect_wind_shifts(samples, &config.wind_shift);
    let wind_pattern = windshift::classify_pattern(&wind_shifts, &config.pattern);
    let forecast = windshift::forecast_next_shift(&wind_shifts, wind_pattern);

    let distance_sailed_m = samples
        .windows(2)
        .map(|pair| geo::distance_m(pair[0].lat, pair[0].lon, pair[1].lat, pair[1].lon))
        .sum();

    let duration_s = match (samples.first(), samples.last()) {
        (Some(first), Some(last)) => {
            (last.timestamp - first.timestamp).num_milliseconds() as f64 / 1000.0
        }
        _ => 0.0,
    };

    let mean_maneuver_efficiency_pct = mean(maneuvers.iter().map(|m| m.efficiency_pct));
    let mean_performance_pct = config.polar.as_ref().and_then(|table| {
        mean(samples.iter().filter_map(|sample| {
            let tws = sample.tws?;
            let twa = sample.twa?;
            Some(polar::performance_pct_with(
                sample.sog,
                tws,
                twa,
                Some(table),
                config.interpolation,
            ))
        }))
    });

    debug!(
        "session analyzed: {} samples over {:.0} s, {:.0} m sailed, {} maneuvers, {} shifts, {} air",
        samples.len(),
        duration_s,
        distance_sailed_m,
        maneuvers.len(),
        wind_shifts.len(),
        wind_pattern.as_str()
    );

    SessionAnalysis {
        maneuvers,
        wind_shifts,
        wind_pattern,
        forecast,
        distance_sailed_m,
        duration_s,
        mean_maneuver_efficiency_pct,
        mean_performance_pct,
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for value in values {
        sum += value;
        count += 1;
    }
    (count > 0).then(|| sum / count as f64)
}
