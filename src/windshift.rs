//! Wind shift detection and pattern classification.
//!
//! Shift detection is a lagged comparison over the true wind angle series:
//! when the angle has moved more than a threshold since the lookback point, a
//! [`WindShiftEvent`] is emitted. On top of the discrete shift list sit two
//! aggregates: a whole-session pattern classification and a next-shift
//! forecast for the tactician.
//!
//! The forecast is a heuristic read of the recent pattern, not a weather
//! model. Treat it as low-confidence advisory output.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use chrono::{DateTime, Utc};

use crate::types::TelemetrySample;

/// Whether a shift moved the wind angle up or down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub enum ShiftKind {
    /// Positive delta: the boat can point higher
    Lift,
    /// Negative delta: the boat is pushed lower
    Header,
}

impl ShiftKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftKind::Lift => "lift",
            ShiftKind::Header => "header",
        }
    }
}

/// One detected wind shift.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct WindShiftEvent {
    /// Time of the sample that crossed the threshold
    pub timestamp: DateTime<Utc>,
    /// Raw twa delta against the lookback point, signed degrees
    pub shift_deg: f64,
    pub kind: ShiftKind,
}

/// How far back shift detection compares.
///
/// `Samples` is the classic fixed-index lag; it drifts with sample rate, so
/// sessions recorded at other than ~1 Hz can use `Seconds` to compare
/// against the newest sample at least that much older instead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub enum Lookback {
    /// Compare against the sample this many wind-bearing samples back
    Samples(usize),
    /// Compare against the newest wind-bearing sample at least this many
    /// seconds older
    Seconds(f64),
}

/// Tunables for shift detection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct WindShiftConfig {
    pub lookback: Lookback,
    /// Minimum twa delta to call a shift, degrees; the comparison is
    /// strictly greater-than
    pub threshold_deg: f64,
}

impl Default for WindShiftConfig {
    fn default() -> Self {
        Self { lookback: Lookback::Samples(5), threshold_deg: 8.0 }
    }
}

impl WindShiftConfig {
    /// Override the lookback mode.
    pub fn with_lookback(mut self, lookback: Lookback) -> Self {
        self.lookback = lookback;
        self
    }

    /// Override the shift threshold.
    pub fn with_threshold_deg(mut self, deg: f64) -> Self {
        self.threshold_deg = deg;
        self
    }
}

/// Aggregate read of a session's wind behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub enum WindPattern {
    /// Few or no shifts worth sailing to
    Stable,
    /// Shifts alternate; tack on the headers
    Oscillating,
    /// Wind trending right; sail the long tack first
    PersistentRight,
    /// Wind trending left
    PersistentLeft,
    /// Large shifts with no usable structure
    Unstable,
}

impl WindPattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            WindPattern::Stable => "stable",
            WindPattern::Oscillating => "oscillating",
            WindPattern::PersistentRight => "persistent-right",
            WindPattern::PersistentLeft => "persistent-left",
            WindPattern::Unstable => "unstable",
        }
    }
}

/// Classification thresholds for [`classify_pattern`].
///
/// These are policy, not physics: they materially change what a session is
/// called, so they live in configuration where tests and product tuning can
/// reach them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct PatternThresholds {
    /// At most this many shifts still counts as a stable breeze
    pub stable_max_shifts: usize,
    /// Fraction of shifts sharing the dominant sign to call a trend
    pub persistent_min_same_sign: f64,
    /// Minimum number of same-sign runs in the shift sequence to call
    /// oscillation. A sustained swing registers as one run even when the
    /// lagged detector reports it across several consecutive samples.
    pub oscillating_min_sign_runs: usize,
    /// Mean shift magnitude above which swinging air reads as chaos instead
    pub oscillating_max_mean_deg: f64,
}

impl Default for PatternThresholds {
    fn default() -> Self {
        Self {
            stable_max_shifts: 1,
            persistent_min_same_sign: 0.75,
            oscillating_min_sign_runs: 3,
            oscillating_max_mean_deg: 20.0,
        }
    }
}

/// Predicted direction of the next shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub enum ForecastDirection {
    Left,
    Right,
    Stable,
}

/// Advisory next-shift call with a confidence weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct ShiftForecast {
    pub direction: ForecastDirection,
    /// Heuristic confidence in `[0, 0.9]`; never certain
    pub confidence: f64,
}

/// Detect wind shifts across an ordered sample sequence.
///
/// Samples without a true wind angle neither emit nor serve as lookback
/// anchors. The threshold comparison is strict, so a delta exactly at the
/// threshold does not register.
pub fn detect_wind_shifts(
    samples: &[TelemetrySample],
    config: &WindShiftConfig,
) -> Vec<WindShiftEvent> {
    let wind: Vec<(&TelemetrySample, f64)> =
        samples.iter().filter_map(|s| s.twa.map(|twa| (s, twa))).collect();

    let mut events = Vec::new();
    match config.lookback {
        Lookback::Samples(lag) => {
            if lag > 0 {
                for i in lag..wind.len() {
                    if let Some(event) = shift_event(&wind[i], &wind[i - lag], config.threshold_deg)
                    {
                        events.push(event);
                    }
                }
            }
        }
        Lookback::Seconds(age_s) => {
            // Two-pointer sweep: eligible anchors form a prefix that only
            // grows as the current sample advances in time.
            let mut newest_eligible: Option<usize> = None;
            let mut next = 0usize;
            for i in 0..wind.len() {
                while next < i && elapsed_s(wind[next].0, wind[i].0) >= age_s {
                    newest_eligible = Some(next);
                    next += 1;
                }
                if let Some(anchor) = newest_eligible {
                    if let Some(event) = shift_event(&wind[i], &wind[anchor], config.threshold_deg)
                    {
                        events.push(event);
                    }
                }
            }
        }
    }

    debug!("{} wind shifts over {} wind-bearing samples", events.len(), wind.len());
    events
}

fn shift_event(
    current: &(&TelemetrySample, f64),
    anchor: &(&TelemetrySample, f64),
    threshold_deg: f64,
) -> Option<WindShiftEvent> {
    let delta = current.1 - anchor.1;
    if delta.abs() <= threshold_deg {
        return None;
    }
    let kind = if delta > 0.0 { ShiftKind::Lift } else { ShiftKind::Header };
    trace!("wind shift {:+.1} deg ({}) at {}", delta, kind.as_str(), current.0.timestamp);
    Some(WindShiftEvent { timestamp: current.0.timestamp, shift_deg: delta, kind })
}

fn elapsed_s(older: &TelemetrySample, newer: &TelemetrySample) -> f64 {
    (newer.timestamp - older.timestamp).num_milliseconds() as f64 / 1000.0
}

struct ShiftStats {
    mean_magnitude: f64,
    right_count: usize,
    left_count: usize,
    dominant_fraction: f64,
    /// Maximal same-sign runs; one physical swing is one run
    sign_runs: usize,
}

fn shift_stats(shifts: &[WindShiftEvent]) -> ShiftStats {
    let n = shifts.len();
    let mean_magnitude = shifts.iter().map(|s| s.shift_deg.abs()).sum::<f64>() / n as f64;
    let right_count = shifts.iter().filter(|s| s.shift_deg > 0.0).count();
    let left_count = n - right_count;
    let dominant_fraction = right_count.max(left_count) as f64 / n as f64;
    let flips = shifts
        .windows(2)
        .filter(|pair| (pair[0].shift_deg > 0.0) != (pair[1].shift_deg > 0.0))
        .count();
    let sign_runs = if n == 0 { 0 } else { flips + 1 };
    ShiftStats { mean_magnitude, right_count, left_count, dominant_fraction, sign_runs }
}

/// Classify a session's aggregate wind pattern from its shift list.
///
/// Positive shift deltas read as the wind moving right. The decision order
/// is Stable (too few shifts), then Persistent (one sign dominates), then
/// Oscillating (the signs swing back and forth and magnitudes stay
/// workable), with everything else Unstable.
pub fn classify_pattern(
    shifts: &[WindShiftEvent],
    thresholds: &PatternThresholds,
) -> WindPattern {
    if shifts.len() <= thresholds.stable_max_shifts {
        return WindPattern::Stable;
    }

    let stats = shift_stats(shifts);
    let pattern = if stats.dominant_fraction >= thresholds.persistent_min_same_sign {
        if stats.right_count >= stats.left_count {
            WindPattern::PersistentRight
        } else {
            WindPattern::PersistentLeft
        }
    } else if stats.sign_runs >= thresholds.oscillating_min_sign_runs
        && stats.mean_magnitude <= thresholds.oscillating_max_mean_deg
    {
        WindPattern::Oscillating
    } else {
        WindPattern::Unstable
    };

    debug!(
        "wind pattern {}: {} shifts in {} runs, mean {:.1} deg, {:.0}% dominant",
        pattern.as_str(),
        shifts.len(),
        stats.sign_runs,
        stats.mean_magnitude,
        stats.dominant_fraction * 100.0
    );
    pattern
}

/// Guess the next shift from the session pattern.
///
/// Oscillating air predicts the opposite of the last shift; a persistent
/// trend predicts more of the same; stable or unstable air predicts no
/// usable shift. Confidence is capped at 0.9.
pub fn forecast_next_shift(shifts: &[WindShiftEvent], pattern: WindPattern) -> ShiftForecast {
    match pattern {
        WindPattern::Stable => {
            ShiftForecast { direction: ForecastDirection::Stable, confidence: 0.5 }
        }
        WindPattern::Unstable => {
            ShiftForecast { direction: ForecastDirection::Stable, confidence: 0.2 }
        }
        WindPattern::PersistentRight | WindPattern::PersistentLeft => {
            let stats = shift_stats(shifts);
            let direction = if matches!(pattern, WindPattern::PersistentRight) {
                ForecastDirection::Right
            } else {
                ForecastDirection::Left
            };
            ShiftForecast { direction, confidence: stats.dominant_fraction.min(0.9) }
        }
        WindPattern::Oscillating => {
            let stats = shift_stats(shifts);
            // Opposite of the most recent swing
            let direction = match shifts.last() {
                Some(last) if last.shift_deg > 0.0 => ForecastDirection::Left,
                Some(_) => ForecastDirection::Right,
                None => ForecastDirection::Stable,
            };
            // An even lift/header split is the strongest oscillation signal
            let balance = 1.0 - (stats.dominant_fraction - 0.5) * 2.0;
            ShiftForecast { direction, confidence: (balance * 0.8).min(0.9) }
        }
    }
}
