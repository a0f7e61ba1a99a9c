//! Synthetic telemetry builders shared by tests and benchmarks.
//!
//! Real race logs are large and awkward to ship, so these builders generate
//! deterministic sessions with known geometry instead: the boat advances
//! from sample to sample at exactly the recorded speed and course, which
//! lets assertions pin exact maneuver counts, shift magnitudes, and
//! distances.

#![cfg(any(test, feature = "benchmark"))]

use chrono::{DateTime, TimeDelta, Utc};

use crate::geo;
use crate::types::TelemetrySample;
use crate::types::units::KNOTS_TO_MPS;

/// Wind direction every generated session sails in, degrees true.
pub const GENERATED_WIND_FROM_DEG: f64 = 85.0;

/// Fixed start instant so generated sessions are reproducible run to run.
pub fn session_start() -> DateTime<Utc> {
    DateTime::UNIX_EPOCH + TimeDelta::seconds(1_766_989_800)
}

/// Builds a telemetry session leg by leg.
///
/// Each appended sample is recorded at the builder's current position, after
/// which the position advances along the sample's course at its speed for
/// one interval. Distance computed over the output therefore agrees with the
/// speeds that generated it.
#[derive(Debug, Clone)]
pub struct SessionBuilder {
    time: DateTime<Utc>,
    lat: f64,
    lon: f64,
    interval: TimeDelta,
    tws: Option<f64>,
    samples: Vec<TelemetrySample>,
}

impl SessionBuilder {
    /// Start a session off Fort Denison at one sample per second in a
    /// 16-knot breeze.
    pub fn new() -> Self {
        Self {
            time: session_start(),
            lat: -33.8587,
            lon: 151.2258,
            interval: TimeDelta::seconds(1),
            tws: Some(16.0),
            samples: Vec::new(),
        }
    }

    /// Move the start fix.
    pub fn with_start(mut self, lat: f64, lon: f64) -> Self {
        self.lat = lat;
        self.lon = lon;
        self
    }

    /// Change the sample interval.
    pub fn with_interval_ms(mut self, millis: i64) -> Self {
        self.interval = TimeDelta::milliseconds(millis);
        self
    }

    /// Change the true wind speed attached alongside each twa, or drop it.
    pub fn with_tws(mut self, tws: Option<f64>) -> Self {
        self.tws = tws;
        self
    }

    /// Append `count` samples holding course and speed.
    ///
    /// `twa_deg: None` models a wind-sensor dropout; those samples carry GPS
    /// fields only.
    pub fn leg(mut self, count: usize, sog_kn: f64, cog_deg: f64, twa_deg: Option<f64>) -> Self {
        for _ in 0..count {
            self.push(sog_kn, cog_deg, twa_deg);
        }
        self
    }

    /// Append samples whose twa swings sinusoidally around `base_twa_deg`.
    pub fn oscillating_leg(
        mut self,
        count: usize,
        sog_kn: f64,
        cog_deg: f64,
        base_twa_deg: f64,
        amplitude_deg: f64,
        period_samples: usize,
    ) -> Self {
        let period = period_samples.max(1) as f64;
        for i in 0..count {
            let phase = i as f64 / period * std::f64::consts::TAU;
            let twa = base_twa_deg + amplitude_deg * phase.sin();
            self.push(sog_kn, cog_deg, Some(twa));
        }
        self
    }

    pub fn build(self) -> Vec<TelemetrySample> {
        self.samples
    }

    fn push(&mut self, sog_kn: f64, cog_deg: f64, twa_deg: Option<f64>) {
        let mut sample = TelemetrySample::new(self.time, self.lat, self.lon, sog_kn, cog_deg);
        sample.twa = twa_deg;
        sample.tws = self.tws.filter(|_| twa_deg.is_some());
        self.samples.push(sample);

        let step_s = self.interval.num_milliseconds() as f64 / 1000.0;
        let run_m = sog_kn * KNOTS_TO_MPS * step_s;
        let (lat, lon) = geo::destination(self.lat, self.lon, cog_deg, run_m);
        self.lat = lat;
        self.lon = lon;
        self.time = self.time + self.interval;
    }
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// An upwind beat: `boards` boards of `samples_per_board`, tacking between
/// them.
///
/// Boards alternate starboard (heading 040, twa +45) and port (heading 130,
/// twa -45) against the fixed generated breeze, so consecutive boards differ
/// by 90 degrees of heading and each boundary is exactly one twa sign
/// change.
pub fn upwind_beat(boards: usize, samples_per_board: usize) -> Vec<TelemetrySample> {
    let mut builder = SessionBuilder::new();
    for board in 0..boards {
        let (cog, twa) = if board % 2 == 0 { (40.0, 45.0) } else { (130.0, -45.0) };
        builder = builder.leg(samples_per_board, 6.5, cog, Some(twa));
    }
    builder.build()
}

/// A hot-angle downwind run with gybes between boards.
///
/// Headings swing 150 degrees through the stern at each boundary, which is
/// what separates a gybe from a tack in maneuver classification.
pub fn downwind_run(boards: usize, samples_per_board: usize) -> Vec<TelemetrySample> {
    let mut builder = SessionBuilder::new();
    for board in 0..boards {
        let (cog, twa) = if board % 2 == 0 { (340.0, 105.0) } else { (190.0, -105.0) };
        builder = builder.leg(samples_per_board, 12.0, cog, Some(twa));
    }
    builder.build()
}

/// A single starboard board in breeze oscillating +-15 degrees with a
/// 30-sample period. With the default shift configuration this produces
/// alternating lift and header runs.
pub fn oscillating_breeze(count: usize) -> Vec<TelemetrySample> {
    SessionBuilder::new().oscillating_leg(count, 6.0, 40.0, 45.0, 15.0, 30).build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_advances_at_recorded_speed() {
        let samples = SessionBuilder::new().leg(10, 6.0, 40.0, Some(45.0)).build();
        assert_eq!(samples.len(), 10);

        // 6 knots for 1 second between consecutive fixes
        let step_m = 6.0 * KNOTS_TO_MPS;
        for pair in samples.windows(2) {
            let d = geo::distance_m(pair[0].lat, pair[0].lon, pair[1].lat, pair[1].lon);
            assert!((d - step_m).abs() < 1e-6, "expected {step_m} m between fixes, got {d}");
            assert_eq!((pair[1].timestamp - pair[0].timestamp).num_seconds(), 1);
        }
    }

    #[test]
    fn upwind_beat_alternates_twa_sign() {
        let samples = upwind_beat(4, 5);
        assert_eq!(samples.len(), 20);
        let signs: Vec<bool> = samples.iter().filter_map(|s| s.twa).map(|t| t >= 0.0).collect();
        assert!(signs[..5].iter().all(|&s| s));
        assert!(signs[5..10].iter().all(|&s| !s));
        assert!(signs[10..15].iter().all(|&s| s));
    }

    #[test]
    fn tws_dropout_follows_twa() {
        let samples = SessionBuilder::new()
            .leg(2, 6.0, 40.0, Some(45.0))
            .leg(2, 6.0, 40.0, None)
            .build();
        assert_eq!(samples[0].tws, Some(16.0));
        assert_eq!(samples[2].twa, None);
        assert_eq!(samples[2].tws, None);
    }

    #[test]
    fn interval_override_is_respected() {
        let samples = SessionBuilder::new().with_interval_ms(100).leg(3, 6.0, 40.0, None).build();
        assert_eq!((samples[1].timestamp - samples[0].timestamp).num_milliseconds(), 100);
    }
}
