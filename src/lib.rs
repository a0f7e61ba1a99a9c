//! Tactical analytics for sailing-race telemetry.
//!
//! We Race Afterguard turns an ordered stream of GPS and wind samples into
//! the derived numbers a race crew acts on. It is a pure computation
//! library: telemetry in, tactics out, with no I/O and no state kept between
//! calls.
//!
//! # Features
//!
//! - **Geodesic kernel**: haversine distance, bearings, and point projection
//! - **VMG**: progress toward a mark or along the wind axis
//! - **Laylines**: port and starboard closing courses to a mark
//! - **Maneuvers**: tack/gybe detection with efficiency scoring
//! - **Wind**: shift detection, pattern classification, next-shift advisory
//! - **Start line**: favored-end bias between the pin and the boat end
//! - **Polar**: actual-versus-target performance scoring
//!
//! # Quick Start
//!
//! ```rust
//! use afterguard::{Afterguard, TelemetrySample};
//! use chrono::{DateTime, TimeDelta};
//!
//! let start = DateTime::UNIX_EPOCH;
//! let samples: Vec<TelemetrySample> = (0..6i64)
//!     .map(|i| {
//!         let twa = if i < 3 { -45.0 } else { 45.0 };
//!         TelemetrySample::new(start + TimeDelta::seconds(i), -33.86, 151.23, 6.0, 40.0)
//!             .with_true_wind(twa, 14.0)
//!     })
//!     .collect();
//!
//! let analysis = Afterguard::new().analyze(&samples);
//! assert_eq!(analysis.maneuvers.len(), 1);
//! assert_eq!(analysis.duration_s, 5.0);
//! ```

// Core types and error handling
mod analyzer;
mod error;
#[cfg(any(test, feature = "benchmark"))]
pub mod test_utils;
pub mod types;

// Geodesic kernel
pub mod geo;

// Tactical analytics
pub mod layline;
pub mod maneuver;
pub mod polar;
pub mod startline;
pub mod vmg;
pub mod windshift;

// Core exports
pub use analyzer::{AnalysisConfig, SessionAnalysis, analyze_session};
pub use error::*;
pub use types::*;

// Analytics exports
pub use layline::{Layline, LaylineConfig, LaylinePair, Tack, project_laylines};
pub use maneuver::{ManeuverConfig, ManeuverEvent, ManeuverKind, detect_maneuvers};
pub use polar::{Interpolation, PolarTable, performance_pct, performance_pct_with};
pub use startline::{FavoredEnd, StartLineBias, distance_to_line_m, line_bias};
pub use vmg::{VmgResult, VmgTargets, compute_vmg, compute_vmg_series};
pub use windshift::{
    ForecastDirection, Lookback, PatternThresholds, ShiftForecast, ShiftKind, WindPattern,
    WindShiftConfig, WindShiftEvent, classify_pattern, detect_wind_shifts, forecast_next_shift,
};

/// Unified entry point carrying one [`AnalysisConfig`] across every analytic.
///
/// Each method is pure and takes `&self`, so one engine can be shared freely
/// across threads or sessions. The free functions in the analytics modules
/// remain available when only a single computation is needed.
///
/// # Examples
///
/// ## Whole-session analysis
/// ```rust
/// use afterguard::Afterguard;
///
/// let engine = Afterguard::new();
/// let analysis = engine.analyze(&[]);
/// assert!(analysis.maneuvers.is_empty());
/// ```
///
/// ## Laylines to a mark
/// ```rust
/// use afterguard::{Afterguard, Position};
///
/// # fn main() -> afterguard::Result<()> {
/// let engine = Afterguard::new();
/// let pair = engine.laylines(
///     Position::new(-33.8600, 151.2300)?,
///     Position::new(-33.8520, 151.2320)?,
///     10.0,
/// );
/// assert_eq!(pair.port.heading_deg, 52.0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Afterguard {
    config: AnalysisConfig,
}

impl Afterguard {
    /// Create an engine with the default configuration.
    pub fn new() -> Self {
        Self { config: AnalysisConfig::default() }
    }

    /// Create an engine with explicit tuning.
    ///
    /// # Example
    ///
    /// ```rust
    /// use afterguard::{Afterguard, AnalysisConfig, Interpolation};
    ///
    /// let config = AnalysisConfig::default().with_interpolation(Interpolation::Bilinear);
    /// let engine = Afterguard::with_config(config);
    /// assert_eq!(engine.config().interpolation, Interpolation::Bilinear);
    /// ```
    pub fn with_config(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// The engine's configuration.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Run every analytic over an ordered session.
    ///
    /// See [`analyze_session`] for ordering requirements and the handling of
    /// samples without wind data.
    pub fn analyze(&self, samples: &[TelemetrySample]) -> SessionAnalysis {
        analyzer::analyze_session(samples, &self.config)
    }

    /// Velocity made good for one sample against a target heading.
    pub fn vmg(&self, sample: &TelemetrySample, target_heading_deg: f64) -> VmgResult {
        vmg::compute_vmg(sample, target_heading_deg, &self.config.vmg)
    }

    /// Velocity made good for every sample in a slice.
    pub fn vmg_series(
        &self,
        samples: &[TelemetrySample],
        target_heading_deg: f64,
    ) -> Vec<VmgResult> {
        vmg::compute_vmg_series(samples, target_heading_deg, &self.config.vmg)
    }

    /// Project the port and starboard laylines from a position.
    pub fn laylines(
        &self,
        position: Position,
        mark: Position,
        wind_direction_deg: f64,
    ) -> LaylinePair {
        layline::project_laylines(position, mark, wind_direction_deg, &self.config.layline)
    }

    /// Start-line bias between the pin and boat ends for a wind direction.
    pub fn line_bias(
        &self,
        pin: Position,
        boat_end: Position,
        wind_direction_deg: f64,
    ) -> StartLineBias {
        startline::line_bias(pin, boat_end, wind_direction_deg)
    }

    /// Actual-versus-target performance using the configured polar table.
    ///
    /// Without a configured table this reports 100 for any input.
    pub fn performance_pct(&self, actual_speed_kn: f64, tws_kn: f64, twa_deg: f64) -> f64 {
        polar::performance_pct_with(
            actual_speed_kn,
            tws_kn,
            twa_deg,
            self.config.polar.as_ref(),
            self.config.interpolation,
        )
    }
}
