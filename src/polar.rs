//! Polar performance scoring.
//!
//! A polar table gives the target boat speed for a wind speed and wind angle.
//! The scorer compares what the boat actually did against that target and
//! reports a percentage; the dashboard paints it green or red.
//!
//! The baseline lookup is nearest-ceiling: first table wind speed at or above
//! the actual, first table angle at or above the actual. It is coarse but it
//! is what the scores have always meant, so smoother bilinear interpolation
//! is a separate opt-in mode rather than a replacement.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{AnalysisError, Result};

/// Target-speed lookup mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub enum Interpolation {
    /// First axis entry at or above the value; the historical contract
    #[default]
    NearestCeiling,
    /// Bilinear blend of the four surrounding table cells
    Bilinear,
}

/// Boat polar: target speeds by true wind speed and angle.
///
/// `targets` is indexed `[tws_index][twa_index]`. Axes are ascending; wind
/// angles are unsigned (port and starboard read the same row). Tables come
/// off calibration files, so [`PolarTable::validate`] should run at load
/// time before scoring with one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct PolarTable {
    /// True wind speed axis, knots, ascending
    pub tws: Vec<f64>,
    /// True wind angle axis, degrees, ascending
    pub twa: Vec<f64>,
    /// Target speeds in knots, one row per `tws` entry
    #[serde(rename = "target")]
    pub targets: Vec<Vec<f64>>,
}

impl PolarTable {
    /// Check table shape: matching dimensions, strictly ascending axes,
    /// finite non-negative targets.
    pub fn validate(&self) -> Result<()> {
        if self.tws.is_empty() || self.twa.is_empty() {
            return Err(AnalysisError::invalid_polar("empty wind speed or angle axis"));
        }
        if self.targets.len() != self.tws.len() {
            return Err(AnalysisError::invalid_polar(format!(
                "{} target rows for {} wind speeds",
                self.targets.len(),
                self.tws.len()
            )));
        }
        for (row_index, row) in self.targets.iter().enumerate() {
            if row.len() != self.twa.len() {
                return Err(AnalysisError::invalid_polar(format!(
                    "row {} has {} entries for {} wind angles",
                    row_index,
                    row.len(),
                    self.twa.len()
                )));
            }
            if let Some(bad) = row.iter().find(|t| !t.is_finite() || **t < 0.0) {
                return Err(AnalysisError::invalid_polar(format!(
                    "row {row_index} contains invalid target speed {bad}"
                )));
            }
        }
        if !strictly_ascending(&self.tws) {
            return Err(AnalysisError::invalid_polar("tws axis is not strictly ascending"));
        }
        if !strictly_ascending(&self.twa) {
            return Err(AnalysisError::invalid_polar("twa axis is not strictly ascending"));
        }
        Ok(())
    }

    /// Target speed in knots for a wind state, or `None` outside the table.
    ///
    /// The wind angle's absolute value is used. Values below the first axis
    /// entry resolve to that entry in both modes; values above the last are
    /// out of range.
    pub fn target_speed(&self, tws_kn: f64, twa_deg: f64, interpolation: Interpolation) -> Option<f64> {
        let twa = twa_deg.abs();
        match interpolation {
            Interpolation::NearestCeiling => {
                let row = self.tws.iter().position(|&t| t >= tws_kn)?;
                let col = self.twa.iter().position(|&a| a >= twa)?;
                Some(self.targets[row][col])
            }
            Interpolation::Bilinear => {
                let (row_lo, row_hi, row_frac) = bracket(&self.tws, tws_kn)?;
                let (col_lo, col_hi, col_frac) = bracket(&self.twa, twa)?;
                let low = lerp(self.targets[row_lo][col_lo], self.targets[row_lo][col_hi], col_frac);
                let high = lerp(self.targets[row_hi][col_lo], self.targets[row_hi][col_hi], col_frac);
                Some(lerp(low, high, row_frac))
            }
        }
    }
}

fn strictly_ascending(axis: &[f64]) -> bool {
    axis.windows(2).all(|pair| pair[0] < pair[1])
}

fn lerp(a: f64, b: f64, frac: f64) -> f64 {
    a * (1.0 - frac) + b * frac
}

/// Bracketing indices and blend fraction for a value on an ascending axis.
fn bracket(axis: &[f64], value: f64) -> Option<(usize, usize, f64)> {
    let first = *axis.first()?;
    if value <= first {
        return Some((0, 0, 0.0));
    }
    let hi = axis.iter().position(|&a| a >= value)?;
    let lo = hi - 1;
    let span = axis[hi] - axis[lo];
    let frac = if span > 0.0 { (value - axis[lo]) / span } else { 0.0 };
    Some((lo, hi, frac))
}

/// Actual speed over target speed as a percentage, nearest-ceiling lookup.
///
/// Defined boundaries instead of errors: wind outside the table scores 0, a
/// zero target scores 0, and no table at all scores 100 so uncalibrated
/// sessions are not painted as failures. Beating the target scores over 100.
pub fn performance_pct(
    actual_speed_kn: f64,
    tws_kn: f64,
    twa_deg: f64,
    polar: Option<&PolarTable>,
) -> f64 {
    performance_pct_with(actual_speed_kn, tws_kn, twa_deg, polar, Interpolation::NearestCeiling)
}

/// [`performance_pct`] with an explicit lookup mode.
pub fn performance_pct_with(
    actual_speed_kn: f64,
    tws_kn: f64,
    twa_deg: f64,
    polar: Option<&PolarTable>,
    interpolation: Interpolation,
) -> f64 {
    let Some(table) = polar else {
        return 100.0;
    };
    match table.target_speed(tws_kn, twa_deg, interpolation) {
        Some(target) if target > 0.0 => actual_speed_kn / target * 100.0,
        Some(_) => 0.0,
        None => {
            trace!("wind state {tws_kn} kn / {twa_deg} deg outside polar range");
            0.0
        }
    }
}
