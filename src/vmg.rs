//! Velocity made good.
//!
//! VMG is the component of boat speed along an axis that matters: the bearing
//! to the next mark, or the wind axis when beating or running. One sample in,
//! one [`VmgResult`] out; series helpers map over a slice.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::geo::signed_difference;
use crate::types::TelemetrySample;

/// Optimum sailing angles used to report a target wind angle alongside VMG.
///
/// These are tunable defaults standing in for boat-specific polar optima, not
/// physical constants. A 42-degree beat and a 145-degree run are reasonable
/// for a generic keelboat; boats with real polars should override them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct VmgTargets {
    /// Target true wind angle upwind, degrees
    pub upwind_deg: f64,
    /// Target true wind angle downwind, degrees
    pub downwind_deg: f64,
}

impl Default for VmgTargets {
    fn default() -> Self {
        Self { upwind_deg: 42.0, downwind_deg: 145.0 }
    }
}

impl VmgTargets {
    /// Override the upwind target angle.
    pub fn with_upwind_deg(mut self, deg: f64) -> Self {
        self.upwind_deg = deg;
        self
    }

    /// Override the downwind target angle.
    pub fn with_downwind_deg(mut self, deg: f64) -> Self {
        self.downwind_deg = deg;
        self
    }
}

/// Velocity made good for one fix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct VmgResult {
    /// Fix time, copied from the sample
    pub timestamp: DateTime<Utc>,
    /// Signed progress toward the target heading, knots; positive is closing
    pub vmg: f64,
    /// Progress into the wind, knots; 0 unless sailing upwind (`|twa| < 90`)
    pub vmg_upwind: f64,
    /// Progress away from the wind, knots; 0 unless sailing downwind (`|twa| > 90`)
    pub vmg_downwind: f64,
    /// Optimum wind angle for the current point of sail; `None` without twa
    pub target_angle: Option<f64>,
}

/// Compute velocity made good for one sample against a target heading.
///
/// `vmg` projects `sog` onto the target axis through the cosine of the
/// wraparound-normalized course error. The upwind/downwind components use the
/// true wind angle when the sample carries one; without wind data both
/// degrade to 0 and `target_angle` is `None`.
pub fn compute_vmg(
    sample: &TelemetrySample,
    target_heading_deg: f64,
    targets: &VmgTargets,
) -> VmgResult {
    let course_error = signed_difference(sample.cog, target_heading_deg);
    let vmg = sample.sog * course_error.to_radians().cos();

    let (vmg_upwind, vmg_downwind, target_angle) = match sample.twa {
        Some(twa) => {
            let abs_twa = twa.abs();
            let upwind = if abs_twa < 90.0 { sample.sog * twa.to_radians().cos() } else { 0.0 };
            let downwind = if abs_twa > 90.0 {
                sample.sog * (180.0 - abs_twa).to_radians().cos()
            } else {
                0.0
            };
            let target = if abs_twa < 90.0 { targets.upwind_deg } else { targets.downwind_deg };
            (upwind, downwind, Some(target))
        }
        None => (0.0, 0.0, None),
    };

    VmgResult { timestamp: sample.timestamp, vmg, vmg_upwind, vmg_downwind, target_angle }
}

/// Compute velocity made good for every sample in a slice.
pub fn compute_vmg_series(
    samples: &[TelemetrySample],
    target_heading_deg: f64,
    targets: &VmgTargets,
) -> Vec<VmgResult> {
    samples.iter().map(|sample| compute_vmg(sample, target_heading_deg, targets)).collect()
}
