//! Speed unit conversions
//!
//! Telemetry speeds arrive in knots; distance math runs in metres and
//! seconds. These constants are the single source for the conversion so call
//! sites never inline the factor.

/// One knot in metres per second.
pub const KNOTS_TO_MPS: f64 = 0.514444;

/// One metre per second in knots.
pub const MPS_TO_KNOTS: f64 = 1.943844;

/// Convert a speed in knots to metres per second.
pub fn knots_to_mps(knots: f64) -> f64 {
    knots * KNOTS_TO_MPS
}

/// Convert a speed in metres per second to knots.
pub fn mps_to_knots(mps: f64) -> f64 {
    mps * MPS_TO_KNOTS
}
