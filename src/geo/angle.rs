//! Heading and angle arithmetic
//!
//! Compass headings wrap at 360 and wind angles are signed around zero, so
//! naive subtraction produces 350-degree "turns" across north. Every angle
//! comparison in the engine goes through these helpers instead.

/// Normalize a heading in degrees into `[0, 360)`.
pub fn normalize_heading(deg: f64) -> f64 {
    ((deg % 360.0) + 360.0) % 360.0
}

/// Signed angular difference `a - b` in degrees, normalized into
/// `[-180, 180]`. A half-turn comes back as `180.0`.
///
/// Positive means `a` lies clockwise of `b`.
pub fn signed_difference(a: f64, b: f64) -> f64 {
    let diff = normalize_heading(a - b);
    if diff > 180.0 { diff - 360.0 } else { diff }
}

/// Wraparound-aware magnitude of the angle between two headings, `[0, 180]`.
pub fn absolute_difference(a: f64, b: f64) -> f64 {
    signed_difference(a, b).abs()
}
