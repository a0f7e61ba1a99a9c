//! Validated WGS84 positions

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

/// A WGS84 coordinate pair in degrees.
///
/// [`Position::new`] enforces the coordinate contract at the API boundary so
/// the geodesic kernel can assume in-range input. Fixes arriving from an
/// already-validated GPS pipeline can skip the check with
/// [`Position::new_unchecked`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct Position {
    /// Latitude, degrees, [-90, 90]
    pub lat: f64,
    /// Longitude, degrees, [-180, 180]
    pub lon: f64,
}

impl Position {
    /// Create a position, rejecting out-of-range or non-finite coordinates.
    pub fn new(lat: f64, lon: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(AnalysisError::invalid_coordinate(lat, lon));
        }
        Ok(Self { lat, lon })
    }

    /// Create a position without range validation.
    pub fn new_unchecked(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_range_boundaries() {
        assert!(Position::new(90.0, 180.0).is_ok());
        assert!(Position::new(-90.0, -180.0).is_ok());
        assert!(Position::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(Position::new(90.001, 0.0).is_err());
        assert!(Position::new(-90.001, 0.0).is_err());
        assert!(Position::new(0.0, 180.001).is_err());
        assert!(Position::new(0.0, -180.001).is_err());
    }

    #[test]
    fn rejects_nan() {
        assert!(Position::new(f64::NAN, 0.0).is_err());
        assert!(Position::new(0.0, f64::NAN).is_err());
    }

    #[test]
    fn unchecked_skips_validation() {
        let p = Position::new_unchecked(120.0, 540.0);
        assert_eq!(p.lat, 120.0);
        assert_eq!(p.lon, 540.0);
    }
}
