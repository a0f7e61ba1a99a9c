//! Error types for tactical analysis.
//!
//! The error surface is deliberately narrow. The engine is pure math over
//! well-typed scalars, so almost every boundary condition is a defined value
//! rather than a fault:
//!
//! - **Missing wind data** on a sample: the computation skips that sample.
//! - **Division by zero** (zero expected distance, zero target speed): the
//!   result is defined as 0.
//! - **Out-of-range polar lookup**: the score is defined as 0.
//!
//! What remains is caller-supplied data that violates a contract and would
//! otherwise flow silently into nonsense output:
//!
//! - **Coordinate Errors**: latitude/longitude outside WGS84 range
//! - **Polar Table Errors**: ragged or mis-sized calibration tables
//!
//! ## Helper Constructors
//!
//! Use helper methods for common error scenarios:
//!
//! ```rust
//! use afterguard::AnalysisError;
//!
//! let coord_error = AnalysisError::invalid_coordinate(91.2, 153.0);
//! let polar_error = AnalysisError::invalid_polar("twa axis is not ascending");
//! assert!(coord_error.to_string().contains("91.2"));
//! ```

use thiserror::Error;

/// Result type alias for analysis operations.
pub type Result<T, E = AnalysisError> = std::result::Result<T, E>;

/// Main error type for tactical analysis operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AnalysisError {
    #[error("coordinate out of range: lat {lat}, lon {lon} (expected lat in [-90,90], lon in [-180,180])")]
    InvalidCoordinate { lat: f64, lon: f64 },

    #[error("invalid polar table: {reason}")]
    InvalidPolar { reason: String },
}

impl AnalysisError {
    /// Helper constructor for out-of-range coordinates.
    pub fn invalid_coordinate(lat: f64, lon: f64) -> Self {
        AnalysisError::InvalidCoordinate { lat, lon }
    }

    /// Helper constructor for malformed polar tables.
    pub fn invalid_polar(reason: impl Into<String>) -> Self {
        AnalysisError::InvalidPolar { reason: reason.into() }
    }
}
