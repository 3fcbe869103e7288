//! Error types for the gazetteer
//!
//! This module provides the error taxonomy for all operations in the
//! gazetteer, with classification helpers a service shell can use to
//! map failures onto its transport.

use thiserror::Error;

use crate::address::AddressId;

/// Main error type for gazetteer operations
#[derive(Error, Debug)]
pub enum GazetteerError {
    // ===== Lookup Errors =====
    /// The requested address id does not resolve to a stored record
    #[error("Address not found: {0}")]
    AddressNotFound(AddressId),

    // ===== Input Validation Errors =====
    /// Latitude outside the valid range, or not a finite number
    #[error("Invalid latitude {0}: must be a finite value in [-90, 90] degrees")]
    InvalidLatitude(f64),

    /// Longitude outside the valid range, or not a finite number
    #[error("Invalid longitude {0}: must be a finite value in [-180, 180] degrees")]
    InvalidLongitude(f64),

    /// Search radius is negative or NaN
    #[error("Invalid search radius {0}: must be a non-negative number of kilometers")]
    InvalidRadius(f64),

    // ===== Configuration Errors =====
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ===== Storage Errors =====
    /// Storage collaborator failed
    #[error("Storage error: {0}")]
    Store(String),
}

impl GazetteerError {
    /// Check if this error means a requested record does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, GazetteerError::AddressNotFound(_))
    }

    /// Check if this error was caused by invalid caller input
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            GazetteerError::InvalidLatitude(_)
                | GazetteerError::InvalidLongitude(_)
                | GazetteerError::InvalidRadius(_)
        )
    }

    /// Check if this error is retriable
    pub fn is_retriable(&self) -> bool {
        matches!(self, GazetteerError::Store(_))
    }

    /// Get an error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            GazetteerError::AddressNotFound(_) => "ADDRESS_NOT_FOUND",
            GazetteerError::InvalidLatitude(_) => "INVALID_LATITUDE",
            GazetteerError::InvalidLongitude(_) => "INVALID_LONGITUDE",
            GazetteerError::InvalidRadius(_) => "INVALID_RADIUS",
            GazetteerError::InvalidConfig(_) => "INVALID_CONFIG",
            GazetteerError::Store(_) => "STORAGE_ERROR",
        }
    }
}

/// Result type alias for gazetteer operations
pub type Result<T> = std::result::Result<T, GazetteerError>;

// Conversion implementations for common error types
impl From<std::io::Error> for GazetteerError {
    fn from(err: std::io::Error) -> Self {
        GazetteerError::Store(err.to_string())
    }
}
