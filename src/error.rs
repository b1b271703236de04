//! Validation errors raised when constructing or mutating cones and sensors.

use crate::ConeKind;
use thiserror::Error;

/// An invalid value was supplied to a constructor or setter.
///
/// Values are always validated before being assigned, so an operation
/// that returns an error leaves its target untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("unknown cone kind \"{0}\"; expected one of \"yellow\", \"orange\", \"orange-big\" or \"blue\"")]
    UnknownConeKind(String),

    #[error("all cones in an array must share one kind: expected {expected}, found {found}")]
    MixedConeKinds { expected: ConeKind, found: ConeKind },

    #[error("{field} must be finite")]
    NonFinite { field: &'static str },

    #[error("{field} must lie within [{min}, {max}], got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

pub type Result<T> = std::result::Result<T, ValidationError>;
