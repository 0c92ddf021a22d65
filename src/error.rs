//! Error kinds produced by the localization pipeline.
//!
//! Every stage returns either a fully valid value or one of these variants.
//! Failures are local to a single detection: a batch keeps going past them.
use thiserror::Error;

/// Failure raised by a pipeline stage or by parameter validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LocateError {
    /// Malformed camera or target configuration. Fatal at construction time.
    #[error("invalid parameter `{what}`: {value}")]
    InvalidParameter { what: &'static str, value: f64 },
    /// Pixel coordinates outside the configured image frame.
    #[error("pixel ({x:.2}, {y:.2}) outside {width}x{height} image frame")]
    OutOfBounds {
        x: f64,
        y: f64,
        width: u32,
        height: u32,
    },
    /// Division by a near-zero quantity; no meaningful estimate exists.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(&'static str),
}

impl LocateError {
    /// Short machine-friendly tag, used in logs and JSON reports.
    pub fn kind(&self) -> &'static str {
        match self {
            LocateError::InvalidParameter { .. } => "invalid_parameter",
            LocateError::OutOfBounds { .. } => "out_of_bounds",
            LocateError::DegenerateGeometry(_) => "degenerate_geometry",
        }
    }
}

pub type Result<T> = std::result::Result<T, LocateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_context() {
        let err = LocateError::OutOfBounds {
            x: 700.0,
            y: 10.0,
            width: 640,
            height: 480,
        };
        assert_eq!(
            err.to_string(),
            "pixel (700.00, 10.00) outside 640x480 image frame"
        );
        assert_eq!(err.kind(), "out_of_bounds");
        assert_eq!(
            LocateError::DegenerateGeometry("zero height").to_string(),
            "degenerate geometry: zero height"
        );
    }
}
