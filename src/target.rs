//! Known physical dimensions of the torus target.
use crate::error::{LocateError, Result};
use serde::Serialize;

/// Torus described by its major (ring centre) and minor (tube) radii.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetGeometry {
    major_radius: f64,
    minor_radius: f64,
}

impl TargetGeometry {
    pub fn new(major_radius: f64, minor_radius: f64) -> Result<Self> {
        for (what, value) in [("major_radius", major_radius), ("minor_radius", minor_radius)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(LocateError::InvalidParameter { what, value });
            }
        }
        if major_radius <= minor_radius {
            return Err(LocateError::InvalidParameter {
                what: "major_radius (must exceed minor_radius)",
                value: major_radius,
            });
        }
        Ok(Self {
            major_radius,
            minor_radius,
        })
    }

    pub fn major_radius(&self) -> f64 {
        self.major_radius
    }

    pub fn minor_radius(&self) -> f64 {
        self.minor_radius
    }

    /// Outer diameter `2 * (R + r)`.
    pub fn outer_diameter(&self) -> f64 {
        2.0 * (self.major_radius + self.minor_radius)
    }

    /// Aspect ratio of the edge-on silhouette, `2r / 2(R + r)`.
    pub fn min_aspect_ratio(&self) -> f64 {
        2.0 * self.minor_radius / self.outer_diameter()
    }

    /// Face-on silhouette is a circle.
    pub fn max_aspect_ratio(&self) -> f64 {
        1.0
    }

    /// Apparent horizontal extent of the tilted major circle.
    pub fn effective_diameter(&self, orientation: f64) -> f64 {
        2.0 * self.major_radius * orientation.cos() + 2.0 * self.minor_radius * orientation.sin()
    }

    /// Vertical extent the target should show at the given tilt.
    pub fn expected_height(&self, orientation: f64) -> f64 {
        self.outer_diameter() * orientation.sin() + 2.0 * self.minor_radius * orientation.cos()
    }
}
