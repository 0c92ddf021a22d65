//! Torus tilt from the apparent aspect ratio of its bounding box.
//!
//! Edge-on, the silhouette has its minimum aspect ratio `2r / 2(R + r)`;
//! face-on it is a circle with aspect ratio 1. In between, the normalized
//! ratio is treated as the cosine of the tilt. Ratios outside the modelled
//! range are clamped to the nearest boundary and read as measurement noise.
use crate::error::{LocateError, Result};
use crate::target::TargetGeometry;
use crate::types::OrientationResult;

/// Estimate the tilt from an apparent box `width x height` (pixels).
pub fn estimate_orientation(
    width: f64,
    height: f64,
    target: &TargetGeometry,
) -> Result<OrientationResult> {
    if !(height.is_finite() && height > 0.0) {
        return Err(LocateError::DegenerateGeometry("non-positive apparent height"));
    }
    if !(width.is_finite() && width > 0.0) {
        return Err(LocateError::DegenerateGeometry("non-positive apparent width"));
    }
    let aspect_ratio = width / height;
    Ok(OrientationResult {
        angle: orientation_from_aspect(aspect_ratio, target),
        aspect_ratio,
    })
}

/// Tilt in `[0, π/2]` for a given aspect ratio.
pub fn orientation_from_aspect(aspect_ratio: f64, target: &TargetGeometry) -> f64 {
    let min_ratio = target.min_aspect_ratio();
    let max_ratio = target.max_aspect_ratio();
    let normalized = ((aspect_ratio - min_ratio) / (max_ratio - min_ratio)).clamp(0.0, 1.0);
    normalized.acos()
}

/// Aspect ratio that [`orientation_from_aspect`] maps back to `angle`.
///
/// `angle` is clamped to `[0, π/2]`.
pub fn aspect_for_orientation(angle: f64, target: &TargetGeometry) -> f64 {
    let min_ratio = target.min_aspect_ratio();
    let max_ratio = target.max_aspect_ratio();
    let angle = angle.clamp(0.0, std::f64::consts::FRAC_PI_2);
    min_ratio + angle.cos() * (max_ratio - min_ratio)
}
