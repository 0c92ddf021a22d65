//! Range estimation from two independent pinhole cues.
//!
//! The box width, inverted against the foreshortened major diameter, gives
//! the primary range. It is inflated by `1 / cos(horizontal)` because an
//! off-axis target subtends a smaller angle at the same true range. The box
//! height, inverted against the expected vertical extent, gives a second
//! range that is only used to score agreement. No off-axis correction is
//! applied to the height cue; this asymmetry is a known approximation.
use crate::camera::CameraModel;
use crate::error::{LocateError, Result};
use crate::target::TargetGeometry;
use crate::types::{DistanceEstimate, OrientationResult, ViewingAngles};
use log::debug;
use serde::Serialize;

const COS_EPS: f64 = 1e-9;

/// Both range cues, before they are folded into a [`DistanceEstimate`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistanceCues {
    /// Raw pinhole range from the box width.
    pub base_distance: f64,
    /// Width range after the off-axis correction (primary estimate).
    pub width_distance: f64,
    /// Pinhole range from the box height.
    pub height_distance: f64,
}

impl DistanceCues {
    /// `1 - min(1, |d_w - d_h| / d_w)`, clamped to `[0, 1]`.
    ///
    /// Zero when the primary range is not positive.
    pub fn confidence(&self) -> f64 {
        if self.width_distance.is_nan() || self.width_distance <= 0.0 {
            return 0.0;
        }
        let divergence = (self.width_distance - self.height_distance).abs() / self.width_distance;
        if divergence.is_nan() {
            return 0.0;
        }
        (1.0 - divergence.min(1.0)).clamp(0.0, 1.0)
    }
}

/// Range of an object of physical `extent` spanning `apparent_px` of an
/// `image_px`-wide axis with field of view `fov`.
pub fn pinhole_range(extent: f64, apparent_px: f64, image_px: f64, fov: f64) -> f64 {
    let subtense = (apparent_px / image_px) * fov;
    extent / (2.0 * (subtense * 0.5).tan())
}

/// Compute both range cues for a box of `width x height` pixels.
pub fn distance_cues(
    width: f64,
    height: f64,
    angles: &ViewingAngles,
    orientation: &OrientationResult,
    camera: &CameraModel,
    target: &TargetGeometry,
) -> Result<DistanceCues> {
    if !(width.is_finite() && width > 0.0) {
        return Err(LocateError::DegenerateGeometry("non-positive apparent width"));
    }
    if !(height.is_finite() && height > 0.0) {
        return Err(LocateError::DegenerateGeometry("non-positive apparent height"));
    }
    let theta = orientation.angle;

    let base_distance = pinhole_range(
        target.effective_diameter(theta),
        width,
        f64::from(camera.image_width()),
        camera.fov_x(),
    );
    let cos_h = angles.horizontal.cos();
    if cos_h.abs() < COS_EPS {
        return Err(LocateError::DegenerateGeometry(
            "horizontal viewing angle near 90 degrees",
        ));
    }
    let width_distance = base_distance / cos_h;

    let height_distance = pinhole_range(
        target.expected_height(theta),
        height,
        f64::from(camera.image_height()),
        camera.fov_y(),
    );

    Ok(DistanceCues {
        base_distance,
        width_distance,
        height_distance,
    })
}

/// Estimate range, keeping the width cue as primary and scoring it against
/// the height cue.
pub fn estimate_distance(
    width: f64,
    height: f64,
    angles: &ViewingAngles,
    orientation: &OrientationResult,
    camera: &CameraModel,
    target: &TargetGeometry,
) -> Result<DistanceEstimate> {
    let cues = distance_cues(width, height, angles, orientation, camera, target)?;
    if !(cues.width_distance.is_finite() && cues.width_distance > 0.0) {
        return Err(LocateError::DegenerateGeometry(
            "width-based distance is not a positive finite value",
        ));
    }
    let confidence = cues.confidence();
    debug!(
        "distance: base={:.3} corrected={:.3} height={:.3} confidence={:.3}",
        cues.base_distance, cues.width_distance, cues.height_distance, confidence
    );
    Ok(DistanceEstimate {
        distance: cues.width_distance,
        orientation: orientation.angle,
        confidence,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orientation::estimate_orientation;
    use nalgebra::Point3;
    use proptest::prelude::*;

    fn camera() -> CameraModel {
        CameraModel::new(
            640,
            480,
            60f64.to_radians(),
            45f64.to_radians(),
            Point3::new(8.0, 10.5, 24.0),
            (-35f64).to_radians(),
        )
        .unwrap()
    }

    fn torus() -> TargetGeometry {
        TargetGeometry::new(5.0, 1.0).unwrap()
    }

    fn on_axis() -> ViewingAngles {
        ViewingAngles {
            horizontal: 0.0,
            vertical: 0.0,
        }
    }

    #[test]
    fn doubling_width_halves_base_distance() {
        let (cam, t) = (camera(), torus());
        let orient = OrientationResult {
            angle: 0.3,
            aspect_ratio: 0.8,
        };
        let near = distance_cues(20.0, 25.0, &on_axis(), &orient, &cam, &t).unwrap();
        let far = distance_cues(10.0, 25.0, &on_axis(), &orient, &cam, &t).unwrap();
        let ratio = far.base_distance / near.base_distance;
        assert!((ratio - 2.0).abs() < 0.01, "ratio={ratio}");
    }

    #[test]
    fn off_axis_inflates_range() {
        let (cam, t) = (camera(), torus());
        let orient = estimate_orientation(40.0, 50.0, &t).unwrap();
        let centre = distance_cues(40.0, 50.0, &on_axis(), &orient, &cam, &t).unwrap();
        let side = ViewingAngles {
            horizontal: 0.4,
            vertical: 0.0,
        };
        let off = distance_cues(40.0, 50.0, &side, &orient, &cam, &t).unwrap();
        assert!((off.base_distance - centre.base_distance).abs() < 1e-12);
        assert!((off.width_distance - centre.base_distance / 0.4f64.cos()).abs() < 1e-9);
    }

    #[test]
    fn right_angle_view_is_degenerate() {
        let (cam, t) = (camera(), torus());
        let orient = estimate_orientation(40.0, 50.0, &t).unwrap();
        let edge = ViewingAngles {
            horizontal: std::f64::consts::FRAC_PI_2,
            vertical: 0.0,
        };
        assert!(matches!(
            estimate_distance(40.0, 50.0, &edge, &orient, &cam, &t),
            Err(LocateError::DegenerateGeometry(_))
        ));
    }

    #[test]
    fn zero_extent_is_degenerate() {
        let (cam, t) = (camera(), torus());
        let orient = OrientationResult {
            angle: 0.0,
            aspect_ratio: 1.0,
        };
        assert!(estimate_distance(0.0, 10.0, &on_axis(), &orient, &cam, &t).is_err());
        assert!(estimate_distance(10.0, 0.0, &on_axis(), &orient, &cam, &t).is_err());
    }

    #[test]
    fn coincident_cues_give_full_confidence() {
        let cues = DistanceCues {
            base_distance: 12.0,
            width_distance: 12.0,
            height_distance: 12.0,
        };
        assert_eq!(cues.confidence(), 1.0);
        let far_apart = DistanceCues {
            height_distance: 40.0,
            ..cues
        };
        assert_eq!(far_apart.confidence(), 0.0);
        let half = DistanceCues {
            height_distance: 18.0,
            ..cues
        };
        assert!((half.confidence() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn non_positive_primary_has_zero_confidence() {
        let cues = DistanceCues {
            base_distance: 0.0,
            width_distance: 0.0,
            height_distance: 3.0,
        };
        assert_eq!(cues.confidence(), 0.0);
    }

    proptest! {
        #[test]
        fn prop_confidence_clamped(
            w in 1.0..640.0f64,
            h in 1.0..480.0f64,
            horizontal in -0.5..0.5f64,
        ) {
            let (cam, t) = (camera(), torus());
            let orient = estimate_orientation(w, h, &t).unwrap();
            let angles = ViewingAngles { horizontal, vertical: 0.0 };
            let est = estimate_distance(w, h, &angles, &orient, &cam, &t).unwrap();
            prop_assert!(est.distance > 0.0 && est.distance.is_finite());
            prop_assert!((0.0..=1.0).contains(&est.confidence));
        }
    }
}
