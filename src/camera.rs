//! Fixed, pitched pinhole camera: image size, field of view and mount pose.
//!
//! # Coordinate conventions
//!
//! - **Pixel coordinates**: origin at the top-left corner, +X right, +Y down,
//!   valid range `[0, width] x [0, height]`.
//! - **Normalized coordinates**: `2 * (c / dim) - 1`, so the image spans
//!   `[-1, 1]` on both axes and the optical axis sits at `(0, 0)`.
//! - **Camera frame**: +Z along the optical axis, +X right, +Y down. The
//!   mount pitch rotates the camera frame about its X axis into the world
//!   frame, whose origin is offset by the camera position.
use crate::error::{LocateError, Result};
use nalgebra::{Point3, Rotation3, Vector3};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Where the mount pitch is applied.
///
/// Historical deployments disagreed on this, so it is a configuration choice
/// rather than a separate code path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PitchCorrection {
    /// Pitch is ignored everywhere.
    None,
    /// Pitch offsets the vertical viewing angle only.
    VerticalAngle,
    /// Pitch rotates the back-projected ray only.
    BackProjection,
    /// Pitch is applied to both the vertical angle and the back-projection.
    #[default]
    Both,
}

impl PitchCorrection {
    pub fn applies_to_vertical_angle(self) -> bool {
        matches!(self, PitchCorrection::VerticalAngle | PitchCorrection::Both)
    }

    pub fn applies_to_back_projection(self) -> bool {
        matches!(self, PitchCorrection::BackProjection | PitchCorrection::Both)
    }
}

/// Immutable intrinsic and extrinsic parameters of the observing camera.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraModel {
    image_width: u32,
    image_height: u32,
    fov_x: f64,
    fov_y: f64,
    position: Point3<f64>,
    pitch: f64,
    pitch_correction: PitchCorrection,
}

impl CameraModel {
    /// Validate and build a camera model. Angles are in radians.
    pub fn new(
        image_width: u32,
        image_height: u32,
        fov_x: f64,
        fov_y: f64,
        position: Point3<f64>,
        pitch: f64,
    ) -> Result<Self> {
        if image_width == 0 {
            return Err(LocateError::InvalidParameter {
                what: "image_width",
                value: 0.0,
            });
        }
        if image_height == 0 {
            return Err(LocateError::InvalidParameter {
                what: "image_height",
                value: 0.0,
            });
        }
        check_fov("fov_x", fov_x)?;
        check_fov("fov_y", fov_y)?;
        for (what, value) in [
            ("position.x", position.x),
            ("position.y", position.y),
            ("position.z", position.z),
            ("pitch", pitch),
        ] {
            if !value.is_finite() {
                return Err(LocateError::InvalidParameter { what, value });
            }
        }
        Ok(Self {
            image_width,
            image_height,
            fov_x,
            fov_y,
            position,
            pitch,
            pitch_correction: PitchCorrection::default(),
        })
    }

    /// Same camera with a different pitch-correction policy.
    pub fn with_pitch_correction(mut self, mode: PitchCorrection) -> Self {
        self.pitch_correction = mode;
        self
    }

    pub fn image_width(&self) -> u32 {
        self.image_width
    }

    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    /// Horizontal field of view in radians.
    pub fn fov_x(&self) -> f64 {
        self.fov_x
    }

    /// Vertical field of view in radians.
    pub fn fov_y(&self) -> f64 {
        self.fov_y
    }

    pub fn position(&self) -> Point3<f64> {
        self.position
    }

    /// Mount pitch in radians about the lateral axis.
    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    pub fn pitch_correction(&self) -> PitchCorrection {
        self.pitch_correction
    }

    /// Rotation taking camera-frame rays into the world frame.
    ///
    /// Identity when back-projection pitch correction is disabled.
    pub fn mount_rotation(&self) -> Rotation3<f64> {
        if self.pitch_correction.applies_to_back_projection() {
            Rotation3::from_axis_angle(&Vector3::x_axis(), self.pitch)
        } else {
            Rotation3::identity()
        }
    }

    /// Map a pixel to normalized `[-1, 1]` coordinates.
    ///
    /// Rejects non-finite coordinates and anything outside the image frame.
    pub fn normalize(&self, cx: f64, cy: f64) -> Result<(f64, f64)> {
        self.check_in_frame(cx, cy)?;
        let w = f64::from(self.image_width);
        let h = f64::from(self.image_height);
        Ok((2.0 * (cx / w) - 1.0, 2.0 * (cy / h) - 1.0))
    }

    /// Map normalized coordinates back to pixels (no bounds check).
    pub fn denormalize(&self, nx: f64, ny: f64) -> (f64, f64) {
        let w = f64::from(self.image_width);
        let h = f64::from(self.image_height);
        ((nx + 1.0) * 0.5 * w, (ny + 1.0) * 0.5 * h)
    }

    pub(crate) fn check_in_frame(&self, x: f64, y: f64) -> Result<()> {
        let w = f64::from(self.image_width);
        let h = f64::from(self.image_height);
        let inside = x.is_finite()
            && y.is_finite()
            && (0.0..=w).contains(&x)
            && (0.0..=h).contains(&y);
        if inside {
            Ok(())
        } else {
            Err(self.out_of_bounds(x, y))
        }
    }

    pub(crate) fn out_of_bounds(&self, x: f64, y: f64) -> LocateError {
        LocateError::OutOfBounds {
            x,
            y,
            width: self.image_width,
            height: self.image_height,
        }
    }
}

fn check_fov(what: &'static str, fov: f64) -> Result<()> {
    if fov.is_finite() && fov > 0.0 && fov < PI {
        Ok(())
    } else {
        Err(LocateError::InvalidParameter { what, value: fov })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_camera() -> CameraModel {
        CameraModel::new(
            640,
            480,
            60f64.to_radians(),
            45f64.to_radians(),
            Point3::new(8.0, 10.5, 24.0),
            (-35f64).to_radians(),
        )
        .expect("reference camera is valid")
    }

    #[test]
    fn rejects_invalid_parameters() {
        let pos = Point3::origin();
        let fov = 1.0;
        assert!(matches!(
            CameraModel::new(0, 480, fov, fov, pos, 0.0),
            Err(LocateError::InvalidParameter { what: "image_width", .. })
        ));
        assert!(matches!(
            CameraModel::new(640, 0, fov, fov, pos, 0.0),
            Err(LocateError::InvalidParameter { what: "image_height", .. })
        ));
        assert!(CameraModel::new(640, 480, 0.0, fov, pos, 0.0).is_err());
        assert!(CameraModel::new(640, 480, PI, fov, pos, 0.0).is_err());
        assert!(CameraModel::new(640, 480, fov, -0.5, pos, 0.0).is_err());
        assert!(CameraModel::new(640, 480, fov, f64::NAN, pos, 0.0).is_err());
        assert!(CameraModel::new(640, 480, fov, fov, pos, f64::INFINITY).is_err());
        assert!(
            CameraModel::new(640, 480, fov, fov, Point3::new(f64::NAN, 0.0, 0.0), 0.0).is_err()
        );
    }

    #[test]
    fn normalize_maps_frame_to_unit_square() {
        let cam = reference_camera();
        assert_eq!(cam.normalize(320.0, 240.0).unwrap(), (0.0, 0.0));
        assert_eq!(cam.normalize(0.0, 0.0).unwrap(), (-1.0, -1.0));
        assert_eq!(cam.normalize(640.0, 480.0).unwrap(), (1.0, 1.0));
        let (px, py) = cam.denormalize(0.25, -0.5);
        assert_eq!(cam.normalize(px, py).unwrap(), (0.25, -0.5));
    }

    #[test]
    fn normalize_rejects_out_of_frame() {
        let cam = reference_camera();
        assert!(matches!(
            cam.normalize(641.0, 10.0),
            Err(LocateError::OutOfBounds { width: 640, height: 480, .. })
        ));
        assert!(cam.normalize(-0.1, 10.0).is_err());
        assert!(cam.normalize(10.0, f64::NAN).is_err());
    }

    #[test]
    fn mount_rotation_follows_policy() {
        let cam = reference_camera();
        let ray = cam.mount_rotation() * Vector3::new(0.0, 0.0, 1.0);
        let pitch = cam.pitch();
        assert!((ray.y + pitch.sin()).abs() < 1e-12);
        assert!((ray.z - pitch.cos()).abs() < 1e-12);

        let flat = cam.with_pitch_correction(PitchCorrection::VerticalAngle);
        let ray = flat.mount_rotation() * Vector3::new(0.0, 0.0, 1.0);
        assert_eq!(ray, Vector3::new(0.0, 0.0, 1.0));
    }
}
