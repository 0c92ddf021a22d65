//! Back-projection of a pixel and a range into the world frame, and the
//! matching forward projection.
//!
//! ```text
//! pixel → normalize → (tan(nx·fx/2), tan(ny·fy/2), 1) → pitch → unit → · range + camera
//! world → − camera → un-pitch → perspective divide → atan → denormalize → pixel
//! ```
use crate::camera::CameraModel;
use crate::error::{LocateError, Result};
use crate::types::Position3D;
use nalgebra::{Unit, Vector3};

const EPS: f64 = 1e-12;

/// World-frame unit ray through pixel `(cx, cy)`.
pub fn ray_direction(camera: &CameraModel, cx: f64, cy: f64) -> Result<Unit<Vector3<f64>>> {
    let (nx, ny) = camera.normalize(cx, cy)?;
    let raw = Vector3::new(
        (nx * camera.fov_x() * 0.5).tan(),
        (ny * camera.fov_y() * 0.5).tan(),
        1.0,
    );
    let rotated = camera.mount_rotation() * raw;
    Unit::try_new(rotated, EPS)
        .filter(|dir| dir.iter().all(|c| c.is_finite()))
        .ok_or(LocateError::DegenerateGeometry("zero-magnitude direction vector"))
}

/// Place the target `distance` units along the ray through `(cx, cy)`.
pub fn project_position(
    camera: &CameraModel,
    cx: f64,
    cy: f64,
    distance: f64,
) -> Result<Position3D> {
    if !(distance.is_finite() && distance > 0.0) {
        return Err(LocateError::DegenerateGeometry(
            "distance is not a positive finite value",
        ));
    }
    let dir = ray_direction(camera, cx, cy)?;
    Ok(Position3D::from(camera.position() + dir.into_inner() * distance))
}

/// Pixel at which a world point appears; exact inverse of
/// [`project_position`].
///
/// Points behind the image plane are `DegenerateGeometry`; points that land
/// outside the frame are `OutOfBounds`.
pub fn project_to_pixel(camera: &CameraModel, position: &Position3D) -> Result<(f64, f64)> {
    let rel = position.to_point() - camera.position();
    let local = camera.mount_rotation().inverse() * rel;
    if !(local.z.is_finite() && local.z > EPS) {
        return Err(LocateError::DegenerateGeometry("point behind the camera"));
    }
    let nx = (local.x / local.z).atan() * 2.0 / camera.fov_x();
    let ny = (local.y / local.z).atan() * 2.0 / camera.fov_y();
    let (px, py) = camera.denormalize(nx, ny);
    camera.check_in_frame(px, py)?;
    Ok((px, py))
}
