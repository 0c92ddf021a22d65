//! Viewing-angle resolution: where a bounding-box centre sits relative to the
//! camera's optical axis.
use crate::camera::CameraModel;
use crate::error::Result;
use crate::projection::ray_direction;
use crate::types::ViewingAngles;

/// Resolves the horizontal and vertical viewing angles of a pixel.
///
/// `horizontal = atan(nx * tan(fov_x / 2))` and
/// `vertical = atan(ny * tan(fov_y / 2)) + pitch`, where `(nx, ny)` are the
/// normalized coordinates. The pitch term is dropped when the camera's
/// pitch-correction policy excludes the vertical angle.
pub fn resolve_viewing_angles(camera: &CameraModel, cx: f64, cy: f64) -> Result<ViewingAngles> {
    let (nx, ny) = camera.normalize(cx, cy)?;
    let horizontal = (nx * (camera.fov_x() * 0.5).tan()).atan();
    let mut vertical = (ny * (camera.fov_y() * 0.5).tan()).atan();
    if camera.pitch_correction().applies_to_vertical_angle() {
        vertical += camera.pitch();
    }
    Ok(ViewingAngles {
        horizontal,
        vertical,
    })
}

/// Angle in `[0, π]` between the world-frame line of sight through a pixel
/// and the world +Z axis.
pub fn bearing_angle(camera: &CameraModel, cx: f64, cy: f64) -> Result<f64> {
    let dir = ray_direction(camera, cx, cy)?;
    Ok(dir.z.clamp(-1.0, 1.0).acos())
}
