use nalgebra::{Point3, Vector3};
use torus_locator::orientation::aspect_for_orientation;
use torus_locator::projection::project_to_pixel;
use torus_locator::{CameraModel, Detection, Position3D, TargetGeometry};

/// Reference deployment: 640x480, 60°/45° FOV, mounted at (8, 10.5, 24),
/// pitched 35° down.
pub fn reference_camera() -> CameraModel {
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

pub fn reference_torus() -> TargetGeometry {
    TargetGeometry::new(5.0, 1.0).expect("reference torus is valid")
}

/// World point given in the camera's (pitched) frame.
pub fn world_from_camera_frame(camera: &CameraModel, local: Vector3<f64>) -> Position3D {
    Position3D::from(camera.position() + camera.mount_rotation() * local)
}

/// Forward-render the bounding box a torus at `position` tilted by
/// `orientation` would produce under the locator's own camera model.
///
/// Returns `None` when the box would not fit in the frame.
pub fn render_detection(
    camera: &CameraModel,
    target: &TargetGeometry,
    position: &Position3D,
    orientation: f64,
) -> Option<Detection> {
    let (cx, cy) = project_to_pixel(camera, position).ok()?;
    let range = (position.to_point() - camera.position()).norm();

    let (nx, _) = camera.normalize(cx, cy).ok()?;
    let horizontal = (nx * (camera.fov_x() * 0.5).tan()).atan();
    let half_tan = target.effective_diameter(orientation) / (2.0 * range * horizontal.cos());
    let subtense = 2.0 * half_tan.atan();
    let width = subtense / camera.fov_x() * f64::from(camera.image_width());
    let height = width / aspect_for_orientation(orientation, target);

    let det = Detection::from_box(
        cx - 0.5 * width,
        cy - 0.5 * height,
        cx + 0.5 * width,
        cy + 0.5 * height,
    );
    let fits = det.xmin >= 0.0
        && det.ymin >= 0.0
        && det.xmax <= f64::from(camera.image_width())
        && det.ymax <= f64::from(camera.image_height());
    fits.then_some(det)
}
