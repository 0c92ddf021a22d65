use crate::camera::{CameraModel, PitchCorrection};
use crate::error::Result;
use crate::target::TargetGeometry;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Camera section of the runtime config. Angles are in degrees.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub image_width: u32,
    pub image_height: u32,
    pub fov_x_deg: f64,
    pub fov_y_deg: f64,
    /// Camera position in world units `[x, y, z]`.
    pub position: [f64; 3],
    /// Mount pitch about the lateral axis; negative tilts the view down.
    pub pitch_deg: f64,
    pub pitch_correction: PitchCorrection,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            image_width: 640,
            image_height: 480,
            fov_x_deg: 60.0,
            fov_y_deg: 45.0,
            position: [8.0, 10.5, 24.0],
            pitch_deg: -35.0,
            pitch_correction: PitchCorrection::Both,
        }
    }
}

impl CameraConfig {
    pub fn resolve(&self) -> Result<CameraModel> {
        let [x, y, z] = self.position;
        let camera = CameraModel::new(
            self.image_width,
            self.image_height,
            self.fov_x_deg.to_radians(),
            self.fov_y_deg.to_radians(),
            Point3::new(x, y, z),
            self.pitch_deg.to_radians(),
        )?;
        Ok(camera.with_pitch_correction(self.pitch_correction))
    }
}

/// Known torus dimensions, in the same world units as the camera position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    pub major_radius: f64,
    pub minor_radius: f64,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            major_radius: 5.0,
            minor_radius: 1.0,
        }
    }
}

impl TargetConfig {
    pub fn resolve(&self) -> Result<TargetGeometry> {
        TargetGeometry::new(self.major_radius, self.minor_radius)
    }
}
