use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// One bounding-box detection as produced by the upstream detector.
///
/// Only the box corners feed the geometry; `confidence`, `class_id` and
/// `label` are carried through untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Detection {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
    pub confidence: f64,
    pub class_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Detection {
    /// Box-only detection with neutral metadata.
    pub fn from_box(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
            confidence: 1.0,
            class_id: 0,
            label: None,
        }
    }

    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    pub fn center(&self) -> (f64, f64) {
        (0.5 * (self.xmin + self.xmax), 0.5 * (self.ymin + self.ymax))
    }
}

/// Angular offset of the target from the optical axis (radians).
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewingAngles {
    pub horizontal: f64,
    pub vertical: f64,
}

/// Estimated tilt of the torus plane: 0 = face-on, π/2 = edge-on.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrientationResult {
    pub angle: f64,
    /// Observed width / height of the box.
    pub aspect_ratio: f64,
}

/// Result of one distance estimation call.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistanceEstimate {
    /// Width-based, off-axis corrected range (world units, > 0).
    pub distance: f64,
    /// Orientation angle used for the estimate (radians).
    pub orientation: f64,
    /// Agreement of the width and height cues in `[0, 1]`.
    pub confidence: f64,
}

/// World-frame position of the target centre.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position3D {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    pub fn to_point(self) -> Point3<f64> {
        Point3::new(self.x, self.y, self.z)
    }
}

impl From<Point3<f64>> for Position3D {
    fn from(p: Point3<f64>) -> Self {
        Self::new(p.x, p.y, p.z)
    }
}

/// Full per-detection output of [`crate::TorusLocator`].
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Localization {
    /// Bounding-box centre in pixels.
    pub center_px: [f64; 2],
    pub width_px: f64,
    pub height_px: f64,
    pub viewing_angles: ViewingAngles,
    /// Angle between the world-frame line of sight and world +Z (radians).
    pub bearing: f64,
    pub orientation: OrientationResult,
    pub estimate: DistanceEstimate,
    pub position: Position3D,
}
