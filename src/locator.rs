//! Pipeline driving one detection from bounding box to world position.
//!
//! [`TorusLocator`] owns the two immutable parameter sets and runs
//! viewing angles → orientation → distance → back-projection. It holds no
//! per-call state, so a single instance can be shared across threads.
//!
//! ```no_run
//! use torus_locator::{CameraModel, Detection, TargetGeometry, TorusLocator};
//! use nalgebra::Point3;
//!
//! # fn main() -> Result<(), torus_locator::LocateError> {
//! let camera = CameraModel::new(
//!     640, 480,
//!     60f64.to_radians(), 45f64.to_radians(),
//!     Point3::new(8.0, 10.5, 24.0),
//!     (-35f64).to_radians(),
//! )?;
//! let locator = TorusLocator::new(camera, TargetGeometry::new(5.0, 1.0)?);
//! let loc = locator.locate(&Detection::from_box(270.0, 200.0, 370.0, 260.0))?;
//! println!("range={:.2} confidence={:.2}", loc.estimate.distance, loc.estimate.confidence);
//! # Ok(())
//! # }
//! ```
use crate::angle::{bearing_angle, resolve_viewing_angles};
use crate::camera::CameraModel;
use crate::distance::estimate_distance;
use crate::error::Result;
use crate::orientation::estimate_orientation;
use crate::projection::project_position;
use crate::target::TargetGeometry;
use crate::types::{Detection, Localization};
use log::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Monocular torus localizer for one fixed camera and one target type.
#[derive(Clone, Debug)]
pub struct TorusLocator {
    camera: CameraModel,
    target: TargetGeometry,
}

impl TorusLocator {
    pub fn new(camera: CameraModel, target: TargetGeometry) -> Self {
        Self { camera, target }
    }

    pub fn camera(&self) -> &CameraModel {
        &self.camera
    }

    pub fn target(&self) -> &TargetGeometry {
        &self.target
    }

    /// Localize a single detection.
    ///
    /// Box corners outside the frame and inverted boxes are `OutOfBounds`;
    /// a zero-height or zero-width box is `DegenerateGeometry`.
    pub fn locate(&self, det: &Detection) -> Result<Localization> {
        self.camera.check_in_frame(det.xmin, det.ymin)?;
        self.camera.check_in_frame(det.xmax, det.ymax)?;
        if det.xmin > det.xmax || det.ymin > det.ymax {
            return Err(self.camera.out_of_bounds(det.xmax, det.ymax));
        }

        let (width, height) = (det.width(), det.height());
        let (cx, cy) = det.center();

        let viewing_angles = resolve_viewing_angles(&self.camera, cx, cy)?;
        let orientation = estimate_orientation(width, height, &self.target)?;
        let estimate = estimate_distance(
            width,
            height,
            &viewing_angles,
            &orientation,
            &self.camera,
            &self.target,
        )?;
        let position = project_position(&self.camera, cx, cy, estimate.distance)?;
        let bearing = bearing_angle(&self.camera, cx, cy)?;

        debug!(
            "TorusLocator::locate center=({:.1},{:.1}) size={:.1}x{:.1} range={:.3} orient={:.1}deg conf={:.2}",
            cx,
            cy,
            width,
            height,
            estimate.distance,
            estimate.orientation.to_degrees(),
            estimate.confidence
        );

        Ok(Localization {
            center_px: [cx, cy],
            width_px: width,
            height_px: height,
            viewing_angles,
            bearing,
            orientation,
            estimate,
            position,
        })
    }

    /// Localize every detection; results keep the input order and a failure
    /// only affects its own slot.
    pub fn locate_batch(&self, detections: &[Detection]) -> Vec<Result<Localization>> {
        #[cfg(feature = "parallel")]
        {
            detections.par_iter().map(|d| self.locate(d)).collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            detections.iter().map(|d| self.locate(d)).collect()
        }
    }
}
