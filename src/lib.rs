#![doc = include_str!("../README.md")]

// Geometry core
pub mod angle;
pub mod camera;
pub mod distance;
pub mod error;
pub mod locator;
pub mod orientation;
pub mod projection;
pub mod target;
pub mod types;

// Service plumbing around the core
pub mod config;
pub mod io;
pub mod payload;
pub mod service;

// --- High-level re-exports -------------------------------------------------

pub use crate::camera::{CameraModel, PitchCorrection};
pub use crate::error::LocateError;
pub use crate::locator::TorusLocator;
pub use crate::target::TargetGeometry;
pub use crate::types::{
    Detection, DistanceEstimate, Localization, OrientationResult, Position3D, ViewingAngles,
};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use torus_locator::prelude::*;
///
/// # fn main() -> Result<(), LocateError> {
/// let locator = RuntimeConfig::default().build_locator()?;
/// let loc = locator.locate(&Detection::from_box(270.0, 200.0, 370.0, 260.0))?;
/// println!("range={:.2} position={:?}", loc.estimate.distance, loc.position);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::config::RuntimeConfig;
    pub use crate::{CameraModel, Detection, LocateError, TargetGeometry, TorusLocator};
}

// --- Stage-level API (for tools & advanced users) ----------------------------

pub mod stages {
    pub use crate::angle::{bearing_angle, resolve_viewing_angles};
    pub use crate::distance::{distance_cues, estimate_distance, pinhole_range, DistanceCues};
    pub use crate::orientation::{aspect_for_orientation, estimate_orientation};
    pub use crate::projection::{project_position, project_to_pixel, ray_direction};
}
