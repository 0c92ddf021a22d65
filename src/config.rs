//! JSON runtime configuration for the locator binaries.
//!
//! Every section is optional and falls back to the reference deployment:
//! a 640x480 camera with 60°/45° field of view mounted at `(8, 10.5, 24)`
//! and pitched 35° down, observing a torus of radii 5 and 1.
pub mod camera;
pub mod service;

pub use camera::{CameraConfig, TargetConfig};
pub use service::{ListenerConfig, OutputConfig};

use crate::error::Result;
use crate::locator::TorusLocator;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub camera: CameraConfig,
    pub target: TargetConfig,
    pub listener: ListenerConfig,
    pub output: OutputConfig,
}

impl RuntimeConfig {
    /// Validate the geometry sections and build the locator.
    pub fn build_locator(&self) -> Result<TorusLocator> {
        Ok(TorusLocator::new(
            self.camera.resolve()?,
            self.target.resolve()?,
        ))
    }
}

pub fn parse_config(contents: &str) -> std::result::Result<RuntimeConfig, String> {
    serde_json::from_str(contents).map_err(|e| format!("Failed to parse config: {e}"))
}

pub fn load_config(path: &Path) -> std::result::Result<RuntimeConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}
