use super::load_json;
use crate::projector::ProjectionParams;
use crate::types::Plane;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration of the `cross_section_fit` tool.
#[derive(Debug, Deserialize)]
pub struct CrossSectionConfig {
    /// Mesh with connectivity (`.obj`). Plain point lists fall back to the
    /// whole cloud instead of the connected patch.
    pub input: PathBuf,
    /// Selected vertex indices. The first is the slice reference; the second,
    /// when present, is the peduncle point whose offset from the fitted
    /// centre is reported.
    pub seeds: Vec<usize>,
    #[serde(default = "default_projection")]
    pub projection: ProjectionParams,
    pub output: CrossSectionOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct CrossSectionOutputConfig {
    pub report_json: PathBuf,
    #[serde(default)]
    pub image: Option<PathBuf>,
}

/// Vertical cross-section: slice along the second axis, fit in XZ.
fn default_projection() -> ProjectionParams {
    ProjectionParams {
        plane: Plane::XZ,
        height_tolerance: 0.005,
        radius_threshold: 0.1,
        image_size: 500,
        point_radius: 1,
        ..ProjectionParams::default()
    }
}

pub fn load_config(path: &Path) -> Result<CrossSectionConfig, String> {
    load_json(path)
}
