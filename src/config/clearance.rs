use super::{load_json, ReferenceConfig};
use crate::annotate::OverviewParams;
use crate::pipeline::ClearanceParams;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration of the `obstacle_clearance` tool.
#[derive(Debug, Deserialize)]
pub struct ObstacleClearanceConfig {
    /// Point cloud (`.xyz` or `.obj`).
    pub input: PathBuf,
    pub reference: ReferenceConfig,
    #[serde(default)]
    pub pipeline: ClearanceParams,
    #[serde(default)]
    pub overview: OverviewParams,
    pub output: ClearanceOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct ClearanceOutputConfig {
    pub report_json: PathBuf,
    #[serde(default)]
    pub projection_image: Option<PathBuf>,
    #[serde(default)]
    pub overview_image: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<ObstacleClearanceConfig, String> {
    load_json(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circle::EstimatorKind;

    #[test]
    fn minimal_config_uses_defaults() {
        let cfg: ObstacleClearanceConfig = serde_json::from_str(
            r#"{
                "input": "cloud.xyz",
                "reference": {"index": 12},
                "output": {"report_json": "out/report.json"}
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.reference, ReferenceConfig::Index(12));
        assert_eq!(cfg.pipeline.estimator, EstimatorKind::Hough);
        assert_eq!(cfg.overview.image_size, 1000);
        assert!(cfg.output.overview_image.is_none());
    }
}
