//! JSON configuration for the demo tools. Each tool has its own module with
//! a `load_config` entry point.

pub mod clearance;
pub mod cross_section;

use crate::types::Point3D;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub(crate) fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

/// Reference point given either as a vertex index or as explicit
/// coordinates (metres).
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceConfig {
    Index(usize),
    Point([f64; 3]),
}

impl ReferenceConfig {
    pub fn resolve(&self, points: &[Point3D]) -> Result<Point3D, String> {
        match self {
            ReferenceConfig::Index(i) => points.get(*i).copied().ok_or_else(|| {
                format!("Reference index {i} out of range ({} points)", points.len())
            }),
            ReferenceConfig::Point([x, y, z]) => Ok(Point3D::new(*x, *y, *z)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_resolves_index_or_point() {
        let pts = [Point3D::new(1.0, 2.0, 3.0)];
        let r: ReferenceConfig = serde_json::from_str(r#"{"index": 0}"#).unwrap();
        assert_eq!(r.resolve(&pts).unwrap(), pts[0]);
        let r: ReferenceConfig = serde_json::from_str(r#"{"point": [0.5, 0.0, -1.0]}"#).unwrap();
        assert_eq!(r.resolve(&[]).unwrap(), Point3D::new(0.5, 0.0, -1.0));
        assert!(ReferenceConfig::Index(3).resolve(&pts).is_err());
    }
}
