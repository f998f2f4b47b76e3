//! Point-cloud loading for the demo tools.
//!
//! Supported inputs:
//! - `.xyz` / `.txt`: one `x y z` triple per line (extra columns ignored,
//!   `#` comments and blank lines skipped; commas accepted as separators).
//! - `.obj`: loaded with `tobj`; `f` and `l` elements provide the vertex
//!   adjacency used for connected-component selection.
use crate::traverse::Adjacency;
use crate::types::Point3D;
use std::fs;
use std::path::Path;

/// Vertices and, when the source has connectivity, their adjacency.
#[derive(Clone, Debug, Default)]
pub struct PointCloud {
    pub points: Vec<Point3D>,
    pub adjacency: Option<Adjacency>,
}

impl PointCloud {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

pub fn load_cloud(path: &Path) -> Result<PointCloud, String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read cloud {}: {e}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    let cloud = match ext.as_str() {
        "obj" => parse_obj(&text),
        "xyz" | "txt" | "csv" => parse_xyz(&text),
        other => return Err(format!("Unsupported cloud format '{other}' for {}", path.display())),
    }
    .map_err(|e| format!("Failed to parse {}: {e}", path.display()))?;
    log::info!("Loaded {} points from {}", cloud.len(), path.display());
    Ok(cloud)
}

fn parse_coord(tok: Option<&str>, line_no: usize) -> Result<f64, String> {
    let tok = tok.ok_or_else(|| format!("line {line_no}: expected 3 coordinates"))?;
    tok.parse::<f64>()
        .map_err(|e| format!("line {line_no}: invalid coordinate '{tok}': {e}"))
}

pub fn parse_xyz(text: &str) -> Result<PointCloud, String> {
    let mut points = Vec::new();
    for (i, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let mut toks = line
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty());
        let x = parse_coord(toks.next(), i + 1)?;
        let y = parse_coord(toks.next(), i + 1)?;
        let z = parse_coord(toks.next(), i + 1)?;
        points.push(Point3D::new(x, y, z));
    }
    Ok(PointCloud {
        points,
        adjacency: None,
    })
}

/// Mesh elements through `tobj`. Faces keep their polygon loops and `l`
/// polylines become edge chains; all models are merged into one cloud, each
/// model's vertices in the order its elements first reference them. Bare
/// `v` lines that no element references are not loaded.
pub fn parse_obj(text: &str) -> Result<PointCloud, String> {
    let options = tobj::LoadOptions {
        triangulate: false,
        single_index: false,
        ignore_points: true,
        ignore_lines: false,
        ..Default::default()
    };
    let (models, _materials) = tobj::load_obj_buf(&mut text.as_bytes(), &options, |_| {
        Err(tobj::LoadError::OpenFileFailed)
    })
    .map_err(|e| e.to_string())?;

    let mut points = Vec::new();
    let mut edges: Vec<[usize; 2]> = Vec::new();
    for model in &models {
        let mesh = &model.mesh;
        let offset = points.len();
        points.extend(
            mesh.positions
                .chunks_exact(3)
                .map(|c| Point3D::new(c[0] as f64, c[1] as f64, c[2] as f64)),
        );
        // Empty arities mean an all-triangle mesh.
        let arities: Vec<usize> = if mesh.face_arities.is_empty() {
            vec![3; mesh.indices.len() / 3]
        } else {
            mesh.face_arities.iter().map(|&a| a as usize).collect()
        };
        let mut start = 0;
        for arity in arities {
            let element = mesh
                .indices
                .get(start..start + arity)
                .ok_or_else(|| format!("model '{}': element indices out of range", model.name))?;
            start += arity;
            let ids: Vec<usize> = element.iter().map(|&i| offset + i as usize).collect();
            edges.extend(ids.windows(2).map(|w| [w[0], w[1]]));
            if ids.len() > 2 {
                edges.push([ids[ids.len() - 1], ids[0]]);
            }
        }
        log::debug!(
            "cloud: OBJ model '{}' with {} vertices",
            model.name,
            points.len() - offset
        );
    }
    if points.is_empty() {
        return Err("OBJ has no faces or lines; use .xyz for bare point clouds".to_string());
    }
    let adjacency = Adjacency::from_edges(points.len(), &edges);
    Ok(PointCloud {
        points,
        adjacency: Some(adjacency),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xyz_skips_comments_and_extra_columns() {
        let cloud = parse_xyz("# header\n0.1 0.2 0.3 255 0 0\n\n1,2,3\n").unwrap();
        assert_eq!(cloud.len(), 2);
        assert_eq!(cloud.points[1], Point3D::new(1.0, 2.0, 3.0));
        assert!(cloud.adjacency.is_none());
    }

    #[test]
    fn xyz_reports_the_bad_line() {
        let err = parse_xyz("0 0 0\n1 2\n").unwrap_err();
        assert!(err.contains("line 2"), "{err}");
    }

    #[test]
    fn obj_faces_and_lines_build_adjacency() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 5 5 5\nv 6 5 5\nf 1 2 3\nl 4 5\n";
        let cloud = parse_obj(text).unwrap();
        assert_eq!(cloud.len(), 5);
        assert_eq!(cloud.points[3], Point3D::new(5.0, 5.0, 5.0));
        let adj = cloud.adjacency.unwrap();
        let mut c = adj.component(&[0]);
        c.sort_unstable();
        assert_eq!(c, vec![0, 1, 2]);
        assert_eq!(adj.component(&[4]), vec![4, 3]);
    }

    #[test]
    fn obj_quads_close_their_loop() {
        let text = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";
        let adj = parse_obj(text).unwrap().adjacency.unwrap();
        let mut n: Vec<usize> = adj.neighbors(0).to_vec();
        n.sort_unstable();
        assert_eq!(n, vec![1, 3]);
    }

    #[test]
    fn obj_without_elements_is_rejected() {
        assert!(parse_obj("v 0 0 0\nv 1 0 0\n").is_err());
    }
}
