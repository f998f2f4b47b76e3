use plant_clearance::circle::fit_circle;
use plant_clearance::cloud::load_cloud;
use plant_clearance::config::cross_section;
use plant_clearance::image::draw::{draw_circle, draw_cross, draw_tilted_cross};
use plant_clearance::image::io::{save_raster_png, write_json_file};
use plant_clearance::measure::center_offset;
use plant_clearance::projector::{rasterize, select_points};
use plant_clearance::types::{Point3D, WorldCircle};
use serde::Serialize;
use std::env;
use std::path::Path;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CrossSectionReport {
    component_size: usize,
    fitted_points: usize,
    circle: WorldCircle,
    circle_mm: [f64; 3],
    #[serde(skip_serializing_if = "Option::is_none")]
    peduncle_offset_mm: Option<f64>,
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = cross_section::load_config(Path::new(&config_path))?;

    let cloud = load_cloud(&config.input)?;
    let base_index = *config.seeds.first().ok_or("Config must select at least one seed")?;
    let base = *cloud
        .points
        .get(base_index)
        .ok_or_else(|| format!("Seed {base_index} out of range ({} points)", cloud.len()))?;

    let patch: Vec<Point3D> = match &cloud.adjacency {
        Some(adj) => adj
            .component(&config.seeds)
            .into_iter()
            .map(|i| cloud.points[i])
            .collect(),
        None => {
            log::warn!("{} has no connectivity; using every point", config.input.display());
            cloud.points.clone()
        }
    };

    let selected = select_points(&patch, &base, &config.projection)
        .map_err(|e| format!("Cross-section selection failed: {e}"))?;
    let circle = fit_circle(&selected).map_err(|e| format!("Circle fit failed: {e}"))?;

    let plane = config.projection.plane;
    let peduncle = config
        .seeds
        .get(1)
        .and_then(|&i| cloud.points.get(i))
        .map(|p| plane.project(p));
    let offset = peduncle.map(|p| center_offset(&circle, &p));

    let [x, y, r] = circle.to_millimeters();
    println!("cx = {x:.3} mm, cy = {y:.3} mm, r = {r:.3} mm ({} points)", selected.len());
    if let Some(d) = offset {
        println!("peduncle offset: {:.3} mm", d * 1000.0);
    }

    let report = CrossSectionReport {
        component_size: patch.len(),
        fitted_points: selected.len(),
        circle,
        circle_mm: circle.to_millimeters(),
        peduncle_offset_mm: offset.map(|d| d * 1000.0),
    };
    write_json_file(&config.output.report_json, &report)?;
    println!("Saved report to {}", config.output.report_json.display());

    if let Some(path) = &config.output.image {
        let frame = config.projection.frame(plane.project(&base));
        let mut img = rasterize(&selected, &frame, config.projection.point_radius);
        let (cx, cy) = frame.to_cell(circle.center);
        let radius = frame.radius_to_pixels(circle.radius).round() as i64;
        draw_circle(&mut img, cx, cy, radius, 255);
        draw_cross(&mut img, cx, cy, 10, 255);
        if let Some(p) = peduncle {
            let (px, py) = frame.to_cell(p);
            draw_tilted_cross(&mut img, px, py, 5, 255);
        }
        let img = config.projection.orientation.apply(&img);
        save_raster_png(&img, path)?;
        println!("Saved cross-section image to {}", path.display());
    }

    Ok(())
}

fn usage() -> String {
    "Usage: cross_section_fit <config.json>".to_string()
}
