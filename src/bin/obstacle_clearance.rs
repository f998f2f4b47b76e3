use plant_clearance::annotate::render_overview;
use plant_clearance::cloud::load_cloud;
use plant_clearance::config::clearance;
use plant_clearance::image::io::{save_raster_png, write_json_file};
use plant_clearance::measure::height_slice;
use plant_clearance::ClearancePipeline;
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = clearance::load_config(Path::new(&config_path))?;

    let cloud = load_cloud(&config.input)?;
    let reference = config.reference.resolve(&cloud.points)?;

    let pipeline = ClearancePipeline::new(config.pipeline.clone());
    let report = pipeline
        .run(&cloud.points, &reference)
        .map_err(|e| format!("Clearance pipeline failed: {e}"))?;

    for line in report.summary_lines() {
        println!("{line}");
    }

    write_json_file(&config.output.report_json, &report)?;
    println!("Saved report to {}", config.output.report_json.display());

    if let Some(path) = &config.output.projection_image {
        match &report.projection {
            Some(projection) => {
                save_raster_png(&projection.raster, path)?;
                println!("Saved projection raster to {}", path.display());
            }
            None => log::warn!(
                "No projection raster for the {:?} estimator; skipping {}",
                report.estimator,
                path.display()
            ),
        }
    }

    if let Some(path) = &config.output.overview_image {
        let plane = config.pipeline.projection.plane;
        let slice: Vec<_> = height_slice(
            &cloud.points,
            plane,
            plane.height(&reference),
            config.pipeline.projection.height_tolerance,
        )
        .into_iter()
        .map(|i| plane.project(&cloud.points[i]))
        .collect();
        let overview = render_overview(
            &slice,
            plane.project(&reference),
            &report.circle,
            &report.clearance,
            &config.overview,
        )
        .map_err(|e| format!("Failed to render overview: {e}"))?;
        save_raster_png(&overview, path)?;
        println!("Saved overview to {}", path.display());
    }

    Ok(())
}

fn usage() -> String {
    "Usage: obstacle_clearance <config.json>".to_string()
}
