//! I/O helpers for rasters and JSON, used by the demo tools only.
//!
//! - `save_raster_png`: write a [`RasterU8`] to a grayscale PNG.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{ImageView, RasterU8};
use image::{GrayImage, ImageBuffer, Luma};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Save a raster to a grayscale PNG, creating parent directories.
pub fn save_raster_png(raster: &RasterU8, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let mut packed = Vec::with_capacity(raster.w * raster.h);
    for row in raster.rows() {
        packed.extend_from_slice(row);
    }
    let image: GrayImage = ImageBuffer::<Luma<u8>, Vec<u8>>::from_raw(
        raster.w as u32,
        raster.h as u32,
        packed,
    )
    .ok_or_else(|| "Failed to create image buffer".to_string())?;
    image
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
