//! I/O helpers for inspecting grids and accumulators.
//!
//! - `save_heatmap_png`: write any integer view as a grayscale PNG, scaled so
//!   the largest absolute value maps to 255.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::ImageView;
use image::{GrayImage, Luma};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Save a view to a grayscale PNG normalised by its largest magnitude.
pub fn save_heatmap_png<I>(view: &I, path: &Path) -> Result<(), String>
where
    I: ImageView,
    I::Pixel: Into<f64>,
{
    ensure_parent_dir(path)?;
    let peak = view
        .rows()
        .flat_map(|row| row.iter().map(|&v| v.into().abs()))
        .fold(0.0f64, f64::max);
    let scale = if peak > 0.0 { 255.0 / peak } else { 0.0 };
    let mut out = GrayImage::new(view.width() as u32, view.height() as u32);
    for (y, row) in view.rows().enumerate() {
        for (x, &px) in row.iter().enumerate() {
            let v = (px.into().abs() * scale).clamp(0.0, 255.0);
            out.put_pixel(x as u32, y as u32, Luma([v.round() as u8]));
        }
    }
    out.save(path)
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
