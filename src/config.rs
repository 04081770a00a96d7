//! JSON configuration for tooling built on the detector.
use crate::detector::HoughParams;
use std::fs;
use std::path::Path;

/// Reads [`HoughParams`] from a JSON file; missing fields take their defaults.
pub fn load_params(path: &Path) -> Result<HoughParams, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}
