//! JSON export for detected points.

use super::point::DetectedPoint;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Export points to a JSON file.
///
/// The output is pretty-printed for human readability.
pub fn export_points_to_json(points: &[DetectedPoint], output_path: &Path) -> Result<()> {
    let json =
        serde_json::to_string_pretty(points).context("Failed to serialize points to JSON")?;

    let mut file = File::create(output_path)
        .context(format!("Failed to create JSON file: {}", output_path.display()))?;

    file.write_all(json.as_bytes())
        .context("Failed to write JSON data")?;

    Ok(())
}
