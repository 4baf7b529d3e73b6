//! Dynamo script generation.
//!
//! Renders detected points as a Python node script that builds one
//! `Point.ByCoordinates` per point and exposes the list through `OUT`.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::analysis::point::DetectedPoint;

const PREAMBLE: &str = "# Python script for Dynamo
import clr
clr.AddReference('ProtoGeometry')
from Autodesk.DesignScript.Geometry import *

# Puntos detectados en el plano
puntos = [
";

const EPILOGUE: &str = "]

# Output para Dynamo
OUT = puntos
";

/// Formats a coordinate the way Python's `repr` prints a float
/// (`20.0`, `12.5`, `1e+16`, `1e-05`).
fn format_coordinate(value: f64) -> String {
    let text = format!("{:?}", value);
    let Some((mantissa, exponent)) = text.split_once('e') else {
        return text;
    };

    // Python always signs the exponent and pads it to two digits
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    format!("{}e{}{:0>2}", mantissa, sign, digits)
}

/// Renders the script for the given points, in order.
pub fn render_dynamo_script(points: &[DetectedPoint]) -> String {
    let mut script = String::from(PREAMBLE);

    for point in points {
        script.push_str(&format!(
            "    Point.ByCoordinates({}, {}, 0),  # {}\n",
            format_coordinate(point.x),
            format_coordinate(point.y),
            point.label
        ));
    }

    script.push_str(EPILOGUE);
    script
}

/// Saves the script as UTF-8 under `dir/file_name`, replacing any previous copy.
pub fn write_script(script: &str, dir: &Path, file_name: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;

    let path = dir.join(file_name);
    fs::write(&path, script)
        .with_context(|| format!("Failed to write script: {}", path.display()))?;

    crate::log(&format!("Script saved: {}", path.display()));
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn normalize(text: &str) -> Vec<String> {
        text.lines()
            .map(|l| l.split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|l| !l.is_empty())
            .collect()
    }

    #[test]
    fn test_render_two_points() {
        let points = vec![
            DetectedPoint::region(1.0, 2.0, "A"),
            DetectedPoint::text(3.0, 4.0, "B"),
        ];

        let script = render_dynamo_script(&points);

        let expected = vec![
            "# Python script for Dynamo",
            "import clr",
            "clr.AddReference('ProtoGeometry')",
            "from Autodesk.DesignScript.Geometry import *",
            "# Puntos detectados en el plano",
            "puntos = [",
            "Point.ByCoordinates(1.0, 2.0, 0), # A",
            "Point.ByCoordinates(3.0, 4.0, 0), # B",
            "]",
            "# Output para Dynamo",
            "OUT = puntos",
        ];
        assert_eq!(normalize(&script), expected);
    }

    #[test]
    fn test_render_exact_point_line() {
        let script = render_dynamo_script(&[DetectedPoint::region(20.0, 15.5, "Elemento de 20x10px")]);
        assert!(script.contains("    Point.ByCoordinates(20.0, 15.5, 0),  # Elemento de 20x10px\n"));
        assert!(script.ends_with("OUT = puntos\n"));
    }

    #[test]
    fn test_render_no_points() {
        let script = render_dynamo_script(&[]);
        assert!(script.contains("puntos = [\n]\n"));
        assert!(!script.contains("Point.ByCoordinates"));
    }

    #[test]
    fn test_format_coordinate() {
        assert_eq!(format_coordinate(20.0), "20.0");
        assert_eq!(format_coordinate(12.5), "12.5");
        assert_eq!(format_coordinate(-4.0), "-4.0");
        assert_eq!(format_coordinate(0.0001), "0.0001");
    }

    #[test]
    fn test_format_coordinate_exponent() {
        assert_eq!(format_coordinate(1e16), "1e+16");
        assert_eq!(format_coordinate(1e-5), "1e-05");
        assert_eq!(format_coordinate(-1.5e-7), "-1.5e-07");
        assert_eq!(format_coordinate(2.5e300), "2.5e+300");

        let script = render_dynamo_script(&[DetectedPoint::text(1e16, 1e-5, "lejos")]);
        assert!(script.contains("Point.ByCoordinates(1e+16, 1e-05, 0),  # lejos"));
    }

    #[test]
    fn test_write_script() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("output");

        let path = write_script("OUT = puntos\n", &out, "plano_a_dynamo.py").unwrap();

        assert_eq!(path, out.join("plano_a_dynamo.py"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "OUT = puntos\n");
    }
}
