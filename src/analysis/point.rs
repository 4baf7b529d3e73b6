use serde::{Deserialize, Serialize};

/// Where a detected point came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointKind {
    /// Centre of a contour's bounding rectangle
    RegionCentroid,
    /// Coordinate pair read from OCR text
    TextCoordinate,
}

impl PointKind {
    /// Display text for the results table.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::RegionCentroid => "Elemento arquitectónico",
            Self::TextCoordinate => "Coordenada de texto",
        }
    }
}

/// A point found on the plan, either by contour detection or OCR.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectedPoint {
    pub x: f64,
    pub y: f64,
    pub kind: PointKind,
    pub label: String,
}

impl DetectedPoint {
    pub fn region(x: f64, y: f64, label: impl Into<String>) -> Self {
        Self {
            x,
            y,
            kind: PointKind::RegionCentroid,
            label: label.into(),
        }
    }

    pub fn text(x: f64, y: f64, label: impl Into<String>) -> Self {
        Self {
            x,
            y,
            kind: PointKind::TextCoordinate,
            label: label.into(),
        }
    }
}
