use thiserror::Error;

use crate::analysis::point::DetectedPoint;
use crate::log;

/// Why a line containing parentheses did not produce a coordinate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoordinateError {
    #[error("closing parenthesis appears before the opening one")]
    Unbalanced,
    #[error("expected 2 comma-separated values, found {0}")]
    WrongArity(usize),
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
}

/// Result of scanning one OCR line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    Point(DetectedPoint),
    /// The line has no parenthesized group
    NoCoordinates,
    /// The line has a group that could not be parsed
    Skipped(CoordinateError),
}

/// A candidate line that was dropped, kept for reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedLine {
    pub line: String,
    pub reason: CoordinateError,
}

/// Coordinates found in a block of OCR text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextExtraction {
    pub points: Vec<DetectedPoint>,
    pub skipped: Vec<SkippedLine>,
}

/// Parses the first `(x, y)` group of a line.
///
/// The group spans from the first `(` to the first `)`; anything after it is
/// ignored. The label of the resulting point is the whole line.
pub fn parse_line(line: &str) -> LineOutcome {
    let (Some(open), Some(close)) = (line.find('('), line.find(')')) else {
        return LineOutcome::NoCoordinates;
    };

    if close < open {
        return LineOutcome::Skipped(CoordinateError::Unbalanced);
    }

    let inner = &line[open + 1..close];
    let parts: Vec<&str> = inner.split(',').collect();
    if parts.len() != 2 {
        return LineOutcome::Skipped(CoordinateError::WrongArity(parts.len()));
    }

    match (parse_number(parts[0]), parse_number(parts[1])) {
        (Ok(x), Ok(y)) => LineOutcome::Point(DetectedPoint::text(x, y, line)),
        (Err(e), _) | (_, Err(e)) => LineOutcome::Skipped(e),
    }
}

fn parse_number(text: &str) -> Result<f64, CoordinateError> {
    let trimmed = text.trim();
    trimmed
        .parse::<f64>()
        .map_err(|_| CoordinateError::InvalidNumber(trimmed.to_string()))
}

/// Extracts coordinate points from OCR output, line by line.
///
/// Blank lines are ignored. Lines whose group cannot be parsed are reported
/// in `skipped` instead of aborting the scan.
pub fn extract_coordinates(text: &str) -> TextExtraction {
    let mut extraction = TextExtraction::default();

    for line in text.lines().filter(|l| !l.trim().is_empty()) {
        match parse_line(line) {
            LineOutcome::Point(point) => {
                log(&format!(
                    "Found coordinate ({}, {}) in line: {}",
                    point.x, point.y, line
                ));
                extraction.points.push(point);
            }
            LineOutcome::NoCoordinates => {}
            LineOutcome::Skipped(reason) => {
                log(&format!("Skipped line '{}': {}", line, reason));
                extraction.skipped.push(SkippedLine {
                    line: line.to_string(),
                    reason,
                });
            }
        }
    }

    extraction
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::point::PointKind;

    #[test]
    fn test_parse_line_basic() {
        let LineOutcome::Point(point) = parse_line("Punto (12.5, 7)") else {
            panic!("expected a point");
        };
        assert_eq!(point.x, 12.5);
        assert_eq!(point.y, 7.0);
        assert_eq!(point.kind, PointKind::TextCoordinate);
        assert_eq!(point.label, "Punto (12.5, 7)");
    }

    #[test]
    fn test_parse_line_without_parentheses() {
        assert_eq!(parse_line("sin coordenadas aqui"), LineOutcome::NoCoordinates);
        assert_eq!(parse_line("solo ( abierto"), LineOutcome::NoCoordinates);
    }

    #[test]
    fn test_parse_line_first_group_only() {
        let LineOutcome::Point(point) = parse_line("A (1, 2) B (3, 4)") else {
            panic!("expected a point");
        };
        assert_eq!((point.x, point.y), (1.0, 2.0));
    }

    #[test]
    fn test_parse_line_wrong_arity() {
        assert_eq!(
            parse_line("Cota (1, 2, 3)"),
            LineOutcome::Skipped(CoordinateError::WrongArity(3))
        );
        assert_eq!(
            parse_line("Nivel (4.5)"),
            LineOutcome::Skipped(CoordinateError::WrongArity(1))
        );
    }

    #[test]
    fn test_parse_line_invalid_number() {
        assert_eq!(
            parse_line("Eje (A, 3)"),
            LineOutcome::Skipped(CoordinateError::InvalidNumber("A".to_string()))
        );
        assert_eq!(
            parse_line("Eje (3, )"),
            LineOutcome::Skipped(CoordinateError::InvalidNumber(String::new()))
        );
    }

    #[test]
    fn test_parse_line_unbalanced() {
        assert_eq!(
            parse_line(") cerrado antes (1, 2)"),
            LineOutcome::Skipped(CoordinateError::Unbalanced)
        );
    }

    #[test]
    fn test_parse_line_negative_and_spaced() {
        let LineOutcome::Point(point) = parse_line("(  -3.25 ,1e2 )") else {
            panic!("expected a point");
        };
        assert_eq!((point.x, point.y), (-3.25, 100.0));
    }

    #[test]
    fn test_extract_coordinates_mixed_text() {
        let text = "PLANTA BAJA\n\nPunto (12.5, 7)\n   \nsin coordenadas aqui\nCota (1, 2, 3)\nP2 (0, -4)\n";

        let extraction = extract_coordinates(text);

        assert_eq!(extraction.points.len(), 2);
        assert_eq!(extraction.points[0].label, "Punto (12.5, 7)");
        assert_eq!(extraction.points[1].label, "P2 (0, -4)");
        assert_eq!(extraction.points[1].y, -4.0);

        assert_eq!(extraction.skipped.len(), 1);
        assert_eq!(extraction.skipped[0].line, "Cota (1, 2, 3)");
        assert_eq!(extraction.skipped[0].reason, CoordinateError::WrongArity(3));
    }

    #[test]
    fn test_extract_coordinates_nothing_found() {
        let extraction = extract_coordinates("sin coordenadas aqui");
        assert!(extraction.points.is_empty());
        assert!(extraction.skipped.is_empty());
    }
}
