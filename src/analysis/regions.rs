//! Contour-based region detection.
//!
//! Thresholds the plan, traces every contour (outer borders and holes alike)
//! and reduces each sufficiently large contour to the centre of its
//! bounding rectangle.

use image::DynamicImage;
use imageproc::contours::find_contours;
use imageproc::contrast::{threshold, ThresholdType};
use imageproc::geometry::contour_area;
use imageproc::point::Point;

use super::point::DetectedPoint;
use crate::config::DetectionConfig;

/// Axis-aligned bounding rectangle in pixel units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl BoundingRect {
    pub fn center(&self) -> (f64, f64) {
        (
            self.x as f64 + self.width as f64 / 2.0,
            self.y as f64 + self.height as f64 / 2.0,
        )
    }
}

/// Smallest axis-aligned rectangle containing every point.
///
/// Width and height count pixels, so a single point is 1x1.
pub fn bounding_rect(points: &[Point<i32>]) -> Option<BoundingRect> {
    let first = points.first()?;
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);

    for p in points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }

    Some(BoundingRect {
        x: min_x,
        y: min_y,
        width: (max_x - min_x + 1) as u32,
        height: (max_y - min_y + 1) as u32,
    })
}

/// Finds architectural elements as contour centroids.
///
/// Nested contours are not merged: an outlined shape yields one point for
/// its outer border and one for its hole.
pub fn detect_regions(img: &DynamicImage, config: &DetectionConfig) -> Vec<DetectedPoint> {
    // Dark ink (at or below the cutoff) becomes foreground
    let gray = img.to_luma8();
    let binary = threshold(&gray, config.threshold, ThresholdType::BinaryInverted);
    let contours = find_contours::<i32>(&binary);

    let mut points = Vec::new();
    for contour in &contours {
        let area = contour_area(&contour.points);
        if area <= config.min_area {
            continue;
        }
        let Some(rect) = bounding_rect(&contour.points) else {
            continue;
        };

        let (cx, cy) = rect.center();
        points.push(DetectedPoint::region(
            cx,
            cy,
            format!("Elemento de {}x{}px", rect.width, rect.height),
        ));
    }

    crate::log(&format!(
        "Region detection: {} contours, {} above area {:.0}",
        contours.len(),
        points.len(),
        config.min_area
    ));

    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::point::PointKind;
    use image::{ImageBuffer, Rgb, RgbImage};

    fn white_canvas(width: u32, height: u32) -> RgbImage {
        ImageBuffer::from_pixel(width, height, Rgb([255, 255, 255]))
    }

    fn fill_rect(img: &mut RgbImage, x0: u32, y0: u32, w: u32, h: u32) {
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                img.put_pixel(x, y, Rgb([0, 0, 0]));
            }
        }
    }

    #[test]
    fn test_bounding_rect() {
        let points = vec![Point::new(3, 4), Point::new(7, 2), Point::new(5, 9)];
        let rect = bounding_rect(&points).unwrap();
        assert_eq!(
            rect,
            BoundingRect { x: 3, y: 2, width: 5, height: 8 }
        );
        assert_eq!(rect.center(), (5.5, 6.0));
        assert!(bounding_rect(&[]).is_none());
    }

    #[test]
    fn test_blank_raster_has_no_regions() {
        let img = DynamicImage::ImageRgb8(white_canvas(64, 48));
        let points = detect_regions(&img, &DetectionConfig::default());
        assert!(points.is_empty());
    }

    #[test]
    fn test_single_rectangle() {
        let mut canvas = white_canvas(60, 40);
        fill_rect(&mut canvas, 10, 10, 20, 10);
        let img = DynamicImage::ImageRgb8(canvas);

        let points = detect_regions(&img, &DetectionConfig::default());

        assert_eq!(points.len(), 1);
        assert_eq!(points[0].x, 20.0);
        assert_eq!(points[0].y, 15.0);
        assert_eq!(points[0].kind, PointKind::RegionCentroid);
        assert_eq!(points[0].label, "Elemento de 20x10px");
    }

    #[test]
    fn test_small_rectangle_filtered() {
        let mut canvas = white_canvas(40, 40);
        // 5x5 pixels trace a 4x4 polygon: area 16
        fill_rect(&mut canvas, 5, 5, 5, 5);
        let img = DynamicImage::ImageRgb8(canvas);

        assert!(detect_regions(&img, &DetectionConfig::default()).is_empty());

        let permissive = DetectionConfig { min_area: 10.0, ..Default::default() };
        assert_eq!(detect_regions(&img, &permissive).len(), 1);
    }

    #[test]
    fn test_outline_reports_outer_and_hole_contours() {
        let mut canvas = white_canvas(50, 40);
        // 30x20 outline, 2px thick
        fill_rect(&mut canvas, 5, 5, 30, 2);
        fill_rect(&mut canvas, 5, 23, 30, 2);
        fill_rect(&mut canvas, 5, 5, 2, 20);
        fill_rect(&mut canvas, 33, 5, 2, 20);
        let img = DynamicImage::ImageRgb8(canvas);

        let points = detect_regions(&img, &DetectionConfig::default());

        assert_eq!(points.len(), 2);
        assert!(points.iter().all(|p| p.x == 20.0 && p.y == 15.0));
        assert!(points.iter().any(|p| p.label == "Elemento de 30x20px"));
    }

    fn gray_rect(value: u8) -> DynamicImage {
        let mut canvas = white_canvas(60, 40);
        for y in 10..30 {
            for x in 10..40 {
                canvas.put_pixel(x, y, Rgb([value, value, value]));
            }
        }
        DynamicImage::ImageRgb8(canvas)
    }

    #[test]
    fn test_threshold_cutoff_is_inclusive() {
        let config = DetectionConfig::default();

        let at_cutoff = detect_regions(&gray_rect(150), &config);
        assert_eq!(at_cutoff.len(), 1, "Cutoff value should count as ink");
        assert_eq!(at_cutoff[0].label, "Elemento de 30x20px");

        assert!(detect_regions(&gray_rect(151), &config).is_empty());
    }

    #[test]
    fn test_area_threshold_is_strict() {
        // A 11x11 block traces a 10x10 polygon: area exactly 100
        let mut canvas = white_canvas(40, 40);
        fill_rect(&mut canvas, 5, 5, 11, 11);
        let img = DynamicImage::ImageRgb8(canvas);

        assert!(detect_regions(&img, &DetectionConfig::default()).is_empty());

        let lower = DetectionConfig { min_area: 99.0, ..Default::default() };
        assert_eq!(detect_regions(&img, &lower).len(), 1);
    }

    #[test]
    fn test_light_gray_ignored_by_threshold() {
        let mut canvas = white_canvas(60, 40);
        for y in 10..30 {
            for x in 10..40 {
                canvas.put_pixel(x, y, Rgb([200, 200, 200]));
            }
        }
        let img = DynamicImage::ImageRgb8(canvas);

        assert!(detect_regions(&img, &DetectionConfig::default()).is_empty());
    }
}
