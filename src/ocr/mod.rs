//! Text recognition over uploaded plans.
//!
//! Runs Tesseract on the staged upload and scans its output for
//! `(x, y)` coordinate annotations.

pub mod engine;
pub mod extract;
pub mod setup;

pub use engine::{Tesseract, TextRecognizer};
pub use extract::{extract_coordinates, SkippedLine};
