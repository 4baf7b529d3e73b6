//! Application configuration.
//!
//! Loads settings from config.json next to the executable at startup.
//! Every field has a default, so a partial file only overrides what it names.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Global configuration instance, initialized once at startup.
static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Parameters for the contour-based region detector.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Grayscale cutoff for the inverse binary threshold.
    /// Pixels brighter than this become background.
    pub threshold: u8,
    /// Contours with a polygon area at or below this are discarded.
    pub min_area: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            threshold: 150,
            min_area: 100.0,
        }
    }
}

/// Tesseract settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Tesseract language code (`-l`)
    pub language: String,
    /// Page segmentation mode (`--psm`). None keeps Tesseract's default.
    pub page_segmentation_mode: Option<u8>,
    /// Explicit path to the tesseract executable
    pub tesseract_path: Option<PathBuf>,
    /// Download `<language>.traineddata` when Tesseract does not have it
    pub download_language_data: bool,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: "eng".to_string(),
            page_segmentation_mode: None,
            tesseract_path: None,
            download_language_data: true,
        }
    }
}

/// File names used when saving results.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub script_file_name: String,
    pub points_file_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            script_file_name: "plano_a_dynamo.py".to_string(),
            points_file_name: "puntos_detectados.json".to_string(),
        }
    }
}

/// Complete application configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub detection: DetectionConfig,
    pub ocr: OcrConfig,
    pub output: OutputConfig,
}

/// Loads configuration from `path`, falling back to defaults when the file
/// is missing or cannot be parsed.
pub fn load_config_from(path: &Path) -> AppConfig {
    crate::log(&format!("Looking for config at: {}", path.display()));

    if !path.exists() {
        crate::log("config.json not found. Using default config.");
        return AppConfig::default();
    }

    match fs::read_to_string(path) {
        Ok(contents) => match serde_json::from_str(&contents) {
            Ok(config) => {
                crate::log("Config loaded from config.json");
                config
            }
            Err(e) => {
                crate::log(&format!(
                    "Failed to parse config.json: {}. Using defaults.",
                    e
                ));
                AppConfig::default()
            }
        },
        Err(e) => {
            crate::log(&format!(
                "Failed to read config.json: {}. Using defaults.",
                e
            ));
            AppConfig::default()
        }
    }
}

/// Initializes the global configuration. Call once at startup.
pub fn init_config() {
    let _ = CONFIG.set(load_config_from(&crate::paths::get_config_path()));
}

/// Returns a reference to the global configuration, loading it on first use.
pub fn get_config() -> &'static AppConfig {
    CONFIG.get_or_init(|| load_config_from(&crate::paths::get_config_path()))
}
