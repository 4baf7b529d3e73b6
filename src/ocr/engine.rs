use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

use super::setup::{ensure_language_data, find_tessdata_dir, find_tesseract_executable};
use crate::config::OcrConfig;
use crate::log;

/// Turns an image file into plain text.
pub trait TextRecognizer {
    fn recognize(&self, image_path: &Path) -> Result<String>;
}

/// Tesseract invoked as an external process.
#[derive(Debug, Clone)]
pub struct Tesseract {
    executable: PathBuf,
    tessdata: Option<PathBuf>,
    language: String,
    page_segmentation_mode: Option<u8>,
}

impl Tesseract {
    /// Locates the executable and language data according to `config`.
    pub fn locate(config: &OcrConfig) -> Result<Self> {
        let executable = find_tesseract_executable(config.tesseract_path.as_deref())?;

        let tessdata = if config.download_language_data {
            ensure_language_data(&executable, &config.language)?
        } else {
            find_tessdata_dir(&config.language)
        };

        log(&format!(
            "Using Tesseract at {} (tessdata: {})",
            executable.display(),
            tessdata
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "system default".to_string())
        ));

        Ok(Self {
            executable,
            tessdata,
            language: config.language.clone(),
            page_segmentation_mode: config.page_segmentation_mode,
        })
    }

    /// Builds the argument list for recognizing `image_path` to stdout.
    fn arguments(&self, image_path: &Path) -> Vec<String> {
        let mut args = vec![
            image_path.to_string_lossy().to_string(),
            "stdout".to_string(),
            "-l".to_string(),
            self.language.clone(),
        ];
        if let Some(psm) = self.page_segmentation_mode {
            args.push("--psm".to_string());
            args.push(psm.to_string());
        }
        if let Some(dir) = &self.tessdata {
            args.push("--tessdata-dir".to_string());
            args.push(dir.to_string_lossy().to_string());
        }
        args
    }
}

impl TextRecognizer for Tesseract {
    fn recognize(&self, image_path: &Path) -> Result<String> {
        let output = Command::new(&self.executable)
            .args(self.arguments(image_path))
            .output()
            .with_context(|| format!("Failed to run {}", self.executable.display()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!("Tesseract failed: {}", stderr));
        }

        let text = String::from_utf8_lossy(&output.stdout).to_string();
        log(&format!("OCR returned {} lines", text.lines().count()));
        Ok(text)
    }
}
