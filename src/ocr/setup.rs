use anyhow::{anyhow, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::log;

const TESSDATA_REPO: &str = "https://github.com/tesseract-ocr/tessdata/raw/main";

#[cfg(windows)]
const EXECUTABLE_NAME: &str = "tesseract.exe";
#[cfg(not(windows))]
const EXECUTABLE_NAME: &str = "tesseract";

#[cfg(windows)]
const COMMON_INSTALL_DIRS: &[&str] = &[
    r"C:\Program Files\Tesseract-OCR",
    r"C:\Program Files (x86)\Tesseract-OCR",
];
#[cfg(not(windows))]
const COMMON_INSTALL_DIRS: &[&str] = &["/usr/bin", "/usr/local/bin", "/opt/homebrew/bin"];

/// Returns the directory for storing our own Tesseract files
pub fn get_tesseract_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("arquitectobot")
        .join("tesseract")
}

/// Finds the Tesseract executable.
///
/// Order: configured path, our local dir, PATH, common install locations.
pub fn find_tesseract_executable(configured: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = configured {
        if path.exists() {
            return Ok(path.to_path_buf());
        }
        log(&format!(
            "Configured tesseract_path not found: {}",
            path.display()
        ));
    }

    let local_exe = get_tesseract_dir().join(EXECUTABLE_NAME);
    if local_exe.exists() {
        return Ok(local_exe);
    }

    // Check PATH
    if let Ok(output) = Command::new("tesseract").arg("--version").output() {
        if output.status.success() {
            return Ok(PathBuf::from("tesseract"));
        }
    }

    for dir in COMMON_INSTALL_DIRS {
        let p = Path::new(dir).join(EXECUTABLE_NAME);
        if p.exists() {
            return Ok(p);
        }
    }

    Err(anyhow!(
        "Tesseract not found. Install Tesseract-OCR and add it to PATH, \
         or set ocr.tesseract_path in config.json."
    ))
}

/// Finds a tessdata directory holding `<language>.traineddata`, checking our
/// local dir first, then TESSDATA_PREFIX.
///
/// None means Tesseract should use its built-in default.
pub fn find_tessdata_dir(language: &str) -> Option<PathBuf> {
    let file_name = format!("{}.traineddata", language);

    let local_tessdata = get_tesseract_dir().join("tessdata");
    if local_tessdata.join(&file_name).exists() {
        return Some(local_tessdata);
    }

    if let Ok(prefix) = std::env::var("TESSDATA_PREFIX") {
        let p = PathBuf::from(&prefix);
        if p.join(&file_name).exists() {
            return Some(p);
        }
        let p = p.join("tessdata");
        if p.join(&file_name).exists() {
            return Some(p);
        }
    }

    None
}

/// Parses `tesseract --list-langs` output.
///
/// The first line is a header ("List of available languages in ...").
pub fn parse_language_list(output: &str) -> Vec<String> {
    output
        .lines()
        .skip(1)
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

/// Lists the languages the given Tesseract installation can use.
pub fn list_languages(executable: &Path) -> Result<Vec<String>> {
    let output = Command::new(executable).arg("--list-langs").output()?;
    if !output.status.success() {
        return Err(anyhow!(
            "tesseract --list-langs failed: {}",
            String::from_utf8_lossy(&output.stderr)
        ));
    }
    // Older versions print the list to stderr
    let mut text = String::from_utf8_lossy(&output.stdout).to_string();
    if text.trim().is_empty() {
        text = String::from_utf8_lossy(&output.stderr).to_string();
    }
    Ok(parse_language_list(&text))
}

/// Makes sure `language` is usable, downloading its trained data if needed.
///
/// Returns the tessdata directory to pass to Tesseract, or None when the
/// installation already ships the language.
pub fn ensure_language_data(executable: &Path, language: &str) -> Result<Option<PathBuf>> {
    if let Some(dir) = find_tessdata_dir(language) {
        return Ok(Some(dir));
    }

    match list_languages(executable) {
        Ok(languages) if languages.iter().any(|l| l == language) => return Ok(None),
        Ok(_) => log(&format!(
            "Language '{}' not installed, downloading trained data...",
            language
        )),
        Err(e) => log(&format!(
            "Could not list Tesseract languages ({}), downloading trained data...",
            e
        )),
    }

    let tessdata_dir = get_tesseract_dir().join("tessdata");
    fs::create_dir_all(&tessdata_dir)?;
    download_tessdata(&tessdata_dir, language)?;
    Ok(Some(tessdata_dir))
}

/// Downloads `<language>.traineddata` from the tessdata repository
fn download_tessdata(tessdata_dir: &Path, language: &str) -> Result<()> {
    let url = format!("{}/{}.traineddata", TESSDATA_REPO, language);

    let client = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(300))
        .build()?;

    let response = client
        .get(&url)
        .header("User-Agent", "arquitectobot")
        .send()?;

    if !response.status().is_success() {
        return Err(anyhow!(
            "Failed to download {}.traineddata: HTTP {}",
            language,
            response.status()
        ));
    }

    let bytes = response.bytes()?;
    let target = save_traineddata(tessdata_dir, language, &bytes)?;

    log(&format!(
        "Downloaded {} ({} bytes)",
        target.display(),
        bytes.len()
    ));

    Ok(())
}

/// Writes `<language>.traineddata` into `tessdata_dir`.
///
/// The data goes to a temporary file first and is renamed into place once
/// complete.
fn save_traineddata(tessdata_dir: &Path, language: &str, bytes: &[u8]) -> Result<PathBuf> {
    let target = tessdata_dir.join(format!("{}.traineddata", language));

    let mut partial = tempfile::NamedTempFile::new_in(tessdata_dir)?;
    partial.write_all(bytes)?;
    partial.flush()?;
    partial.persist(&target)?;

    Ok(target)
}
