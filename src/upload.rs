//! Uploaded plan files.
//!
//! Classifies an upload by extension, decodes it into a raster and stages
//! the raw bytes in a temporary file for the external OCR process.

use std::io::Write;
use std::path::Path;

use image::DynamicImage;
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Unsupported file type: {0} (expected PDF, PNG or JPEG)")]
    UnsupportedType(String),
    #[error("PDF rasterization is not supported; upload the plan as PNG or JPEG")]
    PdfNotSupported,
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Accepted upload types.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    Png,
    Jpeg,
}

impl FileKind {
    /// Classifies a file name by its extension (case-insensitive).
    pub fn from_name(name: &str) -> Result<Self, UploadError> {
        let extension = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "pdf" => Ok(Self::Pdf),
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            _ => Err(UploadError::UnsupportedType(name.to_string())),
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            Self::Pdf => ".pdf",
            Self::Png => ".png",
            Self::Jpeg => ".jpg",
        }
    }

    /// Whether the file can be shown as a preview image.
    pub fn is_image(self) -> bool {
        matches!(self, Self::Png | Self::Jpeg)
    }
}

/// A plan file handed to the application by the user.
#[derive(Clone, Debug)]
pub struct UploadedFile {
    pub name: String,
    pub kind: FileKind,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, UploadError> {
        let name = name.into();
        let kind = FileKind::from_name(&name)?;
        Ok(Self { name, kind, bytes })
    }

    /// Reads a plan from disk.
    pub fn from_path(path: &Path) -> Result<Self, UploadError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        FileKind::from_name(&name)?;
        let bytes = std::fs::read(path)?;
        Self::new(name, bytes)
    }

    /// Decodes the upload into an in-memory raster.
    ///
    /// The image format is sniffed from the content, so a PNG saved with a
    /// `.jpg` name still decodes.
    pub fn decode(&self) -> Result<DynamicImage, UploadError> {
        if self.kind == FileKind::Pdf {
            return Err(UploadError::PdfNotSupported);
        }
        Ok(image::load_from_memory(&self.bytes)?)
    }

    /// Writes the raw bytes to a temporary file with a matching suffix.
    ///
    /// The file is deleted when the returned guard is dropped.
    pub fn stage(&self) -> Result<NamedTempFile, UploadError> {
        self.stage_in(&std::env::temp_dir())
    }

    /// Like [`UploadedFile::stage`], but creates the file inside `dir`.
    pub fn stage_in(&self, dir: &Path) -> Result<NamedTempFile, UploadError> {
        let mut staged = tempfile::Builder::new()
            .prefix("plano")
            .suffix(self.kind.suffix())
            .tempfile_in(dir)?;
        staged.write_all(&self.bytes)?;
        staged.flush()?;
        Ok(staged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, ImageFormat, Rgb};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img: ImageBuffer<Rgb<u8>, Vec<u8>> =
            ImageBuffer::from_pixel(width, height, Rgb([255, 255, 255]));
        let mut cursor = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut cursor, ImageFormat::Png)
            .unwrap();
        cursor.into_inner()
    }

    #[test]
    fn test_file_kind_from_name() {
        assert_eq!(FileKind::from_name("plano.pdf").unwrap(), FileKind::Pdf);
        assert_eq!(FileKind::from_name("plano.PNG").unwrap(), FileKind::Png);
        assert_eq!(FileKind::from_name("plano.jpg").unwrap(), FileKind::Jpeg);
        assert_eq!(FileKind::from_name("plano.jpeg").unwrap(), FileKind::Jpeg);
        assert!(matches!(
            FileKind::from_name("plano.dwg"),
            Err(UploadError::UnsupportedType(_))
        ));
        assert!(FileKind::from_name("plano").is_err());
    }

    #[test]
    fn test_decode_png() {
        let file = UploadedFile::new("plano.png", png_bytes(8, 4)).unwrap();
        let img = file.decode().unwrap();
        assert_eq!((img.width(), img.height()), (8, 4));
    }

    #[test]
    fn test_decode_png_named_jpg() {
        let file = UploadedFile::new("plano.jpg", png_bytes(8, 4)).unwrap();
        assert_eq!(file.kind, FileKind::Jpeg);

        let img = file.decode().unwrap();
        assert_eq!((img.width(), img.height()), (8, 4));
    }

    #[test]
    fn test_decode_pdf_not_supported() {
        let file = UploadedFile::new("plano.pdf", b"%PDF-1.4".to_vec()).unwrap();
        assert!(matches!(file.decode(), Err(UploadError::PdfNotSupported)));
    }

    #[test]
    fn test_decode_malformed_image() {
        let file = UploadedFile::new("plano.png", b"not a png".to_vec()).unwrap();
        assert!(matches!(file.decode(), Err(UploadError::Decode(_))));
    }

    #[test]
    fn test_stage_removes_file_on_drop() {
        let file = UploadedFile::new("plano.png", png_bytes(2, 2)).unwrap();
        let staged = file.stage().unwrap();
        let path = staged.path().to_path_buf();

        assert!(path.to_string_lossy().ends_with(".png"));
        assert_eq!(std::fs::read(&path).unwrap(), file.bytes);

        drop(staged);
        assert!(!path.exists());
    }

    #[test]
    fn test_stage_in_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = UploadedFile::new("plano.jpg", vec![0xFF, 0xD8]).unwrap();

        let staged = file.stage_in(dir.path()).unwrap();
        assert_eq!(staged.path().parent(), Some(dir.path()));
        assert!(staged.path().to_string_lossy().ends_with(".jpg"));

        drop(staged);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Planta.JPEG");
        std::fs::write(&path, [1u8, 2, 3]).unwrap();

        let file = UploadedFile::from_path(&path).unwrap();
        assert_eq!(file.name, "Planta.JPEG");
        assert_eq!(file.kind, FileKind::Jpeg);
        assert_eq!(file.bytes, vec![1, 2, 3]);
    }
}
