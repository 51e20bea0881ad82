//! Common types and data structures

use eframe::egui;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Where the bytes of an uploaded file live
#[derive(Clone, Debug)]
pub enum FileSource {
    Path(PathBuf),
    Bytes(Arc<[u8]>),
}

/// A file handed over by the upload zone, not yet read
#[derive(Clone, Debug)]
pub struct FileHandle {
    pub name: String,
    /// Declared MIME type, never sniffed from content
    pub mime: String,
    pub source: FileSource,
}

impl FileHandle {
    pub fn from_path(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let mime = mime_from_path(&path).to_string();
        Self { name, mime, source: FileSource::Path(path) }
    }

    /// Build a handle from an OS drop payload. Native drops usually carry a path
    /// and an empty MIME string; web-style drops carry bytes.
    pub fn from_dropped(file: &egui::DroppedFile) -> Option<Self> {
        let source = match (&file.path, &file.bytes) {
            (Some(path), _) => FileSource::Path(path.clone()),
            (None, Some(bytes)) => FileSource::Bytes(bytes.clone()),
            (None, None) => return None,
        };
        let name = if file.name.is_empty() {
            file.path
                .as_ref()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default()
        } else {
            file.name.clone()
        };
        let mime = if file.mime.is_empty() {
            match &file.path {
                Some(path) => mime_from_path(path),
                None => mime_from_path(Path::new(&name)),
            }
            .to_string()
        } else {
            file.mime.clone()
        };
        Some(Self { name, mime, source })
    }

    pub fn is_image(&self) -> bool {
        self.mime.starts_with("image/")
    }
}

/// Map a file extension to the MIME type a browser would declare for it
pub fn mime_from_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" | "jfif" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "ico" => "image/x-icon",
        "tif" | "tiff" => "image/tiff",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        "txt" => "text/plain",
        "html" | "htm" => "text/html",
        "csv" => "text/csv",
        "json" => "application/json",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        _ => "application/octet-stream",
    }
}

/// Why a decode produced no completion
#[derive(Debug)]
pub enum DecodeError {
    Io(std::io::Error),
    TooLarge { len: u64, limit: u64 },
    WorkerGone,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Io(e) => write!(f, "read failed: {}", e),
            DecodeError::TooLarge { len, limit } => {
                write!(f, "file is {} bytes, limit is {}", len, limit)
            }
            DecodeError::WorkerGone => write!(f, "decode worker stopped"),
        }
    }
}

impl std::error::Error for DecodeError {}

impl From<std::io::Error> for DecodeError {
    fn from(e: std::io::Error) -> Self {
        DecodeError::Io(e)
    }
}

/// Result of a finished read, sent from the decode task to the UI thread
pub struct DecodedImage {
    pub ticket: u64,
    pub name: String,
    pub data_uri: String,
    pub byte_len: usize,
    /// None when the bytes are not a decodable image (mislabeled file)
    pub pixels: Option<Arc<egui::ColorImage>>,
}

/// The image currently shown in every template card
pub struct UploadedImage {
    pub name: String,
    pub data_uri: String,
    pub byte_len: usize,
    pub pixels: Option<Arc<egui::ColorImage>>,
    pub texture: Option<egui::TextureHandle>,
}

impl UploadedImage {
    /// MIME type recorded in the data URI header
    pub fn mime(&self) -> &str {
        self.data_uri
            .strip_prefix("data:")
            .and_then(|rest| rest.split_once(';'))
            .map(|(mime, _)| mime)
            .unwrap_or_default()
    }

    /// Pixel size of the decoded image, if it decoded
    pub fn size(&self) -> Option<[usize; 2]> {
        self.pixels.as_ref().map(|p| p.size)
    }

    /// Upload pixels to the GPU on first use, shrunk to the renderer's maximum
    /// texture side when needed. Returns None for broken images.
    pub fn texture(&mut self, ctx: &egui::Context) -> Option<&egui::TextureHandle> {
        if self.texture.is_none() {
            let pixels = self.pixels.as_ref()?;
            let max_side = ctx.input(|i| i.max_texture_side);
            let image = match crate::decoder::fit_texture_side(pixels, max_side) {
                Some(fitted) => Arc::new(fitted),
                None => pixels.clone(),
            };
            self.texture = Some(ctx.load_texture(
                format!("upload_{}", self.name),
                egui::ImageData::Color(image),
                egui::TextureOptions::LINEAR,
            ));
        }
        self.texture.as_ref()
    }
}

impl From<DecodedImage> for UploadedImage {
    fn from(decoded: DecodedImage) -> Self {
        Self {
            name: decoded.name,
            data_uri: decoded.data_uri,
            byte_len: decoded.byte_len,
            pixels: decoded.pixels,
            texture: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dropped(name: &str, mime: &str, path: Option<&str>) -> egui::DroppedFile {
        egui::DroppedFile {
            path: path.map(PathBuf::from),
            name: name.to_string(),
            mime: mime.to_string(),
            bytes: None,
            ..Default::default()
        }
    }

    #[test]
    fn extension_mime_table() {
        assert_eq!(mime_from_path(Path::new("photo.PNG")), "image/png");
        assert_eq!(mime_from_path(Path::new("a/b/photo.jpeg")), "image/jpeg");
        assert_eq!(mime_from_path(Path::new("notes.txt")), "text/plain");
        assert_eq!(mime_from_path(Path::new("no_extension")), "application/octet-stream");
    }

    #[test]
    fn handle_from_path_declares_mime() {
        let handle = FileHandle::from_path(PathBuf::from("/home/me/photo.png"));
        assert_eq!(handle.name, "photo.png");
        assert_eq!(handle.mime, "image/png");
        assert!(handle.is_image());

        let handle = FileHandle::from_path(PathBuf::from("/home/me/notes.txt"));
        assert!(!handle.is_image());
    }

    #[test]
    fn dropped_mime_wins_over_extension() {
        let file = dropped("weird.txt", "image/png", Some("/tmp/weird.txt"));
        let handle = FileHandle::from_dropped(&file).unwrap();
        assert_eq!(handle.mime, "image/png");
    }

    #[test]
    fn dropped_without_mime_uses_path_extension() {
        let file = dropped("", "", Some("/tmp/avatar.gif"));
        let handle = FileHandle::from_dropped(&file).unwrap();
        assert_eq!(handle.name, "avatar.gif");
        assert_eq!(handle.mime, "image/gif");
    }

    #[test]
    fn dropped_bytes_only() {
        let mut file = dropped("avatar.webp", "", None);
        file.bytes = Some(Arc::from(vec![1u8, 2, 3]));
        let handle = FileHandle::from_dropped(&file).unwrap();
        assert_eq!(handle.mime, "image/webp");
        assert!(matches!(handle.source, FileSource::Bytes(ref b) if b.len() == 3));
    }

    #[test]
    fn uploaded_mime_comes_from_data_uri() {
        let uploaded = UploadedImage::from(DecodedImage {
            ticket: 1,
            name: "photo.png".into(),
            data_uri: "data:image/png;base64,AAAA".into(),
            byte_len: 3,
            pixels: None,
        });
        assert_eq!(uploaded.mime(), "image/png");
        assert!(uploaded.size().is_none());
    }

    #[test]
    fn oversized_upload_texture_fits_max_side() {
        let mut uploaded = UploadedImage::from(DecodedImage {
            ticket: 1,
            name: "panorama.png".into(),
            data_uri: "data:image/png;base64,AAAA".into(),
            byte_len: 3,
            pixels: Some(Arc::new(egui::ColorImage::new([9000, 4], egui::Color32::RED))),
        });
        let ctx = egui::Context::default();
        let raw = egui::RawInput {
            max_texture_side: Some(8192),
            ..Default::default()
        };
        let mut texture_size = None;
        let _ = ctx.run(raw, |ctx| {
            texture_size = uploaded.texture(ctx).map(|t| t.size());
        });
        assert_eq!(texture_size, Some([8192, 4]));
        // Reported size stays the original
        assert_eq!(uploaded.size(), Some([9000, 4]));
    }

    #[test]
    fn dropped_without_contents_is_skipped() {
        let file = dropped("ghost.png", "image/png", None);
        assert!(FileHandle::from_dropped(&file).is_none());
    }
}
