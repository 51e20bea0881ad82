//! Application constants and configuration

pub const APP_NAME: &str = "Avatar Preview Studio";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Upload ceiling shown in the upload zone. Only enforced when the
/// `enforce_upload_limit` setting is on.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Extensions offered by the file dialog filter
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "webp", "bmp", "ico", "tif", "tiff",
];

/// Background screenshots are 9:19.5 phone captures
pub const CARD_ASPECT: f32 = 9.0 / 19.5;

/// Content width at which the cards switch from one column to three
pub const WIDE_LAYOUT_MIN_WIDTH: f32 = 1024.0;
