//! Image decoder: turns a picked or dropped file into a data URI plus pixels
//!
//! Each accepted request gets a ticket. Reads run on the tokio runtime and
//! report back over a channel that the UI thread drains once per frame.

use crate::types::{DecodeError, DecodedImage, FileHandle, FileSource};
use base64::Engine as _;
use eframe::egui;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

pub struct ImageDecoder {
    runtime: tokio::runtime::Handle,
    tx: mpsc::UnboundedSender<DecodedImage>,
    rx: mpsc::UnboundedReceiver<DecodedImage>,
    last_ticket: u64,
    upload_limit: Option<u64>,
}

impl ImageDecoder {
    pub fn new(runtime: tokio::runtime::Handle) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { runtime, tx, rx, last_ticket: 0, upload_limit: None }
    }

    /// Reject files larger than `limit` bytes. `None` accepts any size.
    pub fn set_upload_limit(&mut self, limit: Option<u64>) {
        self.upload_limit = limit;
    }

    /// Ticket of the most recently started decode, 0 before the first one
    pub fn last_ticket(&self) -> u64 {
        self.last_ticket
    }

    /// Start reading `file` in the background. Files whose declared MIME type
    /// is not `image/*` are dropped without a trace in the UI.
    pub fn decode(&mut self, file: FileHandle, ctx: &egui::Context) -> Option<u64> {
        if !file.is_image() {
            debug!(name = %file.name, mime = %file.mime, "Ignoring non-image file");
            return None;
        }

        self.last_ticket += 1;
        let ticket = self.last_ticket;
        let tx = self.tx.clone();
        let ctx = ctx.clone();
        let limit = self.upload_limit;

        debug!(ticket, name = %file.name, mime = %file.mime, "Starting decode");

        self.runtime.spawn(async move {
            match decode_file(ticket, file, limit).await {
                Ok(decoded) => {
                    info!(
                        ticket,
                        name = %decoded.name,
                        bytes = decoded.byte_len,
                        decodable = decoded.pixels.is_some(),
                        "Decode finished"
                    );
                    if tx.send(decoded).is_ok() {
                        ctx.request_repaint();
                    }
                }
                Err(e) => warn!(ticket, error = %e, "Decode failed"),
            }
        });

        Some(ticket)
    }

    /// Drain every completion that arrived since the last frame
    pub fn poll(&mut self) -> Vec<DecodedImage> {
        let mut done = Vec::new();
        while let Ok(decoded) = self.rx.try_recv() {
            done.push(decoded);
        }
        done
    }

    #[cfg(test)]
    pub(crate) async fn next_completion(&mut self) -> Option<DecodedImage> {
        self.rx.recv().await
    }
}

/// Read the whole file and build the completion for `ticket`
pub async fn decode_file(
    ticket: u64,
    file: FileHandle,
    limit: Option<u64>,
) -> Result<DecodedImage, DecodeError> {
    let bytes: Arc<[u8]> = match &file.source {
        FileSource::Path(path) => {
            if let Some(limit) = limit {
                let len = tokio::fs::metadata(path).await?.len();
                check_limit(len, limit)?;
            }
            Arc::from(tokio::fs::read(path).await?)
        }
        FileSource::Bytes(bytes) => {
            if let Some(limit) = limit {
                check_limit(bytes.len() as u64, limit)?;
            }
            bytes.clone()
        }
    };

    let data_uri = encode_data_uri(&file.mime, &bytes);
    let pixel_bytes = bytes.clone();
    let pixels = tokio::task::spawn_blocking(move || decode_pixels(&pixel_bytes))
        .await
        .map_err(|_| DecodeError::WorkerGone)?;

    Ok(DecodedImage {
        ticket,
        name: file.name,
        data_uri,
        byte_len: bytes.len(),
        pixels: pixels.map(Arc::new),
    })
}

fn check_limit(len: u64, limit: u64) -> Result<(), DecodeError> {
    if len > limit {
        Err(DecodeError::TooLarge { len, limit })
    } else {
        Ok(())
    }
}

/// `data:<mime>;base64,<payload>` for the exact bytes given
pub fn encode_data_uri(mime: &str, bytes: &[u8]) -> String {
    let payload = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{};base64,{}", mime, payload)
}

/// Decode image bytes into straight-alpha RGBA. None if the bytes are not an
/// image the `image` crate understands.
pub fn decode_pixels(bytes: &[u8]) -> Option<egui::ColorImage> {
    match image::load_from_memory(bytes) {
        Ok(img) => {
            let rgba = img.to_rgba8();
            let size = [rgba.width() as usize, rgba.height() as usize];
            Some(egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
        }
        Err(e) => {
            debug!(error = %e, "Bytes are not a decodable image");
            None
        }
    }
}

/// Shrink `image` so neither side exceeds `max_side`, keeping its aspect
/// ratio. Returns None when it already fits.
pub fn fit_texture_side(source: &egui::ColorImage, max_side: usize) -> Option<egui::ColorImage> {
    let [w, h] = source.size;
    if w <= max_side && h <= max_side {
        return None;
    }
    let scale = max_side as f64 / w.max(h) as f64;
    let new_w = ((w as f64 * scale).round() as u32).clamp(1, max_side as u32);
    let new_h = ((h as f64 * scale).round() as u32).clamp(1, max_side as u32);

    let rgba = image::RgbaImage::from_raw(w as u32, h as u32, source.as_raw().to_vec())?;
    let resized = image::imageops::resize(&rgba, new_w, new_h, image::imageops::FilterType::Triangle);
    debug!(from_w = w, from_h = h, to_w = new_w, to_h = new_h, "Downscaled texture to fit GPU limit");
    Some(egui::ColorImage::from_rgba_premultiplied(
        [new_w as usize, new_h as usize],
        resized.as_raw(),
    ))
}
