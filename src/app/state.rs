//! Page view-model: the uploaded image slot and the drop target indicator

use crate::templates::{Template, TEMPLATES};
use crate::types::{DecodedImage, FileHandle, UploadedImage};
use eframe::egui;
use std::path::PathBuf;
use tracing::debug;

/// Drop target + click-to-browse state
#[derive(Default)]
pub struct UploadZone {
    drag_active: bool,
}

impl UploadZone {
    pub fn drag_active(&self) -> bool {
        self.drag_active
    }

    pub fn handle_drag_over(&mut self) {
        self.drag_active = true;
    }

    pub fn handle_drag_leave(&mut self) {
        self.drag_active = false;
    }

    /// Only the first dropped file is used
    pub fn handle_drop(&mut self, files: &[egui::DroppedFile]) -> Option<FileHandle> {
        self.drag_active = false;
        if files.len() > 1 {
            debug!(count = files.len(), "Multiple files dropped, using the first");
        }
        files.first().and_then(FileHandle::from_dropped)
    }

    /// File dialog result. An empty list means the dialog was cancelled.
    pub fn handle_picker_change(&mut self, files: Vec<PathBuf>) -> Option<FileHandle> {
        files.into_iter().next().map(FileHandle::from_path)
    }

    /// Translate one frame of raw drag input into zone operations
    pub fn handle_input(
        &mut self,
        hovering: bool,
        dropped: &[egui::DroppedFile],
    ) -> Option<FileHandle> {
        if !dropped.is_empty() {
            return self.handle_drop(dropped);
        }
        if hovering && !self.drag_active {
            self.handle_drag_over();
        } else if !hovering && self.drag_active {
            self.handle_drag_leave();
        }
        None
    }
}

/// What the preview area shows for the current state
pub enum PreviewContent {
    Placeholder,
    Cards(&'static [Template]),
}

/// Holds the single uploaded image shared by every template card
#[derive(Default)]
pub struct PreviewState {
    uploaded: Option<UploadedImage>,
    shown_ticket: u64,
}

impl PreviewState {
    pub fn uploaded(&self) -> Option<&UploadedImage> {
        self.uploaded.as_ref()
    }

    pub fn uploaded_mut(&mut self) -> Option<&mut UploadedImage> {
        self.uploaded.as_mut()
    }

    pub fn shown_ticket(&self) -> u64 {
        self.shown_ticket
    }

    /// Replace the shown image with a finished decode. Completions older than
    /// the image already shown are discarded, so the latest started upload
    /// wins without a failed newer read hiding a finished older one.
    pub fn accept(&mut self, decoded: DecodedImage) -> bool {
        if decoded.ticket <= self.shown_ticket {
            debug!(
                ticket = decoded.ticket,
                shown = self.shown_ticket,
                "Discarding stale decode"
            );
            return false;
        }
        self.shown_ticket = decoded.ticket;
        self.uploaded = Some(decoded.into());
        true
    }

    pub fn content(&self) -> PreviewContent {
        match self.uploaded {
            Some(_) => PreviewContent::Cards(&TEMPLATES),
            None => PreviewContent::Placeholder,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::{encode_data_uri, ImageDecoder};
    use crate::templates::TemplateId;
    use crate::types::FileSource;

    fn dropped(path: &str) -> egui::DroppedFile {
        egui::DroppedFile {
            path: Some(PathBuf::from(path)),
            name: String::new(),
            ..Default::default()
        }
    }

    fn decoded(ticket: u64, name: &str) -> DecodedImage {
        DecodedImage {
            ticket,
            name: name.to_string(),
            data_uri: format!("data:image/png;base64,{}", name),
            byte_len: name.len(),
            pixels: None,
        }
    }

    #[test]
    fn drag_over_then_leave() {
        let mut zone = UploadZone::default();
        assert!(!zone.drag_active());
        assert!(zone.handle_input(true, &[]).is_none());
        assert!(zone.drag_active());
        assert!(zone.handle_input(false, &[]).is_none());
        assert!(!zone.drag_active());
    }

    #[test]
    fn leave_while_blocked_clears_highlight() {
        let mut zone = UploadZone::default();
        assert!(zone.handle_input(true, &[]).is_none());
        // Modal opens while the file is still hovering
        zone.handle_drag_leave();
        assert!(!zone.drag_active());
        // Modal closes after the drag ended elsewhere
        assert!(zone.handle_input(false, &[]).is_none());
        assert!(!zone.drag_active());
    }

    #[test]
    fn drop_uses_first_file_and_clears_drag() {
        let mut zone = UploadZone::default();
        zone.handle_drag_over();
        let files = vec![dropped("/tmp/photo.png"), dropped("/tmp/other.jpg")];
        let handle = zone.handle_input(true, &files).unwrap();
        assert!(!zone.drag_active());
        assert_eq!(handle.name, "photo.png");
        assert_eq!(handle.mime, "image/png");
        assert!(matches!(handle.source, FileSource::Path(ref p) if p.ends_with("photo.png")));
    }

    #[test]
    fn invalid_drop_still_clears_drag() {
        let mut zone = UploadZone::default();
        zone.handle_drag_over();
        let handle = zone.handle_drop(&[dropped("/tmp/notes.txt")]).unwrap();
        assert!(!zone.drag_active());
        assert!(!handle.is_image());
    }

    #[test]
    fn empty_drop_clears_drag() {
        let mut zone = UploadZone::default();
        zone.handle_drag_over();
        assert!(zone.handle_drop(&[]).is_none());
        assert!(!zone.drag_active());
    }

    #[test]
    fn cancelled_picker_is_noop() {
        let mut zone = UploadZone::default();
        assert!(zone.handle_picker_change(Vec::new()).is_none());
    }

    #[test]
    fn picker_uses_first_file() {
        let mut zone = UploadZone::default();
        let handle = zone
            .handle_picker_change(vec![PathBuf::from("/a/one.gif"), PathBuf::from("/a/two.png")])
            .unwrap();
        assert_eq!(handle.name, "one.gif");
    }

    #[test]
    fn placeholder_until_first_upload() {
        let state = PreviewState::default();
        assert!(state.uploaded().is_none());
        assert!(matches!(state.content(), PreviewContent::Placeholder));
    }

    #[test]
    fn accepted_upload_shows_three_cards_in_order() {
        let mut state = PreviewState::default();
        assert!(state.accept(decoded(1, "photo")));
        match state.content() {
            PreviewContent::Cards(cards) => {
                let ids: Vec<TemplateId> = cards.iter().map(|t| t.id).collect();
                assert_eq!(
                    ids,
                    vec![TemplateId::Slack, TemplateId::SlackSidebar, TemplateId::LinkedIn]
                );
            }
            PreviewContent::Placeholder => panic!("expected cards"),
        }
        assert_eq!(state.uploaded().unwrap().data_uri, "data:image/png;base64,photo");
    }

    #[test]
    fn second_upload_replaces_first() {
        let mut state = PreviewState::default();
        state.accept(decoded(1, "first"));
        state.accept(decoded(2, "second"));
        assert_eq!(state.uploaded().unwrap().name, "second");
        assert_eq!(state.shown_ticket(), 2);
    }

    #[test]
    fn stale_completion_is_discarded() {
        let mut state = PreviewState::default();
        // Second request finishes first
        assert!(state.accept(decoded(2, "newer")));
        assert!(!state.accept(decoded(1, "older")));
        assert_eq!(state.uploaded().unwrap().name, "newer");
    }

    #[test]
    fn older_completion_shows_when_newer_never_arrives() {
        let mut state = PreviewState::default();
        // Ticket 2 was issued but its read failed
        assert!(state.accept(decoded(1, "older")));
        assert_eq!(state.uploaded().unwrap().name, "older");
        assert_eq!(state.shown_ticket(), 1);
    }

    fn png_bytes() -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(2, 2, image::Rgba([10, 20, 30, 255]));
        let mut out = std::io::Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[tokio::test]
    async fn valid_upload_survives_failed_newer_read() {
        let dir = tempfile::tempdir().unwrap();
        let bytes = png_bytes();
        let photo = dir.path().join("photo.png");
        std::fs::write(&photo, &bytes).unwrap();
        let ctx = egui::Context::default();

        let mut decoder = ImageDecoder::new(tokio::runtime::Handle::current());
        let mut zone = UploadZone::default();
        let mut state = PreviewState::default();

        let first = zone.handle_picker_change(vec![photo]).unwrap();
        assert_eq!(decoder.decode(first, &ctx), Some(1));
        let missing = zone
            .handle_picker_change(vec![dir.path().join("gone/missing.png")])
            .unwrap();
        assert_eq!(decoder.decode(missing, &ctx), Some(2));

        let done = decoder.next_completion().await.unwrap();
        assert_eq!(done.ticket, 1);
        assert!(state.accept(done));

        let uploaded = state.uploaded().unwrap();
        assert_eq!(uploaded.data_uri, encode_data_uri("image/png", &bytes));
        assert_eq!(uploaded.size(), Some([2, 2]));
        assert!(matches!(state.content(), PreviewContent::Cards(_)));
    }

    #[tokio::test]
    async fn dropped_text_file_keeps_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let notes = dir.path().join("notes.txt");
        std::fs::write(&notes, b"not a photo").unwrap();
        let ctx = egui::Context::default();

        let mut decoder = ImageDecoder::new(tokio::runtime::Handle::current());
        let mut zone = UploadZone::default();
        let mut state = PreviewState::default();

        zone.handle_drag_over();
        let file = zone.handle_drop(&[dropped(notes.to_str().unwrap())]).unwrap();
        assert!(decoder.decode(file, &ctx).is_none());
        tokio::task::yield_now().await;
        for done in decoder.poll() {
            state.accept(done);
        }

        assert!(!zone.drag_active());
        assert!(state.uploaded().is_none());
        assert!(matches!(state.content(), PreviewContent::Placeholder));
    }
}
