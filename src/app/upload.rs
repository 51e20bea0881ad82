//! Upload zone: OS drag-and-drop plus click-to-browse

use super::App;
use crate::constants::IMAGE_EXTENSIONS;
use crate::theme;
use crate::types::FileHandle;
use crate::ui::components::paint_dashed_rect;
use crate::utils::format_bytes;
use eframe::egui;
use tracing::debug;

const ZONE_HEIGHT: f32 = 200.0;

impl App {
    /// Feed this frame's drag state into the upload zone. Files hovering or
    /// dropped anywhere on the window count as targeting the zone.
    pub fn handle_file_drops(&mut self, ctx: &egui::Context) {
        let (hovering, dropped) = ctx.input(|i| {
            (!i.raw.hovered_files.is_empty(), i.raw.dropped_files.clone())
        });
        if let Some(file) = self.upload_zone.handle_input(hovering, &dropped) {
            debug!(name = %file.name, "File dropped");
            self.start_decode(file, ctx);
        }
    }

    fn start_decode(&mut self, file: FileHandle, ctx: &egui::Context) {
        self.decoder.decode(file, ctx);
    }

    /// Open the native file dialog (blocks until the user picks or cancels)
    pub fn open_file_picker(&mut self, ctx: &egui::Context) {
        let mut dialog = rfd::FileDialog::new()
            .set_title("Choose a profile photo")
            .add_filter("Images", IMAGE_EXTENSIONS);
        if let Some(dir) = &self.last_browse_dir {
            dialog = dialog.set_directory(dir);
        }
        let picked: Vec<_> = dialog.pick_file().into_iter().collect();

        if let Some(parent) = picked.first().and_then(|p| p.parent()) {
            self.last_browse_dir = Some(parent.to_path_buf());
            self.save_settings();
        }

        match self.upload_zone.handle_picker_change(picked) {
            Some(file) => {
                debug!(name = %file.name, "File picked");
                self.start_decode(file, ctx);
            }
            None => debug!("File dialog cancelled"),
        }
    }

    pub fn render_upload_zone(&mut self, ui: &mut egui::Ui) {
        let (rect, response) = ui.allocate_exact_size(
            egui::vec2(ui.available_width(), ZONE_HEIGHT),
            egui::Sense::click(),
        );

        let active = self.upload_zone.drag_active();
        if response.hovered() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        }

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            let (fill, border) = if active {
                (theme::DROP_ACTIVE_FILL, theme::ACCENT)
            } else if response.hovered() {
                (egui::Color32::TRANSPARENT, theme::BORDER_STRONG)
            } else {
                (egui::Color32::TRANSPARENT, theme::BORDER_DEFAULT)
            };
            painter.rect_filled(rect, theme::RADIUS_LARGE, fill);
            paint_dashed_rect(painter, rect.shrink(1.0), egui::Stroke::new(theme::STROKE_THICK, border));

            let center = rect.center();
            painter.text(
                center - egui::vec2(0.0, 44.0),
                egui::Align2::CENTER_CENTER,
                egui_phosphor::regular::IMAGE_SQUARE,
                egui::FontId::proportional(48.0),
                theme::TEXT_DIM,
            );
            painter.text(
                center + egui::vec2(0.0, 12.0),
                egui::Align2::CENTER_CENTER,
                "Drop your image here or click to upload",
                egui::FontId::proportional(theme::FONT_TITLE),
                theme::TEXT_PRIMARY,
            );
            painter.text(
                center + egui::vec2(0.0, 40.0),
                egui::Align2::CENTER_CENTER,
                "PNG, JPG, GIF up to 10MB",
                egui::FontId::proportional(theme::FONT_BODY),
                theme::TEXT_MUTED,
            );
        }

        if response.clicked() {
            self.open_file_picker(ui.ctx());
        }
    }

    /// One-line summary of the image currently shown
    pub fn render_upload_info(&self, ui: &mut egui::Ui) {
        let Some(uploaded) = self.preview.uploaded() else {
            return;
        };
        let mut text = format!(
            "{}  {}  ·  {}  ·  {}",
            egui_phosphor::regular::FILE_IMAGE,
            uploaded.name,
            uploaded.mime(),
            format_bytes(uploaded.byte_len as u64)
        );
        match uploaded.size() {
            Some([w, h]) => text.push_str(&format!("  ·  {}×{}", w, h)),
            None => text.push_str("  ·  not a readable image"),
        }
        ui.add(
            egui::Label::new(
                egui::RichText::new(text)
                    .size(theme::FONT_LABEL)
                    .color(theme::TEXT_MUTED),
            )
            .selectable(false),
        );
    }
}
