//! Settings modal: screenshot folder and upload size enforcement

use super::App;
use crate::theme;
use eframe::egui;
use std::path::PathBuf;
use tracing::warn;

impl App {
    pub fn render_settings_modal(&mut self, ctx: &egui::Context) {
        if !self.show_settings {
            return;
        }

        let modal_response = egui::Modal::new(egui::Id::new("settings_modal"))
            .backdrop_color(egui::Color32::from_black_alpha(120))
            .frame(theme::modal_frame())
            .show(ctx, |ui| {
                ui.set_width(360.0);

                // Title bar with close button
                ui.horizontal(|ui| {
                    ui.add(
                        egui::Label::new(egui::RichText::new("Settings").size(theme::FONT_HEADING).strong())
                            .selectable(false),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let (rect, response) =
                            ui.allocate_exact_size(egui::vec2(24.0, 24.0), egui::Sense::click());
                        let close_color = if response.hovered() {
                            ui.painter().rect_filled(rect, theme::RADIUS_DEFAULT, theme::BG_SURFACE);
                            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                            theme::STATUS_ERROR
                        } else {
                            theme::TEXT_DIM
                        };
                        ui.painter().text(
                            rect.center(),
                            egui::Align2::CENTER_CENTER,
                            egui_phosphor::regular::X,
                            egui::FontId::proportional(16.0),
                            close_color,
                        );
                        if response.clicked() {
                            self.show_settings = false;
                        }
                    });
                });
                ui.add_space(theme::SPACING_SM);
                ui.separator();
                ui.add_space(theme::SPACING_SM);

                // Screenshots
                section_label(ui, "Screenshot Folder");
                ui.add_space(theme::SPACING_XS);

                let path_committed = ui
                    .horizontal(|ui| {
                        ui.spacing_mut().item_spacing.x = theme::SPACING_SM;
                        let text_width = (ui.available_width() - 32.0 - 14.0).max(40.0);
                        let te = egui::Frame::new()
                            .fill(theme::BG_INPUT)
                            .stroke(egui::Stroke::new(theme::STROKE_DEFAULT, theme::BORDER_SUBTLE))
                            .corner_radius(theme::RADIUS_DEFAULT)
                            .inner_margin(egui::Margin::symmetric(6, 4))
                            .show(ui, |ui| {
                                ui.add(
                                    egui::TextEdit::singleline(&mut self.assets_dir_str)
                                        .frame(false)
                                        .desired_width(text_width)
                                        .font(egui::FontId::proportional(theme::FONT_LABEL)),
                                )
                            })
                            .inner;

                        let (rect, resp) =
                            ui.allocate_exact_size(egui::vec2(28.0, 28.0), egui::Sense::click());
                        if resp.hovered() {
                            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                            ui.painter().rect_filled(rect, theme::RADIUS_DEFAULT, theme::BG_SURFACE);
                        }
                        ui.painter().text(
                            rect.center(),
                            egui::Align2::CENTER_CENTER,
                            egui_phosphor::regular::FOLDER_OPEN,
                            egui::FontId::proportional(16.0),
                            theme::TEXT_SECONDARY,
                        );
                        if resp.clicked() {
                            let mut dialog = rfd::FileDialog::new();
                            if self.assets_dir.is_dir() {
                                dialog = dialog.set_directory(&self.assets_dir);
                            }
                            if let Some(dir) = dialog.pick_folder() {
                                self.set_assets_dir(dir);
                            }
                        }
                        te.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter))
                    })
                    .inner;

                if path_committed {
                    self.set_assets_dir(PathBuf::from(&self.assets_dir_str));
                }

                ui.add_space(theme::SPACING_SM);
                ui.add(
                    egui::Label::new(
                        egui::RichText::new("Expects slack.JPG, slack2.JPG and linkedin.JPG")
                            .size(theme::FONT_SMALL)
                            .color(theme::TEXT_DIM),
                    )
                    .selectable(false),
                );
                ui.add_space(theme::SPACING_SM);

                let (rect, response) =
                    ui.allocate_exact_size(egui::vec2(120.0, 26.0), egui::Sense::click());
                if response.hovered() {
                    ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                }
                let (fill, draw_rect) = theme::button_visual(&response, theme::BTN_DEFAULT, rect);
                ui.painter().rect_filled(draw_rect, theme::RADIUS_DEFAULT, fill);
                ui.painter().text(
                    draw_rect.center(),
                    egui::Align2::CENTER_CENTER,
                    format!("{}  Open Folder", egui_phosphor::regular::FOLDER_OPEN),
                    egui::FontId::proportional(12.0),
                    theme::TEXT_PRIMARY,
                );
                if response.clicked() {
                    if let Err(e) = open::that(&self.assets_dir) {
                        warn!(error = %e, "Failed to open assets folder");
                    }
                }

                ui.add_space(theme::SPACING_MD);
                ui.separator();
                ui.add_space(theme::SPACING_SM);

                // Uploads
                section_label(ui, "Uploads");
                ui.add_space(theme::SPACING_XS);
                if theme::settings_checkbox(ui, self.enforce_upload_limit, "Ignore files over 10 MB") {
                    self.set_upload_limit_enforced(!self.enforce_upload_limit);
                }
            });

        if modal_response.should_close() {
            self.show_settings = false;
        }
    }
}

fn section_label(ui: &mut egui::Ui, text: &str) {
    ui.add(
        egui::Label::new(egui::RichText::new(text).size(theme::FONT_LABEL).color(theme::ACCENT))
            .selectable(false),
    );
}
