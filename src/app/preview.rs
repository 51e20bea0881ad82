//! Preview cards: background screenshot with the uploaded avatar on top

use super::state::PreviewContent;
use super::App;
use crate::constants::WIDE_LAYOUT_MIN_WIDTH;
use crate::decoder::fit_texture_side;
use crate::templates::{card_size, Template};
use crate::theme;
use crate::ui::components::{paint_broken_image, paint_cover_image};
use eframe::egui;
use tracing::{debug, warn};

const SINGLE_COLUMN_MAX_WIDTH: f32 = 440.0;

impl App {
    pub fn render_previews(&mut self, ui: &mut egui::Ui) {
        let templates = match self.preview.content() {
            PreviewContent::Placeholder => {
                render_placeholder(ui);
                return;
            }
            PreviewContent::Cards(templates) => templates,
        };

        let avail = ui.available_width();
        let gap = theme::SPACING_XXL;

        if avail >= WIDE_LAYOUT_MIN_WIDTH {
            let card_w = (avail - gap * 2.0) / 3.0;
            ui.horizontal_top(|ui| {
                ui.spacing_mut().item_spacing.x = gap;
                for template in templates {
                    self.render_card(ui, template, card_w);
                }
            });
        } else {
            let card_w = avail.min(SINGLE_COLUMN_MAX_WIDTH);
            ui.vertical_centered(|ui| {
                ui.spacing_mut().item_spacing.y = gap;
                for template in templates {
                    self.render_card(ui, template, card_w);
                }
            });
        }
    }

    /// One template card. `outer_width` includes the frame margin.
    fn render_card(&mut self, ui: &mut egui::Ui, template: &Template, outer_width: f32) {
        let ctx = ui.ctx().clone();
        let background = self.load_background(&ctx, template);
        let avatar = self
            .preview
            .uploaded_mut()
            .and_then(|uploaded| uploaded.texture(&ctx).cloned());

        let inner_width =
            (outer_width - 2.0 * (theme::CARD_PADDING + theme::STROKE_DEFAULT)).max(1.0);

        theme::card_frame().show(ui, |ui| {
            ui.set_width(inner_width);

            ui.horizontal(|ui| {
                let icon_color = template.icon_color.unwrap_or(theme::TEXT_PRIMARY);
                ui.add(
                    egui::Label::new(
                        egui::RichText::new(template.icon)
                            .size(theme::FONT_TITLE)
                            .color(icon_color),
                    )
                    .selectable(false),
                );
                ui.add(
                    egui::Label::new(
                        egui::RichText::new(template.title)
                            .size(theme::FONT_TITLE)
                            .strong()
                            .color(theme::TEXT_PRIMARY),
                    )
                    .selectable(false),
                );
            });
            ui.add_space(theme::SPACING_XL);

            let (rect, _) = ui.allocate_exact_size(card_size(inner_width), egui::Sense::hover());
            if !ui.is_rect_visible(rect) {
                return;
            }
            // Overlays never spill outside the screenshot
            let painter = ui.painter().with_clip_rect(rect.intersect(ui.clip_rect()));

            match &background {
                Some(texture) => paint_cover_image(&painter, rect, theme::RADIUS_LARGE, texture),
                None => paint_broken_image(&painter, rect, theme::RADIUS_LARGE),
            }

            let layout = template.overlay.layout(rect);
            match &avatar {
                Some(texture) => {
                    paint_cover_image(&painter, layout.inner, layout.inner_radius, texture)
                }
                None => paint_broken_image(&painter, layout.inner, layout.inner_radius),
            }
            if let Some(border) = layout.border {
                painter.rect_stroke(
                    layout.outer,
                    layout.outer_radius,
                    egui::Stroke::new(border.width, border.color),
                    egui::StrokeKind::Inside,
                );
            }
        });
    }

    /// Cached background texture for `template`. A missing file is logged once
    /// and renders as a broken image from then on.
    fn load_background(
        &mut self,
        ctx: &egui::Context,
        template: &Template,
    ) -> Option<egui::TextureHandle> {
        if let Some(cached) = self.backgrounds.get(&template.id) {
            return cached.clone();
        }

        let path = self.assets_dir.join(template.background);
        let texture = match image::open(&path) {
            Ok(img) => {
                let rgba = img.to_rgba8();
                let size = [rgba.width() as usize, rgba.height() as usize];
                debug!(path = %path.display(), width = size[0], height = size[1], "Background loaded");
                let mut pixels = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
                let max_side = ctx.input(|i| i.max_texture_side);
                if let Some(fitted) = fit_texture_side(&pixels, max_side) {
                    pixels = fitted;
                }
                Some(ctx.load_texture(
                    format!("background_{}", template.background),
                    pixels,
                    egui::TextureOptions::LINEAR,
                ))
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Background screenshot unavailable");
                None
            }
        };
        self.backgrounds.insert(template.id, texture.clone());
        texture
    }
}

fn render_placeholder(ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(48.0);
        ui.add(
            egui::Label::new(
                egui::RichText::new("Upload an image to see how it looks on Slack and LinkedIn")
                    .size(theme::FONT_HEADING)
                    .color(theme::TEXT_MUTED),
            )
            .selectable(false),
        );
        ui.add_space(48.0);
    });
}
