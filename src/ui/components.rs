//! Reusable painting helpers shared by the upload zone and template cards

use crate::templates::cover_uv;
use crate::theme;
use eframe::egui;
use std::sync::Arc;

/// Paint `texture` into `rect` with rounded corners, cropped to cover the rect
pub fn paint_cover_image(
    painter: &egui::Painter,
    rect: egui::Rect,
    radius: f32,
    texture: &egui::TextureHandle,
) {
    let size = texture.size();
    let brush = egui::epaint::Brush {
        fill_texture_id: texture.id(),
        uv: cover_uv(size, rect.size()),
    };
    // A textured RectShape clips the image to the rounded corners
    let mut shape = egui::epaint::RectShape::filled(rect, radius, egui::Color32::WHITE);
    shape.brush = Some(Arc::new(brush));
    painter.add(shape);
}

/// Placeholder for an image that failed to load or decode
pub fn paint_broken_image(painter: &egui::Painter, rect: egui::Rect, radius: f32) {
    painter.rect_filled(rect, radius, theme::BG_SURFACE);
    let glyph = (rect.width().min(rect.height()) * 0.4).clamp(8.0, 48.0);
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        egui_phosphor::regular::IMAGE_BROKEN,
        egui::FontId::proportional(glyph),
        theme::TEXT_DIM,
    );
}

/// Dashed outline along the edges of `rect`
pub fn paint_dashed_rect(painter: &egui::Painter, rect: egui::Rect, stroke: egui::Stroke) {
    let points = [
        rect.left_top(),
        rect.right_top(),
        rect.right_bottom(),
        rect.left_bottom(),
        rect.left_top(),
    ];
    painter.extend(egui::Shape::dashed_line(&points, stroke, 8.0, 5.0));
}
