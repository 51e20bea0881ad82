//! Preview templates: background screenshot plus fixed avatar overlay geometry
//!
//! Lengths follow CSS absolute positioning inside the card: `left` and `width`
//! percentages refer to the card width, `top` percentages to the card height.
//! The overlay is always square and border-box sized.

use crate::constants::CARD_ASPECT;
use eframe::egui;
use egui::{Color32, Rect};

/// Dark border used by the Slack and LinkedIn overlays (#222)
pub const OVERLAY_BORDER: Color32 = Color32::from_rgb(0x22, 0x22, 0x22);

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Length {
    Percent(f32),
    Px(f32),
}

impl Length {
    pub fn resolve(self, reference: f32) -> f32 {
        match self {
            Length::Percent(p) => reference * p / 100.0,
            Length::Px(px) => px,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CornerRadius {
    Px(f32),
    /// 50%: fully round on a square overlay
    Circle,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Border {
    pub width: f32,
    pub color: Color32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayGeometry {
    pub left: Length,
    pub top: Length,
    pub width: Length,
    /// Shift left by half the overlay width (`translate(-50%, 0)`)
    pub centered: bool,
    pub radius: CornerRadius,
    pub border: Option<Border>,
}

/// Resolved overlay in screen space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayLayout {
    /// Outer square including the border
    pub outer: Rect,
    /// Area the uploaded image fills
    pub inner: Rect,
    pub outer_radius: f32,
    pub inner_radius: f32,
    pub border: Option<Border>,
}

impl OverlayGeometry {
    pub fn layout(&self, card: Rect) -> OverlayLayout {
        let size = self.width.resolve(card.width());
        let mut x = card.left() + self.left.resolve(card.width());
        if self.centered {
            x -= size / 2.0;
        }
        let y = card.top() + self.top.resolve(card.height());
        let outer = Rect::from_min_size(egui::pos2(x, y), egui::vec2(size, size));

        let outer_radius = match self.radius {
            CornerRadius::Px(r) => r.min(size / 2.0),
            CornerRadius::Circle => size / 2.0,
        };
        let border_width = self.border.map(|b| b.width).unwrap_or(0.0);
        let inner = outer.shrink(border_width.min(size / 2.0));
        let inner_radius = (outer_radius - border_width).max(0.0);

        OverlayLayout { outer, inner, outer_radius, inner_radius, border: self.border }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TemplateId {
    Slack,
    SlackSidebar,
    LinkedIn,
}

pub struct Template {
    pub id: TemplateId,
    pub title: &'static str,
    pub icon: &'static str,
    pub icon_color: Option<Color32>,
    /// File name inside the assets directory
    pub background: &'static str,
    pub overlay: OverlayGeometry,
}

/// Rendered in this order, left to right
pub const TEMPLATES: [Template; 3] = [
    Template {
        id: TemplateId::Slack,
        title: "Slack",
        icon: egui_phosphor::regular::SLACK_LOGO,
        icon_color: None,
        background: "slack.JPG",
        overlay: OverlayGeometry {
            left: Length::Percent(50.0),
            top: Length::Percent(7.0),
            width: Length::Percent(100.0),
            centered: true,
            radius: CornerRadius::Px(20.0),
            border: Some(Border { width: 4.0, color: OVERLAY_BORDER }),
        },
    },
    Template {
        id: TemplateId::SlackSidebar,
        title: "Slack2",
        icon: egui_phosphor::regular::SLACK_LOGO,
        icon_color: None,
        background: "slack2.JPG",
        overlay: OverlayGeometry {
            left: Length::Percent(8.0),
            top: Length::Percent(70.0),
            width: Length::Percent(8.6),
            centered: true,
            radius: CornerRadius::Px(7.0),
            border: None,
        },
    },
    Template {
        id: TemplateId::LinkedIn,
        title: "LinkedIn",
        icon: egui_phosphor::regular::LINKEDIN_LOGO,
        icon_color: Some(Color32::from_rgb(0x25, 0x63, 0xeb)), // blue-600
        background: "linkedin.JPG",
        overlay: OverlayGeometry {
            left: Length::Percent(3.0),
            top: Length::Percent(14.3),
            width: Length::Percent(30.0),
            centered: false,
            radius: CornerRadius::Circle,
            border: Some(Border { width: 4.0, color: OVERLAY_BORDER }),
        },
    },
];

/// Card rect of the given width at the screenshot aspect ratio
pub fn card_size(width: f32) -> egui::Vec2 {
    egui::vec2(width, width / CARD_ASPECT)
}

/// UV rect that makes an image of `image_size` cover `target` without
/// distortion, cropping the overflow equally on both sides (`object-cover`).
pub fn cover_uv(image_size: [usize; 2], target: egui::Vec2) -> Rect {
    let full = Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
    let (iw, ih) = (image_size[0] as f32, image_size[1] as f32);
    if iw <= 0.0 || ih <= 0.0 || target.x <= 0.0 || target.y <= 0.0 {
        return full;
    }
    let image_aspect = iw / ih;
    let target_aspect = target.x / target.y;

    if image_aspect > target_aspect {
        // Too wide: crop left and right
        let span = target_aspect / image_aspect;
        let u0 = (1.0 - span) / 2.0;
        Rect::from_min_max(egui::pos2(u0, 0.0), egui::pos2(u0 + span, 1.0))
    } else if image_aspect < target_aspect {
        // Too tall: crop top and bottom
        let span = image_aspect / target_aspect;
        let v0 = (1.0 - span) / 2.0;
        Rect::from_min_max(egui::pos2(0.0, v0), egui::pos2(1.0, v0 + span))
    } else {
        full
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    fn card() -> Rect {
        Rect::from_min_size(egui::pos2(10.0, 20.0), card_size(360.0))
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn templates_are_in_fixed_order() {
        let ids: Vec<TemplateId> = TEMPLATES.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![TemplateId::Slack, TemplateId::SlackSidebar, TemplateId::LinkedIn]);
    }

    #[test]
    fn card_is_nine_by_nineteen_and_a_half() {
        let size = card_size(90.0);
        assert!(approx(size.y, 195.0));
    }

    #[test]
    fn slack_overlay_spans_card_width() {
        let card = card();
        let layout = TEMPLATES[0].overlay.layout(card);
        assert!(approx(layout.outer.left(), card.left()));
        assert!(approx(layout.outer.width(), card.width()));
        assert!(approx(layout.outer.height(), card.width()));
        assert!(approx(layout.outer.top(), card.top() + card.height() * 0.07));
        assert!(approx(layout.outer_radius, 20.0));
        assert!(approx(layout.inner_radius, 16.0));
        assert!(approx(layout.inner.width(), card.width() - 8.0));
    }

    #[test]
    fn sidebar_overlay_is_centered_on_eight_percent() {
        let card = card();
        let layout = TEMPLATES[1].overlay.layout(card);
        let size = card.width() * 0.086;
        assert!(approx(layout.outer.center().x, card.left() + card.width() * 0.08));
        assert!(approx(layout.outer.width(), size));
        assert!(approx(layout.outer.top(), card.top() + card.height() * 0.70));
        assert!(layout.border.is_none());
        assert_eq!(layout.inner, layout.outer);
        assert!(approx(layout.inner_radius, 7.0));
    }

    #[test]
    fn linkedin_overlay_is_circular() {
        let card = card();
        let layout = TEMPLATES[2].overlay.layout(card);
        assert!(approx(layout.outer.left(), card.left() + card.width() * 0.03));
        assert!(approx(layout.outer.top(), card.top() + card.height() * 0.143));
        assert!(approx(layout.outer.width(), card.width() * 0.30));
        assert!(approx(layout.outer_radius, layout.outer.width() / 2.0));
        assert!(approx(layout.inner_radius, layout.inner.width() / 2.0));
        assert_eq!(layout.border.map(|b| b.color), Some(OVERLAY_BORDER));
    }

    #[test]
    fn card_offset_moves_overlay_by_same_amount() {
        let a = Rect::from_min_size(egui::pos2(0.0, 0.0), card_size(300.0));
        let b = a.translate(egui::vec2(50.0, 70.0));
        for template in &TEMPLATES {
            let la = template.overlay.layout(a);
            let lb = template.overlay.layout(b);
            let moved = la.outer.translate(egui::vec2(50.0, 70.0));
            assert!(approx(moved.min.x, lb.outer.min.x) && approx(moved.min.y, lb.outer.min.y));
            assert!(approx(moved.width(), lb.outer.width()));
        }
    }

    #[test]
    fn pixel_lengths_do_not_scale() {
        assert!(approx(Length::Px(12.0).resolve(1000.0), 12.0));
        assert!(approx(Length::Percent(25.0).resolve(200.0), 50.0));
    }

    #[test]
    fn cover_crops_wide_image_horizontally() {
        let uv = cover_uv([200, 100], egui::vec2(50.0, 50.0));
        assert!(approx(uv.min.x, 0.25));
        assert!(approx(uv.max.x, 0.75));
        assert!(approx(uv.min.y, 0.0));
        assert!(approx(uv.max.y, 1.0));
    }

    #[test]
    fn cover_crops_tall_image_vertically() {
        let uv = cover_uv([100, 400], egui::vec2(10.0, 10.0));
        assert!(approx(uv.min.x, 0.0));
        assert!(approx(uv.min.y, 0.375));
        assert!(approx(uv.max.y, 0.625));
    }

    #[test]
    fn cover_matching_aspect_uses_whole_image() {
        let uv = cover_uv([90, 195], card_size(45.0));
        assert!(approx(uv.min.x, 0.0) && approx(uv.max.x, 1.0));
        assert!(approx(uv.min.y, 0.0) && approx(uv.max.y, 1.0));
    }

    #[test]
    fn cover_handles_empty_sizes() {
        let uv = cover_uv([0, 0], egui::vec2(10.0, 10.0));
        assert_eq!(uv, Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)));
    }
}
