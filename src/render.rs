use eframe::egui;

use crate::selection::{MARGIN, SelectionRect};
use crate::viewport::ViewportState;

/// Radius of the handle markers, matching the hit-test tolerance.
const HANDLE_RADIUS: f32 = 5.0;
/// Outline and handle color.
const ACCENT: egui::Color32 = egui::Color32::from_rgb(0x4d, 0x90, 0xfe);

/// Paint the scaled image, the selection outline and the eight handles.
///
/// Pure function of its inputs; repainting unchanged state produces the same
/// pixels.
pub fn paint(
    painter: &egui::Painter,
    origin: egui::Pos2,
    texture: &egui::TextureHandle,
    viewport: &ViewportState,
    rect: &SelectionRect,
) {
    let to_screen = |x: i32, y: i32| origin + egui::vec2(x as f32, y as f32);

    let image_rect = egui::Rect::from_min_max(
        to_screen(MARGIN, MARGIN),
        to_screen(
            viewport.display_width - MARGIN,
            viewport.display_height - MARGIN,
        ),
    );
    painter.image(
        texture.id(),
        image_rect,
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );

    let outline = egui::Rect::from_min_max(
        to_screen(rect.left, rect.top),
        to_screen(rect.right(), rect.bottom()),
    );
    painter.rect_stroke(outline, 0.0, egui::Stroke::new(1.0, ACCENT));

    for anchor in rect.handle_anchors() {
        painter.circle(
            to_screen(anchor.x, anchor.y),
            HANDLE_RADIUS,
            ACCENT,
            egui::Stroke::new(1.0, ACCENT),
        );
    }
}
