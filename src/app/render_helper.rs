use crate::canvas::surface::Surface;
use crate::styling;
use eframe::egui::{self, Align2, Color32, FontId, Rect, TextureHandle, TextureOptions, pos2};

/// Push the surface into its texture if it changed since the last upload.
pub fn upload_surface(
    ctx: &egui::Context,
    texture: &mut Option<TextureHandle>,
    uploaded_revision: &mut Option<u64>,
    surface: &Surface,
    name: &str,
) {
    if surface.is_empty() {
        *texture = None;
        *uploaded_revision = None;
        return;
    }
    if *uploaded_revision == Some(surface.revision()) && texture.is_some() {
        return;
    }

    let image = surface.to_color_image();
    match texture {
        Some(handle) => handle.set(image, TextureOptions::LINEAR),
        None => *texture = Some(ctx.load_texture(name, image, TextureOptions::LINEAR)),
    }
    *uploaded_revision = Some(surface.revision());
}

pub fn paint_surface(painter: &egui::Painter, texture: &TextureHandle, target: Rect) {
    let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
    painter.image(texture.id(), target, uv, Color32::WHITE);
}

/// Neutral block with a dot that pulses over `time` seconds.
pub fn paint_placeholder(painter: &egui::Painter, target: Rect, time: f64) {
    painter.rect_filled(target, 0.0, styling::PLACEHOLDER_BG);

    let pulse = ((time * std::f64::consts::TAU / 1.2).sin() * 0.5 + 0.5) as f32;
    let radius = 6.0 + 4.0 * pulse;
    let color = styling::PLACEHOLDER_DOT.gamma_multiply(0.4 + 0.6 * pulse);
    painter.circle_filled(target.center(), radius, color);
}

/// Pill-shaped hint near the bottom of the target, drawn at `opacity`.
pub fn paint_hint(painter: &egui::Painter, target: Rect, text: &str, opacity: f32) {
    if opacity <= 0.0 {
        return;
    }
    let font = FontId::proportional(15.0);
    let galley = painter.layout_no_wrap(
        text.to_owned(),
        font,
        styling::HINT_TEXT.gamma_multiply(opacity),
    );
    let padding = egui::vec2(14.0, 8.0);
    let size = galley.size() + padding * 2.0;
    let anchor = pos2(target.center().x, target.bottom() - 24.0);
    let pill = Align2::CENTER_BOTTOM.anchor_size(anchor, size);

    painter.rect_filled(pill, size.y / 2.0, styling::HINT_BG.gamma_multiply(opacity));
    painter.galley(pill.min + padding, galley, Color32::WHITE);
}
