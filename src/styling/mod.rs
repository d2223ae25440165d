use eframe::egui;

/// Neutral fill behind the loading dot.
pub const PLACEHOLDER_BG: egui::Color32 = egui::Color32::from_rgb(226, 228, 233);
pub const PLACEHOLDER_DOT: egui::Color32 = egui::Color32::from_rgb(120, 126, 140);
pub const HINT_BG: egui::Color32 = egui::Color32::from_rgba_premultiplied(0, 0, 0, 150);
pub const HINT_TEXT: egui::Color32 = egui::Color32::from_rgb(245, 246, 250);

/// Frame painted around the root container for a style class.
///
/// `"card"` gets a rounded, shadowed frame; anything else is drawn bare.
pub fn frame_for_class(class: &str) -> egui::Frame {
    match class {
        "card" => egui::Frame::none()
            .fill(egui::Color32::from_rgb(18, 21, 30))
            .rounding(12.0)
            .shadow(egui::Shadow {
                offset: egui::vec2(0.0, 8.0),
                blur: 30.0,
                spread: 4.0,
                color: egui::Color32::from_rgba_premultiplied(0, 0, 0, 140),
            }),
        _ => egui::Frame::none(),
    }
}

/// Dark theme for the demo window.
pub fn apply_global_style(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::dark();
    visuals.panel_fill = egui::Color32::from_rgb(14, 16, 22);
    visuals.window_fill = egui::Color32::from_rgb(18, 21, 30);
    visuals.extreme_bg_color = egui::Color32::from_rgb(26, 30, 40);
    visuals.window_rounding = egui::Rounding::same(12.0);

    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(10.0, 8.0);
    style.interaction.selectable_labels = false;

    ctx.set_style(style);
}
