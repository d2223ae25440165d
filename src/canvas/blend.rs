//! Premultiplied 8-bit compositing used by the brush palette and the surface.

use eframe::egui::Color32;

/// Scale a channel by `factor / 255` with rounding.
#[inline]
fn scale(channel: u8, factor: u32) -> u32 {
    (channel as u32 * factor + 127) / 255
}

/// "Destination out": keep the destination only where the source is absent.
/// Only the source alpha matters, so callers pass the stamp coverage directly.
#[inline]
pub fn destination_out(src_alpha: u8, dst: Color32) -> Color32 {
    if src_alpha == 0 {
        return dst;
    }
    let inv = 255 - src_alpha as u32;
    Color32::from_rgba_premultiplied(
        scale(dst.r(), inv) as u8,
        scale(dst.g(), inv) as u8,
        scale(dst.b(), inv) as u8,
        scale(dst.a(), inv) as u8,
    )
}

/// Standard "source over" compositing for premultiplied colors.
#[inline]
pub fn source_over(src: Color32, dst: Color32) -> Color32 {
    let inv = 255 - src.a() as u32;
    let out_a = src.a() as u32 + scale(dst.a(), inv);
    if out_a == 0 {
        return Color32::TRANSPARENT;
    }

    let out_r = src.r() as u32 + scale(dst.r(), inv);
    let out_g = src.g() as u32 + scale(dst.g(), inv);
    let out_b = src.b() as u32 + scale(dst.b(), inv);

    Color32::from_rgba_premultiplied(
        out_r.min(255) as u8,
        out_g.min(255) as u8,
        out_b.min(255) as u8,
        out_a.min(255) as u8,
    )
}

/// Convert a 0..1 opacity into an 8-bit alpha.
#[inline]
pub fn alpha_from_unit(opacity: f32) -> u8 {
    (opacity.clamp(0.0, 1.0) * 255.0).round() as u8
}
