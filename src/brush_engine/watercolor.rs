use crate::canvas::blend::{alpha_from_unit, source_over};
use crate::utils::{profiler::ScopeTimer, vector::Vec2};
use eframe::egui::Color32;
use rand::Rng;
use std::f32::consts::TAU;

/// Number of overlapping blots composited into one brush.
pub const CIRCLES_PER_BRUSH: usize = 20;

/// (size in pixels, fill opacity) for every brush of the palette.
pub const PALETTE_PRESETS: [(usize, f32); 4] = [(40, 0.4), (60, 0.35), (80, 0.3), (100, 0.25)];

/// Pre-rendered soft stamp: a square raster of premultiplied black whose
/// alpha encodes how strongly each texel erases.
#[derive(Clone, Debug)]
pub struct WatercolorBrush {
    size: usize,
    opacity: f32,
    pixels: Vec<Color32>,
}

impl WatercolorBrush {
    /// Render a brush by stacking [`CIRCLES_PER_BRUSH`] randomized circles.
    ///
    /// Each circle has radius `size * (0.6 + 0.4 r)` and sits at a polar offset
    /// of up to `0.4 * size` from the centre. Every fill uses the same alpha, so
    /// overlapping regions grow darker and the outline ends up blotchy.
    pub fn generate<R: Rng + ?Sized>(size: usize, opacity: f32, rng: &mut R) -> Self {
        let mut pixels = Vec::new();
        if size == 0 || pixels.try_reserve_exact(size * size).is_err() {
            log::warn!("brush raster {size}x{size} unavailable, using a blank stamp");
            return Self::blank(size, opacity);
        }
        pixels.resize(size * size, Color32::TRANSPARENT);

        let extent = size as f32;
        let centre = Vec2::new(extent / 2.0, extent / 2.0);
        let fill = Color32::from_black_alpha(alpha_from_unit(opacity));

        for _ in 0..CIRCLES_PER_BRUSH {
            let radius = rng.random::<f32>() * extent * 0.4 + extent * 0.6;
            let angle = rng.random::<f32>() * TAU;
            let offset = rng.random::<f32>() * extent * 0.4;
            let at = centre + Vec2::from_polar(angle, offset);
            fill_circle(&mut pixels, size, at, radius, fill);
        }

        Self {
            size,
            opacity,
            pixels,
        }
    }

    /// A stamp with no coverage; erasing with it changes nothing.
    pub fn blank(size: usize, opacity: f32) -> Self {
        Self {
            size,
            opacity,
            pixels: Vec::new(),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn half_width(&self) -> f32 {
        self.size as f32 / 2.0
    }

    pub fn is_blank(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Alpha at a texel, 0 outside the raster or for a blank brush.
    #[inline]
    pub fn alpha_at(&self, x: usize, y: usize) -> u8 {
        if x >= self.size || y >= self.size {
            return 0;
        }
        self.pixels.get(y * self.size + x).map_or(0, |px| px.a())
    }

    pub fn pixels(&self) -> &[Color32] {
        &self.pixels
    }
}

/// Anti-aliased filled circle, composited source-over and clipped to the raster.
fn fill_circle(pixels: &mut [Color32], size: usize, centre: Vec2, radius: f32, color: Color32) {
    let min_x = ((centre.x - radius).floor().max(0.0)) as usize;
    let min_y = ((centre.y - radius).floor().max(0.0)) as usize;
    let max_x = ((centre.x + radius).ceil().max(0.0) as usize).min(size);
    let max_y = ((centre.y + radius).ceil().max(0.0) as usize).min(size);

    for y in min_y..max_y {
        let dy = y as f32 + 0.5 - centre.y;
        for x in min_x..max_x {
            let dx = x as f32 + 0.5 - centre.x;
            let dist = (dx * dx + dy * dy).sqrt();
            let coverage = (radius - dist + 0.5).clamp(0.0, 1.0);
            if coverage <= 0.0 {
                continue;
            }
            let src = if coverage >= 1.0 {
                color
            } else {
                color.gamma_multiply(coverage)
            };
            let idx = y * size + x;
            pixels[idx] = source_over(src, pixels[idx]);
        }
    }
}

/// The fixed set of brushes an eraser picks from. Built once per widget.
#[derive(Clone, Debug)]
pub struct BrushPalette {
    brushes: Vec<WatercolorBrush>,
}

impl BrushPalette {
    /// Build one brush per entry of [`PALETTE_PRESETS`].
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let _timer = ScopeTimer::new("brush_palette");
        let brushes = PALETTE_PRESETS
            .iter()
            .map(|&(size, opacity)| WatercolorBrush::generate(size, opacity, rng))
            .collect::<Vec<_>>();
        log::debug!("generated {} watercolor brushes", brushes.len());
        Self { brushes }
    }

    pub fn from_brushes(brushes: Vec<WatercolorBrush>) -> Self {
        Self { brushes }
    }

    pub fn len(&self) -> usize {
        self.brushes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.brushes.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&WatercolorBrush> {
        self.brushes.get(idx)
    }

    pub fn iter(&self) -> impl Iterator<Item = &WatercolorBrush> {
        self.brushes.iter()
    }

    /// Uniformly pick a brush index, `None` for an empty palette.
    pub fn pick_index<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<usize> {
        if self.brushes.is_empty() {
            return None;
        }
        Some(rng.random_range(0..self.brushes.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn palette_matches_presets() {
        let mut rng = StdRng::seed_from_u64(7);
        let palette = BrushPalette::generate(&mut rng);
        assert_eq!(palette.len(), 4);
        for (brush, &(size, opacity)) in palette.iter().zip(PALETTE_PRESETS.iter()) {
            assert_eq!(brush.size(), size);
            assert_eq!(brush.opacity(), opacity);
            assert_eq!(brush.pixels().len(), size * size);
        }
    }

    #[test]
    fn same_seed_same_brush() {
        let a = WatercolorBrush::generate(60, 0.35, &mut StdRng::seed_from_u64(42));
        let b = WatercolorBrush::generate(60, 0.35, &mut StdRng::seed_from_u64(42));
        assert_eq!(a.pixels(), b.pixels());
    }

    #[test]
    fn overlapping_blots_give_uneven_alpha() {
        let brush = WatercolorBrush::generate(80, 0.3, &mut StdRng::seed_from_u64(3));
        let single = alpha_from_unit(0.3);

        // Every circle has radius >= 0.6 * size and its centre lies within
        // 0.4 * size of the middle, so the middle texel is under all 20 blots.
        let centre = brush.alpha_at(40, 40);
        assert!(centre > single);

        let mut levels: Vec<u8> = brush.pixels().iter().map(|p| p.a()).collect();
        levels.sort_unstable();
        levels.dedup();
        assert!(levels.len() > 3, "expected a soft, layered stamp: {levels:?}");
    }

    #[test]
    fn zero_sized_brush_is_blank() {
        let brush = WatercolorBrush::generate(0, 0.4, &mut StdRng::seed_from_u64(1));
        assert!(brush.is_blank());
        assert_eq!(brush.alpha_at(0, 0), 0);
    }

    #[test]
    fn picks_are_roughly_uniform() {
        let mut rng = StdRng::seed_from_u64(2024);
        let palette = BrushPalette::generate(&mut rng);
        let trials = 40_000;
        let mut counts = [0usize; 4];
        for _ in 0..trials {
            let idx = palette.pick_index(&mut rng).unwrap();
            counts[idx] += 1;
        }
        let expected = trials / 4;
        for count in counts {
            let diff = count.abs_diff(expected);
            assert!(diff < expected / 20, "counts {counts:?} not uniform");
        }
    }

    #[test]
    fn empty_palette_picks_nothing() {
        let palette = BrushPalette::from_brushes(Vec::new());
        assert_eq!(palette.pick_index(&mut StdRng::seed_from_u64(0)), None);
    }
}
