use crate::brush_engine::watercolor::BrushPalette;
use crate::canvas::surface::Surface;
use crate::utils::vector::Vec2;
use rand::Rng;
use std::ops::RangeInclusive;

/// Per-stamp random scale applied to a brush's half width.
pub const STAMP_SCALE: RangeInclusive<f32> = 0.8..=1.2;

/// One applied stamp, reported back for logging and tests.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stamp {
    pub brush_idx: usize,
    pub centre: Vec2,
    pub size: f32,
}

/// Carves the surface with randomly chosen, randomly scaled watercolor brushes.
#[derive(Clone, Debug)]
pub struct Eraser {
    palette: BrushPalette,
    scale: f32,
}

impl Eraser {
    pub fn new(palette: BrushPalette) -> Self {
        Self {
            palette,
            scale: 1.0,
        }
    }

    /// Surface pixels per brush pixel, so stamps keep their on-screen size
    /// on high-density displays.
    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    pub fn palette(&self) -> &BrushPalette {
        &self.palette
    }

    /// Stamp one brush centred at `at` (surface-local pixels).
    ///
    /// Does nothing until the surface holds the loaded image, or when the
    /// palette is empty.
    pub fn stamp<R: Rng + ?Sized>(
        &self,
        surface: &mut Surface,
        at: Vec2,
        loaded: bool,
        rng: &mut R,
    ) -> Option<Stamp> {
        if !loaded {
            return None;
        }
        let brush_idx = self.palette.pick_index(rng)?;
        let brush = self.palette.get(brush_idx)?;
        let size = brush.half_width() * rng.random_range(STAMP_SCALE) * self.scale;

        surface.erase_stamp(brush, at, size);
        log::trace!(
            "stamp brush {brush_idx} ({}px) at ({:.1}, {:.1}) size {size:.1}",
            brush.size(),
            at.x,
            at.y
        );
        Some(Stamp {
            brush_idx,
            centre: at,
            size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn loaded_surface() -> Surface {
        let mut surface = Surface::new();
        surface.resize(120, 120).unwrap();
        surface.draw_image(&RgbaImage::from_pixel(120, 120, Rgba([255, 0, 0, 255])));
        surface
    }

    #[test]
    fn nothing_happens_before_load() {
        let mut rng = StdRng::seed_from_u64(1);
        let eraser = Eraser::new(BrushPalette::generate(&mut rng));
        let mut surface = loaded_surface();
        let revision = surface.revision();

        assert_eq!(eraser.stamp(&mut surface, Vec2::new(60.0, 60.0), false, &mut rng), None);
        assert_eq!(surface.revision(), revision);
    }

    #[test]
    fn empty_palette_is_a_no_op() {
        let mut rng = StdRng::seed_from_u64(1);
        let eraser = Eraser::new(BrushPalette::from_brushes(Vec::new()));
        let mut surface = loaded_surface();
        assert_eq!(eraser.stamp(&mut surface, Vec2::new(60.0, 60.0), true, &mut rng), None);
    }

    #[test]
    fn stamp_size_is_scaled_half_width() {
        let mut rng = StdRng::seed_from_u64(11);
        let eraser = Eraser::new(BrushPalette::generate(&mut rng));
        let mut surface = loaded_surface();

        for _ in 0..200 {
            let stamp = eraser
                .stamp(&mut surface, Vec2::new(60.0, 60.0), true, &mut rng)
                .unwrap();
            let half = eraser.palette().get(stamp.brush_idx).unwrap().half_width();
            assert!(stamp.size >= half * 0.8 - 1e-3);
            assert!(stamp.size <= half * 1.2 + 1e-3);
            assert_eq!(stamp.centre, Vec2::new(60.0, 60.0));
        }
    }

    #[test]
    fn display_scale_grows_stamps() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut eraser = Eraser::new(BrushPalette::generate(&mut rng));
        eraser.set_scale(2.0);
        let mut surface = loaded_surface();

        for _ in 0..50 {
            let stamp = eraser
                .stamp(&mut surface, Vec2::new(60.0, 60.0), true, &mut rng)
                .unwrap();
            let half = eraser.palette().get(stamp.brush_idx).unwrap().half_width();
            assert!(stamp.size >= half * 1.6 - 1e-3);
            assert!(stamp.size <= half * 2.4 + 1e-3);
        }
    }

    #[test]
    fn stamp_erases_at_position() {
        let mut rng = StdRng::seed_from_u64(4);
        let eraser = Eraser::new(BrushPalette::generate(&mut rng));
        let mut surface = loaded_surface();

        eraser.stamp(&mut surface, Vec2::new(30.0, 30.0), true, &mut rng);
        assert!(surface.pixel(30, 30).unwrap().a() < 255);
        assert_eq!(surface.pixel(110, 110).unwrap().a(), 255);
    }

    #[test]
    fn brush_choice_covers_whole_palette() {
        let mut rng = StdRng::seed_from_u64(77);
        let eraser = Eraser::new(BrushPalette::generate(&mut rng));
        let mut surface = loaded_surface();
        let mut counts = [0usize; 4];
        for _ in 0..4_000 {
            let stamp = eraser
                .stamp(&mut surface, Vec2::new(60.0, 60.0), true, &mut rng)
                .unwrap();
            counts[stamp.brush_idx] += 1;
        }
        for count in counts {
            assert!(count.abs_diff(1_000) < 150, "skewed brush choice {counts:?}");
        }
    }
}
