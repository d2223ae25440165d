use crate::brush_engine::watercolor::WatercolorBrush;
use crate::canvas::blend::destination_out;
use crate::error::{Error, Result};
use crate::utils::{profiler::ScopeTimer, vector::Vec2};
use eframe::egui::{Color32, ColorImage};
use image::RgbaImage;
use image::imageops::{self, FilterType};
use rayon::prelude::*;

/// The erasable raster: premultiplied pixels, row-major, sized to the layout target.
#[derive(Debug, Default)]
pub struct Surface {
    width: usize,
    height: usize,
    pixels: Vec<Color32>,
    revision: u64,
}

impl Surface {
    /// An empty 0x0 surface; nothing can be drawn until it is resized.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn size(&self) -> [usize; 2] {
        [self.width, self.height]
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixels(&self) -> &[Color32] {
        &self.pixels
    }

    /// Bumped on every mutation so the texture knows when to re-upload.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Color32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y * self.width + x).copied()
    }

    /// Reallocate to `width` x `height` transparent pixels.
    ///
    /// On allocation failure the surface collapses to 0x0 so later draws and
    /// stamps become no-ops.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<()> {
        self.revision += 1;
        let mut pixels: Vec<Color32> = Vec::new();
        let reserved = width
            .checked_mul(height)
            .filter(|&len| pixels.try_reserve_exact(len).is_ok());
        let Some(len) = reserved else {
            self.width = 0;
            self.height = 0;
            self.pixels = Vec::new();
            return Err(Error::Allocation { width, height });
        };
        pixels.resize(len, Color32::TRANSPARENT);
        self.width = width;
        self.height = height;
        self.pixels = pixels;
        Ok(())
    }

    /// Make every pixel transparent, keeping the dimensions.
    pub fn clear(&mut self) {
        self.pixels.fill(Color32::TRANSPARENT);
        self.revision += 1;
    }

    /// Stretch `image` over the whole surface, replacing what was there.
    pub fn draw_image(&mut self, image: &RgbaImage) {
        if self.is_empty() || image.width() == 0 || image.height() == 0 {
            return;
        }
        let _timer = ScopeTimer::new("surface_draw_image");

        let (w, h) = (self.width as u32, self.height as u32);
        let scaled;
        let source = if image.dimensions() == (w, h) {
            image
        } else {
            scaled = imageops::resize(image, w, h, FilterType::Triangle);
            &scaled
        };

        self.pixels
            .par_iter_mut()
            .zip(source.as_raw().par_chunks_exact(4))
            .for_each(|(dst, px)| {
                *dst = Color32::from_rgba_unmultiplied(px[0], px[1], px[2], px[3]);
            });
        self.revision += 1;
    }

    /// Remove alpha under `brush`, drawn as a `draw_size` square centred on `centre`.
    ///
    /// The brush raster is sampled nearest-neighbour across the square and
    /// composited destination-out. Returns whether any pixel was inside the
    /// surface.
    pub fn erase_stamp(&mut self, brush: &WatercolorBrush, centre: Vec2, draw_size: f32) -> bool {
        if self.is_empty() || brush.is_blank() || draw_size.is_nan() || draw_size <= 0.0 {
            return false;
        }

        let left = centre.x - draw_size / 2.0;
        let top = centre.y - draw_size / 2.0;
        let x0 = left.floor().max(0.0) as usize;
        let y0 = top.floor().max(0.0) as usize;
        let x1 = ((left + draw_size).ceil().max(0.0) as usize).min(self.width);
        let y1 = ((top + draw_size).ceil().max(0.0) as usize).min(self.height);
        if x0 >= x1 || y0 >= y1 {
            return false;
        }

        let texels_per_pixel = brush.size() as f32 / draw_size;
        self.pixels
            .par_chunks_mut(self.width)
            .enumerate()
            .skip(y0)
            .take(y1 - y0)
            .for_each(|(y, row)| {
                let v = (y as f32 + 0.5 - top) * texels_per_pixel;
                if v < 0.0 {
                    return;
                }
                let v = v as usize;
                for (x, px) in row.iter_mut().enumerate().take(x1).skip(x0) {
                    let u = (x as f32 + 0.5 - left) * texels_per_pixel;
                    if u < 0.0 {
                        continue;
                    }
                    *px = destination_out(brush.alpha_at(u as usize, v), *px);
                }
            });
        self.revision += 1;
        true
    }

    /// Snapshot for texture upload.
    pub fn to_color_image(&self) -> ColorImage {
        ColorImage {
            size: [self.width, self.height],
            pixels: self.pixels.clone(),
        }
    }
}
