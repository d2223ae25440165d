use super::layout::{self, LayoutMode};
use super::pointer::{PointerEvent, PointerTracker};
use super::render_helper;
use super::state::{Phase, RevealOptions};
use super::viewport::{Subscription, ViewportSignal, is_narrow};
use crate::brush_engine::eraser::{Eraser, Stamp};
use crate::brush_engine::watercolor::BrushPalette;
use crate::canvas::surface::Surface;
use crate::loader::{ImageLoader, LoadStatus};
use crate::styling;
use crate::utils::profiler::ScopeTimer;
use eframe::egui::{self, Rect, Sense, TextureHandle};
use image::RgbaImage;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::cell::Cell;
use std::rc::Rc;

/// Everything the widget owns apart from egui resources: the surface, the
/// brushes, the pointer state and the decoded source image.
pub struct RevealState {
    mode: LayoutMode,
    surface: Surface,
    eraser: Eraser,
    tracker: PointerTracker,
    rng: StdRng,
    source: Option<RgbaImage>,
    loaded: bool,
    target: Option<Rect>,
    pixels_per_point: f32,
    failed_size: Option<[usize; 2]>,
}

impl RevealState {
    pub fn new(mode: LayoutMode, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let eraser = Eraser::new(BrushPalette::generate(&mut rng));
        Self {
            mode,
            surface: Surface::new(),
            eraser,
            tracker: PointerTracker::new(),
            rng,
            source: None,
            loaded: false,
            target: None,
            pixels_per_point: 1.0,
            failed_size: None,
        }
    }

    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    pub fn phase(&self) -> Phase {
        Phase::from_flags(self.loaded, self.tracker.is_erasing())
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_erasing(&self) -> bool {
        self.tracker.is_erasing()
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn eraser(&self) -> &Eraser {
        &self.eraser
    }

    /// The active region in screen coordinates, once laid out.
    pub fn target(&self) -> Option<Rect> {
        self.target
    }

    /// Display density used to size the surface in physical pixels.
    pub fn set_pixels_per_point(&mut self, pixels_per_point: f32) {
        if !pixels_per_point.is_finite() || pixels_per_point <= 0.0 {
            return;
        }
        self.pixels_per_point = pixels_per_point;
        self.eraser.set_scale(pixels_per_point);
    }

    fn pixel_size(&self, target: Rect) -> [usize; 2] {
        layout::pixel_size(target, self.pixels_per_point)
    }

    /// Place the surface inside `container`.
    ///
    /// A changed target size redraws the original image at the new size,
    /// which discards anything erased so far. Returns the target rect.
    pub fn layout(&mut self, container: Rect) -> Rect {
        let target = self.mode.target_rect(container);
        self.target = Some(target);

        if !self.loaded {
            if self.source.is_some() {
                self.complete_load();
            }
        } else {
            let size = self.pixel_size(target);
            if size != self.surface.size() && self.failed_size != Some(size) {
                log::debug!("reveal target resized to {size:?}, redrawing source");
                self.redraw();
            }
        }
        target
    }

    /// Accept the decoded image. The surface is drawn before the widget
    /// counts as loaded; without a layout yet, drawing waits for one.
    pub fn finish_load(&mut self, image: RgbaImage) {
        self.source = Some(image);
        if self.target.is_some() {
            self.complete_load();
        }
    }

    fn complete_load(&mut self) {
        if self.redraw() {
            self.loaded = true;
        }
    }

    /// Size the surface to the current target and paint the source into it.
    ///
    /// Returns false when nothing could be drawn: no target or image yet, a
    /// zero-area target, or a size that already failed to allocate.
    fn redraw(&mut self) -> bool {
        let (Some(target), Some(source)) = (self.target, self.source.as_ref()) else {
            return false;
        };
        let size = self.pixel_size(target);
        if self.failed_size == Some(size) {
            return false;
        }
        let _timer = ScopeTimer::new("surface_redraw");
        let [width, height] = size;
        if let Err(err) = self.surface.resize(width, height) {
            log::warn!("reveal surface unavailable: {err}");
            self.failed_size = Some(size);
            return false;
        }
        self.failed_size = None;
        self.surface.draw_image(source);
        !self.surface.is_empty()
    }

    /// Forget the current image; the widget goes back to loading.
    pub fn reset_source(&mut self) {
        self.source = None;
        self.loaded = false;
        self.failed_size = None;
        self.tracker = PointerTracker::new();
        self.surface.clear();
    }

    /// Feed one pointer sample; returns the stamp it produced, if any.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Option<Stamp> {
        let at = self.tracker.handle(event, self.target, self.loaded)? * self.pixels_per_point;
        self.eraser
            .stamp(&mut self.surface, at, self.loaded, &mut self.rng)
    }
}

/// The erasable image layer as an egui widget.
///
/// Draws the caller's bottom content, then the surface on top of it, a
/// placeholder while the image loads and a hint once it is ready.
pub struct RevealLayer {
    options: RevealOptions,
    state: RevealState,
    loader: Option<ImageLoader>,
    texture: Option<TextureHandle>,
    uploaded_revision: Option<u64>,
    narrow: Rc<Cell<bool>>,
    _viewport: Subscription,
}

impl RevealLayer {
    pub fn new(options: RevealOptions, viewport: &ViewportSignal) -> Self {
        let narrow = Rc::new(Cell::new(false));
        let flag = narrow.clone();
        let subscription = viewport.subscribe(move |width| flag.set(is_narrow(width)));

        let state = RevealState::new(options.layout_mode(), options.seed);
        let loader = Some(ImageLoader::spawn(&options.source));
        Self {
            options,
            state,
            loader,
            texture: None,
            uploaded_revision: None,
            narrow,
            _viewport: subscription,
        }
    }

    pub fn options(&self) -> &RevealOptions {
        &self.options
    }

    pub fn state(&self) -> &RevealState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn hint(&self) -> &'static str {
        layout::hint_text(self.narrow.get())
    }

    /// Swap in another image. Returns to loading until it decodes.
    pub fn set_source(&mut self, source: impl Into<String>) {
        let source = source.into();
        if source == self.options.source {
            return;
        }
        self.options.source = source;
        self.state.reset_source();
        self.loader = Some(ImageLoader::spawn(&self.options.source));
    }

    /// Route a sample from an input device egui does not see, e.g. a pen tablet.
    pub fn feed_pointer(&mut self, event: PointerEvent) -> Option<Stamp> {
        self.state.handle_pointer(event)
    }

    fn poll_loader(&mut self) {
        let Some(loader) = self.loader.as_mut() else {
            return;
        };
        if let LoadStatus::Ready(image) = loader.poll() {
            self.loader = None;
            self.state.finish_load(image);
        }
    }

    /// Lay out and paint the widget in all the space `ui` has left.
    pub fn show(&mut self, ui: &mut egui::Ui, bottom: impl FnOnce(&mut egui::Ui)) -> egui::Response {
        let id = ui.make_persistent_id(("watercolor_reveal", &self.options.style_class));
        let (container, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());

        let frame = styling::frame_for_class(&self.options.style_class);
        ui.painter().add(frame.paint(container));

        self.state.set_pixels_per_point(ui.ctx().pixels_per_point());
        let target = self.state.layout(container);
        self.poll_loader();

        let mut bottom_ui = ui.new_child(
            egui::UiBuilder::new()
                .id_salt(id.with("bottom"))
                .max_rect(target)
                .layout(*ui.layout()),
        );
        bottom(&mut bottom_ui);

        let events = ui.input(|i| i.events.clone());
        for event in events.iter().filter_map(PointerEvent::from_egui) {
            self.state.handle_pointer(event);
        }

        let ctx = ui.ctx().clone();
        render_helper::upload_surface(
            &ctx,
            &mut self.texture,
            &mut self.uploaded_revision,
            self.state.surface(),
            "watercolor_reveal_surface",
        );

        let painter = ui.painter_at(container);
        let phase = self.state.phase();
        match (&self.texture, phase.shows_placeholder()) {
            (Some(texture), false) => render_helper::paint_surface(&painter, texture, target),
            (_, true) => {
                let time = ui.input(|i| i.time);
                render_helper::paint_placeholder(&painter, target, time);
                ctx.request_repaint();
            }
            (None, false) => {}
        }

        let hint_opacity = ctx.animate_bool(id.with("hint"), phase.shows_hint());
        if !phase.shows_placeholder() {
            render_helper::paint_hint(&painter, target, self.hint(), hint_opacity);
        }
        if self.state.is_erasing() {
            ctx.request_repaint();
        }

        response
    }
}
