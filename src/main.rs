use eframe::egui;
use watercolor_reveal::app::{RevealLayer, RevealOptions, ViewportSignal, parse_options};
use watercolor_reveal::styling;
use watercolor_reveal::tablet::TabletInput;

const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "webp", "gif", "bmp"];

/// Demo window hosting one reveal layer over a caption.
struct RevealDemo {
    viewport: ViewportSignal,
    layer: RevealLayer,
    tablet: Option<TabletInput>,
}

impl RevealDemo {
    fn new(cc: &eframe::CreationContext<'_>, options: RevealOptions) -> Self {
        styling::apply_global_style(&cc.egui_ctx);
        let viewport = ViewportSignal::new(cc.egui_ctx.screen_rect().width());
        let layer = RevealLayer::new(options, &viewport);
        Self {
            viewport,
            layer,
            tablet: TabletInput::new(cc),
        }
    }
}

impl eframe::App for RevealDemo {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.viewport.set_width(ctx.screen_rect().width());

        if let Some(tablet) = &mut self.tablet {
            for event in tablet.poll(ctx.pixels_per_point()) {
                if self.layer.feed_pointer(event).is_some() {
                    ctx.request_repaint();
                }
            }
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none().inner_margin(16.0))
            .show(ctx, |ui| {
                self.layer.show(ui, |ui| {
                    let rect = ui.max_rect();
                    ui.painter()
                        .rect_filled(rect, 12.0, egui::Color32::from_rgb(40, 70, 120));
                    ui.centered_and_justified(|ui| {
                        ui.heading("You found the hidden message");
                    });
                });
            });
    }
}

fn pick_image() -> Option<String> {
    rfd::FileDialog::new()
        .add_filter("Images", &IMAGE_EXTENSIONS)
        .pick_file()
        .map(|path| path.display().to_string())
}

/// Launch the native egui demo.
fn main() -> eframe::Result<()> {
    env_logger::init();

    let mut options = match parse_options(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("{err}");
            eprintln!("usage: watercolor-reveal [IMAGE] [--contained] [--name-card] [--class NAME] [--seed N]");
            std::process::exit(2);
        }
    };

    if options.source.is_empty() {
        match pick_image() {
            Some(source) => options.source = source,
            None => {
                log::warn!("no image selected, exiting");
                return Ok(());
            }
        }
    }

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([960.0, 640.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Watercolor Reveal",
        native_options,
        Box::new(move |cc| Ok(Box::new(RevealDemo::new(cc, options)))),
    )
}
