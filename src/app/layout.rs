use eframe::egui::{Rect, Vec2, vec2};

/// Gap kept around the box in contained mode.
pub const CONTAINED_PADDING: f32 = 24.0;
/// Widest the responsive contained box grows.
pub const CONTAINED_MAX_WIDTH: f32 = 960.0;
/// Width / height of the responsive contained box.
pub const CONTAINED_ASPECT: f32 = 3.0 / 2.0;

pub const NAME_CARD_MAX_WIDTH: f32 = 400.0;
pub const NAME_CARD_MIN_HEIGHT: f32 = 200.0;
pub const NAME_CARD_MAX_HEIGHT: f32 = 225.0;

pub const HINT_DESKTOP: &str = "Click and paint to reveal";
pub const HINT_TOUCH: &str = "Touch and paint to reveal";

/// Where the erasable surface sits inside the widget. Fixed at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutMode {
    /// Surface covers the whole container.
    Full,
    /// Surface confined to a centred box.
    Contained { name_card: bool },
}

impl LayoutMode {
    pub fn from_flags(contained: bool, name_card: bool) -> Self {
        if contained {
            LayoutMode::Contained { name_card }
        } else {
            LayoutMode::Full
        }
    }

    /// The rect the surface must cover for a given container.
    pub fn target_rect(self, container: Rect) -> Rect {
        let size = match self {
            LayoutMode::Full => return container,
            LayoutMode::Contained { name_card: true } => name_card_size(container.size()),
            LayoutMode::Contained { name_card: false } => responsive_size(container.size()),
        };
        Rect::from_center_size(container.center(), size)
    }
}

fn name_card_size(container: Vec2) -> Vec2 {
    let width = (container.x - 2.0 * CONTAINED_PADDING)
        .min(NAME_CARD_MAX_WIDTH)
        .max(0.0);
    let height = (width * 9.0 / 16.0).clamp(NAME_CARD_MIN_HEIGHT, NAME_CARD_MAX_HEIGHT);
    vec2(width, height)
}

fn responsive_size(container: Vec2) -> Vec2 {
    let avail_w = (container.x - 2.0 * CONTAINED_PADDING).max(0.0);
    let avail_h = (container.y - 2.0 * CONTAINED_PADDING).max(0.0);

    let mut width = avail_w.min(CONTAINED_MAX_WIDTH);
    let mut height = width / CONTAINED_ASPECT;
    if height > avail_h {
        height = avail_h;
        width = height * CONTAINED_ASPECT;
    }
    vec2(width, height)
}

/// Surface pixel dimensions for a layout rect measured in points.
///
/// Unbounded or non-finite extents, e.g. inside a scroll area, map to 0.
pub fn pixel_size(rect: Rect, pixels_per_point: f32) -> [usize; 2] {
    let to_pixels = |points: f32| {
        let pixels = (points * pixels_per_point).round();
        if pixels.is_finite() { pixels.max(0.0) as usize } else { 0 }
    };
    [to_pixels(rect.width()), to_pixels(rect.height())]
}

/// Hint wording for the current viewport.
pub fn hint_text(narrow: bool) -> &'static str {
    if narrow { HINT_TOUCH } else { HINT_DESKTOP }
}
