pub mod layout;
pub mod pointer;
pub mod render_helper;
pub mod reveal;
pub mod state;
pub mod viewport;

pub use layout::LayoutMode;
pub use pointer::{PointerAction, PointerEvent, PointerSource, PointerTracker};
pub use reveal::{RevealLayer, RevealState};
pub use state::{Phase, RevealOptions, parse_options};
pub use viewport::{Subscription, ViewportSignal};
