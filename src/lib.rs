pub mod app;
pub mod brush_engine;
pub mod canvas;
pub mod error;
pub mod loader;
pub mod styling;
pub mod tablet;
pub mod utils;

pub use app::{LayoutMode, Phase, RevealLayer, RevealOptions, RevealState, ViewportSignal};
pub use error::{Error, Result};
