pub mod blend;
pub mod surface;
