pub mod eraser;
pub mod watercolor;
