pub mod profiler;
pub mod vector;
