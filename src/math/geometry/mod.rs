// src/math/geometry/mod.rs
pub mod path;

pub use path::{MaskPath, PathCommand, Segment, SegmentPath};
