pub mod overlay;
pub mod svg;
