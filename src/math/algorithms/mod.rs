// src/math/algorithms/mod.rs

pub mod boundary;
pub mod marching_squares;
pub mod metaballs;

pub use self::boundary::{BoundaryExtractor, BoundarySettings};
pub use self::marching_squares::{CellCase, CellEdge, Contour, MarchingSquares};
pub use self::metaballs::{Blob, BlobField, FieldInfluence, SampledField};
