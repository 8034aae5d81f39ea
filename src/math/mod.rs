pub mod algorithms;
pub mod error;
pub mod geometry;
pub mod scalar_field;
pub mod types;
pub mod utils;

// Re-exports für einfache Verwendung
pub use error::{MathError, MathResult};
pub use types::*;

// Öffentliche API
pub mod prelude {
    pub use super::{
        algorithms::{
            Blob, BlobField, BoundaryExtractor, BoundarySettings, Contour, MarchingSquares,
            SampledField,
        },
        error::{MathError, MathResult},
        geometry::{MaskPath, PathCommand, Segment, SegmentPath},
        scalar_field::{ImplicitField, ScalarField2D},
        types::*,
    };
}
