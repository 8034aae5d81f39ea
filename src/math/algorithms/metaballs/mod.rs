// src/math/algorithms/metaballs/mod.rs

pub mod blob;
pub mod field;
pub mod influence;

pub use self::blob::{Blob, CENTER_EPSILON_SQ};
pub use self::field::{BlobField, SampledField};
pub use self::influence::{FieldInfluence, total_influence};
