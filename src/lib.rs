// ./src/lib.rs

//! Metaball-Maske: Feldmodell, Feder-Dynamik mit Abspalten/Verschmelzen und
//! Konturextraktion (Marching Squares und Strahlenverfahren).
//!
//! `math` und `physics::blob` sind unabhängig vom Rendering; `physics::sim` und
//! `debug` binden die Engine in eine Bevy-App ein.

pub mod debug;
pub mod math;
pub mod physics;
pub mod setup;

pub use math::error::{MathError, MathResult};
pub use physics::blob::{BlobEngine, EngineConfig, PointerSample};
