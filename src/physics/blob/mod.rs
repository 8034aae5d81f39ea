// src/physics/blob/mod.rs

pub mod config;
pub mod dynamics;
pub mod engine;

pub use self::config::EngineConfig;
pub use self::engine::{BlobEngine, PointerSample};
