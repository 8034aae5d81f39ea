pub mod choreography;
pub mod resources;
pub mod state;
pub mod systems;
