pub mod blob;
pub mod sim;
