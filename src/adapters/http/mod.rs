pub mod classifier;
pub mod containers;
