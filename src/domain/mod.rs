pub mod camera;
pub mod classification;
pub mod errors;
pub mod geo;
pub mod presenter;
pub mod source;
