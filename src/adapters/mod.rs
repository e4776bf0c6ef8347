pub mod camera;
pub mod http;
