pub mod dto;
pub mod geomap;
pub mod media;
pub mod ports;
pub mod presenter;
