use serde::{Deserialize, Serialize};

/// Coordenada geográfica en grados decimales.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Centro de Medellín (Parque Berrío aprox.), posición por defecto mientras la
/// geolocalización no haya resuelto o haya sido denegada.
pub const DEFAULT_POSITION: GeoPoint = GeoPoint {
    lat: 6.2442,
    lng: -75.5812,
};

/// Contenedor cercano devuelto por `GET /api/nearby-containers`. La secuencia
/// llega ordenada del más cercano al más lejano y se consume tal cual.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerRecord {
    pub name: String,
    pub location: String,
    pub lat: f64,
    pub lng: f64,
    pub distance_m: u32,
}

impl ContainerRecord {
    pub fn position(&self) -> GeoPoint {
        GeoPoint {
            lat: self.lat,
            lng: self.lng,
        }
    }
}
