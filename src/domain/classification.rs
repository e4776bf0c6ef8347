use serde::{Deserialize, Serialize};

/// Color de contenedor devuelto por el servicio de clasificación.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerColor {
    Green,
    White,
    Red,
    Black,
    /// El objeto no va en ningún contenedor (animal, persona, RAEE...).
    None,
    /// Color no reconocido en la respuesta; se trata como negro al elegir destino.
    #[serde(other)]
    Unknown,
}

/// Zona de contenedor de la interfaz hacia la que vuela la imagen clasificada.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bin {
    Green,
    White,
    Red,
    Black,
}

impl ContainerColor {
    /// Contenedor destino de la animación. `None` no tiene destino; cualquier
    /// color fuera del catálogo cae al contenedor negro.
    pub fn target_bin(self) -> Option<Bin> {
        match self {
            ContainerColor::Green => Some(Bin::Green),
            ContainerColor::White => Some(Bin::White),
            ContainerColor::Red => Some(Bin::Red),
            ContainerColor::Black | ContainerColor::Unknown => Some(Bin::Black),
            ContainerColor::None => None,
        }
    }
}

/// Respuesta del endpoint `POST /classify`. Se consume una única vez por el
/// presentador de resultados.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub waste_type: String,
    pub object_detected: String,
    pub message: String,
    /// Confianza del modelo en [0, 1].
    pub confidence: f64,
    pub container_color: ContainerColor,
}

impl ClassificationResult {
    /// Confianza como porcentaje entero redondeado, siempre dentro de [0, 100].
    pub fn confidence_percent(&self) -> u8 {
        (self.confidence.clamp(0.0, 1.0) * 100.0).round() as u8
    }
}
