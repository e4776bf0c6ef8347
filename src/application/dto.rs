use serde::{Deserialize, Serialize};

use crate::domain::{classification::ClassificationResult, geo::ContainerRecord};

/// Cuerpo de error que devuelve el clasificador en respuestas no-2xx.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifyErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyContainersResponse {
    pub containers: Vec<ContainerRecord>,
}

/// Modelo de vista que el presentador entrega a la superficie de resultados.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub waste_type: String,
    pub object_detected: String,
    pub message: String,
    /// Porcentaje entero [0, 100] listo para la barra de confianza.
    pub confidence_percent: u8,
}

impl From<&ClassificationResult> for ResultView {
    fn from(result: &ClassificationResult) -> Self {
        Self {
            waste_type: result.waste_type.clone(),
            object_detected: result.object_detected.clone(),
            message: result.message.clone(),
            confidence_percent: result.confidence_percent(),
        }
    }
}
