/// Orientación preferida al solicitar la cámara (`facingMode`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraFacing {
    /// Cámara trasera, la preferida para fotografiar residuos.
    Environment,
    /// Cámara frontal.
    User,
}

/// Fases del conmutador de cámara. La sesión en vivo sólo existe en `Live`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraPhase {
    Off,
    Live,
}

impl CameraPhase {
    /// Transición pura del conmutador: pulsar el botón siempre alterna.
    /// La concesión de permiso puede fallar, en cuyo caso se permanece en `Off`.
    pub fn toggled(self) -> CameraPhase {
        match self {
            CameraPhase::Off => CameraPhase::Live,
            CameraPhase::Live => CameraPhase::Off,
        }
    }
}
