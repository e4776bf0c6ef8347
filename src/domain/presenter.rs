/// Fases del presentador de resultados de clasificación.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultPhase {
    Idle,
    Loading,
    Success,
    Error,
}

/// Eventos que mueven al presentador de una fase a otra.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultEvent {
    /// Arranca una nueva petición de clasificación.
    Begin,
    /// Llegó un resultado válido.
    Succeed,
    /// La petición falló (transporte o error del servidor).
    Fail,
}

impl ResultPhase {
    /// Función de transición pura. `Begin` es válido desde cualquier fase;
    /// `Succeed` y `Fail` sólo desde `Loading` y se ignoran en el resto.
    pub fn apply(self, event: ResultEvent) -> ResultPhase {
        match (self, event) {
            (_, ResultEvent::Begin) => ResultPhase::Loading,
            (ResultPhase::Loading, ResultEvent::Succeed) => ResultPhase::Success,
            (ResultPhase::Loading, ResultEvent::Fail) => ResultPhase::Error,
            (phase, _) => phase,
        }
    }
}
