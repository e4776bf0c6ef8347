use std::sync::{Arc, Mutex};

use crate::domain::{
    classification::ClassificationResult,
    presenter::{ResultEvent, ResultPhase},
};

use super::{dto::ResultView, ports::ResultSurfacePort};

/// Presentador de resultados de clasificación. Mantiene la fase actual
/// (`Idle → Loading → {Success | Error} → Loading …`) y dirige la superficie
/// visible: cargador, vista del resultado, resaltado de contenedores y la
/// animación de vuelo.
#[derive(Clone)]
pub struct ClassificationResultPresenter {
    surface: Arc<dyn ResultSurfacePort>,
    phase: Arc<Mutex<ResultPhase>>,
}

impl ClassificationResultPresenter {
    pub fn new(surface: Arc<dyn ResultSurfacePort>) -> Self {
        Self {
            surface,
            phase: Arc::new(Mutex::new(ResultPhase::Idle)),
        }
    }

    pub fn phase(&self) -> ResultPhase {
        *self.phase.lock().unwrap()
    }

    /// Arranca una nueva clasificación: muestra el cargador. Los resaltados
    /// previos se conservan hasta que llegue el nuevo desenlace.
    pub fn begin(&self) {
        let mut phase = self.phase.lock().unwrap();
        let next = phase.apply(ResultEvent::Begin);
        *phase = next;
        self.surface.show_loader();
    }

    /// Resultado recibido. En el caso categorizado resalta el contenedor destino
    /// tras la animación; con `container_color == "none"` suprime la animación,
    /// atenúa los contenedores y enfatiza el mensaje.
    pub async fn succeed(&self, result: &ClassificationResult, sprite_data_url: &str) {
        {
            let mut phase = self.phase.lock().unwrap();
            if *phase != ResultPhase::Loading {
                return;
            }
            let next = phase.apply(ResultEvent::Succeed);
            *phase = next;
        }
        self.surface.hide_loader();
        let view = ResultView::from(result);
        self.surface.render(&view);
        self.surface.clear_bin_highlights();

        match result.container_color.target_bin() {
            None => {
                self.surface.set_bins_dimmed(true);
                self.surface.set_message_emphasis(true);
            }
            Some(bin) => {
                self.surface.set_bins_dimmed(false);
                self.surface.set_message_emphasis(false);
                self.surface.fly_to_bin(bin, sprite_data_url).await;
                self.surface.mark_bin_active(bin);
            }
        }
    }

    /// Fallo de la petición: limpia el cargador y avisa al usuario sin tocar
    /// el estado previo de los contenedores. No hay reintento automático.
    pub fn fail(&self, message: &str) {
        {
            let mut phase = self.phase.lock().unwrap();
            if *phase != ResultPhase::Loading {
                return;
            }
            let next = phase.apply(ResultEvent::Fail);
            *phase = next;
        }
        self.surface.hide_loader();
        self.surface.alert(message);
    }
}
