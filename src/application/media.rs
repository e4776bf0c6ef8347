use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{
    camera::{CameraFacing, CameraPhase},
    errors::{DomainError, DomainResult},
    source::{ImageBlob, ImageSource, SourceGeneration},
};

use super::{
    ports::{CameraDevicePort, CameraStreamPort, ClassifierPort, MediaViewPort},
    presenter::ClassificationResultPresenter,
};

struct SourceState {
    generation: SourceGeneration,
    source: Option<ImageSource>,
    session: Option<Box<dyn CameraStreamPort>>,
    /// Si alguna vez se pintó una imagen estática; controla la restauración
    /// del marcador de posición al cerrar la cámara.
    preview_shown: bool,
}

impl SourceState {
    fn camera_phase(&self) -> CameraPhase {
        if self.session.is_some() {
            CameraPhase::Live
        } else {
            CameraPhase::Off
        }
    }
}

/// Controlador del origen de imagen. Garantiza un único origen activo (archivo,
/// arrastre o captura de cámara), media el ciclo de vida de la sesión de cámara
/// y dispara la clasificación con guardia de obsolescencia.
#[derive(Clone)]
pub struct MediaSourceController {
    camera: Arc<dyn CameraDevicePort>,
    classifier: Arc<dyn ClassifierPort>,
    view: Arc<dyn MediaViewPort>,
    presenter: ClassificationResultPresenter,
    state: Arc<Mutex<SourceState>>,
}

impl MediaSourceController {
    pub fn new(
        camera: Arc<dyn CameraDevicePort>,
        classifier: Arc<dyn ClassifierPort>,
        view: Arc<dyn MediaViewPort>,
        presenter: ClassificationResultPresenter,
    ) -> Self {
        Self {
            camera,
            classifier,
            view,
            presenter,
            state: Arc::new(Mutex::new(SourceState {
                generation: SourceGeneration::default(),
                source: None,
                session: None,
                preview_shown: false,
            })),
        }
    }

    /// Carga un archivo como origen activo y lo clasifica. Rechaza tipos de
    /// contenido que no sean imagen sin tocar el origen ni la sesión vigentes.
    pub async fn select_file(&self, file: ImageBlob) -> DomainResult<()> {
        if !file.is_image() {
            return Err(DomainError::InvalidInput(format!(
                "El archivo {} no es una imagen ({})",
                file.file_name, file.mime
            )));
        }
        self.activate_still(file, false).await
    }

    /// Archivos soltados sobre la zona de arrastre: se toma el primero y un
    /// conjunto vacío no hace nada.
    pub async fn handle_drop(&self, files: Vec<ImageBlob>) -> DomainResult<()> {
        match files.into_iter().next() {
            Some(first) => self.select_file(first).await,
            None => Ok(()),
        }
    }

    /// Alterna la cámara. `Off → Live` pide acceso al dispositivo (trasera
    /// preferida) y ante una denegación permanece en `Off` avisando al usuario.
    /// `Live → Off` detiene todas las pistas sea cual sea el motivo de apertura.
    pub async fn toggle_camera(&self) -> DomainResult<()> {
        let request_generation = {
            let mut st = self.state.lock().await;
            match st.camera_phase().toggled() {
                // Cierre idempotente, sea cual sea el motivo de la apertura.
                CameraPhase::Off => {
                    if let Some(session) = st.session.take() {
                        session.stop().await;
                        self.view.hide_live_feed();
                        if matches!(st.source, Some(ImageSource::CameraLive)) {
                            st.source = None;
                        }
                        if !st.preview_shown {
                            self.view.show_placeholder();
                        }
                        tracing::info!("Sesión de cámara cerrada por el usuario");
                    }
                    return Ok(());
                }
                CameraPhase::Live => st.generation,
            }
        };

        match self.camera.open(CameraFacing::Environment).await {
            Ok(session) => {
                let mut st = self.state.lock().await;
                if st.generation != request_generation {
                    // Otro origen ganó la carrera durante el diálogo de permisos:
                    // la concesión llega obsoleta y la sesión se libera en el acto.
                    session.stop().await;
                    tracing::info!("Concesión de cámara descartada: el origen cambió durante el permiso");
                    return Ok(());
                }
                st.generation.bump();
                st.source = Some(ImageSource::CameraLive);
                st.session = Some(session);
                self.view.show_live_feed();
                tracing::info!("Cámara en vivo activada");
                Ok(())
            }
            Err(err) => {
                self.view.alert(&format!("No se pudo acceder a la cámara: {err}"));
                Err(err)
            }
        }
    }

    /// Captura el fotograma actual de la transmisión en vivo y lo trata como un
    /// archivo cargado, lo que cierra la sesión de cámara al cambiar de origen.
    pub async fn capture_frame(&self) -> DomainResult<()> {
        let frame = {
            let st = self.state.lock().await;
            match &st.session {
                Some(session) => session.grab_frame().await?,
                None => {
                    return Err(DomainError::InvalidInput(
                        "La cámara no está activa".into(),
                    ))
                }
            }
        };
        self.activate_still(frame, true).await
    }

    /// Fase actual del conmutador de cámara.
    pub async fn camera_phase(&self) -> CameraPhase {
        self.state.lock().await.camera_phase()
    }

    /// Origen activo en este instante.
    pub async fn current_source(&self) -> Option<ImageSource> {
        self.state.lock().await.source.clone()
    }

    /// Activa una imagen estática: primero desactiva el origen anterior
    /// (deteniendo la sesión de cámara si la hay), después pinta la vista
    /// previa y lanza la clasificación.
    async fn activate_still(&self, blob: ImageBlob, captured: bool) -> DomainResult<()> {
        let data_url = blob.to_data_url();
        let generation = {
            let mut st = self.state.lock().await;
            if let Some(session) = st.session.take() {
                session.stop().await;
                self.view.hide_live_feed();
                tracing::info!("Sesión de cámara cerrada al cambiar de origen");
            }
            st.source = Some(if captured {
                ImageSource::Capture(blob.clone())
            } else {
                ImageSource::File(blob.clone())
            });
            st.preview_shown = true;
            st.generation.bump()
        };
        self.view.show_preview(&data_url);
        self.classify(blob, data_url, generation).await
    }

    /// Petición de clasificación. El presentador entra en carga al empezar;
    /// al resolver, la respuesta sólo se aplica si este origen sigue siendo
    /// el más reciente (guardia de obsolescencia por generación).
    async fn classify(
        &self,
        blob: ImageBlob,
        sprite_data_url: String,
        generation: SourceGeneration,
    ) -> DomainResult<()> {
        self.presenter.begin();
        let outcome = self.classifier.classify(&blob).await;
        {
            let st = self.state.lock().await;
            if st.generation != generation {
                tracing::debug!("Respuesta de clasificación descartada: el origen fue sustituido");
                return Ok(());
            }
        }
        match outcome {
            Ok(result) => {
                self.presenter.succeed(&result, &sprite_data_url).await;
                Ok(())
            }
            Err(err) => {
                // El presentador ya avisa al usuario; se propaga por si el
                // llamador quiere distinguir el tipo de fallo.
                self.presenter.fail(&err.to_string());
                Err(err)
            }
        }
    }
}
