use async_trait::async_trait;

use crate::domain::{
    camera::CameraFacing,
    classification::{Bin, ClassificationResult},
    errors::DomainResult,
    geo::{ContainerRecord, GeoPoint},
    source::ImageBlob,
};

use super::dto::ResultView;

/// Sesión de cámara abierta. Recurso exclusivo: como máximo existe una y es
/// propiedad del `MediaSourceController`, que debe detenerla exactamente una
/// vez en cada camino que la desactive.
#[async_trait]
pub trait CameraStreamPort: Send + Sync {
    /// Instantánea del fotograma actual (la captura tipo canvas del navegador).
    async fn grab_frame(&self) -> DomainResult<ImageBlob>;
    /// Detiene todas las pistas de la transmisión.
    async fn stop(&self);
}

#[async_trait]
pub trait CameraDevicePort: Send + Sync {
    /// Solicita acceso al dispositivo. Puede suspender en el diálogo de permisos
    /// y fallar si el usuario lo deniega o no hay cámara.
    async fn open(&self, facing: CameraFacing) -> DomainResult<Box<dyn CameraStreamPort>>;
}

#[async_trait]
pub trait ClassifierPort: Send + Sync {
    async fn classify(&self, image: &ImageBlob) -> DomainResult<ClassificationResult>;
}

#[async_trait]
pub trait GeolocationPort: Send + Sync {
    /// Posición actual del usuario, una sola consulta (sin seguimiento).
    async fn current_position(&self) -> DomainResult<GeoPoint>;
}

#[async_trait]
pub trait ContainerDirectoryPort: Send + Sync {
    /// Contenedores cercanos a `position`, ordenados del más cercano al más lejano.
    async fn nearby(&self, position: GeoPoint) -> DomainResult<Vec<ContainerRecord>>;
}

/// Superficie de la zona de previsualización y captura.
pub trait MediaViewPort: Send + Sync {
    /// Muestra la imagen estática (URL de datos) y oculta el marcador de posición.
    fn show_preview(&self, data_url: &str);
    fn show_live_feed(&self);
    fn hide_live_feed(&self);
    fn show_placeholder(&self);
    fn alert(&self, message: &str);
}

/// Superficie del panel de resultados: cargador, contenedores y animación.
#[async_trait]
pub trait ResultSurfacePort: Send + Sync {
    fn show_loader(&self);
    fn hide_loader(&self);
    fn render(&self, view: &ResultView);
    /// Quita el resaltado de todos los contenedores.
    fn clear_bin_highlights(&self);
    /// Atenúa (o restaura) la fila de contenedores para el caso "none".
    fn set_bins_dimmed(&self, dimmed: bool);
    /// Enfatiza (o restaura) el mensaje de advertencia.
    fn set_message_emphasis(&self, emphasized: bool);
    /// Lanza la animación de vuelo hacia el contenedor y resuelve al terminar.
    async fn fly_to_bin(&self, bin: Bin, sprite_data_url: &str);
    fn mark_bin_active(&self, bin: Bin);
    fn alert(&self, message: &str);
}

/// Identificador opaco de una capa dibujada sobre el mapa (marcador o línea).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayHandle(pub u64);

/// Lienzo del mapa: teselas, marcadores, popups, polilíneas y encuadre.
pub trait MapCanvasPort: Send + Sync {
    /// Crea el mapa centrado en `center`. Se invoca una única vez.
    fn init_view(&self, center: GeoPoint, zoom: u8);
    fn set_view(&self, center: GeoPoint, zoom: u8);
    fn add_user_marker(&self, position: GeoPoint, label: &str) -> OverlayHandle;
    /// Marcador numerado (1-based) con popup de nombre, dirección y distancia.
    fn add_container_marker(&self, number: usize, record: &ContainerRecord) -> OverlayHandle;
    fn remove_overlay(&self, handle: OverlayHandle);
    fn open_popup(&self, handle: OverlayHandle);
    fn draw_route_line(&self, from: GeoPoint, to: GeoPoint) -> OverlayHandle;
    /// Ajusta el encuadre para que la ruta quepa con el margen indicado.
    fn fit_route(&self, from: GeoPoint, to: GeoPoint, padding_px: u32);
    /// Reconstruye la lista lateral en el mismo orden de la respuesta.
    fn render_container_list(&self, records: &[ContainerRecord]);
    fn show(&self);
    fn hide(&self);
}
