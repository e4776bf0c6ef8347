use std::sync::{Arc, Mutex};

use crate::domain::{
    errors::{DomainError, DomainResult},
    geo::{ContainerRecord, GeoPoint, DEFAULT_POSITION},
};

use super::ports::{ContainerDirectoryPort, GeolocationPort, MapCanvasPort, OverlayHandle};

/// Zoom inicial sobre la posición por defecto.
const INITIAL_ZOOM: u8 = 14;
/// Zoom tras un posicionamiento real del usuario.
const LOCATED_ZOOM: u8 = 15;
/// Zoom al enfocar un contenedor concreto.
const FOCUS_ZOOM: u8 = 16;
/// Margen del encuadre al ajustar la vista a una ruta.
const ROUTE_FIT_PADDING_PX: u32 = 50;

/// Mantiene como máximo una línea de ruta dibujada entre el usuario y un
/// contenedor. Cada dibujo elimina primero la línea anterior y reencuadra la
/// vista; la última llamada gana.
#[derive(Clone)]
pub struct RouteRenderer {
    canvas: Arc<dyn MapCanvasPort>,
    current: Arc<Mutex<Option<OverlayHandle>>>,
}

impl RouteRenderer {
    pub fn new(canvas: Arc<dyn MapCanvasPort>) -> Self {
        Self {
            canvas,
            current: Arc::new(Mutex::new(None)),
        }
    }

    /// Dibuja la ruta recta `origin → destination` sustituyendo la anterior.
    pub fn draw_route(&self, origin: GeoPoint, destination: GeoPoint) {
        let mut current = self.current.lock().unwrap();
        if let Some(previous) = current.take() {
            self.canvas.remove_overlay(previous);
        }
        let line = self.canvas.draw_route_line(origin, destination);
        self.canvas.fit_route(origin, destination, ROUTE_FIT_PADDING_PX);
        *current = Some(line);
    }
}

struct MapState {
    initialized: bool,
    open: bool,
    /// Época de apertura del mapa. Una continuación de geolocalización que
    /// resuelva contra un mapa cerrado o reabierto se descarta.
    epoch: u64,
    location_requested: bool,
    user_position: GeoPoint,
    containers: Vec<ContainerRecord>,
    container_markers: Vec<OverlayHandle>,
    user_marker: Option<OverlayHandle>,
}

/// Controlador del mapa de contenedores: inicialización perezosa, adquisición
/// de posición con respaldo a la predeterminada y visualización de contenedores
/// con ruta automática al más cercano.
#[derive(Clone)]
pub struct GeoMapController {
    canvas: Arc<dyn MapCanvasPort>,
    directory: Arc<dyn ContainerDirectoryPort>,
    geolocation: Arc<dyn GeolocationPort>,
    route: RouteRenderer,
    state: Arc<tokio::sync::Mutex<MapState>>,
}

impl GeoMapController {
    pub fn new(
        canvas: Arc<dyn MapCanvasPort>,
        directory: Arc<dyn ContainerDirectoryPort>,
        geolocation: Arc<dyn GeolocationPort>,
    ) -> Self {
        let route = RouteRenderer::new(canvas.clone());
        Self {
            canvas,
            directory,
            geolocation,
            route,
            state: Arc::new(tokio::sync::Mutex::new(MapState {
                initialized: false,
                open: false,
                epoch: 0,
                location_requested: false,
                user_position: DEFAULT_POSITION,
                containers: Vec::new(),
                container_markers: Vec::new(),
                user_marker: None,
            })),
        }
    }

    /// Abre el mapa. La primera apertura crea la vista centrada en la posición
    /// por defecto y lanza la geolocalización; las siguientes son idempotentes.
    /// Toda apertura dispara una recarga de contenedores.
    pub async fn open_map(&self) {
        // La época se captura bajo el mismo candado que la incrementa: la
        // continuación de geolocalización debe quedar ligada a esta apertura,
        // no a la que esté vigente cuando la tarea llegue a ejecutarse.
        let locate_epoch = {
            let mut st = self.state.lock().await;
            st.open = true;
            st.epoch += 1;
            if !st.initialized {
                self.canvas.init_view(st.user_position, INITIAL_ZOOM);
                st.initialized = true;
                tracing::info!("Mapa inicializado en la posición predeterminada");
            }
            self.canvas.show();
            let locate = !st.location_requested;
            st.location_requested = true;
            locate.then_some(st.epoch)
        };

        // Primera carga, posiblemente aún con la posición predeterminada; si la
        // geolocalización resuelve después, se recarga con la posición real.
        let _ = self.refresh_containers().await;

        if let Some(epoch) = locate_epoch {
            let controller = self.clone();
            tokio::spawn(async move { controller.locate_user(epoch).await });
        }
    }

    /// Cierra el mapa. Las continuaciones pendientes quedan invalidadas.
    pub async fn close_map(&self) {
        let mut st = self.state.lock().await;
        st.open = false;
        self.canvas.hide();
    }

    /// Resolución, posiblemente tardía, de la geolocalización del navegador.
    /// `epoch` es la apertura que lanzó la consulta: si el mapa se cerró o se
    /// reabrió entretanto, el resultado se descarta. Con éxito sobrescribe la
    /// posición, reencuadra, coloca el marcador del usuario y recarga los
    /// contenedores; si falla se mantiene la posición predeterminada con un
    /// marcador etiquetado como tal.
    async fn locate_user(&self, epoch: u64) {
        match self.geolocation.current_position().await {
            Ok(position) => {
                {
                    let mut st = self.state.lock().await;
                    if !st.open || st.epoch != epoch {
                        tracing::debug!("Posición recibida con el mapa cerrado o reabierto; descartada");
                        return;
                    }
                    st.user_position = position;
                    self.canvas.set_view(position, LOCATED_ZOOM);
                    st.user_marker =
                        Some(self.canvas.add_user_marker(position, "Tu ubicación"));
                }
                let _ = self.refresh_containers().await;
            }
            Err(err) => {
                tracing::warn!("Geolocalización no disponible: {err}");
                let mut st = self.state.lock().await;
                if !st.open || st.epoch != epoch {
                    return;
                }
                st.user_marker = Some(
                    self.canvas
                        .add_user_marker(st.user_position, "Ubicación predeterminada (Medellín)"),
                );
            }
        }
    }

    /// Recarga los contenedores cercanos a la posición actual. Con éxito
    /// sustituye por completo los marcadores y la lista (nunca un diff) y traza
    /// la ruta al primero de la secuencia; un fallo deja intacto lo anterior.
    pub async fn refresh_containers(&self) -> DomainResult<()> {
        let position = self.state.lock().await.user_position;
        let records = match self.directory.nearby(position).await {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!("No se pudieron cargar los contenedores cercanos: {err}");
                return Err(err);
            }
        };

        let mut st = self.state.lock().await;
        for handle in st.container_markers.drain(..) {
            self.canvas.remove_overlay(handle);
        }
        let mut handles = Vec::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            handles.push(self.canvas.add_container_marker(index + 1, record));
        }
        self.canvas.render_container_list(&records);
        st.container_markers = handles;
        st.containers = records;

        if let Some(nearest) = st.containers.first() {
            self.route.draw_route(st.user_position, nearest.position());
        }
        Ok(())
    }

    /// Selección de un contenedor desde la lista o su marcador: centra la
    /// vista, abre el popup y traza la ruta hacia él.
    pub async fn select_container(&self, index: usize) -> DomainResult<()> {
        let st = self.state.lock().await;
        let record = st.containers.get(index).ok_or_else(|| {
            DomainError::InvalidInput(format!("No existe el contenedor {index}"))
        })?;
        self.canvas.set_view(record.position(), FOCUS_ZOOM);
        if let Some(handle) = st.container_markers.get(index) {
            self.canvas.open_popup(*handle);
        }
        self.route.draw_route(st.user_position, record.position());
        Ok(())
    }

    /// Posición del usuario vigente (predeterminada hasta un posicionamiento real).
    pub async fn user_position(&self) -> GeoPoint {
        self.state.lock().await.user_position
    }

    /// Contenedores de la última carga correcta, en el orden recibido.
    pub async fn containers(&self) -> Vec<ContainerRecord> {
        self.state.lock().await.containers.clone()
    }
}
