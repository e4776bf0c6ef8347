//! Dobles de prueba para los puertos: registran cada efecto visible para que
//! las pruebas afirmen sobre el orden y el recuento de mutaciones de la UI.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::oneshot;

use ecosort_core::application::dto::ResultView;
use ecosort_core::application::ports::{
    CameraDevicePort, CameraStreamPort, ClassifierPort, ContainerDirectoryPort, GeolocationPort,
    MapCanvasPort, MediaViewPort, OverlayHandle, ResultSurfacePort,
};
use ecosort_core::domain::camera::CameraFacing;
use ecosort_core::domain::classification::{Bin, ClassificationResult, ContainerColor};
use ecosort_core::domain::errors::{DomainError, DomainResult};
use ecosort_core::domain::geo::{ContainerRecord, GeoPoint};
use ecosort_core::domain::source::ImageBlob;

/// Registro compartido de eventos de una superficie falsa.
#[derive(Clone, Default)]
pub struct Log(Arc<Mutex<Vec<String>>>);

impl Log {
    pub fn push(&self, event: impl Into<String>) {
        self.0.lock().unwrap().push(event.into());
    }

    pub fn events(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn contains(&self, event: &str) -> bool {
        self.events().iter().any(|e| e == event)
    }

    pub fn count_prefix(&self, prefix: &str) -> usize {
        self.events().iter().filter(|e| e.starts_with(prefix)).count()
    }

    /// Posición del primer evento igual a `event`; falla si no existe.
    pub fn index_of(&self, event: &str) -> usize {
        self.events()
            .iter()
            .position(|e| e == event)
            .unwrap_or_else(|| panic!("evento {event:?} ausente en {:?}", self.events()))
    }
}

/// Deja correr las tareas locales pendientes (ejecutor de un solo hilo).
pub async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

pub fn png_blob(name: &str) -> ImageBlob {
    ImageBlob::new(vec![0x89, b'P', b'N', b'G'], "image/png", name)
}

pub fn classification(
    color: ContainerColor,
    confidence: f64,
    waste_type: &str,
) -> ClassificationResult {
    ClassificationResult {
        waste_type: waste_type.into(),
        object_detected: "objeto".into(),
        message: format!("Clasificado como {waste_type}"),
        confidence,
        container_color: color,
    }
}

pub fn container(name: &str, lat: f64, lng: f64, distance_m: u32) -> ContainerRecord {
    ContainerRecord {
        name: name.into(),
        location: "Calle 52 #41-20".into(),
        lat,
        lng,
        distance_m,
    }
}

// ---------------------------------------------------------------------------
// Cámara

#[derive(Default)]
pub struct CameraStats {
    pub opened: usize,
    pub stopped: usize,
    /// Liberaciones de una sesión ya detenida; siempre debe quedar en cero.
    pub double_stops: usize,
}

pub struct FakeCamera {
    pub stats: Arc<Mutex<CameraStats>>,
    deny: bool,
    open_gate: Mutex<Option<oneshot::Receiver<()>>>,
    frame: ImageBlob,
}

impl FakeCamera {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            stats: Arc::default(),
            deny: false,
            open_gate: Mutex::new(None),
            frame: ImageBlob::new(vec![0xFF, 0xD8, 0xFF], "image/jpeg", "camera_capture.jpg"),
        })
    }

    pub fn denying() -> Arc<Self> {
        Arc::new(Self {
            stats: Arc::default(),
            deny: true,
            open_gate: Mutex::new(None),
            frame: ImageBlob::new(vec![], "image/jpeg", "camera_capture.jpg"),
        })
    }

    /// Retiene la concesión de permiso hasta que se dispare el emisor devuelto.
    pub fn gate_open(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.open_gate.lock().unwrap() = Some(rx);
        tx
    }
}

#[async_trait]
impl CameraDevicePort for FakeCamera {
    async fn open(&self, _facing: CameraFacing) -> DomainResult<Box<dyn CameraStreamPort>> {
        let gate = self.open_gate.lock().unwrap().take();
        if let Some(rx) = gate {
            let _ = rx.await;
        }
        if self.deny {
            return Err(DomainError::DeviceAccess("permiso denegado".into()));
        }
        self.stats.lock().unwrap().opened += 1;
        Ok(Box::new(FakeSession {
            stats: self.stats.clone(),
            frame: self.frame.clone(),
            stopped: AtomicBool::new(false),
        }))
    }
}

struct FakeSession {
    stats: Arc<Mutex<CameraStats>>,
    frame: ImageBlob,
    stopped: AtomicBool,
}

#[async_trait]
impl CameraStreamPort for FakeSession {
    async fn grab_frame(&self) -> DomainResult<ImageBlob> {
        if self.stopped.load(Ordering::SeqCst) {
            return Err(DomainError::DeviceAccess("sesión detenida".into()));
        }
        Ok(self.frame.clone())
    }

    async fn stop(&self) {
        let mut stats = self.stats.lock().unwrap();
        if self.stopped.swap(true, Ordering::SeqCst) {
            stats.double_stops += 1;
        } else {
            stats.stopped += 1;
        }
    }
}

// ---------------------------------------------------------------------------
// Clasificador

type ClassifyReply = DomainResult<ClassificationResult>;

#[derive(Default)]
pub struct FakeClassifier {
    replies: Mutex<HashMap<String, ClassifyReply>>,
    gates: Mutex<HashMap<String, oneshot::Receiver<ClassifyReply>>>,
    /// Nombres de archivo recibidos, en orden de llegada.
    pub seen: Mutex<Vec<String>>,
}

impl FakeClassifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply(&self, file_name: &str, reply: ClassifyReply) {
        self.replies.lock().unwrap().insert(file_name.into(), reply);
    }

    /// La petición para `file_name` quedará suspendida hasta que el emisor
    /// devuelto publique su desenlace.
    pub fn gate(&self, file_name: &str) -> oneshot::Sender<ClassifyReply> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(file_name.into(), rx);
        tx
    }
}

#[async_trait]
impl ClassifierPort for FakeClassifier {
    async fn classify(&self, image: &ImageBlob) -> ClassifyReply {
        self.seen.lock().unwrap().push(image.file_name.clone());
        let gate = self.gates.lock().unwrap().remove(&image.file_name);
        if let Some(rx) = gate {
            return rx
                .await
                .unwrap_or_else(|_| Err(DomainError::Network("puerta cerrada".into())));
        }
        self.replies
            .lock()
            .unwrap()
            .remove(&image.file_name)
            .unwrap_or_else(|| Ok(classification(ContainerColor::Black, 0.5, "Basura")))
    }
}

// ---------------------------------------------------------------------------
// Vistas

#[derive(Default)]
pub struct RecordingMediaView {
    pub log: Log,
}

impl MediaViewPort for RecordingMediaView {
    fn show_preview(&self, _data_url: &str) {
        self.log.push("preview");
    }
    fn show_live_feed(&self) {
        self.log.push("live:on");
    }
    fn hide_live_feed(&self) {
        self.log.push("live:off");
    }
    fn show_placeholder(&self) {
        self.log.push("placeholder");
    }
    fn alert(&self, message: &str) {
        self.log.push(format!("alert:{message}"));
    }
}

#[derive(Default)]
pub struct RecordingSurface {
    pub log: Log,
}

#[async_trait]
impl ResultSurfacePort for RecordingSurface {
    fn show_loader(&self) {
        self.log.push("loader:on");
    }
    fn hide_loader(&self) {
        self.log.push("loader:off");
    }
    fn render(&self, view: &ResultView) {
        self.log
            .push(format!("render:{}:{}%", view.waste_type, view.confidence_percent));
    }
    fn clear_bin_highlights(&self) {
        self.log.push("bins:clear");
    }
    fn set_bins_dimmed(&self, dimmed: bool) {
        self.log.push(format!("bins:dim:{dimmed}"));
    }
    fn set_message_emphasis(&self, emphasized: bool) {
        self.log.push(format!("message:emphasis:{emphasized}"));
    }
    async fn fly_to_bin(&self, bin: Bin, _sprite_data_url: &str) {
        self.log.push(format!("fly:{bin:?}"));
    }
    fn mark_bin_active(&self, bin: Bin) {
        self.log.push(format!("active:{bin:?}"));
    }
    fn alert(&self, message: &str) {
        self.log.push(format!("alert:{message}"));
    }
}

// ---------------------------------------------------------------------------
// Mapa

#[derive(Default)]
pub struct FakeCanvas {
    pub log: Log,
    next_handle: AtomicU64,
    overlays: Mutex<HashMap<u64, String>>,
}

impl FakeCanvas {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn insert(&self, kind: String) -> OverlayHandle {
        let id = self.next_handle.fetch_add(1, Ordering::SeqCst);
        self.overlays.lock().unwrap().insert(id, kind);
        OverlayHandle(id)
    }

    /// Capas vivas cuyo tipo empieza por `prefix`.
    pub fn overlay_count(&self, prefix: &str) -> usize {
        self.overlays
            .lock()
            .unwrap()
            .values()
            .filter(|kind| kind.starts_with(prefix))
            .count()
    }

    /// Tipos de las capas vivas, para afirmar sobre el destino de la ruta.
    pub fn overlays(&self) -> Vec<String> {
        self.overlays.lock().unwrap().values().cloned().collect()
    }
}

impl MapCanvasPort for FakeCanvas {
    fn init_view(&self, center: GeoPoint, zoom: u8) {
        self.log.push(format!("init:{}:{}:z{zoom}", center.lat, center.lng));
    }
    fn set_view(&self, center: GeoPoint, zoom: u8) {
        self.log.push(format!("view:{}:{}:z{zoom}", center.lat, center.lng));
    }
    fn add_user_marker(&self, _position: GeoPoint, label: &str) -> OverlayHandle {
        self.log.push(format!("user_marker:{label}"));
        self.insert(format!("user:{label}"))
    }
    fn add_container_marker(&self, number: usize, record: &ContainerRecord) -> OverlayHandle {
        self.log.push(format!("marker:{number}:{}", record.name));
        self.insert(format!("marker:{number}:{}", record.name))
    }
    fn remove_overlay(&self, handle: OverlayHandle) {
        self.overlays.lock().unwrap().remove(&handle.0);
        self.log.push("remove");
    }
    fn open_popup(&self, handle: OverlayHandle) {
        let kind = self
            .overlays
            .lock()
            .unwrap()
            .get(&handle.0)
            .cloned()
            .unwrap_or_default();
        self.log.push(format!("popup:{kind}"));
    }
    fn draw_route_line(&self, _from: GeoPoint, to: GeoPoint) -> OverlayHandle {
        self.log.push(format!("route:{}:{}", to.lat, to.lng));
        self.insert(format!("route:{}:{}", to.lat, to.lng))
    }
    fn fit_route(&self, _from: GeoPoint, _to: GeoPoint, padding_px: u32) {
        self.log.push(format!("fit:{padding_px}"));
    }
    fn render_container_list(&self, records: &[ContainerRecord]) {
        self.log.push(format!("list:{}", records.len()));
    }
    fn show(&self) {
        self.log.push("show");
    }
    fn hide(&self) {
        self.log.push("hide");
    }
}

// ---------------------------------------------------------------------------
// Directorio de contenedores

#[derive(Default)]
pub struct FakeDirectory {
    queue: Mutex<VecDeque<DomainResult<Vec<ContainerRecord>>>>,
    pub requests: Mutex<Vec<GeoPoint>>,
}

impl FakeDirectory {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push(&self, response: DomainResult<Vec<ContainerRecord>>) {
        self.queue.lock().unwrap().push_back(response);
    }
}

#[async_trait]
impl ContainerDirectoryPort for FakeDirectory {
    async fn nearby(&self, position: GeoPoint) -> DomainResult<Vec<ContainerRecord>> {
        self.requests.lock().unwrap().push(position);
        self.queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

// ---------------------------------------------------------------------------
// Geolocalización

enum GeoMode {
    /// Nunca resuelve: la continuación queda suspendida toda la prueba.
    Pending,
    Deny,
    Grant(GeoPoint),
    Gated(oneshot::Receiver<DomainResult<GeoPoint>>),
}

pub struct FakeGeolocator {
    mode: Mutex<GeoMode>,
}

impl FakeGeolocator {
    pub fn pending() -> Arc<Self> {
        Arc::new(Self {
            mode: Mutex::new(GeoMode::Pending),
        })
    }

    pub fn denying() -> Arc<Self> {
        Arc::new(Self {
            mode: Mutex::new(GeoMode::Deny),
        })
    }

    pub fn granting(position: GeoPoint) -> Arc<Self> {
        Arc::new(Self {
            mode: Mutex::new(GeoMode::Grant(position)),
        })
    }

    /// La consulta quedará suspendida hasta que el emisor publique la posición.
    pub fn gated() -> (Arc<Self>, oneshot::Sender<DomainResult<GeoPoint>>) {
        let (tx, rx) = oneshot::channel();
        (
            Arc::new(Self {
                mode: Mutex::new(GeoMode::Gated(rx)),
            }),
            tx,
        )
    }
}

#[async_trait]
impl GeolocationPort for FakeGeolocator {
    async fn current_position(&self) -> DomainResult<GeoPoint> {
        let mode = std::mem::replace(&mut *self.mode.lock().unwrap(), GeoMode::Pending);
        match mode {
            GeoMode::Pending => std::future::pending().await,
            GeoMode::Deny => Err(DomainError::DeviceAccess(
                "permiso de ubicación denegado".into(),
            )),
            GeoMode::Grant(position) => Ok(position),
            GeoMode::Gated(rx) => rx
                .await
                .unwrap_or_else(|_| Err(DomainError::DeviceAccess("puerta cerrada".into()))),
        }
    }
}
