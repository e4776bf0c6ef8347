use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use image::RgbImage;

use crate::application::ports::{CameraDevicePort, CameraStreamPort};
use crate::domain::{
    camera::CameraFacing,
    errors::{DomainError, DomainResult},
    source::ImageBlob,
};

/// Cámara que sirve siempre el mismo fotograma RGB. Sustituye al hardware de
/// vídeo en escritorio y en pruebas; la captura sigue el mismo camino que una
/// cámara real (fotograma → JPEG → origen de imagen).
pub struct StillFrameCamera {
    frame: RgbImage,
}

impl StillFrameCamera {
    pub fn new(frame: RgbImage) -> Self {
        Self { frame }
    }
}

#[async_trait]
impl CameraDevicePort for StillFrameCamera {
    async fn open(&self, _facing: CameraFacing) -> DomainResult<Box<dyn CameraStreamPort>> {
        tracing::info!(
            "Cámara de fotograma fijo abierta: {}x{}",
            self.frame.width(),
            self.frame.height()
        );
        Ok(Box::new(StillFrameSession {
            frame: self.frame.clone(),
            running: AtomicBool::new(true),
        }))
    }
}

struct StillFrameSession {
    frame: RgbImage,
    running: AtomicBool,
}

#[async_trait]
impl CameraStreamPort for StillFrameSession {
    async fn grab_frame(&self) -> DomainResult<ImageBlob> {
        if !self.running.load(Ordering::SeqCst) {
            return Err(DomainError::DeviceAccess(
                "La sesión de cámara ya fue detenida".into(),
            ));
        }
        encode_jpeg_frame(&self.frame)
    }

    async fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
        tracing::info!("Cámara de fotograma fijo detenida");
    }
}

/// Captura de fotograma al estilo canvas del navegador: RGB → JPEG (calidad 80)
/// con el nombre con el que viajará al clasificador.
pub fn encode_jpeg_frame(frame: &RgbImage) -> DomainResult<ImageBlob> {
    let mut jpeg = Vec::new();
    let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut jpeg, 80);
    encoder
        .encode(
            frame.as_raw(),
            frame.width(),
            frame.height(),
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|err| {
            DomainError::DeviceAccess(format!("No se pudo codificar el fotograma: {err}"))
        })?;
    Ok(ImageBlob::new(jpeg, "image/jpeg", "camera_capture.jpg"))
}
