use base64::{prelude::BASE64_STANDARD, Engine};

/// Bytes de una imagen junto con su tipo MIME y nombre de archivo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBlob {
    pub bytes: Vec<u8>,
    pub mime: String,
    pub file_name: String,
}

impl ImageBlob {
    pub fn new(bytes: Vec<u8>, mime: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            bytes,
            mime: mime.into(),
            file_name: file_name.into(),
        }
    }

    pub fn is_image(&self) -> bool {
        self.mime.starts_with("image/")
    }

    /// URL de datos embebible en la vista previa y en el sprite de la animación
    /// (equivalente a `FileReader.readAsDataURL`).
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, BASE64_STANDARD.encode(&self.bytes))
    }
}

/// Origen de la imagen actualmente mostrada. Exactamente uno activo a la vez:
/// activar uno nuevo desactiva primero el anterior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Archivo subido o soltado sobre la zona de arrastre.
    File(ImageBlob),
    /// Fotograma capturado desde la cámara en vivo.
    Capture(ImageBlob),
    /// Transmisión de cámara en vivo, aún sin capturar.
    CameraLive,
}

/// Contador monótono de activaciones de origen. Las continuaciones asíncronas
/// comparan la generación que capturaron con la vigente antes de tocar la UI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct SourceGeneration(u64);

impl SourceGeneration {
    /// Avanza a la siguiente generación y la devuelve.
    pub fn bump(&mut self) -> SourceGeneration {
        self.0 += 1;
        *self
    }
}
