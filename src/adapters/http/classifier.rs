use async_trait::async_trait;
use reqwest::multipart::{Form, Part};

use crate::application::{dto::ClassifyErrorBody, ports::ClassifierPort};
use crate::domain::{
    classification::ClassificationResult,
    errors::{DomainError, DomainResult},
    source::ImageBlob,
};

/// Cliente del servicio de clasificación (`POST /classify`, multipart con el
/// campo `file`). El backend es un colaborador externo opaco.
pub struct HttpClassifier {
    client: reqwest::Client,
    base_url: String,
}

impl HttpClassifier {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl ClassifierPort for HttpClassifier {
    async fn classify(&self, image: &ImageBlob) -> DomainResult<ClassificationResult> {
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.mime)
            .map_err(|err| DomainError::InvalidInput(err.to_string()))?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(format!("{}/classify", self.base_url))
            .multipart(form)
            .send()
            .await
            .map_err(|err| DomainError::Network(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            response
                .json::<ClassificationResult>()
                .await
                .map_err(|err| DomainError::Backend(err.to_string()))
        } else {
            // El servidor responde {"error": "..."} en los fallos estructurados;
            // si el cuerpo no cumple, se informa el estado HTTP.
            let message = response
                .json::<ClassifyErrorBody>()
                .await
                .map(|body| body.error)
                .unwrap_or_else(|_| format!("HTTP {status}"));
            tracing::warn!("Clasificación rechazada por el servidor: {message}");
            Err(DomainError::Backend(message))
        }
    }
}
