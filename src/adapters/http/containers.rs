use async_trait::async_trait;

use crate::application::{dto::NearbyContainersResponse, ports::ContainerDirectoryPort};
use crate::domain::{
    errors::{DomainError, DomainResult},
    geo::{ContainerRecord, GeoPoint},
};

/// Cliente del directorio de contenedores cercanos
/// (`GET /api/nearby-containers?lat=..&lon=..`). La búsqueda, el ranking y el
/// cálculo de distancias son del servidor; la secuencia se consume tal cual.
pub struct HttpContainerDirectory {
    client: reqwest::Client,
    base_url: String,
}

impl HttpContainerDirectory {
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
impl ContainerDirectoryPort for HttpContainerDirectory {
    async fn nearby(&self, position: GeoPoint) -> DomainResult<Vec<ContainerRecord>> {
        let response = self
            .client
            .get(format!("{}/api/nearby-containers", self.base_url))
            .query(&[("lat", position.lat), ("lon", position.lng)])
            .send()
            .await
            .map_err(|err| DomainError::Network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::Backend(format!("HTTP {status}")));
        }
        let body: NearbyContainersResponse = response
            .json()
            .await
            .map_err(|err| DomainError::Backend(err.to_string()))?;
        Ok(body.containers)
    }
}
