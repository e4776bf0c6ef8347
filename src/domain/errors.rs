use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("No se pudo acceder al dispositivo: {0}")]
    DeviceAccess(String),
    #[error("Error de conexión con el servidor: {0}")]
    Network(String),
    #[error("Error del servidor: {0}")]
    Backend(String),
    #[error("Entrada inválida: {0}")]
    InvalidInput(String),
}

pub type DomainResult<T> = Result<T, DomainError>;
