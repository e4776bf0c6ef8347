//! Núcleo del cliente EcoSort: el asistente de separación de residuos.
//!
//! Arquitectura hexagonal en tres capas:
//! - `domain`: tipos puros, errores y las máquinas de estados (fases del
//!   presentador de resultados y conmutador de cámara), sin E/S.
//! - `application`: puertos (traits asíncronos en las costuras) y los
//!   controladores: origen de imagen, presentador de clasificación y mapa de
//!   contenedores con su trazador de rutas.
//! - `adapters`: implementaciones concretas de los puertos — clientes HTTP del
//!   clasificador y del directorio de contenedores, y una cámara de fotograma
//!   fijo para entornos sin hardware de vídeo.
//!
//! La clasificación, la búsqueda de contenedores, las teselas del mapa y los
//! dispositivos del navegador son colaboradores externos detrás de puertos.

pub mod adapters;
pub mod application;
pub mod domain;
