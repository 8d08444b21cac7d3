//! # Errores de despacho
//! src/error.rs
//!
//! Cada request que no termina en una respuesta 200 pasa por
//! `DispatchError`. El error guarda el detalle para los logs; el cliente
//! solo ve `public_message()`.

use crate::http::{Response, StatusCode};
use std::io;
use thiserror::Error;

/// Qué no se encontró (define el mensaje público del 404)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundKind {
    /// Archivo estático o ruta desconocida
    File,

    /// Ruta con prefijo de servicio pero sin handler exacto
    Service,
}

/// Errores que pueden ocurrir al despachar un request
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Request line con menos de dos tokens, URI inválida o path no UTF-8
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    /// Cualquier método distinto de GET
    #[error("unsupported method: {0}")]
    UnsupportedMethod(String),

    /// Ruta de servicio sin `?query`
    #[error("missing query string for service path {0}")]
    MissingQuery(String),

    /// Ruta desconocida, servicio no registrado o archivo no servible
    #[error("not found: {path}")]
    NotFound { path: String, kind: NotFoundKind },

    /// Error de disco al leer un archivo estático
    #[error("I/O failure reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl DispatchError {
    /// 404 de archivo
    pub fn file_not_found(path: &str) -> Self {
        DispatchError::NotFound {
            path: path.to_string(),
            kind: NotFoundKind::File,
        }
    }

    /// 404 de servicio
    pub fn service_not_found(path: &str) -> Self {
        DispatchError::NotFound {
            path: path.to_string(),
            kind: NotFoundKind::Service,
        }
    }

    /// Código HTTP asociado al error
    pub fn status(&self) -> StatusCode {
        match self {
            DispatchError::MalformedRequest(_) | DispatchError::MissingQuery(_) => {
                StatusCode::BadRequest
            }
            DispatchError::UnsupportedMethod(_) => StatusCode::MethodNotAllowed,
            DispatchError::NotFound { .. } => StatusCode::NotFound,
            DispatchError::Io { .. } => StatusCode::InternalServerError,
        }
    }

    /// Mensaje que se envía al cliente
    ///
    /// Nunca incluye el detalle del error de I/O.
    pub fn public_message(&self) -> &'static str {
        match self {
            DispatchError::MalformedRequest(_) => "Malformed request",
            DispatchError::UnsupportedMethod(_) => "",
            DispatchError::MissingQuery(_) => "Missing parameters",
            DispatchError::NotFound {
                kind: NotFoundKind::File,
                ..
            } => "File not found",
            DispatchError::NotFound {
                kind: NotFoundKind::Service,
                ..
            } => "Service not found",
            DispatchError::Io { .. } => "Internal server error",
        }
    }

    /// Convierte el error en la respuesta `text/plain` correspondiente
    pub fn into_response(self) -> Response {
        Response::text(self.status(), self.public_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            DispatchError::MalformedRequest("GET".into()).status(),
            StatusCode::BadRequest
        );
        assert_eq!(
            DispatchError::UnsupportedMethod("POST".into()).status(),
            StatusCode::MethodNotAllowed
        );
        assert_eq!(
            DispatchError::MissingQuery("/convertir".into()).status(),
            StatusCode::BadRequest
        );
        assert_eq!(
            DispatchError::file_not_found("/x").status(),
            StatusCode::NotFound
        );
    }

    #[test]
    fn test_io_detail_is_not_public() {
        let err = DispatchError::Io {
            path: "static/secret.css".into(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied (os error 13)"),
        };

        assert_eq!(err.status(), StatusCode::InternalServerError);
        assert!(err.to_string().contains("permission denied"));
        assert_eq!(err.public_message(), "Internal server error");

        let response = err.into_response();
        assert_eq!(response.text_body(), Some("Internal server error"));
    }

    #[test]
    fn test_not_found_messages() {
        assert_eq!(
            DispatchError::file_not_found("/a.png").public_message(),
            "File not found"
        );
        assert_eq!(
            DispatchError::service_not_found("/convertir/x").public_message(),
            "Service not found"
        );
    }
}
