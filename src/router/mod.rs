//! # Sistema de Routing
//! src/router/mod.rs
//!
//! Este módulo decide qué hacer con cada request line.
//!
//! ## Arquitectura
//!
//! ```text
//! request line → RequestRouter ─┬→ StaticFileLoader
//!                               ├→ ServiceRegistry (handler)
//!                               └→ 404
//! ```
//!
//! La clasificación se evalúa siempre en el mismo orden:
//!
//! 1. `/` o path vacío → `index.html`
//! 2. Extensión estática (`.html`, `.css`, `.js`, imágenes) → archivo
//! 3. Prefijo de un servicio registrado → handler (búsqueda exacta)
//! 4. Cualquier otra cosa → 404

pub mod registry;
pub mod static_files;

pub use registry::{Handler, ServiceRegistry};
pub use static_files::{StaticFileError, StaticFileLoader};

use crate::error::DispatchError;
use crate::http::response::APPLICATION_JSON;
use crate::http::{Request, Response, StatusCode};
use regex::Regex;
use std::sync::LazyLock;

/// Paths que se tratan como archivos estáticos
static STATIC_ASSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\.(html|css|js|jpg|jpeg|png|gif|bmp)$").expect("static asset pattern is valid")
});

/// Archivo que se sirve para `/`
pub const INDEX_FILE: &str = "index.html";

/// Router de requests: archivos estáticos + servicios registrados
#[derive(Debug)]
pub struct RequestRouter {
    services: ServiceRegistry,
    static_files: StaticFileLoader,
}

impl RequestRouter {
    /// Crea el router; la tabla de servicios ya no cambia después de esto
    pub fn new(services: ServiceRegistry, static_files: StaticFileLoader) -> Self {
        Self {
            services,
            static_files,
        }
    }

    /// Despacha una request line y siempre produce una respuesta
    ///
    /// # Ejemplo
    /// ```
    /// use web_server::http::StatusCode;
    /// use web_server::router::{RequestRouter, ServiceRegistry, StaticFileLoader};
    ///
    /// let router = RequestRouter::new(ServiceRegistry::new(), StaticFileLoader::new("./static"));
    ///
    /// let response = router.dispatch("POST / HTTP/1.1");
    /// assert_eq!(response.status(), StatusCode::MethodNotAllowed);
    /// ```
    pub fn dispatch(&self, line: &str) -> Response {
        let result = Request::parse_line(line).and_then(|request| self.route(&request));

        match result {
            Ok(response) => response,
            Err(err) => {
                match &err {
                    DispatchError::Io { .. } => {
                        tracing::error!(error = %err, "Static file read failed")
                    }
                    DispatchError::MalformedRequest(_) => {
                        tracing::warn!(error = %err, "Rejected request line")
                    }
                    _ => tracing::debug!(error = %err, status = err.status().as_u16(), "Request not served"),
                }
                err.into_response()
            }
        }
    }

    /// Clasifica un request ya parseado
    pub fn route(&self, request: &Request) -> Result<Response, DispatchError> {
        let path = request.path();

        if path == "/" || path.is_empty() {
            return self.serve_static(INDEX_FILE);
        }

        if STATIC_ASSET.is_match(path) {
            return self.serve_static(path.strip_prefix('/').unwrap_or(path));
        }

        if self.services.matches_prefix(path) {
            return self.call_service(request);
        }

        Err(DispatchError::file_not_found(path))
    }

    /// Sirve un archivo y traduce el error tipado del cargador
    fn serve_static(&self, file: &str) -> Result<Response, DispatchError> {
        self.static_files.load(file).map_err(|err| match err {
            StaticFileError::NotFound(path) => DispatchError::file_not_found(&path),
            StaticFileError::OutsideRoot(path) => {
                tracing::warn!(path = %path, "Path traversal attempt blocked");
                DispatchError::file_not_found(&path)
            }
            StaticFileError::Io { path, source } => DispatchError::Io { path, source },
        })
    }

    /// Invoca el handler registrado en el path exacto del request
    fn call_service(&self, request: &Request) -> Result<Response, DispatchError> {
        let path = request.path();

        if !request.has_query() {
            return Err(DispatchError::MissingQuery(path.to_string()));
        }

        let handler = self
            .services
            .lookup(path)
            .ok_or_else(|| DispatchError::service_not_found(path))?;

        let mut response = Response::json("");
        let body = handler(request, &mut response);

        // El sobre de un servicio es siempre 200 + JSON
        response.set_status(StatusCode::Ok);
        response.set_content_type(APPLICATION_JSON);
        response.set_body(&body);

        tracing::debug!(path, "Service invoked");
        Ok(response)
    }

    /// Registro de servicios
    pub fn services(&self) -> &ServiceRegistry {
        &self.services
    }

    /// Cargador de archivos estáticos
    pub fn static_files(&self) -> &StaticFileLoader {
        &self.static_files
    }
}
