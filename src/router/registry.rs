//! # Registro de Servicios
//! src/router/registry.rs
//!
//! Tabla path exacto → handler. Se llena una sola vez al arrancar y luego
//! se mueve dentro del `RequestRouter`, donde ya no cambia.

use crate::http::{Request, Response};
use std::collections::HashMap;
use std::fmt;

/// Tipo de función handler
///
/// Recibe el request parseado y la respuesta que servirá de sobre, y
/// retorna el cuerpo JSON.
pub type Handler = Box<dyn Fn(&Request, &mut Response) -> String + Send + Sync>;

/// Registro que mapea paths a handlers
#[derive(Default)]
pub struct ServiceRegistry {
    services: HashMap<String, Handler>,
}

impl ServiceRegistry {
    /// Crea un registro vacío
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra un servicio en `path`
    ///
    /// Registrar dos veces el mismo path reemplaza el handler anterior.
    ///
    /// # Ejemplo
    /// ```
    /// use web_server::router::ServiceRegistry;
    ///
    /// let mut registry = ServiceRegistry::new();
    /// registry.register("/hello", |_req, _resp| r#"{"message": "hello"}"#.to_string());
    /// assert!(registry.lookup("/hello").is_some());
    /// ```
    pub fn register<F>(&mut self, path: &str, handler: F)
    where
        F: Fn(&Request, &mut Response) -> String + Send + Sync + 'static,
    {
        if self
            .services
            .insert(path.to_string(), Box::new(handler))
            .is_some()
        {
            tracing::warn!(path, "Service re-registered, previous handler replaced");
        } else {
            tracing::info!(path, "Service registered at {}", path);
        }
    }

    /// Busca el handler por path exacto
    pub fn lookup(&self, path: &str) -> Option<&Handler> {
        self.services.get(path)
    }

    /// ¿Empieza `path` con algún path registrado?
    ///
    /// El router lo usa para decidir si el request es "de servicio" antes
    /// de hacer la búsqueda exacta.
    pub fn matches_prefix(&self, path: &str) -> bool {
        self.services.keys().any(|registered| path.starts_with(registered.as_str()))
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.services.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::StatusCode;

    fn test_handler(_req: &Request, _resp: &mut Response) -> String {
        r#"{"test": "ok"}"#.to_string()
    }

    fn call(handler: &Handler, line: &str) -> String {
        let request = Request::parse_line(line).unwrap();
        let mut carrier = Response::new(StatusCode::Ok);
        handler(&request, &mut carrier)
    }

    #[test]
    fn test_registry_creation() {
        let registry = ServiceRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.lookup("/convertir").is_none());
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = ServiceRegistry::new();
        registry.register("/test", test_handler);

        assert_eq!(registry.len(), 1);
        let handler = registry.lookup("/test").unwrap();
        assert_eq!(call(handler, "GET /test?a=1 HTTP/1.1"), r#"{"test": "ok"}"#);
    }

    #[test]
    fn test_re_register_overwrites() {
        let mut registry = ServiceRegistry::new();
        registry.register("/svc", |_req, _resp| "first".to_string());
        registry.register("/svc", |_req, _resp| "second".to_string());

        assert_eq!(registry.len(), 1);
        assert_eq!(call(registry.lookup("/svc").unwrap(), "GET /svc?x HTTP/1.1"), "second");
    }

    #[test]
    fn test_lookup_is_exact() {
        let mut registry = ServiceRegistry::new();
        registry.register("/convertir", test_handler);

        assert!(registry.lookup("/convertir/").is_none());
        assert!(registry.lookup("/convertirx").is_none());
        assert!(registry.lookup("/CONVERTIR").is_none());
    }

    #[test]
    fn test_matches_prefix() {
        let mut registry = ServiceRegistry::new();
        registry.register("/convertir", test_handler);

        assert!(registry.matches_prefix("/convertir"));
        assert!(registry.matches_prefix("/convertir/usd"));
        assert!(registry.matches_prefix("/convertirx"));
        assert!(!registry.matches_prefix("/convert"));
        assert!(!registry.matches_prefix("/other"));
    }

    #[test]
    fn test_handler_sees_query() {
        let mut registry = ServiceRegistry::new();
        registry.register("/echo", |req, _resp| {
            format!(r#"{{"from": "{}"}}"#, req.query_param("from").unwrap_or(""))
        });

        let body = call(registry.lookup("/echo").unwrap(), "GET /echo?from=USD HTTP/1.1");
        assert_eq!(body, r#"{"from": "USD"}"#);
    }
}
