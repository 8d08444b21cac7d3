//! # Parsing de la Request Line
//! src/http/request.rs
//!
//! El servidor solo lee la primera línea del request. El resto (headers,
//! body) se ignora.
//!
//! ## Formato
//!
//! ```text
//! GET /convertir?from=USD&to=EUR&amount=10 HTTP/1.1
//! ```
//!
//! 1. **Método**: solo se acepta `GET`
//! 2. **Target**: URI en origin-form (`/path?query`) o absolute-form
//!    (`http://host/path?query`)
//! 3. **Versión**: se tolera cualquier valor o incluso su ausencia

use crate::error::DispatchError;
use http::Uri;
use std::collections::HashMap;

/// Representa un request GET ya parseado
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Método HTTP (siempre "GET" una vez parseado)
    method: String,

    /// Path decodificado (ej: "/convertir")
    path: String,

    /// Query string cruda, `None` si el target no tenía `?`
    query: Option<String>,

    /// Query parameters decodificados (ej: {"from": "USD"})
    query_params: HashMap<String, String>,
}

impl Request {
    /// Parsea una request line
    ///
    /// # Errores
    ///
    /// * `MalformedRequest` - menos de dos tokens, URI inválida o path que
    ///   no decodifica a UTF-8
    /// * `UnsupportedMethod` - método distinto de GET (se detecta antes de
    ///   mirar la URI)
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use web_server::http::Request;
    ///
    /// let request = Request::parse_line("GET /convertir?from=USD&amount=10 HTTP/1.1").unwrap();
    ///
    /// assert_eq!(request.path(), "/convertir");
    /// assert_eq!(request.query_param("from"), Some("USD"));
    /// assert_eq!(request.query_param("amount"), Some("10"));
    /// ```
    pub fn parse_line(line: &str) -> Result<Self, DispatchError> {
        let mut parts = line.split_whitespace();

        let (method, target) = match (parts.next(), parts.next()) {
            (Some(method), Some(target)) => (method, target),
            _ => {
                return Err(DispatchError::MalformedRequest(format!(
                    "request line {:?} needs a method and a target",
                    line.trim_end()
                )));
            }
        };

        if method != "GET" {
            return Err(DispatchError::UnsupportedMethod(method.to_string()));
        }

        let uri = target.parse::<Uri>().map_err(|e| {
            DispatchError::MalformedRequest(format!("invalid URI {:?}: {}", target, e))
        })?;

        let path = urlencoding::decode(uri.path())
            .map_err(|e| {
                DispatchError::MalformedRequest(format!("path {:?} is not UTF-8: {}", uri.path(), e))
            })?
            .into_owned();

        let query = uri.query().map(str::to_string);
        let query_params = query
            .as_deref()
            .map(Self::parse_query_string)
            .unwrap_or_default();

        Ok(Request {
            method: method.to_string(),
            path,
            query,
            query_params,
        })
    }

    /// Parsea una query string en un HashMap
    ///
    /// Ejemplo: "from=USD&to=EUR&amount=10"
    /// Retorna: {"from": "USD", "to": "EUR", "amount": "10"}
    fn parse_query_string(query: &str) -> HashMap<String, String> {
        let mut params = HashMap::new();

        for param in query.split('&') {
            if param.is_empty() {
                continue;
            }

            match param.split_once('=') {
                Some((key, value)) => {
                    params.insert(Self::url_decode(key), Self::url_decode(value));
                }
                // Parámetro sin valor (ej: "?debug")
                None => {
                    params.insert(Self::url_decode(param), String::new());
                }
            }
        }

        params
    }

    /// Decodifica un componente de la query (`%XX` y `+` como espacio)
    fn url_decode(s: &str) -> String {
        let spaced = s.replace('+', " ");
        let bytes = urlencoding::decode_binary(spaced.as_bytes());
        String::from_utf8_lossy(&bytes).into_owned()
    }

    // === Métodos públicos para acceder a los campos ===

    /// Obtiene el método HTTP del request
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Obtiene el path decodificado
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Obtiene la query string cruda
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// ¿El target traía `?`?
    pub fn has_query(&self) -> bool {
        self.query.is_some()
    }

    /// Obtiene todos los query parameters
    pub fn query_params(&self) -> &HashMap<String, String> {
        &self.query_params
    }

    /// Obtiene un query parameter específico
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query_params.get(name).map(|s| s.as_str())
    }
}
