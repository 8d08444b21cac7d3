//! # Construcción de Respuestas HTTP
//!
//! Este módulo proporciona una API para construir respuestas HTTP/1.1
//! reducidas y escribirlas en el socket.
//!
//! ## Formato de una respuesta
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/css\r\n
//! \r\n
//! body{}
//! ```
//!
//! Solo se envía un header (`Content-Type`). No hay `Content-Length`:
//! el cuerpo termina cuando el servidor cierra la conexión.
//!
//! ## Ejemplo de uso
//!
//! ```
//! use web_server::http::{Response, StatusCode};
//!
//! let response = Response::new(StatusCode::Ok)
//!     .with_content_type("application/json")
//!     .with_body(r#"{"message": "Hello"}"#);
//!
//! let bytes = response.into_bytes().unwrap();
//! assert!(bytes.starts_with(b"HTTP/1.1 200 OK\r\n"));
//! ```

use super::StatusCode;
use std::fs::File;
use std::io::{self, Write};

/// Content-Type por defecto de todas las respuestas
pub const TEXT_PLAIN: &str = "text/plain";

/// Content-Type del sobre de los servicios
pub const APPLICATION_JSON: &str = "application/json";

/// Cuerpo de la respuesta
///
/// El texto ya fue decodificado; los binarios nunca pasan por un `String`
/// y se copian tal cual desde el archivo al socket.
#[derive(Debug)]
pub enum Body {
    /// Texto (HTML, CSS, JS, JSON o mensajes de error)
    Text(String),

    /// Archivo binario que se transmite después del header
    Binary(File),
}

/// Representa una respuesta HTTP completa
#[derive(Debug)]
pub struct Response {
    /// Código de estado HTTP (200, 404, etc.)
    status: StatusCode,

    /// Valor del único header que enviamos
    content_type: String,

    /// Cuerpo de la respuesta (puede ser vacío)
    body: Body,
}

impl Response {
    /// Crea una nueva respuesta `text/plain` sin cuerpo
    ///
    /// # Ejemplo
    /// ```
    /// use web_server::http::{Response, StatusCode};
    ///
    /// let response = Response::new(StatusCode::Ok);
    /// assert_eq!(response.content_type(), "text/plain");
    /// ```
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            content_type: TEXT_PLAIN.to_string(),
            body: Body::Text(String::new()),
        }
    }

    /// Respuesta `text/plain` con un mensaje
    pub fn text(status: StatusCode, message: &str) -> Self {
        Self::new(status).with_body(message)
    }

    /// Crea una respuesta JSON exitosa (200 OK)
    ///
    /// # Ejemplo
    /// ```
    /// use web_server::http::Response;
    ///
    /// let response = Response::json(r#"{"result":8.5}"#);
    /// assert_eq!(response.content_type(), "application/json");
    /// ```
    pub fn json(body: &str) -> Self {
        Self::new(StatusCode::Ok)
            .with_content_type(APPLICATION_JSON)
            .with_body(body)
    }

    /// Establece el Content-Type
    pub fn with_content_type(mut self, content_type: &str) -> Self {
        self.set_content_type(content_type);
        self
    }

    /// Establece el cuerpo de la respuesta desde un string
    pub fn with_body(mut self, body: &str) -> Self {
        self.set_body(body);
        self
    }

    /// Establece un archivo binario como cuerpo
    pub fn with_file(mut self, file: File) -> Self {
        self.body = Body::Binary(file);
        self
    }

    /// Cambia el código de estado (versión mutable)
    pub fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }

    /// Cambia el Content-Type (versión mutable)
    pub fn set_content_type(&mut self, content_type: &str) {
        self.content_type = content_type.to_string();
    }

    /// Reemplaza el cuerpo por texto (versión mutable)
    pub fn set_body(&mut self, body: &str) {
        self.body = Body::Text(body.to_string());
    }

    /// Status line + header + línea vacía
    ///
    /// ```
    /// use web_server::http::{Response, StatusCode};
    ///
    /// let head = Response::new(StatusCode::MethodNotAllowed).head();
    /// assert_eq!(head, "HTTP/1.1 405 Method Not Allowed\r\nContent-Type: text/plain\r\n\r\n");
    /// ```
    pub fn head(&self) -> String {
        format!(
            "HTTP/1.1 {}\r\nContent-Type: {}\r\n\r\n",
            self.status, self.content_type
        )
    }

    /// Escribe la respuesta completa en `writer`
    ///
    /// El header se escribe primero y por separado; los archivos binarios
    /// se copian después sin decodificarlos.
    pub fn write_to<W: Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(self.head().as_bytes())?;
        match &mut self.body {
            Body::Text(text) => writer.write_all(text.as_bytes())?,
            Body::Binary(file) => {
                io::copy(file, writer)?;
            }
        }
        writer.flush()
    }

    /// Convierte la respuesta a bytes (lee el archivo si es binaria)
    pub fn into_bytes(mut self) -> io::Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        Ok(buffer)
    }

    /// Obtiene el código de estado de la respuesta
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Obtiene el Content-Type
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Cuerpo como texto, `None` si es binario
    pub fn text_body(&self) -> Option<&str> {
        match &self.body {
            Body::Text(text) => Some(text),
            Body::Binary(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Seek, SeekFrom};

    #[test]
    fn test_new_response() {
        let response = Response::new(StatusCode::Ok);
        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.content_type(), "text/plain");
        assert_eq!(response.text_body(), Some(""));
    }

    #[test]
    fn test_text_response_bytes() {
        let bytes = Response::text(StatusCode::BadRequest, "Missing parameters")
            .into_bytes()
            .unwrap();

        assert_eq!(
            bytes,
            b"HTTP/1.1 400 Bad Request\r\nContent-Type: text/plain\r\n\r\nMissing parameters"
        );
    }

    #[test]
    fn test_json_response_bytes() {
        let bytes = Response::json(r#"{"result":8.5}"#).into_bytes().unwrap();

        assert_eq!(
            bytes,
            b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\n\r\n{\"result\":8.5}"
        );
    }

    #[test]
    fn test_empty_body_response() {
        let bytes = Response::new(StatusCode::MethodNotAllowed)
            .into_bytes()
            .unwrap();

        assert_eq!(
            bytes,
            b"HTTP/1.1 405 Method Not Allowed\r\nContent-Type: text/plain\r\n\r\n"
        );
    }

    #[test]
    fn test_binary_body_is_copied_verbatim() {
        // Bytes que no son UTF-8 válido
        let binary_data: [u8; 7] = [0x89, 0x50, 0x4E, 0x47, 0x00, 0xFF, 0xFE];
        let mut file = tempfile::tempfile().unwrap();
        file.write_all(&binary_data).unwrap();
        file.seek(SeekFrom::Start(0)).unwrap();

        let response = Response::new(StatusCode::Ok)
            .with_content_type("image/png")
            .with_file(file);
        assert!(response.text_body().is_none());

        let bytes = response.into_bytes().unwrap();
        let head = b"HTTP/1.1 200 OK\r\nContent-Type: image/png\r\n\r\n";
        assert_eq!(&bytes[..head.len()], head);
        assert_eq!(&bytes[head.len()..], &binary_data);
    }

    #[test]
    fn test_mutable_setters() {
        let mut response = Response::new(StatusCode::NotFound);
        response.set_status(StatusCode::Ok);
        response.set_content_type("text/css");
        response.set_body("body{}");

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.content_type(), "text/css");
        assert_eq!(response.text_body(), Some("body{}"));
    }
}
