//! # Módulo HTTP
//!
//! Implementa el subconjunto de HTTP/1.1 que habla el servidor:
//!
//! - Parsing de la request line (método, path, query)
//! - Construcción de responses con un único header `Content-Type`
//! - Códigos de estado
//! - Tabla de tipos MIME por extensión
//!
//! ### Formato de Request
//!
//! Solo se lee la primera línea; los headers se ignoran y no hay body.
//!
//! ```text
//! GET /convertir?from=USD&to=EUR&amount=10 HTTP/1.1\r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: application/json\r\n
//! \r\n
//! {"result":8.5}
//! ```

pub mod mime;      // Extensión → Content-Type
pub mod request;   // Parsing de la request line
pub mod response;  // Construcción de HTTP responses
pub mod status;    // Códigos de estado HTTP

// Re-exportamos los tipos principales para facilitar su uso
pub use request::Request;
pub use response::{Body, Response};
pub use status::StatusCode;
