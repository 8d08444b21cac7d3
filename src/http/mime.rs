//! # Tipos MIME
//! src/http/mime.rs
//!
//! Tabla fija extensión → Content-Type. No hay detección por contenido:
//! solo se mira la extensión.

/// Obtiene el Content-Type a partir de la extensión (sin el punto)
///
/// Cualquier extensión desconocida, incluida la vacía, es `text/plain`.
///
/// # Ejemplo
/// ```
/// use web_server::http::mime::content_type_for;
///
/// assert_eq!(content_type_for("css"), "text/css");
/// assert_eq!(content_type_for("jpeg"), "image/jpeg");
/// assert_eq!(content_type_for(""), "text/plain");
/// ```
pub fn content_type_for(extension: &str) -> &'static str {
    match extension {
        "html" => "text/html",
        "css" => "text/css",
        "js" => "text/javascript",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        _ => "text/plain",
    }
}
