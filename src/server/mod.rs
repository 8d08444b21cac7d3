//! # Módulo del Servidor HTTP
//! src/server/mod.rs
//!
//! Este módulo implementa el servidor TCP que:
//! 1. Escucha en un puerto (35000 por defecto)
//! 2. Acepta una conexión
//! 3. Lee la request line y la despacha al router
//! 4. Envía la respuesta y cierra la conexión
//!
//! Las conexiones se atienden de a una, en orden de llegada.

pub mod tcp;

// Re-exportar para facilitar el uso
pub use tcp::Server;
