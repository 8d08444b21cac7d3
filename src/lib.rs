//! # Web Server
//! src/lib.rs
//!
//! Servidor HTTP mínimo que sirve archivos estáticos desde un directorio y
//! despacha paths registrados a servicios (por ejemplo, conversión de
//! divisas en `/convertir`).
//!
//! ## Arquitectura
//!
//! - `http`: Request line, responses, códigos de estado y tipos MIME
//! - `router`: Clasificación de requests, archivos estáticos y registro de servicios
//! - `services`: Handlers registrables
//! - `server`: Bucle TCP secuencial
//! - `config`: Configuración por CLI / variables de entorno
//! - `error`: Errores de despacho y su traducción a respuestas
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use web_server::config::Config;
//! use web_server::router::{RequestRouter, ServiceRegistry, StaticFileLoader};
//! use web_server::server::Server;
//! use web_server::services;
//!
//! let config = Config::default();
//!
//! let mut registry = ServiceRegistry::new();
//! registry.register("/convertir", services::convert_handler);
//!
//! let router = RequestRouter::new(registry, StaticFileLoader::new(&config.static_dir));
//! let mut server = Server::new(config, router);
//! server.run().expect("Error al iniciar servidor");
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod router;
pub mod server;
pub mod services;
