//! # Servicios
//!
//! Handlers que se registran en el `ServiceRegistry` al arrancar.
//!
//! Cada handler recibe el `Request` parseado y la respuesta que le sirve
//! de sobre, y retorna el cuerpo JSON.

pub mod currency;

pub use currency::convert_handler;
