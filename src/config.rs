//! # Configuración del Servidor
//! src/config.rs
//!
//! Configuración con soporte para argumentos CLI y variables de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./web_server --port 35000 \
//!   --static-dir ./static \
//!   --read-timeout 5000
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_PORT=35000 STATIC_DIR=./static ./web_server
//! ```

use clap::Parser;
use std::time::Duration;

/// Configuración del servidor
#[derive(Debug, Clone, Parser)]
#[command(name = "web_server")]
#[command(about = "Servidor HTTP de archivos estáticos con servicios registrables")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "35000", env = "HTTP_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "0.0.0.0", env = "HTTP_HOST")]
    pub host: String,

    /// Directorio raíz de los archivos estáticos
    #[arg(long = "static-dir", default_value = "./static", env = "STATIC_DIR")]
    pub static_dir: String,

    // === Timeouts ===

    /// Timeout de lectura por conexión en milisegundos
    #[arg(long = "read-timeout", default_value = "5000", env = "READ_TIMEOUT_MS")]
    pub read_timeout_ms: u64,

    /// Timeout de escritura por conexión en milisegundos
    #[arg(long = "write-timeout", default_value = "5000", env = "WRITE_TIMEOUT_MS")]
    pub write_timeout_ms: u64,

    // === Límites ===

    /// Máximo de bytes aceptados en la request line
    #[arg(long = "max-request-line", default_value = "8192", env = "MAX_REQUEST_LINE")]
    pub max_request_line: usize,
}

impl Config {
    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use web_server::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "0.0.0.0:35000");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_millis(self.write_timeout_ms)
    }

    /// Valida la configuración
    ///
    /// Retorna errores si hay valores inválidos
    pub fn validate(&self) -> Result<(), String> {
        if self.static_dir.trim().is_empty() {
            return Err("Static dir must not be empty".to_string());
        }

        // Un timeout de 0 significa "sin timeout" para el socket
        if self.read_timeout_ms == 0 {
            return Err("Read timeout must be > 0".to_string());
        }
        if self.write_timeout_ms == 0 {
            return Err("Write timeout must be > 0".to_string());
        }

        if self.max_request_line < 16 {
            return Err("Max request line must be >= 16 bytes".to_string());
        }

        Ok(())
    }

    /// Registra un resumen de la configuración
    pub fn print_summary(&self) {
        tracing::info!(
            address = %self.address(),
            static_dir = %self.static_dir,
            read_timeout_ms = self.read_timeout_ms,
            write_timeout_ms = self.write_timeout_ms,
            max_request_line = self.max_request_line,
            "Configuration loaded"
        );
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            port: 35000,
            host: "0.0.0.0".to_string(),
            static_dir: "./static".to_string(),
            read_timeout_ms: 5_000,
            write_timeout_ms: 5_000,
            max_request_line: 8192,
        }
    }
}
