//! # Archivos Estáticos
//! src/router/static_files.rs
//!
//! Sirve archivos desde el directorio raíz configurado. Reglas:
//!
//! - Solo se sirven las extensiones `html, css, js, jpg, jpeg, png`.
//! - Los textos se leen completos y se decodifican; las imágenes se
//!   transmiten byte a byte después del header.
//! - Nunca se sale del directorio raíz (`..`, symlinks hacia afuera, etc.).

use crate::http::mime::content_type_for;
use crate::http::{Response, StatusCode};
use std::fs::{self, File};
use std::io;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Extensiones que se pueden servir
pub const SERVABLE_EXTENSIONS: [&str; 6] = ["html", "css", "js", "jpg", "jpeg", "png"];

/// Extensiones que se envían sin decodificar
pub const BINARY_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Errores al cargar un archivo estático
#[derive(Debug, Error)]
pub enum StaticFileError {
    /// Extensión no permitida, archivo inexistente o directorio
    #[error("static file not found: {0}")]
    NotFound(String),

    /// El path intenta salir del directorio raíz
    #[error("path escapes the static root: {0}")]
    OutsideRoot(String),

    /// Error de disco
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Cargador de archivos bajo un directorio raíz
#[derive(Debug, Clone)]
pub struct StaticFileLoader {
    root: PathBuf,
}

impl StaticFileLoader {
    /// Crea un cargador para `root`
    ///
    /// El directorio no tiene que existir todavía: se resuelve en cada
    /// request.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directorio raíz
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Carga `file` (path relativo a la raíz, sin `/` inicial) y arma la
    /// respuesta 200 con su Content-Type
    pub fn load(&self, file: &str) -> Result<Response, StaticFileError> {
        let extension = extension_of(file);

        if !SERVABLE_EXTENSIONS.contains(&extension) {
            return Err(StaticFileError::NotFound(file.to_string()));
        }

        let path = self.resolve(file)?;
        let response = Response::new(StatusCode::Ok).with_content_type(content_type_for(extension));

        if BINARY_EXTENSIONS.contains(&extension) {
            let handle = File::open(&path).map_err(|source| io_error(&path, source))?;
            Ok(response.with_file(handle))
        } else {
            let bytes = fs::read(&path).map_err(|source| io_error(&path, source))?;
            Ok(response.with_body(&String::from_utf8_lossy(&bytes)))
        }
    }

    /// Resuelve `file` a un archivo existente dentro de la raíz
    fn resolve(&self, file: &str) -> Result<PathBuf, StaticFileError> {
        let mut relative = PathBuf::new();

        for segment in file.split('/') {
            if segment.is_empty() {
                continue;
            }
            // Cada segmento debe ser un nombre normal: nada de `..`, `.`,
            // raíces, prefijos de unidad ni separadores embebidos
            let mut components = Path::new(segment).components();
            match (components.next(), components.next()) {
                (Some(Component::Normal(name)), None) if name == segment => {
                    relative.push(segment)
                }
                _ => return Err(StaticFileError::OutsideRoot(file.to_string())),
            }
        }

        let candidate = self.root.join(&relative);
        if !candidate.is_file() {
            return Err(StaticFileError::NotFound(file.to_string()));
        }

        let root = self
            .root
            .canonicalize()
            .map_err(|source| io_error(&self.root, source))?;
        let canonical = candidate
            .canonicalize()
            .map_err(|source| io_error(&candidate, source))?;

        // Un symlink puede apuntar fuera de la raíz
        if !canonical.starts_with(&root) {
            return Err(StaticFileError::OutsideRoot(file.to_string()));
        }

        Ok(canonical)
    }
}

/// Extensión del archivo: lo que sigue al último `.` del nombre
///
/// ```
/// use web_server::router::static_files::extension_of;
///
/// assert_eq!(extension_of("css/style.min.css"), "css");
/// assert_eq!(extension_of("README"), "");
/// assert_eq!(extension_of("v1.2/README"), "");
/// ```
pub fn extension_of(file: &str) -> &str {
    let name = file.rsplit('/').next().unwrap_or(file);
    match name.rfind('.') {
        Some(dot) => &name[dot + 1..],
        None => "",
    }
}

fn io_error(path: &Path, source: io::Error) -> StaticFileError {
    StaticFileError::Io {
        path: path.display().to_string(),
        source,
    }
}
