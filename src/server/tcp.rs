//! # Servidor TCP
//! src/server/tcp.rs
//!
//! Bucle secuencial: aceptar una conexión, leer la request line, despachar,
//! escribir la respuesta y cerrar. La siguiente conexión se acepta recién
//! cuando la anterior terminó.

use crate::config::Config;
use crate::error::DispatchError;
use crate::router::RequestRouter;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream};
use std::time::{Duration, Instant};

/// Máximo de bytes que se descartan al cerrar una conexión
const LINGER_LIMIT: u64 = 64 * 1024;

/// Tiempo máximo que se espera al cliente después de responder
const LINGER_WINDOW: Duration = Duration::from_millis(500);

/// Servidor HTTP secuencial
pub struct Server {
    config: Config,
    router: RequestRouter,
    listener: Option<TcpListener>,
}

impl Server {
    pub fn new(config: Config, router: RequestRouter) -> Self {
        Self {
            config,
            router,
            listener: None,
        }
    }

    /// Abre el socket de escucha y retorna la dirección real
    ///
    /// Con `port = 0` el sistema elige un puerto libre.
    pub fn bind(&mut self) -> io::Result<SocketAddr> {
        let address = self.config.address();
        let listener = TcpListener::bind(&address)?;
        let local_addr = listener.local_addr()?;

        tracing::info!(address = %local_addr, "Server listening");
        self.listener = Some(listener);
        Ok(local_addr)
    }

    /// Dirección en la que escucha, si ya hizo bind
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.listener.as_ref().and_then(|l| l.local_addr().ok())
    }

    /// Hace bind (si hace falta) y atiende conexiones para siempre
    ///
    /// Solo retorna si el bind falla.
    pub fn run(&mut self) -> io::Result<()> {
        if self.listener.is_none() {
            self.bind()?;
        }

        tracing::info!(
            static_dir = %self.router.static_files().root().display(),
            services = self.router.services().len(),
            "Serving connections sequentially"
        );

        loop {
            if let Err(e) = self.accept_one() {
                tracing::warn!(error = %e, "Failed to accept connection");
            }
        }
    }

    /// Acepta y atiende una sola conexión
    ///
    /// Los errores de la conexión se registran y no se propagan; solo
    /// falla si `accept` falla o si el servidor no hizo bind.
    pub fn accept_one(&self) -> io::Result<()> {
        let listener = self
            .listener
            .as_ref()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "server is not bound"))?;

        let (stream, peer) = listener.accept()?;
        if let Err(e) = self.handle_connection(stream, peer) {
            tracing::warn!(peer = %peer, error = %e, "Connection dropped");
        }
        Ok(())
    }

    fn handle_connection(&self, stream: TcpStream, peer: SocketAddr) -> io::Result<()> {
        let start = Instant::now();
        let mut conn = Connection::new(&stream, start + self.config.read_timeout());

        let line = match read_request_line(&mut conn, self.config.max_request_line)? {
            Some(line) => line,
            None => {
                tracing::debug!(peer = %peer, "Connection closed without a request");
                return Ok(());
            }
        };

        let mut response = match line {
            RequestLine::Complete(line) => {
                tracing::debug!(peer = %peer, request = %line.trim_end(), "Request received");
                self.router.dispatch(&line)
            }
            RequestLine::TooLong => {
                let err = DispatchError::MalformedRequest(format!(
                    "request line exceeds {} bytes",
                    self.config.max_request_line
                ));
                tracing::warn!(peer = %peer, error = %err, "Rejected request line");
                err.into_response()
            }
        };

        conn.write_by = Instant::now() + self.config.write_timeout();
        response.write_to(&mut conn)?;
        linger_close(&mut conn);

        tracing::info!(
            peer = %peer,
            status = response.status().as_u16(),
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Request served"
        );
        Ok(())
    }
}

/// Socket con plazos totales de lectura y escritura
///
/// Antes de cada operación el timeout del socket se ajusta a lo que queda
/// del plazo, así un cliente que manda un byte por vez no lo renueva.
struct Connection<'a> {
    stream: &'a TcpStream,
    read_by: Instant,
    write_by: Instant,
}

impl<'a> Connection<'a> {
    fn new(stream: &'a TcpStream, read_by: Instant) -> Self {
        Self {
            stream,
            read_by,
            write_by: read_by,
        }
    }
}

impl Read for Connection<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.stream.set_read_timeout(Some(time_left(self.read_by)?))?;
        let mut stream = self.stream;
        stream.read(buf)
    }
}

impl Write for Connection<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.stream.set_write_timeout(Some(time_left(self.write_by)?))?;
        let mut stream = self.stream;
        stream.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut stream = self.stream;
        stream.flush()
    }
}

/// Tiempo que falta para `deadline`; error si ya venció
fn time_left(deadline: Instant) -> io::Result<Duration> {
    let left = deadline.saturating_duration_since(Instant::now());
    if left.is_zero() {
        return Err(io::Error::new(
            io::ErrorKind::TimedOut,
            "connection deadline exceeded",
        ));
    }
    Ok(left)
}

/// Cierra la escritura y descarta lo que el cliente aún no envió
///
/// Cerrar un socket con datos sin leer manda un RST, y el cliente puede
/// perder la respuesta. El descarte se corta por bytes y por tiempo.
fn linger_close(conn: &mut Connection<'_>) {
    if conn.stream.shutdown(Shutdown::Write).is_ok() {
        conn.read_by = conn.read_by.min(Instant::now() + LINGER_WINDOW);
        let mut rest = Read::by_ref(conn).take(LINGER_LIMIT);
        let _ = io::copy(&mut rest, &mut io::sink());
    }
}

/// Resultado de leer la primera línea
#[derive(Debug, PartialEq, Eq)]
enum RequestLine {
    Complete(String),
    TooLong,
}

/// Lee hasta `\n`, EOF o `limit` bytes
///
/// `None` si el cliente cerró sin mandar nada.
fn read_request_line<R: Read>(source: R, limit: usize) -> io::Result<Option<RequestLine>> {
    let mut reader = BufReader::new(source.take(limit as u64));
    let mut buffer = Vec::new();

    let read = reader.read_until(b'\n', &mut buffer)?;
    if read == 0 {
        return Ok(None);
    }

    if !buffer.ends_with(b"\n") && read >= limit {
        return Ok(Some(RequestLine::TooLong));
    }

    Ok(Some(RequestLine::Complete(
        String::from_utf8_lossy(&buffer).into_owned(),
    )))
}
