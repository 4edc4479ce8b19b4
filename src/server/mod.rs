//! HTTP control endpoint.
//!
//! A single-connection-at-a-time server polled once per control-loop tick:
//!
//! 1. `bind()` opens a TCP listener in non-blocking mode.
//! 2. `poll()` attempts one accept; with nothing pending it returns
//!    immediately, so the endpoint never stalls sensor sampling.
//! 3. Once a client is accepted, the request read is synchronous with a
//!    bounded timeout — a stalled client is dropped, never waited on past
//!    the window.
//! 4. One request per connection; every response carries permissive CORS
//!    headers and `Connection: close`, and the socket is closed after a
//!    single response, success or failure.
//!
//! Handler faults degrade to a best-effort 500; if even that write fails
//! the error is swallowed and the connection closed.

pub mod router;

use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::time::Duration;

use log::{info, warn};

use crate::app::ports::SensorPort;
use crate::app::service::AppService;
use router::{Response, dispatch, parse_request_line};

/// Largest request we read; anything past this is ignored.
const RECV_BUF_LEN: usize = 1024;

pub struct ControlServer {
    listener: TcpListener,
    recv_timeout: Duration,
}

impl ControlServer {
    /// Bind `0.0.0.0:<port>` in non-blocking accept mode. Pass port `0`
    /// to let the OS pick a free port (use [`local_addr`](Self::local_addr)
    /// to discover it).
    pub fn bind(port: u16, recv_timeout: Duration) -> io::Result<Self> {
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let listener = TcpListener::bind(addr)?;
        listener.set_nonblocking(true)?;
        info!("HTTP control endpoint listening on port {}", port);
        Ok(Self {
            listener,
            recv_timeout,
        })
    }

    /// The actual bound address (useful when port `0` was passed).
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Service at most one pending connection without blocking. Returns
    /// `true` if a connection was handled.
    pub fn poll(&mut self, app: &mut AppService, hw: &mut impl SensorPort) -> bool {
        match self.listener.accept() {
            Ok((stream, addr)) => {
                info!("Client connected from {}", addr);
                self.serve(stream, app, hw);
                true
            }
            Err(ref e) if e.kind() == io::ErrorKind::WouldBlock => false,
            Err(e) => {
                warn!("Control endpoint accept error: {}", e);
                false
            }
        }
    }

    fn serve(&self, mut stream: TcpStream, app: &mut AppService, hw: &mut impl SensorPort) {
        if let Err(e) = Self::handle(&mut stream, self.recv_timeout, app, hw) {
            warn!("Request error: {}", e);
            // Best effort: the client may already be gone.
            let _ = write_response(&mut stream, &Response::server_error());
        }
        // Dropping the stream closes the connection.
    }

    fn handle(
        stream: &mut TcpStream,
        recv_timeout: Duration,
        app: &mut AppService,
        hw: &mut impl SensorPort,
    ) -> io::Result<()> {
        // The accepted socket inherits non-blocking from the listener;
        // switch to a bounded blocking read for the request itself.
        stream.set_nonblocking(false)?;
        stream.set_read_timeout(Some(recv_timeout))?;

        let mut buf = [0u8; RECV_BUF_LEN];
        let n = stream.read(&mut buf)?;

        let request = String::from_utf8_lossy(&buf[..n]);
        let request_line = request.split("\r\n").next().unwrap_or("");

        let response = match parse_request_line(request_line) {
            Some((method, target)) => dispatch(method, target, app, hw),
            None => Response::not_found(),
        };
        write_response(stream, &response)
    }
}

/// Serialise a [`Response`] with CORS + close headers.
fn write_response(stream: &mut TcpStream, response: &Response) -> io::Result<()> {
    let mut out = String::with_capacity(256);
    out.push_str(&format!(
        "HTTP/1.1 {} {}\r\n",
        response.status.code(),
        response.status.reason()
    ));
    out.push_str("Access-Control-Allow-Origin: *\r\n");
    out.push_str("Access-Control-Allow-Methods: GET, POST, OPTIONS\r\n");
    out.push_str("Access-Control-Allow-Headers: Content-Type\r\n");
    out.push_str("Connection: close\r\n");
    if let Some(body) = &response.body {
        out.push_str("Content-Type: application/json\r\n");
        out.push_str(&format!("Content-Length: {}\r\n", body.len()));
        out.push_str("\r\n");
        out.push_str(body);
    } else {
        out.push_str("\r\n");
    }
    stream.write_all(out.as_bytes())?;
    stream.flush()
}
