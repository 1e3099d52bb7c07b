//! Session-gated web form around the scanner.
//!
//! Routes:
//! - GET/POST `/` - login form
//! - GET `/logout` - end the session
//! - GET/POST `/detector` - paste an email and see its report

pub mod handlers;
pub mod render;
pub mod session;

use anyhow::anyhow;
use handlers::{AppState, Incoming, Reply};
use std::io::Read;
use std::net::SocketAddr;
use std::sync::Arc;
use tiny_http::{Header, Request, Response, Server};

use crate::config::AppConfig;

const MAX_BODY_BYTES: usize = 1024 * 1024; // 1 MiB

pub struct WebServer {
    server: Arc<Server>,
    state: AppState,
}

/// Stops a running [`WebServer`] from another thread.
#[derive(Clone)]
pub struct ShutdownHandle {
    server: Arc<Server>,
}

impl ShutdownHandle {
    pub fn shutdown(&self) {
        self.server.unblock();
    }
}

impl WebServer {
    pub fn bind(config: &AppConfig) -> anyhow::Result<Self> {
        let bind_addr = config.bind_addr();
        let server = Server::http(&bind_addr)
            .map_err(|e| anyhow!("Failed to start server on {}: {}", bind_addr, e))?;

        Ok(Self {
            server: Arc::new(server),
            state: AppState::new(config.auth.clone()),
        })
    }

    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.server.server_addr().to_ip()
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            server: Arc::clone(&self.server),
        }
    }

    /// Serve requests until [`ShutdownHandle::shutdown`] is called.
    pub fn run(self) {
        match self.local_addr() {
            Some(addr) => log::info!("Listening on http://{}", addr),
            None => log::info!("Listening"),
        }

        for request in self.server.incoming_requests() {
            self.serve(request);
        }

        log::info!("Server stopped");
    }

    fn serve(&self, mut request: Request) {
        let method = request.method().to_string();
        let url = request.url().to_string();
        let path = url.split('?').next().unwrap_or(url.as_str()).to_string();
        let cookie = request
            .headers()
            .iter()
            .find(|h| h.field.equiv("Cookie"))
            .map(|h| h.value.as_str().to_string());

        let reply = match read_request_body(&mut request) {
            Ok(body) => self.state.handle(&Incoming {
                method: &method,
                path: &path,
                cookie: cookie.as_deref(),
                body: &body,
            }),
            Err(reply) => reply,
        };

        log::debug!("{} {} -> {}", method, path, reply.status);

        if let Err(e) = request.respond(into_response(reply)) {
            log::warn!("Failed to send response for {} {}: {}", method, path, e);
        }
    }
}

fn read_request_body(request: &mut Request) -> Result<String, Reply> {
    let mut body = String::new();
    let mut reader = request.as_reader().take((MAX_BODY_BYTES + 1) as u64);
    if let Err(e) = reader.read_to_string(&mut body) {
        log::warn!("Failed to read request body: {}", e);
        return Err(Reply::error(400, "Bad Request"));
    }

    if body.len() > MAX_BODY_BYTES {
        return Err(Reply::error(413, "Payload Too Large"));
    }

    Ok(body)
}

fn into_response(reply: Reply) -> Response<std::io::Cursor<Vec<u8>>> {
    let mut response =
        Response::from_data(reply.body.into_bytes()).with_status_code(reply.status);
    for (name, value) in &reply.headers {
        match Header::from_bytes(name.as_bytes(), value.as_bytes()) {
            Ok(header) => response.add_header(header),
            Err(()) => log::warn!("Dropping invalid header {}: {}", name, value),
        }
    }
    response
}
