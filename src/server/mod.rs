// Server module entry point
// Binds the responder and runs its accept loop

pub mod connection;
pub mod listener;

// `loop` is a keyword, so the module is named server_loop
#[path = "loop.rs"]
pub mod server_loop;

pub use listener::create_listener;
pub use server_loop::start_server_loop;

use std::io;
use std::net::SocketAddr;
use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::{AppState, Config};
use crate::logger::{NoopRequestLog, RequestLog};

/// The mock introspection endpoint, configured but not yet listening
pub struct Responder {
    config: Config,
    request_log: Arc<dyn RequestLog>,
}

impl Responder {
    /// Create a responder that logs nothing per request
    pub fn new(config: Config) -> Self {
        Self {
            config,
            request_log: Arc::new(NoopRequestLog),
        }
    }

    /// Replace the per-request log
    #[must_use]
    pub fn with_request_log(mut self, request_log: Arc<dyn RequestLog>) -> Self {
        self.request_log = request_log;
        self
    }

    /// Bind the configured address. Must be called inside a tokio runtime.
    pub fn bind(self) -> io::Result<BoundResponder> {
        let addr = self
            .config
            .get_socket_addr()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        let listener = create_listener(addr)?;

        Ok(BoundResponder {
            listener,
            state: Arc::new(AppState::new(self.config, self.request_log)),
        })
    }
}

/// A responder with its listener bound
pub struct BoundResponder {
    listener: TcpListener,
    state: Arc<AppState>,
}

impl BoundResponder {
    /// The address actually bound, useful when the configured port is 0
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// The configuration being served
    pub fn config(&self) -> &Config {
        &self.state.config
    }

    /// Serve requests until the process is terminated
    pub async fn serve(self) {
        start_server_loop(self.listener, self.state, Arc::new(AtomicUsize::new(0))).await;
    }
}
